use crate::{
    args::VerifyArgs,
    util::{error_kaomoji, read_body, success_kaomoji},
};
use color_eyre::eyre::{self, Context};
use siggen::crypto;
use tokio::fs;

pub async fn run(args: VerifyArgs) -> eyre::Result<()> {
    let pem = fs::read_to_string(&args.public_key)
        .await
        .wrap_err_with(|| format!("Failed to read {}", args.public_key.display()))?;
    let public_key =
        crypto::parse::public_key(pem.trim()).wrap_err("Failed to parse the public key")?;

    let body = read_body(args.body.as_deref()).await?;
    if let Err(error) = crypto::verify(&body, args.signature.trim(), &public_key) {
        println!("{} Signature is invalid", error_kaomoji());
        return Err(eyre::Report::new(error));
    }

    println!("{} Signature is valid", success_kaomoji());

    Ok(())
}
