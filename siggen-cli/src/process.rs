use crate::{
    args::ProcessArgs,
    util::{error_kaomoji, read_body, success_kaomoji},
};
use color_eyre::eyre::{self, Context};
use http::HeaderName;
use siggen::{crypto::SigningKey, Outcome, Policy, RequestDescriptor};
use siggen_config::{key::KeyMaterial, Configuration};
use std::{io::Write, sync::Arc};

async fn load_policy(config: &Configuration) -> eyre::Result<Policy> {
    let key = match config.private_key.load().await? {
        KeyMaterial::Base64Pkcs8(encoded) => SigningKey::from_base64_pkcs8(&encoded),
        KeyMaterial::Pkcs8Pem(pem) => SigningKey::from_pkcs8_pem(pem.trim()),
    }
    .wrap_err("Failed to decode the private key")?;

    let trigger_header = HeaderName::from_bytes(config.target.trigger_header.as_bytes())
        .wrap_err("Invalid trigger header name")?;

    Ok(Policy::builder()
        .target_url(config.target.url.as_str())
        .trigger_header(trigger_header)
        .key(Arc::new(key))
        .build())
}

pub async fn run(args: ProcessArgs) -> eyre::Result<()> {
    let config = Configuration::load(&args.config)
        .await
        .wrap_err_with(|| format!("Failed to load {}", args.config.display()))?;
    let policy = load_policy(&config).await?;

    let body = read_body(args.body.as_deref()).await?;
    let request = args
        .headers
        .into_iter()
        .fold(RequestDescriptor::new(args.url), |req, (name, value)| {
            req.header(name, value)
        })
        .body(body);

    let processed = policy.evaluate(request);
    match processed.outcome {
        Outcome::Signed => println!("{} Request signed", success_kaomoji()),
        Outcome::Skipped(reason) => {
            println!("{} Request left alone: {reason}", success_kaomoji());
        }
        Outcome::FailedOpen(error) => {
            println!(
                "{} Signing failed, forwarding unchanged: {error}",
                error_kaomoji()
            );
        }
    }
    println!();

    let mut stdout = std::io::stdout().lock();
    for (name, value) in &processed.request.headers {
        stdout.write_all(name.as_str().as_bytes())?;
        stdout.write_all(b": ")?;
        stdout.write_all(value.as_bytes())?;
        stdout.write_all(b"\n")?;
    }
    stdout.write_all(b"\n")?;
    stdout.write_all(&processed.request.body)?;
    stdout.write_all(b"\n")?;

    Ok(())
}
