use clap::{Args, Parser, Subcommand};
use http::{HeaderName, HeaderValue};
use std::path::PathBuf;

fn parse_header(raw: &str) -> Result<(HeaderName, HeaderValue), String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| "expected a header in the `Name: value` format".to_string())?;

    let name = HeaderName::from_bytes(name.trim().as_bytes()).map_err(|err| err.to_string())?;
    let value = HeaderValue::from_str(value.trim()).map_err(|err| err.to_string())?;

    Ok((name, value))
}

#[derive(Args)]
pub struct ProcessArgs {
    /// Path to the configuration file
    #[arg(long, short)]
    pub config: PathBuf,

    /// Full URL of the request
    #[arg(long, short)]
    pub url: String,

    /// Request header in the `Name: value` format (can be repeated)
    #[arg(long = "header", short = 'H', value_parser = parse_header)]
    pub headers: Vec<(HeaderName, HeaderValue)>,

    /// File containing the request body. Read from stdin if omitted.
    #[arg(long, short)]
    pub body: Option<PathBuf>,
}

#[derive(Args)]
pub struct VerifyArgs {
    /// Path to the PEM encoded public key
    #[arg(long, short)]
    pub public_key: PathBuf,

    /// Base64 encoded signature
    #[arg(long, short)]
    pub signature: String,

    /// File containing the signed body. Read from stdin if omitted.
    #[arg(long, short)]
    pub body: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum ToolSubcommand {
    /// Run the signing policy over a request and print the forwarded request
    Process(ProcessArgs),

    /// Verify the signature of a request body
    Verify(VerifyArgs),
}

#[derive(Parser)]
#[command(about, version)]
pub struct ToolArgs {
    #[clap(subcommand)]
    pub subcommand: ToolSubcommand,
}
