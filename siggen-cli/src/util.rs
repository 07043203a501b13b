use color_eyre::eyre::{self, Context};
use owo_colors::{OwoColorize, Stream};
use std::{fmt::Display, path::Path};
use tokio::{fs, io::AsyncReadExt};

#[inline]
pub fn error_kaomoji() -> impl Display {
    "(┬┬﹏┬┬)".if_supports_color(Stream::Stdout, |text| text.red())
}

#[inline]
pub fn success_kaomoji() -> impl Display {
    "(^///^)".if_supports_color(Stream::Stdout, |text| text.green())
}

/// Read the body from the file, or from stdin if there is none
pub async fn read_body(path: Option<&Path>) -> eyre::Result<Vec<u8>> {
    if let Some(path) = path {
        return fs::read(path)
            .await
            .wrap_err_with(|| format!("Failed to read the body from {}", path.display()));
    }

    let mut body = Vec::new();
    tokio::io::stdin()
        .read_to_end(&mut body)
        .await
        .wrap_err("Failed to read the body from stdin")?;

    Ok(body)
}
