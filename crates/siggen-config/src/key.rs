use eyre::Context;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::{env, fmt, path::PathBuf};
use tokio::fs;

/// Private key material as read from its source
pub enum KeyMaterial {
    /// Base64 encoded PKCS#8 DER
    Base64Pkcs8(String),

    /// PKCS#8 PEM document
    Pkcs8Pem(String),
}

impl KeyMaterial {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Base64Pkcs8(content) | Self::Pkcs8Pem(content) => content,
        }
    }
}

#[derive(Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", tag = "type")]
pub enum Configuration {
    /// Base64 encoded PKCS#8 DER, stored in the configuration file itself
    Inline { value: SmolStr },

    /// Base64 encoded PKCS#8 DER, read from an environment variable
    Env { variable: SmolStr },

    /// PKCS#8 PEM file
    PemFile { path: PathBuf },
}

impl Configuration {
    pub async fn load(&self) -> eyre::Result<KeyMaterial> {
        let material = match self {
            Self::Inline { value } => KeyMaterial::Base64Pkcs8(value.to_string()),
            Self::Env { variable } => {
                let value = env::var(variable.as_str()).wrap_err_with(|| {
                    format!("Failed to read the private key from ${variable}")
                })?;

                KeyMaterial::Base64Pkcs8(value)
            }
            Self::PemFile { path } => {
                let pem = fs::read_to_string(path).await.wrap_err_with(|| {
                    format!("Failed to read the private key from {}", path.display())
                })?;

                KeyMaterial::Pkcs8Pem(pem)
            }
        };

        eyre::ensure!(!material.as_str().trim().is_empty(), "Private key is empty");

        Ok(material)
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inline { .. } => f
                .debug_struct("Inline")
                .field("value", &"<redacted>")
                .finish(),
            Self::Env { variable } => f.debug_struct("Env").field("variable", variable).finish(),
            Self::PemFile { path } => f.debug_struct("PemFile").field("path", path).finish(),
        }
    }
}
