pub mod key;
pub mod target;

use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Configuration {
    pub private_key: key::Configuration,
    pub target: target::Configuration,
}

impl Configuration {
    pub async fn load<P>(path: P) -> eyre::Result<Self>
    where
        P: AsRef<Path>,
    {
        let content = fs::read_to_string(path).await?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> eyre::Result<Self> {
        toml::from_str(content).map_err(eyre::Report::from)
    }
}
