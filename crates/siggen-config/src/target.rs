use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

fn default_trigger_header() -> SmolStr {
    SmolStr::new_inline("X-Signature")
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Configuration {
    /// Compared byte-for-byte against the request URL
    pub url: SmolStr,
    #[serde(default = "default_trigger_header")]
    pub trigger_header: SmolStr,
}
