use crate::error::Result;
use crate::transport::TransportKind;
use serde::{Deserialize, Serialize};

/// Root of the optional `config.toml`.
///
/// Declares the static speaker roster (browser-hosted models have no
/// programmatic discovery, so they are configured here) and defaults
/// merged into session creation when flags are omitted.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct ConfigRoot {
    #[serde(rename = "speaker", default)]
    pub speakers: Vec<SpeakerConfig>,
    #[serde(default)]
    pub default_round_limit: Option<u32>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct SpeakerConfig {
    pub name: String,
    pub transport: TransportKind,
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

impl ConfigRoot {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }
}
