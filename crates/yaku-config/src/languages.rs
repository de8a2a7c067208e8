use serde::{Deserialize, Serialize};

fn default_source() -> String {
    "en".to_string()
}

fn default_target() -> String {
    "ru".to_string()
}

/// Initial language selection; the running selection lives in the pipeline.
#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LanguageConfig {
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default = "default_target")]
    pub target: String,
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            target: default_target(),
        }
    }
}
