use serde::{Deserialize, Serialize};

fn default_backend_url() -> String {
    "ws://127.0.0.1:1337/bridge".to_string()
}

fn default_call_timeout_ms() -> u64 {
    // The translation backend answers well within 8 seconds or not at all.
    8000
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct NetworkConfig {
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
    /// Upper bound on a single remote call, in milliseconds
    #[serde(default = "default_call_timeout_ms")]
    pub call_timeout_ms: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            call_timeout_ms: default_call_timeout_ms(),
        }
    }
}
