use std::env;

use serde::{Deserialize, Serialize};

use self::languages::LanguageConfig;
use self::network::NetworkConfig;

pub mod languages;
pub mod network;

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub network: NetworkConfig,
    pub languages: LanguageConfig,

    /// Bound on app->ui channel capacity (notification bursts)
    pub ui_channel_capacity: usize,
    /// Bound on ui->app channel capacity (user interactions)
    pub app_channel_capacity: usize,
}

impl Config {
    pub fn new() -> Self {
        let mut config = Config::default();

        if let Ok(url) = env::var("YAKU_BACKEND_URL") {
            config.network.backend_url = url;
        }
        if let Some(ms) = env::var("YAKU_CALL_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.network.call_timeout_ms = ms;
        }
        if let Ok(code) = env::var("YAKU_SOURCE_LANG") {
            config.languages.source = code;
        }
        if let Ok(code) = env::var("YAKU_TARGET_LANG") {
            config.languages.target = code;
        }

        config
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            network: NetworkConfig::default(),
            languages: LanguageConfig::default(),
            ui_channel_capacity: 256,
            app_channel_capacity: 64,
        }
    }
}
