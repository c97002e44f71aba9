use serde::{Deserialize, Serialize};

use self::audio::AudioConfig;
use self::gateway::GatewayConfig;
use self::storage::StorageConfig;

pub mod audio;
pub mod gateway;
pub mod storage;

#[derive(Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub gateway: GatewayConfig,
    pub storage: StorageConfig,
    pub audio: AudioConfig,

    /// Native language code selected at startup
    pub native_lang: Option<String>,
    /// Target language code selected at startup
    pub target_lang: Option<String>,
}

impl Config {
    pub fn new() -> Self {
        Config {
            gateway: GatewayConfig::new(),
            storage: StorageConfig::new(),
            audio: AudioConfig::new(),

            native_lang: std::env::var("LINGOPOP_NATIVE_LANG").ok(),
            target_lang: std::env::var("LINGOPOP_TARGET_LANG").ok(),
        }
    }
}
