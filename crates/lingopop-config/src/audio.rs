use std::env;

use serde::{Deserialize, Serialize};

fn default_sample_rate() -> u32 {
    24_000
}

fn default_channels() -> u16 {
    1
}

/// Playback parameters for synthesized speech. The service returns headerless
/// PCM, so rate and channel count come from here, never from the payload.
#[derive(Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
    #[serde(default = "default_channels")]
    pub channels: u16,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
            channels: default_channels(),
        }
    }
}

impl AudioConfig {
    pub fn new() -> Self {
        Self {
            sample_rate: env::var("LINGOPOP_SAMPLE_RATE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_sample_rate),
            channels: env::var("LINGOPOP_CHANNELS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_channels),
        }
    }
}
