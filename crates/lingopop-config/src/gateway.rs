use std::env;

use serde::{Deserialize, Serialize};

fn default_api_base() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_text_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_image_model() -> String {
    "gemini-2.5-flash-image".to_string()
}

fn default_tts_model() -> String {
    "gemini-2.5-flash-preview-tts".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_text_model")]
    pub text_model: String,
    #[serde(default = "default_image_model")]
    pub image_model: String,
    #[serde(default = "default_tts_model")]
    pub tts_model: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: default_api_base(),
            text_model: default_text_model(),
            image_model: default_image_model(),
            tts_model: default_tts_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl GatewayConfig {
    pub fn new() -> Self {
        Self {
            api_key: env::var("GEMINI_API_KEY").unwrap_or_default(),
            api_base: env::var("GEMINI_API_BASE").unwrap_or_else(|_| default_api_base()),
            text_model: env::var("GEMINI_TEXT_MODEL").unwrap_or_else(|_| default_text_model()),
            image_model: env::var("GEMINI_IMAGE_MODEL").unwrap_or_else(|_| default_image_model()),
            tts_model: env::var("GEMINI_TTS_MODEL").unwrap_or_else(|_| default_tts_model()),
            timeout_secs: env::var("GEMINI_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_timeout_secs),
        }
    }
}
