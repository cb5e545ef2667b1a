//! Data models and structures
//!
//! Defines the transient request/response records for both avatar
//! operations, the wire types for the poehali.dev API, and service
//! configuration.

use serde::{Deserialize, Serialize};

/// Request for the part-of-speech avatar operation.
///
/// Fields default to empty strings so an absent field and an empty field
/// validate the same way.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartOfSpeechAvatarRequest {
    pub part_of_speech: String,
    pub prompt: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartOfSpeechAvatarResponse {
    pub image_url: String,
    /// Echoes the request's `partOfSpeech`, untouched.
    pub part_of_speech: String,
}

/// Request for the speech-part avatar operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpeechPartAvatarRequest {
    pub speech_part_id: String,
    pub prompt: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechPartAvatarResponse {
    pub avatar_url: String,
    /// Echoes the request's `speechPartId`, untouched.
    pub speech_part_id: String,
}

// poehali.dev API request/response models
#[derive(Debug, Serialize)]
pub struct ImageGenerationRequest {
    pub prompt: String,
    pub model: String,
}

#[derive(Debug, Deserialize)]
pub struct ImageGenerationResponse {
    /// Hosted URL of the generated image. May be absent on a 200 response.
    pub url: Option<String>,
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Bearer credential for poehali.dev. When unset the server still
    /// starts and generation requests answer 500.
    pub api_key: Option<String>,
    pub api_base_url: String,
    pub bind_addr: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            api_key: std::env::var("POEHALI_API_KEY")
                .ok()
                .filter(|key| !key.is_empty()),
            api_base_url: std::env::var("POEHALI_API_BASE_URL")
                .unwrap_or_else(|_| "https://api.poehali.dev".to_string()),
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
        }
    }
}
