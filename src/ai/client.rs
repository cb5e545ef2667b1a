use super::ImageGenerationService;
use crate::models::{ImageGenerationRequest, ImageGenerationResponse};
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

const GENERATE_PATH: &str = "/v1/images/generate";
const IMAGE_MODEL: &str = "flux";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

pub struct PoehaliImageClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl PoehaliImageClient {
    pub fn new(api_key: String, base_url: String) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            api_key,
            base_url,
        }
    }
}

#[async_trait]
impl ImageGenerationService for PoehaliImageClient {
    async fn generate_image(&self, prompt: &str) -> Result<String> {
        tracing::debug!("Sending image generation request to poehali.dev");

        let request = ImageGenerationRequest {
            prompt: prompt.to_string(),
            model: IMAGE_MODEL.to_string(),
        };

        let url = format!("{}{}", self.base_url, GENERATE_PATH);
        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send request to poehali.dev: {}", e);
                e
            })?;

        // Anything other than a plain 200 counts as an upstream failure.
        if response.status() != StatusCode::OK {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("poehali.dev API error (status {}): {}", status, error_text);
            return Err(Error::Upstream(format!(
                "poehali.dev API error (status {}): {}",
                status, error_text
            )));
        }

        let body: ImageGenerationResponse = response.json().await?;
        Ok(body.url.unwrap_or_default())
    }
}
