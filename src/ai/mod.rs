//! Image generation service integration
//!
//! Provides the interface to the poehali.dev image API used to generate
//! avatar illustrations.

pub mod client;
pub mod mock;

pub use client::PoehaliImageClient;
pub use mock::MockImageClient;

use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ImageGenerationService: Send + Sync {
    /// Generate an image for `prompt`, returning the hosted image URL.
    async fn generate_image(&self, prompt: &str) -> Result<String>;
}
