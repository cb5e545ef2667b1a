use super::ImageGenerationService;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

enum MockResponse {
    Url(String),
    UpstreamError(String),
}

#[derive(Clone)]
pub struct MockImageClient {
    responses: Arc<Mutex<Vec<MockResponse>>>,
    prompts: Arc<Mutex<Vec<String>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockImageClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_url_response(self, url: String) -> Self {
        self.responses.lock().unwrap().push(MockResponse::Url(url));
        self
    }

    pub fn with_upstream_error(self, detail: String) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push(MockResponse::UpstreamError(detail));
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Prompts received so far, in call order.
    pub fn recorded_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Default for MockImageClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageGenerationService for MockImageClient {
    async fn generate_image(&self, prompt: &str) -> Result<String> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;

        self.prompts.lock().unwrap().push(prompt.to_string());

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            // Default mock response
            return Ok("https://images.poehali.dev/generated.png".to_string());
        }

        let index = (*count - 1) % responses.len();
        match &responses[index] {
            MockResponse::Url(url) => Ok(url.clone()),
            MockResponse::UpstreamError(detail) => Err(Error::Upstream(detail.clone())),
        }
    }
}
