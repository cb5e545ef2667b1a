//! Application wiring: configuration, state construction, serve loop.

use crate::ai::{ImageGenerationService, PoehaliImageClient};
use crate::http::{create_router, AppState};
use crate::models::Config;
use crate::Result;
use axum::Router;
use std::sync::Arc;
use tracing::{info, warn};

/// Owns the configured router and the address it serves on.
pub struct App {
    router: Router,
    bind_addr: String,
}

impl App {
    /// Build an app from explicit state.
    ///
    /// This is primarily useful for integration tests and local harnesses
    /// that need to inject mocks.
    pub fn with_state(state: AppState, bind_addr: String) -> Self {
        Self {
            router: create_router(state),
            bind_addr,
        }
    }

    /// Construct an app from loaded configuration.
    pub fn from_config(config: Config) -> Self {
        let image: Option<Arc<dyn ImageGenerationService>> = match &config.api_key {
            Some(key) => Some(Arc::new(PoehaliImageClient::new(
                key.clone(),
                config.api_base_url.clone(),
            ))),
            None => {
                warn!("POEHALI_API_KEY not set; generation requests will be rejected");
                None
            }
        };

        Self::with_state(AppState::new(image), config.bind_addr)
    }

    /// Bind and serve until the process is stopped.
    pub async fn run(self) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(&self.bind_addr).await?;
        info!("Listening on {}", self.bind_addr);
        axum::serve(listener, self.router).await?;
        Ok(())
    }
}
