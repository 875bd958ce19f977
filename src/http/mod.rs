//! HTTP API facade

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::error::RelayError;
use crate::extractor::Extractor;

pub mod handlers;
pub mod routes;

pub use routes::create_router;

/// Shared state handed to every request handler.
pub struct AppState {
    pub config: ServerConfig,
    pub extractor: Arc<dyn Extractor>,
    pub http_client: reqwest::Client,
}

impl AppState {
    /// Build the state, including the shared upstream HTTP client. Only
    /// the connection phase is bounded; media bodies may stream for as
    /// long as they need.
    pub fn new(config: ServerConfig, extractor: Arc<dyn Extractor>) -> Result<Self, RelayError> {
        let http_client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .build()?;
        Ok(Self {
            config,
            extractor,
            http_client,
        })
    }
}
