//! # vidrelay - Video Format Resolution & Relay API
//!
//! HTTP service that resolves the downloadable media variants of a video
//! page URL and relays the bytes of a chosen variant to the client.
//!
//! ## Features
//!
//! - Format normalization: filter, rank, and deduplicate raw extractor
//!   formats into a short menu of quality options
//! - Streaming relay: forward upstream media bytes without buffering,
//!   with correct download-disposition headers
//! - Pluggable extraction backend (yt-dlp subprocess by default)
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use vidrelay::config::ServerConfig;
//! use vidrelay::extractor::YtDlpExtractor;
//! use vidrelay::http::{create_router, AppState};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig::default();
//!     let extractor = Arc::new(YtDlpExtractor::new(&config.ytdlp_bin));
//!     let state = Arc::new(AppState::new(config, extractor)?);
//!     let app = create_router(state);
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod extractor;
pub mod formats;
pub mod http;
pub mod relay;
pub mod utils;

// Re-export main types
pub use config::ServerConfig;
pub use error::RelayError;
pub use extractor::{Extraction, Extractor, YtDlpExtractor};
pub use formats::{normalize, QualityOption, RawFormat, VideoInfo};

/// Result type alias for vidrelay operations
pub type Result<T> = std::result::Result<T, RelayError>;
