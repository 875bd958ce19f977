//! Video metadata extraction

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::RelayError;
use crate::formats::RawFormat;

pub mod ytdlp;

pub use ytdlp::YtDlpExtractor;

/// Raw extraction result for a single video page, before any format
/// filtering or labeling happens.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Extraction {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub uploader: Option<String>,
    #[serde(default)]
    pub view_count: Option<u64>,
    #[serde(default)]
    pub upload_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub formats: Vec<RawFormat>,
}

/// Backend that resolves a video page URL into metadata and candidate
/// formats. Extraction may take a while; implementations should not
/// impose their own deadline.
#[async_trait]
pub trait Extractor: Send + Sync {
    async fn extract(&self, url: &str) -> Result<Extraction, RelayError>;
}
