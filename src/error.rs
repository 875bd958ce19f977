//! Error types for vidrelay

use thiserror::Error;

/// Main error type for vidrelay operations
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Error extracting video: {0}")]
    ExtractionFailed(String),

    #[error("No compatible video formats found")]
    NoCompatibleFormats,

    #[error("Failed to fetch video: {status}")]
    UpstreamFetchFailed { status: u16 },

    #[error("Error streaming content: {0}")]
    UpstreamStreamInterrupted(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),
}

impl RelayError {
    /// Check if the error happened after the upstream response headers
    /// were accepted (the client stream can only terminate early at that
    /// point, no error payload is possible anymore).
    pub fn is_mid_stream(&self) -> bool {
        matches!(self, RelayError::UpstreamStreamInterrupted(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            RelayError::UpstreamFetchFailed { status: 404 }.to_string(),
            "Failed to fetch video: 404"
        );
        assert_eq!(
            RelayError::NoCompatibleFormats.to_string(),
            "No compatible video formats found"
        );
        assert_eq!(
            RelayError::ExtractionFailed("Video unavailable".to_string()).to_string(),
            "Error extracting video: Video unavailable"
        );
    }

    #[test]
    fn test_is_mid_stream() {
        assert!(RelayError::UpstreamStreamInterrupted("reset".to_string()).is_mid_stream());
        assert!(!RelayError::UpstreamFetchFailed { status: 403 }.is_mid_stream());
    }
}
