//! Server configuration
//!
//! Process-wide settings passed into the API facade at startup. Nothing
//! here is touched by the normalizer or the relay after construction.

use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the relay server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Public base URL used when building download-proxy links
    /// (trailing slashes are ignored).
    pub public_base_url: String,
    /// Path to the yt-dlp binary used by the default extractor.
    pub ytdlp_bin: PathBuf,
    /// Optional Netscape cookie file handed to the extractor.
    pub cookie_file: Option<PathBuf>,
    /// Extra headers handed to the extractor, as (name, value) pairs.
    pub header_overrides: Vec<(String, String)>,
    /// Fixed Referer for upstream relay requests. When unset, the relay
    /// derives one from the media URL origin.
    pub referer: Option<String>,
    /// Connect timeout for upstream media requests.
    pub connect_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            public_base_url: "http://localhost:8000".to_string(),
            ytdlp_bin: PathBuf::from("yt-dlp"),
            cookie_file: None,
            header_overrides: Vec::new(),
            referer: None,
            connect_timeout: Duration::from_secs(30),
        }
    }
}

impl ServerConfig {
    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.public_base_url.trim_end_matches('/')
    }
}

/// Parse a "Name: value" header override as given on the command line.
pub fn parse_header_override(raw: &str) -> Option<(String, String)> {
    let (name, value) = raw.split_once(':')?;
    let name = name.trim();
    let value = value.trim();
    if name.is_empty() || value.is_empty() {
        return None;
    }
    Some((name.to_string(), value.to_string()))
}
