//! yt-dlp subprocess extraction backend

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::RelayError;

use super::{Extraction, Extractor};

/// Extracts video metadata by shelling out to the `yt-dlp` binary and
/// parsing its single-JSON dump.
#[derive(Debug, Clone)]
pub struct YtDlpExtractor {
    bin: PathBuf,
    cookie_file: Option<PathBuf>,
    header_overrides: Vec<(String, String)>,
}

impl YtDlpExtractor {
    pub fn new(bin: impl Into<PathBuf>) -> Self {
        Self {
            bin: bin.into(),
            cookie_file: None,
            header_overrides: Vec::new(),
        }
    }

    /// Pass a Netscape-format cookie file through to yt-dlp.
    pub fn with_cookie_file(mut self, path: Option<PathBuf>) -> Self {
        self.cookie_file = path;
        self
    }

    /// Extra HTTP headers yt-dlp sends to the video site.
    pub fn with_header_overrides(mut self, headers: Vec<(String, String)>) -> Self {
        self.header_overrides = headers;
        self
    }

    fn build_args(&self, url: &str) -> Vec<String> {
        let mut args = vec![
            "--dump-single-json".to_string(),
            "--no-warnings".to_string(),
            "--no-playlist".to_string(),
            "--skip-download".to_string(),
        ];
        if let Some(cookies) = &self.cookie_file {
            args.push("--cookies".to_string());
            args.push(cookies.display().to_string());
        }
        for (name, value) in &self.header_overrides {
            args.push("--add-headers".to_string());
            args.push(format!("{}:{}", name, value));
        }
        args.push(url.to_string());
        args
    }
}

#[async_trait]
impl Extractor for YtDlpExtractor {
    async fn extract(&self, url: &str) -> Result<Extraction, RelayError> {
        if url.trim().is_empty() {
            return Err(RelayError::InvalidInput("URL is required".to_string()));
        }

        tracing::info!(url, "extracting video metadata");
        let output = Command::new(&self.bin)
            .args(self.build_args(url))
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await?;

        if !output.status.success() {
            let reason = distill_stderr(&output.stderr);
            tracing::warn!(url, reason = %reason, "extraction failed");
            return Err(RelayError::ExtractionFailed(reason));
        }

        let extraction: Extraction = serde_json::from_slice(&output.stdout)?;
        tracing::debug!(
            url,
            formats = extraction.formats.len(),
            "extraction complete"
        );
        Ok(extraction)
    }
}

/// Reduce yt-dlp's stderr to the most useful single line: the last line
/// starting with "ERROR:", or the whole trimmed output as a fallback.
fn distill_stderr(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    if let Some(line) = text
        .lines()
        .rev()
        .find(|l| l.trim_start().starts_with("ERROR:"))
    {
        return line.trim().to_string();
    }
    let trimmed = text.trim();
    if trimmed.is_empty() {
        "yt-dlp failed with no output".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_args_minimal() {
        let extractor = YtDlpExtractor::new("yt-dlp");
        assert_eq!(
            extractor.build_args("https://example.com/watch?v=abc"),
            vec![
                "--dump-single-json",
                "--no-warnings",
                "--no-playlist",
                "--skip-download",
                "https://example.com/watch?v=abc",
            ]
        );
    }

    #[test]
    fn test_build_args_with_cookies_and_headers() {
        let extractor = YtDlpExtractor::new("yt-dlp")
            .with_cookie_file(Some(PathBuf::from("/tmp/cookies.txt")))
            .with_header_overrides(vec![("X-Forwarded-For".to_string(), "1.2.3.4".to_string())]);
        let args = extractor.build_args("https://example.com/v");
        assert!(args.contains(&"--cookies".to_string()));
        assert!(args.contains(&"/tmp/cookies.txt".to_string()));
        assert!(args.contains(&"--add-headers".to_string()));
        assert!(args.contains(&"X-Forwarded-For:1.2.3.4".to_string()));
        assert_eq!(args.last().unwrap(), "https://example.com/v");
    }

    #[test]
    fn test_distill_stderr_picks_last_error_line() {
        let stderr = b"WARNING: something minor\nERROR: first\nERROR: Video unavailable\n";
        assert_eq!(distill_stderr(stderr), "ERROR: Video unavailable");
    }

    #[test]
    fn test_distill_stderr_fallbacks() {
        assert_eq!(distill_stderr(b"  generic failure \n"), "generic failure");
        assert_eq!(distill_stderr(b""), "yt-dlp failed with no output");
    }
}
