//! Video information structures

use serde::{Deserialize, Serialize};

/// One candidate media stream descriptor as returned by the extraction
/// backend. Lives only for the duration of a single extraction call.
#[derive(Debug, Clone, Deserialize)]
pub struct RawFormat {
    /// Extractor-assigned format ID (not guaranteed unique across calls)
    #[serde(default)]
    pub format_id: String,
    /// Container extension (e.g. "mp4")
    #[serde(default = "default_ext")]
    pub ext: String,
    /// Direct download URL (may be empty)
    #[serde(default)]
    pub url: String,
    /// Video height; absent for audio-only candidates
    pub height: Option<u32>,
    /// Video width
    pub width: Option<u32>,
    /// Frame rate
    pub fps: Option<f64>,
    /// Video codec ("none" marks an audio-only stream)
    pub vcodec: Option<String>,
    /// Audio codec ("none" marks a video-only stream)
    pub acodec: Option<String>,
    /// Exact file size in bytes (if known)
    pub filesize: Option<u64>,
    /// Estimated file size, used only when the exact size is absent
    pub filesize_approx: Option<u64>,
    /// Audio bitrate in kbps
    pub abr: Option<f64>,
}

fn default_ext() -> String {
    "mp4".to_string()
}

impl Default for RawFormat {
    fn default() -> Self {
        Self {
            format_id: String::new(),
            ext: default_ext(),
            url: String::new(),
            height: None,
            width: None,
            fps: None,
            vcodec: None,
            acodec: None,
            filesize: None,
            filesize_approx: None,
            abr: None,
        }
    }
}

impl RawFormat {
    /// Height used for ranking; missing height sorts as 0.
    pub fn sort_height(&self) -> u32 {
        self.height.unwrap_or(0)
    }

    /// Size used for ranking: exact size, else the estimate, else 0.
    pub fn effective_size(&self) -> u64 {
        self.filesize.or(self.filesize_approx).unwrap_or(0)
    }

    /// Known size for labeling (zero counts as unknown).
    pub fn known_size(&self) -> Option<u64> {
        self.filesize
            .filter(|s| *s > 0)
            .or(self.filesize_approx.filter(|s| *s > 0))
    }

    /// Check if the format carries a decodable audio track.
    pub fn has_audio(&self) -> bool {
        self.acodec.as_deref().map(|c| c != "none").unwrap_or(false)
    }
}

/// A deduplicated, labeled, client-facing media variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityOption {
    /// Human-readable quality label (e.g. "1080p60 (MP4) - 100.0 MB")
    pub label: String,
    pub format_id: String,
    pub ext: String,
    pub filesize: Option<u64>,
    pub filesize_approx: Option<u64>,
    pub height: Option<u32>,
    pub width: Option<u32>,
    pub fps: Option<f64>,
    pub vcodec: Option<String>,
    pub acodec: Option<String>,
    pub url: String,
}

/// Response root for an extraction request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoInfo {
    pub title: String,
    /// Formatted as "minutes:seconds", or "Unknown"
    pub duration: String,
    pub thumbnail: Option<String>,
    pub uploader: Option<String>,
    pub view_count: Option<u64>,
    /// "YYYY-MM-DD" when the raw date is parseable, else passed through
    pub upload_date: Option<String>,
    /// Truncated to 200 chars + ellipsis
    pub description: Option<String>,
    pub quality_options: Vec<QualityOption>,
}

/// Format a duration in seconds as "minutes:seconds".
pub fn format_duration(seconds: Option<f64>) -> String {
    match seconds {
        Some(s) if s > 0.0 => {
            let s = s as u64;
            format!("{}:{:02}", s / 60, s % 60)
        }
        _ => "Unknown".to_string(),
    }
}

/// Format a raw "YYYYMMDD" upload date as "YYYY-MM-DD"; anything that
/// does not look like a date is passed through untouched.
pub fn format_upload_date(raw: &str) -> String {
    let bytes = raw.as_bytes();
    if bytes.len() >= 8 && bytes[..8].iter().all(u8::is_ascii_digit) {
        format!("{}-{}-{}", &raw[..4], &raw[4..6], &raw[6..8])
    } else {
        raw.to_string()
    }
}

/// Truncate a description to 200 characters with an ellipsis; empty
/// descriptions map to `None`.
pub fn truncate_description(description: &str) -> Option<String> {
    if description.is_empty() {
        return None;
    }
    let truncated: String = description.chars().take(200).collect();
    Some(format!("{}...", truncated))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_format_effective_size() {
        let fmt = RawFormat {
            filesize: Some(1000),
            filesize_approx: Some(2000),
            ..RawFormat::default()
        };
        assert_eq!(fmt.effective_size(), 1000);

        let fmt = RawFormat {
            filesize_approx: Some(2000),
            ..RawFormat::default()
        };
        assert_eq!(fmt.effective_size(), 2000);

        assert_eq!(RawFormat::default().effective_size(), 0);
    }

    #[test]
    fn test_raw_format_known_size_skips_zero() {
        let fmt = RawFormat {
            filesize: Some(0),
            filesize_approx: Some(500),
            ..RawFormat::default()
        };
        assert_eq!(fmt.known_size(), Some(500));
        assert_eq!(RawFormat::default().known_size(), None);
    }

    #[test]
    fn test_raw_format_has_audio() {
        let fmt = RawFormat {
            acodec: Some("mp4a.40.2".to_string()),
            ..RawFormat::default()
        };
        assert!(fmt.has_audio());

        let fmt = RawFormat {
            acodec: Some("none".to_string()),
            ..RawFormat::default()
        };
        assert!(!fmt.has_audio());

        // A missing codec is not the "none" sentinel
        assert!(!RawFormat::default().has_audio());
    }

    #[test]
    fn test_raw_format_deserialize_defaults() {
        let fmt: RawFormat = serde_json::from_str(r#"{"url": "https://example.com/v"}"#).unwrap();
        assert_eq!(fmt.ext, "mp4");
        assert_eq!(fmt.format_id, "");
        assert!(fmt.height.is_none());

        let fmt: RawFormat = serde_json::from_str(
            r#"{"format_id": "137", "ext": "webm", "url": "https://example.com/v",
                "height": 1080, "fps": 60, "vcodec": "vp9", "acodec": "none",
                "filesize": null, "filesize_approx": 12345}"#,
        )
        .unwrap();
        assert_eq!(fmt.ext, "webm");
        assert_eq!(fmt.height, Some(1080));
        assert_eq!(fmt.fps, Some(60.0));
        assert_eq!(fmt.filesize, None);
        assert_eq!(fmt.filesize_approx, Some(12345));
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Some(185.0)), "3:05");
        assert_eq!(format_duration(Some(59.0)), "0:59");
        assert_eq!(format_duration(Some(3600.0)), "60:00");
        assert_eq!(format_duration(Some(0.0)), "Unknown");
        assert_eq!(format_duration(None), "Unknown");
    }

    #[test]
    fn test_format_upload_date() {
        assert_eq!(format_upload_date("20240115"), "2024-01-15");
        assert_eq!(format_upload_date("not a date"), "not a date");
        assert_eq!(format_upload_date("2024"), "2024");
        // Trailing garbage after a valid date is dropped
        assert_eq!(format_upload_date("20240115T00"), "2024-01-15");
    }

    #[test]
    fn test_truncate_description() {
        assert_eq!(truncate_description(""), None);
        assert_eq!(truncate_description("short"), Some("short...".to_string()));

        let long = "x".repeat(500);
        let truncated = truncate_description(&long).unwrap();
        assert_eq!(truncated.chars().count(), 203);
        assert!(truncated.ends_with("..."));

        // Truncation counts characters, not bytes
        let unicode = "é".repeat(300);
        let truncated = truncate_description(&unicode).unwrap();
        assert_eq!(truncated.chars().count(), 203);
    }
}
