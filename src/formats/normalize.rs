//! Format normalization: filter, rank, deduplicate, and label raw
//! extractor formats into a client-facing menu of quality options.

use std::collections::HashSet;

use crate::error::RelayError;
use crate::formats::model::{QualityOption, RawFormat};
use crate::utils::url::is_absolute_http_url;

/// Hard cap on the number of quality options per extraction.
pub const MAX_QUALITY_OPTIONS: usize = 15;

/// Convert a raw, unordered, often-redundant format list into a ranked,
/// deduplicated list of quality options.
///
/// Candidates are filtered (direct byte streams only), stably sorted by
/// descending height then descending effective size, and collapsed to
/// the best candidate per quality bucket. An empty result is an error,
/// never an empty success.
pub fn normalize(raw_formats: &[RawFormat]) -> Result<Vec<QualityOption>, RelayError> {
    let mut candidates: Vec<&RawFormat> = raw_formats.iter().filter(|f| is_direct_media(f)).collect();

    // Stable sort: fully tied candidates keep their input order.
    candidates.sort_by(|a, b| {
        (b.sort_height(), b.effective_size()).cmp(&(a.sort_height(), a.effective_size()))
    });

    let mut seen_keys = HashSet::new();
    let mut options = Vec::new();

    for fmt in candidates {
        if !seen_keys.insert(dedup_key(fmt)) {
            continue;
        }

        options.push(QualityOption {
            label: get_quality_label(fmt),
            format_id: fmt.format_id.clone(),
            ext: fmt.ext.clone(),
            filesize: fmt.filesize,
            filesize_approx: fmt.filesize_approx,
            height: fmt.height,
            width: fmt.width,
            fps: fmt.fps,
            vcodec: fmt.vcodec.clone(),
            acodec: fmt.acodec.clone(),
            url: fmt.url.clone(),
        });

        if options.len() >= MAX_QUALITY_OPTIONS {
            break;
        }
    }

    if options.is_empty() {
        return Err(RelayError::NoCompatibleFormats);
    }
    Ok(options)
}

/// Check whether a raw format is a direct, relayable byte stream.
///
/// Rejects empty or non-absolute URLs, adaptive-streaming manifests
/// (HLS/DASH), and formats with neither video nor audio content.
fn is_direct_media(fmt: &RawFormat) -> bool {
    if !is_absolute_http_url(&fmt.url) {
        return false;
    }
    if fmt.url.ends_with(".m3u8")
        || fmt.url.ends_with(".mpd")
        || fmt.url.to_ascii_lowercase().contains("manifest")
    {
        return false;
    }
    // Both codecs "none" means no playable content; a missing codec
    // is not the "none" sentinel and passes through.
    !(fmt.vcodec.as_deref() == Some("none") && fmt.acodec.as_deref() == Some("none"))
}

/// Bucket identity used to collapse redundant candidates.
///
/// Video: `{height}p_{ext}`, with a `_{fps}fps` suffix above 30fps.
/// Audio (missing or zero height): `audio_{abr}kbps_{ext}`.
pub fn dedup_key(fmt: &RawFormat) -> String {
    match fmt.height {
        Some(height) if height > 0 => {
            let mut key = format!("{}p_{}", height, fmt.ext);
            if let Some(fps) = fmt.fps {
                if fps > 30.0 {
                    key.push_str(&format!("_{}fps", fps));
                }
            }
            key
        }
        _ => format!("audio_{}kbps_{}", fmt.abr.unwrap_or(128.0), fmt.ext),
    }
}

/// Generate a user-friendly quality label.
pub fn get_quality_label(fmt: &RawFormat) -> String {
    let ext = fmt.ext.to_uppercase();

    match fmt.height {
        Some(height) if height > 0 => {
            let mut quality = format!("{}p", height);
            if let Some(fps) = fmt.fps {
                if fps > 30.0 {
                    quality.push_str(&format!("{}", fps));
                }
            }
            match fmt.known_size() {
                Some(size) => format!("{} ({}) - {}", quality, ext, format_filesize(Some(size))),
                None => format!("{} ({})", quality, ext),
            }
        }
        _ => {
            if fmt.has_audio() {
                format!("Audio Only ({}kbps {})", fmt.abr.unwrap_or(128.0), ext)
            } else {
                format!("Unknown Quality ({})", ext)
            }
        }
    }
}

/// Convert a byte count to a human-readable size with one decimal place.
/// Zero or missing sizes format as "Unknown".
pub fn format_filesize(size_bytes: Option<u64>) -> String {
    let Some(size) = size_bytes.filter(|s| *s > 0) else {
        return "Unknown".to_string();
    };

    let mut value = size as f64;
    for unit in ["B", "KB", "MB", "GB"] {
        if value < 1024.0 {
            return format!("{:.1} {}", value, unit);
        }
        value /= 1024.0;
    }
    format!("{:.1} TB", value)
}
