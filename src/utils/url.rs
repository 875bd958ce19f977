//! URL helpers for validating media URLs and building proxy links

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::Url;

use crate::error::RelayError;

/// Percent-encoding set that escapes everything except unreserved
/// characters (letters, digits, `-`, `.`, `_`, `~`). Both query values
/// of a proxy link and RFC 5987 filenames use this set.
pub const STRICT_ENCODE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Check if a string is an absolute http(s) URL.
pub fn is_absolute_http_url(raw: &str) -> bool {
    match Url::parse(raw) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

/// Percent-encode a string with the strict set.
pub fn percent_encode_strict(input: &str) -> String {
    utf8_percent_encode(input, STRICT_ENCODE).to_string()
}

/// Decode a percent-encoded string; fails on invalid UTF-8.
pub fn percent_decode(input: &str) -> Result<String, RelayError> {
    percent_decode_str(input)
        .decode_utf8()
        .map(|s| s.into_owned())
        .map_err(|e| RelayError::InvalidInput(format!("invalid percent-encoding: {}", e)))
}

/// Build a download-proxy link pointing back at this server, with both
/// query values percent-encoded.
pub fn build_proxy_url(base_url: &str, media_url: &str, filename: &str) -> String {
    format!(
        "{}/download-proxy?video_url={}&filename={}",
        base_url.trim_end_matches('/'),
        percent_encode_strict(media_url),
        percent_encode_strict(filename),
    )
}
