//! Streams media bytes from an upstream host through to a client.
//!
//! The upstream response body is re-chunked into fixed-size pieces so
//! downstream consumers see a predictable chunk size regardless of how
//! the upstream host frames its transfer.

use bytes::Bytes;
use futures_util::stream::{self, BoxStream};
use futures_util::{StreamExt, TryStreamExt};
use reqwest::header;
use url::Url;

use crate::error::RelayError;
use crate::utils::url::percent_encode_strict;

/// Size of each chunk handed to the client.
pub const CHUNK_SIZE: usize = 8192;

/// Browser user agent sent upstream. Many CDNs refuse requests from
/// generic HTTP client agents.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Per-request relay options.
#[derive(Debug, Clone, Default)]
pub struct RelayOptions {
    /// Referer sent upstream; derived from the media URL when absent.
    pub referer: Option<String>,
}

/// An open upstream response ready to be relayed.
pub struct UpstreamStream {
    pub status: u16,
    pub content_type: String,
    pub content_length: Option<String>,
    pub stream: BoxStream<'static, Result<Bytes, RelayError>>,
}

impl std::fmt::Debug for UpstreamStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamStream")
            .field("status", &self.status)
            .field("content_type", &self.content_type)
            .field("content_length", &self.content_length)
            .finish_non_exhaustive()
    }
}

/// Open a streaming GET against the media URL and return its body as a
/// stream of fixed-size chunks. Only 200 and 206 upstream responses are
/// accepted.
pub async fn open_stream(
    client: &reqwest::Client,
    media_url: &str,
    options: &RelayOptions,
) -> Result<UpstreamStream, RelayError> {
    let referer = options
        .referer
        .clone()
        .or_else(|| derive_referer(media_url));

    let mut request = client
        .get(media_url)
        .header(header::USER_AGENT, USER_AGENT)
        .header(header::ACCEPT, "*/*")
        .header(header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
        .header(header::ACCEPT_ENCODING, "identity")
        .header(header::RANGE, "bytes=0-");
    if let Some(referer) = referer {
        request = request.header(header::REFERER, referer);
    }

    let response = request.send().await?;
    let status = response.status();
    if status.as_u16() != 200 && status.as_u16() != 206 {
        tracing::warn!(status = status.as_u16(), url = media_url, "upstream refused media request");
        return Err(RelayError::UpstreamFetchFailed {
            status: status.as_u16(),
        });
    }

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("video/mp4")
        .to_string();
    let content_length = response
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let stream = response
        .bytes_stream()
        .map_err(|e| {
            tracing::error!(error = %e, "upstream stream interrupted");
            RelayError::UpstreamStreamInterrupted(e.to_string())
        })
        .map_ok(|chunk| stream::iter(split_chunk(chunk).into_iter().map(Ok)))
        .try_flatten()
        .boxed();

    Ok(UpstreamStream {
        status: status.as_u16(),
        content_type,
        content_length,
        stream,
    })
}

/// Split an upstream chunk into pieces of at most `CHUNK_SIZE` bytes.
/// Slicing `Bytes` is a refcount bump, not a copy.
pub fn split_chunk(chunk: Bytes) -> Vec<Bytes> {
    if chunk.len() <= CHUNK_SIZE {
        return vec![chunk];
    }
    let mut pieces = Vec::with_capacity(chunk.len() / CHUNK_SIZE + 1);
    let mut offset = 0;
    while offset < chunk.len() {
        let end = (offset + CHUNK_SIZE).min(chunk.len());
        pieces.push(chunk.slice(offset..end));
        offset = end;
    }
    pieces
}

/// Build a `Content-Disposition` attachment header value with the
/// filename carried in RFC 5987 extended form, so non-ASCII titles
/// survive intact.
pub fn content_disposition(filename: &str) -> String {
    format!(
        "attachment; filename*=UTF-8''{}",
        percent_encode_strict(filename)
    )
}

/// Derive a plausible referer from the media URL's origin.
pub fn derive_referer(media_url: &str) -> Option<String> {
    let parsed = Url::parse(media_url).ok()?;
    let host = parsed.host_str()?;
    Some(format!("{}://{}/", parsed.scheme(), host))
}
