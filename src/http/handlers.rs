//! Request handlers for the relay API

use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::RelayError;
use crate::formats::{
    format_duration, format_upload_date, normalize, truncate_description, VideoInfo,
};
use crate::relay::{content_disposition, open_stream, RelayOptions};
use crate::utils::filename::to_safe_filename;
use crate::utils::url::{build_proxy_url, is_absolute_http_url, percent_decode};

use super::AppState;

/// Handler-level error: every failure surfaces to the client as a 400
/// with a JSON `detail` field.
pub struct ApiError(RelayError);

impl From<RelayError> for ApiError {
    fn from(err: RelayError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let detail = match &self.0 {
            RelayError::InvalidInput(msg) => msg.clone(),
            other => other.to_string(),
        };
        tracing::error!(error = %self.0, "request failed");
        (StatusCode::BAD_REQUEST, Json(json!({ "detail": detail }))).into_response()
    }
}

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    #[serde(default)]
    pub url: String,
}

/// Resolve a video page URL into metadata plus a ranked quality menu.
pub async fn extract_video(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ExtractRequest>,
) -> Result<Json<VideoInfo>, ApiError> {
    if request.url.trim().is_empty() {
        return Err(RelayError::InvalidInput("URL is required".to_string()).into());
    }

    let extraction = state.extractor.extract(&request.url).await?;
    let quality_options = normalize(&extraction.formats)?;

    let info = VideoInfo {
        title: extraction
            .title
            .unwrap_or_else(|| "Unknown Title".to_string()),
        duration: format_duration(extraction.duration),
        thumbnail: extraction.thumbnail,
        uploader: extraction.uploader,
        view_count: extraction.view_count,
        upload_date: extraction.upload_date.as_deref().map(format_upload_date),
        description: extraction
            .description
            .as_deref()
            .and_then(truncate_description),
        quality_options,
    };
    tracing::info!(
        title = %info.title,
        options = info.quality_options.len(),
        "extraction served"
    );
    Ok(Json(info))
}

#[derive(Debug, Deserialize)]
pub struct DownloadProxyParams {
    pub video_url: String,
    pub filename: String,
}

/// Relay upstream media bytes to the client as a file download.
///
/// Query values arrive percent-decoded once by the HTTP layer and are
/// decoded a second time here, because download links carry their
/// values double-encoded to survive intermediate rewriting.
pub async fn download_proxy(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DownloadProxyParams>,
) -> Result<Response, ApiError> {
    let video_url = percent_decode(&params.video_url)?;
    let filename = percent_decode(&params.filename)?;
    if video_url.trim().is_empty() {
        return Err(RelayError::InvalidInput("video_url is required".to_string()).into());
    }
    if filename.trim().is_empty() {
        return Err(RelayError::InvalidInput("filename is required".to_string()).into());
    }

    let options = RelayOptions {
        referer: state.config.referer.clone(),
    };
    let upstream = open_stream(&state.http_client, &video_url, &options).await?;
    tracing::info!(
        filename = %filename,
        upstream_status = upstream.status,
        "relaying media stream"
    );

    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, upstream.content_type)
        .header(header::CONTENT_DISPOSITION, content_disposition(&filename))
        .header(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")
        .header(header::ACCESS_CONTROL_EXPOSE_HEADERS, "Content-Disposition")
        .header(header::CACHE_CONTROL, "no-cache");
    if let Some(length) = upstream.content_length {
        builder = builder.header(header::CONTENT_LENGTH, length);
    }

    builder
        .body(Body::from_stream(upstream.stream))
        .map_err(|e| ApiError(RelayError::InvalidInput(e.to_string())))
}

fn default_ext() -> String {
    "mp4".to_string()
}

#[derive(Debug, Deserialize)]
pub struct DownloadFormatParams {
    pub format_url: String,
    pub title: String,
    #[serde(default = "default_ext")]
    pub ext: String,
}

/// A ready-to-use download link pointing at the proxy endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct DownloadLink {
    pub download_url: String,
    pub filename: String,
}

/// Turn a chosen format into a proxied download link with a sanitized
/// filename.
pub async fn download_format(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DownloadFormatParams>,
) -> Result<Json<DownloadLink>, ApiError> {
    if !is_absolute_http_url(&params.format_url) {
        return Err(RelayError::InvalidInput("Invalid format URL".to_string()).into());
    }

    let filename = to_safe_filename(&params.title, &params.ext)?;
    let download_url = build_proxy_url(state.config.base_url(), &params.format_url, &filename);
    Ok(Json(DownloadLink {
        download_url,
        filename,
    }))
}

pub async fn root() -> Json<serde_json::Value> {
    Json(json!({ "message": "Video relay API is running" }))
}

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy" }))
}
