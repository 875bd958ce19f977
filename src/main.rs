//! vidrelay server binary

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use vidrelay::config::{parse_header_override, ServerConfig};
use vidrelay::extractor::YtDlpExtractor;
use vidrelay::http::{create_router, AppState};

#[derive(Parser, Debug)]
#[command(name = "vidrelay", version, about = "Video format resolution and relay API")]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "0.0.0.0:8000")]
    listen: String,

    /// Public base URL used in generated download links
    #[arg(long, default_value = "http://localhost:8000")]
    public_url: String,

    /// Path to the yt-dlp binary
    #[arg(long, default_value = "yt-dlp")]
    ytdlp_bin: PathBuf,

    /// Netscape-format cookie file passed to the extractor
    #[arg(long)]
    cookies: Option<PathBuf>,

    /// Extra extractor header, as "Name: value" (repeatable)
    #[arg(long = "extractor-header")]
    extractor_headers: Vec<String>,

    /// Fixed Referer for upstream media requests
    #[arg(long)]
    referer: Option<String>,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("vidrelay=info,tower_http=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let args = Args::parse();

    let header_overrides: Vec<(String, String)> = args
        .extractor_headers
        .iter()
        .filter_map(|raw| {
            let parsed = parse_header_override(raw);
            if parsed.is_none() {
                tracing::warn!(raw = %raw, "ignoring malformed extractor header");
            }
            parsed
        })
        .collect();

    let config = ServerConfig {
        public_base_url: args.public_url,
        ytdlp_bin: args.ytdlp_bin,
        cookie_file: args.cookies,
        header_overrides,
        referer: args.referer,
        ..ServerConfig::default()
    };

    let extractor = Arc::new(
        YtDlpExtractor::new(&config.ytdlp_bin)
            .with_cookie_file(config.cookie_file.clone())
            .with_header_overrides(config.header_overrides.clone()),
    );
    let state = Arc::new(AppState::new(config, extractor)?);
    let app = create_router(state);

    let addr: SocketAddr = args
        .listen
        .parse()
        .with_context(|| format!("invalid listen address: {}", args.listen))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!(%addr, "vidrelay listening");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
