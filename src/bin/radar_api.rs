//! radar_api: HTTP front end for the token evaluator
//!
//! Environment:
//!   PORT or RADAR_PORT   bind port (8080)
//!   RADAR_HOST           bind host (0.0.0.0)
//!   RUST_LOG             log filter (info)
//!   MORALIS_API_KEY, WHOIS_API_KEY, WEBDRIVER_URL, RADAR_HTTP_TIMEOUT_SECS

use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use token_radar::api::{create_router, AppState};
use token_radar::{AppConfig, TokenEvaluator, APP_NAME, APP_VERSION};

/// Hosting platforms set PORT; RADAR_PORT is for local runs
fn bind_addr() -> eyre::Result<SocketAddr> {
    let host = std::env::var("RADAR_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = ["PORT", "RADAR_PORT"]
        .iter()
        .find_map(|var| std::env::var(var).ok()?.parse::<u16>().ok())
        .unwrap_or(8080);
    Ok(format!("{}:{}", host, port).parse()?)
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("⚠️ Ctrl+C handler unavailable: {}", e);
        std::future::pending::<()>().await;
    }
    info!("🛑 Shutdown requested");
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    let config = AppConfig::from_env();
    let state = Arc::new(AppState::new(Arc::new(TokenEvaluator::from_config(&config))));
    let app = create_router(state.clone());
    let addr = bind_addr()?;

    info!("🚀 {} API v{} listening on http://{}", APP_NAME, APP_VERSION, addr);
    info!("   POST /v1/evaluate  {{\"url\": \"<dexscreener pair url>\"}}");
    info!("   GET  /v1/stats");
    info!("   GET  /v1/health");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(ctrl_c()).await?;

    info!("👋 Stopped after {}s", state.uptime_seconds());
    Ok(())
}
