//! vibescan HTTP server binary.
//!
//! Starts an axum HTTP server exposing the HUD endpoints backed by the
//! profiling engine and a gviz profiles feed.
//!
//! # Environment Variables
//!
//! - `PROFILES_FEED_URL`   — gviz feed URL (required)
//! - `PORT`                — HTTP port (default: 8080)
//! - `CACHE_TTL_SECONDS`   — profile cache lifetime (default: 300)
//! - `VIBESCAN_MODE`       — normalization: "damped" (default) or "simple"
//! - `VIBESCAN_SUMMARY`    — "deterministic" (default) or "randomized"
//! - `RUST_LOG`            — Tracing filter (default: "info")
//!
//! # Usage
//!
//! ```bash
//! PROFILES_FEED_URL=https://... cargo run --bin server
//! ```

use std::sync::Arc;

use anyhow::Context;

use vibescan::engine::{Engine, EngineConfig};
use vibescan::feed::GvizFeed;
use vibescan::normalize::NormalizationMode;
use vibescan::server::{app_router, AppState};
use vibescan::summary::SummaryMode;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,vibescan=debug".into()),
        )
        .init();

    let feed_url =
        std::env::var("PROFILES_FEED_URL").context("PROFILES_FEED_URL must be set")?;
    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let bind_addr = format!("0.0.0.0:{}", port);

    let mut config = EngineConfig::default();
    if let Ok(ttl) = std::env::var("CACHE_TTL_SECONDS") {
        config.ttl_seconds = ttl
            .parse()
            .context("CACHE_TTL_SECONDS must be a number of seconds")?;
    }
    if let Ok(mode) = std::env::var("VIBESCAN_MODE") {
        config.normalization_mode = match mode.as_str() {
            "simple" => NormalizationMode::Simple,
            "damped" => NormalizationMode::Damped,
            other => anyhow::bail!("unknown VIBESCAN_MODE '{}'", other),
        };
    }
    if let Ok(mode) = std::env::var("VIBESCAN_SUMMARY") {
        config.summary_mode = match mode.as_str() {
            "deterministic" => SummaryMode::Deterministic,
            "randomized" => SummaryMode::Randomized,
            other => anyhow::bail!("unknown VIBESCAN_SUMMARY '{}'", other),
        };
    }

    let feed = Arc::new(GvizFeed::new(feed_url)?);
    let engine = Arc::new(Engine::new(config, feed));
    let app = app_router(AppState::new(engine));

    tracing::info!("vibescan server starting on {}", bind_addr);
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health         — liveness probe");
    tracing::info!("  POST /hud/scan       — room + self + nearby text blob");
    tracing::info!("  POST /profile/lookup — card for a named avatar");
    tracing::info!("  POST /room/vibe      — room energy text");

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .context("Failed to bind")?;

    axum::serve(listener, app).await.context("Server failed")?;
    Ok(())
}
