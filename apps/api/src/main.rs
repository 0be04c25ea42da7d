mod assessment;
mod auth;
mod config;
mod errors;
mod models;
mod reports;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::assessment::{AssessmentStore, ConfigRegistry};
use crate::auth::{TokenIssuer, UserStore};
use crate::config::Config;
use crate::reports::ChromiumRenderer;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Assessment API v{}", env!("CARGO_PKG_VERSION"));

    // Assessment configs: bundled set, optionally extended from a file
    let mut configs = ConfigRegistry::builtin()?;
    if let Some(path) = &config.assessment_config_path {
        let count = configs.merge_file(path)?;
        info!("Loaded {count} assessment config(s) from {}", path.display());
    }
    if configs.is_empty() {
        anyhow::bail!("No assessment configs loaded");
    }
    info!("{} assessment type(s) configured", configs.len());

    let records = AssessmentStore::builtin()?;
    if records.is_empty() {
        warn!("No assessment records loaded; every report request will 404");
    }
    info!("{} assessment record(s) available", records.len());

    tokio::fs::create_dir_all(&config.reports_dir)
        .await
        .with_context(|| format!("Failed to create reports dir {}", config.reports_dir.display()))?;
    info!("Reports directory: {}", config.reports_dir.display());

    let renderer = ChromiumRenderer::new(
        config.chrome_bin.clone(),
        config.chrome_args.clone(),
        Duration::from_secs(config.render_timeout_secs),
    );
    info!("PDF renderer: headless browser '{}'", config.chrome_bin);

    // Build app state
    let state = AppState {
        tokens: TokenIssuer::new(&config.jwt_secret, config.token_ttl_hours),
        users: UserStore::new(),
        records: Arc::new(records),
        configs: Arc::new(configs),
        renderer: Arc::new(renderer),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
