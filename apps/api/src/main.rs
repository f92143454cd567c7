mod analysis;
mod classification;
mod config;
mod errors;
mod extraction;
mod ingest;
mod models;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::classification::ClassificationService;
use crate::config::Config;
use crate::ingest::PdfExtractBackend;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume API v{}", env!("CARGO_PKG_VERSION"));

    // Load both model pairs. Without them there is nothing to serve.
    let classifier = ClassificationService::load(&config.model_dir).with_context(|| {
        format!(
            "Failed to load model artifacts from {}",
            config.model_dir.display()
        )
    })?;

    info!("Upload limit: {} bytes", config.max_upload_bytes);

    // Build app state
    let state = AppState {
        classifier: Arc::new(classifier),
        pdf: Arc::new(PdfExtractBackend),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
