mod config;
mod document;
mod editor;
mod errors;
mod llm_client;
mod models;
mod render;
mod rewrite;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::document::DocumentController;
use crate::editor::improve::ImproveTracker;
use crate::llm_client::LlmClient;
use crate::rewrite::{ContentRewriter, LlmRewriter, PassthroughRewriter};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CVGenius API v{}", env!("CARGO_PKG_VERSION"));

    let rewriter = build_rewriter(&config);

    let controller = DocumentController::default();
    info!(
        "Document seeded with {} sections",
        controller.document().sections.len()
    );

    let state = AppState {
        controller: Arc::new(RwLock::new(controller)),
        rewriter,
        improve_tracker: Arc::new(ImproveTracker::default()),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Picks the rewrite collaborator. Without a usable credential every rewrite
/// returns its input.
fn build_rewriter(config: &Config) -> Arc<dyn ContentRewriter> {
    let Some(api_key) = config.gemini_api_key.clone() else {
        warn!("GEMINI_API_KEY not set; AI rewriting disabled");
        return Arc::new(PassthroughRewriter);
    };

    match LlmClient::new(
        api_key,
        config.rewrite_model.clone(),
        config.rewrite_timeout,
    ) {
        Ok(client) => {
            info!("LLM client initialized (model: {})", client.model());
            Arc::new(LlmRewriter::new(Arc::new(client)))
        }
        Err(e) => {
            warn!("Failed to build LLM client, AI rewriting disabled: {e}");
            Arc::new(PassthroughRewriter)
        }
    }
}
