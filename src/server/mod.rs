//! HTTP server implementation using Axum.

pub mod routes;

use axum::{routing::post, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::cli::Config;
use crate::knowledge::KnowledgeStore;
use crate::rag::AnswerPipeline;

/// Shared state for the server. Read-only after startup.
pub struct AppState {
    pub pipeline: Arc<AnswerPipeline>,
}

impl AppState {
    pub fn new(pipeline: AnswerPipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }
}

/// Build the Axum router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/", post(routes::answer_question))
        .route("/api", post(routes::answer_question))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Start the HTTP server.
pub async fn start(config: &Config, store: Arc<KnowledgeStore>) -> anyhow::Result<()> {
    let pipeline = AnswerPipeline::with_config(store, config.pipeline_config());
    let app = build_router(AppState::new(pipeline));

    let addr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("question endpoint listening on http://{}/api/", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
