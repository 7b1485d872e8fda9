//! Health check endpoints

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    service: String,
    version: String,
}

fn response(status: &str) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: status.to_string(),
        service: "rag-api".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn health() -> Json<HealthResponse> {
    response("healthy")
}

async fn ready(state: AppState) -> Json<HealthResponse> {
    // Probes the vector store; the manager reconnects if the probe fails.
    match state.manager.client().await {
        Ok(_) => response("ready"),
        Err(_) => response("degraded"),
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(move || ready(state)))
}
