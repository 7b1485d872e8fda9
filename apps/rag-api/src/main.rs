//! RAG API - retrieval-augmented generation server

use std::sync::Arc;

use core_config::tracing::{init_tracing, install_color_eyre};
use domain_agent::{ConnectionManager, HttpChromaConnector};
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("Connecting to ChromaDB at {}", config.chroma.base_url());

    let manager = Arc::new(ConnectionManager::new(Box::new(HttpChromaConnector::new(
        config.chroma.clone(),
    ))));

    // The service must not start without a reachable vector store.
    manager.initialize().await?;
    info!("ChromaDB connection established");

    let state = AppState {
        config: config.clone(),
        manager,
    };

    let api_routes = api::routes(&state);
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes);

    info!("Starting RAG API on port {}", config.server.port);

    axum_helpers::create_app(router, &config.server.address()).await?;

    state.manager.close().await;
    info!("RAG API shutdown complete");
    Ok(())
}
