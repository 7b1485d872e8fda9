//! Agent routes: wires the RAG pipeline to the shared connection manager

use std::sync::Arc;

use axum::Router;
use domain_agent::{
    handlers, AgentService, ChromaRepository, UpstageChatClient, UpstageEmbeddings, VectorService,
};

use crate::state::AppState;

/// Build the agent service from application state and mount its routes.
pub fn router(state: &AppState) -> Router {
    let repository = Arc::new(ChromaRepository::new(
        Arc::clone(&state.manager),
        state.config.chroma.collection_name.clone(),
    ));
    let embeddings = Arc::new(UpstageEmbeddings::new(state.config.upstage.clone()));
    let chat = Arc::new(UpstageChatClient::new(state.config.upstage.clone()));

    let vector = VectorService::new(repository, embeddings);
    handlers::router(AgentService::new(vector, chat))
}
