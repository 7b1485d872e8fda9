//! HTTP handlers for the agent API

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};

use crate::agent::{AgentService, DEFAULT_CONTEXT_LIMIT};
use crate::error::AgentResult;
use crate::models::{CollectionInfo, IngestOutcome, QueryOutcome};

/// OpenAPI documentation for the agent API
#[derive(OpenApi)]
#[openapi(
    paths(
        process_query,
        add_knowledge,
        delete_knowledge,
        knowledge_stats,
        health_check,
    ),
    components(schemas(
        QueryRequest,
        AddKnowledgeRequest,
        QueryOutcome,
        IngestOutcome,
        CollectionInfo,
        HealthResponse
    )),
    tags(
        (name = "Agent", description = "Retrieval-augmented generation endpoints")
    )
)]
pub struct ApiDoc;

#[derive(Debug, Deserialize, ToSchema)]
pub struct QueryRequest {
    /// Question to answer against the knowledge base.
    pub query: String,
    /// Number of documents to retrieve as context (default 3).
    pub context_limit: Option<usize>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddKnowledgeRequest {
    pub documents: Vec<String>,
    /// Optional per-document metadata, parallel to `documents`.
    pub metadatas: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}

/// Create the agent router with all HTTP endpoints
pub fn router(service: AgentService) -> Router {
    Router::new()
        .route("/query", post(process_query))
        .route("/knowledge", post(add_knowledge))
        .route("/knowledge/{doc_id}", axum::routing::delete(delete_knowledge))
        .route("/stats", get(knowledge_stats))
        .route("/health", get(health_check))
        .with_state(Arc::new(service))
}

/// Answer a query using retrieved context
#[utoipa::path(
    post,
    path = "/query",
    tag = "Agent",
    request_body = QueryRequest,
    responses(
        (status = 200, description = "Generated answer with retrieval details", body = QueryOutcome),
        (status = 500, description = "Retrieval failed or vector store unreachable")
    )
)]
async fn process_query(
    State(service): State<Arc<AgentService>>,
    Json(request): Json<QueryRequest>,
) -> AgentResult<Json<QueryOutcome>> {
    let limit = request.context_limit.unwrap_or(DEFAULT_CONTEXT_LIMIT);
    let outcome = service.process_query(&request.query, limit).await?;
    Ok(Json(outcome))
}

/// Add documents to the knowledge base
#[utoipa::path(
    post,
    path = "/knowledge",
    tag = "Agent",
    request_body = AddKnowledgeRequest,
    responses(
        (status = 200, description = "Ingestion outcome (failures reported in-band)", body = IngestOutcome)
    )
)]
async fn add_knowledge(
    State(service): State<Arc<AgentService>>,
    Json(request): Json<AddKnowledgeRequest>,
) -> Json<IngestOutcome> {
    Json(service.add_knowledge(request.documents, request.metadatas).await)
}

/// Delete a document from the knowledge base
#[utoipa::path(
    delete,
    path = "/knowledge/{doc_id}",
    tag = "Agent",
    params(("doc_id" = String, Path, description = "Document identifier")),
    responses(
        (status = 200, description = "Document deleted", body = IngestOutcome),
        (status = 500, description = "Vector store unreachable")
    )
)]
async fn delete_knowledge(
    State(service): State<Arc<AgentService>>,
    Path(doc_id): Path<String>,
) -> AgentResult<Json<IngestOutcome>> {
    service.delete_knowledge(&doc_id).await?;
    Ok(Json(IngestOutcome::success(format!(
        "Document {} deleted",
        doc_id
    ))))
}

/// Knowledge-base statistics
#[utoipa::path(
    get,
    path = "/stats",
    tag = "Agent",
    responses(
        (status = 200, description = "Collection name, count and metadata", body = CollectionInfo),
        (status = 500, description = "Vector store unreachable")
    )
)]
async fn knowledge_stats(
    State(service): State<Arc<AgentService>>,
) -> AgentResult<Json<CollectionInfo>> {
    let info = service.knowledge_stats().await?;
    Ok(Json(info))
}

/// Agent service liveness
#[utoipa::path(
    get,
    path = "/health",
    tag = "Agent",
    responses(
        (status = 200, description = "Service is running", body = HealthResponse)
    )
)]
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        message: "Agent service is running",
    })
}
