//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for the RAG API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "RAG API",
        version = "0.1.0",
        description = "Retrieval-augmented generation API backed by ChromaDB and Upstage Solar",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/agent", api = domain_agent::ApiDoc),
        (path = "/users", api = crate::api::users::ApiDoc)
    ),
    tags(
        (name = "Agent", description = "Retrieval-augmented generation endpoints"),
        (name = "Users", description = "User endpoints")
    )
)]
pub struct ApiDoc;
