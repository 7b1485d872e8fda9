//! User endpoints

use axum::{routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

/// OpenAPI documentation for user endpoints
#[derive(OpenApi)]
#[openapi(
    paths(create_user),
    components(schemas(UserCreateRequest, UserResponse)),
    tags((name = "Users", description = "User endpoints"))
)]
pub struct ApiDoc;

#[derive(Debug, Deserialize, ToSchema)]
pub struct UserCreateRequest {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: String,
}

pub fn router() -> Router {
    Router::new().route("/", post(create_user))
}

/// Create a user
///
/// No persistence yet; echoes the request back with a placeholder id.
#[utoipa::path(
    post,
    path = "/",
    tag = "Users",
    request_body = UserCreateRequest,
    responses(
        (status = 200, description = "Created user", body = UserResponse)
    )
)]
async fn create_user(Json(request): Json<UserCreateRequest>) -> Json<UserResponse> {
    Json(UserResponse {
        id: 0,
        name: request.name,
        email: request.email,
        created_at: chrono::Utc::now().to_rfc3339(),
    })
}
