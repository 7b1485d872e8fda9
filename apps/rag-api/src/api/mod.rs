//! API routes module

pub mod agent;
pub mod health;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/agent", agent::router(state))
        .nest("/users", users::router())
        .merge(health::router(state.clone()))
}
