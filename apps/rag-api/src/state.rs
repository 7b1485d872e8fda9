//! Application state management

use std::sync::Arc;

use domain_agent::ConnectionManager;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub manager: Arc<ConnectionManager>,
}
