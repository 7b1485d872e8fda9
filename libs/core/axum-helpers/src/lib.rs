//! # Axum Helpers
//!
//! Shared utilities for building Axum web applications.
//!
//! ## Modules
//!
//! - **[`errors`]**: Structured error responses ([`AppError`], [`ErrorResponse`])
//! - **[`server`]**: Router assembly, server bootstrap, graceful shutdown

pub mod errors;
pub mod server;

pub use errors::{not_found, AppError, ErrorResponse};
pub use server::{create_app, create_router, shutdown_signal};
