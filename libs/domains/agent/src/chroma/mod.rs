//! ChromaDB integration: HTTP client, connector, and connection manager.

pub mod client;
pub mod config;
pub mod connection;

pub use client::{ChromaHttpClient, HttpChromaConnector};
pub use config::ChromaConfig;
pub use connection::ConnectionManager;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AgentResult;
use crate::models::{CollectionHandle, QueryBatches};

/// Operations exposed by the ChromaDB service.
///
/// Abstracts the store behind a capability set so the connection manager
/// and repository can be exercised against a fake in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChromaApi: Send + Sync {
    /// Lightweight liveness probe; returns the server's heartbeat value.
    async fn heartbeat(&self) -> AgentResult<u64>;

    /// Return the named collection, creating it if absent.
    async fn get_or_create_collection(&self, name: &str) -> AgentResult<CollectionHandle>;

    /// Upsert records into a collection. All slices are parallel and of
    /// equal length (caller contract).
    async fn add(
        &self,
        collection_id: &str,
        ids: Vec<String>,
        embeddings: Vec<Vec<f32>>,
        documents: Vec<String>,
        metadatas: Vec<serde_json::Value>,
    ) -> AgentResult<()>;

    /// Ranked nearest-neighbor query, one result batch per query embedding,
    /// each batch at most `n_results` long and ordered by ascending distance.
    async fn query(
        &self,
        collection_id: &str,
        query_embeddings: Vec<Vec<f32>>,
        n_results: usize,
    ) -> AgentResult<QueryBatches>;

    /// Delete records by identifier; absent identifiers are ignored by the store.
    async fn delete(&self, collection_id: &str, ids: Vec<String>) -> AgentResult<()>;

    /// Number of records in the collection.
    async fn count(&self, collection_id: &str) -> AgentResult<u64>;
}

/// Produces a fresh [`ChromaApi`] handle for the connection manager.
#[cfg_attr(test, mockall::automock)]
pub trait ChromaConnector: Send + Sync {
    fn connect(&self) -> AgentResult<Arc<dyn ChromaApi>>;
}
