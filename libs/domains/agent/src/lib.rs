//! Agent Domain Library
//!
//! This module provides the retrieval-augmented-generation (RAG) domain:
//! a ChromaDB-backed vector store behind a connection manager, embedding
//! generation through an Upstage (OpenAI-compatible) API, and the
//! orchestration service that ties retrieval and chat completion together.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────┐
//! │   AgentService    │  ← retrieve, assemble context, generate
//! └─────────┬─────────┘
//!           │
//! ┌─────────▼─────────┐   ┌───────────────────┐   ┌───────────────────┐
//! │   VectorService   │   │ EmbeddingProvider │   │   ChatProvider    │
//! └─────────┬─────────┘   │      (trait)      │   │      (trait)      │
//!           │             └─────────┬─────────┘   └─────────┬─────────┘
//! ┌─────────▼─────────┐   ┌─────────▼─────────┐   ┌─────────▼─────────┐
//! │ VectorRepository  │   │ UpstageEmbeddings │   │ UpstageChatClient │
//! │      (trait)      │   └───────────────────┘   └───────────────────┘
//! └─────────┬─────────┘
//! ┌─────────▼─────────┐
//! │ ChromaRepository  │
//! └─────────┬─────────┘
//! ┌─────────▼─────────┐
//! │ ConnectionManager │  ← retry, health checks, collection cache
//! └───────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use domain_agent::{
//!     AgentService, ChromaConfig, ChromaRepository, ConnectionManager,
//!     HttpChromaConnector, UpstageChatClient, UpstageConfig,
//!     UpstageEmbeddings, VectorService,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let chroma = ChromaConfig::from_env()?;
//! let upstage = UpstageConfig::from_env()?;
//!
//! let manager = Arc::new(ConnectionManager::new(Box::new(
//!     HttpChromaConnector::new(chroma.clone()),
//! )));
//! manager.initialize().await?;
//!
//! let repository = Arc::new(ChromaRepository::new(
//!     Arc::clone(&manager),
//!     chroma.collection_name.clone(),
//! ));
//! let embeddings = Arc::new(UpstageEmbeddings::new(upstage.clone()));
//! let chat = Arc::new(UpstageChatClient::new(upstage));
//!
//! let vector = VectorService::new(repository, embeddings);
//! let agent = AgentService::new(vector, chat);
//!
//! let outcome = agent.process_query("What is RAG?", 3).await?;
//! println!("{}", outcome.response);
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod chat;
pub mod chroma;
pub mod embedding;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod retry;
pub mod service;
pub mod upstage;

// Re-export commonly used types
pub use agent::AgentService;
pub use chat::{ChatMessage, ChatProvider, ChatRequest, ChatRole};
pub use chroma::{
    ChromaApi, ChromaConfig, ChromaConnector, ConnectionManager, HttpChromaConnector,
};
pub use embedding::EmbeddingProvider;
pub use error::{AgentError, AgentResult};
pub use handlers::ApiDoc;
pub use models::{
    CollectionHandle, CollectionInfo, IngestOutcome, IngestStatus, QueryBatches, QueryOutcome,
    SearchOutcome,
};
pub use repository::{ChromaRepository, VectorRepository};
pub use retry::{retry_with_backoff, RetryConfig};
pub use service::VectorService;
pub use upstage::{UpstageChatClient, UpstageConfig, UpstageEmbeddings};
