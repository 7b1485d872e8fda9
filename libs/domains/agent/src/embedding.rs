use async_trait::async_trait;

use crate::error::AgentResult;

/// Trait for embedding generation providers
///
/// Implementations convert text into fixed-length numeric vectors.
/// Dimensionality is fixed per model and not validated here; a mismatch
/// between stored and queried dimensionality is an external-service error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate an embedding for a single text
    async fn embed(&self, text: &str) -> AgentResult<Vec<f32>>;

    /// Generate embeddings for multiple texts in batch, order-preserving
    async fn embed_batch(&self, texts: &[String]) -> AgentResult<Vec<Vec<f32>>>;
}
