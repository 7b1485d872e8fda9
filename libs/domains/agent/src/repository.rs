use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::chroma::ConnectionManager;
use crate::error::AgentResult;
use crate::models::{CollectionInfo, QueryBatches};

/// Repository trait for vector storage operations
///
/// Abstracts the underlying vector store so alternate stores (or fakes in
/// tests) can be substituted behind the same add/query/delete/describe
/// contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VectorRepository: Send + Sync {
    /// Upsert documents with their embeddings.
    ///
    /// `documents` and `embeddings` must be equal length (caller contract,
    /// not enforced here). Missing `ids` are assigned `doc_<index>` by
    /// position; missing `metadatas` default to `{"text": document}`.
    async fn add_documents(
        &self,
        documents: Vec<String>,
        embeddings: Vec<Vec<f32>>,
        metadatas: Option<Vec<serde_json::Value>>,
        ids: Option<Vec<String>>,
    ) -> AgentResult<()>;

    /// Ranked nearest-neighbor result for each query embedding, each batch
    /// truncated to at most `n_results` entries, ascending distance.
    async fn query(
        &self,
        query_embeddings: Vec<Vec<f32>>,
        n_results: usize,
    ) -> AgentResult<QueryBatches>;

    /// Remove records by identifier; absent identifiers are silently ignored.
    async fn delete_documents(&self, ids: Vec<String>) -> AgentResult<()>;

    /// Current record count and collection-level metadata.
    async fn collection_info(&self) -> AgentResult<CollectionInfo>;
}

/// ChromaDB-backed repository, routed through the connection manager's
/// cached collection handle.
pub struct ChromaRepository {
    manager: Arc<ConnectionManager>,
    collection_name: String,
}

impl ChromaRepository {
    pub fn new(manager: Arc<ConnectionManager>, collection_name: String) -> Self {
        Self {
            manager,
            collection_name,
        }
    }
}

#[async_trait]
impl VectorRepository for ChromaRepository {
    async fn add_documents(
        &self,
        documents: Vec<String>,
        embeddings: Vec<Vec<f32>>,
        metadatas: Option<Vec<serde_json::Value>>,
        ids: Option<Vec<String>>,
    ) -> AgentResult<()> {
        let ids = ids.unwrap_or_else(|| {
            (0..documents.len()).map(|i| format!("doc_{}", i)).collect()
        });

        let metadatas = metadatas.unwrap_or_else(|| {
            documents.iter().map(|doc| json!({ "text": doc })).collect()
        });

        let (client, collection) = self.manager.collection(&self.collection_name).await?;
        client
            .add(&collection.id, ids, embeddings, documents, metadatas)
            .await
    }

    async fn query(
        &self,
        query_embeddings: Vec<Vec<f32>>,
        n_results: usize,
    ) -> AgentResult<QueryBatches> {
        let (client, collection) = self.manager.collection(&self.collection_name).await?;
        client.query(&collection.id, query_embeddings, n_results).await
    }

    async fn delete_documents(&self, ids: Vec<String>) -> AgentResult<()> {
        let (client, collection) = self.manager.collection(&self.collection_name).await?;
        client.delete(&collection.id, ids).await
    }

    async fn collection_info(&self) -> AgentResult<CollectionInfo> {
        let (client, collection) = self.manager.collection(&self.collection_name).await?;
        let count = client.count(&collection.id).await?;

        Ok(CollectionInfo {
            name: collection.name,
            count,
            metadata: collection.metadata.unwrap_or(serde_json::Value::Null),
        })
    }
}
