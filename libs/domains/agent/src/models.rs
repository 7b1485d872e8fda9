use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Handle to a named collection in the vector store.
///
/// Returned by get-or-create; the `id` is the store-assigned identifier
/// used for record-level operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionHandle {
    pub id: String,
    pub name: String,
    pub metadata: Option<serde_json::Value>,
}

/// Collection information: name, record count, and collection-level metadata.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CollectionInfo {
    pub name: String,
    pub count: u64,
    pub metadata: serde_json::Value,
}

/// Ranked nearest-neighbor batches, one inner list per query embedding.
///
/// All inner lists are parallel and ordered by ascending distance.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryBatches {
    pub ids: Vec<Vec<String>>,
    pub documents: Vec<Vec<String>>,
    pub metadatas: Vec<Vec<serde_json::Value>>,
    pub distances: Vec<Vec<f32>>,
}

/// Flattened similarity-search result for a single query.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SearchOutcome {
    pub documents: Vec<String>,
    pub metadatas: Vec<serde_json::Value>,
    pub distances: Vec<f32>,
}

/// End-to-end result of the RAG query pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QueryOutcome {
    pub query: String,
    pub response: String,
    pub retrieved_documents: Vec<String>,
    pub document_distances: Vec<f32>,
    pub context_used: String,
}

/// Success/failure tag for ingestion outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum IngestStatus {
    Success,
    Error,
}

impl IngestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            IngestStatus::Success => "success",
            IngestStatus::Error => "error",
        }
    }
}

/// Outcome of a knowledge-base write. Failures are reported in-band
/// rather than as an error return.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IngestOutcome {
    pub status: IngestStatus,
    pub message: String,
}

impl IngestOutcome {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: IngestStatus::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: IngestStatus::Error,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingest_status_serializes_lowercase() {
        let outcome = IngestOutcome::success("ok");
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "success");

        let outcome = IngestOutcome::error("bad");
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "error");
    }
}
