use std::sync::Arc;

use tracing::instrument;

use crate::chat::{ChatMessage, ChatProvider, ChatRequest};
use crate::error::AgentResult;
use crate::models::{CollectionInfo, IngestOutcome, QueryOutcome, SearchOutcome};
use crate::service::VectorService;

const SYSTEM_PROMPT: &str = "You are a helpful AI assistant. Use the provided context to answer \
the user's question accurately and concisely. If the context doesn't contain enough information \
to answer the question, say so clearly.";

const TEMPERATURE: f32 = 0.3;
const MAX_TOKENS: u32 = 500;

/// Default number of documents retrieved per query.
pub const DEFAULT_CONTEXT_LIMIT: usize = 3;

/// RAG orchestration: retrieve relevant documents, assemble a context
/// block, and generate a grounded chat completion.
#[derive(Clone)]
pub struct AgentService {
    vector: VectorService,
    chat: Arc<dyn ChatProvider>,
}

impl AgentService {
    pub fn new(vector: VectorService, chat: Arc<dyn ChatProvider>) -> Self {
        Self { vector, chat }
    }

    /// Run the full retrieve-then-generate pipeline for a query.
    ///
    /// Retrieval or embedding failures propagate as errors. Generation
    /// failures do not: the pipeline still succeeded at retrieval, so the
    /// failure is reported inside the response text and the retrieved
    /// documents are returned as usual.
    #[instrument(skip(self), fields(context_limit))]
    pub async fn process_query(
        &self,
        query: &str,
        context_limit: usize,
    ) -> AgentResult<QueryOutcome> {
        let search = self.vector.search(query, context_limit).await?;
        let context = build_context(&search);

        let response = match self.generate(query, &context).await {
            Ok(text) => text,
            Err(e) => format!("Error generating response: {}", e),
        };

        Ok(QueryOutcome {
            query: query.to_string(),
            response,
            retrieved_documents: search.documents,
            document_distances: search.distances,
            context_used: context,
        })
    }

    async fn generate(&self, query: &str, context: &str) -> AgentResult<String> {
        let user_prompt = format!(
            "Context:\n{}\n\nQuestion: {}\n\nPlease provide a helpful response based on the context above.",
            context, query
        );

        self.chat
            .complete(ChatRequest {
                messages: vec![
                    ChatMessage::system(SYSTEM_PROMPT),
                    ChatMessage::user(user_prompt),
                ],
                temperature: TEMPERATURE,
                max_tokens: MAX_TOKENS,
            })
            .await
    }

    /// Ingest documents into the knowledge base. Failures are absorbed into
    /// the outcome rather than returned as errors.
    #[instrument(skip(self, documents, metadatas), fields(count = documents.len()))]
    pub async fn add_knowledge(
        &self,
        documents: Vec<String>,
        metadatas: Option<Vec<serde_json::Value>>,
    ) -> IngestOutcome {
        let count = documents.len();
        match self.vector.add_documents(documents, metadatas, None).await {
            Ok(()) => {
                IngestOutcome::success(format!("Added {} documents to knowledge base", count))
            }
            Err(e) => IngestOutcome::error(format!("Failed to add documents: {}", e)),
        }
    }

    #[instrument(skip(self))]
    pub async fn delete_knowledge(&self, doc_id: &str) -> AgentResult<()> {
        self.vector.delete_document(doc_id).await
    }

    #[instrument(skip(self))]
    pub async fn knowledge_stats(&self) -> AgentResult<CollectionInfo> {
        self.vector.collection_info().await
    }
}

/// Join retrieved documents into a numbered context block. Each document
/// carries its metadata (as compact JSON) when one was stored.
fn build_context(search: &SearchOutcome) -> String {
    let parts: Vec<String> = search
        .documents
        .iter()
        .enumerate()
        .map(|(i, doc)| {
            let mut part = format!("Document {}:\n{}\n", i + 1, doc);
            if let Some(metadata) = search.metadatas.get(i) {
                let empty = metadata.is_null()
                    || metadata.as_object().is_some_and(|m| m.is_empty());
                if !empty {
                    part.push_str(&format!("Metadata: {}\n", metadata));
                }
            }
            part
        })
        .collect();

    parts.join("\n")
}
