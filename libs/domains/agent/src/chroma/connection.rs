use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::{ChromaApi, ChromaConnector};
use crate::error::{AgentError, AgentResult};
use crate::models::CollectionHandle;
use crate::retry::{retry_with_backoff, RetryConfig};

/// How long a successful health probe stays valid.
const HEALTH_CHECK_INTERVAL: Duration = Duration::from_secs(30);

/// Total connection attempts during establishment (1 initial + retries).
const CONNECT_ATTEMPTS: u32 = 3;

struct ConnectionState {
    client: Option<Arc<dyn ChromaApi>>,
    collections: HashMap<String, CollectionHandle>,
    last_health_check: Option<Instant>,
}

/// Guarantees a single healthy ChromaDB connection shared by all callers,
/// hiding reconnect and retry logic.
///
/// Holds a name-keyed cache of collection handles that is invalidated as a
/// unit whenever the connection is re-established. All state lives behind
/// one async mutex so the check-staleness → discard → reconnect → repopulate
/// sequence is atomic under concurrent requests.
///
/// Constructed explicitly at the composition root and passed to the
/// repository; there is no ambient global instance.
pub struct ConnectionManager {
    connector: Box<dyn ChromaConnector>,
    retry: RetryConfig,
    max_health_age: Duration,
    state: Mutex<ConnectionState>,
}

impl ConnectionManager {
    pub fn new(connector: Box<dyn ChromaConnector>) -> Self {
        Self {
            connector,
            retry: RetryConfig::new().with_max_retries(CONNECT_ATTEMPTS - 1),
            max_health_age: HEALTH_CHECK_INTERVAL,
            state: Mutex::new(ConnectionState {
                client: None,
                collections: HashMap::new(),
                last_health_check: None,
            }),
        }
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_max_health_age(mut self, max_age: Duration) -> Self {
        self.max_health_age = max_age;
        self
    }

    /// Establish the underlying connection, retrying with exponential
    /// backoff. On exhausting retries the last cause is wrapped in a
    /// connection error that propagates to the caller; no further retry
    /// happens upstream.
    pub async fn initialize(&self) -> AgentResult<()> {
        let mut state = self.state.lock().await;
        self.establish(&mut state).await
    }

    async fn establish(&self, state: &mut ConnectionState) -> AgentResult<()> {
        let client = retry_with_backoff(
            || async {
                let client = self.connector.connect()?;
                client.heartbeat().await?;
                Ok::<_, AgentError>(client)
            },
            self.retry.clone(),
        )
        .await
        .map_err(|e| {
            AgentError::Connection(format!("could not establish ChromaDB connection: {}", e))
        })?;

        state.client = Some(client);
        state.last_health_check = Some(Instant::now());
        info!("ChromaDB connection established");
        Ok(())
    }

    /// Probe the connection if the last successful check is older than
    /// `max_health_age`. A failed probe discards the connection handle,
    /// clears the entire collection cache, and re-establishes.
    async fn ensure_healthy(&self, state: &mut ConnectionState) -> AgentResult<()> {
        let fresh = state
            .client
            .is_some()
            .then_some(state.last_health_check)
            .flatten()
            .is_some_and(|checked| checked.elapsed() <= self.max_health_age);
        if fresh {
            return Ok(());
        }

        if let Some(client) = state.client.as_ref() {
            match client.heartbeat().await {
                Ok(_) => {
                    state.last_health_check = Some(Instant::now());
                    return Ok(());
                }
                Err(e) => {
                    warn!("Health check failed, reconnecting: {}", e);
                    state.client = None;
                    state.collections.clear();
                }
            }
        }

        self.establish(state).await
    }

    fn current_client(state: &ConnectionState) -> AgentResult<Arc<dyn ChromaApi>> {
        state
            .client
            .as_ref()
            .map(Arc::clone)
            .ok_or_else(|| AgentError::Internal("connection not initialized".to_string()))
    }

    /// A health-checked handle to the ChromaDB client.
    pub async fn client(&self) -> AgentResult<Arc<dyn ChromaApi>> {
        let mut state = self.state.lock().await;
        self.ensure_healthy(&mut state).await?;
        Self::current_client(&state)
    }

    /// The cached handle for `name`, or a get-or-create against the (now
    /// guaranteed healthy) connection on a cache miss. The cache is
    /// unbounded; collection count is small and operator-controlled.
    pub async fn collection(
        &self,
        name: &str,
    ) -> AgentResult<(Arc<dyn ChromaApi>, CollectionHandle)> {
        let mut state = self.state.lock().await;
        self.ensure_healthy(&mut state).await?;
        let client = Self::current_client(&state)?;

        if let Some(handle) = state.collections.get(name) {
            return Ok((client, handle.clone()));
        }

        let handle = client.get_or_create_collection(name).await?;
        state.collections.insert(name.to_string(), handle.clone());
        debug!("Collection '{}' cached", name);
        Ok((client, handle))
    }

    /// Drop all cached collection handles without closing the connection.
    pub async fn clear_cache(&self) {
        let mut state = self.state.lock().await;
        state.collections.clear();
        info!("Collection cache cleared");
    }

    /// Release the connection handle and cache. The next access
    /// re-establishes the connection.
    pub async fn close(&self) {
        let mut state = self.state.lock().await;
        state.collections.clear();
        state.client = None;
        state.last_health_check = None;
        info!("ChromaDB connection closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chroma::{MockChromaApi, MockChromaConnector};
    use crate::models::CollectionHandle;
    use mockall::Sequence;

    fn fast_retry() -> RetryConfig {
        RetryConfig::new()
            .with_max_retries(CONNECT_ATTEMPTS - 1)
            .with_initial_delay(1)
    }

    fn handle(id: &str, name: &str) -> CollectionHandle {
        CollectionHandle {
            id: id.to_string(),
            name: name.to_string(),
            metadata: None,
        }
    }

    fn healthy_client() -> MockChromaApi {
        let mut client = MockChromaApi::new();
        client.expect_heartbeat().returning(|| Ok(1));
        client
    }

    #[tokio::test]
    async fn test_initialize_fails_after_three_attempts() {
        let mut connector = MockChromaConnector::new();
        connector
            .expect_connect()
            .times(3)
            .returning(|| Err(AgentError::Connection("refused".to_string())));

        let manager = ConnectionManager::new(Box::new(connector)).with_retry(fast_retry());
        let err = manager.initialize().await.unwrap_err();

        assert!(matches!(err, AgentError::Connection(_)));
        assert!(err.to_string().contains("refused"));
    }

    #[tokio::test]
    async fn test_initialize_stops_retrying_on_first_success() {
        let mut seq = Sequence::new();
        let mut connector = MockChromaConnector::new();
        connector
            .expect_connect()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Err(AgentError::Connection("refused".to_string())));
        connector
            .expect_connect()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(Arc::new(healthy_client()) as Arc<dyn ChromaApi>));

        let manager = ConnectionManager::new(Box::new(connector)).with_retry(fast_retry());
        manager.initialize().await.unwrap();
    }

    #[tokio::test]
    async fn test_failed_heartbeat_counts_as_failed_attempt() {
        let mut connector = MockChromaConnector::new();
        connector.expect_connect().times(3).returning(|| {
            let mut client = MockChromaApi::new();
            client
                .expect_heartbeat()
                .returning(|| Err(AgentError::Chroma("no heartbeat".to_string())));
            Ok(Arc::new(client) as Arc<dyn ChromaApi>)
        });

        let manager = ConnectionManager::new(Box::new(connector)).with_retry(fast_retry());
        let err = manager.initialize().await.unwrap_err();
        assert!(matches!(err, AgentError::Connection(_)));
    }

    #[tokio::test]
    async fn test_collection_is_cached_per_name() {
        let mut connector = MockChromaConnector::new();
        connector.expect_connect().times(1).returning(|| {
            let mut client = healthy_client();
            client
                .expect_get_or_create_collection()
                .times(1)
                .returning(|name| Ok(handle("c1", name)));
            Ok(Arc::new(client) as Arc<dyn ChromaApi>)
        });

        let manager = ConnectionManager::new(Box::new(connector)).with_retry(fast_retry());
        manager.initialize().await.unwrap();

        let (_, first) = manager.collection("kb").await.unwrap();
        let (_, second) = manager.collection("kb").await.unwrap();
        assert_eq!(first.id, "c1");
        assert_eq!(second.id, "c1");
    }

    #[tokio::test]
    async fn test_failed_probe_reconnects_and_refetches_collection() {
        let mut seq = Sequence::new();
        let mut connector = MockChromaConnector::new();

        // First client: healthy at initialization, then fails the probe.
        connector
            .expect_connect()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| {
                let mut client = MockChromaApi::new();
                let mut heartbeats = Sequence::new();
                client
                    .expect_heartbeat()
                    .times(1)
                    .in_sequence(&mut heartbeats)
                    .returning(|| Ok(1));
                client
                    .expect_heartbeat()
                    .in_sequence(&mut heartbeats)
                    .returning(|| Err(AgentError::Chroma("gone".to_string())));
                Ok(Arc::new(client) as Arc<dyn ChromaApi>)
            });

        // Replacement client returns a fresh collection handle.
        connector
            .expect_connect()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| {
                let mut client = healthy_client();
                client
                    .expect_get_or_create_collection()
                    .times(1)
                    .returning(|name| Ok(handle("fresh", name)));
                Ok(Arc::new(client) as Arc<dyn ChromaApi>)
            });

        let manager = ConnectionManager::new(Box::new(connector))
            .with_retry(fast_retry())
            .with_max_health_age(Duration::ZERO);
        manager.initialize().await.unwrap();

        let (_, handle) = manager.collection("kb").await.unwrap();
        assert_eq!(handle.id, "fresh");
    }

    #[tokio::test]
    async fn test_clear_cache_keeps_connection_but_refetches_handles() {
        let mut connector = MockChromaConnector::new();
        connector.expect_connect().times(1).returning(|| {
            let mut client = healthy_client();
            client
                .expect_get_or_create_collection()
                .times(2)
                .returning(|name| Ok(handle("c1", name)));
            Ok(Arc::new(client) as Arc<dyn ChromaApi>)
        });

        let manager = ConnectionManager::new(Box::new(connector)).with_retry(fast_retry());
        manager.initialize().await.unwrap();

        manager.collection("kb").await.unwrap();
        manager.clear_cache().await;
        manager.collection("kb").await.unwrap();
    }

    #[tokio::test]
    async fn test_close_releases_connection_and_next_access_reconnects() {
        let mut connector = MockChromaConnector::new();
        connector.expect_connect().times(2).returning(|| {
            let mut client = healthy_client();
            client
                .expect_get_or_create_collection()
                .returning(|name| Ok(handle("c1", name)));
            Ok(Arc::new(client) as Arc<dyn ChromaApi>)
        });

        let manager = ConnectionManager::new(Box::new(connector)).with_retry(fast_retry());
        manager.initialize().await.unwrap();
        manager.collection("kb").await.unwrap();

        manager.close().await;
        manager.collection("kb").await.unwrap();
    }
}
