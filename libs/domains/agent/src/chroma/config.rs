use core_config::env_or_default;

use crate::error::AgentResult;

/// ChromaDB connection configuration
#[derive(Debug, Clone)]
pub struct ChromaConfig {
    pub host: String,
    pub port: u16,
    pub collection_name: String,
}

impl ChromaConfig {
    pub fn new(host: String, port: u16) -> Self {
        Self {
            host,
            port,
            collection_name: "upstage_embeddings".to_string(),
        }
    }

    pub fn with_collection_name(mut self, name: String) -> Self {
        self.collection_name = name;
        self
    }

    /// Base URL of the ChromaDB v1 REST API.
    pub fn base_url(&self) -> String {
        format!("http://{}:{}/api/v1", self.host, self.port)
    }

    pub fn from_env() -> AgentResult<Self> {
        let host = env_or_default("CHROMA_HOST", "localhost");

        let port = env_or_default("CHROMA_PORT", "8800")
            .parse()
            .map_err(|e| {
                crate::error::AgentError::Config(format!("invalid CHROMA_PORT: {}", e))
            })?;

        let collection_name = env_or_default("CHROMA_COLLECTION_NAME", "upstage_embeddings");

        Ok(Self {
            host,
            port,
            collection_name,
        })
    }
}

impl Default for ChromaConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 8800,
            collection_name: "upstage_embeddings".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_defaults() {
        temp_env::with_vars(
            [
                ("CHROMA_HOST", None::<&str>),
                ("CHROMA_PORT", None),
                ("CHROMA_COLLECTION_NAME", None),
            ],
            || {
                let config = ChromaConfig::from_env().unwrap();
                assert_eq!(config.host, "localhost");
                assert_eq!(config.port, 8800);
                assert_eq!(config.collection_name, "upstage_embeddings");
                assert_eq!(config.base_url(), "http://localhost:8800/api/v1");
            },
        );
    }

    #[test]
    fn test_from_env_custom_values() {
        temp_env::with_vars(
            [
                ("CHROMA_HOST", Some("chroma.internal")),
                ("CHROMA_PORT", Some("9000")),
                ("CHROMA_COLLECTION_NAME", Some("knowledge")),
            ],
            || {
                let config = ChromaConfig::from_env().unwrap();
                assert_eq!(config.host, "chroma.internal");
                assert_eq!(config.port, 9000);
                assert_eq!(config.collection_name, "knowledge");
            },
        );
    }

    #[test]
    fn test_from_env_invalid_port() {
        temp_env::with_var("CHROMA_PORT", Some("not_a_port"), || {
            assert!(ChromaConfig::from_env().is_err());
        });
    }
}
