//! Configuration for the RAG API

use core_config::{server::ServerConfig, FromEnv};
use domain_agent::{ChromaConfig, UpstageConfig};

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub server: ServerConfig,
    pub environment: Environment,
    pub upstage: UpstageConfig,
    pub chroma: ChromaConfig,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?;
        let upstage = UpstageConfig::from_env()?;
        let chroma = ChromaConfig::from_env()?;

        Ok(Self {
            server,
            environment,
            upstage,
            chroma,
        })
    }
}
