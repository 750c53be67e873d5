//! Esplora access for client-side spends

use crate::config::{default_esplora_url, BitcoinConfig, NetworkType, DEFAULT_CORE_API_URL};
use bdk_esplora::esplora_client::{self, BlockingClient};

/// Esplora setup and request failures
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    #[error("Esplora client error: {0}")]
    Esplora(#[from] esplora_client::Error),

    #[error("Network request failed: {0}")]
    Request(String),
}

/// Network a client-side spend targets
///
/// Passed explicitly into each withdrawal; nothing process-wide is switched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    pub network: NetworkType,
    pub esplora_url: String,
}

impl NetworkConfig {
    pub fn new(network: NetworkType, esplora_url: impl Into<String>) -> Self {
        Self {
            network,
            esplora_url: esplora_url.into(),
        }
    }

    /// Local regtest environment; the browser regtest API listens on 6270
    pub fn local_regtest() -> Self {
        Self::new(NetworkType::Regtest, DEFAULT_CORE_API_URL)
    }

    /// Network configuration from the wallet's bitcoin settings
    pub fn from_config(config: &BitcoinConfig) -> Self {
        Self::new(config.network, config.esplora_url.clone())
    }

    /// Public endpoint for a network
    pub fn with_default_url(network: NetworkType) -> Self {
        Self::new(network, default_esplora_url(network))
    }
}

/// Esplora client wrapper for blockchain queries
///
/// Provides a blocking interface; async callers run it on the blocking pool.
pub struct EsploraClient {
    client: BlockingClient,
    network: NetworkType,
    url: String,
}

impl EsploraClient {
    /// Create a new Esplora client with custom URL
    ///
    /// # Example
    ///
    /// ```ignore
    /// let client = EsploraClient::new("http://localhost:6270", NetworkType::Regtest)?;
    /// ```
    pub fn new(url: &str, network: NetworkType) -> Result<Self, NetworkError> {
        if url.is_empty() {
            return Err(NetworkError::Request("Esplora URL is empty".to_string()));
        }

        let builder = esplora_client::Builder::new(url);
        let client = BlockingClient::from_builder(builder);

        Ok(Self {
            client,
            network,
            url: url.to_string(),
        })
    }

    /// Create a client for a network configuration
    pub fn from_network_config(config: &NetworkConfig) -> Result<Self, NetworkError> {
        Self::new(&config.esplora_url, config.network)
    }

    /// Get the underlying Esplora client reference
    pub fn inner(&self) -> &BlockingClient {
        &self.client
    }

    /// Get the network type
    pub fn network(&self) -> NetworkType {
        self.network
    }

    /// Get the Esplora server URL
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl std::fmt::Debug for EsploraClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EsploraClient")
            .field("network", &self.network)
            .field("url", &self.url)
            .finish()
    }
}
