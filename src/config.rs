//! Configuration types for the identity wallet
//!
//! Manages the API endpoints used by the account and profile flows,
//! the bitcoin network used for key encoding and client-side spends,
//! and the deployment mode that decides which core endpoints are reachable.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Core wallet API base used by local deployments
pub const DEFAULT_CORE_API_URL: &str = "http://localhost:6270";

/// Public naming registry
pub const DEFAULT_REGISTRY_URL: &str = "https://core.blockstack.org";

/// Global wallet configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletConfig {
    pub api: ApiSettings,
    pub bitcoin: BitcoinConfig,
}

/// HTTP endpoints consumed by the action flows
///
/// URL fields are templates. Placeholders (`{name}`, `{query}`, `{address}`,
/// `{coreAPIPassword}`) are substituted by the flow that uses them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiSettings {
    /// Registry name lookup, e.g. `https://core.blockstack.org/v1/names/{name}`
    pub name_lookup_url: String,

    /// Registry price lookup, e.g. `.../v1/prices/names/{name}?single_sig=1`
    pub price_check_url: String,

    /// Profile search, e.g. `.../v1/search?query={query}`
    pub search_url: String,

    /// Insight address API base, e.g. `.../insight-api/addr/{address}`
    pub insight_url: String,

    /// Core API base; endpoints under it are disabled in web-app deployments
    pub core_api_url: String,

    /// Core wallet withdrawal endpoint (POST)
    pub core_wallet_withdraw_url: String,

    /// Core wallet payment address endpoint (GET)
    pub wallet_payment_address_url: String,

    /// Core wallet balance endpoint (GET)
    pub address_balance_url: String,

    /// Mailing list opt-in endpoint (POST)
    pub email_notifications_url: String,

    /// Shared secret sent to the core API as a bearer token
    pub core_api_password: String,

    /// Whether the core API is reachable in this deployment
    pub deployment: DeploymentMode,
}

/// Deployment flavor of the wallet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentMode {
    /// Full deployment with a local core API
    Full,

    /// Simple web-app build: no core API, core endpoints are short-circuited
    Webapp,
}

/// Bitcoin network configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BitcoinConfig {
    pub network: NetworkType,
    pub esplora_url: String,
}

/// Bitcoin network type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
    Regtest,
    Signet,
    Testnet,
    Mainnet,
}

impl NetworkType {
    /// Map to the `bitcoin` crate network
    pub fn to_bitcoin_network(self) -> bitcoin::Network {
        match self {
            NetworkType::Mainnet => bitcoin::Network::Bitcoin,
            NetworkType::Testnet => bitcoin::Network::Testnet,
            NetworkType::Signet => bitcoin::Network::Signet,
            NetworkType::Regtest => bitcoin::Network::Regtest,
        }
    }
}

impl std::str::FromStr for NetworkType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "regtest" => Ok(NetworkType::Regtest),
            "signet" => Ok(NetworkType::Signet),
            "testnet" => Ok(NetworkType::Testnet),
            "mainnet" => Ok(NetworkType::Mainnet),
            _ => Err(ConfigError::InvalidNetwork(s.to_string())),
        }
    }
}

impl std::str::FromStr for DeploymentMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(DeploymentMode::Full),
            "webapp" => Ok(DeploymentMode::Webapp),
            _ => Err(ConfigError::Invalid(format!("unknown deployment mode '{}'", s))),
        }
    }
}

impl ApiSettings {
    /// Endpoints rooted at the given registry and core API
    pub fn with_bases(registry_url: &str, core_api_url: &str) -> Self {
        let registry = registry_url.trim_end_matches('/');
        let core = core_api_url.trim_end_matches('/');

        Self {
            name_lookup_url: format!("{}/v1/names/{{name}}", registry),
            price_check_url: format!("{}/v1/prices/names/{{name}}?single_sig=1", registry),
            search_url: format!("{}/v1/search?query={{query}}", registry),
            insight_url: format!(
                "{}/insight-api/addr/{{address}}?coreAPIPassword={{coreAPIPassword}}",
                core
            ),
            core_api_url: core.to_string(),
            core_wallet_withdraw_url: format!("{}/v1/wallet/balance", core),
            wallet_payment_address_url: format!("{}/v1/wallet/payment_address", core),
            address_balance_url: format!("{}/v1/wallet/balance/0", core),
            email_notifications_url:
                "https://blockstack-portal-emailer.appartisan.com/notifications".to_string(),
            core_api_password: String::new(),
            deployment: DeploymentMode::Full,
        }
    }
}

impl ApiSettings {
    /// Point the registry endpoints at `registry_url`
    ///
    /// Core endpoints are left untouched.
    pub fn rebase_registry(&mut self, registry_url: &str) {
        let defaults = Self::with_bases(registry_url, &self.core_api_url);
        self.name_lookup_url = defaults.name_lookup_url;
        self.price_check_url = defaults.price_check_url;
        self.search_url = defaults.search_url;
    }

    /// Move the core API to `core_api_url`
    ///
    /// Endpoints under the previous core base keep their path and follow
    /// the new base; endpoints configured elsewhere are kept as they are.
    pub fn rebase_core(&mut self, core_api_url: &str) {
        let old = self.core_api_url.trim_end_matches('/').to_string();
        let new = core_api_url.trim_end_matches('/').to_string();

        for url in [
            &mut self.insight_url,
            &mut self.core_wallet_withdraw_url,
            &mut self.wallet_payment_address_url,
            &mut self.address_balance_url,
        ] {
            if let Some(rest) = url.strip_prefix(old.as_str()) {
                if rest.is_empty() || rest.starts_with('/') || rest.starts_with('?') {
                    *url = format!("{}{}", new, rest);
                }
            }
        }
        self.core_api_url = new;
    }
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self::with_bases(DEFAULT_REGISTRY_URL, DEFAULT_CORE_API_URL)
    }
}

impl WalletConfig {
    /// Create default configuration for mainnet
    pub fn default_mainnet() -> Self {
        Self {
            api: ApiSettings::default(),
            bitcoin: BitcoinConfig {
                network: NetworkType::Mainnet,
                esplora_url: default_esplora_url(NetworkType::Mainnet),
            },
        }
    }

    /// Create default configuration for a local regtest environment
    pub fn default_regtest() -> Self {
        Self {
            api: ApiSettings::default(),
            bitcoin: BitcoinConfig {
                network: NetworkType::Regtest,
                esplora_url: default_esplora_url(NetworkType::Regtest),
            },
        }
    }

    /// Defaults for any network
    pub fn for_network(network: NetworkType) -> Self {
        let mut config = Self::default_mainnet();
        config.bitcoin = BitcoinConfig {
            network,
            esplora_url: default_esplora_url(network),
        };
        config
    }
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self::default_mainnet()
    }
}

/// Default Esplora URL for a network
///
/// - Regtest: `http://localhost:6270` (the local core API also serves block data)
/// - Signet: `https://mempool.space/signet/api`
/// - Testnet: `https://mempool.space/testnet/api`
/// - Mainnet: `https://mempool.space/api`
pub fn default_esplora_url(network: NetworkType) -> String {
    match network {
        NetworkType::Regtest => DEFAULT_CORE_API_URL.to_string(),
        NetworkType::Signet => "https://mempool.space/signet/api".to_string(),
        NetworkType::Testnet => "https://mempool.space/testnet/api".to_string(),
        NetworkType::Mainnet => "https://mempool.space/api".to_string(),
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Invalid network: {0}")]
    InvalidNetwork(String),

    #[error("Config directory not found")]
    DirectoryNotFound,
}

/// Configuration overrides from CLI arguments or environment variables
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub network: Option<NetworkType>,
    pub esplora_url: Option<String>,
    pub registry_url: Option<String>,
    pub insight_url: Option<String>,
    pub core_api_url: Option<String>,
    pub core_api_password: Option<String>,
    pub deployment: Option<DeploymentMode>,
}

impl ConfigOverrides {
    /// Create empty overrides
    pub fn new() -> Self {
        Self::default()
    }

    /// Create overrides from environment variables
    pub fn from_env() -> Self {
        Self {
            network: std::env::var("BITCOIN_NETWORK")
                .ok()
                .and_then(|s| s.parse().ok()),
            esplora_url: std::env::var("ESPLORA_URL").ok(),
            registry_url: std::env::var("REGISTRY_URL").ok(),
            insight_url: std::env::var("INSIGHT_URL").ok(),
            core_api_url: std::env::var("CORE_API_URL").ok(),
            core_api_password: std::env::var("CORE_API_PASSWORD").ok(),
            deployment: std::env::var("DEPLOYMENT_MODE")
                .ok()
                .and_then(|s| s.parse().ok()),
        }
    }

    /// Merge with another set of overrides (other takes precedence)
    pub fn merge(mut self, other: Self) -> Self {
        if other.network.is_some() {
            self.network = other.network;
        }
        if other.esplora_url.is_some() {
            self.esplora_url = other.esplora_url;
        }
        if other.registry_url.is_some() {
            self.registry_url = other.registry_url;
        }
        if other.insight_url.is_some() {
            self.insight_url = other.insight_url;
        }
        if other.core_api_url.is_some() {
            self.core_api_url = other.core_api_url;
        }
        if other.core_api_password.is_some() {
            self.core_api_password = other.core_api_password;
        }
        if other.deployment.is_some() {
            self.deployment = other.deployment;
        }
        self
    }
}

/// Get the default configuration directory path
///
/// Returns: `~/.identity-wallet/`
pub fn default_config_dir() -> Result<PathBuf, ConfigError> {
    dirs::home_dir()
        .map(|home| home.join(".identity-wallet"))
        .ok_or(ConfigError::DirectoryNotFound)
}

/// Get the default configuration file path
///
/// Returns: `~/.identity-wallet/config.json`
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    Ok(default_config_dir()?.join("config.json"))
}

/// Load configuration from file with overrides
///
/// # Priority (highest to lowest):
/// 1. CLI overrides (passed as argument)
/// 2. Environment variables
/// 3. Config file
/// 4. Network defaults
pub fn load_config(
    config_path: Option<&Path>,
    cli_overrides: ConfigOverrides,
) -> Result<WalletConfig, ConfigError> {
    let path = match config_path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };

    let mut config = if path.exists() {
        log::debug!("Loading configuration from {}", path.display());
        let contents = std::fs::read_to_string(&path)?;
        serde_json::from_str(&contents)?
    } else {
        WalletConfig::for_network(cli_overrides.network.unwrap_or(NetworkType::Mainnet))
    };

    apply_overrides(&mut config, ConfigOverrides::from_env().merge(cli_overrides));

    Ok(config)
}

/// Save configuration to file
///
/// Creates parent directories if they don't exist.
pub fn save_config(config: &WalletConfig, config_path: Option<&Path>) -> Result<(), ConfigError> {
    let path = match config_path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(&path, json)?;

    Ok(())
}

fn apply_overrides(config: &mut WalletConfig, overrides: ConfigOverrides) {
    if let Some(network) = overrides.network {
        if config.bitcoin.network != network {
            config.bitcoin.network = network;
            // Follow the network unless the URL is overridden explicitly
            if overrides.esplora_url.is_none() {
                config.bitcoin.esplora_url = default_esplora_url(network);
            }
        }
    }

    if let Some(url) = overrides.esplora_url {
        config.bitcoin.esplora_url = url;
    }

    if let Some(registry) = overrides.registry_url.as_deref() {
        config.api.rebase_registry(registry);
    }
    if let Some(core) = overrides.core_api_url.as_deref() {
        config.api.rebase_core(core);
    }

    if let Some(url) = overrides.insight_url {
        config.api.insight_url = url;
    }
    if let Some(password) = overrides.core_api_password {
        config.api.core_api_password = password;
    }
    if let Some(deployment) = overrides.deployment {
        config.api.deployment = deployment;
    }
}
