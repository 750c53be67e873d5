//! Config command implementations

use std::path::Path;

use crate::config::{default_config_path, save_config, ConfigError, NetworkType, WalletConfig};

/// Initialize configuration file with network-specific defaults
pub fn init(network: Option<String>, config_path: Option<&Path>) -> Result<(), ConfigError> {
    let network_type = match network.as_deref() {
        Some(n) => n.parse::<NetworkType>()?,
        None => NetworkType::Mainnet,
    };

    let config = WalletConfig::for_network(network_type);
    save_config(&config, config_path)?;

    let path = match config_path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };
    println!("✓ Configuration initialized for {:?}", network_type);
    println!("  Config file: {}", path.display());

    Ok(())
}
