//! Profile command implementations

use crate::cli::commands::print_actions;
use crate::config::WalletConfig;
use crate::http::{ApiClient, HttpError};
use crate::profiles::{
    check_name_availability_and_price, search_identities, AvailabilityAction, SearchAction,
};

#[derive(Debug, thiserror::Error)]
pub enum ProfilesCommandError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub async fn check_name(config: &WalletConfig, name: &str) -> Result<(), ProfilesCommandError> {
    let client = ApiClient::from_settings(&config.api)?;
    let mut actions: Vec<AvailabilityAction> = Vec::new();

    check_name_availability_and_price(&mut actions, &client, &config.api, name).await;

    print_actions(&actions)?;
    Ok(())
}

pub async fn search(config: &WalletConfig, query: &str) -> Result<(), ProfilesCommandError> {
    let client = ApiClient::from_settings(&config.api)?;
    let mut actions: Vec<SearchAction> = Vec::new();

    search_identities(&mut actions, &client, &config.api, query).await;

    print_actions(&actions)?;
    Ok(())
}
