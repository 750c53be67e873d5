//! Account command implementations

use crate::account::{
    email_notifications, get_core_wallet_address, initialize_wallet, refresh_balances,
    refresh_core_wallet_balance, withdraw_bitcoin_client_side, withdraw_bitcoin_from_core_wallet,
    AccountAction, AccountError,
};
use crate::bitcoin::{FeeRateConfig, NetworkConfig, SpendError};
use crate::cli::commands::print_actions;
use crate::config::WalletConfig;
use crate::http::{ApiClient, HttpError};

#[derive(Debug, thiserror::Error)]
pub enum AccountCommandError {
    #[error("Account error: {0}")]
    Account(#[from] AccountError),

    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Spend error: {0}")]
    Spend(#[from] SpendError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Create an account and print the `CreateAccount` action
pub async fn create(
    config: &WalletConfig,
    password: &str,
    backup_phrase: Option<&str>,
    identities: u32,
) -> Result<(), AccountCommandError> {
    let mut actions: Vec<AccountAction> = Vec::new();
    initialize_wallet(
        &mut actions,
        password,
        backup_phrase,
        identities,
        config.bitcoin.network,
    )
    .await?;

    print_actions(&actions)?;
    Ok(())
}

pub async fn balances(
    config: &WalletConfig,
    addresses: &[String],
) -> Result<(), AccountCommandError> {
    let client = ApiClient::from_settings(&config.api)?;
    let mut actions: Vec<AccountAction> = Vec::new();

    refresh_balances(
        &mut actions,
        &client,
        &config.api.insight_url,
        addresses,
        &config.api.core_api_password,
    )
    .await;

    print_actions(&actions)?;
    Ok(())
}

pub async fn core_balance(config: &WalletConfig) -> Result<(), AccountCommandError> {
    let client = ApiClient::from_settings(&config.api)?;
    let mut actions: Vec<AccountAction> = Vec::new();

    refresh_core_wallet_balance(
        &mut actions,
        &client,
        &config.api.address_balance_url,
        &config.api.core_api_password,
    )
    .await;

    print_actions(&actions)?;
    Ok(())
}

pub async fn core_address(config: &WalletConfig) -> Result<(), AccountCommandError> {
    let client = ApiClient::from_settings(&config.api)?;
    let mut actions: Vec<AccountAction> = Vec::new();

    get_core_wallet_address(
        &mut actions,
        &client,
        &config.api.wallet_payment_address_url,
        &config.api.core_api_password,
    )
    .await;

    print_actions(&actions)?;
    Ok(())
}

/// Client-side spend from a payment key
pub async fn withdraw(
    config: &WalletConfig,
    payment_key: &str,
    to: &str,
    amount: Option<f64>,
    fee_rate: Option<f64>,
) -> Result<(), AccountCommandError> {
    let client = ApiClient::from_settings(&config.api)?;
    let network = NetworkConfig::from_config(&config.bitcoin);
    let fee_rate = match fee_rate {
        Some(rate) => FeeRateConfig::new(rate)?,
        None => FeeRateConfig::default(),
    };
    let mut actions: Vec<AccountAction> = Vec::new();

    withdraw_bitcoin_client_side(
        &mut actions,
        &client,
        &network,
        payment_key,
        to,
        amount,
        fee_rate,
    )
    .await;

    print_actions(&actions)?;
    Ok(())
}

pub async fn withdraw_core(
    config: &WalletConfig,
    to: &str,
    amount: Option<f64>,
    payment_key: Option<&str>,
) -> Result<(), AccountCommandError> {
    let client = ApiClient::from_settings(&config.api)?;
    let mut actions: Vec<AccountAction> = Vec::new();

    withdraw_bitcoin_from_core_wallet(
        &mut actions,
        &client,
        &config.api.core_wallet_withdraw_url,
        to,
        &config.api.core_api_password,
        amount,
        payment_key,
    )
    .await;

    print_actions(&actions)?;
    Ok(())
}

pub async fn email(
    config: &WalletConfig,
    email: &str,
    opt_in: bool,
) -> Result<(), AccountCommandError> {
    let client = ApiClient::from_settings(&config.api)?;
    let mut actions: Vec<AccountAction> = Vec::new();

    email_notifications(
        &mut actions,
        &client,
        &config.api.email_notifications_url,
        email,
        opt_in,
    )
    .await;

    print_actions(&actions)?;
    Ok(())
}
