//! Core wallet queries and core-proxied withdrawals

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::actions::{
    update_core_wallet_address, update_core_wallet_balance, withdraw_core_balance_error,
    withdraw_core_balance_success, withdrawing_core_balance, AccountAction,
};
use super::WITHDRAWALS_DISABLED_MESSAGE;
use crate::bitcoin::rounded_satoshis;
use crate::dispatch::Dispatch;
use crate::http::{ApiClient, HttpError};

/// Marker telling core that the payment key belongs to a compressed public key
pub const COMPRESSED_PUBLIC_KEY_SUFFIX: &str = "01";

/// JSON body posted to the core wallet withdrawal endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithdrawalRequest {
    pub address: String,
    pub min_confs: u32,
    /// Satoshis; absent means withdraw everything
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_key: Option<String>,
}

impl WithdrawalRequest {
    /// Build a request; `amount_btc` is converted to rounded satoshis
    ///
    /// Returns `None` if the amount is negative or not finite.
    pub fn new(
        recipient_address: &str,
        amount_btc: Option<f64>,
        payment_key: Option<&str>,
    ) -> Option<Self> {
        let amount = match amount_btc {
            Some(btc) => Some(rounded_satoshis(btc)?),
            None => None,
        };

        Some(Self {
            address: recipient_address.to_string(),
            min_confs: 0,
            amount,
            payment_key: payment_key
                .filter(|key| !key.is_empty())
                .map(|key| format!("{}{}", key, COMPRESSED_PUBLIC_KEY_SUFFIX)),
        })
    }
}

#[derive(Debug, Deserialize)]
struct CoreBalanceResponse {
    balance: CoreBalance,
}

#[derive(Debug, Deserialize)]
struct CoreBalance {
    bitcoin: f64,
}

#[derive(Debug, Deserialize)]
struct CoreAddressResponse {
    address: String,
}

/// Text of a truthy `error` field, if the response carries one
fn response_error(response: &Value) -> Option<String> {
    match response.get("error")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

/// Refresh the core wallet balance
///
/// In deployments without a core API the balance is reported as zero.
/// Failures are logged and nothing is dispatched.
pub async fn refresh_core_wallet_balance<D: Dispatch<AccountAction>>(
    dispatch: &mut D,
    client: &ApiClient,
    address_balance_url: &str,
    core_api_password: &str,
) {
    if client.is_core_endpoint_disabled(address_balance_url) {
        log::debug!("Mocking core wallet balance in webapp build");
        dispatch.dispatch(update_core_wallet_balance(0.0));
        return;
    }

    log::trace!("refreshCoreWalletBalance: Beginning refresh...");
    log::debug!(
        "refreshCoreWalletBalance: addressBalanceUrl: {}",
        address_balance_url
    );

    match client
        .get_json::<CoreBalanceResponse>(address_balance_url, Some(core_api_password))
        .await
    {
        Ok(response) => {
            let balance = response.balance.bitcoin;
            log::debug!("refreshCoreWalletBalance: balance is {}.", balance);
            dispatch.dispatch(update_core_wallet_balance(balance));
        }
        Err(e) => {
            log::error!("refreshCoreWalletBalance: error refreshing balance: {}", e);
        }
    }
}

/// Fetch the core wallet's payment address
pub async fn get_core_wallet_address<D: Dispatch<AccountAction>>(
    dispatch: &mut D,
    client: &ApiClient,
    wallet_payment_address_url: &str,
    core_api_password: &str,
) {
    if client.is_core_endpoint_disabled(wallet_payment_address_url) {
        log::error!("Cannot use core wallet if core is disabled");
        return;
    }

    match client
        .get_json::<CoreAddressResponse>(wallet_payment_address_url, Some(core_api_password))
        .await
    {
        Ok(response) => dispatch.dispatch(update_core_wallet_address(response.address)),
        Err(e) => log::error!("getCoreWalletAddress: error fetching address: {}", e),
    }
}

async fn post_withdrawal(
    client: &ApiClient,
    url: &str,
    request: &WithdrawalRequest,
    core_api_password: &str,
) -> Result<(), String> {
    let response = client
        .post_json(url, request, Some(core_api_password))
        .await
        .map_err(|e| e.to_string())?;

    let status = response.status;
    let body: Value = response.json().map_err(|e: HttpError| e.to_string())?;

    if let Some(error) = response_error(&body) {
        return Err(error);
    }
    if !status.is_success() {
        return Err(format!("Withdrawal failed with status {}", status.as_u16()));
    }

    Ok(())
}

/// Withdraw from the core wallet to `recipient_address`
///
/// Dispatches `WithdrawingCoreBalance` then exactly one of
/// `WithdrawCoreBalanceSuccess` / `WithdrawCoreBalanceError`. Without an
/// amount, core sends the whole balance. A payment key, when given, is
/// used instead of core's own key.
///
/// # Arguments
///
/// * `core_wallet_withdraw_url` - core's withdraw endpoint
/// * `core_api_password` - sent as the bearer token
/// * `amount_btc` - converted to whole satoshis before sending
/// * `payment_key` - hex key to spend from, sent with the compression marker
pub async fn withdraw_bitcoin_from_core_wallet<D: Dispatch<AccountAction>>(
    dispatch: &mut D,
    client: &ApiClient,
    core_wallet_withdraw_url: &str,
    recipient_address: &str,
    core_api_password: &str,
    amount_btc: Option<f64>,
    payment_key: Option<&str>,
) {
    if client.is_core_endpoint_disabled(core_wallet_withdraw_url) {
        dispatch.dispatch(withdraw_core_balance_error(WITHDRAWALS_DISABLED_MESSAGE));
        return;
    }

    let request = match WithdrawalRequest::new(recipient_address, amount_btc, payment_key) {
        Some(request) => request,
        None => {
            log::error!(
                "withdrawBitcoinFromCoreWallet: invalid amount {:?}",
                amount_btc
            );
            dispatch.dispatch(withdraw_core_balance_error(format!(
                "Invalid withdrawal amount: {:?}",
                amount_btc
            )));
            return;
        }
    };

    match request.amount {
        Some(amount) => log::debug!(
            "withdrawBitcoinFromCoreWallet: {} to {}",
            amount,
            recipient_address
        ),
        None => log::debug!(
            "withdrawBitcoinFromCoreWallet: send all money to {}",
            recipient_address
        ),
    }
    if request.payment_key.is_some() {
        log::debug!("withdrawBitcoinFromCoreWallet: Using provided payment key");
    } else {
        log::debug!("withdrawBitcoinFromCoreWallet: No payment key, using core wallet");
    }

    dispatch.dispatch(withdrawing_core_balance(recipient_address));

    match post_withdrawal(client, core_wallet_withdraw_url, &request, core_api_password).await {
        Ok(()) => dispatch.dispatch(withdraw_core_balance_success()),
        Err(error) => {
            log::error!("withdrawBitcoinFromCoreWallet: {}", error);
            dispatch.dispatch(withdraw_core_balance_error(error));
        }
    }
}
