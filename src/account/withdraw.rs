//! Client-side withdrawal from a payment key

use super::actions::{
    withdraw_core_balance_error, withdraw_core_balance_success, withdrawing_core_balance,
    AccountAction,
};
use super::WITHDRAWALS_DISABLED_MESSAGE;
use crate::bitcoin::{
    broadcast_transaction, coerce_address, floor_satoshis, make_bitcoin_spend, EsploraClient,
    FeeRateConfig, NetworkConfig, SpendError, SpendRequest,
};
use crate::dispatch::Dispatch;
use crate::http::ApiClient;
use bdk_wallet::bitcoin::Txid;

fn spend_and_broadcast(network: &NetworkConfig, request: &SpendRequest) -> Result<Txid, SpendError> {
    let client = EsploraClient::from_network_config(network)?;
    let tx = make_bitcoin_spend(&client, request)?;
    broadcast_transaction(&client, &tx)
}

/// Spend from `payment_key` to `recipient_address` and broadcast it
///
/// The amount is truncated to whole satoshis; without one, every output of
/// the key is swept. Dispatches `WithdrawingCoreBalance` with the address as
/// encoded for `network`, followed by `WithdrawCoreBalanceSuccess` or
/// `WithdrawCoreBalanceError`. An address that is not valid for `network`
/// fails before anything is signed.
///
/// # Arguments
///
/// * `network` - chain and Esplora server the spend is synced and broadcast through
/// * `payment_key` - hex private key, optionally with the `01` compression marker
/// * `amount_btc` - amount in BTC, or `None` to sweep the key
///
/// # Example
///
/// ```ignore
/// let mut actions = Vec::new();
/// withdraw_bitcoin_client_side(
///     &mut actions,
///     &client,
///     &NetworkConfig::local_regtest(),
///     &payment_key,
///     "mrCDrCybB6J1vRfbwM5hemdJz73FwDBC8r",
///     Some(0.1),
///     FeeRateConfig::default(),
/// )
/// .await;
/// ```
pub async fn withdraw_bitcoin_client_side<D: Dispatch<AccountAction>>(
    dispatch: &mut D,
    client: &ApiClient,
    network: &NetworkConfig,
    payment_key: &str,
    recipient_address: &str,
    amount_btc: Option<f64>,
    fee_rate: FeeRateConfig,
) {
    if client.is_core_endpoint_disabled(&network.esplora_url) {
        dispatch.dispatch(withdraw_core_balance_error(WITHDRAWALS_DISABLED_MESSAGE));
        return;
    }

    let recipient = match coerce_address(recipient_address, network.network) {
        Ok(recipient) => recipient,
        Err(e) => {
            log::error!("withdrawBitcoinClientSide: {}", e);
            dispatch.dispatch(withdraw_core_balance_error(e.to_string()));
            return;
        }
    };

    dispatch.dispatch(withdrawing_core_balance(recipient.to_string()));

    let amount_sats = match amount_btc {
        Some(btc) => match floor_satoshis(btc) {
            Some(sats) => Some(sats),
            None => {
                dispatch.dispatch(withdraw_core_balance_error(format!(
                    "Invalid withdrawal amount: {}",
                    btc
                )));
                return;
            }
        },
        None => None,
    };

    log::info!(
        "Withdrawing {} to {} on {:?}",
        amount_sats
            .map(|sats| format!("{} sats", sats))
            .unwrap_or_else(|| "all funds".to_string()),
        recipient,
        network.network
    );

    let request = SpendRequest {
        payment_key: payment_key.to_string(),
        recipient,
        amount_sats,
        fee_rate,
    };
    let network = network.clone();

    let outcome = tokio::task::spawn_blocking(move || spend_and_broadcast(&network, &request))
        .await
        .map_err(|e| format!("Withdrawal task failed: {}", e))
        .and_then(|result| result.map_err(|e| e.to_string()));

    match outcome {
        Ok(txid) => {
            log::info!("Broadcast withdrawal transaction {}", txid);
            dispatch.dispatch(withdraw_core_balance_success());
        }
        Err(error) => {
            log::error!("withdrawBitcoinClientSide: {}", error);
            dispatch.dispatch(withdraw_core_balance_error(error));
        }
    }
}
