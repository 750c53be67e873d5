//! Balance refresh across a set of addresses

use futures::stream::{FuturesUnordered, StreamExt};

use super::actions::{update_balances, AccountAction, BalanceSnapshot};
use crate::bitcoin::satoshis_to_btc;
use crate::dispatch::Dispatch;
use crate::http::{append_path, insight_url, ApiClient, HttpError};

/// Combined confirmed + unconfirmed balance of one address
#[derive(Debug, Clone, PartialEq)]
pub struct AddressBalance {
    pub address: String,
    pub balance: f64,
}

fn parse_satoshis(body: &str) -> Result<i64, HttpError> {
    body.trim()
        .parse::<i64>()
        .map_err(|e| HttpError::InvalidBody(format!("expected satoshi amount, got {:?}: {}", body, e)))
}

fn combine_satoshis(confirmed: i64, unconfirmed: i64) -> Result<i64, HttpError> {
    confirmed.checked_add(unconfirmed).ok_or_else(|| {
        HttpError::InvalidBody(format!(
            "balance out of range: {} + {} satoshis",
            confirmed, unconfirmed
        ))
    })
}

/// Fetch the confirmed, then the unconfirmed, balance under an insight base
pub async fn fetch_address_balance(client: &ApiClient, url_base: &str) -> Result<f64, HttpError> {
    let confirmed = parse_satoshis(&client.get_text(&append_path(url_base, "balance")).await?)?;
    let unconfirmed =
        parse_satoshis(&client.get_text(&append_path(url_base, "unconfirmedBalance")).await?)?;

    Ok(satoshis_to_btc(combine_satoshis(confirmed, unconfirmed)?))
}

/// Build the snapshot from per-address results
///
/// A repeated address is logged and only its first result counts.
pub fn aggregate_balances(results: &[AddressBalance]) -> BalanceSnapshot {
    let mut snapshot = BalanceSnapshot::default();

    for result in results {
        if snapshot.balances.contains_key(&result.address) {
            log::error!(
                "refreshBalances: Duplicate address {} in addresses array",
                result.address
            );
            continue;
        }
        snapshot.total += result.balance;
        snapshot.balances.insert(result.address.clone(), result.balance);
    }

    snapshot
}

/// Refresh balances of `addresses` and dispatch one `UpdateBalances`
///
/// All addresses are queried concurrently. Results are collected in
/// completion order and the snapshot is dispatched once every address has
/// reported. If any address fails, nothing is dispatched.
///
/// # Arguments
///
/// * `insight_url_template` - template with `{address}` and `{coreAPIPassword}` placeholders
/// * `addresses` - may contain duplicates; each is queried
pub async fn refresh_balances<D: Dispatch<AccountAction>>(
    dispatch: &mut D,
    client: &ApiClient,
    insight_url_template: &str,
    addresses: &[String],
    core_api_password: &str,
) {
    let mut pending: FuturesUnordered<_> = addresses
        .iter()
        .map(|address| async move {
            log::debug!("refreshBalances: refreshing balances for address {}", address);
            let url_base = insight_url(insight_url_template, address, core_api_password);
            (address, fetch_address_balance(client, &url_base).await)
        })
        .collect();

    let mut results = Vec::with_capacity(addresses.len());

    while let Some((address, outcome)) = pending.next().await {
        match outcome {
            Ok(balance) => {
                results.push(AddressBalance {
                    address: address.clone(),
                    balance,
                });

                if results.len() >= addresses.len() {
                    dispatch.dispatch(update_balances(aggregate_balances(&results)));
                }
            }
            Err(e) => {
                log::error!(
                    "refreshBalances: error fetching {} balance: {}",
                    address,
                    e
                );
            }
        }
    }
}
