//! Client-side bitcoin spends from a single payment key
//!
//! The payment key is loaded into an in-memory single-key BDK wallet,
//! synced through Esplora, and the signed transaction is broadcast through
//! the same server.

use crate::bitcoin::{EsploraClient, NetworkError};
use crate::config::NetworkType;
use bdk_esplora::EsploraExt;
use bdk_wallet::bitcoin::address::NetworkUnchecked;
use bdk_wallet::bitcoin::secp256k1::SecretKey;
use bdk_wallet::bitcoin::{Address, Amount, FeeRate, PrivateKey, Transaction, Txid};
#[allow(deprecated)]
use bdk_wallet::{SignOptions, Wallet};

const STOP_GAP: usize = 1;
const PARALLEL_REQUESTS: usize = 5;

/// Errors that can occur while building or broadcasting a spend
#[derive(Debug, thiserror::Error)]
pub enum SpendError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Invalid payment key: {0}")]
    InvalidPaymentKey(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid fee rate: {0}")]
    InvalidFeeRate(String),

    #[error("Wallet sync failed: {0}")]
    SyncFailed(String),

    #[error("Transaction build failed: {0}")]
    BuildFailed(String),

    #[error("Transaction sign failed: {0}")]
    SignFailed(String),

    #[error("Transaction broadcast failed: {0}")]
    BroadcastFailed(String),
}

/// Fee rate configuration
#[derive(Debug, Clone, Copy)]
pub struct FeeRateConfig {
    /// Fee rate in satoshis per virtual byte (sat/vB)
    pub sat_per_vb: f64,
}

impl FeeRateConfig {
    /// Create a new fee rate configuration
    pub fn new(sat_per_vb: f64) -> Result<Self, SpendError> {
        if !(sat_per_vb > 0.0) {
            return Err(SpendError::InvalidFeeRate(
                "Fee rate must be positive".to_string(),
            ));
        }

        Ok(Self { sat_per_vb })
    }

    /// Create a fee rate for medium priority (5 sat/vB)
    pub fn medium_priority() -> Self {
        Self { sat_per_vb: 5.0 }
    }

    /// Convert to BDK FeeRate
    pub fn to_bdk_fee_rate(&self) -> FeeRate {
        // 1 vByte = 4 weight units, so 1 sat/vB = 250 sat/kwu
        let sat_per_kwu = (self.sat_per_vb * 250.0) as u64;
        FeeRate::from_sat_per_kwu(sat_per_kwu)
    }
}

impl Default for FeeRateConfig {
    fn default() -> Self {
        Self::medium_priority()
    }
}

/// A spend of `amount_sats` (or everything, when `None`) to `recipient`
#[derive(Debug, Clone)]
pub struct SpendRequest {
    pub payment_key: String,
    pub recipient: Address,
    pub amount_sats: Option<u64>,
    pub fee_rate: FeeRateConfig,
}

/// Parse a hex payment key
///
/// A trailing `01` compression marker on a 33-byte key is accepted.
pub fn parse_payment_key(hex_key: &str, network: NetworkType) -> Result<PrivateKey, SpendError> {
    let mut bytes =
        hex::decode(hex_key.trim()).map_err(|e| SpendError::InvalidPaymentKey(e.to_string()))?;

    if bytes.len() == 33 && bytes[32] == 0x01 {
        bytes.truncate(32);
    }

    let secret_key = SecretKey::from_slice(&bytes)
        .map_err(|e| SpendError::InvalidPaymentKey(e.to_string()))?;

    Ok(PrivateKey::new(secret_key, network.to_bitcoin_network()))
}

/// Parse `address` for `network`
///
/// On regtest, addresses encoded for another network are re-encoded for
/// regtest (same script). Other networks require a matching encoding.
pub fn coerce_address(address: &str, network: NetworkType) -> Result<Address, SpendError> {
    let unchecked = address
        .trim()
        .parse::<Address<NetworkUnchecked>>()
        .map_err(|e| SpendError::InvalidAddress(e.to_string()))?;

    let btc_network = network.to_bitcoin_network();

    if network == NetworkType::Regtest {
        let script = unchecked.assume_checked_ref().script_pubkey();
        Address::from_script(&script, btc_network)
            .map_err(|e| SpendError::InvalidAddress(e.to_string()))
    } else {
        unchecked
            .require_network(btc_network)
            .map_err(|e| SpendError::InvalidAddress(e.to_string()))
    }
}

/// Load a payment key into an in-memory single-key wallet
pub fn payment_key_wallet(key: &PrivateKey, network: NetworkType) -> Result<Wallet, SpendError> {
    let descriptor = format!("pkh({})", key.to_wif());

    Wallet::create_single(descriptor)
        .network(network.to_bitcoin_network())
        .create_wallet_no_persist()
        .map_err(|e| SpendError::InvalidPaymentKey(format!("Failed to load key: {}", e)))
}

/// Sync a payment key wallet with the chain
pub fn sync_payment_wallet(wallet: &mut Wallet, client: &EsploraClient) -> Result<(), SpendError> {
    log::debug!("Scanning payment key outputs via {}", client.url());

    let update = client
        .inner()
        .full_scan(wallet.start_full_scan(), STOP_GAP, PARALLEL_REQUESTS)
        .map_err(|e| SpendError::SyncFailed(e.to_string()))?;

    wallet
        .apply_update(update)
        .map_err(|e| SpendError::SyncFailed(format!("Failed to apply update: {}", e)))?;

    log::debug!(
        "Payment key balance: {} sats",
        wallet.balance().total().to_sat()
    );

    Ok(())
}

/// Build and sign a spend from the wallet's outputs
///
/// Without an amount, every output is swept to the recipient.
pub fn build_spend(
    wallet: &mut Wallet,
    recipient: &Address,
    amount_sats: Option<u64>,
    fee_rate: &FeeRateConfig,
) -> Result<Transaction, SpendError> {
    let mut tx_builder = wallet.build_tx();
    match amount_sats {
        Some(amount) => {
            tx_builder.add_recipient(recipient.script_pubkey(), Amount::from_sat(amount));
        }
        None => {
            tx_builder.drain_wallet();
            tx_builder.drain_to(recipient.script_pubkey());
        }
    }
    tx_builder.fee_rate(fee_rate.to_bdk_fee_rate());

    let mut psbt = tx_builder
        .finish()
        .map_err(|e| SpendError::BuildFailed(format!("Failed to build transaction: {}", e)))?;

    #[allow(deprecated)]
    let finalized = wallet
        .sign(&mut psbt, SignOptions::default())
        .map_err(|e| SpendError::SignFailed(format!("Failed to sign transaction: {}", e)))?;
    if !finalized {
        return Err(SpendError::SignFailed(
            "Transaction could not be finalized".to_string(),
        ));
    }

    psbt.extract_tx()
        .map_err(|e| SpendError::BuildFailed(format!("Failed to extract transaction: {}", e)))
}

/// Build a signed spend for `request`, syncing the payment key first
pub fn make_bitcoin_spend(
    client: &EsploraClient,
    request: &SpendRequest,
) -> Result<Transaction, SpendError> {
    let key = parse_payment_key(&request.payment_key, client.network())?;
    let mut wallet = payment_key_wallet(&key, client.network())?;

    sync_payment_wallet(&mut wallet, client)?;

    build_spend(
        &mut wallet,
        &request.recipient,
        request.amount_sats,
        &request.fee_rate,
    )
}

/// Broadcast a signed transaction
pub fn broadcast_transaction(
    client: &EsploraClient,
    tx: &Transaction,
) -> Result<Txid, SpendError> {
    log::trace!(
        "Broadcast btc spend with tx hex: {}",
        bdk_wallet::bitcoin::consensus::encode::serialize_hex(tx)
    );

    client
        .inner()
        .broadcast(tx)
        .map_err(|e| SpendError::BroadcastFailed(e.to_string()))?;

    Ok(tx.compute_txid())
}
