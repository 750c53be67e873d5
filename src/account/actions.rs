//! Account actions and their constructors

use bitcoin::bip32::Xpriv;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::NetworkType;
use crate::dispatch::Dispatch;
use crate::keys::{blockchain_identities, IdentityKeypair, KeyError};

/// Aggregated btc balances keyed by address, plus their total
///
/// Serializes flat: `{"<address>": 0.5, ..., "total": 0.5}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BalanceSnapshot {
    #[serde(flatten)]
    pub balances: BTreeMap<String, f64>,
    pub total: f64,
}

impl BalanceSnapshot {
    pub fn get(&self, address: &str) -> Option<f64> {
        self.balances.get(address).copied()
    }

    pub fn len(&self) -> usize {
        self.balances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }
}

/// State transitions of the account store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum AccountAction {
    CreateAccount {
        encrypted_backup_phrase: String,
        identity_public_keychain: String,
        bitcoin_public_keychain: String,
        first_bitcoin_address: String,
        identity_addresses: Vec<String>,
        identity_keypairs: Vec<IdentityKeypair>,
    },
    #[serde(rename = "UPDATE_CORE_ADDRESS")]
    UpdateCoreWalletAddress {
        core_wallet_address: String,
    },
    #[serde(rename = "UPDATE_CORE_BALANCE")]
    UpdateCoreWalletBalance {
        core_wallet_balance: f64,
    },
    DeleteAccount {
        encrypted_backup_phrase: Option<String>,
        account_created: bool,
    },
    UpdateBackupPhrase {
        encrypted_backup_phrase: String,
    },
    UpdateBalances {
        balances: BalanceSnapshot,
    },
    ResetCoreBalanceWithdrawal,
    WithdrawingCoreBalance {
        recipient_address: String,
    },
    WithdrawCoreBalanceSuccess,
    WithdrawCoreBalanceError {
        error: String,
    },
    PromptedForEmail {
        email: Option<String>,
    },
    ConnectedStorage,
    ViewedRecoveryCode,
    RecoveryCodeVerified,
    NewBitcoinAddress,
    NewIdentityAddress {
        keypair: IdentityKeypair,
    },
    IncrementIdentityAddressIndex,
}

/// Account creation record for a freshly derived master keychain
pub fn create_account(
    encrypted_backup_phrase: String,
    master_keychain: &Xpriv,
    identities_to_generate: u32,
    network: NetworkType,
) -> Result<AccountAction, KeyError> {
    log::debug!(
        "createAccount: identitiesToGenerate: {}",
        identities_to_generate
    );

    let identities = blockchain_identities(master_keychain, identities_to_generate, network)?;

    Ok(AccountAction::CreateAccount {
        encrypted_backup_phrase,
        identity_public_keychain: identities.identity_public_keychain,
        bitcoin_public_keychain: identities.bitcoin_public_keychain,
        first_bitcoin_address: identities.first_bitcoin_address,
        identity_addresses: identities.identity_addresses,
        identity_keypairs: identities.identity_keypairs,
    })
}

/// Core wallet receive address
pub fn update_core_wallet_address(core_wallet_address: impl Into<String>) -> AccountAction {
    AccountAction::UpdateCoreWalletAddress {
        core_wallet_address: core_wallet_address.into(),
    }
}

/// Core wallet balance in BTC
pub fn update_core_wallet_balance(core_wallet_balance: f64) -> AccountAction {
    AccountAction::UpdateCoreWalletBalance {
        core_wallet_balance,
    }
}

/// Forget the account and its encrypted phrase
pub fn delete_account() -> AccountAction {
    AccountAction::DeleteAccount {
        encrypted_backup_phrase: None,
        account_created: false,
    }
}

/// Replace the stored encrypted backup phrase
pub fn update_backup_phrase(encrypted_backup_phrase: impl Into<String>) -> AccountAction {
    AccountAction::UpdateBackupPhrase {
        encrypted_backup_phrase: encrypted_backup_phrase.into(),
    }
}

/// Per-address balances and their total
pub fn update_balances(balances: BalanceSnapshot) -> AccountAction {
    AccountAction::UpdateBalances { balances }
}

pub fn reset_core_balance_withdrawal() -> AccountAction {
    AccountAction::ResetCoreBalanceWithdrawal
}

/// A withdrawal to `recipient_address` has started
pub fn withdrawing_core_balance(recipient_address: impl Into<String>) -> AccountAction {
    AccountAction::WithdrawingCoreBalance {
        recipient_address: recipient_address.into(),
    }
}

pub fn withdraw_core_balance_success() -> AccountAction {
    AccountAction::WithdrawCoreBalanceSuccess
}

/// The withdrawal failed with `error`
pub fn withdraw_core_balance_error(error: impl Into<String>) -> AccountAction {
    AccountAction::WithdrawCoreBalanceError {
        error: error.into(),
    }
}

/// The user was asked for an email; `None` when they skipped it
pub fn prompted_for_email(email: Option<String>) -> AccountAction {
    AccountAction::PromptedForEmail { email }
}

pub fn connected_storage() -> AccountAction {
    AccountAction::ConnectedStorage
}

pub fn update_viewed_recovery_code() -> AccountAction {
    AccountAction::ViewedRecoveryCode
}

pub fn new_bitcoin_address() -> AccountAction {
    AccountAction::NewBitcoinAddress
}

/// Keypair of a newly derived identity address
pub fn new_identity_address(keypair: IdentityKeypair) -> AccountAction {
    AccountAction::NewIdentityAddress { keypair }
}

pub fn increment_identity_address_index() -> AccountAction {
    AccountAction::IncrementIdentityAddressIndex
}

// Dispatching wrappers

/// Mark the recovery code as verified
pub fn do_verify_recovery_code<D: Dispatch<AccountAction>>(dispatch: &mut D) {
    dispatch.dispatch(AccountAction::RecoveryCodeVerified);
}

pub fn displayed_recovery_code<D: Dispatch<AccountAction>>(dispatch: &mut D) {
    log::trace!("displayedRecoveryCode");
    dispatch.dispatch(update_viewed_recovery_code());
}

/// Record the email prompt without an address
pub fn skip_email_backup<D: Dispatch<AccountAction>>(dispatch: &mut D) {
    log::trace!("skipEmailBackup");
    dispatch.dispatch(prompted_for_email(None));
}

pub fn storage_is_connected<D: Dispatch<AccountAction>>(dispatch: &mut D) {
    log::trace!("storageConnected");
    dispatch.dispatch(connected_storage());
}

/// Move on to the next identity address index
pub fn used_identity_address<D: Dispatch<AccountAction>>(dispatch: &mut D) {
    log::trace!("usedIdentityAddress");
    dispatch.dispatch(increment_identity_address_index());
}

/// Clear withdrawal progress so another can start
pub fn reset_core_withdrawal<D: Dispatch<AccountAction>>(dispatch: &mut D) {
    dispatch.dispatch(reset_core_balance_withdrawal());
}
