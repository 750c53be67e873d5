//! Account store actions
//!
//! Account bootstrap, balance refresh, core wallet queries, withdrawals and
//! notification opt-in. Asynchronous flows report through a [`Dispatch`]
//! implementation and return once their own actions have been dispatched.
//!
//! [`Dispatch`]: crate::dispatch::Dispatch

pub mod actions;
pub mod balances;
pub mod bootstrap;
pub mod core_wallet;
pub mod notifications;
pub mod withdraw;

pub use actions::{AccountAction, BalanceSnapshot};
pub use balances::refresh_balances;
pub use bootstrap::initialize_wallet;
pub use core_wallet::{
    get_core_wallet_address, refresh_core_wallet_balance, withdraw_bitcoin_from_core_wallet,
    WithdrawalRequest,
};
pub use notifications::email_notifications;
pub use withdraw::withdraw_bitcoin_client_side;

use crate::keys::KeyError;

/// Message dispatched when a withdrawal targets a core endpoint that this
/// deployment does not have
pub const WITHDRAWALS_DISABLED_MESSAGE: &str =
    "Core wallet withdrawls not allowed in the simple webapp build";

/// Errors returned (not dispatched) by account flows
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("Key error: {0}")]
    Key(#[from] KeyError),
}
