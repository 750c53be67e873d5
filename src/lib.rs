//! Identity Wallet
//!
//! Client-side action layer of a bitcoin identity wallet: account bootstrap
//! from a backup phrase, balance refresh, client-side and core-proxied
//! withdrawals, and profile name lookups. Every flow reports state changes
//! as serializable actions through a caller-supplied dispatcher.

pub mod account;
pub mod bitcoin;
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod http;
pub mod keys;
pub mod profiles;
