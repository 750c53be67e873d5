//! Bitcoin layer: Esplora access, client-side spends and unit conversions

pub mod network;
pub mod spend;
pub mod units;

pub use network::{EsploraClient, NetworkConfig, NetworkError};
pub use spend::{
    broadcast_transaction, build_spend, coerce_address, make_bitcoin_spend, parse_payment_key,
    FeeRateConfig, SpendError, SpendRequest,
};
pub use units::{btc_to_satoshis, floor_satoshis, rounded_satoshis, satoshis_to_btc};
