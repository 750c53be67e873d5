//! BTC / satoshi conversions

pub const SATOSHIS_PER_BTC: f64 = 100_000_000.0;

pub fn satoshis_to_btc(satoshis: i64) -> f64 {
    satoshis as f64 / SATOSHIS_PER_BTC
}

/// Unrounded satoshi value of a BTC amount
pub fn btc_to_satoshis(btc: f64) -> f64 {
    btc * SATOSHIS_PER_BTC
}

/// Satoshis for a withdrawal request, rounded to the nearest integer
///
/// Returns `None` for negative or non-finite amounts.
pub fn rounded_satoshis(btc: f64) -> Option<u64> {
    if !btc.is_finite() || btc < 0.0 {
        return None;
    }
    Some(btc_to_satoshis(btc).round() as u64)
}

/// Satoshis for a client-side spend, truncated toward zero
pub fn floor_satoshis(btc: f64) -> Option<u64> {
    if !btc.is_finite() || btc < 0.0 {
        return None;
    }
    Some(btc_to_satoshis(btc).floor() as u64)
}
