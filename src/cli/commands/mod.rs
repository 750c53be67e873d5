//! CLI command implementations

pub mod account;
pub mod config;
pub mod profiles;

use serde::Serialize;

/// Print dispatched actions, one pretty JSON document each
pub fn print_actions<A: Serialize>(actions: &[A]) -> Result<(), serde_json::Error> {
    if actions.is_empty() {
        println!("(no actions dispatched)");
        return Ok(());
    }

    for action in actions {
        println!("{}", serde_json::to_string_pretty(action)?);
    }

    Ok(())
}
