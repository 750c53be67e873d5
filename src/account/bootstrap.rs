//! Account bootstrap from a backup phrase

use super::actions::{create_account, AccountAction};
use super::AccountError;
use crate::config::NetworkType;
use crate::dispatch::Dispatch;
use crate::keys::{encrypt_backup_phrase, generate_mnemonic, master_keychain, validate_mnemonic};

/// Create the account for `backup_phrase`, or for a new phrase
///
/// A missing or invalid phrase is replaced by a freshly generated 12-word
/// mnemonic. The phrase is encrypted under `password` before anything is
/// dispatched; on failure the error is returned and nothing is dispatched.
///
/// # Example
///
/// ```ignore
/// let mut actions = Vec::new();
/// initialize_wallet(&mut actions, "password", None, 1, NetworkType::Mainnet).await?;
/// ```
pub async fn initialize_wallet<D: Dispatch<AccountAction>>(
    dispatch: &mut D,
    password: &str,
    backup_phrase: Option<&str>,
    identities_to_generate: u32,
    network: NetworkType,
) -> Result<(), AccountError> {
    let mnemonic = match backup_phrase.and_then(validate_mnemonic) {
        Some(mnemonic) => mnemonic,
        None => {
            if backup_phrase.is_some() {
                log::debug!("initializeWallet: invalid backup phrase, creating a new wallet");
            }
            generate_mnemonic()?
        }
    };

    let master = master_keychain(&mnemonic, network)?;

    let encrypted_backup_phrase = encrypt_backup_phrase(&mnemonic.to_string(), password).await?;

    let action = create_account(
        encrypted_backup_phrase,
        &master,
        identities_to_generate,
        network,
    )?;
    dispatch.dispatch(action);

    Ok(())
}
