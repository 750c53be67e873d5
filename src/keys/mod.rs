//! Key material for the identity wallet
//!
//! BIP39 backup phrases, BIP32 identity and bitcoin keychains,
//! and password-based encryption of the backup phrase.

pub mod derivation;
pub mod encryption;

pub use derivation::{
    blockchain_identities, derive_identity_keypair, master_keychain, BlockchainIdentities,
    IdentityKeypair,
};
pub use encryption::{decrypt_backup_phrase, decrypt_data, encrypt_backup_phrase, encrypt_data};

/// Key derivation and encryption errors
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("BIP39 error: {0}")]
    Bip39(String),

    #[error("BIP32 derivation error: {0}")]
    Bip32(String),

    #[error("Encryption error: {0}")]
    Encryption(String),

    #[error("Decryption error: {0}")]
    Decryption(String),
}

/// Entropy size of generated backup phrases, in bits (12 words)
pub const BACKUP_PHRASE_STRENGTH: usize = 128;

/// Generate a new BIP39 backup phrase (12 words)
pub fn generate_mnemonic() -> Result<bip39::Mnemonic, KeyError> {
    use rand::RngCore;

    let mut entropy = [0u8; BACKUP_PHRASE_STRENGTH / 8];
    rand::rngs::OsRng.fill_bytes(&mut entropy);

    bip39::Mnemonic::from_entropy(&entropy).map_err(|e| KeyError::Bip39(e.to_string()))
}

/// Parse a backup phrase, returning `None` when it is not valid BIP39
pub fn validate_mnemonic(phrase: &str) -> Option<bip39::Mnemonic> {
    bip39::Mnemonic::parse_normalized(phrase.trim()).ok()
}
