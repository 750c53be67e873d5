//! Password-based encryption of the backup phrase
//!
//! PBKDF2-HMAC-SHA256 (600,000 iterations, random 128-bit salt) derives an
//! AES-256-GCM key; each encryption uses a fresh 96-bit nonce. The output is
//! `hex(salt || nonce || ciphertext || tag)`.

use aes_gcm::{
    aead::{Aead, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};
use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha256;

use super::KeyError;

const PBKDF2_ROUNDS: u32 = 600_000;
const SALT_LEN: usize = 16;
const NONCE_LEN: usize = 12;
const TAG_LEN: usize = 16;

fn derive_cipher(password: &str, salt: &[u8]) -> Aes256Gcm {
    let mut key_bytes = [0u8; 32];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, PBKDF2_ROUNDS, &mut key_bytes);
    let key = aes_gcm::Key::<Aes256Gcm>::from_slice(&key_bytes);
    Aes256Gcm::new(key)
}

/// Encrypt data using AES-256-GCM with a password-derived key
///
/// # Example
///
/// ```ignore
/// let encrypted = encrypt_data(b"secret", "my_password")?;
/// let decrypted = decrypt_data(&encrypted, "my_password")?;
/// ```
pub fn encrypt_data(data: &[u8], password: &str) -> Result<String, KeyError> {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);

    let cipher = derive_cipher(password, &salt);

    let mut nonce_bytes = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, data)
        .map_err(|e| KeyError::Encryption(e.to_string()))?;

    let mut result = salt.to_vec();
    result.extend_from_slice(&nonce_bytes);
    result.extend_from_slice(&ciphertext);

    Ok(hex::encode(result))
}

/// Decrypt data encrypted with [`encrypt_data`]
pub fn decrypt_data(encrypted_hex: &str, password: &str) -> Result<Vec<u8>, KeyError> {
    let encrypted_bytes =
        hex::decode(encrypted_hex).map_err(|e| KeyError::Decryption(e.to_string()))?;

    if encrypted_bytes.len() < SALT_LEN + NONCE_LEN + TAG_LEN {
        return Err(KeyError::Decryption(format!(
            "Data too short (minimum {} bytes required)",
            SALT_LEN + NONCE_LEN + TAG_LEN
        )));
    }

    let (salt, rest) = encrypted_bytes.split_at(SALT_LEN);
    let (nonce_bytes, ciphertext) = rest.split_at(NONCE_LEN);
    let nonce = Nonce::from_slice(nonce_bytes);

    let cipher = derive_cipher(password, salt);

    cipher
        .decrypt(nonce, ciphertext)
        .map_err(|e| KeyError::Decryption(format!("Decryption failed (wrong password?): {}", e)))
}

/// Encrypt the raw backup phrase text
///
/// Runs key stretching on the blocking pool so callers on the async
/// runtime are not stalled.
pub async fn encrypt_backup_phrase(phrase: &str, password: &str) -> Result<String, KeyError> {
    let phrase = phrase.to_string();
    let password = password.to_string();

    tokio::task::spawn_blocking(move || encrypt_data(phrase.as_bytes(), &password))
        .await
        .map_err(|e| KeyError::Encryption(format!("Encryption task failed: {}", e)))?
}

/// Decrypt a backup phrase produced by [`encrypt_backup_phrase`]
pub fn decrypt_backup_phrase(encrypted_hex: &str, password: &str) -> Result<String, KeyError> {
    let bytes = decrypt_data(encrypted_hex, password)?;
    String::from_utf8(bytes).map_err(|e| KeyError::Decryption(e.to_string()))
}
