//! Identity and bitcoin keychain derivation
//!
//! From the master keychain:
//! - identity keychain at `m/888'/0'`, one hardened child per identity owner
//! - bitcoin keychain at `m/44'/0'/0'`, first receive address at `/0/0`

use bitcoin::bip32::{ChildNumber, DerivationPath, Xpriv, Xpub};
use bitcoin::secp256k1::{All, Secp256k1};
use bitcoin::{Address, PublicKey};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::str::FromStr;

use super::KeyError;
use crate::config::NetworkType;

const IDENTITY_KEYCHAIN_PATH: &str = "m/888'/0'";
const BITCOIN_KEYCHAIN_PATH: &str = "m/44'/0'/0'";

/// Keypair owning one identity address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityKeypair {
    /// Private key, hex
    pub key: String,

    /// Compressed public key, hex
    #[serde(rename = "keyID")]
    pub key_id: String,

    /// P2PKH address of the owner key
    pub address: String,

    /// Extended private key of the owner's apps node (`/0'`)
    pub apps_node_key: String,

    /// Per-identity salt: sha256 of the public key hex
    pub salt: String,
}

/// Public keychains and identity keys derived for a new account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockchainIdentities {
    pub identity_public_keychain: String,
    pub bitcoin_public_keychain: String,
    pub first_bitcoin_address: String,
    pub identity_addresses: Vec<String>,
    pub identity_keypairs: Vec<IdentityKeypair>,
}

/// Derive the BIP32 master keychain from a backup phrase
pub fn master_keychain(
    mnemonic: &bip39::Mnemonic,
    network: NetworkType,
) -> Result<Xpriv, KeyError> {
    let seed = mnemonic.to_seed("");
    Xpriv::new_master(network.to_bitcoin_network(), &seed)
        .map_err(|e| KeyError::Bip32(format!("Failed to create master key: {}", e)))
}

fn derive_path(secp: &Secp256k1<All>, key: &Xpriv, path: &str) -> Result<Xpriv, KeyError> {
    let derivation_path = DerivationPath::from_str(path)
        .map_err(|e| KeyError::Bip32(format!("Invalid derivation path {}: {}", path, e)))?;

    key.derive_priv(secp, &derivation_path)
        .map_err(|e| KeyError::Bip32(format!("Derivation failed: {}", e)))
}

fn p2pkh_address(secp: &Secp256k1<All>, key: &Xpriv, network: NetworkType) -> String {
    let public_key = PublicKey::new(key.private_key.public_key(secp));
    Address::p2pkh(public_key.pubkey_hash(), network.to_bitcoin_network()).to_string()
}

/// Derive the keypair for identity owner `index` under the identity keychain
pub fn derive_identity_keypair(
    identity_keychain: &Xpriv,
    index: u32,
    network: NetworkType,
) -> Result<IdentityKeypair, KeyError> {
    let secp = Secp256k1::new();

    let child = ChildNumber::from_hardened_idx(index)
        .map_err(|e| KeyError::Bip32(format!("Invalid identity index {}: {}", index, e)))?;
    let owner = identity_keychain
        .derive_priv(&secp, &[child])
        .map_err(|e| KeyError::Bip32(format!("Identity derivation failed: {}", e)))?;

    let apps_node = derive_path(&secp, &owner, "m/0'")?;

    let public_key = owner.private_key.public_key(&secp);
    let key_id = hex::encode(public_key.serialize());
    let salt = hex::encode(Sha256::digest(key_id.as_bytes()));

    Ok(IdentityKeypair {
        key: hex::encode(owner.private_key.secret_bytes()),
        address: p2pkh_address(&secp, &owner, network),
        key_id,
        apps_node_key: apps_node.to_string(),
        salt,
    })
}

/// Derive public keychains, the first bitcoin address and `count` identity keypairs
pub fn blockchain_identities(
    master: &Xpriv,
    count: u32,
    network: NetworkType,
) -> Result<BlockchainIdentities, KeyError> {
    let secp = Secp256k1::new();

    let identity_keychain = derive_path(&secp, master, IDENTITY_KEYCHAIN_PATH)?;
    let bitcoin_keychain = derive_path(&secp, master, BITCOIN_KEYCHAIN_PATH)?;

    let first_address_node = derive_path(&secp, &bitcoin_keychain, "m/0/0")?;

    let mut identity_addresses = Vec::with_capacity(count as usize);
    let mut identity_keypairs = Vec::with_capacity(count as usize);
    for index in 0..count {
        let keypair = derive_identity_keypair(&identity_keychain, index, network)?;
        identity_addresses.push(keypair.address.clone());
        identity_keypairs.push(keypair);
    }

    Ok(BlockchainIdentities {
        identity_public_keychain: Xpub::from_priv(&secp, &identity_keychain).to_string(),
        bitcoin_public_keychain: Xpub::from_priv(&secp, &bitcoin_keychain).to_string(),
        first_bitcoin_address: p2pkh_address(&secp, &first_address_node, network),
        identity_addresses,
        identity_keypairs,
    })
}
