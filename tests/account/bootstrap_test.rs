//! Account bootstrap tests

use identity_wallet::account::{initialize_wallet, AccountAction};
use identity_wallet::config::NetworkType;
use identity_wallet::keys::{decrypt_backup_phrase, validate_mnemonic};

use crate::common::{init_logging, TEST_PHRASE};

const PASSWORD: &str = "correct horse battery staple";

fn created(actions: &[AccountAction]) -> &AccountAction {
    assert_eq!(actions.len(), 1, "Expected a single CreateAccount, got {:?}", actions);
    &actions[0]
}

#[tokio::test]
async fn test_valid_backup_phrase_is_preserved() {
    init_logging();
    let mut actions = Vec::new();

    initialize_wallet(
        &mut actions,
        PASSWORD,
        Some(TEST_PHRASE),
        1,
        NetworkType::Mainnet,
    )
    .await
    .expect("Failed to initialize wallet");

    match created(&actions) {
        AccountAction::CreateAccount {
            encrypted_backup_phrase,
            first_bitcoin_address,
            identity_public_keychain,
            bitcoin_public_keychain,
            ..
        } => {
            let phrase = decrypt_backup_phrase(encrypted_backup_phrase, PASSWORD)
                .expect("Failed to decrypt backup phrase");
            assert_eq!(phrase, TEST_PHRASE);

            // BIP44 m/44'/0'/0'/0/0 of the test phrase
            assert_eq!(first_bitcoin_address, "1LqBGSKuX5yYUonjxT5qGfpUsXKYYWeabA");
            assert!(identity_public_keychain.starts_with("xpub"));
            assert!(bitcoin_public_keychain.starts_with("xpub"));
        }
        other => panic!("Expected CreateAccount, got {:?}", other),
    }
}

#[tokio::test]
async fn test_invalid_backup_phrase_is_replaced() {
    init_logging();
    let invalid = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon";
    let mut actions = Vec::new();

    initialize_wallet(&mut actions, PASSWORD, Some(invalid), 1, NetworkType::Mainnet)
        .await
        .expect("Failed to initialize wallet");

    match created(&actions) {
        AccountAction::CreateAccount {
            encrypted_backup_phrase,
            ..
        } => {
            let phrase = decrypt_backup_phrase(encrypted_backup_phrase, PASSWORD)
                .expect("Failed to decrypt backup phrase");
            assert_ne!(phrase, invalid);
            assert_eq!(phrase.split_whitespace().count(), 12);
            assert!(validate_mnemonic(&phrase).is_some(), "Replacement must be valid BIP39");
        }
        other => panic!("Expected CreateAccount, got {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_backup_phrase_generates_one() {
    let mut actions = Vec::new();

    initialize_wallet(&mut actions, PASSWORD, None, 1, NetworkType::Regtest)
        .await
        .expect("Failed to initialize wallet");

    match created(&actions) {
        AccountAction::CreateAccount {
            encrypted_backup_phrase,
            first_bitcoin_address,
            identity_public_keychain,
            ..
        } => {
            let phrase = decrypt_backup_phrase(encrypted_backup_phrase, PASSWORD)
                .expect("Failed to decrypt backup phrase");
            assert!(validate_mnemonic(&phrase).is_some());
            // Regtest P2PKH addresses start with m or n
            assert!(first_bitcoin_address.starts_with('m') || first_bitcoin_address.starts_with('n'));
            assert!(identity_public_keychain.starts_with("tpub"));
        }
        other => panic!("Expected CreateAccount, got {:?}", other),
    }
}

#[tokio::test]
async fn test_identity_keypair_count_matches_request() {
    let mut actions = Vec::new();

    initialize_wallet(
        &mut actions,
        PASSWORD,
        Some(TEST_PHRASE),
        3,
        NetworkType::Mainnet,
    )
    .await
    .expect("Failed to initialize wallet");

    match created(&actions) {
        AccountAction::CreateAccount {
            identity_addresses,
            identity_keypairs,
            ..
        } => {
            assert_eq!(identity_keypairs.len(), 3);
            assert_eq!(identity_addresses.len(), 3);
            for (keypair, address) in identity_keypairs.iter().zip(identity_addresses) {
                assert_eq!(&keypair.address, address);
                assert_eq!(keypair.key_id.len(), 66, "Compressed public key hex");
                assert_eq!(keypair.salt.len(), 64, "sha256 hex");
            }
            let distinct: std::collections::HashSet<_> = identity_addresses.iter().collect();
            assert_eq!(distinct.len(), 3, "Identity addresses must be distinct");
        }
        other => panic!("Expected CreateAccount, got {:?}", other),
    }
}

#[tokio::test]
async fn test_create_account_wire_shape() {
    let mut actions = Vec::new();

    initialize_wallet(
        &mut actions,
        PASSWORD,
        Some(TEST_PHRASE),
        1,
        NetworkType::Mainnet,
    )
    .await
    .expect("Failed to initialize wallet");

    let value = serde_json::to_value(created(&actions)).expect("Failed to serialize action");
    assert_eq!(value["type"], "CREATE_ACCOUNT");
    assert_eq!(
        value["firstBitcoinAddress"],
        "1LqBGSKuX5yYUonjxT5qGfpUsXKYYWeabA"
    );
    let keypair = &value["identityKeypairs"][0];
    for field in ["key", "keyID", "address", "appsNodeKey", "salt"] {
        assert!(keypair.get(field).is_some(), "Missing keypair field {}", field);
    }
}
