//! Name availability and price lookup tests

use httpmock::prelude::*;
use identity_wallet::config::{ApiSettings, DeploymentMode};
use identity_wallet::http::ApiClient;
use identity_wallet::profiles::{check_name_availability_and_price, AvailabilityAction};
use serde_json::json;

use crate::common::{full_client, init_logging, mock_api};

fn checking_availability(name: &str) -> AvailabilityAction {
    AvailabilityAction::CheckingNameAvailability {
        domain_name: name.to_string(),
    }
}

fn available(name: &str) -> AvailabilityAction {
    AvailabilityAction::NameAvailable {
        domain_name: name.to_string(),
    }
}

fn checking_price(name: &str) -> AvailabilityAction {
    AvailabilityAction::CheckingNamePrice {
        domain_name: name.to_string(),
    }
}

fn price_response() -> serde_json::Value {
    json!({
        "name_price": { "satoshis": 1_600_000, "btc": 0.016 },
        "total_tx_fees": 518_707,
        "register_tx_fee": { "satoshis": 158_739, "btc": 0.00158739 },
        "preorder_tx_fee": { "satoshis": 163_648, "btc": 0.00163648 },
        "warnings": [],
        "total_estimated_cost": { "satoshis": 2_118_707, "btc": 0.02118707 },
        "update_tx_fee": { "satoshis": 196_320, "btc": 0.0019632 }
    })
}

async fn run(server: &MockServer, name: &str) -> Vec<AvailabilityAction> {
    let api = mock_api(server);
    let client = full_client(server);
    let mut actions = Vec::new();

    check_name_availability_and_price(&mut actions, &client, &api, name).await;

    actions
}

#[tokio::test]
async fn test_available_name_with_price() {
    init_logging();
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/names/satoshi.id");
            then.status(404).json_body(json!({}));
        })
        .await;
    let price_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v1/prices/names/satoshi.id")
                .query_param("single_sig", "1");
            then.status(200).json_body(price_response());
        })
        .await;

    let actions = run(&server, "satoshi.id").await;

    price_mock.assert_async().await;
    assert_eq!(
        actions,
        vec![
            checking_availability("satoshi.id"),
            available("satoshi.id"),
            checking_price("satoshi.id"),
            AvailabilityAction::NamePrice {
                domain_name: "satoshi.id".to_string(),
                price: 0.02118707,
            },
        ]
    );
}

#[tokio::test]
async fn test_available_subdomain_is_free() {
    init_logging();
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/names/satoshi.foo.id");
            then.status(404).json_body(json!({}));
        })
        .await;
    let price_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/prices/names/satoshi.foo.id");
            then.status(200).json_body(price_response());
        })
        .await;

    let actions = run(&server, "satoshi.foo.id").await;

    assert_eq!(
        actions,
        vec![
            checking_availability("satoshi.foo.id"),
            available("satoshi.foo.id"),
            checking_price("satoshi.foo.id"),
            AvailabilityAction::NamePrice {
                domain_name: "satoshi.foo.id".to_string(),
                price: 0.0,
            },
        ]
    );
    assert_eq!(price_mock.hits_async().await, 0, "Subdomains must not be priced");
}

#[tokio::test]
async fn test_registered_name_is_unavailable() {
    init_logging();
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/names/satoshi.id");
            then.status(200).json_body(json!({}));
        })
        .await;
    let price_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/prices/names/satoshi.id");
            then.status(200).json_body(price_response());
        })
        .await;

    let actions = run(&server, "satoshi.id").await;

    assert_eq!(
        actions,
        vec![
            checking_availability("satoshi.id"),
            AvailabilityAction::NameUnavailable {
                domain_name: "satoshi.id".to_string(),
            },
        ]
    );
    assert_eq!(price_mock.hits_async().await, 0);
}

#[tokio::test]
async fn test_price_lookup_failure() {
    init_logging();
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/names/satoshi.id");
            then.status(404).json_body(json!({}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/prices/names/satoshi.id");
            then.status(500).body("UTXO provider unavailable");
        })
        .await;

    let actions = run(&server, "satoshi.id").await;

    assert_eq!(actions.len(), 4);
    assert_eq!(
        actions[..3],
        [
            checking_availability("satoshi.id"),
            available("satoshi.id"),
            checking_price("satoshi.id"),
        ]
    );
    match &actions[3] {
        AvailabilityAction::NamePriceError { domain_name, error } => {
            assert_eq!(domain_name, "satoshi.id");
            assert!(!error.is_empty(), "Error text must be populated");
        }
        other => panic!("Expected NamePriceError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_availability_lookup_failure() {
    init_logging();
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/names/satoshi.id");
            then.status(500).body("registry unavailable");
        })
        .await;

    let actions = run(&server, "satoshi.id").await;

    assert_eq!(actions.len(), 2);
    assert_eq!(actions[0], checking_availability("satoshi.id"));
    match &actions[1] {
        AvailabilityAction::NameAvailabilityError { domain_name, error } => {
            assert_eq!(domain_name, "satoshi.id");
            assert!(error.contains("500"), "Unexpected error text: {}", error);
        }
        other => panic!("Expected NameAvailabilityError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_registry_dispatches_availability_error() {
    init_logging();
    // nothing listens on port 1
    let api = ApiSettings::with_bases("http://127.0.0.1:1", "http://127.0.0.1:1");
    let client = ApiClient::new(DeploymentMode::Full, "http://127.0.0.1:1")
        .expect("Failed to create client");
    let mut actions = Vec::new();

    check_name_availability_and_price(&mut actions, &client, &api, "satoshi.id").await;

    assert_eq!(actions.len(), 2);
    assert_eq!(actions[0], checking_availability("satoshi.id"));
    assert!(matches!(
        &actions[1],
        AvailabilityAction::NameAvailabilityError { domain_name, error }
            if domain_name == "satoshi.id" && !error.is_empty()
    ));
}
