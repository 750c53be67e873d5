//! Search action tests

use httpmock::prelude::*;
use identity_wallet::profiles::{search_identities, update_query, update_results, SearchAction};
use serde_json::json;

use crate::common::{full_client, init_logging, mock_api};

#[test]
fn test_update_query_returns_update_query_action() {
    assert_eq!(
        serde_json::to_value(update_query("blockstack")).expect("Failed to serialize"),
        json!({ "type": "UPDATE_QUERY", "query": "blockstack" })
    );
}

#[test]
fn test_update_results_returns_update_results_action() {
    let names = ["aaron", "guy", "jude", "larry", "patrick", "ryan", "muneeb"];
    let action = update_results("blockstack", names.iter().map(|n| json!(n)).collect());

    assert_eq!(
        serde_json::to_value(action).expect("Failed to serialize"),
        json!({
            "type": "UPDATE_RESULTS",
            "query": "blockstack",
            "results": ["aaron", "guy", "jude", "larry", "patrick", "ryan", "muneeb"]
        })
    );
}

#[tokio::test]
async fn test_search_identities_uses_search_endpoint() {
    init_logging();
    let server = MockServer::start_async().await;
    let search_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v1/search")
                .query_param("query", "muneeb ali");
            then.status(200).json_body(json!({
                "results": [{ "fullyQualifiedName": "muneeb.id", "username": "muneeb" }]
            }));
        })
        .await;

    let api = mock_api(&server);
    let client = full_client(&server);
    let mut actions = Vec::new();

    search_identities(&mut actions, &client, &api, "muneeb ali").await;

    search_mock.assert_async().await;
    assert_eq!(
        actions,
        vec![
            update_query("muneeb ali"),
            update_results(
                "muneeb ali",
                vec![json!({ "fullyQualifiedName": "muneeb.id", "username": "muneeb" })]
            ),
        ]
    );
}

#[tokio::test]
async fn test_search_identities_looks_up_full_names() {
    init_logging();
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/names/satoshi.id");
            then.status(200)
                .json_body(json!({ "profile": { "name": "Satoshi" }, "status": "registered" }));
        })
        .await;

    let api = mock_api(&server);
    let client = full_client(&server);
    let mut actions = Vec::new();

    search_identities(&mut actions, &client, &api, "satoshi.id").await;

    assert_eq!(
        actions,
        vec![
            update_query("satoshi.id"),
            update_results(
                "satoshi.id",
                vec![json!({
                    "fullyQualifiedName": "satoshi.id",
                    "username": "satoshi.id",
                    "profile": { "name": "Satoshi" }
                })]
            ),
        ]
    );
}

#[tokio::test]
async fn test_search_failure_only_updates_query() {
    init_logging();
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/search");
            then.status(503);
        })
        .await;

    let api = mock_api(&server);
    let client = full_client(&server);
    let mut actions: Vec<SearchAction> = Vec::new();

    search_identities(&mut actions, &client, &api, "nobody").await;

    assert_eq!(actions, vec![update_query("nobody")]);
}

#[tokio::test]
async fn test_search_keeps_reserved_characters_in_query() {
    init_logging();
    let server = MockServer::start_async().await;
    let search_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v1/search")
                .query_param("query", "ali&bob");
            then.status(200).json_body(json!({ "results": [] }));
        })
        .await;

    let api = mock_api(&server);
    let client = full_client(&server);
    let mut actions = Vec::new();

    search_identities(&mut actions, &client, &api, "ali&bob").await;

    search_mock.assert_async().await;
    assert_eq!(
        actions,
        vec![update_query("ali&bob"), update_results("ali&bob", vec![])]
    );
}
