//! Mailing list opt-in tests

use httpmock::prelude::*;
use identity_wallet::account::actions::prompted_for_email;
use identity_wallet::account::email_notifications;
use serde_json::json;

use crate::common::{full_client, init_logging};

#[tokio::test]
async fn test_email_notifications_posts_opt_in() {
    init_logging();
    let server = MockServer::start_async().await;
    let emailer = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/notifications")
                .query_param("mailingListOptIn", "true")
                .json_body(json!({ "email": "satoshi@example.com" }));
            then.status(200);
        })
        .await;

    let client = full_client(&server);
    let mut actions = Vec::new();

    email_notifications(
        &mut actions,
        &client,
        &server.url("/notifications"),
        "satoshi@example.com",
        true,
    )
    .await;

    emailer.assert_async().await;
    assert_eq!(
        actions,
        vec![prompted_for_email(Some("satoshi@example.com".to_string()))]
    );
}

#[tokio::test]
async fn test_email_notifications_failure_is_only_logged() {
    init_logging();
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/notifications")
                .query_param("mailingListOptIn", "false");
            then.status(500);
        })
        .await;

    let client = full_client(&server);
    let mut actions = Vec::new();

    email_notifications(
        &mut actions,
        &client,
        &server.url("/notifications"),
        "satoshi@example.com",
        false,
    )
    .await;

    assert_eq!(
        actions,
        vec![prompted_for_email(Some("satoshi@example.com".to_string()))]
    );
}
