//! Mailing list opt-in

use serde_json::json;

use super::actions::{prompted_for_email, AccountAction};
use crate::dispatch::Dispatch;
use crate::http::ApiClient;

/// Record the email prompt and register `email` with the notification service
///
/// `PromptedForEmail` is dispatched before the request; the outcome of the
/// request is only logged.
pub async fn email_notifications<D: Dispatch<AccountAction>>(
    dispatch: &mut D,
    client: &ApiClient,
    email_notifications_url: &str,
    email: &str,
    opt_in: bool,
) {
    dispatch.dispatch(prompted_for_email(Some(email.to_string())));

    let url = format!("{}?mailingListOptIn={}", email_notifications_url, opt_in);
    let body = json!({ "email": email });

    match client.post_json(&url, &body, None).await {
        Ok(response) if response.status.is_success() => {
            log::debug!("emailNotifications: registered {}", email);
        }
        Ok(response) => {
            log::error!(
                "emailNotifications: registration failed with status {}: {}",
                response.status,
                response.body
            );
        }
        Err(e) => log::error!("emailNotifications: {}", e),
    }
}
