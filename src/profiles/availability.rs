//! Name availability and registration price lookup

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::config::ApiSettings;
use crate::dispatch::Dispatch;
use crate::http::{fill_template, ApiClient, HttpError};

/// State transitions of the availability store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum AvailabilityAction {
    CheckingNameAvailability { domain_name: String },
    NameAvailable { domain_name: String },
    NameUnavailable { domain_name: String },
    NameAvailabilityError { domain_name: String, error: String },
    CheckingNamePrice { domain_name: String },
    NamePrice { domain_name: String, price: f64 },
    NamePriceError { domain_name: String, error: String },
}

#[derive(Debug, Deserialize)]
struct PriceResponse {
    total_estimated_cost: EstimatedCost,
}

#[derive(Debug, Deserialize)]
struct EstimatedCost {
    btc: f64,
}

enum Availability {
    Available,
    Unavailable,
}

/// Whether `domain_name` is registered under another name
///
/// `satoshi.id` is a name in the `id` namespace; `satoshi.foo.id` is a
/// subdomain of `foo.id`.
pub fn is_subdomain(domain_name: &str) -> bool {
    // fully qualified form
    let name = domain_name.strip_suffix('.').unwrap_or(domain_name);
    name.split('.').count() > 2
}

async fn lookup_availability(client: &ApiClient, url: &str) -> Result<Availability, HttpError> {
    let response = client.get(url, None).await?;
    match response.status {
        StatusCode::NOT_FOUND => Ok(Availability::Available),
        StatusCode::OK => Ok(Availability::Unavailable),
        status => Err(HttpError::Status {
            status: status.as_u16(),
            body: response.body,
        }),
    }
}

async fn lookup_price(client: &ApiClient, url: &str) -> Result<f64, HttpError> {
    let response: PriceResponse = client.get_json(url, None).await?;
    Ok(response.total_estimated_cost.btc)
}

/// Check whether `domain_name` is taken and, if not, what it costs
///
/// Dispatches `CheckingNameAvailability` then one of `NameAvailable`,
/// `NameUnavailable` or `NameAvailabilityError`. Only an available name
/// goes on to `CheckingNamePrice` and `NamePrice` / `NamePriceError`.
/// Subdomains are free and never hit the price endpoint.
///
/// # Example
///
/// ```ignore
/// let mut actions = Vec::new();
/// check_name_availability_and_price(&mut actions, &client, &config.api, "satoshi.id").await;
/// ```
pub async fn check_name_availability_and_price<D: Dispatch<AvailabilityAction>>(
    dispatch: &mut D,
    client: &ApiClient,
    api: &ApiSettings,
    domain_name: &str,
) {
    let domain = || domain_name.to_string();

    dispatch.dispatch(AvailabilityAction::CheckingNameAvailability {
        domain_name: domain(),
    });

    let lookup_url = fill_template(&api.name_lookup_url, "name", domain_name);
    match lookup_availability(client, &lookup_url).await {
        Ok(Availability::Available) => {
            dispatch.dispatch(AvailabilityAction::NameAvailable {
                domain_name: domain(),
            });
        }
        Ok(Availability::Unavailable) => {
            dispatch.dispatch(AvailabilityAction::NameUnavailable {
                domain_name: domain(),
            });
            return;
        }
        Err(e) => {
            log::error!("checkNameAvailability: {}: {}", domain_name, e);
            dispatch.dispatch(AvailabilityAction::NameAvailabilityError {
                domain_name: domain(),
                error: e.to_string(),
            });
            return;
        }
    }

    dispatch.dispatch(AvailabilityAction::CheckingNamePrice {
        domain_name: domain(),
    });

    if is_subdomain(domain_name) {
        log::debug!("checkNamePrice: {} is a subdomain, price is 0", domain_name);
        dispatch.dispatch(AvailabilityAction::NamePrice {
            domain_name: domain(),
            price: 0.0,
        });
        return;
    }

    let price_url = fill_template(&api.price_check_url, "name", domain_name);
    match lookup_price(client, &price_url).await {
        Ok(price) => dispatch.dispatch(AvailabilityAction::NamePrice {
            domain_name: domain(),
            price,
        }),
        Err(e) => {
            log::error!("checkNamePrice: {}: {}", domain_name, e);
            dispatch.dispatch(AvailabilityAction::NamePriceError {
                domain_name: domain(),
                error: e.to_string(),
            });
        }
    }
}
