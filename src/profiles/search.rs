//! Profile search

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::ApiSettings;
use crate::dispatch::Dispatch;
use crate::http::{fill_query_template, fill_template, ApiClient, HttpError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SearchAction {
    UpdateQuery { query: String },
    UpdateResults { query: String, results: Vec<Value> },
}

pub fn update_query(query: impl Into<String>) -> SearchAction {
    SearchAction::UpdateQuery {
        query: query.into(),
    }
}

pub fn update_results(query: impl Into<String>, results: Vec<Value>) -> SearchAction {
    SearchAction::UpdateResults {
        query: query.into(),
        results,
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    profile: Value,
}

async fn lookup_name(client: &ApiClient, lookup_url: &str, name: &str) -> Result<Vec<Value>, HttpError> {
    let url = fill_template(lookup_url, "name", name);
    let response: LookupResponse = client.get_json(&url, None).await?;

    Ok(vec![json!({
        "fullyQualifiedName": name,
        "username": name,
        "profile": response.profile,
    })])
}

async fn search(client: &ApiClient, search_url: &str, query: &str) -> Result<Vec<Value>, HttpError> {
    let url = fill_query_template(search_url, "query", query)?;
    let response: SearchResponse = client.get_json(&url, None).await?;
    Ok(response.results)
}

/// Search profiles for `query`
///
/// A query containing a dot is looked up as a fully qualified name;
/// anything else goes through the search endpoint. Dispatches
/// `UpdateQuery` and, on success, `UpdateResults`. Failures are logged.
pub async fn search_identities<D: Dispatch<SearchAction>>(
    dispatch: &mut D,
    client: &ApiClient,
    api: &ApiSettings,
    query: &str,
) {
    dispatch.dispatch(update_query(query));

    let outcome = if query.contains('.') {
        lookup_name(client, &api.name_lookup_url, query).await
    } else {
        search(client, &api.search_url, query).await
    };

    match outcome {
        Ok(results) => {
            log::debug!("searchIdentities: {} results for {:?}", results.len(), query);
            dispatch.dispatch(update_results(query, results));
        }
        Err(e) => log::error!("searchIdentities: {}", e),
    }
}
