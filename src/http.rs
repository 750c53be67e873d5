//! HTTP access to the registry, insight and core wallet APIs

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::{ApiSettings, DeploymentMode};

/// Errors that can occur while talking to a remote API
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response body: {0}")]
    InvalidBody(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Status code and body text of a completed request
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

impl RawResponse {
    /// Parse the body as JSON regardless of status
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, HttpError> {
        serde_json::from_str(&self.body).map_err(|e| HttpError::InvalidBody(e.to_string()))
    }

    /// Fail on any non-2xx status
    pub fn error_for_status(self) -> Result<Self, HttpError> {
        if self.status.is_success() {
            Ok(self)
        } else {
            Err(HttpError::Status {
                status: self.status.as_u16(),
                body: self.body,
            })
        }
    }
}

/// `Authorization` header value for the core API
pub fn authorization_header_value(core_api_password: &str) -> String {
    format!("bearer {}", core_api_password)
}

/// Substitute `{placeholder}` with `value` in a URL template
pub fn fill_template(template: &str, placeholder: &str, value: &str) -> String {
    template.replace(&format!("{{{}}}", placeholder), value)
}

/// Substitute `{placeholder}` in the query string of `template` with `value`
///
/// The value is form-encoded, so reserved characters such as `&`, `#` and
/// `=` stay inside the parameter.
pub fn fill_query_template(
    template: &str,
    placeholder: &str,
    value: &str,
) -> Result<String, HttpError> {
    let mut url =
        reqwest::Url::parse(template).map_err(|e| HttpError::InvalidUrl(format!("{}: {}", template, e)))?;
    let marker = format!("{{{}}}", placeholder);

    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(key, current)| (key.into_owned(), current.replace(&marker, value)))
        .collect();
    url.query_pairs_mut().clear().extend_pairs(pairs);

    Ok(url.to_string())
}

/// Insight address base for `address`
///
/// Templates without an `{address}` placeholder get the address appended as
/// a path segment.
pub fn insight_url(template: &str, address: &str, core_api_password: &str) -> String {
    let url = if template.contains("{address}") {
        fill_template(template, "address", address)
    } else {
        format!("{}/{}", template.trim_end_matches('/'), address)
    };
    fill_template(&url, "coreAPIPassword", core_api_password)
}

/// Append a path segment to `url`, keeping any query string at the end
pub fn append_path(url: &str, segment: &str) -> String {
    match url.split_once('?') {
        Some((path, query)) => format!("{}/{}?{}", path.trim_end_matches('/'), segment, query),
        None => format!("{}/{}", url.trim_end_matches('/'), segment),
    }
}

/// Thin wrapper around a shared `reqwest::Client`
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    deployment: DeploymentMode,
    core_api_url: String,
}

impl ApiClient {
    /// Create a client for the given deployment
    pub fn new(deployment: DeploymentMode, core_api_url: &str) -> Result<Self, HttpError> {
        let client = reqwest::Client::builder().build()?;

        Ok(Self {
            client,
            deployment,
            core_api_url: core_api_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a client from configured API settings
    pub fn from_settings(settings: &ApiSettings) -> Result<Self, HttpError> {
        Self::new(settings.deployment, &settings.core_api_url)
    }

    /// Whether `url` targets the core API in a deployment that has none
    pub fn is_core_endpoint_disabled(&self, url: &str) -> bool {
        if self.deployment != DeploymentMode::Webapp {
            return false;
        }
        match url.strip_prefix(self.core_api_url.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/') || rest.starts_with('?'),
            None => false,
        }
    }

    /// GET `url`, returning status and body for any status
    pub async fn get(&self, url: &str, auth: Option<&str>) -> Result<RawResponse, HttpError> {
        let mut request = self.client.get(url);
        if let Some(password) = auth {
            request = request.header(AUTHORIZATION, authorization_header_value(password));
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        log::trace!("GET {} -> {}", url, status);

        Ok(RawResponse { status, body })
    }

    /// GET `url` and parse a 2xx JSON body
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        auth: Option<&str>,
    ) -> Result<T, HttpError> {
        self.get(url, auth).await?.error_for_status()?.json()
    }

    /// GET `url` and return a 2xx body as text
    pub async fn get_text(&self, url: &str) -> Result<String, HttpError> {
        Ok(self.get(url, None).await?.error_for_status()?.body)
    }

    /// POST a JSON body, returning status and body for any status
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
        auth: Option<&str>,
    ) -> Result<RawResponse, HttpError> {
        let mut request = self
            .client
            .post(url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .json(body);
        if let Some(password) = auth {
            request = request.header(AUTHORIZATION, authorization_header_value(password));
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        log::trace!("POST {} -> {}", url, status);

        Ok(RawResponse { status, body })
    }
}
