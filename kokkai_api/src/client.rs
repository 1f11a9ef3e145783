//! HTTP client for the Diet record search API.

use std::time::Duration;

use reqwest::header::USER_AGENT;
use reqwest::StatusCode;
use serde_json::Value;
use url::Url;

use crate::{
    errors::{body_details, MAX_DETAIL_CHARS},
    query::{param_to_string, WireParams},
    types::NUMBER_OF_RECORDS,
    user_agent::default_user_agent,
    Endpoint, Error,
};

/// Production base URL of the search API.
pub const DEFAULT_BASE_URL: &str = "https://kokkai.ndl.go.jp/api";

/// Request timeout used unless the caller picks another.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// HTTP client for the search API.
///
/// Holds one `reqwest::Client`, so every request made through the same
/// instance shares its connection pool. Each call to [`Client::fetch`] is a
/// single GET; paging and caching live in the layer above.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    /// Base URL for the API, without a trailing slash.
    base_api_url: String,
    user_agent: String,
    timeout: Duration,
}

impl Client {
    /// Creates a new client pointing at the production API.
    pub fn new() -> Result<Self, Error> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Result<Self, Error> {
        Self::with_options(base_url, &default_user_agent(), DEFAULT_TIMEOUT)
    }

    /// Creates a new client with every transport setting spelled out.
    pub fn with_options(base_url: &str, user_agent: &str, timeout: Duration) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::Request(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self::with_http_client(base_url, user_agent, timeout, http))
    }

    /// Wraps a caller-supplied `reqwest::Client` so its connection pool is reused.
    /// The user agent and timeout are applied to every request.
    pub fn with_http_client(
        base_url: &str,
        user_agent: &str,
        timeout: Duration,
        http: reqwest::Client,
    ) -> Self {
        Self {
            http,
            base_api_url: base_url.trim_end_matches('/').to_string(),
            user_agent: user_agent.to_string(),
            timeout,
        }
    }

    /// The base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_api_url
    }

    /// Full URL of `endpoint` on this client's base URL.
    pub fn endpoint_url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_api_url, endpoint.path())
    }

    fn get_url(&self, endpoint_url: &str, params: &WireParams) -> Result<Url, Error> {
        let mut url = Url::parse(endpoint_url)
            .map_err(|e| Error::Request(format!("Invalid URL '{}': {}", endpoint_url, e)))?;
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params {
                pairs.append_pair(key, &param_to_string(value));
            }
        }
        Ok(url)
    }

    /// Performs one GET of `endpoint_url` with `params` as the query string
    /// and returns the decoded JSON body as-is.
    ///
    /// Failures are classified in this order: transport failure
    /// ([`Error::Request`]), HTTP 429 ([`Error::RateLimited`]), any other
    /// non-success status ([`Error::Api`]), undecodable body
    /// ([`Error::Parse`]), and finally an error payload (a `message` without
    /// a record count) in an otherwise successful response ([`Error::Api`]).
    pub async fn fetch(&self, endpoint_url: &str, params: &WireParams) -> Result<Value, Error> {
        let url = self.get_url(endpoint_url, params)?;
        tracing::debug!("GET {}", url);

        let resp = self
            .http
            .get(url)
            .header(USER_AGENT, self.user_agent.as_str())
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| Error::Request(format!("Request failed: {}", e)))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            if status == StatusCode::TOO_MANY_REQUESTS {
                return Err(Error::RateLimited {
                    message: format!("HTTP 429 (rate limit exceeded) for {}", endpoint_url),
                    details: body_details(&body),
                });
            }
            return Err(Error::Api {
                message: format!("HTTP {} for {}", status.as_u16(), endpoint_url),
                details: body_details(&body),
            });
        }

        let body = resp
            .text()
            .await
            .map_err(|e| Error::Request(format!("Failed to read response body: {}", e)))?;
        let data: Value = serde_json::from_str(&body)
            .map_err(|e| Error::Parse(format!("Failed to parse JSON response: {}", e)))?;

        if let Some(err) = error_payload(&data) {
            return Err(err);
        }
        Ok(data)
    }
}

/// Some deployments report failures with a 200 status and a body of the form
/// `{"message": ..., "details": [...]}`. Such a body has no record count.
fn error_payload(data: &Value) -> Option<Error> {
    let obj = data.as_object()?;
    if obj.contains_key(NUMBER_OF_RECORDS) {
        return None;
    }
    let message = match obj.get("message")? {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    let details = obj
        .get("details")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .map(|item| param_to_string(item).chars().take(MAX_DETAIL_CHARS).collect())
                .collect()
        })
        .unwrap_or_default();
    Some(Error::Api { message, details })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn error_payload_requires_missing_count() {
        let ok = json!({"numberOfRecords": 0, "message": "no hits"});
        assert!(error_payload(&ok).is_none());

        let err = error_payload(&json!({
            "message": "検索条件を指定してください。",
            "details": ["any is empty"]
        }))
        .unwrap();
        assert_eq!(err.details(), ["any is empty".to_string()]);
        assert!(err.is_api_error());
    }

    #[test]
    fn endpoint_url_trims_trailing_slash() {
        let client = Client::with_base_url("https://example.com/api/").unwrap();
        assert_eq!(
            client.endpoint_url(Endpoint::Speech),
            "https://example.com/api/speech"
        );
    }
}
