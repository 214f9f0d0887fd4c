//! Registrar API client.
//!
//! Talks to a Vercel-style registrar:
//!
//! ```text
//! GET  {base}/v1/registrar/tlds/supported?teamId=...
//! POST {base}/v1/registrar/domains/availability?teamId=...   { "domains": [...] }
//! ```
//!
//! Payloads are accepted either as a top-level array or as an object that
//! holds the array under one of a few well-known keys.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use domain_search_core::{AvailabilityResult, normalize_tld};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;
use url::Url;

use crate::config::{RegistrarConfig, bearer};

use super::{AvailabilityProvider, ProviderError};

const SUPPORTED_TLDS_PATH: &str = "/v1/registrar/tlds/supported";
const AVAILABILITY_PATH: &str = "/v1/registrar/domains/availability";

/// Keys that may wrap the TLD list.
const TLD_LIST_KEYS: &[&str] = &["tlds", "results", "data"];
/// Keys that may wrap the availability list.
const AVAILABILITY_LIST_KEYS: &[&str] = &["results", "domains", "data"];

/// Longest body excerpt kept in errors and logs.
const BODY_EXCERPT: usize = 500;

/// Client for the registrar API.
#[derive(Clone)]
pub struct RegistrarClient {
    inner: Arc<RegistrarClientInner>,
}

struct RegistrarClientInner {
    client: reqwest::Client,
    base_url: String,
    default_team_id: Option<String>,
}

#[derive(Debug, Serialize)]
struct AvailabilityRequest<'a> {
    domains: &'a [String],
}

impl RegistrarClient {
    /// Create a new registrar client.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is not a valid header value or the HTTP
    /// client cannot be built.
    pub fn new(config: &RegistrarConfig) -> Result<Self, ProviderError> {
        let mut auth = HeaderValue::from_str(&bearer(&config.token))
            .map_err(|_| ProviderError::Config("token is not a valid header value".to_string()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(RegistrarClientInner {
                client,
                base_url: config.base_url.clone(),
                default_team_id: config.default_team_id.clone(),
            }),
        })
    }

    /// Build an endpoint URL, adding the effective team.
    fn endpoint(&self, path: &str, team_id: Option<&str>) -> Result<Url, ProviderError> {
        let mut url = Url::parse(&format!("{}{path}", self.inner.base_url))
            .map_err(|e| ProviderError::Config(format!("invalid registrar URL: {e}")))?;

        if let Some(team) = team_id.or(self.inner.default_team_id.as_deref()) {
            url.query_pairs_mut().append_pair("teamId", team);
        }

        Ok(url)
    }

    /// Read a response, mapping failures to `ProviderError`.
    async fn read_json(response: reqwest::Response) -> Result<Value, ProviderError> {
        let status = response.status();

        // Check for rate limiting
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(ProviderError::RateLimited(retry_after));
        }

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;
        let excerpt: String = body.chars().take(BODY_EXCERPT).collect();

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %excerpt,
                "Registrar API returned non-success status"
            );
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body: excerpt,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %excerpt,
                "Failed to parse registrar response"
            );
            ProviderError::Malformed(e.to_string())
        })
    }
}

#[async_trait]
impl AvailabilityProvider for RegistrarClient {
    #[instrument(skip(self))]
    async fn supported_tlds(&self, team_id: Option<&str>) -> Result<Vec<String>, ProviderError> {
        let url = self.endpoint(SUPPORTED_TLDS_PATH, team_id)?;
        let response = self.inner.client.get(url).send().await?;
        let payload = Self::read_json(response).await?;

        let tlds = parse_supported_tlds(payload)?;
        tracing::debug!(count = tlds.len(), "Fetched supported TLDs");
        Ok(tlds)
    }

    #[instrument(skip(self, domains), fields(count = domains.len()))]
    async fn bulk_availability(
        &self,
        team_id: Option<&str>,
        domains: &[String],
    ) -> Result<Vec<AvailabilityResult>, ProviderError> {
        let url = self.endpoint(AVAILABILITY_PATH, team_id)?;
        let response = self
            .inner
            .client
            .post(url)
            .json(&AvailabilityRequest { domains })
            .send()
            .await?;
        let payload = Self::read_json(response).await?;

        parse_availability(payload)
    }
}

/// Pull the list out of a payload that is either an array or an object
/// holding the array under one of `keys`.
fn extract_list(payload: Value, keys: &[&str]) -> Option<Vec<Value>> {
    match payload {
        Value::Array(items) => Some(items),
        Value::Object(mut map) => keys.iter().find_map(|key| match map.remove(*key) {
            Some(Value::Array(items)) => Some(items),
            _ => None,
        }),
        _ => None,
    }
}

/// Parse the supported-TLD payload into normalized, deduplicated TLDs in
/// provider order.
///
/// Entries may be strings or objects carrying `tld` or `name`.
fn parse_supported_tlds(payload: Value) -> Result<Vec<String>, ProviderError> {
    let items = extract_list(payload, TLD_LIST_KEYS)
        .ok_or_else(|| ProviderError::Malformed("expected a list of TLDs".to_string()))?;

    let mut seen = HashSet::new();
    let tlds = items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s.as_str()),
            Value::Object(map) => ["tld", "name"]
                .iter()
                .find_map(|key| map.get(*key).and_then(Value::as_str)),
            _ => None,
        })
        .filter_map(normalize_tld)
        .filter(|tld| seen.insert(tld.clone()))
        .collect();

    Ok(tlds)
}

/// Parse the availability payload without reinterpreting its entries.
fn parse_availability(payload: Value) -> Result<Vec<AvailabilityResult>, ProviderError> {
    extract_list(payload, AVAILABILITY_LIST_KEYS)
        .map(|items| items.into_iter().map(AvailabilityResult::from).collect())
        .ok_or_else(|| {
            ProviderError::Malformed("expected a list of availability results".to_string())
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use secrecy::SecretString;
    use serde_json::json;

    use super::*;

    fn client(default_team_id: Option<&str>) -> RegistrarClient {
        RegistrarClient::new(&RegistrarConfig {
            base_url: "https://registrar.test".to_string(),
            token: SecretString::from("tok_123"),
            default_team_id: default_team_id.map(String::from),
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    #[test]
    fn test_endpoint_without_team() {
        let url = client(None).endpoint(AVAILABILITY_PATH, None).unwrap();
        assert_eq!(
            url.as_str(),
            "https://registrar.test/v1/registrar/domains/availability"
        );
    }

    #[test]
    fn test_endpoint_uses_default_team() {
        let url = client(Some("team_default"))
            .endpoint(SUPPORTED_TLDS_PATH, None)
            .unwrap();
        assert_eq!(url.query(), Some("teamId=team_default"));
    }

    #[test]
    fn test_endpoint_request_team_wins() {
        let url = client(Some("team_default"))
            .endpoint(SUPPORTED_TLDS_PATH, Some("team_req"))
            .unwrap();
        assert_eq!(url.query(), Some("teamId=team_req"));
    }

    #[test]
    fn test_parse_tlds_from_array() {
        let tlds = parse_supported_tlds(json!([".com", "IO", "com", "dev"])).unwrap();
        assert_eq!(tlds, ["com", "io", "dev"]);
    }

    #[test]
    fn test_parse_tlds_from_wrapped_objects() {
        let tlds = parse_supported_tlds(json!({
            "tlds": [{ "name": "net" }, { "tld": ".org" }, { "price": 10 }]
        }))
        .unwrap();
        assert_eq!(tlds, ["net", "org"]);
    }

    #[test]
    fn test_parse_tlds_malformed() {
        let result = parse_supported_tlds(json!({ "unexpected": true }));
        assert!(matches!(result, Err(ProviderError::Malformed(_))));

        let result = parse_supported_tlds(json!("com"));
        assert!(matches!(result, Err(ProviderError::Malformed(_))));
    }

    #[test]
    fn test_parse_availability_keeps_order_and_shape() {
        let results = parse_availability(json!({
            "results": [
                { "domain": "b.com", "available": true },
                "a.com",
                { "name": "c.com", "status": "taken" }
            ]
        }))
        .unwrap();

        let names: Vec<_> = results.iter().map(AvailabilityResult::display).collect();
        assert_eq!(names, ["b.com", "a.com", "c.com"]);
    }

    #[test]
    fn test_parse_availability_malformed() {
        let result = parse_availability(json!({ "error": "nope" }));
        assert!(matches!(result, Err(ProviderError::Malformed(_))));
    }

    #[test]
    fn test_registrar_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + Clone>() {}
        assert_send_sync::<RegistrarClient>();
    }
}
