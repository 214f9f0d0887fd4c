//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `DOMAIN_SEARCH_API_URL` - Search API base URL (default: <http://127.0.0.1:3000>)
//! - `DOMAIN_SEARCH_TEAM_ID` - Team sent with every search
//! - `DOMAIN_SEARCH_DEBOUNCE_MS` - Quiet period before a search is sent (default: 300)
//! - `DOMAIN_SEARCH_CACHE_TTL_SECS` - How long results are reused (default: 120)
//! - `DOMAIN_MARKETPLACE_URL` - Marketplace search page (default: <https://vercel.com/domains/search>)
//! - `DOMAIN_SEARCH_TIMEOUT_SECS` - HTTP timeout per search (default: 30)

use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_API_URL: &str = "http://127.0.0.1:3000";
const DEFAULT_MARKETPLACE_URL: &str = "https://vercel.com/domains/search";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Search client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the search API, without trailing slash
    pub api_url: String,
    /// Team sent with every search
    pub team_id: Option<String>,
    /// Quiet period after the last keystroke
    pub debounce: Duration,
    /// How long a result set is reused for the same query
    pub cache_ttl: Duration,
    /// Marketplace search page used for "open in marketplace" links
    pub marketplace_url: String,
    /// HTTP timeout per search
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            team_id: None,
            debounce: Duration::from_millis(300),
            cache_ttl: Duration::from_secs(120),
            marketplace_url: DEFAULT_MARKETPLACE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        let defaults = Self::default();

        let api_url = match get_optional_env("DOMAIN_SEARCH_API_URL") {
            Some(raw) => {
                Url::parse(&raw).map_err(|e| {
                    ConfigError::InvalidEnvVar("DOMAIN_SEARCH_API_URL".to_string(), e.to_string())
                })?;
                raw.trim_end_matches('/').to_string()
            }
            None => defaults.api_url,
        };

        Ok(Self {
            api_url,
            team_id: get_optional_env("DOMAIN_SEARCH_TEAM_ID"),
            debounce: Duration::from_millis(get_parsed_or(
                "DOMAIN_SEARCH_DEBOUNCE_MS",
                300_u64,
            )?),
            cache_ttl: Duration::from_secs(get_parsed_or(
                "DOMAIN_SEARCH_CACHE_TTL_SECS",
                120_u64,
            )?),
            marketplace_url: get_optional_env("DOMAIN_MARKETPLACE_URL")
                .unwrap_or(defaults.marketplace_url),
            timeout: Duration::from_secs(get_parsed_or("DOMAIN_SEARCH_TIMEOUT_SECS", 30_u64)?),
        })
    }

    /// The search endpoint under [`Self::api_url`].
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL cannot be joined with a path.
    pub fn search_endpoint(&self) -> Result<Url, url::ParseError> {
        let base = self.api_url.trim_end_matches('/');
        Url::parse(&format!("{base}/api/search"))
    }
}

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Parse an environment variable, falling back to a default.
fn get_parsed_or<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get_optional_env(key).map_or(Ok(default), |raw| {
        raw.trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}
