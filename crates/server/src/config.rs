//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `REGISTRAR_API_TOKEN` - Bearer token for the registrar API
//!
//! ## Optional
//! - `DOMAIN_SEARCH_HOST` - Bind address (default: 127.0.0.1)
//! - `DOMAIN_SEARCH_PORT` - Listen port (default: 3000)
//! - `REGISTRAR_API_URL` - Registrar API base URL (default: <https://api.vercel.com>)
//! - `REGISTRAR_TEAM_ID` - Team used when a request carries none
//! - `ANTHROPIC_API_KEY` - Enables AI label generation for multi-word queries
//! - `ANTHROPIC_MODEL` - Model used for label generation (default: claude-3-5-haiku-latest)
//! - `UPSTREAM_TIMEOUT_SECS` - Timeout for every upstream call (default: 10)
//! - `TLD_LIMIT` - Candidate TLDs for single-word queries (default: 50)
//! - `AI_TLD_LIMIT` - Candidate TLDs for generated labels (default: 25)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const DEFAULT_REGISTRAR_URL: &str = "https://api.vercel.com";
const DEFAULT_MODEL: &str = "claude-3-5-haiku-latest";

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Registrar (availability provider) configuration
    pub registrar: RegistrarConfig,
    /// Claude (text generation provider) configuration, if enabled
    pub claude: Option<ClaudeConfig>,
    /// Search tuning
    pub search: SearchConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Registrar API configuration.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct RegistrarConfig {
    /// API base URL without trailing slash
    pub base_url: String,
    /// Bearer token
    pub token: SecretString,
    /// Team used when a request does not name one
    pub default_team_id: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl std::fmt::Debug for RegistrarConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrarConfig")
            .field("base_url", &self.base_url)
            .field("token", &"[REDACTED]")
            .field("default_team_id", &self.default_team_id)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Claude API configuration.
#[derive(Clone)]
pub struct ClaudeConfig {
    /// Anthropic API key
    pub api_key: SecretString,
    /// Model identifier
    pub model: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl std::fmt::Debug for ClaudeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClaudeConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Search tuning knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Candidate TLDs when the label is the query itself
    pub tld_limit: usize,
    /// Candidate TLDs when the label was generated
    pub ai_tld_limit: usize,
    /// How long generated labels are reused
    pub label_ttl: Duration,
    /// How long the supported TLD list is reused
    pub tld_ttl: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            tld_limit: 50,
            ai_tld_limit: 25,
            label_ttl: Duration::from_secs(10 * 60),
            tld_ttl: Duration::from_secs(5 * 60),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if secrets look like placeholders.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_parsed_or_default::<IpAddr>("DOMAIN_SEARCH_HOST", "127.0.0.1")?;
        let port = get_parsed_or_default::<u16>("DOMAIN_SEARCH_PORT", "3000")?;
        let timeout = Duration::from_secs(get_parsed_or_default::<u64>(
            "UPSTREAM_TIMEOUT_SECS",
            "10",
        )?);

        let registrar = RegistrarConfig::from_env(timeout)?;
        let claude = ClaudeConfig::from_env(timeout)?;
        let search = SearchConfig::from_env()?;

        Ok(Self {
            host,
            port,
            registrar,
            claude,
            search,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl RegistrarConfig {
    fn from_env(timeout: Duration) -> Result<Self, ConfigError> {
        let base_url = get_env_or_default("REGISTRAR_API_URL", DEFAULT_REGISTRAR_URL);
        url::Url::parse(&base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("REGISTRAR_API_URL".to_string(), e.to_string())
        })?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: get_validated_secret("REGISTRAR_API_TOKEN")?,
            default_team_id: get_optional_env("REGISTRAR_TEAM_ID"),
            timeout,
        })
    }
}

impl ClaudeConfig {
    fn from_env(timeout: Duration) -> Result<Option<Self>, ConfigError> {
        if get_optional_env("ANTHROPIC_API_KEY").is_none() {
            return Ok(None);
        }

        Ok(Some(Self {
            api_key: get_validated_secret("ANTHROPIC_API_KEY")?,
            model: get_env_or_default("ANTHROPIC_MODEL", DEFAULT_MODEL),
            timeout,
        }))
    }
}

impl SearchConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            tld_limit: get_parsed_or_default("TLD_LIMIT", &defaults.tld_limit.to_string())?,
            ai_tld_limit: get_parsed_or_default(
                "AI_TLD_LIMIT",
                &defaults.ai_tld_limit.to_string(),
            )?,
            ..defaults
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse an environment variable, falling back to a default.
fn get_parsed_or_default<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(key, default)
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Validate that a secret is not a placeholder.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}

/// Expose a secret for use in an HTTP header.
#[must_use]
pub fn bearer(secret: &SecretString) -> String {
    format!("Bearer {}", secret.expose_secret())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn registrar() -> RegistrarConfig {
        RegistrarConfig {
            base_url: DEFAULT_REGISTRAR_URL.to_string(),
            token: SecretString::from("super_secret_registrar_token"),
            default_team_id: Some("team_abc".to_string()),
            timeout: Duration::from_secs(10),
        }
    }

    #[test]
    fn test_validate_secret_strength_placeholder() {
        let result = validate_secret_strength("your-api-key-here", "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_secret_strength_changeme() {
        assert!(validate_secret_strength("changeme123", "TEST_VAR").is_err());
    }

    #[test]
    fn test_validate_secret_strength_valid() {
        assert!(validate_secret_strength("vc_4kT9qLm2Zp8RxW1n", "TEST_VAR").is_ok());
    }

    #[test]
    fn test_search_config_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.tld_limit, 50);
        assert_eq!(config.ai_tld_limit, 25);
        assert_eq!(config.label_ttl, Duration::from_secs(600));
        assert_eq!(config.tld_ttl, Duration::from_secs(300));
    }

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            registrar: registrar(),
            claude: None,
            search: SearchConfig::default(),
            sentry_dsn: None,
            sentry_environment: None,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_registrar_config_debug_redacts_token() {
        let debug_output = format!("{:?}", registrar());

        assert!(debug_output.contains("api.vercel.com"));
        assert!(debug_output.contains("team_abc"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_registrar_token"));
    }

    #[test]
    fn test_claude_config_debug_redacts_key() {
        let config = ClaudeConfig {
            api_key: SecretString::from("sk-ant-super-secret"),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(10),
        };
        let debug_output = format!("{config:?}");

        assert!(debug_output.contains(DEFAULT_MODEL));
        assert!(!debug_output.contains("sk-ant-super-secret"));
    }

    #[test]
    fn test_bearer() {
        assert_eq!(bearer(&SecretString::from("abc")), "Bearer abc");
    }
}
