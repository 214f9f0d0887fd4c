//! Availability results as reported by the registrar.
//!
//! The provider owns the shape of each entry: some send bare domain strings,
//! others objects keyed by `domain`, `name`, or `domainName` with an
//! `available` flag or a `status` string. [`AvailabilityResult`] classifies
//! each entry at the boundary while keeping the original JSON, so results
//! travel to the client unmodified and rendering stays exhaustive.

use core::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Keys that may carry the domain name in a structured entry.
const DOMAIN_KEYS: &[&str] = &["domain", "name", "domainName"];

/// Availability signal derived from a result entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Availability {
    /// The domain can be registered.
    Available,
    /// The domain is already registered or otherwise unavailable.
    Taken,
    /// The entry carries no recognizable signal.
    Unknown,
}

impl Availability {
    /// Interpret a provider status string.
    #[must_use]
    pub fn from_status(status: &str) -> Self {
        match status.trim().to_ascii_lowercase().as_str() {
            "available" | "free" | "open" => Self::Available,
            "unavailable" | "taken" | "registered" | "reserved" | "premium_unavailable" => {
                Self::Taken
            }
            _ => Self::Unknown,
        }
    }

    /// Short label for display.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Taken => "taken",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a bulk availability response.
#[derive(Debug, Clone, PartialEq)]
pub enum AvailabilityResult {
    /// A bare string, usually the domain itself.
    Textual(String),
    /// An object with at least one recognized field.
    Structured {
        /// Domain name from `domain`, `name`, or `domainName`.
        domain: Option<String>,
        /// Boolean `available` flag.
        available: Option<bool>,
        /// Free-form `status` string.
        status: Option<String>,
        /// The entry exactly as the provider sent it.
        raw: Map<String, Value>,
    },
    /// Anything else the provider sent.
    Unrecognized(Value),
}

impl AvailabilityResult {
    /// Build a structured entry for a domain with a known availability.
    #[must_use]
    pub fn structured(domain: &str, available: bool) -> Self {
        let mut raw = Map::new();
        raw.insert("domain".to_string(), Value::String(domain.to_string()));
        raw.insert("available".to_string(), Value::Bool(available));
        Self::Structured {
            domain: Some(domain.to_string()),
            available: Some(available),
            status: None,
            raw,
        }
    }

    /// The domain this entry refers to, if one can be found.
    #[must_use]
    pub fn domain_name(&self) -> Option<&str> {
        match self {
            Self::Textual(text) => Some(text.as_str()),
            Self::Structured { domain, .. } => domain.as_deref(),
            Self::Unrecognized(_) => None,
        }
    }

    /// The availability signal carried by this entry.
    ///
    /// An explicit `available` flag wins over `status`.
    #[must_use]
    pub fn availability(&self) -> Availability {
        match self {
            Self::Structured {
                available: Some(true),
                ..
            } => Availability::Available,
            Self::Structured {
                available: Some(false),
                ..
            } => Availability::Taken,
            Self::Structured {
                status: Some(status),
                ..
            } => Availability::from_status(status),
            _ => Availability::Unknown,
        }
    }

    /// A string that is always safe to render for this entry.
    ///
    /// Falls back to the compact JSON of the entry when no domain is known.
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            Self::Textual(text) => text.clone(),
            Self::Structured {
                domain: Some(domain),
                ..
            } => domain.clone(),
            Self::Structured { raw, .. } => Value::Object(raw.clone()).to_string(),
            Self::Unrecognized(value) => value.to_string(),
        }
    }
}

impl From<Value> for AvailabilityResult {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => Self::Textual(text),
            Value::Object(raw) => {
                let domain = DOMAIN_KEYS
                    .iter()
                    .find_map(|key| raw.get(*key).and_then(Value::as_str))
                    .map(str::to_owned);
                let available = raw.get("available").and_then(Value::as_bool);
                let status = raw
                    .get("status")
                    .and_then(Value::as_str)
                    .map(str::to_owned);

                if domain.is_none() && available.is_none() && status.is_none() {
                    Self::Unrecognized(Value::Object(raw))
                } else {
                    Self::Structured {
                        domain,
                        available,
                        status,
                        raw,
                    }
                }
            }
            other => Self::Unrecognized(other),
        }
    }
}

impl Serialize for AvailabilityResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Textual(text) => serializer.serialize_str(text),
            Self::Structured { raw, .. } => raw.serialize(serializer),
            Self::Unrecognized(value) => value.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for AvailabilityResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from)
    }
}
