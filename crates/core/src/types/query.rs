//! Query normalization.

use core::fmt;

/// How a query is turned into candidate domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchMode {
    /// The query already names a domain (`example.com`); check it alone.
    FullDomain,
    /// Derive a label and fan it out across candidate TLDs.
    FanOut,
}

/// A normalized search query.
///
/// Built from raw user input by trimming, lowercasing, and stripping a
/// single leading dot. Whitespace-only input does not produce a `Query`.
///
/// ## Examples
///
/// ```
/// use domain_search_core::{Query, SearchMode};
///
/// let query = Query::parse("  .Example.COM ").unwrap();
/// assert_eq!(query.normalized(), "example.com");
/// assert_eq!(query.mode(), SearchMode::FullDomain);
///
/// let query = Query::parse("my cool idea").unwrap();
/// assert!(query.is_multi_word());
/// assert_eq!(query.mode(), SearchMode::FanOut);
///
/// assert!(Query::parse("   ").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query {
    normalized: String,
}

impl Query {
    /// Normalize raw input.
    ///
    /// Returns `None` for empty or whitespace-only input; callers treat that
    /// as "no results" without touching any upstream provider.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let lowered = raw.trim().to_lowercase();
        let normalized = lowered.strip_prefix('.').unwrap_or(&lowered);

        if normalized.is_empty() {
            return None;
        }

        Some(Self {
            normalized: normalized.to_owned(),
        })
    }

    /// The trimmed, lowercased query without its leading dot.
    #[must_use]
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// Whether the query contains whitespace between words.
    #[must_use]
    pub fn is_multi_word(&self) -> bool {
        self.normalized.chars().any(char::is_whitespace)
    }

    /// Whether the query reads as a complete domain name.
    #[must_use]
    pub fn looks_like_full_domain(&self) -> bool {
        self.normalized.contains('.') && !self.is_multi_word()
    }

    /// The search mode implied by the query's shape.
    #[must_use]
    pub fn mode(&self) -> SearchMode {
        if self.looks_like_full_domain() {
            SearchMode::FullDomain
        } else {
            SearchMode::FanOut
        }
    }

    /// The normalized query with all whitespace removed.
    ///
    /// Used as the fallback label when no better label can be derived.
    #[must_use]
    pub fn compact(&self) -> String {
        self.normalized
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect()
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.normalized)
    }
}

impl AsRef<str> for Query {
    fn as_ref(&self) -> &str {
        &self.normalized
    }
}
