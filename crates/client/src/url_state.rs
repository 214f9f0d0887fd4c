//! Shareable URL state.
//!
//! The active query is mirrored into the `q` parameter of a URL so a search
//! can be shared or restored. Updates replace the current URL in place; they
//! never add history entries.

use std::sync::{Mutex, PoisonError};

use url::Url;

/// Name of the query parameter holding the search text.
pub const QUERY_PARAM: &str = "q";

/// Where the active query is persisted.
pub trait UrlState: Send + Sync {
    /// The `q` value currently stored, if any.
    fn query(&self) -> Option<String>;

    /// Replace the `q` value in place; `None` or blank removes it.
    fn replace_query(&self, query: Option<&str>);
}

/// [`UrlState`] backed by a [`Url`].
///
/// Parameters other than `q` are preserved in their original order.
#[derive(Debug)]
pub struct ShareableUrl {
    url: Mutex<Url>,
}

impl ShareableUrl {
    #[must_use]
    pub const fn new(url: Url) -> Self {
        Self {
            url: Mutex::new(url),
        }
    }

    /// Parse `raw` into a shareable URL.
    ///
    /// # Errors
    ///
    /// Returns an error if `raw` is not an absolute URL.
    pub fn parse(raw: &str) -> Result<Self, url::ParseError> {
        Url::parse(raw).map(Self::new)
    }

    /// A copy of the current URL.
    #[must_use]
    pub fn current(&self) -> Url {
        self.url
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl UrlState for ShareableUrl {
    fn query(&self) -> Option<String> {
        self.url
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .query_pairs()
            .find(|(key, _)| key == QUERY_PARAM)
            .map(|(_, value)| value.into_owned())
    }

    fn replace_query(&self, query: Option<&str>) {
        let mut url = self.url.lock().unwrap_or_else(PoisonError::into_inner);

        let mut pairs: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(key, _)| key != QUERY_PARAM)
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        if let Some(query) = query.filter(|q| !q.trim().is_empty()) {
            pairs.push((QUERY_PARAM.to_string(), query.to_string()));
        }

        if pairs.is_empty() {
            url.set_query(None);
        } else {
            url.query_pairs_mut().clear().extend_pairs(pairs);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_query() {
        let url = ShareableUrl::parse("https://app.test/search?q=cats+and+dogs").unwrap();
        assert_eq!(url.query().as_deref(), Some("cats and dogs"));

        let url = ShareableUrl::parse("https://app.test/search").unwrap();
        assert_eq!(url.query(), None);
    }

    #[test]
    fn test_set_preserves_other_params() {
        let url = ShareableUrl::parse("https://app.test/search?team=acme&q=old").unwrap();
        url.replace_query(Some("my cool idea"));

        let current = url.current();
        let pairs: Vec<_> = current.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            [
                ("team".to_string(), "acme".to_string()),
                ("q".to_string(), "my cool idea".to_string())
            ]
        );
    }

    #[test]
    fn test_remove_keeps_other_params() {
        let url = ShareableUrl::parse("https://app.test/search?q=cats&team=acme").unwrap();
        url.replace_query(None);
        assert_eq!(url.current().as_str(), "https://app.test/search?team=acme");
    }

    #[test]
    fn test_remove_last_param_drops_question_mark() {
        let url = ShareableUrl::parse("https://app.test/search?q=cats").unwrap();
        url.replace_query(Some("   "));
        assert_eq!(url.current().as_str(), "https://app.test/search");
    }
}
