//! Links into an external domain marketplace.

/// Build a marketplace search URL for the current query.
///
/// The trimmed query is split on whitespace, each token is percent-encoded,
/// and the tokens are joined with `+` into the `q` parameter.
///
/// ## Examples
///
/// ```
/// use domain_search_core::marketplace_search_url;
///
/// assert_eq!(
///     marketplace_search_url("https://example.test/search", "  cats & dogs "),
///     "https://example.test/search?q=cats+%26+dogs"
/// );
/// ```
#[must_use]
pub fn marketplace_search_url(base: &str, query: &str) -> String {
    let terms = query
        .split_whitespace()
        .map(|token| urlencoding::encode(token).into_owned())
        .collect::<Vec<_>>()
        .join("+");

    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{base}{separator}q={terms}")
}
