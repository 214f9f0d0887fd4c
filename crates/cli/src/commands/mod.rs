//! Subcommand implementations and shared rendering.

pub mod open;
pub mod search;
pub mod watch;

use std::fmt::Write as _;
use std::sync::Arc;

use domain_search_client::{
    ClientConfig, ClientError, HttpSearchBackend, Phase, SearchCoordinator, SearchView,
    ShareableUrl,
};
use thiserror::Error;

/// Page the shareable URL is kept against when none is given.
const DEFAULT_PAGE_URL: &str = "https://domains.local/search";

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] domain_search_client::ConfigError),

    /// The search backend could not be built.
    #[error("client error: {0}")]
    Client(#[from] ClientError),

    /// A page URL was not absolute.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Reading standard input failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The search finished with an error.
    #[error("search failed: {0}")]
    Search(String),

    /// The query was blank.
    #[error("query must not be empty")]
    EmptyQuery,
}

/// Build a coordinator whose shareable URL starts at `page_url`.
fn coordinator(
    config: &ClientConfig,
    page_url: Option<&str>,
) -> Result<(SearchCoordinator, Arc<ShareableUrl>), CommandError> {
    let backend = Arc::new(HttpSearchBackend::new(config)?);
    let url = Arc::new(ShareableUrl::parse(page_url.unwrap_or(DEFAULT_PAGE_URL))?);
    let coordinator = SearchCoordinator::from_config(backend, url.clone(), config);
    Ok((coordinator, url))
}

/// Render a settled view as one line per result.
pub fn render(view: &SearchView) -> String {
    if let Some(error) = &view.error {
        return format!("error: {error}\n");
    }
    if view.phase == Phase::Settled && view.results.is_empty() {
        return "No matching domains\n".to_string();
    }

    let width = view
        .results
        .iter()
        .map(|r| r.display().len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for result in &view.results {
        let _ = writeln!(
            out,
            "{:<width$}  {}",
            result.display(),
            result.availability()
        );
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use domain_search_core::AvailabilityResult;

    use super::*;

    fn settled(results: Vec<AvailabilityResult>, error: Option<&str>) -> SearchView {
        SearchView {
            query: "cats".to_string(),
            phase: Phase::Settled,
            loading: false,
            results,
            error: error.map(String::from),
            settled_query: Some("cats".to_string()),
        }
    }

    #[test]
    fn test_render_aligns_columns() {
        let view = settled(
            vec![
                AvailabilityResult::structured("cats.com", false),
                AvailabilityResult::structured("cats.io", true),
            ],
            None,
        );
        assert_eq!(render(&view), "cats.com  taken\ncats.io   available\n");
    }

    #[test]
    fn test_render_unrecognized_entry() {
        let view = settled(
            vec![AvailabilityResult::Unrecognized(serde_json::json!([1, 2]))],
            None,
        );
        assert_eq!(render(&view), "[1,2]  unknown\n");
    }

    #[test]
    fn test_render_empty_and_error() {
        assert_eq!(render(&settled(vec![], None)), "No matching domains\n");
        assert_eq!(
            render(&settled(vec![], Some("upstream down"))),
            "error: upstream down\n"
        );
    }
}
