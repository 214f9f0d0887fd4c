//! One-shot search.
//!
//! # Usage
//!
//! ```bash
//! ds-cli search my cool idea
//! ds-cli search example.com --json
//! ```

use std::time::Duration;

use domain_search_client::{ClientConfig, Phase};
use domain_search_core::SearchResponse;

use super::{CommandError, coordinator, render};

/// Run a single search and print the results.
///
/// The debounce is skipped since there is no typing to wait for.
///
/// # Errors
///
/// Returns an error if the query is blank, the client cannot be configured,
/// or the search fails.
#[allow(clippy::print_stdout)]
pub async fn run(query: &str, team_id: Option<String>, json: bool) -> Result<(), CommandError> {
    if query.trim().is_empty() {
        return Err(CommandError::EmptyQuery);
    }

    let mut config = ClientConfig::from_env()?;
    config.debounce = Duration::ZERO;
    if team_id.is_some() {
        config.team_id = team_id;
    }

    let (coordinator, url) = coordinator(&config, None)?;
    let mut views = coordinator.subscribe();

    coordinator.set_query(query);
    let view = views
        .wait_for(|view| view.phase == Phase::Settled)
        .await
        .map_err(|_| CommandError::Search("search session ended".to_string()))?
        .clone();

    if let Some(error) = view.error {
        return Err(CommandError::Search(error));
    }

    if json {
        let body = SearchResponse {
            domains: view.results,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&body)
                .map_err(|e| CommandError::Search(e.to_string()))?
        );
    } else {
        print!("{}", render(&view));
        tracing::debug!(url = %url.current(), "Shareable URL");
    }

    Ok(())
}
