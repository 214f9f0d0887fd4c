//! Search-as-you-type over standard input.
//!
//! Every line read is treated as the new contents of the search box. An
//! empty line clears it. Results are printed whenever a search settles.
//!
//! # Usage
//!
//! ```bash
//! ds-cli watch
//! ds-cli watch --url "https://app.example/search?q=cats"
//! ```

use domain_search_client::{ClientConfig, Phase, SearchView};
use tokio::io::{AsyncBufReadExt, BufReader};

use super::{CommandError, coordinator, render};

/// Drive a search session from standard input until it closes.
///
/// With `page_url`, the session starts from that URL's `q` parameter. The
/// final shareable URL is printed on exit.
///
/// # Errors
///
/// Returns an error if the client cannot be configured or stdin fails.
#[allow(clippy::print_stdout)]
pub async fn run(page_url: Option<&str>, team_id: Option<String>) -> Result<(), CommandError> {
    let mut config = ClientConfig::from_env()?;
    if team_id.is_some() {
        config.team_id = team_id;
    }

    let (coordinator, url) = coordinator(&config, page_url)?;

    let mut views = coordinator.subscribe();
    let printer = tokio::spawn(async move {
        let mut previous = Phase::Idle;
        while views.changed().await.is_ok() {
            let view = views.borrow_and_update().clone();
            if view.phase != previous {
                print_transition(&view);
                previous = view.phase;
            }
        }
    });

    if coordinator.mount() {
        tracing::info!(query = %coordinator.view().query, "Restored query from URL");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        coordinator.set_query(&line);
    }

    // Let a pending search finish before reporting the final URL
    let mut views = coordinator.subscribe();
    let _ = views
        .wait_for(|view| !matches!(view.phase, Phase::Debouncing | Phase::Fetching))
        .await;
    printer.abort();

    println!("{}", url.current());
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_transition(view: &SearchView) {
    match view.phase {
        Phase::Fetching => println!("searching \"{}\"...", view.query),
        Phase::Settled => {
            println!(
                "results for \"{}\":",
                view.settled_query.as_deref().unwrap_or_default()
            );
            print!("{}", render(view));
        }
        Phase::Aborted | Phase::Idle if view.query.trim().is_empty() => println!("cleared"),
        _ => {}
    }
}
