//! Marketplace link for a query.
//!
//! # Usage
//!
//! ```bash
//! ds-cli open my cool idea
//! ```

use domain_search_client::ClientConfig;
use domain_search_core::marketplace_search_url;

use super::CommandError;

/// Print the marketplace search URL for `query`.
///
/// # Errors
///
/// Returns an error if the query is blank or configuration cannot be loaded.
#[allow(clippy::print_stdout)]
pub fn run(query: &str) -> Result<(), CommandError> {
    if query.trim().is_empty() {
        return Err(CommandError::EmptyQuery);
    }

    let config = ClientConfig::from_env()?;
    println!("{}", marketplace_search_url(&config.marketplace_url, query));
    Ok(())
}
