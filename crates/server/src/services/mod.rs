//! Search business logic.
//!
//! - [`LabelSynthesizer`] - query to label, with memoized generation
//! - [`TldCatalog`] - cached supported TLDs and candidate selection
//! - [`AvailabilityResolver`] - one bulk availability check per search
//! - [`SearchService`] - ties the three together

pub mod labels;
pub mod resolver;
pub mod search;
pub mod tlds;

#[cfg(test)]
pub(crate) mod fakes;

use std::sync::Arc;

use thiserror::Error;

use crate::providers::ProviderError;

pub use labels::LabelSynthesizer;
pub use resolver::{AvailabilityResolver, candidate_domains};
pub use search::SearchService;
pub use tlds::TldCatalog;

/// Errors that fail a search.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The supported TLD list could not be fetched.
    #[error("failed to load supported TLDs: {0}")]
    Tlds(Arc<ProviderError>),

    /// The bulk availability check failed.
    #[error("availability check failed: {0}")]
    Availability(#[from] ProviderError),
}
