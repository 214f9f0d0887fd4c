//! Core types for Domain Search.
//!
//! This module provides the pure building blocks of a search: turning raw
//! input into a [`Query`], deriving labels and candidate TLDs, and modelling
//! what the availability provider sends back.

pub mod api;
pub mod availability;
pub mod label;
pub mod marketplace;
pub mod query;
pub mod tld;

pub use api::{ErrorResponse, SearchRequest, SearchResponse};
pub use availability::{Availability, AvailabilityResult};
pub use label::{
    MAX_LABEL_LENGTH, MAX_TITLE_LENGTH, domain_label_from_title, tidy_generated_title,
};
pub use marketplace::marketplace_search_url;
pub use query::{Query, SearchMode};
pub use tld::{PRIORITY_TLDS, normalize_tld, pick_candidate_tlds};
