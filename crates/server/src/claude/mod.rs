//! Claude API integration for label generation.
//!
//! Multi-word queries ("my cool idea") are turned into a single brandable
//! label by asking Claude for a short domain-like phrase. One non-streaming
//! request per label, no tools.

mod client;
mod error;
pub mod types;

pub use client::ClaudeClient;
pub use error::ClaudeError;
