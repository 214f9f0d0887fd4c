//! Domain Search Core - Shared types library.
//!
//! This crate provides the types used across all Domain Search components:
//! - `server` - `POST /api/search` service backed by the registrar and Claude
//! - `client` - Search coordinator (debounce, cancellation, result cache)
//! - `cli` - Terminal front end for the coordinator
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no clocks. This keeps it lightweight and allows it to be used
//! on both sides of the wire.
//!
//! # Modules
//!
//! - [`types`] - Query normalization, label sanitization, TLD candidate
//!   selection, availability results, and the HTTP contract
//! - [`memo`] - Time-bounded memo used by every cache (feature `memo`)

#![cfg_attr(not(test), forbid(unsafe_code))]

#[cfg(feature = "memo")]
pub mod memo;
pub mod types;

#[cfg(feature = "memo")]
pub use memo::TimedMemo;
pub use types::*;
