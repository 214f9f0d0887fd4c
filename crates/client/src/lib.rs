//! Domain Search client library.
//!
//! Drives the search API the way a search box does: edits are debounced,
//! repeated queries are answered from a short-lived cache, at most one
//! request is in flight, and stale responses are dropped. The active query
//! is mirrored into a shareable URL.
//!
//! ```rust,ignore
//! let config = ClientConfig::from_env()?;
//! let backend = Arc::new(HttpSearchBackend::new(&config)?);
//! let url = Arc::new(ShareableUrl::parse("https://app.example/search")?);
//! let coordinator = SearchCoordinator::from_config(backend, url, &config);
//!
//! let mut views = coordinator.subscribe();
//! coordinator.set_query("my cool idea");
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod backend;
pub mod config;
pub mod coordinator;
pub mod url_state;

pub use backend::{ClientError, HttpSearchBackend, SearchBackend};
pub use config::{ClientConfig, ConfigError};
pub use coordinator::{Phase, SearchCoordinator, SearchView};
pub use url_state::{QUERY_PARAM, ShareableUrl, UrlState};
