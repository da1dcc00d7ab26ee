//! Articled - a wiki-style article service over a pluggable document store
//!
//! Articled keeps a single collection of `{title, content}` documents and
//! exposes it through a minimal HTTP API:
//! - List, create and clear the collection under `/articles`
//! - Fetch, replace, merge and delete by exact title under `/articles/:title`
//! - Pluggable store backends (file-backed or in-memory)

pub mod api;
pub mod config;
pub mod error;
pub mod store;
pub mod types;

pub use error::{Error, Result};
