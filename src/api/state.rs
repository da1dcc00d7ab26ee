//! API server state

use std::sync::Arc;

use crate::store::ArticleStore;

/// API server state
///
/// The store handle is built once at startup and injected into the router
/// at construction; handlers never reach for ambient globals, so tests can
/// substitute the in-memory backend.
#[derive(Clone)]
pub struct AppState {
    /// Article collection handle
    pub store: Arc<dyn ArticleStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn ArticleStore>) -> Self {
        Self { store }
    }
}
