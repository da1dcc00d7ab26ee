//! HTTP API server

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::store::ArticleStore;

pub mod handlers;
pub mod state;

pub use state::AppState;

/// Build the API router using the provided application state.
///
/// Each path carries one chained method router, so the full
/// verb-to-operation table for a path lives in a single entry.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/articles",
            get(handlers::list_articles)
                .post(handlers::create_article)
                .delete(handlers::clear_articles),
        )
        .route(
            "/articles/:title",
            get(handlers::find_articles)
                .put(handlers::replace_article)
                .patch(handlers::update_article)
                .delete(handlers::delete_article),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Convenience helper wiring a router directly to a store handle
pub fn create_store_router(store: Arc<dyn ArticleStore>) -> Router {
    create_router(AppState::new(store))
}
