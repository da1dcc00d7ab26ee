//! Document store abstraction layer
//!
//! Provides a unified interface over the backends holding the article
//! collection.

use async_trait::async_trait;

use crate::types::{Article, ArticleDraft, ArticleFields};
use crate::Result;

pub mod local;
pub mod memory;

/// Handle to the article collection.
///
/// Every operation is a single round trip against the backing store.
/// Title selectors match on exact equality; duplicate titles are allowed,
/// so single-item mutations touch the oldest match and report how many
/// documents were actually affected.
#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// Fetch the whole collection in insertion order.
    async fn find_all(&self) -> Result<Vec<Article>>;

    /// Fetch every article whose title equals `title`.
    async fn find_by_title(&self, title: &str) -> Result<Vec<Article>>;

    /// Insert a new article and return the stored document.
    async fn insert(&self, draft: ArticleDraft) -> Result<Article>;

    /// Overwrite the oldest article matching `title` with `fields`,
    /// dropping fields absent from the payload. Returns the number of
    /// documents replaced (0 or 1).
    async fn replace_one(&self, title: &str, fields: ArticleFields) -> Result<u64>;

    /// Merge `fields` into the oldest article matching `title`, leaving
    /// absent fields untouched. Returns the number of documents updated
    /// (0 or 1).
    async fn merge_one(&self, title: &str, fields: ArticleFields) -> Result<u64>;

    /// Delete the oldest article matching `title`. Returns the number of
    /// documents removed (0 or 1); removing nothing is not an error.
    async fn delete_one(&self, title: &str) -> Result<u64>;

    /// Delete every article and return how many were removed.
    async fn delete_all(&self) -> Result<u64>;

    /// Number of documents in the collection.
    async fn count(&self) -> Result<u64>;
}

/// Store configuration
#[derive(Debug, Clone)]
pub enum StoreConfig {
    Local { data_dir: String },
    Memory,
}

/// Create a store backend from config
pub fn create_store(config: StoreConfig) -> Result<Box<dyn ArticleStore>> {
    match config {
        StoreConfig::Local { data_dir } => {
            let backend = local::LocalStore::new(data_dir)?;
            Ok(Box::new(backend))
        }
        StoreConfig::Memory => Ok(Box::new(memory::MemoryStore::new())),
    }
}
