//! In-memory store backend

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::types::{Article, ArticleDraft, ArticleFields};
use crate::Result;

use super::ArticleStore;

/// Article collection held in a process-local, insertion-ordered vector.
///
/// Nothing survives a restart; tests and throwaway deployments use this
/// backend in place of the file-backed one.
#[derive(Default)]
pub struct MemoryStore {
    articles: RwLock<Vec<Article>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ArticleStore for MemoryStore {
    async fn find_all(&self) -> Result<Vec<Article>> {
        Ok(self.articles.read().await.clone())
    }

    async fn find_by_title(&self, title: &str) -> Result<Vec<Article>> {
        let articles = self.articles.read().await;
        Ok(articles
            .iter()
            .filter(|a| a.matches_title(title))
            .cloned()
            .collect())
    }

    async fn insert(&self, draft: ArticleDraft) -> Result<Article> {
        let article = Article::new(draft);
        self.articles.write().await.push(article.clone());
        Ok(article)
    }

    async fn replace_one(&self, title: &str, fields: ArticleFields) -> Result<u64> {
        let mut articles = self.articles.write().await;
        match articles.iter_mut().find(|a| a.matches_title(title)) {
            Some(article) => {
                article.replace_with(fields);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn merge_one(&self, title: &str, fields: ArticleFields) -> Result<u64> {
        let mut articles = self.articles.write().await;
        match articles.iter_mut().find(|a| a.matches_title(title)) {
            Some(article) => {
                article.merge_from(fields);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_one(&self, title: &str) -> Result<u64> {
        let mut articles = self.articles.write().await;
        match articles.iter().position(|a| a.matches_title(title)) {
            Some(index) => {
                articles.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_all(&self) -> Result<u64> {
        let mut articles = self.articles.write().await;
        let removed = articles.len() as u64;
        articles.clear();
        Ok(removed)
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.articles.read().await.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str, content: &str) -> ArticleDraft {
        ArticleDraft {
            title: title.to_string(),
            content: Some(content.to_string()),
        }
    }

    #[tokio::test]
    async fn test_memory_store_lifecycle() {
        let store = MemoryStore::new();

        store.insert(draft("REST", "Representational State Transfer")).await.unwrap();
        store.insert(draft("DOM", "Document Object Model")).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 2);

        let matches = store.find_by_title("REST").await.unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(
            matches[0].content.as_deref(),
            Some("Representational State Transfer")
        );

        assert_eq!(store.delete_one("REST").await.unwrap(), 1);
        assert_eq!(store.delete_one("REST").await.unwrap(), 0);

        assert_eq!(store.delete_all().await.unwrap(), 1);
        assert!(store.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_titles_mutate_oldest_match() {
        let store = MemoryStore::new();

        let first = store.insert(draft("DOM", "first take")).await.unwrap();
        let second = store.insert(draft("DOM", "second take")).await.unwrap();

        let matches = store.find_by_title("DOM").await.unwrap();
        assert_eq!(matches.len(), 2);

        let updated = store
            .merge_one(
                "DOM",
                ArticleFields {
                    title: None,
                    content: Some("revised".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated, 1);

        let matches = store.find_by_title("DOM").await.unwrap();
        let revised = matches.iter().find(|a| a.id == first.id).unwrap();
        let untouched = matches.iter().find(|a| a.id == second.id).unwrap();
        assert_eq!(revised.content.as_deref(), Some("revised"));
        assert_eq!(untouched.content.as_deref(), Some("second take"));

        assert_eq!(store.delete_one("DOM").await.unwrap(), 1);
        let matches = store.find_by_title("DOM").await.unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].id, second.id);
    }
}
