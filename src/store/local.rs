//! Local filesystem store backend

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::types::{Article, ArticleDraft, ArticleFields};
use crate::{Error, Result};

use super::ArticleStore;

/// File-backed article store.
///
/// Keeps one `<id>.json` file per document under the data directory.
/// Writes land in a temporary file first and are renamed into place so a
/// crash never leaves a half-written document behind. Read-modify-write
/// mutations are serialized by an internal mutex; reads go straight to
/// the filesystem.
pub struct LocalStore {
    data_dir: PathBuf,
    write_lock: Mutex<()>,
}

impl LocalStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        std::fs::create_dir_all(&data_dir)?;
        Ok(Self {
            data_dir,
            write_lock: Mutex::new(()),
        })
    }

    fn document_path(&self, id: Uuid) -> PathBuf {
        self.data_dir.join(format!("{id}.json"))
    }

    async fn read_document(&self, path: &Path) -> Result<Article> {
        let data = fs::read(path).await?;
        serde_json::from_slice(&data)
            .map_err(|e| Error::store(format!("corrupt document {}: {}", path.display(), e)))
    }

    async fn write_document(&self, article: &Article) -> Result<()> {
        let path = self.document_path(article.id);
        let tmp = path.with_extension("json.tmp");
        let data = serde_json::to_vec_pretty(article)?;
        fs::write(&tmp, &data).await?;
        fs::rename(&tmp, &path).await?;
        Ok(())
    }

    /// Load the whole collection ordered by insertion time.
    async fn load_all(&self) -> Result<Vec<Article>> {
        let mut articles = Vec::new();

        let mut entries = fs::read_dir(&self.data_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            articles.push(self.read_document(&path).await?);
        }

        articles.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));
        Ok(articles)
    }
}

#[async_trait]
impl ArticleStore for LocalStore {
    async fn find_all(&self) -> Result<Vec<Article>> {
        self.load_all().await
    }

    async fn find_by_title(&self, title: &str) -> Result<Vec<Article>> {
        let articles = self.load_all().await?;
        Ok(articles
            .into_iter()
            .filter(|a| a.matches_title(title))
            .collect())
    }

    async fn insert(&self, draft: ArticleDraft) -> Result<Article> {
        let article = Article::new(draft);
        self.write_document(&article).await?;
        Ok(article)
    }

    async fn replace_one(&self, title: &str, fields: ArticleFields) -> Result<u64> {
        let _guard = self.write_lock.lock().await;

        let articles = self.load_all().await?;
        match articles.into_iter().find(|a| a.matches_title(title)) {
            Some(mut article) => {
                article.replace_with(fields);
                self.write_document(&article).await?;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn merge_one(&self, title: &str, fields: ArticleFields) -> Result<u64> {
        let _guard = self.write_lock.lock().await;

        let articles = self.load_all().await?;
        match articles.into_iter().find(|a| a.matches_title(title)) {
            Some(mut article) => {
                article.merge_from(fields);
                self.write_document(&article).await?;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_one(&self, title: &str) -> Result<u64> {
        let _guard = self.write_lock.lock().await;

        let articles = self.load_all().await?;
        match articles.into_iter().find(|a| a.matches_title(title)) {
            Some(article) => {
                fs::remove_file(self.document_path(article.id)).await?;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_all(&self) -> Result<u64> {
        let _guard = self.write_lock.lock().await;

        let mut removed = 0;
        let mut entries = fs::read_dir(&self.data_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            fs::remove_file(&path).await?;
            removed += 1;
        }

        Ok(removed)
    }

    async fn count(&self) -> Result<u64> {
        let mut total = 0;
        let mut entries = fs::read_dir(&self.data_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            if entry.path().extension().and_then(|e| e.to_str()) == Some("json") {
                total += 1;
            }
        }
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn draft(title: &str, content: &str) -> ArticleDraft {
        ArticleDraft {
            title: title.to_string(),
            content: Some(content.to_string()),
        }
    }

    #[tokio::test]
    async fn test_local_store_lifecycle() {
        let temp_dir = TempDir::new().unwrap();
        let store = LocalStore::new(temp_dir.path()).unwrap();

        let inserted = store.insert(draft("REST", "Representational State Transfer")).await.unwrap();
        assert_eq!(inserted.title.as_deref(), Some("REST"));
        assert_eq!(store.count().await.unwrap(), 1);

        let matches = store.find_by_title("REST").await.unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].id, inserted.id);

        let updated = store
            .merge_one(
                "REST",
                ArticleFields {
                    title: None,
                    content: Some("An architectural style".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated, 1);

        let matches = store.find_by_title("REST").await.unwrap();
        assert_eq!(matches[0].content.as_deref(), Some("An architectural style"));

        let deleted = store.delete_one("REST").await.unwrap();
        assert_eq!(deleted, 1);
        assert_eq!(store.count().await.unwrap(), 0);

        // Deleting an absent title reports zero, not an error.
        assert_eq!(store.delete_one("REST").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_replace_keeps_id_and_drops_fields() {
        let temp_dir = TempDir::new().unwrap();
        let store = LocalStore::new(temp_dir.path()).unwrap();

        let inserted = store.insert(draft("DOM", "Document Object Model")).await.unwrap();

        let replaced = store
            .replace_one(
                "DOM",
                ArticleFields {
                    title: None,
                    content: Some("rewritten".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(replaced, 1);

        // The de-titled document no longer matches any title selector but
        // still lives in the collection under the same id.
        assert!(store.find_by_title("DOM").await.unwrap().is_empty());
        let all = store.find_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, inserted.id);
        assert_eq!(all[0].title, None);
        assert_eq!(all[0].content.as_deref(), Some("rewritten"));
    }

    #[tokio::test]
    async fn test_documents_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let data_dir = temp_dir.path().to_path_buf();

        // Phase 1: insert and drop the store.
        {
            let store = LocalStore::new(&data_dir).unwrap();
            store.insert(draft("REST", "Representational State Transfer")).await.unwrap();
            store.insert(draft("DOM", "Document Object Model")).await.unwrap();
        }

        // Phase 2: reopen on the same directory and verify.
        {
            let store = LocalStore::new(&data_dir).unwrap();
            assert_eq!(store.count().await.unwrap(), 2);

            let matches = store.find_by_title("DOM").await.unwrap();
            assert_eq!(matches.len(), 1);
            assert_eq!(matches[0].content.as_deref(), Some("Document Object Model"));

            assert_eq!(store.delete_all().await.unwrap(), 2);
            assert!(store.find_all().await.unwrap().is_empty());
        }
    }
}
