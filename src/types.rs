//! Core types for articled

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// Article represents a single document in the collection.
///
/// `id` and `created_at` are assigned by the store on insert and survive
/// replace/merge. A freshly created article always carries a title, but a
/// replace without one drops it, so the stored form keeps both text fields
/// optional. Absent fields are omitted from the serialized document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Article {
    /// Materialize a validated draft into a stored document.
    pub fn new(draft: ArticleDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: Some(draft.title),
            content: draft.content,
            created_at: Utc::now(),
        }
    }

    /// Whether this document is selected by the given title.
    pub fn matches_title(&self, title: &str) -> bool {
        self.title.as_deref() == Some(title)
    }

    /// Replace semantics: keep store-assigned metadata, take every field
    /// from the payload, dropping fields the payload leaves out.
    pub fn replace_with(&mut self, fields: ArticleFields) {
        self.title = fields.title;
        self.content = fields.content;
    }

    /// Merge semantics: only fields present in the payload change.
    pub fn merge_from(&mut self, fields: ArticleFields) {
        if let Some(title) = fields.title {
            self.title = Some(title);
        }
        if let Some(content) = fields.content {
            self.content = Some(content);
        }
    }
}

/// Validated payload for inserting a new article.
#[derive(Debug, Clone)]
pub struct ArticleDraft {
    pub title: String,
    pub content: Option<String>,
}

/// Raw field set carried by create/replace/merge request bodies.
///
/// A field left out of the body stays `None`; replace and merge give an
/// absent field different meanings (drop vs. keep).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticleFields {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl ArticleFields {
    /// Validate the fields for creation. `title` is required.
    pub fn into_draft(self) -> Result<ArticleDraft> {
        match self.title {
            Some(title) if !title.trim().is_empty() => Ok(ArticleDraft {
                title,
                content: self.content,
            }),
            _ => Err(Error::invalid_article("Please enter the article title")),
        }
    }
}
