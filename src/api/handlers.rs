//! API handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::Serialize;

use crate::api::AppState;
use crate::types::{Article, ArticleFields};
use crate::Error;

/// Health check with collection size
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    let articles = state.store.count().await?;

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        articles,
    }))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub articles: u64,
}

/// Fetch the whole article collection
pub async fn list_articles(
    State(state): State<AppState>,
) -> Result<Json<Vec<Article>>, ApiError> {
    let articles = state.store.find_all().await?;
    Ok(Json(articles))
}

/// Insert one article from the request body fields
pub async fn create_article(
    State(state): State<AppState>,
    Form(payload): Form<ArticleFields>,
) -> Result<Json<CreateArticleResponse>, ApiError> {
    let draft = payload.into_draft()?;
    let title = draft.title.clone();

    state.store.insert(draft).await?;

    Ok(Json(CreateArticleResponse {
        title,
        created: true,
    }))
}

#[derive(Debug, Serialize)]
pub struct CreateArticleResponse {
    pub title: String,
    pub created: bool,
}

/// Remove every article in the collection
pub async fn clear_articles(
    State(state): State<AppState>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let deleted = state.store.delete_all().await?;
    Ok(Json(DeleteResponse { deleted }))
}

/// Fetch every article whose title equals the path parameter
///
/// Titles are not unique, so the result is an array with zero, one or
/// several entries.
pub async fn find_articles(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> Result<Json<Vec<Article>>, ApiError> {
    let articles = state.store.find_by_title(&title).await?;
    Ok(Json(articles))
}

/// Overwrite the matching article wholesale with the request body
///
/// Fields absent from the body are dropped from the stored document.
/// Matching nothing is not an error; the caller branches on `replaced`.
pub async fn replace_article(
    State(state): State<AppState>,
    Path(title): Path<String>,
    Form(payload): Form<ArticleFields>,
) -> Result<Json<ReplaceArticleResponse>, ApiError> {
    let replaced = state.store.replace_one(&title, payload).await?;
    Ok(Json(ReplaceArticleResponse { replaced }))
}

#[derive(Debug, Serialize)]
pub struct ReplaceArticleResponse {
    pub replaced: u64,
}

/// Merge the request-body fields into the matching article
pub async fn update_article(
    State(state): State<AppState>,
    Path(title): Path<String>,
    Form(payload): Form<ArticleFields>,
) -> Result<Json<UpdateArticleResponse>, ApiError> {
    let updated = state.store.merge_one(&title, payload).await?;
    Ok(Json(UpdateArticleResponse { updated }))
}

#[derive(Debug, Serialize)]
pub struct UpdateArticleResponse {
    pub updated: u64,
}

/// Remove one article matching the path parameter
pub async fn delete_article(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let deleted = state.store.delete_one(&title).await?;
    Ok(Json(DeleteResponse { deleted }))
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted: u64,
}

/// HTTP-facing error carrying the status mapped from the failure kind.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.into(),
        }
    }

    fn internal(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.into(),
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match &err {
            Error::InvalidArticle(message) => Self::bad_request(message.clone()),
            _ => Self::internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({
            "error": self.message,
        }));
        (self.status, body).into_response()
    }
}
