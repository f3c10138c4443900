//! News home page and detail handlers. Both are public reads.

use authz::shows_submission_form;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use database::{CommentStore, NewsStore, NEWS_PER_PAGE};
use tracing::info;
use user::CurrentPrincipal;

use crate::{
    error::{ApiError, ApiResult},
    models::{CommentResponse, NewsDetailResponse, NewsListResponse, NewsSummary},
    AppState,
};

/// List news items for the home page
///
/// Returns the newest items first, capped at the home page size.
#[utoipa::path(
    get,
    path = "/api/v1/news/list",
    responses(
        (status = 200, description = "News home page listing", body = NewsListResponse)
    ),
    tag = "news"
)]
pub async fn list_news(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let items = NewsStore::new(&state.db).home_page(NEWS_PER_PAGE).await?;

    info!("Listing {} news items for home page", items.len());

    let news: Vec<NewsSummary> = items
        .into_iter()
        .map(|item| NewsSummary {
            id: item.id,
            title: item.title,
            text: item.text,
            date: item.date,
        })
        .collect();

    let count = news.len();
    Ok(Json(NewsListResponse { news, count }))
}

/// Read a single news item with its comments
///
/// Comments are ordered oldest first. `comment_form` reports whether the
/// requester would be offered a submission form (logged-in users only).
#[utoipa::path(
    get,
    path = "/api/v1/news/read/{news_id}",
    params(
        ("news_id" = i64, Path, description = "News item id")
    ),
    responses(
        (status = 200, description = "News detail with comments", body = NewsDetailResponse),
        (status = 404, description = "News item not found", body = crate::error::ApiErrorResponse)
    ),
    tag = "news"
)]
pub async fn read_news(
    State(state): State<AppState>,
    Path(news_id): Path<i64>,
    CurrentPrincipal(principal): CurrentPrincipal,
) -> ApiResult<impl IntoResponse> {
    let item = NewsStore::new(&state.db)
        .get(news_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    let comments: Vec<CommentResponse> = CommentStore::new(&state.db)
        .list_for_news(news_id)
        .await?
        .into_iter()
        .map(|comment| CommentResponse {
            id: comment.id,
            news_id: comment.news_id,
            author_id: comment.author_id,
            text: comment.text,
            created: comment.created,
        })
        .collect();

    Ok(Json(NewsDetailResponse {
        id: item.id,
        title: item.title,
        text: item.text,
        date: item.date,
        comments,
        comment_form: shows_submission_form(&principal),
    }))
}
