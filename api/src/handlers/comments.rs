//! Comment mutation handlers.
//!
//! Every successful mutation redirects back to the parent news detail page
//! at its comments anchor. Edit and delete run the ownership policy after
//! the target comment is fetched; a missing comment and a comment owned by
//! someone else produce the same not-found response.

use authz::{authorize, Operation};
use axum::{
    extract::{OriginalUri, Path, State},
    response::{IntoResponse, Redirect},
    Json,
};
use chrono::Utc;
use content::check_comment_text;
use database::{CommentStore, NewsStore};
use tracing::info;
use user::CurrentPrincipal;

use crate::{
    error::{ApiError, ApiResult},
    handlers::{enforce, require_user},
    models::CommentRequest,
    AppState,
};

/// Where a finished comment mutation lands the client.
fn news_comments_anchor(news_id: i64) -> String {
    format!("/api/v1/news/read/{}#comments", news_id)
}

fn validate_comment_text(text: &str) -> ApiResult<()> {
    check_comment_text(text).map_err(|e| ApiError::Validation {
        field: "text".to_string(),
        message: e.message().to_string(),
    })
}

/// Create a comment on a news item
///
/// Requires a logged-in user; anonymous requesters are redirected to login
/// with the create path as the continuation parameter.
#[utoipa::path(
    post,
    path = "/api/v1/comments/create/{news_id}",
    params(
        ("news_id" = i64, Path, description = "News item to comment on")
    ),
    request_body = CommentRequest,
    responses(
        (status = 303, description = "Created; redirect to the news detail comments anchor"),
        (status = 400, description = "Text failed moderation", body = crate::error::ApiErrorResponse),
        (status = 404, description = "News item not found", body = crate::error::ApiErrorResponse)
    ),
    tag = "comments"
)]
pub async fn create_comment(
    State(state): State<AppState>,
    Path(news_id): Path<i64>,
    OriginalUri(uri): OriginalUri,
    CurrentPrincipal(principal): CurrentPrincipal,
    Json(request): Json<CommentRequest>,
) -> ApiResult<impl IntoResponse> {
    let author_id = require_user(&principal, uri.path())?;

    NewsStore::new(&state.db)
        .get(news_id)
        .await?
        .ok_or(ApiError::NotFound)?;

    validate_comment_text(&request.text)?;

    let id = CommentStore::new(&state.db)
        .create(news_id, author_id, &request.text, Utc::now())
        .await?;

    info!("User {} created comment {} on news {}", author_id, id, news_id);
    Ok(Redirect::to(&news_comments_anchor(news_id)))
}

/// Edit a comment
///
/// Only the comment's author may edit it. The author is never reassigned.
#[utoipa::path(
    post,
    path = "/api/v1/comments/update/{comment_id}",
    params(
        ("comment_id" = i64, Path, description = "Comment id")
    ),
    request_body = CommentRequest,
    responses(
        (status = 303, description = "Updated; redirect to the news detail comments anchor"),
        (status = 400, description = "Text failed moderation", body = crate::error::ApiErrorResponse),
        (status = 404, description = "Comment not found", body = crate::error::ApiErrorResponse)
    ),
    tag = "comments"
)]
pub async fn update_comment(
    State(state): State<AppState>,
    Path(comment_id): Path<i64>,
    OriginalUri(uri): OriginalUri,
    CurrentPrincipal(principal): CurrentPrincipal,
    Json(request): Json<CommentRequest>,
) -> ApiResult<impl IntoResponse> {
    let store = CommentStore::new(&state.db);
    let comment = store.get(comment_id).await?.ok_or(ApiError::NotFound)?;

    enforce(authorize(&principal, &comment, Operation::Edit), uri.path())?;

    validate_comment_text(&request.text)?;

    store.update_text(comment_id, &request.text).await?;

    info!("User {} updated comment {}", principal, comment_id);
    Ok(Redirect::to(&news_comments_anchor(comment.news_id)))
}

/// Delete a comment
///
/// Only the comment's author may delete it.
#[utoipa::path(
    post,
    path = "/api/v1/comments/delete/{comment_id}",
    params(
        ("comment_id" = i64, Path, description = "Comment id")
    ),
    responses(
        (status = 303, description = "Deleted; redirect to the news detail comments anchor"),
        (status = 404, description = "Comment not found", body = crate::error::ApiErrorResponse)
    ),
    tag = "comments"
)]
pub async fn delete_comment(
    State(state): State<AppState>,
    Path(comment_id): Path<i64>,
    OriginalUri(uri): OriginalUri,
    CurrentPrincipal(principal): CurrentPrincipal,
) -> ApiResult<impl IntoResponse> {
    let store = CommentStore::new(&state.db);
    let comment = store.get(comment_id).await?.ok_or(ApiError::NotFound)?;

    enforce(
        authorize(&principal, &comment, Operation::Delete),
        uri.path(),
    )?;

    store.delete(comment_id).await?;

    info!("User {} deleted comment {}", principal, comment_id);
    Ok(Redirect::to(&news_comments_anchor(comment.news_id)))
}
