use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A news item as shown on the home page
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NewsSummary {
    pub id: i64,
    pub title: String,
    pub text: String,
    pub date: DateTime<Utc>,
}

/// Response for the news home page listing
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NewsListResponse {
    pub news: Vec<NewsSummary>,
    pub count: usize,
}

/// A single comment on a news item
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CommentResponse {
    pub id: i64,
    pub news_id: i64,
    pub author_id: i64,
    pub text: String,
    pub created: DateTime<Utc>,
}

/// Response for a news detail page: the item, its comments oldest-first,
/// and whether the requester gets a comment submission form.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NewsDetailResponse {
    pub id: i64,
    pub title: String,
    pub text: String,
    pub date: DateTime<Utc>,
    pub comments: Vec<CommentResponse>,
    pub comment_form: bool,
}

/// Request to create or edit a comment
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CommentRequest {
    pub text: String,
}

/// A single note
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NoteResponse {
    pub id: i64,
    pub title: String,
    pub text: String,
    pub slug: String,
    pub author_id: i64,
}

/// Response for the notes listing (requester's own notes only)
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NoteListResponse {
    pub notes: Vec<NoteResponse>,
    pub count: usize,
}

/// Request to create a note. A missing slug is derived from the title.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateNoteRequest {
    pub title: String,
    pub text: String,
    pub slug: Option<String>,
}

/// Request to edit a note. A missing slug is derived from the title.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateNoteRequest {
    pub title: String,
    pub text: String,
    pub slug: Option<String>,
}

/// Request to register a new account
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

/// Request to log in
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Query parameters for the login prompt
#[derive(Debug, Deserialize)]
pub struct LoginPromptParams {
    pub next: Option<String>,
}

/// Response for the login prompt page
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginPromptResponse {
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

/// Who the session says is making the request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CurrentUserResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// Generic success response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
    pub message: String,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub database: DatabaseHealth,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DatabaseHealth {
    pub connected: bool,
    pub message: String,
}
