//! Note handlers.
//!
//! The listing is scoped to the requester's own notes. Mutations run the
//! ownership policy after fetching the target; slug validation happens at
//! the form layer, before any ownership question is asked for creates.
//! Successful mutations redirect to the notes success page.

use authz::{authorize, Operation};
use axum::{
    extract::{OriginalUri, Path, State},
    response::{IntoResponse, Redirect},
    Json,
};
use content::{slugify, validate_slug_format, SLUG_TAKEN_WARNING};
use database::{NoteRecord, NoteStore};
use tracing::info;
use user::CurrentPrincipal;

use crate::{
    error::{ApiError, ApiResult},
    handlers::{enforce, require_user},
    models::{CreateNoteRequest, NoteListResponse, NoteResponse, SuccessResponse, UpdateNoteRequest},
    AppState,
};

/// Where a finished note mutation lands the client.
const NOTES_SUCCESS_PATH: &str = "/api/v1/notes/success";

fn note_response(note: NoteRecord) -> NoteResponse {
    NoteResponse {
        id: note.id,
        title: note.title,
        text: note.text,
        slug: note.slug,
        author_id: note.author_id,
    }
}

/// Resolve the slug for a submitted note: an explicit slug is validated as
/// given, a missing one is derived from the title.
fn resolve_slug(slug: Option<String>, title: &str) -> ApiResult<String> {
    let slug = match slug {
        Some(slug) if !slug.is_empty() => slug,
        _ => slugify(title),
    };

    validate_slug_format(&slug).map_err(|e| ApiError::Validation {
        field: "slug".to_string(),
        message: e.message().to_string(),
    })?;

    Ok(slug)
}

fn slug_taken(slug: &str) -> ApiError {
    ApiError::Validation {
        field: "slug".to_string(),
        message: format!("{}{}", slug, SLUG_TAKEN_WARNING),
    }
}

/// List the requester's notes
///
/// Only the requester's own notes appear; other users' notes are never
/// included. Anonymous requesters are redirected to login.
#[utoipa::path(
    get,
    path = "/api/v1/notes/list",
    responses(
        (status = 200, description = "The requester's notes", body = NoteListResponse),
        (status = 303, description = "Anonymous; redirect to login")
    ),
    tag = "notes"
)]
pub async fn list_notes(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    CurrentPrincipal(principal): CurrentPrincipal,
) -> ApiResult<impl IntoResponse> {
    let author_id = require_user(&principal, uri.path())?;

    let notes: Vec<NoteResponse> = NoteStore::new(&state.db)
        .list_for_author(author_id)
        .await?
        .into_iter()
        .map(note_response)
        .collect();

    let count = notes.len();
    Ok(Json(NoteListResponse { notes, count }))
}

/// Create a note
///
/// A missing slug is derived from the title. The slug must be unique
/// across all users; a taken slug is rejected at the validation layer.
#[utoipa::path(
    post,
    path = "/api/v1/notes/create",
    request_body = CreateNoteRequest,
    responses(
        (status = 303, description = "Created; redirect to the success page"),
        (status = 400, description = "Slug invalid or already in use", body = crate::error::ApiErrorResponse)
    ),
    tag = "notes"
)]
pub async fn create_note(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    CurrentPrincipal(principal): CurrentPrincipal,
    Json(request): Json<CreateNoteRequest>,
) -> ApiResult<impl IntoResponse> {
    let author_id = require_user(&principal, uri.path())?;

    let slug = resolve_slug(request.slug, &request.title)?;

    let store = NoteStore::new(&state.db);
    if store.slug_exists(&slug).await? {
        return Err(slug_taken(&slug));
    }

    let id = store
        .create(&request.title, &request.text, &slug, author_id)
        .await?;

    info!("User {} created note {} with slug: {}", author_id, id, slug);
    Ok(Redirect::to(NOTES_SUCCESS_PATH))
}

/// Read a single note by slug
#[utoipa::path(
    get,
    path = "/api/v1/notes/read/{slug}",
    params(
        ("slug" = String, Path, description = "Note slug")
    ),
    responses(
        (status = 200, description = "The note", body = NoteResponse),
        (status = 404, description = "Note not found", body = crate::error::ApiErrorResponse)
    ),
    tag = "notes"
)]
pub async fn read_note(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(slug): Path<String>,
    CurrentPrincipal(principal): CurrentPrincipal,
) -> ApiResult<impl IntoResponse> {
    let note = NoteStore::new(&state.db)
        .get_by_slug(&slug)
        .await?
        .ok_or(ApiError::NotFound)?;

    enforce(authorize(&principal, &note, Operation::View), uri.path())?;

    Ok(Json(note_response(note)))
}

/// Edit a note
///
/// Only the note's author may edit it. Authorship survives edits: the
/// owning user is never reassigned. A non-owner receives the same
/// not-found response as for a slug that does not exist.
#[utoipa::path(
    post,
    path = "/api/v1/notes/update/{slug}",
    params(
        ("slug" = String, Path, description = "Note slug")
    ),
    request_body = UpdateNoteRequest,
    responses(
        (status = 303, description = "Updated; redirect to the success page"),
        (status = 400, description = "Slug invalid or already in use", body = crate::error::ApiErrorResponse),
        (status = 404, description = "Note not found", body = crate::error::ApiErrorResponse)
    ),
    tag = "notes"
)]
pub async fn update_note(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(slug): Path<String>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Json(request): Json<UpdateNoteRequest>,
) -> ApiResult<impl IntoResponse> {
    let store = NoteStore::new(&state.db);
    let note = store.get_by_slug(&slug).await?.ok_or(ApiError::NotFound)?;

    enforce(authorize(&principal, &note, Operation::Edit), uri.path())?;

    let new_slug = resolve_slug(request.slug, &request.title)?;
    if new_slug != note.slug && store.slug_exists(&new_slug).await? {
        return Err(slug_taken(&new_slug));
    }

    store
        .update(note.id, &request.title, &request.text, &new_slug)
        .await?;

    info!("User {} updated note {}", principal, note.id);
    Ok(Redirect::to(NOTES_SUCCESS_PATH))
}

/// Delete a note
///
/// Only the note's author may delete it.
#[utoipa::path(
    post,
    path = "/api/v1/notes/delete/{slug}",
    params(
        ("slug" = String, Path, description = "Note slug")
    ),
    responses(
        (status = 303, description = "Deleted; redirect to the success page"),
        (status = 404, description = "Note not found", body = crate::error::ApiErrorResponse)
    ),
    tag = "notes"
)]
pub async fn delete_note(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(slug): Path<String>,
    CurrentPrincipal(principal): CurrentPrincipal,
) -> ApiResult<impl IntoResponse> {
    let store = NoteStore::new(&state.db);
    let note = store.get_by_slug(&slug).await?.ok_or(ApiError::NotFound)?;

    enforce(authorize(&principal, &note, Operation::Delete), uri.path())?;

    store.delete(note.id).await?;

    info!("User {} deleted note {}", principal, note.id);
    Ok(Redirect::to(NOTES_SUCCESS_PATH))
}

/// Landing page after a successful note mutation
#[utoipa::path(
    get,
    path = "/api/v1/notes/success",
    responses(
        (status = 200, description = "Mutation confirmation", body = SuccessResponse)
    ),
    tag = "notes"
)]
pub async fn note_success() -> Json<SuccessResponse> {
    Json(SuccessResponse {
        success: true,
        message: "Done".to_string(),
    })
}
