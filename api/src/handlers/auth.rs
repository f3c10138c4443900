//! Registration, login, and logout handlers.
//!
//! Sessions are the only identity carrier: a successful register or login
//! writes the user id into the session, and every later request resolves
//! its principal from there.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    Extension, Json,
};
use tower_sessions::Session;
use tracing::info;
use user::{hash_password, verify_password, CurrentPrincipal, SessionManager};

use crate::{
    error::{ApiError, ApiResult},
    models::{
        CurrentUserResponse, LoginPromptParams, LoginPromptResponse, LoginRequest,
        RegisterRequest, SuccessResponse,
    },
    AppState,
};
use database::UserStore;

fn validate_credentials_shape(username: &str, password: &str) -> ApiResult<()> {
    if username.trim().is_empty() {
        return Err(ApiError::Validation {
            field: "username".to_string(),
            message: "Username cannot be empty".to_string(),
        });
    }
    if password.is_empty() {
        return Err(ApiError::Validation {
            field: "password".to_string(),
            message: "Password cannot be empty".to_string(),
        });
    }
    Ok(())
}

/// Register a new user account
///
/// The new user is logged in immediately: the session carries their id
/// from this response onward.
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created and logged in", body = SuccessResponse),
        (status = 400, description = "Username taken or fields empty", body = crate::error::ApiErrorResponse)
    ),
    tag = "auth"
)]
pub async fn register(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(request): Json<RegisterRequest>,
) -> ApiResult<impl IntoResponse> {
    validate_credentials_shape(&request.username, &request.password)?;

    let users = UserStore::new(&state.db);
    if users.username_exists(&request.username).await? {
        return Err(ApiError::Validation {
            field: "username".to_string(),
            message: "Username is already taken".to_string(),
        });
    }

    let password_hash = hash_password(&request.password)?;
    let user_id = users.create(&request.username, &password_hash).await?;

    SessionManager::create_session(&session, user_id, &request.username).await?;

    info!("Registered user {} with id: {}", request.username, user_id);
    Ok((
        StatusCode::CREATED,
        Json(SuccessResponse {
            success: true,
            message: format!("Registered as {}", request.username),
        }),
    ))
}

/// The login prompt
///
/// Denied anonymous mutations redirect here with `?next=<original path>`;
/// the prompt echoes that continuation target back.
#[utoipa::path(
    get,
    path = "/api/v1/auth/login",
    responses(
        (status = 200, description = "Login prompt", body = LoginPromptResponse)
    ),
    tag = "auth"
)]
pub async fn login_page(Query(params): Query<LoginPromptParams>) -> Json<LoginPromptResponse> {
    Json(LoginPromptResponse {
        detail: "Log in to continue".to_string(),
        next: params.next,
    })
}

/// Log in with username and password
///
/// On success the session carries the user id. When a `next` query
/// parameter is present the response redirects there, resuming the request
/// that triggered the login prompt.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = SuccessResponse),
        (status = 303, description = "Logged in; redirect to the continuation target"),
        (status = 401, description = "Unknown username or wrong password", body = crate::error::ApiErrorResponse)
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Query(params): Query<LoginPromptParams>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let user = UserStore::new(&state.db)
        .get_by_username(&request.username)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    if !verify_password(&user.password_hash, &request.password)? {
        return Err(ApiError::InvalidCredentials);
    }

    SessionManager::create_session(&session, user.id, &user.username).await?;
    info!("User {} logged in", user.username);

    // Only same-site paths may resume; "//host" is scheme-relative and
    // would send the client off-site.
    if let Some(next) = params
        .next
        .filter(|n| n.starts_with('/') && !n.starts_with("//"))
    {
        return Ok(Redirect::to(&next).into_response());
    }

    Ok(Json(SuccessResponse {
        success: true,
        message: format!("Logged in as {}", user.username),
    })
    .into_response())
}

/// Log out
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    responses(
        (status = 200, description = "Logged out", body = SuccessResponse)
    ),
    tag = "auth"
)]
pub async fn logout(Extension(session): Extension<Session>) -> ApiResult<impl IntoResponse> {
    SessionManager::destroy_session(&session).await?;

    Ok(Json(SuccessResponse {
        success: true,
        message: "Logged out".to_string(),
    }))
}

/// Who the current session belongs to
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    responses(
        (status = 200, description = "Current session identity", body = CurrentUserResponse)
    ),
    tag = "auth"
)]
pub async fn me(
    Extension(session): Extension<Session>,
    CurrentPrincipal(principal): CurrentPrincipal,
) -> ApiResult<impl IntoResponse> {
    let username = SessionManager::current_username(&session).await?;

    Ok(Json(CurrentUserResponse {
        authenticated: principal.is_authenticated(),
        id: principal.id(),
        username,
    }))
}
