use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tower_sessions::{SessionManagerLayer, SessionStore};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod error;
pub mod handlers;
pub mod models;
pub mod server;
pub mod test_data;

#[cfg(test)]
mod routes_tests;

// Re-export server functions for convenience
pub use server::{start_server, start_server_with_config, ApiConfig};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<database::Database>,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::news::list_news,
        handlers::news::read_news,
        handlers::comments::create_comment,
        handlers::comments::update_comment,
        handlers::comments::delete_comment,
        handlers::notes::list_notes,
        handlers::notes::create_note,
        handlers::notes::read_note,
        handlers::notes::update_note,
        handlers::notes::delete_note,
        handlers::notes::note_success,
        handlers::auth::register,
        handlers::auth::login_page,
        handlers::auth::login,
        handlers::auth::logout,
        handlers::auth::me,
        handlers::health::health_check,
    ),
    components(
        schemas(
            models::NewsSummary,
            models::NewsListResponse,
            models::CommentResponse,
            models::NewsDetailResponse,
            models::CommentRequest,
            models::NoteResponse,
            models::NoteListResponse,
            models::CreateNoteRequest,
            models::UpdateNoteRequest,
            models::RegisterRequest,
            models::LoginRequest,
            models::LoginPromptResponse,
            models::CurrentUserResponse,
            models::SuccessResponse,
            models::HealthResponse,
            models::DatabaseHealth,
            error::ApiErrorResponse,
            error::ErrorDetail,
        )
    ),
    tags(
        (name = "news", description = "News home page and detail reads"),
        (name = "comments", description = "Comment mutations"),
        (name = "notes", description = "Personal note CRUD"),
        (name = "auth", description = "Registration, login, and sessions"),
        (name = "health", description = "Health check endpoints"),
    ),
    info(
        title = "Quill API",
        version = "1.0.0",
        description = "News, comments, and personal notes with ownership-based authorization",
    ),
)]
pub struct ApiDoc;

/// Create the main API router with all routes and middleware
///
/// The session layer is passed in so that the server and tests can supply
/// different stores (sqlite-backed in production, in-memory in tests).
pub fn create_router<Store>(state: AppState, session_layer: SessionManagerLayer<Store>) -> Router
where
    Store: SessionStore + Clone,
{
    // API v1 routes
    let api_v1 = Router::new()
        // News reads
        .route("/news/list", get(handlers::news::list_news))
        .route("/news/read/:news_id", get(handlers::news::read_news))
        // Comment mutations
        .route(
            "/comments/create/:news_id",
            post(handlers::comments::create_comment),
        )
        .route(
            "/comments/update/:comment_id",
            post(handlers::comments::update_comment),
        )
        .route(
            "/comments/delete/:comment_id",
            post(handlers::comments::delete_comment),
        )
        // Notes
        .route("/notes/list", get(handlers::notes::list_notes))
        .route("/notes/create", post(handlers::notes::create_note))
        .route("/notes/read/:slug", get(handlers::notes::read_note))
        .route("/notes/update/:slug", post(handlers::notes::update_note))
        .route("/notes/delete/:slug", post(handlers::notes::delete_note))
        .route("/notes/success", get(handlers::notes::note_success))
        // Accounts and sessions
        .route("/auth/register", post(handlers::auth::register))
        .route(
            "/auth/login",
            get(handlers::auth::login_page).post(handlers::auth::login),
        )
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/me", get(handlers::auth::me))
        // Health check
        .route("/health", get(handlers::health::health_check));

    // Main router
    Router::new()
        .nest("/api/v1", api_v1)
        .merge(SwaggerUi::new("/api/v1/swagger").url("/api/v1/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(session_layer),
        )
        .with_state(state)
}
