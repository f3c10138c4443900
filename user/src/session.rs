//! Session management and principal resolution

use authz::Principal;
use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use tower_sessions::Session;
use tracing::{debug, error};

use crate::error::{Result, UserError};

/// Session keys used for storing data
pub struct SessionKeys;

impl SessionKeys {
    pub const USER_ID: &'static str = "user_id";
    pub const USERNAME: &'static str = "username";
    pub const CREATED_AT: &'static str = "created_at";
}

/// Session manager for handling user sessions
#[derive(Clone, Default)]
pub struct SessionManager;

impl SessionManager {
    /// Open a session for a user who just authenticated.
    pub async fn create_session(session: &Session, user_id: i64, username: &str) -> Result<()> {
        session
            .insert(SessionKeys::USER_ID, user_id)
            .await
            .map_err(|e| UserError::Configuration(format!("Failed to set user_id: {}", e)))?;

        session
            .insert(SessionKeys::USERNAME, username)
            .await
            .map_err(|e| UserError::Configuration(format!("Failed to set username: {}", e)))?;

        session
            .insert(SessionKeys::CREATED_AT, chrono::Utc::now())
            .await
            .map_err(|e| UserError::Configuration(format!("Failed to set created_at: {}", e)))?;

        session
            .save()
            .await
            .map_err(|e| UserError::Configuration(format!("Failed to save session: {}", e)))?;

        debug!("Session created for user: {}", user_id);
        Ok(())
    }

    /// Resolve the requesting principal from a session.
    ///
    /// A missing or empty session resolves to `Principal::Anonymous`.
    pub async fn current_principal(session: &Session) -> Result<Principal> {
        let user_id: Option<i64> = session
            .get(SessionKeys::USER_ID)
            .await
            .map_err(|e| UserError::Configuration(format!("Failed to get user_id: {}", e)))?;

        Ok(match user_id {
            Some(id) => Principal::user(id),
            None => Principal::anonymous(),
        })
    }

    /// The username stored alongside the session, if any.
    pub async fn current_username(session: &Session) -> Result<Option<String>> {
        session
            .get(SessionKeys::USERNAME)
            .await
            .map_err(|e| UserError::Configuration(format!("Failed to get username: {}", e)))
    }

    /// Destroy a session (logout)
    pub async fn destroy_session(session: &Session) -> Result<()> {
        session
            .flush()
            .await
            .map_err(|e| UserError::Configuration(format!("Failed to flush session: {}", e)))?;

        debug!("Session destroyed");
        Ok(())
    }
}

/// The login endpoint path, relative to the API root.
pub const LOGIN_PATH: &str = "/api/v1/auth/login";

/// Build the login redirect target for a denied request, carrying the
/// original path as the continuation parameter.
pub fn login_redirect(next: &str) -> String {
    format!("{}?next={}", LOGIN_PATH, urlencoding::encode(next))
}

/// Extractor resolving the requesting principal from the session layer.
///
/// Never rejects: requests without a session resolve to
/// `Principal::Anonymous`.
pub struct CurrentPrincipal(pub Principal);

#[axum::async_trait]
impl<S> FromRequestParts<S> for CurrentPrincipal
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        use axum::Extension;

        let Extension(session): Extension<Session> = Extension::from_request_parts(parts, state)
            .await
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

        let principal = SessionManager::current_principal(&session)
            .await
            .map_err(|e| {
                error!("Failed to resolve principal from session: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            })?;

        Ok(CurrentPrincipal(principal))
    }
}
