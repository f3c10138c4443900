pub mod auth;
pub mod comments;
pub mod health;
pub mod news;
pub mod notes;

use authz::{authorize_create, Decision, Principal};

use crate::error::{ApiError, ApiResult};

/// Translate a policy decision into handler flow.
///
/// `original_path` is carried into the login redirect so the client can
/// resume the denied request after authenticating.
pub(crate) fn enforce(decision: Decision, original_path: &str) -> ApiResult<()> {
    match decision {
        Decision::Allow => Ok(()),
        Decision::DenyAsNotFound => Err(ApiError::NotFound),
        Decision::DenyAsRedirectToLogin => Err(ApiError::LoginRequired {
            next: original_path.to_string(),
        }),
    }
}

/// Gate a request on authentication and yield the acting user's id.
///
/// Anonymous requesters are redirected to login with `original_path` as the
/// continuation target.
pub(crate) fn require_user(principal: &Principal, original_path: &str) -> ApiResult<i64> {
    enforce(authorize_create(principal), original_path)?;
    principal
        .id()
        .ok_or_else(|| ApiError::InternalError("authenticated principal without id".to_string()))
}
