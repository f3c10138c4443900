use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The one body used for every not-found response.
///
/// A resource owned by someone else and a resource that does not exist must
/// produce byte-identical responses, so neither message nor details may vary
/// per cause.
pub const NOT_FOUND_MESSAGE: &str = "Not found";

/// API Error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// The target resource does not exist — or the requester is not allowed
    /// to know whether it exists.
    #[error("{NOT_FOUND_MESSAGE}")]
    NotFound,

    /// A submitted field failed validation; carries the offending field name.
    #[error("{message}")]
    Validation { field: String, message: String },

    /// The request requires a logged-in user; redirect to the login
    /// endpoint, carrying the original path as the continuation parameter.
    #[error("Login required")]
    LoginRequired { next: String },

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

/// Error response structure for OpenAPI documentation
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ApiErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Convert error to HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::LoginRequired { .. } => StatusCode::SEE_OTHER,
            ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code for the error type
    pub fn error_code(&self) -> &str {
        match self {
            ApiError::NotFound => "NOT_FOUND",
            ApiError::Validation { .. } => "VALIDATION_ERROR",
            ApiError::LoginRequired { .. } => "LOGIN_REQUIRED",
            ApiError::InvalidCredentials => "INVALID_CREDENTIALS",
            ApiError::DatabaseError(_) => "DATABASE_ERROR",
            ApiError::InternalError(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // The anonymous-mutator denial is a redirect, not an error body
        if let ApiError::LoginRequired { next } = &self {
            return Redirect::to(&user::login_redirect(next)).into_response();
        }

        let details = match &self {
            ApiError::Validation { field, .. } => {
                Some(serde_json::json!({ "field": field }))
            }
            _ => None,
        };

        let status = self.status_code();
        let error_response = ApiErrorResponse {
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message: self.to_string(),
                details,
            },
        };

        (status, Json(error_response)).into_response()
    }
}

/// Convert database errors to API errors
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound,
            _ => ApiError::DatabaseError(err.to_string()),
        }
    }
}

/// Convert database errors to API errors
impl From<database::DatabaseError> for ApiError {
    fn from(err: database::DatabaseError) -> Self {
        match err {
            database::DatabaseError::RecordNotFound(_) => ApiError::NotFound,
            other => ApiError::DatabaseError(other.to_string()),
        }
    }
}

impl From<user::UserError> for ApiError {
    fn from(err: user::UserError) -> Self {
        match err {
            user::UserError::InvalidCredentials => ApiError::InvalidCredentials,
            other => ApiError::InternalError(other.to_string()),
        }
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_generic() {
        // The message never names the resource, so ownership denials and
        // genuine misses are indistinguishable.
        assert_eq!(ApiError::NotFound.to_string(), NOT_FOUND_MESSAGE);
        assert_eq!(ApiError::NotFound.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_validation_carries_field() {
        let err = ApiError::Validation {
            field: "slug".to_string(),
            message: "taken".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_record_not_found_maps_to_404() {
        let err: ApiError =
            database::DatabaseError::RecordNotFound("note 1".to_string()).into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        // No resource detail may leak through the conversion
        assert_eq!(err.to_string(), NOT_FOUND_MESSAGE);
    }
}
