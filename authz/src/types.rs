//! Core types for the ownership authorization policy.
//!
//! A `Principal` is the "who" of a request, a resource implementing
//! [`OwnedResource`] is the "which", and an [`Operation`] is the "what".
//! The policy maps the three to a [`Decision`].
//!
//! # Security Note
//! Principals must be derived from an authenticated session only. Never
//! construct an `Authenticated` principal from untrusted request data.

use serde::{Deserialize, Serialize};

/// The identity (or absence thereof) associated with an incoming request.
///
/// Resolved once per request by the session layer. The policy never looks
/// identities up itself; it only compares ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Principal {
    /// No session, or a session with no logged-in user.
    Anonymous,
    /// A logged-in user with a stable numeric identifier.
    Authenticated { id: i64 },
}

impl Principal {
    /// Creates a principal for a logged-in user.
    pub fn user(id: i64) -> Self {
        Self::Authenticated { id }
    }

    /// Creates a principal for an unauthenticated request.
    pub fn anonymous() -> Self {
        Self::Anonymous
    }

    /// The user id, if this principal is authenticated.
    pub fn id(&self) -> Option<i64> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated { id } => Some(*id),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }
}

impl std::fmt::Display for Principal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Anonymous => write!(f, "anonymous"),
            Self::Authenticated { id } => write!(f, "user:{}", id),
        }
    }
}

/// The operation a request wants to perform on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    View,
    Edit,
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::View => write!(f, "view"),
            Operation::Edit => write!(f, "edit"),
            Operation::Delete => write!(f, "delete"),
        }
    }
}

/// The outcome of evaluating the policy.
///
/// Denials are ordinary values, not errors. The caller translates each
/// variant into a transport-level response; the policy itself performs no
/// side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    /// Proceed with the operation.
    Allow,
    /// Respond as if the resource does not exist. Chosen over a forbidden
    /// status so that a denial does not confirm the resource exists.
    DenyAsNotFound,
    /// Redirect to the login endpoint, carrying the original request path
    /// as a continuation parameter.
    DenyAsRedirectToLogin,
}

impl Decision {
    pub fn is_allow(&self) -> bool {
        matches!(self, Decision::Allow)
    }
}

/// A stored record that belongs to exactly one user.
///
/// Implemented by the store's note and comment records. The owner id is set
/// once at creation time and never reassigned by edits.
pub trait OwnedResource {
    /// A short label for the resource kind, used in decision logs.
    fn kind(&self) -> &'static str;

    /// The id of the owning user.
    fn owner_id(&self) -> i64;
}
