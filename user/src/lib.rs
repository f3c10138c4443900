//! Identity for the Quill backend: password verification and session
//! management.
//!
//! This crate resolves each request to a [`authz::Principal`] — either
//! anonymous or an authenticated user id — via the session layer, and owns
//! the argon2 password hashing used at registration and login. It never
//! makes authorization decisions; that's the `authz` crate's job.

pub mod error;
pub mod password;
pub mod session;

pub use error::{Result, UserError};
pub use password::{hash_password, verify_password};
pub use session::{login_redirect, CurrentPrincipal, SessionKeys, SessionManager, LOGIN_PATH};
