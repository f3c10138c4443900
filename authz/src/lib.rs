//! Ownership-based authorization for the Quill backend.
//!
//! This crate decides whether a request may mutate a stored resource. The
//! rule is deliberately small: anyone may view, only the owner may edit or
//! delete, and the two denial outcomes differ by who is asking:
//!
//! 1. **Request arrives** at the API layer
//! 2. **Session resolution** yields a [`Principal`]
//! 3. **Resource lookup** fetches the target record (a missing record
//!    short-circuits to the same not-found response as a denial)
//! 4. **[`authorize`]** maps (principal, resource, operation) to a
//!    [`Decision`]
//! 5. The handler translates the decision into a response
//!
//! # Security Architecture
//!
//! A non-owner is denied with [`Decision::DenyAsNotFound`] rather than a
//! forbidden status. A forbidden response would confirm the resource
//! exists; not-found does not. Callers must keep the not-found body
//! identical to the one used for genuinely missing resources, otherwise
//! the property is lost at the transport layer.
//!
//! The policy is a pure function: no I/O, no shared mutable state, no
//! errors. It may be invoked concurrently without coordination, and it does
//! not guarantee atomicity between the decision and a subsequent mutation —
//! callers that need stricter guarantees must read `owner_id` within the
//! same transaction as the mutation.

pub mod types;

pub use types::{Decision, Operation, OwnedResource, Principal};

use tracing::debug;

/// Decides whether `principal` may perform `operation` on `resource`.
///
/// Viewing is unrestricted. Edits and deletes are allowed only for the
/// owner; anonymous requesters are redirected to login, and authenticated
/// non-owners are told the resource does not exist.
///
/// # Example
///
/// ```rust
/// use authz::{authorize, Decision, Operation, OwnedResource, Principal};
///
/// struct Note { owner_id: i64 }
/// impl OwnedResource for Note {
///     fn kind(&self) -> &'static str { "note" }
///     fn owner_id(&self) -> i64 { self.owner_id }
/// }
///
/// let note = Note { owner_id: 7 };
/// assert_eq!(authorize(&Principal::user(7), &note, Operation::Edit), Decision::Allow);
/// assert_eq!(authorize(&Principal::user(8), &note, Operation::Edit), Decision::DenyAsNotFound);
/// ```
pub fn authorize(
    principal: &Principal,
    resource: &dyn OwnedResource,
    operation: Operation,
) -> Decision {
    let decision = match operation {
        Operation::View => Decision::Allow,
        Operation::Edit | Operation::Delete => match principal {
            Principal::Anonymous => Decision::DenyAsRedirectToLogin,
            Principal::Authenticated { id } if *id != resource.owner_id() => {
                Decision::DenyAsNotFound
            }
            Principal::Authenticated { .. } => Decision::Allow,
        },
    };

    debug!(
        "authz: {} {} {} owned by user:{} -> {:?}",
        principal,
        operation,
        resource.kind(),
        resource.owner_id(),
        decision
    );

    decision
}

/// Decides whether `principal` may create a new owned resource.
///
/// Creation has no target resource yet, so the only check is
/// authentication: anonymous requesters are redirected to login.
pub fn authorize_create(principal: &Principal) -> Decision {
    match principal {
        Principal::Anonymous => Decision::DenyAsRedirectToLogin,
        Principal::Authenticated { .. } => Decision::Allow,
    }
}

/// Whether a page rendered for `principal` should include a submission
/// form. Anonymous visitors can read but get no form.
pub fn shows_submission_form(principal: &Principal) -> bool {
    principal.is_authenticated()
}
