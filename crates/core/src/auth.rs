//! Authorization seam.
//!
//! The catalog never inspects tokens itself. Whatever sits in front of it
//! (the HTTP extractor, a test double) implements [`Authorizer`] and the
//! service asks it for capabilities before every mutation.

use crate::error::CoreError;

/// Capability required by every mutating catalog operation.
pub const PERMISSION_WRITE: &str = "write";

/// Answers permission questions for the current caller.
pub trait Authorizer {
    /// Whether the caller holds `permission` (already namespaced).
    fn has_permission(&self, permission: &str) -> bool;

    /// Namespace a raw capability name, e.g. `"write"` -> `"comicat:write"`.
    fn permission_key(&self, permission: &str) -> String;
}

/// Fail closed unless the caller holds the write capability.
///
/// `action` completes the message, e.g. `"add comic"`.
pub fn require_write(auth: &impl Authorizer, action: &str) -> Result<(), CoreError> {
    if auth.has_permission(&auth.permission_key(PERMISSION_WRITE)) {
        Ok(())
    } else {
        Err(CoreError::Forbidden(format!(
            "missing admin permission to {action}"
        )))
    }
}
