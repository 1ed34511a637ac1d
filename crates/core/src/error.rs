/// Domain error taxonomy shared by the service and HTTP layers.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The selector matched zero rows.
    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    /// Input failed a field rule before reaching storage.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A storage constraint translated into a business rule message,
    /// e.g. "same code already exists".
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The caller lacks the capability required for a mutation.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
