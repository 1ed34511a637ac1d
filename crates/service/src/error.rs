//! Service error taxonomy.

use comicat_core::error::CoreError;
use comicat_db::error::{ConstraintKind, DbError};

/// The five outcome classes callers branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Validation,
    PermissionDenied,
    BusinessRule,
    Storage,
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// A domain error: not found, validation, permission or business rule.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Opaque storage failure. Details are for logs only.
    #[error("Storage error: {0}")]
    Storage(#[source] sqlx::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::Core(core) => match core {
                CoreError::NotFound { .. } => ErrorKind::NotFound,
                CoreError::Validation(_) => ErrorKind::Validation,
                CoreError::Unauthorized(_) | CoreError::Forbidden(_) => {
                    ErrorKind::PermissionDenied
                }
                CoreError::Conflict(_) => ErrorKind::BusinessRule,
                CoreError::Internal(_) => ErrorKind::Storage,
            },
            ServiceError::Storage(_) => ErrorKind::Storage,
        }
    }
}

impl From<DbError> for ServiceError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity } => CoreError::NotFound { entity }.into(),
            DbError::Rule(message) => CoreError::Conflict(message.to_string()).into(),
            DbError::Constraint {
                kind: ConstraintKind::Check,
                constraint,
                ..
            } => CoreError::Validation(format!("constraint {constraint} violated")).into(),
            DbError::Constraint {
                kind,
                constraint,
                source,
            } => {
                tracing::error!(%kind, %constraint, error = %source, "Untranslated constraint violation");
                ServiceError::Storage(source)
            }
            DbError::Sqlx(source) => {
                tracing::error!(error = %source, "Storage error");
                ServiceError::Storage(source)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn rule_becomes_business_rule() {
        let err = ServiceError::from(DbError::Rule("same code already exists"));
        assert_eq!(err.kind(), ErrorKind::BusinessRule);
        assert_matches!(err, ServiceError::Core(CoreError::Conflict(msg)) if msg == "same code already exists");
    }

    #[test]
    fn check_violation_is_validation() {
        let err = ServiceError::from(DbError::Constraint {
            kind: ConstraintKind::Check,
            constraint: "ck_comics_code".into(),
            source: sqlx::Error::RowNotFound,
        });
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn untranslated_unique_is_storage() {
        let err = ServiceError::from(DbError::Constraint {
            kind: ConstraintKind::Unique,
            constraint: "uq_unknown".into(),
            source: sqlx::Error::RowNotFound,
        });
        assert_eq!(err.kind(), ErrorKind::Storage);
    }

    #[test]
    fn not_found_keeps_entity() {
        let err = ServiceError::from(DbError::NotFound { entity: "comic" });
        assert_matches!(err, ServiceError::Core(CoreError::NotFound { entity: "comic" }));
    }

    #[test]
    fn forbidden_is_permission_denied() {
        let err = ServiceError::from(CoreError::Forbidden("missing admin permission to add comic".into()));
        assert_eq!(err.kind(), ErrorKind::PermissionDenied);
    }
}
