//! Storage error normalization.
//!
//! Backend failures are classified once, here, so repositories and the
//! service never inspect SQLSTATE codes themselves.

use std::fmt;

use sqlx::postgres::PgDatabaseError;

/// Category of a violated constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    /// SQLSTATE 23514.
    Check,
    /// SQLSTATE 23503.
    ForeignKey,
    /// SQLSTATE 23505.
    Unique,
    /// SQLSTATE 23502; the "constraint" is the column name. Raised when a
    /// natural-key lookup for a required reference finds nothing.
    NotNull,
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConstraintKind::Check => "check",
            ConstraintKind::ForeignKey => "foreign key",
            ConstraintKind::Unique => "unique",
            ConstraintKind::NotNull => "not null",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// The statement matched zero rows.
    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    /// A constraint without a known domain message.
    #[error("{kind} constraint {constraint} violated")]
    Constraint {
        kind: ConstraintKind,
        constraint: String,
        #[source]
        source: sqlx::Error,
    },

    /// A constraint translated into a domain message by a repository.
    #[error("{0}")]
    Rule(&'static str),

    #[error(transparent)]
    Sqlx(sqlx::Error),
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        let classified = match &err {
            sqlx::Error::Database(db_err) => {
                let kind = match db_err.code().as_deref() {
                    Some("23514") => Some(ConstraintKind::Check),
                    Some("23503") => Some(ConstraintKind::ForeignKey),
                    Some("23505") => Some(ConstraintKind::Unique),
                    Some("23502") => Some(ConstraintKind::NotNull),
                    _ => None,
                };
                kind.map(|kind| {
                    let constraint = match kind {
                        ConstraintKind::NotNull => db_err
                            .try_downcast_ref::<PgDatabaseError>()
                            .and_then(PgDatabaseError::column),
                        _ => db_err.constraint(),
                    };
                    (kind, constraint.unwrap_or_default().to_string())
                })
            }
            _ => None,
        };

        match classified {
            Some((kind, constraint)) => DbError::Constraint {
                kind,
                constraint,
                source: err,
            },
            None => DbError::Sqlx(err),
        }
    }
}

impl DbError {
    /// Replace a constraint violation with the domain message registered
    /// for its name in `messages`; anything else passes through.
    pub fn translate(self, messages: &[(&str, &'static str)]) -> Self {
        match self {
            DbError::Constraint { ref constraint, .. } => {
                match messages.iter().find(|(name, _)| *name == constraint.as_str()) {
                    Some((_, message)) => DbError::Rule(*message),
                    None => self,
                }
            }
            other => other,
        }
    }
}
