//! Language entity model and DTOs.

use comicat_core::error::CoreError;
use comicat_core::types::{DbId, Timestamp};
use comicat_core::validation::{optional, validate_ietf, validate_language_name};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::query::{Condition, Operand, QueryValue};

pub(crate) const TABLE: &str = "languages";

/// A row from the `languages` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Language {
    pub id: DbId,
    pub ietf: String,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
}

/// DTO for creating a language.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLanguage {
    pub ietf: String,
    pub name: String,
}

impl CreateLanguage {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_ietf(&self.ietf)?;
        validate_language_name(&self.name)
    }
}

/// DTO for updating a language. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateLanguage {
    pub ietf: Option<String>,
    pub name: Option<String>,
}

impl UpdateLanguage {
    pub fn validate(&self) -> Result<(), CoreError> {
        optional(self.ietf.as_deref(), validate_ietf)?;
        optional(self.name.as_deref(), validate_language_name)
    }
}

/// Identifies a language by id or IETF tag.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LanguageRef {
    Id(DbId),
    Ietf(String),
}

impl LanguageRef {
    /// Value usable wherever a `language_id` is expected.
    pub fn operand(&self) -> Operand {
        match self {
            LanguageRef::Id(id) => (*id).into(),
            LanguageRef::Ietf(ietf) => {
                QueryValue::id_of(TABLE, Condition::eq("ietf", ietf)).into()
            }
        }
    }

    /// Condition selecting the language row itself.
    pub fn condition(&self) -> Condition {
        match self {
            LanguageRef::Id(id) => Condition::eq("id", *id),
            LanguageRef::Ietf(ietf) => Condition::eq("ietf", ietf),
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        match self {
            LanguageRef::Id(_) => Ok(()),
            LanguageRef::Ietf(ietf) => validate_ietf(ietf),
        }
    }
}
