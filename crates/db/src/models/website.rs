//! Website entity model, its translation-language junction, and DTOs.

use comicat_core::error::CoreError;
use comicat_core::types::{DbId, Timestamp};
use comicat_core::validation::{
    optional, prefixed, require_ref, validate_domain, validate_set_null, validate_website_name,
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::language::{Language, LanguageRef};
use crate::query::{Condition, Operand, QueryValue};

pub(crate) const TABLE: &str = "websites";

/// Columns an update may explicitly set to NULL.
pub const WEBSITE_SET_NULL_ALLOW: &[&str] = &["machine_tl"];

/// A row from the `websites` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Website {
    pub id: DbId,
    pub domain: String,
    pub name: String,
    pub machine_tl: Option<bool>,
    #[sqlx(skip)]
    pub tl_languages: Vec<Language>,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
}

/// DTO for creating a website.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWebsite {
    pub domain: String,
    pub name: String,
    pub machine_tl: Option<bool>,
}

impl CreateWebsite {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_domain(&self.domain)?;
        validate_website_name(&self.name)
    }
}

/// DTO for updating a website. Absent fields are left untouched; columns
/// named in `set_null` are cleared.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateWebsite {
    pub domain: Option<String>,
    pub name: Option<String>,
    pub machine_tl: Option<bool>,
    #[serde(default)]
    pub set_null: Vec<String>,
}

impl UpdateWebsite {
    pub fn validate(&self) -> Result<(), CoreError> {
        optional(self.domain.as_deref(), validate_domain)?;
        optional(self.name.as_deref(), validate_website_name)?;
        validate_set_null(&self.set_null, WEBSITE_SET_NULL_ALLOW)
    }
}

/// Identifies a website by id or domain.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WebsiteRef {
    Id(DbId),
    Domain(String),
}

impl WebsiteRef {
    /// Value usable wherever a `website_id` is expected.
    pub fn operand(&self) -> Operand {
        match self {
            WebsiteRef::Id(id) => (*id).into(),
            WebsiteRef::Domain(domain) => {
                QueryValue::id_of(TABLE, Condition::eq("domain", domain)).into()
            }
        }
    }

    /// Condition selecting the website row itself.
    pub fn condition(&self) -> Condition {
        match self {
            WebsiteRef::Id(id) => Condition::eq("id", *id),
            WebsiteRef::Domain(domain) => Condition::eq("domain", domain),
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        match self {
            WebsiteRef::Id(_) => Ok(()),
            WebsiteRef::Domain(domain) => validate_domain(domain),
        }
    }
}

// ---------------------------------------------------------------------------
// Website translation languages
// ---------------------------------------------------------------------------

/// A row from `website_tl_languages` joined with the language's IETF tag.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct WebsiteTlLanguage {
    pub website_id: DbId,
    pub language_id: DbId,
    pub language_ietf: String,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateWebsiteTlLanguage {
    pub website: Option<WebsiteRef>,
    pub language: Option<LanguageRef>,
}

impl CreateWebsiteTlLanguage {
    pub fn validate(&self) -> Result<(), CoreError> {
        require_ref(
            self.website.as_ref(),
            "either website id or website domain must exist",
        )?;
        require_ref(
            self.language.as_ref(),
            "either language id or language ietf must exist",
        )?;
        validate_website_tl_language_refs(self.website.as_ref(), self.language.as_ref())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateWebsiteTlLanguage {
    pub website: Option<WebsiteRef>,
    pub language: Option<LanguageRef>,
}

impl UpdateWebsiteTlLanguage {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_website_tl_language_refs(self.website.as_ref(), self.language.as_ref())
    }
}

fn validate_website_tl_language_refs(
    website: Option<&WebsiteRef>,
    language: Option<&LanguageRef>,
) -> Result<(), CoreError> {
    prefixed("website", optional(website, WebsiteRef::validate))?;
    prefixed("language", optional(language, LanguageRef::validate))
}

/// Identifies one website/language pairing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WebsiteTlLanguageSid {
    pub website: WebsiteRef,
    pub language: LanguageRef,
}

impl WebsiteTlLanguageSid {
    pub fn condition(&self) -> Condition {
        Condition::eq("website_id", self.website.operand())
            .and(Condition::eq("language_id", self.language.operand()))
    }
}
