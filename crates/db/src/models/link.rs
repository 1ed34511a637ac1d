//! Link entity model, its translation-language junction, and DTOs.
//!
//! A link is a relative URL on a website; its natural key is the website
//! plus the relative URL.

use comicat_core::error::CoreError;
use comicat_core::types::{DbId, Timestamp};
use comicat_core::validation::{
    optional, prefixed, require_ref, validate_relative_url, validate_set_null,
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::language::{Language, LanguageRef};
use crate::models::website::WebsiteRef;
use crate::query::{Condition, Operand, QueryValue};

pub(crate) const TABLE: &str = "links";

/// Columns an update may explicitly set to NULL.
pub const LINK_SET_NULL_ALLOW: &[&str] = &["machine_tl"];

/// A row from `links` joined with the owning website's domain.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Link {
    pub id: DbId,
    pub website_id: DbId,
    pub website_domain: String,
    pub relative_url: String,
    pub machine_tl: Option<bool>,
    #[sqlx(skip)]
    pub tl_languages: Vec<Language>,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateLink {
    pub website: Option<WebsiteRef>,
    pub relative_url: String,
    pub machine_tl: Option<bool>,
}

impl CreateLink {
    pub fn validate(&self) -> Result<(), CoreError> {
        require_ref(
            self.website.as_ref(),
            "either website id or website domain must exist",
        )?;
        prefixed("website", optional(self.website.as_ref(), WebsiteRef::validate))?;
        validate_relative_url(&self.relative_url)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateLink {
    pub website: Option<WebsiteRef>,
    pub relative_url: Option<String>,
    pub machine_tl: Option<bool>,
    #[serde(default)]
    pub set_null: Vec<String>,
}

impl UpdateLink {
    pub fn validate(&self) -> Result<(), CoreError> {
        prefixed("website", optional(self.website.as_ref(), WebsiteRef::validate))?;
        optional(self.relative_url.as_deref(), validate_relative_url)?;
        validate_set_null(&self.set_null, LINK_SET_NULL_ALLOW)
    }
}

/// Natural key of a link.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LinkSid {
    pub website: WebsiteRef,
    pub relative_url: String,
}

impl LinkSid {
    pub fn new(website: WebsiteRef, relative_url: impl Into<String>) -> Self {
        Self {
            website,
            relative_url: relative_url.into(),
        }
    }

    /// Condition over `links` columns.
    pub fn condition(&self) -> Condition {
        Condition::eq("website_id", self.website.operand())
            .and(Condition::eq("relative_url", &self.relative_url))
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        prefixed("website", self.website.validate())?;
        validate_relative_url(&self.relative_url)
    }
}

/// Identifies a link by id or natural key.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkRef {
    Id(DbId),
    Sid(LinkSid),
}

impl LinkRef {
    /// Value usable wherever a `link_id` is expected.
    pub fn operand(&self) -> Operand {
        match self {
            LinkRef::Id(id) => (*id).into(),
            LinkRef::Sid(sid) => QueryValue::id_of(TABLE, sid.condition()).into(),
        }
    }

    /// Condition selecting the link row itself.
    pub fn condition(&self) -> Condition {
        match self {
            LinkRef::Id(id) => Condition::eq("id", *id),
            LinkRef::Sid(sid) => sid.condition(),
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        match self {
            LinkRef::Id(_) => Ok(()),
            LinkRef::Sid(sid) => sid.validate(),
        }
    }
}

// ---------------------------------------------------------------------------
// Link translation languages
// ---------------------------------------------------------------------------

/// A row from `link_tl_languages` joined with the language's IETF tag.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct LinkTlLanguage {
    pub link_id: DbId,
    pub language_id: DbId,
    pub language_ietf: String,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateLinkTlLanguage {
    pub link: Option<LinkRef>,
    pub language: Option<LanguageRef>,
}

impl CreateLinkTlLanguage {
    pub fn validate(&self) -> Result<(), CoreError> {
        require_ref(self.link.as_ref(), "either link id or link sid must exist")?;
        require_ref(
            self.language.as_ref(),
            "either language id or language ietf must exist",
        )?;
        validate_link_tl_language_refs(self.link.as_ref(), self.language.as_ref())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateLinkTlLanguage {
    pub link: Option<LinkRef>,
    pub language: Option<LanguageRef>,
}

impl UpdateLinkTlLanguage {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_link_tl_language_refs(self.link.as_ref(), self.language.as_ref())
    }
}

fn validate_link_tl_language_refs(
    link: Option<&LinkRef>,
    language: Option<&LanguageRef>,
) -> Result<(), CoreError> {
    prefixed("link", optional(link, LinkRef::validate))?;
    prefixed("language", optional(language, LanguageRef::validate))
}

/// Identifies one link/language pairing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LinkTlLanguageSid {
    pub link: LinkRef,
    pub language: LanguageRef,
}

impl LinkTlLanguageSid {
    pub fn condition(&self) -> Condition {
        Condition::eq("link_id", self.link.operand())
            .and(Condition::eq("language_id", self.language.operand()))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::query::Args;

    #[test]
    fn sid_operand_nests_website_lookup() {
        let link = LinkRef::Sid(LinkSid::new(
            WebsiteRef::Domain("example.com".into()),
            "/series/1",
        ));
        let mut args = Args::new();
        assert_eq!(
            link.operand().render(&mut args),
            "(SELECT id FROM links WHERE website_id = (SELECT id FROM websites WHERE domain = $1) AND relative_url = $2)"
        );
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn create_requires_website() {
        let input = CreateLink {
            relative_url: "/a".into(),
            ..CreateLink::default()
        };
        assert_matches!(
            input.validate(),
            Err(CoreError::Validation(msg)) if msg == "either website id or website domain must exist"
        );
    }

    #[test]
    fn nested_website_errors_are_prefixed() {
        let input = UpdateLink {
            website: Some(WebsiteRef::Domain(String::new())),
            ..UpdateLink::default()
        };
        assert_matches!(
            input.validate(),
            Err(CoreError::Validation(msg)) if msg == "website domain cannot be empty"
        );
    }

    #[test]
    fn unknown_set_null_is_rejected() {
        let input = UpdateLink {
            set_null: vec!["relative_url".into()],
            ..UpdateLink::default()
        };
        assert_matches!(
            input.validate(),
            Err(CoreError::Validation(msg)) if msg == "set null relative_url is not recognized"
        );
    }

    #[test]
    fn tl_language_create_requires_link() {
        let input = CreateLinkTlLanguage {
            language: Some(LanguageRef::Ietf("en".into())),
            ..CreateLinkTlLanguage::default()
        };
        assert_matches!(
            input.validate(),
            Err(CoreError::Validation(msg)) if msg == "either link id or link sid must exist"
        );
    }
}
