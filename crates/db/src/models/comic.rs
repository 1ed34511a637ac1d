//! Comic entity model, its link junction, and DTOs.

use comicat_core::error::CoreError;
use comicat_core::types::{DbId, Timestamp};
use comicat_core::validation::{optional, prefixed, require_ref, validate_comic_code};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::chapter::ComicChapter;
use crate::models::link::{Link, LinkRef};
use crate::query::{Condition, Operand, QueryValue};

pub(crate) const TABLE: &str = "comics";

/// A row from the `comics` table. `links` and `chapters` are assembled by
/// the service.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Comic {
    pub id: DbId,
    pub code: String,
    #[sqlx(skip)]
    pub links: Vec<Link>,
    #[sqlx(skip)]
    pub chapters: Vec<ComicChapter>,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateComic {
    pub code: String,
}

impl CreateComic {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_comic_code(&self.code)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateComic {
    pub code: Option<String>,
}

impl UpdateComic {
    pub fn validate(&self) -> Result<(), CoreError> {
        optional(self.code.as_deref(), validate_comic_code)
    }
}

/// Identifies a comic by id or code.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComicRef {
    Id(DbId),
    Code(String),
}

impl ComicRef {
    /// Value usable wherever a `comic_id` is expected.
    pub fn operand(&self) -> Operand {
        match self {
            ComicRef::Id(id) => (*id).into(),
            ComicRef::Code(code) => QueryValue::id_of(TABLE, Condition::eq("code", code)).into(),
        }
    }

    pub fn condition(&self) -> Condition {
        match self {
            ComicRef::Id(id) => Condition::eq("id", *id),
            ComicRef::Code(code) => Condition::eq("code", code),
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        match self {
            ComicRef::Id(_) => Ok(()),
            ComicRef::Code(code) => validate_comic_code(code),
        }
    }
}

// ---------------------------------------------------------------------------
// Comic links
// ---------------------------------------------------------------------------

/// A row from `comic_links` joined with the link's natural key.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct ComicLink {
    pub comic_id: DbId,
    pub link_id: DbId,
    pub link_website_domain: String,
    pub link_relative_url: String,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateComicLink {
    pub comic: Option<ComicRef>,
    pub link: Option<LinkRef>,
}

impl CreateComicLink {
    pub fn validate(&self) -> Result<(), CoreError> {
        require_ref(self.comic.as_ref(), "either comic id or comic code must exist")?;
        require_ref(self.link.as_ref(), "either link id or link sid must exist")?;
        validate_comic_link_refs(self.comic.as_ref(), self.link.as_ref())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateComicLink {
    pub comic: Option<ComicRef>,
    pub link: Option<LinkRef>,
}

impl UpdateComicLink {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_comic_link_refs(self.comic.as_ref(), self.link.as_ref())
    }
}

fn validate_comic_link_refs(
    comic: Option<&ComicRef>,
    link: Option<&LinkRef>,
) -> Result<(), CoreError> {
    prefixed("comic", optional(comic, ComicRef::validate))?;
    prefixed("link", optional(link, LinkRef::validate))
}

/// Identifies one comic/link pairing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ComicLinkSid {
    pub comic: ComicRef,
    pub link: LinkRef,
}

impl ComicLinkSid {
    pub fn condition(&self) -> Condition {
        Condition::eq("comic_id", self.comic.operand())
            .and(Condition::eq("link_id", self.link.operand()))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn code_must_be_exact_length() {
        let input = CreateComic {
            code: "ABC".into(),
        };
        assert_matches!(
            input.validate(),
            Err(CoreError::Validation(msg)) if msg == "code must be 8 characters long"
        );
        assert!(CreateComic { code: "ABCD1234".into() }.validate().is_ok());
    }

    #[test]
    fn empty_update_is_valid() {
        assert!(UpdateComic::default().validate().is_ok());
    }

    #[test]
    fn link_junction_requires_both_sides() {
        assert_matches!(
            CreateComicLink::default().validate(),
            Err(CoreError::Validation(msg)) if msg == "either comic id or comic code must exist"
        );
        let input = CreateComicLink {
            comic: Some(ComicRef::Code("ABCD1234".into())),
            link: None,
        };
        assert_matches!(
            input.validate(),
            Err(CoreError::Validation(msg)) if msg == "either link id or link sid must exist"
        );
    }

    #[test]
    fn nested_comic_code_is_prefixed() {
        let input = UpdateComicLink {
            comic: Some(ComicRef::Code("short".into())),
            link: None,
        };
        assert_matches!(
            input.validate(),
            Err(CoreError::Validation(msg)) if msg == "comic code must be 8 characters long"
        );
    }
}
