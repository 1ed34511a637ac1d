//! Comic chapter entity model, its link junction, and DTOs.
//!
//! A chapter's natural key is its comic, chapter label and optional
//! version; two chapters with the same label but no version collide.

use comicat_core::error::CoreError;
use comicat_core::types::{DbId, Timestamp};
use comicat_core::validation::{
    optional, prefixed, require_ref, validate_chapter, validate_set_null, validate_version,
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::comic::ComicRef;
use crate::models::link::{Link, LinkRef};
use crate::query::{Condition, Operand, QueryValue};

pub(crate) const TABLE: &str = "comic_chapters";

/// Columns an update may explicitly set to NULL.
pub const CHAPTER_SET_NULL_ALLOW: &[&str] = &["version"];

/// A row from `comic_chapters` joined with the comic's code.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct ComicChapter {
    pub id: DbId,
    pub comic_id: DbId,
    pub comic_code: String,
    pub chapter: String,
    pub version: Option<String>,
    pub released_at: Timestamp,
    #[sqlx(skip)]
    pub links: Vec<Link>,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateComicChapter {
    pub comic: Option<ComicRef>,
    pub chapter: String,
    pub version: Option<String>,
    pub released_at: Option<Timestamp>,
}

impl CreateComicChapter {
    pub fn validate(&self) -> Result<(), CoreError> {
        require_ref(self.comic.as_ref(), "either comic id or comic code must exist")?;
        prefixed("comic", optional(self.comic.as_ref(), ComicRef::validate))?;
        validate_chapter(&self.chapter)?;
        optional(self.version.as_deref(), validate_version)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateComicChapter {
    pub comic: Option<ComicRef>,
    pub chapter: Option<String>,
    pub version: Option<String>,
    pub released_at: Option<Timestamp>,
    #[serde(default)]
    pub set_null: Vec<String>,
}

impl UpdateComicChapter {
    pub fn validate(&self) -> Result<(), CoreError> {
        prefixed("comic", optional(self.comic.as_ref(), ComicRef::validate))?;
        optional(self.chapter.as_deref(), validate_chapter)?;
        optional(self.version.as_deref(), validate_version)?;
        validate_set_null(&self.set_null, CHAPTER_SET_NULL_ALLOW)
    }
}

/// Natural key of a chapter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChapterSid {
    pub comic: ComicRef,
    pub chapter: String,
    pub version: Option<String>,
}

impl ChapterSid {
    pub fn new(comic: ComicRef, chapter: impl Into<String>, version: Option<String>) -> Self {
        Self {
            comic,
            chapter: chapter.into(),
            version,
        }
    }

    /// Parse a `chapter+version` path segment. The first `+` separates the
    /// two; no `+` (or an empty version) means no version.
    pub fn from_segment(comic: ComicRef, segment: &str) -> Self {
        match segment.split_once('+') {
            Some((chapter, version)) if !version.is_empty() => {
                Self::new(comic, chapter, Some(version.to_string()))
            }
            Some((chapter, _)) => Self::new(comic, chapter, None),
            None => Self::new(comic, segment, None),
        }
    }

    /// Condition over `comic_chapters` columns. A missing version matches
    /// `version IS NULL`.
    pub fn condition(&self) -> Condition {
        Condition::eq("comic_id", self.comic.operand())
            .and(Condition::eq("chapter", &self.chapter))
            .and(Condition::eq("version", self.version.as_ref()))
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        prefixed("comic", self.comic.validate())?;
        validate_chapter(&self.chapter)?;
        optional(self.version.as_deref(), validate_version)
    }
}

/// Identifies a chapter by id or natural key.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChapterRef {
    Id(DbId),
    Sid(ChapterSid),
}

impl ChapterRef {
    /// Value usable wherever a `chapter_id` is expected.
    pub fn operand(&self) -> Operand {
        match self {
            ChapterRef::Id(id) => (*id).into(),
            ChapterRef::Sid(sid) => QueryValue::id_of(TABLE, sid.condition()).into(),
        }
    }

    pub fn condition(&self) -> Condition {
        match self {
            ChapterRef::Id(id) => Condition::eq("id", *id),
            ChapterRef::Sid(sid) => sid.condition(),
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        match self {
            ChapterRef::Id(_) => Ok(()),
            ChapterRef::Sid(sid) => prefixed("comic chapter", sid.validate()),
        }
    }
}

// ---------------------------------------------------------------------------
// Chapter links
// ---------------------------------------------------------------------------

/// A row from `comic_chapter_links` joined with the link's natural key.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct ComicChapterLink {
    pub chapter_id: DbId,
    pub link_id: DbId,
    pub link_website_domain: String,
    pub link_relative_url: String,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateComicChapterLink {
    pub chapter: Option<ChapterRef>,
    pub link: Option<LinkRef>,
}

impl CreateComicChapterLink {
    pub fn validate(&self) -> Result<(), CoreError> {
        require_ref(
            self.chapter.as_ref(),
            "either chapter id or chapter sid must exist",
        )?;
        require_ref(self.link.as_ref(), "either link id or link sid must exist")?;
        validate_chapter_link_refs(self.chapter.as_ref(), self.link.as_ref())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateComicChapterLink {
    pub chapter: Option<ChapterRef>,
    pub link: Option<LinkRef>,
}

impl UpdateComicChapterLink {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_chapter_link_refs(self.chapter.as_ref(), self.link.as_ref())
    }
}

fn validate_chapter_link_refs(
    chapter: Option<&ChapterRef>,
    link: Option<&LinkRef>,
) -> Result<(), CoreError> {
    optional(chapter, ChapterRef::validate)?;
    prefixed("link", optional(link, LinkRef::validate))
}

/// Identifies one chapter/link pairing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ComicChapterLinkSid {
    pub chapter: ChapterRef,
    pub link: LinkRef,
}

impl ComicChapterLinkSid {
    pub fn condition(&self) -> Condition {
        Condition::eq("chapter_id", self.chapter.operand())
            .and(Condition::eq("link_id", self.link.operand()))
    }
}
