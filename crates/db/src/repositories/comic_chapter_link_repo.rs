//! Repository for the `comic_chapter_links` junction.

use sqlx::PgPool;

use crate::error::DbError;
use crate::generic::{self, Assignments, ListParams, Relation};
use crate::models::chapter::{
    ComicChapterLink, ComicChapterLinkSid, CreateComicChapterLink, UpdateComicChapterLink,
};
use crate::query::{Condition, Operand};

const RELATION: Relation = Relation {
    entity: "comic chapter link",
    table: "comic_chapter_links",
    columns: "t.chapter_id, t.link_id, w.domain AS link_website_domain, \
              l.relative_url AS link_relative_url, t.created_at, t.updated_at",
    joins: "JOIN links l ON l.id = t.link_id JOIN websites w ON w.id = l.website_id",
    default_order: "link_id",
};

const CONSTRAINT_MESSAGES: &[(&str, &str)] = &[
    ("pk_comic_chapter_links", "same link id already exists"),
    ("fk_comic_chapter_links_chapter_id", "chapter does not exist"),
    ("fk_comic_chapter_links_link_id", "link does not exist"),
    ("chapter_id", "chapter does not exist"),
    ("link_id", "link does not exist"),
];

fn translate(err: DbError) -> DbError {
    err.translate(CONSTRAINT_MESSAGES)
}

/// Provides CRUD operations for chapter links.
pub struct ComicChapterLinkRepo;

impl ComicChapterLinkRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateComicChapterLink,
    ) -> Result<ComicChapterLink, DbError> {
        let values: Assignments = vec![
            ("chapter_id", Operand::from(input.chapter.as_ref().map(|c| c.operand()))),
            ("link_id", Operand::from(input.link.as_ref().map(|l| l.operand()))),
        ];
        generic::insert(pool, &RELATION, &values)
            .await
            .map_err(translate)
    }

    pub async fn find(
        pool: &PgPool,
        sid: &ComicChapterLinkSid,
    ) -> Result<ComicChapterLink, DbError> {
        generic::find(pool, &RELATION, &sid.condition()).await
    }

    pub async fn update(
        pool: &PgPool,
        sid: &ComicChapterLinkSid,
        input: &UpdateComicChapterLink,
    ) -> Result<ComicChapterLink, DbError> {
        let mut sets: Assignments = Vec::new();
        if let Some(chapter) = &input.chapter {
            sets.push(("chapter_id", chapter.operand()));
        }
        if let Some(link) = &input.link {
            sets.push(("link_id", link.operand()));
        }
        generic::update(pool, &RELATION, &sets, &sid.condition())
            .await
            .map_err(translate)
    }

    pub async fn delete(pool: &PgPool, sid: &ComicChapterLinkSid) -> Result<bool, DbError> {
        let removed = generic::delete(pool, &RELATION, &sid.condition()).await?;
        Ok(removed > 0)
    }

    pub async fn list(
        pool: &PgPool,
        params: &ListParams,
    ) -> Result<Vec<ComicChapterLink>, DbError> {
        generic::list(pool, &RELATION, params).await
    }

    pub async fn count(pool: &PgPool, cond: &Condition) -> Result<i64, DbError> {
        generic::count(pool, &RELATION, cond).await
    }
}
