//! Repository for the `comic_chapters` table.
//!
//! Reads join `comics` so every row carries its `comic_code`.

use sqlx::PgPool;

use crate::error::DbError;
use crate::generic::{self, apply_set_null, Assignments, ListParams, Relation};
use crate::models::chapter::{
    ChapterRef, ComicChapter, CreateComicChapter, UpdateComicChapter, CHAPTER_SET_NULL_ALLOW,
};
use crate::query::{Condition, Operand};

const RELATION: Relation = Relation {
    entity: "comic chapter",
    table: "comic_chapters",
    columns: "t.id, t.comic_id, c.code AS comic_code, t.chapter, t.version, t.released_at, \
              t.created_at, t.updated_at",
    joins: "JOIN comics c ON c.id = t.comic_id",
    default_order: "released_at",
};

const CONSTRAINT_MESSAGES: &[(&str, &str)] = &[
    (
        "uq_comic_chapters_comic_id_chapter_version",
        "same comic id + chapter + version already exists",
    ),
    ("fk_comic_chapters_comic_id", "comic does not exist"),
    ("comic_id", "comic does not exist"),
];

fn translate(err: DbError) -> DbError {
    err.translate(CONSTRAINT_MESSAGES)
}

/// Provides CRUD operations for comic chapters.
pub struct ComicChapterRepo;

impl ComicChapterRepo {
    /// Insert a new chapter. `released_at` defaults to now when absent.
    pub async fn create(pool: &PgPool, input: &CreateComicChapter) -> Result<ComicChapter, DbError> {
        let mut values: Assignments = vec![
            ("comic_id", Operand::from(input.comic.as_ref().map(|c| c.operand()))),
            ("chapter", Operand::from(&input.chapter)),
            ("version", Operand::from(input.version.as_ref())),
        ];
        if let Some(released_at) = input.released_at {
            values.push(("released_at", released_at.into()));
        }
        generic::insert(pool, &RELATION, &values)
            .await
            .map_err(translate)
    }

    pub async fn find(pool: &PgPool, chapter: &ChapterRef) -> Result<ComicChapter, DbError> {
        generic::find(pool, &RELATION, &chapter.condition()).await
    }

    pub async fn update(
        pool: &PgPool,
        chapter: &ChapterRef,
        input: &UpdateComicChapter,
    ) -> Result<ComicChapter, DbError> {
        let mut sets: Assignments = Vec::new();
        if let Some(comic) = &input.comic {
            sets.push(("comic_id", comic.operand()));
        }
        if let Some(label) = &input.chapter {
            sets.push(("chapter", label.into()));
        }
        if let Some(version) = &input.version {
            sets.push(("version", version.into()));
        }
        if let Some(released_at) = input.released_at {
            sets.push(("released_at", released_at.into()));
        }
        apply_set_null(&mut sets, &input.set_null, CHAPTER_SET_NULL_ALLOW);

        generic::update(pool, &RELATION, &sets, &chapter.condition())
            .await
            .map_err(translate)
    }

    pub async fn delete(pool: &PgPool, chapter: &ChapterRef) -> Result<bool, DbError> {
        let removed = generic::delete(pool, &RELATION, &chapter.condition())
            .await
            .map_err(translate)?;
        Ok(removed > 0)
    }

    pub async fn list(pool: &PgPool, params: &ListParams) -> Result<Vec<ComicChapter>, DbError> {
        generic::list(pool, &RELATION, params).await
    }

    pub async fn count(pool: &PgPool, cond: &Condition) -> Result<i64, DbError> {
        generic::count(pool, &RELATION, cond).await
    }

    pub async fn exists(pool: &PgPool, chapter: &ChapterRef) -> Result<bool, DbError> {
        generic::exists(pool, &RELATION, &chapter.condition()).await
    }
}
