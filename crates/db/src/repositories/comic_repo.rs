//! Repository for the `comics` table.

use sqlx::PgPool;

use crate::error::DbError;
use crate::generic::{self, Assignments, ListParams, Relation};
use crate::models::comic::{Comic, ComicRef, CreateComic, UpdateComic};
use crate::query::{Condition, Operand};

const RELATION: Relation = Relation {
    entity: "comic",
    table: "comics",
    columns: "t.id, t.code, t.created_at, t.updated_at",
    joins: "",
    default_order: "code",
};

const CONSTRAINT_MESSAGES: &[(&str, &str)] = &[("uq_comics_code", "same code already exists")];

fn translate(err: DbError) -> DbError {
    err.translate(CONSTRAINT_MESSAGES)
}

/// Provides CRUD operations for comics.
pub struct ComicRepo;

impl ComicRepo {
    pub async fn create(pool: &PgPool, input: &CreateComic) -> Result<Comic, DbError> {
        let values: Assignments = vec![("code", Operand::from(&input.code))];
        generic::insert(pool, &RELATION, &values)
            .await
            .map_err(translate)
    }

    pub async fn find(pool: &PgPool, comic: &ComicRef) -> Result<Comic, DbError> {
        generic::find(pool, &RELATION, &comic.condition()).await
    }

    pub async fn update(pool: &PgPool, comic: &ComicRef, input: &UpdateComic) -> Result<Comic, DbError> {
        let mut sets: Assignments = Vec::new();
        if let Some(code) = &input.code {
            sets.push(("code", code.into()));
        }
        generic::update(pool, &RELATION, &sets, &comic.condition())
            .await
            .map_err(translate)
    }

    /// Delete a comic and, by cascade, its chapters and link pairings.
    pub async fn delete(pool: &PgPool, comic: &ComicRef) -> Result<bool, DbError> {
        let removed = generic::delete(pool, &RELATION, &comic.condition())
            .await
            .map_err(translate)?;
        Ok(removed > 0)
    }

    pub async fn list(pool: &PgPool, params: &ListParams) -> Result<Vec<Comic>, DbError> {
        generic::list(pool, &RELATION, params).await
    }

    pub async fn count(pool: &PgPool, cond: &Condition) -> Result<i64, DbError> {
        generic::count(pool, &RELATION, cond).await
    }

    pub async fn exists(pool: &PgPool, comic: &ComicRef) -> Result<bool, DbError> {
        generic::exists(pool, &RELATION, &comic.condition()).await
    }
}
