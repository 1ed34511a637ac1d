//! Repository for the `languages` table.

use sqlx::PgPool;

use crate::error::DbError;
use crate::generic::{self, Assignments, ListParams, Relation};
use crate::models::language::{CreateLanguage, Language, LanguageRef, UpdateLanguage};
use crate::query::{Condition, Operand};

const RELATION: Relation = Relation {
    entity: "language",
    table: "languages",
    columns: "t.id, t.ietf, t.name, t.created_at, t.updated_at",
    joins: "",
    default_order: "ietf",
};

const CONSTRAINT_MESSAGES: &[(&str, &str)] = &[
    ("uq_languages_ietf", "same ietf already exists"),
    ("fk_website_tl_languages_language_id", "language is still in use"),
    ("fk_link_tl_languages_language_id", "language is still in use"),
];

fn translate(err: DbError) -> DbError {
    err.translate(CONSTRAINT_MESSAGES)
}

/// Provides CRUD operations for languages.
pub struct LanguageRepo;

impl LanguageRepo {
    /// Insert a new language, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateLanguage) -> Result<Language, DbError> {
        let values: Assignments = vec![
            ("ietf", Operand::from(&input.ietf)),
            ("name", Operand::from(&input.name)),
        ];
        generic::insert(pool, &RELATION, &values)
            .await
            .map_err(translate)
    }

    pub async fn find(pool: &PgPool, language: &LanguageRef) -> Result<Language, DbError> {
        generic::find(pool, &RELATION, &language.condition()).await
    }

    /// Apply the present fields of `input`. Returns the current row when
    /// nothing is present.
    pub async fn update(
        pool: &PgPool,
        language: &LanguageRef,
        input: &UpdateLanguage,
    ) -> Result<Language, DbError> {
        let mut sets: Assignments = Vec::new();
        if let Some(ietf) = &input.ietf {
            sets.push(("ietf", ietf.into()));
        }
        if let Some(name) = &input.name {
            sets.push(("name", name.into()));
        }
        generic::update(pool, &RELATION, &sets, &language.condition())
            .await
            .map_err(translate)
    }

    /// Delete a language. Returns `true` if a row was removed.
    ///
    /// Fails with a rule error while websites or links still reference it.
    pub async fn delete(pool: &PgPool, language: &LanguageRef) -> Result<bool, DbError> {
        let removed = generic::delete(pool, &RELATION, &language.condition())
            .await
            .map_err(translate)?;
        Ok(removed > 0)
    }

    pub async fn list(pool: &PgPool, params: &ListParams) -> Result<Vec<Language>, DbError> {
        generic::list(pool, &RELATION, params).await
    }

    pub async fn count(pool: &PgPool, cond: &Condition) -> Result<i64, DbError> {
        generic::count(pool, &RELATION, cond).await
    }
}
