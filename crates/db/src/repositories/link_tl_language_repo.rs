//! Repository for the `link_tl_languages` junction.

use sqlx::PgPool;

use crate::error::DbError;
use crate::generic::{self, Assignments, ListParams, Relation};
use crate::models::link::{
    CreateLinkTlLanguage, LinkTlLanguage, LinkTlLanguageSid, UpdateLinkTlLanguage,
};
use crate::query::{Condition, Operand};

const RELATION: Relation = Relation {
    entity: "link tl language",
    table: "link_tl_languages",
    columns: "t.link_id, t.language_id, l.ietf AS language_ietf, t.created_at, t.updated_at",
    joins: "JOIN languages l ON l.id = t.language_id",
    default_order: "language_id",
};

const CONSTRAINT_MESSAGES: &[(&str, &str)] = &[
    ("pk_link_tl_languages", "same language id already exists"),
    ("fk_link_tl_languages_link_id", "link does not exist"),
    ("fk_link_tl_languages_language_id", "language does not exist"),
    ("link_id", "link does not exist"),
    ("language_id", "language does not exist"),
];

fn translate(err: DbError) -> DbError {
    err.translate(CONSTRAINT_MESSAGES)
}

/// Provides CRUD operations for link translation languages.
pub struct LinkTlLanguageRepo;

impl LinkTlLanguageRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateLinkTlLanguage,
    ) -> Result<LinkTlLanguage, DbError> {
        let values: Assignments = vec![
            ("link_id", Operand::from(input.link.as_ref().map(|l| l.operand()))),
            ("language_id", Operand::from(input.language.as_ref().map(|l| l.operand()))),
        ];
        generic::insert(pool, &RELATION, &values)
            .await
            .map_err(translate)
    }

    pub async fn find(pool: &PgPool, sid: &LinkTlLanguageSid) -> Result<LinkTlLanguage, DbError> {
        generic::find(pool, &RELATION, &sid.condition()).await
    }

    pub async fn update(
        pool: &PgPool,
        sid: &LinkTlLanguageSid,
        input: &UpdateLinkTlLanguage,
    ) -> Result<LinkTlLanguage, DbError> {
        let mut sets: Assignments = Vec::new();
        if let Some(link) = &input.link {
            sets.push(("link_id", link.operand()));
        }
        if let Some(language) = &input.language {
            sets.push(("language_id", language.operand()));
        }
        generic::update(pool, &RELATION, &sets, &sid.condition())
            .await
            .map_err(translate)
    }

    pub async fn delete(pool: &PgPool, sid: &LinkTlLanguageSid) -> Result<bool, DbError> {
        let removed = generic::delete(pool, &RELATION, &sid.condition()).await?;
        Ok(removed > 0)
    }

    pub async fn list(pool: &PgPool, params: &ListParams) -> Result<Vec<LinkTlLanguage>, DbError> {
        generic::list(pool, &RELATION, params).await
    }

    pub async fn count(pool: &PgPool, cond: &Condition) -> Result<i64, DbError> {
        generic::count(pool, &RELATION, cond).await
    }
}
