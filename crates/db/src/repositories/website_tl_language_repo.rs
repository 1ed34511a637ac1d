//! Repository for the `website_tl_languages` junction.

use sqlx::PgPool;

use crate::error::DbError;
use crate::generic::{self, Assignments, ListParams, Relation};
use crate::models::website::{
    CreateWebsiteTlLanguage, UpdateWebsiteTlLanguage, WebsiteTlLanguage, WebsiteTlLanguageSid,
};
use crate::query::{Condition, Operand};

const RELATION: Relation = Relation {
    entity: "website tl language",
    table: "website_tl_languages",
    columns: "t.website_id, t.language_id, l.ietf AS language_ietf, t.created_at, t.updated_at",
    joins: "JOIN languages l ON l.id = t.language_id",
    default_order: "language_id",
};

const CONSTRAINT_MESSAGES: &[(&str, &str)] = &[
    ("pk_website_tl_languages", "same language id already exists"),
    ("fk_website_tl_languages_website_id", "website does not exist"),
    ("fk_website_tl_languages_language_id", "language does not exist"),
    ("website_id", "website does not exist"),
    ("language_id", "language does not exist"),
];

fn translate(err: DbError) -> DbError {
    err.translate(CONSTRAINT_MESSAGES)
}

/// Provides CRUD operations for website translation languages.
pub struct WebsiteTlLanguageRepo;

impl WebsiteTlLanguageRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateWebsiteTlLanguage,
    ) -> Result<WebsiteTlLanguage, DbError> {
        let values: Assignments = vec![
            ("website_id", Operand::from(input.website.as_ref().map(|w| w.operand()))),
            ("language_id", Operand::from(input.language.as_ref().map(|l| l.operand()))),
        ];
        generic::insert(pool, &RELATION, &values)
            .await
            .map_err(translate)
    }

    pub async fn find(
        pool: &PgPool,
        sid: &WebsiteTlLanguageSid,
    ) -> Result<WebsiteTlLanguage, DbError> {
        generic::find(pool, &RELATION, &sid.condition()).await
    }

    /// Re-point the pairing at another website or language.
    pub async fn update(
        pool: &PgPool,
        sid: &WebsiteTlLanguageSid,
        input: &UpdateWebsiteTlLanguage,
    ) -> Result<WebsiteTlLanguage, DbError> {
        let mut sets: Assignments = Vec::new();
        if let Some(website) = &input.website {
            sets.push(("website_id", website.operand()));
        }
        if let Some(language) = &input.language {
            sets.push(("language_id", language.operand()));
        }
        generic::update(pool, &RELATION, &sets, &sid.condition())
            .await
            .map_err(translate)
    }

    pub async fn delete(pool: &PgPool, sid: &WebsiteTlLanguageSid) -> Result<bool, DbError> {
        let removed = generic::delete(pool, &RELATION, &sid.condition()).await?;
        Ok(removed > 0)
    }

    pub async fn list(
        pool: &PgPool,
        params: &ListParams,
    ) -> Result<Vec<WebsiteTlLanguage>, DbError> {
        generic::list(pool, &RELATION, params).await
    }

    pub async fn count(pool: &PgPool, cond: &Condition) -> Result<i64, DbError> {
        generic::count(pool, &RELATION, cond).await
    }
}
