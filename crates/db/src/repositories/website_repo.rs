//! Repository for the `websites` table.

use sqlx::PgPool;

use crate::error::DbError;
use crate::generic::{self, apply_set_null, Assignments, ListParams, Relation};
use crate::models::website::{
    CreateWebsite, UpdateWebsite, Website, WebsiteRef, WEBSITE_SET_NULL_ALLOW,
};
use crate::query::{Condition, Operand};

const RELATION: Relation = Relation {
    entity: "website",
    table: "websites",
    columns: "t.id, t.domain, t.name, t.machine_tl, t.created_at, t.updated_at",
    joins: "",
    default_order: "domain",
};

const CONSTRAINT_MESSAGES: &[(&str, &str)] = &[("uq_websites_domain", "same domain already exists")];

fn translate(err: DbError) -> DbError {
    err.translate(CONSTRAINT_MESSAGES)
}

/// Provides CRUD operations for websites.
pub struct WebsiteRepo;

impl WebsiteRepo {
    /// Insert a new website, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateWebsite) -> Result<Website, DbError> {
        let values: Assignments = vec![
            ("domain", Operand::from(&input.domain)),
            ("name", Operand::from(&input.name)),
            ("machine_tl", Operand::from(input.machine_tl)),
        ];
        generic::insert(pool, &RELATION, &values)
            .await
            .map_err(translate)
    }

    pub async fn find(pool: &PgPool, website: &WebsiteRef) -> Result<Website, DbError> {
        generic::find(pool, &RELATION, &website.condition()).await
    }

    /// Apply the present fields of `input`, then clear its `set_null`
    /// columns.
    pub async fn update(
        pool: &PgPool,
        website: &WebsiteRef,
        input: &UpdateWebsite,
    ) -> Result<Website, DbError> {
        let mut sets: Assignments = Vec::new();
        if let Some(domain) = &input.domain {
            sets.push(("domain", domain.into()));
        }
        if let Some(name) = &input.name {
            sets.push(("name", name.into()));
        }
        if let Some(machine_tl) = input.machine_tl {
            sets.push(("machine_tl", machine_tl.into()));
        }
        apply_set_null(&mut sets, &input.set_null, WEBSITE_SET_NULL_ALLOW);

        generic::update(pool, &RELATION, &sets, &website.condition())
            .await
            .map_err(translate)
    }

    /// Delete a website and, by cascade, its links. Returns `true` if a row
    /// was removed.
    pub async fn delete(pool: &PgPool, website: &WebsiteRef) -> Result<bool, DbError> {
        let removed = generic::delete(pool, &RELATION, &website.condition())
            .await
            .map_err(translate)?;
        Ok(removed > 0)
    }

    pub async fn delete_returning(pool: &PgPool, website: &WebsiteRef) -> Result<Website, DbError> {
        generic::delete_returning(pool, &RELATION, &website.condition())
            .await
            .map_err(translate)
    }

    pub async fn list(pool: &PgPool, params: &ListParams) -> Result<Vec<Website>, DbError> {
        generic::list(pool, &RELATION, params).await
    }

    pub async fn count(pool: &PgPool, cond: &Condition) -> Result<i64, DbError> {
        generic::count(pool, &RELATION, cond).await
    }

    pub async fn exists(pool: &PgPool, website: &WebsiteRef) -> Result<bool, DbError> {
        generic::exists(pool, &RELATION, &website.condition()).await
    }
}
