//! Repository for the `links` table.
//!
//! Reads join `websites` so every row carries its `website_domain`.

use sqlx::PgPool;

use crate::error::DbError;
use crate::generic::{self, apply_set_null, Assignments, ListParams, Relation};
use crate::models::link::{CreateLink, Link, LinkRef, UpdateLink, LINK_SET_NULL_ALLOW};
use crate::query::{Condition, Operand};

const RELATION: Relation = Relation {
    entity: "link",
    table: "links",
    columns: "t.id, t.website_id, w.domain AS website_domain, t.relative_url, t.machine_tl, \
              t.created_at, t.updated_at",
    joins: "JOIN websites w ON w.id = t.website_id",
    default_order: "id",
};

const CONSTRAINT_MESSAGES: &[(&str, &str)] = &[
    (
        "uq_links_website_id_relative_url",
        "same website id + path already exists",
    ),
    ("fk_links_website_id", "website does not exist"),
    ("website_id", "website does not exist"),
];

fn translate(err: DbError) -> DbError {
    err.translate(CONSTRAINT_MESSAGES)
}

/// Provides CRUD operations for links.
pub struct LinkRepo;

impl LinkRepo {
    /// Insert a new link. The website may be given by id or domain.
    pub async fn create(pool: &PgPool, input: &CreateLink) -> Result<Link, DbError> {
        let values: Assignments = vec![
            ("website_id", Operand::from(input.website.as_ref().map(|w| w.operand()))),
            ("relative_url", Operand::from(&input.relative_url)),
            ("machine_tl", Operand::from(input.machine_tl)),
        ];
        generic::insert(pool, &RELATION, &values)
            .await
            .map_err(translate)
    }

    pub async fn find(pool: &PgPool, link: &LinkRef) -> Result<Link, DbError> {
        generic::find(pool, &RELATION, &link.condition()).await
    }

    pub async fn update(pool: &PgPool, link: &LinkRef, input: &UpdateLink) -> Result<Link, DbError> {
        let mut sets: Assignments = Vec::new();
        if let Some(website) = &input.website {
            sets.push(("website_id", website.operand()));
        }
        if let Some(relative_url) = &input.relative_url {
            sets.push(("relative_url", relative_url.into()));
        }
        if let Some(machine_tl) = input.machine_tl {
            sets.push(("machine_tl", machine_tl.into()));
        }
        apply_set_null(&mut sets, &input.set_null, LINK_SET_NULL_ALLOW);

        generic::update(pool, &RELATION, &sets, &link.condition())
            .await
            .map_err(translate)
    }

    pub async fn delete(pool: &PgPool, link: &LinkRef) -> Result<bool, DbError> {
        let removed = generic::delete(pool, &RELATION, &link.condition())
            .await
            .map_err(translate)?;
        Ok(removed > 0)
    }

    pub async fn list(pool: &PgPool, params: &ListParams) -> Result<Vec<Link>, DbError> {
        generic::list(pool, &RELATION, params).await
    }

    pub async fn count(pool: &PgPool, cond: &Condition) -> Result<i64, DbError> {
        generic::count(pool, &RELATION, cond).await
    }

    pub async fn exists(pool: &PgPool, link: &LinkRef) -> Result<bool, DbError> {
        generic::exists(pool, &RELATION, &link.condition()).await
    }
}
