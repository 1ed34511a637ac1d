//! Table accessor shared by every repository.
//!
//! Each function renders one statement for a [`Relation`] and a
//! [`Condition`], binds the collected values and maps the result into the
//! caller's row type. Reads go through the relation's joined projection:
//!
//! ```text
//! SELECT * FROM (SELECT <columns> FROM <table> t <joins>) AS v WHERE ...
//! ```
//!
//! Writes that report the row back wrap the statement in a CTE and select
//! the same projection from it, so joined display fields come back in the
//! same round trip:
//!
//! ```text
//! WITH data AS (INSERT ... RETURNING *) SELECT <columns> FROM data t <joins>
//! ```

use comicat_core::listing::{OrderBy, Pagination, DEFAULT_PAGE_SIZE};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};

use crate::error::DbError;
use crate::query::{
    bind_query, bind_query_as, bind_query_scalar, order_by_clause, Args, BindValue, Condition,
    Operand,
};

/// Column/value pairs for INSERT and UPDATE.
pub type Assignments = Vec<(&'static str, Operand)>;

/// Append `column = NULL` for every requested column in `allowed`,
/// replacing a value already assigned to it.
pub fn apply_set_null(sets: &mut Assignments, requested: &[String], allowed: &[&'static str]) {
    for column in allowed.iter().filter(|c| requested.iter().any(|r| r == *c)) {
        sets.retain(|(existing, _)| existing != column);
        sets.push((*column, Operand::Null));
    }
}

/// Describes how an entity is stored and projected.
#[derive(Debug, Clone, Copy)]
pub struct Relation {
    /// Name used in not-found errors.
    pub entity: &'static str,
    pub table: &'static str,
    /// Projection over the base table (aliased `t`) and its joins.
    pub columns: &'static str,
    pub joins: &'static str,
    /// ORDER BY used when the caller supplies none.
    pub default_order: &'static str,
}

impl Relation {
    fn view(&self) -> String {
        format!(
            "(SELECT {} FROM {} t {}) AS v",
            self.columns, self.table, self.joins
        )
    }

    fn project_cte(&self) -> String {
        format!("SELECT {} FROM data t {}", self.columns, self.joins)
    }
}

/// Conditions, ordering and pagination for a list query.
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    pub conditions: Condition,
    pub order_bys: Vec<OrderBy>,
    /// `None` means the default first page.
    pub pagination: Option<Pagination>,
}

impl ListParams {
    pub fn new(conditions: Condition) -> Self {
        Self {
            conditions,
            ..Self::default()
        }
    }

    /// Every matching row in default order, used by batched lookups.
    pub fn unbounded(conditions: Condition) -> Self {
        Self {
            conditions,
            order_bys: Vec::new(),
            pagination: Some(Pagination::UNBOUNDED),
        }
    }
}

/// Insert one row and return it through the relation's projection.
pub async fn insert<T>(pool: &PgPool, rel: &Relation, values: &[(&'static str, Operand)]) -> Result<T, DbError>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let mut args = Args::new();
    let columns: Vec<&str> = values.iter().map(|(column, _)| *column).collect();
    let placeholders: Vec<String> = values
        .iter()
        .map(|(_, value)| value.render(&mut args))
        .collect();

    let query = format!(
        "WITH data AS (INSERT INTO {} ({}) VALUES ({}) RETURNING *) {}",
        rel.table,
        columns.join(", "),
        placeholders.join(", "),
        rel.project_cte()
    );

    let row = bind_query_as(sqlx::query_as::<_, T>(&query), args.values())
        .fetch_one(pool)
        .await?;
    Ok(row)
}

/// Fetch the single row matching `cond`.
pub async fn find<T>(pool: &PgPool, rel: &Relation, cond: &Condition) -> Result<T, DbError>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let mut args = Args::new();
    let where_clause = cond.where_clause(&mut args);
    let query = format!("SELECT * FROM {} {where_clause}", rel.view());

    bind_query_as(sqlx::query_as::<_, T>(&query), args.values())
        .fetch_optional(pool)
        .await?
        .ok_or(DbError::NotFound { entity: rel.entity })
}

/// Update the rows matching `cond` and return the first of them.
///
/// `updated_at` is always stamped. Rows whose columns already hold the
/// requested values do not match, so a no-op update reports not found.
/// With nothing to set no statement is issued and the current row is
/// returned unchanged.
pub async fn update<T>(
    pool: &PgPool,
    rel: &Relation,
    sets: &[(&'static str, Operand)],
    cond: &Condition,
) -> Result<T, DbError>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    if sets.is_empty() {
        tracing::debug!(entity = rel.entity, "Empty update, returning current row");
        return find(pool, rel, cond).await;
    }

    let mut args = Args::new();
    let assignments: Vec<String> = sets
        .iter()
        .map(|(column, value)| format!("{column} = {}", value.render(&mut args)))
        .collect();
    let would_change = Condition::Or(
        sets.iter()
            .map(|(column, value)| Condition::DistinctFrom(*column, value.clone()))
            .collect(),
    );
    let where_clause = cond.clone().and(would_change).where_clause(&mut args);

    let query = format!(
        "WITH data AS (UPDATE {} SET {}, updated_at = now() {where_clause} RETURNING *) {}",
        rel.table,
        assignments.join(", "),
        rel.project_cte()
    );

    bind_query_as(sqlx::query_as::<_, T>(&query), args.values())
        .fetch_optional(pool)
        .await?
        .ok_or(DbError::NotFound { entity: rel.entity })
}

/// Delete the rows matching `cond`, returning how many were removed.
pub async fn delete(pool: &PgPool, rel: &Relation, cond: &Condition) -> Result<u64, DbError> {
    let mut args = Args::new();
    let where_clause = cond.where_clause(&mut args);
    let query = format!("DELETE FROM {} {where_clause}", rel.table);

    let result = bind_query(sqlx::query(&query), args.values())
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Delete the rows matching `cond` and return the first of them.
pub async fn delete_returning<T>(
    pool: &PgPool,
    rel: &Relation,
    cond: &Condition,
) -> Result<T, DbError>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let mut args = Args::new();
    let where_clause = cond.where_clause(&mut args);
    let query = format!(
        "WITH data AS (DELETE FROM {} {where_clause} RETURNING *) {}",
        rel.table,
        rel.project_cte()
    );

    bind_query_as(sqlx::query_as::<_, T>(&query), args.values())
        .fetch_optional(pool)
        .await?
        .ok_or(DbError::NotFound { entity: rel.entity })
}

/// List rows with ordering and pagination.
///
/// Without explicit ordering the relation's default order applies; without
/// pagination the first page of [`DEFAULT_PAGE_SIZE`] rows is returned.
pub async fn list<T>(pool: &PgPool, rel: &Relation, params: &ListParams) -> Result<Vec<T>, DbError>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let mut args = Args::new();
    let where_clause = params.conditions.where_clause(&mut args);
    let order_clause = order_by_clause(&params.order_bys, rel.default_order);

    let pagination = params
        .pagination
        .unwrap_or(Pagination::new(1, DEFAULT_PAGE_SIZE));
    let page_clause = if pagination.is_unbounded() {
        String::new()
    } else {
        let limit = args.push(BindValue::BigInt(pagination.limit));
        let offset = args.push(BindValue::BigInt(pagination.offset()));
        format!("LIMIT {limit} OFFSET {offset}")
    };

    let query = format!(
        "SELECT * FROM {} {where_clause} {order_clause} {page_clause}",
        rel.view()
    );

    let rows = bind_query_as(sqlx::query_as::<_, T>(&query), args.values())
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Count rows matching `cond`.
pub async fn count(pool: &PgPool, rel: &Relation, cond: &Condition) -> Result<i64, DbError> {
    let mut args = Args::new();
    let where_clause = cond.where_clause(&mut args);
    let query = format!("SELECT COUNT(*)::BIGINT FROM {} {where_clause}", rel.view());

    let count = bind_query_scalar(sqlx::query_scalar::<_, i64>(&query), args.values())
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Whether any row matches `cond`.
pub async fn exists(pool: &PgPool, rel: &Relation, cond: &Condition) -> Result<bool, DbError> {
    let mut args = Args::new();
    let where_clause = cond.where_clause(&mut args);
    let query = format!(
        "SELECT EXISTS(SELECT 1 FROM {} {where_clause})",
        rel.view()
    );

    let exists = bind_query_scalar(sqlx::query_scalar::<_, bool>(&query), args.values())
        .fetch_one(pool)
        .await?;
    Ok(exists)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_null_replaces_assigned_value() {
        let mut sets: Assignments = vec![("machine_tl", true.into()), ("name", "Example".into())];
        apply_set_null(&mut sets, &["machine_tl".to_string()], &["machine_tl"]);
        assert_eq!(
            sets,
            vec![("name", Operand::from("Example")), ("machine_tl", Operand::Null)]
        );
    }

    #[test]
    fn set_null_ignores_columns_outside_allow_list() {
        let mut sets: Assignments = Vec::new();
        apply_set_null(&mut sets, &["name".to_string()], &["machine_tl"]);
        assert!(sets.is_empty());
    }
}
