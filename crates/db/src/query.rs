//! Condition DSL for dynamically built queries.
//!
//! A [`Condition`] is a predicate tree; rendering it against an [`Args`]
//! accumulator yields SQL text with `$n` placeholders and the ordered bind
//! values that fill them. Placeholders are numbered in composition order,
//! left to right and depth first, so nested subqueries bind naturally.
//!
//! ```
//! use comicat_db::query::{Args, Condition, QueryValue};
//!
//! let website = QueryValue::id_of("websites", Condition::eq("domain", "example.com"));
//! let cond = Condition::eq("website_id", website).and(Condition::eq("relative_url", "/a"));
//!
//! let mut args = Args::new();
//! assert_eq!(
//!     cond.render(&mut args),
//!     "website_id = (SELECT id FROM websites WHERE domain = $1) AND relative_url = $2"
//! );
//! assert_eq!(args.len(), 2);
//! ```

use comicat_core::listing::OrderBy;
use comicat_core::types::{DbId, Timestamp};
use sqlx::postgres::PgArguments;
use sqlx::query::{Query, QueryAs, QueryScalar};
use sqlx::Postgres;

// ---------------------------------------------------------------------------
// Bind values
// ---------------------------------------------------------------------------

/// Typed bind value for dynamically built queries.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    BigInt(i64),
    Text(String),
    Bool(bool),
    Timestamp(Timestamp),
}

impl From<DbId> for BindValue {
    fn from(v: DbId) -> Self {
        BindValue::BigInt(v)
    }
}

impl From<&str> for BindValue {
    fn from(v: &str) -> Self {
        BindValue::Text(v.to_string())
    }
}

impl From<String> for BindValue {
    fn from(v: String) -> Self {
        BindValue::Text(v)
    }
}

impl From<bool> for BindValue {
    fn from(v: bool) -> Self {
        BindValue::Bool(v)
    }
}

impl From<Timestamp> for BindValue {
    fn from(v: Timestamp) -> Self {
        BindValue::Timestamp(v)
    }
}

/// Collects bind values while a statement is rendered.
#[derive(Debug, Default)]
pub struct Args {
    values: Vec<BindValue>,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `value` and return its placeholder.
    pub fn push(&mut self, value: BindValue) -> String {
        self.values.push(value);
        format!("${}", self.values.len())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[BindValue] {
        &self.values
    }
}

// ---------------------------------------------------------------------------
// Operands
// ---------------------------------------------------------------------------

/// Right-hand side of a comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Value(BindValue),
    /// SQL NULL, rendered literally so column types never clash with an
    /// untyped parameter.
    Null,
    /// Deferred lookup of a key by natural key.
    Query(Box<QueryValue>),
}

impl Operand {
    pub fn render(&self, args: &mut Args) -> String {
        match self {
            Operand::Value(v) => args.push(v.clone()),
            Operand::Null => "NULL".to_string(),
            Operand::Query(q) => q.render(args),
        }
    }
}

impl From<BindValue> for Operand {
    fn from(v: BindValue) -> Self {
        Operand::Value(v)
    }
}

impl From<DbId> for Operand {
    fn from(v: DbId) -> Self {
        Operand::Value(v.into())
    }
}

impl From<&str> for Operand {
    fn from(v: &str) -> Self {
        Operand::Value(v.into())
    }
}

impl From<String> for Operand {
    fn from(v: String) -> Self {
        Operand::Value(v.into())
    }
}

impl From<&String> for Operand {
    fn from(v: &String) -> Self {
        Operand::Value(v.as_str().into())
    }
}

impl From<bool> for Operand {
    fn from(v: bool) -> Self {
        Operand::Value(v.into())
    }
}

impl From<Timestamp> for Operand {
    fn from(v: Timestamp) -> Self {
        Operand::Value(v.into())
    }
}

impl From<QueryValue> for Operand {
    fn from(v: QueryValue) -> Self {
        Operand::Query(Box::new(v))
    }
}

/// `None` becomes SQL NULL.
impl<T: Into<Operand>> From<Option<T>> for Operand {
    fn from(v: Option<T>) -> Self {
        v.map_or(Operand::Null, Into::into)
    }
}

/// Scalar subquery: `(SELECT expression FROM table WHERE conditions)`.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryValue {
    pub table: &'static str,
    pub expression: &'static str,
    /// Stand-in used when the lookup cannot identify a row at all (no
    /// conditions). Bound directly instead of issuing the subquery.
    pub zero_value: BindValue,
    pub conditions: Condition,
}

impl QueryValue {
    /// Look up the surrogate `id` of a row in `table`.
    pub fn id_of(table: &'static str, conditions: Condition) -> Self {
        Self {
            table,
            expression: "id",
            zero_value: BindValue::BigInt(0),
            conditions,
        }
    }

    pub fn render(&self, args: &mut Args) -> String {
        if self.conditions.is_empty() {
            return args.push(self.zero_value.clone());
        }
        let expression = self.expression;
        let table = self.table;
        let conditions = self.conditions.render(args);
        format!("(SELECT {expression} FROM {table} WHERE {conditions})")
    }
}

// ---------------------------------------------------------------------------
// Conditions
// ---------------------------------------------------------------------------

/// Predicate tree for WHERE clauses.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Condition {
    /// Matches everything; renders to nothing.
    #[default]
    Empty,
    /// `field = operand`, or `field IS NULL` for [`Operand::Null`].
    Eq(&'static str, Operand),
    IsNull(&'static str),
    /// `field IS DISTINCT FROM operand`.
    DistinctFrom(&'static str, Operand),
    And(Vec<Condition>),
    Or(Vec<Condition>),
}

impl Condition {
    pub fn eq(field: &'static str, value: impl Into<Operand>) -> Self {
        Condition::Eq(field, value.into())
    }

    pub fn is_null(field: &'static str) -> Self {
        Condition::IsNull(field)
    }

    /// OR of `field = value` over `values`.
    pub fn any_of<V: Into<Operand>>(field: &'static str, values: impl IntoIterator<Item = V>) -> Self {
        Condition::Or(values.into_iter().map(|v| Condition::eq(field, v)).collect())
    }

    /// AND `other` onto `self`, flattening an existing AND group.
    pub fn and(self, other: Condition) -> Self {
        match self {
            Condition::Empty => other,
            Condition::And(mut children) => {
                children.push(other);
                Condition::And(children)
            }
            current => Condition::And(vec![current, other]),
        }
    }

    /// True when rendering would produce no predicate.
    pub fn is_empty(&self) -> bool {
        match self {
            Condition::Empty => true,
            Condition::And(children) | Condition::Or(children) => {
                children.iter().all(Condition::is_empty)
            }
            _ => false,
        }
    }

    fn is_compound(&self) -> bool {
        match self {
            Condition::And(children) | Condition::Or(children) => {
                children.iter().filter(|c| !c.is_empty()).count() > 1
            }
            _ => false,
        }
    }

    /// Render the predicate; empty conditions render to `""`.
    pub fn render(&self, args: &mut Args) -> String {
        match self {
            Condition::Empty => String::new(),
            Condition::Eq(field, Operand::Null) | Condition::IsNull(field) => {
                format!("{field} IS NULL")
            }
            Condition::Eq(field, operand) => format!("{field} = {}", operand.render(args)),
            Condition::DistinctFrom(field, operand) => {
                format!("{field} IS DISTINCT FROM {}", operand.render(args))
            }
            Condition::And(children) => render_group(children, " AND ", args),
            Condition::Or(children) => render_group(children, " OR ", args),
        }
    }

    /// `WHERE <predicate>`, or `""` for an empty condition.
    pub fn where_clause(&self, args: &mut Args) -> String {
        if self.is_empty() {
            return String::new();
        }
        format!("WHERE {}", self.render(args))
    }
}

fn render_group(children: &[Condition], separator: &str, args: &mut Args) -> String {
    let mut parts = Vec::with_capacity(children.len());
    for child in children.iter().filter(|c| !c.is_empty()) {
        let rendered = child.render(args);
        if child.is_compound() {
            parts.push(format!("({rendered})"));
        } else {
            parts.push(rendered);
        }
    }
    parts.join(separator)
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

fn is_identifier(field: &str) -> bool {
    !field.is_empty()
        && field
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

/// `ORDER BY ...` from the requested keys, falling back to `default`.
///
/// Only plain identifiers are rendered; anything else is skipped.
pub fn order_by_clause(order_bys: &[OrderBy], default: &str) -> String {
    let keys: Vec<String> = order_bys
        .iter()
        .filter(|ob| is_identifier(&ob.field))
        .map(|ob| {
            let direction = if ob.desc { "DESC" } else { "ASC" };
            format!("{} {direction}", ob.field)
        })
        .collect();

    if !keys.is_empty() {
        format!("ORDER BY {}", keys.join(", "))
    } else if default.is_empty() {
        String::new()
    } else {
        format!("ORDER BY {default}")
    }
}

// ---------------------------------------------------------------------------
// Binding
// ---------------------------------------------------------------------------

/// Bind a slice of `BindValue` to a sqlx `QueryAs`.
pub fn bind_query_as<'q, O>(
    mut q: QueryAs<'q, Postgres, O, PgArguments>,
    values: &'q [BindValue],
) -> QueryAs<'q, Postgres, O, PgArguments> {
    for val in values {
        match val {
            BindValue::BigInt(v) => q = q.bind(*v),
            BindValue::Text(v) => q = q.bind(v.as_str()),
            BindValue::Bool(v) => q = q.bind(*v),
            BindValue::Timestamp(v) => q = q.bind(*v),
        }
    }
    q
}

/// Bind a slice of `BindValue` to a sqlx `QueryScalar`.
pub fn bind_query_scalar<'q, O>(
    mut q: QueryScalar<'q, Postgres, O, PgArguments>,
    values: &'q [BindValue],
) -> QueryScalar<'q, Postgres, O, PgArguments> {
    for val in values {
        match val {
            BindValue::BigInt(v) => q = q.bind(*v),
            BindValue::Text(v) => q = q.bind(v.as_str()),
            BindValue::Bool(v) => q = q.bind(*v),
            BindValue::Timestamp(v) => q = q.bind(*v),
        }
    }
    q
}

/// Bind a slice of `BindValue` to a plain sqlx `Query`.
pub fn bind_query<'q>(
    mut q: Query<'q, Postgres, PgArguments>,
    values: &'q [BindValue],
) -> Query<'q, Postgres, PgArguments> {
    for val in values {
        match val {
            BindValue::BigInt(v) => q = q.bind(*v),
            BindValue::Text(v) => q = q.bind(v.as_str()),
            BindValue::Bool(v) => q = q.bind(*v),
            BindValue::Timestamp(v) => q = q.bind(*v),
        }
    }
    q
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn render(cond: &Condition) -> (String, Vec<BindValue>) {
        let mut args = Args::new();
        let sql = cond.where_clause(&mut args);
        (sql, args.values().to_vec())
    }

    #[test]
    fn empty_condition_has_no_where() {
        assert_eq!(render(&Condition::Empty), (String::new(), vec![]));
        assert_eq!(render(&Condition::And(vec![])), (String::new(), vec![]));
        assert_eq!(
            render(&Condition::Or(vec![Condition::Empty, Condition::And(vec![])])).0,
            ""
        );
    }

    #[test]
    fn key_value_and_null() {
        let (sql, binds) = render(&Condition::eq("code", "ABCD1234"));
        assert_eq!(sql, "WHERE code = $1");
        assert_eq!(binds, vec![BindValue::Text("ABCD1234".into())]);

        let (sql, binds) = render(&Condition::eq("version", None::<String>));
        assert_eq!(sql, "WHERE version IS NULL");
        assert!(binds.is_empty());
    }

    #[test]
    fn or_group_nested_in_and_is_parenthesized() {
        let cond = Condition::eq("comic_id", 7i64)
            .and(Condition::any_of("link_id", [1i64, 2, 3]));
        let (sql, binds) = render(&cond);
        assert_eq!(
            sql,
            "WHERE comic_id = $1 AND (link_id = $2 OR link_id = $3 OR link_id = $4)"
        );
        assert_eq!(
            binds,
            vec![
                BindValue::BigInt(7),
                BindValue::BigInt(1),
                BindValue::BigInt(2),
                BindValue::BigInt(3)
            ]
        );
    }

    #[test]
    fn single_child_group_is_not_parenthesized() {
        let cond = Condition::And(vec![Condition::Or(vec![Condition::eq("id", 1i64)])]);
        assert_eq!(render(&cond).0, "WHERE id = $1");
    }

    #[test]
    fn nested_subqueries_bind_depth_first() {
        let comic = QueryValue::id_of("comics", Condition::eq("code", "ABCD1234"));
        let chapter = QueryValue::id_of(
            "comic_chapters",
            Condition::And(vec![
                Condition::eq("comic_id", comic),
                Condition::eq("chapter", "1"),
                Condition::eq("version", None::<String>),
            ]),
        );
        let cond = Condition::eq("chapter_id", chapter).and(Condition::eq("link_id", 9i64));

        let (sql, binds) = render(&cond);
        assert_eq!(
            sql,
            "WHERE chapter_id = (SELECT id FROM comic_chapters WHERE \
             comic_id = (SELECT id FROM comics WHERE code = $1) AND chapter = $2 AND version IS NULL) \
             AND link_id = $3"
        );
        assert_eq!(
            binds,
            vec![
                BindValue::Text("ABCD1234".into()),
                BindValue::Text("1".into()),
                BindValue::BigInt(9)
            ]
        );
    }

    #[test]
    fn subquery_without_conditions_binds_zero_value() {
        let lookup = QueryValue::id_of("websites", Condition::Empty);
        let (sql, binds) = render(&Condition::eq("website_id", lookup));
        assert_eq!(sql, "WHERE website_id = $1");
        assert_eq!(binds, vec![BindValue::BigInt(0)]);
    }

    #[test]
    fn distinct_from_renders_for_values_and_null() {
        let cond = Condition::Or(vec![
            Condition::DistinctFrom("name", "Example".into()),
            Condition::DistinctFrom("machine_tl", Operand::Null),
        ]);
        let (sql, _) = render(&cond);
        assert_eq!(
            sql,
            "WHERE name IS DISTINCT FROM $1 OR machine_tl IS DISTINCT FROM NULL"
        );
    }

    #[test]
    fn order_by_falls_back_to_default_and_skips_garbage() {
        assert_eq!(order_by_clause(&[], "domain"), "ORDER BY domain");
        assert_eq!(order_by_clause(&[], ""), "");
        assert_eq!(
            order_by_clause(
                &[OrderBy::desc("released_at"), OrderBy::asc("id; DROP TABLE x")],
                "id"
            ),
            "ORDER BY released_at DESC"
        );
    }
}
