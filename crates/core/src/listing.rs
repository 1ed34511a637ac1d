//! Ordering and pagination for list operations.
//!
//! Each listable entity has a [`ListPolicy`]: which fields may be sorted on,
//! how many sort keys are honoured, and the default/maximum page size.
//! Requests are normalized against the policy and never rejected.

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Sortable fields every entity shares.
pub const GENERIC_ORDER_BY_ALLOW: &[&str] = &["created_at", "updated_at"];

/// Default page size when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Largest page size a caller can request.
pub const MAX_PAGE_SIZE: i64 = 50;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A single sort key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub field: String,
    pub desc: bool,
}

impl OrderBy {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            desc: false,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            desc: true,
        }
    }

    /// Parse a comma separated list such as `"code,-created_at"`.
    ///
    /// A leading `-` sorts descending. Blank entries are skipped.
    pub fn parse_list(raw: &str) -> Vec<OrderBy> {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| match s.strip_prefix('-') {
                Some(field) => OrderBy::desc(field.trim()),
                None => OrderBy::asc(s),
            })
            .filter(|ob| !ob.field.is_empty())
            .collect()
    }
}

/// 1-indexed page number plus page size.
///
/// A `limit` of zero means "no limit"; only internal batched lookups use it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
}

impl Pagination {
    /// Every matching row, no LIMIT/OFFSET.
    pub const UNBOUNDED: Pagination = Pagination { page: 0, limit: 0 };

    pub fn new(page: i64, limit: i64) -> Self {
        Self { page, limit }
    }

    pub fn is_unbounded(&self) -> bool {
        self.limit <= 0
    }

    /// Row offset for this page: `(page - 1) * limit`, saturating at `i64::MAX`.
    pub fn offset(&self) -> i64 {
        (self.page.max(1) - 1).saturating_mul(self.limit.max(0))
    }
}

/// Per-entity list configuration.
#[derive(Debug, Clone, Copy)]
pub struct ListPolicy {
    /// Entity specific sortable fields; [`GENERIC_ORDER_BY_ALLOW`] is added on top.
    pub fields: &'static [&'static str],
    pub order_bys_max: usize,
    pub pagination_def: i64,
    pub pagination_max: i64,
}

impl ListPolicy {
    const fn new(fields: &'static [&'static str]) -> Self {
        Self {
            fields,
            order_bys_max: 3,
            pagination_def: DEFAULT_PAGE_SIZE,
            pagination_max: MAX_PAGE_SIZE,
        }
    }

    const fn with_order_bys_max(mut self, max: usize) -> Self {
        self.order_bys_max = max;
        self
    }

    /// Whether `field` may appear in ORDER BY for this entity.
    pub fn allows(&self, field: &str) -> bool {
        self.fields.contains(&field) || GENERIC_ORDER_BY_ALLOW.contains(&field)
    }

    /// Drop unknown fields, then keep at most `order_bys_max` entries.
    pub fn normalize_order_bys(&self, order_bys: Vec<OrderBy>) -> Vec<OrderBy> {
        order_bys
            .into_iter()
            .filter(|ob| self.allows(&ob.field))
            .take(self.order_bys_max)
            .collect()
    }

    /// Fill in defaults and clamp the page size to the policy maximum.
    pub fn normalize_pagination(&self, requested: Option<Pagination>) -> Pagination {
        let Some(p) = requested else {
            return Pagination::new(1, self.pagination_def);
        };
        Pagination {
            page: p.page.max(1),
            limit: clamp_limit(Some(p.limit), self.pagination_def, self.pagination_max),
        }
    }
}

/// Clamp a user-provided limit; non-positive values fall back to `default`.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.filter(|l| *l > 0).unwrap_or(default).min(max)
}

// ---------------------------------------------------------------------------
// Policies
// ---------------------------------------------------------------------------

pub const LANGUAGE_LIST: ListPolicy = ListPolicy::new(&["id", "ietf", "name"]);

pub const WEBSITE_LIST: ListPolicy = ListPolicy::new(&["id", "domain", "name", "machine_tl"]);

pub const WEBSITE_TL_LANGUAGE_LIST: ListPolicy = ListPolicy::new(&["language_id"]);

pub const LINK_LIST: ListPolicy =
    ListPolicy::new(&["id", "website_id", "relative_url", "machine_tl"]);

pub const LINK_TL_LANGUAGE_LIST: ListPolicy = ListPolicy::new(&["language_id"]);

pub const COMIC_LIST: ListPolicy = ListPolicy::new(&["id", "code"]);

pub const COMIC_LINK_LIST: ListPolicy = ListPolicy::new(&["link_id"]);

pub const COMIC_CHAPTER_LIST: ListPolicy =
    ListPolicy::new(&["id", "comic_id", "chapter", "version", "released_at"])
        .with_order_bys_max(5);

pub const COMIC_CHAPTER_LINK_LIST: ListPolicy = ListPolicy::new(&["link_id"]);

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
