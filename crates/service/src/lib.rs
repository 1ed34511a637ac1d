//! Catalog aggregation service.
//!
//! [`CatalogService`] is the only entry point the HTTP layer uses. It gates
//! every mutation on the caller's write capability, validates inputs,
//! normalizes list requests against per-entity policies, and assembles
//! nested collections (translation languages, links, chapters) with batched
//! lookups. Operations are grouped by entity in the submodules.

use comicat_core::listing::{ListPolicy, OrderBy, Pagination};
use comicat_db::generic::ListParams;
use comicat_db::query::Condition;
use comicat_db::DbPool;

pub mod chapter;
pub mod comic;
pub mod error;
pub mod fanout;
pub mod language;
pub mod link;
pub mod website;

pub use error::{ErrorKind, ServiceError, ServiceResult};

/// Ordering and paging requested by a caller, before normalization.
#[derive(Debug, Clone, Default)]
pub struct ListRequest {
    pub order_bys: Vec<OrderBy>,
    pub pagination: Option<Pagination>,
}

impl ListRequest {
    /// Drop disallowed ordering, clamp paging and attach `conditions`.
    fn into_params(self, policy: &ListPolicy, conditions: Condition) -> ListParams {
        ListParams {
            conditions,
            order_bys: policy.normalize_order_bys(self.order_bys),
            pagination: Some(policy.normalize_pagination(self.pagination)),
        }
    }
}

/// Cheap to clone; holds only the pool handle.
#[derive(Debug, Clone)]
pub struct CatalogService {
    pool: DbPool,
}

impl CatalogService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}
