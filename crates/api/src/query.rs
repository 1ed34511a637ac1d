//! Shared query parameter types for API handlers.

use comicat_core::listing::{ListPolicy, OrderBy, Pagination};
use comicat_service::ListRequest;
use serde::Deserialize;

/// List parameters (`?page=&limit=&order_by=`).
///
/// `order_by` is a comma separated field list, `-` prefix for descending:
/// `?order_by=-created_at,code`. Unknown fields are dropped and limits are
/// clamped by the service, so no combination is rejected.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub order_by: Option<String>,
}

impl ListQuery {
    /// Page size that will be applied under `policy`.
    pub fn effective_limit(&self, policy: &ListPolicy) -> i64 {
        policy.normalize_pagination(self.pagination()).limit
    }

    pub fn into_request(self) -> ListRequest {
        ListRequest {
            pagination: self.pagination(),
            order_bys: self
                .order_by
                .as_deref()
                .map(OrderBy::parse_list)
                .unwrap_or_default(),
        }
    }

    fn pagination(&self) -> Option<Pagination> {
        if self.page.is_none() && self.limit.is_none() {
            return None;
        }
        Some(Pagination::new(
            self.page.unwrap_or(1),
            self.limit.unwrap_or(0),
        ))
    }
}
