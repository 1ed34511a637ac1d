//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope. List responses also
//! carry their totals in headers, see [`TOTAL_COUNT_HEADER`].

use serde::Serialize;

/// Number of rows the list would return without paging. `-1` when the
/// count could not be computed.
pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

/// Page size actually applied after clamping.
pub const PAGINATION_LIMIT_HEADER: &str = "x-pagination-limit";

/// Standard `{ "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: comic }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
