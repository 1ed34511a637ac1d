//! HTTP handlers, one module per resource.
//!
//! Handlers translate paths and bodies into catalog selectors and inputs,
//! call [`CatalogService`](comicat_service::CatalogService), and shape the
//! response. Authorization and validation live in the service.

pub mod chapter;
pub mod comic;
pub mod language;
pub mod link;
pub mod website;

use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use comicat_service::{ErrorKind, ServiceResult};
use serde::Serialize;

use crate::error::AppResult;
use crate::response::{DataResponse, PAGINATION_LIMIT_HEADER, TOTAL_COUNT_HEADER};

/// Wrap a page of rows and attach the total/limit headers.
///
/// A failed count does not fail the listing; the total is reported as `-1`.
pub(crate) fn listed<T: Serialize>(items: Vec<T>, total: ServiceResult<i64>, limit: i64) -> Response {
    let total = total.unwrap_or_else(|err| {
        tracing::warn!(error = %err, "Count failed, reporting unknown total");
        -1
    });

    let mut headers = HeaderMap::new();
    headers.insert(TOTAL_COUNT_HEADER, HeaderValue::from(total));
    headers.insert(PAGINATION_LIMIT_HEADER, HeaderValue::from(limit));

    (headers, Json(DataResponse { data: items })).into_response()
}

/// 200 with the updated row, or 204 when nothing matched or nothing changed.
pub(crate) fn updated<T: Serialize>(result: ServiceResult<T>) -> AppResult<Response> {
    match result {
        Ok(row) => Ok(Json(DataResponse { data: row }).into_response()),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(StatusCode::NO_CONTENT.into_response()),
        Err(err) => Err(err.into()),
    }
}

/// Status for a HEAD existence check.
pub(crate) fn exists_status(exists: bool) -> StatusCode {
    if exists {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    }
}

#[cfg(test)]
mod tests {
    use comicat_core::error::CoreError;
    use comicat_service::ServiceError;

    use super::*;

    #[test]
    fn update_not_found_is_no_content() {
        let result: ServiceResult<i64> =
            Err(ServiceError::from(CoreError::NotFound { entity: "comic" }));
        let response = updated(result).unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[test]
    fn update_validation_error_propagates() {
        let result: ServiceResult<i64> =
            Err(ServiceError::from(CoreError::Validation("code cannot be empty".into())));
        assert!(updated(result).is_err());
    }

    #[test]
    fn failed_count_reports_unknown_total() {
        let total: ServiceResult<i64> = Err(ServiceError::Storage(sqlx::Error::PoolTimedOut));
        let response = listed(vec![1, 2], total, 10);
        assert_eq!(response.headers()[TOTAL_COUNT_HEADER], "-1");
        assert_eq!(response.headers()[PAGINATION_LIMIT_HEADER], "10");
    }
}
