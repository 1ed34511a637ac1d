//! Bearer-token extractor implementing the catalog's [`Authorizer`].

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use comicat_core::auth::Authorizer;
use comicat_core::error::CoreError;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Permissions held by the caller.
///
/// A request without an `Authorization` header is anonymous: reads succeed
/// and every mutation is denied by the service. A header that is present
/// but malformed, expired or badly signed is rejected with 401.
///
/// ```ignore
/// async fn my_handler(grant: Grant, State(state): State<AppState>) -> AppResult<StatusCode> {
///     state.catalog.delete_comic_by_code(&grant, "ABCD1234").await?;
///     Ok(StatusCode::NO_CONTENT)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Grant {
    /// Token subject, `None` for anonymous callers.
    pub subject: Option<String>,
    pub permissions: Vec<String>,
    namespace: String,
}

impl Grant {
    pub fn anonymous(namespace: impl Into<String>) -> Self {
        Self {
            subject: None,
            permissions: Vec::new(),
            namespace: namespace.into(),
        }
    }
}

impl Authorizer for Grant {
    fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }

    fn permission_key(&self, permission: &str) -> String {
        format!("{}:{permission}", self.namespace)
    }
}

impl FromRequestParts<AppState> for Grant {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jwt = &state.config.jwt;

        let Some(header) = parts.headers.get("authorization") else {
            return Ok(Grant::anonymous(jwt.permission_namespace.as_str()));
        };

        let token = header
            .to_str()
            .ok()
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Invalid Authorization format. Expected: Bearer <token>".into(),
                ))
            })?;

        let claims = validate_token(token, jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        Ok(Grant {
            subject: Some(claims.sub),
            permissions: claims.permissions,
            namespace: jwt.permission_namespace.clone(),
        })
    }
}
