use axum::routing::get;
use axum::Router;

use crate::handlers::language;
use crate::state::AppState;

/// Language routes mounted at `/languages`.
///
/// ```text
/// GET    /          -> list_languages
/// POST   /          -> create_language
/// GET    /{ietf}    -> get_language
/// PUT    /{ietf}    -> update_language
/// DELETE /{ietf}    -> delete_language
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(language::list_languages).post(language::create_language),
        )
        .route(
            "/{ietf}",
            get(language::get_language)
                .put(language::update_language)
                .delete(language::delete_language),
        )
}
