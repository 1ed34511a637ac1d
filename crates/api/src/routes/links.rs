use axum::routing::get;
use axum::Router;

use crate::handlers::link;
use crate::state::AppState;

/// Link routes mounted at `/links`.
///
/// ```text
/// GET    /                                              -> list_links
/// POST   /                                              -> create_link
/// GET    /{domain}/{relative_url}                       -> get_link
/// HEAD   /{domain}/{relative_url}                       -> link_exists
/// PUT    /{domain}/{relative_url}                       -> update_link
/// DELETE /{domain}/{relative_url}                       -> delete_link
/// GET    /{domain}/{relative_url}/tl-languages          -> list_tl_languages
/// POST   /{domain}/{relative_url}/tl-languages          -> create_tl_language
/// GET    /{domain}/{relative_url}/tl-languages/{ietf}   -> get_tl_language
/// PUT    /{domain}/{relative_url}/tl-languages/{ietf}   -> update_tl_language
/// DELETE /{domain}/{relative_url}/tl-languages/{ietf}   -> delete_tl_language
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(link::list_links).post(link::create_link))
        .route(
            "/{domain}/{relative_url}",
            get(link::get_link)
                .head(link::link_exists)
                .put(link::update_link)
                .delete(link::delete_link),
        )
        .route(
            "/{domain}/{relative_url}/tl-languages",
            get(link::list_tl_languages).post(link::create_tl_language),
        )
        .route(
            "/{domain}/{relative_url}/tl-languages/{ietf}",
            get(link::get_tl_language)
                .put(link::update_tl_language)
                .delete(link::delete_tl_language),
        )
}
