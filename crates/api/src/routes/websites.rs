use axum::routing::get;
use axum::Router;

use crate::handlers::website;
use crate::state::AppState;

/// Website routes mounted at `/websites`.
///
/// ```text
/// GET    /                                -> list_websites
/// POST   /                                -> create_website
/// GET    /{domain}                        -> get_website
/// HEAD   /{domain}                        -> website_exists
/// PUT    /{domain}                        -> update_website
/// DELETE /{domain}                        -> delete_website
/// GET    /{domain}/tl-languages           -> list_tl_languages
/// POST   /{domain}/tl-languages           -> create_tl_language
/// GET    /{domain}/tl-languages/{ietf}    -> get_tl_language
/// PUT    /{domain}/tl-languages/{ietf}    -> update_tl_language
/// DELETE /{domain}/tl-languages/{ietf}    -> delete_tl_language
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(website::list_websites).post(website::create_website),
        )
        .route(
            "/{domain}",
            get(website::get_website)
                .head(website::website_exists)
                .put(website::update_website)
                .delete(website::delete_website),
        )
        .route(
            "/{domain}/tl-languages",
            get(website::list_tl_languages).post(website::create_tl_language),
        )
        .route(
            "/{domain}/tl-languages/{ietf}",
            get(website::get_tl_language)
                .put(website::update_tl_language)
                .delete(website::delete_tl_language),
        )
}
