pub mod comics;
pub mod health;
pub mod languages;
pub mod links;
pub mod websites;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /languages                                         list, add
/// /languages/{ietf}                                  get, update, delete
///
/// /websites                                          list, add
/// /websites/{domain}                                 get, update, delete, exists
/// /websites/{domain}/tl-languages                    list, add
/// /websites/{domain}/tl-languages/{ietf}             get, update, delete
///
/// /links                                             list, add
/// /links/{domain}/{relative_url}                     get, update, delete, exists
/// /links/{domain}/{relative_url}/tl-languages        list, add
/// /links/{domain}/{relative_url}/tl-languages/{ietf} get, update, delete
///
/// /comics                                            list, add
/// /comics/{code}                                     get, update, delete, exists
/// /comics/{code}/links                               list, add
/// /comics/{code}/links/{domain}/{relative_url}       get, update, delete
/// /comics/{code}/chapters                            list, add
/// /comics/{code}/chapters/{cv}                       get, update, delete, exists
/// /comics/{code}/chapters/{cv}/links                 list, add
/// /comics/{code}/chapters/{cv}/links/{domain}/{relative_url}
///                                                    get, update, delete
/// ```
///
/// `relative_url` is a single percent-encoded segment (`%2Fseries%2F1`).
/// `cv` is `chapter` or `chapter+version`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/languages", languages::router())
        .nest("/websites", websites::router())
        .nest("/links", links::router())
        .nest("/comics", comics::router())
}
