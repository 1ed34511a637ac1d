//! Comic routes, including the nested link and chapter collections.

use axum::routing::get;
use axum::Router;

use crate::handlers::{chapter, comic};
use crate::state::AppState;

/// Comic routes mounted at `/comics`.
///
/// ```text
/// GET    /                                              -> list_comics
/// POST   /                                              -> create_comic
/// GET    /{code}                                        -> get_comic
/// HEAD   /{code}                                        -> comic_exists
/// PUT    /{code}                                        -> update_comic
/// DELETE /{code}                                        -> delete_comic
///
/// GET    /{code}/links                                  -> list_comic_links
/// POST   /{code}/links                                  -> create_comic_link
/// GET    /{code}/links/{domain}/{relative_url}          -> get_comic_link
/// PUT    /{code}/links/{domain}/{relative_url}          -> update_comic_link
/// DELETE /{code}/links/{domain}/{relative_url}          -> delete_comic_link
///
/// GET    /{code}/chapters                               -> list_chapters
/// POST   /{code}/chapters                               -> create_chapter
/// GET    /{code}/chapters/{cv}                          -> get_chapter
/// HEAD   /{code}/chapters/{cv}                          -> chapter_exists
/// PUT    /{code}/chapters/{cv}                          -> update_chapter
/// DELETE /{code}/chapters/{cv}                          -> delete_chapter
///
/// GET    /{code}/chapters/{cv}/links                    -> list_chapter_links
/// POST   /{code}/chapters/{cv}/links                    -> create_chapter_link
/// GET    /{code}/chapters/{cv}/links/{domain}/{url}     -> get_chapter_link
/// PUT    /{code}/chapters/{cv}/links/{domain}/{url}     -> update_chapter_link
/// DELETE /{code}/chapters/{cv}/links/{domain}/{url}     -> delete_chapter_link
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(comic::list_comics).post(comic::create_comic))
        .route(
            "/{code}",
            get(comic::get_comic)
                .head(comic::comic_exists)
                .put(comic::update_comic)
                .delete(comic::delete_comic),
        )
        .route(
            "/{code}/links",
            get(comic::list_comic_links).post(comic::create_comic_link),
        )
        .route(
            "/{code}/links/{domain}/{relative_url}",
            get(comic::get_comic_link)
                .put(comic::update_comic_link)
                .delete(comic::delete_comic_link),
        )
        .route(
            "/{code}/chapters",
            get(chapter::list_chapters).post(chapter::create_chapter),
        )
        .route(
            "/{code}/chapters/{cv}",
            get(chapter::get_chapter)
                .head(chapter::chapter_exists)
                .put(chapter::update_chapter)
                .delete(chapter::delete_chapter),
        )
        .route(
            "/{code}/chapters/{cv}/links",
            get(chapter::list_chapter_links).post(chapter::create_chapter_link),
        )
        .route(
            "/{code}/chapters/{cv}/links/{domain}/{relative_url}",
            get(chapter::get_chapter_link)
                .put(chapter::update_chapter_link)
                .delete(chapter::delete_chapter_link),
        )
}
