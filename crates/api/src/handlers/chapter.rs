//! Handlers for `/comics/{code}/chapters` and the chapter link collection.
//!
//! A chapter is addressed by one path segment, `chapter` or
//! `chapter+version`; the first `+` splits the two.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use comicat_core::listing::{COMIC_CHAPTER_LINK_LIST, COMIC_CHAPTER_LIST};
use comicat_db::models::chapter::{
    ChapterRef, ChapterSid, ComicChapterLinkSid, CreateComicChapter, CreateComicChapterLink,
    UpdateComicChapter, UpdateComicChapterLink,
};
use comicat_db::models::comic::ComicRef;
use comicat_db::models::link::LinkRef;

use crate::error::AppResult;
use crate::handlers::link::link_sid;
use crate::handlers::{exists_status, listed, updated};
use crate::middleware::auth::Grant;
use crate::query::ListQuery;
use crate::response::DataResponse;
use crate::state::AppState;

fn chapter_sid(code: String, segment: &str) -> ChapterSid {
    ChapterSid::from_segment(ComicRef::Code(code), segment)
}

fn chapter_link_sid(
    code: String,
    segment: &str,
    domain: String,
    relative_url: String,
) -> ComicChapterLinkSid {
    ComicChapterLinkSid {
        chapter: ChapterRef::Sid(chapter_sid(code, segment)),
        link: LinkRef::Sid(link_sid(domain, relative_url)),
    }
}

// ---------------------------------------------------------------------------
// Chapters
// ---------------------------------------------------------------------------

// ---- GET /comics/{code}/chapters

pub async fn list_chapters(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Query(params): Query<ListQuery>,
) -> AppResult<impl IntoResponse> {
    let limit = params.effective_limit(&COMIC_CHAPTER_LIST);
    let (chapters, total) = tokio::join!(
        state.catalog.list_comic_chapters(&code, params.into_request()),
        state.catalog.count_comic_chapters(&code),
    );
    Ok(listed(chapters?, total, limit))
}

// ---- POST /comics/{code}/chapters

pub async fn create_chapter(
    grant: Grant,
    State(state): State<AppState>,
    Path(code): Path<String>,
    Json(mut input): Json<CreateComicChapter>,
) -> AppResult<impl IntoResponse> {
    input.comic = Some(ComicRef::Code(code));
    let chapter = state.catalog.add_comic_chapter(&grant, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: chapter })))
}

// ---- GET /comics/{code}/chapters/{cv}

pub async fn get_chapter(
    State(state): State<AppState>,
    Path((code, cv)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    let chapter = state
        .catalog
        .get_comic_chapter_by_sid(&chapter_sid(code, &cv))
        .await?;
    Ok(Json(DataResponse { data: chapter }))
}

// ---- HEAD /comics/{code}/chapters/{cv}

pub async fn chapter_exists(
    State(state): State<AppState>,
    Path((code, cv)): Path<(String, String)>,
) -> AppResult<StatusCode> {
    let exists = state
        .catalog
        .comic_chapter_exists(&chapter_sid(code, &cv))
        .await?;
    Ok(exists_status(exists))
}

// ---- PUT /comics/{code}/chapters/{cv}

pub async fn update_chapter(
    grant: Grant,
    State(state): State<AppState>,
    Path((code, cv)): Path<(String, String)>,
    Json(input): Json<UpdateComicChapter>,
) -> AppResult<impl IntoResponse> {
    let sid = chapter_sid(code, &cv);
    updated(
        state
            .catalog
            .update_comic_chapter_by_sid(&grant, &sid, &input)
            .await,
    )
}

// ---- DELETE /comics/{code}/chapters/{cv}

pub async fn delete_chapter(
    grant: Grant,
    State(state): State<AppState>,
    Path((code, cv)): Path<(String, String)>,
) -> AppResult<StatusCode> {
    state
        .catalog
        .delete_comic_chapter_by_sid(&grant, &chapter_sid(code, &cv))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Chapter links
// ---------------------------------------------------------------------------

// ---- GET /comics/{code}/chapters/{cv}/links

pub async fn list_chapter_links(
    State(state): State<AppState>,
    Path((code, cv)): Path<(String, String)>,
    Query(params): Query<ListQuery>,
) -> AppResult<impl IntoResponse> {
    let sid = chapter_sid(code, &cv);
    let limit = params.effective_limit(&COMIC_CHAPTER_LINK_LIST);
    let (links, total) = tokio::join!(
        state
            .catalog
            .list_comic_chapter_links(&sid, params.into_request()),
        state.catalog.count_comic_chapter_links(&sid),
    );
    Ok(listed(links?, total, limit))
}

// ---- POST /comics/{code}/chapters/{cv}/links

pub async fn create_chapter_link(
    grant: Grant,
    State(state): State<AppState>,
    Path((code, cv)): Path<(String, String)>,
    Json(mut input): Json<CreateComicChapterLink>,
) -> AppResult<impl IntoResponse> {
    input.chapter = Some(ChapterRef::Sid(chapter_sid(code, &cv)));
    let pairing = state.catalog.add_comic_chapter_link(&grant, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: pairing })))
}

// ---- GET /comics/{code}/chapters/{cv}/links/{domain}/{relative_url}

pub async fn get_chapter_link(
    State(state): State<AppState>,
    Path((code, cv, domain, relative_url)): Path<(String, String, String, String)>,
) -> AppResult<impl IntoResponse> {
    let sid = chapter_link_sid(code, &cv, domain, relative_url);
    let pairing = state.catalog.get_comic_chapter_link_by_sid(&sid).await?;
    Ok(Json(DataResponse { data: pairing }))
}

// ---- PUT /comics/{code}/chapters/{cv}/links/{domain}/{relative_url}

pub async fn update_chapter_link(
    grant: Grant,
    State(state): State<AppState>,
    Path((code, cv, domain, relative_url)): Path<(String, String, String, String)>,
    Json(input): Json<UpdateComicChapterLink>,
) -> AppResult<impl IntoResponse> {
    let sid = chapter_link_sid(code, &cv, domain, relative_url);
    updated(
        state
            .catalog
            .update_comic_chapter_link_by_sid(&grant, &sid, &input)
            .await,
    )
}

// ---- DELETE /comics/{code}/chapters/{cv}/links/{domain}/{relative_url}

pub async fn delete_chapter_link(
    grant: Grant,
    State(state): State<AppState>,
    Path((code, cv, domain, relative_url)): Path<(String, String, String, String)>,
) -> AppResult<StatusCode> {
    let sid = chapter_link_sid(code, &cv, domain, relative_url);
    state
        .catalog
        .delete_comic_chapter_link_by_sid(&grant, &sid)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
