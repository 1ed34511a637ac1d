//! Handlers for `/comics` and the comic link collection.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use comicat_core::listing::{COMIC_LINK_LIST, COMIC_LIST};
use comicat_db::models::comic::{
    ComicLinkSid, ComicRef, CreateComic, CreateComicLink, UpdateComic, UpdateComicLink,
};
use comicat_db::models::link::LinkRef;

use crate::error::AppResult;
use crate::handlers::link::link_sid;
use crate::handlers::{exists_status, listed, updated};
use crate::middleware::auth::Grant;
use crate::query::ListQuery;
use crate::response::DataResponse;
use crate::state::AppState;

fn comic_link_sid(code: String, domain: String, relative_url: String) -> ComicLinkSid {
    ComicLinkSid {
        comic: ComicRef::Code(code),
        link: LinkRef::Sid(link_sid(domain, relative_url)),
    }
}

// ---------------------------------------------------------------------------
// Comics
// ---------------------------------------------------------------------------

// ---- GET /comics

/// Each comic carries its links and chapters.
pub async fn list_comics(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> AppResult<impl IntoResponse> {
    let limit = params.effective_limit(&COMIC_LIST);
    let (comics, total) = tokio::join!(
        state.catalog.list_comics(params.into_request()),
        state.catalog.count_comics(),
    );
    Ok(listed(comics?, total, limit))
}

// ---- POST /comics

pub async fn create_comic(
    grant: Grant,
    State(state): State<AppState>,
    Json(input): Json<CreateComic>,
) -> AppResult<impl IntoResponse> {
    let comic = state.catalog.add_comic(&grant, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: comic })))
}

// ---- GET /comics/{code}

pub async fn get_comic(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> AppResult<impl IntoResponse> {
    let comic = state.catalog.get_comic_by_code(&code).await?;
    Ok(Json(DataResponse { data: comic }))
}

// ---- HEAD /comics/{code}

pub async fn comic_exists(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> AppResult<StatusCode> {
    Ok(exists_status(state.catalog.comic_exists(&code).await?))
}

// ---- PUT /comics/{code}

pub async fn update_comic(
    grant: Grant,
    State(state): State<AppState>,
    Path(code): Path<String>,
    Json(input): Json<UpdateComic>,
) -> AppResult<impl IntoResponse> {
    updated(state.catalog.update_comic_by_code(&grant, &code, &input).await)
}

// ---- DELETE /comics/{code}

/// Removes the comic's chapters and link pairings with it.
pub async fn delete_comic(
    grant: Grant,
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> AppResult<StatusCode> {
    state.catalog.delete_comic_by_code(&grant, &code).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Comic links
// ---------------------------------------------------------------------------

// ---- GET /comics/{code}/links

pub async fn list_comic_links(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Query(params): Query<ListQuery>,
) -> AppResult<impl IntoResponse> {
    let limit = params.effective_limit(&COMIC_LINK_LIST);
    let (links, total) = tokio::join!(
        state.catalog.list_comic_links(&code, params.into_request()),
        state.catalog.count_comic_links(&code),
    );
    Ok(listed(links?, total, limit))
}

// ---- POST /comics/{code}/links

pub async fn create_comic_link(
    grant: Grant,
    State(state): State<AppState>,
    Path(code): Path<String>,
    Json(mut input): Json<CreateComicLink>,
) -> AppResult<impl IntoResponse> {
    input.comic = Some(ComicRef::Code(code));
    let pairing = state.catalog.add_comic_link(&grant, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: pairing })))
}

// ---- GET /comics/{code}/links/{domain}/{relative_url}

pub async fn get_comic_link(
    State(state): State<AppState>,
    Path((code, domain, relative_url)): Path<(String, String, String)>,
) -> AppResult<impl IntoResponse> {
    let sid = comic_link_sid(code, domain, relative_url);
    let pairing = state.catalog.get_comic_link_by_sid(&sid).await?;
    Ok(Json(DataResponse { data: pairing }))
}

// ---- PUT /comics/{code}/links/{domain}/{relative_url}

pub async fn update_comic_link(
    grant: Grant,
    State(state): State<AppState>,
    Path((code, domain, relative_url)): Path<(String, String, String)>,
    Json(input): Json<UpdateComicLink>,
) -> AppResult<impl IntoResponse> {
    let sid = comic_link_sid(code, domain, relative_url);
    updated(state.catalog.update_comic_link_by_sid(&grant, &sid, &input).await)
}

// ---- DELETE /comics/{code}/links/{domain}/{relative_url}

pub async fn delete_comic_link(
    grant: Grant,
    State(state): State<AppState>,
    Path((code, domain, relative_url)): Path<(String, String, String)>,
) -> AppResult<StatusCode> {
    let sid = comic_link_sid(code, domain, relative_url);
    state.catalog.delete_comic_link_by_sid(&grant, &sid).await?;
    Ok(StatusCode::NO_CONTENT)
}
