//! Handlers for `/links` and their translation languages.
//!
//! A link is addressed by its website domain and its relative URL, the
//! latter percent-encoded into a single path segment.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use comicat_core::listing::{LINK_LIST, LINK_TL_LANGUAGE_LIST};
use comicat_db::models::language::LanguageRef;
use comicat_db::models::link::{
    CreateLink, CreateLinkTlLanguage, LinkRef, LinkSid, LinkTlLanguageSid, UpdateLink,
    UpdateLinkTlLanguage,
};
use comicat_db::models::website::WebsiteRef;

use crate::error::AppResult;
use crate::handlers::{exists_status, listed, updated};
use crate::middleware::auth::Grant;
use crate::query::ListQuery;
use crate::response::DataResponse;
use crate::state::AppState;

pub(crate) fn link_sid(domain: String, relative_url: String) -> LinkSid {
    LinkSid::new(WebsiteRef::Domain(domain), relative_url)
}

fn tl_language_sid(domain: String, relative_url: String, ietf: String) -> LinkTlLanguageSid {
    LinkTlLanguageSid {
        link: LinkRef::Sid(link_sid(domain, relative_url)),
        language: LanguageRef::Ietf(ietf),
    }
}

// ---------------------------------------------------------------------------
// Links
// ---------------------------------------------------------------------------

// ---- GET /links

pub async fn list_links(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> AppResult<impl IntoResponse> {
    let limit = params.effective_limit(&LINK_LIST);
    let (links, total) = tokio::join!(
        state.catalog.list_links(params.into_request()),
        state.catalog.count_links(),
    );
    Ok(listed(links?, total, limit))
}

// ---- POST /links

pub async fn create_link(
    grant: Grant,
    State(state): State<AppState>,
    Json(input): Json<CreateLink>,
) -> AppResult<impl IntoResponse> {
    let link = state.catalog.add_link(&grant, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: link })))
}

// ---- GET /links/{domain}/{relative_url}

pub async fn get_link(
    State(state): State<AppState>,
    Path((domain, relative_url)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    let link = state
        .catalog
        .get_link_by_sid(&link_sid(domain, relative_url))
        .await?;
    Ok(Json(DataResponse { data: link }))
}

// ---- HEAD /links/{domain}/{relative_url}

pub async fn link_exists(
    State(state): State<AppState>,
    Path((domain, relative_url)): Path<(String, String)>,
) -> AppResult<StatusCode> {
    let exists = state
        .catalog
        .link_exists(&link_sid(domain, relative_url))
        .await?;
    Ok(exists_status(exists))
}

// ---- PUT /links/{domain}/{relative_url}

pub async fn update_link(
    grant: Grant,
    State(state): State<AppState>,
    Path((domain, relative_url)): Path<(String, String)>,
    Json(input): Json<UpdateLink>,
) -> AppResult<impl IntoResponse> {
    let sid = link_sid(domain, relative_url);
    updated(state.catalog.update_link_by_sid(&grant, &sid, &input).await)
}

// ---- DELETE /links/{domain}/{relative_url}

pub async fn delete_link(
    grant: Grant,
    State(state): State<AppState>,
    Path((domain, relative_url)): Path<(String, String)>,
) -> AppResult<StatusCode> {
    state
        .catalog
        .delete_link_by_sid(&grant, &link_sid(domain, relative_url))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Translation languages
// ---------------------------------------------------------------------------

// ---- GET /links/{domain}/{relative_url}/tl-languages

pub async fn list_tl_languages(
    State(state): State<AppState>,
    Path((domain, relative_url)): Path<(String, String)>,
    Query(params): Query<ListQuery>,
) -> AppResult<impl IntoResponse> {
    let sid = link_sid(domain, relative_url);
    let limit = params.effective_limit(&LINK_TL_LANGUAGE_LIST);
    let (languages, total) = tokio::join!(
        state.catalog.list_link_tl_languages(&sid, params.into_request()),
        state.catalog.count_link_tl_languages(&sid),
    );
    Ok(listed(languages?, total, limit))
}

// ---- POST /links/{domain}/{relative_url}/tl-languages

pub async fn create_tl_language(
    grant: Grant,
    State(state): State<AppState>,
    Path((domain, relative_url)): Path<(String, String)>,
    Json(mut input): Json<CreateLinkTlLanguage>,
) -> AppResult<impl IntoResponse> {
    input.link = Some(LinkRef::Sid(link_sid(domain, relative_url)));
    let pairing = state.catalog.add_link_tl_language(&grant, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: pairing })))
}

// ---- GET /links/{domain}/{relative_url}/tl-languages/{ietf}

pub async fn get_tl_language(
    State(state): State<AppState>,
    Path((domain, relative_url, ietf)): Path<(String, String, String)>,
) -> AppResult<impl IntoResponse> {
    let sid = tl_language_sid(domain, relative_url, ietf);
    let pairing = state.catalog.get_link_tl_language_by_sid(&sid).await?;
    Ok(Json(DataResponse { data: pairing }))
}

// ---- PUT /links/{domain}/{relative_url}/tl-languages/{ietf}

pub async fn update_tl_language(
    grant: Grant,
    State(state): State<AppState>,
    Path((domain, relative_url, ietf)): Path<(String, String, String)>,
    Json(input): Json<UpdateLinkTlLanguage>,
) -> AppResult<impl IntoResponse> {
    let sid = tl_language_sid(domain, relative_url, ietf);
    updated(
        state
            .catalog
            .update_link_tl_language_by_sid(&grant, &sid, &input)
            .await,
    )
}

// ---- DELETE /links/{domain}/{relative_url}/tl-languages/{ietf}

pub async fn delete_tl_language(
    grant: Grant,
    State(state): State<AppState>,
    Path((domain, relative_url, ietf)): Path<(String, String, String)>,
) -> AppResult<StatusCode> {
    let sid = tl_language_sid(domain, relative_url, ietf);
    state
        .catalog
        .delete_link_tl_language_by_sid(&grant, &sid)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
