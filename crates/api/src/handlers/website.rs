//! Handlers for `/websites` and their translation languages.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use comicat_core::listing::{WEBSITE_LIST, WEBSITE_TL_LANGUAGE_LIST};
use comicat_db::models::language::LanguageRef;
use comicat_db::models::website::{
    CreateWebsite, CreateWebsiteTlLanguage, UpdateWebsite, UpdateWebsiteTlLanguage, WebsiteRef,
    WebsiteTlLanguageSid,
};

use crate::error::AppResult;
use crate::handlers::{exists_status, listed, updated};
use crate::middleware::auth::Grant;
use crate::query::ListQuery;
use crate::response::DataResponse;
use crate::state::AppState;

fn tl_language_sid(domain: String, ietf: String) -> WebsiteTlLanguageSid {
    WebsiteTlLanguageSid {
        website: WebsiteRef::Domain(domain),
        language: LanguageRef::Ietf(ietf),
    }
}

// ---------------------------------------------------------------------------
// Websites
// ---------------------------------------------------------------------------

// ---- GET /websites

pub async fn list_websites(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> AppResult<impl IntoResponse> {
    let limit = params.effective_limit(&WEBSITE_LIST);
    let (websites, total) = tokio::join!(
        state.catalog.list_websites(params.into_request()),
        state.catalog.count_websites(),
    );
    Ok(listed(websites?, total, limit))
}

// ---- POST /websites

pub async fn create_website(
    grant: Grant,
    State(state): State<AppState>,
    Json(input): Json<CreateWebsite>,
) -> AppResult<impl IntoResponse> {
    let website = state.catalog.add_website(&grant, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: website })))
}

// ---- GET /websites/{domain}

pub async fn get_website(
    State(state): State<AppState>,
    Path(domain): Path<String>,
) -> AppResult<impl IntoResponse> {
    let website = state.catalog.get_website_by_domain(&domain).await?;
    Ok(Json(DataResponse { data: website }))
}

// ---- HEAD /websites/{domain}

pub async fn website_exists(
    State(state): State<AppState>,
    Path(domain): Path<String>,
) -> AppResult<StatusCode> {
    Ok(exists_status(state.catalog.website_exists(&domain).await?))
}

// ---- PUT /websites/{domain}

pub async fn update_website(
    grant: Grant,
    State(state): State<AppState>,
    Path(domain): Path<String>,
    Json(input): Json<UpdateWebsite>,
) -> AppResult<impl IntoResponse> {
    updated(state.catalog.update_website_by_domain(&grant, &domain, &input).await)
}

// ---- DELETE /websites/{domain}

pub async fn delete_website(
    grant: Grant,
    State(state): State<AppState>,
    Path(domain): Path<String>,
) -> AppResult<StatusCode> {
    state.catalog.delete_website_by_domain(&grant, &domain).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Translation languages
// ---------------------------------------------------------------------------

// ---- GET /websites/{domain}/tl-languages

pub async fn list_tl_languages(
    State(state): State<AppState>,
    Path(domain): Path<String>,
    Query(params): Query<ListQuery>,
) -> AppResult<impl IntoResponse> {
    let limit = params.effective_limit(&WEBSITE_TL_LANGUAGE_LIST);
    let (languages, total) = tokio::join!(
        state
            .catalog
            .list_website_tl_languages(&domain, params.into_request()),
        state.catalog.count_website_tl_languages(&domain),
    );
    Ok(listed(languages?, total, limit))
}

// ---- POST /websites/{domain}/tl-languages

/// The website always comes from the path; only `language` is read from
/// the body.
pub async fn create_tl_language(
    grant: Grant,
    State(state): State<AppState>,
    Path(domain): Path<String>,
    Json(mut input): Json<CreateWebsiteTlLanguage>,
) -> AppResult<impl IntoResponse> {
    input.website = Some(WebsiteRef::Domain(domain));
    let pairing = state.catalog.add_website_tl_language(&grant, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: pairing })))
}

// ---- GET /websites/{domain}/tl-languages/{ietf}

pub async fn get_tl_language(
    State(state): State<AppState>,
    Path((domain, ietf)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    let sid = tl_language_sid(domain, ietf);
    let pairing = state.catalog.get_website_tl_language_by_sid(&sid).await?;
    Ok(Json(DataResponse { data: pairing }))
}

// ---- PUT /websites/{domain}/tl-languages/{ietf}

pub async fn update_tl_language(
    grant: Grant,
    State(state): State<AppState>,
    Path((domain, ietf)): Path<(String, String)>,
    Json(input): Json<UpdateWebsiteTlLanguage>,
) -> AppResult<impl IntoResponse> {
    let sid = tl_language_sid(domain, ietf);
    updated(
        state
            .catalog
            .update_website_tl_language_by_sid(&grant, &sid, &input)
            .await,
    )
}

// ---- DELETE /websites/{domain}/tl-languages/{ietf}

pub async fn delete_tl_language(
    grant: Grant,
    State(state): State<AppState>,
    Path((domain, ietf)): Path<(String, String)>,
) -> AppResult<StatusCode> {
    let sid = tl_language_sid(domain, ietf);
    state
        .catalog
        .delete_website_tl_language_by_sid(&grant, &sid)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
