//! Handlers for `/languages`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use comicat_core::listing::LANGUAGE_LIST;
use comicat_db::models::language::{CreateLanguage, UpdateLanguage};

use crate::error::AppResult;
use crate::handlers::{listed, updated};
use crate::middleware::auth::Grant;
use crate::query::ListQuery;
use crate::response::DataResponse;
use crate::state::AppState;

// ---- GET /languages

pub async fn list_languages(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> AppResult<impl IntoResponse> {
    let limit = params.effective_limit(&LANGUAGE_LIST);
    let (languages, total) = tokio::join!(
        state.catalog.list_languages(params.into_request()),
        state.catalog.count_languages(),
    );
    Ok(listed(languages?, total, limit))
}

// ---- POST /languages

pub async fn create_language(
    grant: Grant,
    State(state): State<AppState>,
    Json(input): Json<CreateLanguage>,
) -> AppResult<impl IntoResponse> {
    let language = state.catalog.add_language(&grant, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: language })))
}

// ---- GET /languages/{ietf}

pub async fn get_language(
    State(state): State<AppState>,
    Path(ietf): Path<String>,
) -> AppResult<impl IntoResponse> {
    let language = state.catalog.get_language_by_ietf(&ietf).await?;
    Ok(Json(DataResponse { data: language }))
}

// ---- PUT /languages/{ietf}

pub async fn update_language(
    grant: Grant,
    State(state): State<AppState>,
    Path(ietf): Path<String>,
    Json(input): Json<UpdateLanguage>,
) -> AppResult<impl IntoResponse> {
    updated(state.catalog.update_language_by_ietf(&grant, &ietf, &input).await)
}

// ---- DELETE /languages/{ietf}

/// Fails with 409 while a website or link still lists the language.
pub async fn delete_language(
    grant: Grant,
    State(state): State<AppState>,
    Path(ietf): Path<String>,
) -> AppResult<StatusCode> {
    state.catalog.delete_language_by_ietf(&grant, &ietf).await?;
    Ok(StatusCode::NO_CONTENT)
}
