use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::map::MapView;
use crate::tour::{build_tour, Tour};
use crate::track::{Dataset, Fix, SubjectSummary, Track};
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct StatusResponse {
    pub source: String,
    pub loaded_at: Option<DateTime<Utc>>,
    pub subject_count: usize,
    pub fix_count: usize,
    pub skipped_rows: usize,
}

impl StatusResponse {
    fn new(source: String, dataset: &Dataset) -> Self {
        Self {
            source,
            loaded_at: dataset.loaded_at(),
            subject_count: dataset.subjects().len(),
            fix_count: dataset.fixes().len(),
            skipped_rows: dataset.skipped_rows(),
        }
    }
}

async fn find_track(state: &AppState, id: &str) -> ApiResult<Track> {
    state
        .store
        .snapshot()
        .await
        .track(id)
        .ok_or_else(|| ApiError::NotFound(id.to_string()))
}

#[utoipa::path(
    get,
    path = "/api/subjects",
    tag = "subjects",
    responses(
        (status = 200, description = "Tracked subjects in source order", body = Vec<SubjectSummary>)
    )
)]
pub async fn list_subjects(State(state): State<AppState>) -> Json<Vec<SubjectSummary>> {
    Json(state.store.snapshot().await.summaries())
}

#[utoipa::path(
    get,
    path = "/api/subjects/{id}/fixes",
    tag = "subjects",
    params(
        ("id" = String, Path, description = "Subject id (CATNUMBER)")
    ),
    responses(
        (status = 200, description = "Fixes in source order", body = Vec<Fix>),
        (status = 404, description = "Unknown subject", body = ErrorResponse)
    )
)]
pub async fn get_fixes(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<Fix>>> {
    let track = find_track(&state, &id).await?;
    Ok(Json(track.fixes().to_vec()))
}

#[utoipa::path(
    get,
    path = "/api/subjects/{id}/tour",
    tag = "subjects",
    params(
        ("id" = String, Path, description = "Subject id (CATNUMBER)")
    ),
    responses(
        (status = 200, description = "Camera tour", body = Tour),
        (status = 404, description = "Unknown subject", body = ErrorResponse)
    )
)]
pub async fn get_tour(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Tour>> {
    let track = find_track(&state, &id).await?;
    Ok(Json(build_tour(&track, &state.config.tour)))
}

#[utoipa::path(
    get,
    path = "/api/subjects/{id}/map",
    tag = "subjects",
    params(
        ("id" = String, Path, description = "Subject id (CATNUMBER)")
    ),
    responses(
        (status = 200, description = "Map markers", body = MapView),
        (status = 404, description = "Unknown subject", body = ErrorResponse)
    )
)]
pub async fn get_map(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MapView>> {
    let track = find_track(&state, &id).await?;
    MapView::from_track(&track, state.config.map.zoom)
        .map(Json)
        .ok_or(ApiError::NotFound(id))
}

#[utoipa::path(
    get,
    path = "/api/status",
    tag = "source",
    responses(
        (status = 200, description = "Currently loaded dataset", body = StatusResponse)
    )
)]
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let dataset = state.store.snapshot().await;
    Json(StatusResponse::new(
        state.store.source_description(),
        &dataset,
    ))
}

#[utoipa::path(
    post,
    path = "/api/refresh",
    tag = "source",
    responses(
        (status = 200, description = "Source reloaded", body = StatusResponse),
        (status = 502, description = "Source could not be loaded", body = ErrorResponse)
    )
)]
pub async fn refresh(State(state): State<AppState>) -> ApiResult<Json<StatusResponse>> {
    let dataset = state.store.refresh().await?;
    Ok(Json(StatusResponse::new(
        state.store.source_description(),
        &dataset,
    )))
}
