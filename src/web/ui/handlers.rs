use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Form,
};
use serde::Deserialize;

use crate::map::MapView;
use crate::tour::{build_tour, TransientTour, KML_CONTENT_TYPE};
use crate::web::api::error::{ApiError, ApiResult};
use crate::web::state::AppState;

use super::templates::{DownloadLink, IndexTemplate, SubjectOption};

#[derive(Debug, Deserialize)]
pub struct SelectSubjectForm {
    pub panther_id: String,
}

pub async fn home(State(state): State<AppState>) -> ApiResult<IndexTemplate> {
    render_index(&state, None).await
}

pub async fn select_subject(
    State(state): State<AppState>,
    Form(form): Form<SelectSubjectForm>,
) -> ApiResult<IndexTemplate> {
    render_index(&state, Some(form.panther_id)).await
}

/// Without an explicit choice the first subject in the source is shown.
async fn render_index(state: &AppState, requested: Option<String>) -> ApiResult<IndexTemplate> {
    let dataset = state.store.snapshot().await;

    let selected = match requested {
        Some(id) if !dataset.contains(&id) => return Err(ApiError::NotFound(id)),
        Some(id) => Some(id),
        None => dataset.subjects().first().cloned(),
    };

    let map_json = selected
        .as_deref()
        .and_then(|id| dataset.track(id))
        .and_then(|track| MapView::from_track(&track, state.config.map.zoom))
        .map(|view| view.to_script_json())
        .transpose()
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    let options = dataset
        .subjects()
        .iter()
        .map(|id| SubjectOption {
            id: id.clone(),
            selected: selected.as_deref() == Some(id.as_str()),
        })
        .collect();

    Ok(IndexTemplate {
        options,
        download: selected.as_deref().map(DownloadLink::new),
        map_json,
    })
}

pub async fn download_kml(
    State(state): State<AppState>,
    Path(panther_id): Path<String>,
) -> ApiResult<Response> {
    let track = state
        .store
        .snapshot()
        .await
        .track(&panther_id)
        .ok_or_else(|| ApiError::NotFound(panther_id.clone()))?;

    let tour = build_tour(&track, &state.config.tour);
    let transient = TransientTour::write(&tour, &panther_id, &state.config.export_dir())?;
    let body = transient.read()?;
    let disposition = format!("attachment; filename=\"{}\"", transient.download_name());

    log::info!(
        "Serving tour of {} with {} placemarks from {}",
        track.subject(),
        track.len(),
        transient.path().display()
    );

    Ok((
        [
            (header::CONTENT_TYPE, KML_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}
