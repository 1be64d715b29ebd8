use utoipa::OpenApi;

use super::api::error::ErrorResponse;
use super::api::subjects::StatusResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::subjects::list_subjects,
        super::api::subjects::get_fixes,
        super::api::subjects::get_tour,
        super::api::subjects::get_map,
        super::api::subjects::status,
        super::api::subjects::refresh,
    ),
    components(
        schemas(
            StatusResponse,
            ErrorResponse,
            crate::track::Fix,
            crate::track::SubjectSummary,
            crate::tour::Tour,
            crate::tour::TourSegment,
            crate::tour::CameraPose,
            crate::tour::Placemark,
            crate::map::MapView,
            crate::map::MapMarker,
            crate::geo::LatLon,
        )
    ),
    info(
        title = "Panther Tour API",
        description = "Panther telemetry fixes, map markers and camera tours",
        version = "0.1.0"
    ),
    tags(
        (name = "subjects", description = "Per-subject telemetry"),
        (name = "source", description = "Telemetry source status")
    )
)]
pub struct ApiDoc;
