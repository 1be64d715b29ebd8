use axum::{routing::get, routing::post, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Config;
use crate::track::TrackStore;

use super::api::subjects as subject_handlers;
use super::api_doc::ApiDoc;
use super::state::AppState;
use super::ui::handlers as ui_handlers;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // UI routes
        .route(
            "/",
            get(ui_handlers::home).post(ui_handlers::select_subject),
        )
        .route(
            "/download_kml/{panther_id}",
            get(ui_handlers::download_kml),
        )
        // Subject API endpoints
        .route("/api/subjects", get(subject_handlers::list_subjects))
        .route(
            "/api/subjects/{id}/fixes",
            get(subject_handlers::get_fixes),
        )
        .route("/api/subjects/{id}/tour", get(subject_handlers::get_tour))
        .route("/api/subjects/{id}/map", get(subject_handlers::get_map))
        // Source endpoints
        .route("/api/status", get(subject_handlers::status))
        .route("/api/refresh", post(subject_handlers::refresh))
        // OpenAPI / Swagger
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(config: Config, store: Arc<TrackStore>) -> std::io::Result<()> {
    let bind_addr = config.web.bind.clone();
    let refresh_interval = config.source.refresh_interval;

    if let Err(e) = store.refresh().await {
        log::warn!(
            "Failed to load telemetry from {}: {}",
            store.source_description(),
            e
        );
    }
    store.clone().spawn_refresh(refresh_interval);

    let state = AppState {
        config: Arc::new(config),
        store,
    };

    log::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, router(state)).await
}
