use axum::{http::Method, routing::get, Router};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::overhead::OverheadError;
use crate::predict::{run_updater, PositionFeed, PredictError};

use super::api::hours as hours_handlers;
use super::api::iss as iss_handlers;
use super::api_doc::ApiDoc;
use super::config::Config;
use super::state::AppState;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid orbit: {0}")]
    Orbit(#[from] OverheadError),
    #[error("satellite source: {0}")]
    Source(#[from] PredictError),
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/hours", get(hours_handlers::hours))
        .route("/iss", get(iss_handlers::iss))
        // OpenAPI / Swagger
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(config: Config) -> Result<(), ServerError> {
    let bind_addr = config.web.bind.clone();
    let params = config.orbit.parameters()?;
    let source = config.satellite.source.build()?;
    log::info!("Tracking satellite from {}", source.describe());

    let feed = Arc::new(RwLock::new(PositionFeed::new(config.satellite.trail_length)));
    let interval = Duration::from_secs(config.satellite.update_interval_s.max(1));
    let reload_interval = Duration::from_secs(config.satellite.tle_reload_interval_s.max(1));
    tokio::spawn(run_updater(source, feed.clone(), interval, reload_interval));

    let app = router(AppState { params, feed });

    log::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
