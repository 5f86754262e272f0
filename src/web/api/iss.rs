use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::overhead::GeoPoint;
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct IssResponse {
    pub timestamp: DateTime<Utc>,
    pub lat: f64,
    pub lon: f64,
    /// Oldest first, current position last
    pub trail: Vec<GeoPoint>,
}

#[utoipa::path(
    get,
    path = "/iss",
    tag = "overhead",
    responses(
        (status = 200, description = "Current satellite ground position and trail", body = IssResponse),
        (status = 503, description = "Satellite position not known yet", body = ErrorResponse)
    )
)]
pub async fn iss(State(state): State<AppState>) -> ApiResult<Json<IssResponse>> {
    let feed = state.feed.read().await;
    let current = feed.current().ok_or(ApiError::PositionUnavailable)?;

    Ok(Json(IssResponse {
        timestamp: current.timestamp,
        lat: current.point.latitude(),
        lon: current.point.longitude(),
        trail: feed.trail().copied().collect(),
    }))
}
