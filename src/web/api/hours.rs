use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::overhead::{estimate_hours_to_overhead, GeoPoint};
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct HoursQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub sat_lat: Option<f64>,
    pub sat_lon: Option<f64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HoursResponse {
    pub h: f64,
}

#[utoipa::path(
    get,
    path = "/hours",
    tag = "overhead",
    params(
        ("lat" = f64, Query, description = "Observer latitude (degrees)"),
        ("lon" = f64, Query, description = "Observer longitude (degrees)"),
        ("sat_lat" = Option<f64>, Query, description = "Satellite ground latitude, defaults to the tracked position"),
        ("sat_lon" = Option<f64>, Query, description = "Satellite ground longitude, defaults to the tracked position")
    ),
    responses(
        (status = 200, description = "Estimated hours until overhead", body = HoursResponse),
        (status = 400, description = "Invalid coordinates", body = ErrorResponse),
        (status = 503, description = "Satellite position not known yet", body = ErrorResponse)
    )
)]
pub async fn hours(
    State(state): State<AppState>,
    query: Result<Query<HoursQuery>, QueryRejection>,
) -> ApiResult<Json<HoursResponse>> {
    let Query(query) = query.map_err(|e| ApiError::InvalidCoordinate(e.body_text()))?;
    let observer = GeoPoint::new(
        required("lat", query.lat)?,
        required("lon", query.lon)?,
    )?;

    let satellite = match (query.sat_lat, query.sat_lon) {
        (Some(lat), Some(lon)) => GeoPoint::new(lat, lon)?,
        (None, None) => {
            state
                .feed
                .read()
                .await
                .current()
                .ok_or(ApiError::PositionUnavailable)?
                .point
        }
        _ => {
            return Err(ApiError::InvalidCoordinate(
                "sat_lat and sat_lon must be given together".into(),
            ))
        }
    };

    let h = estimate_hours_to_overhead(observer, satellite, &state.params);
    Ok(Json(HoursResponse { h }))
}

fn required(field: &str, value: Option<f64>) -> ApiResult<f64> {
    value.ok_or_else(|| ApiError::InvalidCoordinate(format!("missing {}", field)))
}
