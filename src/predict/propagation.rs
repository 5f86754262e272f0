use chrono::{DateTime, Utc};

use crate::overhead::GeoPoint;
use crate::predict::error::PredictError;
use crate::predict::tle_loader::TleEntry;

// WGS-84 constants
const WGS84_A_KM: f64 = 6378.137;
const WGS84_E2: f64 = 0.00669437999014;
const GEODETIC_ITERATIONS: usize = 6;

/// Propagate the TLE to `timestamp` and project the satellite onto the ellipsoid
pub fn subsatellite_point(
    entry: &TleEntry,
    timestamp: DateTime<Utc>,
) -> Result<GeoPoint, PredictError> {
    let minutes = entry
        .elements
        .datetime_to_minutes_since_epoch(&timestamp.naive_utc())
        .map_err(|e| PredictError::Propagation(e.to_string()))?;

    let prediction = entry
        .constants
        .propagate(minutes)
        .map_err(|e| PredictError::Propagation(e.to_string()))?;

    let sidereal =
        sgp4::iau_epoch_to_sidereal_time(sgp4::julian_years_since_j2000(&timestamp.naive_utc()));

    let ecef = teme_to_ecef_position(prediction.position, sidereal);
    let (lat, lon) = ecef_to_geodetic(ecef);
    Ok(GeoPoint::new(lat, lon)?)
}

pub fn teme_to_ecef_position(pos_teme: [f64; 3], gmst: f64) -> [f64; 3] {
    let cos_gmst = gmst.cos();
    let sin_gmst = gmst.sin();
    [
        pos_teme[0] * cos_gmst + pos_teme[1] * sin_gmst,
        -pos_teme[0] * sin_gmst + pos_teme[1] * cos_gmst,
        pos_teme[2],
    ]
}

/// Geodetic latitude and longitude in degrees of an ECEF position in km
pub fn ecef_to_geodetic(pos: [f64; 3]) -> (f64, f64) {
    let [x, y, z] = pos;
    let lon = y.atan2(x).to_degrees();
    let p = (x * x + y * y).sqrt();

    if p < f64::EPSILON {
        return (90f64.copysign(z), lon);
    }

    let mut lat = z.atan2(p * (1.0 - WGS84_E2));
    for _ in 0..GEODETIC_ITERATIONS {
        let sin_lat = lat.sin();
        let n = WGS84_A_KM / (1.0 - WGS84_E2 * sin_lat * sin_lat).sqrt();
        let h = p / lat.cos() - n;
        lat = z.atan2(p * (1.0 - WGS84_E2 * n / (n + h)));
    }

    (lat.to_degrees(), lon)
}
