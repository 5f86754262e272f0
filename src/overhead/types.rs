use serde::Serialize;
use utoipa::ToSchema;

use crate::overhead::OverheadError;

/// A point on the Earth's surface, in degrees.
///
/// Latitude is within `[-90, 90]` and longitude within `[-180, 180]`; both
/// are checked when the point is built, so every `GeoPoint` in circulation
/// is safe to feed into the trigonometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct GeoPoint {
    #[serde(rename = "lat")]
    latitude: f64,
    #[serde(rename = "lon")]
    longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, OverheadError> {
        Ok(Self {
            latitude: check_coordinate("latitude", latitude, 90.0)?,
            longitude: check_coordinate("longitude", longitude, 180.0)?,
        })
    }

    /// Caller guarantees both values are finite and in range.
    pub(crate) fn new_unchecked(latitude: f64, longitude: f64) -> Self {
        debug_assert!(latitude.abs() <= 90.0 && longitude.abs() <= 180.0);
        Self {
            latitude,
            longitude,
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn lat_rad(&self) -> f64 {
        self.latitude.to_radians()
    }

    pub fn lon_rad(&self) -> f64 {
        self.longitude.to_radians()
    }
}

fn check_coordinate(field: &'static str, value: f64, limit: f64) -> Result<f64, OverheadError> {
    if value.is_finite() && (-limit..=limit).contains(&value) {
        Ok(value)
    } else {
        Err(OverheadError::InvalidCoordinate { field, value })
    }
}

/// Fixed physical description of the satellite's orbit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalParameters {
    earth_radius_km: f64,
    altitude_km: f64,
    ground_track_speed_m_per_s: f64,
}

impl OrbitalParameters {
    /// Mean Earth radius, nominal ISS altitude and ground-track speed.
    pub const ISS: Self = Self {
        earth_radius_km: 6371.0,
        altitude_km: 408.0,
        ground_track_speed_m_per_s: 7660.0,
    };

    pub fn new(
        earth_radius_km: f64,
        altitude_km: f64,
        ground_track_speed_m_per_s: f64,
    ) -> Result<Self, OverheadError> {
        Ok(Self {
            earth_radius_km: check_positive("earth_radius_km", earth_radius_km)?,
            altitude_km: check_positive("altitude_km", altitude_km)?,
            ground_track_speed_m_per_s: check_positive(
                "ground_track_speed_m_per_s",
                ground_track_speed_m_per_s,
            )?,
        })
    }

    pub fn earth_radius_km(&self) -> f64 {
        self.earth_radius_km
    }

    pub fn altitude_km(&self) -> f64 {
        self.altitude_km
    }

    pub fn ground_track_speed_m_per_s(&self) -> f64 {
        self.ground_track_speed_m_per_s
    }

    pub fn orbit_radius_km(&self) -> f64 {
        self.earth_radius_km + self.altitude_km
    }
}

impl Default for OrbitalParameters {
    fn default() -> Self {
        Self::ISS
    }
}

fn check_positive(field: &'static str, value: f64) -> Result<f64, OverheadError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(OverheadError::InvalidOrbitalParameters { field, value })
    }
}
