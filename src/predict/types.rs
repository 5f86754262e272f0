use chrono::{DateTime, Utc};

use crate::overhead::GeoPoint;

/// Information about a single satellite from TLE
#[derive(Debug, Clone)]
pub struct SatelliteInfo {
    pub name: String,
    pub norad_id: u32,
}

/// A sub-satellite point at a given instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackedPosition {
    pub timestamp: DateTime<Utc>,
    pub point: GeoPoint,
}
