use chrono::{DateTime, Duration, Utc};
use std::path::PathBuf;

use crate::overhead::GeoPoint;
use crate::predict::error::PredictError;
use crate::predict::propagation::subsatellite_point;
use crate::predict::tle_loader::{TleEntry, TleLoader};

/// Elements older than this no longer describe the real orbit well
const STALE_TLE_DAYS: i64 = 3;

/// Where the satellite's current ground point comes from
pub enum PositionSource {
    Fixed(GeoPoint),
    Tle {
        loader: TleLoader,
        norad_id: Option<u32>,
        entry: TleEntry,
    },
}

impl PositionSource {
    pub fn from_tle_file(
        path: PathBuf,
        norad_id: Option<u32>,
        now: DateTime<Utc>,
    ) -> Result<Self, PredictError> {
        let loader = TleLoader::new(path);
        let entry = loader.load(norad_id)?;
        warn_if_stale(&entry, now);
        Ok(PositionSource::Tle {
            loader,
            norad_id,
            entry,
        })
    }

    pub fn position_at(&self, timestamp: DateTime<Utc>) -> Result<GeoPoint, PredictError> {
        match self {
            PositionSource::Fixed(point) => Ok(*point),
            PositionSource::Tle { entry, .. } => subsatellite_point(entry, timestamp),
        }
    }

    /// Re-read the TLE file; on failure the current elements are kept
    pub fn reload(&mut self, now: DateTime<Utc>) -> Result<(), PredictError> {
        if let PositionSource::Tle {
            loader,
            norad_id,
            entry,
        } = self
        {
            let fresh = loader.load(*norad_id)?;
            warn_if_stale(&fresh, now);
            log::info!(
                "Reloaded TLE for {} (epoch {})",
                fresh.info.name,
                fresh.elements.datetime
            );
            *entry = fresh;
        }
        Ok(())
    }

    pub fn describe(&self) -> String {
        match self {
            PositionSource::Fixed(point) => {
                format!("fixed ({}, {})", point.latitude(), point.longitude())
            }
            PositionSource::Tle { entry, .. } => {
                format!("TLE {} (NORAD {})", entry.info.name, entry.info.norad_id)
            }
        }
    }
}

pub fn epoch_age(entry: &TleEntry, now: DateTime<Utc>) -> Duration {
    now.naive_utc() - entry.elements.datetime
}

/// Logs a warning and returns true when the elements are too old to trust
pub fn warn_if_stale(entry: &TleEntry, now: DateTime<Utc>) -> bool {
    let age = epoch_age(entry, now);
    let stale = age > Duration::days(STALE_TLE_DAYS);
    if stale {
        log::warn!(
            "TLE for {} has epoch {}, {} days old; positions will not match the real satellite",
            entry.info.name,
            entry.elements.datetime,
            age.num_days()
        );
    }
    stale
}
