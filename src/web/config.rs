use chrono::Utc;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

use crate::overhead::{GeoPoint, OrbitalParameters, OverheadError};
use crate::predict::{PositionSource, PredictError};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("{0}")]
    Invalid(#[from] OverheadError),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub orbit: OrbitConfig,
    pub satellite: SatelliteConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8888".to_string()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    pub earth_radius_km: f64,
    pub altitude_km: f64,
    pub ground_track_speed_m_per_s: f64,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        let iss = OrbitalParameters::ISS;
        Self {
            earth_radius_km: iss.earth_radius_km(),
            altitude_km: iss.altitude_km(),
            ground_track_speed_m_per_s: iss.ground_track_speed_m_per_s(),
        }
    }
}

impl OrbitConfig {
    pub fn parameters(&self) -> Result<OrbitalParameters, OverheadError> {
        OrbitalParameters::new(
            self.earth_radius_km,
            self.altitude_km,
            self.ground_track_speed_m_per_s,
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SatelliteConfig {
    pub source: SourceConfig,
    #[serde(default = "default_update_interval_s")]
    pub update_interval_s: u64,
    #[serde(default = "default_trail_length")]
    pub trail_length: usize,
    #[serde(default = "default_tle_reload_interval_s")]
    pub tle_reload_interval_s: u64,
}

fn default_update_interval_s() -> u64 {
    10
}

fn default_trail_length() -> usize {
    200
}

fn default_tle_reload_interval_s() -> u64 {
    12 * 60 * 60
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceConfig {
    Tle {
        path: PathBuf,
        #[serde(default)]
        norad_id: Option<u32>,
    },
    Fixed {
        latitude: f64,
        longitude: f64,
    },
}

impl SourceConfig {
    pub fn build(&self) -> Result<PositionSource, PredictError> {
        match self {
            SourceConfig::Tle { path, norad_id } => {
                PositionSource::from_tle_file(path.clone(), *norad_id, Utc::now())
            }
            SourceConfig::Fixed {
                latitude,
                longitude,
            } => Ok(PositionSource::Fixed(GeoPoint::new(*latitude, *longitude)?)),
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.orbit.parameters()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_uses_defaults() {
        let config = Config::from_yaml(
            "satellite:\n  source:\n    kind: fixed\n    latitude: 1.5\n    longitude: -2.5\n",
        )
        .unwrap();
        assert_eq!(config.web.bind, "0.0.0.0:8888");
        assert_eq!(config.satellite.update_interval_s, 10);
        assert_eq!(config.satellite.trail_length, 200);
        assert_eq!(config.satellite.tle_reload_interval_s, 43_200);
        assert_eq!(config.orbit.parameters().unwrap(), OrbitalParameters::ISS);

        let source = config.satellite.source.build().unwrap();
        assert!(matches!(source, PositionSource::Fixed(p) if p.latitude() == 1.5));
    }

    #[test]
    fn full_config() {
        let yaml = r#"
web:
  bind: "127.0.0.1:9000"
orbit:
  altitude_km: 420
satellite:
  source:
    kind: tle
    path: data/iss.tle
    norad_id: 25544
  update_interval_s: 5
  trail_length: 50
  tle_reload_interval_s: 3600
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.web.bind, "127.0.0.1:9000");
        let params = config.orbit.parameters().unwrap();
        assert_eq!(params.altitude_km(), 420.0);
        assert_eq!(params.earth_radius_km(), 6371.0);
        assert_eq!(config.satellite.trail_length, 50);
        assert_eq!(config.satellite.tle_reload_interval_s, 3600);
        assert!(matches!(
            config.satellite.source,
            SourceConfig::Tle {
                norad_id: Some(25544),
                ..
            }
        ));
    }

    #[test]
    fn rejects_zero_speed() {
        let yaml = "orbit:\n  ground_track_speed_m_per_s: 0\nsatellite:\n  source:\n    kind: fixed\n    latitude: 0\n    longitude: 0\n";
        let err = Config::from_yaml(yaml).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid(OverheadError::InvalidOrbitalParameters { .. })
        ));
    }

    #[test]
    fn fixed_source_validates_coordinates() {
        let source = SourceConfig::Fixed {
            latitude: 95.0,
            longitude: 0.0,
        };
        let err = source.build().err().unwrap();
        assert!(matches!(err, PredictError::InvalidPosition(_)));
    }

    #[test]
    fn unknown_source_kind() {
        let yaml = "satellite:\n  source:\n    kind: radar\n";
        assert!(matches!(
            Config::from_yaml(yaml).unwrap_err(),
            ConfigError::Yaml(_)
        ));
    }
}
