use thiserror::Error;

use crate::overhead::OverheadError;

#[derive(Debug, Error)]
pub enum PredictError {
    #[error("TLE file read error: {0}")]
    FileRead(#[from] std::io::Error),
    #[error("Invalid TLE format in {file}: {message}")]
    InvalidTle { file: String, message: String },
    #[error("No TLE in {0}")]
    NoSatellites(String),
    #[error("NORAD {norad_id} not found in {file}")]
    SatelliteNotFound { file: String, norad_id: u32 },
    #[error("Propagation error: {0}")]
    Propagation(String),
    #[error("Invalid position: {0}")]
    InvalidPosition(#[from] OverheadError),
}
