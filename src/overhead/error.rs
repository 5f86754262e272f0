use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum OverheadError {
    #[error("invalid coordinate: {field} = {value}")]
    InvalidCoordinate { field: &'static str, value: f64 },
    #[error("invalid orbital parameters: {field} = {value}")]
    InvalidOrbitalParameters { field: &'static str, value: f64 },
}

