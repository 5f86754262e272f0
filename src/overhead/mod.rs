mod error;
mod estimator;
pub mod survey;
mod types;

pub use error::OverheadError;
pub use estimator::{antipodal_hours, estimate_hours_to_overhead};
pub use types::{GeoPoint, OrbitalParameters};
