mod error;
mod feed;
mod propagation;
mod source;
mod tle_loader;
mod types;

pub use error::PredictError;
pub use feed::{run_updater, PositionFeed};
pub use source::PositionSource;
pub use types::TrackedPosition;
