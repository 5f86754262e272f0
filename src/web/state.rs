use std::sync::Arc;
use tokio::sync::RwLock;

use crate::overhead::OrbitalParameters;
use crate::predict::PositionFeed;

#[derive(Clone)]
pub struct AppState {
    pub params: OrbitalParameters,
    pub feed: Arc<RwLock<PositionFeed>>,
}
