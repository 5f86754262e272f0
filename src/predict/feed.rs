use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use tokio::sync::RwLock;

use crate::overhead::GeoPoint;
use crate::predict::source::PositionSource;
use crate::predict::types::TrackedPosition;

/// Latest satellite position plus a bounded trail of earlier ones
#[derive(Debug, Clone)]
pub struct PositionFeed {
    capacity: usize,
    current: Option<TrackedPosition>,
    trail: VecDeque<GeoPoint>,
}

impl PositionFeed {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            current: None,
            trail: VecDeque::with_capacity(capacity),
        }
    }

    pub fn record(&mut self, position: TrackedPosition) {
        self.current = Some(position);
        self.trail.push_back(position.point);
        while self.trail.len() > self.capacity {
            self.trail.pop_front();
        }
    }

    pub fn current(&self) -> Option<TrackedPosition> {
        self.current
    }

    /// Oldest first
    pub fn trail(&self) -> impl Iterator<Item = &GeoPoint> {
        self.trail.iter()
    }

    pub fn trail_len(&self) -> usize {
        self.trail.len()
    }
}

/// Compute the position for now and record it; failures keep the old position
pub async fn refresh(source: &PositionSource, feed: &RwLock<PositionFeed>) {
    let timestamp = Utc::now();
    match source.position_at(timestamp) {
        Ok(point) => {
            let mut feed = feed.write().await;
            feed.record(TrackedPosition { timestamp, point });
            log::debug!(
                "Satellite at ({:.3}, {:.3}), trail of {}",
                point.latitude(),
                point.longitude(),
                feed.trail_len()
            );
        }
        Err(e) => log::warn!("Failed to update satellite position: {}", e),
    }
}

/// Re-read the elements if `reload_interval` has passed since `last_reload`
pub fn reload_if_due(
    source: &mut PositionSource,
    last_reload: &mut Instant,
    reload_interval: Duration,
) {
    if last_reload.elapsed() < reload_interval {
        return;
    }
    *last_reload = Instant::now();
    if let Err(e) = source.reload(Utc::now()) {
        log::warn!("Failed to reload TLE, keeping previous elements: {}", e);
    }
}

/// Refresh the feed every `interval`, starting immediately, and reload the
/// TLE every `reload_interval`
pub async fn run_updater(
    mut source: PositionSource,
    feed: Arc<RwLock<PositionFeed>>,
    interval: Duration,
    reload_interval: Duration,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    let mut last_reload = Instant::now();
    loop {
        ticker.tick().await;
        reload_if_due(&mut source, &mut last_reload, reload_interval);
        refresh(&source, &feed).await;
    }
}
