//! Monte Carlo survey of the estimator's output range.
//!
//! Satellite ground points are drawn uniformly in latitude and longitude
//! (not uniformly by area) and reduced into a [`HoursRange`].

use std::thread;

use rand::{rngs::SmallRng, Rng, SeedableRng};
use serde::Serialize;

use crate::overhead::{estimate_hours_to_overhead, GeoPoint, OrbitalParameters};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HoursRange {
    pub min: f64,
    pub max: f64,
    pub samples: u64,
}

impl HoursRange {
    pub const EMPTY: Self = Self {
        min: f64::INFINITY,
        max: f64::NEG_INFINITY,
        samples: 0,
    };

    pub fn include(self, hours: f64) -> Self {
        Self {
            min: self.min.min(hours),
            max: self.max.max(hours),
            samples: self.samples + 1,
        }
    }

    pub fn merge(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
            samples: self.samples + other.samples,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.samples == 0
    }
}

impl Default for HoursRange {
    fn default() -> Self {
        Self::EMPTY
    }
}

pub fn lerp(a: f64, b: f64, x: f64) -> f64 {
    (1.0 - x) * a + x * b
}

pub fn random_ground_point<R: Rng + ?Sized>(rng: &mut R) -> GeoPoint {
    let lat = lerp(-90.0, 90.0, rng.random::<f64>());
    let lon = lerp(-180.0, 180.0, rng.random::<f64>());
    // lerp over [0, 1) between symmetric bounds stays within them
    GeoPoint::new_unchecked(lat, lon)
}

pub fn survey<R: Rng + ?Sized>(
    observer: GeoPoint,
    params: &OrbitalParameters,
    samples: u64,
    rng: &mut R,
) -> HoursRange {
    (0..samples)
        .map(|_| random_ground_point(&mut *rng))
        .map(|satellite| estimate_hours_to_overhead(observer, satellite, params))
        .fold(HoursRange::EMPTY, HoursRange::include)
}

/// Number of threads actually used for `requested` workers.
///
/// Never more than the available parallelism, never more than one thread
/// per sample, and at least one.
pub fn effective_workers(requested: usize, samples: u64) -> u64 {
    let available = thread::available_parallelism().map_or(1, |n| n.get());
    (requested.min(available) as u64).min(samples).max(1)
}

/// Splits `samples` across up to `workers` threads.
///
/// Worker `i` draws from a `SmallRng` seeded with `seed + i`, so a given
/// `(seed, effective_workers(workers, samples))` pair always replays the
/// same sample set.
pub fn survey_parallel(
    observer: GeoPoint,
    params: &OrbitalParameters,
    samples: u64,
    seed: u64,
    workers: usize,
) -> HoursRange {
    let workers = effective_workers(workers, samples);
    let per_worker = samples / workers;
    let remainder = samples % workers;

    thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|i| {
                let count = per_worker + u64::from(i < remainder);
                scope.spawn(move || {
                    let mut rng = SmallRng::seed_from_u64(seed.wrapping_add(i));
                    survey(observer, params, count, &mut rng)
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
            })
            .fold(HoursRange::EMPTY, HoursRange::merge)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overhead::antipodal_hours;
    use rstest::rstest;

    fn london() -> GeoPoint {
        GeoPoint::new(51.547, -0.134).unwrap()
    }

    #[test]
    fn lerp_endpoints() {
        assert_eq!(lerp(-90.0, 90.0, 0.0), -90.0);
        assert_eq!(lerp(-90.0, 90.0, 1.0), 90.0);
        assert_eq!(lerp(-180.0, 180.0, 0.5), 0.0);
    }

    #[test]
    fn random_points_stay_in_domain() {
        let mut rng = SmallRng::seed_from_u64(1);
        for _ in 0..100_000 {
            let p = random_ground_point(&mut rng);
            assert!(GeoPoint::new(p.latitude(), p.longitude()).is_ok());
        }
    }

    #[test]
    fn empty_survey() {
        let mut rng = SmallRng::seed_from_u64(0);
        let range = survey(london(), &OrbitalParameters::ISS, 0, &mut rng);
        assert!(range.is_empty());
        assert_eq!(range, HoursRange::EMPTY);
    }

    #[test]
    fn london_range_matches_analytic_bounds() {
        let params = OrbitalParameters::ISS;
        let mut rng = SmallRng::seed_from_u64(0x155);
        let range = survey(london(), &params, 200_000, &mut rng);

        let bound = antipodal_hours(&params);
        assert_eq!(range.samples, 200_000);
        assert!(range.min >= 0.0);
        assert!(range.min < 0.01, "min {}", range.min);
        assert!(range.max <= bound);
        assert!(range.max > bound * 0.98, "max {} bound {}", range.max, bound);
    }

    #[test]
    fn merge_is_order_independent() {
        let a = HoursRange::EMPTY.include(0.3).include(0.1);
        let b = HoursRange::EMPTY.include(0.7);
        let c = HoursRange::EMPTY.include(0.05).include(0.5).include(0.2);

        let left = a.merge(b).merge(c);
        let right = c.merge(a.merge(b));
        assert_eq!(left, right);
        assert_eq!(b.merge(a), a.merge(b));
        assert_eq!(left.min, 0.05);
        assert_eq!(left.max, 0.7);
        assert_eq!(left.samples, 6);
        assert_eq!(a.merge(HoursRange::EMPTY), a);
    }

    #[test]
    fn single_worker_replays_sequential_survey() {
        let params = OrbitalParameters::ISS;
        let mut rng = SmallRng::seed_from_u64(99);
        let sequential = survey(london(), &params, 10_000, &mut rng);
        let parallel = survey_parallel(london(), &params, 10_000, 99, 1);
        assert_eq!(sequential, parallel);
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(4)]
    #[case(7)]
    fn parallel_survey_counts_every_sample(#[case] workers: usize) {
        let params = OrbitalParameters::ISS;
        let range = survey_parallel(london(), &params, 50_001, 5, workers);
        assert_eq!(range.samples, 50_001);
        assert!(range.max <= antipodal_hours(&params));
    }

    #[test]
    fn worker_count_is_bounded() {
        let available = thread::available_parallelism().map_or(1, |n| n.get()) as u64;
        assert_eq!(effective_workers(0, 1_000), 1);
        assert_eq!(effective_workers(1, 1_000), 1);
        assert_eq!(effective_workers(100_000, 1_000_000), available);
        assert_eq!(effective_workers(100_000, 0), 1);
        assert!(effective_workers(100_000, 2) <= 2);
    }

    #[test]
    fn huge_worker_request_still_surveys() {
        let params = OrbitalParameters::ISS;
        let range = survey_parallel(london(), &params, 1_000, 8, 100_000);
        assert_eq!(range.samples, 1_000);
    }

    #[test]
    fn parallel_merge_equals_manual_fold() {
        let params = OrbitalParameters::ISS;
        let workers = effective_workers(3, 3_000);
        let manual = (0..workers)
            .map(|i| {
                let count = 3_000 / workers + u64::from(i < 3_000 % workers);
                let mut rng = SmallRng::seed_from_u64(17 + i);
                survey(london(), &params, count, &mut rng)
            })
            .fold(HoursRange::EMPTY, HoursRange::merge);
        let parallel = survey_parallel(london(), &params, 3_000, 17, 3);
        assert_eq!(manual, parallel);
    }
}
