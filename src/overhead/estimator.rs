use std::f64::consts::PI;

use crate::overhead::{GeoPoint, OrbitalParameters};

const M_PER_KM: f64 = 1000.0;
const SECONDS_PER_HOUR: f64 = 3600.0;

/// Haversine central angle between two points, in radians (`0..=PI`).
pub fn angular_separation(p1: GeoPoint, p2: GeoPoint) -> f64 {
    let s1 = ((p2.lat_rad() - p1.lat_rad()) / 2.0).sin();
    let s2 = ((p2.lon_rad() - p1.lon_rad()) / 2.0).sin();
    let c1 = p1.lat_rad().cos();
    let c2 = p2.lat_rad().cos();

    // Rounding can push `a` just past 1 for antipodal points.
    let a = (s1 * s1 + s2 * s2 * c1 * c2).clamp(0.0, 1.0);
    2.0 * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Estimated hours until the satellite's ground track reaches the observer.
///
/// The remaining distance is the great-circle arc at orbit radius (not at
/// the surface), travelled at the ground-track speed. No horizon or
/// visibility geometry is modelled.
pub fn estimate_hours_to_overhead(
    observer: GeoPoint,
    satellite: GeoPoint,
    params: &OrbitalParameters,
) -> f64 {
    let angle = angular_separation(observer, satellite);
    arc_hours(angle, params)
}

/// Upper bound of [`estimate_hours_to_overhead`]: satellite at the antipode.
pub fn antipodal_hours(params: &OrbitalParameters) -> f64 {
    arc_hours(PI, params)
}

fn arc_hours(angle: f64, params: &OrbitalParameters) -> f64 {
    let distance_km = params.orbit_radius_km() * angle;
    M_PER_KM * distance_km / params.ground_track_speed_m_per_s() / SECONDS_PER_HOUR
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::SmallRng, Rng, SeedableRng};
    use rstest::rstest;

    const TOLERANCE: f64 = 1e-9;

    fn point(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap()
    }

    fn random_point(rng: &mut SmallRng) -> GeoPoint {
        point(
            rng.random_range(-90.0..=90.0),
            rng.random_range(-180.0..=180.0),
        )
    }

    #[test]
    fn symmetric_and_bounded() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..10_000 {
            let p1 = random_point(&mut rng);
            let p2 = random_point(&mut rng);
            let forward = angular_separation(p1, p2);
            let backward = angular_separation(p2, p1);
            assert!((forward - backward).abs() < TOLERANCE);
            assert!((0.0..=PI).contains(&forward), "{} out of range", forward);
        }
    }

    #[test]
    fn identity_is_zero() {
        let mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..1_000 {
            let p = random_point(&mut rng);
            assert_eq!(angular_separation(p, p), 0.0);
        }
    }

    #[rstest]
    #[case(0.0)]
    #[case(51.547)]
    #[case(-33.9)]
    #[case(89.99)]
    #[case(-90.0)]
    fn antimeridian_is_continuous(#[case] lat: f64) {
        let east = point(lat, 180.0);
        let west = point(lat, -180.0);
        assert!(angular_separation(east, west) < TOLERANCE);
    }

    #[rstest]
    #[case(point(0.0, 0.0), point(0.0, 90.0), PI / 2.0)]
    #[case(point(0.0, 0.0), point(90.0, 0.0), PI / 2.0)]
    #[case(point(90.0, 0.0), point(-90.0, 0.0), PI)]
    #[case(point(0.0, 0.0), point(0.0, 180.0), PI)]
    #[case(point(0.0, 179.0), point(0.0, -179.0), 2f64.to_radians())]
    fn known_separations(#[case] p1: GeoPoint, #[case] p2: GeoPoint, #[case] expected: f64) {
        assert!((angular_separation(p1, p2) - expected).abs() < TOLERANCE);
    }

    #[test]
    fn antipode_is_never_nan() {
        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..1_000 {
            let p = random_point(&mut rng);
            let lon = if p.longitude() > 0.0 {
                p.longitude() - 180.0
            } else {
                p.longitude() + 180.0
            };
            let antipode = point(-p.latitude(), lon);
            let angle = angular_separation(p, antipode);
            assert!((angle - PI).abs() < 1e-6, "antipode angle {}", angle);
        }
    }

    #[test]
    fn zero_when_overhead() {
        let london = point(51.547, -0.134);
        let hours = estimate_hours_to_overhead(london, london, &OrbitalParameters::ISS);
        assert_eq!(hours, 0.0);
    }

    #[test]
    fn hours_increase_with_separation() {
        let observer = point(51.547, -0.134);
        let params = OrbitalParameters::ISS;
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..10_000 {
            let a = random_point(&mut rng);
            let b = random_point(&mut rng);
            let (angle_a, angle_b) = (
                angular_separation(observer, a),
                angular_separation(observer, b),
            );
            let (hours_a, hours_b) = (
                estimate_hours_to_overhead(observer, a, &params),
                estimate_hours_to_overhead(observer, b, &params),
            );
            if angle_a < angle_b {
                assert!(hours_a < hours_b);
            } else if angle_a > angle_b {
                assert!(hours_a > hours_b);
            }
        }
    }

    #[test]
    fn quarter_orbit_hours() {
        let params = OrbitalParameters::ISS;
        let hours = estimate_hours_to_overhead(point(0.0, 0.0), point(0.0, 90.0), &params);
        let expected = 1000.0 * 6779.0 * PI / 2.0 / 7660.0 / 3600.0;
        assert!((hours - expected).abs() < TOLERANCE);
    }

    #[test]
    fn antipodal_bound() {
        let bound = antipodal_hours(&OrbitalParameters::ISS);
        assert!((bound - PI * 6779.0 / 7.66 / 3600.0).abs() < TOLERANCE);
        assert!((bound - 0.772).abs() < 1e-3);
    }
}
