//! Spatial sampling on the horizontal plane
//!
//! Ring sampling draws area-uniform points in an annulus; rectangle tests are
//! the cheap AABB checks used for exclusion zones.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use super::rng::RandomStream;

/// A coordinate on the horizontal (x, z) plane
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub z: f64,
}

impl Point2D {
    pub fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }

    /// Distance from the origin
    pub fn length(&self) -> f64 {
        (self.x * self.x + self.z * self.z).sqrt()
    }
}

/// Axis-aligned rectangle on the horizontal plane, bounds inclusive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExclusionRect {
    pub x_min: f64,
    pub x_max: f64,
    pub z_min: f64,
    pub z_max: f64,
}

impl ExclusionRect {
    pub const fn new(x_min: f64, x_max: f64, z_min: f64, z_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            z_min,
            z_max,
        }
    }
}

/// Draw a point uniformly (by area) inside the ring `[inner_radius, outer_radius]`
///
/// Consumes two draws: the angle first, then the squared radius. Expects
/// `0 <= inner_radius <= outer_radius`; the bounds are not checked.
pub fn point_in_ring(rng: &mut RandomStream, inner_radius: f64, outer_radius: f64) -> Point2D {
    let angle = rng.next_f64() * PI * 2.0;
    let inner_sq = inner_radius * inner_radius;
    let radius_sq = inner_sq + rng.next_f64() * (outer_radius * outer_radius - inner_sq);
    let radius = radius_sq.sqrt();

    Point2D {
        x: angle.cos() * radius,
        z: angle.sin() * radius,
    }
}

/// Inclusive containment test
pub fn point_in_rect(point: Point2D, rect: &ExclusionRect) -> bool {
    point.x >= rect.x_min && point.x <= rect.x_max && point.z >= rect.z_min && point.z <= rect.z_max
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_reference_point_seed_11() {
        // First island tree candidate: inner clear 10 + 3, island radius 33 - 1.6
        let mut rng = RandomStream::new(11);
        let angle = rng.next_f64() * PI * 2.0;
        let radius = (13.0f64 * 13.0 + rng.next_f64() * (31.4 * 31.4 - 13.0 * 13.0)).sqrt();
        assert_eq!(angle, 3.2143962274080122);
        assert_eq!(radius, 24.53456781097411);

        let mut rng = RandomStream::new(11);
        let point = point_in_ring(&mut rng, 13.0, 31.4);
        assert!((point.x - -24.469575500126414).abs() < 1e-12);
        assert!((point.z - -1.7846267158429059).abs() < 1e-12);
    }

    #[test]
    fn test_ring_points_within_radii() {
        let mut rng = RandomStream::new(42);
        for _ in 0..5_000 {
            let p = point_in_ring(&mut rng, 13.0, 31.4);
            let d = p.length();
            assert!(d >= 13.0 - 1e-9 && d <= 31.4 + 1e-9, "distance {d}");
        }
    }

    #[test]
    fn test_ring_sampling_is_area_uniform() {
        // Split the ring into bands of equal area; counts should be close.
        let (inner, outer) = (2.0f64, 10.0f64);
        let bands = 8;
        let samples = 80_000;
        let mut counts = vec![0usize; bands];
        let mut rng = RandomStream::new(7);

        for _ in 0..samples {
            let p = point_in_ring(&mut rng, inner, outer);
            let r_sq = p.x * p.x + p.z * p.z;
            let t = (r_sq - inner * inner) / (outer * outer - inner * inner);
            let band = ((t * bands as f64) as usize).min(bands - 1);
            counts[band] += 1;
        }

        let expected = samples as f64 / bands as f64;
        for count in counts {
            let deviation = (count as f64 - expected).abs() / expected;
            assert!(deviation < 0.05, "band deviates by {deviation}");
        }
    }

    #[test]
    fn test_degenerate_ring_is_a_circle() {
        let mut rng = RandomStream::new(3);
        for _ in 0..100 {
            let p = point_in_ring(&mut rng, 5.0, 5.0);
            assert!((p.length() - 5.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_rect_bounds_are_inclusive() {
        let rect = ExclusionRect::new(-1.0, 2.0, -3.0, 4.0);
        assert!(point_in_rect(Point2D::new(-1.0, 0.0), &rect));
        assert!(point_in_rect(Point2D::new(2.0, 0.0), &rect));
        assert!(point_in_rect(Point2D::new(0.0, -3.0), &rect));
        assert!(point_in_rect(Point2D::new(0.0, 4.0), &rect));
        assert!(point_in_rect(Point2D::new(2.0, 4.0), &rect));

        assert!(!point_in_rect(Point2D::new(2.0001, 0.0), &rect));
        assert!(!point_in_rect(Point2D::new(0.0, -3.0001), &rect));
    }
}
