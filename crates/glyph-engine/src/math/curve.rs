// math/curve.rs
//
// Segment geometry: straight lines and quadratic/cubic bezier curves.

use glam::Vec2;

use super::easing::lerp_vec2;

/// Control points bending a segment between two coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Controls {
    /// Straight line.
    #[default]
    None,
    /// Quadratic bezier.
    Quadratic(Vec2),
    /// Cubic bezier.
    Cubic(Vec2, Vec2),
}

impl Controls {
    /// Build from an optional pair, as stored on a waypoint.
    pub fn from_points(points: &[Vec2]) -> Self {
        match points {
            [] => Controls::None,
            [c] => Controls::Quadratic(*c),
            [c1, c2, ..] => Controls::Cubic(*c1, *c2),
        }
    }
}

/// Point at `t` along the segment `start -> end`.
///
/// A zero-length straight segment always yields `start`.
pub fn interpolate(start: Vec2, end: Vec2, controls: Controls, t: f32) -> Vec2 {
    match controls {
        Controls::None => {
            if start == end {
                start
            } else {
                lerp_vec2(start, end, t)
            }
        }
        Controls::Quadratic(c) => {
            let u = 1.0 - t;
            start * (u * u) + c * (2.0 * u * t) + end * (t * t)
        }
        Controls::Cubic(c1, c2) => {
            let u = 1.0 - t;
            start * (u * u * u)
                + c1 * (3.0 * u * u * t)
                + c2 * (3.0 * u * t * t)
                + end * (t * t * t)
        }
    }
}

/// Approximate length of a segment.
///
/// Straight segments are exact; curves are measured as a polyline of
/// `samples` pieces.
pub fn segment_length(start: Vec2, end: Vec2, controls: Controls, samples: usize) -> f32 {
    if controls == Controls::None {
        return start.distance(end);
    }

    let samples = samples.max(2);
    let mut length = 0.0;
    let mut prev = start;
    for i in 1..=samples {
        let point = interpolate(start, end, controls, i as f32 / samples as f32);
        length += prev.distance(point);
        prev = point;
    }
    length
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_endpoints_are_exact() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(9.0, -4.0);
        assert_eq!(interpolate(a, b, Controls::None, 0.0), a);
        assert_eq!(interpolate(a, b, Controls::None, 1.0), b);
    }

    #[test]
    fn zero_length_returns_start_for_any_t() {
        let a = Vec2::new(3.0, 3.0);
        for t in [0.0, 0.3, 1.0, 2.0] {
            assert_eq!(interpolate(a, a, Controls::None, t), a);
        }
        assert_eq!(segment_length(a, a, Controls::None, 16), 0.0);
    }

    #[test]
    fn quadratic_passes_through_midpoint_pull() {
        let start = Vec2::new(0.0, 0.0);
        let end = Vec2::new(10.0, 0.0);
        let mid = interpolate(start, end, Controls::Quadratic(Vec2::new(5.0, 10.0)), 0.5);
        assert!((mid.x - 5.0).abs() < 1e-5);
        assert!((mid.y - 5.0).abs() < 1e-5);
    }

    #[test]
    fn cubic_endpoints_are_exact() {
        let start = Vec2::new(0.0, 0.0);
        let end = Vec2::new(4.0, 4.0);
        let controls = Controls::Cubic(Vec2::new(0.0, 4.0), Vec2::new(4.0, 0.0));
        assert_eq!(interpolate(start, end, controls, 0.0), start);
        assert_eq!(interpolate(start, end, controls, 1.0), end);
    }

    #[test]
    fn curved_length_exceeds_chord() {
        let start = Vec2::ZERO;
        let end = Vec2::new(10.0, 0.0);
        let curved = segment_length(start, end, Controls::Quadratic(Vec2::new(5.0, 10.0)), 32);
        assert!(curved > 10.0);
        assert_eq!(segment_length(start, end, Controls::None, 32), 10.0);
    }

    #[test]
    fn controls_from_points() {
        assert_eq!(Controls::from_points(&[]), Controls::None);
        assert_eq!(
            Controls::from_points(&[Vec2::ONE]),
            Controls::Quadratic(Vec2::ONE)
        );
        assert_eq!(
            Controls::from_points(&[Vec2::ONE, Vec2::ZERO]),
            Controls::Cubic(Vec2::ONE, Vec2::ZERO)
        );
    }
}
