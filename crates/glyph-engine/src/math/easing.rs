// math/easing.rs
//
// Pure easing functions for path and scene progress.
// No dependencies on Motion or Animation, just math.

use std::f32::consts::PI;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A caller-supplied easing function.
pub type EasingFn = fn(f32) -> f32;

/// Easing function applied to progress before interpolation or frame selection.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Constant velocity (no easing).
    #[default]
    Linear,
    SineIn,
    SineOut,
    SineInOut,
    /// Slow start.
    QuadIn,
    /// Slow end.
    QuadOut,
    /// Slow start and end.
    QuadInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
    QuartIn,
    QuartOut,
    QuartInOut,
    QuintIn,
    QuintOut,
    QuintInOut,
    /// Exponential easing (dramatic).
    ExpoIn,
    ExpoOut,
    ExpoInOut,
    CircIn,
    CircOut,
    CircInOut,
    /// Overshoot then settle.
    BackIn,
    BackOut,
    BackInOut,
    /// Elastic spring.
    ElasticIn,
    ElasticOut,
    ElasticInOut,
    /// Bouncy start.
    BounceIn,
    /// Bouncy finish.
    BounceOut,
    BounceInOut,
    /// Any function the caller provides. Not serializable.
    #[serde(skip)]
    Custom(EasingFn),
}

impl PartialEq for Easing {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Easing::Custom(a), Easing::Custom(b)) => *a as usize == *b as usize,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

impl Easing {
    /// Apply the easing function to a progress value.
    ///
    /// `t` is clamped to [0, 1]. The result is not: Back and Elastic overshoot,
    /// and a custom function may return anything.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,

            // Sine
            Easing::SineIn => 1.0 - (t * PI / 2.0).cos(),
            Easing::SineOut => (t * PI / 2.0).sin(),
            Easing::SineInOut => -((PI * t).cos() - 1.0) / 2.0,

            // Polynomial
            Easing::QuadIn => t.powi(2),
            Easing::QuadOut => 1.0 - (1.0 - t).powi(2),
            Easing::QuadInOut => in_out_poly(t, 2),
            Easing::CubicIn => t.powi(3),
            Easing::CubicOut => 1.0 - (1.0 - t).powi(3),
            Easing::CubicInOut => in_out_poly(t, 3),
            Easing::QuartIn => t.powi(4),
            Easing::QuartOut => 1.0 - (1.0 - t).powi(4),
            Easing::QuartInOut => in_out_poly(t, 4),
            Easing::QuintIn => t.powi(5),
            Easing::QuintOut => 1.0 - (1.0 - t).powi(5),
            Easing::QuintInOut => in_out_poly(t, 5),

            // Exponential
            Easing::ExpoIn => {
                if t == 0.0 { 0.0 } else { 2.0_f32.powf(10.0 * t - 10.0) }
            }
            Easing::ExpoOut => {
                if t == 1.0 { 1.0 } else { 1.0 - 2.0_f32.powf(-10.0 * t) }
            }
            Easing::ExpoInOut => {
                if t == 0.0 {
                    0.0
                } else if t == 1.0 {
                    1.0
                } else if t < 0.5 {
                    2.0_f32.powf(20.0 * t - 10.0) / 2.0
                } else {
                    (2.0 - 2.0_f32.powf(-20.0 * t + 10.0)) / 2.0
                }
            }

            // Circular
            Easing::CircIn => 1.0 - (1.0 - t * t).max(0.0).sqrt(),
            Easing::CircOut => (1.0 - (t - 1.0).powi(2)).max(0.0).sqrt(),
            Easing::CircInOut => {
                if t < 0.5 {
                    (1.0 - (1.0 - (2.0 * t).powi(2)).max(0.0).sqrt()) / 2.0
                } else {
                    ((1.0 - (-2.0 * t + 2.0).powi(2)).max(0.0).sqrt() + 1.0) / 2.0
                }
            }

            // Back (overshoot)
            Easing::BackIn => {
                const C1: f32 = 1.70158;
                const C3: f32 = C1 + 1.0;
                C3 * t * t * t - C1 * t * t
            }
            Easing::BackOut => {
                const C1: f32 = 1.70158;
                const C3: f32 = C1 + 1.0;
                1.0 + C3 * (t - 1.0).powi(3) + C1 * (t - 1.0).powi(2)
            }
            Easing::BackInOut => {
                const C1: f32 = 1.70158;
                const C2: f32 = C1 * 1.525;
                if t < 0.5 {
                    (2.0 * t).powi(2) * ((C2 + 1.0) * 2.0 * t - C2) / 2.0
                } else {
                    ((2.0 * t - 2.0).powi(2) * ((C2 + 1.0) * (t * 2.0 - 2.0) + C2) + 2.0) / 2.0
                }
            }

            // Elastic
            Easing::ElasticIn => {
                const C4: f32 = (2.0 * PI) / 3.0;
                if t == 0.0 || t == 1.0 {
                    t
                } else {
                    -(2.0_f32.powf(10.0 * t - 10.0)) * ((t * 10.0 - 10.75) * C4).sin()
                }
            }
            Easing::ElasticOut => {
                const C4: f32 = (2.0 * PI) / 3.0;
                if t == 0.0 || t == 1.0 {
                    t
                } else {
                    2.0_f32.powf(-10.0 * t) * ((t * 10.0 - 0.75) * C4).sin() + 1.0
                }
            }
            Easing::ElasticInOut => {
                const C5: f32 = (2.0 * PI) / 4.5;
                if t == 0.0 || t == 1.0 {
                    t
                } else if t < 0.5 {
                    -(2.0_f32.powf(20.0 * t - 10.0) * ((20.0 * t - 11.125) * C5).sin()) / 2.0
                } else {
                    2.0_f32.powf(-20.0 * t + 10.0) * ((20.0 * t - 11.125) * C5).sin() / 2.0 + 1.0
                }
            }

            // Bounce
            Easing::BounceIn => 1.0 - bounce_out(1.0 - t),
            Easing::BounceOut => bounce_out(t),
            Easing::BounceInOut => {
                if t < 0.5 {
                    (1.0 - bounce_out(1.0 - 2.0 * t)) / 2.0
                } else {
                    (1.0 + bounce_out(2.0 * t - 1.0)) / 2.0
                }
            }

            Easing::Custom(f) => f(t),
        }
    }

    /// Look up a named easing, e.g. `"quad_in_out"`.
    pub fn from_name(name: &str) -> Option<Self> {
        let easing = match name {
            "linear" => Easing::Linear,
            "sine_in" => Easing::SineIn,
            "sine_out" => Easing::SineOut,
            "sine_in_out" => Easing::SineInOut,
            "quad_in" => Easing::QuadIn,
            "quad_out" => Easing::QuadOut,
            "quad_in_out" => Easing::QuadInOut,
            "cubic_in" => Easing::CubicIn,
            "cubic_out" => Easing::CubicOut,
            "cubic_in_out" => Easing::CubicInOut,
            "quart_in" => Easing::QuartIn,
            "quart_out" => Easing::QuartOut,
            "quart_in_out" => Easing::QuartInOut,
            "quint_in" => Easing::QuintIn,
            "quint_out" => Easing::QuintOut,
            "quint_in_out" => Easing::QuintInOut,
            "expo_in" => Easing::ExpoIn,
            "expo_out" => Easing::ExpoOut,
            "expo_in_out" => Easing::ExpoInOut,
            "circ_in" => Easing::CircIn,
            "circ_out" => Easing::CircOut,
            "circ_in_out" => Easing::CircInOut,
            "back_in" => Easing::BackIn,
            "back_out" => Easing::BackOut,
            "back_in_out" => Easing::BackInOut,
            "elastic_in" => Easing::ElasticIn,
            "elastic_out" => Easing::ElasticOut,
            "elastic_in_out" => Easing::ElasticInOut,
            "bounce_in" => Easing::BounceIn,
            "bounce_out" => Easing::BounceOut,
            "bounce_in_out" => Easing::BounceInOut,
            _ => return None,
        };
        Some(easing)
    }
}

#[inline]
fn in_out_poly(t: f32, n: i32) -> f32 {
    if t < 0.5 {
        2.0_f32.powi(n - 1) * t.powi(n)
    } else {
        1.0 - (-2.0 * t + 2.0).powi(n) / 2.0
    }
}

#[inline]
fn bounce_out(t: f32) -> f32 {
    const N1: f32 = 7.5625;
    const D1: f32 = 2.75;

    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let t = t - 1.5 / D1;
        N1 * t * t + 0.75
    } else if t < 2.5 / D1 {
        let t = t - 2.25 / D1;
        N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / D1;
        N1 * t * t + 0.984375
    }
}

// ── Interpolation helpers ────────────────────────────────────────────────

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Linearly interpolate between two points.
#[inline]
pub fn lerp_vec2(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 31] = [
        Easing::Linear,
        Easing::SineIn, Easing::SineOut, Easing::SineInOut,
        Easing::QuadIn, Easing::QuadOut, Easing::QuadInOut,
        Easing::CubicIn, Easing::CubicOut, Easing::CubicInOut,
        Easing::QuartIn, Easing::QuartOut, Easing::QuartInOut,
        Easing::QuintIn, Easing::QuintOut, Easing::QuintInOut,
        Easing::ExpoIn, Easing::ExpoOut, Easing::ExpoInOut,
        Easing::CircIn, Easing::CircOut, Easing::CircInOut,
        Easing::BackIn, Easing::BackOut, Easing::BackInOut,
        Easing::ElasticIn, Easing::ElasticOut, Easing::ElasticInOut,
        Easing::BounceIn, Easing::BounceOut, Easing::BounceInOut,
    ];

    #[test]
    fn linear_endpoints() {
        assert_eq!(Easing::Linear.apply(0.0), 0.0);
        assert_eq!(Easing::Linear.apply(1.0), 1.0);
        assert_eq!(Easing::Linear.apply(0.5), 0.5);
    }

    #[test]
    fn every_named_easing_hits_both_endpoints() {
        for easing in ALL {
            assert!(easing.apply(0.0).abs() < 1e-4, "{:?} at 0", easing);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-4, "{:?} at 1", easing);
        }
    }

    #[test]
    fn input_is_clamped() {
        assert_eq!(Easing::Linear.apply(-3.0), 0.0);
        assert_eq!(Easing::Linear.apply(7.0), 1.0);
    }

    #[test]
    fn quad_out_faster_start() {
        let mid = Easing::QuadOut.apply(0.5);
        assert!(mid > 0.5, "QuadOut at 0.5 should be > 0.5, got {}", mid);
    }

    #[test]
    fn back_in_dips_below_zero() {
        assert!(Easing::BackIn.apply(0.2) < 0.0);
    }

    #[test]
    fn custom_function_is_used() {
        fn snap(t: f32) -> f32 {
            if t < 0.5 { 0.0 } else { 1.0 }
        }
        let easing = Easing::Custom(snap);
        assert_eq!(easing.apply(0.4), 0.0);
        assert_eq!(easing.apply(0.6), 1.0);
        assert_eq!(easing, Easing::Custom(snap));
        assert_ne!(easing, Easing::Linear);
    }

    #[test]
    fn names_round_trip_through_serde_names() {
        assert_eq!(Easing::from_name("quad_in_out"), Some(Easing::QuadInOut));
        assert_eq!(Easing::from_name("bounce_out"), Some(Easing::BounceOut));
        assert_eq!(Easing::from_name("wobble"), None);
    }

    #[test]
    fn lerp_vec2_midpoint() {
        let mid = lerp_vec2(Vec2::ZERO, Vec2::new(10.0, 4.0), 0.5);
        assert_eq!(mid, Vec2::new(5.0, 2.0));
        assert!((lerp(100.0, 200.0, 0.25) - 125.0).abs() < 1e-4);
    }
}
