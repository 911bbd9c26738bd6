// math/mod.rs
//
// Pure geometry and easing. Nothing here knows about characters.

pub mod curve;
pub mod easing;

pub use curve::{Controls, interpolate, segment_length};
pub use easing::{Easing, EasingFn, lerp, lerp_vec2};
