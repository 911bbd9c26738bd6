// core/mod.rs
//
// Character storage and the fixed-rate tick loop.

pub mod stage;
pub mod time;

pub use stage::{Stage, TickReport};
pub use time::TickClock;
