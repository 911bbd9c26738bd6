// renderer/mod.rs
//
// Output handed to an external terminal canvas.

pub mod cell;

pub use cell::{CellInstance, FrameSnapshot, RenderCell};
