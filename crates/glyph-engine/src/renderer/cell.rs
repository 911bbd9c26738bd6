// renderer/cell.rs
//
// Per-tick render output: cells, numeric instances, snapshots.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::api::types::{CharacterId, Visual};

/// Per-character numeric record for flat export to an external canvas.
/// 4 floats = 16 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct CellInstance {
    /// Column, with sub-cell precision.
    pub x: f32,
    /// Row, with sub-cell precision.
    pub y: f32,
    /// Draw order.
    pub layer: f32,
    /// 1.0 when the character should be drawn, else 0.0.
    pub visible: f32,
}

impl CellInstance {
    pub const FLOATS: usize = 4;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Everything the renderer needs to draw one character.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderCell {
    pub id: CharacterId,
    pub coord: Vec2,
    pub visible: bool,
    pub layer: i32,
    /// `None` when no appearance has ever been applied: draw nothing.
    pub visual: Option<Visual>,
}

impl RenderCell {
    /// Terminal cell the coordinate falls in.
    pub fn cell(&self) -> (i32, i32) {
        (self.coord.x.round() as i32, self.coord.y.round() as i32)
    }

    /// Whether anything should be drawn for this character.
    pub fn is_drawable(&self) -> bool {
        self.visible && self.visual.is_some()
    }

    pub fn instance(&self) -> CellInstance {
        CellInstance {
            x: self.coord.x,
            y: self.coord.y,
            layer: self.layer as f32,
            visible: if self.is_drawable() { 1.0 } else { 0.0 },
        }
    }
}

/// All characters as of one tick, ordered back to front.
///
/// Cells are sorted by layer; characters sharing a layer keep stage order.
#[derive(Debug, Clone, Default)]
pub struct FrameSnapshot {
    /// Tick the snapshot was taken after.
    pub tick: u64,
    cells: Vec<RenderCell>,
    instances: Vec<CellInstance>,
}

impl FrameSnapshot {
    pub fn new(tick: u64, mut cells: Vec<RenderCell>) -> Self {
        cells.sort_by_key(|c| c.layer);
        let instances = cells.iter().map(RenderCell::instance).collect();
        Self { tick, cells, instances }
    }

    pub fn cells(&self) -> &[RenderCell] {
        &self.cells
    }

    /// Numeric records in the same order as `cells()`.
    pub fn instances(&self) -> &[CellInstance] {
        &self.instances
    }

    /// Raw bytes of `instances()` for zero-copy hand-off.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(id: u32, layer: i32, visible: bool) -> RenderCell {
        RenderCell {
            id: CharacterId(id),
            coord: Vec2::new(id as f32 + 0.4, 1.6),
            visible,
            layer,
            visual: Some(Visual::new("x", None)),
        }
    }

    #[test]
    fn instance_stride_is_sixteen_bytes() {
        assert_eq!(std::mem::size_of::<CellInstance>(), CellInstance::STRIDE_BYTES);
    }

    #[test]
    fn snapshot_sorts_by_layer_stably() {
        let snapshot = FrameSnapshot::new(1, vec![cell(0, 2, true), cell(1, 0, true), cell(2, 2, true)]);
        let ids: Vec<u32> = snapshot.cells().iter().map(|c| c.id.0).collect();
        assert_eq!(ids, vec![1, 0, 2]);
        assert_eq!(snapshot.instances()[0].layer, 0.0);
    }

    #[test]
    fn hidden_or_blank_cells_export_invisible() {
        let mut blank = cell(1, 0, true);
        blank.visual = None;
        let snapshot = FrameSnapshot::new(0, vec![cell(0, 0, false), blank, cell(2, 0, true)]);
        let flags: Vec<f32> = snapshot.instances().iter().map(|i| i.visible).collect();
        assert_eq!(flags, vec![0.0, 0.0, 1.0]);
    }

    #[test]
    fn bytes_cover_every_instance() {
        let snapshot = FrameSnapshot::new(0, vec![cell(0, 0, true), cell(1, 1, true)]);
        assert_eq!(snapshot.as_bytes().len(), 2 * CellInstance::STRIDE_BYTES);
    }

    #[test]
    fn cell_rounds_to_nearest() {
        assert_eq!(cell(3, 0, true).cell(), (3, 2));
    }
}
