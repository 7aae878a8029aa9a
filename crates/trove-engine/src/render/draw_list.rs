use crate::coords::Vec2;
use crate::paint::Color;

/// Filled circle in logical pixels, with an optional outline.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CircleCmd {
    pub center: Vec2,
    pub radius: f32,
    pub color: Color,
    /// `(width, color)` of an outline drawn inside the radius.
    pub border: Option<(f32, Color)>,
    /// Distance from the camera; larger is painted first. Overlays use `0.0`.
    pub depth: f32,
}

impl CircleCmd {
    pub fn new(center: Vec2, radius: f32, color: Color) -> Self {
        Self {
            center,
            radius,
            color,
            border: None,
            depth: 0.0,
        }
    }

    pub fn with_border(mut self, width: f32, color: Color) -> Self {
        self.border = Some((width, color));
        self
    }

    pub fn at_depth(mut self, depth: f32) -> Self {
        self.depth = depth;
        self
    }
}

/// Recorded circles for a frame.
///
/// - `push()` is O(1)
/// - paint-order iteration reuses an internal index buffer; no per-frame
///   allocation once warmed
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<CircleCmd>,
    sorted_indices: Vec<usize>,
    sorted_dirty: bool,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded items. Keeps allocated capacity for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
        self.sorted_indices.clear();
        self.sorted_dirty = true;
    }

    #[inline]
    pub fn push(&mut self, cmd: CircleCmd) {
        self.items.push(cmd);
        self.sorted_dirty = true;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in insertion order.
    #[inline]
    pub fn items(&self) -> &[CircleCmd] {
        &self.items
    }

    /// Iterates items back-to-front. Equal depths keep insertion order.
    pub fn iter_in_paint_order(&mut self) -> impl Iterator<Item = &CircleCmd> {
        if self.sorted_dirty {
            self.rebuild_sorted_indices();
        }
        self.sorted_indices.iter().map(|&i| &self.items[i])
    }

    fn rebuild_sorted_indices(&mut self) {
        self.sorted_indices.clear();
        self.sorted_indices.extend(0..self.items.len());

        let items = &self.items;
        self.sorted_indices
            .sort_by(|&a, &b| items[b].depth.total_cmp(&items[a].depth));

        self.sorted_dirty = false;
    }
}
