//! # Drag and drop
//!
//! Pointer capture lives in the host. The editor only sees three events: a drag starts with
//! a [`DragSource`], the pointer moves (nothing to record), and the drag ends either with a
//! drop or without one. The transient state is read once by the drop handler and cleared.

use mailblocks_blocks::NestedRef;
use serde::{Deserialize, Serialize};

/// What is being dragged
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum DragSource {
    /// A new block of this type, from the palette
    Palette { block_type: String },
    /// An existing top-level block
    TopBlock { id: String },
    /// A block inside a container column
    Nested { entry: NestedRef },
}

/// Vertical extent of one rendered sibling, in the host's coordinate space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub top: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn midpoint(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

/// Insertion index for a drop at `y` among siblings laid out as `rects`.
///
/// The drop lands before the first sibling whose midpoint is below the pointer, or at the
/// end when there is none. The canvas and columns share this rule.
pub fn resolve_drop_index(y: f64, rects: &[Rect]) -> usize {
    rects
        .iter()
        .position(|rect| y < rect.midpoint())
        .unwrap_or(rects.len())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragState {
    source: Option<DragSource>,
}

impl DragState {
    pub fn start(&mut self, source: DragSource) {
        self.source = Some(source);
    }

    pub fn end(&mut self) {
        self.source = None;
    }

    pub fn current(&self) -> Option<&DragSource> {
        self.source.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.source.is_some()
    }

    /// Consume the drag for a drop
    pub(crate) fn take(&mut self) -> Option<DragSource> {
        self.source.take()
    }
}
