// ABOUTME: Two-state machine for dragging a divider.
// ABOUTME: Keeps a preview ratio while dragging and reports it once on release.

use crate::geometry::Rect;
use crate::node::{clamp_ratio, Axis, NodePath};

#[derive(Debug, Clone, PartialEq)]
pub struct ActiveDrag {
    pub path: NodePath,
    pub axis: Axis,
    /// Container box captured when the drag started
    pub bounds: Rect,
    /// Ratio shown while dragging; not yet in the tree
    pub preview_ratio: f32,
}

impl ActiveDrag {
    fn ratio_at(&self, x: f32, y: f32) -> f32 {
        let raw = match self.axis {
            Axis::Horizontal => (x - self.bounds.x) / self.bounds.width,
            Axis::Vertical => (y - self.bounds.y) / self.bounds.height,
        };
        clamp_ratio(raw)
    }
}

/// A finished drag, ready to be stored on the split at `path`
#[derive(Debug, Clone, PartialEq)]
pub struct RatioCommit {
    pub path: NodePath,
    pub ratio: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum ResizeDrag {
    #[default]
    Idle,
    Dragging(ActiveDrag),
}

impl ResizeDrag {
    pub fn is_dragging(&self) -> bool {
        matches!(self, ResizeDrag::Dragging(_))
    }

    /// Start dragging the divider of the split at `path`.
    ///
    /// Returns false and stays idle when the container could not be measured
    /// or another drag is already running.
    pub fn begin(&mut self, path: NodePath, axis: Axis, ratio: f32, bounds: Option<Rect>) -> bool {
        if self.is_dragging() {
            return false;
        }
        let Some(bounds) = bounds.filter(|b| b.extent(axis) > 0.0) else {
            tracing::debug!("Ignoring resize of {}: container not measured", path);
            return false;
        };
        *self = ResizeDrag::Dragging(ActiveDrag {
            path,
            axis,
            bounds,
            preview_ratio: clamp_ratio(ratio),
        });
        true
    }

    /// Track the pointer; returns the new preview ratio while dragging
    pub fn pointer_moved(&mut self, x: f32, y: f32) -> Option<f32> {
        let ResizeDrag::Dragging(drag) = self else {
            return None;
        };
        drag.preview_ratio = drag.ratio_at(x, y);
        Some(drag.preview_ratio)
    }

    /// End the drag. Only the first release after a begin yields a commit.
    pub fn release(&mut self) -> Option<RatioCommit> {
        match std::mem::take(self) {
            ResizeDrag::Idle => None,
            ResizeDrag::Dragging(drag) => Some(RatioCommit {
                path: drag.path,
                ratio: drag.preview_ratio,
            }),
        }
    }

    /// Path and ratio to draw in place of the stored one
    pub fn preview(&self) -> Option<(&NodePath, f32)> {
        match self {
            ResizeDrag::Idle => None,
            ResizeDrag::Dragging(drag) => Some((&drag.path, drag.preview_ratio)),
        }
    }
}
