// ABOUTME: Binary space partition layout for resizable panels.
// ABOUTME: Pure tree updates, the root state holder, resize drags, and hit testing.

mod drag;
mod geometry;
mod node;
mod tree;

pub use drag::{ActiveDrag, RatioCommit, ResizeDrag};
pub use geometry::{compute_layout, ControlRegion, DividerRegion, Hit, Layout, LeafRegion, Rect};
pub use node::{
    clamp_ratio, Axis, ChildSlot, IdAllocator, LeafAction, NodeId, NodeKind, NodePath,
    PartitionNode, DEFAULT_RATIO, MAX_RATIO, MIN_RATIO,
};
pub use tree::PartitionTree;

#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("Node {0:?} is not a leaf")]
    NotALeaf(NodeId),

    #[error("Node {0:?} is not a split")]
    NotASplit(NodeId),

    #[error("No node at {0}")]
    InvalidPath(NodePath),
}
