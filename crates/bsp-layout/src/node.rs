// ABOUTME: Immutable partition nodes and the recursive update rules between them.
// ABOUTME: Every update returns the value a node reports to its owner; None means "remove me".

use std::fmt;
use std::sync::Arc;

use bsp_core::Swatch;
use serde::Serialize;

use crate::LayoutError;

/// Smallest ratio a resize can commit
pub const MIN_RATIO: f32 = 0.05;
/// Largest ratio a resize can commit
pub const MAX_RATIO: f32 = 0.95;
/// Ratio given to freshly split nodes
pub const DEFAULT_RATIO: f32 = 0.5;

/// Clamp a raw ratio to `[MIN_RATIO, MAX_RATIO]`; NaN maps to `DEFAULT_RATIO`
pub fn clamp_ratio(ratio: f32) -> f32 {
    if ratio.is_nan() {
        return DEFAULT_RATIO;
    }
    ratio.clamp(MIN_RATIO, MAX_RATIO)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

/// Direction a split divides its container.
///
/// `Horizontal` places the children side by side and measures the ratio along x,
/// `Vertical` stacks them and measures along y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Axis {
    #[serde(rename = "h")]
    Horizontal,
    #[serde(rename = "v")]
    Vertical,
}

impl Axis {
    /// Colors given to the two leaves created by a split along this axis
    pub fn child_swatches(self) -> [Swatch; 2] {
        match self {
            Axis::Horizontal => [Swatch::Blue100, Swatch::Blue200],
            Axis::Vertical => [Swatch::Green100, Swatch::Green200],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChildSlot {
    First,
    Second,
}

impl ChildSlot {
    pub fn index(self) -> usize {
        match self {
            ChildSlot::First => 0,
            ChildSlot::Second => 1,
        }
    }

    pub fn other(self) -> ChildSlot {
        match self {
            ChildSlot::First => ChildSlot::Second,
            ChildSlot::Second => ChildSlot::First,
        }
    }
}

/// Child slots leading from the root to a node. The empty path is the root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodePath(Vec<ChildSlot>);

impl NodePath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn child(&self, slot: ChildSlot) -> Self {
        let mut slots = self.0.clone();
        slots.push(slot);
        Self(slots)
    }

    pub fn slots(&self) -> &[ChildSlot] {
        &self.0
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }
}

impl From<Vec<ChildSlot>> for NodePath {
    fn from(slots: Vec<ChildSlot>) -> Self {
        Self(slots)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "root")?;
        for slot in &self.0 {
            write!(f, ".{}", slot.index())?;
        }
        Ok(())
    }
}

/// The three controls drawn on every leaf
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeafAction {
    Split(Axis),
    Delete,
}

impl LeafAction {
    /// Controls in the order they are laid out on a leaf
    pub const ALL: [LeafAction; 3] = [
        LeafAction::Split(Axis::Horizontal),
        LeafAction::Split(Axis::Vertical),
        LeafAction::Delete,
    ];
}

/// Hands out node ids; every id it returns is larger than any it has seen
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    /// Start allocating after the highest id present in `root`
    pub fn after(root: &PartitionNode) -> Self {
        Self {
            next: root.max_id().0 + 1,
        }
    }

    pub fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next);
        self.next += 1;
        id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NodeKind {
    Leaf {
        #[serde(skip_serializing_if = "Option::is_none")]
        color: Option<Swatch>,
    },
    Split {
        #[serde(rename = "type")]
        axis: Axis,
        ratio: f32,
        children: [Arc<PartitionNode>; 2],
    },
}

/// One region of the partition: either a colored leaf or a split with two children.
///
/// Nodes are never changed in place. Updates build a new node that shares the
/// untouched child with the old one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartitionNode {
    pub id: NodeId,
    #[serde(flatten)]
    pub kind: NodeKind,
}

impl PartitionNode {
    pub fn leaf(id: NodeId, color: Option<Swatch>) -> Self {
        Self {
            id,
            kind: NodeKind::Leaf { color },
        }
    }

    pub fn split(
        id: NodeId,
        axis: Axis,
        ratio: f32,
        first: PartitionNode,
        second: PartitionNode,
    ) -> Self {
        Self {
            id,
            kind: NodeKind::Split {
                axis,
                ratio,
                children: [Arc::new(first), Arc::new(second)],
            },
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { .. })
    }

    pub fn axis(&self) -> Option<Axis> {
        match &self.kind {
            NodeKind::Split { axis, .. } => Some(*axis),
            NodeKind::Leaf { .. } => None,
        }
    }

    pub fn ratio(&self) -> Option<f32> {
        match &self.kind {
            NodeKind::Split { ratio, .. } => Some(*ratio),
            NodeKind::Leaf { .. } => None,
        }
    }

    pub fn color(&self) -> Option<Swatch> {
        match &self.kind {
            NodeKind::Leaf { color } => *color,
            NodeKind::Split { .. } => None,
        }
    }

    pub fn children(&self) -> Option<&[Arc<PartitionNode>; 2]> {
        match &self.kind {
            NodeKind::Split { children, .. } => Some(children),
            NodeKind::Leaf { .. } => None,
        }
    }

    pub fn child(&self, slot: ChildSlot) -> Option<&Arc<PartitionNode>> {
        self.children().map(|children| &children[slot.index()])
    }

    /// Follow `path` down from this node
    pub fn descendant(&self, path: &NodePath) -> Option<&PartitionNode> {
        let mut node = self;
        for slot in path.slots() {
            node = node.child(*slot)?;
        }
        Some(node)
    }

    pub fn leaf_count(&self) -> usize {
        match &self.kind {
            NodeKind::Leaf { .. } => 1,
            NodeKind::Split { children, .. } => {
                children[0].leaf_count() + children[1].leaf_count()
            }
        }
    }

    pub fn max_id(&self) -> NodeId {
        match &self.kind {
            NodeKind::Leaf { .. } => self.id,
            NodeKind::Split { children, .. } => self
                .id
                .max(children[0].max_id())
                .max(children[1].max_id()),
        }
    }

    /// Gesture on a leaf control. Splitting keeps this node's id on the new
    /// split; deleting reports removal.
    pub fn apply_leaf_action(
        &self,
        action: LeafAction,
        ids: &mut IdAllocator,
    ) -> Result<Option<PartitionNode>, LayoutError> {
        if !self.is_leaf() {
            return Err(LayoutError::NotALeaf(self.id));
        }
        match action {
            LeafAction::Split(axis) => {
                let [first_color, second_color] = axis.child_swatches();
                let first = PartitionNode::leaf(ids.next_id(), Some(first_color));
                let second = PartitionNode::leaf(ids.next_id(), Some(second_color));
                Ok(Some(PartitionNode::split(
                    self.id,
                    axis,
                    DEFAULT_RATIO,
                    first,
                    second,
                )))
            }
            LeafAction::Delete => Ok(None),
        }
    }

    /// What this split reports when the child in `slot` reports `next`.
    ///
    /// A removed child collapses the split into its surviving sibling. Any other
    /// change produces a copy with only that slot replaced.
    pub fn update_child(
        &self,
        slot: ChildSlot,
        next: Option<PartitionNode>,
    ) -> Result<PartitionNode, LayoutError> {
        let NodeKind::Split {
            axis,
            ratio,
            children,
        } = &self.kind
        else {
            return Err(LayoutError::NotASplit(self.id));
        };

        let Some(next) = next else {
            return Ok(PartitionNode::clone(&children[slot.other().index()]));
        };

        let mut children = children.clone();
        children[slot.index()] = Arc::new(next);
        Ok(PartitionNode {
            id: self.id,
            kind: NodeKind::Split {
                axis: *axis,
                ratio: *ratio,
                children,
            },
        })
    }

    /// Copy of this split with a new (clamped) ratio
    pub fn with_ratio(&self, ratio: f32) -> Result<PartitionNode, LayoutError> {
        let NodeKind::Split { axis, children, .. } = &self.kind else {
            return Err(LayoutError::NotASplit(self.id));
        };
        Ok(PartitionNode {
            id: self.id,
            kind: NodeKind::Split {
                axis: *axis,
                ratio: clamp_ratio(ratio),
                children: children.clone(),
            },
        })
    }

    /// Run `f` on the node at `path` and carry its report back up to this node.
    ///
    /// Each level forwards its child's report through `update_child`, so a
    /// removal deep in the tree collapses exactly one split per level it
    /// passes through.
    pub fn apply_at<F>(&self, path: &NodePath, f: F) -> Result<Option<PartitionNode>, LayoutError>
    where
        F: FnOnce(&PartitionNode) -> Result<Option<PartitionNode>, LayoutError>,
    {
        self.apply_at_depth(path, 0, f)
    }

    fn apply_at_depth<F>(
        &self,
        path: &NodePath,
        depth: usize,
        f: F,
    ) -> Result<Option<PartitionNode>, LayoutError>
    where
        F: FnOnce(&PartitionNode) -> Result<Option<PartitionNode>, LayoutError>,
    {
        let Some(slot) = path.slots().get(depth).copied() else {
            return f(self);
        };
        let child = self
            .child(slot)
            .ok_or_else(|| LayoutError::InvalidPath(path.clone()))?;
        let next = child.apply_at_depth(path, depth + 1, f)?;
        self.update_child(slot, next).map(Some)
    }
}
