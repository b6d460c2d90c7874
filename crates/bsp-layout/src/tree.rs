// ABOUTME: Owner of the partition root and the entry point for gestures.
// ABOUTME: Routes each gesture through the node update chain and swaps in the new root.

use bsp_core::Swatch;

use crate::node::{Axis, IdAllocator, LeafAction, NodeId, NodePath, PartitionNode};
use crate::LayoutError;

#[derive(Debug)]
pub struct PartitionTree {
    root: PartitionNode,
    ids: IdAllocator,
    revision: u64,
}

impl PartitionTree {
    /// A tree holding a single purple leaf with id 1
    pub fn new() -> Self {
        Self::with_root(PartitionNode::leaf(NodeId(1), Some(Swatch::Purple200)))
    }

    pub fn with_root(root: PartitionNode) -> Self {
        Self {
            ids: IdAllocator::after(&root),
            root,
            revision: 0,
        }
    }

    pub fn root(&self) -> &PartitionNode {
        &self.root
    }

    /// Bumped every time the root is replaced
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    pub fn node_at(&self, path: &NodePath) -> Option<&PartitionNode> {
        self.root.descendant(path)
    }

    /// Ids of all leaves, first child before second
    pub fn leaf_ids(&self) -> Vec<NodeId> {
        let mut result = Vec::new();
        collect_leaves(&self.root, &mut result);
        result
    }

    /// Take the root's report. `None` would delete the last remaining region,
    /// which is ignored so the tree always keeps at least one leaf.
    pub fn apply_change(&mut self, next: Option<PartitionNode>) -> bool {
        let Some(next) = next else {
            tracing::debug!("Ignoring deletion of the root leaf {:?}", self.root.id);
            return false;
        };
        self.root = next;
        self.revision += 1;
        true
    }

    pub fn apply_leaf_action(
        &mut self,
        path: &NodePath,
        action: LeafAction,
    ) -> Result<bool, LayoutError> {
        let ids = &mut self.ids;
        let next = self
            .root
            .apply_at(path, |node| node.apply_leaf_action(action, ids))?;
        Ok(self.apply_change(next))
    }

    pub fn split(&mut self, path: &NodePath, axis: Axis) -> Result<bool, LayoutError> {
        self.apply_leaf_action(path, LeafAction::Split(axis))
    }

    pub fn delete(&mut self, path: &NodePath) -> Result<bool, LayoutError> {
        self.apply_leaf_action(path, LeafAction::Delete)
    }

    /// Store a finished resize on the split at `path`
    pub fn commit_ratio(&mut self, path: &NodePath, ratio: f32) -> Result<bool, LayoutError> {
        let next = self
            .root
            .apply_at(path, |node| node.with_ratio(ratio).map(Some))?;
        Ok(self.apply_change(next))
    }

    /// Pretty JSON of the current tree, for logging
    pub fn snapshot(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.root)
    }
}

fn collect_leaves(node: &PartitionNode, out: &mut Vec<NodeId>) {
    match node.children() {
        None => out.push(node.id),
        Some([first, second]) => {
            collect_leaves(first, out);
            collect_leaves(second, out);
        }
    }
}

impl Default for PartitionTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{ChildSlot, NodeKind, MAX_RATIO, MIN_RATIO};

    fn path(slots: &[ChildSlot]) -> NodePath {
        NodePath::from(slots.to_vec())
    }

    /// Paths of every leaf and every split, pre-order
    fn collect_paths(
        node: &PartitionNode,
        at: NodePath,
        leaves: &mut Vec<NodePath>,
        splits: &mut Vec<NodePath>,
    ) {
        if node.is_leaf() {
            leaves.push(at);
            return;
        }
        splits.push(at.clone());
        for slot in [ChildSlot::First, ChildSlot::Second] {
            if let Some(child) = node.child(slot) {
                collect_paths(child, at.child(slot), leaves, splits);
            }
        }
    }

    /// Checks shape and ratio bounds, collecting every node id along the way
    fn check_well_formed(node: &PartitionNode, ids: &mut Vec<NodeId>) {
        ids.push(node.id);
        match &node.kind {
            NodeKind::Leaf { .. } => {
                assert!(node.axis().is_none());
                assert!(node.children().is_none());
            }
            NodeKind::Split {
                ratio, children, ..
            } => {
                assert!((MIN_RATIO..=MAX_RATIO).contains(ratio), "ratio {ratio}");
                check_well_formed(&children[0], ids);
                check_well_formed(&children[1], ids);
            }
        }
    }

    #[test]
    fn new_tree_has_one_leaf() {
        let tree = PartitionTree::new();
        assert_eq!(tree.leaf_count(), 1);
        assert_eq!(tree.root().id, NodeId(1));
        assert_eq!(tree.root().color(), Some(Swatch::Purple200));
    }

    #[test]
    fn deleting_the_root_leaf_is_ignored() {
        let mut tree = PartitionTree::new();
        assert!(!tree.delete(&NodePath::root()).unwrap());
        assert_eq!(tree.leaf_count(), 1);
        assert_eq!(tree.revision(), 0);
    }

    #[test]
    fn split_then_delete_returns_to_a_single_leaf() {
        let mut tree = PartitionTree::new();
        assert!(tree.split(&NodePath::root(), Axis::Horizontal).unwrap());

        let root = tree.root();
        assert_eq!(root.id, NodeId(1));
        assert_eq!(root.axis(), Some(Axis::Horizontal));
        assert_eq!(root.ratio(), Some(0.5));
        let leaf_b = PartitionNode::clone(root.child(ChildSlot::Second).unwrap());

        assert!(tree.delete(&path(&[ChildSlot::First])).unwrap());
        assert_eq!(tree.root(), &leaf_b);
        assert!(tree.root().is_leaf());
        assert_eq!(tree.leaf_count(), 1);
        assert_eq!(tree.revision(), 2);
    }

    #[test]
    fn deleting_a_grandchild_promotes_its_sibling() {
        let mut tree = PartitionTree::new();
        tree.split(&NodePath::root(), Axis::Horizontal).unwrap();
        tree.split(&path(&[ChildSlot::First]), Axis::Vertical).unwrap();

        let sibling = PartitionNode::clone(
            tree.node_at(&path(&[ChildSlot::First, ChildSlot::Second]))
                .unwrap(),
        );
        let right = tree.root().child(ChildSlot::Second).unwrap().clone();

        tree.delete(&path(&[ChildSlot::First, ChildSlot::First]))
            .unwrap();

        let root = tree.root();
        assert_eq!(root.axis(), Some(Axis::Horizontal));
        assert_eq!(root.children().unwrap().len(), 2);
        assert_eq!(root.child(ChildSlot::First).unwrap().as_ref(), &sibling);
        assert!(std::sync::Arc::ptr_eq(
            root.child(ChildSlot::Second).unwrap(),
            &right
        ));
        assert_eq!(tree.leaf_count(), 2);
    }

    #[test]
    fn split_ids_stay_unique_across_many_splits() {
        let mut tree = PartitionTree::new();
        tree.split(&NodePath::root(), Axis::Horizontal).unwrap();
        tree.split(&path(&[ChildSlot::First]), Axis::Vertical).unwrap();
        tree.split(&path(&[ChildSlot::Second]), Axis::Vertical).unwrap();
        tree.delete(&path(&[ChildSlot::First, ChildSlot::Second]))
            .unwrap();
        tree.split(&path(&[ChildSlot::First]), Axis::Horizontal)
            .unwrap();

        let mut ids = tree.leaf_ids();
        let count = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), count);
        assert_eq!(count, tree.leaf_count());
    }

    #[test]
    fn mixed_gestures_keep_the_tree_well_formed() {
        let mut tree = PartitionTree::new();
        // Fixed-seed LCG so the gesture sequence is repeatable
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
        let mut next = move |bound: usize| {
            seed = seed
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            ((seed >> 33) as usize) % bound
        };

        for step in 0..300 {
            let mut leaves = Vec::new();
            let mut splits = Vec::new();
            collect_paths(tree.root(), NodePath::root(), &mut leaves, &mut splits);

            match next(4) {
                0 | 1 => {
                    let target = &leaves[next(leaves.len())];
                    let axis = if next(2) == 0 {
                        Axis::Horizontal
                    } else {
                        Axis::Vertical
                    };
                    assert!(tree.split(target, axis).unwrap());
                }
                2 => {
                    let target = &leaves[next(leaves.len())];
                    let changed = tree.delete(target).unwrap();
                    assert_eq!(changed, target.depth() > 0);
                }
                _ if !splits.is_empty() => {
                    let target = &splits[next(splits.len())];
                    let raw = next(300) as f32 / 100.0 - 1.0;
                    assert!(tree.commit_ratio(target, raw).unwrap());
                }
                _ => {}
            }

            let mut ids = Vec::new();
            check_well_formed(tree.root(), &mut ids);
            let total = ids.len();
            ids.sort();
            ids.dedup();
            assert_eq!(ids.len(), total, "duplicate id after step {step}");
            assert!(tree.leaf_count() >= 1);
            assert_eq!(tree.leaf_ids().len(), tree.leaf_count());
            assert_eq!(total, 2 * tree.leaf_count() - 1);
        }
    }

    #[test]
    fn commit_ratio_clamps_and_keeps_children() {
        let mut tree = PartitionTree::new();
        tree.split(&NodePath::root(), Axis::Vertical).unwrap();
        let before = tree.root().children().unwrap().clone();

        assert!(tree.commit_ratio(&NodePath::root(), 1.3).unwrap());
        assert_eq!(tree.root().ratio(), Some(MAX_RATIO));
        assert_eq!(tree.root().children().unwrap(), &before);
    }

    #[test]
    fn commit_ratio_on_a_leaf_fails_without_changing_the_tree() {
        let mut tree = PartitionTree::new();
        assert!(matches!(
            tree.commit_ratio(&NodePath::root(), 0.3),
            Err(LayoutError::NotASplit(_))
        ));
        assert_eq!(tree.revision(), 0);
    }

    #[test]
    fn splitting_a_split_is_rejected() {
        let mut tree = PartitionTree::new();
        tree.split(&NodePath::root(), Axis::Vertical).unwrap();
        assert!(matches!(
            tree.split(&NodePath::root(), Axis::Horizontal),
            Err(LayoutError::NotALeaf(NodeId(1)))
        ));
    }

    #[test]
    fn snapshot_is_json() {
        let tree = PartitionTree::new();
        let json = tree.snapshot().unwrap();
        assert!(json.contains("\"purple-200\""));
    }
}
