// ABOUTME: Turns a partition tree into on-screen regions for drawing and hit testing.
// ABOUTME: Each split gives `ratio` of its extent to the first child and the rest to the second.

use bsp_core::{Metrics, Swatch};

use crate::node::{Axis, ChildSlot, LeafAction, NodeId, NodePath, PartitionNode};

/// Rectangle in window pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Size along the axis a split of this orientation divides
    pub fn extent(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// Divide into the first child's `ratio` and the second child's `1 - ratio`
    pub fn split(&self, axis: Axis, ratio: f32) -> (Rect, Rect) {
        match axis {
            Axis::Horizontal => {
                let first = self.width * ratio;
                (
                    Rect::new(self.x, self.y, first, self.height),
                    Rect::new(self.x + first, self.y, self.width - first, self.height),
                )
            }
            Axis::Vertical => {
                let first = self.height * ratio;
                (
                    Rect::new(self.x, self.y, self.width, first),
                    Rect::new(self.x, self.y + first, self.width, self.height - first),
                )
            }
        }
    }

    /// Bar of `thickness` centred on the boundary between the two halves of a split
    fn boundary_bar(&self, axis: Axis, ratio: f32, thickness: f32) -> Rect {
        let half = thickness / 2.0;
        match axis {
            Axis::Horizontal => Rect::new(
                self.x + self.width * ratio - half,
                self.y,
                thickness,
                self.height,
            ),
            Axis::Vertical => Rect::new(
                self.x,
                self.y + self.height * ratio - half,
                self.width,
                thickness,
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ControlRegion {
    pub action: LeafAction,
    pub rect: Rect,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LeafRegion {
    pub path: NodePath,
    pub id: NodeId,
    pub rect: Rect,
    pub color: Option<Swatch>,
    pub controls: [ControlRegion; 3],
}

#[derive(Debug, Clone, PartialEq)]
pub struct DividerRegion {
    pub path: NodePath,
    pub axis: Axis,
    /// Ratio the divider is drawn at (the preview ratio while dragging)
    pub ratio: f32,
    /// The split's whole area; the reference box for drags
    pub container: Rect,
    /// Visible bar
    pub rect: Rect,
    /// Grab area, the bar widened on both sides
    pub hit: Rect,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Hit {
    Divider {
        path: NodePath,
        axis: Axis,
        ratio: f32,
    },
    Control {
        path: NodePath,
        action: LeafAction,
    },
    Leaf {
        path: NodePath,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub bounds: Rect,
    pub leaves: Vec<LeafRegion>,
    /// Outer splits come before the splits nested inside them
    pub dividers: Vec<DividerRegion>,
}

impl Layout {
    /// What a press at (x, y) lands on. Dividers take precedence over leaf
    /// contents, and nested dividers over the ones around them.
    pub fn hit_test(&self, x: f32, y: f32) -> Option<Hit> {
        if let Some(divider) = self
            .dividers
            .iter()
            .rev()
            .find(|d| d.hit.contains(x, y) && d.container.contains(x, y))
        {
            return Some(Hit::Divider {
                path: divider.path.clone(),
                axis: divider.axis,
                ratio: divider.ratio,
            });
        }

        let leaf = self.leaves.iter().find(|l| l.rect.contains(x, y))?;
        let control = leaf
            .controls
            .iter()
            .find(|c| c.rect.contains(x, y));
        Some(match control {
            Some(control) => Hit::Control {
                path: leaf.path.clone(),
                action: control.action,
            },
            None => Hit::Leaf {
                path: leaf.path.clone(),
            },
        })
    }

    /// Box of the split at `path`, if it was laid out
    pub fn container_for(&self, path: &NodePath) -> Option<Rect> {
        self.dividers
            .iter()
            .find(|d| &d.path == path)
            .map(|d| d.container)
    }
}

/// Lay out `root` inside `bounds`. `preview` overrides the stored ratio of one
/// split so an active drag resizes its children live.
pub fn compute_layout(
    root: &PartitionNode,
    bounds: Rect,
    metrics: &Metrics,
    preview: Option<(&NodePath, f32)>,
) -> Layout {
    let mut layout = Layout {
        bounds,
        leaves: Vec::new(),
        dividers: Vec::new(),
    };
    layout_node(root, NodePath::root(), bounds, metrics, preview, &mut layout);
    layout
}

fn layout_node(
    node: &PartitionNode,
    path: NodePath,
    rect: Rect,
    metrics: &Metrics,
    preview: Option<(&NodePath, f32)>,
    out: &mut Layout,
) {
    let (Some(axis), Some(stored_ratio), Some([first, second])) =
        (node.axis(), node.ratio(), node.children())
    else {
        out.leaves.push(LeafRegion {
            controls: leaf_controls(rect, metrics),
            path,
            id: node.id,
            rect,
            color: node.color(),
        });
        return;
    };

    let ratio = match preview {
        Some((preview_path, preview_ratio)) if *preview_path == path => preview_ratio,
        _ => stored_ratio,
    };

    let bar = rect.boundary_bar(axis, ratio, metrics.divider_thickness);
    let hit = rect.boundary_bar(
        axis,
        ratio,
        metrics.divider_thickness + 2.0 * metrics.divider_hit_padding,
    );
    out.dividers.push(DividerRegion {
        path: path.clone(),
        axis,
        ratio,
        container: rect,
        rect: bar,
        hit,
    });

    let (first_rect, second_rect) = rect.split(axis, ratio);
    layout_node(
        first,
        path.child(ChildSlot::First),
        first_rect,
        metrics,
        preview,
        out,
    );
    layout_node(
        second,
        path.child(ChildSlot::Second),
        second_rect,
        metrics,
        preview,
        out,
    );
}

/// The split-horizontal, split-vertical and delete buttons, centred in a row
fn leaf_controls(rect: Rect, metrics: &Metrics) -> [ControlRegion; 3] {
    let size = metrics.button_size;
    let step = size + metrics.button_gap;
    let row_width = 3.0 * size + 2.0 * metrics.button_gap;
    let left = rect.x + (rect.width - row_width) / 2.0;
    let top = rect.y + (rect.height - size) / 2.0;

    LeafAction::ALL.map(|action| {
        let index = match action {
            LeafAction::Split(Axis::Horizontal) => 0.0,
            LeafAction::Split(Axis::Vertical) => 1.0,
            LeafAction::Delete => 2.0,
        };
        ControlRegion {
            action,
            rect: Rect::new(left + index * step, top, size, size),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::IdAllocator;

    const BOUNDS: Rect = Rect::new(0.0, 0.0, 800.0, 600.0);

    fn metrics() -> Metrics {
        Metrics {
            divider_thickness: 4.0,
            divider_hit_padding: 2.0,
            button_size: 20.0,
            button_gap: 10.0,
        }
    }

    fn split_root(axis: Axis) -> PartitionNode {
        let root = PartitionNode::leaf(NodeId(1), None);
        let mut ids = IdAllocator::after(&root);
        root.apply_leaf_action(LeafAction::Split(axis), &mut ids)
            .unwrap()
            .unwrap()
    }

    #[test]
    fn single_leaf_fills_bounds_with_centred_controls() {
        let root = PartitionNode::leaf(NodeId(1), None);
        let layout = compute_layout(&root, BOUNDS, &metrics(), None);

        assert_eq!(layout.leaves.len(), 1);
        assert!(layout.dividers.is_empty());
        let leaf = &layout.leaves[0];
        assert_eq!(leaf.rect, BOUNDS);

        // 3 * 20 + 2 * 10 = 80 wide, centred at x = 400
        assert_eq!(leaf.controls[0].rect, Rect::new(360.0, 290.0, 20.0, 20.0));
        assert_eq!(leaf.controls[1].action, LeafAction::Split(Axis::Vertical));
        assert_eq!(leaf.controls[2].rect.x, 420.0);
        assert_eq!(leaf.controls[2].action, LeafAction::Delete);
    }

    #[test]
    fn horizontal_split_divides_width() {
        let root = split_root(Axis::Horizontal).with_ratio(0.25).unwrap();
        let layout = compute_layout(&root, BOUNDS, &metrics(), None);

        assert_eq!(layout.leaves[0].rect, Rect::new(0.0, 0.0, 200.0, 600.0));
        assert_eq!(layout.leaves[1].rect, Rect::new(200.0, 0.0, 600.0, 600.0));
        let divider = &layout.dividers[0];
        assert_eq!(divider.rect, Rect::new(198.0, 0.0, 4.0, 600.0));
        assert_eq!(divider.hit, Rect::new(196.0, 0.0, 8.0, 600.0));
        assert_eq!(divider.container, BOUNDS);
    }

    #[test]
    fn vertical_split_divides_height() {
        let root = split_root(Axis::Vertical);
        let layout = compute_layout(&root, BOUNDS, &metrics(), None);

        assert_eq!(layout.leaves[0].rect, Rect::new(0.0, 0.0, 800.0, 300.0));
        assert_eq!(layout.leaves[1].rect, Rect::new(0.0, 300.0, 800.0, 300.0));
        assert_eq!(layout.dividers[0].rect, Rect::new(0.0, 298.0, 800.0, 4.0));
    }

    #[test]
    fn preview_ratio_overrides_only_its_split() {
        let root = split_root(Axis::Horizontal);
        let root = root
            .apply_at(
                &NodePath::root().child(ChildSlot::Second),
                |node| {
                    let mut ids = IdAllocator::after(node);
                    node.apply_leaf_action(LeafAction::Split(Axis::Vertical), &mut ids)
                },
            )
            .unwrap()
            .unwrap();

        let root_path = NodePath::root();
        let layout = compute_layout(&root, BOUNDS, &metrics(), Some((&root_path, 0.75)));

        assert_eq!(layout.dividers[0].ratio, 0.75);
        assert_eq!(layout.dividers[1].ratio, 0.5);
        assert_eq!(layout.leaves[0].rect.width, 600.0);
        // The stored tree is untouched
        assert_eq!(root.ratio(), Some(0.5));
    }

    #[test]
    fn hit_test_prefers_divider_then_controls() {
        let root = split_root(Axis::Horizontal);
        let layout = compute_layout(&root, BOUNDS, &metrics(), None);

        assert!(matches!(
            layout.hit_test(401.0, 10.0),
            Some(Hit::Divider { axis: Axis::Horizontal, .. })
        ));

        // Left leaf spans 0..400; its controls start at 200 - 40 = 160
        let hit = layout.hit_test(165.0, 295.0);
        assert_eq!(
            hit,
            Some(Hit::Control {
                path: NodePath::root().child(ChildSlot::First),
                action: LeafAction::Split(Axis::Horizontal),
            })
        );

        assert_eq!(
            layout.hit_test(700.0, 10.0),
            Some(Hit::Leaf {
                path: NodePath::root().child(ChildSlot::Second),
            })
        );
        assert_eq!(layout.hit_test(-5.0, 10.0), None);
    }

    #[test]
    fn container_lookup_requires_a_laid_out_split() {
        let root = split_root(Axis::Vertical);
        let layout = compute_layout(&root, BOUNDS, &metrics(), None);

        assert_eq!(layout.container_for(&NodePath::root()), Some(BOUNDS));
        assert_eq!(
            layout.container_for(&NodePath::root().child(ChildSlot::First)),
            None
        );
    }

    #[test]
    fn split_regions_cover_container() {
        let rect = Rect::new(10.0, 20.0, 300.0, 90.0);
        for axis in [Axis::Horizontal, Axis::Vertical] {
            let (a, b) = rect.split(axis, 0.3);
            assert!((a.extent(axis) + b.extent(axis) - rect.extent(axis)).abs() < 1e-4);
        }
    }
}
