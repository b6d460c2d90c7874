// ABOUTME: Converts a computed layout into colored quads.
// ABOUTME: Leaves paint in tree order with their controls; dividers paint last.

use bsp_core::Palette;
use bsp_layout::{Axis, Layout, LeafAction, NodePath};

use crate::glyphs::label_quads;
use crate::quad_pipeline::Quad;

fn button_color(palette: &Palette, action: LeafAction) -> [f32; 4] {
    match action {
        LeafAction::Split(Axis::Horizontal) => palette.split_horizontal_button,
        LeafAction::Split(Axis::Vertical) => palette.split_vertical_button,
        LeafAction::Delete => palette.delete_button,
    }
    .to_array()
}

/// Build the quads for one frame. `active_divider` is drawn highlighted.
pub fn build_scene(layout: &Layout, palette: &Palette, active_divider: Option<&NodePath>) -> Vec<Quad> {
    let mut quads = Vec::with_capacity(layout.leaves.len() * 16 + layout.dividers.len());
    let glyph = palette.glyph.to_array();

    for leaf in &layout.leaves {
        let r = leaf.rect;
        quads.push(Quad::rect(r.x, r.y, r.width, r.height, palette.swatch(leaf.color).to_array()));

        for control in &leaf.controls {
            let b = control.rect;
            quads.push(Quad::rect(b.x, b.y, b.width, b.height, button_color(palette, control.action)));
            quads.extend(label_quads(control.action, b, glyph));
        }
    }

    for divider in &layout.dividers {
        let color = if active_divider == Some(&divider.path) {
            palette.divider_active
        } else {
            palette.divider
        };
        let d = divider.rect;
        quads.push(Quad::rect(d.x, d.y, d.width, d.height, color.to_array()));
    }

    quads
}

#[cfg(test)]
mod tests {
    use super::*;
    use bsp_core::Metrics;
    use bsp_layout::{compute_layout, PartitionTree, Rect};

    fn split_tree() -> PartitionTree {
        let mut tree = PartitionTree::new();
        tree.split(&NodePath::root(), Axis::Horizontal).unwrap();
        tree
    }

    #[test]
    fn leaves_paint_before_dividers() {
        let tree = split_tree();
        let layout = compute_layout(tree.root(), Rect::new(0.0, 0.0, 800.0, 600.0), &Metrics::default(), None);
        let palette = Palette::default();
        let quads = build_scene(&layout, &palette, None);

        assert_eq!(quads[0].color, palette.blue_100.to_array());
        assert_eq!(quads.last().unwrap().color, palette.divider.to_array());
    }

    #[test]
    fn active_divider_is_highlighted() {
        let tree = split_tree();
        let layout = compute_layout(tree.root(), Rect::new(0.0, 0.0, 800.0, 600.0), &Metrics::default(), None);
        let palette = Palette::default();
        let root = NodePath::root();
        let quads = build_scene(&layout, &palette, Some(&root));

        assert_eq!(quads.last().unwrap().color, palette.divider_active.to_array());
    }

    #[test]
    fn every_leaf_gets_three_buttons() {
        let tree = split_tree();
        let layout = compute_layout(tree.root(), Rect::new(0.0, 0.0, 800.0, 600.0), &Metrics::default(), None);
        let palette = Palette::default();
        let quads = build_scene(&layout, &palette, None);

        let delete_buttons = quads
            .iter()
            .filter(|q| q.color == palette.delete_button.to_array())
            .count();
        assert_eq!(delete_buttons, 2);
    }
}
