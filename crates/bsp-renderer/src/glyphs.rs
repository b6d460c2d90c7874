// ABOUTME: Stroked letter shapes for the leaf control labels.
// ABOUTME: H splits horizontally, V splits vertically, D deletes.

use bsp_layout::{Axis, LeafAction, Rect};

use crate::quad_pipeline::Quad;

/// Segments in a unit box, (x0, y0, x1, y1), y pointing down
type Stroke = (f32, f32, f32, f32);

const H_STROKES: &[Stroke] = &[
    (0.0, 0.0, 0.0, 1.0),
    (1.0, 0.0, 1.0, 1.0),
    (0.0, 0.5, 1.0, 0.5),
];

const V_STROKES: &[Stroke] = &[(0.0, 0.0, 0.5, 1.0), (0.5, 1.0, 1.0, 0.0)];

const D_STROKES: &[Stroke] = &[
    (0.0, 0.0, 0.0, 1.0),
    (0.0, 0.0, 0.55, 0.0),
    (0.55, 0.0, 1.0, 0.35),
    (1.0, 0.35, 1.0, 0.65),
    (1.0, 0.65, 0.55, 1.0),
    (0.55, 1.0, 0.0, 1.0),
];

pub fn strokes(action: LeafAction) -> &'static [Stroke] {
    match action {
        LeafAction::Split(Axis::Horizontal) => H_STROKES,
        LeafAction::Split(Axis::Vertical) => V_STROKES,
        LeafAction::Delete => D_STROKES,
    }
}

/// Quads drawing the label for `action` centred in a button
pub fn label_quads(action: LeafAction, button: Rect, color: [f32; 4]) -> Vec<Quad> {
    let inset = button.width.min(button.height) * 0.3;
    let x = button.x + inset;
    let y = button.y + inset;
    let w = button.width - 2.0 * inset;
    let h = button.height - 2.0 * inset;
    let thickness = (button.height * 0.08).max(1.0);

    strokes(action)
        .iter()
        .filter_map(|&(x0, y0, x1, y1)| {
            Quad::line(x + x0 * w, y + y0 * h, x + x1 * w, y + y1 * h, thickness, color)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_action_has_a_distinct_label() {
        let h = strokes(LeafAction::Split(Axis::Horizontal));
        let v = strokes(LeafAction::Split(Axis::Vertical));
        let d = strokes(LeafAction::Delete);
        assert_ne!(h, v);
        assert_ne!(v, d);
        assert_ne!(h, d);
    }

    #[test]
    fn strokes_stay_in_unit_box() {
        for action in LeafAction::ALL {
            for &(x0, y0, x1, y1) in strokes(action) {
                for v in [x0, y0, x1, y1] {
                    assert!((0.0..=1.0).contains(&v));
                }
            }
        }
    }

    #[test]
    fn label_fits_inside_button() {
        let button = Rect::new(100.0, 40.0, 30.0, 30.0);
        let quads = label_quads(LeafAction::Delete, button, [1.0; 4]);
        assert_eq!(quads.len(), D_STROKES.len());
        for quad in quads {
            for [px, py] in quad.corners {
                assert!(px > button.x && px < button.right());
                assert!(py > button.y && py < button.bottom());
            }
        }
    }
}
