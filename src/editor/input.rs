//! Editor input handling
//!
//! Pointer drag and pinch gestures as an explicit state machine, plus
//! keyboard nudges. Every path funnels through `Design::set_transform`, so a
//! drag, a nudge, and a slider edit with the same values land in the same
//! clamped end state.

use super::canvas::CanvasFit;
use crate::design::{Design, LayerTransform, TransformUpdate};
use glam::Vec2;

/// Drag interaction phase.
///
/// Transforms are only mutated from pointer input while a gesture is
/// captured; `Idle` never mutates.
#[derive(Debug, Clone, Copy, PartialEq)]
enum DragPhase {
    /// No gesture captured
    Idle,
    /// Single-pointer move gesture
    Dragging {
        layer: usize,
        start: Vec2,
        snapshot: LayerTransform,
    },
    /// Two-pointer pinch-to-scale gesture
    Pinching {
        layer: usize,
        start_distance: f32,
        snapshot: LayerTransform,
    },
}

/// Pointer gesture state for the editor canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragInteraction {
    phase: DragPhase,
}

impl Default for DragInteraction {
    fn default() -> Self {
        Self::new()
    }
}

impl DragInteraction {
    /// Create an idle interaction
    pub fn new() -> Self {
        Self {
            phase: DragPhase::Idle,
        }
    }

    /// Whether a gesture is currently captured
    pub fn is_active(&self) -> bool {
        self.phase != DragPhase::Idle
    }

    /// Begin a drag at a canvas-local position. Captures only when the
    /// point is on the canvas and a layer is selected; the selected layer's
    /// transform is snapshotted for the whole gesture.
    pub fn pointer_down(&mut self, position: Vec2, fit: &CanvasFit, design: &Design) -> bool {
        if !fit.contains(position) {
            return false;
        }
        let Some(layer) = design.selected() else {
            return false;
        };
        let Some(snapshot) = design.layer(layer).map(|l| l.transform) else {
            return false;
        };
        self.phase = DragPhase::Dragging {
            layer,
            start: position,
            snapshot,
        };
        true
    }

    /// Update the captured drag: position becomes the gesture snapshot plus
    /// the pointer delta converted to UV units. No-op outside a drag.
    pub fn pointer_move(&mut self, position: Vec2, fit: &CanvasFit, design: &mut Design) {
        let DragPhase::Dragging {
            layer,
            start,
            snapshot,
        } = self.phase
        else {
            return;
        };
        let delta = fit.delta_to_uv(position - start);
        let _ = design.set_transform(
            layer,
            TransformUpdate::position(snapshot.x + delta.x, snapshot.y + delta.y),
        );
    }

    /// Release the gesture
    pub fn pointer_up(&mut self) {
        self.phase = DragPhase::Idle;
    }

    /// Pointer left the canvas: same as release
    pub fn pointer_leave(&mut self) {
        self.phase = DragPhase::Idle;
    }

    /// Begin a two-pointer pinch. Captures the inter-pointer distance and
    /// the selected layer's transform.
    pub fn pinch_begin(&mut self, first: Vec2, second: Vec2, design: &Design) -> bool {
        let Some(layer) = design.selected() else {
            return false;
        };
        let Some(snapshot) = design.layer(layer).map(|l| l.transform) else {
            return false;
        };
        let start_distance = (second - first).length();
        if start_distance <= f32::EPSILON {
            return false;
        }
        self.phase = DragPhase::Pinching {
            layer,
            start_distance,
            snapshot,
        };
        true
    }

    /// Update the captured pinch: scale is the snapshot scale times the
    /// ratio of the current inter-pointer distance to the starting one.
    pub fn pinch_move(&mut self, first: Vec2, second: Vec2, design: &mut Design) {
        let DragPhase::Pinching {
            layer,
            start_distance,
            snapshot,
        } = self.phase
        else {
            return;
        };
        let distance = (second - first).length();
        let _ = design.set_transform(
            layer,
            TransformUpdate::scale(snapshot.scale * (distance / start_distance)),
        );
    }
}

/// Discrete keyboard edits to the selected layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nudge {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    ScaleUp,
    ScaleDown,
    RotateClockwise,
    RotateCounterClockwise,
}

impl Nudge {
    /// Apply the nudge to the selected layer using the configured steps.
    /// No-op when nothing is selected.
    pub fn apply(self, design: &mut Design) {
        let Some(index) = design.selected() else {
            return;
        };
        let Some(transform) = design.layer(index).map(|l| l.transform) else {
            return;
        };
        let step = design.settings().nudge_step;
        let scale_factor = design.settings().nudge_scale_factor;
        let rotation_step = design.settings().nudge_rotation;

        let update = match self {
            Nudge::MoveLeft => TransformUpdate {
                x: Some(transform.x - step),
                ..Default::default()
            },
            Nudge::MoveRight => TransformUpdate {
                x: Some(transform.x + step),
                ..Default::default()
            },
            Nudge::MoveUp => TransformUpdate {
                y: Some(transform.y - step),
                ..Default::default()
            },
            Nudge::MoveDown => TransformUpdate {
                y: Some(transform.y + step),
                ..Default::default()
            },
            Nudge::ScaleUp => TransformUpdate::scale(transform.scale * scale_factor),
            Nudge::ScaleDown => TransformUpdate::scale(transform.scale / scale_factor),
            Nudge::RotateClockwise => TransformUpdate::rotation(transform.rotation + rotation_step),
            Nudge::RotateCounterClockwise => {
                TransformUpdate::rotation(transform.rotation - rotation_step)
            }
        };
        let _ = design.set_transform(index, update);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;
    use image::RgbaImage;
    use std::sync::Arc;

    fn test_design() -> Design {
        let mut design = Design::new();
        design.add_layer(Arc::new(RgbaImage::new(8, 8)), "a.png");
        design
            .set_transform(0, TransformUpdate::scale(0.5))
            .unwrap();
        design
    }

    fn square_fit(side: u32) -> CanvasFit {
        CanvasFit {
            width: side,
            height: side,
            scale: 1.0,
            offset: Vec2::ZERO,
        }
    }

    #[test]
    fn test_drag_converts_canvas_delta_to_uv() {
        // Dragging (100,100) -> (150,120) on a 500x500 canvas moves
        // the layer by (0.1, 0.04) in UV units.
        let mut design = test_design();
        let fit = square_fit(500);
        let mut interaction = DragInteraction::new();

        assert!(interaction.pointer_down(vec2(100.0, 100.0), &fit, &design));
        interaction.pointer_move(vec2(150.0, 120.0), &fit, &mut design);
        let transform = design.layer(0).unwrap().transform;
        assert!((transform.x - 0.1).abs() < 1e-6);
        assert!((transform.y - 0.04).abs() < 1e-6);

        interaction.pointer_up();
        assert!(!interaction.is_active());
    }

    #[test]
    fn test_drag_is_clamped_to_atlas() {
        // A huge delta pins at the clamp bound instead of escaping the atlas.
        let mut design = test_design();
        let fit = square_fit(500);
        let mut interaction = DragInteraction::new();
        interaction.pointer_down(vec2(0.0, 0.0), &fit, &design);
        interaction.pointer_move(vec2(500.0, 500.0), &fit, &mut design);
        let transform = design.layer(0).unwrap().transform;
        assert_eq!(transform.x, 0.25);
        assert_eq!(transform.y, 0.25);
    }

    #[test]
    fn test_no_capture_without_selection() {
        let mut design = test_design();
        design.select(None).unwrap();
        let fit = square_fit(500);
        let mut interaction = DragInteraction::new();
        assert!(!interaction.pointer_down(vec2(10.0, 10.0), &fit, &design));
        assert!(!interaction.is_active());
    }

    #[test]
    fn test_no_capture_outside_canvas() {
        let design = test_design();
        let fit = square_fit(500);
        let mut interaction = DragInteraction::new();
        assert!(!interaction.pointer_down(vec2(600.0, 10.0), &fit, &design));
    }

    #[test]
    fn test_move_without_capture_mutates_nothing() {
        let mut design = test_design();
        let before = design.revision();
        let fit = square_fit(500);
        let mut interaction = DragInteraction::new();
        interaction.pointer_move(vec2(250.0, 250.0), &fit, &mut design);
        assert_eq!(design.revision(), before);
    }

    #[test]
    fn test_leave_releases_capture() {
        let mut design = test_design();
        let fit = square_fit(500);
        let mut interaction = DragInteraction::new();
        interaction.pointer_down(vec2(100.0, 100.0), &fit, &design);
        assert!(interaction.is_active());
        interaction.pointer_leave();
        assert!(!interaction.is_active());
        let before = design.revision();
        interaction.pointer_move(vec2(400.0, 400.0), &fit, &mut design);
        assert_eq!(design.revision(), before);
    }

    #[test]
    fn test_pinch_scales_from_distance_ratio() {
        let mut design = test_design();
        let mut interaction = DragInteraction::new();
        assert!(interaction.pinch_begin(vec2(100.0, 100.0), vec2(200.0, 100.0), &design));
        // Distance doubles: scale 0.5 -> 1.0.
        interaction.pinch_move(vec2(50.0, 100.0), vec2(250.0, 100.0), &mut design);
        assert!((design.layer(0).unwrap().transform.scale - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_pinch_scale_respects_bounds() {
        let mut design = test_design();
        let mut interaction = DragInteraction::new();
        interaction.pinch_begin(vec2(0.0, 0.0), vec2(100.0, 0.0), &design);
        interaction.pinch_move(vec2(0.0, 0.0), vec2(1000.0, 0.0), &mut design);
        assert_eq!(design.layer(0).unwrap().transform.scale, 2.0);
    }

    #[test]
    fn test_nudge_matches_equivalent_slider_edit() {
        // The keyboard path and the direct set_transform path agree.
        let mut nudged = test_design();
        Nudge::MoveRight.apply(&mut nudged);
        Nudge::ScaleUp.apply(&mut nudged);
        Nudge::RotateClockwise.apply(&mut nudged);

        let mut slid = test_design();
        slid.set_transform(
            0,
            TransformUpdate {
                x: Some(0.02),
                ..Default::default()
            },
        )
        .unwrap();
        slid.set_transform(0, TransformUpdate::scale(0.5 * 1.1)).unwrap();
        slid.set_transform(0, TransformUpdate::rotation(10.0)).unwrap();

        assert_eq!(
            nudged.layer(0).unwrap().transform,
            slid.layer(0).unwrap().transform
        );
    }

    #[test]
    fn test_nudge_without_selection_is_noop() {
        let mut design = test_design();
        design.select(None).unwrap();
        let before = design.revision();
        Nudge::MoveLeft.apply(&mut design);
        assert_eq!(design.revision(), before);
    }
}
