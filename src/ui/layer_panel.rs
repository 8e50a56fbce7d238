//! Layer list panel
//!
//! Shows the layer stack top-first with selection, visibility toggles,
//! reordering, duplication, and removal. All edits go through the design's
//! mutation API; the panel itself holds no layer state.

#![allow(dead_code)]

use crate::design::Design;
use eframe::egui::{self, Color32, RichText, Ui};

/// Deferred edit collected while the list is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LayerAction {
    Select(usize),
    ToggleVisibility(usize),
    Remove(usize),
    MoveUp(usize),
    MoveDown(usize),
    Duplicate(usize),
}

/// Layer list panel
#[derive(Debug, Default)]
pub struct LayerPanel;

impl LayerPanel {
    /// Create a new layer panel
    pub fn new() -> Self {
        Self
    }

    /// Show the panel and apply any requested edit to the design.
    pub fn show(&mut self, ui: &mut Ui, design: &mut Design) {
        ui.heading("Layers");
        ui.separator();

        if design.is_empty() {
            ui.label("Drop an image onto the window to add a layer");
            return;
        }

        let mut action = None;

        // Top layer first, like a paint program's layer stack.
        for index in (0..design.len()).rev() {
            let layer = &design.layers()[index];
            let selected = design.selected() == Some(index);

            ui.horizontal(|ui| {
                let eye = if layer.visible { "👁" } else { "—" };
                if ui
                    .small_button(eye)
                    .on_hover_text(if layer.visible { "Hide layer" } else { "Show layer" })
                    .clicked()
                {
                    action = Some(LayerAction::ToggleVisibility(index));
                }

                let name = if layer.visible {
                    RichText::new(layer.name())
                } else {
                    RichText::new(layer.name()).color(Color32::from_gray(110))
                };
                if ui.selectable_label(selected, name).clicked() {
                    action = Some(LayerAction::Select(index));
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("×").on_hover_text("Remove layer").clicked() {
                        action = Some(LayerAction::Remove(index));
                    }
                    if index + 1 < design.len()
                        && ui.small_button("⬆").on_hover_text("Move up").clicked()
                    {
                        action = Some(LayerAction::MoveUp(index));
                    }
                    if index > 0 && ui.small_button("⬇").on_hover_text("Move down").clicked() {
                        action = Some(LayerAction::MoveDown(index));
                    }
                });
            });

            let transform = &layer.transform;
            ui.label(
                RichText::new(format!(
                    "scale {:.1}x | rot {:.0}°",
                    transform.scale, transform.rotation
                ))
                .size(10.0)
                .color(Color32::from_gray(140)),
            );
        }

        ui.separator();
        if let Some(selected) = design.selected() {
            if ui.button("Duplicate selected").clicked() {
                action = Some(LayerAction::Duplicate(selected));
            }
        }

        if let Some(action) = action {
            self.apply(action, design);
        }
    }

    fn apply(&self, action: LayerAction, design: &mut Design) {
        let result = match action {
            LayerAction::Select(i) => design.select(Some(i)),
            LayerAction::ToggleVisibility(i) => {
                let visible = design.layer(i).map(|l| l.visible).unwrap_or(false);
                design.set_visibility(i, !visible)
            }
            LayerAction::Remove(i) => design.remove_layer(i).map(|_| ()),
            LayerAction::MoveUp(i) => design.reorder(i, i + 1),
            LayerAction::MoveDown(i) => design.reorder(i, i.saturating_sub(1)),
            LayerAction::Duplicate(i) => design.duplicate_layer(i).map(|_| ()),
        };
        if let Err(e) = result {
            log::warn!("Layer edit rejected: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;
    use std::sync::Arc;

    fn design_with_layers(count: usize) -> Design {
        let mut design = Design::new();
        for i in 0..count {
            design.add_layer(Arc::new(RgbaImage::new(4, 4)), format!("l{i}.png"));
        }
        design
    }

    #[test]
    fn test_move_up_raises_paint_order() {
        let mut design = design_with_layers(3);
        let panel = LayerPanel::new();
        let name = design.layer(0).unwrap().name();
        panel.apply(LayerAction::MoveUp(0), &mut design);
        assert_eq!(design.layer(1).unwrap().name(), name);
    }

    #[test]
    fn test_toggle_visibility_flips_layer() {
        let mut design = design_with_layers(1);
        let panel = LayerPanel::new();
        panel.apply(LayerAction::ToggleVisibility(0), &mut design);
        assert!(!design.layer(0).unwrap().visible);
        panel.apply(LayerAction::ToggleVisibility(0), &mut design);
        assert!(design.layer(0).unwrap().visible);
    }

    #[test]
    fn test_stale_remove_is_logged_not_fatal() {
        let mut design = design_with_layers(1);
        let panel = LayerPanel::new();
        panel.apply(LayerAction::Remove(0), &mut design);
        // A second remove against the stale index must be a no-op.
        panel.apply(LayerAction::Remove(0), &mut design);
        assert!(design.is_empty());
        assert_eq!(design.selected(), None);
    }
}
