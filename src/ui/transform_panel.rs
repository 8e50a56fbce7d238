//! Transform controls panel
//!
//! Sliders for the selected layer's placement plus the session-wide garment
//! color and shading mode. Slider edits funnel through the same
//! `set_transform` path as drags and nudges.

#![allow(dead_code)]

use crate::design::{Design, ShadingMode, TransformUpdate};
use eframe::egui::{ComboBox, Slider, Ui};

/// Transform controls panel
#[derive(Debug, Default)]
pub struct TransformPanel;

impl TransformPanel {
    /// Create a new transform panel
    pub fn new() -> Self {
        Self
    }

    /// Show the panel
    pub fn show(&mut self, ui: &mut Ui, design: &mut Design) {
        ui.heading("Transform");
        ui.separator();

        let Some(index) = design.selected() else {
            ui.label("Select a layer to edit");
            self.show_session_controls(ui, design);
            return;
        };
        let Some(layer) = design.layer(index) else {
            return;
        };

        let bounds = design.settings().scale_bounds;
        let mut transform = layer.transform;
        let mut update = TransformUpdate::default();

        ui.horizontal(|ui| {
            ui.label("Position X:");
            if ui
                .add(Slider::new(&mut transform.x, -0.5..=0.5))
                .changed()
            {
                update.x = Some(transform.x);
            }
        });
        ui.horizontal(|ui| {
            ui.label("Position Y:");
            if ui
                .add(Slider::new(&mut transform.y, -0.5..=0.5))
                .changed()
            {
                update.y = Some(transform.y);
            }
        });
        ui.horizontal(|ui| {
            ui.label("Scale:");
            if ui
                .add(Slider::new(&mut transform.scale, bounds.0..=bounds.1))
                .changed()
            {
                update.scale = Some(transform.scale);
            }
        });
        ui.horizontal(|ui| {
            ui.label("Rotation:");
            if ui
                .add(Slider::new(&mut transform.rotation, -180.0..=180.0).suffix("°"))
                .changed()
            {
                update.rotation = Some(transform.rotation);
            }
        });
        ui.horizontal(|ui| {
            ui.label("Stretch W:");
            if ui
                .add(Slider::new(&mut transform.stretch_width, bounds.0..=bounds.1))
                .changed()
            {
                update.stretch_width = Some(transform.stretch_width);
            }
        });
        ui.horizontal(|ui| {
            ui.label("Stretch H:");
            if ui
                .add(Slider::new(&mut transform.stretch_height, bounds.0..=bounds.1))
                .changed()
            {
                update.stretch_height = Some(transform.stretch_height);
            }
        });

        if update != TransformUpdate::default() {
            if let Err(e) = design.set_transform(index, update) {
                log::warn!("Transform edit rejected: {}", e);
            }
        }

        if ui.button("Reset transform").clicked() {
            let _ = design.set_transform(
                index,
                TransformUpdate {
                    x: Some(0.0),
                    y: Some(0.0),
                    scale: Some(1.0),
                    rotation: Some(0.0),
                    stretch_width: Some(1.0),
                    stretch_height: Some(1.0),
                },
            );
        }

        self.show_session_controls(ui, design);
    }

    /// Garment color and shading mode, independent of any layer.
    fn show_session_controls(&mut self, ui: &mut Ui, design: &mut Design) {
        ui.add_space(8.0);
        ui.separator();

        ui.horizontal(|ui| {
            ui.label("Garment color:");
            let mut color = design.garment_color();
            if ui.color_edit_button_srgb(&mut color).changed() {
                design.set_garment_color(color);
            }
        });

        ui.horizontal(|ui| {
            ui.label("Shading:");
            let mut mode = design.shading();
            ComboBox::from_id_source("shading_mode")
                .selected_text(mode.name())
                .show_ui(ui, |ui| {
                    for candidate in ShadingMode::all() {
                        ui.selectable_value(&mut mode, *candidate, candidate.name());
                    }
                });
            if mode != design.shading() {
                design.set_shading(mode);
            }
        });
    }
}
