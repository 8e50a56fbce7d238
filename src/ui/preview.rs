//! Composited-texture preview monitor
//!
//! Stands in for the external garment mesh as the texture sink: shows the
//! surface texture the mesh material would receive, updated on every design
//! mutation. Replacing the egui texture handle drops the previous one, which
//! is the disposal discipline the sink contract requires.

#![allow(dead_code)]

use crate::compose::{CompositeOutput, TextureSink};
use crate::design::ShadingMode;
use eframe::egui::{self, Color32, Stroke, TextureHandle, TextureOptions, Ui, Vec2};

/// Preview monitor UI component
pub struct PreviewMonitor {
    /// Raster waiting to be uploaded on the next frame
    pending: Option<egui::ColorImage>,
    texture: Option<TextureHandle>,
    /// Texture dimensions of the last submission
    size: (u32, u32),
    /// Shading mode of the last submission
    mode: ShadingMode,
    /// Show the info overlay
    pub show_info: bool,
}

impl Default for PreviewMonitor {
    fn default() -> Self {
        Self {
            pending: None,
            texture: None,
            size: (0, 0),
            mode: ShadingMode::default(),
            show_info: true,
        }
    }
}

impl PreviewMonitor {
    /// Create a new preview monitor
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the preview panel
    pub fn show(&mut self, ui: &mut Ui, layer_count: usize) {
        ui.horizontal(|ui| {
            ui.heading("Texture Preview");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.checkbox(&mut self.show_info, "Info");
            });
        });
        ui.separator();

        // Upload any freshly submitted raster, dropping the previous handle.
        if let Some(pending) = self.pending.take() {
            self.texture = Some(ui.ctx().load_texture(
                "texture-preview",
                pending,
                TextureOptions::LINEAR,
            ));
        }

        let aspect = if self.size.1 > 0 {
            self.size.0 as f32 / self.size.1 as f32
        } else {
            1.0
        };
        let available = ui.available_width();
        let preview_size = Vec2::new(available, (available / aspect).min(320.0));
        let (response, painter) = ui.allocate_painter(preview_size, egui::Sense::hover());
        let rect = response.rect;

        painter.rect_filled(rect, 4.0, Color32::from_gray(20));
        if let Some(texture) = &self.texture {
            painter.image(
                texture.id(),
                rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                Color32::WHITE,
            );
        } else {
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                "No texture yet",
                egui::FontId::proportional(16.0),
                Color32::from_gray(100),
            );
        }
        painter.rect_stroke(rect, 4.0, Stroke::new(2.0, Color32::from_gray(60)));

        if self.show_info && self.texture.is_some() {
            let info = format!(
                "{}×{} | {} | {} layers",
                self.size.0,
                self.size.1,
                self.mode.name(),
                layer_count
            );
            painter.text(
                rect.left_top() + Vec2::new(8.0, 8.0),
                egui::Align2::LEFT_TOP,
                info,
                egui::FontId::monospace(12.0),
                Color32::from_rgba_unmultiplied(255, 255, 255, 180),
            );
        }
    }
}

impl TextureSink for PreviewMonitor {
    fn submit(&mut self, output: &CompositeOutput) {
        // The preview approximates both shading modes with the flattened
        // texture; a real mesh material would consume base and overlay
        // separately in custom mode.
        let flat = output.flatten();
        let size = [flat.width() as usize, flat.height() as usize];
        self.pending = Some(egui::ColorImage::from_rgba_unmultiplied(
            size,
            flat.as_raw(),
        ));
        self.size = (output.width(), output.height());
        self.mode = output.mode;
    }
}
