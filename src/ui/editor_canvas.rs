//! Interactive editor canvas widget
//!
//! Hosts the rendered editor view as an egui texture and routes pointer,
//! wheel, and keyboard input into the editor's interaction machinery.

#![allow(dead_code)]

use crate::design::{Design, TransformUpdate};
use crate::editor::{CanvasFit, DragInteraction, Nudge};
use eframe::egui::{self, Color32, Key, Sense, Stroke, TextureHandle, TextureOptions, Ui, Vec2};
use image::RgbaImage;
use std::collections::BTreeMap;

/// Wheel scale step, multiplied per scroll notch.
const WHEEL_SCALE_STEP: f32 = 1.05;

/// Editor canvas widget
pub struct EditorCanvas {
    texture: Option<TextureHandle>,
    interaction: DragInteraction,
    /// Live touch points by touch id, canvas-local
    touches: BTreeMap<u64, glam::Vec2>,
    pinching: bool,
}

impl Default for EditorCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorCanvas {
    /// Create an empty canvas
    pub fn new() -> Self {
        Self {
            texture: None,
            interaction: DragInteraction::new(),
            touches: BTreeMap::new(),
            pinching: false,
        }
    }

    /// Replace the canvas texture with a freshly rendered editor raster.
    /// The previous texture handle is dropped, freeing its GPU copy.
    pub fn set_image(&mut self, ctx: &egui::Context, image: &RgbaImage) {
        let size = [image.width() as usize, image.height() as usize];
        let color_image = egui::ColorImage::from_rgba_unmultiplied(size, image.as_raw());
        self.texture = Some(ctx.load_texture("editor-canvas", color_image, TextureOptions::LINEAR));
    }

    /// Show the canvas and handle editing input.
    pub fn show(&mut self, ui: &mut Ui, design: &mut Design, fit: &CanvasFit) {
        let desired = Vec2::new(fit.width as f32, fit.height as f32);
        let (response, painter) = ui.allocate_painter(desired, Sense::click_and_drag());
        let rect = response.rect;

        if let Some(texture) = &self.texture {
            painter.image(
                texture.id(),
                rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                Color32::WHITE,
            );
        } else {
            painter.rect_filled(rect, 0.0, Color32::from_gray(30));
        }
        painter.rect_stroke(rect, 2.0, Stroke::new(1.0, Color32::from_gray(90)));

        // Canvas-local pointer position.
        let local = |pos: egui::Pos2| glam::vec2(pos.x - rect.min.x, pos.y - rect.min.y);

        self.handle_touch(ui, rect, design);

        if !self.pinching {
            if response.drag_started() {
                if let Some(pos) = response.interact_pointer_pos() {
                    self.interaction.pointer_down(local(pos), fit, design);
                }
            }
            if response.dragged() {
                if let Some(pos) = response.interact_pointer_pos() {
                    self.interaction.pointer_move(local(pos), fit, design);
                }
            }
            if response.drag_released() {
                self.interaction.pointer_up();
            }
            if self.interaction.is_active() && !response.hovered() && !response.dragged() {
                self.interaction.pointer_leave();
            }
        }

        if response.hovered() {
            self.handle_wheel(ui, design);
            self.handle_keys(ui, design);
        }

        if design.selected().is_none() && !design.is_empty() {
            painter.text(
                rect.center_bottom() - Vec2::new(0.0, 12.0),
                egui::Align2::CENTER_BOTTOM,
                "Select a layer to drag it",
                egui::FontId::proportional(12.0),
                Color32::from_gray(150),
            );
        }
    }

    /// Track raw touch points and run the two-pointer pinch gesture.
    fn handle_touch(&mut self, ui: &Ui, rect: egui::Rect, design: &mut Design) {
        let events = ui.input(|i| i.events.clone());
        for event in events {
            if let egui::Event::Touch { id, phase, pos, .. } = event {
                match phase {
                    egui::TouchPhase::Start | egui::TouchPhase::Move => {
                        self.touches
                            .insert(id.0, glam::vec2(pos.x - rect.min.x, pos.y - rect.min.y));
                    }
                    egui::TouchPhase::End | egui::TouchPhase::Cancel => {
                        self.touches.remove(&id.0);
                    }
                }
            }
        }

        if self.touches.len() == 2 {
            let mut points = self.touches.values();
            let first = *points.next().unwrap_or(&glam::Vec2::ZERO);
            let second = *points.next().unwrap_or(&glam::Vec2::ZERO);
            if self.pinching {
                self.interaction.pinch_move(first, second, design);
            } else {
                // A pinch supersedes any in-progress drag.
                self.interaction.pointer_up();
                self.pinching = self.interaction.pinch_begin(first, second, design);
            }
        } else if self.pinching {
            self.interaction.pointer_up();
            self.pinching = false;
        }
    }

    /// Mouse wheel and trackpad pinch scale the selected layer.
    fn handle_wheel(&mut self, ui: &mut Ui, design: &mut Design) {
        let Some(index) = design.selected() else {
            return;
        };
        let scroll = ui.input(|i| i.raw_scroll_delta.y);
        let zoom = ui.input(|i| i.zoom_delta());
        let mut factor = 1.0;
        if scroll > 0.0 {
            factor *= WHEEL_SCALE_STEP;
        } else if scroll < 0.0 {
            factor /= WHEEL_SCALE_STEP;
        }
        if zoom != 1.0 {
            factor *= zoom;
        }
        if factor != 1.0 {
            if let Some(layer) = design.layer(index) {
                let scale = layer.transform.scale * factor;
                let _ = design.set_transform(index, TransformUpdate::scale(scale));
            }
        }
    }

    /// Keyboard nudges while the canvas is hovered.
    fn handle_keys(&mut self, ui: &mut Ui, design: &mut Design) {
        let nudges = [
            (Key::ArrowLeft, Nudge::MoveLeft),
            (Key::ArrowRight, Nudge::MoveRight),
            (Key::ArrowUp, Nudge::MoveUp),
            (Key::ArrowDown, Nudge::MoveDown),
            (Key::Plus, Nudge::ScaleUp),
            (Key::Minus, Nudge::ScaleDown),
            (Key::E, Nudge::RotateClockwise),
            (Key::Q, Nudge::RotateCounterClockwise),
        ];
        for (key, nudge) in nudges {
            if ui.input(|i| i.key_pressed(key)) {
                nudge.apply(design);
            }
        }
    }
}
