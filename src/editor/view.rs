//! Editor canvas renderer
//!
//! Draws the design over the UV template for on-screen editing: template
//! underlay, visible layers via the compositor's placement math retargeted
//! into canvas space, a selection outline, and an optional wireframe of the
//! mesh's UV triangles.

use super::canvas::CanvasFit;
use crate::compose::{draw_image_affine, Placement};
use crate::design::Design;
use crate::template::UvTemplate;
use glam::{vec2, Affine2, Vec2};
use image::{Rgba, RgbaImage};

/// Canvas background behind the template letterbox.
const CANVAS_BACKGROUND: Rgba<u8> = Rgba([245, 245, 245, 255]);
/// Selection outline color.
const SELECTION_COLOR: Rgba<u8> = Rgba([33, 150, 243, 255]);
/// Wireframe line color.
const WIREFRAME_COLOR: Rgba<u8> = Rgba([120, 120, 120, 255]);
/// Selection outline padding in source pixels.
const SELECTION_PADDING: f32 = 5.0;

/// Renderer for the on-screen UV editor canvas.
#[derive(Debug, Clone)]
pub struct EditorView {
    /// Draw the UV triangle wireframe over the template
    pub show_wireframe: bool,
}

impl Default for EditorView {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorView {
    /// Create a view with the wireframe hidden
    pub fn new() -> Self {
        Self {
            show_wireframe: false,
        }
    }

    /// Render the editor canvas for the current design state.
    ///
    /// Uses the same placement math as the compositor, retargeted by the
    /// canvas fit, so the editor shows exactly what will print.
    pub fn render(&self, design: &Design, template: &UvTemplate, fit: &CanvasFit) -> RgbaImage {
        let mut canvas = RgbaImage::from_pixel(fit.width, fit.height, CANVAS_BACKGROUND);

        // Template underlay, letterboxed into the fit rect.
        let content_center = fit.offset
            + vec2(
                template.width() as f32 * fit.scale / 2.0,
                template.height() as f32 * fit.scale / 2.0,
            );
        let underlay =
            Affine2::from_scale_angle_translation(Vec2::splat(fit.scale), 0.0, content_center);
        draw_image_affine(&mut canvas, template.image(), underlay);

        if self.show_wireframe {
            for triangle in template.wireframe() {
                let points = [
                    fit.uv_to_canvas(triangle[0]),
                    fit.uv_to_canvas(triangle[1]),
                    fit.uv_to_canvas(triangle[2]),
                ];
                draw_line(&mut canvas, points[0], points[1], WIREFRAME_COLOR);
                draw_line(&mut canvas, points[1], points[2], WIREFRAME_COLOR);
                draw_line(&mut canvas, points[2], points[0], WIREFRAME_COLOR);
            }
        }

        for (index, layer) in design.layers().iter().enumerate() {
            if !layer.visible {
                continue;
            }
            let placement = Placement::for_layer(layer, template.width(), template.height())
                .retargeted(fit.scale, fit.offset);
            draw_image_affine(&mut canvas, &layer.image, placement.to_affine());

            if design.selected() == Some(index) {
                let (image_width, image_height) = layer.dimensions();
                let corners = placement.corners(image_width, image_height, SELECTION_PADDING);
                for i in 0..4 {
                    draw_line(&mut canvas, corners[i], corners[(i + 1) % 4], SELECTION_COLOR);
                }
            }
        }

        canvas
    }
}

/// Draw a straight line between two canvas points (Bresenham over the
/// rounded endpoints), clipping to the raster.
fn draw_line(canvas: &mut RgbaImage, from: Vec2, to: Vec2, color: Rgba<u8>) {
    let (width, height) = canvas.dimensions();
    let mut x0 = from.x.round() as i64;
    let mut y0 = from.y.round() as i64;
    let x1 = to.x.round() as i64;
    let y1 = to.y.round() as i64;

    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let step_x = if x0 < x1 { 1 } else { -1 };
    let step_y = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if x0 >= 0 && y0 >= 0 && (x0 as u32) < width && (y0 as u32) < height {
            canvas.put_pixel(x0 as u32, y0 as u32, color);
        }
        if x0 == x1 && y0 == y1 {
            break;
        }
        let doubled = 2 * err;
        if doubled >= dy {
            err += dy;
            x0 += step_x;
        }
        if doubled <= dx {
            err += dx;
            y0 += step_y;
        }
    }
}
