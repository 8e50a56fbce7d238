//! Editor canvas geometry
//!
//! Fits the UV template into the available viewport while preserving its
//! aspect ratio, and converts between canvas pixels and UV-normalized
//! coordinates for pointer input.

use glam::{vec2, Vec2};

/// Fraction of the viewport the canvas may occupy.
const FILL_FACTOR: f32 = 0.9;
/// Minimum canvas edge in pixels.
const MIN_SIZE: f32 = 200.0;

/// The canvas rectangle the editor renders into, plus the mapping from
/// template pixels into it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasFit {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Template-pixel to canvas-pixel scale
    pub scale: f32,
    /// Top-left of the template content within the canvas
    pub offset: Vec2,
}

impl CanvasFit {
    /// Fit a canvas for the template into a viewport, preserving the
    /// template aspect ratio at 90% fill with a 200 px minimum edge.
    pub fn compute(
        viewport_width: f32,
        viewport_height: f32,
        template_width: u32,
        template_height: u32,
    ) -> Self {
        let aspect = template_width.max(1) as f32 / template_height.max(1) as f32;

        let (mut width, mut height) = if viewport_width / viewport_height.max(1.0) > aspect {
            let h = viewport_height * FILL_FACTOR;
            (h * aspect, h)
        } else {
            let w = viewport_width * FILL_FACTOR;
            (w, w / aspect)
        };
        if width < MIN_SIZE {
            width = MIN_SIZE;
            height = width / aspect;
        }
        if height < MIN_SIZE {
            height = MIN_SIZE;
            width = height * aspect;
        }

        let scale = f32::min(
            width / template_width.max(1) as f32,
            height / template_height.max(1) as f32,
        );
        let offset = vec2(
            (width - template_width as f32 * scale) / 2.0,
            (height - template_height as f32 * scale) / 2.0,
        );
        Self {
            width: width.round() as u32,
            height: height.round() as u32,
            scale,
            offset,
        }
    }

    /// Canvas size as a vector
    pub fn size(&self) -> Vec2 {
        vec2(self.width as f32, self.height as f32)
    }

    /// Whether a canvas-local point lies on the canvas
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= 0.0
            && point.y >= 0.0
            && point.x <= self.width as f32
            && point.y <= self.height as f32
    }

    /// Convert a pointer delta in canvas pixels into a UV-normalized delta
    /// (`dx / canvas_width`, `dy / canvas_height`).
    pub fn delta_to_uv(&self, delta: Vec2) -> Vec2 {
        vec2(
            delta.x / self.width.max(1) as f32,
            delta.y / self.height.max(1) as f32,
        )
    }

    /// Map a normalized UV point into canvas pixels.
    pub fn uv_to_canvas(&self, uv: Vec2) -> Vec2 {
        let content = self.size() - self.offset * 2.0;
        self.offset + uv * content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_preserves_aspect_in_wide_viewport() {
        let fit = CanvasFit::compute(1200.0, 600.0, 1000, 1000);
        // Height-bound: 90% of 600.
        assert_eq!(fit.height, 540);
        assert_eq!(fit.width, 540);
        assert!((fit.scale - 0.54).abs() < 1e-4);
    }

    #[test]
    fn test_fit_preserves_aspect_in_tall_viewport() {
        let fit = CanvasFit::compute(500.0, 2000.0, 2000, 1000);
        // Width-bound: 90% of 500, half as tall.
        assert_eq!(fit.width, 450);
        assert_eq!(fit.height, 225);
    }

    #[test]
    fn test_fit_enforces_minimum_size() {
        let fit = CanvasFit::compute(100.0, 100.0, 1000, 1000);
        assert_eq!(fit.width, 200);
        assert_eq!(fit.height, 200);
    }

    #[test]
    fn test_delta_conversion_uses_canvas_dimensions() {
        let fit = CanvasFit {
            width: 500,
            height: 500,
            scale: 0.5,
            offset: Vec2::ZERO,
        };
        let uv = fit.delta_to_uv(vec2(50.0, 20.0));
        assert!((uv.x - 0.1).abs() < 1e-6);
        assert!((uv.y - 0.04).abs() < 1e-6);
    }

    #[test]
    fn test_contains_bounds() {
        let fit = CanvasFit {
            width: 100,
            height: 50,
            scale: 1.0,
            offset: Vec2::ZERO,
        };
        assert!(fit.contains(vec2(0.0, 0.0)));
        assert!(fit.contains(vec2(100.0, 50.0)));
        assert!(!fit.contains(vec2(101.0, 10.0)));
        assert!(!fit.contains(vec2(-1.0, 10.0)));
    }
}
