//! Layer placement math
//!
//! Converts a layer's UV-normalized transform into pixel-space geometry for
//! a given target raster. The compositor and the editor canvas share this
//! math so the two views can never disagree about where a layer sits.

use crate::design::Layer;
use glam::{vec2, Affine2, Vec2};

/// Scale that fits a source image into a target while preserving aspect.
pub fn fit_scale(image_width: u32, image_height: u32, target_width: u32, target_height: u32) -> f32 {
    if image_width == 0 || image_height == 0 {
        return 1.0;
    }
    f32::min(
        target_width as f32 / image_width as f32,
        target_height as f32 / image_height as f32,
    )
}

/// Resolved pixel-space placement of one layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Destination center in target pixels
    pub center: Vec2,
    /// Per-axis source-to-target scale (fit scale x uniform scale x stretch)
    pub scale: Vec2,
    /// Rotation in radians
    pub rotation: f32,
}

impl Placement {
    /// Compute the placement of a layer on a target raster.
    ///
    /// The center is `(x + 0.5, y + 0.5)` of the target size (centered UV
    /// convention), the scale fits the image into the target and then applies
    /// the layer's uniform scale and stretch multipliers.
    pub fn for_layer(layer: &Layer, target_width: u32, target_height: u32) -> Self {
        let (image_width, image_height) = layer.image.dimensions();
        let base = fit_scale(image_width, image_height, target_width, target_height);
        let t = &layer.transform;
        Self {
            center: vec2(
                (t.x + 0.5) * target_width as f32,
                (t.y + 0.5) * target_height as f32,
            ),
            scale: vec2(
                base * t.scale * t.stretch_width,
                base * t.scale * t.stretch_height,
            ),
            rotation: t.rotation.to_radians(),
        }
    }

    /// Re-target the placement into another pixel space (the editor canvas),
    /// which is the atlas space scaled by `factor` and shifted by `offset`.
    pub fn retargeted(&self, factor: f32, offset: Vec2) -> Self {
        Self {
            center: self.center * factor + offset,
            scale: self.scale * factor,
            rotation: self.rotation,
        }
    }

    /// Affine mapping image-centered source coordinates to target pixels.
    pub fn to_affine(&self) -> Affine2 {
        Affine2::from_scale_angle_translation(self.scale, self.rotation, self.center)
    }

    /// The transformed corners of the source rect, padded outward in source
    /// pixels (used for the selection outline).
    pub fn corners(&self, image_width: u32, image_height: u32, padding: f32) -> [Vec2; 4] {
        let half_x = image_width as f32 / 2.0 + padding;
        let half_y = image_height as f32 / 2.0 + padding;
        let affine = self.to_affine();
        [
            affine.transform_point2(vec2(-half_x, -half_y)),
            affine.transform_point2(vec2(half_x, -half_y)),
            affine.transform_point2(vec2(half_x, half_y)),
            affine.transform_point2(vec2(-half_x, half_y)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::{Layer, TransformUpdate};
    use image::RgbaImage;
    use std::sync::Arc;

    fn layer_with_image(width: u32, height: u32) -> Layer {
        Layer::new(Arc::new(RgbaImage::new(width, height)), "test.png")
    }

    #[test]
    fn test_fit_scale_preserves_aspect() {
        // A wide image fits a square atlas by its width.
        assert_eq!(fit_scale(200, 100, 100, 100), 0.5);
        // A tall image fits by its height.
        assert_eq!(fit_scale(100, 200, 100, 100), 0.5);
        // Equal sizes map one-to-one.
        assert_eq!(fit_scale(64, 64, 64, 64), 1.0);
    }

    #[test]
    fn test_default_transform_centers_on_target() {
        let layer = layer_with_image(100, 100);
        let placement = Placement::for_layer(&layer, 200, 200);
        assert_eq!(placement.center, vec2(100.0, 100.0));
        assert_eq!(placement.scale, vec2(2.0, 2.0));
        assert_eq!(placement.rotation, 0.0);
    }

    #[test]
    fn test_stretch_composes_with_scale() {
        let mut design = crate::design::Design::new();
        design.add_layer(Arc::new(RgbaImage::new(100, 100)), "a.png");
        design.set_transform(0, TransformUpdate::scale(0.5)).unwrap();
        design.set_transform(0, TransformUpdate::stretch(2.0, 1.0)).unwrap();
        let placement = Placement::for_layer(design.layer(0).unwrap(), 100, 100);
        assert_eq!(placement.scale, vec2(1.0, 0.5));
    }

    #[test]
    fn test_affine_maps_image_center_to_placement_center() {
        let mut layer = layer_with_image(50, 50);
        layer.transform.x = 0.25;
        layer.transform.rotation = 90.0;
        let placement = Placement::for_layer(&layer, 100, 100);
        let mapped = placement.to_affine().transform_point2(Vec2::ZERO);
        assert!((mapped - vec2(75.0, 50.0)).length() < 1e-4);
    }

    #[test]
    fn test_rotation_maps_corners() {
        let layer = layer_with_image(100, 100);
        let mut placement = Placement::for_layer(&layer, 100, 100);
        placement.rotation = 90f32.to_radians();
        // Under a 90 degree rotation the top-left corner lands top-right.
        let corners = placement.corners(100, 100, 0.0);
        assert!((corners[0] - vec2(100.0, 0.0)).length() < 1e-3);
    }

    #[test]
    fn test_retarget_scales_center_and_size() {
        let layer = layer_with_image(100, 100);
        let placement = Placement::for_layer(&layer, 200, 200);
        let canvas = placement.retargeted(0.5, vec2(10.0, 20.0));
        assert_eq!(canvas.center, vec2(60.0, 70.0));
        assert_eq!(canvas.scale, vec2(1.0, 1.0));
    }
}
