//! Layer type for the design session
//!
//! A layer is one user-placed image with its own transform and visibility,
//! composited onto the garment texture in list order.

use image::RgbaImage;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Placement of a layer in UV-normalized space.
///
/// Positions use the centered convention: `x`/`y` in `[-0.5, 0.5]` with
/// `(0, 0)` at the atlas center. Stretch factors compose multiplicatively
/// with the uniform scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerTransform {
    /// Horizontal offset from the atlas center
    pub x: f32,
    /// Vertical offset from the atlas center
    pub y: f32,
    /// Uniform scale (1.0 = fit the atlas)
    pub scale: f32,
    /// Rotation in degrees, clockwise
    pub rotation: f32,
    /// Horizontal stretch multiplier (1.0 = none)
    pub stretch_width: f32,
    /// Vertical stretch multiplier (1.0 = none)
    pub stretch_height: f32,
}

impl Default for LayerTransform {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: 1.0,
            rotation: 0.0,
            stretch_width: 1.0,
            stretch_height: 1.0,
        }
    }
}

impl LayerTransform {
    /// Create a transform with centered content
    pub fn centered() -> Self {
        Self::default()
    }

    /// Check if this is the default placement
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }

    /// Reset to the default placement
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Partial transform edit, merged field-by-field by the store.
///
/// Slider, drag, and keyboard input all funnel through this type so every
/// path lands in the same clamped end state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TransformUpdate {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub scale: Option<f32>,
    pub rotation: Option<f32>,
    pub stretch_width: Option<f32>,
    pub stretch_height: Option<f32>,
}

impl TransformUpdate {
    /// Update both position fields
    pub fn position(x: f32, y: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Default::default()
        }
    }

    /// Update the uniform scale
    pub fn scale(scale: f32) -> Self {
        Self {
            scale: Some(scale),
            ..Default::default()
        }
    }

    /// Update the rotation in degrees
    pub fn rotation(degrees: f32) -> Self {
        Self {
            rotation: Some(degrees),
            ..Default::default()
        }
    }

    /// Update both stretch factors
    pub fn stretch(width: f32, height: f32) -> Self {
        Self {
            stretch_width: Some(width),
            stretch_height: Some(height),
            ..Default::default()
        }
    }
}

impl From<LayerTransform> for TransformUpdate {
    /// A full-transform update, used when restoring saved placements
    fn from(transform: LayerTransform) -> Self {
        Self {
            x: Some(transform.x),
            y: Some(transform.y),
            scale: Some(transform.scale),
            rotation: Some(transform.rotation),
            stretch_width: Some(transform.stretch_width),
            stretch_height: Some(transform.stretch_height),
        }
    }
}

/// A user-placed image layer.
///
/// The decoded raster is shared (`Arc`), never copied: duplicating a layer
/// clones the reference, and the pixels are immutable once decoded.
#[derive(Debug, Clone)]
pub struct Layer {
    /// Decoded source raster
    pub image: Arc<RgbaImage>,
    /// Original upload path (for thumbnails, list display, and presets)
    pub source: PathBuf,
    /// Placement in UV space
    pub transform: LayerTransform,
    /// Whether the layer is drawn; attached to the layer itself so it
    /// follows the layer through reorders
    pub visible: bool,
}

impl Layer {
    /// Create a new visible layer with the default transform
    pub fn new(image: Arc<RgbaImage>, source: impl Into<PathBuf>) -> Self {
        Self {
            image,
            source: source.into(),
            transform: LayerTransform::default(),
            visible: true,
        }
    }

    /// Get the layer's display name (source file stem)
    pub fn name(&self) -> String {
        Path::new(&self.source)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Layer")
            .to_string()
    }

    /// Get the source image dimensions
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_image() -> Arc<RgbaImage> {
        Arc::new(RgbaImage::new(4, 4))
    }

    #[test]
    fn test_default_transform() {
        let transform = LayerTransform::default();
        assert!(transform.is_identity());
        assert_eq!(transform.scale, 1.0);
        assert_eq!(transform.stretch_width, 1.0);
    }

    #[test]
    fn test_layer_name_from_source() {
        let layer = Layer::new(test_image(), "/uploads/flame-decal.png");
        assert_eq!(layer.name(), "flame-decal");
        assert!(layer.visible);
    }

    #[test]
    fn test_update_builders() {
        let update = TransformUpdate::position(0.1, -0.2);
        assert_eq!(update.x, Some(0.1));
        assert_eq!(update.y, Some(-0.2));
        assert_eq!(update.scale, None);

        let update = TransformUpdate::stretch(1.5, 0.8);
        assert_eq!(update.stretch_width, Some(1.5));
        assert_eq!(update.rotation, None);
    }
}
