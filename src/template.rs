//! UV template loading
//!
//! The template is the read-only reference raster depicting the garment's UV
//! layout. Its pixel dimensions define the surface texture size, and its
//! aspect ratio drives the editor canvas fit. When loading fails the session
//! degrades to a flat placeholder instead of refusing to start.

use glam::Vec2;
use image::{Rgba, RgbaImage};
use std::path::Path;
use thiserror::Error;

/// Fill color used for placeholder templates.
const PLACEHOLDER_FILL: Rgba<u8> = Rgba([210, 210, 210, 255]);

/// Errors while loading a template image.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// The file could not be read or decoded
    #[error("failed to load template: {0}")]
    Decode(#[from] image::ImageError),
}

/// The garment's UV reference raster, loaded once and never mutated.
#[derive(Debug, Clone)]
pub struct UvTemplate {
    image: RgbaImage,
    /// UV triangles of the paintable mesh in normalized [0,1] coordinates,
    /// supplied by the external mesh collaborator at model-load time
    wireframe: Vec<[Vec2; 3]>,
}

impl UvTemplate {
    /// Load a template raster from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TemplateError> {
        let path = path.as_ref();
        let image = image::open(path)?.to_rgba8();
        log::info!(
            "Loaded UV template {:?} ({}x{})",
            path,
            image.width(),
            image.height()
        );
        Ok(Self {
            image,
            wireframe: Vec::new(),
        })
    }

    /// Flat-fill placeholder for when the template is missing; compositing
    /// and editing proceed against these dimensions.
    pub fn placeholder(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, PLACEHOLDER_FILL),
            wireframe: Vec::new(),
        }
    }

    /// Construct from an already-decoded raster.
    pub fn from_image(image: RgbaImage) -> Self {
        Self {
            image,
            wireframe: Vec::new(),
        }
    }

    /// Attach UV wireframe triangles for the editor overlay.
    pub fn set_wireframe(&mut self, triangles: Vec<[Vec2; 3]>) {
        self.wireframe = triangles;
    }

    /// UV wireframe triangles (empty if the mesh never provided any)
    pub fn wireframe(&self) -> &[[Vec2; 3]] {
        &self.wireframe
    }

    /// The template raster
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Template width in pixels
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Template height in pixels
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Width over height
    pub fn aspect_ratio(&self) -> f32 {
        self.image.width() as f32 / self.image.height() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_dimensions() {
        let template = UvTemplate::placeholder(512, 256);
        assert_eq!(template.width(), 512);
        assert_eq!(template.height(), 256);
        assert_eq!(template.aspect_ratio(), 2.0);
        assert_eq!(*template.image().get_pixel(0, 0), PLACEHOLDER_FILL);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = UvTemplate::load("/nonexistent/template.png");
        assert!(result.is_err());
    }

    #[test]
    fn test_wireframe_roundtrip() {
        let mut template = UvTemplate::placeholder(64, 64);
        assert!(template.wireframe().is_empty());
        template.set_wireframe(vec![[
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 1.0),
        ]]);
        assert_eq!(template.wireframe().len(), 1);
    }
}
