//! Surface texture compositor
//!
//! Rasterizes the design's visible layers plus the garment-color fill into
//! texture rasters matching the UV template's dimensions. Fully CPU-side and
//! deterministic: the same design state always yields byte-identical output.

use super::{draw_image_affine, CompositeOutput, Placement};
use crate::design::Design;
use crate::template::UvTemplate;
use image::{Rgba, RgbaImage};

/// Compositor producing the garment surface texture.
#[derive(Debug, Default)]
pub struct Compositor;

impl Compositor {
    /// Create a new compositor
    pub fn new() -> Self {
        Self
    }

    /// Composite the design into surface rasters sized to the template.
    ///
    /// The base raster is the opaque garment-color fill; the overlay holds
    /// every visible layer drawn bottom-to-top with straight alpha-over
    /// blending. Hidden layers leave no trace.
    pub fn composite(&self, design: &Design, template: &UvTemplate) -> CompositeOutput {
        let width = template.width();
        let height = template.height();
        let color = design.garment_color();
        let base = RgbaImage::from_pixel(width, height, Rgba([color[0], color[1], color[2], 255]));
        let mut overlay = RgbaImage::new(width, height);

        for layer in design.layers().iter().filter(|l| l.visible) {
            let placement = Placement::for_layer(layer, width, height);
            draw_image_affine(&mut overlay, &layer.image, placement.to_affine());
        }

        CompositeOutput {
            base,
            overlay,
            mode: design.shading(),
        }
    }
}
