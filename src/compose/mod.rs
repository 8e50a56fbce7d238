//! Compositing module
//!
//! CPU rasterization of the layer stack into the garment's surface texture,
//! plus the shared drawing primitives the editor canvas reuses.

mod compositor;
mod placement;

pub use compositor::Compositor;
pub use placement::{fit_scale, Placement};

use crate::design::ShadingMode;
use glam::Affine2;
use image::{Rgba, RgbaImage};

/// The composited surface texture(s) for one design state.
///
/// Both rasters are always produced: `base` is the opaque garment-color
/// fill, `overlay` holds the alpha-composited image layers. Standard
/// shading consumes the flattened combination; custom shading consumes the
/// two rasters separately so images can stay unlit.
#[derive(Debug, Clone)]
pub struct CompositeOutput {
    /// Opaque garment-color fill
    pub base: RgbaImage,
    /// Transparent raster with all visible layers drawn bottom-to-top
    pub overlay: RgbaImage,
    /// Shading mode the design was composited under
    pub mode: ShadingMode,
}

impl CompositeOutput {
    /// Output width in pixels
    pub fn width(&self) -> u32 {
        self.base.width()
    }

    /// Output height in pixels
    pub fn height(&self) -> u32 {
        self.base.height()
    }

    /// Flatten into a single raster: the overlay alpha-composited over the
    /// color fill. This is the texture consumed in standard shading.
    pub fn flatten(&self) -> RgbaImage {
        let mut combined = self.base.clone();
        for (dst, src) in combined.pixels_mut().zip(self.overlay.pixels()) {
            *dst = blend_over(*dst, *src);
        }
        combined
    }
}

/// Receiver of composited textures (the external mesh/material).
///
/// Implementations must release the previously submitted texture before
/// installing the new one; submissions arrive on every design mutation.
pub trait TextureSink {
    /// Accept a freshly composited texture set
    fn submit(&mut self, output: &CompositeOutput);
}

/// Straight (non-premultiplied) alpha-over blend of `src` onto `dst`.
pub(crate) fn blend_over(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    if src[3] == 255 {
        return src;
    }
    if src[3] == 0 {
        return dst;
    }
    let src_alpha = src[3] as f32 / 255.0;
    let dst_alpha = dst[3] as f32 / 255.0;
    let out_alpha = src_alpha + dst_alpha * (1.0 - src_alpha);
    if out_alpha <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }
    let channel = |s: u8, d: u8| {
        let s = s as f32 / 255.0;
        let d = d as f32 / 255.0;
        let out = (s * src_alpha + d * dst_alpha * (1.0 - src_alpha)) / out_alpha;
        (out * 255.0).round() as u8
    };
    Rgba([
        channel(src[0], dst[0]),
        channel(src[1], dst[1]),
        channel(src[2], dst[2]),
        (out_alpha * 255.0).round() as u8,
    ])
}

/// Bilinear sample at a fractional pixel-index coordinate, clamping to the
/// image edge.
fn sample_bilinear(src: &RgbaImage, x: f32, y: f32) -> Rgba<u8> {
    let (width, height) = src.dimensions();
    let x0 = x.floor();
    let y0 = y.floor();
    let tx = x - x0;
    let ty = y - y0;
    let clamp_x = |v: i64| v.clamp(0, width as i64 - 1) as u32;
    let clamp_y = |v: i64| v.clamp(0, height as i64 - 1) as u32;
    let x0i = clamp_x(x0 as i64);
    let x1i = clamp_x(x0 as i64 + 1);
    let y0i = clamp_y(y0 as i64);
    let y1i = clamp_y(y0 as i64 + 1);

    let p00 = src.get_pixel(x0i, y0i);
    let p10 = src.get_pixel(x1i, y0i);
    let p01 = src.get_pixel(x0i, y1i);
    let p11 = src.get_pixel(x1i, y1i);

    let mut out = [0u8; 4];
    for c in 0..4 {
        let top = p00[c] as f32 * (1.0 - tx) + p10[c] as f32 * tx;
        let bottom = p01[c] as f32 * (1.0 - tx) + p11[c] as f32 * tx;
        out[c] = (top * (1.0 - ty) + bottom * ty).round() as u8;
    }
    Rgba(out)
}

/// Draw `src` into `dst` under an affine transform mapping image-centered
/// source coordinates to destination pixels. Destination pixels inside the
/// transformed bounds are inverse-mapped, bilinear-sampled, and alpha-over
/// blended.
pub(crate) fn draw_image_affine(dst: &mut RgbaImage, src: &RgbaImage, transform: Affine2) {
    let (dst_width, dst_height) = dst.dimensions();
    let (src_width, src_height) = src.dimensions();
    if src_width == 0 || src_height == 0 || dst_width == 0 || dst_height == 0 {
        return;
    }

    let half = glam::vec2(src_width as f32 / 2.0, src_height as f32 / 2.0);
    let corners = [
        transform.transform_point2(glam::vec2(-half.x, -half.y)),
        transform.transform_point2(glam::vec2(half.x, -half.y)),
        transform.transform_point2(glam::vec2(half.x, half.y)),
        transform.transform_point2(glam::vec2(-half.x, half.y)),
    ];
    let min_x = corners.iter().map(|c| c.x).fold(f32::INFINITY, f32::min);
    let min_y = corners.iter().map(|c| c.y).fold(f32::INFINITY, f32::min);
    let max_x = corners.iter().map(|c| c.x).fold(f32::NEG_INFINITY, f32::max);
    let max_y = corners.iter().map(|c| c.y).fold(f32::NEG_INFINITY, f32::max);

    let x_start = min_x.floor().clamp(0.0, dst_width as f32) as u32;
    let y_start = min_y.floor().clamp(0.0, dst_height as f32) as u32;
    let x_end = max_x.ceil().clamp(0.0, dst_width as f32) as u32;
    let y_end = max_y.ceil().clamp(0.0, dst_height as f32) as u32;

    let inverse = transform.inverse();
    for y in y_start..y_end {
        for x in x_start..x_end {
            let dest_center = glam::vec2(x as f32 + 0.5, y as f32 + 0.5);
            let src_point = inverse.transform_point2(dest_center) + half;
            if src_point.x < 0.0
                || src_point.y < 0.0
                || src_point.x >= src_width as f32
                || src_point.y >= src_height as f32
            {
                continue;
            }
            let sample = sample_bilinear(src, src_point.x - 0.5, src_point.y - 0.5);
            if sample[3] == 0 {
                continue;
            }
            let dst_pixel = dst.get_pixel_mut(x, y);
            *dst_pixel = blend_over(*dst_pixel, sample);
        }
    }
}
