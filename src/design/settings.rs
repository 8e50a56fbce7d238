//! Design session settings
//!
//! Clamp bounds and input step sizes, configurable per session rather than
//! hard-coded in the edit paths.

use serde::{Deserialize, Serialize};

/// How the garment texture is shaded by the external material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShadingMode {
    /// Color and images baked into one flat raster, consumed by a lit
    /// material (images pick up scene lighting)
    #[default]
    Standard,
    /// Color and images kept as two rasters for a custom shading function
    /// that lights the color but leaves the images unlit
    Custom,
}

impl ShadingMode {
    /// Get all shading modes
    pub fn all() -> &'static [ShadingMode] {
        &[ShadingMode::Standard, ShadingMode::Custom]
    }

    /// Get human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            ShadingMode::Standard => "Standard",
            ShadingMode::Custom => "Custom",
        }
    }
}

/// Tunable bounds and steps for layer editing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignSettings {
    /// Allowed range for `scale` and the stretch factors
    pub scale_bounds: (f32, f32),
    /// Keep a layer's extent within the atlas when positioning
    pub clamp_positions: bool,
    /// Arrow-key move step in UV-normalized units
    pub nudge_step: f32,
    /// Keyboard scale multiplier (`+` multiplies, `-` divides)
    pub nudge_scale_factor: f32,
    /// Keyboard rotation step in degrees
    pub nudge_rotation: f32,
    /// Positional offset applied to duplicated layers
    pub duplicate_offset: f32,
}

impl Default for DesignSettings {
    fn default() -> Self {
        Self {
            scale_bounds: (0.1, 2.0),
            clamp_positions: true,
            nudge_step: 0.02,
            nudge_scale_factor: 1.1,
            nudge_rotation: 10.0,
            duplicate_offset: 0.1,
        }
    }
}

impl DesignSettings {
    /// Clamp a scale or stretch factor into the configured bounds
    pub fn clamp_scale(&self, scale: f32) -> f32 {
        scale.clamp(self.scale_bounds.0, self.scale_bounds.1)
    }

    /// Clamp a centered position so the layer extent stays within the
    /// atlas: the centered equivalent of `clamp(v, s/2, 1 - s/2)`.
    /// Collapses to the center once the layer fills the atlas.
    pub fn clamp_position(&self, value: f32, scale: f32) -> f32 {
        if !self.clamp_positions {
            return value;
        }
        let half_range = ((1.0 - scale.min(1.0)) / 2.0).max(0.0);
        value.clamp(-half_range, half_range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_clamped_to_bounds() {
        let settings = DesignSettings::default();
        assert_eq!(settings.clamp_scale(0.01), 0.1);
        assert_eq!(settings.clamp_scale(5.0), 2.0);
        assert_eq!(settings.clamp_scale(1.3), 1.3);
    }

    #[test]
    fn test_position_clamp_matches_atlas_bounds() {
        let settings = DesignSettings::default();
        // At scale 0.5 the center may wander 0.25 either way, which is
        // the centered form of [s/2, 1 - s/2].
        assert_eq!(settings.clamp_position(0.4, 0.5), 0.25);
        assert_eq!(settings.clamp_position(-0.4, 0.5), -0.25);
        assert_eq!(settings.clamp_position(0.1, 0.5), 0.1);
    }

    #[test]
    fn test_position_pinned_when_layer_fills_atlas() {
        let settings = DesignSettings::default();
        assert_eq!(settings.clamp_position(0.3, 1.0), 0.0);
        assert_eq!(settings.clamp_position(0.3, 1.8), 0.0);
    }

    #[test]
    fn test_position_clamp_disabled() {
        let settings = DesignSettings {
            clamp_positions: false,
            ..Default::default()
        };
        assert_eq!(settings.clamp_position(0.9, 0.5), 0.9);
    }
}
