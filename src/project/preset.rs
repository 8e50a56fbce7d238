//! Design preset for saving and loading sessions
//!
//! Serializes the layer store (source path, transform, visibility per layer)
//! plus the session-wide garment color and shading mode. Image pixels are
//! never serialized; sources are re-decoded on load.

use crate::design::{Design, Layer, LayerTransform, ShadingMode};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A saved design session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignPreset {
    /// Preset display name
    pub name: String,
    /// Version string of the app that wrote the preset
    pub version: String,
    /// Template image path, if one was loaded
    pub template: Option<PathBuf>,
    /// Garment base color (RGB)
    pub garment_color: [u8; 3],
    /// Shading mode name
    pub shading: String,
    /// Layers in paint order
    pub layers: Vec<LayerPreset>,
}

impl Default for DesignPreset {
    fn default() -> Self {
        Self {
            name: "Untitled Design".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            template: None,
            garment_color: [255, 255, 255],
            shading: ShadingMode::default().name().to_string(),
            layers: Vec::new(),
        }
    }
}

impl DesignPreset {
    /// Capture the current design state.
    pub fn from_design(name: impl Into<String>, design: &Design, template: Option<PathBuf>) -> Self {
        Self {
            name: name.into(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            template,
            garment_color: design.garment_color(),
            shading: design.shading().name().to_string(),
            layers: design.layers().iter().map(LayerPreset::from_layer).collect(),
        }
    }

    /// Parse the stored shading mode name.
    pub fn shading_mode(&self) -> ShadingMode {
        match self.shading.as_str() {
            "Custom" => ShadingMode::Custom,
            _ => ShadingMode::Standard,
        }
    }

    /// Apply the session-wide fields to a design (layers are restored
    /// separately, once their sources decode).
    pub fn apply_session(&self, design: &mut Design) {
        design.set_garment_color(self.garment_color);
        design.set_shading(self.shading_mode());
    }

    /// Save as pretty JSON.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Saved design to {:?}", path);
        Ok(())
    }

    /// Load from a JSON file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let preset: Self = serde_json::from_str(&json)?;
        log::info!(
            "Loaded design {:?} ({} layers)",
            preset.name,
            preset.layers.len()
        );
        Ok(preset)
    }
}

/// One saved layer: source reference plus placement state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerPreset {
    /// Original upload path, re-decoded on load
    pub source: PathBuf,
    /// Placement in UV space
    pub transform: LayerTransform,
    /// Whether the layer was visible
    pub visible: bool,
}

impl LayerPreset {
    /// Capture a layer's persistent state.
    pub fn from_layer(layer: &Layer) -> Self {
        Self {
            source: layer.source.clone(),
            transform: layer.transform,
            visible: layer.visible,
        }
    }
}
