//! Project module for save/load functionality
//!
//! Handles saving and loading design presets.

mod preset;

pub use preset::{DesignPreset, LayerPreset};
