//! Design session state
//!
//! Single source of truth for the layer stack, selection, garment color, and
//! shading mode. Every view (compositor, editor canvas, panels) reads from
//! here and mutates through this API only; each successful mutation bumps a
//! revision counter that serves as the one change-notification path.

mod layer;
mod settings;
pub mod upload;

pub use layer::{Layer, LayerTransform, TransformUpdate};
pub use settings::{DesignSettings, ShadingMode};
pub use upload::{UploadError, UploadEvent, UploadQueue};

use image::RgbaImage;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Errors from store operations given a stale or invalid layer index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The layer index does not refer to a live layer
    #[error("layer index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// The design session: ordered layers plus session-wide state.
///
/// Layer order is paint order, later layers drawn on top. Selection is kept
/// valid across every mutation: `None` when the stack is empty or nothing is
/// selected, otherwise a live index.
#[derive(Debug, Clone)]
pub struct Design {
    layers: Vec<Layer>,
    selected: Option<usize>,
    garment_color: [u8; 3],
    shading: ShadingMode,
    settings: DesignSettings,
    revision: u64,
}

impl Default for Design {
    fn default() -> Self {
        Self::new()
    }
}

impl Design {
    /// Create an empty design with a white garment and default settings
    pub fn new() -> Self {
        Self::with_settings(DesignSettings::default())
    }

    /// Create an empty design with specific settings
    pub fn with_settings(settings: DesignSettings) -> Self {
        Self {
            layers: Vec::new(),
            selected: None,
            garment_color: [255, 255, 255],
            shading: ShadingMode::default(),
            settings,
            revision: 0,
        }
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    fn check_index(&self, index: usize) -> Result<(), StoreError> {
        if index < self.layers.len() {
            Ok(())
        } else {
            Err(StoreError::IndexOutOfRange {
                index,
                len: self.layers.len(),
            })
        }
    }

    /// Change counter; bumped by every successful mutation. Views compare
    /// against their last-seen value to decide whether to re-render.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// All layers in paint order (bottom to top)
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Get a layer by index
    pub fn layer(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    /// Number of layers
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Check if the design has no layers
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Currently selected layer index
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Currently selected layer
    pub fn selected_layer(&self) -> Option<&Layer> {
        self.selected.and_then(|i| self.layers.get(i))
    }

    /// Base fill color under all layers
    pub fn garment_color(&self) -> [u8; 3] {
        self.garment_color
    }

    /// Active shading mode
    pub fn shading(&self) -> ShadingMode {
        self.shading
    }

    /// Session settings (clamp bounds, nudge steps)
    pub fn settings(&self) -> &DesignSettings {
        &self.settings
    }

    /// Append a new layer with the default centered transform and select it.
    /// Returns the new layer's index.
    pub fn add_layer(&mut self, image: Arc<RgbaImage>, source: impl Into<PathBuf>) -> usize {
        self.layers.push(Layer::new(image, source));
        let index = self.layers.len() - 1;
        self.selected = Some(index);
        self.touch();
        index
    }

    /// Remove a layer. Selection is re-clamped to
    /// `min(selected, len - 1)`, or cleared when the stack empties.
    pub fn remove_layer(&mut self, index: usize) -> Result<Layer, StoreError> {
        self.check_index(index)?;
        let layer = self.layers.remove(index);
        self.selected = if self.layers.is_empty() {
            None
        } else {
            self.selected.map(|s| s.min(self.layers.len() - 1))
        };
        self.touch();
        Ok(layer)
    }

    /// Duplicate a layer as a new trailing layer and select it. The image is
    /// shared, not copied; the copy is offset slightly so it is visible.
    pub fn duplicate_layer(&mut self, index: usize) -> Result<usize, StoreError> {
        self.check_index(index)?;
        let mut copy = self.layers[index].clone();
        let offset = self.settings.duplicate_offset;
        copy.transform.x = self
            .settings
            .clamp_position(copy.transform.x + offset, copy.transform.scale);
        copy.transform.y = self
            .settings
            .clamp_position(copy.transform.y + offset, copy.transform.scale);
        self.layers.push(copy);
        let new_index = self.layers.len() - 1;
        self.selected = Some(new_index);
        self.touch();
        Ok(new_index)
    }

    /// Move a layer within the paint order. The layer record moves whole, so
    /// its transform and visibility travel with it; selection keeps pointing
    /// at the same layer record.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<(), StoreError> {
        self.check_index(from)?;
        self.check_index(to)?;
        if from == to {
            return Ok(());
        }
        let layer = self.layers.remove(from);
        self.layers.insert(to, layer);
        self.selected = self.selected.map(|s| {
            if s == from {
                to
            } else if from < s && s <= to {
                s - 1
            } else if to <= s && s < from {
                s + 1
            } else {
                s
            }
        });
        self.touch();
        Ok(())
    }

    /// Merge a partial transform edit into a layer, clamping scale and
    /// stretch into the configured bounds and position per the clamp policy.
    pub fn set_transform(&mut self, index: usize, update: TransformUpdate) -> Result<(), StoreError> {
        self.check_index(index)?;
        let settings = self.settings.clone();
        let transform = &mut self.layers[index].transform;
        if let Some(scale) = update.scale {
            transform.scale = settings.clamp_scale(scale);
        }
        if let Some(width) = update.stretch_width {
            transform.stretch_width = settings.clamp_scale(width);
        }
        if let Some(height) = update.stretch_height {
            transform.stretch_height = settings.clamp_scale(height);
        }
        if let Some(rotation) = update.rotation {
            transform.rotation = rotation;
        }
        if let Some(x) = update.x {
            transform.x = x;
        }
        if let Some(y) = update.y {
            transform.y = y;
        }
        // Re-clamp positions even on pure scale edits so a grown layer is
        // pulled back inside the atlas.
        transform.x = settings.clamp_position(transform.x, transform.scale);
        transform.y = settings.clamp_position(transform.y, transform.scale);
        self.touch();
        Ok(())
    }

    /// Show or hide a layer
    pub fn set_visibility(&mut self, index: usize, visible: bool) -> Result<(), StoreError> {
        self.check_index(index)?;
        self.layers[index].visible = visible;
        self.touch();
        Ok(())
    }

    /// Change the selection. `None` always succeeds; an index must be live.
    pub fn select(&mut self, index: Option<usize>) -> Result<(), StoreError> {
        if let Some(i) = index {
            self.check_index(i)?;
        }
        self.selected = index;
        self.touch();
        Ok(())
    }

    /// Set the garment base color
    pub fn set_garment_color(&mut self, color: [u8; 3]) {
        self.garment_color = color;
        self.touch();
    }

    /// Switch the shading mode; layers are untouched
    pub fn set_shading(&mut self, mode: ShadingMode) {
        self.shading = mode;
        self.touch();
    }

    /// Remove all layers and clear the selection
    pub fn clear(&mut self) {
        self.layers.clear();
        self.selected = None;
        self.touch();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_image() -> Arc<RgbaImage> {
        Arc::new(RgbaImage::new(8, 8))
    }

    fn design_with_layers(count: usize) -> Design {
        let mut design = Design::new();
        for i in 0..count {
            design.add_layer(test_image(), format!("layer{i}.png"));
        }
        design
    }

    fn selection_is_valid(design: &Design) -> bool {
        match design.selected() {
            None => true,
            Some(i) => !design.is_empty() && i < design.len(),
        }
    }

    #[test]
    fn test_add_selects_new_layer() {
        let mut design = Design::new();
        let index = design.add_layer(test_image(), "first.png");
        assert_eq!(index, 0);
        assert_eq!(design.selected(), Some(0));
        assert!(design.layer(0).unwrap().transform.is_identity());
    }

    #[test]
    fn test_selection_valid_across_mutations() {
        // Selection is always none-or-live over arbitrary sequences.
        let mut design = design_with_layers(4);
        design.remove_layer(1).unwrap();
        assert!(selection_is_valid(&design));
        design.reorder(0, 2).unwrap();
        assert!(selection_is_valid(&design));
        design.remove_layer(2).unwrap();
        assert!(selection_is_valid(&design));
        design.remove_layer(0).unwrap();
        assert!(selection_is_valid(&design));
        design.remove_layer(0).unwrap();
        assert!(selection_is_valid(&design));
        assert_eq!(design.selected(), None);
    }

    #[test]
    fn test_remove_last_layer_clears_selection() {
        let mut design = design_with_layers(1);
        assert_eq!(design.selected(), Some(0));
        design.remove_layer(0).unwrap();
        assert_eq!(design.selected(), None);
        assert!(design.is_empty());
    }

    #[test]
    fn test_remove_invalid_index_is_rejected() {
        let mut design = design_with_layers(2);
        let before = design.revision();
        let err = design.remove_layer(5).unwrap_err();
        assert_eq!(err, StoreError::IndexOutOfRange { index: 5, len: 2 });
        assert_eq!(design.len(), 2);
        assert_eq!(design.revision(), before, "failed ops must not notify");
    }

    #[test]
    fn test_visibility_follows_layer_through_reorder() {
        // Visibility is attached to the layer record, not the slot.
        let mut design = design_with_layers(3);
        design.set_visibility(0, false).unwrap();
        design.reorder(0, 2).unwrap();
        assert!(!design.layer(2).unwrap().visible);
        assert!(design.layer(0).unwrap().visible);
        assert!(design.layer(1).unwrap().visible);
    }

    #[test]
    fn test_reorder_keeps_selection_on_same_layer() {
        let mut design = design_with_layers(3);
        design.select(Some(1)).unwrap();
        let name = design.layer(1).unwrap().name();
        design.reorder(0, 2).unwrap();
        let selected = design.selected().unwrap();
        assert_eq!(design.layer(selected).unwrap().name(), name);
    }

    #[test]
    fn test_reorder_moves_selected_layer() {
        let mut design = design_with_layers(3);
        design.select(Some(0)).unwrap();
        design.reorder(0, 2).unwrap();
        assert_eq!(design.selected(), Some(2));
    }

    #[test]
    fn test_transform_scale_and_position_clamped() {
        // After any edit, the position respects [s/2, 1 - s/2].
        let mut design = design_with_layers(1);
        design
            .set_transform(
                0,
                TransformUpdate {
                    x: Some(0.9),
                    scale: Some(0.5),
                    ..Default::default()
                },
            )
            .unwrap();
        let transform = design.layer(0).unwrap().transform;
        assert_eq!(transform.scale, 0.5);
        assert_eq!(transform.x, 0.25);

        // Growing the layer pulls an off-center position back in.
        design.set_transform(0, TransformUpdate::scale(1.0)).unwrap();
        assert_eq!(design.layer(0).unwrap().transform.x, 0.0);
    }

    #[test]
    fn test_transform_merge_leaves_other_fields() {
        let mut design = design_with_layers(1);
        design.set_transform(0, TransformUpdate::rotation(45.0)).unwrap();
        design.set_transform(0, TransformUpdate::scale(0.5)).unwrap();
        let transform = design.layer(0).unwrap().transform;
        assert_eq!(transform.rotation, 45.0);
        assert_eq!(transform.scale, 0.5);
    }

    #[test]
    fn test_duplicate_shares_image_and_offsets() {
        let mut design = design_with_layers(1);
        design.set_transform(0, TransformUpdate::scale(0.5)).unwrap();
        let new_index = design.duplicate_layer(0).unwrap();
        assert_eq!(new_index, 1);
        assert_eq!(design.selected(), Some(1));
        assert!(Arc::ptr_eq(
            &design.layer(0).unwrap().image,
            &design.layer(1).unwrap().image
        ));
        let copy = design.layer(1).unwrap().transform;
        assert_eq!(copy.x, 0.1);
        assert_eq!(copy.scale, 0.5);
    }

    #[test]
    fn test_select_out_of_range_rejected() {
        let mut design = design_with_layers(1);
        assert!(design.select(Some(3)).is_err());
        assert_eq!(design.selected(), Some(0));
        design.select(None).unwrap();
        assert_eq!(design.selected(), None);
    }

    #[test]
    fn test_revision_bumps_on_every_mutation() {
        let mut design = Design::new();
        let mut last = design.revision();
        design.add_layer(test_image(), "a.png");
        assert!(design.revision() > last);
        last = design.revision();
        design.set_garment_color([20, 30, 40]);
        assert!(design.revision() > last);
        last = design.revision();
        design.set_shading(ShadingMode::Custom);
        assert!(design.revision() > last);
    }
}
