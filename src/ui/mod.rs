//! UI module for the garment studio
//!
//! Provides the application's panels: layer list, transform controls, the
//! interactive editor canvas, and the composited-texture preview.

pub mod editor_canvas;
pub mod layer_panel;
pub mod preview;
pub mod transform_panel;

pub use editor_canvas::EditorCanvas;
pub use layer_panel::LayerPanel;
pub use preview::PreviewMonitor;
pub use transform_panel::TransformPanel;
