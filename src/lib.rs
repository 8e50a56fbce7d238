//! Garment Studio Library
//!
//! UV-space texture compositing for 3D garment customization: an ordered
//! stack of user-placed image layers is rasterized, together with a base
//! garment color, into a surface texture matching the garment's UV atlas,
//! while a 2D editor view mirrors the same placement math for on-screen
//! manipulation.

pub mod app;
pub mod compose;
pub mod design;
pub mod editor;
pub mod project;
pub mod template;
pub mod ui;

// Re-export commonly used types
pub use app::GarmentStudioApp;
pub use compose::{CompositeOutput, Compositor, Placement, TextureSink};
pub use design::{
    Design, DesignSettings, Layer, LayerTransform, ShadingMode, StoreError, TransformUpdate,
    UploadEvent, UploadQueue,
};
pub use editor::{CanvasFit, DragInteraction, EditorView, Nudge};
pub use project::DesignPreset;
pub use template::UvTemplate;
