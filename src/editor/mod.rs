//! UV editor view
//!
//! The interactive 2D mirror of the compositor: canvas-fit geometry,
//! rendering over the template, and pointer/keyboard editing.

mod canvas;
mod input;
mod view;

pub use canvas::CanvasFit;
pub use input::{DragInteraction, Nudge};
pub use view::EditorView;
