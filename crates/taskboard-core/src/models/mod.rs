//! Domain models
//!
//! The project card record and the drag-and-drop contracts shared by the
//! components.

pub mod drag_drop;
pub mod project;

pub use drag_drop::{DataTransfer, DragEvent, DragEventKind, DragTarget, Draggable, DropEffect, TEXT_PLAIN};
pub use project::{Project, ProjectStatus};
