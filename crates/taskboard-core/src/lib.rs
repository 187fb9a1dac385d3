//! Taskboard Core Library
//!
//! This crate provides the core of Taskboard, a drag-and-drop project board:
//! - Validation of form input
//! - The project model and drag-and-drop contracts
//! - An observable project store
//! - A retained document tree and the components that render into it
//! - Configuration

pub mod board;
pub mod components;
pub mod config;
pub mod document;
pub mod error;
pub mod models;
pub mod state;
pub mod validation;

pub use error::{Error, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::board::Board;
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::models::{Project, ProjectStatus};
    pub use crate::state::ProjectState;
}
