//! Drag-and-drop contracts
//!
//! A drag gesture carries a [`DataTransfer`] from a [`Draggable`] source to
//! a [`DragTarget`]. The board only ever transfers a project id as plain
//! text.

use crate::state::ProjectState;

/// Format tag for plain-text payloads
pub const TEXT_PLAIN: &str = "text/plain";

/// Operations a drag source allows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DropEffect {
    #[default]
    None,
    Copy,
    Move,
    Link,
    All,
}

/// Payload carried by a drag gesture
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataTransfer {
    entries: Vec<(String, String)>,
    pub effect_allowed: DropEffect,
}

impl DataTransfer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `data` under `format`, replacing any previous entry for it
    pub fn set_data(&mut self, format: &str, data: impl Into<String>) {
        let data = data.into();
        match self.entries.iter_mut().find(|(f, _)| f == format) {
            Some(entry) => entry.1 = data,
            None => self.entries.push((format.to_string(), data)),
        }
    }

    /// Data stored under `format`, or an empty string
    pub fn get_data(&self, format: &str) -> String {
        self.entries
            .iter()
            .find(|(f, _)| f == format)
            .map(|(_, data)| data.clone())
            .unwrap_or_default()
    }

    /// Declared formats in insertion order
    pub fn types(&self) -> Vec<&str> {
        self.entries.iter().map(|(f, _)| f.as_str()).collect()
    }
}

/// Phase of a drag gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEventKind {
    DragStart,
    DragEnd,
    DragOver,
    DragLeave,
    Drop,
}

impl std::fmt::Display for DragEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DragStart => write!(f, "dragstart"),
            Self::DragEnd => write!(f, "dragend"),
            Self::DragOver => write!(f, "dragover"),
            Self::DragLeave => write!(f, "dragleave"),
            Self::Drop => write!(f, "drop"),
        }
    }
}

/// A single drag event delivered to a source or target
#[derive(Debug)]
pub struct DragEvent<'a> {
    pub kind: DragEventKind,
    pub data_transfer: &'a mut DataTransfer,
    /// Pointer position as (column, row)
    pub position: (u16, u16),
    default_prevented: bool,
}

impl<'a> DragEvent<'a> {
    pub fn new(kind: DragEventKind, data_transfer: &'a mut DataTransfer, position: (u16, u16)) -> Self {
        Self {
            kind,
            data_transfer,
            position,
            default_prevented: false,
        }
    }

    /// Cancel the default action; on dragover this marks the target as accepting the drop
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// A component that can be picked up
pub trait Draggable {
    fn drag_start_handler(&self, event: &mut DragEvent<'_>);
    fn drag_end_handler(&self, event: &DragEvent<'_>);
}

/// A component that accepts drops
pub trait DragTarget {
    fn drag_over_handler(&self, event: &mut DragEvent<'_>);
    fn drag_leave_handler(&self, event: &DragEvent<'_>);
    fn drop_handler(&self, event: &mut DragEvent<'_>, state: &mut ProjectState);
}
