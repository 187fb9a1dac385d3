//! UI components
//!
//! Every view shares one lifecycle: clone a template, attach it to a host
//! element, then let the view configure itself and render its content.
//! [`mount`] does the shared part; [`Component`] is the per-view part.

mod project_input;
mod project_item;
mod project_list;

use std::cell::RefCell;
use std::rc::Rc;

pub use project_input::{INVALID_INPUT_MESSAGE, ProjectInput};
pub use project_item::{DRAGGABLE_CLASS, ProjectItem};
pub use project_list::{DROPPABLE_CLASS, ProjectList};

use crate::document::{Document, InsertPosition, NodeId, Tag};
use crate::error::{Error, Result};
use crate::models::ProjectStatus;

/// Document shared between the views and the subscriptions they register
pub type SharedDocument = Rc<RefCell<Document>>;

/// Id of the element every top-level view attaches to
pub const APP_HOST_ID: &str = "app";

/// Per-view half of the component lifecycle
pub trait Component {
    /// Root element of the view
    fn element(&self) -> NodeId;

    /// Wire ids and attributes onto the freshly attached element
    fn configure(&mut self, doc: &mut Document) -> Result<()>;

    /// Write the view's content into its element
    fn render_content(&mut self, doc: &mut Document) -> Result<()>;
}

/// Blocking user-facing message
pub trait Alert {
    fn alert(&mut self, message: &str);
}

impl<F: FnMut(&str)> Alert for F {
    fn alert(&mut self, message: &str) {
        self(message)
    }
}

/// Clone `template_id`, tag it with `"{status}-projects"` when a status is
/// given, and attach it to the element whose id is `host_id`.
pub fn mount(
    doc: &mut Document,
    template_id: &str,
    host_id: &str,
    position: InsertPosition,
    status: Option<ProjectStatus>,
) -> Result<NodeId> {
    let host = doc
        .get_element_by_id(host_id)
        .ok_or_else(|| Error::MissingHost(host_id.to_string()))?;
    let element = doc.import_template(template_id)?;

    if let Some(status) = status {
        doc.set_id(element, format!("{status}-projects"));
    }

    doc.insert_adjacent(host, position, element);
    Ok(element)
}

/// First `tag` descendant of `scope`, or a missing-element error
pub(crate) fn require_tag(doc: &Document, scope: NodeId, tag: Tag) -> Result<NodeId> {
    doc.query_tag(scope, tag)
        .ok_or_else(|| Error::MissingElement(format!("{tag:?}")))
}

/// Descendant of `scope` with the given id, or a missing-element error
pub(crate) fn require_id(doc: &Document, scope: NodeId, id: &str) -> Result<NodeId> {
    doc.query_id(scope, id)
        .ok_or_else(|| Error::MissingElement(format!("#{id}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{TEMPLATE_PROJECT_LIST, TEMPLATE_SINGLE_PROJECT};

    #[test]
    fn test_mount_attaches_to_host() {
        let mut doc = Document::index();
        let element = mount(
            &mut doc,
            TEMPLATE_PROJECT_LIST,
            APP_HOST_ID,
            InsertPosition::BeforeEnd,
            Some(ProjectStatus::Finished),
        )
        .unwrap();

        assert_eq!(doc.id(element), Some("finished-projects"));
        assert_eq!(doc.get_element_by_id("finished-projects"), Some(element));
    }

    #[test]
    fn test_mount_without_status_leaves_id_unset() {
        let mut doc = Document::index();
        let element = mount(&mut doc, TEMPLATE_SINGLE_PROJECT, APP_HOST_ID, InsertPosition::BeforeEnd, None)
            .unwrap();
        assert_eq!(doc.id(element), None);
    }

    #[test]
    fn test_mount_missing_host_is_fatal() {
        let mut doc = Document::index();
        let err = mount(&mut doc, TEMPLATE_PROJECT_LIST, "nowhere", InsertPosition::BeforeEnd, None)
            .unwrap_err();
        assert_eq!(err.code(), "E002");
    }

    #[test]
    fn test_mount_missing_template_is_fatal() {
        let mut doc = Document::new();
        let err = mount(&mut doc, TEMPLATE_PROJECT_LIST, APP_HOST_ID, InsertPosition::BeforeEnd, None)
            .unwrap_err();
        // An empty document has no host either; the host is looked up first
        assert_eq!(err.code(), "E002");

        let mut doc = Document::index();
        let err = mount(&mut doc, "missing", APP_HOST_ID, InsertPosition::BeforeEnd, None).unwrap_err();
        assert_eq!(err.code(), "E001");
    }

    #[test]
    fn test_closure_alert() {
        let mut messages = Vec::new();
        {
            let mut alert = |msg: &str| messages.push(msg.to_string());
            alert.alert("Invalid input!");
        }
        assert_eq!(messages, vec!["Invalid input!"]);
    }
}
