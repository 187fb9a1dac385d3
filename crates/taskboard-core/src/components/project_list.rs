//! A status column

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, error};

use super::{APP_HOST_ID, Component, ProjectItem, SharedDocument, mount, require_tag};
use crate::document::{Document, InsertPosition, NodeId, Tag, TEMPLATE_PROJECT_LIST};
use crate::error::{Error, Result};
use crate::models::{DragEvent, DragTarget, Project, ProjectStatus, TEXT_PLAIN};
use crate::state::ProjectState;

/// Class toggled on the list while it would accept a drop
pub const DROPPABLE_CLASS: &str = "droppable";

/// Column showing every project with one status; accepts dropped cards
pub struct ProjectList {
    status: ProjectStatus,
    doc: SharedDocument,
    element: NodeId,
    list: NodeId,
    items: Rc<RefCell<Vec<ProjectItem>>>,
}

impl ProjectList {
    /// Mount the column under `#app` and subscribe it to `state`
    pub fn new(doc: &SharedDocument, state: &mut ProjectState, status: ProjectStatus) -> Result<Self> {
        let (element, list) = {
            let mut doc = doc.borrow_mut();
            let element = mount(
                &mut doc,
                TEMPLATE_PROJECT_LIST,
                APP_HOST_ID,
                InsertPosition::BeforeEnd,
                Some(status),
            )?;
            (element, require_tag(&doc, element, Tag::List)?)
        };

        let mut view = Self {
            status,
            doc: Rc::clone(doc),
            element,
            list,
            items: Rc::new(RefCell::new(Vec::new())),
        };

        let doc = Rc::clone(&view.doc);
        let mut doc = doc.borrow_mut();
        view.configure(&mut doc)?;
        view.subscribe(state);
        view.render_content(&mut doc)?;
        Ok(view)
    }

    pub fn status(&self) -> ProjectStatus {
        self.status
    }

    /// The `<ul>` that holds the cards
    pub fn list_element(&self) -> NodeId {
        self.list
    }

    /// Cards currently rendered, in store order
    pub fn items(&self) -> Vec<ProjectItem> {
        self.items.borrow().clone()
    }

    /// Card whose element is `node`
    pub fn item_for(&self, node: NodeId) -> Option<ProjectItem> {
        self.items
            .borrow()
            .iter()
            .find(|item| item.element() == node)
            .cloned()
    }

    pub fn is_droppable(&self) -> bool {
        self.doc.borrow().has_class(self.list, DROPPABLE_CLASS)
    }

    fn subscribe(&self, state: &mut ProjectState) {
        let doc = Rc::clone(&self.doc);
        let items = Rc::clone(&self.items);
        let status = self.status;
        let list = self.list;

        state.add_listener(move |projects: Vec<Project>| {
            let assigned: Vec<Project> = projects.into_iter().filter(|p| p.status == status).collect();
            let mut doc = doc.borrow_mut();
            let mut items = items.borrow_mut();
            if let Err(err) = render_projects(&mut doc, list, &mut items, assigned) {
                error!(status = %status, error = %err, "Failed to render project list");
            }
        });
    }
}

/// Replace every card in `list` with one per project, in order
fn render_projects(
    doc: &mut Document,
    list: NodeId,
    items: &mut Vec<ProjectItem>,
    projects: Vec<Project>,
) -> Result<()> {
    doc.clear_children(list);
    items.clear();

    let list_id = doc
        .id(list)
        .map(str::to_string)
        .ok_or_else(|| Error::MissingElement("list id".to_string()))?;

    for project in projects {
        items.push(ProjectItem::new(doc, &list_id, project)?);
    }
    Ok(())
}

impl Component for ProjectList {
    fn element(&self) -> NodeId {
        self.element
    }

    fn configure(&mut self, doc: &mut Document) -> Result<()> {
        doc.set_id(self.list, format!("{}-projects-list", self.status));
        Ok(())
    }

    fn render_content(&mut self, doc: &mut Document) -> Result<()> {
        let heading = require_tag(doc, self.element, Tag::H2)?;
        doc.set_text(heading, format!("{} projects", self.status).to_uppercase());
        Ok(())
    }
}

impl DragTarget for ProjectList {
    fn drag_over_handler(&self, event: &mut DragEvent<'_>) {
        if event.data_transfer.types().first() == Some(&TEXT_PLAIN) {
            event.prevent_default();
            self.doc.borrow_mut().add_class(self.list, DROPPABLE_CLASS);
        }
    }

    fn drag_leave_handler(&self, _event: &DragEvent<'_>) {
        self.doc.borrow_mut().remove_class(self.list, DROPPABLE_CLASS);
    }

    fn drop_handler(&self, event: &mut DragEvent<'_>, state: &mut ProjectState) {
        let project_id = event.data_transfer.get_data(TEXT_PLAIN);
        debug!(id = %project_id, target = %self.status, "Drop received");
        state.move_project(&project_id, self.status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DataTransfer, DragEventKind};

    fn setup(status: ProjectStatus) -> (SharedDocument, ProjectState, ProjectList) {
        let doc = Rc::new(RefCell::new(Document::index()));
        let mut state = ProjectState::new();
        let list = ProjectList::new(&doc, &mut state, status).unwrap();
        (doc, state, list)
    }

    fn project(id: &str, status: ProjectStatus) -> Project {
        Project::from_parts(id, id.to_uppercase(), "description", 2, status)
    }

    #[test]
    fn test_list_ids_and_heading() {
        let (doc, _state, list) = setup(ProjectStatus::Active);
        let doc = doc.borrow();

        assert_eq!(doc.id(list.element()), Some("active-projects"));
        assert_eq!(doc.id(list.list_element()), Some("active-projects-list"));
        let heading = doc.query_tag(list.element(), Tag::H2).unwrap();
        assert_eq!(doc.text(heading), "ACTIVE PROJECTS");
    }

    #[test]
    fn test_list_subscribes_on_construction() {
        let (_doc, state, _list) = setup(ProjectStatus::Finished);
        assert_eq!(state.listener_count(), 1);
    }

    #[test]
    fn test_list_renders_only_its_status() {
        let (doc, mut state, list) = setup(ProjectStatus::Active);
        state.add_project(project("a", ProjectStatus::Active));
        state.add_project(project("b", ProjectStatus::Finished));
        state.add_project(project("c", ProjectStatus::Active));

        let ids: Vec<String> = list.items().iter().map(|i| i.project().id.clone()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert_eq!(doc.borrow().children(list.list_element()).len(), 2);
    }

    #[test]
    fn test_rerender_replaces_previous_cards() {
        let (doc, mut state, list) = setup(ProjectStatus::Active);
        state.add_project(project("a", ProjectStatus::Active));
        let first_card = list.items()[0].element();

        state.add_project(project("b", ProjectStatus::Active));

        let doc = doc.borrow();
        assert!(doc.element(first_card).is_none());
        assert_eq!(doc.children(list.list_element()).len(), 2);
        assert_eq!(list.item_for(first_card).map(|i| i.project().id.clone()), None);
    }

    #[test]
    fn test_drag_over_accepts_plain_text_first() {
        let (_doc, _state, list) = setup(ProjectStatus::Finished);
        let mut transfer = DataTransfer::new();
        transfer.set_data(TEXT_PLAIN, "a");

        let mut event = DragEvent::new(DragEventKind::DragOver, &mut transfer, (0, 0));
        list.drag_over_handler(&mut event);

        assert!(event.default_prevented());
        assert!(list.is_droppable());
    }

    #[test]
    fn test_drag_over_ignores_foreign_payload() {
        let (_doc, _state, list) = setup(ProjectStatus::Finished);
        let mut transfer = DataTransfer::new();
        transfer.set_data("Files", "report.pdf");
        transfer.set_data(TEXT_PLAIN, "a");

        let mut event = DragEvent::new(DragEventKind::DragOver, &mut transfer, (0, 0));
        list.drag_over_handler(&mut event);

        assert!(!event.default_prevented());
        assert!(!list.is_droppable());
    }

    #[test]
    fn test_drag_leave_clears_mark() {
        let (_doc, _state, list) = setup(ProjectStatus::Finished);
        let mut transfer = DataTransfer::new();
        transfer.set_data(TEXT_PLAIN, "a");

        list.drag_over_handler(&mut DragEvent::new(DragEventKind::DragOver, &mut transfer, (0, 0)));
        assert!(list.is_droppable());
        list.drag_leave_handler(&DragEvent::new(DragEventKind::DragLeave, &mut transfer, (0, 0)));
        assert!(!list.is_droppable());
        list.drag_leave_handler(&DragEvent::new(DragEventKind::DragLeave, &mut transfer, (0, 0)));
        assert!(!list.is_droppable());
    }

    #[test]
    fn test_drop_moves_project_here() {
        let (_doc, mut state, list) = setup(ProjectStatus::Finished);
        state.add_project(project("a", ProjectStatus::Active));

        let mut transfer = DataTransfer::new();
        transfer.set_data(TEXT_PLAIN, "a");
        list.drop_handler(&mut DragEvent::new(DragEventKind::Drop, &mut transfer, (0, 0)), &mut state);

        assert_eq!(state.projects()[0].status, ProjectStatus::Finished);
        assert_eq!(list.items().len(), 1);
    }

    #[test]
    fn test_drop_with_empty_payload_is_silent() {
        let (_doc, mut state, list) = setup(ProjectStatus::Finished);
        state.add_project(project("a", ProjectStatus::Active));

        let mut transfer = DataTransfer::new();
        list.drop_handler(&mut DragEvent::new(DragEventKind::Drop, &mut transfer, (0, 0)), &mut state);

        assert_eq!(state.projects()[0].status, ProjectStatus::Active);
        assert!(list.items().is_empty());
    }

    #[test]
    fn test_rerenders_reuse_document_slots() {
        let (doc, mut state, list) = setup(ProjectStatus::Active);
        for i in 0..20 {
            state.add_project(project(&format!("p{i}"), ProjectStatus::Active));
        }
        let slots = doc.borrow().slot_count();

        for _ in 0..5 {
            for i in 0..20 {
                state.move_project(&format!("p{i}"), ProjectStatus::Finished);
            }
            for i in 0..20 {
                state.move_project(&format!("p{i}"), ProjectStatus::Active);
            }
        }

        assert_eq!(list.items().len(), 20);
        assert_eq!(doc.borrow().slot_count(), slots);
    }
}
