//! A single project card

use tracing::debug;

use super::{Component, mount, require_tag};
use crate::document::{Document, InsertPosition, NodeId, Tag, TEMPLATE_SINGLE_PROJECT};
use crate::error::Result;
use crate::models::{DragEvent, Draggable, DropEffect, Project, TEXT_PLAIN};

/// Class marking an element as a drag source
pub const DRAGGABLE_CLASS: &str = "draggable";

/// Card view bound to one project; acts as a drag source
#[derive(Debug, Clone)]
pub struct ProjectItem {
    project: Project,
    element: NodeId,
}

impl ProjectItem {
    /// Mount a card for `project` at the end of the list whose id is `list_id`
    pub fn new(doc: &mut Document, list_id: &str, project: Project) -> Result<Self> {
        let element = mount(doc, TEMPLATE_SINGLE_PROJECT, list_id, InsertPosition::BeforeEnd, None)?;
        let mut item = Self { project, element };
        item.configure(doc)?;
        item.render_content(doc)?;
        Ok(item)
    }

    pub fn project(&self) -> &Project {
        &self.project
    }
}

impl Component for ProjectItem {
    fn element(&self) -> NodeId {
        self.element
    }

    fn configure(&mut self, doc: &mut Document) -> Result<()> {
        doc.set_id(self.element, self.project.id.clone());
        doc.add_class(self.element, DRAGGABLE_CLASS);
        Ok(())
    }

    fn render_content(&mut self, doc: &mut Document) -> Result<()> {
        let title = require_tag(doc, self.element, Tag::H2)?;
        let people = require_tag(doc, self.element, Tag::H3)?;
        let description = require_tag(doc, self.element, Tag::Paragraph)?;

        doc.set_text(title, self.project.title.clone());
        doc.set_text(people, format!("{} assigned", self.project.people()));
        doc.set_text(description, self.project.description.clone());
        Ok(())
    }
}

impl Draggable for ProjectItem {
    fn drag_start_handler(&self, event: &mut DragEvent<'_>) {
        event.data_transfer.set_data(TEXT_PLAIN, self.project.id.clone());
        event.data_transfer.effect_allowed = DropEffect::Move;
    }

    fn drag_end_handler(&self, event: &DragEvent<'_>) {
        debug!(event = %event.kind, id = %self.project.id, "Drag finished");
    }
}
