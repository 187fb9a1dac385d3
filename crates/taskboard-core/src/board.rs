//! Board assembly
//!
//! Builds the page the way the app starts up: the form first, then one
//! column per status, all sharing one document and one store.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use tracing::info;

use crate::components::{Alert, Component, ProjectInput, ProjectItem, ProjectList, SharedDocument};
use crate::config::Config;
use crate::document::{Document, NodeId};
use crate::error::Result;
use crate::models::{DragEvent, DragTarget, ProjectStatus};
use crate::state::ProjectState;

/// The whole board: document, store and views
pub struct Board {
    doc: SharedDocument,
    state: ProjectState,
    input: ProjectInput,
    lists: Vec<ProjectList>,
}

impl Board {
    /// Mount the form and both columns into a fresh document
    pub fn new(config: &Config) -> Result<Self> {
        let doc: SharedDocument = Rc::new(RefCell::new(Document::index()));
        let mut state = ProjectState::new();

        let input = ProjectInput::new(&doc, config.form)?;
        let lists = ProjectStatus::ALL
            .iter()
            .map(|&status| ProjectList::new(&doc, &mut state, status))
            .collect::<Result<Vec<_>>>()?;

        info!(columns = lists.len(), "Board mounted");
        Ok(Self {
            doc,
            state,
            input,
            lists,
        })
    }

    pub fn document(&self) -> Ref<'_, Document> {
        self.doc.borrow()
    }

    pub fn shared_document(&self) -> &SharedDocument {
        &self.doc
    }

    pub fn state(&self) -> &ProjectState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ProjectState {
        &mut self.state
    }

    pub fn input(&self) -> &ProjectInput {
        &self.input
    }

    pub fn list(&self, status: ProjectStatus) -> Option<&ProjectList> {
        self.lists.iter().find(|list| list.status() == status)
    }

    /// Submit the form as it currently reads
    pub fn submit(&mut self, alert: &mut dyn Alert) -> bool {
        self.input.submit_handler(&mut self.state, alert)
    }

    /// The card containing `node`, if any
    pub fn item_at(&self, node: NodeId) -> Option<ProjectItem> {
        let ancestors = self.document().ancestors(node);
        ancestors
            .into_iter()
            .find_map(|n| self.lists.iter().find_map(|list| list.item_for(n)))
    }

    /// The column containing `node`, if any
    pub fn list_at(&self, node: NodeId) -> Option<&ProjectList> {
        let ancestors = self.document().ancestors(node);
        self.lists
            .iter()
            .find(|list| ancestors.contains(&list.element()))
    }

    /// Deliver a drop to the column with `status`
    pub fn drop_on(&mut self, status: ProjectStatus, event: &mut DragEvent<'_>) {
        if let Some(list) = self.lists.iter().find(|list| list.status() == status) {
            list.drop_handler(event, &mut self.state);
        }
    }
}
