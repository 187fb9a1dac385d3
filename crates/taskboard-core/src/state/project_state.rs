//! Project store

use tracing::{debug, info};

use super::State;
use crate::models::{Project, ProjectStatus};

/// The board's project list plus its subscribers
///
/// Projects are kept in insertion order and never removed. After every
/// successful mutation all subscribers receive a full snapshot,
/// synchronously and in registration order.
#[derive(Default)]
pub struct ProjectState {
    state: State<Project>,
    projects: Vec<Project>,
}

impl ProjectState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber for future changes
    pub fn add_listener(&mut self, listener: impl FnMut(Vec<Project>) + 'static) {
        self.state.add_listener(listener);
    }

    /// Append a project and notify subscribers
    pub fn add_project(&mut self, project: Project) {
        info!(id = %project.id, title = %project.title, "Project added");
        self.projects.push(project);
        self.update_listeners();
    }

    /// Move a project to `new_status`.
    ///
    /// Unknown ids and moves to the current status are silent no-ops; the
    /// return value tells whether anything changed.
    pub fn move_project(&mut self, project_id: &str, new_status: ProjectStatus) -> bool {
        let Some(project) = self.projects.iter_mut().find(|p| p.id == project_id) else {
            debug!(id = %project_id, "Move ignored, no such project");
            return false;
        };

        if project.status == new_status {
            debug!(id = %project_id, status = %new_status, "Move ignored, status unchanged");
            return false;
        }

        info!(id = %project_id, from = %project.status, to = %new_status, "Project moved");
        project.status = new_status;
        self.update_listeners();
        true
    }

    /// Current projects in insertion order
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn listener_count(&self) -> usize {
        self.state.listener_count()
    }

    fn update_listeners(&mut self) {
        self.state.notify(&self.projects);
    }
}
