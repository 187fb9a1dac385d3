//! Project entity

use uuid::Uuid;

/// Which column a project lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectStatus {
    Active,
    Finished,
}

impl ProjectStatus {
    /// Both statuses in column order
    pub const ALL: [ProjectStatus; 2] = [ProjectStatus::Active, ProjectStatus::Finished];

    /// Lowercase name, used in element ids and headings
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Finished => "finished",
        }
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One task card on the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    people: u32,
    pub status: ProjectStatus,
}

impl Project {
    /// Create a new active project with a fresh random id
    pub fn new(title: impl Into<String>, description: impl Into<String>, people: u32) -> Self {
        Self::from_parts(
            Uuid::new_v4().to_string(),
            title,
            description,
            people,
            ProjectStatus::Active,
        )
    }

    /// Build a project from all of its fields
    pub fn from_parts(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        people: u32,
        status: ProjectStatus,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            people,
            status,
        }
    }

    /// Number of people assigned
    pub fn people_count(&self) -> u32 {
        self.people
    }

    /// Headcount for display, e.g. "1 person" or "3 persons"
    pub fn people(&self) -> String {
        if self.people == 1 {
            format!("{} person", self.people)
        } else {
            format!("{} persons", self.people)
        }
    }
}
