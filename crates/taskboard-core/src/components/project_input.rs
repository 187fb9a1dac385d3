//! New-project form

use std::rc::Rc;

use tracing::{info, warn};

use super::{APP_HOST_ID, Alert, Component, SharedDocument, mount, require_id, require_tag};
use crate::config::FormConfig;
use crate::document::{Document, InsertPosition, NodeId, Tag, TEMPLATE_PROJECT_INPUT};
use crate::error::Result;
use crate::models::Project;
use crate::state::ProjectState;
use crate::validation::{ValidationConfig, validate};

/// Message shown when the form rejects its input
pub const INVALID_INPUT_MESSAGE: &str = "Invalid input!";

/// The creation form: validates its fields and submits new projects
pub struct ProjectInput {
    doc: SharedDocument,
    element: NodeId,
    title_input: NodeId,
    description_input: NodeId,
    people_input: NodeId,
    submit_button: NodeId,
    rules: FormConfig,
}

struct UserInput {
    title: String,
    description: String,
    people: u32,
}

impl ProjectInput {
    /// Mount the form at the top of `#app`
    pub fn new(doc: &SharedDocument, rules: FormConfig) -> Result<Self> {
        let shared = Rc::clone(doc);
        let mut input = {
            let mut doc = doc.borrow_mut();
            let element = mount(
                &mut doc,
                TEMPLATE_PROJECT_INPUT,
                APP_HOST_ID,
                InsertPosition::AfterBegin,
                None,
            )?;
            Self {
                doc: shared,
                element,
                title_input: require_id(&doc, element, "title")?,
                description_input: require_id(&doc, element, "description")?,
                people_input: require_id(&doc, element, "people")?,
                submit_button: require_tag(&doc, element, Tag::Button)?,
                rules,
            }
        };

        let doc = Rc::clone(&input.doc);
        let mut doc = doc.borrow_mut();
        input.configure(&mut doc)?;
        input.render_content(&mut doc)?;
        Ok(input)
    }

    /// Focusable controls in tab order: the three inputs, then the button
    pub fn controls(&self) -> [NodeId; 4] {
        [
            self.title_input,
            self.description_input,
            self.people_input,
            self.submit_button,
        ]
    }

    /// Whether `node` is one of the text inputs
    pub fn is_input(&self, node: NodeId) -> bool {
        self.controls()[..3].contains(&node)
    }

    /// Handle a form submission.
    ///
    /// Valid input becomes a new active project in `state` and the form is
    /// cleared. Invalid input raises a single alert and leaves the fields as
    /// they were. Returns whether a project was added.
    pub fn submit_handler(&self, state: &mut ProjectState, alert: &mut dyn Alert) -> bool {
        let Some(input) = self.gather_user_input() else {
            alert.alert(INVALID_INPUT_MESSAGE);
            return false;
        };

        let project = Project::new(input.title, input.description, input.people);
        info!(id = %project.id, "Submitting new project");
        state.add_project(project);

        let mut doc = self.doc.borrow_mut();
        doc.reset_form(self.element);
        true
    }

    fn gather_user_input(&self) -> Option<UserInput> {
        let (title, description, people_raw) = {
            let doc = self.doc.borrow();
            (
                doc.value(self.title_input).to_string(),
                doc.value(self.description_input).to_string(),
                doc.value(self.people_input).to_string(),
            )
        };
        let people = to_number(&people_raw);
        let rules = &self.rules;

        let valid = validate(&ValidationConfig::text(&title).required())
            && validate(
                &ValidationConfig::text(&description)
                    .min_length(rules.description_min_length)
                    .max_length(rules.description_max_length),
            )
            && validate(
                &ValidationConfig::number(people)
                    .min(f64::from(rules.people_min))
                    .max(f64::from(rules.people_max)),
            );

        if !valid {
            warn!(title = %title, description = %description, people = %people_raw, "Rejected form input");
            return None;
        }

        // Head counts are whole numbers; NaN and fractions slip past `validate`.
        if !people.is_finite() || people.fract() != 0.0 || people < 0.0 || people > f64::from(u32::MAX) {
            warn!(people = %people_raw, "Rejected non-integral head count");
            return None;
        }

        Some(UserInput {
            title,
            description,
            people: people as u32,
        })
    }
}

/// Numeric coercion of field text: blank is 0, `0x`/`0o`/`0b` prefixes
/// read as unsigned integers, anything unparsable is NaN
fn to_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if let Some(value) = radix_integer(trimmed) {
        return value;
    }
    match trimmed {
        "" => 0.0,
        "Infinity" | "+Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        _ => {
            let lower = trimmed.to_ascii_lowercase();
            if lower.contains("inf") || lower.contains("nan") {
                f64::NAN
            } else {
                trimmed.parse().unwrap_or(f64::NAN)
            }
        }
    }
}

fn radix_integer(text: &str) -> Option<f64> {
    let (radix, digits) = match text.get(..2)? {
        "0x" | "0X" => (16, &text[2..]),
        "0o" | "0O" => (8, &text[2..]),
        "0b" | "0B" => (2, &text[2..]),
        _ => return None,
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Some(f64::NAN);
    }
    Some(
        digits
            .chars()
            .filter_map(|c| c.to_digit(radix))
            .fold(0.0, |acc, d| acc * f64::from(radix) + f64::from(d)),
    )
}

impl Component for ProjectInput {
    fn element(&self) -> NodeId {
        self.element
    }

    fn configure(&mut self, doc: &mut Document) -> Result<()> {
        doc.set_id(self.element, "user-input");
        Ok(())
    }

    fn render_content(&mut self, _doc: &mut Document) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn setup() -> (SharedDocument, ProjectInput) {
        let doc = Rc::new(RefCell::new(Document::index()));
        let input = ProjectInput::new(&doc, FormConfig::default()).unwrap();
        (doc, input)
    }

    fn fill(doc: &SharedDocument, input: &ProjectInput, title: &str, description: &str, people: &str) {
        let [t, d, p, _] = input.controls();
        let mut doc = doc.borrow_mut();
        doc.set_value(t, title);
        doc.set_value(d, description);
        doc.set_value(p, people);
    }

    fn submit(input: &ProjectInput, state: &mut ProjectState) -> (bool, Vec<String>) {
        let mut alerts = Vec::new();
        let added = input.submit_handler(state, &mut |msg: &str| alerts.push(msg.to_string()));
        (added, alerts)
    }

    #[test]
    fn test_form_is_first_child_of_app() {
        let (doc, input) = setup();
        let doc = doc.borrow();
        let app = doc.get_element_by_id(APP_HOST_ID).unwrap();
        assert_eq!(doc.children(app)[0], input.element());
        assert_eq!(doc.id(input.element()), Some("user-input"));
    }

    #[test]
    fn test_valid_submit_adds_project_and_resets() {
        let (doc, input) = setup();
        let mut state = ProjectState::new();
        fill(&doc, &input, "Build API", "a short desc", "3");

        let (added, alerts) = submit(&input, &mut state);

        assert!(added);
        assert!(alerts.is_empty());
        assert_eq!(state.len(), 1);
        let project = &state.projects()[0];
        assert_eq!(project.title, "Build API");
        assert_eq!(project.people(), "3 persons");

        let doc = doc.borrow();
        for control in &input.controls()[..3] {
            assert_eq!(doc.value(*control), "");
        }
    }

    #[test]
    fn test_invalid_submit_alerts_and_keeps_fields() {
        let (doc, input) = setup();
        let mut state = ProjectState::new();
        fill(&doc, &input, "Build API", "ab", "3");

        let (added, alerts) = submit(&input, &mut state);

        assert!(!added);
        assert_eq!(alerts, vec![INVALID_INPUT_MESSAGE]);
        assert!(state.is_empty());
        let [t, d, p, _] = input.controls();
        let doc = doc.borrow();
        assert_eq!(doc.value(t), "Build API");
        assert_eq!(doc.value(d), "ab");
        assert_eq!(doc.value(p), "3");
    }

    #[test]
    fn test_rejects_each_bad_field() {
        let too_long = "x".repeat(31);
        let cases = [
            ("", "a short desc", "3"),
            ("Title", "ab", "3"),
            ("Title", too_long.as_str(), "3"),
            ("Title", "a short desc", "0"),
            ("Title", "a short desc", "6"),
            ("Title", "a short desc", ""),
            ("Title", "a short desc", "two"),
            ("Title", "a short desc", "2.5"),
        ];
        for (title, description, people) in cases {
            let (doc, input) = setup();
            let mut state = ProjectState::new();
            fill(&doc, &input, title, description, people);
            let (added, alerts) = submit(&input, &mut state);
            assert!(!added, "accepted {title:?} / {description:?} / {people:?}");
            assert_eq!(alerts.len(), 1);
        }
    }

    #[test]
    fn test_accepts_boundaries() {
        let longest = "x".repeat(30);
        for (description, people) in [("abc", "1"), (longest.as_str(), "5"), ("  abc  ", " 4 ")] {
            let (doc, input) = setup();
            let mut state = ProjectState::new();
            fill(&doc, &input, "T", description, people);
            let (added, _) = submit(&input, &mut state);
            assert!(added, "rejected {description:?} / {people:?}");
        }
    }

    #[test]
    fn test_configured_bounds_apply() {
        let doc = Rc::new(RefCell::new(Document::index()));
        let rules = FormConfig {
            people_max: 10,
            ..FormConfig::default()
        };
        let input = ProjectInput::new(&doc, rules).unwrap();
        let mut state = ProjectState::new();
        fill(&doc, &input, "Team", "big team", "8");

        let (added, _) = submit(&input, &mut state);
        assert!(added);
    }

    #[test]
    fn test_to_number() {
        assert_eq!(to_number(""), 0.0);
        assert_eq!(to_number("   "), 0.0);
        assert_eq!(to_number(" 3 "), 3.0);
        assert_eq!(to_number("2.5"), 2.5);
        assert_eq!(to_number("Infinity"), f64::INFINITY);
        assert!(to_number("abc").is_nan());
        assert!(to_number("inf").is_nan());
        assert!(to_number("NaN").is_nan());
    }

    #[test]
    fn test_to_number_radix_prefixes() {
        assert_eq!(to_number("0x3"), 3.0);
        assert_eq!(to_number(" 0XfF "), 255.0);
        assert_eq!(to_number("0o7"), 7.0);
        assert_eq!(to_number("0b11"), 3.0);
        assert!(to_number("0x").is_nan());
        assert!(to_number("0b12").is_nan());
        assert!(to_number("-0x3").is_nan());
    }

    #[test]
    fn test_hex_head_count_is_accepted() {
        let (doc, input) = setup();
        let mut state = ProjectState::new();
        fill(&doc, &input, "Build API", "write the endpoints", "0x3");

        let (added, alerts) = submit(&input, &mut state);

        assert!(added);
        assert!(alerts.is_empty());
        assert_eq!(state.projects()[0].people_count(), 3);
    }
}
