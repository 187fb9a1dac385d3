//! Board templates
//!
//! The element skeletons that components clone when they mount.

use super::Tag;

pub const TEMPLATE_PROJECT_INPUT: &str = "project-input";
pub const TEMPLATE_PROJECT_LIST: &str = "project-list";
pub const TEMPLATE_SINGLE_PROJECT: &str = "single-project";

/// Blueprint for an element subtree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateNode {
    pub tag: Tag,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub text: String,
    pub children: Vec<TemplateNode>,
}

impl TemplateNode {
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            id: None,
            classes: Vec::new(),
            text: String::new(),
            children: Vec::new(),
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn child(mut self, child: TemplateNode) -> Self {
        self.children.push(child);
        self
    }
}

fn form_control(label: &str, input_id: &str) -> TemplateNode {
    TemplateNode::new(Tag::Div)
        .class("form-control")
        .child(TemplateNode::new(Tag::Label).text(label))
        .child(TemplateNode::new(Tag::Input).id(input_id))
}

pub(super) fn index_templates() -> Vec<(&'static str, TemplateNode)> {
    let project_input = TemplateNode::new(Tag::Form)
        .child(form_control("Title", "title"))
        .child(form_control("Description", "description"))
        .child(form_control("People", "people"))
        .child(TemplateNode::new(Tag::Button).text("ADD PROJECT"));

    let project_list = TemplateNode::new(Tag::Section)
        .class("projects")
        .child(TemplateNode::new(Tag::Header).child(TemplateNode::new(Tag::H2)))
        .child(TemplateNode::new(Tag::List));

    let single_project = TemplateNode::new(Tag::ListItem)
        .child(TemplateNode::new(Tag::H2))
        .child(TemplateNode::new(Tag::H3))
        .child(TemplateNode::new(Tag::Paragraph));

    vec![
        (TEMPLATE_PROJECT_INPUT, project_input),
        (TEMPLATE_PROJECT_LIST, project_list),
        (TEMPLATE_SINGLE_PROJECT, single_project),
    ]
}
