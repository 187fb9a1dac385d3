//! Retained document tree
//!
//! A small arena of elements that the components build and mutate and that
//! the front end renders. Elements are addressed by [`NodeId`]; removing a
//! subtree frees its slots for reuse. Each slot carries a generation, so ids
//! held past a [`clear_children`](Document::clear_children) stop resolving
//! even after the slot is handed out again.

mod templates;

use std::collections::{BTreeSet, HashMap};

pub use templates::{TemplateNode, TEMPLATE_PROJECT_INPUT, TEMPLATE_PROJECT_LIST, TEMPLATE_SINGLE_PROJECT};

use crate::error::{Error, Result};

/// Handle to an element in a [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

/// Element kinds the renderer knows how to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Root,
    Div,
    Form,
    Label,
    Input,
    Button,
    Section,
    Header,
    H2,
    H3,
    Paragraph,
    List,
    ListItem,
}

/// Where to attach an element relative to its host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    /// As the host's first child
    AfterBegin,
    /// As the host's last child
    BeforeEnd,
}

/// One node of the document
#[derive(Debug, Clone)]
pub struct Element {
    tag: Tag,
    id: Option<String>,
    classes: BTreeSet<String>,
    text: String,
    value: String,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl Element {
    fn new(tag: Tag) -> Self {
        Self {
            tag,
            id: None,
            classes: BTreeSet::new(),
            text: String::new(),
            value: String::new(),
            children: Vec::new(),
            parent: None,
        }
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    element: Option<Element>,
}

/// The element arena plus its registered templates
#[derive(Debug, Clone)]
pub struct Document {
    slots: Vec<Slot>,
    free: Vec<usize>,
    /// Live elements by `id` attribute, connected or not
    ids: HashMap<String, Vec<NodeId>>,
    templates: HashMap<String, TemplateNode>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// An empty document holding only the root
    pub fn new() -> Self {
        Self {
            slots: vec![Slot {
                generation: 0,
                element: Some(Element::new(Tag::Root)),
            }],
            free: Vec::new(),
            ids: HashMap::new(),
            templates: HashMap::new(),
            root: NodeId {
                index: 0,
                generation: 0,
            },
        }
    }

    /// The board page: an `#app` host and the three component templates
    pub fn index() -> Self {
        let mut doc = Self::new();
        let app = doc.create_element(Tag::Div);
        doc.set_id(app, "app");
        let root = doc.root;
        doc.insert_adjacent(root, InsertPosition::BeforeEnd, app);

        for (id, template) in templates::index_templates() {
            doc.register_template(id, template);
        }
        doc
    }

    /// Register (or replace) a template under `id`
    pub fn register_template(&mut self, id: impl Into<String>, template: TemplateNode) {
        self.templates.insert(id.into(), template);
    }

    /// Create a detached element, reusing a freed slot when there is one
    pub fn create_element(&mut self, tag: Tag) -> NodeId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index];
            slot.element = Some(Element::new(tag));
            return NodeId {
                index,
                generation: slot.generation,
            };
        }
        let index = self.slots.len();
        self.slots.push(Slot {
            generation: 0,
            element: Some(Element::new(tag)),
        });
        NodeId { index, generation: 0 }
    }

    fn free_slot(&mut self, node: NodeId) {
        let Some(slot) = self.slots.get_mut(node.index) else {
            return;
        };
        if slot.generation != node.generation {
            return;
        }
        let Some(el) = slot.element.take() else {
            return;
        };
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(node.index);
        if let Some(id) = el.id {
            self.unindex_id(&id, node);
        }
    }

    fn unindex_id(&mut self, id: &str, node: NodeId) {
        if let Some(nodes) = self.ids.get_mut(id) {
            nodes.retain(|&n| n != node);
            if nodes.is_empty() {
                self.ids.remove(id);
            }
        }
    }

    /// Deep-copy a registered template into a new detached subtree
    pub fn import_template(&mut self, template_id: &str) -> Result<NodeId> {
        let template = self
            .templates
            .get(template_id)
            .cloned()
            .ok_or_else(|| Error::MissingTemplate(template_id.to_string()))?;
        Ok(self.instantiate(&template, None))
    }

    fn instantiate(&mut self, template: &TemplateNode, parent: Option<NodeId>) -> NodeId {
        let node = self.create_element(template.tag);
        if let Some(id) = &template.id {
            self.set_id(node, id.clone());
        }
        if let Some(el) = self.element_mut(node) {
            el.classes = template.classes.iter().cloned().collect();
            el.text = template.text.clone();
            el.parent = parent;
        }
        for child in &template.children {
            let child_node = self.instantiate(child, Some(node));
            if let Some(el) = self.element_mut(node) {
                el.children.push(child_node);
            }
        }
        node
    }

    pub fn element(&self, node: NodeId) -> Option<&Element> {
        self.slots
            .get(node.index)
            .filter(|slot| slot.generation == node.generation)
            .and_then(|slot| slot.element.as_ref())
    }

    fn element_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        self.slots
            .get_mut(node.index)
            .filter(|slot| slot.generation == node.generation)
            .and_then(|slot| slot.element.as_mut())
    }

    /// Find a connected element by its `id` attribute
    ///
    /// When several connected elements share the id, the first in document
    /// order wins.
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        let connected: Vec<NodeId> = self
            .ids
            .get(id)
            .into_iter()
            .flatten()
            .copied()
            .filter(|&node| self.is_connected(node))
            .collect();
        match connected.as_slice() {
            [] => None,
            [only] => Some(*only),
            _ => self.query_id(self.root, id),
        }
    }

    /// Find a descendant of `scope` by its `id` attribute
    pub fn query_id(&self, scope: NodeId, id: &str) -> Option<NodeId> {
        self.descendants(scope)
            .into_iter()
            .find(|&node| self.element(node).and_then(Element::id) == Some(id))
    }

    /// First descendant of `scope` with `tag`, in document order
    pub fn query_tag(&self, scope: NodeId, tag: Tag) -> Option<NodeId> {
        self.descendants(scope)
            .into_iter()
            .find(|&node| self.tag(node) == Some(tag))
    }

    /// Every descendant of `scope` with `tag`, in document order
    pub fn query_all_tag(&self, scope: NodeId, tag: Tag) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|&node| self.tag(node) == Some(tag))
            .collect()
    }

    /// Descendants of `scope` in pre-order, excluding `scope` itself
    pub fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(scope).iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.children(node).iter().rev().copied());
        }
        out
    }

    /// Attach `node` to `host`, detaching it from any previous parent first
    pub fn insert_adjacent(&mut self, host: NodeId, position: InsertPosition, node: NodeId) {
        if host == node || self.element(host).is_none() || self.element(node).is_none() {
            return;
        }
        self.detach(node);
        if let Some(host_el) = self.element_mut(host) {
            match position {
                InsertPosition::AfterBegin => host_el.children.insert(0, node),
                InsertPosition::BeforeEnd => host_el.children.push(node),
            }
        }
        if let Some(el) = self.element_mut(node) {
            el.parent = Some(host);
        }
    }

    fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.parent(node) else {
            return;
        };
        if let Some(parent_el) = self.element_mut(parent) {
            parent_el.children.retain(|&child| child != node);
        }
        if let Some(el) = self.element_mut(node) {
            el.parent = None;
        }
    }

    /// Remove and free every descendant of `node`
    pub fn clear_children(&mut self, node: NodeId) {
        let doomed = self.descendants(node);
        if let Some(el) = self.element_mut(node) {
            el.children.clear();
        }
        for child in doomed {
            self.free_slot(child);
        }
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.element(node).map(Element::children).unwrap_or(&[])
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.element(node).and_then(Element::parent)
    }

    /// `node` followed by its ancestors up to the root
    pub fn ancestors(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut current = self.element(node).map(|_| node);
        while let Some(n) = current {
            out.push(n);
            current = self.parent(n);
        }
        out
    }

    /// Whether `node` is reachable from the root
    pub fn is_connected(&self, node: NodeId) -> bool {
        self.ancestors(node).last() == Some(&self.root)
    }

    pub fn tag(&self, node: NodeId) -> Option<Tag> {
        self.element(node).map(Element::tag)
    }

    pub fn id(&self, node: NodeId) -> Option<&str> {
        self.element(node).and_then(Element::id)
    }

    pub fn set_id(&mut self, node: NodeId, id: impl Into<String>) {
        let id = id.into();
        let Some(el) = self.element_mut(node) else {
            return;
        };
        let previous = el.id.replace(id.clone());
        if let Some(previous) = previous {
            self.unindex_id(&previous, node);
        }
        self.ids.entry(id).or_default().push(node);
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(el) = self.element_mut(node) {
            el.classes.insert(class.to_string());
        }
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(el) = self.element_mut(node) {
            el.classes.remove(class);
        }
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node).is_some_and(|el| el.has_class(class))
    }

    pub fn text(&self, node: NodeId) -> &str {
        self.element(node).map(Element::text).unwrap_or("")
    }

    pub fn set_text(&mut self, node: NodeId, text: impl Into<String>) {
        if let Some(el) = self.element_mut(node) {
            el.text = text.into();
        }
    }

    pub fn value(&self, node: NodeId) -> &str {
        self.element(node).map(Element::value).unwrap_or("")
    }

    pub fn set_value(&mut self, node: NodeId, value: impl Into<String>) {
        if let Some(el) = self.element_mut(node) {
            el.value = value.into();
        }
    }

    /// Empty every input inside `form`
    pub fn reset_form(&mut self, form: NodeId) {
        for input in self.query_all_tag(form, Tag::Input) {
            self.set_value(input, "");
        }
    }

    /// Number of live elements, root included
    pub fn element_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Allocated slots, live or free
    #[cfg(test)]
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }
}
