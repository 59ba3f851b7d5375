//! In-memory document
//!
//! An arena of element nodes. Nodes are never freed; detached nodes simply
//! stop being reachable from the root.

use crate::core::{Error, Result};
use crate::dom::selector::{ElementView, Selector};
use crate::dom::Document;
use std::cell::RefCell;

/// Handle to a node of a [`MemoryDocument`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Default)]
struct Node {
    tag: String,
    attrs: Vec<(String, String)>,
    text: String,
    display: Option<String>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl ElementView for Node {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    fn has_class(&self, class: &str) -> bool {
        self.attribute("class")
            .map(|classes| classes.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Default::default()
        }
    }

    fn set_attr(&mut self, name: &str, value: &str) {
        match self.attrs.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.attrs.push((name.to_string(), value.to_string())),
        }
    }

    fn classes(&self) -> Vec<String> {
        self.attribute("class")
            .map(|classes| classes.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }

    fn set_classes(&mut self, classes: &[String]) {
        self.set_attr("class", &classes.join(" "));
    }
}

/// Element tree rooted at `<html>` with a `<body>` child.
///
/// Storage only grows: `remove_children` detaches nodes without freeing
/// them, so every language switch leaves the previous subject options
/// behind. Suited to tests and one-shot runs, not to a long-lived page.
pub struct MemoryDocument {
    nodes: RefCell<Vec<Node>>,
}

const ROOT: NodeId = NodeId(0);
const BODY: NodeId = NodeId(1);

impl MemoryDocument {
    pub fn new() -> Self {
        let mut html = Node::new("html");
        let mut body = Node::new("body");
        html.children.push(BODY);
        body.parent = Some(ROOT);

        Self {
            nodes: RefCell::new(vec![html, body]),
        }
    }

    pub fn body(&self) -> NodeId {
        BODY
    }

    /// Create an element with attributes and append it to `parent`
    pub fn append_element(&self, parent: &NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let mut node = Node::new(tag);
        for (name, value) in attrs {
            node.set_attr(name, value);
        }
        node.parent = Some(*parent);

        let mut nodes = self.nodes.borrow_mut();
        let id = NodeId(nodes.len());
        nodes.push(node);
        nodes[parent.0].children.push(id);
        id
    }

    pub fn tag(&self, element: &NodeId) -> String {
        self.nodes.borrow()[element.0].tag.clone()
    }

    pub fn children(&self, element: &NodeId) -> Vec<NodeId> {
        self.nodes.borrow()[element.0].children.clone()
    }

    /// Inline `display` style, if one was set
    pub fn display(&self, element: &NodeId) -> Option<String> {
        self.nodes.borrow()[element.0].display.clone()
    }

    fn is_inclusive_ancestor(nodes: &[Node], ancestor: NodeId, mut node: NodeId) -> bool {
        loop {
            if node == ancestor {
                return true;
            }
            match nodes[node.0].parent {
                Some(parent) => node = parent,
                None => return false,
            }
        }
    }

    fn matches(nodes: &[Node], selector: &Selector, id: NodeId) -> bool {
        let Some((subject, ancestors)) = selector.compounds().split_last() else {
            return false;
        };
        if !subject.matches(&nodes[id.0]) {
            return false;
        }

        let mut cursor = nodes[id.0].parent;
        for compound in ancestors.iter().rev() {
            loop {
                match cursor {
                    Some(ancestor) => {
                        cursor = nodes[ancestor.0].parent;
                        if compound.matches(&nodes[ancestor.0]) {
                            break;
                        }
                    }
                    None => return false,
                }
            }
        }
        true
    }

    fn preorder(nodes: &[Node], from: NodeId, out: &mut Vec<NodeId>) {
        out.push(from);
        for child in &nodes[from.0].children {
            Self::preorder(nodes, *child, out);
        }
    }

    fn collect_text(nodes: &[Node], from: NodeId, out: &mut String) {
        out.push_str(&nodes[from.0].text);
        for child in &nodes[from.0].children {
            Self::collect_text(nodes, *child, out);
        }
    }

    fn parse(selector: &str) -> Option<Selector> {
        Selector::parse(selector)
            .map_err(|e| log::warn!("Invalid selector: {}", e))
            .ok()
    }
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl Document for MemoryDocument {
    type Element = NodeId;

    fn root(&self) -> NodeId {
        ROOT
    }

    fn query_selector(&self, selector: &str) -> Option<NodeId> {
        self.query_selector_all(selector).into_iter().next()
    }

    fn query_selector_all(&self, selector: &str) -> Vec<NodeId> {
        let Some(selector) = Self::parse(selector) else {
            return Vec::new();
        };
        let nodes = self.nodes.borrow();
        let mut order = Vec::new();
        Self::preorder(&nodes, ROOT, &mut order);
        order
            .into_iter()
            .filter(|id| Self::matches(&nodes, &selector, *id))
            .collect()
    }

    fn create_element(&self, tag: &str) -> Result<NodeId> {
        let mut nodes = self.nodes.borrow_mut();
        let id = NodeId(nodes.len());
        nodes.push(Node::new(tag));
        Ok(id)
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) -> Result<()> {
        let mut nodes = self.nodes.borrow_mut();
        if Self::is_inclusive_ancestor(&nodes, *child, *parent) {
            return Err(Error::Dom("cannot append a node into itself".to_string()));
        }
        if let Some(old_parent) = nodes[child.0].parent {
            nodes[old_parent.0].children.retain(|c| c != child);
        }
        nodes[child.0].parent = Some(*parent);
        nodes[parent.0].children.push(*child);
        Ok(())
    }

    fn remove_children(&self, element: &NodeId) {
        let mut nodes = self.nodes.borrow_mut();
        let children = std::mem::take(&mut nodes[element.0].children);
        for child in children {
            nodes[child.0].parent = None;
        }
    }

    fn set_attribute(&self, element: &NodeId, name: &str, value: &str) -> Result<()> {
        self.nodes.borrow_mut()[element.0].set_attr(name, value);
        Ok(())
    }

    fn get_attribute(&self, element: &NodeId, name: &str) -> Option<String> {
        self.nodes.borrow()[element.0].attribute(name).map(str::to_string)
    }

    fn set_text(&self, element: &NodeId, text: &str) {
        self.remove_children(element);
        self.nodes.borrow_mut()[element.0].text = text.to_string();
    }

    fn text_content(&self, element: &NodeId) -> String {
        let mut out = String::new();
        Self::collect_text(&self.nodes.borrow(), *element, &mut out);
        out
    }

    fn add_class(&self, element: &NodeId, class: &str) {
        let mut nodes = self.nodes.borrow_mut();
        let node = &mut nodes[element.0];
        let mut classes = node.classes();
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
            node.set_classes(&classes);
        }
    }

    fn remove_class(&self, element: &NodeId, class: &str) {
        let mut nodes = self.nodes.borrow_mut();
        let node = &mut nodes[element.0];
        let mut classes = node.classes();
        let before = classes.len();
        classes.retain(|c| c != class);
        if classes.len() != before {
            node.set_classes(&classes);
        }
    }

    fn toggle_class(&self, element: &NodeId, class: &str) -> bool {
        if self.has_class(element, class) {
            self.remove_class(element, class);
            false
        } else {
            self.add_class(element, class);
            true
        }
    }

    fn has_class(&self, element: &NodeId, class: &str) -> bool {
        self.nodes.borrow()[element.0].has_class(class)
    }

    fn set_display(&self, element: &NodeId, value: &str) {
        self.nodes.borrow_mut()[element.0].display = Some(value.to_string());
    }

    fn closest(&self, element: &NodeId, selector: &str) -> Option<NodeId> {
        let selector = Self::parse(selector)?;
        let nodes = self.nodes.borrow();
        let mut cursor = Some(*element);
        while let Some(id) = cursor {
            if Self::matches(&nodes, &selector, id) {
                return Some(id);
            }
            cursor = nodes[id.0].parent;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn navbar(doc: &MemoryDocument) -> NodeId {
        let nav = doc.append_element(&doc.body(), "nav", &[("class", "navbar")]);
        doc.append_element(&nav, "div", &[("class", "nav-container wide")])
    }

    #[test]
    fn test_descendant_selector() {
        let doc = MemoryDocument::new();
        let container = navbar(&doc);
        doc.append_element(&doc.body(), "div", &[("class", "nav-container")]);

        assert_eq!(doc.query_selector(".navbar .nav-container"), Some(container));
        assert_eq!(doc.query_selector_all(".nav-container").len(), 2);
        assert_eq!(doc.query_selector("html body .navbar div"), Some(container));
        assert_eq!(doc.query_selector(".footer .nav-container"), None);
    }

    #[test]
    fn test_document_order() {
        let doc = MemoryDocument::new();
        let first = doc.append_element(&doc.body(), "p", &[("data-translate", "hero.title")]);
        let section = doc.append_element(&doc.body(), "section", &[]);
        let second = doc.append_element(&section, "p", &[("data-translate", "hero.title")]);

        assert_eq!(doc.query_selector_all(r#"[data-translate="hero.title"]"#), vec![first, second]);
    }

    #[test]
    fn test_detached_nodes_are_not_found() {
        let doc = MemoryDocument::new();
        let select = doc.append_element(&doc.body(), "select", &[("name", "subject")]);
        let option = doc.append_element(&select, "option", &[("value", "a")]);
        assert_eq!(doc.query_selector("option"), Some(option));

        doc.remove_children(&select);
        assert_eq!(doc.query_selector("option"), None);
        assert!(doc.children(&select).is_empty());
    }

    #[test]
    fn test_set_text_replaces_children() {
        let doc = MemoryDocument::new();
        let button = doc.append_element(&doc.body(), "button", &[]);
        let span = doc.append_element(&button, "span", &[]);
        doc.set_text(&span, "English");
        assert_eq!(doc.text_content(&button), "English");

        doc.set_text(&button, "Reset");
        assert_eq!(doc.text_content(&button), "Reset");
        assert_eq!(doc.query_selector("button span"), None);
    }

    #[test]
    fn test_class_helpers() {
        let doc = MemoryDocument::new();
        let el = doc.append_element(&doc.body(), "div", &[("class", "lang-dropdown")]);

        assert!(doc.toggle_class(&el, "active"));
        assert!(doc.has_class(&el, "active"));
        assert_eq!(doc.get_attribute(&el, "class").as_deref(), Some("lang-dropdown active"));
        assert!(!doc.toggle_class(&el, "active"));
        doc.remove_class(&el, "active");
        assert!(doc.has_class(&el, "lang-dropdown"));
        assert!(!doc.has_class(&el, "active"));
    }

    #[test]
    fn test_closest_and_reparenting() {
        let doc = MemoryDocument::new();
        let container = navbar(&doc);
        let row = doc.create_element("div").unwrap();
        doc.set_attribute(&row, "data-lang", "fr").unwrap();
        let label = doc.create_element("span").unwrap();
        doc.append_child(&row, &label).unwrap();
        assert_eq!(doc.closest(&label, ".navbar"), None);

        doc.append_child(&container, &row).unwrap();
        assert_eq!(doc.closest(&label, "[data-lang]"), Some(row));
        assert_eq!(doc.closest(&label, "span"), Some(label));
        assert!(doc.append_child(&label, &container).is_err());
    }
}
