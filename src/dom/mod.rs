//! Page abstraction
//!
//! The widget, the text applier and the controller only talk to the page
//! through [`Document`]:
//! - Browser: `web_sys` backed document (wasm32 builds)
//! - Memory: arena-backed element tree for tests and the demo

mod memory;
mod selector;

pub use memory::{MemoryDocument, NodeId};
pub use selector::Selector;

use crate::core::Result;

/// Trait for documents the switcher can read and mutate
pub trait Document {
    /// Handle to an element of this document
    type Element: Clone + PartialEq;

    /// The root element (`<html>`)
    fn root(&self) -> Self::Element;

    /// First element matching `selector`, in document order
    fn query_selector(&self, selector: &str) -> Option<Self::Element>;

    /// Every element matching `selector`, in document order
    fn query_selector_all(&self, selector: &str) -> Vec<Self::Element>;

    /// Create a detached element
    fn create_element(&self, tag: &str) -> Result<Self::Element>;

    fn append_child(&self, parent: &Self::Element, child: &Self::Element) -> Result<()>;

    /// Detach every child of `element`
    fn remove_children(&self, element: &Self::Element);

    fn set_attribute(&self, element: &Self::Element, name: &str, value: &str) -> Result<()>;

    fn get_attribute(&self, element: &Self::Element, name: &str) -> Option<String>;

    /// Replace the children of `element` with a single text node
    fn set_text(&self, element: &Self::Element, text: &str);

    /// Concatenated text of `element` and its descendants
    fn text_content(&self, element: &Self::Element) -> String;

    fn add_class(&self, element: &Self::Element, class: &str);

    fn remove_class(&self, element: &Self::Element, class: &str);

    /// Flip `class`; returns whether it is now present
    fn toggle_class(&self, element: &Self::Element, class: &str) -> bool;

    fn has_class(&self, element: &Self::Element, class: &str) -> bool;

    /// Set the inline `display` style
    fn set_display(&self, element: &Self::Element, value: &str);

    /// Nearest inclusive ancestor of `element` matching `selector`
    fn closest(&self, element: &Self::Element, selector: &str) -> Option<Self::Element>;
}
