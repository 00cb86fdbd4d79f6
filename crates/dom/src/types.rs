//! Core type definitions
//!
//! Key design principles:
//! 1. Use u32 for indices (4 bytes vs 8 bytes pointer)
//! 2. Attributes keep insertion order (serialization is deterministic)
//! 3. Use SmallVec for small arrays (avoid heap allocation)

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Node identifier (index into arena)
///
/// This is also the element handle handed out to callers: it stays valid for
/// the lifetime of the document, even after the node is detached.
pub type NodeId = u32;

/// Node type, numbered as in the DOM specification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum NodeType {
    Element = 1,
    Text = 3,
    Comment = 8,
    Document = 9,
}

impl NodeType {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(NodeType::Element),
            3 => Some(NodeType::Text),
            8 => Some(NodeType::Comment),
            9 => Some(NodeType::Document),
            _ => None,
        }
    }
}

/// Elements serialized without a closing tag
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// A single node in the document arena
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomNode {
    pub node_id: NodeId,
    pub node_type: NodeType,

    pub parent_id: Option<NodeId>,
    pub children_ids: SmallVec<[NodeId; 4]>,

    /// Lowercase tag name for elements, `#text` / `#comment` / `#document` otherwise
    pub node_name: String,
    /// Text content for text and comment nodes
    pub node_value: String,
    pub attributes: SmallVec<[(String, String); 4]>,
}

impl DomNode {
    pub fn new(node_id: NodeId, node_type: NodeType, node_name: String) -> Self {
        Self {
            node_id,
            node_type,
            parent_id: None,
            children_ids: SmallVec::new(),
            node_name,
            node_value: String::new(),
            attributes: SmallVec::new(),
        }
    }

    /// Get tag name for element nodes
    pub fn tag_name(&self) -> Option<&str> {
        if self.node_type == NodeType::Element {
            Some(&self.node_name)
        } else {
            None
        }
    }

    pub fn is_element(&self) -> bool {
        self.node_type == NodeType::Element
    }

    pub fn is_text(&self) -> bool {
        self.node_type == NodeType::Text
    }

    /// Get attribute value
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set attribute, keeping its original position when it already exists
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|(key, _)| key == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name.to_string(), value)),
        }
    }

    /// Remove attribute, returning its previous value
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let pos = self.attributes.iter().position(|(key, _)| key == name)?;
        Some(self.attributes.remove(pos).1)
    }

    /// Iterate over the whitespace-separated entries of the `class` attribute
    pub fn class_list(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or("").split_whitespace()
    }

    pub fn has_class(&self, class_name: &str) -> bool {
        self.class_list().any(|c| c == class_name)
    }
}

/// Either a selector resolved against the document, or an element handle
/// that was resolved earlier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'a> {
    Selector(&'a str),
    Element(NodeId),
}

impl<'a> From<&'a str> for Target<'a> {
    fn from(selector: &'a str) -> Self {
        Target::Selector(selector)
    }
}

impl<'a> From<&'a String> for Target<'a> {
    fn from(selector: &'a String) -> Self {
        Target::Selector(selector.as_str())
    }
}

impl From<NodeId> for Target<'_> {
    fn from(node_id: NodeId) -> Self {
        Target::Element(node_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attributes_keep_order() {
        let mut node = DomNode::new(1, NodeType::Element, "div".to_string());
        node.set_attr("id", "a");
        node.set_attr("class", "x y");
        node.set_attr("id", "b");

        assert_eq!(node.attr("id"), Some("b"));
        assert_eq!(node.attributes[0].0, "id");
        assert!(node.has_class("y"));
        assert!(!node.has_class("z"));

        assert_eq!(node.remove_attr("id"), Some("b".to_string()));
        assert_eq!(node.attr("id"), None);
    }

    #[test]
    fn test_target_conversions() {
        assert_eq!(Target::from("#app"), Target::Selector("#app"));
        assert_eq!(Target::from(7u32), Target::Element(7));
    }
}
