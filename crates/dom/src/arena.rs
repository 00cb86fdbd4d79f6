//! Arena-based document storage
//!
//! All nodes live in one `Vec`, addressed by 4-byte `NodeId`s. Detached
//! nodes stay in the arena, so a handle never dangles; it simply stops being
//! reachable from the root. Nothing is ever freed: a long-lived document
//! that keeps replacing subtrees grows until it is rebuilt (for example via
//! `DomService::parse_tree`).
//!
//! ```text
//! Document: Vec<DomNode>
//!           [#document][html][body][#text]...
//!            ↑ NodeId 0 is always the document node
//! ```

use crate::error::{DomError, Result};
use crate::selector::SelectorList;
use crate::types::{DomNode, NodeId, NodeType};

/// The document arena
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<DomNode>,
}

impl Document {
    /// Create a document holding only the `#document` root
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.max(1));
        nodes.push(DomNode::new(0, NodeType::Document, "#document".to_string()));
        Self { nodes }
    }

    pub fn root_id(&self) -> NodeId {
        0
    }

    fn push(&mut self, node_type: NodeType, name: String, value: String) -> NodeId {
        let node_id = self.nodes.len() as NodeId;
        let mut node = DomNode::new(node_id, node_type, name);
        node.node_value = value;
        self.nodes.push(node);
        node_id
    }

    /// Create a detached element; tag names are stored lowercase
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeType::Element, tag.to_ascii_lowercase(), String::new())
    }

    /// Create a detached text node
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.push(NodeType::Text, "#text".to_string(), text.into())
    }

    pub fn create_comment(&mut self, text: impl Into<String>) -> NodeId {
        self.push(NodeType::Comment, "#comment".to_string(), text.into())
    }

    /// Get node by ID (immutable)
    pub fn get(&self, node_id: NodeId) -> Result<&DomNode> {
        self.nodes
            .get(node_id as usize)
            .ok_or(DomError::NodeNotFound(node_id))
    }

    /// Get node by ID (mutable)
    pub fn get_mut(&mut self, node_id: NodeId) -> Result<&mut DomNode> {
        self.nodes
            .get_mut(node_id as usize)
            .ok_or(DomError::NodeNotFound(node_id))
    }

    /// Get an element node, rejecting text/comment/document nodes
    pub fn element(&self, node_id: NodeId) -> Result<&DomNode> {
        let node = self.get(node_id)?;
        if node.is_element() {
            Ok(node)
        } else {
            Err(DomError::InvalidNodeType {
                expected: "element".to_string(),
                actual: node.node_name.clone(),
            })
        }
    }

    pub fn element_mut(&mut self, node_id: NodeId) -> Result<&mut DomNode> {
        self.element(node_id)?;
        self.get_mut(node_id)
    }

    /// True when `ancestor` is `node_id` itself or one of its ancestors
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node_id: NodeId) -> bool {
        let mut current = Some(node_id);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.get(id).ok().and_then(|n| n.parent_id);
        }
        false
    }

    /// Append `child` to `parent`, detaching it from its previous parent
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        let parent_node = self.get(parent)?;
        if !matches!(parent_node.node_type, NodeType::Element | NodeType::Document) {
            return Err(DomError::InvalidTree(format!(
                "{} cannot have children",
                parent_node.node_name
            )));
        }
        if child == self.root_id() {
            return Err(DomError::InvalidTree(
                "the document node cannot be appended".to_string(),
            ));
        }
        self.get(child)?;
        if self.is_inclusive_ancestor(child, parent) {
            return Err(DomError::InvalidTree(format!(
                "appending node {} under {} would create a cycle",
                child, parent
            )));
        }

        self.detach(child)?;
        self.get_mut(child)?.parent_id = Some(parent);
        self.get_mut(parent)?.children_ids.push(child);
        Ok(())
    }

    /// Remove a node from its parent; the node stays in the arena
    pub fn detach(&mut self, node_id: NodeId) -> Result<()> {
        let parent_id = self.get(node_id)?.parent_id;
        if let Some(parent_id) = parent_id {
            self.get_mut(parent_id)?
                .children_ids
                .retain(|id| *id != node_id);
            self.get_mut(node_id)?.parent_id = None;
        }
        Ok(())
    }

    /// Detach every child of a node
    pub fn remove_children(&mut self, node_id: NodeId) -> Result<()> {
        let children = std::mem::take(&mut self.get_mut(node_id)?.children_ids);
        for child_id in children {
            self.get_mut(child_id)?.parent_id = None;
        }
        Ok(())
    }

    pub fn attr(&self, node_id: NodeId, name: &str) -> Option<&str> {
        self.get(node_id).ok().and_then(|node| node.attr(name))
    }

    pub fn set_attribute(&mut self, node_id: NodeId, name: &str, value: &str) -> Result<()> {
        self.element_mut(node_id)?.set_attr(name, value);
        Ok(())
    }

    pub fn remove_attribute(&mut self, node_id: NodeId, name: &str) -> Result<Option<String>> {
        Ok(self.element_mut(node_id)?.remove_attr(name))
    }

    /// Total number of nodes, detached ones included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when only the document node exists
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub fn iter(&self) -> impl Iterator<Item = &DomNode> {
        self.nodes.iter()
    }

    /// Get children of a node
    pub fn children(&self, node_id: NodeId) -> Result<Vec<&DomNode>> {
        let node = self.get(node_id)?;
        node.children_ids
            .iter()
            .map(|&child_id| self.get(child_id))
            .collect()
    }

    /// Get parent of a node
    pub fn parent(&self, node_id: NodeId) -> Result<Option<&DomNode>> {
        let node = self.get(node_id)?;
        match node.parent_id {
            Some(parent_id) => Ok(Some(self.get(parent_id)?)),
            None => Ok(None),
        }
    }

    /// Traverse tree depth-first in document order (iterative, no recursion)
    pub fn traverse_df<F>(&self, start_id: NodeId, mut visit: F) -> Result<()>
    where
        F: FnMut(&DomNode) -> Result<()>,
    {
        let mut stack = vec![start_id];

        while let Some(node_id) = stack.pop() {
            let node = self.get(node_id)?;
            visit(node)?;

            // Push children in reverse order (so they're visited left-to-right)
            for &child_id in node.children_ids.iter().rev() {
                stack.push(child_id);
            }
        }

        Ok(())
    }

    /// Element descendants of `start_id` in document order, excluding itself
    pub fn descendant_elements(&self, start_id: NodeId) -> Result<Vec<NodeId>> {
        let mut found = Vec::new();
        self.traverse_df(start_id, |node| {
            if node.node_id != start_id && node.is_element() {
                found.push(node.node_id);
            }
            Ok(())
        })?;
        Ok(found)
    }

    /// Concatenated text of all text nodes under `node_id`
    pub fn text_content(&self, node_id: NodeId) -> Result<String> {
        let mut text = String::new();
        self.traverse_df(node_id, |node| {
            if node.is_text() {
                text.push_str(&node.node_value);
            }
            Ok(())
        })?;
        Ok(text)
    }

    /// First element reachable from the root that matches `selector`
    pub fn query(&self, selector: &str) -> Result<Option<NodeId>> {
        let selectors: SelectorList = selector.parse()?;
        Ok(self
            .descendant_elements(self.root_id())?
            .into_iter()
            .find(|&id| selectors.matches(self, id)))
    }

    /// Every element reachable from the root that matches `selector`
    pub fn query_all(&self, selector: &str) -> Result<Vec<NodeId>> {
        let selectors: SelectorList = selector.parse()?;
        Ok(self
            .descendant_elements(self.root_id())?
            .into_iter()
            .filter(|&id| selectors.matches(self, id))
            .collect())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
