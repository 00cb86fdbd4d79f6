//! DOM Service - the element accessors
//!
//! Every accessor takes a [`Target`]: a selector resolved against the
//! document, or an element handle from an earlier call. Targets that resolve
//! to nothing are not errors. Reads return an empty value, writes do nothing,
//! and both hand back `None` in place of the element.

use crate::arena::Document;
use crate::error::{DomError, Result};
use crate::serializer;
use crate::types::*;
use crate::utils;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Configuration for the DOM service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomServiceConfig {
    /// `display` value written by `show`
    pub show_display: String,
    /// `display` value written by `hide`
    pub hide_display: String,
}

impl Default for DomServiceConfig {
    fn default() -> Self {
        Self {
            show_display: "block".to_string(),
            hide_display: "none".to_string(),
        }
    }
}

/// Main DOM service
#[derive(Debug, Clone, Default)]
pub struct DomService {
    config: DomServiceConfig,
    document: Document,
}

impl DomService {
    /// Create new DOM service with an empty document
    pub fn new() -> Self {
        Self::with_config(DomServiceConfig::default())
    }

    pub fn with_config(config: DomServiceConfig) -> Self {
        Self {
            config,
            document: Document::new(),
        }
    }

    /// Wrap an existing document
    pub fn with_document(config: DomServiceConfig, document: Document) -> Self {
        Self { config, document }
    }

    pub fn config(&self) -> &DomServiceConfig {
        &self.config
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Replace the document with a tree described as JSON.
    ///
    /// Accepted node shapes:
    /// ```json
    /// { "tag": "div", "attributes": { "id": "app" }, "children": [ ... ] }
    /// { "text": "Hello" }
    /// { "comment": "note" }
    /// ```
    /// The input is a single node or an array of nodes; they become children
    /// of the document root. Returns the root ID.
    pub fn parse_tree(&mut self, tree: &Value) -> Result<NodeId> {
        let mut document = Document::new();
        let root_id = document.root_id();

        match tree {
            Value::Array(nodes) => {
                for node in nodes {
                    let child = Self::parse_node(&mut document, node)?;
                    document.append_child(root_id, child)?;
                }
            }
            node => {
                let child = Self::parse_node(&mut document, node)?;
                document.append_child(root_id, child)?;
            }
        }

        tracing::debug!("Loaded document with {} nodes", document.len());
        self.document = document;
        Ok(root_id)
    }

    /// Same as [`parse_tree`](Self::parse_tree), from JSON text
    pub fn parse_tree_str(&mut self, json: &str) -> Result<NodeId> {
        let tree: Value = serde_json::from_str(json)?;
        self.parse_tree(&tree)
    }

    fn parse_node(document: &mut Document, node: &Value) -> Result<NodeId> {
        if let Some(text) = node.get("text").and_then(Value::as_str) {
            return Ok(document.create_text(text));
        }
        if let Some(text) = node.get("comment").and_then(Value::as_str) {
            return Ok(document.create_comment(text));
        }

        let tag = node
            .get("tag")
            .and_then(Value::as_str)
            .filter(|tag| !tag.is_empty())
            .ok_or_else(|| {
                DomError::InvalidTree(format!("node needs 'tag', 'text' or 'comment': {}", node))
            })?;
        let element = document.create_element(tag);

        if let Some(attrs) = node.get("attributes").and_then(Value::as_object) {
            for (name, value) in attrs {
                let value = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                document.set_attribute(element, name, &value)?;
            }
        }

        if let Some(children) = node.get("children").and_then(Value::as_array) {
            for child in children {
                let child_id = Self::parse_node(document, child)?;
                document.append_child(element, child_id)?;
            }
        }

        Ok(element)
    }

    /// Resolve a target to an element, leniently
    pub fn resolve<'a>(&self, target: impl Into<Target<'a>>) -> Option<NodeId> {
        match target.into() {
            Target::Selector(selector) => self.select(selector),
            Target::Element(node_id) => self
                .document
                .element(node_id)
                .ok()
                .map(|node| node.node_id),
        }
    }

    /// First element matching `selector`, or `None`
    pub fn select(&self, selector: &str) -> Option<NodeId> {
        match self.document.query(selector) {
            Ok(found) => found,
            Err(e) => {
                tracing::debug!("select({:?}) matched nothing: {}", selector, e);
                None
            }
        }
    }

    /// Every element matching `selector`, in document order
    pub fn select_all(&self, selector: &str) -> Vec<NodeId> {
        match self.document.query_all(selector) {
            Ok(found) => found,
            Err(e) => {
                tracing::debug!("select_all({:?}) matched nothing: {}", selector, e);
                Vec::new()
            }
        }
    }

    /// Inner markup of the target, or an empty string when it does not resolve
    pub fn html<'a>(&self, target: impl Into<Target<'a>>) -> String {
        self.resolve(target)
            .and_then(|id| serializer::inner_html(&self.document, id).ok())
            .unwrap_or_default()
    }

    /// Replace the target's children with `content`.
    ///
    /// A lone text child is rewritten in place, so repeated updates do not
    /// grow the arena.
    pub fn set_html<'a>(&mut self, target: impl Into<Target<'a>>, content: &str) -> Option<NodeId> {
        let node_id = self.resolve(target)?;
        let result = match self.sole_text_child(node_id) {
            Some(text_id) if !content.is_empty() => self
                .document
                .get_mut(text_id)
                .map(|text| text.node_value = content.to_string()),
            _ => self.document.remove_children(node_id).and_then(|_| {
                if content.is_empty() {
                    return Ok(());
                }
                let text = self.document.create_text(content);
                self.document.append_child(node_id, text)
            }),
        };
        self.lenient(node_id, "set_html", result)
    }

    fn sole_text_child(&self, node_id: NodeId) -> Option<NodeId> {
        match self.document.get(node_id).ok()?.children_ids.as_slice() {
            [only] => Some(*only).filter(|&id| self.document.get(id).is_ok_and(DomNode::is_text)),
            _ => None,
        }
    }

    /// Merge inline style properties into the target.
    ///
    /// Keys may be CSS names (`font-size`) or camelCase (`fontSize`); an empty
    /// value removes the property.
    pub fn css<'a, I, K, V>(&mut self, target: impl Into<Target<'a>>, styles: I) -> Option<NodeId>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let node_id = self.resolve(target)?;
        let style = utils::merge_style(self.document.attr(node_id, "style").unwrap_or(""), styles);
        let result = self.write_style(node_id, &style);
        self.lenient(node_id, "css", result)
    }

    /// Current inline value of one style property
    pub fn style<'a>(&self, target: impl Into<Target<'a>>, property: &str) -> Option<String> {
        let node_id = self.resolve(target)?;
        utils::style_property(self.document.attr(node_id, "style")?, property)
    }

    /// Toggle `class_name` on the target's class list
    pub fn cls<'a>(&mut self, target: impl Into<Target<'a>>, class_name: &str) -> Option<NodeId> {
        let node_id = self.resolve(target)?;
        let (classes, _) =
            utils::toggle_class(self.document.attr(node_id, "class").unwrap_or(""), class_name);
        let result = self.document.set_attribute(node_id, "class", &classes);
        self.lenient(node_id, "cls", result)
    }

    /// Force the target visible (`display: block` by default)
    pub fn show<'a>(&mut self, target: impl Into<Target<'a>>) -> Option<NodeId> {
        let display = self.config.show_display.clone();
        self.css(target, [("display", display)])
    }

    /// Force the target hidden (`display: none` by default)
    pub fn hide<'a>(&mut self, target: impl Into<Target<'a>>) -> Option<NodeId> {
        let display = self.config.hide_display.clone();
        self.css(target, [("display", display)])
    }

    fn write_style(&mut self, node_id: NodeId, style: &str) -> Result<()> {
        if style.is_empty() {
            self.document.remove_attribute(node_id, "style").map(|_| ())
        } else {
            self.document.set_attribute(node_id, "style", style)
        }
    }

    fn lenient(&self, node_id: NodeId, op: &str, result: Result<()>) -> Option<NodeId> {
        match result {
            Ok(()) => Some(node_id),
            Err(e) => {
                tracing::debug!("{} on node {} skipped: {}", op, node_id, e);
                None
            }
        }
    }
}
