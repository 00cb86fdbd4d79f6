//! The `OneLib` facade
//!
//! Bundles the ambient collaborators a page script would reach through
//! globals (the document, the persistent store, the clipboard) so callers
//! can pass one value around. Pure helpers remain free functions at the
//! crate root.

use std::sync::Arc;

use dom::{Document, DomService, NodeId, Target};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::clipboard::{self, Clipboard, SystemClipboard};
use crate::config::OneLibConfig;
use crate::dates::{self, IntoDateTime};
use crate::error::Result;
use crate::storage::{self, KeyValueStore};
use crate::text;

pub struct OneLib {
    config: OneLibConfig,
    dom: DomService,
    store: Arc<dyn KeyValueStore>,
    clipboard: Arc<dyn Clipboard>,
}

impl OneLib {
    /// Empty document, store from `config.storage`, system clipboard
    pub fn new(config: OneLibConfig) -> Result<Self> {
        Self::builder().config(config).build()
    }

    pub fn builder() -> OneLibBuilder {
        OneLibBuilder::default()
    }

    pub fn config(&self) -> &OneLibConfig {
        &self.config
    }

    pub fn dom(&self) -> &DomService {
        &self.dom
    }

    pub fn dom_mut(&mut self) -> &mut DomService {
        &mut self.dom
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    pub fn clipboard(&self) -> &dyn Clipboard {
        self.clipboard.as_ref()
    }

    // DOM

    /// Replace the document with a JSON tree (see [`DomService::parse_tree`])
    pub fn load_document(&mut self, tree: &Value) -> Result<NodeId> {
        Ok(self.dom.parse_tree(tree)?)
    }

    pub fn select(&self, selector: &str) -> Option<NodeId> {
        self.dom.select(selector)
    }

    pub fn select_all(&self, selector: &str) -> Vec<NodeId> {
        self.dom.select_all(selector)
    }

    pub fn html<'a>(&self, target: impl Into<Target<'a>>) -> String {
        self.dom.html(target)
    }

    pub fn set_html<'a>(&mut self, target: impl Into<Target<'a>>, content: &str) -> Option<NodeId> {
        self.dom.set_html(target, content)
    }

    pub fn css<'a, I, K, V>(&mut self, target: impl Into<Target<'a>>, styles: I) -> Option<NodeId>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.dom.css(target, styles)
    }

    pub fn cls<'a>(&mut self, target: impl Into<Target<'a>>, class_name: &str) -> Option<NodeId> {
        self.dom.cls(target, class_name)
    }

    pub fn show<'a>(&mut self, target: impl Into<Target<'a>>) -> Option<NodeId> {
        self.dom.show(target)
    }

    pub fn hide<'a>(&mut self, target: impl Into<Target<'a>>) -> Option<NodeId> {
        self.dom.hide(target)
    }

    // Storage & clipboard

    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        storage::save(self.store(), key, value)
    }

    pub fn load(&self, key: &str) -> Option<Value> {
        storage::load(self.store(), key)
    }

    pub fn load_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        storage::load_as(self.store(), key)
    }

    pub fn clear(&self) -> Result<()> {
        storage::clear(self.store())
    }

    pub async fn copy(&self, text: &str) -> bool {
        clipboard::copy(self.clipboard(), text).await
    }

    // Configured defaults

    /// [`text::truncate`] at the configured length
    pub fn truncate(&self, text: &str) -> String {
        text::truncate(text, self.config.truncate_length)
    }

    /// [`dates::format`] with the configured template
    pub fn format(&self, date: impl IntoDateTime) -> Result<String> {
        dates::format(date, &self.config.date_format)
    }
}

/// Builder for [`OneLib`] with injectable collaborators
#[derive(Default)]
pub struct OneLibBuilder {
    config: OneLibConfig,
    document: Option<Document>,
    store: Option<Arc<dyn KeyValueStore>>,
    clipboard: Option<Arc<dyn Clipboard>>,
}

impl OneLibBuilder {
    pub fn config(mut self, config: OneLibConfig) -> Self {
        self.config = config;
        self
    }

    pub fn document(mut self, document: Document) -> Self {
        self.document = Some(document);
        self
    }

    /// Use this store instead of the one `config.storage` describes
    pub fn store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn clipboard(mut self, clipboard: Arc<dyn Clipboard>) -> Self {
        self.clipboard = Some(clipboard);
        self
    }

    pub fn build(self) -> Result<OneLib> {
        let store = match self.store {
            Some(store) => store,
            None => self.config.storage.open()?,
        };
        let clipboard = self
            .clipboard
            .unwrap_or_else(|| Arc::new(SystemClipboard::new()));
        let dom = DomService::with_document(self.config.dom.clone(), self.document.unwrap_or_default());

        tracing::debug!("OneLib ready ({:?} storage)", self.config.storage);
        Ok(OneLib {
            config: self.config,
            dom,
            store,
            clipboard,
        })
    }
}
