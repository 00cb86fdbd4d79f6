//! Document model and element accessors
//!
//! An arena-backed document, a CSS selector engine, and lenient accessors
//! that read and write element content, inline styles and class lists.
//!
//! ```text
//! selector / NodeId → Target → DomService::resolve → Document (arena)
//!                                                     ↓
//!                                         serializer / utils (style, class)
//! ```

pub mod arena;
pub mod error;
pub mod selector;
pub mod serializer;
pub mod service;
pub mod types;
pub mod utils;

pub use arena::Document;
pub use error::{DomError, Result};
pub use selector::SelectorList;
pub use service::{DomService, DomServiceConfig};
pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_chain_across_calls() {
        let mut service = DomService::new();
        let doc = service.document_mut();
        let body = doc.create_element("body");
        let root = doc.root_id();
        doc.append_child(root, body).unwrap();

        let el = service.set_html("body", "ok").unwrap();
        let el = service.cls(el, "ready").unwrap();
        let el = service.show(el).unwrap();

        assert_eq!(service.html(el), "ok");
        assert_eq!(service.select("body.ready"), Some(el));
    }
}
