//! Markup serializer - the getter side of `innerHTML`
//!
//! Elements are written as `<tag attr="value">children</tag>`, void
//! elements without a closing tag. Text nodes are written verbatim: markup
//! assigned through `set_html` is stored as one text node and must read back
//! unchanged.

use crate::arena::Document;
use crate::error::Result;
use crate::types::*;

/// Serialize the children of a node
pub fn inner_html(doc: &Document, node_id: NodeId) -> Result<String> {
    let mut output = String::new();
    for &child_id in &doc.get(node_id)?.children_ids {
        serialize_node(doc, child_id, &mut output)?;
    }
    Ok(output)
}

/// Serialize a node including its own tag
pub fn outer_html(doc: &Document, node_id: NodeId) -> Result<String> {
    let mut output = String::new();
    serialize_node(doc, node_id, &mut output)?;
    Ok(output)
}

fn serialize_node(doc: &Document, node_id: NodeId, output: &mut String) -> Result<()> {
    let node = doc.get(node_id)?;

    match node.node_type {
        NodeType::Element => {
            output.push('<');
            output.push_str(&node.node_name);
            for (name, value) in &node.attributes {
                output.push(' ');
                output.push_str(name);
                output.push_str("=\"");
                output.push_str(&escape_attr(value));
                output.push('"');
            }
            output.push('>');

            if VOID_ELEMENTS.contains(&node.node_name.as_str()) {
                return Ok(());
            }

            for &child_id in &node.children_ids {
                serialize_node(doc, child_id, output)?;
            }

            output.push_str("</");
            output.push_str(&node.node_name);
            output.push('>');
        }
        NodeType::Text => output.push_str(&node.node_value),
        NodeType::Comment => {
            output.push_str("<!--");
            output.push_str(&node.node_value);
            output.push_str("-->");
        }
        NodeType::Document => {
            for &child_id in &node.children_ids {
                serialize_node(doc, child_id, output)?;
            }
        }
    }

    Ok(())
}

fn escape_attr(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_nested() {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        doc.set_attribute(div, "title", "a \"b\" & c").unwrap();
        let br = doc.create_element("br");
        let text = doc.create_text("Hello");
        let comment = doc.create_comment(" note ");
        doc.append_child(doc.root_id(), div).unwrap();
        doc.append_child(div, text).unwrap();
        doc.append_child(div, br).unwrap();
        doc.append_child(div, comment).unwrap();

        assert_eq!(inner_html(&doc, div).unwrap(), "Hello<br><!-- note -->");
        assert_eq!(
            outer_html(&doc, div).unwrap(),
            "<div title=\"a &quot;b&quot; &amp; c\">Hello<br><!-- note --></div>"
        );
        assert_eq!(
            outer_html(&doc, doc.root_id()).unwrap(),
            inner_html(&doc, doc.root_id()).unwrap()
        );
    }

    #[test]
    fn test_empty_element() {
        let mut doc = Document::new();
        let p = doc.create_element("p");
        assert_eq!(inner_html(&doc, p).unwrap(), "");
        assert_eq!(outer_html(&doc, p).unwrap(), "<p></p>");
    }
}
