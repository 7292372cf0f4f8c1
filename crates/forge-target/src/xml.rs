//! Serialize a [`Target`] tree to a `.content.xml` document.
//!
//! The output follows the DocView convention: every property is an XML
//! attribute (encoded via [`forge_model::PropertyValue::encode`]), child
//! nodes are nested elements, and the root element carries the namespace
//! declarations.

use crate::target::Target;

const XML_HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>";

const NAMESPACES: [(&str, &str); 5] = [
    ("xmlns:sling", "http://sling.apache.org/jcr/sling/1.0"),
    ("xmlns:cq", "http://www.day.com/jcr/cq/1.0"),
    ("xmlns:granite", "http://www.adobe.com/jcr/granite/1.0"),
    ("xmlns:jcr", "http://www.jcp.org/jcr/1.0"),
    ("xmlns:nt", "http://www.jcp.org/jcr/nt/1.0"),
];

const INDENT: &str = "    ";

/// Render the full document, header and namespace declarations included.
pub fn to_xml(root: &Target) -> String {
    let mut out = String::new();
    out.push_str(XML_HEADER);
    out.push('\n');
    write_node(&mut out, root, 0, true);
    out
}

fn write_node(out: &mut String, node: &Target, depth: usize, is_root: bool) {
    let pad = INDENT.repeat(depth);
    out.push_str(&pad);
    out.push('<');
    out.push_str(node.name());

    if is_root {
        for (name, uri) in NAMESPACES {
            out.push('\n');
            out.push_str(&pad);
            out.push_str(INDENT);
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(uri);
            out.push('"');
        }
    }

    for (name, value) in node.attributes() {
        out.push('\n');
        out.push_str(&pad);
        out.push_str(INDENT);
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape_attr(&value.encode()));
        out.push('"');
    }

    if node.has_children() {
        out.push_str(">\n");
        for child in node.children() {
            write_node(out, child, depth + 1, false);
        }
        out.push_str(&pad);
        out.push_str("</");
        out.push_str(node.name());
        out.push_str(">\n");
    } else {
        out.push_str("/>\n");
    }
}

/// Escape a DocView attribute value for XML.
fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\n' => out.push_str("&#xa;"),
            '\t' => out.push_str("&#x9;"),
            _ => out.push(ch),
        }
    }
    out
}
