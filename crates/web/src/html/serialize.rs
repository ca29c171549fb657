//! Turning a DOM (sub)tree back into HTML text.
//!
//! <https://html.spec.whatwg.org/multipage/parsing.html#serialising-html-fragments>

use string_interner::InternedString;

use crate::dom::{DomPtr, NodeKind};

/// <https://html.spec.whatwg.org/multipage/syntax.html#void-elements>
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "basefont", "bgsound", "br", "col", "embed", "frame", "hr", "img",
    "input", "keygen", "link", "meta", "param", "source", "track", "wbr",
];

/// Elements whose text children serialize verbatim.
const RAW_TEXT_CONTAINERS: &[&str] = &[
    "style", "script", "xmp", "iframe", "noembed", "noframes", "plaintext",
];

/// Serialize `node` itself (its "outer HTML").
#[must_use]
pub fn serialize(node: &DomPtr) -> String {
    let mut out = String::new();
    serialize_node(node, &mut out);
    out
}

/// Serialize the children of `node` (its "inner HTML").
#[must_use]
pub fn serialize_children(node: &DomPtr) -> String {
    let mut out = String::new();
    for child in node.borrow().children() {
        serialize_node(child, &mut out);
    }
    out
}

fn serialize_node(node: &DomPtr, out: &mut String) {
    let borrowed = node.borrow();
    match borrowed.kind() {
        NodeKind::Document(_) | NodeKind::DocumentFragment => {
            drop(borrowed);
            let children: Vec<DomPtr> = node.borrow().children().to_vec();
            for child in children {
                serialize_node(&child, out);
            }
        },
        NodeKind::DocumentType(doctype) => {
            out.push_str("<!DOCTYPE ");
            out.push_str(doctype.name().as_str());
            out.push('>');
        },
        NodeKind::Element(element) => {
            let name = element.local_name();

            out.push('<');
            out.push_str(name.as_str());
            for (attribute_name, value) in element.attributes().iter() {
                out.push(' ');
                out.push_str(attribute_name.as_str());
                out.push_str("=\"");
                escape_into(value.as_str(), true, out);
                out.push('"');
            }
            out.push('>');

            if is_void(name) {
                return;
            }

            drop(borrowed);
            let children: Vec<DomPtr> = node.borrow().children().to_vec();
            for child in children {
                serialize_node(&child, out);
            }

            // Template contents live outside the child list.
            if let Some(element) = node.borrow().as_element() {
                if let Some(contents) = element.template_contents() {
                    out.push_str(&serialize_children(&contents));
                }
            }

            out.push_str("</");
            out.push_str(name.as_str());
            out.push('>');
        },
        NodeKind::Text(data) => {
            let parent_is_raw = node
                .parent()
                .and_then(|parent| parent.local_name())
                .is_some_and(|name| RAW_TEXT_CONTAINERS.iter().any(|raw| name == **raw));

            if parent_is_raw {
                out.push_str(data.content());
            } else {
                escape_into(data.content(), false, out);
            }
        },
        NodeKind::CdataSection(data) => {
            out.push_str("<![CDATA[");
            out.push_str(data.content());
            out.push_str("]]>");
        },
        NodeKind::Comment(data) => {
            out.push_str("<!--");
            out.push_str(data.content());
            out.push_str("-->");
        },
        NodeKind::ProcessingInstruction(pi) => {
            out.push_str("<?");
            out.push_str(pi.target.as_str());
            out.push(' ');
            out.push_str(&pi.data);
            out.push('>');
        },
    }
}

fn is_void(name: InternedString) -> bool {
    VOID_ELEMENTS.iter().any(|void| name == **void)
}

/// <https://html.spec.whatwg.org/multipage/parsing.html#escapingString>
fn escape_into(text: &str, attribute_mode: bool, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '\u{A0}' => out.push_str("&nbsp;"),
            '"' if attribute_mode => out.push_str("&quot;"),
            '<' if !attribute_mode => out.push_str("&lt;"),
            '>' if !attribute_mode => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

// Quick sanity check that interned comparisons against the tables above
// behave; the interesting serializer tests exercise whole documents and
// live with the other parsing tests.
#[cfg(test)]
mod tests {
    use super::is_void;
    use string_interner::interned;

    #[test]
    fn void_elements() {
        assert!(is_void(interned!("br")));
        assert!(is_void(interned!("img")));
        assert!(!is_void(interned!("div")));
    }
}
