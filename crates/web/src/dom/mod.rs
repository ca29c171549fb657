//! <https://dom.spec.whatwg.org/>

mod character_data;
mod document;
mod document_type;
mod dom_ptr;
mod element;
mod node;

pub use character_data::CharacterData;
pub use document::{Document, DocumentReadiness, QuirksMode};
pub use document_type::DocumentType;
pub use dom_ptr::{DomPtr, WeakDomPtr};
pub use element::{AttributeMap, Element, ElementInterface};
pub use node::{Node, NodeKind, NodeType, ProcessingInstruction};

use string_interner::InternedString;

use crate::infra::Namespace;

/// <https://dom.spec.whatwg.org/#concept-create-element>
pub fn create_element(
    document: WeakDomPtr,
    local_name: InternedString,
    namespace: Namespace,
    prefix: Option<InternedString>,
    is: Option<InternedString>,
) -> DomPtr {
    // Let definition be the result of looking up a custom element definition
    // given document, namespace, localName, and is.
    let definition = lookup_custom_element_definition(namespace, local_name, is);

    // Custom elements are not supported, so definition is always null and
    // the result implements the element interface for (localName, namespace).
    debug_assert!(definition.is_none());

    let element = Element::new(namespace, prefix, local_name, is);
    if element.interface() == ElementInterface::HtmlUnknownElement {
        log::debug!("no specific element interface for <{local_name}>");
    }

    let node = DomPtr::new(Node::new(NodeKind::Element(element)));
    node.borrow_mut().set_owning_document(document.clone());

    // Template elements own a separate DocumentFragment for their
    // contents.
    if namespace == Namespace::Html && local_name == string_interner::interned!("template") {
        let contents = DomPtr::new(Node::new(NodeKind::DocumentFragment));
        contents.borrow_mut().set_owning_document(document);
        if let Some(element) = node.borrow_mut().as_element_mut() {
            element.set_template_contents(contents);
        }
    }

    node
}

/// <https://html.spec.whatwg.org/multipage/custom-elements.html#look-up-a-custom-element-definition>
///
/// There is no custom element registry; the lookup always returns null.
pub fn lookup_custom_element_definition(
    namespace: Namespace,
    _local_name: InternedString,
    _is: Option<InternedString>,
) -> Option<()> {
    // If namespace is not the HTML namespace, return null.
    if namespace != Namespace::Html {
        return None;
    }

    None
}
