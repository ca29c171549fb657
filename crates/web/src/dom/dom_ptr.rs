use std::{
    cell::{Ref, RefCell, RefMut},
    rc::{Rc, Weak},
};

use string_interner::InternedString;

use crate::infra::Namespace;

use super::{ElementInterface, Node, NodeType};

/// Shared handle to a [Node].
///
/// Children are owned through these handles; parent and owning-document
/// links use [WeakDomPtr] so that a tree never keeps itself alive.
pub struct DomPtr {
    inner: Rc<RefCell<Node>>,
}

pub struct WeakDomPtr {
    inner: Weak<RefCell<Node>>,
}

impl DomPtr {
    pub fn new(node: Node) -> Self {
        Self {
            inner: Rc::new(RefCell::new(node)),
        }
    }

    pub fn borrow(&self) -> Ref<'_, Node> {
        self.inner.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, Node> {
        self.inner.borrow_mut()
    }

    /// Whether two handles refer to the same node.
    pub fn ptr_eq(&self, other: &DomPtr) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn downgrade(&self) -> WeakDomPtr {
        WeakDomPtr {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Take the node out of the handle if this is the only one left.
    ///
    /// Used by the iterative [Drop](Node::drop) to unlink subtrees without
    /// recursing.
    pub(crate) fn try_unwrap(self) -> Option<Node> {
        Rc::try_unwrap(self.inner).ok().map(RefCell::into_inner)
    }

    pub fn node_type(&self) -> NodeType {
        self.borrow().node_type()
    }

    pub fn is_document(&self) -> bool {
        self.node_type() == NodeType::Document
    }

    pub fn is_element(&self) -> bool {
        self.node_type() == NodeType::Element
    }

    pub fn is_text(&self) -> bool {
        self.node_type() == NodeType::Text
    }

    /// The element's local name, if this is an element.
    pub fn local_name(&self) -> Option<InternedString> {
        self.borrow().as_element().map(|element| element.local_name())
    }

    pub fn namespace(&self) -> Option<Namespace> {
        self.borrow().as_element().map(|element| element.namespace())
    }

    pub fn interface(&self) -> Option<ElementInterface> {
        self.borrow().as_element().map(|element| element.interface())
    }

    /// Whether this is an element in `namespace` with the given local name.
    pub fn is_element_in(&self, namespace: Namespace, local_name: InternedString) -> bool {
        self.borrow().as_element().is_some_and(|element| {
            element.namespace() == namespace && element.local_name() == local_name
        })
    }

    /// Whether this is an HTML-namespace element with the given local name.
    pub fn is_html_element(&self, local_name: InternedString) -> bool {
        self.is_element_in(Namespace::Html, local_name)
    }

    /// Whether this is an HTML-namespace element with one of the given
    /// local names.
    pub fn is_html_element_of(&self, local_names: &[InternedString]) -> bool {
        self.borrow().as_element().is_some_and(|element| {
            element.namespace() == Namespace::Html
                && local_names.contains(&element.local_name())
        })
    }

    pub fn parent(&self) -> Option<DomPtr> {
        self.borrow().parent_node()
    }

    pub fn first_child(&self) -> Option<DomPtr> {
        self.borrow().children().first().cloned()
    }

    pub fn last_child(&self) -> Option<DomPtr> {
        self.borrow().children().last().cloned()
    }
}

impl WeakDomPtr {
    pub fn upgrade(&self) -> Option<DomPtr> {
        self.inner.upgrade().map(|inner| DomPtr { inner })
    }
}

impl Clone for DomPtr {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl Clone for WeakDomPtr {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}
