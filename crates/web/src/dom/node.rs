use std::mem;

use string_interner::InternedString;

use super::{
    CharacterData, Document, DocumentType, DomPtr, Element, WeakDomPtr,
};

/// <https://dom.spec.whatwg.org/#interface-node>
///
/// The node payload (kind-specific data) lives in [NodeKind]; links and the
/// child list are shared by every kind. Children are owned by their parent,
/// parent and owning-document links are weak.
pub struct Node {
    parent: Option<WeakDomPtr>,
    children: Vec<DomPtr>,
    owning_document: Option<WeakDomPtr>,
    kind: NodeKind,
}

pub enum NodeKind {
    Document(Document),
    DocumentType(DocumentType),
    Element(Element),
    Text(CharacterData),
    Comment(CharacterData),
    CdataSection(CharacterData),
    ProcessingInstruction(ProcessingInstruction),
    DocumentFragment,
}

/// <https://dom.spec.whatwg.org/#interface-processinginstruction>
pub struct ProcessingInstruction {
    pub target: InternedString,
    pub data: String,
}

/// <https://dom.spec.whatwg.org/#dom-node-nodetype>
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeType {
    Document,
    DocumentType,
    Element,
    Text,
    Comment,
    CdataSection,
    ProcessingInstruction,
    DocumentFragment,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            owning_document: None,
            kind,
        }
    }

    #[must_use]
    pub fn node_type(&self) -> NodeType {
        match self.kind {
            NodeKind::Document(_) => NodeType::Document,
            NodeKind::DocumentType(_) => NodeType::DocumentType,
            NodeKind::Element(_) => NodeType::Element,
            NodeKind::Text(_) => NodeType::Text,
            NodeKind::Comment(_) => NodeType::Comment,
            NodeKind::CdataSection(_) => NodeType::CdataSection,
            NodeKind::ProcessingInstruction(_) => NodeType::ProcessingInstruction,
            NodeKind::DocumentFragment => NodeType::DocumentFragment,
        }
    }

    #[must_use]
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn kind_mut(&mut self) -> &mut NodeKind {
        &mut self.kind
    }

    #[must_use]
    pub fn as_element(&self) -> Option<&Element> {
        match &self.kind {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match &mut self.kind {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_document(&self) -> Option<&Document> {
        match &self.kind {
            NodeKind::Document(document) => Some(document),
            _ => None,
        }
    }

    pub fn as_document_mut(&mut self) -> Option<&mut Document> {
        match &mut self.kind {
            NodeKind::Document(document) => Some(document),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_doctype(&self) -> Option<&DocumentType> {
        match &self.kind {
            NodeKind::DocumentType(doctype) => Some(doctype),
            _ => None,
        }
    }

    /// The payload shared by Text, Comment and CDATASection nodes.
    #[must_use]
    pub fn as_character_data(&self) -> Option<&CharacterData> {
        match &self.kind {
            NodeKind::Text(data) | NodeKind::Comment(data) | NodeKind::CdataSection(data) => {
                Some(data)
            },
            _ => None,
        }
    }

    pub fn as_character_data_mut(&mut self) -> Option<&mut CharacterData> {
        match &mut self.kind {
            NodeKind::Text(data) | NodeKind::Comment(data) | NodeKind::CdataSection(data) => {
                Some(data)
            },
            _ => None,
        }
    }

    #[must_use]
    pub fn children(&self) -> &[DomPtr] {
        &self.children
    }

    #[must_use]
    pub fn parent_node(&self) -> Option<DomPtr> {
        self.parent.as_ref()?.upgrade()
    }

    #[must_use]
    pub fn first_child(&self) -> Option<DomPtr> {
        self.children.first().cloned()
    }

    #[must_use]
    pub fn last_child(&self) -> Option<DomPtr> {
        self.children.last().cloned()
    }

    #[must_use]
    pub fn owning_document(&self) -> Option<DomPtr> {
        self.owning_document.as_ref()?.upgrade()
    }

    pub fn set_owning_document(&mut self, document: WeakDomPtr) {
        self.owning_document = Some(document);
    }

    /// Index of `child` in `parent`'s child list.
    #[must_use]
    pub fn index_of_child(parent: &DomPtr, child: &DomPtr) -> Option<usize> {
        parent
            .borrow()
            .children
            .iter()
            .position(|candidate| candidate.ptr_eq(child))
    }

    /// The sibling immediately before `node`, if any.
    #[must_use]
    pub fn previous_sibling(node: &DomPtr) -> Option<DomPtr> {
        let parent = node.parent()?;
        let index = Self::index_of_child(&parent, node)?;
        if index == 0 {
            None
        } else {
            parent.borrow().children.get(index - 1).cloned()
        }
    }

    /// The sibling immediately after `node`, if any.
    #[must_use]
    pub fn next_sibling(node: &DomPtr) -> Option<DomPtr> {
        let parent = node.parent()?;
        let index = Self::index_of_child(&parent, node)?;
        let sibling = parent.borrow().children.get(index + 1).cloned();
        sibling
    }

    /// Append `child` as the last child of `parent`.
    ///
    /// If `child` already has a parent it is detached first, so a node is
    /// never linked into two places at once.
    pub fn append_child(parent: DomPtr, child: DomPtr) {
        let index = parent.borrow().children.len();
        Self::insert_child_at(parent, index, child);
    }

    /// Insert `child` into `parent`'s child list before position `index`.
    pub fn insert_child_at(parent: DomPtr, index: usize, child: DomPtr) {
        Self::detach(&child);

        child.borrow_mut().parent = Some(parent.downgrade());

        let mut parent_node = parent.borrow_mut();
        let index = index.min(parent_node.children.len());
        parent_node.children.insert(index, child);
    }

    /// Remove `child` from its parent (if any), keeping it alive through
    /// the handle the caller holds.
    pub fn detach(child: &DomPtr) {
        let old_parent = child.borrow().parent_node();
        if let Some(old_parent) = old_parent {
            old_parent
                .borrow_mut()
                .children
                .retain(|candidate| !candidate.ptr_eq(child));
        }
        child.borrow_mut().parent = None;
    }

    /// <https://dom.spec.whatwg.org/#dom-text-wholetext>
    ///
    /// The concatenated data of `node` and its directly adjacent Text
    /// siblings. `node` must be a Text node.
    #[must_use]
    pub fn whole_text(node: &DomPtr) -> String {
        debug_assert!(node.is_text());

        let mut first = node.clone();
        while let Some(previous) = Self::previous_sibling(&first) {
            if !previous.is_text() {
                break;
            }
            first = previous;
        }

        let mut text = String::new();
        let mut current = Some(first);
        while let Some(node) = current {
            if !node.is_text() {
                break;
            }
            if let Some(data) = node.borrow().as_character_data() {
                text.push_str(data.content());
            }
            current = Self::next_sibling(&node);
        }
        text
    }

    /// Structural equality, used by tests: same kinds, names, attributes
    /// and data, recursively over the children.
    #[must_use]
    pub fn tree_eq(a: &DomPtr, b: &DomPtr) -> bool {
        let a_node = a.borrow();
        let b_node = b.borrow();

        let kinds_match = match (&a_node.kind, &b_node.kind) {
            (NodeKind::Document(_), NodeKind::Document(_)) => true,
            (NodeKind::DocumentFragment, NodeKind::DocumentFragment) => true,
            (NodeKind::DocumentType(x), NodeKind::DocumentType(y)) => {
                x.name() == y.name()
                    && x.public_id() == y.public_id()
                    && x.system_id() == y.system_id()
            },
            (NodeKind::Element(x), NodeKind::Element(y)) => {
                x.namespace() == y.namespace()
                    && x.local_name() == y.local_name()
                    && x.attributes().as_slice() == y.attributes().as_slice()
            },
            (NodeKind::Text(x), NodeKind::Text(y))
            | (NodeKind::Comment(x), NodeKind::Comment(y))
            | (NodeKind::CdataSection(x), NodeKind::CdataSection(y)) => {
                x.content() == y.content()
            },
            (NodeKind::ProcessingInstruction(x), NodeKind::ProcessingInstruction(y)) => {
                x.target == y.target && x.data == y.data
            },
            _ => false,
        };

        kinds_match
            && a_node.children.len() == b_node.children.len()
            && a_node
                .children
                .iter()
                .zip(b_node.children.iter())
                .all(|(x, y)| Self::tree_eq(x, y))
    }
}

impl Drop for Node {
    // Dropping a deep tree through the child handles would recurse once per
    // level. Flatten the subtree onto a worklist instead.
    fn drop(&mut self) {
        let mut worklist = mem::take(&mut self.children);

        while let Some(child) = worklist.pop() {
            if let Some(mut node) = child.try_unwrap() {
                worklist.append(&mut node.children);
            }
        }
    }
}
