use crate::dom::{DomPtr, Node};

/// An "adjusted insertion location": a parent plus an optional position in
/// its child list.
///
/// Ordinarily nodes are appended (`index` is `None`); foster parenting
/// inserts *before* the last open table instead.
pub struct InsertionLocation {
    pub parent: DomPtr,
    pub index: Option<usize>,
}

impl InsertionLocation {
    pub fn append_to(parent: DomPtr) -> Self {
        Self {
            parent,
            index: None,
        }
    }

    pub fn before(parent: DomPtr, index: usize) -> Self {
        Self {
            parent,
            index: Some(index),
        }
    }

    /// Insert `node` at this location.
    pub fn insert(&self, node: DomPtr) {
        match self.index {
            None => Node::append_child(self.parent.clone(), node),
            Some(index) => Node::insert_child_at(self.parent.clone(), index, node),
        }
    }

    /// The node immediately before this location, if any.
    #[must_use]
    pub fn node_immediately_before(&self) -> Option<DomPtr> {
        match self.index {
            None => self.parent.last_child(),
            Some(0) => None,
            Some(index) => self.parent.borrow().children().get(index - 1).cloned(),
        }
    }
}
