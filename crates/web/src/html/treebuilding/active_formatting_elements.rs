use crate::{dom::DomPtr, html::tokenization::TagData};

/// <https://html.spec.whatwg.org/multipage/parsing.html#the-list-of-active-formatting-elements>
#[derive(Default)]
pub struct ActiveFormattingElements {
    entries: Vec<FormatEntry>,
}

pub enum FormatEntry {
    /// Inserted when entering applet, object, marquee, template, td, th
    /// and caption; reconstruction never crosses a marker.
    Marker,
    Element(FormattingElement),
}

pub struct FormattingElement {
    pub element: DomPtr,

    /// The token the element was created from, for re-cloning during
    /// reconstruction and the adoption agency algorithm.
    pub tag: TagData,
}

impl Clone for FormattingElement {
    fn clone(&self) -> Self {
        Self {
            element: self.element.clone(),
            tag: self.tag.clone(),
        }
    }
}

impl FormatEntry {
    #[must_use]
    pub fn is_marker(&self) -> bool {
        matches!(self, Self::Marker)
    }

    #[must_use]
    pub fn as_element(&self) -> Option<&FormattingElement> {
        match self {
            Self::Element(element) => Some(element),
            Self::Marker => None,
        }
    }
}

impl ActiveFormattingElements {
    /// <https://html.spec.whatwg.org/multipage/parsing.html#push-onto-the-list-of-active-formatting-elements>
    pub fn push(&mut self, element: DomPtr, tag: TagData) {
        // Noah's Ark clause: if there are already three entries after the
        // last marker with the same tag name, namespace and attributes,
        // remove the earliest of them.
        let start = self.index_after_last_marker();

        let mut matching = Vec::new();
        for (index, entry) in self.entries[start..].iter().enumerate() {
            let Some(formatting_element) = entry.as_element() else {
                continue;
            };

            if Self::elements_match(&formatting_element.element, &element) {
                matching.push(start + index);
            }
        }

        if matching.len() >= 3 {
            self.entries.remove(matching[0]);
        }

        self.entries
            .push(FormatEntry::Element(FormattingElement { element, tag }));
    }

    /// Same tag name, namespace and attributes; attribute order does not
    /// matter.
    fn elements_match(a: &DomPtr, b: &DomPtr) -> bool {
        let a_node = a.borrow();
        let b_node = b.borrow();
        let (Some(a_element), Some(b_element)) = (a_node.as_element(), b_node.as_element())
        else {
            return false;
        };

        if a_element.local_name() != b_element.local_name()
            || a_element.namespace() != b_element.namespace()
            || a_element.attributes().len() != b_element.attributes().len()
        {
            return false;
        }

        let matches = a_element
            .attributes()
            .iter()
            .all(|(name, value)| b_element.attributes().get(*name) == Some(*value));
        matches
    }

    pub fn push_marker(&mut self) {
        self.entries.push(FormatEntry::Marker);
    }

    /// <https://html.spec.whatwg.org/multipage/parsing.html#clear-the-list-of-active-formatting-elements-up-to-the-last-marker>
    pub fn clear_up_to_last_marker(&mut self) {
        while let Some(entry) = self.entries.pop() {
            if entry.is_marker() {
                break;
            }
        }
    }

    #[must_use]
    pub fn last(&self) -> Option<&FormatEntry> {
        self.entries.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn entries(&self) -> &[FormatEntry] {
        &self.entries
    }

    #[must_use]
    pub fn entry(&self, index: usize) -> &FormatEntry {
        &self.entries[index]
    }

    pub fn insert_at(&mut self, index: usize, element: DomPtr, tag: TagData) {
        self.entries
            .insert(index, FormatEntry::Element(FormattingElement { element, tag }));
    }

    pub fn replace_at(&mut self, index: usize, element: DomPtr, tag: TagData) {
        self.entries[index] = FormatEntry::Element(FormattingElement { element, tag });
    }

    pub fn remove_at(&mut self, index: usize) {
        self.entries.remove(index);
    }

    /// Position of `needle` in the whole list.
    #[must_use]
    pub fn find(&self, needle: &DomPtr) -> Option<usize> {
        self.entries.iter().position(|entry| {
            entry
                .as_element()
                .is_some_and(|formatting_element| formatting_element.element.ptr_eq(needle))
        })
    }

    #[must_use]
    pub fn contains(&self, needle: &DomPtr) -> bool {
        self.find(needle).is_some()
    }

    pub fn remove(&mut self, to_remove: &DomPtr) {
        self.entries.retain(|entry| match entry {
            FormatEntry::Element(formatting_element) => {
                !formatting_element.element.ptr_eq(to_remove)
            },
            FormatEntry::Marker => true,
        });
    }

    /// Index of the first entry after the last marker (0 if there is no
    /// marker).
    #[must_use]
    pub fn index_after_last_marker(&self) -> usize {
        self.entries
            .iter()
            .rposition(FormatEntry::is_marker)
            .map(|index| index + 1)
            .unwrap_or(0)
    }

    /// The formatting elements between the last marker and the end of the
    /// list, with their list positions, bottommost first.
    pub fn elements_since_last_marker(
        &self,
    ) -> impl Iterator<Item = (usize, &FormattingElement)> {
        let start = self.index_after_last_marker();
        self.entries[start..]
            .iter()
            .enumerate()
            .rev()
            .filter_map(move |(index, entry)| {
                entry.as_element().map(|element| (start + index, element))
            })
    }
}
