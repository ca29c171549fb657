use string_interner::{interned, InternedString};

use crate::{dom::DomPtr, infra::Namespace};

/// <https://html.spec.whatwg.org/multipage/parsing.html#stack-of-open-elements>
///
/// A wrapper around `Vec<DomPtr>` because the spec's terminology does not
/// match `Vec`'s: the stack grows "downwards", so the most recently opened
/// element (the *current node*) is the bottommost one.
///
/// The stack holds non-owning-in-spirit references; ownership of the
/// elements stays with their parents, and popping never destroys a node.
#[derive(Default)]
pub struct StackOfOpenElements {
    open_elements: Vec<DomPtr>,
}

/// The scope variants used by "has an element in ... scope".
///
/// <https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-the-specific-scope>
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scope {
    Default,
    ListItem,
    Button,
    Table,
    Select,
}

impl Scope {
    /// Whether an element terminates the walk for this scope variant.
    fn is_boundary(&self, namespace: Namespace, local_name: InternedString) -> bool {
        let in_default_scope = match namespace {
            Namespace::Html => [
                interned!("applet"),
                interned!("caption"),
                interned!("html"),
                interned!("table"),
                interned!("td"),
                interned!("th"),
                interned!("marquee"),
                interned!("object"),
                interned!("template"),
            ]
            .contains(&local_name),
            Namespace::MathML => [
                interned!("mi"),
                interned!("mo"),
                interned!("mn"),
                interned!("ms"),
                interned!("mtext"),
                interned!("annotation-xml"),
            ]
            .contains(&local_name),
            Namespace::Svg => [
                interned!("foreignObject"),
                interned!("desc"),
                interned!("title"),
            ]
            .contains(&local_name),
            _ => false,
        };

        match self {
            Self::Default => in_default_scope,
            Self::ListItem => {
                in_default_scope
                    || (namespace == Namespace::Html
                        && (local_name == interned!("ol") || local_name == interned!("ul")))
            },
            Self::Button => {
                in_default_scope
                    || (namespace == Namespace::Html && local_name == interned!("button"))
            },
            Self::Table => {
                namespace == Namespace::Html
                    && [
                        interned!("html"),
                        interned!("table"),
                        interned!("template"),
                    ]
                    .contains(&local_name)
            },
            // Select scope is inverted: everything except optgroup and
            // option terminates the walk.
            Self::Select => {
                !(namespace == Namespace::Html
                    && (local_name == interned!("optgroup")
                        || local_name == interned!("option")))
            },
        }
    }
}

impl StackOfOpenElements {
    pub fn push(&mut self, node: DomPtr) {
        self.open_elements.push(node);
    }

    pub fn pop(&mut self) -> Option<DomPtr> {
        self.open_elements.pop()
    }

    /// The first node in the stack, the `html` root.
    #[must_use]
    pub fn top_node(&self) -> Option<DomPtr> {
        self.open_elements.first().cloned()
    }

    /// The bottommost node, i.e. the current node.
    #[must_use]
    pub fn bottommost_node(&self) -> Option<DomPtr> {
        self.open_elements.last().cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.open_elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.open_elements.is_empty()
    }

    #[must_use]
    pub fn nth(&self, index: usize) -> Option<DomPtr> {
        self.open_elements.get(index).cloned()
    }

    #[must_use]
    pub fn list(&self) -> &[DomPtr] {
        &self.open_elements
    }

    pub fn clear(&mut self) {
        self.open_elements.clear();
    }

    pub fn insert_at(&mut self, index: usize, node: DomPtr) {
        self.open_elements.insert(index, node);
    }

    pub fn replace_at(&mut self, index: usize, node: DomPtr) {
        self.open_elements[index] = node;
    }

    #[must_use]
    pub fn find(&self, needle: &DomPtr) -> Option<usize> {
        self.open_elements
            .iter()
            .position(|node| node.ptr_eq(needle))
    }

    #[must_use]
    pub fn contains_node(&self, needle: &DomPtr) -> bool {
        self.find(needle).is_some()
    }

    /// Whether any open element is an HTML element with this local name.
    #[must_use]
    pub fn contains_html_element(&self, local_name: InternedString) -> bool {
        self.open_elements
            .iter()
            .any(|node| node.is_html_element(local_name))
    }

    pub fn remove(&mut self, to_remove: &DomPtr) {
        self.open_elements.retain(|node| !node.ptr_eq(to_remove));
    }

    /// <https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-the-specific-scope>
    ///
    /// Walks from the current node upwards; true if an HTML element named
    /// `local_name` is found before a scope boundary.
    #[must_use]
    pub fn has_element_in_scope(&self, local_name: InternedString, scope: Scope) -> bool {
        self.has_one_of_in_scope(&[local_name], scope)
    }

    /// Like [has_element_in_scope](Self::has_element_in_scope), for any of
    /// several names.
    #[must_use]
    pub fn has_one_of_in_scope(&self, local_names: &[InternedString], scope: Scope) -> bool {
        for node in self.open_elements.iter().rev() {
            if node.is_html_element_of(local_names) {
                return true;
            }

            let Some(element_namespace) = node.namespace() else {
                continue;
            };
            let element_name = node.local_name().expect("namespace implies element");
            if scope.is_boundary(element_namespace, element_name) {
                return false;
            }
        }
        false
    }

    /// Scope check for one specific node rather than a tag name.
    #[must_use]
    pub fn has_node_in_scope(&self, target: &DomPtr, scope: Scope) -> bool {
        for node in self.open_elements.iter().rev() {
            if node.ptr_eq(target) {
                return true;
            }

            let Some(element_namespace) = node.namespace() else {
                continue;
            };
            let element_name = node.local_name().expect("namespace implies element");
            if scope.is_boundary(element_namespace, element_name) {
                return false;
            }
        }
        false
    }
}

/// <https://html.spec.whatwg.org/multipage/parsing.html#special>
#[must_use]
pub fn is_special(namespace: Namespace, local_name: InternedString) -> bool {
    match namespace {
        Namespace::Html => SPECIAL_HTML_NAMES
            .iter()
            .any(|name| local_name == **name),
        Namespace::MathML => [
            interned!("mi"),
            interned!("mo"),
            interned!("mn"),
            interned!("ms"),
            interned!("mtext"),
            interned!("annotation-xml"),
        ]
        .contains(&local_name),
        Namespace::Svg => [
            interned!("foreignObject"),
            interned!("desc"),
            interned!("title"),
        ]
        .contains(&local_name),
        _ => false,
    }
}

static SPECIAL_HTML_NAMES: &[&str] = &[
    "address", "applet", "area", "article", "aside", "base", "basefont", "bgsound",
    "blockquote", "body", "br", "button", "caption", "center", "col", "colgroup", "dd",
    "details", "dir", "div", "dl", "dt", "embed", "fieldset", "figcaption", "figure",
    "footer", "form", "frame", "frameset", "h1", "h2", "h3", "h4", "h5", "h6", "head",
    "header", "hgroup", "hr", "html", "iframe", "img", "input", "keygen", "li", "link",
    "listing", "main", "marquee", "menu", "meta", "nav", "noembed", "noframes",
    "noscript", "object", "ol", "p", "param", "plaintext", "pre", "script", "search",
    "section", "select", "source", "style", "summary", "table", "tbody", "td",
    "template", "textarea", "tfoot", "th", "thead", "title", "tr", "track", "ul",
    "wbr", "xmp",
];
