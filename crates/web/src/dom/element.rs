use string_interner::InternedString;

use crate::infra::Namespace;

/// <https://dom.spec.whatwg.org/#concept-element-interface>
///
/// Which DOM interface an element implements, determined by its local name
/// and namespace when the element is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementInterface {
    /// A non-HTML element (SVG, MathML, ...)
    Element,

    /// An HTML element whose name has no more specific interface
    HtmlElement,

    /// An HTML-namespace element with a name outside the HTML vocabulary
    HtmlUnknownElement,

    HtmlHtmlElement,
    HtmlHeadElement,
    HtmlBodyElement,
    HtmlTitleElement,
    HtmlBaseElement,
    HtmlLinkElement,
    HtmlMetaElement,
    HtmlStyleElement,
    HtmlScriptElement,
    HtmlTemplateElement,
    HtmlFormElement,
    HtmlParagraphElement,
    HtmlHeadingElement,
    HtmlDivElement,
    HtmlSpanElement,
    HtmlAnchorElement,
    HtmlImageElement,
    HtmlUListElement,
    HtmlOListElement,
    HtmlLiElement,
    HtmlTableElement,
    HtmlTableSectionElement,
    HtmlTableRowElement,
    HtmlTableCellElement,
    HtmlTableCaptionElement,
    HtmlTableColElement,
    HtmlSelectElement,
    HtmlOptionElement,
    HtmlOptGroupElement,
    HtmlInputElement,
    HtmlTextAreaElement,
    HtmlButtonElement,
    HtmlBrElement,
    HtmlHrElement,
    HtmlPreElement,
    HtmlQuoteElement,
    HtmlIFrameElement,
    HtmlEmbedElement,
    HtmlObjectElement,
    HtmlFrameSetElement,
    HtmlFrameElement,
    HtmlFontElement,
    HtmlMarqueeElement,
}

/// The element interface for each local name in the HTML namespace.
static HTML_INTERFACES: phf::Map<&'static str, ElementInterface> = phf::phf_map! {
    "html" => ElementInterface::HtmlHtmlElement,
    "head" => ElementInterface::HtmlHeadElement,
    "body" => ElementInterface::HtmlBodyElement,
    "title" => ElementInterface::HtmlTitleElement,
    "base" => ElementInterface::HtmlBaseElement,
    "link" => ElementInterface::HtmlLinkElement,
    "meta" => ElementInterface::HtmlMetaElement,
    "style" => ElementInterface::HtmlStyleElement,
    "script" => ElementInterface::HtmlScriptElement,
    "template" => ElementInterface::HtmlTemplateElement,
    "form" => ElementInterface::HtmlFormElement,
    "p" => ElementInterface::HtmlParagraphElement,
    "h1" => ElementInterface::HtmlHeadingElement,
    "h2" => ElementInterface::HtmlHeadingElement,
    "h3" => ElementInterface::HtmlHeadingElement,
    "h4" => ElementInterface::HtmlHeadingElement,
    "h5" => ElementInterface::HtmlHeadingElement,
    "h6" => ElementInterface::HtmlHeadingElement,
    "div" => ElementInterface::HtmlDivElement,
    "span" => ElementInterface::HtmlSpanElement,
    "a" => ElementInterface::HtmlAnchorElement,
    "img" => ElementInterface::HtmlImageElement,
    "ul" => ElementInterface::HtmlUListElement,
    "ol" => ElementInterface::HtmlOListElement,
    "li" => ElementInterface::HtmlLiElement,
    "table" => ElementInterface::HtmlTableElement,
    "tbody" => ElementInterface::HtmlTableSectionElement,
    "thead" => ElementInterface::HtmlTableSectionElement,
    "tfoot" => ElementInterface::HtmlTableSectionElement,
    "tr" => ElementInterface::HtmlTableRowElement,
    "td" => ElementInterface::HtmlTableCellElement,
    "th" => ElementInterface::HtmlTableCellElement,
    "caption" => ElementInterface::HtmlTableCaptionElement,
    "col" => ElementInterface::HtmlTableColElement,
    "colgroup" => ElementInterface::HtmlTableColElement,
    "select" => ElementInterface::HtmlSelectElement,
    "option" => ElementInterface::HtmlOptionElement,
    "optgroup" => ElementInterface::HtmlOptGroupElement,
    "input" => ElementInterface::HtmlInputElement,
    "textarea" => ElementInterface::HtmlTextAreaElement,
    "button" => ElementInterface::HtmlButtonElement,
    "br" => ElementInterface::HtmlBrElement,
    "hr" => ElementInterface::HtmlHrElement,
    "pre" => ElementInterface::HtmlPreElement,
    "listing" => ElementInterface::HtmlPreElement,
    "xmp" => ElementInterface::HtmlPreElement,
    "blockquote" => ElementInterface::HtmlQuoteElement,
    "q" => ElementInterface::HtmlQuoteElement,
    "iframe" => ElementInterface::HtmlIFrameElement,
    "embed" => ElementInterface::HtmlEmbedElement,
    "object" => ElementInterface::HtmlObjectElement,
    "frameset" => ElementInterface::HtmlFrameSetElement,
    "frame" => ElementInterface::HtmlFrameElement,
    "font" => ElementInterface::HtmlFontElement,
    "marquee" => ElementInterface::HtmlMarqueeElement,
};

/// HTML element names that exist in the vocabulary but whose interface is
/// plain HTMLElement.
static GENERIC_HTML_ELEMENTS: phf::Set<&'static str> = phf::phf_set! {
    "abbr", "acronym", "address", "article", "aside", "audio", "b",
    "basefont", "bdi", "bdo", "bgsound", "big", "canvas", "center", "cite",
    "code", "data", "datalist", "dd", "details", "dfn", "dialog", "dir",
    "dl", "dt", "em", "fieldset", "figcaption", "figure", "footer",
    "header", "hgroup", "i", "ins", "del", "kbd", "keygen", "label",
    "legend", "main", "map", "mark", "menu", "meter", "nav",
    "nobr", "noembed", "noframes", "noscript", "output", "param",
    "picture", "plaintext", "progress", "rb", "rp", "rt", "rtc", "ruby",
    "s", "samp", "search", "section", "slot", "small", "source", "strike",
    "strong", "sub", "summary", "sup", "time", "track", "tt", "u", "var",
    "video", "wbr", "area",
};

impl ElementInterface {
    /// <https://dom.spec.whatwg.org/#concept-element-interface>
    #[must_use]
    pub fn for_name(namespace: Namespace, local_name: InternedString) -> Self {
        if namespace != Namespace::Html {
            return Self::Element;
        }

        if let Some(&interface) = HTML_INTERFACES.get(local_name.as_str()) {
            return interface;
        }

        if GENERIC_HTML_ELEMENTS.contains(local_name.as_str()) {
            Self::HtmlElement
        } else {
            Self::HtmlUnknownElement
        }
    }
}

/// An ordered attribute list with unique names.
///
/// The first occurrence of a name wins; later insertions with the same name
/// are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeMap {
    attributes: Vec<(InternedString, InternedString)>,
}

impl AttributeMap {
    #[must_use]
    pub fn get(&self, name: InternedString) -> Option<InternedString> {
        self.attributes
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
    }

    #[must_use]
    pub fn contains(&self, name: InternedString) -> bool {
        self.get(name).is_some()
    }

    /// Append an attribute. Returns `false` (and changes nothing) if the
    /// name is already present.
    pub fn push(&mut self, name: InternedString, value: InternedString) -> bool {
        if self.contains(name) {
            return false;
        }
        self.attributes.push((name, value));
        true
    }

    /// Rename an attribute in place, keeping its position and value.
    /// Does nothing if `from` is absent.
    pub fn rename(&mut self, from: InternedString, to: InternedString) {
        if let Some((name, _)) = self
            .attributes
            .iter_mut()
            .find(|(name, _)| *name == from)
        {
            *name = to;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &(InternedString, InternedString)> {
        self.attributes.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[(InternedString, InternedString)] {
        &self.attributes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

/// <https://dom.spec.whatwg.org/#interface-element>
pub struct Element {
    namespace: Namespace,
    namespace_prefix: Option<InternedString>,
    local_name: InternedString,
    attributes: AttributeMap,
    interface: ElementInterface,
    is: Option<InternedString>,

    /// <https://html.spec.whatwg.org/multipage/scripting.html#template-contents>
    ///
    /// A DocumentFragment, present on `<template>` elements only. It is
    /// not a child of the element.
    template_contents: Option<super::DomPtr>,
}

impl Element {
    pub fn new(
        namespace: Namespace,
        namespace_prefix: Option<InternedString>,
        local_name: InternedString,
        is: Option<InternedString>,
    ) -> Self {
        Self {
            namespace,
            namespace_prefix,
            local_name,
            attributes: AttributeMap::default(),
            interface: ElementInterface::for_name(namespace, local_name),
            is,
            template_contents: None,
        }
    }

    #[must_use]
    pub fn template_contents(&self) -> Option<super::DomPtr> {
        self.template_contents.clone()
    }

    pub fn set_template_contents(&mut self, contents: super::DomPtr) {
        self.template_contents = Some(contents);
    }

    #[must_use]
    pub fn namespace(&self) -> Namespace {
        self.namespace
    }

    /// The namespace URI, as exposed through the DOM.
    #[must_use]
    pub fn namespace_uri(&self) -> &'static str {
        self.namespace.uri()
    }

    #[must_use]
    pub fn namespace_prefix(&self) -> Option<InternedString> {
        self.namespace_prefix
    }

    #[must_use]
    pub fn local_name(&self) -> InternedString {
        self.local_name
    }

    #[must_use]
    pub fn interface(&self) -> ElementInterface {
        self.interface
    }

    #[must_use]
    pub fn is(&self) -> Option<InternedString> {
        self.is
    }

    /// <https://dom.spec.whatwg.org/#concept-element-attributes-append>
    pub fn append_attribute(&mut self, name: InternedString, value: InternedString) {
        self.attributes.push(name, value);
    }

    #[must_use]
    pub fn attributes(&self) -> &AttributeMap {
        &self.attributes
    }

    #[must_use]
    pub fn id(&self) -> Option<InternedString> {
        self.attributes.get(string_interner::interned!("id"))
    }
}

#[cfg(test)]
mod tests {
    use string_interner::interned;

    use super::{AttributeMap, ElementInterface};
    use crate::infra::Namespace;

    #[test]
    fn first_attribute_occurrence_wins() {
        let mut attributes = AttributeMap::default();
        assert!(attributes.push(interned!("class"), interned!("a")));
        assert!(!attributes.push(interned!("class"), interned!("b")));
        assert_eq!(attributes.get(interned!("class")), Some(interned!("a")));
        assert_eq!(attributes.len(), 1);
    }

    #[test]
    fn interface_dispatch() {
        assert_eq!(
            ElementInterface::for_name(Namespace::Html, interned!("html")),
            ElementInterface::HtmlHtmlElement
        );
        assert_eq!(
            ElementInterface::for_name(Namespace::Html, interned!("b")),
            ElementInterface::HtmlElement
        );
        assert_eq!(
            ElementInterface::for_name(Namespace::Html, interned!("not-a-real-tag")),
            ElementInterface::HtmlUnknownElement
        );
        assert_eq!(
            ElementInterface::for_name(Namespace::Svg, interned!("svg")),
            ElementInterface::Element
        );
    }
}
