//! Interned strings for the parts of the engine that compare names a lot.
//!
//! An [InternedString] is `Copy` and compares in `O(1)`. Names that the
//! engine knows about at compile time live in a static set and never touch
//! the global interner; everything else is interned on first use and kept
//! for the lifetime of the process.

use std::{
    collections::HashMap,
    fmt,
    sync::{LazyLock, Mutex},
};

use phf::phf_ordered_set;

/// Resolve a string literal to its [InternedString].
///
/// ```
/// use string_interner::{interned, InternedString};
///
/// let div = interned!("div");
/// assert_eq!(div, InternedString::new("div"));
/// ```
#[macro_export]
macro_rules! interned {
    ($value:expr) => {
        $crate::InternedString::from_static($value)
    };
}

/// Names the engine compares against constantly: element and attribute
/// names from the HTML, SVG and MathML vocabularies.
static STATIC_SET: phf::OrderedSet<&'static str> = phf_ordered_set! {
    // Document structure
    "html", "head", "body", "title", "base", "link", "meta", "style",
    // Sections and headings
    "article", "section", "nav", "aside", "h1", "h2", "h3", "h4", "h5",
    "h6", "hgroup", "header", "footer", "address", "main",
    // Grouping content
    "p", "hr", "pre", "blockquote", "ol", "ul", "menu", "li", "dl", "dt",
    "dd", "figure", "figcaption", "div", "search", "dialog", "summary",
    "details", "fieldset", "legend",
    // Text-level semantics
    "a", "em", "strong", "small", "s", "cite", "q", "dfn", "abbr", "ruby",
    "rt", "rp", "rb", "rtc", "data", "time", "code", "var", "samp", "kbd",
    "sub", "sup", "i", "b", "u", "mark", "bdi", "bdo", "span", "br", "wbr",
    // Edits
    "ins", "del",
    // Embedded content
    "picture", "source", "img", "iframe", "embed", "object", "param",
    "video", "audio", "track", "map", "area",
    // Tables
    "table", "caption", "colgroup", "col", "tbody", "thead", "tfoot", "tr",
    "td", "th",
    // Forms
    "form", "label", "input", "button", "select", "datalist", "optgroup",
    "option", "textarea", "output", "progress", "meter", "keygen",
    // Scripting
    "script", "noscript", "template", "slot", "canvas",
    // Frames
    "frameset", "frame", "noframes",
    // Obsolete but still parsed
    "applet", "acronym", "basefont", "bgsound", "big", "blink", "center",
    "dir", "font", "isindex", "listing", "marquee", "multicol", "nextid",
    "nobr", "noembed", "plaintext", "spacer", "strike", "tt", "xmp",
    "image",
    // SVG and MathML
    "svg", "math", "mi", "mo", "mn", "ms", "mtext", "mglyph", "malignmark",
    "annotation-xml", "foreignObject", "desc",
    // Attribute names
    "id", "class", "name", "is", "href", "src", "type", "charset",
    "content", "http-equiv", "color", "face", "size", "action", "prompt",
    "encoding", "definitionurl", "definitionURL", "xmlns", "xlink",
    // The empty string, so defaults stay off the dynamic interner
    "",
};

/// Like a [String] that is `Copy` and supports comparison in `O(1)`.
///
/// Interned strings are immutable and never deallocated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InternedString {
    Static(u32),
    Dynamic(u32),
}

struct Interner {
    lookup: HashMap<&'static str, u32>,
    strings: Vec<&'static str>,
}

static INTERNER: LazyLock<Mutex<Interner>> = LazyLock::new(|| {
    Mutex::new(Interner {
        lookup: HashMap::new(),
        strings: Vec::new(),
    })
});

impl Interner {
    fn get_or_insert(&mut self, value: &str) -> u32 {
        if let Some(&symbol) = self.lookup.get(value) {
            return symbol;
        }

        let leaked: &'static str = Box::leak(value.to_owned().into_boxed_str());
        let symbol = self.strings.len() as u32;
        self.strings.push(leaked);
        self.lookup.insert(leaked, symbol);
        symbol
    }
}

impl InternedString {
    pub fn new(value: &str) -> Self {
        if let Some(symbol) = STATIC_SET.get_index(value) {
            return Self::Static(symbol as u32);
        }

        let symbol = INTERNER
            .lock()
            .expect("String interner was poisoned")
            .get_or_insert(value);
        Self::Dynamic(symbol)
    }

    /// Fast path for string literals, used by [interned!].
    pub fn from_static(value: &'static str) -> Self {
        Self::new(value)
    }

    pub fn as_str(&self) -> &'static str {
        match *self {
            Self::Static(symbol) => *STATIC_SET
                .index(symbol as usize)
                .expect("Static symbol out of range"),
            Self::Dynamic(symbol) => {
                INTERNER.lock().expect("String interner was poisoned").strings[symbol as usize]
            },
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }
}

impl Default for InternedString {
    fn default() -> Self {
        Self::new("")
    }
}

impl fmt::Display for InternedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for InternedString {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for InternedString {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

impl PartialEq<str> for InternedString {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

#[cfg(test)]
mod tests {
    use super::InternedString;

    #[test]
    fn round_trips() {
        let foo = InternedString::new("certainly-not-a-tag-name");
        assert_eq!(foo.as_str(), "certainly-not-a-tag-name");

        let div = InternedString::new("div");
        assert_eq!(div.as_str(), "div");
    }

    #[test]
    fn interning_is_stable() {
        assert_eq!(InternedString::new("head"), interned!("head"));
        assert_eq!(
            InternedString::new("x-custom-element"),
            InternedString::new("x-custom-element")
        );
        assert_ne!(interned!("head"), interned!("body"));
    }

    #[test]
    fn static_and_dynamic_never_collide() {
        // "html" is in the static set, so a dynamically constructed copy
        // must resolve to the same symbol.
        let dynamic = InternedString::new(&String::from("html"));
        assert_eq!(dynamic, interned!("html"));
    }
}
