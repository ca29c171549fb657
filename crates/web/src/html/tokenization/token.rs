use string_interner::{interned, InternedString};

use crate::dom::AttributeMap;

/// The output of the tokenizer.
#[derive(Debug, Clone)]
pub enum Token {
    Doctype(Doctype),

    /// Start and end tags share one shape; `TagData::opening` tells them
    /// apart.
    Tag(TagData),

    Comment(String),

    /// A single code point of character data.
    Character(char),

    EndOfFile,
}

/// <https://html.spec.whatwg.org/multipage/parsing.html#tokenization>
#[derive(Debug, Clone, Default)]
pub struct Doctype {
    pub name: Option<InternedString>,
    pub public_ident: Option<InternedString>,
    pub system_ident: Option<InternedString>,
    pub force_quirks: bool,
}

#[derive(Debug, Clone)]
pub struct TagData {
    /// `true` for `<tag>`, `false` for `</tag>`
    pub opening: bool,

    pub name: InternedString,

    /// Whether the tag closes itself (`<tag/>`)
    pub self_closing: bool,

    /// Ordered, with unique names; duplicates were discarded during
    /// tokenization.
    pub attributes: AttributeMap,
}

impl TagData {
    /// A start tag with the given name and nothing else, used when the
    /// tree builder fabricates tags (`<head>`, `<body>`, ...).
    pub fn synthetic(name: InternedString) -> Self {
        Self {
            opening: true,
            name,
            self_closing: false,
            attributes: AttributeMap::default(),
        }
    }

    #[must_use]
    pub fn lookup_attribute(&self, want: InternedString) -> Option<InternedString> {
        self.attributes.get(want)
    }

    /// <https://html.spec.whatwg.org/multipage/parsing.html#adjust-mathml-attributes>
    pub fn adjust_mathml_attributes(&mut self) {
        self.attributes.rename(
            interned!("definitionurl"),
            interned!("definitionURL"),
        );
    }

    /// <https://html.spec.whatwg.org/multipage/parsing.html#adjust-svg-attributes>
    pub fn adjust_svg_attributes(&mut self) {
        for &(lowercase, adjusted) in SVG_ATTRIBUTE_ADJUSTMENTS {
            self.attributes
                .rename(InternedString::from_static(lowercase), InternedString::from_static(adjusted));
        }
    }
}

/// <https://html.spec.whatwg.org/multipage/parsing.html#adjust-svg-attributes>
const SVG_ATTRIBUTE_ADJUSTMENTS: &[(&str, &str)] = &[
    ("attributename", "attributeName"),
    ("attributetype", "attributeType"),
    ("basefrequency", "baseFrequency"),
    ("baseprofile", "baseProfile"),
    ("calcmode", "calcMode"),
    ("clippathunits", "clipPathUnits"),
    ("diffuseconstant", "diffuseConstant"),
    ("edgemode", "edgeMode"),
    ("filterunits", "filterUnits"),
    ("glyphref", "glyphRef"),
    ("gradienttransform", "gradientTransform"),
    ("gradientunits", "gradientUnits"),
    ("kernelmatrix", "kernelMatrix"),
    ("kernelunitlength", "kernelUnitLength"),
    ("keypoints", "keyPoints"),
    ("keysplines", "keySplines"),
    ("keytimes", "keyTimes"),
    ("lengthadjust", "lengthAdjust"),
    ("limitingconeangle", "limitingConeAngle"),
    ("markerheight", "markerHeight"),
    ("markerunits", "markerUnits"),
    ("markerwidth", "markerWidth"),
    ("maskcontentunits", "maskContentUnits"),
    ("maskunits", "maskUnits"),
    ("numoctaves", "numOctaves"),
    ("pathlength", "pathLength"),
    ("patterncontentunits", "patternContentUnits"),
    ("patterntransform", "patternTransform"),
    ("patternunits", "patternUnits"),
    ("pointsatx", "pointsAtX"),
    ("pointsaty", "pointsAtY"),
    ("pointsatz", "pointsAtZ"),
    ("preservealpha", "preserveAlpha"),
    ("preserveaspectratio", "preserveAspectRatio"),
    ("primitiveunits", "primitiveUnits"),
    ("refx", "refX"),
    ("refy", "refY"),
    ("repeatcount", "repeatCount"),
    ("repeatdur", "repeatDur"),
    ("requiredextensions", "requiredExtensions"),
    ("requiredfeatures", "requiredFeatures"),
    ("specularconstant", "specularConstant"),
    ("specularexponent", "specularExponent"),
    ("spreadmethod", "spreadMethod"),
    ("startoffset", "startOffset"),
    ("stddeviation", "stdDeviation"),
    ("stitchtiles", "stitchTiles"),
    ("surfacescale", "surfaceScale"),
    ("systemlanguage", "systemLanguage"),
    ("tablevalues", "tableValues"),
    ("targetx", "targetX"),
    ("targety", "targetY"),
    ("textlength", "textLength"),
    ("viewbox", "viewBox"),
    ("viewtarget", "viewTarget"),
    ("xchannelselector", "xChannelSelector"),
    ("ychannelselector", "yChannelSelector"),
    ("zoomandpan", "zoomAndPan"),
];

/// The token currently being assembled by the tokenizer.
///
/// Names and values accumulate as plain strings and are interned once, when
/// the finished token is emitted.
#[derive(Default)]
pub(crate) enum CurrentToken {
    #[default]
    None,
    Doctype(DoctypeBuilder),
    Tag(TagBuilder),
    Comment(String),
}

#[derive(Default)]
pub(crate) struct DoctypeBuilder {
    pub name: Option<String>,
    pub public_ident: Option<String>,
    pub system_ident: Option<String>,
    pub force_quirks: bool,
}

#[derive(Default)]
pub(crate) struct TagBuilder {
    pub opening: bool,
    pub name: String,
    pub self_closing: bool,
    attributes: Vec<(String, String)>,

    /// The attribute currently being parsed; committed when the next one
    /// starts or the tag is emitted.
    current_attribute: Option<(String, String)>,
}

impl TagBuilder {
    fn new(opening: bool) -> Self {
        Self {
            opening,
            ..Self::default()
        }
    }

    /// Fold the in-flight attribute into the list.
    ///
    /// Returns `false` if the attribute was dropped because its name
    /// already exists (first occurrence wins).
    fn commit_current_attribute(&mut self) -> bool {
        let Some((name, value)) = self.current_attribute.take() else {
            return true;
        };

        if self.attributes.iter().any(|(existing, _)| *existing == name) {
            return false;
        }

        self.attributes.push((name, value));
        true
    }
}

impl CurrentToken {
    pub fn create_start_tag(&mut self) {
        *self = Self::Tag(TagBuilder::new(true));
    }

    pub fn create_end_tag(&mut self) {
        *self = Self::Tag(TagBuilder::new(false));
    }

    pub fn create_comment(&mut self) {
        *self = Self::Comment(String::new());
    }

    pub fn create_doctype(&mut self) {
        *self = Self::Doctype(DoctypeBuilder::default());
    }

    pub fn is_end_tag(&self) -> bool {
        matches!(self, Self::Tag(tag) if !tag.opening)
    }

    pub fn tag_name(&self) -> Option<&str> {
        match self {
            Self::Tag(tag) => Some(&tag.name),
            _ => None,
        }
    }

    pub fn append_to_tag_name(&mut self, c: char) {
        if let Self::Tag(tag) = self {
            tag.name.push(c);
        }
    }

    pub fn set_self_closing(&mut self) {
        if let Self::Tag(tag) = self {
            tag.self_closing = true;
        }
    }

    /// Start a fresh attribute, committing the previous one.
    ///
    /// Returns `false` if the previous attribute was a duplicate and got
    /// dropped.
    pub fn start_new_attribute(&mut self) -> bool {
        if let Self::Tag(tag) = self {
            let unique = tag.commit_current_attribute();
            tag.current_attribute = Some((String::new(), String::new()));
            unique
        } else {
            true
        }
    }

    pub fn append_to_attribute_name(&mut self, c: char) {
        if let Self::Tag(TagBuilder {
            current_attribute: Some((name, _)),
            ..
        }) = self
        {
            name.push(c);
        }
    }

    pub fn append_to_attribute_value(&mut self, c: char) {
        if let Self::Tag(TagBuilder {
            current_attribute: Some((_, value)),
            ..
        }) = self
        {
            value.push(c);
        }
    }

    pub fn append_str_to_attribute_value(&mut self, s: &str) {
        if let Self::Tag(TagBuilder {
            current_attribute: Some((_, value)),
            ..
        }) = self
        {
            value.push_str(s);
        }
    }

    pub fn append_to_comment(&mut self, c: char) {
        if let Self::Comment(data) = self {
            data.push(c);
        }
    }

    pub fn append_str_to_comment(&mut self, s: &str) {
        if let Self::Comment(data) = self {
            data.push_str(s);
        }
    }

    pub fn set_force_quirks(&mut self) {
        if let Self::Doctype(doctype) = self {
            doctype.force_quirks = true;
        }
    }

    pub fn append_to_doctype_name(&mut self, c: char) {
        if let Self::Doctype(doctype) = self {
            doctype.name.get_or_insert_with(String::new).push(c);
        }
    }

    pub fn init_doctype_public_ident(&mut self) {
        if let Self::Doctype(doctype) = self {
            doctype.public_ident = Some(String::new());
        }
    }

    pub fn append_to_doctype_public_ident(&mut self, c: char) {
        if let Self::Doctype(DoctypeBuilder {
            public_ident: Some(ident),
            ..
        }) = self
        {
            ident.push(c);
        }
    }

    pub fn init_doctype_system_ident(&mut self) {
        if let Self::Doctype(doctype) = self {
            doctype.system_ident = Some(String::new());
        }
    }

    pub fn append_to_doctype_system_ident(&mut self, c: char) {
        if let Self::Doctype(DoctypeBuilder {
            system_ident: Some(ident),
            ..
        }) = self
        {
            ident.push(c);
        }
    }

    /// Finish the token.
    ///
    /// The second component is `false` if finishing a tag dropped a
    /// duplicate attribute.
    pub fn build(&mut self) -> (Option<Token>, bool) {
        match std::mem::take(self) {
            Self::None => (None, true),
            Self::Comment(data) => (Some(Token::Comment(data)), true),
            Self::Doctype(doctype) => {
                let token = Doctype {
                    name: doctype.name.map(|name| InternedString::new(&name)),
                    public_ident: doctype
                        .public_ident
                        .map(|ident| InternedString::new(&ident)),
                    system_ident: doctype
                        .system_ident
                        .map(|ident| InternedString::new(&ident)),
                    force_quirks: doctype.force_quirks,
                };
                (Some(Token::Doctype(token)), true)
            },
            Self::Tag(mut tag) => {
                let unique = tag.commit_current_attribute();

                let mut attributes = AttributeMap::default();
                for (name, value) in tag.attributes {
                    attributes.push(InternedString::new(&name), InternedString::new(&value));
                }

                let token = TagData {
                    opening: tag.opening,
                    name: InternedString::new(&tag.name),
                    self_closing: tag.self_closing,
                    attributes,
                };
                (Some(Token::Tag(token)), unique)
            },
        }
    }
}
