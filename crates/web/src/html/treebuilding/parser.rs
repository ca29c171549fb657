//! The insertion-mode state machine that turns tokens into a DOM tree.
//!
//! <https://html.spec.whatwg.org/multipage/parsing.html#tree-construction>

use string_interner::{interned, InternedString};

use crate::{
    dom::{
        self, create_element, CharacterData, Document, DocumentType, DomPtr, Node, NodeKind,
        QuirksMode,
    },
    dom::DocumentReadiness,
    html::tokenization::{
        Doctype, HtmlParseError, IgnoreParseErrors, ParseErrorHandler, TagData, Token,
        Tokenizer, TokenizerState,
    },
    infra::Namespace,
};

use super::{
    is_special, ActiveFormattingElements, FormatEntry, InsertionLocation, Scope,
    StackOfOpenElements,
};

const TAB: char = '\u{0009}';
const LINE_FEED: char = '\u{000A}';
const FORM_FEED: char = '\u{000C}';
const WHITESPACE: char = '\u{0020}';
const UNICODE_REPLACEMENT: char = '\u{FFFD}';

/// <https://html.spec.whatwg.org/multipage/parsing.html#parsing-elements-that-contain-only-text>
#[derive(Clone, Copy, Debug)]
enum GenericParsingAlgorithm {
    Rcdata,
    RawText,
}

/// <https://html.spec.whatwg.org/multipage/parsing.html#insertion-mode>
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InsertionMode {
    Initial,
    BeforeHtml,
    BeforeHead,
    InHead,
    InHeadNoscript,
    AfterHead,
    InBody,
    Text,
    InTable,
    InTableText,
    InCaption,
    InColumnGroup,
    InTableBody,
    InRow,
    InCell,
    InSelect,
    InSelectInTable,
    InTemplate,
    AfterBody,
    InFrameset,
    AfterFrameset,
    AfterAfterBody,
    AfterAfterFrameset,
}

/// <https://html.spec.whatwg.org/multipage/parsing.html#frameset-ok-flag>
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FramesetOkFlag {
    #[default]
    Ok,
    NotOk,
}

pub struct Parser<P: ParseErrorHandler = IgnoreParseErrors> {
    tokenizer: Tokenizer<P>,

    document: DomPtr,

    insertion_mode: InsertionMode,

    /// <https://html.spec.whatwg.org/multipage/parsing.html#original-insertion-mode>
    ///
    /// Restored when leaving the Text and InTableText modes.
    original_insertion_mode: Option<InsertionMode>,

    /// <https://html.spec.whatwg.org/multipage/parsing.html#stack-of-template-insertion-modes>
    template_insertion_modes: Vec<InsertionMode>,

    open_elements: StackOfOpenElements,

    active_formatting_elements: ActiveFormattingElements,

    /// <https://html.spec.whatwg.org/multipage/parsing.html#the-head-element-pointer>
    head: Option<DomPtr>,

    /// <https://html.spec.whatwg.org/multipage/parsing.html#the-form-element-pointer>
    form: Option<DomPtr>,

    frameset_ok: FramesetOkFlag,

    /// Enables the table-family branch of "appropriate place for inserting
    /// a node".
    foster_parenting: bool,

    /// Character tokens buffered by the InTableText mode.
    pending_table_characters: String,

    /// The context element when parsing a fragment.
    fragment_context: Option<DomPtr>,

    /// Whether the current start tag's self-closing flag was acknowledged.
    self_closing_acknowledged: bool,

    /// Set by `<pre>`, `<listing>` and `<textarea>`: a line feed
    /// immediately after the start tag is dropped.
    ignore_next_line_feed: bool,

    done: bool,
}

impl<P: ParseErrorHandler> Parser<P> {
    #[must_use]
    pub fn new(source: &str) -> Self {
        let document = DomPtr::new(Node::new(NodeKind::Document(Document::default())));
        // A document is its own owning document.
        document
            .borrow_mut()
            .set_owning_document(document.downgrade());

        Self {
            tokenizer: Tokenizer::new(source),
            document,
            insertion_mode: InsertionMode::Initial,
            original_insertion_mode: None,
            template_insertion_modes: Vec::new(),
            open_elements: StackOfOpenElements::default(),
            active_formatting_elements: ActiveFormattingElements::default(),
            head: None,
            form: None,
            frameset_ok: FramesetOkFlag::default(),
            foster_parenting: false,
            pending_table_characters: String::new(),
            fragment_context: None,
            self_closing_acknowledged: false,
            ignore_next_line_feed: false,
            done: false,
        }
    }

    /// Mirror of the Document's scripting flag; `<noscript>` parses
    /// differently depending on it.
    pub fn set_scripting(&mut self, enabled: bool) {
        self.document
            .borrow_mut()
            .as_document_mut()
            .expect("parser document node is a Document")
            .set_scripting_enabled(enabled);
    }

    #[must_use]
    fn scripting_enabled(&self) -> bool {
        self.document
            .borrow()
            .as_document()
            .expect("parser document node is a Document")
            .scripting_enabled()
    }

    /// Run the parser to completion and return the Document.
    pub fn parse(mut self) -> DomPtr {
        self.run();
        self.document
    }

    /// <https://html.spec.whatwg.org/multipage/parsing.html#parsing-html-fragments>
    ///
    /// Parses `source` as if inside a `context` element, returning the
    /// fabricated `html` root whose children are the parsed nodes.
    pub fn parse_fragment(source: &str, context: InternedString) -> DomPtr {
        let mut parser = Self::new(source);

        // The context element, never attached to the tree.
        let context_element = create_element(
            parser.document.downgrade(),
            context,
            Namespace::Html,
            None,
            None,
        );

        // Set the tokenizer state appropriate for the context element.
        let initial_state = if context == interned!("title") || context == interned!("textarea")
        {
            Some(TokenizerState::Rcdata)
        } else if context == interned!("style")
            || context == interned!("xmp")
            || context == interned!("iframe")
            || context == interned!("noembed")
            || context == interned!("noframes")
        {
            Some(TokenizerState::Rawtext)
        } else if context == interned!("script") {
            Some(TokenizerState::ScriptData)
        } else if context == interned!("noscript") && parser.scripting_enabled() {
            Some(TokenizerState::Rawtext)
        } else if context == interned!("plaintext") {
            Some(TokenizerState::Plaintext)
        } else {
            None
        };
        if let Some(state) = initial_state {
            parser.tokenizer.switch_to(state);
        }
        parser
            .tokenizer
            .set_last_start_tag(Some(context.as_str().to_owned()));

        // Let root be a new html element with no attributes, append it to
        // the Document and put it on the stack of open elements.
        let root = create_element(
            parser.document.downgrade(),
            interned!("html"),
            Namespace::Html,
            None,
            None,
        );
        Node::append_child(parser.document.clone(), root.clone());
        parser.open_elements.push(root.clone());

        if context == interned!("template") {
            parser
                .template_insertion_modes
                .push(InsertionMode::InTemplate);
        }

        // The form pointer is inherited from the context chain; with a
        // detached context element only the element itself qualifies.
        if context == interned!("form") {
            parser.form = Some(context_element.clone());
        }

        parser.fragment_context = Some(context_element);
        parser.reset_insertion_mode_appropriately();

        parser.run();
        root
    }

    fn run(&mut self) {
        loop {
            // CDATA sections are only recognised in foreign content; keep
            // the tokenizer's view of that current.
            let cdata_allowed = self
                .adjusted_current_node()
                .is_some_and(|node| node.namespace().is_some_and(|ns| ns != Namespace::Html));
            self.tokenizer.set_cdata_allowed(cdata_allowed);

            let Some(token) = self.tokenizer.next() else {
                break;
            };
            self.process_token(token);

            if self.done {
                break;
            }
        }
    }

    #[inline]
    fn parse_error(&self, error: HtmlParseError) {
        P::handle(error);
    }

    /// <https://html.spec.whatwg.org/multipage/parsing.html#acknowledge-self-closing-flag>
    fn acknowledge_self_closing_flag(&mut self, tag: &TagData) {
        if tag.self_closing {
            self.self_closing_acknowledged = true;
        }
    }

    /// Entry point for one token from the tokenizer.
    fn process_token(&mut self, token: Token) {
        if self.ignore_next_line_feed {
            self.ignore_next_line_feed = false;
            if matches!(token, Token::Character(LINE_FEED)) {
                return;
            }
        }

        let needs_acknowledgement =
            matches!(&token, Token::Tag(tag) if tag.opening && tag.self_closing);
        if needs_acknowledgement {
            self.self_closing_acknowledged = false;
        }

        self.consume(token);

        if needs_acknowledgement && !self.self_closing_acknowledged {
            self.parse_error(HtmlParseError::NonVoidHtmlElementStartTagWithTrailingSolidus);
        }
    }

    /// <https://html.spec.whatwg.org/multipage/parsing.html#tree-construction-dispatcher>
    ///
    /// Reprocessing a token is a recursive call of this method.
    fn consume(&mut self, token: Token) {
        if self.should_use_foreign_content_rules(&token) {
            self.consume_in_foreign_content(token);
        } else {
            self.consume_in_mode(self.insertion_mode, token);
        }
    }

    /// <https://html.spec.whatwg.org/multipage/parsing.html#adjusted-current-node>
    #[must_use]
    fn adjusted_current_node(&self) -> Option<DomPtr> {
        if self.fragment_context.is_some() && self.open_elements.len() == 1 {
            self.fragment_context.clone()
        } else {
            self.open_elements.bottommost_node()
        }
    }

    /// <https://html.spec.whatwg.org/multipage/parsing.html#current-node>
    #[must_use]
    fn current_node(&self) -> DomPtr {
        self.open_elements
            .bottommost_node()
            .expect("stack of open elements is empty")
    }

    /// <https://html.spec.whatwg.org/multipage/parsing.html#mathml-text-integration-point>
    fn is_mathml_text_integration_point(node: &DomPtr) -> bool {
        node.namespace() == Some(Namespace::MathML)
            && node.local_name().is_some_and(|name| {
                [
                    interned!("mi"),
                    interned!("mo"),
                    interned!("mn"),
                    interned!("ms"),
                    interned!("mtext"),
                ]
                .contains(&name)
            })
    }

    /// <https://html.spec.whatwg.org/multipage/parsing.html#html-integration-point>
    fn is_html_integration_point(node: &DomPtr) -> bool {
        match node.namespace() {
            Some(Namespace::Svg) => node.local_name().is_some_and(|name| {
                [
                    interned!("foreignObject"),
                    interned!("desc"),
                    interned!("title"),
                ]
                .contains(&name)
            }),
            Some(Namespace::MathML) => {
                if !node
                    .local_name()
                    .is_some_and(|name| name == interned!("annotation-xml"))
                {
                    return false;
                }

                let node = node.borrow();
                let Some(element) = node.as_element() else {
                    return false;
                };
                element
                    .attributes()
                    .get(interned!("encoding"))
                    .is_some_and(|encoding| {
                        encoding.as_str().eq_ignore_ascii_case("text/html")
                            || encoding.as_str().eq_ignore_ascii_case("application/xhtml+xml")
                    })
            },
            _ => false,
        }
    }

    /// The negation of the dispatcher's "process in HTML content" branch.
    fn should_use_foreign_content_rules(&self, token: &Token) -> bool {
        let Some(adjusted) = self.adjusted_current_node() else {
            return false;
        };

        if adjusted.namespace() == Some(Namespace::Html) || adjusted.namespace().is_none() {
            return false;
        }

        if matches!(token, Token::EndOfFile) {
            return false;
        }

        if Self::is_mathml_text_integration_point(&adjusted) {
            match token {
                Token::Tag(tag)
                    if tag.opening
                        && tag.name != interned!("mglyph")
                        && tag.name != interned!("malignmark") =>
                {
                    return false;
                },
                Token::Character(_) => return false,
                _ => {},
            }
        }

        if adjusted.is_element_in(Namespace::MathML, interned!("annotation-xml")) {
            if let Token::Tag(tag) = token {
                if tag.opening && tag.name == interned!("svg") {
                    return false;
                }
            }
        }

        if Self::is_html_integration_point(&adjusted) {
            match token {
                Token::Tag(tag) if tag.opening => return false,
                Token::Character(_) => return false,
                _ => {},
            }
        }

        true
    }
}

impl<P: ParseErrorHandler> Parser<P> {
    /// <https://html.spec.whatwg.org/multipage/parsing.html#appropriate-place-for-inserting-a-node>
    fn appropriate_place_for_inserting_node(&self) -> InsertionLocation {
        self.appropriate_place_with_override(None)
    }

    /// <https://html.spec.whatwg.org/multipage/parsing.html#appropriate-place-for-inserting-a-node>
    fn appropriate_place_with_override(
        &self,
        override_target: Option<DomPtr>,
    ) -> InsertionLocation {
        let target = override_target.unwrap_or_else(|| self.current_node());

        let table_family = [
            interned!("table"),
            interned!("tbody"),
            interned!("tfoot"),
            interned!("thead"),
            interned!("tr"),
        ];

        let mut adjusted_insertion_location =
            if self.foster_parenting && target.is_html_element_of(&table_family) {
                self.foster_parented_insertion_location()
            } else {
                // Inside target, after its last child.
                InsertionLocation::append_to(target)
            };

        // If the location is inside a template element, redirect into its
        // template contents.
        if adjusted_insertion_location
            .parent
            .is_html_element(interned!("template"))
        {
            if let Some(contents) = Self::template_contents(&adjusted_insertion_location.parent)
            {
                adjusted_insertion_location = InsertionLocation::append_to(contents);
            }
        }

        adjusted_insertion_location
    }

    /// The table-family branch of the algorithm above: place the node
    /// before the last open table (or in the template contents, or under
    /// the root in the fragment case).
    fn foster_parented_insertion_location(&self) -> InsertionLocation {
        let last_template = self
            .open_elements
            .list()
            .iter()
            .enumerate()
            .rev()
            .find(|(_, node)| node.is_html_element(interned!("template")));
        let last_table = self
            .open_elements
            .list()
            .iter()
            .enumerate()
            .rev()
            .find(|(_, node)| node.is_html_element(interned!("table")));

        if let Some((template_index, template)) = &last_template {
            let template_is_lower = last_table
                .as_ref()
                .map_or(true, |(table_index, _)| template_index > table_index);
            if template_is_lower {
                if let Some(contents) = Self::template_contents(template) {
                    return InsertionLocation::append_to(contents);
                }
            }
        }

        let Some((_, table)) = last_table else {
            // Fragment case: inside the root element.
            let root = self
                .open_elements
                .top_node()
                .expect("foster parenting requires an open table-family element");
            return InsertionLocation::append_to(root);
        };

        if let Some(table_parent) = table.parent() {
            let index = Node::index_of_child(&table_parent, table)
                .expect("table is a child of its parent");
            return InsertionLocation::before(table_parent, index);
        }

        // The table has no parent; insert inside the element above it.
        let table_index = self
            .open_elements
            .find(table)
            .expect("last table is on the stack");
        let previous = self
            .open_elements
            .nth(table_index - 1)
            .expect("the html root is above any table");
        InsertionLocation::append_to(previous)
    }

    fn template_contents(template: &DomPtr) -> Option<DomPtr> {
        template
            .borrow()
            .as_element()
            .and_then(|element| element.template_contents())
    }

    /// <https://html.spec.whatwg.org/multipage/parsing.html#insert-a-character>
    fn insert_character(&mut self, c: char) {
        let adjusted_insertion_location = self.appropriate_place_for_inserting_node();

        // Characters must not end up in a Document node.
        if adjusted_insertion_location.parent.is_document() {
            return;
        }

        // If there is a Text node immediately before the insertion
        // location, append to its data instead of creating a new node.
        if let Some(before) = adjusted_insertion_location.node_immediately_before() {
            if before.is_text() {
                let mut node = before.borrow_mut();
                if let Some(data) = node.as_character_data_mut() {
                    data.content_mut().push(c);
                    return;
                }
            }
        }

        let owning_document = adjusted_insertion_location
            .parent
            .borrow()
            .owning_document()
            .map(|document| document.downgrade());

        let mut data = CharacterData::default();
        data.content_mut().push(c);
        let new_node = DomPtr::new(Node::new(NodeKind::Text(data)));
        if let Some(document) = owning_document {
            new_node.borrow_mut().set_owning_document(document);
        }
        adjusted_insertion_location.insert(new_node);
    }

    /// <https://html.spec.whatwg.org/multipage/parsing.html#insert-a-comment>
    fn insert_comment_at(&mut self, data: String, position: Option<InsertionLocation>) {
        let adjusted_insertion_location =
            position.unwrap_or_else(|| self.appropriate_place_for_inserting_node());

        let owning_document = adjusted_insertion_location
            .parent
            .borrow()
            .owning_document()
            .map(|document| document.downgrade());

        let new_node = DomPtr::new(Node::new(NodeKind::Comment(CharacterData::new(data))));
        if let Some(document) = owning_document {
            new_node.borrow_mut().set_owning_document(document);
        }
        adjusted_insertion_location.insert(new_node);
    }

    fn insert_comment(&mut self, data: String) {
        self.insert_comment_at(data, None);
    }

    /// Insert a comment as the last child of the Document object.
    fn insert_comment_into_document(&mut self, data: String) {
        let location = InsertionLocation::append_to(self.document.clone());
        self.insert_comment_at(data, Some(location));
    }

    /// <https://html.spec.whatwg.org/multipage/parsing.html#create-an-element-for-the-token>
    fn create_element_for_token(
        &self,
        tag: &TagData,
        namespace: Namespace,
        intended_parent: &DomPtr,
    ) -> DomPtr {
        // Let document be the intended parent's node document.
        let document = intended_parent
            .borrow()
            .owning_document()
            .expect("intended parent does not belong to a document");

        // The "is" attribute feeds the custom element definition lookup,
        // which always comes back empty here.
        let is = tag.lookup_attribute(interned!("is"));
        let _definition = dom::lookup_custom_element_definition(namespace, tag.name, is);

        let element = create_element(document.downgrade(), tag.name, namespace, None, is);

        // Append each attribute in the given token to element.
        {
            let mut node = element.borrow_mut();
            let element_data = node.as_element_mut().expect("create_element returns elements");
            for (name, value) in tag.attributes.iter() {
                element_data.append_attribute(*name, *value);
            }
        }

        element
    }

    /// <https://html.spec.whatwg.org/multipage/parsing.html#insert-an-html-element>
    fn insert_html_element_for_token(&mut self, tag: &TagData) -> DomPtr {
        self.insert_foreign_element(tag, Namespace::Html)
    }

    /// <https://html.spec.whatwg.org/multipage/parsing.html#insert-a-foreign-element>
    fn insert_foreign_element(&mut self, tag: &TagData, namespace: Namespace) -> DomPtr {
        let adjusted_insertion_location = self.appropriate_place_for_inserting_node();
        let element =
            self.create_element_for_token(tag, namespace, &adjusted_insertion_location.parent);

        adjusted_insertion_location.insert(element.clone());
        self.open_elements.push(element.clone());
        element
    }

    /// Insert an element for a void tag: push, insert, pop immediately and
    /// acknowledge the self-closing flag.
    fn insert_void_element(&mut self, tag: &TagData) {
        self.insert_html_element_for_token(tag);
        self.open_elements.pop();
        self.acknowledge_self_closing_flag(tag);
    }

    /// <https://html.spec.whatwg.org/multipage/parsing.html#parsing-elements-that-contain-only-text>
    fn generic_parsing_algorithm(&mut self, tag: &TagData, algorithm: GenericParsingAlgorithm) {
        self.insert_html_element_for_token(tag);

        match algorithm {
            GenericParsingAlgorithm::RawText => {
                self.tokenizer.switch_to(TokenizerState::Rawtext)
            },
            GenericParsingAlgorithm::Rcdata => self.tokenizer.switch_to(TokenizerState::Rcdata),
        }

        self.original_insertion_mode = Some(self.insertion_mode);
        self.insertion_mode = InsertionMode::Text;
    }

    /// <https://html.spec.whatwg.org/multipage/parsing.html#generate-implied-end-tags>
    fn generate_implied_end_tags(&mut self) {
        self.generate_implied_end_tags_excluding(None);
    }

    /// <https://html.spec.whatwg.org/multipage/parsing.html#generate-implied-end-tags>
    fn generate_implied_end_tags_excluding(&mut self, exclude: Option<InternedString>) {
        let implied = [
            interned!("dd"),
            interned!("dt"),
            interned!("li"),
            interned!("optgroup"),
            interned!("option"),
            interned!("p"),
            interned!("rb"),
            interned!("rp"),
            interned!("rt"),
            interned!("rtc"),
        ];

        loop {
            let current = self.current_node();
            let closes = current.is_html_element_of(&implied)
                && !exclude.is_some_and(|name| current.is_html_element(name));
            if !closes {
                return;
            }
            self.open_elements.pop();
        }
    }

    /// <https://html.spec.whatwg.org/multipage/parsing.html#generate-all-implied-end-tags-thoroughly>
    fn generate_implied_end_tags_thoroughly(&mut self) {
        let implied = [
            interned!("caption"),
            interned!("colgroup"),
            interned!("dd"),
            interned!("dt"),
            interned!("li"),
            interned!("optgroup"),
            interned!("option"),
            interned!("p"),
            interned!("rb"),
            interned!("rp"),
            interned!("rt"),
            interned!("rtc"),
            interned!("tbody"),
            interned!("td"),
            interned!("tfoot"),
            interned!("th"),
            interned!("thead"),
            interned!("tr"),
        ];

        while self.current_node().is_html_element_of(&implied) {
            self.open_elements.pop();
        }
    }

    /// <https://html.spec.whatwg.org/multipage/parsing.html#close-a-p-element>
    fn close_p_element(&mut self) {
        self.generate_implied_end_tags_excluding(Some(interned!("p")));

        if !self.current_node().is_html_element(interned!("p")) {
            self.parse_error(HtmlParseError::TreeConstruction);
        }

        while let Some(popped) = self.open_elements.pop() {
            if popped.is_html_element(interned!("p")) {
                break;
            }
        }
    }

    /// <https://html.spec.whatwg.org/multipage/parsing.html#close-the-cell>
    fn close_the_cell(&mut self) {
        self.generate_implied_end_tags();

        let cell_names = [interned!("td"), interned!("th")];
        if !self.current_node().is_html_element_of(&cell_names) {
            self.parse_error(HtmlParseError::TreeConstruction);
        }

        while let Some(popped) = self.open_elements.pop() {
            if popped.is_html_element_of(&cell_names) {
                break;
            }
        }

        self.active_formatting_elements.clear_up_to_last_marker();
        self.insertion_mode = InsertionMode::InRow;
    }

    /// <https://html.spec.whatwg.org/multipage/parsing.html#clear-the-stack-back-to-a-table-context>
    fn clear_stack_back_to_table_context(&mut self) {
        let context = [
            interned!("table"),
            interned!("template"),
            interned!("html"),
        ];
        while !self.current_node().is_html_element_of(&context) {
            self.open_elements.pop();
        }
    }

    /// <https://html.spec.whatwg.org/multipage/parsing.html#clear-the-stack-back-to-a-table-body-context>
    fn clear_stack_back_to_table_body_context(&mut self) {
        let context = [
            interned!("tbody"),
            interned!("tfoot"),
            interned!("thead"),
            interned!("template"),
            interned!("html"),
        ];
        while !self.current_node().is_html_element_of(&context) {
            self.open_elements.pop();
        }
    }

    /// <https://html.spec.whatwg.org/multipage/parsing.html#clear-the-stack-back-to-a-table-row-context>
    fn clear_stack_back_to_table_row_context(&mut self) {
        let context = [interned!("tr"), interned!("template"), interned!("html")];
        while !self.current_node().is_html_element_of(&context) {
            self.open_elements.pop();
        }
    }

    /// <https://html.spec.whatwg.org/multipage/parsing.html#current-template-insertion-mode>
    #[must_use]
    fn current_template_insertion_mode(&self) -> InsertionMode {
        *self
            .template_insertion_modes
            .last()
            .expect("stack of template insertion modes is empty")
    }

    /// <https://html.spec.whatwg.org/multipage/parsing.html#reset-the-insertion-mode-appropriately>
    fn reset_insertion_mode_appropriately(&mut self) {
        let mut last = false;
        let mut node_index = self.open_elements.len() - 1;

        loop {
            let mut node = self
                .open_elements
                .nth(node_index)
                .expect("node index is in bounds");

            if node_index == 0 {
                last = true;
                if let Some(context) = &self.fragment_context {
                    node = context.clone();
                }
            }

            if node.is_html_element(interned!("select")) {
                if !last {
                    // Walk the ancestors for a table, stopping at a
                    // template.
                    let mut ancestor_index = node_index;
                    while ancestor_index > 0 {
                        ancestor_index -= 1;
                        let ancestor = self
                            .open_elements
                            .nth(ancestor_index)
                            .expect("ancestor index is in bounds");
                        if ancestor.is_html_element(interned!("template")) {
                            break;
                        }
                        if ancestor.is_html_element(interned!("table")) {
                            self.insertion_mode = InsertionMode::InSelectInTable;
                            return;
                        }
                    }
                }
                self.insertion_mode = InsertionMode::InSelect;
                return;
            }

            if node.is_html_element_of(&[interned!("td"), interned!("th")]) && !last {
                self.insertion_mode = InsertionMode::InCell;
                return;
            }
            if node.is_html_element(interned!("tr")) {
                self.insertion_mode = InsertionMode::InRow;
                return;
            }
            if node.is_html_element_of(&[
                interned!("tbody"),
                interned!("thead"),
                interned!("tfoot"),
            ]) {
                self.insertion_mode = InsertionMode::InTableBody;
                return;
            }
            if node.is_html_element(interned!("caption")) {
                self.insertion_mode = InsertionMode::InCaption;
                return;
            }
            if node.is_html_element(interned!("colgroup")) {
                self.insertion_mode = InsertionMode::InColumnGroup;
                return;
            }
            if node.is_html_element(interned!("table")) {
                self.insertion_mode = InsertionMode::InTable;
                return;
            }
            if node.is_html_element(interned!("template")) {
                self.insertion_mode = self.current_template_insertion_mode();
                return;
            }
            if node.is_html_element(interned!("head")) && !last {
                self.insertion_mode = InsertionMode::InHead;
                return;
            }
            if node.is_html_element(interned!("body")) {
                self.insertion_mode = InsertionMode::InBody;
                return;
            }
            if node.is_html_element(interned!("frameset")) {
                self.insertion_mode = InsertionMode::InFrameset;
                return;
            }
            if node.is_html_element(interned!("html")) {
                if self.head.is_none() {
                    self.insertion_mode = InsertionMode::BeforeHead;
                } else {
                    self.insertion_mode = InsertionMode::AfterHead;
                }
                return;
            }
            if last {
                self.insertion_mode = InsertionMode::InBody;
                return;
            }

            node_index -= 1;
        }
    }

    /// <https://html.spec.whatwg.org/multipage/parsing.html#stop-parsing>
    fn stop_parsing(&mut self) {
        // Script execution would happen here; nothing does.
        self.open_elements.clear();

        self.document
            .borrow_mut()
            .as_document_mut()
            .expect("parser document node is a Document")
            .set_readiness(DocumentReadiness::Complete);

        self.done = true;
    }

    /// The quirks-mode determination of the "initial" insertion mode.
    fn quirks_mode_for_doctype(doctype: &Doctype) -> QuirksMode {
        let name = doctype.name.map(|name| name.as_str()).unwrap_or("");
        let public_id = doctype.public_ident.map(|ident| ident.as_str());
        let system_id = doctype.system_ident.map(|ident| ident.as_str());

        let public_starts_with = |prefixes: &[&str]| {
            public_id.is_some_and(|id| {
                prefixes.iter().any(|prefix| {
                    id.get(..prefix.len())
                        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
                })
            })
        };

        let frameset_or_transitional = [
            "-//W3C//DTD HTML 4.01 Frameset//",
            "-//W3C//DTD HTML 4.01 Transitional//",
        ];

        let full_quirks = doctype.force_quirks
            || !name.eq_ignore_ascii_case("html")
            || public_id.is_some_and(|id| {
                QUIRKY_PUBLIC_IDS
                    .iter()
                    .any(|quirky| id.eq_ignore_ascii_case(quirky))
            })
            || system_id.is_some_and(|id| {
                id.eq_ignore_ascii_case(
                    "http://www.ibm.com/data/dtd/v11/ibmxhtml1-transitional.dtd",
                )
            })
            || public_starts_with(QUIRKY_PUBLIC_ID_PREFIXES)
            || (system_id.is_none() && public_starts_with(&frameset_or_transitional));

        if full_quirks {
            return QuirksMode::Quirks;
        }

        let limited_quirks = public_starts_with(&[
            "-//W3C//DTD XHTML 1.0 Frameset//",
            "-//W3C//DTD XHTML 1.0 Transitional//",
        ]) || (system_id.is_some() && public_starts_with(&frameset_or_transitional));

        if limited_quirks {
            QuirksMode::LimitedQuirks
        } else {
            QuirksMode::NoQuirks
        }
    }

    fn set_quirks_mode(&mut self, mode: QuirksMode) {
        self.document
            .borrow_mut()
            .as_document_mut()
            .expect("parser document node is a Document")
            .set_quirks_mode(mode);
    }

    #[must_use]
    fn quirks_mode(&self) -> QuirksMode {
        self.document
            .borrow()
            .as_document()
            .expect("parser document node is a Document")
            .quirks_mode()
    }
}

/// Public identifiers that force quirks mode when matched exactly.
static QUIRKY_PUBLIC_IDS: &[&str] = &[
    "-//W3O//DTD W3 HTML Strict 3.0//EN//",
    "-/W3C/DTD HTML 4.0 Transitional/EN",
    "HTML",
];

/// Public identifier prefixes that force quirks mode.
static QUIRKY_PUBLIC_ID_PREFIXES: &[&str] = &[
    "+//Silmaril//dtd html Pro v0r11 19970101//",
    "-//AS//DTD HTML 3.0 asWedit + extensions//",
    "-//AdvaSoft Ltd//DTD HTML 3.0 asWedit + extensions//",
    "-//IETF//DTD HTML 2.0 Level 1//",
    "-//IETF//DTD HTML 2.0 Level 2//",
    "-//IETF//DTD HTML 2.0 Strict Level 1//",
    "-//IETF//DTD HTML 2.0 Strict Level 2//",
    "-//IETF//DTD HTML 2.0 Strict//",
    "-//IETF//DTD HTML 2.0//",
    "-//IETF//DTD HTML 2.1E//",
    "-//IETF//DTD HTML 3.0//",
    "-//IETF//DTD HTML 3.2 Final//",
    "-//IETF//DTD HTML 3.2//",
    "-//IETF//DTD HTML 3//",
    "-//IETF//DTD HTML Level 0//",
    "-//IETF//DTD HTML Level 1//",
    "-//IETF//DTD HTML Level 2//",
    "-//IETF//DTD HTML Level 3//",
    "-//IETF//DTD HTML Strict Level 0//",
    "-//IETF//DTD HTML Strict Level 1//",
    "-//IETF//DTD HTML Strict Level 2//",
    "-//IETF//DTD HTML Strict Level 3//",
    "-//IETF//DTD HTML Strict//",
    "-//IETF//DTD HTML//",
    "-//Metrius//DTD Metrius Presentational//",
    "-//Microsoft//DTD Internet Explorer 2.0 HTML Strict//",
    "-//Microsoft//DTD Internet Explorer 2.0 HTML//",
    "-//Microsoft//DTD Internet Explorer 2.0 Tables//",
    "-//Microsoft//DTD Internet Explorer 3.0 HTML Strict//",
    "-//Microsoft//DTD Internet Explorer 3.0 HTML//",
    "-//Microsoft//DTD Internet Explorer 3.0 Tables//",
    "-//Netscape Comm. Corp.//DTD HTML//",
    "-//Netscape Comm. Corp.//DTD Strict HTML//",
    "-//O'Reilly and Associates//DTD HTML 2.0//",
    "-//O'Reilly and Associates//DTD HTML Extended 1.0//",
    "-//O'Reilly and Associates//DTD HTML Extended Relaxed 1.0//",
    "-//SQ//DTD HTML 2.0 HoTMetaL + extensions//",
    "-//SoftQuad Software//DTD HoTMetaL PRO 6.0::19990601::extensions to HTML 4.0//",
    "-//SoftQuad//DTD HoTMetaL PRO 4.0::19971010::extensions to HTML 4.0//",
    "-//Spyglass//DTD HTML 2.0 Extended//",
    "-//Sun Microsystems Corp.//DTD HotJava HTML//",
    "-//Sun Microsystems Corp.//DTD HotJava Strict HTML//",
    "-//W3C//DTD HTML 3 1995-03-24//",
    "-//W3C//DTD HTML 3.2 Draft//",
    "-//W3C//DTD HTML 3.2 Final//",
    "-//W3C//DTD HTML 3.2//",
    "-//W3C//DTD HTML 3.2S Draft//",
    "-//W3C//DTD HTML 4.0 Frameset//",
    "-//W3C//DTD HTML 4.0 Transitional//",
    "-//W3C//DTD HTML Experimental 19960712//",
    "-//W3C//DTD HTML Experimental 970421//",
    "-//W3C//DTD W3 HTML//",
    "-//W3O//DTD W3 HTML 3.0//",
    "-//WebTechs//DTD Mozilla HTML 2.0//",
    "-//WebTechs//DTD Mozilla HTML//",
];

impl<P: ParseErrorHandler> Parser<P> {
    fn is_marker_or_open(entry: &FormatEntry, open_elements: &StackOfOpenElements) -> bool {
        match entry {
            FormatEntry::Marker => true,
            FormatEntry::Element(formatting_element) => {
                open_elements.contains_node(&formatting_element.element)
            },
        }
    }

    /// <https://html.spec.whatwg.org/multipage/parsing.html#reconstruct-the-active-formatting-elements>
    fn reconstruct_active_formatting_elements(&mut self) {
        // Nothing to do if the list is empty or ends in a marker or an
        // element that is still open.
        let Some(last_entry) = self.active_formatting_elements.last() else {
            return;
        };
        if Self::is_marker_or_open(last_entry, &self.open_elements) {
            return;
        }

        // Rewind to just after the last marker-or-open entry.
        let mut entry_index = self.active_formatting_elements.len() - 1;
        while entry_index > 0 {
            entry_index -= 1;
            if Self::is_marker_or_open(
                self.active_formatting_elements.entry(entry_index),
                &self.open_elements,
            ) {
                entry_index += 1;
                break;
            }
        }

        // Create: re-open every entry from here to the end of the list.
        loop {
            let tag = self
                .active_formatting_elements
                .entry(entry_index)
                .as_element()
                .expect("rewind never stops on a marker")
                .tag
                .clone();

            let new_element = self.insert_html_element_for_token(&tag);
            self.active_formatting_elements
                .replace_at(entry_index, new_element, tag);

            if entry_index == self.active_formatting_elements.len() - 1 {
                break;
            }
            entry_index += 1;
        }
    }

    /// The "any other end tag" steps of the InBody insertion mode.
    fn any_other_end_tag_in_body(&mut self, tag: &TagData) {
        let mut node_index = self.open_elements.len() - 1;

        loop {
            let node = self
                .open_elements
                .nth(node_index)
                .expect("node index is in bounds");

            if node.is_html_element(tag.name) {
                self.generate_implied_end_tags_excluding(Some(tag.name));

                if !node.ptr_eq(&self.current_node()) {
                    self.parse_error(HtmlParseError::TreeConstruction);
                }

                while let Some(popped) = self.open_elements.pop() {
                    if popped.ptr_eq(&node) {
                        break;
                    }
                }
                return;
            }

            if is_special(
                node.namespace().unwrap_or_default(),
                node.local_name().unwrap_or_default(),
            ) {
                self.parse_error(HtmlParseError::TreeConstruction);
                return;
            }

            // The html root is special, so this cannot underflow.
            node_index -= 1;
        }
    }

    /// <https://html.spec.whatwg.org/multipage/parsing.html#adoption-agency-algorithm>
    fn run_adoption_agency_algorithm(&mut self, tag: &TagData) {
        // 1. Let subject be token's tag name.
        let subject = tag.name;

        // 2. If the current node is an HTML element with that name and not
        //    in the list of active formatting elements, pop it and return.
        let current_node = self.current_node();
        if current_node.is_html_element(subject)
            && !self.active_formatting_elements.contains(&current_node)
        {
            self.open_elements.pop();
            return;
        }

        // 3.-4. Up to eight outer iterations.
        for _ in 0..8 {
            // Find the last formatting element with the subject's name
            // between the end of the list and the last marker.
            let found = self
                .active_formatting_elements
                .elements_since_last_marker()
                .find(|(_, formatting_element)| {
                    formatting_element.element.is_html_element(subject)
                })
                .map(|(index, formatting_element)| (index, formatting_element.clone()));

            let Some((formatting_index, formatting_element)) = found else {
                // No such element: act as "any other end tag".
                self.any_other_end_tag_in_body(tag);
                return;
            };

            // If the formatting element is not on the stack of open
            // elements, it is stale: remove it from the list and return.
            let Some(stack_index) = self.open_elements.find(&formatting_element.element) else {
                self.parse_error(HtmlParseError::TreeConstruction);
                self.active_formatting_elements.remove_at(formatting_index);
                return;
            };

            // On the stack, but not in scope.
            if !self
                .open_elements
                .has_node_in_scope(&formatting_element.element, Scope::Default)
            {
                self.parse_error(HtmlParseError::TreeConstruction);
                return;
            }

            if !formatting_element.element.ptr_eq(&self.current_node()) {
                self.parse_error(HtmlParseError::TreeConstruction);
                // Do not return.
            }

            // The furthest block: the topmost special element below the
            // formatting element.
            let furthest_block = self.open_elements.list()[stack_index + 1..]
                .iter()
                .enumerate()
                .find(|(_, node)| {
                    is_special(
                        node.namespace().unwrap_or_default(),
                        node.local_name().unwrap_or_default(),
                    )
                })
                .map(|(offset, node)| (stack_index + 1 + offset, node.clone()));

            let Some((furthest_block_index, furthest_block)) = furthest_block else {
                // No furthest block: pop through the formatting element
                // and drop it from the list.
                while let Some(popped) = self.open_elements.pop() {
                    if popped.ptr_eq(&formatting_element.element) {
                        break;
                    }
                }
                self.active_formatting_elements
                    .remove(&formatting_element.element);
                return;
            };

            // The common ancestor is the element immediately above the
            // formatting element on the stack.
            let common_ancestor = self
                .open_elements
                .nth(stack_index - 1)
                .expect("formatting element is not the stack bottom");

            // A bookmark for where the clone will go in the list.
            let mut bookmark = formatting_index;

            // Walk upwards from the furthest block, cloning every node
            // that stays in the list of active formatting elements.
            let mut node_index = furthest_block_index;
            let mut last_node = furthest_block.clone();

            let mut inner_loop_counter = 0;
            loop {
                inner_loop_counter += 1;

                node_index -= 1;
                let mut node = self
                    .open_elements
                    .nth(node_index)
                    .expect("walk stays below the stack bottom");

                if node.ptr_eq(&formatting_element.element) {
                    break;
                }

                if inner_loop_counter > 3 {
                    if let Some(list_index) = self.active_formatting_elements.find(&node) {
                        self.active_formatting_elements.remove_at(list_index);
                        if list_index < bookmark {
                            bookmark -= 1;
                        }
                    }
                }

                let Some(node_list_index) = self.active_formatting_elements.find(&node) else {
                    // Not a formatting element (anymore): drop it from the
                    // stack and continue with the element above it.
                    self.open_elements.remove(&node);
                    continue;
                };

                // Replace the node with a fresh clone in both structures.
                let node_tag = self
                    .active_formatting_elements
                    .entry(node_list_index)
                    .as_element()
                    .expect("found via find")
                    .tag
                    .clone();
                let new_element =
                    self.create_element_for_token(&node_tag, Namespace::Html, &common_ancestor);
                self.active_formatting_elements.replace_at(
                    node_list_index,
                    new_element.clone(),
                    node_tag,
                );
                self.open_elements.replace_at(node_index, new_element.clone());
                node = new_element;

                // If last node is the furthest block, move the bookmark to
                // just after the new entry.
                if last_node.ptr_eq(&furthest_block) {
                    bookmark = node_list_index + 1;
                }

                Node::append_child(node.clone(), last_node);
                last_node = node;
            }

            // Place whatever last node ended up being at the appropriate
            // place, with the common ancestor as the override target.
            Node::detach(&last_node);
            let place = self.appropriate_place_with_override(Some(common_ancestor));
            place.insert(last_node);

            // Clone the formatting element and move the furthest block's
            // children into the clone.
            let new_element = self.create_element_for_token(
                &formatting_element.tag,
                Namespace::Html,
                &furthest_block,
            );

            let children: Vec<DomPtr> = furthest_block.borrow().children().to_vec();
            for child in children {
                Node::append_child(new_element.clone(), child);
            }
            Node::append_child(furthest_block.clone(), new_element.clone());

            // Swap the formatting element for the clone in the list, at
            // the bookmark.
            if let Some(old_index) = self
                .active_formatting_elements
                .find(&formatting_element.element)
            {
                self.active_formatting_elements.remove_at(old_index);
                if old_index < bookmark {
                    bookmark -= 1;
                }
            }
            let bookmark = bookmark.min(self.active_formatting_elements.len());
            self.active_formatting_elements.insert_at(
                bookmark,
                new_element.clone(),
                formatting_element.tag.clone(),
            );

            // And in the stack, immediately below the furthest block.
            self.open_elements.remove(&formatting_element.element);
            let furthest_block_index = self
                .open_elements
                .find(&furthest_block)
                .expect("furthest block is still open");
            self.open_elements
                .insert_at(furthest_block_index + 1, new_element);
        }
    }
}

impl<P: ParseErrorHandler> Parser<P> {
    /// <https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhtml>
    fn consume_in_mode(&mut self, mode: InsertionMode, token: Token) {
        log::trace!(
            "consuming {token:?} in {mode:?}, current node {:?}",
            self.open_elements
                .bottommost_node()
                .and_then(|node| node.local_name())
        );

        match mode {
            // https://html.spec.whatwg.org/multipage/parsing.html#the-initial-insertion-mode
            InsertionMode::Initial => match token {
                Token::Character(TAB | LINE_FEED | FORM_FEED | WHITESPACE) => {
                    // Ignore the token.
                },
                Token::Comment(data) => {
                    self.insert_comment_into_document(data);
                },
                Token::Doctype(doctype) => {
                    let name_is_html = doctype
                        .name
                        .is_some_and(|name| name == interned!("html"));
                    let acceptable_system_ident = match doctype.system_ident {
                        None => true,
                        Some(ident) => ident.as_str() == "about:legacy-compat",
                    };
                    if !name_is_html
                        || doctype.public_ident.is_some()
                        || !acceptable_system_ident
                    {
                        self.parse_error(HtmlParseError::TreeConstruction);
                    }

                    // Append a DocumentType node to the Document.
                    let doctype_node = DocumentType::new(
                        doctype.name.unwrap_or_default(),
                        doctype.public_ident.unwrap_or_default(),
                        doctype.system_ident.unwrap_or_default(),
                    );
                    let new_node =
                        DomPtr::new(Node::new(NodeKind::DocumentType(doctype_node)));
                    new_node
                        .borrow_mut()
                        .set_owning_document(self.document.downgrade());
                    Node::append_child(self.document.clone(), new_node);

                    self.set_quirks_mode(Self::quirks_mode_for_doctype(&doctype));

                    self.insertion_mode = InsertionMode::BeforeHtml;
                },
                other => {
                    // Missing doctype: quirks mode.
                    self.parse_error(HtmlParseError::TreeConstruction);
                    self.set_quirks_mode(QuirksMode::Quirks);

                    self.insertion_mode = InsertionMode::BeforeHtml;
                    self.consume(other);
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#the-before-html-insertion-mode
            InsertionMode::BeforeHtml => match token {
                Token::Doctype(_) => {
                    self.parse_error(HtmlParseError::TreeConstruction);
                },
                Token::Comment(data) => {
                    self.insert_comment_into_document(data);
                },
                Token::Character(TAB | LINE_FEED | FORM_FEED | WHITESPACE) => {
                    // Ignore the token.
                },
                Token::Tag(ref tag) if tag.opening && tag.name == interned!("html") => {
                    // Create an element for the token with the Document as
                    // the intended parent and make it the root.
                    let element =
                        self.create_element_for_token(tag, Namespace::Html, &self.document);
                    Node::append_child(self.document.clone(), element.clone());
                    self.open_elements.push(element);
                    self.insertion_mode = InsertionMode::BeforeHead;
                },
                Token::Tag(ref tag)
                    if !tag.opening
                        && tag.name != interned!("head")
                        && tag.name != interned!("body")
                        && tag.name != interned!("html")
                        && tag.name != interned!("br") =>
                {
                    self.parse_error(HtmlParseError::TreeConstruction);
                },
                other => {
                    // Fabricate the html root, then reprocess.
                    let element = create_element(
                        self.document.downgrade(),
                        interned!("html"),
                        Namespace::Html,
                        None,
                        None,
                    );
                    Node::append_child(self.document.clone(), element.clone());
                    self.open_elements.push(element);

                    self.insertion_mode = InsertionMode::BeforeHead;
                    self.consume(other);
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#the-before-head-insertion-mode
            InsertionMode::BeforeHead => match token {
                Token::Character(TAB | LINE_FEED | FORM_FEED | WHITESPACE) => {
                    // Ignore the token.
                },
                Token::Comment(data) => {
                    self.insert_comment(data);
                },
                Token::Doctype(_) => {
                    self.parse_error(HtmlParseError::TreeConstruction);
                },
                Token::Tag(ref tag) if tag.opening && tag.name == interned!("html") => {
                    self.consume_in_mode(InsertionMode::InBody, token);
                },
                Token::Tag(ref tag) if tag.opening && tag.name == interned!("head") => {
                    let head = self.insert_html_element_for_token(tag);
                    self.remember_head(head);
                    self.insertion_mode = InsertionMode::InHead;
                },
                Token::Tag(ref tag)
                    if !tag.opening
                        && tag.name != interned!("head")
                        && tag.name != interned!("body")
                        && tag.name != interned!("html")
                        && tag.name != interned!("br") =>
                {
                    self.parse_error(HtmlParseError::TreeConstruction);
                },
                other => {
                    let head =
                        self.insert_html_element_for_token(&TagData::synthetic(interned!("head")));
                    self.remember_head(head);
                    self.insertion_mode = InsertionMode::InHead;
                    self.consume(other);
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhead
            InsertionMode::InHead => match token {
                Token::Character(c @ (TAB | LINE_FEED | FORM_FEED | WHITESPACE)) => {
                    self.insert_character(c);
                },
                Token::Comment(data) => {
                    self.insert_comment(data);
                },
                Token::Doctype(_) => {
                    self.parse_error(HtmlParseError::TreeConstruction);
                },
                Token::Tag(ref tag) if tag.opening && tag.name == interned!("html") => {
                    self.consume_in_mode(InsertionMode::InBody, token);
                },
                Token::Tag(ref tag)
                    if tag.opening
                        && (tag.name == interned!("base")
                            || tag.name == interned!("basefont")
                            || tag.name == interned!("bgsound")
                            || tag.name == interned!("link")
                            || tag.name == interned!("meta")) =>
                {
                    // The encoding-changing behaviour of <meta> does not
                    // apply; input is already decoded.
                    self.insert_void_element(tag);
                },
                Token::Tag(ref tag) if tag.opening && tag.name == interned!("title") => {
                    self.generic_parsing_algorithm(tag, GenericParsingAlgorithm::Rcdata);
                },
                Token::Tag(ref tag)
                    if tag.opening
                        && (tag.name == interned!("noframes")
                            || tag.name == interned!("style")
                            || (tag.name == interned!("noscript")
                                && self.scripting_enabled())) =>
                {
                    self.generic_parsing_algorithm(tag, GenericParsingAlgorithm::RawText);
                },
                Token::Tag(ref tag) if tag.opening && tag.name == interned!("noscript") => {
                    self.insert_html_element_for_token(tag);
                    self.insertion_mode = InsertionMode::InHeadNoscript;
                },
                Token::Tag(ref tag) if tag.opening && tag.name == interned!("script") => {
                    // The script element is created and filled in, but
                    // never executed.
                    let adjusted_insertion_location =
                        self.appropriate_place_for_inserting_node();
                    let element = self.create_element_for_token(
                        tag,
                        Namespace::Html,
                        &adjusted_insertion_location.parent,
                    );
                    adjusted_insertion_location.insert(element.clone());
                    self.open_elements.push(element);

                    self.tokenizer.switch_to(TokenizerState::ScriptData);
                    self.original_insertion_mode = Some(self.insertion_mode);
                    self.insertion_mode = InsertionMode::Text;
                },
                Token::Tag(ref tag) if !tag.opening && tag.name == interned!("head") => {
                    let popped = self.open_elements.pop();
                    debug_assert!(popped.is_some_and(|node| node
                        .is_html_element(interned!("head"))));
                    self.insertion_mode = InsertionMode::AfterHead;
                },
                Token::Tag(ref tag) if tag.opening && tag.name == interned!("template") => {
                    self.insert_html_element_for_token(tag);
                    self.active_formatting_elements.push_marker();
                    self.frameset_ok = FramesetOkFlag::NotOk;
                    self.insertion_mode = InsertionMode::InTemplate;
                    self.template_insertion_modes
                        .push(InsertionMode::InTemplate);
                },
                Token::Tag(ref tag) if !tag.opening && tag.name == interned!("template") => {
                    self.handle_template_end_tag();
                },
                Token::Tag(ref tag)
                    if (tag.opening && tag.name == interned!("head"))
                        || (!tag.opening
                            && tag.name != interned!("body")
                            && tag.name != interned!("html")
                            && tag.name != interned!("br")) =>
                {
                    self.parse_error(HtmlParseError::TreeConstruction);
                },
                other => {
                    // Pop the head element and hand the token to the
                    // "after head" mode.
                    let popped = self.open_elements.pop();
                    debug_assert!(popped.is_some_and(|node| node
                        .is_html_element(interned!("head"))));
                    self.insertion_mode = InsertionMode::AfterHead;
                    self.consume(other);
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inheadnoscript
            InsertionMode::InHeadNoscript => match token {
                Token::Doctype(_) => {
                    self.parse_error(HtmlParseError::TreeConstruction);
                },
                Token::Tag(ref tag) if tag.opening && tag.name == interned!("html") => {
                    self.consume_in_mode(InsertionMode::InBody, token);
                },
                Token::Tag(ref tag) if !tag.opening && tag.name == interned!("noscript") => {
                    let popped = self.open_elements.pop();
                    debug_assert!(popped.is_some_and(|node| node
                        .is_html_element(interned!("noscript"))));
                    self.insertion_mode = InsertionMode::InHead;
                },
                Token::Character(TAB | LINE_FEED | FORM_FEED | WHITESPACE)
                | Token::Comment(_) => {
                    self.consume_in_mode(InsertionMode::InHead, token);
                },
                Token::Tag(ref tag)
                    if tag.opening
                        && (tag.name == interned!("basefont")
                            || tag.name == interned!("bgsound")
                            || tag.name == interned!("link")
                            || tag.name == interned!("meta")
                            || tag.name == interned!("noframes")
                            || tag.name == interned!("style")) =>
                {
                    self.consume_in_mode(InsertionMode::InHead, token);
                },
                Token::Tag(ref tag)
                    if tag.opening
                        && (tag.name == interned!("head")
                            || tag.name == interned!("noscript")) =>
                {
                    self.parse_error(HtmlParseError::TreeConstruction);
                },
                Token::Tag(ref tag) if !tag.opening && tag.name != interned!("br") => {
                    self.parse_error(HtmlParseError::TreeConstruction);
                },
                other => {
                    self.parse_error(HtmlParseError::TreeConstruction);
                    self.open_elements.pop();
                    self.insertion_mode = InsertionMode::InHead;
                    self.consume(other);
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#the-after-head-insertion-mode
            InsertionMode::AfterHead => match token {
                Token::Character(c @ (TAB | LINE_FEED | FORM_FEED | WHITESPACE)) => {
                    self.insert_character(c);
                },
                Token::Comment(data) => {
                    self.insert_comment(data);
                },
                Token::Doctype(_) => {
                    self.parse_error(HtmlParseError::TreeConstruction);
                },
                Token::Tag(ref tag) if tag.opening && tag.name == interned!("html") => {
                    self.consume_in_mode(InsertionMode::InBody, token);
                },
                Token::Tag(ref tag) if tag.opening && tag.name == interned!("body") => {
                    let body = self.insert_html_element_for_token(tag);
                    self.remember_body(body);
                    self.frameset_ok = FramesetOkFlag::NotOk;
                    self.insertion_mode = InsertionMode::InBody;
                },
                Token::Tag(ref tag) if tag.opening && tag.name == interned!("frameset") => {
                    self.insert_html_element_for_token(tag);
                    self.insertion_mode = InsertionMode::InFrameset;
                },
                Token::Tag(ref tag)
                    if tag.opening
                        && (tag.name == interned!("base")
                            || tag.name == interned!("basefont")
                            || tag.name == interned!("bgsound")
                            || tag.name == interned!("link")
                            || tag.name == interned!("meta")
                            || tag.name == interned!("noframes")
                            || tag.name == interned!("script")
                            || tag.name == interned!("style")
                            || tag.name == interned!("template")
                            || tag.name == interned!("title")) =>
                {
                    self.parse_error(HtmlParseError::TreeConstruction);

                    // Re-open the head element for the duration of this
                    // token.
                    let head = self.head.clone().expect("head was parsed in this mode");
                    self.open_elements.push(head.clone());
                    self.consume_in_mode(InsertionMode::InHead, token);
                    self.open_elements.remove(&head);
                },
                Token::Tag(ref tag) if !tag.opening && tag.name == interned!("template") => {
                    self.consume_in_mode(InsertionMode::InHead, token);
                },
                Token::Tag(ref tag)
                    if (tag.opening && tag.name == interned!("head"))
                        || (!tag.opening
                            && tag.name != interned!("body")
                            && tag.name != interned!("html")
                            && tag.name != interned!("br")) =>
                {
                    self.parse_error(HtmlParseError::TreeConstruction);
                },
                other => {
                    let body =
                        self.insert_html_element_for_token(&TagData::synthetic(interned!("body")));
                    self.remember_body(body);
                    self.insertion_mode = InsertionMode::InBody;
                    self.consume(other);
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody
            InsertionMode::InBody => match token {
                Token::Character('\0') => {
                    self.parse_error(HtmlParseError::TreeConstruction);
                },
                Token::Character(c @ (TAB | LINE_FEED | FORM_FEED | WHITESPACE)) => {
                    self.reconstruct_active_formatting_elements();
                    self.insert_character(c);
                },
                Token::Character(c) => {
                    self.reconstruct_active_formatting_elements();
                    self.insert_character(c);
                    self.frameset_ok = FramesetOkFlag::NotOk;
                },
                Token::Comment(data) => {
                    self.insert_comment(data);
                },
                Token::Doctype(_) => {
                    self.parse_error(HtmlParseError::TreeConstruction);
                },
                Token::Tag(ref tag) if tag.opening && tag.name == interned!("html") => {
                    self.parse_error(HtmlParseError::TreeConstruction);

                    if !self.open_elements.contains_html_element(interned!("template")) {
                        // Merge new attributes into the root; existing
                        // ones win.
                        let root = self.open_elements.top_node().expect("stack is not empty");
                        let mut node = root.borrow_mut();
                        if let Some(element) = node.as_element_mut() {
                            for (name, value) in tag.attributes.iter() {
                                element.append_attribute(*name, *value);
                            }
                        }
                    }
                },
                Token::Tag(ref tag)
                    if (tag.opening
                        && (tag.name == interned!("base")
                            || tag.name == interned!("basefont")
                            || tag.name == interned!("bgsound")
                            || tag.name == interned!("link")
                            || tag.name == interned!("meta")
                            || tag.name == interned!("noframes")
                            || tag.name == interned!("script")
                            || tag.name == interned!("style")
                            || tag.name == interned!("template")
                            || tag.name == interned!("title")))
                        || (!tag.opening && tag.name == interned!("template")) =>
                {
                    self.consume_in_mode(InsertionMode::InHead, token);
                },
                Token::Tag(ref tag) if tag.opening && tag.name == interned!("body") => {
                    self.parse_error(HtmlParseError::TreeConstruction);

                    let second = self.open_elements.nth(1);
                    let second_is_body =
                        second.as_ref().is_some_and(|node| node.is_html_element(interned!("body")));
                    if self.open_elements.len() == 1
                        || !second_is_body
                        || self.open_elements.contains_html_element(interned!("template"))
                    {
                        // Fragment case or misplaced token; ignore.
                    } else {
                        self.frameset_ok = FramesetOkFlag::NotOk;
                        let body = second.expect("second element exists");
                        let mut node = body.borrow_mut();
                        if let Some(element) = node.as_element_mut() {
                            for (name, value) in tag.attributes.iter() {
                                element.append_attribute(*name, *value);
                            }
                        }
                    }
                },
                Token::Tag(ref tag) if tag.opening && tag.name == interned!("frameset") => {
                    self.parse_error(HtmlParseError::TreeConstruction);

                    let second_is_body = self
                        .open_elements
                        .nth(1)
                        .is_some_and(|node| node.is_html_element(interned!("body")));

                    if self.open_elements.len() == 1
                        || !second_is_body
                        || self.frameset_ok == FramesetOkFlag::NotOk
                    {
                        // Ignore the token.
                    } else {
                        let body = self.open_elements.nth(1).expect("second element exists");
                        Node::detach(&body);

                        while self.open_elements.len() > 1 {
                            self.open_elements.pop();
                        }

                        self.insert_html_element_for_token(tag);
                        self.insertion_mode = InsertionMode::InFrameset;
                    }
                },
                Token::EndOfFile => {
                    if !self.template_insertion_modes.is_empty() {
                        self.consume_in_mode(InsertionMode::InTemplate, token);
                    } else {
                        if self.stack_has_unexpected_open_elements() {
                            self.parse_error(HtmlParseError::TreeConstruction);
                        }
                        self.stop_parsing();
                    }
                },
                Token::Tag(ref tag) if !tag.opening && tag.name == interned!("body") => {
                    if !self
                        .open_elements
                        .has_element_in_scope(interned!("body"), Scope::Default)
                    {
                        self.parse_error(HtmlParseError::TreeConstruction);
                        return;
                    }

                    if self.stack_has_unexpected_open_elements() {
                        self.parse_error(HtmlParseError::TreeConstruction);
                    }
                    self.insertion_mode = InsertionMode::AfterBody;
                },
                Token::Tag(ref tag) if !tag.opening && tag.name == interned!("html") => {
                    if !self
                        .open_elements
                        .has_element_in_scope(interned!("body"), Scope::Default)
                    {
                        self.parse_error(HtmlParseError::TreeConstruction);
                        return;
                    }

                    if self.stack_has_unexpected_open_elements() {
                        self.parse_error(HtmlParseError::TreeConstruction);
                    }
                    self.insertion_mode = InsertionMode::AfterBody;
                    self.consume(token);
                },
                Token::Tag(ref tag)
                    if tag.opening
                        && [
                            interned!("address"),
                            interned!("article"),
                            interned!("aside"),
                            interned!("blockquote"),
                            interned!("center"),
                            interned!("details"),
                            interned!("dialog"),
                            interned!("dir"),
                            interned!("div"),
                            interned!("dl"),
                            interned!("fieldset"),
                            interned!("figcaption"),
                            interned!("figure"),
                            interned!("footer"),
                            interned!("header"),
                            interned!("hgroup"),
                            interned!("main"),
                            interned!("menu"),
                            interned!("nav"),
                            interned!("ol"),
                            interned!("p"),
                            interned!("search"),
                            interned!("section"),
                            interned!("summary"),
                            interned!("ul"),
                        ]
                        .contains(&tag.name) =>
                {
                    self.close_p_element_if_in_button_scope();
                    self.insert_html_element_for_token(tag);
                },
                Token::Tag(ref tag)
                    if tag.opening
                        && [
                            interned!("h1"),
                            interned!("h2"),
                            interned!("h3"),
                            interned!("h4"),
                            interned!("h5"),
                            interned!("h6"),
                        ]
                        .contains(&tag.name) =>
                {
                    self.close_p_element_if_in_button_scope();

                    if self.current_node().is_html_element_of(&[
                        interned!("h1"),
                        interned!("h2"),
                        interned!("h3"),
                        interned!("h4"),
                        interned!("h5"),
                        interned!("h6"),
                    ]) {
                        self.parse_error(HtmlParseError::TreeConstruction);
                        self.open_elements.pop();
                    }

                    self.insert_html_element_for_token(tag);
                },
                Token::Tag(ref tag)
                    if tag.opening
                        && (tag.name == interned!("pre")
                            || tag.name == interned!("listing")) =>
                {
                    self.close_p_element_if_in_button_scope();
                    self.insert_html_element_for_token(tag);

                    // A line feed right after the start tag is dropped.
                    self.ignore_next_line_feed = true;
                    self.frameset_ok = FramesetOkFlag::NotOk;
                },
                Token::Tag(ref tag) if tag.opening && tag.name == interned!("form") => {
                    let has_template = self
                        .open_elements
                        .contains_html_element(interned!("template"));
                    if self.form.is_some() && !has_template {
                        self.parse_error(HtmlParseError::TreeConstruction);
                        return;
                    }

                    self.close_p_element_if_in_button_scope();
                    let form = self.insert_html_element_for_token(tag);
                    if !has_template {
                        self.form = Some(form);
                    }
                },
                Token::Tag(ref tag) if tag.opening && tag.name == interned!("li") => {
                    self.run_list_item_loop(&[interned!("li")]);
                    self.close_p_element_if_in_button_scope();
                    self.insert_html_element_for_token(tag);
                },
                Token::Tag(ref tag)
                    if tag.opening
                        && (tag.name == interned!("dd") || tag.name == interned!("dt")) =>
                {
                    self.run_list_item_loop(&[interned!("dd"), interned!("dt")]);
                    self.close_p_element_if_in_button_scope();
                    self.insert_html_element_for_token(tag);
                },
                Token::Tag(ref tag) if tag.opening && tag.name == interned!("plaintext") => {
                    self.close_p_element_if_in_button_scope();
                    self.insert_html_element_for_token(tag);

                    // There is no way out of the PLAINTEXT state.
                    self.tokenizer.switch_to(TokenizerState::Plaintext);
                },
                Token::Tag(ref tag) if tag.opening && tag.name == interned!("button") => {
                    if self
                        .open_elements
                        .has_element_in_scope(interned!("button"), Scope::Default)
                    {
                        self.parse_error(HtmlParseError::TreeConstruction);
                        self.generate_implied_end_tags();
                        while let Some(popped) = self.open_elements.pop() {
                            if popped.is_html_element(interned!("button")) {
                                break;
                            }
                        }
                    }

                    self.reconstruct_active_formatting_elements();
                    self.insert_html_element_for_token(tag);
                    self.frameset_ok = FramesetOkFlag::NotOk;
                },
                Token::Tag(ref tag) if tag.opening && tag.name == interned!("a") => {
                    // Only one <a> may be open between markers at a time.
                    let open_anchor = self
                        .active_formatting_elements
                        .elements_since_last_marker()
                        .find(|(_, formatting_element)| {
                            formatting_element.element.is_html_element(interned!("a"))
                        })
                        .map(|(_, formatting_element)| formatting_element.element.clone());

                    if let Some(anchor) = open_anchor {
                        self.parse_error(HtmlParseError::TreeConstruction);
                        self.run_adoption_agency_algorithm(tag);
                        self.active_formatting_elements.remove(&anchor);
                        self.open_elements.remove(&anchor);
                    }

                    self.reconstruct_active_formatting_elements();
                    let element = self.insert_html_element_for_token(tag);
                    self.active_formatting_elements.push(element, tag.clone());
                },
                Token::Tag(ref tag)
                    if tag.opening
                        && [
                            interned!("b"),
                            interned!("big"),
                            interned!("code"),
                            interned!("em"),
                            interned!("font"),
                            interned!("i"),
                            interned!("s"),
                            interned!("small"),
                            interned!("strike"),
                            interned!("strong"),
                            interned!("tt"),
                            interned!("u"),
                        ]
                        .contains(&tag.name) =>
                {
                    self.reconstruct_active_formatting_elements();
                    let element = self.insert_html_element_for_token(tag);
                    self.active_formatting_elements.push(element, tag.clone());
                },
                Token::Tag(ref tag) if tag.opening && tag.name == interned!("nobr") => {
                    self.reconstruct_active_formatting_elements();

                    if self
                        .open_elements
                        .has_element_in_scope(interned!("nobr"), Scope::Default)
                    {
                        self.parse_error(HtmlParseError::TreeConstruction);
                        self.run_adoption_agency_algorithm(tag);
                        self.reconstruct_active_formatting_elements();
                    }

                    let element = self.insert_html_element_for_token(tag);
                    self.active_formatting_elements.push(element, tag.clone());
                },
                Token::Tag(ref tag)
                    if tag.opening
                        && (tag.name == interned!("applet")
                            || tag.name == interned!("marquee")
                            || tag.name == interned!("object")) =>
                {
                    self.reconstruct_active_formatting_elements();
                    self.insert_html_element_for_token(tag);
                    self.active_formatting_elements.push_marker();
                    self.frameset_ok = FramesetOkFlag::NotOk;
                },
                Token::Tag(ref tag) if tag.opening && tag.name == interned!("table") => {
                    if self.quirks_mode() != QuirksMode::Quirks {
                        self.close_p_element_if_in_button_scope();
                    }
                    self.insert_html_element_for_token(tag);
                    self.frameset_ok = FramesetOkFlag::NotOk;
                    self.insertion_mode = InsertionMode::InTable;
                },
                Token::Tag(ref tag)
                    if tag.opening
                        && [
                            interned!("area"),
                            interned!("br"),
                            interned!("embed"),
                            interned!("img"),
                            interned!("keygen"),
                            interned!("wbr"),
                        ]
                        .contains(&tag.name) =>
                {
                    self.reconstruct_active_formatting_elements();
                    self.insert_void_element(tag);
                    self.frameset_ok = FramesetOkFlag::NotOk;
                },
                Token::Tag(ref tag) if tag.opening && tag.name == interned!("input") => {
                    self.reconstruct_active_formatting_elements();
                    self.insert_void_element(tag);

                    let is_hidden = tag
                        .lookup_attribute(interned!("type"))
                        .is_some_and(|value| value.as_str().eq_ignore_ascii_case("hidden"));
                    if !is_hidden {
                        self.frameset_ok = FramesetOkFlag::NotOk;
                    }
                },
                Token::Tag(ref tag)
                    if tag.opening
                        && (tag.name == interned!("param")
                            || tag.name == interned!("source")
                            || tag.name == interned!("track")) =>
                {
                    self.insert_void_element(tag);
                },
                Token::Tag(ref tag) if tag.opening && tag.name == interned!("hr") => {
                    self.close_p_element_if_in_button_scope();
                    self.insert_void_element(tag);
                    self.frameset_ok = FramesetOkFlag::NotOk;
                },
                Token::Tag(ref tag) if tag.opening && tag.name == interned!("image") => {
                    // (Don't ask.)
                    self.parse_error(HtmlParseError::TreeConstruction);
                    let mut img = tag.clone();
                    img.name = interned!("img");
                    self.consume(Token::Tag(img));
                },
                Token::Tag(ref tag) if tag.opening && tag.name == interned!("textarea") => {
                    self.insert_html_element_for_token(tag);
                    self.ignore_next_line_feed = true;
                    self.tokenizer.switch_to(TokenizerState::Rcdata);
                    self.original_insertion_mode = Some(self.insertion_mode);
                    self.frameset_ok = FramesetOkFlag::NotOk;
                    self.insertion_mode = InsertionMode::Text;
                },
                Token::Tag(ref tag) if tag.opening && tag.name == interned!("xmp") => {
                    self.close_p_element_if_in_button_scope();
                    self.reconstruct_active_formatting_elements();
                    self.frameset_ok = FramesetOkFlag::NotOk;
                    self.generic_parsing_algorithm(tag, GenericParsingAlgorithm::RawText);
                },
                Token::Tag(ref tag) if tag.opening && tag.name == interned!("iframe") => {
                    self.frameset_ok = FramesetOkFlag::NotOk;
                    self.generic_parsing_algorithm(tag, GenericParsingAlgorithm::RawText);
                },
                Token::Tag(ref tag)
                    if tag.opening
                        && (tag.name == interned!("noembed")
                            || (tag.name == interned!("noscript")
                                && self.scripting_enabled())) =>
                {
                    self.generic_parsing_algorithm(tag, GenericParsingAlgorithm::RawText);
                },
                Token::Tag(ref tag) if tag.opening && tag.name == interned!("select") => {
                    self.reconstruct_active_formatting_elements();
                    self.insert_html_element_for_token(tag);
                    self.frameset_ok = FramesetOkFlag::NotOk;

                    let in_table_mode = matches!(
                        self.insertion_mode,
                        InsertionMode::InTable
                            | InsertionMode::InCaption
                            | InsertionMode::InTableBody
                            | InsertionMode::InRow
                            | InsertionMode::InCell
                    );
                    self.insertion_mode = if in_table_mode {
                        InsertionMode::InSelectInTable
                    } else {
                        InsertionMode::InSelect
                    };
                },
                Token::Tag(ref tag)
                    if tag.opening
                        && (tag.name == interned!("optgroup")
                            || tag.name == interned!("option")) =>
                {
                    if self.current_node().is_html_element(interned!("option")) {
                        self.open_elements.pop();
                    }
                    self.reconstruct_active_formatting_elements();
                    self.insert_html_element_for_token(tag);
                },
                Token::Tag(ref tag)
                    if tag.opening
                        && (tag.name == interned!("rb") || tag.name == interned!("rtc")) =>
                {
                    if self
                        .open_elements
                        .has_element_in_scope(interned!("ruby"), Scope::Default)
                    {
                        self.generate_implied_end_tags();
                        if !self.current_node().is_html_element(interned!("ruby")) {
                            self.parse_error(HtmlParseError::TreeConstruction);
                        }
                    }
                    self.insert_html_element_for_token(tag);
                },
                Token::Tag(ref tag)
                    if tag.opening
                        && (tag.name == interned!("rp") || tag.name == interned!("rt")) =>
                {
                    if self
                        .open_elements
                        .has_element_in_scope(interned!("ruby"), Scope::Default)
                    {
                        self.generate_implied_end_tags_excluding(Some(interned!("rtc")));
                        let current = self.current_node();
                        if !current.is_html_element(interned!("rtc"))
                            && !current.is_html_element(interned!("ruby"))
                        {
                            self.parse_error(HtmlParseError::TreeConstruction);
                        }
                    }
                    self.insert_html_element_for_token(tag);
                },
                Token::Tag(mut tag) if tag.opening && tag.name == interned!("math") => {
                    self.reconstruct_active_formatting_elements();
                    tag.adjust_mathml_attributes();
                    self.insert_foreign_element(&tag, Namespace::MathML);

                    if tag.self_closing {
                        self.open_elements.pop();
                        self.acknowledge_self_closing_flag(&tag);
                    }
                },
                Token::Tag(mut tag) if tag.opening && tag.name == interned!("svg") => {
                    self.reconstruct_active_formatting_elements();
                    tag.adjust_svg_attributes();
                    self.insert_foreign_element(&tag, Namespace::Svg);

                    if tag.self_closing {
                        self.open_elements.pop();
                        self.acknowledge_self_closing_flag(&tag);
                    }
                },
                Token::Tag(ref tag)
                    if tag.opening
                        && [
                            interned!("caption"),
                            interned!("col"),
                            interned!("colgroup"),
                            interned!("frame"),
                            interned!("head"),
                            interned!("tbody"),
                            interned!("td"),
                            interned!("tfoot"),
                            interned!("th"),
                            interned!("thead"),
                            interned!("tr"),
                        ]
                        .contains(&tag.name) =>
                {
                    self.parse_error(HtmlParseError::TreeConstruction);
                },
                Token::Tag(ref tag) if tag.opening => {
                    // Any other start tag.
                    self.reconstruct_active_formatting_elements();
                    self.insert_html_element_for_token(tag);
                },
                Token::Tag(ref tag)
                    if !tag.opening
                        && [
                            interned!("address"),
                            interned!("article"),
                            interned!("aside"),
                            interned!("blockquote"),
                            interned!("button"),
                            interned!("center"),
                            interned!("details"),
                            interned!("dialog"),
                            interned!("dir"),
                            interned!("div"),
                            interned!("dl"),
                            interned!("fieldset"),
                            interned!("figcaption"),
                            interned!("figure"),
                            interned!("footer"),
                            interned!("header"),
                            interned!("hgroup"),
                            interned!("listing"),
                            interned!("main"),
                            interned!("menu"),
                            interned!("nav"),
                            interned!("ol"),
                            interned!("pre"),
                            interned!("search"),
                            interned!("section"),
                            interned!("summary"),
                            interned!("ul"),
                        ]
                        .contains(&tag.name) =>
                {
                    if !self
                        .open_elements
                        .has_element_in_scope(tag.name, Scope::Default)
                    {
                        self.parse_error(HtmlParseError::TreeConstruction);
                        return;
                    }

                    self.generate_implied_end_tags();
                    if !self.current_node().is_html_element(tag.name) {
                        self.parse_error(HtmlParseError::TreeConstruction);
                    }
                    while let Some(popped) = self.open_elements.pop() {
                        if popped.is_html_element(tag.name) {
                            break;
                        }
                    }
                },
                Token::Tag(ref tag) if !tag.opening && tag.name == interned!("form") => {
                    if !self
                        .open_elements
                        .contains_html_element(interned!("template"))
                    {
                        let node = self.form.take();
                        let Some(node) = node else {
                            self.parse_error(HtmlParseError::TreeConstruction);
                            return;
                        };
                        if !self.open_elements.has_node_in_scope(&node, Scope::Default) {
                            self.parse_error(HtmlParseError::TreeConstruction);
                            return;
                        }

                        self.generate_implied_end_tags();
                        if !self.current_node().ptr_eq(&node) {
                            self.parse_error(HtmlParseError::TreeConstruction);
                        }
                        // The form element is removed in place, not popped
                        // up to.
                        self.open_elements.remove(&node);
                    } else {
                        if !self
                            .open_elements
                            .has_element_in_scope(interned!("form"), Scope::Default)
                        {
                            self.parse_error(HtmlParseError::TreeConstruction);
                            return;
                        }

                        self.generate_implied_end_tags();
                        if !self.current_node().is_html_element(interned!("form")) {
                            self.parse_error(HtmlParseError::TreeConstruction);
                        }
                        while let Some(popped) = self.open_elements.pop() {
                            if popped.is_html_element(interned!("form")) {
                                break;
                            }
                        }
                    }
                },
                Token::Tag(ref tag) if !tag.opening && tag.name == interned!("p") => {
                    if !self
                        .open_elements
                        .has_element_in_scope(interned!("p"), Scope::Button)
                    {
                        self.parse_error(HtmlParseError::TreeConstruction);
                        self.insert_html_element_for_token(&TagData::synthetic(interned!("p")));
                    }
                    self.close_p_element();
                },
                Token::Tag(ref tag) if !tag.opening && tag.name == interned!("li") => {
                    if !self
                        .open_elements
                        .has_element_in_scope(interned!("li"), Scope::ListItem)
                    {
                        self.parse_error(HtmlParseError::TreeConstruction);
                        return;
                    }

                    self.generate_implied_end_tags_excluding(Some(interned!("li")));
                    if !self.current_node().is_html_element(interned!("li")) {
                        self.parse_error(HtmlParseError::TreeConstruction);
                    }
                    while let Some(popped) = self.open_elements.pop() {
                        if popped.is_html_element(interned!("li")) {
                            break;
                        }
                    }
                },
                Token::Tag(ref tag)
                    if !tag.opening
                        && (tag.name == interned!("dd") || tag.name == interned!("dt")) =>
                {
                    if !self
                        .open_elements
                        .has_element_in_scope(tag.name, Scope::Default)
                    {
                        self.parse_error(HtmlParseError::TreeConstruction);
                        return;
                    }

                    self.generate_implied_end_tags_excluding(Some(tag.name));
                    if !self.current_node().is_html_element(tag.name) {
                        self.parse_error(HtmlParseError::TreeConstruction);
                    }
                    while let Some(popped) = self.open_elements.pop() {
                        if popped.is_html_element(tag.name) {
                            break;
                        }
                    }
                },
                Token::Tag(ref tag)
                    if !tag.opening
                        && [
                            interned!("h1"),
                            interned!("h2"),
                            interned!("h3"),
                            interned!("h4"),
                            interned!("h5"),
                            interned!("h6"),
                        ]
                        .contains(&tag.name) =>
                {
                    let headings = [
                        interned!("h1"),
                        interned!("h2"),
                        interned!("h3"),
                        interned!("h4"),
                        interned!("h5"),
                        interned!("h6"),
                    ];

                    if !self.open_elements.has_one_of_in_scope(&headings, Scope::Default) {
                        self.parse_error(HtmlParseError::TreeConstruction);
                        return;
                    }

                    self.generate_implied_end_tags();
                    if !self.current_node().is_html_element(tag.name) {
                        self.parse_error(HtmlParseError::TreeConstruction);
                    }
                    while let Some(popped) = self.open_elements.pop() {
                        if popped.is_html_element_of(&headings) {
                            break;
                        }
                    }
                },
                Token::Tag(ref tag)
                    if !tag.opening
                        && [
                            interned!("a"),
                            interned!("b"),
                            interned!("big"),
                            interned!("code"),
                            interned!("em"),
                            interned!("font"),
                            interned!("i"),
                            interned!("nobr"),
                            interned!("s"),
                            interned!("small"),
                            interned!("strike"),
                            interned!("strong"),
                            interned!("tt"),
                            interned!("u"),
                        ]
                        .contains(&tag.name) =>
                {
                    self.run_adoption_agency_algorithm(tag);
                },
                Token::Tag(ref tag)
                    if !tag.opening
                        && (tag.name == interned!("applet")
                            || tag.name == interned!("marquee")
                            || tag.name == interned!("object")) =>
                {
                    if !self
                        .open_elements
                        .has_element_in_scope(tag.name, Scope::Default)
                    {
                        self.parse_error(HtmlParseError::TreeConstruction);
                        return;
                    }

                    self.generate_implied_end_tags();
                    if !self.current_node().is_html_element(tag.name) {
                        self.parse_error(HtmlParseError::TreeConstruction);
                    }
                    while let Some(popped) = self.open_elements.pop() {
                        if popped.is_html_element(tag.name) {
                            break;
                        }
                    }
                    self.active_formatting_elements.clear_up_to_last_marker();
                },
                Token::Tag(ref tag) if !tag.opening && tag.name == interned!("br") => {
                    // Treated as a <br> start tag, dropping any
                    // attributes.
                    self.parse_error(HtmlParseError::TreeConstruction);
                    self.reconstruct_active_formatting_elements();
                    self.insert_html_element_for_token(&TagData::synthetic(interned!("br")));
                    self.open_elements.pop();
                    self.frameset_ok = FramesetOkFlag::NotOk;
                },
                Token::Tag(ref tag) if !tag.opening => {
                    self.any_other_end_tag_in_body(tag);
                },
                Token::Tag(_) => {
                    unreachable!("all tag tokens are matched above")
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incdata
            InsertionMode::Text => match token {
                Token::Character(c) => {
                    self.insert_character(c);
                },
                Token::EndOfFile => {
                    self.parse_error(HtmlParseError::TreeConstruction);
                    self.open_elements.pop();
                    self.insertion_mode = self
                        .original_insertion_mode
                        .take()
                        .expect("text mode always has an original mode");
                    self.consume(token);
                },
                Token::Tag(ref tag) if !tag.opening => {
                    // </script> would run the script here; nothing does.
                    self.open_elements.pop();
                    self.insertion_mode = self
                        .original_insertion_mode
                        .take()
                        .expect("text mode always has an original mode");
                },
                _ => {
                    unreachable!("only character and end tag tokens reach the text mode")
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intable
            InsertionMode::InTable => match token {
                Token::Character(_)
                    if self.current_node().is_html_element_of(&[
                        interned!("table"),
                        interned!("tbody"),
                        interned!("template"),
                        interned!("tfoot"),
                        interned!("thead"),
                        interned!("tr"),
                    ]) =>
                {
                    self.pending_table_characters.clear();
                    self.original_insertion_mode = Some(self.insertion_mode);
                    self.insertion_mode = InsertionMode::InTableText;
                    self.consume(token);
                },
                Token::Comment(data) => {
                    self.insert_comment(data);
                },
                Token::Doctype(_) => {
                    self.parse_error(HtmlParseError::TreeConstruction);
                },
                Token::Tag(ref tag) if tag.opening && tag.name == interned!("caption") => {
                    self.clear_stack_back_to_table_context();
                    self.active_formatting_elements.push_marker();
                    self.insert_html_element_for_token(tag);
                    self.insertion_mode = InsertionMode::InCaption;
                },
                Token::Tag(ref tag) if tag.opening && tag.name == interned!("colgroup") => {
                    self.clear_stack_back_to_table_context();
                    self.insert_html_element_for_token(tag);
                    self.insertion_mode = InsertionMode::InColumnGroup;
                },
                Token::Tag(ref tag) if tag.opening && tag.name == interned!("col") => {
                    self.clear_stack_back_to_table_context();
                    self.insert_html_element_for_token(&TagData::synthetic(interned!(
                        "colgroup"
                    )));
                    self.insertion_mode = InsertionMode::InColumnGroup;
                    self.consume(token);
                },
                Token::Tag(ref tag)
                    if tag.opening
                        && (tag.name == interned!("tbody")
                            || tag.name == interned!("tfoot")
                            || tag.name == interned!("thead")) =>
                {
                    self.clear_stack_back_to_table_context();
                    self.insert_html_element_for_token(tag);
                    self.insertion_mode = InsertionMode::InTableBody;
                },
                Token::Tag(ref tag)
                    if tag.opening
                        && (tag.name == interned!("td")
                            || tag.name == interned!("th")
                            || tag.name == interned!("tr")) =>
                {
                    self.clear_stack_back_to_table_context();
                    self.insert_html_element_for_token(&TagData::synthetic(interned!("tbody")));
                    self.insertion_mode = InsertionMode::InTableBody;
                    self.consume(token);
                },
                Token::Tag(ref tag) if tag.opening && tag.name == interned!("table") => {
                    self.parse_error(HtmlParseError::TreeConstruction);

                    if !self
                        .open_elements
                        .has_element_in_scope(interned!("table"), Scope::Table)
                    {
                        return;
                    }

                    while let Some(popped) = self.open_elements.pop() {
                        if popped.is_html_element(interned!("table")) {
                            break;
                        }
                    }
                    self.reset_insertion_mode_appropriately();
                    self.consume(token);
                },
                Token::Tag(ref tag) if !tag.opening && tag.name == interned!("table") => {
                    if !self
                        .open_elements
                        .has_element_in_scope(interned!("table"), Scope::Table)
                    {
                        self.parse_error(HtmlParseError::TreeConstruction);
                        return;
                    }

                    while let Some(popped) = self.open_elements.pop() {
                        if popped.is_html_element(interned!("table")) {
                            break;
                        }
                    }
                    self.reset_insertion_mode_appropriately();
                },
                Token::Tag(ref tag)
                    if !tag.opening
                        && [
                            interned!("body"),
                            interned!("caption"),
                            interned!("col"),
                            interned!("colgroup"),
                            interned!("html"),
                            interned!("tbody"),
                            interned!("td"),
                            interned!("tfoot"),
                            interned!("th"),
                            interned!("thead"),
                            interned!("tr"),
                        ]
                        .contains(&tag.name) =>
                {
                    self.parse_error(HtmlParseError::TreeConstruction);
                },
                Token::Tag(ref tag)
                    if (tag.opening
                        && (tag.name == interned!("style")
                            || tag.name == interned!("script")
                            || tag.name == interned!("template")))
                        || (!tag.opening && tag.name == interned!("template")) =>
                {
                    self.consume_in_mode(InsertionMode::InHead, token);
                },
                Token::Tag(ref tag)
                    if tag.opening
                        && tag.name == interned!("input")
                        && tag
                            .lookup_attribute(interned!("type"))
                            .is_some_and(|value| {
                                value.as_str().eq_ignore_ascii_case("hidden")
                            }) =>
                {
                    // Hidden inputs may stay inside the table.
                    self.parse_error(HtmlParseError::TreeConstruction);
                    self.insert_void_element(tag);
                },
                Token::Tag(ref tag) if tag.opening && tag.name == interned!("form") => {
                    self.parse_error(HtmlParseError::TreeConstruction);

                    if self.form.is_none()
                        && !self
                            .open_elements
                            .contains_html_element(interned!("template"))
                    {
                        let form = self.insert_html_element_for_token(tag);
                        self.form = Some(form);
                        self.open_elements.pop();
                    }
                },
                Token::EndOfFile => {
                    self.consume_in_mode(InsertionMode::InBody, token);
                },
                other => {
                    // Anything else: foster parenting comes on for the
                    // duration of this token.
                    self.parse_error(HtmlParseError::TreeConstruction);
                    self.foster_parenting = true;
                    self.consume_in_mode(InsertionMode::InBody, other);
                    self.foster_parenting = false;
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intabletext
            InsertionMode::InTableText => match token {
                Token::Character('\0') => {
                    self.parse_error(HtmlParseError::TreeConstruction);
                },
                Token::Character(c) => {
                    self.pending_table_characters.push(c);
                },
                other => {
                    let pending = std::mem::take(&mut self.pending_table_characters);
                    let all_whitespace = pending
                        .chars()
                        .all(|c| matches!(c, TAB | LINE_FEED | FORM_FEED | WHITESPACE));

                    if all_whitespace {
                        for c in pending.chars() {
                            self.insert_character(c);
                        }
                    } else {
                        // Non-whitespace text inside a table gets foster
                        // parented.
                        self.parse_error(HtmlParseError::TreeConstruction);
                        self.foster_parenting = true;
                        for c in pending.chars() {
                            self.consume_in_mode(InsertionMode::InBody, Token::Character(c));
                        }
                        self.foster_parenting = false;
                    }

                    self.insertion_mode = self
                        .original_insertion_mode
                        .take()
                        .expect("in table text mode always has an original mode");
                    self.consume(other);
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incaption
            InsertionMode::InCaption => match token {
                Token::Tag(ref tag) if !tag.opening && tag.name == interned!("caption") => {
                    self.close_caption();
                },
                Token::Tag(ref tag)
                    if (tag.opening
                        && [
                            interned!("caption"),
                            interned!("col"),
                            interned!("colgroup"),
                            interned!("tbody"),
                            interned!("td"),
                            interned!("tfoot"),
                            interned!("th"),
                            interned!("thead"),
                            interned!("tr"),
                        ]
                        .contains(&tag.name))
                        || (!tag.opening && tag.name == interned!("table")) =>
                {
                    if self.close_caption() {
                        self.consume(token);
                    }
                },
                Token::Tag(ref tag)
                    if !tag.opening
                        && [
                            interned!("body"),
                            interned!("col"),
                            interned!("colgroup"),
                            interned!("html"),
                            interned!("tbody"),
                            interned!("td"),
                            interned!("tfoot"),
                            interned!("th"),
                            interned!("thead"),
                            interned!("tr"),
                        ]
                        .contains(&tag.name) =>
                {
                    self.parse_error(HtmlParseError::TreeConstruction);
                },
                other => {
                    self.consume_in_mode(InsertionMode::InBody, other);
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incolgroup
            InsertionMode::InColumnGroup => match token {
                Token::Character(c @ (TAB | LINE_FEED | FORM_FEED | WHITESPACE)) => {
                    self.insert_character(c);
                },
                Token::Comment(data) => {
                    self.insert_comment(data);
                },
                Token::Doctype(_) => {
                    self.parse_error(HtmlParseError::TreeConstruction);
                },
                Token::Tag(ref tag) if tag.opening && tag.name == interned!("html") => {
                    self.consume_in_mode(InsertionMode::InBody, token);
                },
                Token::Tag(ref tag) if tag.opening && tag.name == interned!("col") => {
                    self.insert_void_element(tag);
                },
                Token::Tag(ref tag) if !tag.opening && tag.name == interned!("colgroup") => {
                    if !self.current_node().is_html_element(interned!("colgroup")) {
                        self.parse_error(HtmlParseError::TreeConstruction);
                        return;
                    }
                    self.open_elements.pop();
                    self.insertion_mode = InsertionMode::InTable;
                },
                Token::Tag(ref tag) if !tag.opening && tag.name == interned!("col") => {
                    self.parse_error(HtmlParseError::TreeConstruction);
                },
                Token::Tag(ref tag)
                    if tag.name == interned!("template") =>
                {
                    self.consume_in_mode(InsertionMode::InHead, token);
                },
                Token::EndOfFile => {
                    self.consume_in_mode(InsertionMode::InBody, token);
                },
                other => {
                    if !self.current_node().is_html_element(interned!("colgroup")) {
                        self.parse_error(HtmlParseError::TreeConstruction);
                        return;
                    }
                    self.open_elements.pop();
                    self.insertion_mode = InsertionMode::InTable;
                    self.consume(other);
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intbody
            InsertionMode::InTableBody => match token {
                Token::Tag(ref tag) if tag.opening && tag.name == interned!("tr") => {
                    self.clear_stack_back_to_table_body_context();
                    self.insert_html_element_for_token(tag);
                    self.insertion_mode = InsertionMode::InRow;
                },
                Token::Tag(ref tag)
                    if tag.opening
                        && (tag.name == interned!("th") || tag.name == interned!("td")) =>
                {
                    self.parse_error(HtmlParseError::TreeConstruction);
                    self.clear_stack_back_to_table_body_context();
                    self.insert_html_element_for_token(&TagData::synthetic(interned!("tr")));
                    self.insertion_mode = InsertionMode::InRow;
                    self.consume(token);
                },
                Token::Tag(ref tag)
                    if !tag.opening
                        && (tag.name == interned!("tbody")
                            || tag.name == interned!("tfoot")
                            || tag.name == interned!("thead")) =>
                {
                    if !self
                        .open_elements
                        .has_element_in_scope(tag.name, Scope::Table)
                    {
                        self.parse_error(HtmlParseError::TreeConstruction);
                        return;
                    }
                    self.clear_stack_back_to_table_body_context();
                    self.open_elements.pop();
                    self.insertion_mode = InsertionMode::InTable;
                },
                Token::Tag(ref tag)
                    if (tag.opening
                        && [
                            interned!("caption"),
                            interned!("col"),
                            interned!("colgroup"),
                            interned!("tbody"),
                            interned!("tfoot"),
                            interned!("thead"),
                        ]
                        .contains(&tag.name))
                        || (!tag.opening && tag.name == interned!("table")) =>
                {
                    if !self.open_elements.has_one_of_in_scope(
                        &[
                            interned!("tbody"),
                            interned!("thead"),
                            interned!("tfoot"),
                        ],
                        Scope::Table,
                    ) {
                        self.parse_error(HtmlParseError::TreeConstruction);
                        return;
                    }

                    self.clear_stack_back_to_table_body_context();
                    self.open_elements.pop();
                    self.insertion_mode = InsertionMode::InTable;
                    self.consume(token);
                },
                Token::Tag(ref tag)
                    if !tag.opening
                        && [
                            interned!("body"),
                            interned!("caption"),
                            interned!("col"),
                            interned!("colgroup"),
                            interned!("html"),
                            interned!("td"),
                            interned!("th"),
                            interned!("tr"),
                        ]
                        .contains(&tag.name) =>
                {
                    self.parse_error(HtmlParseError::TreeConstruction);
                },
                other => {
                    self.consume_in_mode(InsertionMode::InTable, other);
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intr
            InsertionMode::InRow => match token {
                Token::Tag(ref tag)
                    if tag.opening
                        && (tag.name == interned!("th") || tag.name == interned!("td")) =>
                {
                    self.clear_stack_back_to_table_row_context();
                    self.insert_html_element_for_token(tag);
                    self.insertion_mode = InsertionMode::InCell;
                    self.active_formatting_elements.push_marker();
                },
                Token::Tag(ref tag) if !tag.opening && tag.name == interned!("tr") => {
                    if !self
                        .open_elements
                        .has_element_in_scope(interned!("tr"), Scope::Table)
                    {
                        self.parse_error(HtmlParseError::TreeConstruction);
                        return;
                    }
                    self.clear_stack_back_to_table_row_context();
                    self.open_elements.pop();
                    self.insertion_mode = InsertionMode::InTableBody;
                },
                Token::Tag(ref tag)
                    if (tag.opening
                        && [
                            interned!("caption"),
                            interned!("col"),
                            interned!("colgroup"),
                            interned!("tbody"),
                            interned!("tfoot"),
                            interned!("thead"),
                            interned!("tr"),
                        ]
                        .contains(&tag.name))
                        || (!tag.opening && tag.name == interned!("table")) =>
                {
                    if !self
                        .open_elements
                        .has_element_in_scope(interned!("tr"), Scope::Table)
                    {
                        self.parse_error(HtmlParseError::TreeConstruction);
                        return;
                    }
                    self.clear_stack_back_to_table_row_context();
                    self.open_elements.pop();
                    self.insertion_mode = InsertionMode::InTableBody;
                    self.consume(token);
                },
                Token::Tag(ref tag)
                    if !tag.opening
                        && (tag.name == interned!("tbody")
                            || tag.name == interned!("tfoot")
                            || tag.name == interned!("thead")) =>
                {
                    if !self
                        .open_elements
                        .has_element_in_scope(tag.name, Scope::Table)
                    {
                        self.parse_error(HtmlParseError::TreeConstruction);
                        return;
                    }
                    if !self
                        .open_elements
                        .has_element_in_scope(interned!("tr"), Scope::Table)
                    {
                        return;
                    }
                    self.clear_stack_back_to_table_row_context();
                    self.open_elements.pop();
                    self.insertion_mode = InsertionMode::InTableBody;
                    self.consume(token);
                },
                Token::Tag(ref tag)
                    if !tag.opening
                        && [
                            interned!("body"),
                            interned!("caption"),
                            interned!("col"),
                            interned!("colgroup"),
                            interned!("html"),
                            interned!("td"),
                            interned!("th"),
                        ]
                        .contains(&tag.name) =>
                {
                    self.parse_error(HtmlParseError::TreeConstruction);
                },
                other => {
                    self.consume_in_mode(InsertionMode::InTable, other);
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intd
            InsertionMode::InCell => match token {
                Token::Tag(ref tag)
                    if !tag.opening
                        && (tag.name == interned!("td") || tag.name == interned!("th")) =>
                {
                    if !self
                        .open_elements
                        .has_element_in_scope(tag.name, Scope::Table)
                    {
                        self.parse_error(HtmlParseError::TreeConstruction);
                        return;
                    }

                    self.generate_implied_end_tags();
                    if !self.current_node().is_html_element(tag.name) {
                        self.parse_error(HtmlParseError::TreeConstruction);
                    }
                    while let Some(popped) = self.open_elements.pop() {
                        if popped.is_html_element(tag.name) {
                            break;
                        }
                    }
                    self.active_formatting_elements.clear_up_to_last_marker();
                    self.insertion_mode = InsertionMode::InRow;
                },
                Token::Tag(ref tag)
                    if tag.opening
                        && [
                            interned!("caption"),
                            interned!("col"),
                            interned!("colgroup"),
                            interned!("tbody"),
                            interned!("td"),
                            interned!("tfoot"),
                            interned!("th"),
                            interned!("thead"),
                            interned!("tr"),
                        ]
                        .contains(&tag.name) =>
                {
                    if !self.open_elements.has_one_of_in_scope(
                        &[interned!("td"), interned!("th")],
                        Scope::Table,
                    ) {
                        self.parse_error(HtmlParseError::TreeConstruction);
                        return;
                    }
                    self.close_the_cell();
                    self.consume(token);
                },
                Token::Tag(ref tag)
                    if !tag.opening
                        && [
                            interned!("body"),
                            interned!("caption"),
                            interned!("col"),
                            interned!("colgroup"),
                            interned!("html"),
                        ]
                        .contains(&tag.name) =>
                {
                    self.parse_error(HtmlParseError::TreeConstruction);
                },
                Token::Tag(ref tag)
                    if !tag.opening
                        && [
                            interned!("table"),
                            interned!("tbody"),
                            interned!("tfoot"),
                            interned!("thead"),
                            interned!("tr"),
                        ]
                        .contains(&tag.name) =>
                {
                    if !self
                        .open_elements
                        .has_element_in_scope(tag.name, Scope::Table)
                    {
                        self.parse_error(HtmlParseError::TreeConstruction);
                        return;
                    }
                    self.close_the_cell();
                    self.consume(token);
                },
                other => {
                    self.consume_in_mode(InsertionMode::InBody, other);
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselect
            InsertionMode::InSelect => match token {
                Token::Character('\0') => {
                    self.parse_error(HtmlParseError::TreeConstruction);
                },
                Token::Character(c) => {
                    self.insert_character(c);
                },
                Token::Comment(data) => {
                    self.insert_comment(data);
                },
                Token::Doctype(_) => {
                    self.parse_error(HtmlParseError::TreeConstruction);
                },
                Token::Tag(ref tag) if tag.opening && tag.name == interned!("html") => {
                    self.consume_in_mode(InsertionMode::InBody, token);
                },
                Token::Tag(ref tag) if tag.opening && tag.name == interned!("option") => {
                    if self.current_node().is_html_element(interned!("option")) {
                        self.open_elements.pop();
                    }
                    self.insert_html_element_for_token(tag);
                },
                Token::Tag(ref tag) if tag.opening && tag.name == interned!("optgroup") => {
                    if self.current_node().is_html_element(interned!("option")) {
                        self.open_elements.pop();
                    }
                    if self.current_node().is_html_element(interned!("optgroup")) {
                        self.open_elements.pop();
                    }
                    self.insert_html_element_for_token(tag);
                },
                Token::Tag(ref tag) if tag.opening && tag.name == interned!("hr") => {
                    if self.current_node().is_html_element(interned!("option")) {
                        self.open_elements.pop();
                    }
                    if self.current_node().is_html_element(interned!("optgroup")) {
                        self.open_elements.pop();
                    }
                    self.insert_void_element(tag);
                },
                Token::Tag(ref tag) if !tag.opening && tag.name == interned!("optgroup") => {
                    // Close an option nested directly inside the optgroup
                    // first.
                    if self.current_node().is_html_element(interned!("option")) {
                        let below_current = self
                            .open_elements
                            .nth(self.open_elements.len().wrapping_sub(2));
                        if below_current
                            .is_some_and(|node| node.is_html_element(interned!("optgroup")))
                        {
                            self.open_elements.pop();
                        }
                    }

                    if self.current_node().is_html_element(interned!("optgroup")) {
                        self.open_elements.pop();
                    } else {
                        self.parse_error(HtmlParseError::TreeConstruction);
                    }
                },
                Token::Tag(ref tag) if !tag.opening && tag.name == interned!("option") => {
                    if self.current_node().is_html_element(interned!("option")) {
                        self.open_elements.pop();
                    } else {
                        self.parse_error(HtmlParseError::TreeConstruction);
                    }
                },
                Token::Tag(ref tag) if !tag.opening && tag.name == interned!("select") => {
                    if !self
                        .open_elements
                        .has_element_in_scope(interned!("select"), Scope::Select)
                    {
                        // Fragment case.
                        self.parse_error(HtmlParseError::TreeConstruction);
                        return;
                    }
                    while let Some(popped) = self.open_elements.pop() {
                        if popped.is_html_element(interned!("select")) {
                            break;
                        }
                    }
                    self.reset_insertion_mode_appropriately();
                },
                Token::Tag(ref tag) if tag.opening && tag.name == interned!("select") => {
                    // Nested <select> acts as </select>.
                    self.parse_error(HtmlParseError::TreeConstruction);
                    if !self
                        .open_elements
                        .has_element_in_scope(interned!("select"), Scope::Select)
                    {
                        return;
                    }
                    while let Some(popped) = self.open_elements.pop() {
                        if popped.is_html_element(interned!("select")) {
                            break;
                        }
                    }
                    self.reset_insertion_mode_appropriately();
                },
                Token::Tag(ref tag)
                    if tag.opening
                        && (tag.name == interned!("input")
                            || tag.name == interned!("keygen")
                            || tag.name == interned!("textarea")) =>
                {
                    self.parse_error(HtmlParseError::TreeConstruction);
                    if !self
                        .open_elements
                        .has_element_in_scope(interned!("select"), Scope::Select)
                    {
                        return;
                    }
                    while let Some(popped) = self.open_elements.pop() {
                        if popped.is_html_element(interned!("select")) {
                            break;
                        }
                    }
                    self.reset_insertion_mode_appropriately();
                    self.consume(token);
                },
                Token::Tag(ref tag)
                    if (tag.opening
                        && (tag.name == interned!("script")
                            || tag.name == interned!("template")))
                        || (!tag.opening && tag.name == interned!("template")) =>
                {
                    self.consume_in_mode(InsertionMode::InHead, token);
                },
                Token::EndOfFile => {
                    self.consume_in_mode(InsertionMode::InBody, token);
                },
                _ => {
                    self.parse_error(HtmlParseError::TreeConstruction);
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselectintable
            InsertionMode::InSelectInTable => match token {
                Token::Tag(ref tag)
                    if tag.opening
                        && [
                            interned!("caption"),
                            interned!("table"),
                            interned!("tbody"),
                            interned!("tfoot"),
                            interned!("thead"),
                            interned!("tr"),
                            interned!("td"),
                            interned!("th"),
                        ]
                        .contains(&tag.name) =>
                {
                    self.parse_error(HtmlParseError::TreeConstruction);
                    while let Some(popped) = self.open_elements.pop() {
                        if popped.is_html_element(interned!("select")) {
                            break;
                        }
                    }
                    self.reset_insertion_mode_appropriately();
                    self.consume(token);
                },
                Token::Tag(ref tag)
                    if !tag.opening
                        && [
                            interned!("caption"),
                            interned!("table"),
                            interned!("tbody"),
                            interned!("tfoot"),
                            interned!("thead"),
                            interned!("tr"),
                            interned!("td"),
                            interned!("th"),
                        ]
                        .contains(&tag.name) =>
                {
                    self.parse_error(HtmlParseError::TreeConstruction);
                    if !self
                        .open_elements
                        .has_element_in_scope(tag.name, Scope::Table)
                    {
                        return;
                    }
                    while let Some(popped) = self.open_elements.pop() {
                        if popped.is_html_element(interned!("select")) {
                            break;
                        }
                    }
                    self.reset_insertion_mode_appropriately();
                    self.consume(token);
                },
                other => {
                    self.consume_in_mode(InsertionMode::InSelect, other);
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intemplate
            InsertionMode::InTemplate => match token {
                Token::Character(_) | Token::Comment(_) | Token::Doctype(_) => {
                    self.consume_in_mode(InsertionMode::InBody, token);
                },
                Token::Tag(ref tag)
                    if (tag.opening
                        && [
                            interned!("base"),
                            interned!("basefont"),
                            interned!("bgsound"),
                            interned!("link"),
                            interned!("meta"),
                            interned!("noframes"),
                            interned!("script"),
                            interned!("style"),
                            interned!("template"),
                            interned!("title"),
                        ]
                        .contains(&tag.name))
                        || (!tag.opening && tag.name == interned!("template")) =>
                {
                    self.consume_in_mode(InsertionMode::InHead, token);
                },
                Token::Tag(ref tag)
                    if tag.opening
                        && [
                            interned!("caption"),
                            interned!("colgroup"),
                            interned!("tbody"),
                            interned!("tfoot"),
                            interned!("thead"),
                        ]
                        .contains(&tag.name) =>
                {
                    self.template_insertion_modes.pop();
                    self.template_insertion_modes.push(InsertionMode::InTable);
                    self.insertion_mode = InsertionMode::InTable;
                    self.consume(token);
                },
                Token::Tag(ref tag) if tag.opening && tag.name == interned!("col") => {
                    self.template_insertion_modes.pop();
                    self.template_insertion_modes
                        .push(InsertionMode::InColumnGroup);
                    self.insertion_mode = InsertionMode::InColumnGroup;
                    self.consume(token);
                },
                Token::Tag(ref tag) if tag.opening && tag.name == interned!("tr") => {
                    self.template_insertion_modes.pop();
                    self.template_insertion_modes
                        .push(InsertionMode::InTableBody);
                    self.insertion_mode = InsertionMode::InTableBody;
                    self.consume(token);
                },
                Token::Tag(ref tag)
                    if tag.opening
                        && (tag.name == interned!("td") || tag.name == interned!("th")) =>
                {
                    self.template_insertion_modes.pop();
                    self.template_insertion_modes.push(InsertionMode::InRow);
                    self.insertion_mode = InsertionMode::InRow;
                    self.consume(token);
                },
                Token::Tag(ref tag) if tag.opening => {
                    self.template_insertion_modes.pop();
                    self.template_insertion_modes.push(InsertionMode::InBody);
                    self.insertion_mode = InsertionMode::InBody;
                    self.consume(token);
                },
                Token::Tag(_) => {
                    self.parse_error(HtmlParseError::TreeConstruction);
                },
                Token::EndOfFile => {
                    if !self
                        .open_elements
                        .contains_html_element(interned!("template"))
                    {
                        self.stop_parsing();
                        return;
                    }

                    self.parse_error(HtmlParseError::TreeConstruction);
                    while let Some(popped) = self.open_elements.pop() {
                        if popped.is_html_element(interned!("template")) {
                            break;
                        }
                    }
                    self.active_formatting_elements.clear_up_to_last_marker();
                    self.template_insertion_modes.pop();
                    self.reset_insertion_mode_appropriately();
                    self.consume(token);
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#the-after-body-insertion-mode
            InsertionMode::AfterBody => match token {
                Token::Character(TAB | LINE_FEED | FORM_FEED | WHITESPACE) => {
                    self.consume_in_mode(InsertionMode::InBody, token);
                },
                Token::Comment(data) => {
                    // The comment becomes the last child of the html
                    // element.
                    let root = self.open_elements.top_node().expect("stack is not empty");
                    let location = InsertionLocation::append_to(root);
                    self.insert_comment_at(data, Some(location));
                },
                Token::Doctype(_) => {
                    self.parse_error(HtmlParseError::TreeConstruction);
                },
                Token::Tag(ref tag) if tag.opening && tag.name == interned!("html") => {
                    self.consume_in_mode(InsertionMode::InBody, token);
                },
                Token::Tag(ref tag) if !tag.opening && tag.name == interned!("html") => {
                    if self.fragment_context.is_some() {
                        self.parse_error(HtmlParseError::TreeConstruction);
                        return;
                    }
                    self.insertion_mode = InsertionMode::AfterAfterBody;
                },
                Token::EndOfFile => {
                    self.stop_parsing();
                },
                other => {
                    self.parse_error(HtmlParseError::TreeConstruction);
                    self.insertion_mode = InsertionMode::InBody;
                    self.consume(other);
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inframeset
            InsertionMode::InFrameset => match token {
                Token::Character(c @ (TAB | LINE_FEED | FORM_FEED | WHITESPACE)) => {
                    self.insert_character(c);
                },
                Token::Comment(data) => {
                    self.insert_comment(data);
                },
                Token::Doctype(_) => {
                    self.parse_error(HtmlParseError::TreeConstruction);
                },
                Token::Tag(ref tag) if tag.opening && tag.name == interned!("html") => {
                    self.consume_in_mode(InsertionMode::InBody, token);
                },
                Token::Tag(ref tag) if tag.opening && tag.name == interned!("frameset") => {
                    self.insert_html_element_for_token(tag);
                },
                Token::Tag(ref tag) if !tag.opening && tag.name == interned!("frameset") => {
                    if self.current_node().is_html_element(interned!("html")) {
                        // Fragment case.
                        self.parse_error(HtmlParseError::TreeConstruction);
                        return;
                    }

                    self.open_elements.pop();

                    if self.fragment_context.is_none()
                        && !self.current_node().is_html_element(interned!("frameset"))
                    {
                        self.insertion_mode = InsertionMode::AfterFrameset;
                    }
                },
                Token::Tag(ref tag) if tag.opening && tag.name == interned!("frame") => {
                    self.insert_void_element(tag);
                },
                Token::Tag(ref tag) if tag.opening && tag.name == interned!("noframes") => {
                    self.consume_in_mode(InsertionMode::InHead, token);
                },
                Token::EndOfFile => {
                    if !self.current_node().is_html_element(interned!("html")) {
                        self.parse_error(HtmlParseError::TreeConstruction);
                    }
                    self.stop_parsing();
                },
                _ => {
                    self.parse_error(HtmlParseError::TreeConstruction);
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#the-after-frameset-insertion-mode
            InsertionMode::AfterFrameset => match token {
                Token::Character(c @ (TAB | LINE_FEED | FORM_FEED | WHITESPACE)) => {
                    self.insert_character(c);
                },
                Token::Comment(data) => {
                    self.insert_comment(data);
                },
                Token::Doctype(_) => {
                    self.parse_error(HtmlParseError::TreeConstruction);
                },
                Token::Tag(ref tag) if tag.opening && tag.name == interned!("html") => {
                    self.consume_in_mode(InsertionMode::InBody, token);
                },
                Token::Tag(ref tag) if !tag.opening && tag.name == interned!("html") => {
                    self.insertion_mode = InsertionMode::AfterAfterFrameset;
                },
                Token::Tag(ref tag) if tag.opening && tag.name == interned!("noframes") => {
                    self.consume_in_mode(InsertionMode::InHead, token);
                },
                Token::EndOfFile => {
                    self.stop_parsing();
                },
                _ => {
                    self.parse_error(HtmlParseError::TreeConstruction);
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-body-insertion-mode
            InsertionMode::AfterAfterBody => match token {
                Token::Comment(data) => {
                    self.insert_comment_into_document(data);
                },
                Token::Doctype(_)
                | Token::Character(TAB | LINE_FEED | FORM_FEED | WHITESPACE) => {
                    self.consume_in_mode(InsertionMode::InBody, token);
                },
                Token::Tag(ref tag) if tag.opening && tag.name == interned!("html") => {
                    self.consume_in_mode(InsertionMode::InBody, token);
                },
                Token::EndOfFile => {
                    self.stop_parsing();
                },
                other => {
                    self.parse_error(HtmlParseError::TreeConstruction);
                    self.insertion_mode = InsertionMode::InBody;
                    self.consume(other);
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-frameset-insertion-mode
            InsertionMode::AfterAfterFrameset => match token {
                Token::Comment(data) => {
                    self.insert_comment_into_document(data);
                },
                Token::Doctype(_)
                | Token::Character(TAB | LINE_FEED | FORM_FEED | WHITESPACE) => {
                    self.consume_in_mode(InsertionMode::InBody, token);
                },
                Token::Tag(ref tag) if tag.opening && tag.name == interned!("html") => {
                    self.consume_in_mode(InsertionMode::InBody, token);
                },
                Token::Tag(ref tag) if tag.opening && tag.name == interned!("noframes") => {
                    self.consume_in_mode(InsertionMode::InHead, token);
                },
                Token::EndOfFile => {
                    self.stop_parsing();
                },
                _ => {
                    self.parse_error(HtmlParseError::TreeConstruction);
                },
            },
        }
    }
}

impl<P: ParseErrorHandler> Parser<P> {
    /// Record the first head element both on the parser and the Document.
    fn remember_head(&mut self, head: DomPtr) {
        if self.head.is_none() {
            self.head = Some(head.clone());
        }
        self.document
            .borrow_mut()
            .as_document_mut()
            .expect("parser document node is a Document")
            .set_head(head.downgrade());
    }

    /// Record the first body element on the Document.
    fn remember_body(&mut self, body: DomPtr) {
        self.document
            .borrow_mut()
            .as_document_mut()
            .expect("parser document node is a Document")
            .set_body(body.downgrade());
    }

    /// The InHead rules for `</template>`.
    fn handle_template_end_tag(&mut self) {
        if !self
            .open_elements
            .contains_html_element(interned!("template"))
        {
            self.parse_error(HtmlParseError::TreeConstruction);
            return;
        }

        self.generate_implied_end_tags_thoroughly();

        if !self.current_node().is_html_element(interned!("template")) {
            self.parse_error(HtmlParseError::TreeConstruction);
        }

        while let Some(popped) = self.open_elements.pop() {
            if popped.is_html_element(interned!("template")) {
                break;
            }
        }

        self.active_formatting_elements.clear_up_to_last_marker();
        self.template_insertion_modes.pop();
        self.reset_insertion_mode_appropriately();
    }

    /// Close an open `<caption>`; false means there was none in table
    /// scope and the token should be ignored.
    fn close_caption(&mut self) -> bool {
        if !self
            .open_elements
            .has_element_in_scope(interned!("caption"), Scope::Table)
        {
            self.parse_error(HtmlParseError::TreeConstruction);
            return false;
        }

        self.generate_implied_end_tags();
        if !self.current_node().is_html_element(interned!("caption")) {
            self.parse_error(HtmlParseError::TreeConstruction);
        }
        while let Some(popped) = self.open_elements.pop() {
            if popped.is_html_element(interned!("caption")) {
                break;
            }
        }
        self.active_formatting_elements.clear_up_to_last_marker();
        self.insertion_mode = InsertionMode::InTable;
        true
    }

    fn close_p_element_if_in_button_scope(&mut self) {
        if self
            .open_elements
            .has_element_in_scope(interned!("p"), Scope::Button)
        {
            self.close_p_element();
        }
    }

    /// The loop shared by `<li>`, `<dd>` and `<dt>`: close an open peer,
    /// stopping at special elements other than address, div and p.
    fn run_list_item_loop(&mut self, names: &[InternedString]) {
        self.frameset_ok = FramesetOkFlag::NotOk;

        let mut node_index = self.open_elements.len() - 1;
        loop {
            let node = self
                .open_elements
                .nth(node_index)
                .expect("node index is in bounds");

            if node.is_html_element_of(names) {
                let name = node.local_name().expect("node is an element");
                self.generate_implied_end_tags_excluding(Some(name));
                if !self.current_node().is_html_element(name) {
                    self.parse_error(HtmlParseError::TreeConstruction);
                }
                while let Some(popped) = self.open_elements.pop() {
                    if popped.is_html_element(name) {
                        break;
                    }
                }
                return;
            }

            let namespace = node.namespace().unwrap_or_default();
            let local_name = node.local_name().unwrap_or_default();
            let exempt = namespace == Namespace::Html
                && [interned!("address"), interned!("div"), interned!("p")]
                    .contains(&local_name);
            if is_special(namespace, local_name) && !exempt {
                return;
            }

            node_index -= 1;
        }
    }

    /// The open elements that do not make an EOF or `</body>` a parse
    /// error.
    fn stack_has_unexpected_open_elements(&self) -> bool {
        let allowed = [
            interned!("dd"),
            interned!("dt"),
            interned!("li"),
            interned!("optgroup"),
            interned!("option"),
            interned!("p"),
            interned!("rb"),
            interned!("rp"),
            interned!("rt"),
            interned!("rtc"),
            interned!("tbody"),
            interned!("td"),
            interned!("tfoot"),
            interned!("th"),
            interned!("thead"),
            interned!("tr"),
            interned!("body"),
            interned!("html"),
        ];

        self.open_elements
            .list()
            .iter()
            .any(|node| !node.is_html_element_of(&allowed))
    }

    /// <https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inforeign>
    fn consume_in_foreign_content(&mut self, token: Token) {
        match token {
            Token::Character('\0') => {
                self.parse_error(HtmlParseError::TreeConstruction);
                self.insert_character(UNICODE_REPLACEMENT);
            },
            Token::Character(c @ (TAB | LINE_FEED | FORM_FEED | WHITESPACE)) => {
                self.insert_character(c);
            },
            Token::Character(c) => {
                self.insert_character(c);
                self.frameset_ok = FramesetOkFlag::NotOk;
            },
            Token::Comment(data) => {
                self.insert_comment(data);
            },
            Token::Doctype(_) => {
                self.parse_error(HtmlParseError::TreeConstruction);
            },
            Token::Tag(ref tag) if Self::is_foreign_content_breakout(tag) => {
                // An HTML-looking tag inside foreign content closes the
                // foreign subtree.
                self.parse_error(HtmlParseError::TreeConstruction);

                loop {
                    let current = self.current_node();
                    let is_html = current.namespace() == Some(Namespace::Html);
                    if is_html
                        || Self::is_mathml_text_integration_point(&current)
                        || Self::is_html_integration_point(&current)
                    {
                        break;
                    }
                    self.open_elements.pop();
                }

                self.consume_in_mode(self.insertion_mode, token);
            },
            Token::Tag(mut tag) if tag.opening => {
                let adjusted_namespace = self
                    .adjusted_current_node()
                    .and_then(|node| node.namespace())
                    .unwrap_or_default();

                match adjusted_namespace {
                    Namespace::Svg => {
                        tag.name = adjust_svg_tag_name(tag.name);
                        tag.adjust_svg_attributes();
                    },
                    Namespace::MathML => {
                        tag.adjust_mathml_attributes();
                    },
                    _ => {},
                }

                self.insert_foreign_element(&tag, adjusted_namespace);

                if tag.self_closing {
                    // A self-closing <script> would execute here; either
                    // way the element is popped right away.
                    self.open_elements.pop();
                    self.acknowledge_self_closing_flag(&tag);
                }
            },
            Token::Tag(ref tag)
                if !tag.opening
                    && tag.name == interned!("script")
                    && self
                        .current_node()
                        .is_element_in(Namespace::Svg, interned!("script")) =>
            {
                // Script execution is stubbed out.
                self.open_elements.pop();
            },
            Token::Tag(ref tag) => {
                // Any other end tag.
                debug_assert!(!tag.opening);

                let mut node_index = self.open_elements.len() - 1;
                let mut node = self.current_node();

                let tag_name = tag.name;
                let name_matches = move |node: &DomPtr| {
                    node.local_name().is_some_and(|name| {
                        name.as_str().eq_ignore_ascii_case(tag_name.as_str())
                    })
                };

                if !name_matches(&node) {
                    self.parse_error(HtmlParseError::TreeConstruction);
                }

                loop {
                    if node_index == 0 {
                        // Fragment case.
                        return;
                    }

                    if name_matches(&node) {
                        while let Some(popped) = self.open_elements.pop() {
                            if popped.ptr_eq(&node) {
                                return;
                            }
                        }
                        return;
                    }

                    node_index -= 1;
                    node = self
                        .open_elements
                        .nth(node_index)
                        .expect("node index is in bounds");

                    if node.namespace() == Some(Namespace::Html) {
                        // Back to the regular insertion modes.
                        self.consume_in_mode(self.insertion_mode, token);
                        return;
                    }
                }
            },
            Token::EndOfFile => {
                unreachable!("the dispatcher never routes EOF to foreign content")
            },
        }
    }

    /// The start tags (and `</br>`, `</p>`) that break out of foreign
    /// content.
    fn is_foreign_content_breakout(tag: &TagData) -> bool {
        if !tag.opening {
            return tag.name == interned!("br") || tag.name == interned!("p");
        }

        let breakout_names = [
            interned!("b"),
            interned!("big"),
            interned!("blockquote"),
            interned!("body"),
            interned!("br"),
            interned!("center"),
            interned!("code"),
            interned!("dd"),
            interned!("div"),
            interned!("dl"),
            interned!("dt"),
            interned!("em"),
            interned!("embed"),
            interned!("h1"),
            interned!("h2"),
            interned!("h3"),
            interned!("h4"),
            interned!("h5"),
            interned!("h6"),
            interned!("head"),
            interned!("hr"),
            interned!("i"),
            interned!("img"),
            interned!("li"),
            interned!("listing"),
            interned!("menu"),
            interned!("meta"),
            interned!("nobr"),
            interned!("ol"),
            interned!("p"),
            interned!("pre"),
            interned!("ruby"),
            interned!("s"),
            interned!("small"),
            interned!("span"),
            interned!("strong"),
            interned!("strike"),
            interned!("sub"),
            interned!("sup"),
            interned!("table"),
            interned!("tt"),
            interned!("u"),
            interned!("ul"),
            interned!("var"),
        ];

        if breakout_names.contains(&tag.name) {
            return true;
        }

        tag.name == interned!("font")
            && (tag.lookup_attribute(interned!("color")).is_some()
                || tag.lookup_attribute(interned!("face")).is_some()
                || tag.lookup_attribute(interned!("size")).is_some())
    }
}

/// <https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inforeign>
///
/// SVG tag names that keep their mixed capitalisation despite the
/// tokenizer's lowercasing.
fn adjust_svg_tag_name(name: InternedString) -> InternedString {
    let adjusted = match name.as_str() {
        "altglyph" => "altGlyph",
        "altglyphdef" => "altGlyphDef",
        "altglyphitem" => "altGlyphItem",
        "animatecolor" => "animateColor",
        "animatemotion" => "animateMotion",
        "animatetransform" => "animateTransform",
        "clippath" => "clipPath",
        "feblend" => "feBlend",
        "fecolormatrix" => "feColorMatrix",
        "fecomponenttransfer" => "feComponentTransfer",
        "fecomposite" => "feComposite",
        "feconvolvematrix" => "feConvolveMatrix",
        "fediffuselighting" => "feDiffuseLighting",
        "fedisplacementmap" => "feDisplacementMap",
        "fedistantlight" => "feDistantLight",
        "fedropshadow" => "feDropShadow",
        "feflood" => "feFlood",
        "fefunca" => "feFuncA",
        "fefuncb" => "feFuncB",
        "fefuncg" => "feFuncG",
        "fefuncr" => "feFuncR",
        "fegaussianblur" => "feGaussianBlur",
        "feimage" => "feImage",
        "femerge" => "feMerge",
        "femergenode" => "feMergeNode",
        "femorphology" => "feMorphology",
        "feoffset" => "feOffset",
        "fepointlight" => "fePointLight",
        "fespecularlighting" => "feSpecularLighting",
        "fespotlight" => "feSpotLight",
        "fetile" => "feTile",
        "feturbulence" => "feTurbulence",
        "foreignobject" => "foreignObject",
        "glyphref" => "glyphRef",
        "lineargradient" => "linearGradient",
        "radialgradient" => "radialGradient",
        "textpath" => "textPath",
        _ => return name,
    };
    InternedString::from_static(adjusted)
}
