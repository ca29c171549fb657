//! The tokenizer state machine.
//!
//! <https://html.spec.whatwg.org/multipage/parsing.html#tokenization>
//!
//! Every state is one arm of the `match` in [Tokenizer::step]. Tokens are
//! queued on an internal buffer and drained through the [Iterator] impl;
//! the tree builder may switch states between tokens (RCDATA, RAWTEXT,
//! script data, PLAINTEXT) and those switches take effect on the very next
//! step.

use std::{collections::VecDeque, marker::PhantomData, mem};

use ld_std::chars::ReversibleCharIterator;

use crate::infra;

use super::{
    lookup_character_reference, token::CurrentToken, HtmlParseError, IgnoreParseErrors,
    ParseErrorHandler, Token,
};

const UNICODE_REPLACEMENT: char = '\u{FFFD}';
const TAB: char = '\u{0009}';
const LINE_FEED: char = '\u{000A}';
const FORM_FEED: char = '\u{000C}';
const SPACE: char = '\u{0020}';

/// The states of the tokenizer, named as in the spec.
///
/// `Rcdata`, `Rawtext`, `ScriptData` and `Plaintext` are entry points the
/// tree builder switches to via [Tokenizer::switch_to].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenizerState {
    Data,
    Rcdata,
    Rawtext,
    ScriptData,
    Plaintext,
    TagOpen,
    EndTagOpen,
    TagName,
    RcdataLessThanSign,
    RcdataEndTagOpen,
    RcdataEndTagName,
    RawtextLessThanSign,
    RawtextEndTagOpen,
    RawtextEndTagName,
    ScriptDataLessThanSign,
    ScriptDataEndTagOpen,
    ScriptDataEndTagName,
    ScriptDataEscapeStart,
    ScriptDataEscapeStartDash,
    ScriptDataEscaped,
    ScriptDataEscapedDash,
    ScriptDataEscapedDashDash,
    ScriptDataEscapedLessThanSign,
    ScriptDataEscapedEndTagOpen,
    ScriptDataEscapedEndTagName,
    ScriptDataDoubleEscapeStart,
    ScriptDataDoubleEscaped,
    ScriptDataDoubleEscapedDash,
    ScriptDataDoubleEscapedDashDash,
    ScriptDataDoubleEscapedLessThanSign,
    ScriptDataDoubleEscapeEnd,
    BeforeAttributeName,
    AttributeName,
    AfterAttributeName,
    BeforeAttributeValue,
    AttributeValueDoubleQuoted,
    AttributeValueSingleQuoted,
    AttributeValueUnquoted,
    AfterAttributeValueQuoted,
    SelfClosingStartTag,
    BogusComment,
    MarkupDeclarationOpen,
    CommentStart,
    CommentStartDash,
    Comment,
    CommentLessThanSign,
    CommentLessThanSignBang,
    CommentLessThanSignBangDash,
    CommentLessThanSignBangDashDash,
    CommentEndDash,
    CommentEnd,
    CommentEndBang,
    Doctype,
    BeforeDoctypeName,
    DoctypeName,
    AfterDoctypeName,
    AfterDoctypePublicKeyword,
    BeforeDoctypePublicIdentifier,
    DoctypePublicIdentifierDoubleQuoted,
    DoctypePublicIdentifierSingleQuoted,
    AfterDoctypePublicIdentifier,
    BetweenDoctypePublicAndSystemIdentifiers,
    AfterDoctypeSystemKeyword,
    BeforeDoctypeSystemIdentifier,
    DoctypeSystemIdentifierDoubleQuoted,
    DoctypeSystemIdentifierSingleQuoted,
    AfterDoctypeSystemIdentifier,
    BogusDoctype,
    CdataSection,
    CdataSectionBracket,
    CdataSectionEnd,
    CharacterReference,
    NamedCharacterReference,
    AmbiguousAmpersand,
    NumericCharacterReference,
    HexadecimalCharacterReferenceStart,
    DecimalCharacterReferenceStart,
    HexadecimalCharacterReference,
    DecimalCharacterReference,
    NumericCharacterReferenceEnd,
}

pub struct Tokenizer<P: ParseErrorHandler = IgnoreParseErrors> {
    /// The preprocessed (newline-normalized) input.
    source: ReversibleCharIterator<String>,

    state: TokenizerState,

    /// Set for the duration of a character reference excursion.
    return_state: Option<TokenizerState>,

    /// The token currently being assembled.
    current_token: CurrentToken,

    /// The temporary buffer.
    buffer: String,

    /// Used for the "appropriate end tag" check in RCDATA/RAWTEXT/script
    /// data.
    last_emitted_start_tag_name: Option<String>,

    character_reference_code: u32,

    /// Tokens ready to be handed out.
    token_buffer: VecDeque<Token>,

    /// Whether `<![CDATA[` opens a real CDATA section. Kept up to date by
    /// the tree builder: true iff the adjusted current node is a non-HTML
    /// element.
    cdata_allowed: bool,

    /// High-water mark for input-stream validation, so characters seen
    /// again through "reconsume" are not reported twice.
    validated_up_to: usize,

    done: bool,

    marker: PhantomData<P>,
}

impl<P: ParseErrorHandler> Tokenizer<P> {
    #[must_use]
    pub fn new(source: &str) -> Self {
        // https://infra.spec.whatwg.org/#normalize-newlines
        let source = infra::normalize_newlines(source);

        Self {
            source: ReversibleCharIterator::new(source),
            state: TokenizerState::Data,
            return_state: None,
            current_token: CurrentToken::default(),
            buffer: String::new(),
            last_emitted_start_tag_name: None,
            character_reference_code: 0,
            token_buffer: VecDeque::new(),
            cdata_allowed: false,
            validated_up_to: 0,
            done: false,
            marker: PhantomData,
        }
    }

    /// Set the current state. The tree builder uses this to enter RCDATA,
    /// RAWTEXT, script data and PLAINTEXT.
    pub fn switch_to(&mut self, state: TokenizerState) {
        self.state = state;
    }

    /// See [Tokenizer::cdata_allowed].
    pub fn set_cdata_allowed(&mut self, allowed: bool) {
        self.cdata_allowed = allowed;
    }

    /// Override the name used for the "appropriate end tag" check.
    /// Fragment parsing seeds this with the context element's name.
    pub fn set_last_start_tag(&mut self, name: Option<String>) {
        self.last_emitted_start_tag_name = name;
    }

    #[inline]
    fn parse_error(&self, error: HtmlParseError) {
        P::handle(error);
    }

    fn emit(&mut self, token: Token) {
        self.token_buffer.push_back(token);
    }

    fn emit_character(&mut self, c: char) {
        self.emit(Token::Character(c));
    }

    fn emit_eof(&mut self) {
        self.emit(Token::EndOfFile);
    }

    /// Finish and emit the token being assembled.
    fn emit_current_token(&mut self) {
        let (token, attributes_unique) = self.current_token.build();
        let Some(token) = token else {
            debug_assert!(false, "no token under construction");
            return;
        };

        if !attributes_unique {
            self.parse_error(HtmlParseError::DuplicateAttribute);
        }

        if let Token::Tag(tag) = &token {
            if tag.opening {
                self.last_emitted_start_tag_name = Some(tag.name.as_str().to_owned());
            } else {
                // End tags carry these fields but may not use them.
                if !tag.attributes.is_empty() {
                    self.parse_error(HtmlParseError::EndTagWithAttributes);
                }
                if tag.self_closing {
                    self.parse_error(HtmlParseError::EndTagWithTrailingSolidus);
                }
            }
        }

        self.emit(token);
    }

    fn reconsume_in(&mut self, state: TokenizerState) {
        self.source.go_back();
        self.switch_to(state);
    }

    /// Consume the next input character.
    ///
    /// Surrogates cannot occur in a `&str`; noncharacters and controls are
    /// reported here, once per input position.
    fn read_next(&mut self) -> Option<char> {
        let next = self.source.next();

        if let Some(c) = next {
            if self.source.position() > self.validated_up_to {
                self.validated_up_to = self.source.position();

                if infra::is_noncharacter(c) {
                    self.parse_error(HtmlParseError::NoncharacterInInputStream);
                } else if c != '\0'
                    && !matches!(c, TAB | LINE_FEED | FORM_FEED | SPACE)
                    && (c.is_ascii_control() || ('\u{7F}'..='\u{9F}').contains(&c))
                {
                    self.parse_error(HtmlParseError::ControlCharacterInInputStream);
                }
            }
        }

        next
    }

    fn add_to_buffer(&mut self, c: char) {
        self.buffer.push(c);
    }

    /// <https://html.spec.whatwg.org/multipage/parsing.html#charref-in-attribute>
    #[must_use]
    fn charref_in_attribute(&self) -> bool {
        matches!(
            self.return_state,
            Some(
                TokenizerState::AttributeValueDoubleQuoted
                    | TokenizerState::AttributeValueSingleQuoted
                    | TokenizerState::AttributeValueUnquoted
            )
        )
    }

    /// <https://html.spec.whatwg.org/multipage/parsing.html#flush-code-points-consumed-as-a-character-reference>
    fn flush_code_points_consumed_as_character_reference(&mut self) {
        let buffer = mem::take(&mut self.buffer);
        if self.charref_in_attribute() {
            self.current_token.append_str_to_attribute_value(&buffer);
        } else {
            for c in buffer.chars() {
                self.emit_character(c);
            }
        }
    }

    /// Whether the end tag being assembled matches the last start tag that
    /// was emitted.
    ///
    /// <https://html.spec.whatwg.org/multipage/parsing.html#appropriate-end-tag-token>
    #[must_use]
    fn is_appropriate_end_tag(&self) -> bool {
        self.current_token.is_end_tag()
            && self.last_emitted_start_tag_name.as_deref() == self.current_token.tag_name()
    }

    /// Bail out of an RCDATA/RAWTEXT/script-data end tag that turned out
    /// not to be one: emit `</` and the buffered characters verbatim.
    fn emit_solidus_and_buffer_as_characters(&mut self) {
        self.emit_character('<');
        self.emit_character('/');
        let buffer = mem::take(&mut self.buffer);
        for c in buffer.chars() {
            self.emit_character(c);
        }
    }

    fn return_state_or_data(&self) -> TokenizerState {
        self.return_state.unwrap_or(TokenizerState::Data)
    }
}

impl<P: ParseErrorHandler> Tokenizer<P> {
    /// Run a single step of the state machine.
    ///
    /// A step handles exactly one input character (or the end of the
    /// input) and may queue any number of tokens.
    pub fn step(&mut self) {
        match self.state {
            // https://html.spec.whatwg.org/multipage/parsing.html#data-state
            TokenizerState::Data => match self.read_next() {
                Some('&') => {
                    self.return_state = Some(TokenizerState::Data);
                    self.switch_to(TokenizerState::CharacterReference);
                },
                Some('<') => {
                    self.switch_to(TokenizerState::TagOpen);
                },
                Some('\0') => {
                    // The NULL byte survives here; the tree builder
                    // decides what to do with it.
                    self.parse_error(HtmlParseError::UnexpectedNullCharacter);
                    self.emit_character('\0');
                },
                Some(c) => {
                    self.emit_character(c);
                },
                None => {
                    self.emit_eof();
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#rcdata-state
            TokenizerState::Rcdata => match self.read_next() {
                Some('&') => {
                    self.return_state = Some(TokenizerState::Rcdata);
                    self.switch_to(TokenizerState::CharacterReference);
                },
                Some('<') => {
                    self.switch_to(TokenizerState::RcdataLessThanSign);
                },
                Some('\0') => {
                    self.parse_error(HtmlParseError::UnexpectedNullCharacter);
                    self.emit_character(UNICODE_REPLACEMENT);
                },
                Some(c) => {
                    self.emit_character(c);
                },
                None => {
                    self.emit_eof();
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#rawtext-state
            TokenizerState::Rawtext => match self.read_next() {
                Some('<') => {
                    self.switch_to(TokenizerState::RawtextLessThanSign);
                },
                Some('\0') => {
                    self.parse_error(HtmlParseError::UnexpectedNullCharacter);
                    self.emit_character(UNICODE_REPLACEMENT);
                },
                Some(c) => {
                    self.emit_character(c);
                },
                None => {
                    self.emit_eof();
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#script-data-state
            TokenizerState::ScriptData => match self.read_next() {
                Some('<') => {
                    self.switch_to(TokenizerState::ScriptDataLessThanSign);
                },
                Some('\0') => {
                    self.parse_error(HtmlParseError::UnexpectedNullCharacter);
                    self.emit_character(UNICODE_REPLACEMENT);
                },
                Some(c) => {
                    self.emit_character(c);
                },
                None => {
                    self.emit_eof();
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#plaintext-state
            TokenizerState::Plaintext => match self.read_next() {
                Some('\0') => {
                    self.parse_error(HtmlParseError::UnexpectedNullCharacter);
                    self.emit_character(UNICODE_REPLACEMENT);
                },
                Some(c) => {
                    self.emit_character(c);
                },
                None => {
                    self.emit_eof();
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#tag-open-state
            TokenizerState::TagOpen => match self.read_next() {
                Some('!') => {
                    self.switch_to(TokenizerState::MarkupDeclarationOpen);
                },
                Some('/') => {
                    self.switch_to(TokenizerState::EndTagOpen);
                },
                Some(c) if c.is_ascii_alphabetic() => {
                    self.current_token.create_start_tag();
                    self.reconsume_in(TokenizerState::TagName);
                },
                Some('?') => {
                    self.parse_error(HtmlParseError::UnexpectedQuestionMarkInsteadOfTagName);
                    self.current_token.create_comment();
                    self.reconsume_in(TokenizerState::BogusComment);
                },
                Some(_) => {
                    self.parse_error(HtmlParseError::InvalidFirstCharacterOfTagName);
                    self.emit_character('<');
                    self.reconsume_in(TokenizerState::Data);
                },
                None => {
                    self.parse_error(HtmlParseError::EofBeforeTagName);
                    self.emit_character('<');
                    self.emit_eof();
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#end-tag-open-state
            TokenizerState::EndTagOpen => match self.read_next() {
                Some(c) if c.is_ascii_alphabetic() => {
                    self.current_token.create_end_tag();
                    self.reconsume_in(TokenizerState::TagName);
                },
                Some('>') => {
                    self.parse_error(HtmlParseError::MissingEndTagName);
                    self.switch_to(TokenizerState::Data);
                },
                Some(_) => {
                    self.parse_error(HtmlParseError::InvalidFirstCharacterOfTagName);
                    self.current_token.create_comment();
                    self.reconsume_in(TokenizerState::BogusComment);
                },
                None => {
                    self.parse_error(HtmlParseError::EofBeforeTagName);
                    self.emit_character('<');
                    self.emit_character('/');
                    self.emit_eof();
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state
            TokenizerState::TagName => match self.read_next() {
                Some(TAB | LINE_FEED | FORM_FEED | SPACE) => {
                    self.switch_to(TokenizerState::BeforeAttributeName);
                },
                Some('/') => {
                    self.switch_to(TokenizerState::SelfClosingStartTag);
                },
                Some('>') => {
                    self.switch_to(TokenizerState::Data);
                    self.emit_current_token();
                },
                Some(c @ 'A'..='Z') => {
                    self.current_token.append_to_tag_name(c.to_ascii_lowercase());
                },
                Some('\0') => {
                    self.parse_error(HtmlParseError::UnexpectedNullCharacter);
                    self.current_token.append_to_tag_name(UNICODE_REPLACEMENT);
                },
                Some(c) => {
                    self.current_token.append_to_tag_name(c);
                },
                None => {
                    self.parse_error(HtmlParseError::EofInTag);
                    self.emit_eof();
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#rcdata-less-than-sign-state
            TokenizerState::RcdataLessThanSign => match self.read_next() {
                Some('/') => {
                    self.buffer.clear();
                    self.switch_to(TokenizerState::RcdataEndTagOpen);
                },
                _ => {
                    self.emit_character('<');
                    self.reconsume_in(TokenizerState::Rcdata);
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#rcdata-end-tag-open-state
            TokenizerState::RcdataEndTagOpen => match self.read_next() {
                Some(c) if c.is_ascii_alphabetic() => {
                    self.current_token.create_end_tag();
                    self.reconsume_in(TokenizerState::RcdataEndTagName);
                },
                _ => {
                    self.emit_character('<');
                    self.emit_character('/');
                    self.reconsume_in(TokenizerState::Rcdata);
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#rcdata-end-tag-name-state
            TokenizerState::RcdataEndTagName => match self.read_next() {
                Some(TAB | LINE_FEED | FORM_FEED | SPACE) if self.is_appropriate_end_tag() => {
                    self.switch_to(TokenizerState::BeforeAttributeName);
                },
                Some('/') if self.is_appropriate_end_tag() => {
                    self.switch_to(TokenizerState::SelfClosingStartTag);
                },
                Some('>') if self.is_appropriate_end_tag() => {
                    self.switch_to(TokenizerState::Data);
                    self.emit_current_token();
                },
                Some(c) if c.is_ascii_alphabetic() => {
                    self.current_token.append_to_tag_name(c.to_ascii_lowercase());
                    self.add_to_buffer(c);
                },
                _ => {
                    self.emit_solidus_and_buffer_as_characters();
                    self.reconsume_in(TokenizerState::Rcdata);
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#rawtext-less-than-sign-state
            TokenizerState::RawtextLessThanSign => match self.read_next() {
                Some('/') => {
                    self.buffer.clear();
                    self.switch_to(TokenizerState::RawtextEndTagOpen);
                },
                _ => {
                    self.emit_character('<');
                    self.reconsume_in(TokenizerState::Rawtext);
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#rawtext-end-tag-open-state
            TokenizerState::RawtextEndTagOpen => match self.read_next() {
                Some(c) if c.is_ascii_alphabetic() => {
                    self.current_token.create_end_tag();
                    self.reconsume_in(TokenizerState::RawtextEndTagName);
                },
                _ => {
                    self.emit_character('<');
                    self.emit_character('/');
                    self.reconsume_in(TokenizerState::Rawtext);
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#rawtext-end-tag-name-state
            TokenizerState::RawtextEndTagName => match self.read_next() {
                Some(TAB | LINE_FEED | FORM_FEED | SPACE) if self.is_appropriate_end_tag() => {
                    self.switch_to(TokenizerState::BeforeAttributeName);
                },
                Some('/') if self.is_appropriate_end_tag() => {
                    self.switch_to(TokenizerState::SelfClosingStartTag);
                },
                Some('>') if self.is_appropriate_end_tag() => {
                    self.switch_to(TokenizerState::Data);
                    self.emit_current_token();
                },
                Some(c) if c.is_ascii_alphabetic() => {
                    self.current_token.append_to_tag_name(c.to_ascii_lowercase());
                    self.add_to_buffer(c);
                },
                _ => {
                    self.emit_solidus_and_buffer_as_characters();
                    self.reconsume_in(TokenizerState::Rawtext);
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#script-data-less-than-sign-state
            TokenizerState::ScriptDataLessThanSign => match self.read_next() {
                Some('/') => {
                    self.buffer.clear();
                    self.switch_to(TokenizerState::ScriptDataEndTagOpen);
                },
                Some('!') => {
                    self.switch_to(TokenizerState::ScriptDataEscapeStart);
                    self.emit_character('<');
                    self.emit_character('!');
                },
                _ => {
                    self.emit_character('<');
                    self.reconsume_in(TokenizerState::ScriptData);
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#script-data-end-tag-open-state
            TokenizerState::ScriptDataEndTagOpen => match self.read_next() {
                Some(c) if c.is_ascii_alphabetic() => {
                    self.current_token.create_end_tag();
                    self.reconsume_in(TokenizerState::ScriptDataEndTagName);
                },
                _ => {
                    self.emit_character('<');
                    self.emit_character('/');
                    self.reconsume_in(TokenizerState::ScriptData);
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#script-data-end-tag-name-state
            TokenizerState::ScriptDataEndTagName => match self.read_next() {
                Some(TAB | LINE_FEED | FORM_FEED | SPACE) if self.is_appropriate_end_tag() => {
                    self.switch_to(TokenizerState::BeforeAttributeName);
                },
                Some('/') if self.is_appropriate_end_tag() => {
                    self.switch_to(TokenizerState::SelfClosingStartTag);
                },
                Some('>') if self.is_appropriate_end_tag() => {
                    self.switch_to(TokenizerState::Data);
                    self.emit_current_token();
                },
                Some(c) if c.is_ascii_alphabetic() => {
                    self.current_token.append_to_tag_name(c.to_ascii_lowercase());
                    self.add_to_buffer(c);
                },
                _ => {
                    self.emit_solidus_and_buffer_as_characters();
                    self.reconsume_in(TokenizerState::ScriptData);
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#script-data-escape-start-state
            TokenizerState::ScriptDataEscapeStart => match self.read_next() {
                Some('-') => {
                    self.switch_to(TokenizerState::ScriptDataEscapeStartDash);
                    self.emit_character('-');
                },
                _ => {
                    self.reconsume_in(TokenizerState::ScriptData);
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#script-data-escape-start-dash-state
            TokenizerState::ScriptDataEscapeStartDash => match self.read_next() {
                Some('-') => {
                    self.switch_to(TokenizerState::ScriptDataEscapedDashDash);
                    self.emit_character('-');
                },
                _ => {
                    self.reconsume_in(TokenizerState::ScriptData);
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-state
            TokenizerState::ScriptDataEscaped => match self.read_next() {
                Some('-') => {
                    self.switch_to(TokenizerState::ScriptDataEscapedDash);
                    self.emit_character('-');
                },
                Some('<') => {
                    self.switch_to(TokenizerState::ScriptDataEscapedLessThanSign);
                },
                Some('\0') => {
                    self.parse_error(HtmlParseError::UnexpectedNullCharacter);
                    self.emit_character(UNICODE_REPLACEMENT);
                },
                Some(c) => {
                    self.emit_character(c);
                },
                None => {
                    self.parse_error(HtmlParseError::EofInScriptHtmlCommentLikeText);
                    self.emit_eof();
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-dash-state
            TokenizerState::ScriptDataEscapedDash => match self.read_next() {
                Some('-') => {
                    self.switch_to(TokenizerState::ScriptDataEscapedDashDash);
                    self.emit_character('-');
                },
                Some('<') => {
                    self.switch_to(TokenizerState::ScriptDataEscapedLessThanSign);
                },
                Some('\0') => {
                    self.parse_error(HtmlParseError::UnexpectedNullCharacter);
                    self.switch_to(TokenizerState::ScriptDataEscaped);
                    self.emit_character(UNICODE_REPLACEMENT);
                },
                Some(c) => {
                    self.switch_to(TokenizerState::ScriptDataEscaped);
                    self.emit_character(c);
                },
                None => {
                    self.parse_error(HtmlParseError::EofInScriptHtmlCommentLikeText);
                    self.emit_eof();
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-dash-dash-state
            TokenizerState::ScriptDataEscapedDashDash => match self.read_next() {
                Some('-') => {
                    self.emit_character('-');
                },
                Some('<') => {
                    self.switch_to(TokenizerState::ScriptDataEscapedLessThanSign);
                },
                Some('>') => {
                    self.switch_to(TokenizerState::ScriptData);
                    self.emit_character('>');
                },
                Some('\0') => {
                    self.parse_error(HtmlParseError::UnexpectedNullCharacter);
                    self.switch_to(TokenizerState::ScriptDataEscaped);
                    self.emit_character(UNICODE_REPLACEMENT);
                },
                Some(c) => {
                    self.switch_to(TokenizerState::ScriptDataEscaped);
                    self.emit_character(c);
                },
                None => {
                    self.parse_error(HtmlParseError::EofInScriptHtmlCommentLikeText);
                    self.emit_eof();
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-less-than-sign-state
            TokenizerState::ScriptDataEscapedLessThanSign => match self.read_next() {
                Some('/') => {
                    self.buffer.clear();
                    self.switch_to(TokenizerState::ScriptDataEscapedEndTagOpen);
                },
                Some(c) if c.is_ascii_alphabetic() => {
                    self.buffer.clear();
                    self.emit_character('<');
                    self.reconsume_in(TokenizerState::ScriptDataDoubleEscapeStart);
                },
                _ => {
                    self.emit_character('<');
                    self.reconsume_in(TokenizerState::ScriptDataEscaped);
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-end-tag-open-state
            TokenizerState::ScriptDataEscapedEndTagOpen => match self.read_next() {
                Some(c) if c.is_ascii_alphabetic() => {
                    self.current_token.create_end_tag();
                    self.reconsume_in(TokenizerState::ScriptDataEscapedEndTagName);
                },
                _ => {
                    self.emit_character('<');
                    self.emit_character('/');
                    self.reconsume_in(TokenizerState::ScriptDataEscaped);
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-end-tag-name-state
            TokenizerState::ScriptDataEscapedEndTagName => match self.read_next() {
                Some(TAB | LINE_FEED | FORM_FEED | SPACE) if self.is_appropriate_end_tag() => {
                    self.switch_to(TokenizerState::BeforeAttributeName);
                },
                Some('/') if self.is_appropriate_end_tag() => {
                    self.switch_to(TokenizerState::SelfClosingStartTag);
                },
                Some('>') if self.is_appropriate_end_tag() => {
                    self.switch_to(TokenizerState::Data);
                    self.emit_current_token();
                },
                Some(c) if c.is_ascii_alphabetic() => {
                    self.current_token.append_to_tag_name(c.to_ascii_lowercase());
                    self.add_to_buffer(c);
                },
                _ => {
                    self.emit_solidus_and_buffer_as_characters();
                    self.reconsume_in(TokenizerState::ScriptDataEscaped);
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escape-start-state
            TokenizerState::ScriptDataDoubleEscapeStart => match self.read_next() {
                Some(c @ (TAB | LINE_FEED | FORM_FEED | SPACE | '/' | '>')) => {
                    if self.buffer == "script" {
                        self.switch_to(TokenizerState::ScriptDataDoubleEscaped);
                    } else {
                        self.switch_to(TokenizerState::ScriptDataEscaped);
                    }
                    self.emit_character(c);
                },
                Some(c) if c.is_ascii_alphabetic() => {
                    self.add_to_buffer(c.to_ascii_lowercase());
                    self.emit_character(c);
                },
                _ => {
                    self.reconsume_in(TokenizerState::ScriptDataEscaped);
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escaped-state
            TokenizerState::ScriptDataDoubleEscaped => match self.read_next() {
                Some('-') => {
                    self.switch_to(TokenizerState::ScriptDataDoubleEscapedDash);
                    self.emit_character('-');
                },
                Some('<') => {
                    self.switch_to(TokenizerState::ScriptDataDoubleEscapedLessThanSign);
                    self.emit_character('<');
                },
                Some('\0') => {
                    self.parse_error(HtmlParseError::UnexpectedNullCharacter);
                    self.emit_character(UNICODE_REPLACEMENT);
                },
                Some(c) => {
                    self.emit_character(c);
                },
                None => {
                    self.parse_error(HtmlParseError::EofInScriptHtmlCommentLikeText);
                    self.emit_eof();
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escaped-dash-state
            TokenizerState::ScriptDataDoubleEscapedDash => match self.read_next() {
                Some('-') => {
                    self.switch_to(TokenizerState::ScriptDataDoubleEscapedDashDash);
                    self.emit_character('-');
                },
                Some('<') => {
                    self.switch_to(TokenizerState::ScriptDataDoubleEscapedLessThanSign);
                    self.emit_character('<');
                },
                Some('\0') => {
                    self.parse_error(HtmlParseError::UnexpectedNullCharacter);
                    self.switch_to(TokenizerState::ScriptDataDoubleEscaped);
                    self.emit_character(UNICODE_REPLACEMENT);
                },
                Some(c) => {
                    self.switch_to(TokenizerState::ScriptDataDoubleEscaped);
                    self.emit_character(c);
                },
                None => {
                    self.parse_error(HtmlParseError::EofInScriptHtmlCommentLikeText);
                    self.emit_eof();
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escaped-dash-dash-state
            TokenizerState::ScriptDataDoubleEscapedDashDash => match self.read_next() {
                Some('-') => {
                    self.emit_character('-');
                },
                Some('<') => {
                    self.switch_to(TokenizerState::ScriptDataDoubleEscapedLessThanSign);
                    self.emit_character('<');
                },
                Some('>') => {
                    self.switch_to(TokenizerState::ScriptData);
                    self.emit_character('>');
                },
                Some('\0') => {
                    self.parse_error(HtmlParseError::UnexpectedNullCharacter);
                    self.switch_to(TokenizerState::ScriptDataDoubleEscaped);
                    self.emit_character(UNICODE_REPLACEMENT);
                },
                Some(c) => {
                    self.switch_to(TokenizerState::ScriptDataDoubleEscaped);
                    self.emit_character(c);
                },
                None => {
                    self.parse_error(HtmlParseError::EofInScriptHtmlCommentLikeText);
                    self.emit_eof();
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escaped-less-than-sign-state
            TokenizerState::ScriptDataDoubleEscapedLessThanSign => match self.read_next() {
                Some('/') => {
                    self.buffer.clear();
                    self.switch_to(TokenizerState::ScriptDataDoubleEscapeEnd);
                    self.emit_character('/');
                },
                _ => {
                    self.reconsume_in(TokenizerState::ScriptDataDoubleEscaped);
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escape-end-state
            TokenizerState::ScriptDataDoubleEscapeEnd => match self.read_next() {
                Some(c @ (TAB | LINE_FEED | FORM_FEED | SPACE | '/' | '>')) => {
                    if self.buffer == "script" {
                        self.switch_to(TokenizerState::ScriptDataEscaped);
                    } else {
                        self.switch_to(TokenizerState::ScriptDataDoubleEscaped);
                    }
                    self.emit_character(c);
                },
                Some(c) if c.is_ascii_alphabetic() => {
                    self.add_to_buffer(c.to_ascii_lowercase());
                    self.emit_character(c);
                },
                _ => {
                    self.reconsume_in(TokenizerState::ScriptDataDoubleEscaped);
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state
            TokenizerState::BeforeAttributeName => match self.read_next() {
                Some(TAB | LINE_FEED | FORM_FEED | SPACE) => {
                    // Ignore the character.
                },
                Some('/' | '>') | None => {
                    self.reconsume_in(TokenizerState::AfterAttributeName);
                },
                Some('=') => {
                    self.parse_error(HtmlParseError::UnexpectedEqualsSignBeforeAttributeName);
                    if !self.current_token.start_new_attribute() {
                        self.parse_error(HtmlParseError::DuplicateAttribute);
                    }
                    self.current_token.append_to_attribute_name('=');
                    self.switch_to(TokenizerState::AttributeName);
                },
                Some(_) => {
                    if !self.current_token.start_new_attribute() {
                        self.parse_error(HtmlParseError::DuplicateAttribute);
                    }
                    self.reconsume_in(TokenizerState::AttributeName);
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state
            TokenizerState::AttributeName => match self.read_next() {
                Some(TAB | LINE_FEED | FORM_FEED | SPACE | '/' | '>') | None => {
                    self.reconsume_in(TokenizerState::AfterAttributeName);
                },
                Some('=') => {
                    self.switch_to(TokenizerState::BeforeAttributeValue);
                },
                Some(c @ 'A'..='Z') => {
                    self.current_token
                        .append_to_attribute_name(c.to_ascii_lowercase());
                },
                Some('\0') => {
                    self.parse_error(HtmlParseError::UnexpectedNullCharacter);
                    self.current_token
                        .append_to_attribute_name(UNICODE_REPLACEMENT);
                },
                Some(c @ ('"' | '\'' | '<')) => {
                    self.parse_error(HtmlParseError::UnexpectedCharacterInAttributeName);
                    self.current_token.append_to_attribute_name(c);
                },
                Some(c) => {
                    self.current_token.append_to_attribute_name(c);
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-name-state
            TokenizerState::AfterAttributeName => match self.read_next() {
                Some(TAB | LINE_FEED | FORM_FEED | SPACE) => {
                    // Ignore the character.
                },
                Some('/') => {
                    self.switch_to(TokenizerState::SelfClosingStartTag);
                },
                Some('=') => {
                    self.switch_to(TokenizerState::BeforeAttributeValue);
                },
                Some('>') => {
                    self.switch_to(TokenizerState::Data);
                    self.emit_current_token();
                },
                Some(_) => {
                    if !self.current_token.start_new_attribute() {
                        self.parse_error(HtmlParseError::DuplicateAttribute);
                    }
                    self.reconsume_in(TokenizerState::AttributeName);
                },
                None => {
                    self.parse_error(HtmlParseError::EofInTag);
                    self.emit_eof();
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-value-state
            TokenizerState::BeforeAttributeValue => match self.read_next() {
                Some(TAB | LINE_FEED | FORM_FEED | SPACE) => {
                    // Ignore the character.
                },
                Some('"') => {
                    self.switch_to(TokenizerState::AttributeValueDoubleQuoted);
                },
                Some('\'') => {
                    self.switch_to(TokenizerState::AttributeValueSingleQuoted);
                },
                Some('>') => {
                    self.parse_error(HtmlParseError::MissingAttributeValue);
                    self.switch_to(TokenizerState::Data);
                    self.emit_current_token();
                },
                _ => {
                    self.reconsume_in(TokenizerState::AttributeValueUnquoted);
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(double-quoted)-state
            TokenizerState::AttributeValueDoubleQuoted => match self.read_next() {
                Some('"') => {
                    self.switch_to(TokenizerState::AfterAttributeValueQuoted);
                },
                Some('&') => {
                    self.return_state = Some(TokenizerState::AttributeValueDoubleQuoted);
                    self.switch_to(TokenizerState::CharacterReference);
                },
                Some('\0') => {
                    self.parse_error(HtmlParseError::UnexpectedNullCharacter);
                    self.current_token
                        .append_to_attribute_value(UNICODE_REPLACEMENT);
                },
                Some(c) => {
                    self.current_token.append_to_attribute_value(c);
                },
                None => {
                    self.parse_error(HtmlParseError::EofInTag);
                    self.emit_eof();
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(single-quoted)-state
            TokenizerState::AttributeValueSingleQuoted => match self.read_next() {
                Some('\'') => {
                    self.switch_to(TokenizerState::AfterAttributeValueQuoted);
                },
                Some('&') => {
                    self.return_state = Some(TokenizerState::AttributeValueSingleQuoted);
                    self.switch_to(TokenizerState::CharacterReference);
                },
                Some('\0') => {
                    self.parse_error(HtmlParseError::UnexpectedNullCharacter);
                    self.current_token
                        .append_to_attribute_value(UNICODE_REPLACEMENT);
                },
                Some(c) => {
                    self.current_token.append_to_attribute_value(c);
                },
                None => {
                    self.parse_error(HtmlParseError::EofInTag);
                    self.emit_eof();
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(unquoted)-state
            TokenizerState::AttributeValueUnquoted => match self.read_next() {
                Some(TAB | LINE_FEED | FORM_FEED | SPACE) => {
                    self.switch_to(TokenizerState::BeforeAttributeName);
                },
                Some('&') => {
                    self.return_state = Some(TokenizerState::AttributeValueUnquoted);
                    self.switch_to(TokenizerState::CharacterReference);
                },
                Some('>') => {
                    self.switch_to(TokenizerState::Data);
                    self.emit_current_token();
                },
                Some('\0') => {
                    self.parse_error(HtmlParseError::UnexpectedNullCharacter);
                    self.current_token
                        .append_to_attribute_value(UNICODE_REPLACEMENT);
                },
                Some(c @ ('"' | '\'' | '<' | '=' | '`')) => {
                    self.parse_error(HtmlParseError::UnexpectedCharacterInUnquotedAttributeValue);
                    self.current_token.append_to_attribute_value(c);
                },
                Some(c) => {
                    self.current_token.append_to_attribute_value(c);
                },
                None => {
                    self.parse_error(HtmlParseError::EofInTag);
                    self.emit_eof();
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-value-(quoted)-state
            TokenizerState::AfterAttributeValueQuoted => match self.read_next() {
                Some(TAB | LINE_FEED | FORM_FEED | SPACE) => {
                    self.switch_to(TokenizerState::BeforeAttributeName);
                },
                Some('/') => {
                    self.switch_to(TokenizerState::SelfClosingStartTag);
                },
                Some('>') => {
                    self.switch_to(TokenizerState::Data);
                    self.emit_current_token();
                },
                Some(_) => {
                    self.parse_error(HtmlParseError::MissingWhitespaceBetweenAttributes);
                    self.reconsume_in(TokenizerState::BeforeAttributeName);
                },
                None => {
                    self.parse_error(HtmlParseError::EofInTag);
                    self.emit_eof();
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#self-closing-start-tag-state
            TokenizerState::SelfClosingStartTag => match self.read_next() {
                Some('>') => {
                    self.current_token.set_self_closing();
                    self.switch_to(TokenizerState::Data);
                    self.emit_current_token();
                },
                Some(_) => {
                    self.parse_error(HtmlParseError::UnexpectedSolidusInTag);
                    self.reconsume_in(TokenizerState::BeforeAttributeName);
                },
                None => {
                    self.parse_error(HtmlParseError::EofInTag);
                    self.emit_eof();
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#bogus-comment-state
            TokenizerState::BogusComment => match self.read_next() {
                Some('>') => {
                    self.switch_to(TokenizerState::Data);
                    self.emit_current_token();
                },
                Some('\0') => {
                    self.parse_error(HtmlParseError::UnexpectedNullCharacter);
                    self.current_token.append_to_comment(UNICODE_REPLACEMENT);
                },
                Some(c) => {
                    self.current_token.append_to_comment(c);
                },
                None => {
                    self.emit_current_token();
                    self.emit_eof();
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state
            TokenizerState::MarkupDeclarationOpen => {
                if self.source.matches("--") {
                    self.source.advance_by(2);
                    self.current_token.create_comment();
                    self.switch_to(TokenizerState::CommentStart);
                } else if self.source.matches_ignore_ascii_case("DOCTYPE") {
                    self.source.advance_by(7);
                    self.switch_to(TokenizerState::Doctype);
                } else if self.source.matches("[CDATA[") {
                    self.source.advance_by(7);

                    if self.cdata_allowed {
                        self.switch_to(TokenizerState::CdataSection);
                    } else {
                        self.parse_error(HtmlParseError::CdataInHtmlContent);
                        self.current_token.create_comment();
                        self.current_token.append_str_to_comment("[CDATA[");
                        self.switch_to(TokenizerState::BogusComment);
                    }
                } else {
                    // Consume nothing.
                    self.parse_error(HtmlParseError::IncorrectlyOpenedComment);
                    self.current_token.create_comment();
                    self.switch_to(TokenizerState::BogusComment);
                }
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#comment-start-state
            TokenizerState::CommentStart => match self.read_next() {
                Some('-') => {
                    self.switch_to(TokenizerState::CommentStartDash);
                },
                Some('>') => {
                    self.parse_error(HtmlParseError::AbruptClosingOfEmptyComment);
                    self.switch_to(TokenizerState::Data);
                    self.emit_current_token();
                },
                _ => {
                    self.reconsume_in(TokenizerState::Comment);
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#comment-start-dash-state
            TokenizerState::CommentStartDash => match self.read_next() {
                Some('-') => {
                    self.switch_to(TokenizerState::CommentEnd);
                },
                Some('>') => {
                    self.parse_error(HtmlParseError::AbruptClosingOfEmptyComment);
                    self.switch_to(TokenizerState::Data);
                    self.emit_current_token();
                },
                Some(_) => {
                    self.current_token.append_to_comment('-');
                    self.reconsume_in(TokenizerState::Comment);
                },
                None => {
                    self.parse_error(HtmlParseError::EofInComment);
                    self.emit_current_token();
                    self.emit_eof();
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#comment-state
            TokenizerState::Comment => match self.read_next() {
                Some('<') => {
                    self.current_token.append_to_comment('<');
                    self.switch_to(TokenizerState::CommentLessThanSign);
                },
                Some('-') => {
                    self.switch_to(TokenizerState::CommentEndDash);
                },
                Some('\0') => {
                    self.parse_error(HtmlParseError::UnexpectedNullCharacter);
                    self.current_token.append_to_comment(UNICODE_REPLACEMENT);
                },
                Some(c) => {
                    self.current_token.append_to_comment(c);
                },
                None => {
                    self.parse_error(HtmlParseError::EofInComment);
                    self.emit_current_token();
                    self.emit_eof();
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-state
            TokenizerState::CommentLessThanSign => match self.read_next() {
                Some('!') => {
                    self.current_token.append_to_comment('!');
                    self.switch_to(TokenizerState::CommentLessThanSignBang);
                },
                Some('<') => {
                    self.current_token.append_to_comment('<');
                },
                _ => {
                    self.reconsume_in(TokenizerState::Comment);
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-bang-state
            TokenizerState::CommentLessThanSignBang => match self.read_next() {
                Some('-') => {
                    self.switch_to(TokenizerState::CommentLessThanSignBangDash);
                },
                _ => {
                    self.reconsume_in(TokenizerState::Comment);
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-bang-dash-state
            TokenizerState::CommentLessThanSignBangDash => match self.read_next() {
                Some('-') => {
                    self.switch_to(TokenizerState::CommentLessThanSignBangDashDash);
                },
                _ => {
                    self.reconsume_in(TokenizerState::CommentEndDash);
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-bang-dash-dash-state
            TokenizerState::CommentLessThanSignBangDashDash => match self.read_next() {
                Some('>') | None => {
                    self.reconsume_in(TokenizerState::CommentEnd);
                },
                Some(_) => {
                    self.parse_error(HtmlParseError::NestedComment);
                    self.reconsume_in(TokenizerState::CommentEnd);
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#comment-end-dash-state
            TokenizerState::CommentEndDash => match self.read_next() {
                Some('-') => {
                    self.switch_to(TokenizerState::CommentEnd);
                },
                Some(_) => {
                    self.current_token.append_to_comment('-');
                    self.reconsume_in(TokenizerState::Comment);
                },
                None => {
                    self.parse_error(HtmlParseError::EofInComment);
                    self.emit_current_token();
                    self.emit_eof();
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#comment-end-state
            TokenizerState::CommentEnd => match self.read_next() {
                Some('>') => {
                    self.switch_to(TokenizerState::Data);
                    self.emit_current_token();
                },
                Some('!') => {
                    self.switch_to(TokenizerState::CommentEndBang);
                },
                Some('-') => {
                    self.current_token.append_to_comment('-');
                },
                Some(_) => {
                    self.current_token.append_str_to_comment("--");
                    self.reconsume_in(TokenizerState::Comment);
                },
                None => {
                    self.parse_error(HtmlParseError::EofInComment);
                    self.emit_current_token();
                    self.emit_eof();
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#comment-end-bang-state
            TokenizerState::CommentEndBang => match self.read_next() {
                Some('-') => {
                    self.current_token.append_str_to_comment("--!");
                    self.switch_to(TokenizerState::CommentEndDash);
                },
                Some('>') => {
                    self.parse_error(HtmlParseError::IncorrectlyClosedComment);
                    self.switch_to(TokenizerState::Data);
                    self.emit_current_token();
                },
                Some(_) => {
                    self.current_token.append_str_to_comment("--!");
                    self.reconsume_in(TokenizerState::Comment);
                },
                None => {
                    self.parse_error(HtmlParseError::EofInComment);
                    self.emit_current_token();
                    self.emit_eof();
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#doctype-state
            TokenizerState::Doctype => match self.read_next() {
                Some(TAB | LINE_FEED | FORM_FEED | SPACE) => {
                    self.switch_to(TokenizerState::BeforeDoctypeName);
                },
                Some('>') => {
                    self.reconsume_in(TokenizerState::BeforeDoctypeName);
                },
                Some(_) => {
                    self.parse_error(HtmlParseError::MissingWhitespaceBeforeDoctypeName);
                    self.reconsume_in(TokenizerState::BeforeDoctypeName);
                },
                None => {
                    self.parse_error(HtmlParseError::EofInDoctype);
                    self.current_token.create_doctype();
                    self.current_token.set_force_quirks();
                    self.emit_current_token();
                    self.emit_eof();
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-name-state
            TokenizerState::BeforeDoctypeName => match self.read_next() {
                Some(TAB | LINE_FEED | FORM_FEED | SPACE) => {
                    // Ignore the character.
                },
                Some(c @ 'A'..='Z') => {
                    self.current_token.create_doctype();
                    self.current_token
                        .append_to_doctype_name(c.to_ascii_lowercase());
                    self.switch_to(TokenizerState::DoctypeName);
                },
                Some('\0') => {
                    self.parse_error(HtmlParseError::UnexpectedNullCharacter);
                    self.current_token.create_doctype();
                    self.current_token.append_to_doctype_name(UNICODE_REPLACEMENT);
                    self.switch_to(TokenizerState::DoctypeName);
                },
                Some('>') => {
                    self.parse_error(HtmlParseError::MissingDoctypeName);
                    self.current_token.create_doctype();
                    self.current_token.set_force_quirks();
                    self.switch_to(TokenizerState::Data);
                    self.emit_current_token();
                },
                Some(c) => {
                    self.current_token.create_doctype();
                    self.current_token.append_to_doctype_name(c);
                    self.switch_to(TokenizerState::DoctypeName);
                },
                None => {
                    self.parse_error(HtmlParseError::EofInDoctype);
                    self.current_token.create_doctype();
                    self.current_token.set_force_quirks();
                    self.emit_current_token();
                    self.emit_eof();
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#doctype-name-state
            TokenizerState::DoctypeName => match self.read_next() {
                Some(TAB | LINE_FEED | FORM_FEED | SPACE) => {
                    self.switch_to(TokenizerState::AfterDoctypeName);
                },
                Some('>') => {
                    self.switch_to(TokenizerState::Data);
                    self.emit_current_token();
                },
                Some(c @ 'A'..='Z') => {
                    self.current_token
                        .append_to_doctype_name(c.to_ascii_lowercase());
                },
                Some('\0') => {
                    self.parse_error(HtmlParseError::UnexpectedNullCharacter);
                    self.current_token.append_to_doctype_name(UNICODE_REPLACEMENT);
                },
                Some(c) => {
                    self.current_token.append_to_doctype_name(c);
                },
                None => {
                    self.parse_error(HtmlParseError::EofInDoctype);
                    self.current_token.set_force_quirks();
                    self.emit_current_token();
                    self.emit_eof();
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-name-state
            TokenizerState::AfterDoctypeName => match self.read_next() {
                Some(TAB | LINE_FEED | FORM_FEED | SPACE) => {
                    // Ignore the character.
                },
                Some('>') => {
                    self.switch_to(TokenizerState::Data);
                    self.emit_current_token();
                },
                Some(_) => {
                    // Look at the six characters starting with the current
                    // one.
                    self.source.go_back();

                    if self.source.matches_ignore_ascii_case("PUBLIC") {
                        self.source.advance_by(6);
                        self.switch_to(TokenizerState::AfterDoctypePublicKeyword);
                    } else if self.source.matches_ignore_ascii_case("SYSTEM") {
                        self.source.advance_by(6);
                        self.switch_to(TokenizerState::AfterDoctypeSystemKeyword);
                    } else {
                        self.parse_error(
                            HtmlParseError::InvalidCharacterSequenceAfterDoctypeName,
                        );
                        self.current_token.set_force_quirks();
                        self.switch_to(TokenizerState::BogusDoctype);
                    }
                },
                None => {
                    self.parse_error(HtmlParseError::EofInDoctype);
                    self.current_token.set_force_quirks();
                    self.emit_current_token();
                    self.emit_eof();
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-public-keyword-state
            TokenizerState::AfterDoctypePublicKeyword => match self.read_next() {
                Some(TAB | LINE_FEED | FORM_FEED | SPACE) => {
                    self.switch_to(TokenizerState::BeforeDoctypePublicIdentifier);
                },
                Some('"') => {
                    self.parse_error(HtmlParseError::MissingWhitespaceAfterDoctypePublicKeyword);
                    self.current_token.init_doctype_public_ident();
                    self.switch_to(TokenizerState::DoctypePublicIdentifierDoubleQuoted);
                },
                Some('\'') => {
                    self.parse_error(HtmlParseError::MissingWhitespaceAfterDoctypePublicKeyword);
                    self.current_token.init_doctype_public_ident();
                    self.switch_to(TokenizerState::DoctypePublicIdentifierSingleQuoted);
                },
                Some('>') => {
                    self.parse_error(HtmlParseError::MissingDoctypePublicIdentifier);
                    self.current_token.set_force_quirks();
                    self.switch_to(TokenizerState::Data);
                    self.emit_current_token();
                },
                Some(_) => {
                    self.parse_error(HtmlParseError::MissingQuoteBeforeDoctypePublicIdentifier);
                    self.current_token.set_force_quirks();
                    self.reconsume_in(TokenizerState::BogusDoctype);
                },
                None => {
                    self.parse_error(HtmlParseError::EofInDoctype);
                    self.current_token.set_force_quirks();
                    self.emit_current_token();
                    self.emit_eof();
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-public-identifier-state
            TokenizerState::BeforeDoctypePublicIdentifier => match self.read_next() {
                Some(TAB | LINE_FEED | FORM_FEED | SPACE) => {
                    // Ignore the character.
                },
                Some('"') => {
                    self.current_token.init_doctype_public_ident();
                    self.switch_to(TokenizerState::DoctypePublicIdentifierDoubleQuoted);
                },
                Some('\'') => {
                    self.current_token.init_doctype_public_ident();
                    self.switch_to(TokenizerState::DoctypePublicIdentifierSingleQuoted);
                },
                Some('>') => {
                    self.parse_error(HtmlParseError::MissingDoctypePublicIdentifier);
                    self.current_token.set_force_quirks();
                    self.switch_to(TokenizerState::Data);
                    self.emit_current_token();
                },
                Some(_) => {
                    self.parse_error(HtmlParseError::MissingQuoteBeforeDoctypePublicIdentifier);
                    self.current_token.set_force_quirks();
                    self.reconsume_in(TokenizerState::BogusDoctype);
                },
                None => {
                    self.parse_error(HtmlParseError::EofInDoctype);
                    self.current_token.set_force_quirks();
                    self.emit_current_token();
                    self.emit_eof();
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#doctype-public-identifier-(double-quoted)-state
            TokenizerState::DoctypePublicIdentifierDoubleQuoted => match self.read_next() {
                Some('"') => {
                    self.switch_to(TokenizerState::AfterDoctypePublicIdentifier);
                },
                Some('\0') => {
                    self.parse_error(HtmlParseError::UnexpectedNullCharacter);
                    self.current_token
                        .append_to_doctype_public_ident(UNICODE_REPLACEMENT);
                },
                Some('>') => {
                    self.parse_error(HtmlParseError::AbruptDoctypePublicIdentifier);
                    self.current_token.set_force_quirks();
                    self.switch_to(TokenizerState::Data);
                    self.emit_current_token();
                },
                Some(c) => {
                    self.current_token.append_to_doctype_public_ident(c);
                },
                None => {
                    self.parse_error(HtmlParseError::EofInDoctype);
                    self.current_token.set_force_quirks();
                    self.emit_current_token();
                    self.emit_eof();
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#doctype-public-identifier-(single-quoted)-state
            TokenizerState::DoctypePublicIdentifierSingleQuoted => match self.read_next() {
                Some('\'') => {
                    self.switch_to(TokenizerState::AfterDoctypePublicIdentifier);
                },
                Some('\0') => {
                    self.parse_error(HtmlParseError::UnexpectedNullCharacter);
                    self.current_token
                        .append_to_doctype_public_ident(UNICODE_REPLACEMENT);
                },
                Some('>') => {
                    self.parse_error(HtmlParseError::AbruptDoctypePublicIdentifier);
                    self.current_token.set_force_quirks();
                    self.switch_to(TokenizerState::Data);
                    self.emit_current_token();
                },
                Some(c) => {
                    self.current_token.append_to_doctype_public_ident(c);
                },
                None => {
                    self.parse_error(HtmlParseError::EofInDoctype);
                    self.current_token.set_force_quirks();
                    self.emit_current_token();
                    self.emit_eof();
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-public-identifier-state
            TokenizerState::AfterDoctypePublicIdentifier => match self.read_next() {
                Some(TAB | LINE_FEED | FORM_FEED | SPACE) => {
                    self.switch_to(TokenizerState::BetweenDoctypePublicAndSystemIdentifiers);
                },
                Some('>') => {
                    self.switch_to(TokenizerState::Data);
                    self.emit_current_token();
                },
                Some('"') => {
                    self.parse_error(
                        HtmlParseError::MissingWhitespaceBetweenDoctypePublicAndSystemIdentifiers,
                    );
                    self.current_token.init_doctype_system_ident();
                    self.switch_to(TokenizerState::DoctypeSystemIdentifierDoubleQuoted);
                },
                Some('\'') => {
                    self.parse_error(
                        HtmlParseError::MissingWhitespaceBetweenDoctypePublicAndSystemIdentifiers,
                    );
                    self.current_token.init_doctype_system_ident();
                    self.switch_to(TokenizerState::DoctypeSystemIdentifierSingleQuoted);
                },
                Some(_) => {
                    self.parse_error(HtmlParseError::MissingQuoteBeforeDoctypeSystemIdentifier);
                    self.current_token.set_force_quirks();
                    self.reconsume_in(TokenizerState::BogusDoctype);
                },
                None => {
                    self.parse_error(HtmlParseError::EofInDoctype);
                    self.current_token.set_force_quirks();
                    self.emit_current_token();
                    self.emit_eof();
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#between-doctype-public-and-system-identifiers-state
            TokenizerState::BetweenDoctypePublicAndSystemIdentifiers => match self.read_next() {
                Some(TAB | LINE_FEED | FORM_FEED | SPACE) => {
                    // Ignore the character.
                },
                Some('>') => {
                    self.switch_to(TokenizerState::Data);
                    self.emit_current_token();
                },
                Some('"') => {
                    self.current_token.init_doctype_system_ident();
                    self.switch_to(TokenizerState::DoctypeSystemIdentifierDoubleQuoted);
                },
                Some('\'') => {
                    self.current_token.init_doctype_system_ident();
                    self.switch_to(TokenizerState::DoctypeSystemIdentifierSingleQuoted);
                },
                Some(_) => {
                    self.parse_error(HtmlParseError::MissingQuoteBeforeDoctypeSystemIdentifier);
                    self.current_token.set_force_quirks();
                    self.reconsume_in(TokenizerState::BogusDoctype);
                },
                None => {
                    self.parse_error(HtmlParseError::EofInDoctype);
                    self.current_token.set_force_quirks();
                    self.emit_current_token();
                    self.emit_eof();
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-system-keyword-state
            TokenizerState::AfterDoctypeSystemKeyword => match self.read_next() {
                Some(TAB | LINE_FEED | FORM_FEED | SPACE) => {
                    self.switch_to(TokenizerState::BeforeDoctypeSystemIdentifier);
                },
                Some('"') => {
                    self.parse_error(HtmlParseError::MissingWhitespaceAfterDoctypeSystemKeyword);
                    self.current_token.init_doctype_system_ident();
                    self.switch_to(TokenizerState::DoctypeSystemIdentifierDoubleQuoted);
                },
                Some('\'') => {
                    self.parse_error(HtmlParseError::MissingWhitespaceAfterDoctypeSystemKeyword);
                    self.current_token.init_doctype_system_ident();
                    self.switch_to(TokenizerState::DoctypeSystemIdentifierSingleQuoted);
                },
                Some('>') => {
                    self.parse_error(HtmlParseError::MissingDoctypeSystemIdentifier);
                    self.current_token.set_force_quirks();
                    self.switch_to(TokenizerState::Data);
                    self.emit_current_token();
                },
                Some(_) => {
                    self.parse_error(HtmlParseError::MissingQuoteBeforeDoctypeSystemIdentifier);
                    self.current_token.set_force_quirks();
                    self.reconsume_in(TokenizerState::BogusDoctype);
                },
                None => {
                    self.parse_error(HtmlParseError::EofInDoctype);
                    self.current_token.set_force_quirks();
                    self.emit_current_token();
                    self.emit_eof();
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-system-identifier-state
            TokenizerState::BeforeDoctypeSystemIdentifier => match self.read_next() {
                Some(TAB | LINE_FEED | FORM_FEED | SPACE) => {
                    // Ignore the character.
                },
                Some('"') => {
                    self.current_token.init_doctype_system_ident();
                    self.switch_to(TokenizerState::DoctypeSystemIdentifierDoubleQuoted);
                },
                Some('\'') => {
                    self.current_token.init_doctype_system_ident();
                    self.switch_to(TokenizerState::DoctypeSystemIdentifierSingleQuoted);
                },
                Some('>') => {
                    self.parse_error(HtmlParseError::MissingDoctypeSystemIdentifier);
                    self.current_token.set_force_quirks();
                    self.switch_to(TokenizerState::Data);
                    self.emit_current_token();
                },
                Some(_) => {
                    self.parse_error(HtmlParseError::MissingQuoteBeforeDoctypeSystemIdentifier);
                    self.current_token.set_force_quirks();
                    self.reconsume_in(TokenizerState::BogusDoctype);
                },
                None => {
                    self.parse_error(HtmlParseError::EofInDoctype);
                    self.current_token.set_force_quirks();
                    self.emit_current_token();
                    self.emit_eof();
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#doctype-system-identifier-(double-quoted)-state
            TokenizerState::DoctypeSystemIdentifierDoubleQuoted => match self.read_next() {
                Some('"') => {
                    self.switch_to(TokenizerState::AfterDoctypeSystemIdentifier);
                },
                Some('\0') => {
                    self.parse_error(HtmlParseError::UnexpectedNullCharacter);
                    self.current_token
                        .append_to_doctype_system_ident(UNICODE_REPLACEMENT);
                },
                Some('>') => {
                    self.parse_error(HtmlParseError::AbruptDoctypeSystemIdentifier);
                    self.current_token.set_force_quirks();
                    self.switch_to(TokenizerState::Data);
                    self.emit_current_token();
                },
                Some(c) => {
                    self.current_token.append_to_doctype_system_ident(c);
                },
                None => {
                    self.parse_error(HtmlParseError::EofInDoctype);
                    self.current_token.set_force_quirks();
                    self.emit_current_token();
                    self.emit_eof();
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#doctype-system-identifier-(single-quoted)-state
            TokenizerState::DoctypeSystemIdentifierSingleQuoted => match self.read_next() {
                Some('\'') => {
                    self.switch_to(TokenizerState::AfterDoctypeSystemIdentifier);
                },
                Some('\0') => {
                    self.parse_error(HtmlParseError::UnexpectedNullCharacter);
                    self.current_token
                        .append_to_doctype_system_ident(UNICODE_REPLACEMENT);
                },
                Some('>') => {
                    self.parse_error(HtmlParseError::AbruptDoctypeSystemIdentifier);
                    self.current_token.set_force_quirks();
                    self.switch_to(TokenizerState::Data);
                    self.emit_current_token();
                },
                Some(c) => {
                    self.current_token.append_to_doctype_system_ident(c);
                },
                None => {
                    self.parse_error(HtmlParseError::EofInDoctype);
                    self.current_token.set_force_quirks();
                    self.emit_current_token();
                    self.emit_eof();
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-system-identifier-state
            TokenizerState::AfterDoctypeSystemIdentifier => match self.read_next() {
                Some(TAB | LINE_FEED | FORM_FEED | SPACE) => {
                    // Ignore the character.
                },
                Some('>') => {
                    self.switch_to(TokenizerState::Data);
                    self.emit_current_token();
                },
                Some(_) => {
                    // This does not set the force-quirks flag.
                    self.parse_error(
                        HtmlParseError::UnexpectedCharacterAfterDoctypeSystemIdentifier,
                    );
                    self.reconsume_in(TokenizerState::BogusDoctype);
                },
                None => {
                    self.parse_error(HtmlParseError::EofInDoctype);
                    self.current_token.set_force_quirks();
                    self.emit_current_token();
                    self.emit_eof();
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#bogus-doctype-state
            TokenizerState::BogusDoctype => match self.read_next() {
                Some('>') => {
                    self.switch_to(TokenizerState::Data);
                    self.emit_current_token();
                },
                Some('\0') => {
                    self.parse_error(HtmlParseError::UnexpectedNullCharacter);
                },
                Some(_) => {
                    // Ignore the character.
                },
                None => {
                    self.emit_current_token();
                    self.emit_eof();
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#cdata-section-state
            TokenizerState::CdataSection => match self.read_next() {
                Some(']') => {
                    self.switch_to(TokenizerState::CdataSectionBracket);
                },
                Some(c) => {
                    // NULL characters are handled by the tree builder here.
                    self.emit_character(c);
                },
                None => {
                    self.parse_error(HtmlParseError::EofInCdata);
                    self.emit_eof();
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#cdata-section-bracket-state
            TokenizerState::CdataSectionBracket => match self.read_next() {
                Some(']') => {
                    self.switch_to(TokenizerState::CdataSectionEnd);
                },
                _ => {
                    self.emit_character(']');
                    self.reconsume_in(TokenizerState::CdataSection);
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#cdata-section-end-state
            TokenizerState::CdataSectionEnd => match self.read_next() {
                Some(']') => {
                    self.emit_character(']');
                },
                Some('>') => {
                    self.switch_to(TokenizerState::Data);
                },
                _ => {
                    self.emit_character(']');
                    self.emit_character(']');
                    self.reconsume_in(TokenizerState::CdataSection);
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state
            TokenizerState::CharacterReference => {
                self.buffer.clear();
                self.buffer.push('&');

                match self.read_next() {
                    Some(c) if c.is_ascii_alphanumeric() => {
                        self.reconsume_in(TokenizerState::NamedCharacterReference);
                    },
                    Some('#') => {
                        self.add_to_buffer('#');
                        self.switch_to(TokenizerState::NumericCharacterReference);
                    },
                    _ => {
                        self.flush_code_points_consumed_as_character_reference();
                        self.reconsume_in(self.return_state_or_data());
                    },
                }
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#named-character-reference-state
            TokenizerState::NamedCharacterReference => {
                match lookup_character_reference(self.source.remaining()) {
                    Some((matched_name, replacement)) => {
                        let ends_with_semicolon = matched_name.ends_with(';');

                        // For historical reasons, a semicolon-less match
                        // inside an attribute is left alone when it is
                        // followed by '=' or an alphanumeric.
                        let next_after_match = self.source.remaining()
                            [matched_name.len()..]
                            .chars()
                            .next();
                        let legacy_exception = !ends_with_semicolon
                            && self.charref_in_attribute()
                            && next_after_match
                                .is_some_and(|c| c == '=' || c.is_ascii_alphanumeric());

                        // Reference names are ASCII, one char per byte.
                        self.source.advance_by(matched_name.len());

                        if legacy_exception {
                            self.buffer.push_str(matched_name);
                            self.flush_code_points_consumed_as_character_reference();
                            self.switch_to(self.return_state_or_data());
                        } else {
                            if !ends_with_semicolon {
                                self.parse_error(
                                    HtmlParseError::MissingSemicolonAfterCharacterReference,
                                );
                            }

                            self.buffer.clear();
                            self.buffer.push_str(replacement);
                            self.flush_code_points_consumed_as_character_reference();
                            self.switch_to(self.return_state_or_data());
                        }
                    },
                    None => {
                        self.flush_code_points_consumed_as_character_reference();
                        self.switch_to(TokenizerState::AmbiguousAmpersand);
                    },
                }
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#ambiguous-ampersand-state
            TokenizerState::AmbiguousAmpersand => match self.read_next() {
                Some(c) if c.is_ascii_alphanumeric() => {
                    if self.charref_in_attribute() {
                        self.current_token.append_to_attribute_value(c);
                    } else {
                        self.emit_character(c);
                    }
                },
                Some(';') => {
                    self.parse_error(HtmlParseError::UnknownNamedCharacterReference);
                    self.reconsume_in(self.return_state_or_data());
                },
                _ => {
                    self.reconsume_in(self.return_state_or_data());
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-state
            TokenizerState::NumericCharacterReference => {
                self.character_reference_code = 0;

                match self.read_next() {
                    Some(c @ ('x' | 'X')) => {
                        self.add_to_buffer(c);
                        self.switch_to(TokenizerState::HexadecimalCharacterReferenceStart);
                    },
                    _ => {
                        self.reconsume_in(TokenizerState::DecimalCharacterReferenceStart);
                    },
                }
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#hexadecimal-character-reference-start-state
            TokenizerState::HexadecimalCharacterReferenceStart => match self.read_next() {
                Some(c) if c.is_ascii_hexdigit() => {
                    self.reconsume_in(TokenizerState::HexadecimalCharacterReference);
                },
                _ => {
                    self.parse_error(
                        HtmlParseError::AbsenceOfDigitsInNumericCharacterReference,
                    );
                    self.flush_code_points_consumed_as_character_reference();
                    self.reconsume_in(self.return_state_or_data());
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#decimal-character-reference-start-state
            TokenizerState::DecimalCharacterReferenceStart => match self.read_next() {
                Some(c) if c.is_ascii_digit() => {
                    self.reconsume_in(TokenizerState::DecimalCharacterReference);
                },
                _ => {
                    self.parse_error(
                        HtmlParseError::AbsenceOfDigitsInNumericCharacterReference,
                    );
                    self.flush_code_points_consumed_as_character_reference();
                    self.reconsume_in(self.return_state_or_data());
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#hexadecimal-character-reference-state
            TokenizerState::HexadecimalCharacterReference => match self.read_next() {
                Some(c) if c.is_ascii_hexdigit() => {
                    let digit = c.to_digit(16).expect("hex digit");
                    self.character_reference_code = self
                        .character_reference_code
                        .saturating_mul(16)
                        .saturating_add(digit);
                },
                Some(';') => {
                    self.switch_to(TokenizerState::NumericCharacterReferenceEnd);
                },
                _ => {
                    self.parse_error(HtmlParseError::MissingSemicolonAfterCharacterReference);
                    self.reconsume_in(TokenizerState::NumericCharacterReferenceEnd);
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#decimal-character-reference-state
            TokenizerState::DecimalCharacterReference => match self.read_next() {
                Some(c) if c.is_ascii_digit() => {
                    let digit = c.to_digit(10).expect("decimal digit");
                    self.character_reference_code = self
                        .character_reference_code
                        .saturating_mul(10)
                        .saturating_add(digit);
                },
                Some(';') => {
                    self.switch_to(TokenizerState::NumericCharacterReferenceEnd);
                },
                _ => {
                    self.parse_error(HtmlParseError::MissingSemicolonAfterCharacterReference);
                    self.reconsume_in(TokenizerState::NumericCharacterReferenceEnd);
                },
            },
            // https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state
            TokenizerState::NumericCharacterReferenceEnd => {
                // This state consumes no input.
                self.character_reference_code = self.checked_character_reference_code();

                self.buffer.clear();
                let c = char::from_u32(self.character_reference_code)
                    .unwrap_or(UNICODE_REPLACEMENT);
                self.buffer.push(c);
                self.flush_code_points_consumed_as_character_reference();
                self.switch_to(self.return_state_or_data());
            },
        }
    }

    /// The value fixups of the numeric character reference end state.
    fn checked_character_reference_code(&self) -> u32 {
        let code = self.character_reference_code;
        match code {
            0x00 => {
                self.parse_error(HtmlParseError::NullCharacterReference);
                0xFFFD
            },
            0x0011_0000.. => {
                self.parse_error(HtmlParseError::CharacterReferenceOutsideUnicodeRange);
                0xFFFD
            },
            0xD800..=0xDFFF => {
                self.parse_error(HtmlParseError::SurrogateCharacterReference);
                0xFFFD
            },
            _ if is_noncharacter_code(code) => {
                // The code point is kept.
                self.parse_error(HtmlParseError::NoncharacterCharacterReference);
                code
            },
            0x01..=0x1F | 0x7F..=0x9F => {
                // Tab, line feed and form feed are fine; carriage return
                // (gone from the stream, but reachable as &#13;) is not.
                if matches!(code, 0x09 | 0x0A | 0x0C) {
                    return code;
                }

                self.parse_error(HtmlParseError::ControlCharacterReference);

                // The windows-1252 compatibility remap for 0x80..=0x9F.
                match code {
                    0x80 => 0x20AC,
                    0x82 => 0x201A,
                    0x83 => 0x0192,
                    0x84 => 0x201E,
                    0x85 => 0x2026,
                    0x86 => 0x2020,
                    0x87 => 0x2021,
                    0x88 => 0x02C6,
                    0x89 => 0x2030,
                    0x8A => 0x0160,
                    0x8B => 0x2039,
                    0x8C => 0x0152,
                    0x8E => 0x017D,
                    0x91 => 0x2018,
                    0x92 => 0x2019,
                    0x93 => 0x201C,
                    0x94 => 0x201D,
                    0x95 => 0x2022,
                    0x96 => 0x2013,
                    0x97 => 0x2014,
                    0x98 => 0x02DC,
                    0x99 => 0x2122,
                    0x9A => 0x0161,
                    0x9B => 0x203A,
                    0x9C => 0x0153,
                    0x9E => 0x017E,
                    0x9F => 0x0178,
                    _ => code,
                }
            },
            _ => code,
        }
    }
}

/// <https://infra.spec.whatwg.org/#noncharacter>, for raw code points.
fn is_noncharacter_code(code: u32) -> bool {
    matches!(code, 0xFDD0..=0xFDEF) || matches!(code & 0xFFFF, 0xFFFE | 0xFFFF)
}

impl<P: ParseErrorHandler> Iterator for Tokenizer<P> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        while self.token_buffer.is_empty() {
            self.step();
        }

        let token = self.token_buffer.pop_front();
        if let Some(Token::EndOfFile) = token {
            self.done = true;
        }
        token
    }
}
