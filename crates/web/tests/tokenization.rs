//! Tokenizer-level tests: tokens in, tokens out, no tree construction.

use string_interner::interned;
use web::html::{IgnoreParseErrors, Token, Tokenizer, TokenizerState};

fn tokenize(source: &str) -> Vec<Token> {
    Tokenizer::<IgnoreParseErrors>::new(source).collect()
}

fn characters(tokens: &[Token]) -> String {
    tokens
        .iter()
        .filter_map(|token| match token {
            Token::Character(c) => Some(*c),
            _ => None,
        })
        .collect()
}

#[test]
fn plain_text() {
    let tokens = tokenize("hello");
    assert_eq!(characters(&tokens), "hello");
    assert!(matches!(tokens.last(), Some(Token::EndOfFile)));
}

#[test]
fn simple_tag_with_attributes() {
    let tokens = tokenize("<div id=\"a\" class=b data-x='c'>");

    let Some(Token::Tag(tag)) = tokens.first() else {
        panic!("expected a tag token, got {tokens:?}");
    };
    assert!(tag.opening);
    assert_eq!(tag.name, interned!("div"));
    assert!(!tag.self_closing);
    assert_eq!(
        tag.attributes.as_slice(),
        &[
            (interned!("id"), interned!("a")),
            (interned!("class"), interned!("b")),
            (interned!("data-x"), interned!("c")),
        ]
    );
}

#[test]
fn tag_and_attribute_names_are_lowercased() {
    let tokens = tokenize("<DIV CLASS=Mixed>");

    let Some(Token::Tag(tag)) = tokens.first() else {
        panic!("expected a tag token");
    };
    assert_eq!(tag.name, interned!("div"));
    // Attribute values keep their case.
    assert_eq!(
        tag.lookup_attribute(interned!("class")),
        Some(interned!("Mixed"))
    );
}

#[test]
fn duplicate_attributes_are_discarded() {
    let tokens = tokenize("<p id=first id=second>");

    let Some(Token::Tag(tag)) = tokens.first() else {
        panic!("expected a tag token");
    };
    assert_eq!(tag.attributes.len(), 1);
    assert_eq!(
        tag.lookup_attribute(interned!("id")),
        Some(interned!("first"))
    );
}

#[test]
fn self_closing_tag() {
    let tokens = tokenize("<br/>");

    let Some(Token::Tag(tag)) = tokens.first() else {
        panic!("expected a tag token");
    };
    assert!(tag.self_closing);
    assert_eq!(tag.name, interned!("br"));
}

#[test]
fn end_tag() {
    let tokens = tokenize("</div>");

    let Some(Token::Tag(tag)) = tokens.first() else {
        panic!("expected a tag token");
    };
    assert!(!tag.opening);
    assert_eq!(tag.name, interned!("div"));
}

#[test]
fn doctype() {
    let tokens = tokenize("<!DOCTYPE html>");

    let Some(Token::Doctype(doctype)) = tokens.first() else {
        panic!("expected a doctype token, got {tokens:?}");
    };
    assert_eq!(doctype.name, Some(interned!("html")));
    assert_eq!(doctype.public_ident, None);
    assert_eq!(doctype.system_ident, None);
    assert!(!doctype.force_quirks);
}

#[test]
fn doctype_with_identifiers() {
    let tokens = tokenize(
        "<!DOCTYPE html PUBLIC \"-//W3C//DTD HTML 4.01//EN\" \"http://www.w3.org/TR/html4/strict.dtd\">",
    );

    let Some(Token::Doctype(doctype)) = tokens.first() else {
        panic!("expected a doctype token");
    };
    assert_eq!(
        doctype.public_ident.map(|ident| ident.as_str()),
        Some("-//W3C//DTD HTML 4.01//EN")
    );
    assert_eq!(
        doctype.system_ident.map(|ident| ident.as_str()),
        Some("http://www.w3.org/TR/html4/strict.dtd")
    );
}

#[test]
fn comment() {
    let tokens = tokenize("<!-- c -->");

    let Some(Token::Comment(data)) = tokens.first() else {
        panic!("expected a comment token");
    };
    assert_eq!(data, " c ");
}

#[test]
fn eof_inside_comment_still_emits_the_comment() {
    let tokens = tokenize("<!--x");

    assert!(matches!(&tokens[0], Token::Comment(data) if data == "x"));
    assert!(matches!(tokens[1], Token::EndOfFile));
}

#[test]
fn eof_inside_tag_discards_the_tag() {
    let tokens = tokenize("<div");
    assert!(matches!(tokens.as_slice(), [Token::EndOfFile]));
}

#[test]
fn missing_end_tag_name_produces_nothing() {
    let tokens = tokenize("</>");
    assert!(matches!(tokens.as_slice(), [Token::EndOfFile]));
}

#[test]
fn bogus_comment_from_question_mark() {
    let tokens = tokenize("<?xml version=\"1.0\"?>");

    let Some(Token::Comment(data)) = tokens.first() else {
        panic!("expected a comment token");
    };
    assert_eq!(data, "?xml version=\"1.0\"?");
}

#[test]
fn named_character_reference() {
    let tokens = tokenize("a&amp;b");
    assert_eq!(characters(&tokens), "a&b");
}

#[test]
fn named_character_reference_without_semicolon_in_data() {
    // Legacy references resolve without the semicolon in data.
    let tokens = tokenize("x&noty");
    assert_eq!(characters(&tokens), "x\u{AC}y");
}

#[test]
fn unknown_named_reference_is_literal() {
    let tokens = tokenize("&xyzzy;");
    assert_eq!(characters(&tokens), "&xyzzy;");
}

#[test]
fn legacy_reference_in_attribute_is_left_alone() {
    // "&not" followed by an alphanumeric inside an attribute value stays
    // verbatim, for compatibility with ancient query strings.
    let tokens = tokenize("<a href=\"?a=b&notc=d\">");

    let Some(Token::Tag(tag)) = tokens.first() else {
        panic!("expected a tag token");
    };
    assert_eq!(
        tag.lookup_attribute(interned!("href")).map(|v| v.as_str()),
        Some("?a=b&notc=d")
    );
}

#[test]
fn reference_with_semicolon_in_attribute_resolves() {
    let tokens = tokenize("<a href=\"?a=b&not;c\">");

    let Some(Token::Tag(tag)) = tokens.first() else {
        panic!("expected a tag token");
    };
    assert_eq!(
        tag.lookup_attribute(interned!("href")).map(|v| v.as_str()),
        Some("?a=b\u{AC}c")
    );
}

#[test]
fn numeric_character_references() {
    assert_eq!(characters(&tokenize("&#65;")), "A");
    assert_eq!(characters(&tokenize("&#x41;")), "A");
    assert_eq!(characters(&tokenize("&#X6C34;")), "水");
}

#[test]
fn numeric_reference_windows_1252_remap() {
    assert_eq!(characters(&tokenize("&#x80;")), "\u{20AC}");
    assert_eq!(characters(&tokenize("&#153;")), "\u{2122}");
}

#[test]
fn numeric_reference_out_of_range_is_replacement() {
    assert_eq!(characters(&tokenize("&#x110000;")), "\u{FFFD}");
    assert_eq!(characters(&tokenize("&#0;")), "\u{FFFD}");
    assert_eq!(characters(&tokenize("&#xD800;")), "\u{FFFD}");
}

#[test]
fn newlines_are_normalized() {
    assert_eq!(characters(&tokenize("a\r\nb\rc\nd")), "a\nb\nc\nd");
    // CR and CRLF at the end of the stream normalize with no extra
    // output.
    assert_eq!(characters(&tokenize("x\r")), "x\n");
    assert_eq!(characters(&tokenize("x\r\n")), "x\n");
}

#[test]
fn null_passes_through_the_data_state() {
    let tokens = tokenize("a\0b");
    assert_eq!(characters(&tokens), "a\0b");
}

#[test]
fn rcdata_appropriate_end_tag() {
    let mut tokenizer = Tokenizer::<IgnoreParseErrors>::new("a<b></other></title>x");
    tokenizer.switch_to(TokenizerState::Rcdata);
    tokenizer.set_last_start_tag(Some("title".to_owned()));

    let tokens: Vec<Token> = tokenizer.collect();

    // Everything up to </title> is text, including the bogus markup.
    assert_eq!(characters(&tokens), "a<b></other>x");

    let end_tag = tokens.iter().find_map(|token| match token {
        Token::Tag(tag) if !tag.opening => Some(tag.name),
        _ => None,
    });
    assert_eq!(end_tag, Some(interned!("title")));
}

#[test]
fn rcdata_resolves_character_references() {
    let mut tokenizer = Tokenizer::<IgnoreParseErrors>::new("&amp;</title>");
    tokenizer.switch_to(TokenizerState::Rcdata);
    tokenizer.set_last_start_tag(Some("title".to_owned()));

    let tokens: Vec<Token> = tokenizer.collect();
    assert_eq!(characters(&tokens), "&");
}

#[test]
fn rawtext_does_not_resolve_character_references() {
    let mut tokenizer = Tokenizer::<IgnoreParseErrors>::new("&amp;</style>");
    tokenizer.switch_to(TokenizerState::Rawtext);
    tokenizer.set_last_start_tag(Some("style".to_owned()));

    let tokens: Vec<Token> = tokenizer.collect();
    assert_eq!(characters(&tokens), "&amp;");
}

#[test]
fn plaintext_consumes_everything() {
    let mut tokenizer = Tokenizer::<IgnoreParseErrors>::new("a</plaintext><div>");
    tokenizer.switch_to(TokenizerState::Plaintext);

    let tokens: Vec<Token> = tokenizer.collect();
    assert_eq!(characters(&tokens), "a</plaintext><div>");
}

#[test]
fn script_data_escaped() {
    let mut tokenizer = Tokenizer::<IgnoreParseErrors>::new("<!-- <b> --></script>");
    tokenizer.switch_to(TokenizerState::ScriptData);
    tokenizer.set_last_start_tag(Some("script".to_owned()));

    let tokens: Vec<Token> = tokenizer.collect();
    // The comment-like text is emitted verbatim; the end tag terminates.
    assert_eq!(characters(&tokens), "<!-- <b> -->");
    assert!(tokens
        .iter()
        .any(|token| matches!(token, Token::Tag(tag) if !tag.opening)));
}

#[test]
fn tokenization_is_linear_on_pathological_input() {
    // A stream of lone ampersands and brackets must terminate.
    let source = "&<".repeat(10_000);
    let tokens = tokenize(&source);
    assert!(matches!(tokens.last(), Some(Token::EndOfFile)));
}
