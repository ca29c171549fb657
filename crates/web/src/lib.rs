//! The HTML parsing core of the engine.
//!
//! Feeding a string of HTML to [Parser](html::Parser) (or the [parse]
//! shorthand) produces a DOM tree per the WHATWG parsing algorithm:
//! misnested tags are repaired, missing elements are fabricated and parse
//! errors never abort.

mod tree_debug;

pub mod dom;
pub mod html;
pub mod infra;

pub use tree_debug::{TreeDebug, TreeFormatter};

use dom::DomPtr;
use html::{IgnoreParseErrors, Parser};

/// Parse a complete HTML document, ignoring parse errors.
///
/// Always succeeds; pathological inputs still produce a tree containing at
/// least `<html>`, `<head>` and `<body>`.
pub fn parse(source: &str) -> DomPtr {
    Parser::<IgnoreParseErrors>::new(source).parse()
}
