//! The HTML parser: tokenization and tree construction.
//!
//! <https://html.spec.whatwg.org/multipage/parsing.html>

pub mod serialize;
pub mod tokenization;
pub mod treebuilding;

pub use tokenization::{
    HtmlParseError, IgnoreParseErrors, LogParseErrors, ParseErrorHandler, Token, Tokenizer,
    TokenizerState,
};
pub use treebuilding::Parser;
