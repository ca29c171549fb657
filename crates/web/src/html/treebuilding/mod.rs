//! The [tree construction stage](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction).

mod active_formatting_elements;
mod insertion_location;
mod parser;
mod stack_of_open_elements;

pub use insertion_location::InsertionLocation;
pub use parser::{FramesetOkFlag, InsertionMode, Parser};
pub use stack_of_open_elements::{is_special, Scope, StackOfOpenElements};

pub(crate) use active_formatting_elements::{
    ActiveFormattingElements, FormatEntry, FormattingElement,
};
