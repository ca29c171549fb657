//! Utilities for displaying a DOM tree.

use std::fmt;

use crate::dom::{DomPtr, NodeKind};

/// Maximum number of text characters to display before cutting them off.
/// This prevents `<script>`/`<style>` spam in tree dumps.
const MAX_TEXT_LEN: usize = 32;

pub struct TreeFormatter<'a, 'b> {
    formatter: &'a mut fmt::Formatter<'b>,
    indent_level: usize,
}

/// Implemented by tree-shaped structures that can render themselves as an
/// indented dump, like this:
///
/// ```text
/// <html>
///     <head>
///     <body>
///         "hello"
/// ```
pub trait TreeDebug {
    fn tree_fmt(&self, formatter: &mut TreeFormatter<'_, '_>) -> fmt::Result;
}

impl<'a, 'b> TreeFormatter<'a, 'b> {
    pub fn new(formatter: &'a mut fmt::Formatter<'b>) -> Self {
        Self {
            formatter,
            indent_level: 0,
        }
    }

    pub fn indent(&mut self) -> fmt::Result {
        for _ in 0..self.indent_level {
            self.formatter.write_str("    ")?;
        }
        Ok(())
    }

    pub fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn decrease_indent(&mut self) {
        self.indent_level -= 1;
    }

    pub fn write_text(&mut self, text: &str, before: &str, after: &str) -> fmt::Result {
        self.formatter.write_str(before)?;
        if let Some((cutoff, _)) = text.char_indices().nth(MAX_TEXT_LEN) {
            write!(self.formatter, "{} [...]", &text[..cutoff])?;
        } else {
            self.formatter.write_str(text)?;
        }
        self.formatter.write_str(after)
    }
}

impl fmt::Write for TreeFormatter<'_, '_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.formatter.write_str(s)
    }
}

impl TreeDebug for DomPtr {
    fn tree_fmt(&self, formatter: &mut TreeFormatter<'_, '_>) -> fmt::Result {
        use fmt::Write;

        formatter.indent()?;
        match self.borrow().kind() {
            NodeKind::Document(_) => write!(formatter, "#document")?,
            NodeKind::DocumentFragment => write!(formatter, "#document-fragment")?,
            NodeKind::DocumentType(doctype) => {
                write!(formatter, "<!DOCTYPE {}>", doctype.name())?
            },
            NodeKind::Element(element) => write!(formatter, "<{}>", element.local_name())?,
            NodeKind::Text(data) => formatter.write_text(data.content(), "\"", "\"")?,
            NodeKind::Comment(data) => formatter.write_text(data.content(), "<!-- ", " -->")?,
            NodeKind::CdataSection(data) => {
                formatter.write_text(data.content(), "<![CDATA[", "]]>")?
            },
            NodeKind::ProcessingInstruction(pi) => write!(formatter, "<?{}?>", pi.target)?,
        }
        writeln!(formatter)?;

        let node = self.borrow();
        if !node.children().is_empty() {
            formatter.increase_indent();
            for child in node.children() {
                child.tree_fmt(formatter)?;
            }
            formatter.decrease_indent();
        }
        Ok(())
    }
}

impl fmt::Debug for DomPtr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tree_formatter = TreeFormatter::new(f);
        self.tree_fmt(&mut tree_formatter)
    }
}
