use sps_core::Delimiters;

use crate::number;

/// One table cell: its text plus whether it must be quoted on output.
///
/// `needs_quoting` is set when the text holds a delimiter character, either because the
/// source quoted it or because an escape sequence produced the delimiter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    text: String,
    needs_quoting: bool,
}

impl Cell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cell from text, deriving the quoting flag from `delimiters`.
    pub fn from_text(text: &str, delimiters: &Delimiters) -> Self {
        Self {
            text: text.to_string(),
            needs_quoting: delimiters.any_in(text),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn needs_quoting(&self) -> bool {
        self.needs_quoting
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Length in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn push(&mut self, c: char) {
        self.text.push(c);
    }

    pub fn mark_quoted(&mut self) {
        self.needs_quoting = true;
    }

    /// Rewrite the text and re-evaluate quoting against the active delimiter set.
    pub fn set(&mut self, text: &str, delimiters: &Delimiters) {
        self.text.clear();
        self.text.push_str(text);
        self.needs_quoting = delimiters.any_in(text);
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.needs_quoting = false;
    }

    /// Numeric value of the cell, if its text is a finite number.
    pub fn as_number(&self) -> Option<f64> {
        number::parse_number(&self.text)
    }
}
