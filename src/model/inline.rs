//! InlineText - the rich-text alternative backing store
//!
//! Instead of a discrete token array, the formula lives in a flat editable
//! string in which sensor references appear as embedded `@id` mentions and
//! operators as literal characters. Validation reads the flattened text.
//! Elements, for cursor purposes, are the whitespace-separated segments of
//! that text.

use super::sequence::ContentSequence;
use super::token::Token;

/// Inline rich-text formula store
#[derive(Debug, Clone, Default)]
pub struct InlineText {
    text: String,
    cursor: usize,
}

impl InlineText {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the surface with existing flattened content
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut inline = Self {
            text: text.into(),
            cursor: 0,
        };
        inline.cursor = inline.len();
        inline
    }

    /// The flattened text content
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Append freeform typed text at the end of the surface
    pub fn push_str(&mut self, text: &str) {
        self.text.push_str(text);
        self.cursor = self.len();
    }

    fn segments(&self) -> Vec<&str> {
        self.text.split_whitespace().collect()
    }

    fn rebuild(&mut self, segments: Vec<String>) {
        self.text = segments.join(" ");
    }
}

impl ContentSequence for InlineText {
    fn len(&self) -> usize {
        self.segments().len()
    }

    fn cursor(&self) -> usize {
        self.cursor
    }

    fn set_cursor(&mut self, position: usize) {
        self.cursor = position.min(self.len());
    }

    fn insert(&mut self, token: Token) {
        let rendered = token.render();
        let mut segments: Vec<String> = self.segments().iter().map(|s| s.to_string()).collect();
        let at = self.cursor.min(segments.len());
        let inserted: Vec<String> = rendered.split_whitespace().map(str::to_string).collect();
        // A free-text token may itself contain spaces; the cursor advances
        // past everything it inserted.
        let count = inserted.len();
        segments.splice(at..at, inserted);
        self.rebuild(segments);
        self.cursor = (at + count).min(self.len());
    }

    fn remove(&mut self, index: usize) {
        let mut segments: Vec<String> = self.segments().iter().map(|s| s.to_string()).collect();
        if index >= segments.len() {
            return;
        }
        segments.remove(index);
        self.rebuild(segments);
        if self.cursor > index {
            self.cursor -= 1;
        }
        self.cursor = self.cursor.min(self.len());
    }

    fn serialize(&self) -> String {
        self.segments().join(" ")
    }
}
