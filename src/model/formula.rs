//! TokenSequence - the discrete-token formula store
//!
//! Owns the canonical token array, the logical cursor, and the
//! pending-input buffer (raw text the user is typing that has not yet
//! resolved into a token or a picker query).

use super::sequence::ContentSequence;
use super::token::Token;

/// The discrete-token backing store for a composed formula
#[derive(Debug, Clone, Default)]
pub struct TokenSequence {
    tokens: Vec<Token>,
    /// Logical cursor in token-gap units, always within `[0, tokens.len()]`
    cursor: usize,
    /// Raw typed text not yet committed into the token array
    pending: String,
}

impl TokenSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// The ordered token array (left-to-right reading order)
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The pending-input buffer
    pub fn pending(&self) -> &str {
        &self.pending
    }

    /// Replace the pending buffer wholesale (trigger splitting keeps the
    /// text before the trigger here)
    pub fn set_pending(&mut self, text: impl Into<String>) {
        self.pending = text.into();
    }

    /// Append a typed character to the pending buffer
    pub fn push_pending(&mut self, ch: char) {
        self.pending.push(ch);
    }

    /// Append composed text (IME commit, paste) to the pending buffer
    pub fn push_pending_str(&mut self, text: &str) {
        self.pending.push_str(text);
    }

    /// Erase the last character of the pending buffer
    ///
    /// Returns `false` when the buffer was already empty.
    pub fn pop_pending(&mut self) -> bool {
        self.pending.pop().is_some()
    }

    /// Insert a token at the cursor, advancing the cursor past it
    pub fn insert_token(&mut self, token: Token) {
        tracing::debug!(kind = ?token.kind, value = %token.value, cursor = self.cursor, "insert token");
        self.tokens.insert(self.cursor, token);
        self.cursor += 1;
    }

    /// Remove the token at `index`; silent no-op when out of bounds
    pub fn remove_token(&mut self, index: usize) {
        if index >= self.tokens.len() {
            return;
        }
        self.tokens.remove(index);
        // Keep the cursor at the same logical gap relative to its neighbors
        if self.cursor > index {
            self.cursor -= 1;
        }
        debug_assert!(self.cursor <= self.tokens.len());
    }

    /// Commit the pending buffer as a free-text token at the cursor
    ///
    /// Whitespace-only buffers are discarded. Returns `true` when a token
    /// was actually inserted. Either way the buffer ends up empty.
    pub fn commit_pending_text(&mut self) -> bool {
        let text = std::mem::take(&mut self.pending);
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.insert_token(Token::text(trimmed));
        true
    }

    /// Backspace with an empty pending buffer deletes the previous token
    ///
    /// Returns `true` when a token was removed.
    pub fn backspace_at_cursor(&mut self) -> bool {
        if !self.pending.is_empty() || self.cursor == 0 {
            return false;
        }
        self.remove_token(self.cursor - 1);
        true
    }

    /// Move the cursor one gap left; returns whether it moved
    pub fn move_left(&mut self) -> bool {
        if self.cursor > 0 {
            self.cursor -= 1;
            true
        } else {
            false
        }
    }

    /// Move the cursor one gap right; returns whether it moved
    pub fn move_right(&mut self) -> bool {
        if self.cursor < self.tokens.len() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    /// Serialize per the downstream contract: `@<id>` for sensors,
    /// literal values otherwise, single-space joined
    pub fn serialize(&self) -> String {
        let parts: Vec<String> = self.tokens.iter().map(Token::render).collect();
        parts.join(" ")
    }
}

impl ContentSequence for TokenSequence {
    fn len(&self) -> usize {
        self.tokens.len()
    }

    fn cursor(&self) -> usize {
        self.cursor
    }

    fn set_cursor(&mut self, position: usize) {
        self.cursor = position.min(self.tokens.len());
    }

    fn insert(&mut self, token: Token) {
        self.insert_token(token);
    }

    fn remove(&mut self, index: usize) {
        self.remove_token(index);
    }

    fn serialize(&self) -> String {
        TokenSequence::serialize(self)
    }
}
