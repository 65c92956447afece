//! ContentSequence - the capability both formula backing stores implement
//!
//! The editing core supports two representations of a composed formula: a
//! discrete token array ([`TokenSequence`]) and an inline rich-text surface
//! ([`InlineText`]). Both are "an ordered content sequence with an
//! addressable cursor", and everything downstream (cursor math, validation,
//! serialization) is written against that capability rather than a concrete
//! store.
//!
//! [`TokenSequence`]: super::formula::TokenSequence
//! [`InlineText`]: super::inline::InlineText

use super::token::Token;

/// An ordered sequence of formula content with an addressable cursor
///
/// The cursor is measured in element-gap units: an integer in
/// `[0, len]` denoting "before element i", or "after the last element"
/// when equal to `len`. Implementations must keep it clamped into that
/// range after every mutation.
pub trait ContentSequence {
    /// Number of elements in the sequence
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current logical cursor position in `[0, len]`
    fn cursor(&self) -> usize;

    /// Move the cursor, clamping into `[0, len]`
    fn set_cursor(&mut self, position: usize);

    /// Insert a token at the cursor and advance the cursor past it
    ///
    /// Always succeeds; there are no error conditions.
    fn insert(&mut self, token: Token);

    /// Remove the element at `index`
    ///
    /// Out of bounds is a silent no-op. Removing an element before the
    /// cursor shifts the cursor left by one so it keeps its logical
    /// position relative to the surrounding content.
    fn remove(&mut self, index: usize);

    /// Flatten the sequence into the serialized formula string
    ///
    /// Sensor references render as `@<id>`, everything else as its literal
    /// value, joined with single spaces. This string is the bit-exact
    /// contract consumed by the compute backend.
    fn serialize(&self) -> String;
}
