//! Cursor/caret manager - maps the logical cursor to screen geometry
//!
//! The logical cursor lives in token-gap units and is owned by the store;
//! this module owns only the layout mapping. The host pushes the measured
//! geometry after every render, and the manager answers "where is gap i on
//! screen" (for positioning the hidden input) and "which gap did this click
//! land in".

/// Axis-aligned box in editor-local pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }
}

/// What a click on the editor surface resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// A token chip; the cursor moves to immediately after it
    Token(usize),
    /// An inter-token gap; the cursor moves to that exact gap
    Gap(usize),
    /// Empty editor space; the cursor moves to the end of the sequence
    Empty,
}

/// Measured geometry for one rendered frame
///
/// `gap_markers` holds the clickable boxes of the zero-width marker
/// elements rendered between tokens: one per gap, so token count + 1.
#[derive(Debug, Clone, Default)]
pub struct CaretLayout {
    /// Bounds of the whole editor surface
    pub bounds: Rect,
    /// One box per token, in sequence order
    pub token_boxes: Vec<Rect>,
    /// One box per gap, in gap order
    pub gap_markers: Vec<Rect>,
}

/// Maps the logical cursor to concrete screen anchors
#[derive(Debug, Clone, Default)]
pub struct CaretManager {
    layout: CaretLayout,
}

impl CaretManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the layout after a render pass
    pub fn set_layout(&mut self, layout: CaretLayout) {
        self.layout = layout;
    }

    pub fn layout(&self) -> &CaretLayout {
        &self.layout
    }

    /// Screen anchor for the given logical cursor position
    ///
    /// `None` when the host has not pushed geometry for that gap yet; the
    /// hidden input then stays where it was until the next layout pass.
    pub fn anchor(&self, cursor: usize) -> Option<Rect> {
        self.layout.gap_markers.get(cursor).copied()
    }

    /// Resolve a click in editor-local coordinates
    ///
    /// Returns `None` for clicks outside the editor surface entirely.
    /// Gap markers win over token boxes so the thin gap zones between
    /// chips stay clickable.
    pub fn hit_test(&self, px: f32, py: f32) -> Option<ClickTarget> {
        if !self.layout.bounds.contains(px, py) {
            return None;
        }
        for (i, rect) in self.layout.gap_markers.iter().enumerate() {
            if rect.contains(px, py) {
                return Some(ClickTarget::Gap(i));
            }
        }
        for (i, rect) in self.layout.token_boxes.iter().enumerate() {
            if rect.contains(px, py) {
                return Some(ClickTarget::Token(i));
            }
        }
        Some(ClickTarget::Empty)
    }

    /// Logical cursor position a click target maps to
    pub fn target_cursor(target: ClickTarget, sequence_len: usize) -> usize {
        match target {
            ClickTarget::Token(i) => (i + 1).min(sequence_len),
            ClickTarget::Gap(i) => i.min(sequence_len),
            ClickTarget::Empty => sequence_len,
        }
    }
}
