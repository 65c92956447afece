//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use crate::model::{SensorRecord, Token};

/// Direction for logical cursor movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// Raw input events from the hidden input control
#[derive(Debug, Clone)]
pub enum InputMsg {
    /// A character was typed into the pending buffer (or a live query)
    InsertChar(char),
    /// Backspace: erases pending text, query text, or the previous token
    Backspace,
    /// Enter with no picker open: commit the pending buffer as a text token
    CommitPending,
    /// IME composition started; trigger detection suspends
    CompositionStart,
    /// IME composition ended with the final composed text
    CompositionEnd(String),
    /// The editor surface gained focus
    Focus,
    /// The editor surface lost focus
    Blur,
}

/// Cursor movement and click handling
#[derive(Debug, Clone)]
pub enum CursorMsg {
    /// Arrow-key movement by one gap (only when the pending buffer is empty)
    Move(Direction),
    /// Click on the token at `index`; cursor lands after it
    ClickToken(usize),
    /// Click in the inter-token gap at `index`
    ClickGap(usize),
    /// Click in empty editor space; cursor lands at the end
    ClickEmptyArea,
    /// Jump the cursor to an explicit gap position
    SetPosition(usize),
}

/// Direct formula mutations (picker selections, chip delete buttons)
#[derive(Debug, Clone)]
pub enum FormulaMsg {
    /// Insert a ready-made token at the cursor
    InsertToken(Token),
    /// Remove the token at `index` (the chip's delete button)
    RemoveToken(usize),
}

/// Messages from an open picker session
#[derive(Debug, Clone)]
pub enum PickerMsg {
    /// The picker's own search input replaced the query wholesale
    QueryChanged(String),
    /// Move the highlighted entry up or down the result list
    MoveSelection(i32),
    /// Confirm the highlighted entry
    ConfirmSelection,
    /// A sensor record was picked
    SelectSensor(SensorRecord),
    /// An operator symbol was picked
    SelectOperator(String),
    /// Close the picker without selecting (Escape, click-away)
    Close,
}

/// Top-level message type
#[derive(Debug, Clone)]
pub enum Msg {
    Input(InputMsg),
    Cursor(CursorMsg),
    Formula(FormulaMsg),
    Picker(PickerMsg),
    /// Explicit save/validate action from the host UI
    Validate,
}
