//! Host-agnostic keyboard handling
//!
//! Translates keystrokes from whatever windowing/DOM layer hosts the
//! widget into core messages. Routing depends on what is open: an active
//! sensor search owns the keystream (live query editing, list
//! navigation), the operator menu owns Enter/Escape/arrows, and otherwise
//! keys drive the pending buffer and the logical cursor.

use crate::commands::Cmd;
use crate::messages::{CursorMsg, Direction, InputMsg, Msg, PickerMsg};
use crate::model::{EditorModel, PickerState};
use crate::update::update;

/// A keystroke at the editor boundary, already normalized by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Backspace,
    Enter,
    Escape,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
}

/// Translate one keystroke into an update
pub fn handle_key(model: &mut EditorModel, key: Key) -> Option<Cmd> {
    // IME owns the keystream until composition ends; the host reports
    // composition events instead
    if model.ui.is_composing() {
        return None;
    }

    match key {
        Key::Escape => update(model, Msg::Picker(PickerMsg::Close)),

        Key::Enter => {
            if model.ui.has_picker() {
                update(model, Msg::Picker(PickerMsg::ConfirmSelection))
            } else {
                update(model, Msg::Input(InputMsg::CommitPending))
            }
        }

        Key::ArrowUp if model.ui.has_picker() => {
            update(model, Msg::Picker(PickerMsg::MoveSelection(-1)))
        }
        Key::ArrowDown if model.ui.has_picker() => {
            update(model, Msg::Picker(PickerMsg::MoveSelection(1)))
        }

        // The operator menu is a grid; left/right step the highlight too
        Key::ArrowLeft if matches!(model.ui.active_picker, Some(PickerState::OperatorMenu(_))) => {
            update(model, Msg::Picker(PickerMsg::MoveSelection(-1)))
        }
        Key::ArrowRight if matches!(model.ui.active_picker, Some(PickerState::OperatorMenu(_))) => {
            update(model, Msg::Picker(PickerMsg::MoveSelection(1)))
        }

        Key::ArrowLeft => update(model, Msg::Cursor(CursorMsg::Move(Direction::Left))),
        Key::ArrowRight => update(model, Msg::Cursor(CursorMsg::Move(Direction::Right))),
        Key::ArrowUp | Key::ArrowDown => None,

        Key::Backspace => update(model, Msg::Input(InputMsg::Backspace)),
        Key::Char(ch) => update(model, Msg::Input(InputMsg::InsertChar(ch))),
    }
}

/// The host reported the start of IME composition
pub fn handle_composition_start(model: &mut EditorModel) -> Option<Cmd> {
    update(model, Msg::Input(InputMsg::CompositionStart))
}

/// The host reported the end of IME composition with the final text
pub fn handle_composition_end(model: &mut EditorModel, text: impl Into<String>) -> Option<Cmd> {
    update(model, Msg::Input(InputMsg::CompositionEnd(text.into())))
}

/// Resolve a click on the editor surface through the caret manager
pub fn handle_click(model: &mut EditorModel, x: f32, y: f32) -> Option<Cmd> {
    let target = model.caret.hit_test(x, y)?;
    let msg = match target {
        crate::model::ClickTarget::Token(i) => CursorMsg::ClickToken(i),
        crate::model::ClickTarget::Gap(i) => CursorMsg::ClickGap(i),
        crate::model::ClickTarget::Empty => CursorMsg::ClickEmptyArea,
    };
    update(model, Msg::Cursor(msg))
}
