//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions. Every mutation
//! happens synchronously inside one `update` call; the only deferral is
//! the `Cmd::FocusInput` the host runs after the next layout pass.

use crate::commands::Cmd;
use crate::messages::{CursorMsg, Direction, FormulaMsg, InputMsg, Msg, PickerMsg};
use crate::model::{
    CaretManager, ClickTarget, Composition, ContentSequence, EditorModel, OperatorMenuState,
    PickerState, SensorSearchState, Token, OPERATORS,
};
use crate::trigger::{self, TriggerDecision};

/// Main update function - dispatches to sub-handlers
pub fn update(model: &mut EditorModel, msg: Msg) -> Option<Cmd> {
    match msg {
        Msg::Input(m) => update_input(model, m),
        Msg::Cursor(m) => update_cursor(model, m),
        Msg::Formula(m) => update_formula(model, m),
        Msg::Picker(m) => update_picker(model, m),
        Msg::Validate => {
            model.validate();
            Some(Cmd::Redraw)
        }
    }
}

// ============================================================================
// Raw input
// ============================================================================

/// Handle raw input events (typing, Backspace, Enter, IME, focus)
pub fn update_input(model: &mut EditorModel, msg: InputMsg) -> Option<Cmd> {
    match msg {
        InputMsg::InsertChar(ch) => {
            // The host delivers composition events instead of raw chars
            // while an IME is composing
            if model.ui.is_composing() {
                return None;
            }

            // Typing abandons an open operator menu; the char belongs to
            // the pending buffer
            if matches!(model.ui.active_picker, Some(PickerState::OperatorMenu(_))) {
                model.ui.close_picker();
            }

            if matches!(model.ui.active_picker, Some(PickerState::SensorSearch(_))) {
                return query_insert(model, ch);
            }

            model.formula.push_pending(ch);
            model.touch();
            apply_scan(model);
            Some(Cmd::Redraw)
        }

        InputMsg::Backspace => {
            if model.ui.is_composing() {
                return None;
            }

            if let Some(PickerState::SensorSearch(search)) = model.ui.active_picker.as_mut() {
                if search.query.pop().is_some() {
                    refresh_results(model);
                } else {
                    // Deleted back through the trigger character: close
                    // the picker, and do not re-run detection on the
                    // deletion event itself
                    model.ui.close_picker();
                }
                return Some(Cmd::Redraw);
            }
            if matches!(model.ui.active_picker, Some(PickerState::OperatorMenu(_))) {
                model.ui.close_picker();
            }
            pending_backspace(model)
        }

        InputMsg::CommitPending => {
            let had_pending = !model.formula.pending().is_empty();
            let committed = model.formula.commit_pending_text();
            if had_pending {
                model.touch();
            }
            if committed {
                model.ui.close_picker();
            }
            had_pending.then_some(Cmd::Redraw)
        }

        InputMsg::CompositionStart => {
            model.ui.composition = Composition::Composing;
            None
        }

        InputMsg::CompositionEnd(text) => {
            model.ui.composition = Composition::Idle;
            if matches!(model.ui.active_picker, Some(PickerState::SensorSearch(_))) {
                return composed_into_query(model, &text);
            }
            model.formula.push_pending_str(&text);
            model.touch();
            apply_scan(model);
            Some(Cmd::Redraw)
        }

        InputMsg::Focus => {
            model.ui.is_focused = true;
            Some(Cmd::Redraw)
        }

        InputMsg::Blur => {
            model.ui.is_focused = false;
            Some(Cmd::Redraw)
        }
    }
}

/// Backspace against the pending buffer, or the token before the cursor
fn pending_backspace(model: &mut EditorModel) -> Option<Cmd> {
    if model.formula.pop_pending() {
        model.touch();
        return Some(Cmd::Redraw);
    }
    if model.formula.backspace_at_cursor() {
        model.touch();
        return Cmd::redraw_and_focus();
    }
    None
}

/// Route a typed character into the live sensor-search query
fn query_insert(model: &mut EditorModel, ch: char) -> Option<Cmd> {
    if trigger::is_context_breaker(ch) {
        abandon_search(model, Some(ch));
    } else if let Some(PickerState::SensorSearch(search)) = model.ui.active_picker.as_mut() {
        search.query.push(ch);
        refresh_results(model);
    }
    Some(Cmd::Redraw)
}

/// IME-composed text lands in the open query in one piece
fn composed_into_query(model: &mut EditorModel, text: &str) -> Option<Cmd> {
    if text.chars().any(trigger::is_context_breaker) {
        abandon_search(model, None);
        model.formula.push_pending_str(text);
        model.touch();
        apply_scan(model);
    } else if let Some(PickerState::SensorSearch(search)) = model.ui.active_picker.as_mut() {
        search.query.push_str(text);
        refresh_results(model);
    }
    Some(Cmd::Redraw)
}

/// The search context was abandoned: fold the query text (without the
/// consumed trigger) back into the pending buffer, then rescan once
fn abandon_search(model: &mut EditorModel, extra: Option<char>) {
    let Some(PickerState::SensorSearch(search)) = model.ui.active_picker.take() else {
        return;
    };
    tracing::debug!(query = %search.query, "sensor search abandoned");
    model.formula.push_pending_str(&search.query);
    if let Some(ch) = extra {
        model.formula.push_pending(ch);
    }
    model.touch();
    apply_scan(model);
}

/// Scan the pending buffer and open whichever picker it calls for
fn apply_scan(model: &mut EditorModel) {
    match trigger::scan(model.formula.pending()) {
        TriggerDecision::OpenSensorSearch { pending, query } => {
            model.formula.set_pending(pending);
            let results = model.search_sensors(&query);
            model.ui.open_picker(PickerState::SensorSearch(SensorSearchState {
                query,
                results,
                selected_index: 0,
            }));
        }
        TriggerDecision::OpenOperatorMenu { pending } => {
            model.formula.set_pending(pending);
            model
                .ui
                .open_picker(PickerState::OperatorMenu(OperatorMenuState::default()));
        }
        TriggerDecision::None => {}
    }
}

/// Re-run the directory search for the current query
fn refresh_results(model: &mut EditorModel) {
    let query = match model.ui.active_picker.as_ref() {
        Some(PickerState::SensorSearch(search)) => search.query.clone(),
        _ => return,
    };
    let results = model.search_sensors(&query);
    if let Some(PickerState::SensorSearch(search)) = model.ui.active_picker.as_mut() {
        search.results = results;
        search.selected_index = 0;
    }
}

// ============================================================================
// Cursor movement and clicks
// ============================================================================

/// Handle cursor messages (arrow movement, click targets)
pub fn update_cursor(model: &mut EditorModel, msg: CursorMsg) -> Option<Cmd> {
    match msg {
        CursorMsg::Move(direction) => {
            // With pending text the conventional text caret owns the
            // arrow keys
            if !model.formula.pending().is_empty() {
                return None;
            }
            let moved = match direction {
                Direction::Left => model.formula.move_left(),
                Direction::Right => model.formula.move_right(),
            };
            if moved {
                Cmd::redraw_and_focus()
            } else {
                None
            }
        }

        CursorMsg::ClickToken(index) => click_to(model, ClickTarget::Token(index)),
        CursorMsg::ClickGap(index) => click_to(model, ClickTarget::Gap(index)),
        CursorMsg::ClickEmptyArea => click_to(model, ClickTarget::Empty),

        CursorMsg::SetPosition(position) => {
            model.formula.set_cursor(position);
            Some(Cmd::Redraw)
        }
    }
}

/// Clicks close any open picker (click-away) and move the cursor
fn click_to(model: &mut EditorModel, target: ClickTarget) -> Option<Cmd> {
    model.ui.close_picker();
    let position = CaretManager::target_cursor(target, model.formula.tokens().len());
    model.formula.set_cursor(position);
    Cmd::redraw_and_focus()
}

// ============================================================================
// Formula mutations
// ============================================================================

/// Handle direct formula mutations
pub fn update_formula(model: &mut EditorModel, msg: FormulaMsg) -> Option<Cmd> {
    match msg {
        FormulaMsg::InsertToken(token) => {
            model.insert_token(token);
            Cmd::redraw_and_focus()
        }
        FormulaMsg::RemoveToken(index) => {
            model.remove_token(index);
            Cmd::redraw_and_focus()
        }
    }
}

// ============================================================================
// Picker sessions
// ============================================================================

/// Handle messages from an open picker session
pub fn update_picker(model: &mut EditorModel, msg: PickerMsg) -> Option<Cmd> {
    match msg {
        PickerMsg::QueryChanged(query) => {
            match model.ui.active_picker.as_mut() {
                Some(PickerState::SensorSearch(search)) => {
                    search.query = query;
                }
                _ => return None,
            }
            refresh_results(model);
            Some(Cmd::Redraw)
        }

        PickerMsg::MoveSelection(delta) => match model.ui.active_picker.as_mut() {
            Some(PickerState::SensorSearch(search)) => {
                let max = search.results.len().saturating_sub(1);
                search.selected_index = step_selection(search.selected_index, delta, max);
                Some(Cmd::Redraw)
            }
            Some(PickerState::OperatorMenu(menu)) => {
                let max = OPERATORS.len() - 1;
                menu.selected_index = step_selection(menu.selected_index, delta, max);
                Some(Cmd::Redraw)
            }
            None => None,
        },

        PickerMsg::ConfirmSelection => match model.ui.active_picker.as_ref() {
            Some(PickerState::SensorSearch(search)) => {
                let record = search.results.get(search.selected_index).cloned()?;
                model.insert_token(Token::sensor(record));
                Cmd::redraw_and_focus()
            }
            Some(PickerState::OperatorMenu(menu)) => {
                let symbol = OPERATORS[menu.selected_index.min(OPERATORS.len() - 1)].symbol;
                model.insert_token(Token::operator(symbol));
                Cmd::redraw_and_focus()
            }
            None => None,
        },

        PickerMsg::SelectSensor(record) => {
            model.insert_token(Token::sensor(record));
            Cmd::redraw_and_focus()
        }

        PickerMsg::SelectOperator(symbol) => {
            model.insert_token(Token::operator(symbol));
            Cmd::redraw_and_focus()
        }

        PickerMsg::Close => {
            if model.ui.has_picker() {
                model.ui.close_picker();
                Some(Cmd::Redraw)
            } else {
                None
            }
        }
    }
}

fn step_selection(current: usize, delta: i32, max_index: usize) -> usize {
    let next = current as i64 + i64::from(delta);
    next.clamp(0, max_index as i64) as usize
}
