//! Trigger protocol tests - picker open/close, live query, abandonment,
//! IME composition

mod common;

use common::{test_model, type_str};
use formula::input::{handle_composition_end, handle_composition_start, handle_key, Key};
use formula::messages::{Msg, PickerMsg};
use formula::model::{PickerId, PickerState, SensorRecord};
use formula::update::update;

fn open_picker_id(model: &formula::EditorModel) -> Option<PickerId> {
    model.ui.active_picker.as_ref().map(PickerState::id)
}

fn search_state(model: &formula::EditorModel) -> &formula::model::SensorSearchState {
    match model.ui.active_picker.as_ref() {
        Some(PickerState::SensorSearch(search)) => search,
        other => panic!("expected sensor search, got {other:?}"),
    }
}

// Scenario: typing "foo @temp" opens the sensor picker with live query
// "temp"; selecting {id: "temperature", name: "温度"} commits a sensor
// token with value "temperature" and clears the pending buffer and query.
#[test]
fn test_typing_at_opens_sensor_search_with_live_query() {
    let mut model = test_model();
    type_str(&mut model, "foo @temp");

    assert_eq!(open_picker_id(&model), Some(PickerId::SensorSearch));
    let search = search_state(&model);
    assert_eq!(search.query, "temp");
    assert_eq!(search.results.len(), 1);
    assert_eq!(search.results[0].id, "temperature");
    // Text before the trigger stays committed as pending plain text
    assert_eq!(model.formula.pending(), "foo ");

    update(
        &mut model,
        Msg::Picker(PickerMsg::SelectSensor(SensorRecord::new(
            "temperature",
            "温度",
            "plant.zone1.temperature",
        ))),
    );

    assert_eq!(open_picker_id(&model), None);
    assert_eq!(model.formula.tokens().len(), 1);
    assert_eq!(model.formula.tokens()[0].value, "temperature");
    assert_eq!(model.formula.tokens()[0].display, "温度");
    // Selection discards the pending text along with the query
    assert_eq!(model.formula.pending(), "");
}

// Text typed before the trigger is replaced by the selection, never left
// behind for a later Enter to commit after the token.
#[test]
fn test_selection_discards_text_typed_before_the_trigger() {
    let mut model = test_model();
    type_str(&mut model, "foo @temp");
    update(
        &mut model,
        Msg::Picker(PickerMsg::SelectSensor(SensorRecord::new(
            "temperature",
            "温度",
            "plant.zone1.temperature",
        ))),
    );
    assert_eq!(model.formula.pending(), "");
    handle_key(&mut model, Key::Enter);
    assert_eq!(model.serialized(), "@temperature");

    type_str(&mut model, "bar #");
    assert_eq!(model.formula.pending(), "bar ");
    update(&mut model, Msg::Picker(PickerMsg::SelectOperator("+".to_string())));
    assert_eq!(model.formula.pending(), "");
    assert_eq!(model.serialized(), "@temperature +");
}

#[test]
fn test_query_narrows_on_every_keystroke() {
    let mut model = test_model();
    type_str(&mut model, "@");
    // Browse view: all four test sensors
    assert_eq!(search_state(&model).results.len(), 4);

    type_str(&mut model, "p");
    // "p" matches ids and paths broadly; narrow further
    type_str(&mut model, "re");
    assert_eq!(search_state(&model).query, "pre");
    assert_eq!(search_state(&model).results.len(), 1);
    assert_eq!(search_state(&model).results[0].id, "pressure");
}

#[test]
fn test_email_like_text_never_opens_picker() {
    let mut model = test_model();
    type_str(&mut model, "user@example");
    assert_eq!(open_picker_id(&model), None);
    assert_eq!(model.formula.pending(), "user@example");
}

#[test]
fn test_hash_opens_operator_menu_and_is_consumed() {
    let mut model = test_model();
    type_str(&mut model, "#");
    assert_eq!(open_picker_id(&model), Some(PickerId::OperatorMenu));
    assert_eq!(model.formula.pending(), "");

    update(&mut model, Msg::Picker(PickerMsg::SelectOperator("+".to_string())));
    assert_eq!(open_picker_id(&model), None);
    assert_eq!(model.formula.tokens()[0].value, "+");
    assert_eq!(model.formula.pending(), "");
}

#[test]
fn test_opening_one_picker_closes_the_other() {
    let mut model = test_model();
    type_str(&mut model, "#");
    assert_eq!(open_picker_id(&model), Some(PickerId::OperatorMenu));

    // Typing abandons the menu; "@" then opens the sensor search
    type_str(&mut model, "@");
    assert_eq!(open_picker_id(&model), Some(PickerId::SensorSearch));
}

#[test]
fn test_escape_closes_picker_without_touching_formula() {
    let mut model = test_model();
    type_str(&mut model, "@temp");
    handle_key(&mut model, Key::Escape);

    assert_eq!(open_picker_id(&model), None);
    assert_eq!(model.formula.tokens().len(), 0);
    // The consumed trigger and query do not reappear as text
    assert_eq!(model.formula.pending(), "");
}

#[test]
fn test_space_in_query_abandons_the_session() {
    let mut model = test_model();
    type_str(&mut model, "@temp ");

    assert_eq!(open_picker_id(&model), None);
    // The query text folds back into the pending buffer, sans trigger
    assert_eq!(model.formula.pending(), "temp ");
}

#[test]
fn test_abandoned_query_rescans_for_a_new_trigger() {
    let mut model = test_model();
    type_str(&mut model, "@a @b");
    // The second "@" abandoned the first session and opened a new one
    assert_eq!(open_picker_id(&model), Some(PickerId::SensorSearch));
    assert_eq!(search_state(&model).query, "b");
    assert_eq!(model.formula.pending(), "a ");
}

#[test]
fn test_deleting_back_through_trigger_closes_without_refiring() {
    let mut model = test_model();
    type_str(&mut model, "@t");

    handle_key(&mut model, Key::Backspace);
    assert_eq!(search_state(&model).query, "");
    assert_eq!(open_picker_id(&model), Some(PickerId::SensorSearch));

    // Deleting the trigger itself closes the picker; the deletion event
    // does not re-run detection
    handle_key(&mut model, Key::Backspace);
    assert_eq!(open_picker_id(&model), None);
    assert_eq!(model.formula.pending(), "");
}

#[test]
fn test_enter_confirms_highlighted_sensor() {
    let mut model = test_model();
    type_str(&mut model, "@");
    handle_key(&mut model, Key::ArrowDown);
    handle_key(&mut model, Key::ArrowDown);
    handle_key(&mut model, Key::Enter);

    assert_eq!(model.formula.tokens().len(), 1);
    assert_eq!(model.formula.tokens()[0].value, "flow-rate");
}

#[test]
fn test_selection_clamps_at_list_edges() {
    let mut model = test_model();
    type_str(&mut model, "@temp");
    handle_key(&mut model, Key::ArrowUp);
    assert_eq!(search_state(&model).selected_index, 0);
    for _ in 0..10 {
        handle_key(&mut model, Key::ArrowDown);
    }
    assert_eq!(search_state(&model).selected_index, 0); // single result
}

#[test]
fn test_composition_suppresses_trigger_detection() {
    let mut model = test_model();
    handle_composition_start(&mut model);

    // Raw keys are ignored while composing
    handle_key(&mut model, Key::Char('@'));
    assert_eq!(open_picker_id(&model), None);
    assert_eq!(model.formula.pending(), "");

    // Detection resumes with the final composed text
    handle_composition_end(&mut model, "温度 @t");
    assert_eq!(open_picker_id(&model), Some(PickerId::SensorSearch));
    assert_eq!(search_state(&model).query, "t");
    assert_eq!(model.formula.pending(), "温度 ");
}

#[test]
fn test_composition_into_open_query_filters_after_commit() {
    let mut model = test_model();
    type_str(&mut model, "@");
    handle_composition_start(&mut model);
    handle_key(&mut model, Key::Char('x'));
    assert_eq!(search_state(&model).query, "");

    handle_composition_end(&mut model, "湿度");
    assert_eq!(search_state(&model).query, "湿度");
    assert_eq!(search_state(&model).results.len(), 1);
    assert_eq!(search_state(&model).results[0].id, "humidity");
}

#[test]
fn test_click_away_closes_picker() {
    let mut model = test_model();
    type_str(&mut model, "@temp");
    update(&mut model, Msg::Cursor(formula::messages::CursorMsg::ClickEmptyArea));
    assert_eq!(open_picker_id(&model), None);
}

#[test]
fn test_mutation_closes_open_picker() {
    let mut model = test_model();
    type_str(&mut model, "@temp");
    update(
        &mut model,
        Msg::Formula(formula::messages::FormulaMsg::InsertToken(common::operator("+"))),
    );
    assert_eq!(open_picker_id(&model), None);
}
