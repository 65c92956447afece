//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use formula::model::{EditorModel, SensorRecord, Token};
use formula::sensors::StaticDirectory;

/// Create a test model over a small fixed sensor directory
pub fn test_model() -> EditorModel {
    EditorModel::new(Box::new(StaticDirectory::new(test_sensors())))
}

/// The sensor catalog used across tests
pub fn test_sensors() -> Vec<SensorRecord> {
    vec![
        SensorRecord::new("temperature", "温度", "plant.zone1.temperature"),
        SensorRecord::new("pressure", "圧力", "plant.zone1.pressure"),
        SensorRecord::new("flow-rate", "流量", "plant.zone2.flow"),
        SensorRecord::new("humidity", "湿度", "plant.zone2.humidity"),
    ]
}

/// Create a test model pre-filled with tokens (cursor ends up at the end)
pub fn model_with_tokens(tokens: Vec<Token>) -> EditorModel {
    let mut model = test_model();
    for token in tokens {
        model.formula.insert_token(token);
    }
    model
}

/// Shorthand for a sensor token without directory lookup
pub fn sensor(id: &str) -> Token {
    Token::sensor(SensorRecord::new(id, format!("{id} (name)"), format!("plant.{id}")))
}

pub fn operator(symbol: &str) -> Token {
    Token::operator(symbol)
}

/// Type a string character by character through the input layer
pub fn type_str(model: &mut EditorModel, text: &str) {
    for ch in text.chars() {
        formula::input::handle_key(model, formula::input::Key::Char(ch));
    }
}
