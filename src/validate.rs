//! Formula validation and AST construction
//!
//! Runs on an explicit save/validate action. The serialized formula string
//! is checked structurally, and on success a simplified AST is synthesized
//! for the downstream compute backend. Full expression-grammar parsing
//! (operator precedence, function calls) is deliberately out of scope: the
//! AST combines the first two sensor references with the operator written
//! between them.

use serde::Serialize;
use thiserror::Error;

use crate::model::ContentSequence;

/// Operators that require an operand on both sides at the string boundary
const BINARY_OPERATORS: [char; 4] = ['+', '-', '*', '/'];

/// Placeholder preview shown for a valid formula
///
/// Actual numeric evaluation is delegated to the compute backend.
pub const PREVIEW_PLACEHOLDER: &str = "ΔT = 120 ℃";

/// Why a formula failed validation
///
/// All variants are recoverable and local to the validation step; none is
/// ever fatal to the editing session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Open/close parenthesis counts differ
    #[error("parentheses are not balanced")]
    UnbalancedParentheses,
    /// No sensor reference present
    #[error("at least one sensor reference is required")]
    MissingSensorReference,
    /// Operator at an expression boundary with no operand
    #[error("operators need an operand on both sides")]
    DanglingOperator,
    /// Unexpected failure during serialization/AST encoding
    #[error("syntax error: {0}")]
    Syntax(String),
}

/// Simplified structural representation of a validated formula
///
/// Serializes to the JSON shape the compute backend expects:
/// `{"type": "BinaryExpr", "op": "-", "left": {...}, "right": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum Ast {
    Empty,
    SensorRef {
        #[serde(rename = "sensorId")]
        sensor_id: String,
    },
    BinaryExpr {
        op: String,
        left: Box<Ast>,
        right: Box<Ast>,
    },
}

impl Ast {
    /// Encode for the compute backend
    pub fn to_json(&self) -> Result<String, ValidationError> {
        serde_json::to_string(self).map_err(|e| ValidationError::Syntax(e.to_string()))
    }
}

/// Validation verdict state machine: `Unvalidated → {Valid, Invalid}`
///
/// Any mutation of the formula or the pending buffer after a validation
/// resets the verdict to `Unvalidated` until the next explicit validation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ValidationState {
    #[default]
    Unvalidated,
    Valid {
        ast: Ast,
        preview: String,
    },
    Invalid {
        error: ValidationError,
    },
}

impl ValidationState {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationState::Valid { .. })
    }

    /// The user-visible inline message for an invalid verdict
    pub fn error_message(&self) -> Option<String> {
        match self {
            ValidationState::Invalid { error } => Some(error.to_string()),
            _ => None,
        }
    }
}

/// Validate a backing store by reading its flattened content
pub fn validate_sequence<S: ContentSequence + ?Sized>(sequence: &S) -> ValidationState {
    match validate_source(&sequence.serialize()) {
        Ok(ast) => ValidationState::Valid {
            ast,
            preview: PREVIEW_PLACEHOLDER.to_string(),
        },
        Err(error) => ValidationState::Invalid { error },
    }
}

/// Validate a serialized formula string
///
/// Checks run in order and short-circuit on the first failure:
/// parenthesis balance, sensor presence, boundary operators.
pub fn validate_source(source: &str) -> Result<Ast, ValidationError> {
    let open = source.matches('(').count();
    let close = source.matches(')').count();
    if open != close {
        return Err(ValidationError::UnbalancedParentheses);
    }

    if !source.contains('@') {
        return Err(ValidationError::MissingSensorReference);
    }

    let leading = source.trim_start().chars().next();
    let trailing = source.trim_end().chars().next_back();
    if leading.map_or(false, |c| BINARY_OPERATORS.contains(&c))
        || trailing.map_or(false, |c| BINARY_OPERATORS.contains(&c))
    {
        return Err(ValidationError::DanglingOperator);
    }

    Ok(build_ast(source))
}

/// Build the simplified AST from the serialized formula
///
/// Zero sensors yields `Empty`, one yields `SensorRef`, two or more yield
/// a single `BinaryExpr` over the first two - additional sensors are
/// discarded. The operator is the first one written between the two
/// operands; `-` when the user put none there.
fn build_ast(source: &str) -> Ast {
    let words: Vec<&str> = source.split_whitespace().collect();
    let sensors: Vec<(usize, &str)> = words
        .iter()
        .enumerate()
        .filter_map(|(i, w)| w.strip_prefix('@').map(|id| (i, id)))
        .collect();

    match sensors.as_slice() {
        [] => Ast::Empty,
        [(_, only)] => Ast::SensorRef {
            sensor_id: (*only).to_string(),
        },
        [(left_idx, left), (right_idx, right), ..] => {
            let op = words[left_idx + 1..*right_idx]
                .iter()
                .find(|w| is_operator_word(w))
                .map(|w| (*w).to_string())
                .unwrap_or_else(|| "-".to_string());
            Ast::BinaryExpr {
                op,
                left: Box::new(Ast::SensorRef {
                    sensor_id: (*left).to_string(),
                }),
                right: Box::new(Ast::SensorRef {
                    sensor_id: (*right).to_string(),
                }),
            }
        }
    }
}

fn is_operator_word(word: &str) -> bool {
    matches!(word, "+" | "-" | "*" | "/" | "^")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_sensor_is_valid() {
        let ast = validate_source("@temperature").unwrap();
        assert_eq!(
            ast,
            Ast::SensorRef {
                sensor_id: "temperature".to_string()
            }
        );
    }

    #[test]
    fn test_leading_operator_is_dangling() {
        assert_eq!(
            validate_source("+ @pressure"),
            Err(ValidationError::DanglingOperator)
        );
    }

    #[test]
    fn test_trailing_operator_is_dangling() {
        assert_eq!(
            validate_source("@pressure * "),
            Err(ValidationError::DanglingOperator)
        );
    }

    #[test]
    fn test_caret_is_not_boundary_checked() {
        // Only + - * / participate in the boundary check
        assert!(validate_source("@a ^").is_ok());
    }

    #[test]
    fn test_unbalanced_parentheses() {
        assert_eq!(
            validate_source("@a ( @b"),
            Err(ValidationError::UnbalancedParentheses)
        );
    }

    #[test]
    fn test_paren_check_runs_before_sensor_check() {
        assert_eq!(
            validate_source("( ("),
            Err(ValidationError::UnbalancedParentheses)
        );
    }

    #[test]
    fn test_empty_formula_is_missing_sensor() {
        assert_eq!(
            validate_source(""),
            Err(ValidationError::MissingSensorReference)
        );
    }

    #[test]
    fn test_binary_expr_uses_the_written_operator() {
        let ast = validate_source("@t1 * @t2").unwrap();
        assert_eq!(
            ast,
            Ast::BinaryExpr {
                op: "*".to_string(),
                left: Box::new(Ast::SensorRef {
                    sensor_id: "t1".to_string()
                }),
                right: Box::new(Ast::SensorRef {
                    sensor_id: "t2".to_string()
                }),
            }
        );
    }

    #[test]
    fn test_binary_expr_defaults_to_minus_without_operator() {
        let ast = validate_source("@t1 @t2").unwrap();
        let Ast::BinaryExpr { op, .. } = ast else {
            panic!("expected BinaryExpr");
        };
        assert_eq!(op, "-");
    }

    #[test]
    fn test_extra_sensors_are_discarded() {
        let ast = validate_source("@a + @b + @c").unwrap();
        let Ast::BinaryExpr { left, right, .. } = ast else {
            panic!("expected BinaryExpr");
        };
        assert_eq!(
            *left,
            Ast::SensorRef {
                sensor_id: "a".to_string()
            }
        );
        assert_eq!(
            *right,
            Ast::SensorRef {
                sensor_id: "b".to_string()
            }
        );
    }

    #[test]
    fn test_ast_json_shape() {
        let ast = validate_source("@t1 - @t2").unwrap();
        assert_eq!(
            ast.to_json().unwrap(),
            r#"{"type":"BinaryExpr","op":"-","left":{"type":"SensorRef","sensorId":"t1"},"right":{"type":"SensorRef","sensorId":"t2"}}"#
        );
    }

    #[test]
    fn test_validation_is_idempotent() {
        let first = validate_source("@a + @b");
        let second = validate_source("@a + @b");
        assert_eq!(first, second);
    }
}
