//! Editor model - the complete state of the formula-entry widget
//!
//! This module contains all the state types following the Elm Architecture
//! pattern: the token store, the caret manager, transient UI state, and
//! the validation verdict.

pub mod caret;
pub mod formula;
pub mod inline;
pub mod sequence;
pub mod token;
pub mod ui;

pub use caret::{CaretLayout, CaretManager, ClickTarget, Rect};
pub use formula::TokenSequence;
pub use inline::InlineText;
pub use sequence::ContentSequence;
pub use token::{SensorRecord, Token, TokenId, TokenKind};
pub use ui::{
    Composition, OperatorDef, OperatorMenuState, PickerId, PickerState, SensorSearchState,
    UiState, OPERATORS,
};

use crate::config::EditorConfig;
use crate::sensors::SensorDirectory;
use crate::validate::{self, ValidationState};

/// The complete model for one formula-entry session
///
/// Single-threaded by construction: one user, one focused editor instance,
/// every mutation synchronous inside `update`.
#[derive(Debug)]
pub struct EditorModel {
    /// Canonical formula content and pending-input buffer
    pub formula: TokenSequence,
    /// Logical-cursor-to-screen mapping
    pub caret: CaretManager,
    /// Picker sessions, focus, composition mode
    pub ui: UiState,
    /// Verdict of the last explicit validation
    pub validation: ValidationState,
    /// Persisted editor configuration
    pub config: EditorConfig,
    /// Sensor catalog consumed by the `@` picker
    pub directory: Box<dyn SensorDirectory>,
}

impl EditorModel {
    /// Create a model over the given sensor directory with default config
    pub fn new(directory: Box<dyn SensorDirectory>) -> Self {
        Self {
            formula: TokenSequence::new(),
            caret: CaretManager::new(),
            ui: UiState::new(),
            validation: ValidationState::Unvalidated,
            config: EditorConfig::default(),
            directory,
        }
    }

    pub fn with_config(mut self, config: EditorConfig) -> Self {
        self.config = config;
        self
    }

    /// Run sensor search, bounded by the configured result limit
    pub fn search_sensors(&self, query: &str) -> Vec<SensorRecord> {
        let mut results = self.directory.search(query);
        results.truncate(self.config.max_picker_results);
        results
    }

    /// The serialized formula string (the downstream contract)
    pub fn serialized(&self) -> String {
        self.formula.serialize()
    }

    /// Run validation and store the verdict
    pub fn validate(&mut self) {
        self.validation = validate::validate_sequence(&self.formula);
        match &self.validation {
            ValidationState::Valid { .. } => {
                tracing::info!(formula = %self.serialized(), "formula valid")
            }
            ValidationState::Invalid { error } => {
                tracing::info!(formula = %self.serialized(), %error, "formula invalid")
            }
            ValidationState::Unvalidated => {}
        }
    }

    /// Mark content as edited: any previous verdict no longer applies
    pub(crate) fn touch(&mut self) {
        self.validation = ValidationState::Unvalidated;
    }

    /// Insert a token at the cursor; closes pickers and resets the verdict
    ///
    /// Any pending typed text is discarded: a picker selection replaces the
    /// in-progress input wholesale, it never leaves leftovers to commit
    /// later.
    pub fn insert_token(&mut self, token: Token) {
        self.formula.insert_token(token);
        self.formula.set_pending("");
        self.ui.close_picker();
        self.touch();
    }

    /// Remove the token at `index`; closes pickers and resets the verdict
    pub fn remove_token(&mut self, index: usize) {
        self.formula.remove_token(index);
        self.ui.close_picker();
        self.touch();
    }
}
