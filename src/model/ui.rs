//! UI state - picker sessions, focus tracking, and IME composition mode

use super::token::SensorRecord;

// ============================================================================
// Operator catalog
// ============================================================================

/// An entry in the `#` operator menu
#[derive(Debug, Clone, Copy)]
pub struct OperatorDef {
    pub symbol: &'static str,
    pub label: &'static str,
}

/// Static registry of the operators the menu offers
pub static OPERATORS: &[OperatorDef] = &[
    OperatorDef {
        symbol: "+",
        label: "Add",
    },
    OperatorDef {
        symbol: "-",
        label: "Subtract",
    },
    OperatorDef {
        symbol: "*",
        label: "Multiply",
    },
    OperatorDef {
        symbol: "/",
        label: "Divide",
    },
    OperatorDef {
        symbol: "(",
        label: "Left parenthesis",
    },
    OperatorDef {
        symbol: ")",
        label: "Right parenthesis",
    },
    OperatorDef {
        symbol: "^",
        label: "Power",
    },
];

// ============================================================================
// Picker sessions
// ============================================================================

/// Identifies which picker is currently open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerId {
    /// Sensor search opened by `@`
    SensorSearch,
    /// Operator menu opened by `#`
    OperatorMenu,
}

/// State for a live sensor-search session
#[derive(Debug, Clone, Default)]
pub struct SensorSearchState {
    /// Live search query, updated on every keystroke
    pub query: String,
    /// Directory results for the current query
    pub results: Vec<SensorRecord>,
    /// Index of the highlighted result
    pub selected_index: usize,
}

/// State for an operator-menu session
#[derive(Debug, Clone, Default)]
pub struct OperatorMenuState {
    /// Index of the highlighted operator in [`OPERATORS`]
    pub selected_index: usize,
}

/// Union of all picker session states
#[derive(Debug, Clone)]
pub enum PickerState {
    SensorSearch(SensorSearchState),
    OperatorMenu(OperatorMenuState),
}

impl PickerState {
    pub fn id(&self) -> PickerId {
        match self {
            PickerState::SensorSearch(_) => PickerId::SensorSearch,
            PickerState::OperatorMenu(_) => PickerId::OperatorMenu,
        }
    }
}

// ============================================================================
// Composition mode
// ============================================================================

/// IME composition mode
///
/// While composition is in progress, trigger detection and query filtering
/// are suppressed; they resume when composition ends with the final
/// composed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Composition {
    #[default]
    Idle,
    Composing,
}

/// Transient UI state for one editor session
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Currently open picker, if any (at most one at a time)
    pub active_picker: Option<PickerState>,
    /// Whether the editor surface currently holds focus
    pub is_focused: bool,
    /// IME composition mode
    pub composition: Composition,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_picker(&self) -> bool {
        self.active_picker.is_some()
    }

    /// Open a picker; any other open picker closes first
    pub fn open_picker(&mut self, state: PickerState) {
        tracing::debug!(picker = ?state.id(), "open picker");
        self.active_picker = Some(state);
    }

    /// Close the active picker (synchronous state reset, no side effects)
    pub fn close_picker(&mut self) {
        if let Some(picker) = self.active_picker.take() {
            tracing::debug!(picker = ?picker.id(), "close picker");
        }
    }

    pub fn is_composing(&self) -> bool {
        self.composition == Composition::Composing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_one_picker_at_a_time() {
        let mut ui = UiState::new();
        ui.open_picker(PickerState::SensorSearch(SensorSearchState::default()));
        ui.open_picker(PickerState::OperatorMenu(OperatorMenuState::default()));
        assert_eq!(
            ui.active_picker.as_ref().map(PickerState::id),
            Some(PickerId::OperatorMenu)
        );
    }

    #[test]
    fn test_close_picker_is_idempotent() {
        let mut ui = UiState::new();
        ui.close_picker();
        assert!(!ui.has_picker());
    }

    #[test]
    fn test_operator_catalog_has_the_seven_menu_entries() {
        let symbols: Vec<&str> = OPERATORS.iter().map(|op| op.symbol).collect();
        assert_eq!(symbols, ["+", "-", "*", "/", "(", ")", "^"]);
    }
}
