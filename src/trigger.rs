//! Trigger detection - decides when `@`/`#` should open a contextual picker
//!
//! [`scan`] inspects the pending-input buffer after an *insertion* and
//! reports whether it contains a live trigger context. Deletions never go
//! through here: `update` handles Backspace separately, so deleting back
//! through a trigger character closes the picker without re-firing
//! detection on the deletion event itself. The IME composition gate lives
//! in `UiState`; callers skip scanning while composition is in progress.

/// Opens the sensor search picker
pub const SENSOR_TRIGGER: char = '@';
/// Opens the operator menu
pub const OPERATOR_TRIGGER: char = '#';

/// Outcome of scanning the pending buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerDecision {
    /// No live trigger context; the buffer stays as typed
    None,
    /// Open the sensor search
    ///
    /// `pending` is the text before the trigger, which stays committed as
    /// pending plain text; `query` is the residual text after it, handed
    /// to the picker as the initial live search query. The `@` itself is
    /// consumed.
    OpenSensorSearch { pending: String, query: String },
    /// Open the operator menu
    ///
    /// `pending` is the buffer with the `#` control character stripped:
    /// it is never inserted as formula text.
    OpenOperatorMenu { pending: String },
}

/// Scan the pending buffer for an actionable trigger
///
/// A trigger is recognized only when immediately preceded by
/// start-of-input or whitespace, so an email-like string such as
/// `user@example` never misfires. For `@`, the residual query must not
/// itself contain whitespace or another trigger character; such a context
/// counts as already abandoned and reports [`TriggerDecision::None`].
pub fn scan(buffer: &str) -> TriggerDecision {
    if let Some(idx) = rfind_at_boundary(buffer, SENSOR_TRIGGER) {
        let query = &buffer[idx + SENSOR_TRIGGER.len_utf8()..];
        if !query.chars().any(is_context_breaker) {
            return TriggerDecision::OpenSensorSearch {
                pending: buffer[..idx].to_string(),
                query: query.to_string(),
            };
        }
    }

    if let Some(idx) = rfind_at_boundary(buffer, OPERATOR_TRIGGER) {
        let mut pending = String::with_capacity(buffer.len());
        pending.push_str(&buffer[..idx]);
        pending.push_str(&buffer[idx + OPERATOR_TRIGGER.len_utf8()..]);
        return TriggerDecision::OpenOperatorMenu { pending };
    }

    TriggerDecision::None
}

/// Whether a character typed into a live query abandons the session
pub fn is_context_breaker(ch: char) -> bool {
    ch.is_whitespace() || ch == SENSOR_TRIGGER || ch == OPERATOR_TRIGGER
}

/// Byte index of the last occurrence of `trigger` that sits at a valid
/// boundary (start-of-input or right after whitespace)
fn rfind_at_boundary(buffer: &str, trigger: char) -> Option<usize> {
    buffer
        .char_indices()
        .rev()
        .filter(|&(_, c)| c == trigger)
        .map(|(idx, _)| idx)
        .find(|&idx| {
            buffer[..idx]
                .chars()
                .next_back()
                .map_or(true, char::is_whitespace)
        })
}
