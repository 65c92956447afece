//! Command types for the Elm-style architecture
//!
//! Commands represent side effects the host performs after an update.
//! The core never touches the DOM/screen itself; it only asks.

/// Side effect requested by an update
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Repaint the editor surface
    Redraw,
    /// After the next layout pass, reposition the hidden input at the
    /// current caret anchor and focus it
    ///
    /// Ordering-sensitive: the host must run this strictly after the
    /// store/cursor mutation that requested it, never before, or the
    /// caret is computed against stale layout.
    FocusInput,
    /// Execute multiple commands in order
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Redraw plus deferred input refocus, the common post-mutation pair
    pub fn redraw_and_focus() -> Option<Cmd> {
        Some(Cmd::Batch(vec![Cmd::Redraw, Cmd::FocusInput]))
    }

    /// Flatten into the individual commands a host should execute
    pub fn flatten(self) -> Vec<Cmd> {
        match self {
            Cmd::None => Vec::new(),
            Cmd::Batch(cmds) => cmds.into_iter().flat_map(Cmd::flatten).collect(),
            other => vec![other],
        }
    }
}
