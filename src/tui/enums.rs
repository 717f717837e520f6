//! Enumerations for TUI state management.

/// Application state for the terminal user interface.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AppState {
    /// Browsing the list.
    TaskList,
    /// Typing into the new-task input.
    AddTask,
    /// Live-editing the text of the selected task.
    EditTask,
    Help,
    /// Asking before the trash is emptied.
    ConfirmPurge,
    /// QR-code overlay on top of the list.
    QrCode,
}
