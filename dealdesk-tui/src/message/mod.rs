//! Message layer: the bridge between raw input events and state updates.
//!
//! Every user intent is expressed as a message; the update layer is the
//! only place that mutates the model.

/// Top-level application message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMessage {
    /// Exit the application.
    Quit,
    /// Switch to the next entity tab.
    NextTab,
    /// Switch to the previous entity tab.
    PrevTab,
    /// Re-fetch the active list.
    Refresh,

    /// Browsing-mode actions on the active list.
    Content(ContentMessage),
    /// Keys while a form or delete prompt is open.
    Modal(ModalMessage),
    /// Keys while the search or upload line editor is active.
    Line(LineMessage),

    /// Nothing to do.
    Noop,
}

/// Actions available while browsing the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentMessage {
    SelectNext,
    SelectPrev,
    SelectFirst,
    SelectLast,
    NextPage,
    PrevPage,
    /// Open an empty form for a new record.
    New,
    /// Open a form for the selected record.
    Edit,
    /// Ask for delete confirmation on the selected record.
    Delete,
    /// Start typing a search term.
    StartSearch,
    /// Clear the active search term.
    ClearSearch,
    /// Start typing an upload file path (documents only).
    StartUpload,
}

/// Keys while a form or delete prompt is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalMessage {
    Input(char),
    Backspace,
    NextField,
    PrevField,
    /// Submit the form, or confirm the pending delete.
    Confirm,
    /// Close without side effects.
    Close,
}

/// Keys while a line editor (search term, upload path) is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineMessage {
    Input(char),
    Backspace,
    Confirm,
    Cancel,
}
