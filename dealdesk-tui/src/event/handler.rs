//! Event polling and dispatch.
//!
//! Routing order: force-quit first, then the active line editor, then an
//! open modal, then browsing keys. Only the innermost active layer sees
//! the key.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};

use dealdesk_core::ListMode;

use crate::message::{AppMessage, ContentMessage, LineMessage, ModalMessage};
use crate::model::App;

use super::keymap::DefaultKeymap;

/// Wait up to `timeout` for the next input event.
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Translate a raw event into a message for the update layer.
pub fn handle_event(event: &Event, app: &App) -> AppMessage {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(key, app),
        // Resizes redraw on the next loop iteration anyway.
        _ => AppMessage::Noop,
    }
}

fn handle_key(key: &KeyEvent, app: &App) -> AppMessage {
    if DefaultKeymap::FORCE_QUIT.matches(key) {
        return AppMessage::Quit;
    }

    if app.is_line_editor_open() {
        return handle_line_editor_key(key);
    }

    match app.controller().mode() {
        ListMode::Editing(_) => handle_form_key(key),
        ListMode::ConfirmingDelete(_) => handle_confirm_key(key),
        ListMode::Browsing => handle_browsing_key(key),
    }
}

fn handle_line_editor_key(key: &KeyEvent) -> AppMessage {
    match key.code {
        KeyCode::Enter => AppMessage::Line(LineMessage::Confirm),
        KeyCode::Esc => AppMessage::Line(LineMessage::Cancel),
        KeyCode::Backspace => AppMessage::Line(LineMessage::Backspace),
        KeyCode::Char(c) => AppMessage::Line(LineMessage::Input(c)),
        _ => AppMessage::Noop,
    }
}

fn handle_form_key(key: &KeyEvent) -> AppMessage {
    match key.code {
        KeyCode::Esc => AppMessage::Modal(ModalMessage::Close),
        KeyCode::Enter => AppMessage::Modal(ModalMessage::Confirm),
        KeyCode::Tab | KeyCode::Down => AppMessage::Modal(ModalMessage::NextField),
        KeyCode::BackTab | KeyCode::Up => AppMessage::Modal(ModalMessage::PrevField),
        KeyCode::Backspace => AppMessage::Modal(ModalMessage::Backspace),
        KeyCode::Char(c) => AppMessage::Modal(ModalMessage::Input(c)),
        _ => AppMessage::Noop,
    }
}

fn handle_confirm_key(key: &KeyEvent) -> AppMessage {
    match key.code {
        KeyCode::Enter | KeyCode::Char('y') => AppMessage::Modal(ModalMessage::Confirm),
        KeyCode::Esc | KeyCode::Char('n') => AppMessage::Modal(ModalMessage::Close),
        _ => AppMessage::Noop,
    }
}

fn handle_browsing_key(key: &KeyEvent) -> AppMessage {
    if key.code == KeyCode::BackTab {
        return AppMessage::PrevTab;
    }
    if DefaultKeymap::QUIT.matches(key) {
        return AppMessage::Quit;
    }
    if DefaultKeymap::NEXT_TAB.matches(key) {
        return AppMessage::NextTab;
    }
    if DefaultKeymap::REFRESH.matches(key) {
        return AppMessage::Refresh;
    }

    if DefaultKeymap::NAV_UP.matches(key) {
        return AppMessage::Content(ContentMessage::SelectPrev);
    }
    if DefaultKeymap::NAV_DOWN.matches(key) {
        return AppMessage::Content(ContentMessage::SelectNext);
    }
    if DefaultKeymap::NAV_FIRST.matches(key) {
        return AppMessage::Content(ContentMessage::SelectFirst);
    }
    if DefaultKeymap::NAV_LAST.matches(key) {
        return AppMessage::Content(ContentMessage::SelectLast);
    }
    if DefaultKeymap::PAGE_NEXT.matches(key) {
        return AppMessage::Content(ContentMessage::NextPage);
    }
    if DefaultKeymap::PAGE_PREV.matches(key) {
        return AppMessage::Content(ContentMessage::PrevPage);
    }

    if DefaultKeymap::ACTION_NEW.matches(key) {
        return AppMessage::Content(ContentMessage::New);
    }
    if DefaultKeymap::ACTION_EDIT.matches(key) {
        return AppMessage::Content(ContentMessage::Edit);
    }
    if DefaultKeymap::ACTION_DELETE.matches(key) {
        return AppMessage::Content(ContentMessage::Delete);
    }
    if DefaultKeymap::ACTION_SEARCH.matches(key) {
        return AppMessage::Content(ContentMessage::StartSearch);
    }
    if DefaultKeymap::ACTION_CLEAR_SEARCH.matches(key) {
        return AppMessage::Content(ContentMessage::ClearSearch);
    }
    if DefaultKeymap::ACTION_UPLOAD.matches(key) {
        return AppMessage::Content(ContentMessage::StartUpload);
    }

    AppMessage::Noop
}
