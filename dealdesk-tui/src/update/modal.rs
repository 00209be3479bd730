//! Updates for the form editor and the delete confirmation prompt.

use dealdesk_core::{ListMode, SubmitOutcome};

use crate::message::ModalMessage;
use crate::model::App;

pub fn update(app: &mut App, msg: &ModalMessage) {
    match msg {
        ModalMessage::Close => {
            let idx = app.current.min(app.controllers.len() - 1);
            if let Some(ctrl) = app.controllers.get_mut(idx) {
                ctrl.cancel();
            }
        }
        ModalMessage::NextField => {
            if let Some(form) = form_mut(app) {
                form.focus_next();
            }
        }
        ModalMessage::PrevField => {
            if let Some(form) = form_mut(app) {
                form.focus_prev();
            }
        }
        ModalMessage::Input(c) => {
            if let Some(form) = form_mut(app) {
                form.focused_value_mut().push(*c);
            }
        }
        ModalMessage::Backspace => {
            if let Some(form) = form_mut(app) {
                form.focused_value_mut().pop();
            }
        }
        ModalMessage::Confirm => confirm(app),
    }
}

fn form_mut(app: &mut App) -> Option<&mut dealdesk_core::FormState> {
    let idx = app.current.min(app.controllers.len() - 1);
    app.controllers.get_mut(idx).and_then(|c| c.form_mut())
}

/// Submit the open form, or carry out the pending delete.
fn confirm(app: &mut App) {
    let idx = app.current.min(app.controllers.len() - 1);
    let Some(ctrl) = app.controllers.get_mut(idx) else {
        return;
    };

    let status = match ctrl.mode() {
        ListMode::Editing(_) => match app.backend.block_on(ctrl.submit()) {
            Ok(SubmitOutcome::Saved(record)) => {
                let label = record.field("name").unwrap_or(record.id.as_str());
                Some(format!("Saved '{label}'"))
            }
            Ok(SubmitOutcome::Invalid) => Some("Fill in the highlighted fields".to_string()),
            Err(e) => {
                if e.is_expected() {
                    log::warn!("save rejected: {e}");
                } else {
                    log::error!("save failed: {e}");
                }
                Some(format!("Save failed: {e}"))
            }
        },
        ListMode::ConfirmingDelete(prompt) => {
            let label = prompt.label.clone();
            match app.backend.block_on(ctrl.confirm_delete()) {
                Ok(()) => Some(format!("Deleted '{label}'")),
                Err(e) => {
                    if e.is_expected() {
                        log::warn!("delete rejected: {e}");
                    } else {
                        log::error!("delete failed: {e}");
                    }
                    Some(format!("Delete failed: {e}"))
                }
            }
        }
        ListMode::Browsing => None,
    };

    if let Some(message) = status {
        app.set_status(message);
    }
}
