//! Status bar: messages, fetch errors, or key hints.

use ratatui::{layout::Rect, style::Style, widgets::Paragraph, Frame};

use dealdesk_core::ListMode;

use crate::model::App;
use crate::view::theme::colors;

const BROWSE_HINTS: &str =
    " q quit | Tab switch | n new | Enter edit | d delete | / search | u upload | r refresh";
const FORM_HINTS: &str = " Tab next field | Enter save | Esc cancel";
const CONFIRM_HINTS: &str = " y/Enter confirm | n/Esc cancel";
const LINE_HINTS: &str = " Enter apply | Esc cancel";

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let c = colors();

    // Priority: explicit status, then fetch errors, then hints.
    let (text, style) = if let Some(message) = &app.status_message {
        (format!(" {message}"), Style::default().fg(c.fg))
    } else if let Some(error) = app.controller().fetch_error() {
        (format!(" {error}"), Style::default().fg(c.error))
    } else {
        let hints = if app.is_line_editor_open() {
            LINE_HINTS
        } else {
            match app.controller().mode() {
                ListMode::Browsing => BROWSE_HINTS,
                ListMode::Editing(_) => FORM_HINTS,
                ListMode::ConfirmingDelete(_) => CONFIRM_HINTS,
            }
        };
        (hints.to_string(), Style::default().fg(c.muted))
    };

    frame.render_widget(Paragraph::new(text).style(style), area);
}
