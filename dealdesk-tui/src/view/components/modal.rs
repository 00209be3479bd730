//! Overlay dialogs: form editor, delete confirmation, line editors.
//!
//! Renders nothing while browsing with no line editor active.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use dealdesk_core::{DeletePrompt, FormState, ListMode};

use crate::model::App;
use crate::view::theme::colors;

pub fn render(app: &App, frame: &mut Frame) {
    if let Some(term) = &app.search_input {
        render_line_editor(frame, "Search", term);
        return;
    }
    if let Some(path) = &app.upload_input {
        render_line_editor(frame, "Upload file path", path);
        return;
    }

    match app.controller().mode() {
        ListMode::Browsing => {}
        ListMode::Editing(form) => render_form(frame, form),
        ListMode::ConfirmingDelete(prompt) => render_confirm(frame, prompt),
    }
}

/// Centered rect of the given size, clamped to the frame.
fn centered_rect(width: u16, height: u16, frame_area: Rect) -> Rect {
    let width = width.min(frame_area.width);
    let height = height.min(frame_area.height);
    Rect {
        x: frame_area.x + (frame_area.width - width) / 2,
        y: frame_area.y + (frame_area.height - height) / 2,
        width,
        height,
    }
}

fn render_form(frame: &mut Frame, form: &FormState) {
    let c = colors();
    let title = if form.is_new() {
        " New record "
    } else {
        " Edit record "
    };

    // Three lines per field: label, value, error or spacing.
    let field_count = form.fields().len();
    let height = u16::try_from(field_count * 3).unwrap_or(u16::MAX).saturating_add(2);
    let area = centered_rect(50, height, frame.area());

    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(c.highlight))
        .title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(3); field_count])
        .split(inner);

    for (i, spec) in form.fields().iter().enumerate() {
        let focused = i == form.focus;
        let value = form.value(i);

        let label_style = if focused {
            Style::default().fg(c.highlight).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(c.muted)
        };
        let mut lines = vec![Line::styled(format!(" {}", spec.label), label_style)];

        if value.is_empty() {
            lines.push(Line::styled(
                format!("  {}", spec.placeholder),
                Style::default().fg(c.muted).add_modifier(Modifier::ITALIC),
            ));
        } else {
            let cursor = if focused { "_" } else { "" };
            lines.push(Line::from(vec![
                Span::raw(format!("  {value}")),
                Span::styled(cursor, Style::default().fg(c.highlight)),
            ]));
        }

        if let Some(error) = form.error_for(spec.key) {
            lines.push(Line::styled(
                format!("  {error}"),
                Style::default().fg(c.error),
            ));
        }

        frame.render_widget(Paragraph::new(lines), chunks[i]);
    }
}

fn render_confirm(frame: &mut Frame, prompt: &DeletePrompt) {
    let c = colors();
    let area = centered_rect(46, 5, frame.area());

    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(c.error))
        .title(" Confirm delete ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(format!(" Delete '{}'?", prompt.label)),
        Line::styled(
            " This cannot be undone.",
            Style::default().fg(c.muted),
        ),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_line_editor(frame: &mut Frame, title: &str, value: &str) {
    let c = colors();
    let area = centered_rect(50, 3, frame.area());

    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(c.highlight))
        .title(format!(" {title} "));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let line = Line::from(vec![
        Span::raw(format!(" {value}")),
        Span::styled("_", Style::default().fg(c.highlight)),
    ]);
    frame.render_widget(Paragraph::new(line), inner);
}
