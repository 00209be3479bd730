//! Main layout: title bar, tabs, table, pagination, status bar.

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::Paragraph,
    Frame,
};

use crate::model::App;

use super::components;
use super::theme::colors;

/// Render the full frame, modal on top.
pub fn render(app: &App, frame: &mut Frame) {
    let size = frame.area();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title bar
            Constraint::Length(1), // entity tabs
            Constraint::Min(1),    // table
            Constraint::Length(1), // pagination
            Constraint::Length(1), // status bar
        ])
        .split(size);

    render_title_bar(frame, rows[0]);
    components::tabs::render(app, frame, rows[1]);
    components::table::render(app, frame, rows[2]);
    components::pagination::render(app, frame, rows[3]);
    components::statusbar::render(app, frame, rows[4]);

    components::modal::render(app, frame);
}

fn render_title_bar(frame: &mut Frame, area: ratatui::layout::Rect) {
    let c = colors();
    let title = Paragraph::new(" Dealdesk v0.1.0")
        .style(Style::default().bg(c.highlight).fg(c.selected_fg));
    frame.render_widget(title, area);
}
