//! Pagination line under the table.

use ratatui::{layout::Rect, style::Style, widgets::Paragraph, Frame};

use crate::model::App;
use crate::view::theme::colors;

/// Human-readable pagination label.
pub fn label(page: u32, total_pages: u32, search: &str) -> String {
    if search.is_empty() {
        format!(" Page {page}/{total_pages}")
    } else {
        format!(" Page {page}/{total_pages}  search: \"{search}\"")
    }
}

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let c = colors();
    let ctrl = app.controller();
    let text = label(ctrl.page(), ctrl.total_pages(), ctrl.search());
    let line = Paragraph::new(text).style(Style::default().fg(c.muted));
    frame.render_widget(line, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_without_search() {
        assert_eq!(label(2, 3, ""), " Page 2/3");
    }

    #[test]
    fn label_shows_the_search_term() {
        assert_eq!(label(1, 1, "acme"), " Page 1/1  search: \"acme\"");
    }
}
