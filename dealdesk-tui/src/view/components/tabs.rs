//! Entity tab strip.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::Tabs,
    Frame,
};

use dealdesk_api::EntityKind;

use crate::model::App;
use crate::view::theme::colors;

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let c = colors();
    let titles: Vec<&'static str> = EntityKind::ALL
        .iter()
        .map(|kind| kind.descriptor().title)
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.current)
        .style(Style::default().fg(c.muted))
        .highlight_style(
            Style::default()
                .fg(c.selected_fg)
                .add_modifier(Modifier::BOLD),
        )
        .divider(" | ");

    frame.render_widget(tabs, area);
}
