//! Record table for the active entity.
//!
//! Columns come from the entity descriptor, in declared field order. Rows
//! are produced by a lazy iterator over the controller's records; the
//! iterator is rebuilt from scratch on every frame.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph, Row, Table, TableState},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use dealdesk_api::{EntityDescriptor, Record};

use crate::model::App;
use crate::view::theme::colors;

/// Cell text for one record and field key; a missing field renders as "-".
fn cell_text<'a>(record: &'a Record, key: &str) -> &'a str {
    record.field(key).unwrap_or("-")
}

/// Lazy row iterator in declared column order.
pub fn rows<'a>(
    descriptor: &'a EntityDescriptor,
    records: &'a [Record],
) -> impl Iterator<Item = Vec<&'a str>> + 'a {
    records.iter().map(move |record| {
        descriptor
            .fields
            .iter()
            .map(|spec| cell_text(record, spec.key))
            .collect()
    })
}

/// Display width per column: the widest of the header label and every
/// cell, measured in terminal columns.
pub fn column_widths(descriptor: &EntityDescriptor, records: &[Record]) -> Vec<u16> {
    descriptor
        .fields
        .iter()
        .map(|spec| {
            let mut width = spec.label.width();
            for record in records {
                width = width.max(cell_text(record, spec.key).width());
            }
            u16::try_from(width).unwrap_or(u16::MAX)
        })
        .collect()
}

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let c = colors();
    let ctrl = app.controller();
    let descriptor = ctrl.descriptor();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(c.border))
        .title(descriptor.title);

    if ctrl.records().is_empty() {
        let hint = if ctrl.search().is_empty() {
            "  No records yet. Press 'n' to create one."
        } else {
            "  No records match the search. Esc clears it."
        };
        let empty = Paragraph::new(hint)
            .style(Style::default().fg(c.muted))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new(descriptor.fields.iter().map(|spec| spec.label))
        .style(Style::default().fg(c.fg).add_modifier(Modifier::BOLD));

    let body = rows(descriptor, ctrl.records()).map(Row::new);

    let widths: Vec<Constraint> = column_widths(descriptor, ctrl.records())
        .into_iter()
        .map(|w| Constraint::Min(w.saturating_add(2)))
        .collect();

    let table = Table::new(body, widths)
        .header(header)
        .block(block)
        .style(Style::default().fg(c.fg))
        .row_highlight_style(
            Style::default()
                .bg(c.selected_bg)
                .fg(c.selected_fg)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = TableState::default();
    state.select(Some(ctrl.selected()));

    frame.render_stateful_widget(table, area, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use dealdesk_api::EntityKind;

    fn deals() -> Vec<Record> {
        vec![
            Record::new(
                "d1",
                [
                    ("name", "Acme Acquisition"),
                    ("type", "Merger"),
                    ("status", "Open"),
                    ("value", "$10M"),
                ],
            ),
            Record::new("d2", [("name", "Globex")]),
        ]
    }

    #[test]
    fn cells_follow_declared_column_order() {
        let descriptor = EntityKind::Deal.descriptor();
        let records = deals();
        let all: Vec<Vec<&str>> = rows(&descriptor, &records).collect();
        assert_eq!(all[0], vec!["Acme Acquisition", "Merger", "Open", "$10M"]);
    }

    #[test]
    fn missing_fields_render_as_dash() {
        let descriptor = EntityKind::Deal.descriptor();
        let records = deals();
        let all: Vec<Vec<&str>> = rows(&descriptor, &records).collect();
        assert_eq!(all[1], vec!["Globex", "-", "-", "-"]);
    }

    #[test]
    fn row_iterator_restarts_from_the_top() {
        let descriptor = EntityKind::Deal.descriptor();
        let records = deals();
        let first: Vec<_> = rows(&descriptor, &records).collect();
        let second: Vec<_> = rows(&descriptor, &records).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn column_width_covers_header_and_cells() {
        let descriptor = EntityKind::Deal.descriptor();
        let records = deals();
        let widths = column_widths(&descriptor, &records);
        // "Acme Acquisition" is wider than the "Name" header.
        assert_eq!(usize::from(widths[0]), "Acme Acquisition".len());
        // "Status" header is wider than "Open".
        assert_eq!(usize::from(widths[2]), "Status".len());
    }
}
