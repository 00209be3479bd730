//! View layer: renders the model, never mutates it.

mod components;
mod layout;
mod theme;

use ratatui::Frame;

use crate::model::App;

/// Render one frame.
pub fn render(app: &App, frame: &mut Frame) {
    layout::render(app, frame);
}
