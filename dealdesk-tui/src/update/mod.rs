//! Update layer: the only place that mutates the model.

mod content;
mod line;
mod modal;

use dealdesk_api::EntityKind;

use crate::message::AppMessage;
use crate::model::App;

/// Apply one message to the model.
pub fn update(app: &mut App, msg: AppMessage) {
    match msg {
        AppMessage::Quit => {
            app.should_quit = true;
        }
        AppMessage::NextTab => {
            app.current = (app.current + 1) % EntityKind::ALL.len();
            app.clear_status();
            app.refresh_current();
        }
        AppMessage::PrevTab => {
            let count = EntityKind::ALL.len();
            app.current = (app.current + count - 1) % count;
            app.clear_status();
            app.refresh_current();
        }
        AppMessage::Refresh => {
            // Manual refresh bypasses the cache by invalidating first.
            let kind = app.current_kind();
            let cache = app.backend.workspace().cache();
            app.backend.block_on(cache.invalidate_resource(kind));
            app.refresh_current();
        }
        AppMessage::Content(msg) => content::update(app, &msg),
        AppMessage::Modal(msg) => modal::update(app, &msg),
        AppMessage::Line(msg) => line::update(app, &msg),
        AppMessage::Noop => {}
    }
}
