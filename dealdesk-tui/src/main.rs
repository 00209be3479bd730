//! Dealdesk TUI
//!
//! Elm-style architecture:
//! - **Model**: application state (`model/`)
//! - **Message**: user intents (`message/`)
//! - **Update**: state transitions (`update/`)
//! - **View**: rendering (`view/`)
//! - **Event**: input translation (`event/`)
//! - **Backend**: async bridge to `dealdesk-core` (`backend/`)

mod app;
mod backend;
mod config;
mod event;
mod message;
mod model;
mod update;
mod util;
mod view;

use anyhow::Result;

use util::{init_terminal, restore_terminal};

fn main() -> Result<()> {
    let config = config::load();

    let mut terminal = init_terminal()?;
    let mut app = model::App::new(&config)?;

    let result = app::run(&mut terminal, &mut app);

    // Restore the terminal whether the loop succeeded or not.
    restore_terminal(&mut terminal)?;
    result
}
