//! Event layer: translates keyboard input into messages.

mod handler;
mod keymap;

pub use handler::{handle_event, poll_event};
