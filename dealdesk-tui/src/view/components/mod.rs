//! Reusable view components.

pub mod modal;
pub mod pagination;
pub mod statusbar;
pub mod table;
pub mod tabs;
