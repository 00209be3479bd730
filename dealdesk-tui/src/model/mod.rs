//! Application state.

use anyhow::Result;

use dealdesk_api::EntityKind;
use dealdesk_core::ListController;

use crate::backend::Backend;
use crate::config::Config;

/// Top-level application state.
///
/// One [`ListController`] per entity tab, in [`EntityKind::ALL`] order.
/// The controllers own all workflow state; the model adds only what is
/// purely presentational (tab selection, line editors, status message).
pub struct App {
    /// Whether the main loop should exit.
    pub should_quit: bool,

    /// Index of the active tab, into [`EntityKind::ALL`].
    pub current: usize,

    /// Per-entity list controllers, in tab order.
    pub controllers: Vec<ListController>,

    /// Async bridge to the core.
    pub backend: Backend,

    /// Search line editor; `Some` while the user is typing a search term.
    pub search_input: Option<String>,

    /// Upload path line editor; `Some` while the user is typing a path.
    pub upload_input: Option<String>,

    /// Status bar message.
    pub status_message: Option<String>,
}

impl App {
    /// Build the backend and one controller per entity, then load the
    /// first tab.
    pub fn new(config: &Config) -> Result<Self> {
        let backend = Backend::new(config)?;
        let mut controllers = Vec::with_capacity(EntityKind::ALL.len());
        for kind in EntityKind::ALL {
            controllers.push(backend.workspace().controller(kind, config.page_size)?);
        }

        let mut app = Self {
            should_quit: false,
            current: 0,
            controllers,
            backend,
            search_input: None,
            upload_input: None,
            status_message: None,
        };
        app.refresh_current();
        Ok(app)
    }

    /// Entity kind of the active tab.
    pub fn current_kind(&self) -> EntityKind {
        EntityKind::ALL[self.current.min(EntityKind::ALL.len() - 1)]
    }

    /// Controller of the active tab.
    pub fn controller(&self) -> &ListController {
        &self.controllers[self.current.min(self.controllers.len() - 1)]
    }

    /// Re-fetch the active tab through the cache.
    pub fn refresh_current(&mut self) {
        let idx = self.current.min(self.controllers.len() - 1);
        if let Some(ctrl) = self.controllers.get_mut(idx) {
            self.backend.block_on(ctrl.refresh());
        }
    }

    /// Whether a line editor (search or upload path) is active.
    pub fn is_line_editor_open(&self) -> bool {
        self.search_input.is_some() || self.upload_input.is_some()
    }

    /// Set the status bar message.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear the status bar message.
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}
