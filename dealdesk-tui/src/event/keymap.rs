//! Key bindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// One bound key combination.
#[derive(Debug, Clone)]
pub struct KeyBinding {
    pub modifiers: KeyModifiers,
    pub code: KeyCode,
}

impl KeyBinding {
    pub const fn new(modifiers: KeyModifiers, code: KeyCode) -> Self {
        Self { modifiers, code }
    }

    pub const fn key(code: KeyCode) -> Self {
        Self::new(KeyModifiers::NONE, code)
    }

    pub const fn ctrl(code: KeyCode) -> Self {
        Self::new(KeyModifiers::CONTROL, code)
    }

    /// Whether a key event matches this binding.
    pub fn matches(&self, key: &KeyEvent) -> bool {
        key.modifiers == self.modifiers && key.code == self.code
    }
}

/// Default key bindings.
pub struct DefaultKeymap;

impl DefaultKeymap {
    // Global
    pub const QUIT: KeyBinding = KeyBinding::key(KeyCode::Char('q'));
    pub const FORCE_QUIT: KeyBinding = KeyBinding::ctrl(KeyCode::Char('c'));
    pub const REFRESH: KeyBinding = KeyBinding::key(KeyCode::Char('r'));

    // Tabs (BackTab arrives with an implicit Shift and is matched by code)
    pub const NEXT_TAB: KeyBinding = KeyBinding::key(KeyCode::Tab);

    // Table navigation
    pub const NAV_UP: KeyBinding = KeyBinding::key(KeyCode::Up);
    pub const NAV_DOWN: KeyBinding = KeyBinding::key(KeyCode::Down);
    pub const NAV_FIRST: KeyBinding = KeyBinding::key(KeyCode::Home);
    pub const NAV_LAST: KeyBinding = KeyBinding::key(KeyCode::End);
    pub const PAGE_NEXT: KeyBinding = KeyBinding::key(KeyCode::Right);
    pub const PAGE_PREV: KeyBinding = KeyBinding::key(KeyCode::Left);

    // Actions
    pub const ACTION_NEW: KeyBinding = KeyBinding::key(KeyCode::Char('n'));
    pub const ACTION_EDIT: KeyBinding = KeyBinding::key(KeyCode::Enter);
    pub const ACTION_DELETE: KeyBinding = KeyBinding::key(KeyCode::Char('d'));
    pub const ACTION_SEARCH: KeyBinding = KeyBinding::key(KeyCode::Char('/'));
    pub const ACTION_CLEAR_SEARCH: KeyBinding = KeyBinding::key(KeyCode::Esc);
    pub const ACTION_UPLOAD: KeyBinding = KeyBinding::key(KeyCode::Char('u'));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_key_matches_without_modifiers() {
        let event = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert!(DefaultKeymap::QUIT.matches(&event));
        assert!(!DefaultKeymap::FORCE_QUIT.matches(&event));
    }

    #[test]
    fn ctrl_c_requires_the_modifier() {
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(DefaultKeymap::FORCE_QUIT.matches(&event));
    }
}
