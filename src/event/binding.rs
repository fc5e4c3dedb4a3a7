//! Key binding registry for the preview.
//!
//! [`KeyBindingRegistry`] maps key+modifier combinations to
//! [`BindingAction`]s. `with_defaults()` installs the standard keys.

use std::collections::HashMap;

use super::input::{Key, KeyEvent, Modifiers};

/// What a bound key does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingAction {
    Quit,
    /// Show the next window.
    NextWindow,
    PrevWindow,
    /// Scroll wired views in the shown window by lines.
    Scroll(i32),
    /// Scroll wired views by pages.
    Page(i32),
    /// Select the next notebook tab in the shown window.
    NextTab,
}

/// Registry of key bindings, mapping (Key, Modifiers) to a [`BindingAction`].
#[derive(Debug, Clone)]
pub struct KeyBindingRegistry {
    bindings: HashMap<(Key, Modifiers), BindingAction>,
}

impl KeyBindingRegistry {
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Defaults: `q`, `Esc` and `Ctrl+C` quit; `Tab`/`BackTab` cycle
    /// windows; arrows and page keys scroll; `Ctrl+T` cycles tabs.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.bind(Key::Char('q'), Modifiers::NONE, BindingAction::Quit);
        registry.bind(Key::Escape, Modifiers::NONE, BindingAction::Quit);
        registry.bind(Key::Char('c'), Modifiers::CTRL, BindingAction::Quit);
        registry.bind(Key::Tab, Modifiers::NONE, BindingAction::NextWindow);
        registry.bind(Key::BackTab, Modifiers::NONE, BindingAction::PrevWindow);
        registry.bind(Key::Up, Modifiers::NONE, BindingAction::Scroll(-1));
        registry.bind(Key::Down, Modifiers::NONE, BindingAction::Scroll(1));
        registry.bind(Key::PageUp, Modifiers::NONE, BindingAction::Page(-1));
        registry.bind(Key::PageDown, Modifiers::NONE, BindingAction::Page(1));
        registry.bind(Key::Char('t'), Modifiers::CTRL, BindingAction::NextTab);
        registry
    }

    /// Register a binding, replacing any existing one for the same keys.
    pub fn bind(&mut self, key: Key, modifiers: Modifiers, action: BindingAction) {
        self.bindings.insert((key, modifiers), action);
    }

    pub fn unbind(&mut self, key: Key, modifiers: Modifiers) -> Option<BindingAction> {
        self.bindings.remove(&(key, modifiers))
    }

    /// Exact key+modifier lookup.
    pub fn resolve(&self, event: &KeyEvent) -> Option<BindingAction> {
        self.bindings.get(&(event.code, event.modifiers)).copied()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Default for KeyBindingRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_resolve() {
        let reg = KeyBindingRegistry::with_defaults();
        let quit = KeyEvent::new(Key::Char('c'), Modifiers::CTRL);
        assert_eq!(reg.resolve(&quit), Some(BindingAction::Quit));
        assert_eq!(reg.resolve(&KeyEvent::plain(Key::Escape)), Some(BindingAction::Quit));
        assert_eq!(reg.resolve(&KeyEvent::plain(Key::Tab)), Some(BindingAction::NextWindow));
        assert_eq!(reg.resolve(&KeyEvent::plain(Key::PageDown)), Some(BindingAction::Page(1)));
    }

    #[test]
    fn modifiers_must_match_exactly() {
        let reg = KeyBindingRegistry::with_defaults();
        let shifted = KeyEvent::new(Key::Char('q'), Modifiers::SHIFT);
        assert_eq!(reg.resolve(&shifted), None);
    }

    #[test]
    fn bind_replaces_and_unbind_removes() {
        let mut reg = KeyBindingRegistry::new();
        assert!(reg.is_empty());
        reg.bind(Key::Char('x'), Modifiers::NONE, BindingAction::Quit);
        reg.bind(Key::Char('x'), Modifiers::NONE, BindingAction::NextTab);
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.resolve(&KeyEvent::plain(Key::Char('x'))), Some(BindingAction::NextTab));
        assert_eq!(reg.unbind(Key::Char('x'), Modifiers::NONE), Some(BindingAction::NextTab));
        assert!(reg.is_empty());
    }
}
