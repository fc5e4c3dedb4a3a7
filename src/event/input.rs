//! Input events, decoupled from crossterm.
//!
//! Crossterm events convert through [`InputEvent::from_crossterm`]; the rest
//! of the crate never matches on crossterm types.

use std::ops::BitOr;

use crossterm::event as ct;

// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Tab,
    BackTab,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
}

// ---------------------------------------------------------------------------
// Modifiers
// ---------------------------------------------------------------------------

/// Modifier key bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers(pub u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const SHIFT: Modifiers = Modifiers(1);
    pub const CTRL: Modifiers = Modifiers(2);
    pub const ALT: Modifiers = Modifiers(4);

    pub fn contains(self, other: Modifiers) -> bool {
        (self.0 & other.0) == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Modifiers {
    type Output = Modifiers;
    fn bitor(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 | rhs.0)
    }
}

impl From<ct::KeyModifiers> for Modifiers {
    fn from(m: ct::KeyModifiers) -> Self {
        let mut out = Modifiers::NONE;
        if m.contains(ct::KeyModifiers::SHIFT) {
            out = out | Modifiers::SHIFT;
        }
        if m.contains(ct::KeyModifiers::CONTROL) {
            out = out | Modifiers::CTRL;
        }
        if m.contains(ct::KeyModifiers::ALT) {
            out = out | Modifiers::ALT;
        }
        out
    }
}

// ---------------------------------------------------------------------------
// KeyEvent
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(code: Key, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }

    /// A key with no modifiers.
    pub fn plain(code: Key) -> Self {
        Self::new(code, Modifiers::NONE)
    }

    /// Convert a crossterm key press. Releases and keys with no
    /// counterpart yield `None`.
    pub fn from_crossterm(event: ct::KeyEvent) -> Option<Self> {
        if event.kind == ct::KeyEventKind::Release {
            return None;
        }
        let code = match event.code {
            ct::KeyCode::Char(c) => Key::Char(c),
            ct::KeyCode::Enter => Key::Enter,
            ct::KeyCode::Esc => Key::Escape,
            ct::KeyCode::Tab => Key::Tab,
            ct::KeyCode::BackTab => Key::BackTab,
            ct::KeyCode::Left => Key::Left,
            ct::KeyCode::Right => Key::Right,
            ct::KeyCode::Up => Key::Up,
            ct::KeyCode::Down => Key::Down,
            ct::KeyCode::Home => Key::Home,
            ct::KeyCode::End => Key::End,
            ct::KeyCode::PageUp => Key::PageUp,
            ct::KeyCode::PageDown => Key::PageDown,
            _ => return None,
        };
        let mut modifiers = Modifiers::from(event.modifiers);
        // Terminals report Shift+Tab as BackTab with SHIFT set.
        if code == Key::BackTab {
            modifiers = Modifiers(modifiers.0 & !Modifiers::SHIFT.0);
        }
        Some(Self::new(code, modifiers))
    }
}

// ---------------------------------------------------------------------------
// InputEvent
// ---------------------------------------------------------------------------

/// Terminal input the preview reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    /// Mouse wheel: negative scrolls up.
    Wheel(i32),
    Resize { width: u16, height: u16 },
}

impl InputEvent {
    /// Convert a crossterm event, dropping kinds the preview ignores.
    pub fn from_crossterm(event: ct::Event) -> Option<Self> {
        match event {
            ct::Event::Key(key) => KeyEvent::from_crossterm(key).map(InputEvent::Key),
            ct::Event::Mouse(mouse) => match mouse.kind {
                ct::MouseEventKind::ScrollUp => Some(InputEvent::Wheel(-1)),
                ct::MouseEventKind::ScrollDown => Some(InputEvent::Wheel(1)),
                _ => None,
            },
            ct::Event::Resize(width, height) => Some(InputEvent::Resize { width, height }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: ct::KeyCode, modifiers: ct::KeyModifiers) -> ct::KeyEvent {
        ct::KeyEvent::new(code, modifiers)
    }

    #[test]
    fn modifiers_combine() {
        let both = Modifiers::CTRL | Modifiers::SHIFT;
        assert!(both.contains(Modifiers::CTRL));
        assert!(!both.contains(Modifiers::ALT));
        assert!(Modifiers::NONE.is_empty());
    }

    #[test]
    fn converts_ctrl_char() {
        let event = KeyEvent::from_crossterm(press(ct::KeyCode::Char('c'), ct::KeyModifiers::CONTROL));
        assert_eq!(event, Some(KeyEvent::new(Key::Char('c'), Modifiers::CTRL)));
    }

    #[test]
    fn back_tab_drops_shift() {
        let event = KeyEvent::from_crossterm(press(ct::KeyCode::BackTab, ct::KeyModifiers::SHIFT));
        assert_eq!(event, Some(KeyEvent::plain(Key::BackTab)));
    }

    #[test]
    fn unsupported_keys_are_dropped() {
        assert_eq!(KeyEvent::from_crossterm(press(ct::KeyCode::F(5), ct::KeyModifiers::NONE)), None);
        let mut release = press(ct::KeyCode::Char('q'), ct::KeyModifiers::NONE);
        release.kind = ct::KeyEventKind::Release;
        assert_eq!(KeyEvent::from_crossterm(release), None);
    }

    #[test]
    fn resize_and_focus_events() {
        assert_eq!(
            InputEvent::from_crossterm(ct::Event::Resize(80, 24)),
            Some(InputEvent::Resize { width: 80, height: 24 })
        );
        assert_eq!(InputEvent::from_crossterm(ct::Event::FocusGained), None);
    }
}
