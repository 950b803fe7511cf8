//! Translation of raw key events into the semantic actions screens act on.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    Confirm,
    Cancel,
    Up,
    Down,
    PrevPage,
    NextPage,
    Home,
    End,
}

/// Key binding table. Modifiers other than shift are not matched, so
/// `Ctrl+j` does not move the cursor.
#[derive(Debug, Clone)]
pub struct KeyMap {
    bindings: HashMap<KeyCode, KeyAction>,
}

impl Default for KeyMap {
    fn default() -> Self {
        let mut map = Self::empty();
        map.bind(KeyAction::Confirm, [KeyCode::Enter]);
        map.bind(KeyAction::Cancel, [KeyCode::Esc]);
        map.bind(KeyAction::Up, [KeyCode::Up, KeyCode::Char('k')]);
        map.bind(KeyAction::Down, [KeyCode::Down, KeyCode::Char('j')]);
        map.bind(
            KeyAction::PrevPage,
            [KeyCode::Left, KeyCode::Char('h'), KeyCode::PageUp],
        );
        map.bind(
            KeyAction::NextPage,
            [KeyCode::Right, KeyCode::Char('l'), KeyCode::PageDown],
        );
        map.bind(KeyAction::Home, [KeyCode::Home, KeyCode::Char('g')]);
        map.bind(KeyAction::End, [KeyCode::End, KeyCode::Char('G')]);
        map
    }
}

impl KeyMap {
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Replace every key bound to `action` with `keys`.
    pub fn bind(&mut self, action: KeyAction, keys: impl IntoIterator<Item = KeyCode>) -> &mut Self {
        self.bindings.retain(|_, bound| *bound != action);
        for key in keys {
            self.bindings.insert(key, action);
        }
        self
    }

    pub fn keys_for(&self, action: KeyAction) -> Vec<KeyCode> {
        self.bindings
            .iter()
            .filter(|(_, bound)| **bound == action)
            .map(|(key, _)| *key)
            .collect()
    }

    pub fn action(&self, key: &KeyEvent) -> Option<KeyAction> {
        if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
            return None;
        }
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER)
        {
            return None;
        }
        self.bindings.get(&key.code).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn default_bindings_cover_confirm_and_cancel() {
        let map = KeyMap::default();
        assert_eq!(map.action(&press(KeyCode::Enter)), Some(KeyAction::Confirm));
        assert_eq!(map.action(&press(KeyCode::Esc)), Some(KeyAction::Cancel));
        assert_eq!(map.action(&press(KeyCode::Char('j'))), Some(KeyAction::Down));
        assert_eq!(map.action(&press(KeyCode::Char('x'))), None);
    }

    #[test]
    fn release_and_control_chords_are_ignored() {
        let map = KeyMap::default();
        let release = KeyEvent {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(map.action(&release), None);
        let chord = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::CONTROL);
        assert_eq!(map.action(&chord), None);
        let shifted = KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT);
        assert_eq!(map.action(&shifted), Some(KeyAction::End));
    }

    #[test]
    fn rebinding_replaces_previous_keys() {
        let mut map = KeyMap::default();
        map.bind(KeyAction::Cancel, [KeyCode::Backspace, KeyCode::Char('q')]);
        assert_eq!(map.action(&press(KeyCode::Esc)), None);
        assert_eq!(map.action(&press(KeyCode::Char('q'))), Some(KeyAction::Cancel));
        let mut keys = map.keys_for(KeyAction::Cancel);
        keys.sort_by_key(|code| format!("{code:?}"));
        assert_eq!(keys, vec![KeyCode::Backspace, KeyCode::Char('q')]);
    }
}
