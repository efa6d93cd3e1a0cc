use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Key binding configuration
#[derive(Debug, Clone)]
pub struct KeyBinding {
    pub key: KeyCode,
    pub modifiers: KeyModifiers,
    pub description: String,
}

impl KeyBinding {
    pub fn new(key: KeyCode, modifiers: KeyModifiers, description: &str) -> Self {
        Self {
            key,
            modifiers,
            description: description.to_string(),
        }
    }

    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.key == event.code && self.modifiers == event.modifiers
    }
}

/// Application key mappings
#[derive(Debug, Clone)]
pub struct KeyMap {
    /// Quit application
    pub quit: KeyBinding,

    /// Open the editor dialog
    pub open_editor: KeyBinding,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            quit: KeyBinding::new(KeyCode::Char('c'), KeyModifiers::CONTROL, "Quit application"),
            open_editor: KeyBinding::new(KeyCode::Char('n'), KeyModifiers::NONE, "Open editor"),
        }
    }
}

impl KeyMap {
    /// Check if the event should quit the application
    pub fn should_quit(&self, event: &KeyEvent) -> bool {
        self.quit.matches(event)
    }

    pub fn should_open_editor(&self, event: &KeyEvent) -> bool {
        self.open_editor.matches(event)
    }

    /// Get help text for all key bindings
    pub fn help_text(&self) -> String {
        format!("{} · {}", self.quit.description, self.open_editor.description)
    }
}

/// Shortcuts an open dialog reacts to before anything else sees the key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalShortcut {
    /// Escape
    Close,
    /// Ctrl+R
    Refresh,
    /// Alt+1 through Alt+9, zero-based
    Tab(usize),
    /// Ctrl+U
    ClearSearch,
    /// Anything else
    Other,
}

impl ModalShortcut {
    pub fn classify(event: &KeyEvent) -> Self {
        let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
        let alt = event.modifiers.contains(KeyModifiers::ALT);

        match event.code {
            KeyCode::Esc if event.modifiers.is_empty() => Self::Close,
            KeyCode::Char('r') | KeyCode::Char('R') if ctrl && !alt => Self::Refresh,
            KeyCode::Char('u') | KeyCode::Char('U') if ctrl && !alt => Self::ClearSearch,
            KeyCode::Char(ch @ '1'..='9') if alt && !ctrl => {
                Self::Tab(ch as usize - '1' as usize)
            }
            _ => Self::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_modal_shortcuts() {
        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        let refresh = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL);
        let tab3 = KeyEvent::new(KeyCode::Char('3'), KeyModifiers::ALT);
        let clear = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL);

        assert_eq!(ModalShortcut::classify(&esc), ModalShortcut::Close);
        assert_eq!(ModalShortcut::classify(&refresh), ModalShortcut::Refresh);
        assert_eq!(ModalShortcut::classify(&tab3), ModalShortcut::Tab(2));
        assert_eq!(ModalShortcut::classify(&clear), ModalShortcut::ClearSearch);
    }

    #[test]
    fn test_plain_keys_are_not_shortcuts() {
        for event in [
            KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE),
            KeyEvent::new(KeyCode::Char('1'), KeyModifiers::NONE),
            KeyEvent::new(KeyCode::Char('0'), KeyModifiers::ALT),
            KeyEvent::new(KeyCode::Esc, KeyModifiers::SHIFT),
        ] {
            assert_eq!(ModalShortcut::classify(&event), ModalShortcut::Other);
        }
    }

    #[test]
    fn test_keymap_matches() {
        let keymap = KeyMap::default();
        assert!(keymap.should_quit(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!keymap.should_quit(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert!(keymap.should_open_editor(&KeyEvent::new(KeyCode::Char('n'), KeyModifiers::NONE)));
    }
}
