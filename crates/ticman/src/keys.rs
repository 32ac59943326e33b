use crossterm::event::KeyCode;
use ticman_widgets::key::{Binding, KeyCombination};

/// The installer's key bindings.
#[derive(Debug, Clone)]
pub struct KeyMap {
    pub quit: Binding,
    pub toggle_log: Binding,
    pub up: Binding,
    pub down: Binding,
    pub confirm: Binding,
    pub back: Binding,
    pub page_up: Binding,
    pub page_down: Binding,
    pub top: Binding,
    pub bottom: Binding,
}

fn keys(codes: &[KeyCode]) -> Vec<KeyCombination> {
    codes.iter().copied().map(KeyCombination::new).collect()
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            quit: Binding::new(
                vec![
                    KeyCombination::new(KeyCode::Char('q')),
                    KeyCombination::ctrl(KeyCode::Char('c')),
                ],
                "q",
                "quit",
            ),
            toggle_log: Binding::new(
                keys(&[KeyCode::Tab, KeyCode::Char(' ')]),
                "SPACE",
                "toggle Logs",
            ),
            up: Binding::new(keys(&[KeyCode::Up, KeyCode::Char('k')]), "↑/k", "up"),
            down: Binding::new(keys(&[KeyCode::Down, KeyCode::Char('j')]), "↓/j", "down"),
            confirm: Binding::new(keys(&[KeyCode::Enter]), "Enter", "select"),
            back: Binding::new(keys(&[KeyCode::Char('b'), KeyCode::Esc]), "B", "return to Menu"),
            page_up: Binding::new(keys(&[KeyCode::PageUp]), "PgUp", "scroll up"),
            page_down: Binding::new(keys(&[KeyCode::PageDown]), "PgDn", "scroll down"),
            top: Binding::new(keys(&[KeyCode::Home]), "Home", "top of log"),
            bottom: Binding::new(keys(&[KeyCode::End]), "End", "end of log"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};

    #[test]
    fn ctrl_c_quits_but_plain_c_does_not() {
        let map = KeyMap::default();
        assert!(map.quit.matches(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!map.quit.matches(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert!(map.quit.matches(&KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)));
    }

    #[test]
    fn space_and_tab_toggle_the_log() {
        let map = KeyMap::default();
        assert!(map.toggle_log.matches(&KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE)));
        assert!(map.toggle_log.matches(&KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE)));
    }
}
