//! Key binding definitions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A key binding that maps one or more key combinations to a described action.
#[derive(Debug, Clone)]
pub struct Binding {
    /// The set of key combinations that trigger this binding.
    pub keys: Vec<KeyCombination>,
    /// Short label for the keys as shown in hints, e.g. `"SPACE"`.
    pub help_key: String,
    /// A human-readable description of the action.
    pub description: String,
}

/// A single key press with the modifiers that must be held.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombination {
    /// The base key code.
    pub code: KeyCode,
    /// Modifier keys that must be held alongside the base key.
    pub modifiers: KeyModifiers,
}

impl Binding {
    /// Create a binding for several key combinations.
    pub fn new(
        keys: Vec<KeyCombination>,
        help_key: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            keys,
            help_key: help_key.into(),
            description: description.into(),
        }
    }

    /// Whether `event` matches any of this binding's key combinations.
    ///
    /// Extra modifiers on the event are tolerated, so a terminal that reports
    /// SHIFT alongside an uppercase letter still matches.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.keys
            .iter()
            .any(|k| k.code == event.code && event.modifiers.contains(k.modifiers))
    }
}

impl KeyCombination {
    /// A key with no required modifiers.
    pub fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }

    /// A key that requires Ctrl.
    pub fn ctrl(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::CONTROL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_any_listed_key() {
        let up = Binding::new(
            vec![KeyCombination::new(KeyCode::Up), KeyCombination::new(KeyCode::Char('k'))],
            "↑/k",
            "move up",
        );
        assert!(up.matches(&KeyEvent::new(KeyCode::Char('k'), KeyModifiers::NONE)));
        assert!(up.matches(&KeyEvent::new(KeyCode::Up, KeyModifiers::NONE)));
        assert!(!up.matches(&KeyEvent::new(KeyCode::Down, KeyModifiers::NONE)));
    }

    #[test]
    fn ctrl_binding_requires_ctrl() {
        let quit = Binding::new(vec![KeyCombination::ctrl(KeyCode::Char('c'))], "ctrl+c", "quit");
        assert!(quit.matches(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!quit.matches(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE)));
    }
}
