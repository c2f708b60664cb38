//! Keyboard intents understood by the client picker.

use crate::directory::CompanyNode;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Keys the picker reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    /// `/`: jump to the search field
    Slash,
    Down,
    Up,
    Enter,
    Other,
}

impl From<KeyEvent> for NavKey {
    fn from(event: KeyEvent) -> Self {
        if event.kind != KeyEventKind::Press {
            return NavKey::Other;
        }
        match (event.code, event.modifiers) {
            (KeyCode::Char('/'), modifiers)
                if !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                NavKey::Slash
            }
            (KeyCode::Down, _) => NavKey::Down,
            (KeyCode::Up, _) => NavKey::Up,
            (KeyCode::Enter, _) => NavKey::Enter,
            _ => NavKey::Other,
        }
    }
}

/// Where keyboard focus currently is in the consuming view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// A text input has focus; `/` is ordinary text there.
    TextInput,
    #[default]
    List,
}

/// What a key press did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavOutcome {
    /// The view should move focus to its search field.
    FocusSearch,
    /// Highlight after an arrow key (may be unchanged at the edges).
    Highlighted(Option<usize>),
    Selected(CompanyNode),
    Ignored,
}
