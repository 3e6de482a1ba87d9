//! Key mapping from terminal events to game actions.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to game actions.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    match key.code {
        KeyCode::Char(c @ '0'..='9') => Some(GameAction::Digit(c as u8 - b'0')),
        KeyCode::Backspace | KeyCode::Delete => Some(GameAction::Backspace),
        KeyCode::Enter | KeyCode::Char(' ') => Some(GameAction::Submit),
        KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::F(5) => Some(GameAction::Restart),
        KeyCode::Esc | KeyCode::Tab => Some(GameAction::ReturnToAssessment),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
