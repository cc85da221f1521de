//! Key mapping from terminal events to pair actions.
//!
//! Arrow keys always work; letters cover vim (`hjkl`) and WASD layouts and
//! are matched case-insensitively so caps lock does not break play.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Letter bindings, lower case.
pub const LETTER_BINDINGS: [(char, GameAction); 12] = [
    ('h', GameAction::MoveLeft),
    ('a', GameAction::MoveLeft),
    ('l', GameAction::MoveRight),
    ('d', GameAction::MoveRight),
    ('j', GameAction::SoftDrop),
    ('s', GameAction::SoftDrop),
    ('k', GameAction::RotateCw),
    ('w', GameAction::RotateCw),
    ('x', GameAction::RotateCw),
    ('z', GameAction::RotateCcw),
    ('y', GameAction::RotateCcw),
    ('r', GameAction::Restart),
];

/// Map a key event to the action it triggers on the gem pair.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    match key.code {
        KeyCode::Left => Some(GameAction::MoveLeft),
        KeyCode::Right => Some(GameAction::MoveRight),
        KeyCode::Down => Some(GameAction::SoftDrop),
        KeyCode::Up => Some(GameAction::RotateCw),
        KeyCode::Char(_) if key.modifiers.contains(KeyModifiers::CONTROL) => None,
        KeyCode::Char(c) => {
            let c = c.to_ascii_lowercase();
            LETTER_BINDINGS
                .iter()
                .find(|(letter, _)| *letter == c)
                .map(|(_, action)| *action)
        }
        _ => None,
    }
}

/// `q` or Ctrl-C.
pub fn should_quit(key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Char(c) => c.eq_ignore_ascii_case(&'q'),
        _ => false,
    }
}
