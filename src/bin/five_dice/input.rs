//! Keyboard bindings and the key-aware animation pacer.

use std::time::Duration;

use crossterm::event::{self, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use five_dice::{Category, Pacer};

/// Hold toggles for dice 0..=4, left to right.
pub const HOLD_KEYS: [char; 5] = ['a', 's', 'd', 'f', 'g'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Roll,
    Hold(usize),
    Score(Category),
    Restart,
    Quit,
}

pub fn command_for(key: KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
        KeyCode::Enter => Some(Command::Roll),
        KeyCode::Char(c) => {
            let c = c.to_ascii_lowercase();
            if c == 'n' {
                return Some(Command::Restart);
            }
            if let Some(index) = HOLD_KEYS.iter().position(|k| *k == c) {
                return Some(Command::Hold(index));
            }
            Category::from_hotkey(c).map(Command::Score)
        }
        _ => None,
    }
}

/// Waits out a frame delay unless a key arrives first.
///
/// The pending key is left in the queue for the main loop.
pub struct KeyPacer;

impl Pacer for KeyPacer {
    fn pause(&mut self, delay: Duration) -> bool {
        matches!(event::poll(delay), Ok(false))
    }
}
