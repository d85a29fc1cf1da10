use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Direction;

/// A key event translated into a game intent.
///
/// Arrow keys and WASD are kept apart: solo play accepts both, while the
/// versus arena gives WASD to player 1 and the arrows to player 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Arrow-key steering intent
    ArrowSteer(Direction),
    /// WASD steering intent
    WasdSteer(Direction),
    Restart,
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Arrow keys
            KeyCode::Up => KeyAction::ArrowSteer(Direction::Up),
            KeyCode::Down => KeyAction::ArrowSteer(Direction::Down),
            KeyCode::Left => KeyAction::ArrowSteer(Direction::Left),
            KeyCode::Right => KeyAction::ArrowSteer(Direction::Right),

            // WASD
            KeyCode::Char('w') | KeyCode::Char('W') => KeyAction::WasdSteer(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => KeyAction::WasdSteer(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => KeyAction::WasdSteer(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => KeyAction::WasdSteer(Direction::Right),

            // Controls
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Char('x') | KeyCode::Char('X')
            | KeyCode::Esc => KeyAction::Quit,
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Restart,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
