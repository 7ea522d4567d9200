//! Key and mouse handling.
//!
//! Maps raw terminal events to session commands. Which keys mean what depends
//! on the session state, so the mapping takes it as an argument.

use crate::core::session::{Command, SessionState};
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

/// Result of interpreting a single key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Forward to the session.
    Command(Command),
    /// Leave the program.
    Quit,
    /// Key has no meaning right now.
    Ignore,
}

pub fn map_key(key: KeyEvent, state: SessionState) -> InputAction {
    // Some terminals report releases too; only presses count
    if key.kind == KeyEventKind::Release {
        return InputAction::Ignore;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return InputAction::Quit;
    }

    let command = match state {
        SessionState::Menu => match key.code {
            KeyCode::Char(' ') | KeyCode::Enter => Command::Start,
            KeyCode::Char('h') | KeyCode::Char('H') => Command::ToggleHardMode,
            KeyCode::Char('n') | KeyCode::Char('N') => Command::ToggleNightMode,
            KeyCode::Char('s') | KeyCode::Char('S') => Command::ToggleSound,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return InputAction::Quit,
            _ => return InputAction::Ignore,
        },
        SessionState::Playing => match key.code {
            KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter | KeyCode::Char('w') => {
                Command::Jump
            }
            KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Esc => Command::PauseToggle,
            _ => return InputAction::Ignore,
        },
        SessionState::Paused => match key.code {
            KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Esc | KeyCode::Enter => {
                Command::PauseToggle
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => return InputAction::Quit,
            _ => return InputAction::Ignore,
        },
        SessionState::GameOver => match key.code {
            KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter => Command::Retry,
            KeyCode::Char('m') | KeyCode::Char('M') | KeyCode::Esc => Command::ToMenu,
            KeyCode::Char('q') | KeyCode::Char('Q') => return InputAction::Quit,
            _ => return InputAction::Ignore,
        },
    };

    InputAction::Command(command)
}

/// A left click does whatever the state's main button does: flap while
/// playing, start from the menu, retry after a crash, resume when paused.
pub fn map_mouse(mouse: MouseEvent, state: SessionState) -> InputAction {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return InputAction::Ignore;
    }

    let command = match state {
        SessionState::Menu => Command::Start,
        SessionState::Playing => Command::Jump,
        SessionState::Paused => Command::PauseToggle,
        SessionState::GameOver => Command::Retry,
    };
    InputAction::Command(command)
}
