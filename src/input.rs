use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// Represents semantic game actions that can be triggered by input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    MoveLeft,
    MoveRight,
    Fire,
    Start,
    Stop,
    Quit,
}

/// Manages input polling and translates raw key events into game actions.
///
/// Every action is one-shot: one key press, one move or one shot, like a
/// tap on an on-screen button.
pub struct InputManager {
    actions: Vec<InputAction>,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            actions: Vec::new(),
        }
    }

    /// Polls for all pending events without blocking.
    /// Should be called once per frame before taking actions.
    pub fn poll_events(&mut self) -> color_eyre::Result<()> {
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key_event) = event::read()? {
                self.handle_key_event(key_event);
            }
        }
        Ok(())
    }

    /// Records the action for a key event, if any
    pub fn handle_key_event(&mut self, key_event: KeyEvent) {
        // Terminals without enhancement flags only report presses; repeats
        // count as presses so holding a key keeps moving
        if key_event.kind == KeyEventKind::Release {
            return;
        }
        if let Some(action) = map_key(key_event) {
            self.actions.push(action);
        }
    }

    /// Returns and clears the actions gathered since the last call
    pub fn take_actions(&mut self) -> Vec<InputAction> {
        std::mem::take(&mut self.actions)
    }
}

/// Key binding table
pub fn map_key(key_event: KeyEvent) -> Option<InputAction> {
    if key_event.code == KeyCode::Char('c') && key_event.modifiers.contains(KeyModifiers::CONTROL)
    {
        return Some(InputAction::Quit);
    }

    match key_event.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(InputAction::Quit),
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Some(InputAction::MoveLeft),
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => Some(InputAction::MoveRight),
        KeyCode::Char(' ') => Some(InputAction::Fire),
        KeyCode::Enter | KeyCode::Char('s') | KeyCode::Char('S') => Some(InputAction::Start),
        KeyCode::Char('x') | KeyCode::Char('X') => Some(InputAction::Stop),
        _ => None,
    }
}
