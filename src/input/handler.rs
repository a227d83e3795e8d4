use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Direction, SpeedTier};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Steer(Direction),
    /// Start a new game, or acknowledge the game-over notice
    Start,
    ToggleWallMode,
    SetSpeed(SpeedTier),
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

        let Some(identifier) = key_identifier(key.code) else {
            return KeyAction::None;
        };

        if let Some(direction) = Direction::from_key(&identifier) {
            return KeyAction::Steer(direction);
        }

        match identifier.as_str() {
            "enter" | " " | "r" => KeyAction::Start,
            "m" => KeyAction::ToggleWallMode,
            "1" => KeyAction::SetSpeed(SpeedTier::Slow),
            "2" => KeyAction::SetSpeed(SpeedTier::Normal),
            "3" => KeyAction::SetSpeed(SpeedTier::Fast),
            "q" | "escape" => KeyAction::Quit,
            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Name a terminal key the way the direction table expects (`"arrowup"`, `"w"`, ...)
fn key_identifier(code: KeyCode) -> Option<String> {
    let name = match code {
        KeyCode::Up => "arrowup".to_string(),
        KeyCode::Down => "arrowdown".to_string(),
        KeyCode::Left => "arrowleft".to_string(),
        KeyCode::Right => "arrowright".to_string(),
        KeyCode::Enter => "enter".to_string(),
        KeyCode::Esc => "escape".to_string(),
        KeyCode::Char(c) => c.to_lowercase().collect(),
        _ => return None,
    };
    Some(name)
}
