//! Translation from terminal key events to the engine's integer key codes.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use greed_core::settings::{KEY_DOWN, KEY_LEFT, KEY_RIGHT, KEY_UP};

/// Ctrl+C, always honoured as quit so a broken keymap cannot trap the player.
pub const INTERRUPT: u32 = 3;
pub const ENTER: u32 = '\n' as u32;
pub const ESCAPE: u32 = 27;
pub const BACKSPACE: u32 = 8;

/// Key code for a press, or `None` for releases and keys with no code.
pub fn key_code(event: &KeyEvent) -> Option<u32> {
    if event.kind == KeyEventKind::Release {
        return None;
    }
    let code = match event.code {
        KeyCode::Char('c') | KeyCode::Char('C') if event.modifiers.contains(KeyModifiers::CONTROL) => {
            INTERRUPT
        }
        KeyCode::Char(c) => c as u32,
        KeyCode::Up => KEY_UP,
        KeyCode::Down => KEY_DOWN,
        KeyCode::Left => KEY_LEFT,
        KeyCode::Right => KEY_RIGHT,
        KeyCode::Enter => ENTER,
        KeyCode::Esc => ESCAPE,
        KeyCode::Backspace => BACKSPACE,
        KeyCode::Tab => '\t' as u32,
        _ => return None,
    };
    Some(code)
}
