//! Raw-mode terminal ownership.
//!
//! [`Terminal::begin`] switches to the alternate screen in raw mode; the
//! previous state is restored by [`Terminal::end`] or, failing that, on drop.

use std::io::{self, Stdout, Write};

use crossterm::event::{self, Event};
use crossterm::{cursor, execute, queue, style, terminal};

use crate::input;

pub struct Terminal {
    out: Stdout,
    active: bool,
}

impl Terminal {
    pub fn begin() -> io::Result<Self> {
        let mut out = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap,
            terminal::Clear(terminal::ClearType::All)
        )?;
        Ok(Terminal { out, active: true })
    }

    pub fn end(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        queue!(
            self.out,
            style::ResetColor,
            style::SetAttribute(style::Attribute::Reset),
            cursor::Show,
            terminal::EnableLineWrap,
            terminal::LeaveAlternateScreen
        )?;
        self.out.flush()?;
        terminal::disable_raw_mode()
    }

    /// `(cols, rows)` of the terminal window.
    pub fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    pub fn out(&mut self) -> &mut Stdout {
        &mut self.out
    }

    /// Block until a key with a code is pressed.
    pub fn read_key(&mut self) -> io::Result<u32> {
        loop {
            if let Event::Key(key) = event::read()? {
                if let Some(code) = input::key_code(&key) {
                    return Ok(code);
                }
            }
        }
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = self.end();
    }
}
