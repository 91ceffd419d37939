//! Drawing the board, the status line and the overlay panels.

use std::io::{self, Write};

use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::{cursor, queue, terminal};
use greed_core::settings::key_name;
use greed_core::{Command, GameSession, KeyBindings, Settings};

/// Tiles at or above this value are drawn bold.
const BOLD_FROM: u8 = 6;

/// Draw the whole board and the status line beneath it.
pub fn draw_board<W: Write>(
    out: &mut W,
    session: &GameSession,
    settings: &Settings,
    show_hint: bool,
) -> io::Result<()> {
    queue!(out, terminal::Clear(terminal::ClearType::All))?;

    let hints = show_hint.then(|| session.hints());
    let (rows, _) = session.dimensions();
    let player = session.player();

    for (pos, val) in session.grid().cells() {
        if pos.col == 0 {
            queue!(out, cursor::MoveTo(0, pos.row as u16))?;
        }

        if pos == player {
            queue!(out, SetAttribute(Attribute::Bold))?;
            if !session.has_moved() {
                queue!(out, SetAttribute(Attribute::SlowBlink))?;
            }
            queue!(out, Print('@'), SetAttribute(Attribute::Reset))?;
            continue;
        }

        let Some(color) = settings.color_for(val) else {
            queue!(out, Print(' '))?;
            continue;
        };
        if val >= BOLD_FROM {
            queue!(out, SetAttribute(Attribute::Bold))?;
        }
        if hints.as_ref().is_some_and(|h| h.covers(pos)) {
            queue!(out, SetAttribute(Attribute::Reverse))?;
        }
        queue!(
            out,
            SetForegroundColor(Color::AnsiValue(color)),
            Print(char::from(b'0' + val)),
            ResetColor,
            SetAttribute(Attribute::Reset)
        )?;
    }

    queue!(
        out,
        cursor::MoveTo(0, rows as u16),
        terminal::Clear(terminal::ClearType::CurrentLine),
        Print(status_line(session, &settings.keys))
    )?;
    if session.bad_move() {
        queue!(
            out,
            SetAttribute(Attribute::Bold),
            Print("  **Bad Move**"),
            SetAttribute(Attribute::Reset)
        )?;
    }

    out.flush()
}

/// `Score: 12  0.69%  (p=hint, l=quit, ?=help, ==keybinds)`
pub fn status_line(session: &GameSession, keys: &KeyBindings) -> String {
    format!(
        "Score: {}  {:.2}%  ({}=hint, {}=quit, {}=help, {}=keybinds)",
        session.score(),
        session.percent_cleared(),
        key_name(keys.hint),
        key_name(keys.quit),
        key_name(keys.help),
        key_name(keys.keybinds)
    )
}

/// Centered `GAME OVER` banner with the way out.
pub fn draw_game_over<W: Write>(
    out: &mut W,
    session: &GameSession,
    keys: &KeyBindings,
) -> io::Result<()> {
    let (rows, cols) = session.dimensions();
    let row = (rows / 2) as u16;
    let col = (cols / 2).saturating_sub(5) as u16;
    let prompt = format!(
        "{}=restart, any other key quits",
        key_name(keys.key_for(Command::Restart))
    );
    queue!(
        out,
        cursor::MoveTo(col, row),
        SetAttribute(Attribute::Bold),
        SetAttribute(Attribute::Reverse),
        Print(" GAME OVER "),
        SetAttribute(Attribute::Reset),
        cursor::MoveTo((cols / 2).saturating_sub(prompt.len() / 2) as u16, row + 1),
        Print(prompt)
    )?;
    out.flush()
}

/// Lines of the help panel.
pub fn help_lines(keys: &KeyBindings) -> Vec<String> {
    let moves: Vec<String> = keys.directions.iter().map(|&k| key_name(k)).collect();
    vec![
        "GREED - HOW TO PLAY".to_string(),
        String::new(),
        format!("Move using: {}", moves.join("/")),
        format!("Show hint: {}", key_name(keys.hint)),
        format!("Quit game: {}", key_name(keys.quit)),
        format!("Open keybinds: {}", key_name(keys.keybinds)),
        format!("Restart: {}   Resize: {}", key_name(keys.restart), key_name(keys.resize)),
        "Your goal is to clear as many tiles as possible.".to_string(),
        "Step on a number to move exactly that many tiles".to_string(),
        "in one direction. Tiles are removed as you go.".to_string(),
        "Press any key to return.".to_string(),
    ]
}

/// Keybind capture panel: one row per binding, filled in as keys arrive.
pub fn keybind_lines(captured: &[u32], done: bool) -> Vec<String> {
    let mut lines = vec!["SET KEYBINDS".to_string(), String::new()];
    for (i, label) in KeyBindings::labels().iter().enumerate() {
        let key = captured.get(i).map(|&k| key_name(k)).unwrap_or_default();
        lines.push(format!("{:<14}{}", format!("{}:", label), key));
    }
    lines.push(String::new());
    lines.push(if done {
        "Press any key to return.".to_string()
    } else {
        "Esc cancels.".to_string()
    });
    lines
}

/// Boxed panel centered over the board. The first line is drawn bold.
pub fn draw_panel<W: Write>(
    out: &mut W,
    board: (usize, usize),
    lines: &[String],
) -> io::Result<()> {
    let inner = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) + 2;
    let width = inner + 2;
    let height = lines.len() + 2;
    let top = (board.0.saturating_sub(height) / 2) as u16;
    let left = (board.1.saturating_sub(width) / 2) as u16;

    let border = "─".repeat(inner);
    queue!(out, cursor::MoveTo(left, top), Print(format!("┌{}┐", border)))?;
    for (i, line) in lines.iter().enumerate() {
        queue!(out, cursor::MoveTo(left, top + 1 + i as u16), Print("│ "))?;
        if i == 0 {
            queue!(out, SetAttribute(Attribute::Bold))?;
        }
        queue!(
            out,
            Print(format!("{:<w$}", line, w = inner - 2)),
            SetAttribute(Attribute::Reset),
            Print(" │")
        )?;
    }
    queue!(
        out,
        cursor::MoveTo(left, top + height as u16 - 1),
        Print(format!("└{}┘", border))
    )?;
    out.flush()
}
