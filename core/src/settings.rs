//! # Settings
//!
//! Board size, tile colors and key bindings. The engine only reads these:
//! dimensions feed board construction and bindings turn a key code into a
//! [`Direction`] or a [`Command`]. Loading and saving is the host's job; the
//! flat text form lives here so every host agrees on it.
//!
//! Key codes are plain integers: Unicode scalar values for character keys,
//! and the curses codes [`KEY_DOWN`], [`KEY_UP`], [`KEY_LEFT`] and
//! [`KEY_RIGHT`] for the arrow keys.

use crate::error::SettingsError;
use crate::Direction;

/// Smallest board a user may ask for.
pub const MIN_DIMENSION: usize = 10;
/// Largest board a user may ask for. Keeps screen coordinates inside `u16`.
pub const MAX_DIMENSION: usize = 1000;
pub const DEFAULT_ROWS: usize = 22;
pub const DEFAULT_COLS: usize = 79;

pub const KEY_DOWN: u32 = 258;
pub const KEY_UP: u32 = 259;
pub const KEY_LEFT: u32 = 260;
pub const KEY_RIGHT: u32 = 261;

/// ANSI color index per tile value `1..=9`.
pub type TileColors = [u8; 9];

/// White, yellow, magenta, yellow, green, red, green, red, cyan.
pub const DEFAULT_COLORS: TileColors = [7, 3, 5, 3, 2, 1, 2, 1, 6];

/// Number of integer tokens in the text form.
const TOKEN_COUNT: usize = 2 + 9 + KeyBindings::COUNT;

/// Host commands that are not moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Hint,
    Quit,
    Help,
    Keybinds,
    Restart,
    Resize,
}

impl Command {
    pub fn all() -> [Command; 6] {
        [
            Command::Hint,
            Command::Quit,
            Command::Help,
            Command::Keybinds,
            Command::Restart,
            Command::Resize,
        ]
    }

    pub fn label(self) -> &'static str {
        match self {
            Command::Hint => "Hint",
            Command::Quit => "Quit",
            Command::Help => "Help",
            Command::Keybinds => "Keybinds",
            Command::Restart => "Restart",
            Command::Resize => "Resize",
        }
    }
}

/// What a key press means to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Move(Direction),
    Command(Command),
}

/// Key code for every direction and command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBindings {
    /// Indexed like [`Direction::all`].
    pub directions: [u32; 8],
    pub hint: u32,
    pub quit: u32,
    pub help: u32,
    pub keybinds: u32,
    pub restart: u32,
    pub resize: u32,
}

impl Default for KeyBindings {
    fn default() -> Self {
        KeyBindings {
            directions: ['w', 's', 'a', 'd', 'q', 'e', 'z', 'c'].map(u32::from),
            hint: 'p' as u32,
            quit: 'l' as u32,
            help: '?' as u32,
            keybinds: '=' as u32,
            restart: 'r' as u32,
            resize: 't' as u32,
        }
    }
}

impl KeyBindings {
    /// Number of bindings: eight directions and six commands.
    pub const COUNT: usize = 14;

    /// Interpret a key code. Directions win over commands when a key is bound
    /// twice.
    pub fn lookup(&self, key: u32) -> Option<Input> {
        if let Some(i) = self.directions.iter().position(|&k| k == key) {
            return Some(Input::Move(Direction::all()[i]));
        }
        Command::all()
            .into_iter()
            .find(|&c| self.key_for(c) == key)
            .map(Input::Command)
    }

    pub fn key_for(&self, command: Command) -> u32 {
        match command {
            Command::Hint => self.hint,
            Command::Quit => self.quit,
            Command::Help => self.help,
            Command::Keybinds => self.keybinds,
            Command::Restart => self.restart,
            Command::Resize => self.resize,
        }
    }

    /// All codes in prompt order: directions, then commands.
    pub fn to_codes(&self) -> [u32; Self::COUNT] {
        let mut codes = [0; Self::COUNT];
        codes[..8].copy_from_slice(&self.directions);
        for (slot, command) in codes[8..].iter_mut().zip(Command::all()) {
            *slot = self.key_for(command);
        }
        codes
    }

    /// Inverse of [`KeyBindings::to_codes`].
    pub fn from_codes(codes: [u32; Self::COUNT]) -> Self {
        let mut directions = [0; 8];
        directions.copy_from_slice(&codes[..8]);
        KeyBindings {
            directions,
            hint: codes[8],
            quit: codes[9],
            help: codes[10],
            keybinds: codes[11],
            restart: codes[12],
            resize: codes[13],
        }
    }

    /// Prompt labels matching [`KeyBindings::to_codes`].
    pub fn labels() -> [&'static str; Self::COUNT] {
        let mut labels = [""; Self::COUNT];
        for (slot, direction) in labels.iter_mut().zip(Direction::all()) {
            *slot = direction.label();
        }
        for (slot, command) in labels[8..].iter_mut().zip(Command::all()) {
            *slot = command.label();
        }
        labels
    }
}

/// Human-readable name of a key code.
pub fn key_name(code: u32) -> String {
    match code {
        KEY_UP => "Up".to_string(),
        KEY_DOWN => "Down".to_string(),
        KEY_LEFT => "Left".to_string(),
        KEY_RIGHT => "Right".to_string(),
        _ => match char::from_u32(code) {
            Some(' ') => "Space".to_string(),
            Some(c) if !c.is_control() => c.to_string(),
            _ => format!("#{}", code),
        },
    }
}

/// Everything the player can customise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    rows: usize,
    cols: usize,
    pub colors: TileColors,
    pub keys: KeyBindings,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            colors: DEFAULT_COLORS,
            keys: KeyBindings::default(),
        }
    }
}

impl Settings {
    /// `(rows, cols)` for new boards.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Change the board size, refusing anything outside
    /// [`MIN_DIMENSION`]`..=`[`MAX_DIMENSION`].
    pub fn set_dimensions(&mut self, rows: usize, cols: usize) -> Result<(), SettingsError> {
        validate_dimensions(rows, cols)?;
        self.rows = rows;
        self.cols = cols;
        Ok(())
    }

    /// Whether the board size is the stock one.
    pub fn is_default_size(&self) -> bool {
        (self.rows, self.cols) == (DEFAULT_ROWS, DEFAULT_COLS)
    }

    /// ANSI color index for a tile value `1..=9`.
    pub fn color_for(&self, value: u8) -> Option<u8> {
        let idx = usize::from(value).checked_sub(1)?;
        self.colors.get(idx).copied()
    }

    /// Decode the flat text form: rows, cols, nine colors and the fourteen
    /// key codes, whitespace separated.
    pub fn parse(text: &str) -> Result<Self, SettingsError> {
        let tokens = text
            .split_whitespace()
            .map(|t| {
                t.parse::<u32>()
                    .map_err(|_| SettingsError::Malformed(format!("not an integer: {:?}", t)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        if tokens.len() != TOKEN_COUNT {
            return Err(SettingsError::Malformed(format!(
                "expected {} values, found {}",
                TOKEN_COUNT,
                tokens.len()
            )));
        }

        let (rows, cols) = (tokens[0] as usize, tokens[1] as usize);
        validate_dimensions(rows, cols)?;

        let mut colors = [0u8; 9];
        for (slot, &value) in colors.iter_mut().zip(&tokens[2..11]) {
            *slot = u8::try_from(value)
                .ok()
                .filter(|&c| c < 8)
                .ok_or_else(|| SettingsError::Malformed(format!("bad color index {}", value)))?;
        }

        let mut codes = [0u32; KeyBindings::COUNT];
        codes.copy_from_slice(&tokens[11..]);

        Ok(Settings {
            rows,
            cols,
            colors,
            keys: KeyBindings::from_codes(codes),
        })
    }

    /// Encode to the flat text form, one line.
    pub fn to_text(&self) -> String {
        let mut tokens = vec![self.rows.to_string(), self.cols.to_string()];
        tokens.extend(self.colors.iter().map(u8::to_string));
        tokens.extend(self.keys.to_codes().iter().map(u32::to_string));
        format!("{}\n", tokens.join(" "))
    }
}

fn validate_dimensions(rows: usize, cols: usize) -> Result<(), SettingsError> {
    if rows < MIN_DIMENSION || cols < MIN_DIMENSION {
        return Err(SettingsError::TooSmall {
            rows,
            cols,
            min: MIN_DIMENSION,
        });
    }
    if rows > MAX_DIMENSION || cols > MAX_DIMENSION {
        return Err(SettingsError::TooLarge {
            rows,
            cols,
            max: MAX_DIMENSION,
        });
    }
    Ok(())
}
