//! The interactive host loop.

use std::path::PathBuf;

use anyhow::{Context, Result};
use greed_core::{Command, GameSession, HighScoreLedger, Input, KeyBindings, Settings};
use log::{debug, info, warn};

use crate::input::{BACKSPACE, ENTER, ESCAPE, INTERRUPT};
use crate::render;
use crate::store::{ConfigFile, ScoreFile};
use crate::terminal::Terminal;

pub struct App {
    session: GameSession,
    settings: Settings,
    config: ConfigFile,
    scores_override: Option<PathBuf>,
    show_hint: bool,
    /// The current run has already been written to the high-score table.
    recorded: bool,
    report: Option<String>,
    new_best: bool,
    warnings: Vec<String>,
}

/// What the player asked for once the run ended.
enum AfterRun {
    Restart,
    Quit,
}

impl App {
    pub fn new(
        session: GameSession,
        settings: Settings,
        config: ConfigFile,
        scores_override: Option<PathBuf>,
        show_hint: bool,
    ) -> Self {
        App {
            session,
            settings,
            config,
            scores_override,
            show_hint,
            recorded: false,
            report: None,
            new_best: false,
            warnings: Vec::new(),
        }
    }

    /// Ranked table from the last recorded run.
    pub fn report(&self) -> Option<&str> {
        self.report.as_deref()
    }

    /// The last recorded run took first place.
    pub fn new_best(&self) -> bool {
        self.new_best
    }

    /// Problems to show once the terminal is back to normal.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn run(&mut self, term: &mut Terminal) -> Result<()> {
        self.check_fit(term);
        loop {
            render::draw_board(term.out(), &self.session, &self.settings, self.show_hint)
                .context("failed to draw board")?;
            self.session.tick();

            if self.session.is_over() {
                match self.game_over(term)? {
                    AfterRun::Restart => continue,
                    AfterRun::Quit => return Ok(()),
                }
            }

            let key = term.read_key()?;
            if key == INTERRUPT {
                self.finish_run();
                return Ok(());
            }
            match self.settings.keys.lookup(key) {
                Some(Input::Move(direction)) => {
                    self.session.attempt_move(direction);
                }
                Some(Input::Command(Command::Quit)) => {
                    self.finish_run();
                    return Ok(());
                }
                Some(Input::Command(Command::Hint)) => self.show_hint = !self.show_hint,
                Some(Input::Command(Command::Help)) => {
                    let lines = render::help_lines(&self.settings.keys);
                    render::draw_panel(term.out(), self.session.dimensions(), &lines)?;
                    term.read_key()?;
                }
                Some(Input::Command(Command::Keybinds)) => self.edit_keybinds(term)?,
                Some(Input::Command(Command::Restart)) => self.new_run()?,
                Some(Input::Command(Command::Resize)) => self.resize(term)?,
                None => {}
            }
        }
    }

    fn game_over(&mut self, term: &mut Terminal) -> Result<AfterRun> {
        self.finish_run();
        render::draw_game_over(term.out(), &self.session, &self.settings.keys)?;
        if term.read_key()? == self.settings.keys.restart {
            self.new_run()?;
            return Ok(AfterRun::Restart);
        }
        Ok(AfterRun::Quit)
    }

    /// Abandon the current run and deal a new board.
    fn new_run(&mut self) -> Result<()> {
        self.session.reset().context("failed to deal a new board")?;
        self.recorded = false;
        Ok(())
    }

    fn finish_run(&mut self) {
        if self.recorded {
            return;
        }
        self.recorded = true;
        let store = self.score_file();
        let outcome = record_run(&store, self.session.score(), self.session.percent_cleared());
        self.report = Some(outcome.report);
        self.new_best = outcome.is_new_best;
        self.warnings.extend(outcome.warning);
    }

    fn score_file(&self) -> ScoreFile {
        match &self.scores_override {
            Some(path) => ScoreFile::new(path),
            None => ScoreFile::for_settings(&self.settings),
        }
    }

    fn save_settings(&mut self) {
        if let Err(e) = self.config.save(&self.settings) {
            warn!("{}", e);
            self.warnings.push(format!("settings not saved: {}", e));
        }
    }

    fn check_fit(&mut self, term: &Terminal) {
        let (rows, cols) = self.session.dimensions();
        if let Ok((width, height)) = term.size() {
            if (width as usize) < cols || (height as usize) < rows + 1 {
                let message = format!(
                    "terminal is {}x{}, board needs {}x{}",
                    width,
                    height,
                    cols,
                    rows + 1
                );
                warn!("{}", message);
                if !self.warnings.contains(&message) {
                    self.warnings.push(message);
                }
            }
        }
    }

    fn edit_keybinds(&mut self, term: &mut Terminal) -> Result<()> {
        let board = self.session.dimensions();
        let mut captured = Vec::with_capacity(KeyBindings::COUNT);
        while captured.len() < KeyBindings::COUNT {
            render::draw_panel(term.out(), board, &render::keybind_lines(&captured, false))?;
            let key = term.read_key()?;
            if key == ESCAPE {
                debug!("keybind edit cancelled");
                return Ok(());
            }
            captured.push(key);
        }
        render::draw_panel(term.out(), board, &render::keybind_lines(&captured, true))?;
        term.read_key()?;

        let mut codes = [0; KeyBindings::COUNT];
        codes.copy_from_slice(&captured);
        self.settings.keys = KeyBindings::from_codes(codes);
        info!("key bindings updated");
        self.save_settings();
        Ok(())
    }

    fn resize(&mut self, term: &mut Terminal) -> Result<()> {
        let board = self.session.dimensions();
        let Some(rows) = prompt_number(term, board, "Rows")? else {
            return Ok(());
        };
        let Some(cols) = prompt_number(term, board, "Columns")? else {
            return Ok(());
        };

        if let Err(e) = self.settings.set_dimensions(rows, cols) {
            let lines = vec!["RESIZE".to_string(), String::new(), e.to_string()];
            render::draw_panel(term.out(), board, &lines)?;
            term.read_key()?;
            return Ok(());
        }

        self.session
            .resize(rows, cols)
            .context("failed to deal a resized board")?;
        self.recorded = false;
        info!("board resized to {}x{}", rows, cols);
        self.save_settings();
        self.check_fit(term);
        Ok(())
    }
}

/// Ask for a number in a panel. `None` when the player backs out.
fn prompt_number(term: &mut Terminal, board: (usize, usize), label: &str) -> Result<Option<usize>> {
    let mut prompt = NumberPrompt::default();
    loop {
        let lines = vec![
            "RESIZE".to_string(),
            String::new(),
            format!("{}: {}", label, prompt.text()),
            String::new(),
            "Enter confirms, Esc cancels.".to_string(),
        ];
        render::draw_panel(term.out(), board, &lines)?;
        match prompt.push(term.read_key()?) {
            PromptState::Editing => {}
            PromptState::Done(n) => return Ok(Some(n)),
            PromptState::Cancelled => return Ok(None),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PromptState {
    Editing,
    Done(usize),
    Cancelled,
}

/// Digit-only line editor.
#[derive(Debug, Default)]
struct NumberPrompt {
    digits: String,
}

impl NumberPrompt {
    /// Longest number accepted; keeps the value well inside `u16` cursor math.
    const MAX_DIGITS: usize = 4;

    fn text(&self) -> &str {
        &self.digits
    }

    fn push(&mut self, key: u32) -> PromptState {
        match key {
            ESCAPE | INTERRUPT => PromptState::Cancelled,
            ENTER | 13 => match self.digits.parse() {
                Ok(n) => PromptState::Done(n),
                Err(_) => PromptState::Editing,
            },
            BACKSPACE | 127 => {
                self.digits.pop();
                PromptState::Editing
            }
            _ => {
                if let Some(d) = char::from_u32(key).filter(char::is_ascii_digit) {
                    if self.digits.len() < Self::MAX_DIGITS {
                        self.digits.push(d);
                    }
                }
                PromptState::Editing
            }
        }
    }
}

/// Result of writing a finished run to the high-score table.
pub struct RunRecord {
    pub report: String,
    pub is_new_best: bool,
    pub warning: Option<String>,
}

/// Load the table, add the run, save if it placed, and build the report.
///
/// An unreadable table is not overwritten: the run is still ranked against
/// an empty table and reported, and the failure comes back as a warning.
pub fn record_run(store: &ScoreFile, score: u32, percent: f64) -> RunRecord {
    let (mut ledger, mut warning) = match store.load() {
        Ok(ledger) => (ledger, None),
        Err(e) => {
            warn!("{}", e);
            (HighScoreLedger::new(), Some(format!("high scores not loaded: {}", e)))
        }
    };
    let writable = warning.is_none();

    let recorded = ledger.record(score, percent);
    debug!(
        "recorded score {} ({:.2}%) at rank {:?} in {}",
        score,
        percent,
        recorded.rank,
        store.path().display()
    );

    if recorded.rank.is_some() && writable {
        if let Err(e) = store.save(&ledger) {
            warn!("{}", e);
            warning = Some(format!("high scores not saved: {}", e));
        }
    }

    RunRecord {
        report: ledger.report(recorded.rank).to_string(),
        is_new_best: recorded.is_new_best,
        warning,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    // -------------------------------------------------------------------------
    // Recording runs
    // -------------------------------------------------------------------------

    #[test]
    fn test_record_run_saves_and_marks() {
        let dir = tempdir().unwrap();
        let store = ScoreFile::new(dir.path().join("scores.txt"));

        let first = record_run(&store, 100, 5.77);
        assert!(first.is_new_best);
        assert!(first.warning.is_none());
        assert_eq!(first.report, "=== HIGH SCORES ===\n1. 100 - 5.77%  <--\n");

        let second = record_run(&store, 50, 2.89);
        assert!(!second.is_new_best);
        assert!(second.report.ends_with("2. 50 - 2.89%  <--\n"));
        assert_eq!(
            fs::read_to_string(store.path()).unwrap(),
            "100 5.77\n50 2.89\n"
        );
    }

    #[test]
    fn test_record_run_tie_is_not_new_best() {
        let dir = tempdir().unwrap();
        let store = ScoreFile::new(dir.path().join("scores.txt"));
        record_run(&store, 100, 5.77);
        let tie = record_run(&store, 100, 5.77);
        assert!(!tie.is_new_best);
        assert!(tie.report.contains("1. 100 - 5.77%\n2. 100 - 5.77%  <--\n"));
    }

    #[test]
    fn test_record_run_reports_when_store_unavailable() {
        let dir = tempdir().unwrap();
        let store = ScoreFile::new(dir.path());
        let run = record_run(&store, 42, 2.0);
        assert!(run.is_new_best);
        assert!(run.report.contains("1. 42 - 2.00%  <--"));
        assert!(run.warning.unwrap().starts_with("high scores not loaded"));
    }

    #[test]
    fn test_record_run_reports_save_failure() {
        let dir = tempdir().unwrap();
        // Reads as an empty table, but the write has no directory to land in.
        let store = ScoreFile::new(dir.path().join("missing").join("scores.txt"));
        let run = record_run(&store, 77, 3.5);
        assert!(run.is_new_best);
        assert!(run.report.contains("1. 77 - 3.50%  <--"));
        let warning = run.warning.unwrap();
        assert!(warning.starts_with("high scores not saved"), "{}", warning);
        assert!(!store.path().exists());
    }

    #[test]
    fn test_record_run_unplaced_leaves_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scores.txt");
        let text: String = (1..=10).rev().map(|i| format!("{} {}.00\n", i * 100, i)).collect();
        fs::write(&path, &text).unwrap();

        let run = record_run(&ScoreFile::new(&path), 5, 0.1);
        assert!(!run.report.contains("<--"));
        assert_eq!(fs::read_to_string(&path).unwrap(), text);
    }

    // -------------------------------------------------------------------------
    // Number prompt
    // -------------------------------------------------------------------------

    #[test]
    fn test_prompt_accepts_digits() {
        let mut prompt = NumberPrompt::default();
        for key in "2x5".chars() {
            assert_eq!(prompt.push(key as u32), PromptState::Editing);
        }
        assert_eq!(prompt.text(), "25");
        assert_eq!(prompt.push(ENTER), PromptState::Done(25));
    }

    #[test]
    fn test_prompt_backspace_and_limit() {
        let mut prompt = NumberPrompt::default();
        for key in "123456".chars() {
            prompt.push(key as u32);
        }
        assert_eq!(prompt.text(), "1234");
        prompt.push(BACKSPACE);
        assert_eq!(prompt.text(), "123");
    }

    #[test]
    fn test_prompt_empty_enter_keeps_editing() {
        let mut prompt = NumberPrompt::default();
        assert_eq!(prompt.push(ENTER), PromptState::Editing);
        assert_eq!(prompt.push(ESCAPE), PromptState::Cancelled);
    }
}
