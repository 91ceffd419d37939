//! Flat-file stores for the high-score table and the settings.
//!
//! Both files are rewritten wholesale. A file that does not exist yet is not
//! an error: it reads as an empty table or as default settings.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use greed_core::{HighScoreLedger, Settings};
use log::debug;
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "greed_config.txt";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("cannot access {}: {source}", .path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is malformed: {reason}", .path.display())]
    Malformed { path: PathBuf, reason: String },
}

/// Read a whole file, mapping "not found" to `None`.
fn read_optional(path: &Path) -> Result<Option<String>, StoreError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(StoreError::Unavailable {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn write(path: &Path, text: &str) -> Result<(), StoreError> {
    fs::write(path, text).map_err(|source| StoreError::Unavailable {
        path: path.to_path_buf(),
        source,
    })
}

/// High-score table on disk.
#[derive(Debug, Clone)]
pub struct ScoreFile {
    path: PathBuf,
}

impl ScoreFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ScoreFile { path: path.into() }
    }

    /// Default table for a board configuration: the stock board keeps the
    /// plain `greed_scores.txt`, other sizes get their own table.
    pub fn for_settings(settings: &Settings) -> Self {
        if settings.is_default_size() {
            return Self::new("greed_scores.txt");
        }
        let (rows, cols) = settings.dimensions();
        Self::new(format!("greed_scores_{}x{}.txt", rows, cols))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<HighScoreLedger, StoreError> {
        let ledger = read_optional(&self.path)?
            .map(|text| HighScoreLedger::parse(&text))
            .unwrap_or_default();
        debug!("loaded {} high scores from {}", ledger.len(), self.path.display());
        Ok(ledger)
    }

    pub fn save(&self, ledger: &HighScoreLedger) -> Result<(), StoreError> {
        write(&self.path, &ledger.to_text())?;
        debug!("saved {} high scores to {}", ledger.len(), self.path.display());
        Ok(())
    }
}

/// Settings on disk.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    path: PathBuf,
}

impl ConfigFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ConfigFile { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Settings, StoreError> {
        let Some(text) = read_optional(&self.path)? else {
            debug!("no config at {}, using defaults", self.path.display());
            return Ok(Settings::default());
        };
        Settings::parse(&text).map_err(|e| StoreError::Malformed {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }

    pub fn save(&self, settings: &Settings) -> Result<(), StoreError> {
        write(&self.path, &settings.to_text())?;
        debug!("saved settings to {}", self.path.display());
        Ok(())
    }
}
