//! # Greed CLI
//!
//! Play Greed in the terminal. Settings and high scores live in flat text
//! files next to where the game is started.

mod app;
mod input;
mod render;
mod store;
mod terminal;

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use greed_core::GameSession;
use log::{debug, warn};

use app::App;
use store::{ConfigFile, DEFAULT_CONFIG_FILE};
use terminal::Terminal;

#[derive(Parser, Debug)]
#[command(name = "greed")]
#[command(author, version, about = "Clear the board by jumping across numbered tiles")]
struct Args {
    /// Board height (10 to 1000); saved to the config file
    #[arg(short, long)]
    rows: Option<usize>,

    /// Board width (10 to 1000); saved to the config file
    #[arg(short, long)]
    cols: Option<usize>,

    /// Random seed for a reproducible board
    #[arg(short, long)]
    seed: Option<u64>,

    /// Settings file
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// High-score file (default depends on the board size)
    #[arg(long)]
    scores: Option<PathBuf>,

    /// Start with move hints shown
    #[arg(long)]
    hints: bool,

    /// Write log output to this file (filtered by RUST_LOG, default warn)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;
    debug!("{:?}", args);

    let config = ConfigFile::new(&args.config);
    debug!("config file {}", config.path().display());
    let mut settings = config.load().unwrap_or_else(|e| {
        warn!("{}, using defaults", e);
        eprintln!("warning: {}, using defaults", e);
        Default::default()
    });

    if args.rows.is_some() || args.cols.is_some() {
        let (rows, cols) = settings.dimensions();
        settings
            .set_dimensions(args.rows.unwrap_or(rows), args.cols.unwrap_or(cols))
            .context("invalid board size")?;
        if let Err(e) = config.save(&settings) {
            warn!("{}", e);
            eprintln!("warning: {}", e);
        }
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    let (rows, cols) = settings.dimensions();
    debug!("seed {}", seed);
    let session = GameSession::new(rows, cols, seed).context("failed to deal the board")?;

    let mut app = App::new(session, settings, config, args.scores, args.hints);
    let mut term = Terminal::begin().context("failed to set up the terminal")?;
    let result = app.run(&mut term);
    term.end().context("failed to restore the terminal")?;

    for warning in app.warnings() {
        eprintln!("warning: {}", warning);
    }
    if let Some(report) = app.report() {
        print!("{}", report);
        if app.new_best() {
            println!("New high score!");
        }
    }
    result
}

/// Log to `log_file` only. The game owns the terminal, so without a file no
/// logger is installed and user-facing problems are collected as warnings.
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}
