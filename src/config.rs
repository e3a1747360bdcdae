use crate::error::AppError;
use clap::Parser;
use std::{fs::File, path::PathBuf, sync::Mutex};
use tracing_subscriber::EnvFilter;

/// Terminal Kanban board with drag-and-drop cards.
#[derive(Debug, Parser)]
#[command(name = "kanban-board", version, about)]
pub struct Cli {
    /// Write logs to this file. Logging is off without it.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Log at debug level, including every board event.
    #[arg(long)]
    pub debug: bool,

    /// Leave the mouse alone; cards are then moved with the keyboard only.
    #[arg(long)]
    pub no_mouse: bool,
}

impl Cli {
    /// The terminal belongs to the board, so logs only ever go to a file.
    pub fn init_logging(&self) -> Result<(), AppError> {
        let Some(path) = &self.log_file else {
            return Ok(());
        };
        let file = File::create(path)?;

        let filter = if self.debug {
            EnvFilter::new("kanban_board=debug")
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
        };
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init()
            .map_err(|e| AppError::Logging(e.to_string()))
    }
}
