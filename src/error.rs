use crate::kanban_board::ColumnId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BoardError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("Column not found: {0}")]
    ColumnNotFound(ColumnId),

    #[error("No card at index {index} in column {column} ({len} cards)")]
    CardIndexOutOfRange {
        column: ColumnId,
        index: usize,
        len: usize,
    },

    #[error("Cannot insert at index {index} in column {column} (at most {max})")]
    DestinationOutOfRange {
        column: ColumnId,
        index: usize,
        max: usize,
    },
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}
