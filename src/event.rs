use crate::kanban_board::ColumnId;
use serde::{Deserialize, Serialize};

/// A position on the board: a column and an index into its card list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragLocation {
    pub column_id: ColumnId,
    pub index: usize,
}

impl DragLocation {
    pub fn new(column_id: ColumnId, index: usize) -> Self {
        Self { column_id, index }
    }
}

/// End of a drag gesture. No destination means the drag was cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragResult {
    pub source: DragLocation,
    pub destination: Option<DragLocation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum BoardEvent {
    DragEnd(DragResult),
    BeginAdd(ColumnId),
    UpdateText(String),
    Submit(ColumnId),
    Cancel,
}
