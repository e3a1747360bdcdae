use crate::card::{Card, CardId};
use crate::error::{BoardError, Result};
use crate::event::DragLocation;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColumnId {
    Todo,
    InProgress,
    Done,
}

impl ColumnId {
    pub const ALL: [ColumnId; 3] = [ColumnId::Todo, ColumnId::InProgress, ColumnId::Done];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnId::Todo => "todo",
            ColumnId::InProgress => "in-progress",
            ColumnId::Done => "done",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ColumnId::Todo => "To Do",
            ColumnId::InProgress => "In Progress",
            ColumnId::Done => "Done",
        }
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    pub items: Vec<Card>,
}

impl Column {
    pub fn new(id: ColumnId) -> Self {
        Self {
            id,
            title: id.title().to_string(),
            items: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KanbanBoard {
    pub columns: Vec<Column>,
}

impl KanbanBoard {
    /// The starting board: two seed cards in "To Do", the rest empty.
    pub fn new() -> Self {
        let seed = vec![
            Card::new(CardId::new("task-1"), "First task"),
            Card::new(CardId::new("task-2"), "Second task"),
        ];
        let mut board = Self::from_columns(ColumnId::ALL.map(Column::new).to_vec());
        board.columns[0].items = seed;
        board
    }

    pub fn from_columns(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    fn column_index(&self, id: ColumnId) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c.id == id)
            .ok_or(BoardError::ColumnNotFound(id))
    }

    pub fn column(&self, id: ColumnId) -> Result<&Column> {
        self.column_index(id).map(|i| &self.columns[i])
    }

    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.columns.iter().flat_map(|c| c.items.iter())
    }

    pub fn card_count(&self) -> usize {
        self.columns.iter().map(|c| c.items.len()).sum()
    }

    pub fn contains_card(&self, id: &CardId) -> bool {
        self.cards().any(|c| &c.id == id)
    }

    pub fn add_card(&mut self, column: ColumnId, card: Card) -> Result<()> {
        let index = self.column_index(column)?;
        self.columns[index].items.push(card);
        Ok(())
    }

    /// Moves the card at `source` so it ends up at `destination`.
    ///
    /// Every location is checked before the board is touched, so a rejected
    /// move leaves it exactly as it was.
    pub fn move_card(&mut self, source: DragLocation, destination: DragLocation) -> Result<CardId> {
        let from = self.column_index(source.column_id)?;
        let to = self.column_index(destination.column_id)?;

        let source_len = self.columns[from].items.len();
        if source.index >= source_len {
            return Err(BoardError::CardIndexOutOfRange {
                column: source.column_id,
                index: source.index,
                len: source_len,
            });
        }

        // Insertion points are counted after the card has left its column.
        let max = if from == to {
            source_len - 1
        } else {
            self.columns[to].items.len()
        };
        if destination.index > max {
            return Err(BoardError::DestinationOutOfRange {
                column: destination.column_id,
                index: destination.index,
                max,
            });
        }

        let card = self.columns[from].items.remove(source.index);
        let id = card.id.clone();
        self.columns[to].items.insert(destination.index, card);
        Ok(id)
    }
}

impl Default for KanbanBoard {
    fn default() -> Self {
        Self::new()
    }
}
