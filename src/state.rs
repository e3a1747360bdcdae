use crate::card::{Card, CardIdGenerator};
use crate::error::Result;
use crate::event::{BoardEvent, DragResult};
use crate::kanban_board::{ColumnId, KanbanBoard};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Viewing,
    Editing(ColumnId),
}

/// Everything the board screen owns: the cards, the add-form mode and the
/// text typed into it.
#[derive(Debug, Default)]
pub struct BoardState {
    pub board: KanbanBoard,
    pub mode: Mode,
    pub pending_text: String,
    ids: CardIdGenerator,
}

impl BoardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn editing_column(&self) -> Option<ColumnId> {
        match self.mode {
            Mode::Editing(column) => Some(column),
            Mode::Viewing => None,
        }
    }

    /// Applies one UI event. A rejected event leaves the state as it was.
    pub fn apply(&mut self, event: BoardEvent) -> Result<()> {
        if tracing::enabled!(tracing::Level::DEBUG) {
            if let Ok(json) = serde_json::to_string(&event) {
                tracing::debug!(event = %json, "applying board event");
            }
        }

        let result = match event {
            BoardEvent::DragEnd(drag) => self.drag_end(drag),
            BoardEvent::BeginAdd(column) => {
                self.begin_add(column);
                Ok(())
            }
            BoardEvent::UpdateText(text) => {
                self.pending_text = text;
                Ok(())
            }
            BoardEvent::Submit(column) => self.submit(column),
            BoardEvent::Cancel => {
                self.cancel();
                Ok(())
            }
        };

        if let Err(err) = &result {
            tracing::warn!(error = %err, "board event rejected");
        }
        result
    }

    fn drag_end(&mut self, drag: DragResult) -> Result<()> {
        let Some(destination) = drag.destination else {
            tracing::debug!(source = ?drag.source, "drag cancelled");
            return Ok(());
        };
        let id = self.board.move_card(drag.source, destination)?;
        tracing::info!(
            card = %id,
            from = %drag.source.column_id,
            to = %destination.column_id,
            index = destination.index,
            "card moved"
        );
        Ok(())
    }

    fn begin_add(&mut self, column: ColumnId) {
        self.mode = Mode::Editing(column);
        self.pending_text.clear();
    }

    fn submit(&mut self, column: ColumnId) -> Result<()> {
        if self.pending_text.trim().is_empty() {
            return Ok(());
        }

        let mut id = self.ids.next_id();
        while self.board.contains_card(&id) {
            id = self.ids.next_id();
        }
        // Stored as typed; trimming only decides whether there is anything to add.
        let card = Card::new(id.clone(), self.pending_text.clone());
        self.board.add_card(column, card)?;
        tracing::info!(card = %id, column = %column, "card added");

        self.cancel();
        Ok(())
    }

    fn cancel(&mut self) {
        self.pending_text.clear();
        self.mode = Mode::Viewing;
    }
}
