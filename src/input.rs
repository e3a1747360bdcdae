use crate::event::{BoardEvent, DragLocation, DragResult};
use crate::kanban_board::ColumnId;
use crate::state::{BoardState, Mode};
use crate::ui;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};

/// What the run loop should do with one piece of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Dispatch(BoardEvent),
    Quit,
    None,
}

/// A card that has been picked up and where it would land if dropped now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Drag {
    pub source: DragLocation,
    pub target: DragLocation,
    pub by_pointer: bool,
}

/// Turns key presses and mouse gestures into board events. Owns the view
/// cursor: which column has focus, which card is selected, and the drag in
/// flight, if any.
#[derive(Debug, Default)]
pub struct Controller {
    pub focus: usize,
    pub selected: usize,
    pub drag: Option<Drag>,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_key(&mut self, key: KeyEvent, state: &BoardState) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Action::Quit;
        }
        match state.mode {
            Mode::Editing(column) => on_edit_key(key, column, &state.pending_text),
            Mode::Viewing => self.on_view_key(key, state),
        }
    }

    fn on_view_key(&mut self, key: KeyEvent, state: &BoardState) -> Action {
        match key.code {
            KeyCode::Char('q') => return Action::Quit,
            KeyCode::Left | KeyCode::Char('h') => {
                if self.focus > 0 {
                    self.focus_column(self.focus - 1, state);
                }
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if self.focus + 1 < state.board.columns.len() {
                    self.focus_column(self.focus + 1, state);
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                if let Some(drag) = self.drag.as_mut() {
                    drag.target.index = self.selected;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let last = match self.drag {
                    Some(drag) => max_insert(state, &drag, self.focus),
                    None => self.column_len(state).saturating_sub(1),
                };
                self.selected = (self.selected + 1).min(last);
                if let Some(drag) = self.drag.as_mut() {
                    drag.target.index = self.selected;
                }
            }
            KeyCode::Char(' ') => return self.lift_or_drop(state),
            KeyCode::Esc => return self.cancel_drag(),
            KeyCode::Char('a') | KeyCode::Enter if self.drag.is_none() => {
                if let Some(column) = state.board.columns.get(self.focus) {
                    return Action::Dispatch(BoardEvent::BeginAdd(column.id));
                }
            }
            _ => {}
        }
        Action::None
    }

    /// `area` is the full frame the board was last drawn into.
    pub fn on_mouse(&mut self, mouse: MouseEvent, state: &BoardState, area: Rect) -> Action {
        let hit = self.hit_test(state, area, mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self.drag.is_some() {
                    return Action::None;
                }
                let Some((column, row)) = hit else {
                    return Action::None;
                };
                let editing = state.editing_column().is_some();
                let board_column = &state.board.columns[column];
                if row < board_column.items.len() {
                    // Cards stay put while the add form is open.
                    if editing {
                        return Action::None;
                    }
                    let source = DragLocation::new(board_column.id, row);
                    self.focus = column;
                    self.selected = row;
                    self.drag = Some(Drag {
                        source,
                        target: source,
                        by_pointer: true,
                    });
                } else if row == board_column.items.len()
                    && state.editing_column() != Some(board_column.id)
                {
                    self.focus = column;
                    return Action::Dispatch(BoardEvent::BeginAdd(board_column.id));
                }
                Action::None
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let (Some(drag), Some((column, row))) = (self.drag, hit) {
                    if drag.by_pointer {
                        self.retarget(state, drag, column, row);
                    }
                }
                Action::None
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let Some(drag) = self.drag.filter(|d| d.by_pointer) else {
                    return Action::None;
                };
                match hit {
                    Some((column, row)) => {
                        self.retarget(state, drag, column, row);
                        self.lift_or_drop(state)
                    }
                    None => self.cancel_drag(),
                }
            }
            _ => Action::None,
        }
    }

    /// Column index and row within its (scrolled) list for a terminal cell,
    /// if it lies on a row inside a column panel's border.
    fn hit_test(&self, state: &BoardState, area: Rect, x: u16, y: u16) -> Option<(usize, usize)> {
        let position = Position::new(x, y);
        let panels = ui::column_areas(area, state.board.columns.len());
        let column = panels.iter().position(|panel| panel.contains(position))?;
        let list = ui::card_area(panels[column]);
        if !list.contains(position) {
            return None;
        }
        let offset = ui::scroll_offset(state, self, column, list.height);
        Some((column, (y - list.y) as usize + offset))
    }

    /// Keeps the cursor inside the board after the state has changed.
    pub fn sync(&mut self, state: &BoardState) {
        if let Some(column) = state.editing_column() {
            if let Some(index) = state.board.columns.iter().position(|c| c.id == column) {
                self.focus = index;
            }
        }
        self.focus = self.focus.min(state.board.columns.len().saturating_sub(1));
        if self.drag.is_none() {
            self.selected = self.selected.min(self.column_len(state).saturating_sub(1));
        }
    }

    fn column_len(&self, state: &BoardState) -> usize {
        state
            .board
            .columns
            .get(self.focus)
            .map_or(0, |c| c.items.len())
    }

    fn focus_column(&mut self, column: usize, state: &BoardState) {
        self.focus = column;
        match self.drag {
            Some(drag) => {
                let index = self.selected;
                self.retarget(state, drag, column, index);
            }
            None => {
                self.selected = self.selected.min(self.column_len(state).saturating_sub(1));
            }
        }
    }

    fn retarget(&mut self, state: &BoardState, mut drag: Drag, column: usize, index: usize) {
        let Some(board_column) = state.board.columns.get(column) else {
            return;
        };
        drag.target = DragLocation::new(board_column.id, index.min(max_insert(state, &drag, column)));
        self.focus = column;
        self.selected = drag.target.index;
        self.drag = Some(drag);
    }

    fn lift_or_drop(&mut self, state: &BoardState) -> Action {
        match self.drag.take() {
            Some(drag) => {
                self.selected = drag.target.index;
                Action::Dispatch(BoardEvent::DragEnd(DragResult {
                    source: drag.source,
                    destination: Some(drag.target),
                }))
            }
            None => {
                let Some(column) = state.board.columns.get(self.focus) else {
                    return Action::None;
                };
                if self.selected < column.items.len() {
                    let source = DragLocation::new(column.id, self.selected);
                    self.drag = Some(Drag {
                        source,
                        target: source,
                        by_pointer: false,
                    });
                }
                Action::None
            }
        }
    }

    fn cancel_drag(&mut self) -> Action {
        let Some(drag) = self.drag.take() else {
            return Action::None;
        };
        self.selected = drag.source.index;
        Action::Dispatch(BoardEvent::DragEnd(DragResult {
            source: drag.source,
            destination: None,
        }))
    }
}

fn on_edit_key(key: KeyEvent, column: ColumnId, text: &str) -> Action {
    match key.code {
        KeyCode::Enter => Action::Dispatch(BoardEvent::Submit(column)),
        KeyCode::Esc => Action::Dispatch(BoardEvent::Cancel),
        KeyCode::Backspace => {
            let mut text = text.to_string();
            if text.pop().is_none() {
                return Action::None;
            }
            Action::Dispatch(BoardEvent::UpdateText(text))
        }
        KeyCode::Char(c) if key.modifiers.difference(KeyModifiers::SHIFT).is_empty() => {
            Action::Dispatch(BoardEvent::UpdateText(format!("{}{}", text, c)))
        }
        _ => Action::None,
    }
}

/// Highest insertion index in `column` for the dragged card.
fn max_insert(state: &BoardState, drag: &Drag, column: usize) -> usize {
    let Some(board_column) = state.board.columns.get(column) else {
        return 0;
    };
    let len = board_column.items.len();
    if board_column.id == drag.source.column_id {
        len.saturating_sub(1)
    } else {
        len
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn press(controller: &mut Controller, state: &mut BoardState, code: KeyCode) -> Action {
        let action = controller.on_key(key(code), state);
        if let Action::Dispatch(event) = &action {
            state.apply(event.clone()).unwrap();
        }
        controller.sync(state);
        action
    }

    fn titles(state: &BoardState, column: ColumnId) -> Vec<&str> {
        state
            .board
            .column(column)
            .unwrap()
            .items
            .iter()
            .map(|c| c.content.as_str())
            .collect()
    }

    const AREA: Rect = Rect {
        x: 0,
        y: 0,
        width: 90,
        height: 20,
    };

    #[test]
    fn test_keyboard_drag_to_next_column() {
        let mut state = BoardState::new();
        let mut controller = Controller::new();

        press(&mut controller, &mut state, KeyCode::Down);
        press(&mut controller, &mut state, KeyCode::Char(' '));
        assert!(controller.drag.is_some());
        press(&mut controller, &mut state, KeyCode::Right);
        let action = press(&mut controller, &mut state, KeyCode::Char(' '));

        assert_eq!(
            action,
            Action::Dispatch(BoardEvent::DragEnd(DragResult {
                source: DragLocation::new(ColumnId::Todo, 1),
                destination: Some(DragLocation::new(ColumnId::InProgress, 0)),
            }))
        );
        assert_eq!(titles(&state, ColumnId::InProgress), ["Second task"]);
        assert_eq!(controller.focus, 1);
        assert!(controller.drag.is_none());
    }

    #[test]
    fn test_keyboard_reorder_clamps_target() {
        let mut state = BoardState::new();
        let mut controller = Controller::new();

        press(&mut controller, &mut state, KeyCode::Char(' '));
        for _ in 0..5 {
            press(&mut controller, &mut state, KeyCode::Down);
        }
        assert_eq!(controller.drag.unwrap().target.index, 1);
        press(&mut controller, &mut state, KeyCode::Char(' '));
        assert_eq!(titles(&state, ColumnId::Todo), ["Second task", "First task"]);
    }

    #[test]
    fn test_escape_cancels_drag() {
        let mut state = BoardState::new();
        let mut controller = Controller::new();
        let before = state.board.clone();

        press(&mut controller, &mut state, KeyCode::Char(' '));
        press(&mut controller, &mut state, KeyCode::Right);
        let action = press(&mut controller, &mut state, KeyCode::Esc);

        assert!(matches!(
            action,
            Action::Dispatch(BoardEvent::DragEnd(DragResult { destination: None, .. }))
        ));
        assert_eq!(state.board, before);
    }

    #[test]
    fn test_lift_on_empty_column_does_nothing() {
        let mut state = BoardState::new();
        let mut controller = Controller::new();
        press(&mut controller, &mut state, KeyCode::Right);
        press(&mut controller, &mut state, KeyCode::Char(' '));
        assert!(controller.drag.is_none());
    }

    #[test]
    fn test_typing_adds_card() {
        let mut state = BoardState::new();
        let mut controller = Controller::new();

        press(&mut controller, &mut state, KeyCode::Right);
        press(&mut controller, &mut state, KeyCode::Char('a'));
        assert_eq!(state.mode, Mode::Editing(ColumnId::InProgress));

        for c in "Buy milkk".chars() {
            press(&mut controller, &mut state, KeyCode::Char(c));
        }
        press(&mut controller, &mut state, KeyCode::Backspace);
        assert_eq!(state.pending_text, "Buy milk");

        // 'q' is text while editing, not quit
        let action = controller.on_key(key(KeyCode::Char('q')), &state);
        assert_eq!(action, Action::Dispatch(BoardEvent::UpdateText("Buy milkq".into())));

        press(&mut controller, &mut state, KeyCode::Enter);
        assert_eq!(titles(&state, ColumnId::InProgress), ["Buy milk"]);
        assert_eq!(state.mode, Mode::Viewing);
    }

    #[test]
    fn test_escape_cancels_editing() {
        let mut state = BoardState::new();
        let mut controller = Controller::new();
        press(&mut controller, &mut state, KeyCode::Enter);
        press(&mut controller, &mut state, KeyCode::Char('x'));
        let action = press(&mut controller, &mut state, KeyCode::Esc);
        assert_eq!(action, Action::Dispatch(BoardEvent::Cancel));
        assert_eq!(state.mode, Mode::Viewing);
        assert_eq!(state.board.card_count(), 2);
    }

    #[test]
    fn test_quit_keys() {
        let state = BoardState::new();
        let mut controller = Controller::new();
        assert_eq!(controller.on_key(key(KeyCode::Char('q')), &state), Action::Quit);
        let ctrl_c = KeyEvent::new_with_kind(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
            KeyEventKind::Press,
        );
        assert_eq!(controller.on_key(ctrl_c, &state), Action::Quit);
    }

    #[test]
    fn test_mouse_drag_and_drop() {
        let mut state = BoardState::new();
        let mut controller = Controller::new();
        let panels = ui::column_areas(AREA, 3);
        let todo = ui::card_area(panels[0]);
        let done = ui::card_area(panels[2]);

        let down = mouse(MouseEventKind::Down(MouseButton::Left), todo.x + 2, todo.y);
        assert_eq!(controller.on_mouse(down, &state, AREA), Action::None);
        assert_eq!(controller.drag.unwrap().source, DragLocation::new(ColumnId::Todo, 0));

        let over = mouse(MouseEventKind::Drag(MouseButton::Left), done.x + 2, done.y + 4);
        controller.on_mouse(over, &state, AREA);
        assert_eq!(controller.drag.unwrap().target, DragLocation::new(ColumnId::Done, 0));

        let up = mouse(MouseEventKind::Up(MouseButton::Left), done.x + 2, done.y + 4);
        let action = controller.on_mouse(up, &state, AREA);
        let Action::Dispatch(event) = action else {
            panic!("expected a drop");
        };
        state.apply(event).unwrap();
        assert_eq!(titles(&state, ColumnId::Done), ["First task"]);
        assert_eq!(titles(&state, ColumnId::Todo), ["Second task"]);
    }

    #[test]
    fn test_mouse_release_outside_board_cancels() {
        let state = BoardState::new();
        let mut controller = Controller::new();
        let todo = ui::card_area(ui::column_areas(AREA, 3)[0]);

        controller.on_mouse(
            mouse(MouseEventKind::Down(MouseButton::Left), todo.x, todo.y + 1),
            &state,
            AREA,
        );
        let action = controller.on_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 0, 0), &state, AREA);
        assert_eq!(
            action,
            Action::Dispatch(BoardEvent::DragEnd(DragResult {
                source: DragLocation::new(ColumnId::Todo, 1),
                destination: None,
            }))
        );
        assert!(controller.drag.is_none());
    }

    #[test]
    fn test_click_on_add_affordance() {
        let state = BoardState::new();
        let mut controller = Controller::new();
        let todo = ui::card_area(ui::column_areas(AREA, 3)[0]);
        let click = mouse(MouseEventKind::Down(MouseButton::Left), todo.x + 1, todo.y + 2);
        assert_eq!(
            controller.on_mouse(click, &state, AREA),
            Action::Dispatch(BoardEvent::BeginAdd(ColumnId::Todo))
        );
    }

    #[test]
    fn test_click_on_column_title_is_ignored() {
        let state = BoardState::new();
        let mut controller = Controller::new();
        let panel = ui::column_areas(AREA, 3)[0];

        let title = mouse(MouseEventKind::Down(MouseButton::Left), panel.x + 2, panel.y);
        assert_eq!(controller.on_mouse(title, &state, AREA), Action::None);
        assert!(controller.drag.is_none());

        let border = mouse(MouseEventKind::Down(MouseButton::Left), panel.x, panel.y + 1);
        assert_eq!(controller.on_mouse(border, &state, AREA), Action::None);
        assert!(controller.drag.is_none());
    }

    #[test]
    fn test_click_maps_through_scrolled_list() {
        let mut state = BoardState::new();
        for n in 3..=14 {
            let card = crate::card::Card::new(
                crate::card::CardId::new(format!("card-{}", n)),
                format!("Card {}", n),
            );
            state.board.add_card(ColumnId::Todo, card).unwrap();
        }
        let mut controller = Controller::new();
        controller.selected = 13;

        let small = Rect::new(0, 0, 90, 12);
        let todo = ui::card_area(ui::column_areas(small, 3)[0]);
        let down = mouse(MouseEventKind::Down(MouseButton::Left), todo.x + 2, todo.y);
        controller.on_mouse(down, &state, small);
        assert_eq!(controller.drag.unwrap().source, DragLocation::new(ColumnId::Todo, 7));
    }

    #[test]
    fn test_modified_keys_do_not_type() {
        let mut state = BoardState::new();
        state.apply(BoardEvent::BeginAdd(ColumnId::Todo)).unwrap();
        let mut controller = Controller::new();

        let ctrl_a = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL);
        assert_eq!(controller.on_key(ctrl_a, &state), Action::None);
        let alt_x = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT);
        assert_eq!(controller.on_key(alt_x, &state), Action::None);

        let shift_b = KeyEvent::new(KeyCode::Char('B'), KeyModifiers::SHIFT);
        assert_eq!(
            controller.on_key(shift_b, &state),
            Action::Dispatch(BoardEvent::UpdateText("B".into()))
        );
    }

    #[test]
    fn test_cards_cannot_be_lifted_while_editing() {
        let mut state = BoardState::new();
        state.apply(BoardEvent::BeginAdd(ColumnId::Done)).unwrap();
        let mut controller = Controller::new();
        let todo = ui::card_area(ui::column_areas(AREA, 3)[0]);

        let down = mouse(MouseEventKind::Down(MouseButton::Left), todo.x + 2, todo.y);
        assert_eq!(controller.on_mouse(down, &state, AREA), Action::None);
        assert!(controller.drag.is_none());

        // another column's add row still switches the form over
        let add_row = mouse(MouseEventKind::Down(MouseButton::Left), todo.x + 2, todo.y + 2);
        assert_eq!(
            controller.on_mouse(add_row, &state, AREA),
            Action::Dispatch(BoardEvent::BeginAdd(ColumnId::Todo))
        );
    }
}
