use crate::card::Card;
use crate::input::{Controller, Drag};
use crate::kanban_board::{Column, ColumnId, KanbanBoard};
use crate::state::BoardState;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

const PLACEHOLDER: &str = "Enter task description...";

/// One row of a column as it should appear on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewCard<'a> {
    pub card: &'a Card,
    pub dragged: bool,
}

fn board_chunks(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area)
        .to_vec()
}

/// Screen areas of the column panels, left to right.
pub fn column_areas(area: Rect, count: usize) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }
    let body = board_chunks(area)[1];
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, count as u32); count])
        .split(body)
        .to_vec()
}

/// The rows inside a column panel's border, one per card.
pub fn card_area(panel: Rect) -> Rect {
    Block::default().borders(Borders::ALL).inner(panel)
}

/// Number of rows a column list scrolls past so its anchor row is on screen.
///
/// The anchor is the add form in the editing column, the selection or drag
/// target in the focused column, and the top row elsewhere. When the anchor
/// is the last card, the row after it ("+ Add a card") is kept in view too.
pub fn scroll_offset(state: &BoardState, controller: &Controller, column: usize, height: u16) -> usize {
    let Some(board_column) = state.board.columns.get(column) else {
        return 0;
    };
    let height = height as usize;
    if height == 0 {
        return 0;
    }
    let cards = preview(&state.board, controller.drag.as_ref())
        .get(column)
        .map_or(0, Vec::len);
    let editing = state.editing_column() == Some(board_column.id);
    let rows = cards + if editing { 2 } else { 1 };

    let anchor = if editing {
        rows - 1
    } else if controller.focus == column {
        let row = controller
            .drag
            .map_or(controller.selected, |drag| drag.target.index);
        if row + 1 >= cards {
            rows - 1
        } else {
            row
        }
    } else {
        0
    };
    anchor.saturating_sub(height - 1).min(rows.saturating_sub(height))
}

/// Each column's cards as if the drag in flight were dropped now.
pub fn preview<'a>(board: &'a KanbanBoard, drag: Option<&Drag>) -> Vec<Vec<PreviewCard<'a>>> {
    let mut columns: Vec<Vec<PreviewCard>> = board
        .columns
        .iter()
        .map(|c| {
            c.items
                .iter()
                .map(|card| PreviewCard {
                    card,
                    dragged: false,
                })
                .collect()
        })
        .collect();

    let Some(drag) = drag else {
        return columns;
    };
    let position = |id: ColumnId| board.columns.iter().position(|c| c.id == id);
    if let (Some(from), Some(to)) = (
        position(drag.source.column_id),
        position(drag.target.column_id),
    ) {
        if drag.source.index < columns[from].len() {
            let mut moved = columns[from].remove(drag.source.index);
            moved.dragged = true;
            let at = drag.target.index.min(columns[to].len());
            columns[to].insert(at, moved);
        }
    }
    columns
}

pub fn draw(f: &mut Frame, state: &BoardState, controller: &Controller) {
    let chunks = board_chunks(f.area());

    let heading = Paragraph::new(Line::from(Span::styled(
        "Kanban Board",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    f.render_widget(heading, chunks[0]);

    let panels = column_areas(f.area(), state.board.columns.len());
    let preview = preview(&state.board, controller.drag.as_ref());
    for (i, column) in state.board.columns.iter().enumerate() {
        let list = column_list(i, column, &preview[i], state, controller);
        let offset = scroll_offset(state, controller, i, card_area(panels[i]).height);
        f.render_stateful_widget(list, panels[i], &mut ListState::default().with_offset(offset));
    }

    f.render_widget(Paragraph::new(help_line(state, controller)), chunks[2]);
}

fn column_list<'a>(
    index: usize,
    column: &'a Column,
    cards: &[PreviewCard<'a>],
    state: &'a BoardState,
    controller: &Controller,
) -> List<'a> {
    let focused = controller.focus == index;
    let editing = state.editing_column() == Some(column.id);

    let mut items: Vec<ListItem> = cards
        .iter()
        .enumerate()
        .map(|(row, p)| {
            let style = if p.dragged {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else if focused && !editing && controller.drag.is_none() && row == controller.selected {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(vec![
                Span::raw(" "),
                Span::styled(p.card.content.as_str(), style),
            ]))
        })
        .collect();

    if editing {
        let input = if state.pending_text.is_empty() {
            Span::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray))
        } else {
            Span::raw(state.pending_text.as_str())
        };
        items.push(ListItem::new(Line::from(vec![
            Span::styled("> ", Style::default().fg(Color::Cyan)),
            input,
            Span::styled("▏", Style::default().fg(Color::Cyan)),
        ])));
        items.push(ListItem::new(Line::from(vec![
            Span::styled("[Enter] Add", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled("[Esc] Cancel", Style::default().fg(Color::DarkGray)),
        ])));
    } else {
        items.push(ListItem::new(Line::from(Span::styled(
            "+ Add a card",
            Style::default().fg(Color::DarkGray),
        ))));
    }

    List::new(items).block(
        Block::default()
            .title(column.title.as_str())
            .borders(Borders::ALL)
            .border_style(if focused {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            }),
    )
}

fn help_line(state: &BoardState, controller: &Controller) -> Line<'static> {
    let text = if state.editing_column().is_some() {
        "type a task · Enter add · Esc cancel"
    } else if controller.drag.is_some() {
        "←→↑↓ move · Space drop · Esc cancel drag"
    } else {
        "←→↑↓ select · Space pick up · a add card · q quit"
    };
    Line::from(Span::styled(text, Style::default().fg(Color::DarkGray)))
}
