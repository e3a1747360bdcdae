use crate::input::{Action, Controller};
use crate::state::BoardState;
use crate::ui;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{backend::Backend, layout::Rect, Terminal};
use std::io;

pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, state: &mut BoardState) -> io::Result<()> {
    let mut controller = Controller::new();
    loop {
        let mut area = Rect::default();
        terminal.draw(|f| {
            area = f.area();
            ui::draw(f, state, &controller);
        })?;

        let action = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => controller.on_key(key, state),
            Event::Mouse(mouse) => controller.on_mouse(mouse, state, area),
            _ => Action::None,
        };

        match action {
            Action::Quit => return Ok(()),
            // Rejected events are logged by the reducer and otherwise ignored.
            Action::Dispatch(event) => {
                let _ = state.apply(event);
            }
            Action::None => {}
        }
        controller.sync(state);
    }
}
