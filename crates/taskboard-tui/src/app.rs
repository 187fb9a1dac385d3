//! Application state and input routing

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
};
use taskboard_core::board::Board;
use taskboard_core::components::Component;
use taskboard_core::config::Config;
use taskboard_core::document::NodeId;
use taskboard_core::models::ProjectStatus;
use tracing::{debug, warn};

use crate::drag::DragController;
use crate::render::{self, HitMap, RenderState};

const HELP: &str = "Tab: Next field | Enter: Add project | Drag cards with the mouse | Ctrl+C: Quit";

pub struct App {
    board: Board,
    focus: usize,
    alert: Option<String>,
    drag: DragController,
    hits: HitMap,
    last_pointer: (u16, u16),
    should_quit: bool,
}

impl App {
    pub fn new(config: &Config) -> taskboard_core::Result<Self> {
        Ok(Self {
            board: Board::new(config)?,
            focus: 0,
            alert: None,
            drag: DragController::new(),
            hits: HitMap::default(),
            last_pointer: (0, 0),
            should_quit: false,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Control that currently has keyboard focus
    pub fn focused(&self) -> NodeId {
        self.board.input().controls()[self.focus]
    }

    /// Where `node` was drawn in the last frame
    #[cfg(test)]
    pub fn rect_of(&self, node: NodeId) -> Option<ratatui::layout::Rect> {
        self.hits.rect_of(node)
    }

    pub fn draw(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(8), Constraint::Length(1)])
            .split(frame.area());

        let state = RenderState {
            focus: Some(self.focused()),
            dragging: self.drag.source().map(|item| item.element()),
        };
        render::draw_document(frame, chunks[0], &self.board.document(), state, &mut self.hits);

        frame.render_widget(
            Paragraph::new(HELP).style(Style::default().fg(Color::DarkGray)),
            chunks[1],
        );

        if let Some(message) = self.alert() {
            render::draw_alert(frame, message);
        }
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q')) {
            self.should_quit = true;
            return;
        }

        if self.alert.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.alert = None;
            }
            return;
        }

        let controls = self.board.input().controls().len();
        match key.code {
            KeyCode::Tab => self.focus = (self.focus + 1) % controls,
            KeyCode::BackTab => self.focus = (self.focus + controls - 1) % controls,
            KeyCode::Enter => self.submit(),
            KeyCode::Esc if self.drag.is_dragging() => self.drag.cancel(&self.board, self.last_pointer),
            KeyCode::Backspace => self.edit_focused(|value| {
                value.pop();
            }),
            KeyCode::Char(' ') if !self.focused_is_input() => self.submit(),
            KeyCode::Char(c) if !ctrl => self.edit_focused(|value| value.push(c)),
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.alert.is_some() {
            return;
        }

        let position = (mouse.column, mouse.row);
        self.last_pointer = position;
        let node = self.hits.hit(mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(node) = node {
                    if let Some(index) = self.board.input().controls().iter().position(|&c| c == node) {
                        self.focus = index;
                        if !self.focused_is_input() {
                            self.submit();
                        }
                        return;
                    }
                }
                let item = node.and_then(|n| self.board.item_at(n));
                self.drag.press(item);
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let target = self.column_at(node);
                self.drag.motion(&self.board, target, position);
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let target = self.column_at(node);
                self.drag.release(&mut self.board, target, position);
            }
            _ => {}
        }
    }

    fn column_at(&self, node: Option<NodeId>) -> Option<ProjectStatus> {
        node.and_then(|n| self.board.list_at(n)).map(|list| list.status())
    }

    fn focused_is_input(&self) -> bool {
        self.board.input().is_input(self.focused())
    }

    fn edit_focused(&mut self, edit: impl FnOnce(&mut String)) {
        let node = self.focused();
        if !self.board.input().is_input(node) {
            return;
        }
        let mut doc = self.board.shared_document().borrow_mut();
        let mut value = doc.value(node).to_string();
        edit(&mut value);
        doc.set_value(node, value);
    }

    fn submit(&mut self) {
        let alert = &mut self.alert;
        let added = self.board.submit(&mut |message: &str| {
            warn!(reason = %message, "Form rejected");
            *alert = Some(message.to_string());
        });
        if added {
            debug!(projects = self.board.state().len(), "Form submitted");
            self.focus = 0;
        }
    }
}
