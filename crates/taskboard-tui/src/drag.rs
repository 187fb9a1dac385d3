//! Pointer drag tracking
//!
//! Turns press / motion / release of the left mouse button into the drag
//! event sequence the board's views expect:
//!
//! - `DragStart` on the first motion after pressing on a card
//! - `DragOver` on every motion above a column, `DragLeave` when leaving it
//! - `Drop` on release above a column that accepted the last `DragOver`
//! - a final `DragLeave` for the hovered column, then `DragEnd`

use std::mem;

use taskboard_core::board::Board;
use taskboard_core::components::ProjectItem;
use taskboard_core::models::{DataTransfer, DragEvent, DragEventKind, DragTarget, Draggable, ProjectStatus};
use tracing::debug;

#[derive(Debug, Default)]
enum DragState {
    #[default]
    Idle,
    Pressed {
        source: ProjectItem,
    },
    Dragging {
        source: ProjectItem,
        transfer: DataTransfer,
        over: Option<ProjectStatus>,
        accepted: bool,
    },
}

/// Drag gesture state machine
#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Card being dragged, once the gesture has started
    pub fn source(&self) -> Option<&ProjectItem> {
        match &self.state {
            DragState::Dragging { source, .. } => Some(source),
            _ => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Left button went down, possibly on a card
    pub fn press(&mut self, item: Option<ProjectItem>) {
        self.state = match item {
            Some(source) => DragState::Pressed { source },
            None => DragState::Idle,
        };
    }

    /// Pointer moved with the left button held
    pub fn motion(&mut self, board: &Board, target: Option<ProjectStatus>, position: (u16, u16)) {
        self.state = match mem::take(&mut self.state) {
            DragState::Idle => DragState::Idle,
            DragState::Pressed { source } => {
                let mut transfer = DataTransfer::new();
                source.drag_start_handler(&mut DragEvent::new(DragEventKind::DragStart, &mut transfer, position));
                debug!(id = %source.project().id, "Drag started");
                let (over, accepted) = hover(board, &mut transfer, None, false, target, position);
                DragState::Dragging {
                    source,
                    transfer,
                    over,
                    accepted,
                }
            }
            DragState::Dragging {
                source,
                mut transfer,
                over,
                accepted,
            } => {
                let (over, accepted) = hover(board, &mut transfer, over, accepted, target, position);
                DragState::Dragging {
                    source,
                    transfer,
                    over,
                    accepted,
                }
            }
        };
    }

    /// Left button released
    pub fn release(&mut self, board: &mut Board, target: Option<ProjectStatus>, position: (u16, u16)) {
        let DragState::Dragging {
            source,
            mut transfer,
            over,
            accepted,
        } = mem::take(&mut self.state)
        else {
            return;
        };

        let (over, accepted) = hover(board, &mut transfer, over, accepted, target, position);

        if let Some(status) = over {
            if accepted {
                board.drop_on(status, &mut DragEvent::new(DragEventKind::Drop, &mut transfer, position));
            }
            if let Some(list) = board.list(status) {
                list.drag_leave_handler(&DragEvent::new(DragEventKind::DragLeave, &mut transfer, position));
            }
        }

        source.drag_end_handler(&DragEvent::new(DragEventKind::DragEnd, &mut transfer, position));
    }

    /// Abandon the gesture without dropping
    pub fn cancel(&mut self, board: &Board, position: (u16, u16)) {
        if let DragState::Dragging {
            source,
            mut transfer,
            over,
            ..
        } = mem::take(&mut self.state)
        {
            if let Some(list) = over.and_then(|status| board.list(status)) {
                list.drag_leave_handler(&DragEvent::new(DragEventKind::DragLeave, &mut transfer, position));
            }
            source.drag_end_handler(&DragEvent::new(DragEventKind::DragEnd, &mut transfer, position));
        }
    }
}

/// Move the hover to `target`, returning the new hovered column and
/// whether it accepted the drag
fn hover(
    board: &Board,
    transfer: &mut DataTransfer,
    over: Option<ProjectStatus>,
    accepted: bool,
    target: Option<ProjectStatus>,
    position: (u16, u16),
) -> (Option<ProjectStatus>, bool) {
    let mut accepted = accepted;
    if over != target {
        if let Some(list) = over.and_then(|status| board.list(status)) {
            list.drag_leave_handler(&DragEvent::new(DragEventKind::DragLeave, transfer, position));
        }
        accepted = false;
    }

    if let Some(list) = target.and_then(|status| board.list(status)) {
        let mut event = DragEvent::new(DragEventKind::DragOver, transfer, position);
        list.drag_over_handler(&mut event);
        accepted = event.default_prevented();
    }

    (target, accepted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskboard_core::config::Config;
    use taskboard_core::models::Project;

    fn board_with_project() -> Board {
        let mut board = Board::new(&Config::default()).unwrap();
        board
            .state_mut()
            .add_project(Project::new("Build API", "a short desc", 3));
        board
    }

    fn first_active(board: &Board) -> ProjectItem {
        board.list(ProjectStatus::Active).unwrap().items()[0].clone()
    }

    fn status_of_first(board: &Board) -> ProjectStatus {
        board.state().projects()[0].status
    }

    #[test]
    fn test_full_gesture_moves_project() {
        let mut board = board_with_project();
        let mut drag = DragController::new();

        drag.press(Some(first_active(&board)));
        assert!(!drag.is_dragging());
        drag.motion(&board, Some(ProjectStatus::Active), (1, 1));
        assert!(drag.is_dragging());
        drag.motion(&board, Some(ProjectStatus::Finished), (50, 1));
        assert!(board.list(ProjectStatus::Finished).unwrap().is_droppable());
        assert!(!board.list(ProjectStatus::Active).unwrap().is_droppable());

        drag.release(&mut board, Some(ProjectStatus::Finished), (50, 1));

        assert!(!drag.is_dragging());
        assert_eq!(status_of_first(&board), ProjectStatus::Finished);
        assert!(!board.list(ProjectStatus::Finished).unwrap().is_droppable());
    }

    #[test]
    fn test_click_without_motion_is_not_a_drag() {
        let mut board = board_with_project();
        let mut drag = DragController::new();

        drag.press(Some(first_active(&board)));
        drag.release(&mut board, Some(ProjectStatus::Finished), (50, 1));

        assert_eq!(status_of_first(&board), ProjectStatus::Active);
    }

    #[test]
    fn test_release_outside_columns_drops_nothing() {
        let mut board = board_with_project();
        let mut drag = DragController::new();

        drag.press(Some(first_active(&board)));
        drag.motion(&board, Some(ProjectStatus::Finished), (50, 1));
        drag.release(&mut board, None, (50, 0));

        assert_eq!(status_of_first(&board), ProjectStatus::Active);
        assert!(!board.list(ProjectStatus::Finished).unwrap().is_droppable());
    }

    #[test]
    fn test_press_outside_cards_never_drags() {
        let mut board = board_with_project();
        let mut drag = DragController::new();

        drag.press(None);
        drag.motion(&board, Some(ProjectStatus::Finished), (50, 1));
        assert!(!drag.is_dragging());
        drag.release(&mut board, Some(ProjectStatus::Finished), (50, 1));
        assert_eq!(status_of_first(&board), ProjectStatus::Active);
    }

    #[test]
    fn test_cancel_clears_highlight() {
        let board = board_with_project();
        let mut drag = DragController::new();

        drag.press(Some(first_active(&board)));
        drag.motion(&board, Some(ProjectStatus::Finished), (50, 1));
        drag.cancel(&board, (50, 1));

        assert!(!drag.is_dragging());
        assert!(!board.list(ProjectStatus::Finished).unwrap().is_droppable());
        assert_eq!(status_of_first(&board), ProjectStatus::Active);
    }
}
