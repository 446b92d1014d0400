//! Motion sub-dispatch (cursor movement and selection).
//!
//! One primitive serves both the plain and the extending paths:
//! * `extend`: anchor at the cursor if none exists, then move the cursor end.
//! * plain with a selection: arrows collapse onto the edge in the direction of
//!   travel, word and line motions clear the selection and move.
//! * plain without a selection: move.
//!
//! Every motion hides the completion popup.

use super::DispatchResult;
use crate::{CollapseEdge, MotionKind};
use core_complete::CompletionPopup;
use core_state::EditorState;
use core_text::{Buffer, Position, motion};
use tracing::trace;

pub(crate) fn handle_motion(
    kind: MotionKind,
    extend: bool,
    state: &mut EditorState,
    popup: &mut CompletionPopup,
) -> DispatchResult {
    let before = state.cursor();
    popup.hide();
    if extend {
        state.begin_selection();
        move_cursor(kind, state);
    } else {
        let range = state.selection_range();
        state.clear_selection();
        match (range, kind.collapse_edge()) {
            (Some((start, _)), Some(CollapseEdge::Start)) => state.set_cursor(start),
            (Some((_, end)), Some(CollapseEdge::End)) => state.set_cursor(end),
            _ => move_cursor(kind, state),
        }
    }
    let after = state.cursor();
    trace!(target: "actions.dispatch", op = ?kind, extend, line = before.line, col = before.col, to_line = after.line, to_col = after.col, "motion");
    DispatchResult::dirty()
}

fn move_cursor(kind: MotionKind, state: &mut EditorState) {
    let step: fn(&Buffer, &mut Position) = match kind {
        MotionKind::Left => motion::left,
        MotionKind::Right => motion::right,
        MotionKind::Up => motion::up,
        MotionKind::Down => motion::down,
        MotionKind::WordLeft => motion::word_left,
        MotionKind::WordRight => motion::word_right,
        MotionKind::LineStart => motion::line_start,
        MotionKind::LineEnd => motion::line_end,
    };
    let mut pos = state.cursor();
    step(state.buffer(), &mut pos);
    state.set_cursor(pos);
}

/// Anchor at the origin, cursor at the end. No-op on a blank buffer.
pub(crate) fn handle_select_all(
    state: &mut EditorState,
    popup: &mut CompletionPopup,
) -> DispatchResult {
    if state.buffer().is_blank() {
        return DispatchResult::clean();
    }
    popup.hide();
    let end = state.buffer().end_position();
    state.set_anchor(Position::origin());
    state.set_cursor(end);
    trace!(target: "actions.dispatch", op = "select_all", to_line = end.line, to_col = end.col, "motion");
    DispatchResult::dirty()
}
