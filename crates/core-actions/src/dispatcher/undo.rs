//! Undo / Redo dispatch over the snapshot stacks in `EditorState`.

use super::DispatchResult;
use core_complete::CompletionPopup;
use core_state::EditorState;

pub(crate) fn handle_undo(state: &mut EditorState, popup: &mut CompletionPopup) -> DispatchResult {
    let before = state.buffer().line_count();
    if state.undo() {
        popup.hide();
        let after = state.buffer().line_count();
        tracing::trace!(target: "actions.dispatch", op = "undo", line_count_changed = (before != after), "undo");
        DispatchResult::edited()
    } else {
        DispatchResult::clean()
    }
}

pub(crate) fn handle_redo(state: &mut EditorState, popup: &mut CompletionPopup) -> DispatchResult {
    let before = state.buffer().line_count();
    if state.redo() {
        popup.hide();
        let after = state.buffer().line_count();
        tracing::trace!(target: "actions.dispatch", op = "redo", line_count_changed = (before != after), "redo");
        DispatchResult::edited()
    } else {
        DispatchResult::clean()
    }
}
