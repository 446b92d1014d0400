//! Copy and cut. The dispatcher only reports text to copy; writing the
//! clipboard is the host's job once its lock is released.

use super::DispatchResult;
use core_state::EditorState;
use tracing::trace;

pub(crate) fn handle_copy(state: &EditorState) -> DispatchResult {
    match state.selected_text() {
        Some(text) if !text.is_empty() => {
            trace!(target: "actions.dispatch", op = "copy", bytes = text.len(), "clipboard");
            DispatchResult::copied(text)
        }
        _ => DispatchResult::clean(),
    }
}

pub(crate) fn handle_cut(state: &mut EditorState) -> DispatchResult {
    let Some(text) = state.selected_text() else {
        return DispatchResult::clean();
    };
    state.push_snapshot();
    state.delete_selection();
    trace!(target: "actions.dispatch", op = "cut", bytes = text.len(), "clipboard");
    DispatchResult {
        copied: Some(text),
        ..DispatchResult::edited()
    }
}
