//! Completion popup navigation and accept.
//!
//! Navigation only touches the popup. Accept splices the remaining suffix of
//! the chosen candidate at the cursor as an undoable edit and hides the popup;
//! it does not ask for a new resolution.

use super::DispatchResult;
use crate::PopupAction;
use core_complete::CompletionPopup;
use core_state::EditorState;
use tracing::trace;

pub(crate) fn handle_popup(
    action: PopupAction,
    state: &mut EditorState,
    popup: &mut CompletionPopup,
) -> DispatchResult {
    if !popup.is_visible() {
        return DispatchResult::clean();
    }
    match action {
        PopupAction::Next => {
            popup.select_next();
            DispatchResult::dirty()
        }
        PopupAction::Prev => {
            popup.select_prev();
            DispatchResult::dirty()
        }
        PopupAction::Dismiss => {
            popup.hide();
            DispatchResult::dirty()
        }
        PopupAction::Accept => accept(state, popup),
        PopupAction::Pick(index) => {
            if !popup.select(index) {
                return DispatchResult::clean();
            }
            accept(state, popup)
        }
    }
}

fn accept(state: &mut EditorState, popup: &mut CompletionPopup) -> DispatchResult {
    let suffix = popup.accept_suffix();
    popup.hide();
    let Some(suffix) = suffix.filter(|s| !s.is_empty()) else {
        return DispatchResult::dirty();
    };
    state.push_snapshot();
    state.clear_selection();
    let before = state.cursor();
    state.edit(|buf, pos| buf.insert_text(pos, &suffix));
    trace!(target: "actions.dispatch", op = "accept_completion", line = before.line, col = before.col, inserted = suffix.len(), "edit");
    DispatchResult::accepted()
}
