//! Text edit action handling (insert/backspace/delete/newline/tab/paste).
//!
//! Every change snapshots before it mutates and replaces an existing selection
//! first. Edits that would change nothing (backspace at the origin, delete at
//! the end, an empty paste) return early without a snapshot. Any anchor left
//! over after an edit is cleared.

use super::DispatchResult;
use crate::EditKind;
use core_state::EditorState;
use core_text::{INDENT, Position, motion};
use tracing::trace;

pub(crate) fn handle_edit(kind: EditKind, state: &mut EditorState) -> DispatchResult {
    let before = state.cursor();
    let op = match kind {
        // Line breaks never land inside a line.
        EditKind::InsertNewline | EditKind::InsertChar('\n' | '\r') => {
            state.push_snapshot();
            state.delete_selection();
            state.edit(|buf, pos| buf.split_line(pos));
            "insert_newline"
        }
        EditKind::InsertChar(c) => {
            let mut utf8 = [0u8; 4];
            replace_selection_with(state, c.encode_utf8(&mut utf8));
            "insert_char"
        }
        EditKind::InsertTab => {
            replace_selection_with(state, INDENT);
            "insert_tab"
        }
        EditKind::Paste(text) => {
            if text.is_empty() {
                return DispatchResult::clean();
            }
            state.push_snapshot();
            state.delete_selection();
            state.edit(|buf, pos| buf.insert_text(pos, &text));
            trace!(target: "actions.dispatch", op = "paste", bytes = text.len(), lines = text.split('\n').count(), "edit");
            "paste"
        }
        EditKind::Backspace => {
            if !delete_selected(state) {
                if state.cursor() == Position::origin() {
                    return DispatchResult::clean();
                }
                state.push_snapshot();
                state.edit(|buf, pos| buf.delete_before(pos));
            }
            "backspace"
        }
        EditKind::Delete => {
            if !delete_selected(state) {
                if state.cursor() == state.buffer().end_position() {
                    return DispatchResult::clean();
                }
                state.push_snapshot();
                state.edit(|buf, pos| buf.delete_at(pos));
            }
            "delete"
        }
        EditKind::DeleteToLineStart => {
            if !delete_selected(state) {
                let cur = state.cursor();
                if cur.col == 0 {
                    return DispatchResult::clean();
                }
                delete_back_to(state, Position::new(cur.line, 0));
            }
            "delete_to_line_start"
        }
        EditKind::DeleteWordLeft => {
            if !delete_selected(state) {
                let cur = state.cursor();
                let mut target = cur;
                motion::word_left(state.buffer(), &mut target);
                if target == cur {
                    return DispatchResult::clean();
                }
                delete_back_to(state, target);
            }
            "delete_word_left"
        }
    };
    state.clear_selection();
    let after = state.cursor();
    trace!(target: "actions.dispatch", op, line = before.line, col = before.col, to_line = after.line, to_col = after.col, "edit");
    DispatchResult::edited()
}

/// Snapshot and remove a non-empty selection. A zero-length anchor is dropped
/// and reported as no selection.
fn delete_selected(state: &mut EditorState) -> bool {
    if state.selection_range().is_none() {
        state.clear_selection();
        return false;
    }
    state.push_snapshot();
    state.delete_selection()
}

fn replace_selection_with(state: &mut EditorState, s: &str) {
    state.push_snapshot();
    state.delete_selection();
    state.edit(|buf, pos| buf.insert_str(pos, s));
}

fn delete_back_to(state: &mut EditorState, target: Position) {
    state.push_snapshot();
    state.edit(|buf, pos| *pos = buf.delete_range(target, *pos));
}
