//! Editor state: buffer, cursor, selection anchor and undo history.
//!
//! `EditorState` is the single owner of everything an edit may touch. Higher
//! layers (`core-actions` for dispatch, `core-editor` for locking and hooks)
//! never hold a `Buffer` of their own.
//!
//! Invariants:
//! - The buffer always has at least one line.
//! - The cursor and the anchor (when present) are valid positions in the buffer.
//!   Every mutation path re-clamps them; debug builds assert it.
//! - The selection is the ordered range between anchor and cursor. A zero-length
//!   selection is representable (a hold-extended motion that did not move) but
//!   behaves like no selection for extraction and deletion.
//!
//! Undo snapshots are taken by the caller before a destructive edit via
//! [`EditorState::push_snapshot`]; restoring a snapshot clears the selection.

use core_text::{Buffer, Position};
use tracing::trace;

pub mod undo;
use undo::UndoEngine;
pub use undo::{EditSnapshot, UNDO_HISTORY_MAX};

/// Persistent selection anchor. The cursor is the moving end.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SelectionModel {
    pub anchor: Option<Position>,
}

impl SelectionModel {
    pub fn clear(&mut self) {
        self.anchor = None;
    }
    pub fn is_active(&self) -> bool {
        self.anchor.is_some()
    }
}

/// Top-level editable state container.
#[derive(Debug)]
pub struct EditorState {
    buffer: Buffer,
    cursor: Position,
    selection: SelectionModel,
    undo: UndoEngine,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(Buffer::new())
    }
}

impl EditorState {
    /// Create a state over `buffer` with the cursor at the origin.
    pub fn new(buffer: Buffer) -> Self {
        Self::with_undo_limit(buffer, UNDO_HISTORY_MAX)
    }

    pub fn with_undo_limit(buffer: Buffer, limit: usize) -> Self {
        Self {
            buffer,
            cursor: Position::origin(),
            selection: SelectionModel::default(),
            undo: UndoEngine::with_limit(limit),
        }
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Move the cursor to `pos`, clamped into the buffer. Selection is untouched.
    pub fn set_cursor(&mut self, pos: Position) {
        self.cursor = self.buffer.clamp(pos);
    }

    /// Run a buffer mutation with access to the cursor, then re-clamp.
    ///
    /// This is the only mutable path into the buffer; callers are expected to
    /// have pushed a snapshot first when the change is destructive.
    pub fn edit<R>(&mut self, f: impl FnOnce(&mut Buffer, &mut Position) -> R) -> R {
        let out = f(&mut self.buffer, &mut self.cursor);
        self.reclamp();
        out
    }

    /// Replace the whole content, cursor at the end, selection cleared.
    /// Undo history is left alone.
    pub fn replace_text(&mut self, text: &str) {
        self.buffer = Buffer::from_text(text);
        self.cursor = self.buffer.end_position();
        self.selection.clear();
    }

    // --- selection ---

    pub fn anchor(&self) -> Option<Position> {
        self.selection.anchor
    }

    pub fn has_selection(&self) -> bool {
        self.selection.is_active()
    }

    /// Start a selection at the cursor unless one already exists.
    pub fn begin_selection(&mut self) {
        if self.selection.anchor.is_none() {
            self.selection.anchor = Some(self.cursor);
            trace!(target: "state.selection", line = self.cursor.line, col = self.cursor.col, "anchor_set");
        }
    }

    /// Place the anchor explicitly (drag start, select-all).
    pub fn set_anchor(&mut self, pos: Position) {
        self.selection.anchor = Some(self.buffer.clamp(pos));
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Ordered `(start, end)` of the current selection. `None` without an
    /// anchor or when the anchor sits on the cursor.
    pub fn selection_range(&self) -> Option<(Position, Position)> {
        self.selection
            .anchor
            .filter(|anchor| *anchor != self.cursor)
            .map(|anchor| core_text::ordered(anchor, self.cursor))
    }

    /// Selected text; `None` without a selection.
    pub fn selected_text(&self) -> Option<String> {
        self.selection_range()
            .map(|(start, end)| self.buffer.slice(start, end))
    }

    /// Remove the selected range, cursor to its start, selection cleared.
    /// Returns false when nothing was selected; a zero-length anchor is dropped.
    pub fn delete_selection(&mut self) -> bool {
        let Some((start, end)) = self.selection_range() else {
            self.selection.clear();
            return false;
        };
        self.cursor = self.buffer.delete_range(start, end);
        self.selection.clear();
        trace!(target: "state.selection", line = start.line, col = start.col, end_line = end.line, end_col = end.col, "selection_deleted");
        true
    }

    // --- undo ---

    /// Capture the current lines and cursor before a destructive edit.
    pub fn push_snapshot(&mut self) {
        self.undo.push_snapshot(self.cursor, &self.buffer);
    }

    /// Restore the previous snapshot; the selection is cleared. Returns true if restored.
    pub fn undo(&mut self) -> bool {
        let restored = self.undo.undo(&mut self.cursor, &mut self.buffer);
        if restored {
            self.selection.clear();
        }
        restored
    }

    /// Re-apply an undone snapshot; the selection is cleared. Returns true if applied.
    pub fn redo(&mut self) -> bool {
        let restored = self.undo.redo(&mut self.cursor, &mut self.buffer);
        if restored {
            self.selection.clear();
        }
        restored
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.undo_depth()
    }
    pub fn redo_depth(&self) -> usize {
        self.undo.redo_depth()
    }

    fn reclamp(&mut self) {
        let clamped = self.buffer.clamp(self.cursor);
        debug_assert_eq!(clamped, self.cursor, "edit left cursor out of bounds");
        self.cursor = clamped;
        if let Some(anchor) = self.selection.anchor {
            self.selection.anchor = Some(self.buffer.clamp(anchor));
        }
    }
}
