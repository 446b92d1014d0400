use core_text::{Buffer, Position};
use std::collections::VecDeque;
use tracing::trace;

/// Default number of snapshots retained in undo history.
pub const UNDO_HISTORY_MAX: usize = 500;

/// A full-state snapshot for undo/redo: every line plus the cursor at capture time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSnapshot {
    pub buffer: Buffer,
    pub cursor: Position,
}

/// Bounded linear undo history.
///
/// `push_snapshot` is called before every destructive edit. Once the undo stack
/// exceeds `limit` the oldest snapshot is evicted. Any new snapshot clears the
/// redo stack.
#[derive(Debug)]
pub struct UndoEngine {
    undo_stack: VecDeque<EditSnapshot>,
    redo_stack: Vec<EditSnapshot>,
    limit: usize,
}

impl Default for UndoEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl UndoEngine {
    pub fn new() -> Self {
        Self::with_limit(UNDO_HISTORY_MAX)
    }

    /// Engine retaining at most `limit` snapshots (at least one).
    pub fn with_limit(limit: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            limit: limit.max(1),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn push_snapshot(&mut self, cursor: Position, buffer: &Buffer) {
        self.undo_stack.push_back(EditSnapshot {
            buffer: buffer.clone(),
            cursor,
        });
        trace!(target: "state.undo", undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len(), lines = buffer.line_count(), "push_snapshot");
        while self.undo_stack.len() > self.limit {
            self.undo_stack.pop_front();
            trace!(target: "state.undo", limit = self.limit, "undo_stack_trimmed");
        }
        if !self.redo_stack.is_empty() {
            self.redo_stack.clear();
            trace!(target: "state.undo", "redo_stack_cleared_on_new_edit");
        }
    }

    /// Restore the most recent snapshot, saving the current state for redo.
    /// Returns false when there is nothing to undo.
    pub fn undo(&mut self, cursor: &mut Position, buffer: &mut Buffer) -> bool {
        let Some(last) = self.undo_stack.pop_back() else {
            return false;
        };
        trace!(target: "state.undo", undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len(), "undo_pop");
        let current = EditSnapshot {
            buffer: std::mem::replace(buffer, last.buffer),
            cursor: std::mem::replace(cursor, last.cursor),
        };
        self.redo_stack.push(current);
        trace!(target: "state.undo", redo_depth = self.redo_stack.len(), "redo_push_from_undo");
        true
    }

    /// Re-apply the most recently undone state. Returns false when there is nothing to redo.
    pub fn redo(&mut self, cursor: &mut Position, buffer: &mut Buffer) -> bool {
        let Some(next) = self.redo_stack.pop() else {
            return false;
        };
        trace!(target: "state.undo", redo_depth = self.redo_stack.len(), undo_depth = self.undo_stack.len(), "redo_pop");
        let current = EditSnapshot {
            buffer: std::mem::replace(buffer, next.buffer),
            cursor: std::mem::replace(cursor, next.cursor),
        };
        // Redo never exceeds the bound: the entry it pushes was popped by an earlier undo.
        self.undo_stack.push_back(current);
        trace!(target: "state.undo", undo_depth = self.undo_stack.len(), "undo_push_from_redo");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undo_on_empty_history_is_noop() {
        let mut eng = UndoEngine::new();
        let mut buf = Buffer::from_text("x");
        let mut cur = Position::new(0, 1);
        assert!(!eng.undo(&mut cur, &mut buf));
        assert!(!eng.redo(&mut cur, &mut buf));
        assert_eq!(buf.text(), "x");
    }

    #[test]
    fn undo_then_redo_round_trips() {
        let mut eng = UndoEngine::new();
        let mut buf = Buffer::from_text("ab");
        let mut cur = Position::new(0, 2);
        eng.push_snapshot(cur, &buf);
        buf.insert_str(&mut cur, "c");
        let edited = (buf.clone(), cur);

        assert!(eng.undo(&mut cur, &mut buf));
        assert_eq!(buf.text(), "ab");
        assert_eq!(cur, Position::new(0, 2));
        assert!(eng.redo(&mut cur, &mut buf));
        assert_eq!((buf, cur), edited);
    }

    #[test]
    fn limit_evicts_oldest() {
        let mut eng = UndoEngine::with_limit(3);
        let mut buf = Buffer::new();
        let mut cur = Position::origin();
        for _ in 0..5 {
            eng.push_snapshot(cur, &buf);
            buf.insert_str(&mut cur, "a");
        }
        assert_eq!(eng.undo_depth(), 3);
        while eng.undo(&mut cur, &mut buf) {}
        // Oldest retained snapshot was taken before the third edit.
        assert_eq!(buf.text(), "aa");
    }

    #[test]
    fn zero_limit_is_raised_to_one() {
        assert_eq!(UndoEngine::with_limit(0).limit(), 1);
    }

    #[test]
    fn new_snapshot_clears_redo() {
        let mut eng = UndoEngine::new();
        let mut buf = Buffer::new();
        let mut cur = Position::origin();
        eng.push_snapshot(cur, &buf);
        buf.insert_str(&mut cur, "a");
        assert!(eng.undo(&mut cur, &mut buf));
        assert_eq!(eng.redo_depth(), 1);
        eng.push_snapshot(cur, &buf);
        assert_eq!(eng.redo_depth(), 0);
    }
}
