//! Editor actions: the intermediate representation between decoded input and
//! state mutation.
//!
//! [`translate_key`] maps a [`core_events::KeyEvent`] to an [`Action`] given the
//! popup visibility and hold flag; [`dispatch`] applies an action to an
//! [`core_state::EditorState`] plus its [`core_complete::CompletionPopup`] and
//! reports what the host has to do next (re-run completion, notify sinks, write
//! the clipboard) in a [`DispatchResult`].
//!
//! Cursor motion goes through one primitive parameterised by `extend`, so the
//! plain and the hold/shift paths share the collapse and anchor rules.

mod dispatcher;
mod key_translator;

pub use dispatcher::{DispatchResult, dispatch};
pub use key_translator::translate_key;

/// Cursor movement kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotionKind {
    Left,
    Right,
    Up,
    Down,
    WordLeft,
    WordRight,
    LineStart,
    LineEnd,
}

impl MotionKind {
    /// Edge a plain motion collapses an existing selection onto, if the motion
    /// collapses at all. Word and line motions clear the selection and move.
    pub fn collapse_edge(self) -> Option<CollapseEdge> {
        match self {
            MotionKind::Left | MotionKind::Up => Some(CollapseEdge::Start),
            MotionKind::Right | MotionKind::Down => Some(CollapseEdge::End),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollapseEdge {
    Start,
    End,
}

/// Buffer mutations. Each snapshots for undo before it changes anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditKind {
    InsertChar(char),
    InsertNewline,
    InsertTab,
    Backspace,
    Delete,
    /// Remove from column zero up to the cursor.
    DeleteToLineStart,
    /// Remove the word-left range.
    DeleteWordLeft,
    /// Insert clipboard text (possibly multi-line).
    Paste(String),
}

/// Completion popup navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupAction {
    Next,
    Prev,
    Accept,
    /// Select a displayed item and accept it (pointer pick).
    Pick(usize),
    Dismiss,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Motion { kind: MotionKind, extend: bool },
    Edit(EditKind),
    SelectAll,
    Copy,
    Cut,
    /// Paste chord before the host has read the clipboard. The host replaces it
    /// with `Edit(EditKind::Paste(text))`; dispatching it directly is a no-op.
    PasteRequest,
    Undo,
    Redo,
    Submit,
    Popup(PopupAction),
}

impl Action {
    pub fn motion(kind: MotionKind) -> Self {
        Action::Motion {
            kind,
            extend: false,
        }
    }

    pub fn extend(kind: MotionKind) -> Self {
        Action::Motion { kind, extend: true }
    }
}
