//! Dispatcher applying `Action` to editor state.
//!
//! Sub-modules:
//! * `motion`    - cursor movement and the shared selection primitive
//! * `edit`      - text mutation (insert/delete/newline/tab/paste)
//! * `clipboard` - copy and cut
//! * `undo`      - undo / redo
//! * `popup`     - completion popup navigation and accept
//!
//! The dispatcher never talks to collaborators. Anything the host must do
//! afterwards (re-run completion, notify the change sink, write the clipboard,
//! submit) is reported in the returned `DispatchResult`.

use crate::Action;
use core_complete::CompletionPopup;
use core_state::EditorState;

mod clipboard;
mod edit;
mod motion;
mod popup;
mod undo;

/// Result of dispatching a single `Action`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchResult {
    /// Something visible changed (cursor, selection, popup, text).
    pub dirty: bool,
    /// Buffer content changed; the change sink should be notified.
    pub edited: bool,
    /// Completion must be re-resolved against the new text.
    pub resolve: bool,
    /// Text to place on the clipboard.
    pub copied: Option<String>,
    /// The full text should be handed to the submit sink.
    pub submit: bool,
}

impl DispatchResult {
    pub fn clean() -> Self {
        Self::default()
    }
    pub fn dirty() -> Self {
        Self {
            dirty: true,
            ..Self::default()
        }
    }
    pub fn edited() -> Self {
        Self {
            dirty: true,
            edited: true,
            resolve: true,
            ..Self::default()
        }
    }
    /// Completion accept: an edit that must not re-open the popup.
    pub fn accepted() -> Self {
        Self {
            dirty: true,
            edited: true,
            ..Self::default()
        }
    }
    pub fn copied(text: String) -> Self {
        Self {
            copied: Some(text),
            ..Self::default()
        }
    }
    pub fn submit() -> Self {
        Self {
            submit: true,
            ..Self::default()
        }
    }
}

/// Apply an action to editor state and the completion popup.
pub fn dispatch(
    action: Action,
    state: &mut EditorState,
    popup: &mut CompletionPopup,
) -> DispatchResult {
    match action {
        Action::Motion { kind, extend } => motion::handle_motion(kind, extend, state, popup),
        Action::SelectAll => motion::handle_select_all(state, popup),
        Action::Edit(kind) => edit::handle_edit(kind, state),
        Action::Copy => clipboard::handle_copy(state),
        Action::Cut => clipboard::handle_cut(state),
        Action::PasteRequest => DispatchResult::clean(),
        Action::Undo => undo::handle_undo(state, popup),
        Action::Redo => undo::handle_redo(state, popup),
        Action::Submit => DispatchResult::submit(),
        Action::Popup(p) => popup::handle_popup(p, state, popup),
    }
}
