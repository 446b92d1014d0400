//! Read-only view-model handed to the rendering collaborator.

use core_complete::CompletionPopup;
use core_text::Position;

/// Logical popup state. Geometry is the renderer's business.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PopupView {
    pub visible: bool,
    /// Displayed window of candidates (at most the configured display count).
    pub candidates: Vec<String>,
    pub selected: usize,
    /// Length of the prefix being completed, for anchoring the popup.
    pub prefix_len: usize,
}

impl PopupView {
    pub(crate) fn from_popup(popup: &CompletionPopup) -> Self {
        if !popup.is_visible() {
            return Self::default();
        }
        Self {
            visible: true,
            candidates: popup.displayed().to_vec(),
            selected: popup.selected(),
            prefix_len: popup.prefix().len(),
        }
    }
}

/// Everything needed to paint the editor at one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSnapshot {
    pub lines: Vec<String>,
    pub cursor: Position,
    /// Ordered selection bounds; `None` when nothing is selected.
    pub selection: Option<(Position, Position)>,
    pub blink_on: bool,
    pub focused: bool,
    /// Present only while the buffer is blank and the editor unfocused.
    pub placeholder: Option<String>,
    pub popup: PopupView,
}

impl EditorSnapshot {
    /// Whether the cursor cell should be drawn right now.
    pub fn cursor_visible(&self) -> bool {
        self.focused && self.blink_on && self.selection.is_none()
    }
}
