//! Completion popup state: visibility, candidates and the selected row.

use tracing::trace;

use crate::resolve::Matches;

/// Default number of candidates shown at once.
pub const MAX_DISPLAY: usize = 8;

/// Logical popup model. Pixel geometry is the renderer's business.
///
/// Selection moves only within the displayed window (the first `max_display`
/// candidates). Moving down past the last displayed row wraps to the top;
/// moving up from the top stays there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionPopup {
    visible: bool,
    prefix: String,
    candidates: Vec<String>,
    selected: usize,
    max_display: usize,
}

impl Default for CompletionPopup {
    fn default() -> Self {
        Self::new(MAX_DISPLAY)
    }
}

impl CompletionPopup {
    pub fn new(max_display: usize) -> Self {
        Self {
            visible: false,
            prefix: String::new(),
            candidates: Vec::new(),
            selected: 0,
            max_display: max_display.max(1),
        }
    }

    /// Show `matches`, selecting the first row. Empty matches hide instead.
    pub fn show(&mut self, matches: Matches) {
        if matches.candidates.is_empty() {
            self.hide();
            return;
        }
        self.prefix = matches.prefix;
        self.candidates = matches.candidates;
        self.selected = 0;
        self.visible = true;
        trace!(target: "complete.popup", candidates = self.candidates.len(), "show");
    }

    pub fn hide(&mut self) {
        if self.visible {
            trace!(target: "complete.popup", "hide");
        }
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Full filtered candidate list.
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Candidates inside the display window.
    pub fn displayed(&self) -> &[String] {
        let n = self.candidates.len().min(self.max_display);
        &self.candidates[..n]
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn max_display(&self) -> usize {
        self.max_display
    }

    pub fn select_next(&mut self) {
        let last = self.displayed().len().saturating_sub(1);
        self.selected = if self.selected < last { self.selected + 1 } else { 0 };
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Select displayed row `index`; false if out of the window.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.displayed().len() {
            self.selected = index;
            true
        } else {
            false
        }
    }

    pub fn selected_candidate(&self) -> Option<&str> {
        if !self.visible {
            return None;
        }
        self.candidates
            .get(self.selected)
            .or_else(|| self.candidates.first())
            .map(String::as_str)
    }

    /// Text to insert when accepting: the selected candidate minus the typed prefix.
    /// `None` when the popup is hidden.
    pub fn accept_suffix(&self) -> Option<String> {
        let candidate = self.selected_candidate()?;
        Some(candidate.get(self.prefix.len()..).unwrap_or_default().to_owned())
    }
}
