#![allow(dead_code)] // Shared across integration tests; each test binary uses a subset of helpers.

use core_actions::{Action, DispatchResult, dispatch, translate_key};
use core_complete::{CompletionPopup, MatchMode, Matches};
use core_events::KeyEvent;
use core_state::EditorState;
use core_text::{Buffer, Position};

/// Drives key chords through translation and dispatch the way a host would,
/// resolving paste chords from an in-memory clipboard.
pub struct Harness {
    pub state: EditorState,
    pub popup: CompletionPopup,
    pub clipboard: String,
    pub hold: bool,
}

impl Harness {
    pub fn new(text: &str, cursor: (usize, usize)) -> Self {
        let mut state = EditorState::new(Buffer::from_text(text));
        state.set_cursor(Position::new(cursor.0, cursor.1));
        Self {
            state,
            popup: CompletionPopup::default(),
            clipboard: String::new(),
            hold: false,
        }
    }

    pub fn key(&mut self, chord: &str) -> DispatchResult {
        let key: KeyEvent = chord.parse().expect("valid chord");
        let Some(action) = translate_key(&key, self.popup.is_visible(), self.hold) else {
            return DispatchResult::clean();
        };
        self.act(action)
    }

    pub fn keys(&mut self, chords: &[&str]) {
        for chord in chords {
            self.key(chord);
        }
    }

    pub fn type_str(&mut self, s: &str) {
        for c in s.chars() {
            let chord = if c == ' ' { "space".to_string() } else { c.to_string() };
            self.key(&chord);
        }
    }

    pub fn act(&mut self, action: Action) -> DispatchResult {
        let action = match action {
            Action::PasteRequest => Action::Edit(core_actions::EditKind::Paste(self.clipboard.clone())),
            other => other,
        };
        let result = dispatch(action, &mut self.state, &mut self.popup);
        if let Some(text) = &result.copied {
            self.clipboard = text.clone();
        }
        result
    }

    pub fn show_popup(&mut self, prefix: &str, candidates: &[&str]) {
        self.popup.show(Matches {
            mode: MatchMode::Flat,
            prefix: prefix.to_owned(),
            candidates: candidates.iter().map(|s| (*s).to_owned()).collect(),
        });
    }

    pub fn text(&self) -> String {
        self.state.buffer().text()
    }

    pub fn cursor(&self) -> (usize, usize) {
        let c = self.state.cursor();
        (c.line, c.col)
    }

    pub fn selection(&self) -> Option<((usize, usize), (usize, usize))> {
        self.state
            .selection_range()
            .map(|(a, b)| ((a.line, a.col), (b.line, b.col)))
    }
}
