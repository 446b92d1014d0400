//! `SqlEditor`: the lock-guarded query editing engine.
//!
//! All mutable state (buffer, cursor, selection, undo stacks, completion
//! popup, completion sources, load tracker, focus and blink flags) lives in one
//! `Inner` behind a single `Mutex`. Public operations take the lock for their
//! read or mutation, collect the collaborator calls they imply into an
//! `Effects` value, drop the lock, and only then run those calls. A loader or
//! change sink may therefore re-enter the editor from any thread.
//!
//! Three contexts drive an editor: host input (keys, pointer, focus), a blink
//! timer calling [`SqlEditor::tick_blink`], and catalog loaders delivering data
//! through [`SqlEditor::insert_project`] / [`SqlEditor::set_project_data`].
//! Blink never touches the buffer.

pub mod classify;
pub mod hooks;
pub mod snapshot;

pub use classify::{SqlClassifier, Token, TokenCategory};
pub use hooks::{
    ChangeSink, Classifier, Clipboard, EditorHooks, MemoryClipboard, ProjectLoader, SubmitSink,
};
pub use snapshot::{EditorSnapshot, PopupView};

use core_actions::{Action, DispatchResult, EditKind, MotionKind, PopupAction, dispatch, translate_key};
use core_complete::{CompletionPopup, CompletionSet, Datasets, LoadTracker, ProjectCatalog, Resolution, resolve};
use core_config::EditorConfig;
use core_events::{GridPoint, InputEvent, KeyEvent};
use core_state::EditorState;
use core_text::{Buffer, Position};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tracing::{debug, info, trace, warn};

struct Inner {
    state: EditorState,
    popup: CompletionPopup,
    completions: CompletionSet,
    catalog: ProjectCatalog,
    tracker: LoadTracker,
    placeholder: String,
    focused: bool,
    blink_on: bool,
    hold: bool,
    dragging: bool,
}

/// Collaborator calls owed once the lock is released.
#[derive(Debug, Default)]
struct Effects {
    dirty: bool,
    changed: Option<String>,
    load: Option<String>,
    copy: Option<String>,
    submit: Option<String>,
}

enum KeyOutcome {
    Done(Effects),
    /// Paste chord; the clipboard must be read with the lock released.
    Paste,
}

impl Inner {
    fn new(config: &EditorConfig) -> Self {
        Self {
            state: EditorState::with_undo_limit(Buffer::new(), config.undo_limit),
            popup: CompletionPopup::new(config.max_display),
            completions: CompletionSet::with_identifiers(config.identifiers.iter()),
            catalog: ProjectCatalog::new(),
            tracker: LoadTracker::new(),
            placeholder: config.placeholder.clone(),
            focused: false,
            blink_on: true,
            hold: false,
            dragging: false,
        }
    }

    /// Re-run completion at the cursor. Returns a project to load, if any.
    fn resolve(&mut self) -> Option<String> {
        let cursor = self.state.cursor();
        let line = self.state.buffer().line(cursor.line).unwrap_or_default();
        match resolve(line, cursor.col, &self.completions, &self.catalog, &mut self.tracker) {
            Resolution::Show(matches) => {
                self.popup.show(matches);
                None
            }
            Resolution::Hide(_) => {
                self.popup.hide();
                None
            }
            Resolution::AwaitProject {
                project,
                request_load,
            } => {
                self.popup.hide();
                request_load.then_some(project)
            }
        }
    }

    fn apply(&mut self, action: Action, want_text: bool) -> Effects {
        let DispatchResult {
            dirty,
            edited,
            resolve,
            copied,
            submit,
        } = dispatch(action, &mut self.state, &mut self.popup);
        let mut fx = Effects {
            dirty,
            copy: copied,
            ..Effects::default()
        };
        if dirty {
            self.blink_on = true;
        }
        if resolve {
            fx.load = self.resolve();
        }
        if edited && want_text {
            fx.changed = Some(self.state.buffer().text());
        }
        if submit {
            fx.submit = Some(self.state.buffer().text());
        }
        fx
    }

    fn key(&mut self, key: &KeyEvent, want_text: bool) -> KeyOutcome {
        match translate_key(key, self.popup.is_visible(), self.hold) {
            Some(Action::PasteRequest) => KeyOutcome::Paste,
            Some(action) => KeyOutcome::Done(self.apply(action, want_text)),
            None => KeyOutcome::Done(Effects::default()),
        }
    }

    fn snapshot(&self) -> EditorSnapshot {
        let placeholder = (!self.focused && self.state.buffer().is_blank() && !self.placeholder.is_empty())
            .then(|| self.placeholder.clone());
        EditorSnapshot {
            lines: self.state.buffer().lines().to_vec(),
            cursor: self.state.cursor(),
            selection: self.state.selection_range(),
            blink_on: self.blink_on,
            focused: self.focused,
            placeholder,
            popup: PopupView::from_popup(&self.popup),
        }
    }
}

/// Thread-safe handle to one editor. Clones share the same engine.
#[derive(Clone)]
pub struct SqlEditor {
    inner: Arc<Mutex<Inner>>,
    hooks: Arc<EditorHooks>,
}

impl Default for SqlEditor {
    fn default() -> Self {
        Self::new(&EditorConfig::default(), EditorHooks::default())
    }
}

/// Non-owning handle for collaborators that live inside the editor's own hooks
/// (a loader holding a strong handle would keep the editor alive forever).
#[derive(Clone, Default)]
pub struct WeakSqlEditor {
    inner: Weak<Mutex<Inner>>,
    hooks: Weak<EditorHooks>,
}

impl WeakSqlEditor {
    /// The editor, unless every strong handle has been dropped.
    pub fn upgrade(&self) -> Option<SqlEditor> {
        Some(SqlEditor {
            inner: self.inner.upgrade()?,
            hooks: self.hooks.upgrade()?,
        })
    }
}

impl std::fmt::Debug for WeakSqlEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeakSqlEditor")
            .field("alive", &(self.inner.strong_count() > 0))
            .finish()
    }
}

impl std::fmt::Debug for SqlEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqlEditor")
            .field("hooks", &self.hooks)
            .finish_non_exhaustive()
    }
}

impl SqlEditor {
    pub fn new(config: &EditorConfig, hooks: EditorHooks) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner::new(config))),
            hooks: Arc::new(hooks),
        }
    }

    pub fn downgrade(&self) -> WeakSqlEditor {
        WeakSqlEditor {
            inner: Arc::downgrade(&self.inner),
            hooks: Arc::downgrade(&self.hooks),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run collaborator calls. Must be called without the lock held.
    fn run(&self, fx: Effects) -> bool {
        if let Some(text) = fx.copy {
            trace!(target: "editor", bytes = text.len(), "clipboard_set");
            self.hooks.clipboard.set_text(&text);
        }
        if let Some(project) = fx.load {
            debug!(target: "editor", project = %project, "project_load_requested");
            if let Some(loader) = &self.hooks.loader {
                loader.load(&project);
            }
        }
        if let Some(text) = fx.changed {
            if let Some(sink) = &self.hooks.change_sink {
                trace!(target: "editor", bytes = text.len(), "content_changed");
                sink.content_changed(&text);
            }
        }
        if let Some(text) = fx.submit {
            if let Some(sink) = &self.hooks.submit_sink {
                debug!(target: "editor", bytes = text.len(), "submit");
                sink.submit(&text);
            }
        }
        fx.dirty
    }

    fn with_inner(&self, f: impl FnOnce(&mut Inner) -> Effects) -> bool {
        let fx = {
            let mut inner = self.lock();
            f(&mut inner)
        };
        self.run(fx)
    }

    // --- input ---

    /// Apply an action. Paste requests read the clipboard before the lock is taken.
    /// Returns true when the view should be repainted.
    pub fn apply(&self, action: Action) -> bool {
        let action = match action {
            Action::PasteRequest => Action::Edit(EditKind::Paste(self.hooks.clipboard.get_text())),
            other => other,
        };
        let want_text = self.hooks.change_sink.is_some();
        self.with_inner(|inner| inner.apply(action, want_text))
    }

    /// Translate a key chord against the current popup and hold state and apply it.
    /// Translation and dispatch happen under one lock; only a paste chord leaves
    /// it, to read the clipboard.
    pub fn handle_key(&self, key: &KeyEvent) -> bool {
        let want_text = self.hooks.change_sink.is_some();
        let mut paste = false;
        let dirty = self.with_inner(|inner| match inner.key(key, want_text) {
            KeyOutcome::Done(fx) => fx,
            KeyOutcome::Paste => {
                paste = true;
                Effects::default()
            }
        });
        if paste {
            self.paste()
        } else {
            dirty
        }
    }

    /// Route a decoded host event.
    pub fn handle_input(&self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Key(key) => self.handle_key(key),
            InputEvent::HoldChanged(held) => {
                self.set_hold(*held);
                false
            }
            InputEvent::Tap(at) => self.tap(*at),
            InputEvent::Drag { from, to } => self.drag(*from, *to),
            InputEvent::DragEnd => self.drag_end(),
            InputEvent::PopupPick(index) => self.accept_candidate(*index),
            InputEvent::Paste(text) => self.paste_text(text),
            InputEvent::FocusGained => self.focus_gained(),
            InputEvent::FocusLost => self.focus_lost(),
        }
    }

    pub fn insert_char(&self, c: char) -> bool {
        self.apply(Action::Edit(EditKind::InsertChar(c)))
    }

    pub fn backspace(&self) -> bool {
        self.apply(Action::Edit(EditKind::Backspace))
    }

    pub fn delete_forward(&self) -> bool {
        self.apply(Action::Edit(EditKind::Delete))
    }

    pub fn split_line(&self) -> bool {
        self.apply(Action::Edit(EditKind::InsertNewline))
    }

    pub fn insert_tab(&self) -> bool {
        self.apply(Action::Edit(EditKind::InsertTab))
    }

    /// Move the cursor; `extend` grows the selection instead of collapsing it.
    pub fn move_cursor(&self, kind: MotionKind, extend: bool) -> bool {
        self.apply(Action::Motion { kind, extend })
    }

    pub fn select_all(&self) -> bool {
        self.apply(Action::SelectAll)
    }

    pub fn copy(&self) -> bool {
        self.apply(Action::Copy)
    }

    pub fn cut(&self) -> bool {
        self.apply(Action::Cut)
    }

    /// Paste the clipboard contents.
    pub fn paste(&self) -> bool {
        self.apply(Action::PasteRequest)
    }

    /// Paste a payload the host already holds, bypassing the clipboard.
    pub fn paste_text(&self, text: &str) -> bool {
        self.apply(Action::Edit(EditKind::Paste(text.to_owned())))
    }

    pub fn undo(&self) -> bool {
        self.apply(Action::Undo)
    }

    pub fn redo(&self) -> bool {
        self.apply(Action::Redo)
    }

    pub fn submit(&self) -> bool {
        self.apply(Action::Submit)
    }

    pub fn accept_completion(&self) -> bool {
        self.apply(Action::Popup(PopupAction::Accept))
    }

    /// Select the displayed candidate at `index` and accept it.
    pub fn accept_candidate(&self, index: usize) -> bool {
        self.apply(Action::Popup(PopupAction::Pick(index)))
    }

    pub fn dismiss_completion(&self) -> bool {
        self.apply(Action::Popup(PopupAction::Dismiss))
    }

    pub fn set_hold(&self, held: bool) {
        self.lock().hold = held;
    }

    pub fn tap(&self, at: GridPoint) -> bool {
        let mut inner = self.lock();
        let pos = inner.state.buffer().clamp(Position::new(at.line, at.col));
        inner.popup.hide();
        inner.state.clear_selection();
        inner.state.set_cursor(pos);
        inner.dragging = false;
        inner.blink_on = true;
        trace!(target: "editor", line = pos.line, col = pos.col, "tap");
        true
    }

    /// Pointer drag. The first event of a gesture anchors at `from`.
    pub fn drag(&self, from: GridPoint, to: GridPoint) -> bool {
        let mut inner = self.lock();
        if !inner.dragging {
            inner.dragging = true;
            inner.popup.hide();
            inner.state.set_anchor(Position::new(from.line, from.col));
        }
        inner.state.set_cursor(Position::new(to.line, to.col));
        inner.blink_on = true;
        true
    }

    /// End a drag gesture; a zero-length selection is dropped.
    pub fn drag_end(&self) -> bool {
        let mut inner = self.lock();
        inner.dragging = false;
        if inner.state.selection_range().is_none() {
            inner.state.clear_selection();
        }
        true
    }

    pub fn focus_gained(&self) -> bool {
        let mut inner = self.lock();
        inner.focused = true;
        inner.blink_on = true;
        debug!(target: "editor", "focus_gained");
        true
    }

    pub fn focus_lost(&self) -> bool {
        let mut inner = self.lock();
        inner.popup.hide();
        inner.state.clear_selection();
        inner.hold = false;
        inner.dragging = false;
        inner.focused = false;
        debug!(target: "editor", "focus_lost");
        true
    }

    /// Toggle cursor blink. Does nothing while unfocused; returns whether it toggled.
    pub fn tick_blink(&self) -> bool {
        let mut inner = self.lock();
        if !inner.focused {
            return false;
        }
        inner.blink_on = !inner.blink_on;
        true
    }

    // --- content ---

    /// Replace the content. Cursor goes to the end; undo history is kept.
    pub fn set_text(&self, text: &str) {
        let want_text = self.hooks.change_sink.is_some();
        self.with_inner(|inner| {
            inner.state.replace_text(text);
            inner.popup.hide();
            Effects {
                dirty: true,
                changed: want_text.then(|| inner.state.buffer().text()),
                ..Effects::default()
            }
        });
    }

    pub fn text(&self) -> String {
        self.lock().state.buffer().text()
    }

    pub fn set_placeholder(&self, placeholder: &str) {
        self.lock().placeholder = placeholder.to_owned();
    }

    pub fn snapshot(&self) -> EditorSnapshot {
        self.lock().snapshot()
    }

    /// Display tokens for the current text.
    pub fn classify(&self) -> Vec<Token> {
        let text = self.text();
        self.hooks.classifier.classify(&text)
    }

    pub fn undo_depth(&self) -> usize {
        self.lock().state.undo_depth()
    }

    pub fn redo_depth(&self) -> usize {
        self.lock().state.redo_depth()
    }

    // --- completion sources ---

    /// Rebuild the flat set from keywords plus `identifiers`.
    pub fn set_completions<I, S>(&self, identifiers: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set = CompletionSet::with_identifiers(identifiers);
        let mut inner = self.lock();
        debug!(target: "editor", entries = set.len(), "completions_set");
        inner.completions = set;
    }

    /// Replace the whole hierarchical source, forget in-flight loads and
    /// re-resolve so a waiting popup can appear.
    pub fn set_project_data(&self, catalog: ProjectCatalog) {
        self.with_inner(|inner| {
            info!(target: "editor", projects = catalog.project_count(), "project_data_replaced");
            inner.catalog = catalog;
            inner.tracker.reset();
            Effects {
                dirty: true,
                load: inner.resolve(),
                ..Effects::default()
            }
        });
    }

    /// Merge one loaded project and re-resolve. In-flight marks are kept.
    pub fn insert_project(&self, project: &str, datasets: Datasets) {
        self.with_inner(|inner| {
            info!(target: "editor", project, datasets = datasets.len(), "project_data_arrived");
            inner.catalog.insert_project(project, datasets);
            Effects {
                dirty: true,
                load: inner.resolve(),
                ..Effects::default()
            }
        });
    }

    /// Report a failed load so a later keystroke may request the project again.
    pub fn project_load_failed(&self, project: &str) {
        let released = self.lock().tracker.release(project);
        warn!(target: "editor", project, released, "project_load_failed");
    }
}
