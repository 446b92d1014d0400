//! Collaborator seams.
//!
//! Everything the engine calls out to is handed over at construction in an
//! [`EditorHooks`] value; there is no process-wide callback registry. Hooks are
//! invoked only after the engine lock has been released, so any of them may
//! call back into the same [`crate::SqlEditor`].

use crate::classify::{SqlClassifier, Token};
use std::sync::{Arc, Mutex, PoisonError};

/// Clipboard provider.
pub trait Clipboard: Send + Sync {
    fn get_text(&self) -> String;
    fn set_text(&self, text: &str);
}

impl<T: Clipboard + ?Sized> Clipboard for Arc<T> {
    fn get_text(&self) -> String {
        (**self).get_text()
    }
    fn set_text(&self, text: &str) {
        (**self).set_text(text)
    }
}

/// Process-local clipboard.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    text: Mutex<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Mutex::new(text.into()),
        }
    }
}

impl Clipboard for MemoryClipboard {
    fn get_text(&self) -> String {
        self.text
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
    fn set_text(&self, text: &str) {
        *self.text.lock().unwrap_or_else(PoisonError::into_inner) = text.to_owned();
    }
}

/// Fire-and-forget project catalog loader. Implementations report back through
/// `SqlEditor::insert_project` / `set_project_data` / `project_load_failed`.
pub trait ProjectLoader: Send + Sync {
    fn load(&self, project: &str);
}

impl<F: Fn(&str) + Send + Sync> ProjectLoader for F {
    fn load(&self, project: &str) {
        self(project)
    }
}

/// Receives the full text after every successful edit.
pub trait ChangeSink: Send + Sync {
    fn content_changed(&self, text: &str);
}

impl<F: Fn(&str) + Send + Sync> ChangeSink for F {
    fn content_changed(&self, text: &str) {
        self(text)
    }
}

/// Receives the full text on a submit chord.
pub trait SubmitSink: Send + Sync {
    fn submit(&self, text: &str);
}

impl<F: Fn(&str) + Send + Sync> SubmitSink for F {
    fn submit(&self, text: &str) {
        self(text)
    }
}

/// Display tokenizer. Output concatenates back to the input.
pub trait Classifier: Send + Sync {
    fn classify(&self, text: &str) -> Vec<Token>;
}

/// Collaborators for one editor instance.
pub struct EditorHooks {
    pub(crate) clipboard: Arc<dyn Clipboard>,
    pub(crate) loader: Option<Arc<dyn ProjectLoader>>,
    pub(crate) change_sink: Option<Arc<dyn ChangeSink>>,
    pub(crate) submit_sink: Option<Arc<dyn SubmitSink>>,
    pub(crate) classifier: Arc<dyn Classifier>,
}

impl Default for EditorHooks {
    fn default() -> Self {
        Self {
            clipboard: Arc::new(MemoryClipboard::new()),
            loader: None,
            change_sink: None,
            submit_sink: None,
            classifier: Arc::new(SqlClassifier::new()),
        }
    }
}

impl EditorHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clipboard(mut self, clipboard: impl Clipboard + 'static) -> Self {
        self.clipboard = Arc::new(clipboard);
        self
    }

    pub fn loader(mut self, loader: impl ProjectLoader + 'static) -> Self {
        self.loader = Some(Arc::new(loader));
        self
    }

    pub fn change_sink(mut self, sink: impl ChangeSink + 'static) -> Self {
        self.change_sink = Some(Arc::new(sink));
        self
    }

    pub fn submit_sink(mut self, sink: impl SubmitSink + 'static) -> Self {
        self.submit_sink = Some(Arc::new(sink));
        self
    }

    pub fn classifier(mut self, classifier: impl Classifier + 'static) -> Self {
        self.classifier = Arc::new(classifier);
        self
    }
}

impl std::fmt::Debug for EditorHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorHooks")
            .field("loader", &self.loader.is_some())
            .field("change_sink", &self.change_sink.is_some())
            .field("submit_sink", &self.submit_sink.is_some())
            .finish_non_exhaustive()
    }
}
