//! Autocomplete for the query editor.
//!
//! Two mutually exclusive matching modes are resolved from the text left of
//! the cursor:
//!
//! - Flat: the word before the cursor is matched against a [`CompletionSet`]
//!   of keywords and caller identifiers.
//! - Hierarchical: a dotted run (`project.` / `project.dataset.`) is matched
//!   against a [`ProjectCatalog`]. A project the catalog does not hold yet is
//!   handed to the [`LoadTracker`], which lets each project be requested once.
//!
//! [`resolve`] is pure apart from the tracker; it never calls a loader. The
//! caller starts loads from [`Resolution::load_request`] once it has released
//! whatever lock guards the editor.

pub mod keywords;
pub mod load;
pub mod path;
pub mod popup;
pub mod resolve;
pub mod source;

pub use load::LoadTracker;
pub use path::{dotted_expr_before, word_before};
pub use popup::{CompletionPopup, MAX_DISPLAY};
pub use resolve::{HideReason, MatchMode, Matches, Resolution, filter_candidates, resolve};
pub use source::{CompletionSet, Datasets, ProjectCatalog};
