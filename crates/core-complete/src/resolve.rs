//! Completion resolution: which mode applies at the cursor, and what to offer.

use tracing::{debug, trace};

use crate::load::LoadTracker;
use crate::path::{dotted_expr_before, word_before};
use crate::source::{CompletionSet, ProjectCatalog};

/// Matching mode chosen for a resolution pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Keyword/identifier matching on the word left of the cursor.
    Flat,
    /// `project.dataset` (depth 2) or `project.dataset.table` (depth 3) path matching.
    Hierarchical { depth: usize },
}

/// Candidates ready to be shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matches {
    pub mode: MatchMode,
    /// Text being completed; accepting a candidate inserts the part after it.
    pub prefix: String,
    /// Filtered candidates in ranking order (may exceed the display window).
    pub candidates: Vec<String>,
}

/// Why no popup is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HideReason {
    /// Flat mode with no word left of the cursor.
    EmptyPrefix,
    /// Nothing matches, or the only match is already fully typed.
    NoMatches,
    /// Path with more than three segments.
    TooDeep,
}

/// Outcome of one resolution pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Show(Matches),
    Hide(HideReason),
    /// The path names a project the catalog has not loaded. `request_load` is
    /// true only on the pass that marked it in flight; the caller must then
    /// start the load (after releasing any lock).
    AwaitProject { project: String, request_load: bool },
}

impl Resolution {
    pub fn is_show(&self) -> bool {
        matches!(self, Resolution::Show(_))
    }

    /// Project to load, if this pass requested one.
    pub fn load_request(&self) -> Option<&str> {
        match self {
            Resolution::AwaitProject {
                project,
                request_load: true,
            } => Some(project),
            _ => None,
        }
    }
}

/// Candidates whose leading bytes equal `prefix` ignoring ASCII case, minus an
/// exact match of a non-empty prefix. Input order is preserved. The match is
/// byte-for-byte, so the accepted suffix always starts at `prefix.len()`.
pub fn filter_candidates<'a, I>(candidates: I, prefix: &str) -> Vec<String>
where
    I: IntoIterator<Item = &'a String>,
{
    candidates
        .into_iter()
        .filter(|c| {
            let head_matches = c
                .get(..prefix.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(prefix));
            head_matches && (prefix.is_empty() || c.len() != prefix.len())
        })
        .cloned()
        .collect()
}

/// Resolve completion for `line` with the cursor at byte `col`.
///
/// A dotted run left of the cursor selects hierarchical mode against `catalog`;
/// otherwise flat mode against `flat`. An unknown project is marked in `tracker`
/// and reported as [`Resolution::AwaitProject`].
pub fn resolve(
    line: &str,
    col: usize,
    flat: &CompletionSet,
    catalog: &ProjectCatalog,
    tracker: &mut LoadTracker,
) -> Resolution {
    let resolution = match dotted_expr_before(line, col) {
        Some(parts) => resolve_path(&parts, catalog, tracker),
        None => resolve_flat(word_before(line, col), flat),
    };
    match &resolution {
        Resolution::Show(m) => {
            debug!(target: "complete.resolve", mode = ?m.mode, prefix_len = m.prefix.len(), candidates = m.candidates.len(), "show")
        }
        Resolution::Hide(reason) => trace!(target: "complete.resolve", ?reason, "hide"),
        Resolution::AwaitProject {
            project,
            request_load,
        } => debug!(target: "complete.resolve", project = %project, request_load, "await_project"),
    }
    resolution
}

fn resolve_flat(prefix: &str, flat: &CompletionSet) -> Resolution {
    if prefix.is_empty() {
        return Resolution::Hide(HideReason::EmptyPrefix);
    }
    let candidates = filter_candidates(flat.entries(), prefix);
    if candidates.is_empty() {
        return Resolution::Hide(HideReason::NoMatches);
    }
    Resolution::Show(Matches {
        mode: MatchMode::Flat,
        prefix: prefix.to_owned(),
        candidates,
    })
}

fn resolve_path(parts: &[String], catalog: &ProjectCatalog, tracker: &mut LoadTracker) -> Resolution {
    let (project, dataset, partial) = match parts {
        [project, partial] => (project, None, partial),
        [project, dataset, partial] => (project, Some(dataset), partial),
        _ => return Resolution::Hide(HideReason::TooDeep),
    };
    if !project.is_empty() && !catalog.contains_project(project) {
        let request_load = tracker.request(project);
        return Resolution::AwaitProject {
            project: project.clone(),
            request_load,
        };
    }
    let candidates = match dataset {
        None => catalog
            .datasets(project)
            .map(|ds| filter_candidates(ds.keys(), partial))
            .unwrap_or_default(),
        Some(dataset) => catalog
            .tables(project, dataset)
            .map(|tables| filter_candidates(tables, partial))
            .unwrap_or_default(),
    };
    if candidates.is_empty() {
        return Resolution::Hide(HideReason::NoMatches);
    }
    Resolution::Show(Matches {
        mode: MatchMode::Hierarchical { depth: parts.len() },
        prefix: partial.clone(),
        candidates,
    })
}
