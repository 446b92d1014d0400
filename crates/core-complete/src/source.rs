//! Completion sources: the flat keyword/identifier set and the project catalog.

use std::collections::{BTreeMap, HashSet};

use crate::keywords::SQL_KEYWORDS;

/// Deduplicated, sorted flat completion vocabulary.
///
/// Entries are unique under ASCII case-insensitive comparison. When a keyword and a
/// caller identifier collide the keyword spelling is kept. Sorted by byte order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionSet {
    entries: Vec<String>,
}

impl Default for CompletionSet {
    /// Keywords only.
    fn default() -> Self {
        Self::with_identifiers(std::iter::empty::<&str>())
    }
}

impl CompletionSet {
    /// Built-in keywords merged with caller identifiers (column names and the like).
    pub fn with_identifiers<I, S>(identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut entries = Vec::new();
        let keywords = SQL_KEYWORDS.iter().map(|kw| (*kw).to_owned());
        let extra = identifiers.into_iter().map(|s| s.as_ref().to_owned());
        for item in keywords.chain(extra) {
            if seen.insert(item.to_ascii_uppercase()) {
                entries.push(item);
            }
        }
        entries.sort();
        Self { entries }
    }

    /// A set holding exactly `items` (deduplicated and sorted), without keywords.
    pub fn from_entries<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut entries: Vec<String> = items
            .into_iter()
            .map(|s| s.as_ref().to_owned())
            .filter(|s| seen.insert(s.to_ascii_uppercase()))
            .collect();
        entries.sort();
        Self { entries }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Datasets of one project, each holding its table names in stored order.
pub type Datasets = BTreeMap<String, Vec<String>>;

/// Hierarchical source: project → dataset → tables.
///
/// A project missing from the catalog means "not loaded yet", not "empty".
/// A loaded project with no datasets is represented by an empty map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectCatalog {
    projects: BTreeMap<String, Datasets>,
}

impl ProjectCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace one project.
    pub fn insert_project(&mut self, project: impl Into<String>, datasets: Datasets) {
        self.projects.insert(project.into(), datasets);
    }

    pub fn contains_project(&self, project: &str) -> bool {
        self.projects.contains_key(project)
    }

    pub fn datasets(&self, project: &str) -> Option<&Datasets> {
        self.projects.get(project)
    }

    pub fn tables(&self, project: &str, dataset: &str) -> Option<&[String]> {
        self.projects
            .get(project)
            .and_then(|ds| ds.get(dataset))
            .map(Vec::as_slice)
    }

    pub fn project_count(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

impl From<BTreeMap<String, Datasets>> for ProjectCatalog {
    fn from(projects: BTreeMap<String, Datasets>) -> Self {
        Self { projects }
    }
}
