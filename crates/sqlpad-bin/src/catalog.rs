//! Catalog file and the asynchronous project loader backed by it.
//!
//! ```toml
//! [shop.sales]
//! tables = ["orders", "refunds"]
//! ```

use anyhow::{Context, Result};
use core_complete::Datasets;
use core_editor::{ProjectLoader, SqlEditor, WeakSqlEditor};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tokio::runtime::Handle;
use tracing::{debug, info};

#[derive(Debug, Default, Deserialize)]
struct DatasetEntry {
    #[serde(default)]
    tables: Vec<String>,
}

/// Project name to its datasets, as read from disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFile {
    projects: BTreeMap<String, Datasets>,
}

impl CatalogFile {
    pub fn parse(src: &str) -> Result<Self> {
        let raw: BTreeMap<String, BTreeMap<String, DatasetEntry>> =
            toml::from_str(src).context("catalog is not valid TOML")?;
        let projects = raw
            .into_iter()
            .map(|(project, datasets)| {
                let datasets = datasets
                    .into_iter()
                    .map(|(name, entry)| (name, entry.tables))
                    .collect();
                (project, datasets)
            })
            .collect();
        Ok(Self { projects })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let src = std::fs::read_to_string(path)
            .with_context(|| format!("reading catalog {}", path.display()))?;
        let catalog =
            Self::parse(&src).with_context(|| format!("parsing catalog {}", path.display()))?;
        info!(target: "runtime.loader", path = %path.display(), projects = catalog.projects.len(), "catalog_loaded");
        Ok(catalog)
    }

    pub fn project(&self, name: &str) -> Option<&Datasets> {
        self.projects.get(name)
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

/// Answers `load(project)` from a [`CatalogFile`] on a tokio task.
///
/// The editor is not known when hooks are built, so it is handed over later
/// through [`CatalogLoader::attach`]. The loader lives inside the editor's hooks
/// and therefore keeps only a weak handle. Requests arriving before `attach`, or
/// after the editor is gone, are dropped.
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    catalog: Arc<CatalogFile>,
    editor: Arc<OnceLock<WeakSqlEditor>>,
    runtime: Handle,
    latency: Duration,
}

impl CatalogLoader {
    pub fn new(catalog: CatalogFile, runtime: Handle) -> Self {
        Self {
            catalog: Arc::new(catalog),
            editor: Arc::new(OnceLock::new()),
            runtime,
            latency: Duration::ZERO,
        }
    }

    /// Simulated round-trip before data is delivered.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn attach(&self, editor: &SqlEditor) {
        let _ = self.editor.set(editor.downgrade());
    }
}

impl ProjectLoader for CatalogLoader {
    fn load(&self, project: &str) {
        let catalog = self.catalog.clone();
        let slot = self.editor.clone();
        let latency = self.latency;
        let project = project.to_owned();
        debug!(target: "runtime.loader", project = %project, "load_spawned");
        self.runtime.spawn(async move {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            let Some(editor) = slot.get().and_then(WeakSqlEditor::upgrade) else {
                debug!(target: "runtime.loader", project = %project, "load_dropped_no_editor");
                return;
            };
            match catalog.project(&project) {
                Some(datasets) => editor.insert_project(&project, datasets.clone()),
                None => editor.project_load_failed(&project),
            }
        });
    }
}
