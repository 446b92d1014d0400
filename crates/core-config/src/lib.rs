//! Configuration loading and parsing.
//!
//! Parses `sqlpad.toml` (or an override path provided by the binary). Every
//! section and key is optional; unknown fields are ignored so files can carry
//! settings for newer versions. A missing file or a parse failure yields the
//! defaults.
//!
//! Raw values are retained in [`ConfigFile`]; [`Config::effective`] produces the
//! clamped [`EditorConfig`] the engine consumes and logs each clamp under the
//! `config` target.

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf, time::Duration};
use tracing::{info, warn};

/// Default undo stack bound.
pub const DEFAULT_UNDO_LIMIT: usize = 500;
/// Default completion popup window.
pub const DEFAULT_MAX_DISPLAY: usize = 8;
/// Upper bound for the popup window.
pub const MAX_DISPLAY_CEILING: usize = 64;
/// Default blink half-period.
pub const DEFAULT_BLINK_MS: u64 = 500;
/// Fastest blink accepted.
pub const MIN_BLINK_MS: u64 = 50;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct UndoConfig {
    #[serde(default = "UndoConfig::default_limit")]
    pub limit: usize,
}

impl Default for UndoConfig {
    fn default() -> Self {
        Self {
            limit: Self::default_limit(),
        }
    }
}

impl UndoConfig {
    const fn default_limit() -> usize {
        DEFAULT_UNDO_LIMIT
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct CompletionConfig {
    #[serde(default = "CompletionConfig::default_max_display")]
    pub max_display: usize,
    /// Extra identifiers merged into the flat completion set.
    #[serde(default)]
    pub identifiers: Vec<String>,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            max_display: Self::default_max_display(),
            identifiers: Vec::new(),
        }
    }
}

impl CompletionConfig {
    const fn default_max_display() -> usize {
        DEFAULT_MAX_DISPLAY
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct CursorConfig {
    #[serde(default = "CursorConfig::default_blink_interval_ms")]
    pub blink_interval_ms: u64,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            blink_interval_ms: Self::default_blink_interval_ms(),
        }
    }
}

impl CursorConfig {
    const fn default_blink_interval_ms() -> u64 {
        DEFAULT_BLINK_MS
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct EditorSection {
    #[serde(default)]
    pub placeholder: String,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(default)]
    pub undo: UndoConfig,
    #[serde(default)]
    pub completion: CompletionConfig,
    #[serde(default)]
    pub cursor: CursorConfig,
    #[serde(default)]
    pub editor: EditorSection,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>, // original file string (optional)
    pub file: ConfigFile,    // parsed (or default) data
    pub path: Option<PathBuf>,
}

/// Clamped settings consumed by the editor engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    pub undo_limit: usize,
    pub max_display: usize,
    pub identifiers: Vec<String>,
    pub blink_interval: Duration,
    pub placeholder: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        ConfigFile::default().effective()
    }
}

/// Best-effort config path: `sqlpad.toml` in the working directory, then the
/// platform config dir (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from("sqlpad.toml");
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("sqlpad").join("sqlpad.toml");
    }
    PathBuf::from("sqlpad.toml")
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            info!(target: "config", path = %path.display(), "config_loaded");
            Ok(Config {
                raw: Some(content),
                file,
                path: Some(path),
            })
        }
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed_using_defaults");
            Ok(Config::default())
        }
    }
}

impl Config {
    /// Clamped engine settings.
    pub fn effective(&self) -> EditorConfig {
        self.file.effective()
    }
}

impl ConfigFile {
    pub fn effective(&self) -> EditorConfig {
        let raw_limit = self.undo.limit;
        let undo_limit = raw_limit.max(1);
        if undo_limit != raw_limit {
            info!(target: "config", raw = raw_limit, clamped = undo_limit, "undo_limit_clamped");
        }

        let raw_display = self.completion.max_display;
        let max_display = raw_display.clamp(1, MAX_DISPLAY_CEILING);
        if max_display != raw_display {
            info!(target: "config", raw = raw_display, clamped = max_display, max = MAX_DISPLAY_CEILING, "completion_max_display_clamped");
        }

        let raw_blink = self.cursor.blink_interval_ms;
        let blink_ms = raw_blink.max(MIN_BLINK_MS);
        if blink_ms != raw_blink {
            info!(target: "config", raw = raw_blink, clamped = blink_ms, min = MIN_BLINK_MS, "blink_interval_clamped");
        }

        EditorConfig {
            undo_limit,
            max_display,
            identifiers: self.completion.identifiers.clone(),
            blink_interval: Duration::from_millis(blink_ms),
            placeholder: self.editor.placeholder.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex, MutexGuard};
    use tracing::Level;
    use tracing::subscriber::with_default;
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone)]
    struct BufferWriter {
        inner: Arc<Mutex<Vec<u8>>>,
    }

    impl BufferWriter {
        fn new() -> (Self, Arc<Mutex<Vec<u8>>>) {
            let buf = Arc::new(Mutex::new(Vec::new()));
            (Self { inner: buf.clone() }, buf)
        }
    }

    struct LockedWriter<'a> {
        guard: MutexGuard<'a, Vec<u8>>,
    }

    impl<'a> Write for LockedWriter<'a> {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.guard.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for BufferWriter {
        type Writer = LockedWriter<'a>;

        fn make_writer(&'a self) -> Self::Writer {
            LockedWriter {
                guard: self.inner.lock().expect("log buffer poisoned"),
            }
        }
    }

    fn capture<F: FnOnce()>(f: F) -> String {
        let (writer, buffer) = BufferWriter::new();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::INFO)
            .with_target(true)
            .with_ansi(false)
            .without_time()
            .with_writer(writer)
            .finish();
        with_default(subscriber, f);
        String::from_utf8(buffer.lock().unwrap().clone()).unwrap()
    }

    fn write_config(body: &str) -> tempfile::NamedTempFile {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), body).unwrap();
        tmp
    }

    #[test]
    fn default_config_when_missing_file() {
        let cfg = load_from(Some(PathBuf::from("__nonexistent_hopefully__.toml"))).unwrap();
        let eff = cfg.effective();
        assert_eq!(eff.undo_limit, 500);
        assert_eq!(eff.max_display, 8);
        assert_eq!(eff.blink_interval, Duration::from_millis(500));
        assert!(eff.identifiers.is_empty());
        assert_eq!(eff, EditorConfig::default());
    }

    #[test]
    fn parses_all_sections() {
        let tmp = write_config(
            "[undo]\nlimit = 50\n[completion]\nmax_display = 5\nidentifiers = [\"user_id\", \"created_at\"]\n[cursor]\nblink_interval_ms = 300\n[editor]\nplaceholder = \"Write a query\"\n",
        );
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.path.as_deref(), Some(tmp.path()));
        let eff = cfg.effective();
        assert_eq!(eff.undo_limit, 50);
        assert_eq!(eff.max_display, 5);
        assert_eq!(eff.identifiers, vec!["user_id".to_string(), "created_at".to_string()]);
        assert_eq!(eff.blink_interval, Duration::from_millis(300));
        assert_eq!(eff.placeholder, "Write a query");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let tmp = write_config("[cursor]\nblink_interval_ms = 250\n[unknown]\nx = 1\n");
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.file.undo.limit, 500);
        assert_eq!(cfg.file.cursor.blink_interval_ms, 250);
    }

    #[test]
    fn parse_error_falls_back_to_defaults() {
        let tmp = write_config("[undo]\nlimit = \"lots\"\n");
        let mut cfg = None;
        let log = capture(|| {
            cfg = Some(load_from(Some(tmp.path().to_path_buf())).unwrap());
        });
        let cfg = cfg.unwrap();
        assert!(cfg.raw.is_none());
        assert_eq!(cfg.file, ConfigFile::default());
        assert!(log.contains("WARN config:"));
        assert!(log.contains("config_parse_failed_using_defaults"));
    }

    #[test]
    fn clamps_out_of_range_values() {
        let tmp = write_config("[undo]\nlimit = 0\n[completion]\nmax_display = 500\n[cursor]\nblink_interval_ms = 1\n");
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        let eff = cfg.effective();
        assert_eq!(eff.undo_limit, 1);
        assert_eq!(eff.max_display, MAX_DISPLAY_CEILING);
        assert_eq!(eff.blink_interval, Duration::from_millis(MIN_BLINK_MS));
    }

    #[test]
    fn clamp_logging_uses_config_target() {
        let tmp = write_config("[completion]\nmax_display = 0\n");
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        let mut eff = None;
        let log = capture(|| eff = Some(cfg.effective()));
        assert!(log.contains("INFO config:"));
        assert!(log.contains("completion_max_display_clamped"));
        assert!(!log.contains("undo_limit_clamped"));
        assert_eq!(eff.map(|e| e.max_display), Some(1));
    }
}
