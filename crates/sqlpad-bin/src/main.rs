//! sqlpad headless driver: replays a key script against the query editor.
use anyhow::{Context, Result};
use catalog::{CatalogFile, CatalogLoader};
use clap::Parser;
use core_editor::{Clipboard, EditorHooks, MemoryClipboard, SqlEditor};
use core_events::{
    EVENT_CHANNEL_CAP, Event, EventSourceRegistry, InputEvent, TickEventSource,
};
use script::Step;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Once};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{info, trace};
use tracing_appender::non_blocking::WorkerGuard;

mod catalog;
mod script;

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "sqlpad", version, about = "Headless SQL editor driver")]
struct Args {
    /// Key script to replay.
    pub script: PathBuf,
    /// Configuration file path (overrides discovery of `sqlpad.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
    /// TOML catalog answering project loads.
    #[arg(long = "catalog")]
    pub catalog: Option<PathBuf>,
    /// Extra completion identifiers, comma separated.
    #[arg(long = "identifiers", value_delimiter = ',')]
    pub identifiers: Vec<String>,
    /// Delay before a catalog load is delivered, in milliseconds.
    #[arg(long = "load-latency-ms", default_value_t = 0)]
    pub load_latency_ms: u64,
}

struct AppStartup {
    log_guard: Option<WorkerGuard>,
}

impl AppStartup {
    fn new() -> Self {
        Self { log_guard: None }
    }

    fn run(&mut self) -> Result<()> {
        self.configure_logging()?;
        Self::install_panic_hook();
        info!(target: "runtime", "startup");
        Ok(())
    }

    fn configure_logging(&mut self) -> Result<()> {
        let log_dir = Path::new(".");
        let log_path = log_dir.join("sqlpad.log");
        if log_path.exists() {
            let _ = std::fs::remove_file(&log_path);
        }

        let file_appender = tracing_appender::rolling::never(log_dir, "sqlpad.log");
        let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
        if tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(nb_writer)
            .with_ansi(false)
            .try_init()
            .is_ok()
        {
            self.log_guard = Some(guard);
        }
        Ok(())
    }

    fn install_panic_hook() {
        static HOOK: Once = Once::new();
        HOOK.call_once(|| {
            let default_panic = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                tracing::error!(target: "runtime.panic", ?info, "panic");
                default_panic(info);
            }));
        });
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut startup = AppStartup::new();
    startup.run()?;
    let args = Args::parse();

    let text = run(args).await?;
    let mut out = std::io::stdout().lock();
    writeln!(out, "{text}")?;
    info!(target: "runtime", "shutdown");
    Ok(())
}

async fn run(args: Args) -> Result<String> {
    let src = std::fs::read_to_string(&args.script)
        .with_context(|| format!("reading script {}", args.script.display()))?;
    let steps = script::parse_script(&src)
        .with_context(|| format!("parsing script {}", args.script.display()))?;

    let config = core_config::load_from(args.config.clone())?;
    let mut editor_config = config.effective();
    editor_config.identifiers.extend(args.identifiers);

    let catalog = match &args.catalog {
        Some(path) => CatalogFile::load(path)?,
        None => CatalogFile::default(),
    };
    let loader = CatalogLoader::new(catalog, Handle::current())
        .with_latency(Duration::from_millis(args.load_latency_ms));
    let clipboard = Arc::new(MemoryClipboard::new());
    let hooks = EditorHooks::new()
        .clipboard(clipboard.clone())
        .loader(loader.clone())
        .change_sink(|text: &str| {
            trace!(target: "runtime.editor", bytes = text.len(), "content_changed");
        })
        .submit_sink(|text: &str| {
            info!(target: "runtime.editor", bytes = text.len(), lines = text.lines().count(), "query_submitted");
        });
    let editor = SqlEditor::new(&editor_config, hooks);
    loader.attach(&editor);
    info!(
        target: "runtime.startup",
        script = %args.script.display(),
        steps = steps.len(),
        config_override = args.config.is_some(),
        undo_limit = editor_config.undo_limit,
        "bootstrap_complete"
    );

    let (tx, mut rx) = mpsc::channel::<Event>(EVENT_CHANNEL_CAP);
    let mut registry = EventSourceRegistry::new();
    registry.register(TickEventSource::new(editor_config.blink_interval));
    let mut handles = registry.spawn_all(&tx);
    handles.push(tokio::spawn(feed(steps, tx)));

    let mut repaints = 0usize;
    while let Some(event) = rx.recv().await {
        let dirty = match event {
            // The clipboard write and the paste run back to back on this task.
            Event::Input(InputEvent::Paste(text)) => {
                clipboard.set_text(&text);
                editor.paste()
            }
            Event::Input(input) => editor.handle_input(&input),
            Event::Tick => editor.tick_blink(),
            Event::Shutdown => break,
        };
        if dirty {
            repaints += 1;
        }
    }
    drop(rx);
    for handle in handles {
        let _ = handle.await;
    }
    trace!(target: "runtime.events", repaints, "event_loop_exit");
    Ok(editor.text())
}

/// Push script steps into the event channel, then request shutdown.
async fn feed(steps: Vec<Step>, tx: mpsc::Sender<Event>) {
    for step in steps {
        if let Step::Wait(delay) = step {
            tokio::time::sleep(delay).await;
            continue;
        }
        for event in step.events() {
            if tx.send(Event::Input(event)).await.is_err() {
                return;
            }
        }
    }
    let _ = tx.send(Event::Shutdown).await;
}
