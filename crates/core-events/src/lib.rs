//! Core event types and async event sources for the query editor.
//!
//! Input arrives already decoded by the host toolkit: key chords, hold-modifier
//! changes, pointer gestures in grid coordinates, and focus changes. Timed
//! events (cursor blink) come from [`AsyncEventSource`] implementations pushing
//! into a shared bounded channel.

use std::fmt;
use std::str::FromStr;
use tokio::sync::mpsc::Sender;
use tokio::task::JoinHandle;

/// Capacity of the bounded event channel between sources and the event loop.
pub const EVENT_CHANNEL_CAP: usize = 1024;

/// Top-level event enum consumed by the central event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Input(InputEvent),
    /// Periodic tick driving cursor blink.
    Tick,
    Shutdown,
}

// -------------------------------------------------------------------------------------------------
// Async Event Sources
// -------------------------------------------------------------------------------------------------

/// Trait implemented by any async event producer. Implementors hold their configuration and
/// spawn one background task that pushes `Event`s into the shared channel.
pub trait AsyncEventSource: Send + 'static {
    /// Stable identifier used for logging.
    fn name(&self) -> &'static str;
    /// Consume self and spawn the background task. Implementors must stop when
    /// `tx.send(..).await` returns Err (channel closed) and must not busy-loop.
    fn spawn(self: Box<Self>, tx: Sender<Event>) -> JoinHandle<()>;
}

/// Registry of event sources spawned together at startup.
pub struct EventSourceRegistry {
    sources: Vec<Box<dyn AsyncEventSource>>,
}

impl Default for EventSourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSourceRegistry {
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    pub fn register<S: AsyncEventSource>(&mut self, src: S) {
        self.sources.push(Box::new(src));
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Spawn all registered sources, returning their JoinHandles. Each source receives its own
    /// clone of `tx`; the registry is drained so a second call spawns nothing.
    ///
    /// During shutdown the caller drops its last `Sender` before awaiting the handles so the
    /// sources observe the closed channel and exit.
    pub fn spawn_all(&mut self, tx: &Sender<Event>) -> Vec<JoinHandle<()>> {
        let mut out = Vec::with_capacity(self.sources.len());
        for src in self.sources.drain(..) {
            let name = src.name();
            tracing::info!(target: "runtime.events", source = name, "spawning event source");
            out.push(src.spawn(tx.clone()));
        }
        out
    }
}

/// Emits `Event::Tick` every configured interval. Drives cursor blink.
pub struct TickEventSource {
    interval: std::time::Duration,
}

impl TickEventSource {
    pub fn new(interval: std::time::Duration) -> Self {
        Self { interval }
    }
}

impl AsyncEventSource for TickEventSource {
    fn name(&self) -> &'static str {
        "tick"
    }
    fn spawn(self: Box<Self>, tx: Sender<Event>) -> JoinHandle<()> {
        let dur = self.interval;
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(dur);
            // The first tick of a tokio interval completes immediately; blink starts "on".
            interval.tick().await;
            loop {
                interval.tick().await;
                if tx.send(Event::Tick).await.is_err() {
                    break;
                }
            }
        })
    }
}

// -------------------------------------------------------------------------------------------------
// Input
// -------------------------------------------------------------------------------------------------

/// A (line, column) cell already mapped from pixels by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GridPoint {
    pub line: usize,
    pub col: usize,
}

impl GridPoint {
    pub const fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

/// Decoded input events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Key chord (printable characters arrive as `KeyCode::Char`).
    Key(KeyEvent),
    /// Shift pressed or released, for hosts that report it separately from chords.
    HoldChanged(bool),
    /// Pointer tap at a grid cell.
    Tap(GridPoint),
    /// Pointer drag from the gesture start to the current cell.
    Drag { from: GridPoint, to: GridPoint },
    /// Pointer released after a drag.
    DragEnd,
    /// Click on a displayed popup row.
    PopupPick(usize),
    /// Clipboard payload delivered by the host (bracketed paste, drop). Only its
    /// size may be logged.
    Paste(String),
    FocusGained,
    FocusLost,
}

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct KeyModifiers: u8 {
        const CTRL = 0b0000_0001;
        const ALT  = 0b0000_0010;
        const SHIFT= 0b0000_0100;
        /// Command key on macOS.
        const SUPER= 0b0000_1000;
    }
}

impl KeyModifiers {
    /// Ctrl or Cmd: the platform "primary" modifier.
    pub fn has_primary(self) -> bool {
        self.intersects(KeyModifiers::CTRL | KeyModifiers::SUPER)
    }

    /// Any modifier that turns an arrow into a word motion.
    pub fn has_word(self) -> bool {
        self.intersects(KeyModifiers::CTRL | KeyModifiers::ALT | KeyModifiers::SUPER)
    }
}

/// KeyCode enumerates normalized logical keys consumed by higher layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Esc,
    Backspace,
    Delete,
    Tab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyEvent {
    pub const fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    /// Key without modifiers.
    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::empty())
    }

    /// Parse chord notation such as `ctrl+shift+left`, `cmd+z` or `a`.
    pub fn parse(s: &str) -> Result<Self, KeyParseError> {
        s.parse()
    }
}

/// Key notation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyParseError {
    #[error("empty key notation")]
    Empty,
    #[error("unknown modifier `{0}`")]
    UnknownModifier(String),
    #[error("unknown key `{0}`")]
    UnknownKey(String),
}

fn parse_modifier(name: &str) -> Result<KeyModifiers, KeyParseError> {
    match name.to_ascii_lowercase().as_str() {
        "ctrl" | "control" => Ok(KeyModifiers::CTRL),
        "alt" | "option" => Ok(KeyModifiers::ALT),
        "shift" => Ok(KeyModifiers::SHIFT),
        "super" | "cmd" | "meta" => Ok(KeyModifiers::SUPER),
        _ => Err(KeyParseError::UnknownModifier(name.to_owned())),
    }
}

fn parse_code(name: &str) -> Result<KeyCode, KeyParseError> {
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(c));
    }
    let code = match name.to_ascii_lowercase().as_str() {
        "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "backspace" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "tab" => KeyCode::Tab,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "space" => KeyCode::Char(' '),
        "plus" => KeyCode::Char('+'),
        "" => return Err(KeyParseError::Empty),
        _ => return Err(KeyParseError::UnknownKey(name.to_owned())),
    };
    Ok(code)
}

impl FromStr for KeyEvent {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(KeyParseError::Empty);
        }
        let (mods_part, key_part) = match s.rsplit_once('+') {
            // `ctrl++` and a lone `+` name the plus key itself.
            Some((head, "")) => (head.strip_suffix('+').unwrap_or(head), "+"),
            Some((head, key)) => (head, key),
            None => ("", s),
        };
        let mut mods = KeyModifiers::empty();
        for name in mods_part.split('+').filter(|m| !m.is_empty()) {
            mods |= parse_modifier(name)?;
        }
        Ok(KeyEvent::new(parse_code(key_part)?, mods))
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (flag, name) in [
            (KeyModifiers::CTRL, "ctrl"),
            (KeyModifiers::ALT, "alt"),
            (KeyModifiers::SHIFT, "shift"),
            (KeyModifiers::SUPER, "super"),
        ] {
            if self.mods.contains(flag) {
                write!(f, "{name}+")?;
            }
        }
        match self.code {
            KeyCode::Char(' ') => f.write_str("space"),
            KeyCode::Char(c) => write!(f, "{c}"),
            KeyCode::Enter => f.write_str("enter"),
            KeyCode::Esc => f.write_str("esc"),
            KeyCode::Backspace => f.write_str("backspace"),
            KeyCode::Delete => f.write_str("delete"),
            KeyCode::Tab => f.write_str("tab"),
            KeyCode::Up => f.write_str("up"),
            KeyCode::Down => f.write_str("down"),
            KeyCode::Left => f.write_str("left"),
            KeyCode::Right => f.write_str("right"),
            KeyCode::Home => f.write_str("home"),
            KeyCode::End => f.write_str("end"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_single_char_and_named() {
        assert_eq!(KeyEvent::parse("a"), Ok(KeyEvent::plain(KeyCode::Char('a'))));
        assert_eq!(KeyEvent::parse("Enter"), Ok(KeyEvent::plain(KeyCode::Enter)));
        assert_eq!(KeyEvent::parse("space"), Ok(KeyEvent::plain(KeyCode::Char(' '))));
    }

    #[test]
    fn parse_chords() {
        let k = KeyEvent::parse("ctrl+shift+left").unwrap();
        assert_eq!(k.code, KeyCode::Left);
        assert_eq!(k.mods, KeyModifiers::CTRL | KeyModifiers::SHIFT);
        let k = KeyEvent::parse("cmd+z").unwrap();
        assert_eq!(k.mods, KeyModifiers::SUPER);
        assert!(k.mods.has_primary());
    }

    #[test]
    fn parse_plus_key() {
        assert_eq!(KeyEvent::parse("+"), Ok(KeyEvent::plain(KeyCode::Char('+'))));
        let k = KeyEvent::parse("ctrl++").unwrap();
        assert_eq!(k, KeyEvent::new(KeyCode::Char('+'), KeyModifiers::CTRL));
    }

    #[test]
    fn parse_errors() {
        assert_eq!(KeyEvent::parse(""), Err(KeyParseError::Empty));
        assert_eq!(
            KeyEvent::parse("hyper+a"),
            Err(KeyParseError::UnknownModifier("hyper".into()))
        );
        assert_eq!(
            KeyEvent::parse("ctrl+pgup"),
            Err(KeyParseError::UnknownKey("pgup".into()))
        );
        assert_eq!(
            KeyParseError::UnknownKey("x".into()).to_string(),
            "unknown key `x`"
        );
    }

    #[test]
    fn display_round_trips() {
        for s in ["ctrl+shift+left", "alt+backspace", "super+z", "space", "x", "ctrl+enter"] {
            let k = KeyEvent::parse(s).unwrap();
            assert_eq!(k.to_string(), s);
        }
    }

    #[test]
    fn word_modifier_detection() {
        assert!(KeyModifiers::ALT.has_word());
        assert!(!KeyModifiers::ALT.has_primary());
        assert!(!KeyModifiers::SHIFT.has_word());
    }
}

#[cfg(test)]
mod tests_async_sources {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;
    use tokio::sync::mpsc;

    struct MockOnceSource;

    impl AsyncEventSource for MockOnceSource {
        fn name(&self) -> &'static str {
            "mock_once"
        }
        fn spawn(self: Box<Self>, tx: Sender<Event>) -> JoinHandle<()> {
            tokio::spawn(async move {
                let _ = tx.send(Event::Input(InputEvent::FocusGained)).await;
            })
        }
    }

    #[tokio::test]
    async fn registry_spawns_and_emits() {
        let (tx, mut rx) = mpsc::channel::<Event>(8);
        let mut reg = EventSourceRegistry::new();
        reg.register(MockOnceSource);
        reg.register(TickEventSource::new(Duration::from_millis(10)));
        assert_eq!(reg.len(), 2);
        let handles = reg.spawn_all(&tx);
        assert!(reg.is_empty());
        let mut got_input = false;
        let mut got_tick = false;
        let start = std::time::Instant::now();
        while start.elapsed() < Duration::from_millis(500) && (!got_input || !got_tick) {
            if let Ok(Some(ev)) = tokio::time::timeout(Duration::from_millis(20), rx.recv()).await {
                match ev {
                    Event::Input(InputEvent::FocusGained) => got_input = true,
                    Event::Tick => got_tick = true,
                    _ => {}
                }
            }
        }
        assert!(got_input, "expected mock source to emit focus event");
        assert!(got_tick, "expected tick source to emit tick events");

        drop(tx);
        drop(rx);
        for handle in handles {
            let _ = tokio::time::timeout(Duration::from_millis(50), handle).await;
        }
    }

    struct MockCloseSource {
        flag: Arc<AtomicBool>,
    }

    impl AsyncEventSource for MockCloseSource {
        fn name(&self) -> &'static str {
            "mock_close"
        }

        fn spawn(self: Box<Self>, tx: Sender<Event>) -> JoinHandle<()> {
            let flag = self.flag;
            tokio::spawn(async move {
                tx.closed().await;
                flag.store(true, Ordering::SeqCst);
            })
        }
    }

    #[tokio::test]
    async fn registry_sources_exit_on_channel_drop() {
        let (tx, rx) = mpsc::channel::<Event>(8);
        let mut reg = EventSourceRegistry::new();
        let flag = Arc::new(AtomicBool::new(false));
        reg.register(MockCloseSource { flag: flag.clone() });
        let handles = reg.spawn_all(&tx);

        drop(tx);
        drop(rx);

        for handle in handles {
            match tokio::time::timeout(Duration::from_millis(50), handle).await {
                Ok(join_res) => join_res.expect("source task should exit cleanly"),
                Err(_) => panic!("source task did not observe channel closure"),
            }
        }

        assert!(flag.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn tick_source_stops_when_receiver_dropped() {
        let (tx, rx) = mpsc::channel::<Event>(1);
        let mut reg = EventSourceRegistry::new();
        reg.register(TickEventSource::new(Duration::from_millis(5)));
        let handles = reg.spawn_all(&tx);
        drop(tx);
        drop(rx);
        for handle in handles {
            let joined = tokio::time::timeout(Duration::from_millis(200), handle).await;
            assert!(joined.is_ok(), "tick source kept running after channel closed");
        }
    }
}
