//! Key script parsing for the headless driver.
//!
//! One step per line. Blank lines and lines starting with `#` are skipped.
//! `type` and `paste` take the rest of the line verbatim (after one separating
//! space); `paste` additionally understands `\n`, `\t` and `\\`.

use core_events::{GridPoint, InputEvent, KeyCode, KeyEvent, KeyParseError};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Insert each character as its own key event.
    Type(String),
    Key(KeyEvent),
    Paste(String),
    Tap(GridPoint),
    Drag { from: GridPoint, to: GridPoint },
    Release,
    Focus(bool),
    Wait(Duration),
}

impl Step {
    /// Input events this step feeds to the editor. `Wait` yields none.
    pub fn events(&self) -> Vec<InputEvent> {
        match self {
            Step::Type(text) => text
                .chars()
                .map(|c| match c {
                    '\n' => KeyEvent::plain(KeyCode::Enter),
                    c => KeyEvent::plain(KeyCode::Char(c)),
                })
                .map(InputEvent::Key)
                .collect(),
            Step::Key(key) => vec![InputEvent::Key(*key)],
            Step::Paste(text) => vec![InputEvent::Paste(text.clone())],
            Step::Tap(at) => vec![InputEvent::Tap(*at)],
            Step::Drag { from, to } => vec![InputEvent::Drag {
                from: *from,
                to: *to,
            }],
            Step::Release => vec![InputEvent::DragEnd],
            Step::Focus(true) => vec![InputEvent::FocusGained],
            Step::Focus(false) => vec![InputEvent::FocusLost],
            Step::Wait(_) => Vec::new(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("line {line}: unknown command `{command}`")]
    UnknownCommand { line: usize, command: String },
    #[error("line {line}: bad key chord")]
    Key {
        line: usize,
        #[source]
        source: KeyParseError,
    },
    #[error("line {line}: `{command}` expects {expected}")]
    BadArguments {
        line: usize,
        command: &'static str,
        expected: &'static str,
    },
}

/// Parse a whole script. Line numbers in errors are 1-based.
pub fn parse_script(src: &str) -> Result<Vec<Step>, ScriptError> {
    let mut steps = Vec::new();
    for (idx, raw) in src.lines().enumerate() {
        if let Some(step) = parse_line(raw, idx + 1)? {
            steps.push(step);
        }
    }
    Ok(steps)
}

fn parse_line(raw: &str, line: usize) -> Result<Option<Step>, ScriptError> {
    let trimmed = raw.trim_start();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    let (command, rest) = match trimmed.split_once(' ') {
        Some((c, r)) => (c, r),
        None => (trimmed.trim_end(), ""),
    };
    let bad = |command: &'static str, expected: &'static str| ScriptError::BadArguments {
        line,
        command,
        expected,
    };
    let step = match command {
        "type" => Step::Type(rest.to_owned()),
        "paste" => Step::Paste(unescape(rest)),
        "key" => Step::Key(
            rest.trim()
                .parse()
                .map_err(|source| ScriptError::Key { line, source })?,
        ),
        "tap" => match numbers(rest).as_deref() {
            Some([l, c]) => Step::Tap(GridPoint::new(*l, *c)),
            _ => return Err(bad("tap", "LINE COL")),
        },
        "drag" => match numbers(rest).as_deref() {
            Some([l0, c0, l1, c1]) => Step::Drag {
                from: GridPoint::new(*l0, *c0),
                to: GridPoint::new(*l1, *c1),
            },
            _ => return Err(bad("drag", "LINE COL LINE COL")),
        },
        "release" => Step::Release,
        "focus" => match rest.trim() {
            "on" => Step::Focus(true),
            "off" => Step::Focus(false),
            _ => return Err(bad("focus", "on|off")),
        },
        "wait" => match numbers(rest).as_deref() {
            Some([ms]) => Step::Wait(Duration::from_millis(*ms as u64)),
            _ => return Err(bad("wait", "MILLISECONDS")),
        },
        other => {
            return Err(ScriptError::UnknownCommand {
                line,
                command: other.to_owned(),
            });
        }
    };
    Ok(Some(step))
}

fn numbers(rest: &str) -> Option<Vec<usize>> {
    rest.split_whitespace().map(|n| n.parse().ok()).collect()
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
