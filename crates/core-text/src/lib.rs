//! Line-oriented text buffer for the query editor.
//!
//! Content is stored as a vector of lines without terminators. A buffer with
//! no content is one empty line; the vector is never empty. Columns are byte
//! offsets into a line. The editor is ASCII-oriented, but every mutation
//! snaps columns onto `char` boundaries so multi-byte input cannot split a
//! code point.

/// A text buffer holding one `String` per line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    lines: Vec<String>,
}

/// A position inside a buffer expressed as (line index, byte column within that line).
///
/// Ordering is line first, then column, which is the ordering used for
/// selection ranges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
    pub const fn origin() -> Self {
        Self { line: 0, col: 0 }
    }
    pub fn clamp_to<F>(&mut self, line_count: usize, mut line_len_fn: F)
    where
        F: FnMut(usize) -> usize,
    {
        if line_count == 0 {
            self.line = 0;
            self.col = 0;
            return;
        }
        if self.line >= line_count {
            self.line = line_count - 1;
        }
        let max_len = line_len_fn(self.line);
        if self.col > max_len {
            self.col = max_len;
        }
    }
}

/// Order two positions so the first is never after the second.
pub fn ordered(a: Position, b: Position) -> (Position, Position) {
    if a <= b { (a, b) } else { (b, a) }
}

pub mod motion;

/// Spaces inserted by the tab key.
pub const INDENT: &str = "    ";

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Buffer {
    /// Empty buffer: a single empty line.
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
        }
    }

    /// Split `text` on `\n`. Empty text yields a single empty line.
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(str::to_owned).collect(),
        }
    }

    /// Build from owned lines; an empty vector becomes one empty line.
    pub fn from_lines(lines: Vec<String>) -> Self {
        if lines.is_empty() {
            return Self::new();
        }
        Self { lines }
    }

    /// Total number of lines in the buffer.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, idx: usize) -> Option<&str> {
        self.lines.get(idx).map(String::as_str)
    }

    /// Byte length of a line; zero for out of range indices.
    pub fn line_len(&self, idx: usize) -> usize {
        self.lines.get(idx).map_or(0, String::len)
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Full text, lines joined with `\n`.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// True when the buffer is a single empty line.
    pub fn is_blank(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    /// Position just past the final character of the last line.
    pub fn end_position(&self) -> Position {
        let line = self.lines.len() - 1;
        Position::new(line, self.lines[line].len())
    }

    /// Clamp a position into the buffer, snapping the column down onto a char boundary.
    pub fn clamp(&self, pos: Position) -> Position {
        let mut out = pos;
        out.clamp_to(self.lines.len(), |idx| self.line_len(idx));
        out.col = word::floor_boundary(&self.lines[out.line], out.col);
        out
    }

    /// Replace the whole line vector (used by undo restore and `set_text`).
    pub fn replace_lines(&mut self, lines: Vec<String>) {
        self.lines = if lines.is_empty() {
            vec![String::new()]
        } else {
            lines
        };
    }

    /// Splice a single-line string at `pos`, advancing the column by its byte length.
    pub fn insert_str(&mut self, pos: &mut Position, s: &str) {
        debug_assert!(!s.contains('\n'), "insert_str takes single-line text");
        *pos = self.clamp(*pos);
        self.lines[pos.line].insert_str(pos.col, s);
        pos.col += s.len();
    }

    /// Split the line at `pos`; the tail becomes a new line and the cursor moves to its start.
    pub fn split_line(&mut self, pos: &mut Position) {
        *pos = self.clamp(*pos);
        let tail = self.lines[pos.line].split_off(pos.col);
        self.lines.insert(pos.line + 1, tail);
        pos.line += 1;
        pos.col = 0;
    }

    /// Backspace: remove the character before `pos`, or join this line onto the previous one
    /// when at column zero. Returns false when nothing was removed (start of buffer).
    pub fn delete_before(&mut self, pos: &mut Position) -> bool {
        *pos = self.clamp(*pos);
        if pos.col > 0 {
            let line = &mut self.lines[pos.line];
            let prev = word::prev_boundary(line, pos.col);
            line.replace_range(prev..pos.col, "");
            pos.col = prev;
            return true;
        }
        if pos.line == 0 {
            return false;
        }
        let current = self.lines.remove(pos.line);
        pos.line -= 1;
        pos.col = self.lines[pos.line].len();
        self.lines[pos.line].push_str(&current);
        true
    }

    /// Forward delete: remove the character at `pos`, or join the next line onto this one
    /// when at end of line. The position does not move.
    pub fn delete_at(&mut self, pos: &Position) -> bool {
        let pos = self.clamp(*pos);
        let len = self.lines[pos.line].len();
        if pos.col < len {
            let line = &mut self.lines[pos.line];
            let next = word::next_boundary(line, pos.col);
            line.replace_range(pos.col..next, "");
            return true;
        }
        if pos.line + 1 >= self.lines.len() {
            return false;
        }
        let next = self.lines.remove(pos.line + 1);
        self.lines[pos.line].push_str(&next);
        true
    }

    /// Text between two positions (any order). Interior lines are joined with `\n`.
    pub fn slice(&self, a: Position, b: Position) -> String {
        let (start, end) = ordered(self.clamp(a), self.clamp(b));
        if start.line == end.line {
            return self.lines[start.line][start.col..end.col].to_owned();
        }
        let mut parts: Vec<&str> = Vec::with_capacity(end.line - start.line + 1);
        parts.push(&self.lines[start.line][start.col..]);
        for line in &self.lines[start.line + 1..end.line] {
            parts.push(line);
        }
        parts.push(&self.lines[end.line][..end.col]);
        parts.join("\n")
    }

    /// Remove the text between two positions (any order) and return the start position,
    /// where the cursor belongs after the deletion.
    pub fn delete_range(&mut self, a: Position, b: Position) -> Position {
        let (start, end) = ordered(self.clamp(a), self.clamp(b));
        let tail = self.lines[end.line][end.col..].to_owned();
        let head = &mut self.lines[start.line];
        head.truncate(start.col);
        head.push_str(&tail);
        if end.line > start.line {
            self.lines.drain(start.line + 1..=end.line);
        }
        start
    }

    /// Insert possibly multi-line text at `pos`. The first segment joins the current line's
    /// head, interior segments become whole lines, and the last segment is prepended to the
    /// line's original tail. The position ends just after the inserted text.
    pub fn insert_text(&mut self, pos: &mut Position, text: &str) {
        *pos = self.clamp(*pos);
        let mut segments = text.split('\n');
        let first = segments.next().unwrap_or_default();
        let rest: Vec<&str> = segments.collect();
        if rest.is_empty() {
            self.insert_str(pos, first);
            return;
        }
        let tail = self.lines[pos.line].split_off(pos.col);
        self.lines[pos.line].push_str(first);
        let last_idx = rest.len() - 1;
        let mut inserted: Vec<String> = rest[..last_idx].iter().map(|s| (*s).to_owned()).collect();
        let last = rest[last_idx];
        inserted.push(format!("{last}{tail}"));
        let at = pos.line + 1;
        let count = inserted.len();
        self.lines.splice(at..at, inserted);
        pos.line += count;
        pos.col = last.len();
    }
}

/// Word classification and char-boundary helpers. Pure functions over a single line.
pub mod word {
    /// Word character: ASCII letter, digit, or underscore.
    pub fn is_word_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '_'
    }

    /// Byte flavour of [`is_word_char`].
    pub fn is_word_byte(b: u8) -> bool {
        b.is_ascii_alphanumeric() || b == b'_'
    }

    /// Largest char boundary `<= col` (clamped to the line length).
    pub fn floor_boundary(line: &str, col: usize) -> usize {
        let mut col = col.min(line.len());
        while !line.is_char_boundary(col) {
            col -= 1;
        }
        col
    }

    /// Previous char boundary (0 when already at the start).
    pub fn prev_boundary(line: &str, col: usize) -> usize {
        let col = floor_boundary(line, col);
        line[..col].char_indices().next_back().map_or(0, |(idx, _)| idx)
    }

    /// Next char boundary (`line.len()` when at or past the end).
    pub fn next_boundary(line: &str, col: usize) -> usize {
        let col = floor_boundary(line, col);
        line[col..]
            .chars()
            .next()
            .map_or(line.len(), |c| col + c.len_utf8())
    }

    /// Character immediately left of `col`, if any.
    pub fn char_before(line: &str, col: usize) -> Option<char> {
        line[..floor_boundary(line, col)].chars().next_back()
    }

    /// Character at `col`, if any.
    pub fn char_at(line: &str, col: usize) -> Option<char> {
        line[floor_boundary(line, col)..].chars().next()
    }
}
