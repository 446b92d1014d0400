//! Cursor motion helpers.
//!
//! These operate purely on a `Buffer` + `Position` pair and are free of
//! selection or undo state. Selection-aware motion (extend vs. collapse) is
//! layered on top in `core-actions`.
//!
//! Horizontal motions wrap across line boundaries. Vertical motions keep the
//! column when the target line is long enough and clamp to its end otherwise.

use crate::{Buffer, Position, word};

/// Move left one character; at column zero wrap to the end of the previous line.
pub fn left(buf: &Buffer, pos: &mut Position) {
    if pos.col > 0 {
        let line = buf.line(pos.line).unwrap_or_default();
        pos.col = word::prev_boundary(line, pos.col);
    } else if pos.line > 0 {
        pos.line -= 1;
        pos.col = buf.line_len(pos.line);
    }
}

/// Move right one character; at end of line wrap to column zero of the next line.
pub fn right(buf: &Buffer, pos: &mut Position) {
    let len = buf.line_len(pos.line);
    if pos.col < len {
        let line = buf.line(pos.line).unwrap_or_default();
        pos.col = word::next_boundary(line, pos.col);
    } else if pos.line + 1 < buf.line_count() {
        pos.line += 1;
        pos.col = 0;
    }
}

/// Move up one line, clamping the column to the target line.
pub fn up(buf: &Buffer, pos: &mut Position) {
    if pos.line > 0 {
        pos.line -= 1;
        *pos = buf.clamp(*pos);
    }
}

/// Move down one line, clamping the column to the target line.
pub fn down(buf: &Buffer, pos: &mut Position) {
    if pos.line + 1 < buf.line_count() {
        pos.line += 1;
        *pos = buf.clamp(*pos);
    }
}

/// Move to start of line.
pub fn line_start(_buf: &Buffer, pos: &mut Position) {
    pos.col = 0;
}

/// Move to end of line.
pub fn line_end(buf: &Buffer, pos: &mut Position) {
    pos.col = buf.line_len(pos.line);
}

/// Move to the start of the previous word.
///
/// At column zero a single step crosses to the end of the previous line and
/// stops there. Otherwise skip non-word characters leftwards, then word
/// characters.
pub fn word_left(buf: &Buffer, pos: &mut Position) {
    if pos.col == 0 {
        if pos.line > 0 {
            pos.line -= 1;
            pos.col = buf.line_len(pos.line);
        }
        return;
    }
    let line = buf.line(pos.line).unwrap_or_default();
    let mut col = word::floor_boundary(line, pos.col);
    while let Some(c) = word::char_before(line, col) {
        if word::is_word_char(c) {
            break;
        }
        col -= c.len_utf8();
    }
    while let Some(c) = word::char_before(line, col) {
        if !word::is_word_char(c) {
            break;
        }
        col -= c.len_utf8();
    }
    pos.col = col;
}

/// Move to the end of the next word.
///
/// At end of line a single step crosses to column zero of the next line and
/// stops there. Otherwise skip non-word characters rightwards, then word
/// characters.
pub fn word_right(buf: &Buffer, pos: &mut Position) {
    let len = buf.line_len(pos.line);
    if pos.col >= len {
        if pos.line + 1 < buf.line_count() {
            pos.line += 1;
            pos.col = 0;
        }
        return;
    }
    let line = buf.line(pos.line).unwrap_or_default();
    let mut col = word::floor_boundary(line, pos.col);
    while let Some(c) = word::char_at(line, col) {
        if word::is_word_char(c) {
            break;
        }
        col += c.len_utf8();
    }
    while let Some(c) = word::char_at(line, col) {
        if !word::is_word_char(c) {
            break;
        }
        col += c.len_utf8();
    }
    pos.col = col;
}
