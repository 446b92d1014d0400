//! Extraction of the completion context left of the cursor.

use core_text::word;

fn is_path_byte(b: u8) -> bool {
    word::is_word_byte(b) || b == b'.' || b == b'`' || b == b'-'
}

/// Dotted expression ending at `col`, split on dots.
///
/// Walks left across word characters, dots, backticks and hyphens, strips the
/// backticks and returns the segments. Returns `None` when the run holds no dot,
/// which selects flat mode. `col` past the end of the line is clamped.
pub fn dotted_expr_before(line: &str, col: usize) -> Option<Vec<String>> {
    let col = word::floor_boundary(line, col);
    let bytes = line.as_bytes();
    let mut start = col;
    while start > 0 && is_path_byte(bytes[start - 1]) {
        start -= 1;
    }
    let expr: String = line[start..col].chars().filter(|c| *c != '`').collect();
    if !expr.contains('.') {
        return None;
    }
    Some(expr.split('.').map(str::to_owned).collect())
}

/// Run of word characters immediately left of `col` (the flat-mode prefix).
pub fn word_before(line: &str, col: usize) -> &str {
    let col = word::floor_boundary(line, col);
    let bytes = line.as_bytes();
    let mut start = col;
    while start > 0 && word::is_word_byte(bytes[start - 1]) {
        start -= 1;
    }
    &line[start..col]
}
