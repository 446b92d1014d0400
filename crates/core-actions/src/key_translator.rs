//! Key chord to [`Action`] translation.
//!
//! Precedence:
//! * Primary+Enter submits regardless of the popup.
//! * While the popup is visible, Up/Down/Tab/Enter/Esc drive the popup.
//! * Primary chords (Ctrl or Super) map to clipboard, undo and select-all.
//! * Everything else edits or moves. `hold` or SHIFT extends the selection.

use crate::{Action, EditKind, MotionKind, PopupAction};
use core_events::{KeyCode, KeyEvent, KeyModifiers};

pub fn translate_key(key: &KeyEvent, popup_visible: bool, hold: bool) -> Option<Action> {
    let mods = key.mods;
    if matches!(key.code, KeyCode::Enter) && mods.has_primary() {
        return Some(Action::Submit);
    }

    if popup_visible {
        let popup = match key.code {
            KeyCode::Up => Some(PopupAction::Prev),
            KeyCode::Down | KeyCode::Tab => Some(PopupAction::Next),
            KeyCode::Enter => Some(PopupAction::Accept),
            KeyCode::Esc => Some(PopupAction::Dismiss),
            _ => None,
        };
        if let Some(p) = popup {
            return Some(Action::Popup(p));
        }
    }

    if mods.has_primary() {
        if let KeyCode::Char(c) = key.code {
            return primary_chord(c, mods);
        }
    }

    let extend = hold || mods.contains(KeyModifiers::SHIFT);
    let motion = |kind| Some(Action::Motion { kind, extend });
    match key.code {
        KeyCode::Left if mods.has_word() => motion(MotionKind::WordLeft),
        KeyCode::Right if mods.has_word() => motion(MotionKind::WordRight),
        KeyCode::Left => motion(MotionKind::Left),
        KeyCode::Right => motion(MotionKind::Right),
        KeyCode::Up => motion(MotionKind::Up),
        KeyCode::Down => motion(MotionKind::Down),
        KeyCode::Home => motion(MotionKind::LineStart),
        KeyCode::End => motion(MotionKind::LineEnd),
        KeyCode::Backspace if mods.has_primary() => {
            Some(Action::Edit(EditKind::DeleteToLineStart))
        }
        KeyCode::Backspace if mods.contains(KeyModifiers::ALT) => {
            Some(Action::Edit(EditKind::DeleteWordLeft))
        }
        KeyCode::Backspace => Some(Action::Edit(EditKind::Backspace)),
        KeyCode::Delete => Some(Action::Edit(EditKind::Delete)),
        KeyCode::Enter => Some(Action::Edit(EditKind::InsertNewline)),
        KeyCode::Tab => Some(Action::Edit(EditKind::InsertTab)),
        KeyCode::Char(c) if !mods.contains(KeyModifiers::ALT) => {
            Some(Action::Edit(EditKind::InsertChar(c)))
        }
        KeyCode::Char(_) | KeyCode::Esc => None,
    }
}

fn primary_chord(c: char, mods: KeyModifiers) -> Option<Action> {
    let shift = mods.contains(KeyModifiers::SHIFT);
    match c.to_ascii_lowercase() {
        'z' if shift => Some(Action::Redo),
        'z' => Some(Action::Undo),
        'y' => Some(Action::Redo),
        'a' => Some(Action::SelectAll),
        'c' => Some(Action::Copy),
        'x' => Some(Action::Cut),
        'v' => Some(Action::PasteRequest),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> KeyEvent {
        s.parse().unwrap()
    }

    #[test]
    fn plain_arrows_move() {
        assert_eq!(
            translate_key(&key("left"), false, false),
            Some(Action::motion(MotionKind::Left))
        );
        assert_eq!(
            translate_key(&key("end"), false, false),
            Some(Action::motion(MotionKind::LineEnd))
        );
    }

    #[test]
    fn shift_or_hold_extends() {
        assert_eq!(
            translate_key(&key("shift+right"), false, false),
            Some(Action::extend(MotionKind::Right))
        );
        assert_eq!(
            translate_key(&key("down"), false, true),
            Some(Action::extend(MotionKind::Down))
        );
    }

    #[test]
    fn word_modifiers_select_word_motion() {
        for chord in ["ctrl+left", "alt+left", "super+left"] {
            assert_eq!(
                translate_key(&key(chord), false, false),
                Some(Action::motion(MotionKind::WordLeft)),
                "{chord}"
            );
        }
        assert_eq!(
            translate_key(&key("ctrl+shift+right"), false, false),
            Some(Action::extend(MotionKind::WordRight))
        );
    }

    #[test]
    fn popup_keys_take_precedence_when_visible() {
        assert_eq!(
            translate_key(&key("up"), true, false),
            Some(Action::Popup(PopupAction::Prev))
        );
        assert_eq!(
            translate_key(&key("tab"), true, false),
            Some(Action::Popup(PopupAction::Next))
        );
        assert_eq!(
            translate_key(&key("enter"), true, false),
            Some(Action::Popup(PopupAction::Accept))
        );
        assert_eq!(
            translate_key(&key("esc"), true, false),
            Some(Action::Popup(PopupAction::Dismiss))
        );
        assert_eq!(
            translate_key(&key("tab"), false, false),
            Some(Action::Edit(EditKind::InsertTab))
        );
        assert_eq!(translate_key(&key("esc"), false, false), None);
    }

    #[test]
    fn primary_enter_submits_even_with_popup() {
        assert_eq!(translate_key(&key("ctrl+enter"), true, false), Some(Action::Submit));
        assert_eq!(translate_key(&key("cmd+enter"), false, false), Some(Action::Submit));
    }

    #[test]
    fn primary_chords() {
        assert_eq!(translate_key(&key("ctrl+z"), false, false), Some(Action::Undo));
        assert_eq!(translate_key(&key("ctrl+shift+z"), false, false), Some(Action::Redo));
        assert_eq!(translate_key(&key("ctrl+y"), false, false), Some(Action::Redo));
        assert_eq!(translate_key(&key("super+a"), false, false), Some(Action::SelectAll));
        assert_eq!(translate_key(&key("ctrl+c"), false, false), Some(Action::Copy));
        assert_eq!(translate_key(&key("ctrl+x"), false, false), Some(Action::Cut));
        assert_eq!(translate_key(&key("ctrl+v"), false, false), Some(Action::PasteRequest));
        assert_eq!(translate_key(&key("ctrl+q"), false, false), None);
    }

    #[test]
    fn backspace_variants() {
        assert_eq!(
            translate_key(&key("backspace"), false, false),
            Some(Action::Edit(EditKind::Backspace))
        );
        assert_eq!(
            translate_key(&key("ctrl+backspace"), false, false),
            Some(Action::Edit(EditKind::DeleteToLineStart))
        );
        assert_eq!(
            translate_key(&key("alt+backspace"), false, false),
            Some(Action::Edit(EditKind::DeleteWordLeft))
        );
    }

    #[test]
    fn characters_insert() {
        assert_eq!(
            translate_key(&key("shift+S"), false, false),
            Some(Action::Edit(EditKind::InsertChar('S')))
        );
        assert_eq!(
            translate_key(&key("space"), false, true),
            Some(Action::Edit(EditKind::InsertChar(' ')))
        );
        assert_eq!(translate_key(&key("alt+x"), false, false), None);
    }
}
