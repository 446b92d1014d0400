//! Editor operations seen from the host: sinks, clipboard, pointer, config.

use core_config::EditorConfig;
use core_editor::{Clipboard, EditorHooks, MemoryClipboard, SqlEditor, TokenCategory};
use core_events::{GridPoint, InputEvent, KeyEvent};
use core_text::Position;
use pretty_assertions::assert_eq;
use std::sync::{Arc, Mutex};

fn key(chord: &str) -> InputEvent {
    InputEvent::Key(chord.parse::<KeyEvent>().unwrap())
}

fn recording() -> (Arc<Mutex<Vec<String>>>, impl Fn(&str) + Send + Sync + 'static) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    (seen, move |text: &str| sink.lock().unwrap().push(text.to_owned()))
}

#[test]
fn change_sink_sees_full_text_after_each_edit() {
    let (seen, sink) = recording();
    let ed = SqlEditor::new(&EditorConfig::default(), EditorHooks::new().change_sink(sink));
    ed.insert_char('a');
    ed.split_line();
    ed.insert_char('b');
    ed.handle_input(&key("left"));
    ed.backspace();
    assert_eq!(
        *seen.lock().unwrap(),
        vec!["a".to_string(), "a\n".to_string(), "a\nb".to_string(), "ab".to_string()]
    );
}

#[test]
fn no_op_edit_does_not_notify() {
    let (seen, sink) = recording();
    let ed = SqlEditor::new(&EditorConfig::default(), EditorHooks::new().change_sink(sink));
    ed.backspace();
    ed.delete_forward();
    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn set_text_notifies_and_moves_cursor_to_end() {
    let (seen, sink) = recording();
    let ed = SqlEditor::new(&EditorConfig::default(), EditorHooks::new().change_sink(sink));
    ed.set_text("SELECT 1\nFROM t");
    assert_eq!(ed.snapshot().cursor, Position::new(1, 6));
    assert_eq!(*seen.lock().unwrap(), vec!["SELECT 1\nFROM t".to_string()]);
}

#[test]
fn submit_chord_hands_over_full_text() {
    let (seen, sink) = recording();
    let ed = SqlEditor::new(&EditorConfig::default(), EditorHooks::new().submit_sink(sink));
    ed.set_text("SELECT 1");
    ed.handle_input(&key("ctrl+enter"));
    ed.handle_input(&key("cmd+enter"));
    assert_eq!(ed.text(), "SELECT 1");
    assert_eq!(seen.lock().unwrap().len(), 2);
}

#[test]
fn copy_cut_paste_through_clipboard() {
    let clipboard = Arc::new(MemoryClipboard::new());
    let ed = SqlEditor::new(&EditorConfig::default(), EditorHooks::new().clipboard(clipboard.clone()));
    ed.set_text("SELECT a FROM t");
    ed.tap(GridPoint::new(0, 7));
    ed.handle_input(&key("shift+right"));
    ed.copy();
    assert_eq!(clipboard.get_text(), "a");
    ed.cut();
    assert_eq!(ed.text(), "SELECT  FROM t");
    clipboard.set_text("a,\nb");
    ed.handle_input(&key("ctrl+v"));
    assert_eq!(ed.text(), "SELECT a,\nb FROM t");
    assert_eq!(ed.snapshot().cursor, Position::new(1, 1));
}

#[test]
fn empty_clipboard_paste_is_noop() {
    let ed = SqlEditor::default();
    ed.set_text("x");
    ed.paste();
    assert_eq!(ed.text(), "x");
    assert_eq!(ed.undo_depth(), 0);
}

#[test]
fn hold_event_extends_selection() {
    let ed = SqlEditor::default();
    ed.set_text("SELECT");
    ed.handle_input(&InputEvent::HoldChanged(true));
    ed.handle_input(&key("left"));
    ed.handle_input(&key("left"));
    ed.handle_input(&InputEvent::HoldChanged(false));
    assert_eq!(
        ed.snapshot().selection,
        Some((Position::new(0, 4), Position::new(0, 6)))
    );
    ed.handle_input(&key("right"));
    assert_eq!(ed.snapshot().selection, None);
    assert_eq!(ed.snapshot().cursor, Position::new(0, 6));
}

#[test]
fn popup_pick_event_accepts_candidate() {
    let ed = SqlEditor::default();
    ed.set_completions(["users", "user_id"]);
    ed.insert_char('u');
    ed.insert_char('s');
    let candidates = ed.snapshot().popup.candidates;
    let idx = candidates.iter().position(|c| c == "users").unwrap();
    ed.handle_input(&InputEvent::PopupPick(idx));
    assert_eq!(ed.text(), "users");
    assert!(!ed.snapshot().popup.visible);
}

#[test]
fn undo_limit_comes_from_config() {
    let config = EditorConfig {
        undo_limit: 2,
        ..EditorConfig::default()
    };
    let ed = SqlEditor::new(&config, EditorHooks::new());
    for c in "abcd".chars() {
        ed.insert_char(c);
    }
    assert_eq!(ed.undo_depth(), 2);
    while ed.undo() {}
    assert_eq!(ed.text(), "ab");
    ed.redo();
    assert_eq!(ed.redo_depth(), 1);
}

#[test]
fn focus_events_drive_blink_and_cursor_visibility() {
    let ed = SqlEditor::default();
    assert!(!ed.snapshot().cursor_visible());
    ed.handle_input(&InputEvent::FocusGained);
    assert!(ed.snapshot().cursor_visible());
    ed.tick_blink();
    assert!(!ed.snapshot().cursor_visible());
    ed.tick_blink();
    assert!(ed.snapshot().cursor_visible());
    ed.handle_input(&InputEvent::FocusLost);
    assert!(!ed.tick_blink());
}

#[test]
fn classify_uses_current_text() {
    let ed = SqlEditor::default();
    ed.set_text("select 1");
    let tokens = ed.classify();
    assert_eq!(tokens[0].category, TokenCategory::Keyword);
    assert_eq!(tokens.last().map(|t| t.category), Some(TokenCategory::Number));
}

#[test]
fn concurrent_input_blink_and_data_keep_state_valid() {
    let ed = SqlEditor::default();
    ed.focus_gained();
    let typist = {
        let ed = ed.clone();
        std::thread::spawn(move || {
            for i in 0..200 {
                if i % 7 == 0 {
                    ed.split_line();
                } else {
                    ed.insert_char('x');
                }
                if i % 11 == 0 {
                    ed.handle_input(&key("shift+left"));
                }
            }
        })
    };
    let blinker = {
        let ed = ed.clone();
        std::thread::spawn(move || {
            for _ in 0..500 {
                ed.tick_blink();
            }
        })
    };
    let loader = {
        let ed = ed.clone();
        std::thread::spawn(move || {
            for i in 0..50 {
                ed.insert_project(&format!("p{i}"), Default::default());
            }
        })
    };
    for handle in [typist, blinker, loader] {
        handle.join().unwrap();
    }
    let snap = ed.snapshot();
    assert!(snap.cursor.line < snap.lines.len());
    assert!(snap.cursor.col <= snap.lines[snap.cursor.line].len());
}

#[test]
fn paste_event_inserts_payload_without_clipboard() {
    let clipboard = Arc::new(MemoryClipboard::with_text("unused"));
    let ed = SqlEditor::new(&EditorConfig::default(), EditorHooks::new().clipboard(clipboard.clone()));
    ed.handle_input(&InputEvent::Paste("SELECT 1".to_owned()));
    assert_eq!(ed.text(), "SELECT 1");
    assert_eq!(clipboard.get_text(), "unused");
}
