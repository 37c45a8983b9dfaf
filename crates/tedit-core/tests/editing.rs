//! End-to-end editing sessions through the public API, plus property
//! coverage of the load/save round trip and the undo inverse law.

use proptest::prelude::*;
use tedit_core::{EditBuffer, EditorConfig, SearchOptions};

fn buffer(text: &str) -> EditBuffer {
    EditBuffer::from_text(text, 24, 80)
}

fn lines(buffer: &EditBuffer) -> Vec<String> {
    buffer.document().lines().map(str::to_string).collect()
}

#[test]
fn test_smart_indent_session() {
    let mut buf = buffer("int main() {\n\n}");
    buf.set_language(tedit_lang::Language::CFamily);
    buf.move_line_end();
    buf.split_line(&EditorConfig::default());

    assert_eq!(buf.document().line_count(), 4);
    assert_eq!(lines(&buf)[1], "    ");
    assert_eq!((buf.cursor().line_num, buf.cursor().col), (2, 5));
}

#[test]
fn test_backspace_run_ends_in_noop() {
    let mut buf = buffer("abc");
    buf.move_line_end();
    for _ in 0..4 {
        buf.backspace();
    }
    assert_eq!(lines(&buf), vec![""]);
    assert_eq!((buf.cursor().line_num, buf.cursor().col), (1, 1));
}

#[test]
fn test_selection_delete_joins_outer_lines() {
    let mut buf = buffer("foo\nbar\nbaz");
    buf.begin_selection();
    buf.goto_line(3).unwrap();
    buf.move_right();
    buf.delete_selection();

    assert_eq!(lines(&buf), vec!["az"]);
    assert_eq!((buf.cursor().line_num, buf.cursor().col), (1, 1));
}

#[test]
fn test_cut_paste_moves_text() {
    let mut buf = buffer("alpha\nbeta\ngamma");
    buf.goto_line(2).unwrap();
    buf.begin_selection();
    buf.move_line_end();
    let clip = buf.cut_selection();
    assert_eq!(clip, vec!["beta".to_string()]);
    assert_eq!(lines(&buf), vec!["alpha", "", "gamma"]);

    buf.goto_line(3).unwrap();
    buf.move_line_end();
    buf.paste(&clip);
    assert_eq!(lines(&buf), vec!["alpha", "", "gammabeta"]);
}

#[test]
fn test_search_edit_undo_session() {
    let mut buf = buffer("count = 0\ncount += 1\nprint(count)");
    let count = buf
        .replace_all("count", "total", &SearchOptions::default())
        .unwrap();
    assert_eq!(count, 3);
    assert_eq!(
        lines(&buf),
        vec!["total = 0", "total += 1", "print(total)"]
    );

    buf.undo();
    assert_eq!(lines(&buf)[0], "count = 0");
}

#[test]
fn test_viewport_follows_page_motion() {
    let text = (1..=50).map(|i| i.to_string()).collect::<Vec<_>>().join("\n");
    let mut buf = EditBuffer::from_text(&text, 10, 80);

    buf.page_down();
    buf.page_down();
    assert_eq!(buf.cursor().line_num, 21);
    let view = buf.viewport();
    assert!(view.first_visible_num <= 21);
    assert!(21 < view.first_visible_num + 10);

    buf.page_up();
    buf.page_up();
    buf.page_up();
    assert_eq!(buf.cursor().line_num, 1);
    assert_eq!(buf.viewport().first_visible_num, 1);
}

proptest! {
    #[test]
    fn prop_load_save_round_trip(
        input in proptest::collection::vec("[ -~]{0,12}", 1..8)
    ) {
        let text = input.join("\n") + "\n";
        let buf = buffer(&text);
        prop_assert_eq!(buf.to_text(), text);
    }

    #[test]
    fn prop_undo_all_restores_original(
        input in proptest::collection::vec("[ -~]{0,8}", 1..5),
        edits in proptest::collection::vec(0u8..5, 1..20)
    ) {
        let text = input.join("\n");
        let mut buf = buffer(&text);
        let original = lines(&buf);
        let config = EditorConfig::default();

        for edit in edits {
            match edit {
                0 => buf.insert_char('x'),
                1 => buf.split_line(&config),
                2 => buf.backspace(),
                3 => buf.delete_forward(),
                _ => {
                    buf.move_down();
                    buf.move_right();
                }
            }
        }
        while buf.can_undo() {
            buf.undo();
        }
        prop_assert_eq!(lines(&buf), original);
    }

    #[test]
    fn prop_cursor_column_always_in_range(
        motions in proptest::collection::vec(0u8..6, 1..30)
    ) {
        let mut buf = buffer("short\nlonger line\n\nmid");
        for motion in motions {
            match motion {
                0 => buf.move_up(),
                1 => buf.move_down(),
                2 => buf.move_left(),
                3 => buf.move_right(),
                4 => buf.word_forward(),
                _ => buf.word_backward(),
            }
            let len = buf
                .document()
                .text(buf.cursor().line)
                .chars()
                .count();
            prop_assert!(buf.cursor().col >= 1);
            prop_assert!(buf.cursor().col <= len + 1);
        }
    }
}
