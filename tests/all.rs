//! End-to-end tests: raw key events in, projected display lines out.
//!
//! These drive the same path the event loop does (key event -> action ->
//! session transition -> projection), without a terminal.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

use tally_engine::{App, DisplayLines, TallyConfig};
use tally_tui::apply_event;
use tally_types::Session;

fn type_keys(app: &mut App, keys: &str) {
    for c in keys.chars() {
        let code = match c {
            '\n' => KeyCode::Enter,
            '\x1b' => KeyCode::Esc,
            other => KeyCode::Char(other),
        };
        apply_event(app, &Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }
}

fn display_after(keys: &str) -> DisplayLines {
    let mut app = App::new(None);
    type_keys(&mut app, keys);
    app.display_lines()
}

#[test]
fn cold_start_shows_zero() {
    assert_eq!(display_after("").primary, "0");
}

#[test]
fn left_to_right_chaining_without_precedence() {
    assert_eq!(display_after("1+2*3=").primary, "9");
}

#[test]
fn glyph_operator_keys_work_like_ascii() {
    assert_eq!(display_after("1+2×3=").primary, "9");
    assert_eq!(display_after("9÷3=").primary, "3");
    assert_eq!(display_after("9−4=").primary, "5");
}

#[test]
fn enter_and_equals_both_evaluate() {
    assert_eq!(display_after("6*7\n").primary, "42");
    assert_eq!(display_after("6*7=").primary, "42");
}

#[test]
fn division_by_zero_displays_the_sentinel() {
    let lines = display_after("5/0=");
    assert_eq!(lines.primary, "Error");
    assert_eq!(lines.secondary, "");
}

#[test]
fn escape_and_c_both_clear() {
    let mut app = App::new(None);
    type_keys(&mut app, "5/0=");
    type_keys(&mut app, "\x1b");
    assert_eq!(app.display_lines().primary, "0");
    assert_eq!(*app.session(), Session::default());

    let mut app = App::new(None);
    type_keys(&mut app, "12+34c");
    assert_eq!(app.display_lines().primary, "0");
    assert_eq!(app.display_lines().secondary, "");
}

#[test]
fn typing_after_an_error_starts_fresh() {
    assert_eq!(display_after("5/0=42").primary, "42");
}

#[test]
fn percent_binding_adjusts_the_second_operand() {
    assert_eq!(display_after("5+3%=").primary, "5.03");
}

#[test]
fn square_root_binding_upper_and_lower_case() {
    assert_eq!(display_after("81s").primary, "9");
    assert_eq!(display_after("81S").primary, "9");
}

#[test]
fn decimal_entry_and_display() {
    assert_eq!(display_after("3.").primary, "3.");
    assert_eq!(display_after("3..").primary, "3.");
    assert_eq!(display_after("3.12").primary, "3.12");
}

#[test]
fn secondary_line_shows_the_pending_pair_grouped() {
    let lines = display_after("1234567*");
    assert_eq!(lines.secondary, "1,234,567 ×");
    assert_eq!(lines.primary, "0");
}

#[test]
fn grouping_applies_to_results() {
    assert_eq!(display_after("1000*1000=").primary, "1,000,000");
}

#[test]
fn ascii_config_flows_through_to_the_secondary_line() {
    let config: TallyConfig = toml_config("[app]\nascii_only = true\n");
    let mut app = App::new(Some(&config));
    type_keys(&mut app, "7*");
    assert_eq!(app.display_lines().secondary, "7 *");
}

#[test]
fn unbound_keys_leave_the_session_alone() {
    let mut app = App::new(None);
    type_keys(&mut app, "7xyz!@#");
    assert_eq!(app.display_lines().primary, "7");
}

#[test]
fn quit_key_does_not_disturb_the_display() {
    let mut app = App::new(None);
    type_keys(&mut app, "7q");
    assert!(app.should_quit());
    assert_eq!(app.display_lines().primary, "7");
}

fn toml_config(raw: &str) -> TallyConfig {
    // TallyConfig is Deserialize; tests parse inline TOML instead of
    // touching the user's home directory.
    toml::from_str(raw).expect("test config is valid TOML")
}
