//! Input handling for the Tally TUI.
//!
//! The input driver is a scoped resource: [`InputPump`] owns a blocking
//! reader thread feeding a bounded channel, and releases it on `shutdown` or
//! drop, on every exit path. Key events are mapped to engine [`Action`]s
//! here and nowhere else; glyph keys (`÷ × −`) bind identically to their
//! ASCII counterparts.

use anyhow::{Result, anyhow};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};
use tokio::sync::mpsc;

use tally_engine::{Action, App, Digit, Operation};

const INPUT_POLL_TIMEOUT: Duration = Duration::from_millis(25); // shutdown responsiveness
const INPUT_CHANNEL_CAPACITY: usize = 64; // bounded: no OOM
const MAX_EVENTS_PER_FRAME: usize = 32; // never starve rendering

enum InputMsg {
    Event(Event),
    Error(String),
}

pub struct InputPump {
    rx: mpsc::Receiver<InputMsg>,
    stop: Arc<AtomicBool>,
    join: Option<tokio::task::JoinHandle<()>>,
}

impl InputPump {
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(INPUT_CHANNEL_CAPACITY);
        let stop = Arc::new(AtomicBool::new(false));
        let stop2 = stop.clone();

        let join = tokio::task::spawn_blocking(move || input_loop(stop2, tx));
        Self {
            rx,
            stop,
            join: Some(join),
        }
    }

    pub async fn shutdown(&mut self) {
        // Close the receiver first so the reader thread unblocks if it is
        // currently backpressured on a send.
        self.rx.close();

        self.stop.store(true, Ordering::Release);
        if let Some(join) = self.join.take() {
            let _ = tokio::time::timeout(Duration::from_secs(2), join).await;
        }
    }
}

impl Default for InputPump {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for InputPump {
    fn drop(&mut self) {
        // Best-effort stop if the caller exits early; do not block in Drop.
        self.rx.close();
        self.stop.store(true, Ordering::Release);
    }
}

fn input_loop(stop: Arc<AtomicBool>, tx: mpsc::Sender<InputMsg>) {
    while !stop.load(Ordering::Acquire) {
        match event::poll(INPUT_POLL_TIMEOUT) {
            Ok(true) => match event::read() {
                Ok(ev) => {
                    if tx.blocking_send(InputMsg::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    let _ = tx.blocking_send(InputMsg::Error(e.to_string()));
                    break;
                }
            },
            Ok(false) => {}
            Err(e) => {
                let _ = tx.blocking_send(InputMsg::Error(e.to_string()));
                break;
            }
        }
    }
}

/// Drain queued input, up to a per-frame budget. Returns `true` to quit.
pub fn handle_events(app: &mut App, input: &mut InputPump) -> Result<bool> {
    let mut processed = 0;
    while processed < MAX_EVENTS_PER_FRAME {
        let ev = match input.rx.try_recv() {
            Ok(InputMsg::Event(ev)) => ev,
            Ok(InputMsg::Error(msg)) => return Err(anyhow!("input error: {msg}")),
            Err(mpsc::error::TryRecvError::Empty) => break,
            Err(mpsc::error::TryRecvError::Disconnected) => {
                return Err(anyhow!("input pump disconnected"));
            }
        };

        if apply_event(app, &ev) {
            return Ok(true);
        }
        processed += 1;
    }
    Ok(app.should_quit())
}

/// Apply one terminal event to the app. Returns `true` to quit.
pub fn apply_event(app: &mut App, event: &Event) -> bool {
    if let Event::Key(key) = event {
        // Handle press + repeat events (ignore releases)
        if matches!(key.kind, KeyEventKind::Release) {
            return app.should_quit();
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return true;
        }

        if key.code == KeyCode::Char('q') {
            app.request_quit();
            return app.should_quit();
        }

        if let Some(action) = action_for_key(*key) {
            tracing::trace!(?action, "key mapped");
            app.apply(action);
        }
    }
    app.should_quit()
}

/// The reference keyboard binding: one key, one engine action.
#[must_use]
pub fn action_for_key(key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    match key.code {
        KeyCode::Esc => Some(Action::Clear),
        KeyCode::Enter => Some(Action::Equals),
        KeyCode::Char(c) => action_for_char(c),
        _ => None,
    }
}

fn action_for_char(c: char) -> Option<Action> {
    if let Some(digit) = Digit::from_char(c) {
        return Some(Action::Digit(digit));
    }
    match c {
        '.' => Some(Action::Decimal),
        'c' | 'C' => Some(Action::Clear),
        '%' => Some(Action::Percent),
        's' | 'S' => Some(Action::SquareRoot),
        '=' => Some(Action::Equals),
        '+' => Some(Action::Op(Operation::Add)),
        '-' | '\u{2212}' => Some(Action::Op(Operation::Subtract)),
        '*' | '\u{d7}' => Some(Action::Op(Operation::Multiply)),
        '/' | '\u{f7}' => Some(Action::Op(Operation::Divide)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn digits_map_to_digit_actions() {
        for c in '0'..='9' {
            let action = action_for_key(key(KeyCode::Char(c)));
            assert_eq!(action, Some(Action::Digit(Digit::from_char(c).unwrap())));
        }
    }

    #[test]
    fn operator_keys_map_ascii_and_glyph_alike() {
        for (chars, op) in [
            (['+', '+'], Operation::Add),
            (['-', '−'], Operation::Subtract),
            (['*', '×'], Operation::Multiply),
            (['/', '÷'], Operation::Divide),
        ] {
            for c in chars {
                assert_eq!(
                    action_for_key(key(KeyCode::Char(c))),
                    Some(Action::Op(op)),
                    "key {c:?}"
                );
            }
        }
    }

    #[test]
    fn clear_equals_percent_sqrt_bindings() {
        assert_eq!(action_for_key(key(KeyCode::Esc)), Some(Action::Clear));
        assert_eq!(action_for_key(key(KeyCode::Char('c'))), Some(Action::Clear));
        assert_eq!(action_for_key(key(KeyCode::Char('C'))), Some(Action::Clear));
        assert_eq!(action_for_key(key(KeyCode::Enter)), Some(Action::Equals));
        assert_eq!(action_for_key(key(KeyCode::Char('='))), Some(Action::Equals));
        assert_eq!(
            action_for_key(key(KeyCode::Char('%'))),
            Some(Action::Percent)
        );
        assert_eq!(
            action_for_key(key(KeyCode::Char('s'))),
            Some(Action::SquareRoot)
        );
        assert_eq!(
            action_for_key(key(KeyCode::Char('S'))),
            Some(Action::SquareRoot)
        );
        assert_eq!(
            action_for_key(key(KeyCode::Char('.'))),
            Some(Action::Decimal)
        );
    }

    #[test]
    fn unbound_keys_map_to_nothing() {
        assert_eq!(action_for_key(key(KeyCode::Char('x'))), None);
        assert_eq!(action_for_key(key(KeyCode::Tab)), None);
        assert_eq!(action_for_key(key(KeyCode::Backspace)), None);
    }

    #[test]
    fn control_modifier_suppresses_actions() {
        let ctrl_five = KeyEvent::new(KeyCode::Char('5'), KeyModifiers::CONTROL);
        assert_eq!(action_for_key(ctrl_five), None);
    }

    #[test]
    fn q_requests_quit() {
        let mut app = App::default();
        let quit = apply_event(&mut app, &Event::Key(key(KeyCode::Char('q'))));
        assert!(quit);
        assert!(app.should_quit());
    }

    #[test]
    fn ctrl_c_quits_without_touching_the_session() {
        let mut app = App::default();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        let quit = apply_event(&mut app, &Event::Key(ctrl_c));
        assert!(quit);
        assert!(!app.should_quit());
        assert_eq!(app.display_lines().primary, "0");
    }

    #[test]
    fn key_release_is_ignored() {
        let mut app = App::default();
        let mut release = key(KeyCode::Char('7'));
        release.kind = KeyEventKind::Release;
        let quit = apply_event(&mut app, &Event::Key(release));
        assert!(!quit);
        assert_eq!(app.display_lines().primary, "0");
    }

    #[test]
    fn keys_drive_the_engine() {
        let mut app = App::default();
        for code in [
            KeyCode::Char('1'),
            KeyCode::Char('+'),
            KeyCode::Char('2'),
            KeyCode::Char('×'),
            KeyCode::Char('3'),
            KeyCode::Enter,
        ] {
            apply_event(&mut app, &Event::Key(key(code)));
        }
        assert_eq!(app.display_lines().primary, "9");
    }
}
