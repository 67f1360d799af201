//! Application state for Tally - the calculation session plus UI bookkeeping.
//!
//! This crate owns everything the renderer reads and the input driver writes,
//! without depending on any TUI machinery: the pure [`Session`] state machine,
//! the quit flag, resolved presentation options, and the timestamp of the most
//! recent action (which drives the keypad press flash).

use std::time::{Duration, Instant};

// Config types - loaded by the caller, consumed here
mod config;
pub use config::{AppConfig, ConfigError, TallyConfig};

// Re-export the domain types for the public API
pub use tally_types::{
    Digit, DisplayLines, ERROR_TEXT, Entry, MathError, Operation, Session, UiOptions,
};

/// How long a keypad cell stays highlighted after its action fires.
pub const FLASH_DURATION: Duration = Duration::from_millis(150);

/// One user action, as delivered by the input driver.
///
/// This is the engine's entire action surface; anything the keyboard or a
/// pointer can do maps to exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Digit(Digit),
    Decimal,
    Clear,
    Percent,
    SquareRoot,
    Op(Operation),
    Equals,
}

/// Application state.
pub struct App {
    session: Session,
    options: UiOptions,
    should_quit: bool,
    last_action: Option<(Action, Instant)>,
}

impl App {
    #[must_use]
    pub fn new(config: Option<&TallyConfig>) -> Self {
        Self {
            session: Session::default(),
            options: config::ui_options(config),
            should_quit: false,
            last_action: None,
        }
    }

    /// Apply one action to the session.
    ///
    /// Total: every action has a defined successor state, so this never
    /// fails and never leaves the session half-updated.
    pub fn apply(&mut self, action: Action) {
        let session = std::mem::take(&mut self.session);
        self.session = match action {
            Action::Digit(digit) => session.enter_digit(digit),
            Action::Decimal => session.enter_decimal(),
            Action::Clear => session.clear(),
            Action::Percent => session.percent(),
            Action::SquareRoot => session.square_root(),
            Action::Op(op) => session.select_operation(op),
            Action::Equals => session.equals(),
        };
        if self.session.is_error() {
            tracing::debug!(?action, "session faulted");
        }
        self.last_action = Some((action, Instant::now()));
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// The two display lines, projected fresh from the session.
    #[must_use]
    pub fn display_lines(&self) -> DisplayLines {
        DisplayLines::project(&self.session, self.options)
    }

    /// The action whose keypad cell should currently render pressed.
    #[must_use]
    pub fn active_action(&self) -> Option<Action> {
        let (action, at) = self.last_action?;
        (at.elapsed() < FLASH_DURATION).then_some(action)
    }

    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        self.options
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(None)
    }
}
