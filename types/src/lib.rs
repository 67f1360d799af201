//! Core domain types for Tally.
//!
//! This crate contains pure domain types with no IO, no async, and minimal
//! dependencies: digits, operators, the current-entry text, and the session
//! state machine that turns key presses into arithmetic.

mod display;
mod entry;
mod session;

pub use display::{DisplayLines, ERROR_TEXT, group_thousands};
pub use entry::Entry;
pub use session::Session;

use thiserror::Error;

// ============================================================================
// Digit
// ============================================================================

/// A decimal digit, guaranteed to be in `0..=9`.
///
/// The only way digits reach the engine: the input driver validates raw key
/// characters into this type at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digit(u8);

impl Digit {
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value <= 9 { Some(Self(value)) } else { None }
    }

    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        c.to_digit(10).map(|d| Self(d as u8))
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        (b'0' + self.0) as char
    }
}

// ============================================================================
// Operation
// ============================================================================

/// The four arithmetic operators.
///
/// Glyph characters (`÷`, `×`, `−`) exist only at the edges: the input driver
/// maps them in, the display projection maps them back out. Branching logic
/// never compares symbol strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    /// Unicode display symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Operation::Add => "+",
            Operation::Subtract => "\u{2212}",
            Operation::Multiply => "\u{d7}",
            Operation::Divide => "\u{f7}",
        }
    }

    /// ASCII fallback symbol for terminals without the Unicode glyphs.
    #[must_use]
    pub const fn ascii_symbol(self) -> &'static str {
        match self {
            Operation::Add => "+",
            Operation::Subtract => "-",
            Operation::Multiply => "*",
            Operation::Divide => "/",
        }
    }

    /// Apply the operator to `a` and `b` (in that order).
    ///
    /// Division by zero and non-finite results are domain errors, never
    /// `NaN`/`inf` leaking into display text.
    pub fn apply(self, a: f64, b: f64) -> Result<f64, MathError> {
        let result = match self {
            Operation::Add => a + b,
            Operation::Subtract => a - b,
            Operation::Multiply => a * b,
            Operation::Divide => {
                if b == 0.0 {
                    return Err(MathError::DivisionByZero);
                }
                a / b
            }
        };
        if result.is_finite() {
            Ok(result)
        } else {
            Err(MathError::NonFinite)
        }
    }

    /// All operators, in keypad order.
    #[must_use]
    pub fn all() -> &'static [Operation] {
        &[
            Operation::Divide,
            Operation::Multiply,
            Operation::Subtract,
            Operation::Add,
        ]
    }
}

// ============================================================================
// MathError
// ============================================================================

/// Arithmetic domain violations.
///
/// All of these collapse into the session-level `Error` state; the display
/// shows the sentinel text until the user clears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MathError {
    #[error("division by zero")]
    DivisionByZero,
    #[error("square root of a negative number")]
    NegativeSquareRoot,
    #[error("result is not a finite number")]
    NonFinite,
}

// ============================================================================
// UiOptions
// ============================================================================

/// Presentation options resolved from config, consumed by the renderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct UiOptions {
    /// Use ASCII operator symbols instead of `÷ × −`.
    pub ascii_only: bool,
    /// High-contrast color palette.
    pub high_contrast: bool,
    /// Thousands grouping in the display.
    pub grouping: bool,
}
