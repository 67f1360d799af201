//! The current-entry text: the operand the user is composing.

use crate::Digit;

/// The operand currently being typed or just computed, stored as text.
///
/// Invariants held by construction:
/// - always parses as a decimal number (`f64`)
/// - at most one `.`
/// - a leading `"0"` is replaced, not prefixed, on first digit entry
/// - `-0` is normalized to `0`
///
/// A trailing `.` is legal and preserved (the user just typed it).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry(String);

impl Entry {
    /// The initial entry, `"0"`.
    #[must_use]
    pub fn zero() -> Self {
        Self("0".to_string())
    }

    /// An entry holding the canonical text form of a computed result.
    ///
    /// Callers must not pass non-finite values; arithmetic filters those
    /// into [`crate::MathError::NonFinite`] before reaching here.
    #[must_use]
    pub fn from_value(value: f64) -> Self {
        debug_assert!(value.is_finite(), "entry text must be a finite number");
        let text = value.to_string();
        // -0 renders as "-0"; the display should show plain zero.
        if text == "-0" {
            Self::zero()
        } else {
            Self(text)
        }
    }

    /// Append a digit, collapsing the redundant leading zero.
    pub fn push_digit(&mut self, digit: Digit) {
        if self.0 == "0" {
            self.0.clear();
        }
        self.0.push(digit.as_char());
    }

    /// Append the decimal point. Idempotent: a second `.` is ignored.
    pub fn push_decimal(&mut self) {
        if !self.has_decimal() {
            self.0.push('.');
        }
    }

    #[must_use]
    pub fn has_decimal(&self) -> bool {
        self.0.contains('.')
    }

    /// True for the untouched initial text `"0"`.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == "0"
    }

    /// Reinterpret the text as a number.
    #[must_use]
    pub fn value(&self) -> f64 {
        // The invariants guarantee parseability; "3." parses as 3.
        self.0.parse().unwrap_or(0.0)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Entry {
    fn default() -> Self {
        Self::zero()
    }
}
