//! The arithmetic input state machine.
//!
//! A calculation session is one of three states. The pending operand and
//! operator travel together inside `EnteringSecond`, so "both present or both
//! absent" is structural rather than a runtime check. Every transition is
//! total: operations consume the session and return its successor, and none
//! of them can panic.

use crate::{Digit, Entry, MathError, Operation};

/// One calculation session.
///
/// `EnteringSecond` with an untouched `"0"` entry is the operator-pending
/// state: an operator was just chosen and no second operand has been typed.
#[derive(Debug, Clone, PartialEq)]
pub enum Session {
    /// Composing the first operand; nothing is pending.
    EnteringFirst { entry: Entry },
    /// An operator is pending against a captured first operand.
    EnteringSecond {
        previous: f64,
        op: Operation,
        entry: Entry,
    },
    /// Division by zero or a negative square root; recoverable via `clear`
    /// (digit and decimal entry also recover, starting a fresh entry).
    Error,
}

impl Session {
    /// Enter a digit.
    ///
    /// In the error state this behaves as an implicit `clear` followed by
    /// the digit, so the user can simply start typing again.
    #[must_use]
    pub fn enter_digit(self, digit: Digit) -> Self {
        match self {
            Session::EnteringFirst { mut entry } => {
                entry.push_digit(digit);
                Session::EnteringFirst { entry }
            }
            Session::EnteringSecond {
                previous,
                op,
                mut entry,
            } => {
                entry.push_digit(digit);
                Session::EnteringSecond {
                    previous,
                    op,
                    entry,
                }
            }
            Session::Error => {
                let mut entry = Entry::zero();
                entry.push_digit(digit);
                Session::EnteringFirst { entry }
            }
        }
    }

    /// Enter the decimal point. Idempotent within one entry.
    #[must_use]
    pub fn enter_decimal(self) -> Self {
        match self {
            Session::EnteringFirst { mut entry } => {
                entry.push_decimal();
                Session::EnteringFirst { entry }
            }
            Session::EnteringSecond {
                previous,
                op,
                mut entry,
            } => {
                entry.push_decimal();
                Session::EnteringSecond {
                    previous,
                    op,
                    entry,
                }
            }
            Session::Error => {
                let mut entry = Entry::zero();
                entry.push_decimal();
                Session::EnteringFirst { entry }
            }
        }
    }

    /// Reset to the initial session. Total, recovers from every state.
    #[must_use]
    pub fn clear(self) -> Self {
        Session::default()
    }

    /// Divide the current entry by 100. The pending pair is untouched.
    #[must_use]
    pub fn percent(self) -> Self {
        self.map_entry(|value| Ok(value / 100.0))
    }

    /// Replace the current entry with its square root. Negative entries
    /// fault the session; the pending pair is otherwise untouched.
    #[must_use]
    pub fn square_root(self) -> Self {
        self.map_entry(|value| {
            if value < 0.0 {
                Err(MathError::NegativeSquareRoot)
            } else {
                Ok(value.sqrt())
            }
        })
    }

    /// Select an operator.
    ///
    /// - Nothing typed yet: no-op.
    /// - First operand typed: capture it and start the second entry.
    /// - Operator already pending, second operand typed: chained left-to-right
    ///   evaluation, then the new operator becomes pending.
    /// - Operator already pending, nothing typed: replace the operator.
    #[must_use]
    pub fn select_operation(self, op: Operation) -> Self {
        match self {
            Session::EnteringFirst { entry } if entry.is_zero() => {
                Session::EnteringFirst { entry }
            }
            Session::EnteringFirst { entry } => Session::EnteringSecond {
                previous: entry.value(),
                op,
                entry: Entry::zero(),
            },
            Session::EnteringSecond {
                previous, entry, ..
            } if entry.is_zero() => Session::EnteringSecond {
                previous,
                op,
                entry,
            },
            Session::EnteringSecond {
                previous,
                op: pending,
                entry,
            } => match pending.apply(previous, entry.value()) {
                Ok(result) => Session::EnteringSecond {
                    previous: result,
                    op,
                    entry: Entry::zero(),
                },
                Err(_) => Session::Error,
            },
            Session::Error => Session::Error,
        }
    }

    /// Evaluate the pending pair. No-op when nothing is pending; the result
    /// becomes the first operand of a fresh session, ready for chaining.
    #[must_use]
    pub fn equals(self) -> Self {
        match self {
            Session::EnteringSecond {
                previous,
                op,
                entry,
            } => match op.apply(previous, entry.value()) {
                Ok(result) => Session::EnteringFirst {
                    entry: Entry::from_value(result),
                },
                Err(_) => Session::Error,
            },
            other => other,
        }
    }

    /// The pending operand/operator pair, if an operator has been selected.
    #[must_use]
    pub fn pending(&self) -> Option<(f64, Operation)> {
        match self {
            Session::EnteringSecond { previous, op, .. } => Some((*previous, *op)),
            _ => None,
        }
    }

    /// The current entry text, or `None` when the session is faulted.
    #[must_use]
    pub fn entry(&self) -> Option<&Entry> {
        match self {
            Session::EnteringFirst { entry } | Session::EnteringSecond { entry, .. } => {
                Some(entry)
            }
            Session::Error => None,
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Session::Error)
    }

    /// Apply an entry-local transformation (percent, square root).
    fn map_entry(self, f: impl FnOnce(f64) -> Result<f64, MathError>) -> Self {
        match self {
            Session::EnteringFirst { entry } => match f(entry.value()) {
                Ok(value) => Session::EnteringFirst {
                    entry: Entry::from_value(value),
                },
                Err(_) => Session::Error,
            },
            Session::EnteringSecond {
                previous,
                op,
                entry,
            } => match f(entry.value()) {
                Ok(value) => Session::EnteringSecond {
                    previous,
                    op,
                    entry: Entry::from_value(value),
                },
                Err(_) => Session::Error,
            },
            Session::Error => Session::Error,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::EnteringFirst {
            entry: Entry::zero(),
        }
    }
}
