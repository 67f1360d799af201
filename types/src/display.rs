//! Display projection: the two text lines the renderer paints.

use crate::{Entry, Session, UiOptions};

/// Literal text shown for a faulted session, until the user clears.
pub const ERROR_TEXT: &str = "Error";

/// The calculator display, derived from the session on every frame and never
/// stored back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayLines {
    /// Pending operand and operator, or blank when nothing is pending.
    pub secondary: String,
    /// The current entry (trailing `.` preserved), or the error sentinel.
    pub primary: String,
}

impl DisplayLines {
    #[must_use]
    pub fn project(session: &Session, options: UiOptions) -> Self {
        let group = |text: &str| {
            if options.grouping {
                group_thousands(text)
            } else {
                text.to_string()
            }
        };

        let secondary = session.pending().map_or_else(String::new, |(previous, op)| {
            let symbol = if options.ascii_only {
                op.ascii_symbol()
            } else {
                op.symbol()
            };
            format!("{} {symbol}", group(Entry::from_value(previous).as_str()))
        });

        let primary = session
            .entry()
            .map_or_else(|| ERROR_TEXT.to_string(), |entry| group(entry.as_str()));

        Self { secondary, primary }
    }
}

/// Insert `,` separators every three integer digits.
///
/// The sign and everything from the decimal point onward pass through
/// untouched, so `"3."` stays `"3."` and fraction digits are never grouped.
#[must_use]
pub fn group_thousands(text: &str) -> String {
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(text.len() + integer.len() / 3);
    grouped.push_str(sign);
    let digits = integer.len();
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (digits - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if let Some(frac) = fraction {
        grouped.push('.');
        grouped.push_str(frac);
    }
    grouped
}
