//! TUI rendering for Tally using ratatui.

mod input;
mod theme;

pub use input::{InputPump, action_for_key, apply_event, handle_events};
pub use theme::{Palette, palette};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use tally_engine::{Action, App, Digit, ERROR_TEXT, Operation};

/// Main draw function.
pub fn draw(frame: &mut Frame, app: &App) {
    let palette = theme::palette(app.ui_options());

    // Clear with background color
    let bg_block = Block::default().style(Style::default().bg(palette.bg_dark));
    frame.render_widget(bg_block, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(4), // Display
            Constraint::Min(10),   // Keypad
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_display(frame, app, chunks[0], &palette);
    draw_keypad(frame, app, chunks[1], &palette);
    draw_status_bar(frame, chunks[2], &palette);
}

fn draw_display(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.bg_border))
        .style(Style::default().bg(palette.bg_panel));
    let inner_width = block.inner(area).width as usize;

    let lines = app.display_lines();
    let faulted = lines.primary == ERROR_TEXT;
    let primary_style = if faulted {
        Style::default()
            .fg(palette.red)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(palette.text_primary)
            .add_modifier(Modifier::BOLD)
    };

    let text = vec![
        Line::styled(
            fit_right(&lines.secondary, inner_width),
            Style::default().fg(palette.text_muted),
        ),
        Line::styled(fit_right(&lines.primary, inner_width), primary_style),
    ];

    frame.render_widget(
        Paragraph::new(text).alignment(Alignment::Right).block(block),
        area,
    );
}

fn draw_keypad(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let rows = keypad_rows();
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Ratio(1, 5); 5])
        .split(area);

    let active = app.active_action();
    let ascii = app.ui_options().ascii_only;

    for (row, row_area) in rows.iter().zip(row_areas.iter()) {
        // The bottom row has three cells; equals spans the last two columns.
        let constraints: Vec<Constraint> = if row.len() == 4 {
            vec![Constraint::Percentage(25); 4]
        } else {
            vec![
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(50),
            ]
        };
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(*row_area);

        for (&action, cell) in row.iter().zip(cells.iter()) {
            draw_pad(frame, *cell, action, active == Some(action), ascii, palette);
        }
    }
}

fn draw_pad(
    frame: &mut Frame,
    area: Rect,
    action: Action,
    pressed: bool,
    ascii: bool,
    palette: &Palette,
) {
    let mut block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.bg_border));
    if pressed {
        block = block
            .border_style(Style::default().fg(palette.accent))
            .style(Style::default().bg(palette.bg_highlight));
    }

    let label_style = Style::default().fg(pad_color(action, palette));
    frame.render_widget(
        Paragraph::new(Line::styled(pad_label(action, ascii), label_style))
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}

fn draw_status_bar(frame: &mut Frame, area: Rect, palette: &Palette) {
    let key = Style::default().fg(palette.accent);
    let hint = Style::default().fg(palette.text_muted);
    let spans = vec![
        Span::styled(" q", key),
        Span::styled(" quit · ", hint),
        Span::styled("esc", key),
        Span::styled(" clear · ", hint),
        Span::styled("enter", key),
        Span::styled(" equals · ", hint),
        Span::styled("%", key),
        Span::styled(" percent · ", hint),
        Span::styled("s", key),
        Span::styled(" square root", hint),
    ];
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// The keypad layout, top row first.
fn keypad_rows() -> [Vec<Action>; 5] {
    let d = |value: u8| Action::Digit(Digit::new(value).expect("keypad digits are 0-9"));
    [
        vec![
            Action::Clear,
            Action::SquareRoot,
            Action::Percent,
            Action::Op(Operation::Divide),
        ],
        vec![d(7), d(8), d(9), Action::Op(Operation::Multiply)],
        vec![d(4), d(5), d(6), Action::Op(Operation::Subtract)],
        vec![d(1), d(2), d(3), Action::Op(Operation::Add)],
        vec![d(0), Action::Decimal, Action::Equals],
    ]
}

fn pad_label(action: Action, ascii: bool) -> String {
    match action {
        Action::Digit(digit) => digit.as_char().to_string(),
        Action::Decimal => ".".to_string(),
        Action::Clear => "C".to_string(),
        Action::Percent => "%".to_string(),
        Action::SquareRoot => {
            let glyph = if ascii { "sqrt" } else { "\u{221a}" };
            glyph.to_string()
        }
        Action::Equals => "=".to_string(),
        Action::Op(op) => {
            if ascii {
                op.ascii_symbol().to_string()
            } else {
                op.symbol().to_string()
            }
        }
    }
}

fn pad_color(action: Action, palette: &Palette) -> ratatui::style::Color {
    match action {
        Action::Digit(_) | Action::Decimal => palette.text_primary,
        Action::Clear => palette.red,
        Action::Percent | Action::SquareRoot | Action::Op(_) => palette.orange,
        Action::Equals => palette.green,
    }
}

/// Keep the right-hand end of `text` when it is wider than `width` columns.
///
/// The least significant digits are the ones the user just typed, so those
/// stay visible when a long number overflows the display.
fn fit_right(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut kept = 0;
    let mut start = text.len();
    for (idx, c) in text.char_indices().rev() {
        let char_width = c.width().unwrap_or(0);
        if kept + char_width > width {
            break;
        }
        kept += char_width;
        start = idx;
    }
    text[start..].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_right_passes_short_text_through() {
        assert_eq!(fit_right("1,234", 10), "1,234");
        assert_eq!(fit_right("", 10), "");
    }

    #[test]
    fn fit_right_keeps_the_trailing_columns() {
        assert_eq!(fit_right("1,234,567.89", 6), "567.89");
        assert_eq!(fit_right("123456", 1), "6");
        assert_eq!(fit_right("123456", 0), "");
    }

    #[test]
    fn keypad_covers_the_whole_action_surface() {
        let rows = keypad_rows();
        let actions: Vec<Action> = rows.iter().flatten().copied().collect();
        assert!(actions.contains(&Action::Clear));
        assert!(actions.contains(&Action::Decimal));
        assert!(actions.contains(&Action::Percent));
        assert!(actions.contains(&Action::SquareRoot));
        assert!(actions.contains(&Action::Equals));
        for op in Operation::all() {
            assert!(actions.contains(&Action::Op(*op)), "missing {op:?}");
        }
        for value in 0..=9u8 {
            let digit = Action::Digit(Digit::new(value).unwrap());
            assert!(actions.contains(&digit), "missing digit {value}");
        }
    }

    #[test]
    fn pad_labels_respect_ascii_mode() {
        assert_eq!(pad_label(Action::Op(Operation::Divide), false), "÷");
        assert_eq!(pad_label(Action::Op(Operation::Divide), true), "/");
        assert_eq!(pad_label(Action::SquareRoot, false), "√");
        assert_eq!(pad_label(Action::SquareRoot, true), "sqrt");
    }
}
