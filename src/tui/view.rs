//! Pure rendering: map App state to ratatui widget trees.
//!
//! Widget-building functions are pure (state in, widgets out); the only
//! effect is Frame::render_widget() which writes to the terminal buffer.

use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;

use crate::calculator::Calculator;
use crate::types::{HistoryEntry, Operator, Theme};

use super::state::{Action, App, Focus, GRID, GRID_COLS, GRID_ROWS};
use super::theme::{palette, Palette};

/// Width of the history panel when visible.
const HISTORY_WIDTH: u16 = 32;

// ============================================================================
// DISPATCH
// ============================================================================

/// Render the whole calculator to the terminal frame.
pub fn render(app: &App, frame: &mut Frame) {
    let calc = &app.calculator;
    let colors = palette(calc.theme());
    let area = frame.area();

    frame.render_widget(Block::default().style(colors.background), area);

    // Common layout: title bar at top, content in middle, help at bottom
    let chunks = Layout::vertical([
        Constraint::Length(1), // title
        Constraint::Min(0),    // content
        Constraint::Length(1), // help
    ])
    .split(area);

    frame.render_widget(render_title(calc, colors), chunks[0]);
    frame.render_widget(render_help(colors), chunks[2]);

    let (calc_area, history_area) = if calc.show_history() {
        let columns = Layout::horizontal([Constraint::Min(0), Constraint::Length(HISTORY_WIDTH)])
            .split(chunks[1]);
        (columns[0], Some(columns[1]))
    } else {
        (chunks[1], None)
    };

    render_calculator(app, colors, frame, calc_area);

    if let Some(area) = history_area {
        render_history(calc.history(), colors, frame, area);
    }
}

// ============================================================================
// CHROME
// ============================================================================

fn render_title(calc: &Calculator, colors: &Palette) -> Paragraph<'static> {
    let theme = match calc.theme() {
        Theme::Light => "☀ light",
        Theme::Dark => "☾ dark",
    };
    let history = if calc.show_history() { "  ☰ history" } else { "" };

    let line = Line::from(vec![
        Span::styled(" Scientific Calculator", colors.title),
        Span::styled(format!("   {}{}", theme, history), colors.help),
    ]);
    Paragraph::new(line)
}

fn render_help(colors: &Palette) -> Paragraph<'static> {
    Paragraph::new(Line::from(Span::styled(
        " 0-9 . + - * / ^ ( )  = calc  Esc clear  s c t l n r ! fn  d rad/deg  T theme  h history  ←↑↓→ space  q quit",
        colors.help,
    )))
}

// ============================================================================
// CALCULATOR
// ============================================================================

fn render_calculator(app: &App, colors: &Palette, frame: &mut Frame, area: Rect) {
    let calc = &app.calculator;

    let chunks = Layout::vertical([
        Constraint::Length(3),                // display box
        Constraint::Length(1),                // angle mode
        Constraint::Length(GRID_ROWS as u16), // keypad
        Constraint::Min(0),
    ])
    .split(area);

    frame.render_widget(render_display(calc, colors), chunks[0]);

    let mode = Paragraph::new(Span::styled(
        format!("{} ", calc.angle_mode().label()),
        colors.mode,
    ))
    .alignment(Alignment::Right);
    frame.render_widget(mode, chunks[1]);

    render_keypad(calc, app.focus, colors, frame, chunks[2]);
}

fn render_display(calc: &Calculator, colors: &Palette) -> Paragraph<'static> {
    let style = if calc.is_error() {
        colors.display_error
    } else {
        colors.display
    };
    Paragraph::new(calc.display().to_string())
        .alignment(Alignment::Right)
        .style(style)
        .block(Block::bordered().style(colors.background))
}

fn render_keypad(calc: &Calculator, focus: Focus, colors: &Palette, frame: &mut Frame, area: Rect) {
    let rows = Layout::vertical([Constraint::Length(1); GRID_ROWS]).split(area);

    for (r, row) in GRID.iter().enumerate() {
        let cells = Layout::horizontal([Constraint::Ratio(1, GRID_COLS as u32); GRID_COLS]).split(rows[r]);

        for (c, action) in row.iter().enumerate() {
            let mut style = button_style(action, colors);
            if focus == (Focus { row: r, col: c }) {
                style = style.add_modifier(colors.focused);
            }
            let button = Paragraph::new(button_label(action, calc))
                .alignment(Alignment::Center)
                .style(style);
            // One column gap between buttons
            let cell = Rect {
                width: cells[c].width.saturating_sub(1),
                ..cells[c]
            };
            frame.render_widget(button, cell);
        }
    }
}

/// Text shown on a keypad button.
pub fn button_label(action: &Action, calc: &Calculator) -> String {
    match action {
        Action::Digit(d) => d.to_string(),
        Action::Decimal => ".".to_string(),
        Action::Operator(op) => op.symbol().to_string(),
        Action::Paren(true) => "(".to_string(),
        Action::Paren(false) => ")".to_string(),
        Action::Function(f) => f.symbol().to_string(),
        Action::Equals => "=".to_string(),
        Action::Clear => "C".to_string(),
        Action::ToggleAngleMode => calc.angle_mode().label().to_string(),
        Action::ToggleTheme => match calc.theme() {
            Theme::Light => "☀".to_string(),
            Theme::Dark => "☾".to_string(),
        },
        Action::ToggleHistory => "☰".to_string(),
        Action::MoveUp
        | Action::MoveDown
        | Action::MoveLeft
        | Action::MoveRight
        | Action::Press
        | Action::Quit => String::new(),
    }
}

fn button_style(action: &Action, colors: &Palette) -> Style {
    match action {
        Action::Function(_)
        | Action::Operator(Operator::Power)
        | Action::ToggleAngleMode
        | Action::ToggleTheme
        | Action::ToggleHistory => colors.scientific,
        Action::Clear => colors.clear,
        Action::Equals => colors.equals,
        _ => colors.button,
    }
}

// ============================================================================
// HISTORY
// ============================================================================

fn render_history(history: &[HistoryEntry], colors: &Palette, frame: &mut Frame, area: Rect) {
    let block = Block::bordered()
        .title(" History ")
        .style(colors.background);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if history.is_empty() {
        let empty = Paragraph::new(Span::styled("No calculations yet", colors.history));
        frame.render_widget(empty, inner);
        return;
    }

    let lines = history_lines(history, colors);

    // Keep the newest entries in view
    let visible_height = inner.height as usize;
    let scroll_offset = lines.len().saturating_sub(visible_height);

    let list = Paragraph::new(lines).scroll((scroll_offset as u16, 0));
    frame.render_widget(list, inner);
}

/// Two lines per entry, oldest first: expression, then result.
fn history_lines(history: &[HistoryEntry], colors: &Palette) -> Vec<Line<'static>> {
    history
        .iter()
        .flat_map(|entry| {
            [
                Line::from(Span::styled(entry.expression.clone(), colors.history)),
                Line::from(Span::styled(
                    format!("= {}", entry.result),
                    colors.history_result,
                )),
            ]
        })
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
