//! TUI effects boundary: event loop, terminal lifecycle, key mapping.
//!
//! This is the only module with side effects. It wires the pure layers
//! (state, update, view) to the real terminal via crossterm and ratatui.
//!
//! Single-threaded: the loop blocks on the next terminal event, runs one
//! transition to completion, and redraws.

use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;

use crate::types::{Operator, ScientificFunction, SessionConfig};

use super::state::{Action, App, Transition};
use super::update::update;
use super::view::render;

// ============================================================================
// KEY MAPPING
// ============================================================================

/// Map a crossterm key event to a semantic Action.
///
/// Returns None for keys that don't map to any action.
pub fn map_key(key: KeyEvent) -> Option<Action> {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match key.code {
        // Entry
        KeyCode::Char(c @ '0'..='9') => Some(Action::Digit(c as u8 - b'0')),
        KeyCode::Char('.') => Some(Action::Decimal),
        KeyCode::Char('+') => Some(Action::Operator(Operator::Add)),
        KeyCode::Char('-') => Some(Action::Operator(Operator::Subtract)),
        KeyCode::Char('*') => Some(Action::Operator(Operator::Multiply)),
        KeyCode::Char('/') => Some(Action::Operator(Operator::Divide)),
        KeyCode::Char('^') => Some(Action::Operator(Operator::Power)),
        KeyCode::Char('(') => Some(Action::Paren(true)),
        KeyCode::Char(')') => Some(Action::Paren(false)),

        // Evaluation
        KeyCode::Char('=') | KeyCode::Enter => Some(Action::Equals),
        KeyCode::Esc | KeyCode::Delete => Some(Action::Clear),

        // Scientific functions
        KeyCode::Char('s') => Some(Action::Function(ScientificFunction::Sin)),
        KeyCode::Char('c') => Some(Action::Function(ScientificFunction::Cos)),
        KeyCode::Char('t') => Some(Action::Function(ScientificFunction::Tan)),
        KeyCode::Char('l') => Some(Action::Function(ScientificFunction::Log)),
        KeyCode::Char('n') => Some(Action::Function(ScientificFunction::Ln)),
        KeyCode::Char('r') => Some(Action::Function(ScientificFunction::Sqrt)),
        KeyCode::Char('!') => Some(Action::Function(ScientificFunction::Factorial)),

        // Toggles
        KeyCode::Char('d') => Some(Action::ToggleAngleMode),
        KeyCode::Char('T') => Some(Action::ToggleTheme),
        KeyCode::Char('h') => Some(Action::ToggleHistory),

        // Keypad navigation
        KeyCode::Up => Some(Action::MoveUp),
        KeyCode::Down => Some(Action::MoveDown),
        KeyCode::Left => Some(Action::MoveLeft),
        KeyCode::Right => Some(Action::MoveRight),
        KeyCode::Char(' ') => Some(Action::Press),

        KeyCode::Char('q') => Some(Action::Quit),

        _ => None,
    }
}

// ============================================================================
// TERMINAL LIFECYCLE
// ============================================================================

/// Set up the terminal for TUI mode.
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Install a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restoration
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

// ============================================================================
// EVENT LOOP
// ============================================================================

/// Run the calculator until the user quits.
pub fn run(config: SessionConfig) -> io::Result<()> {
    install_panic_hook();
    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, App::new(config));
    restore_terminal()?;
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
) -> io::Result<()> {
    info!("session started");

    loop {
        terminal.draw(|frame| render(&app, frame))?;

        let key = match event::read()? {
            // Windows reports releases too
            Event::Key(key) if key.kind == KeyEventKind::Press => key,
            _ => continue, // ignore mouse, resize, key release
        };

        let Some(action) = map_key(key) else {
            continue;
        };

        if action == Action::Quit {
            info!(recorded = app.calculator.history().len(), "session ended");
        }

        match update(std::mem::take(&mut app), &action) {
            Transition::Continue(next) => app = next,
            Transition::Quit => break,
        }
    }

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
