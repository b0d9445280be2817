//! TUI state algebra: pure types, zero effects.
//!
//! The calculator session owns all domain state (display, history, mode
//! flags). The TUI adds only the focused button of the on-screen keypad.
//! Both the transition function and the rendering layer program against
//! these types.

use crate::calculator::Calculator;
use crate::types::{Operator, ScientificFunction, SessionConfig};

// ============================================================================
// APPLICATION STATE
// ============================================================================

/// Top-level TUI model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct App {
    /// The calculator session: display, history, theme, angle mode.
    pub calculator: Calculator,
    /// Keypad button under the cursor.
    pub focus: Focus,
}

impl App {
    /// Create an App with the given initial mode flags.
    pub fn new(config: SessionConfig) -> Self {
        App {
            calculator: Calculator::with_config(config),
            focus: Focus::default(),
        }
    }
}

// ============================================================================
// KEYPAD
// ============================================================================

pub const GRID_ROWS: usize = 7;
pub const GRID_COLS: usize = 4;

/// The on-screen keypad, row by row. Every user-facing action has a button.
pub const GRID: [[Action; GRID_COLS]; GRID_ROWS] = [
    [
        Action::Function(ScientificFunction::Sin),
        Action::Function(ScientificFunction::Cos),
        Action::Function(ScientificFunction::Tan),
        Action::Function(ScientificFunction::Log),
    ],
    [
        Action::Function(ScientificFunction::Ln),
        Action::Function(ScientificFunction::Sqrt),
        Action::Function(ScientificFunction::Factorial),
        Action::Operator(Operator::Power),
    ],
    [
        Action::Clear,
        Action::Operator(Operator::Divide),
        Action::Operator(Operator::Multiply),
        Action::Operator(Operator::Subtract),
    ],
    [
        Action::Digit(7),
        Action::Digit(8),
        Action::Digit(9),
        Action::Operator(Operator::Add),
    ],
    [
        Action::Digit(4),
        Action::Digit(5),
        Action::Digit(6),
        Action::Equals,
    ],
    [
        Action::Digit(1),
        Action::Digit(2),
        Action::Digit(3),
        Action::Digit(0),
    ],
    [
        Action::Decimal,
        Action::ToggleAngleMode,
        Action::ToggleTheme,
        Action::ToggleHistory,
    ],
];

/// Cursor position on the keypad. Always inside the grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Focus {
    pub row: usize,
    pub col: usize,
}

impl Focus {
    pub fn up(self) -> Self {
        Focus {
            row: self.row.saturating_sub(1),
            ..self
        }
    }

    pub fn down(self) -> Self {
        Focus {
            row: (self.row + 1).min(GRID_ROWS - 1),
            ..self
        }
    }

    pub fn left(self) -> Self {
        Focus {
            col: self.col.saturating_sub(1),
            ..self
        }
    }

    pub fn right(self) -> Self {
        Focus {
            col: (self.col + 1).min(GRID_COLS - 1),
            ..self
        }
    }

    /// The action of the focused button.
    pub fn action(self) -> Action {
        GRID[self.row][self.col]
    }
}

// ============================================================================
// ACTIONS
// ============================================================================

/// Semantic user action, decoupled from raw key events.
///
/// The effects layer maps key presses to Actions; the transition
/// function decides what each one does to the App.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Enter a digit 0-9.
    Digit(u8),
    /// Enter a decimal point.
    Decimal,
    /// Enter a binary operator.
    Operator(Operator),
    /// Enter '(' (true) or ')' (false).
    Paren(bool),
    /// Apply a scientific function to the display.
    Function(ScientificFunction),
    /// Evaluate the display ("=").
    Equals,
    /// Reset the display to "0".
    Clear,
    ToggleTheme,
    ToggleAngleMode,
    ToggleHistory,
    /// Move keypad focus.
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    /// Press the focused keypad button.
    Press,
    /// Quit the application.
    Quit,
}

// ============================================================================
// TRANSITIONS
// ============================================================================

/// Result of a pure state transition.
///
/// Follows the Elm/TEA pattern: the update function describes what
/// happens next, the event loop carries it out.
#[derive(Debug, PartialEq)]
pub enum Transition {
    /// Keep running with this state.
    Continue(App),
    /// Quit the application.
    Quit,
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AngleMode, Theme};

    #[test]
    fn new_app_starts_at_zero_with_focus_top_left() {
        let app = App::new(SessionConfig::default());
        assert_eq!(app.calculator.display(), "0");
        assert_eq!(app.focus, Focus { row: 0, col: 0 });
    }

    #[test]
    fn new_app_honours_config() {
        let app = App::new(SessionConfig {
            theme: Theme::Dark,
            angle_mode: AngleMode::Degrees,
            show_history: true,
        });
        assert_eq!(app.calculator.theme(), Theme::Dark);
        assert_eq!(app.calculator.angle_mode(), AngleMode::Degrees);
        assert!(app.calculator.show_history());
    }

    #[test]
    fn focus_is_clamped_to_grid() {
        let origin = Focus::default();
        assert_eq!(origin.up(), origin);
        assert_eq!(origin.left(), origin);

        let corner = Focus {
            row: GRID_ROWS - 1,
            col: GRID_COLS - 1,
        };
        assert_eq!(corner.down(), corner);
        assert_eq!(corner.right(), corner);
    }

    #[test]
    fn focus_moves_one_step() {
        let f = Focus { row: 2, col: 2 };
        assert_eq!(f.up(), Focus { row: 1, col: 2 });
        assert_eq!(f.down(), Focus { row: 3, col: 2 });
        assert_eq!(f.left(), Focus { row: 2, col: 1 });
        assert_eq!(f.right(), Focus { row: 2, col: 3 });
    }

    #[test]
    fn keypad_has_every_button() {
        let buttons: Vec<Action> = GRID.iter().flatten().copied().collect();

        for d in 0..=9 {
            assert!(buttons.contains(&Action::Digit(d)), "missing digit {}", d);
        }
        for f in ScientificFunction::ALL {
            assert!(buttons.contains(&Action::Function(f)), "missing {}", f.name());
        }
        for op in [
            Operator::Add,
            Operator::Subtract,
            Operator::Multiply,
            Operator::Divide,
            Operator::Power,
        ] {
            assert!(buttons.contains(&Action::Operator(op)));
        }
        for action in [
            Action::Decimal,
            Action::Equals,
            Action::Clear,
            Action::ToggleTheme,
            Action::ToggleAngleMode,
            Action::ToggleHistory,
        ] {
            assert!(buttons.contains(&action));
        }
    }

    #[test]
    fn keypad_never_contains_navigation() {
        for action in GRID.iter().flatten() {
            assert!(!matches!(
                action,
                Action::Press
                    | Action::Quit
                    | Action::MoveUp
                    | Action::MoveDown
                    | Action::MoveLeft
                    | Action::MoveRight
            ));
        }
    }
}
