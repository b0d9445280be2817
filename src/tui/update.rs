//! Pure state transitions: (App, Action) → Transition.
//!
//! This is the core logic of the TUI. Fully testable without a terminal.

use super::state::{Action, App, Transition};

/// Pure state transition function.
///
/// Takes the current App by value and produces the next transition.
/// The event loop interprets the result.
pub fn update(app: App, action: &Action) -> Transition {
    match action {
        Action::Quit => Transition::Quit,
        Action::Press => {
            // Keypad buttons are never Press, so this recurses at most once
            let pressed = app.focus.action();
            update(app, &pressed)
        }
        Action::MoveUp | Action::MoveDown | Action::MoveLeft | Action::MoveRight => {
            Transition::Continue(update_focus(app, action))
        }
        _ => Transition::Continue(update_calculator(app, action)),
    }
}

// ============================================================================
// HANDLERS
// ============================================================================

/// Keypad navigation: the calculator is untouched.
fn update_focus(mut app: App, action: &Action) -> App {
    app.focus = match action {
        Action::MoveUp => app.focus.up(),
        Action::MoveDown => app.focus.down(),
        Action::MoveLeft => app.focus.left(),
        Action::MoveRight => app.focus.right(),
        _ => app.focus,
    };
    app
}

/// Calculator operations: the focus is untouched.
fn update_calculator(mut app: App, action: &Action) -> App {
    let calc = &mut app.calculator;
    match *action {
        Action::Digit(d) => calc.input_digit(d),
        Action::Decimal => calc.input_decimal(),
        Action::Operator(op) => calc.input_operator(op),
        Action::Paren(open) => calc.input_paren(open),
        Action::Function(f) => calc.apply_function(f),
        Action::Equals => calc.calculate(),
        Action::Clear => calc.clear(),
        Action::ToggleTheme => calc.toggle_theme(),
        Action::ToggleAngleMode => calc.toggle_angle_mode(),
        Action::ToggleHistory => calc.toggle_history(),
        // Handled by `update`
        Action::MoveUp
        | Action::MoveDown
        | Action::MoveLeft
        | Action::MoveRight
        | Action::Press
        | Action::Quit => {}
    }
    app
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::state::Focus;
    use crate::types::{AngleMode, HistoryEntry, Operator, ScientificFunction, Theme};

    fn app() -> App {
        App::default()
    }

    /// Apply actions in order, panicking if any of them quits.
    fn apply_all(app: App, actions: &[Action]) -> App {
        actions.iter().fold(app, |app, action| match update(app, action) {
            Transition::Continue(next) => next,
            Transition::Quit => panic!("unexpected quit on {:?}", action),
        })
    }

    #[test]
    fn quit_quits() {
        assert_eq!(update(app(), &Action::Quit), Transition::Quit);
    }

    #[test]
    fn typing_and_equals_records_history() {
        let app = apply_all(
            app(),
            &[
                Action::Digit(2),
                Action::Operator(Operator::Add),
                Action::Digit(2),
                Action::Equals,
            ],
        );
        assert_eq!(app.calculator.display(), "4");
        assert_eq!(app.calculator.history(), &[HistoryEntry::new("2+2", "4")]);
    }

    #[test]
    fn malformed_expression_shows_error() {
        let app = apply_all(
            app(),
            &[
                Action::Digit(2),
                Action::Operator(Operator::Add),
                Action::Operator(Operator::Add),
                Action::Equals,
            ],
        );
        assert_eq!(app.calculator.display(), "Error");
        assert!(app.calculator.history().is_empty());
    }

    #[test]
    fn clear_after_error_recovers() {
        let app = apply_all(
            app(),
            &[Action::Operator(Operator::Divide), Action::Equals, Action::Clear],
        );
        assert_eq!(app.calculator.display(), "0");
    }

    #[test]
    fn parentheses_reach_the_display() {
        let app = apply_all(
            app(),
            &[
                Action::Paren(true),
                Action::Digit(1),
                Action::Paren(false),
            ],
        );
        assert_eq!(app.calculator.display(), "(1)");
    }

    #[test]
    fn function_action_applies_function() {
        let app = apply_all(
            app(),
            &[
                Action::Digit(5),
                Action::Function(ScientificFunction::Factorial),
            ],
        );
        assert_eq!(app.calculator.display(), "120");
    }

    #[test]
    fn degree_toggle_then_sin() {
        let app = apply_all(
            app(),
            &[
                Action::ToggleAngleMode,
                Action::Digit(9),
                Action::Digit(0),
                Action::Function(ScientificFunction::Sin),
            ],
        );
        assert_eq!(app.calculator.display(), "1");
        assert_eq!(app.calculator.angle_mode(), AngleMode::Degrees);
    }

    #[test]
    fn toggles_flip_flags_only() {
        let before = apply_all(app(), &[Action::Digit(3)]);
        let after = apply_all(
            before.clone(),
            &[Action::ToggleTheme, Action::ToggleHistory],
        );
        assert_eq!(after.calculator.display(), before.calculator.display());
        assert_eq!(after.calculator.theme(), Theme::Dark);
        assert!(after.calculator.show_history());
    }

    #[test]
    fn navigation_moves_focus_without_touching_calculator() {
        let start = apply_all(app(), &[Action::Digit(8)]);
        let moved = apply_all(start.clone(), &[Action::MoveDown, Action::MoveRight]);
        assert_eq!(moved.focus, Focus { row: 1, col: 1 });
        assert_eq!(moved.calculator, start.calculator);
    }

    #[test]
    fn press_triggers_focused_button() {
        // Row 3, col 0 is "7"
        let app = apply_all(
            app(),
            &[
                Action::MoveDown,
                Action::MoveDown,
                Action::MoveDown,
                Action::Press,
            ],
        );
        assert_eq!(app.calculator.display(), "7");
        assert_eq!(app.focus, Focus { row: 3, col: 0 });
    }

    #[test]
    fn press_on_theme_button_toggles_theme() {
        let mut start = app();
        start.focus = Focus { row: 6, col: 2 };
        let app = apply_all(start, &[Action::Press]);
        assert_eq!(app.calculator.theme(), Theme::Dark);
    }
}
