//! Calculator session: display buffer, history log and mode flags.
//!
//! One `Calculator` is owned by one UI session. Every operation runs to
//! completion synchronously and touches only the state it names:
//! entry and evaluation change the display (and append history on
//! success), toggles flip exactly one flag.
//!
//! Failures never escape an operation. Any evaluation error becomes the
//! literal display text "Error" and records nothing.

use tracing::debug;

use crate::error::CalcError;
use crate::expr::evaluate;
use crate::functions::apply;
use crate::number::{format_number, parse_float_prefix};
use crate::types::{AngleMode, HistoryEntry, Operator, ScientificFunction, SessionConfig, Theme};

/// Display value at start-up and after clear.
pub const INITIAL_DISPLAY: &str = "0";

/// Display value after a failed evaluation.
pub const ERROR_DISPLAY: &str = "Error";

#[derive(Debug, Clone, PartialEq)]
pub struct Calculator {
    /// Accumulated expression or last result. Never empty.
    display: String,
    /// Completed computations, oldest first. Append-only.
    history: Vec<HistoryEntry>,
    theme: Theme,
    angle_mode: AngleMode,
    show_history: bool,
}

impl Default for Calculator {
    fn default() -> Self {
        Calculator::with_config(SessionConfig::default())
    }
}

impl Calculator {
    pub fn new() -> Self {
        Calculator::default()
    }

    /// Start a session with the given initial mode flags.
    pub fn with_config(config: SessionConfig) -> Self {
        Calculator {
            display: INITIAL_DISPLAY.to_string(),
            history: Vec::new(),
            theme: config.theme,
            angle_mode: config.angle_mode,
            show_history: config.show_history,
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn angle_mode(&self) -> AngleMode {
        self.angle_mode
    }

    pub fn show_history(&self) -> bool {
        self.show_history
    }

    /// True when the last evaluation failed and nothing was typed since.
    pub fn is_error(&self) -> bool {
        self.display == ERROR_DISPLAY
    }

    // ========================================================================
    // ENTRY
    // ========================================================================

    /// Append a digit, replacing a lone "0".
    ///
    /// Values above 9 are ignored.
    pub fn input_digit(&mut self, digit: u8) {
        let Some(ch) = char::from_digit(u32::from(digit), 10) else {
            return;
        };
        if self.display == INITIAL_DISPLAY {
            self.display = ch.to_string();
        } else {
            self.display.push(ch);
        }
    }

    /// Append a decimal point. "0" becomes "0.".
    pub fn input_decimal(&mut self) {
        self.display.push('.');
    }

    /// Append an operator token. No adjacency checks: "2++" is accepted
    /// here and rejected at evaluation time.
    pub fn input_operator(&mut self, op: Operator) {
        self.display.push_str(op.token());
    }

    /// Enter free text the way a digit is entered: a lone "0" is
    /// replaced, anything else is appended. Empty text is ignored.
    pub fn input_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.display == INITIAL_DISPLAY {
            self.display = text.to_string();
        } else {
            self.display.push_str(text);
        }
    }

    /// Append a parenthesis, replacing a lone "0" when opening.
    pub fn input_paren(&mut self, open: bool) {
        if open {
            if self.display == INITIAL_DISPLAY {
                self.display.clear();
            }
            self.display.push('(');
        } else {
            self.display.push(')');
        }
    }

    // ========================================================================
    // EVALUATION
    // ========================================================================

    /// Apply a scientific function to the numeric prefix of the display.
    ///
    /// Records `name(display) -> result` on success, including NaN and
    /// infinite results.
    pub fn apply_function(&mut self, function: ScientificFunction) {
        let x = parse_float_prefix(&self.display);
        match apply(function, x, self.angle_mode) {
            Ok(value) => {
                let expression = format!("{}({})", function.name(), self.display);
                let result = format_number(value);
                debug!(%expression, %result, "function applied");
                self.record(expression, result);
            }
            Err(err) => self.fail(&err),
        }
    }

    /// Evaluate the display as an arithmetic expression ("=").
    pub fn calculate(&mut self) {
        match evaluate(&self.display) {
            Ok(value) => {
                let expression = self.display.clone();
                let result = format_number(value);
                debug!(%expression, %result, "expression evaluated");
                self.record(expression, result);
            }
            Err(err) => self.fail(&err),
        }
    }

    /// Reset the display. History and flags are untouched.
    pub fn clear(&mut self) {
        self.display = INITIAL_DISPLAY.to_string();
    }

    fn record(&mut self, expression: String, result: String) {
        self.display = result.clone();
        self.history.push(HistoryEntry { expression, result });
    }

    fn fail(&mut self, err: &CalcError) {
        debug!(expression = %self.display, error = %err, "evaluation failed");
        self.display = ERROR_DISPLAY.to_string();
    }

    // ========================================================================
    // TOGGLES
    // ========================================================================

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        debug!(theme = ?self.theme, "theme toggled");
    }

    /// Affects trig functions applied from now on; history is not revisited.
    pub fn toggle_angle_mode(&mut self) {
        self.angle_mode = self.angle_mode.toggled();
        debug!(angle_mode = ?self.angle_mode, "angle mode toggled");
    }

    /// Visibility only; entries are recorded either way.
    pub fn toggle_history(&mut self) {
        self.show_history = !self.show_history;
    }
}

// ============================================================================
// TESTS
// ============================================================================
