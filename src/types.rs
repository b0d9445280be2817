//! Domain types for scicalc.

use serde::{Deserialize, Serialize};

// ============================================================================
// ENUMS
// ============================================================================

/// Binary operators that can be appended to the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    /// Exponentiation, entered as "**".
    Power,
}

impl Operator {
    /// Text appended to the display when the operator is entered.
    pub fn token(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
            Operator::Power => "**",
        }
    }

    /// Button label.
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "×",
            Operator::Divide => "÷",
            Operator::Power => "x^y",
        }
    }
}

/// The fixed set of unary scientific functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScientificFunction {
    Sin,
    Cos,
    Tan,
    /// Base-10 logarithm.
    Log,
    /// Natural logarithm.
    Ln,
    Sqrt,
    Factorial,
}

impl ScientificFunction {
    /// All functions, in button order.
    pub const ALL: [ScientificFunction; 7] = [
        ScientificFunction::Sin,
        ScientificFunction::Cos,
        ScientificFunction::Tan,
        ScientificFunction::Log,
        ScientificFunction::Ln,
        ScientificFunction::Sqrt,
        ScientificFunction::Factorial,
    ];

    /// Name used in history entries: `name(display)`.
    pub fn name(self) -> &'static str {
        match self {
            ScientificFunction::Sin => "sin",
            ScientificFunction::Cos => "cos",
            ScientificFunction::Tan => "tan",
            ScientificFunction::Log => "log",
            ScientificFunction::Ln => "ln",
            ScientificFunction::Sqrt => "sqrt",
            ScientificFunction::Factorial => "factorial",
        }
    }

    /// Button label.
    pub fn symbol(self) -> &'static str {
        match self {
            ScientificFunction::Sqrt => "√",
            ScientificFunction::Factorial => "n!",
            other => other.name(),
        }
    }

    /// True for sin/cos/tan, the only functions that read the angle mode.
    pub fn is_trig(self) -> bool {
        matches!(
            self,
            ScientificFunction::Sin | ScientificFunction::Cos | ScientificFunction::Tan
        )
    }
}

/// How trig functions interpret their input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AngleMode {
    #[default]
    Radians,
    Degrees,
}

impl AngleMode {
    pub fn toggled(self) -> Self {
        match self {
            AngleMode::Radians => AngleMode::Degrees,
            AngleMode::Degrees => AngleMode::Radians,
        }
    }

    /// Short indicator shown in the UI.
    pub fn label(self) -> &'static str {
        match self {
            AngleMode::Radians => "RAD",
            AngleMode::Degrees => "DEG",
        }
    }
}

/// Presentation theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

// ============================================================================
// STRUCTS
// ============================================================================

/// One completed computation. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// What was evaluated: the display text, or `func(display)`.
    pub expression: String,
    /// Stringified result.
    pub result: String,
}

impl HistoryEntry {
    pub fn new(expression: impl Into<String>, result: impl Into<String>) -> Self {
        HistoryEntry {
            expression: expression.into(),
            result: result.into(),
        }
    }
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Initial mode flags for a calculator session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionConfig {
    pub theme: Theme,
    pub angle_mode: AngleMode,
    /// Whether the history panel starts visible.
    pub show_history: bool,
}

/// Output format for `eval` reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable lines.
    #[default]
    Human,
    /// Machine-readable JSON.
    Json,
}

// ============================================================================
// TESTS
// ============================================================================
