//! Evaluation failures.
//!
//! Every variant is an EvaluationError in the user-facing sense: the
//! calculator collapses all of them into the literal display "Error".
//! The variants exist for logs and tests.

use thiserror::Error;

/// Result alias for evaluation and function application.
pub type CalcResult<T> = Result<T, CalcError>;

/// Why an expression or function application failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// Nothing to evaluate.
    #[error("empty expression")]
    Empty,

    /// A character outside the arithmetic alphabet.
    #[error("unexpected character '{ch}' at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    /// An identifier other than `NaN` / `Infinity`.
    #[error("unknown identifier '{0}'")]
    UnknownIdentifier(String),

    /// A numeric literal that does not parse (e.g. "1.2.3", "1e").
    #[error("malformed number '{0}'")]
    MalformedNumber(String),

    /// A well-formed token in a position the grammar does not allow.
    #[error("unexpected token '{token}' at position {pos}")]
    UnexpectedToken { token: String, pos: usize },

    /// Input ended while an operand or ')' was still expected.
    #[error("unexpected end of expression")]
    UnexpectedEnd,

    /// '(' without a matching ')'.
    #[error("unbalanced parenthesis")]
    UnbalancedParens,

    /// `-2 ** 2` style: a unary expression as the base of `**`.
    #[error("unary operator cannot be the base of '**'; use parentheses")]
    UnaryPowerBase,

    /// Parentheses nested deeper than the evaluator accepts.
    #[error("expression nested too deeply")]
    NestingTooDeep,

    /// `++` or `--`: increment/decrement, not arithmetic.
    #[error("'{op}' at position {pos} is not an arithmetic operator")]
    IncrementOperator { op: &'static str, pos: usize },

    /// A division or remainder of finite operands that came out infinite.
    #[error("division produced an infinite result")]
    InfiniteQuotient,

    /// Factorial of a finite non-integer.
    #[error("factorial is only defined for integers, got {0}")]
    NonIntegerFactorial(f64),
}
