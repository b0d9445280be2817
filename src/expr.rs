//! Arithmetic expression evaluation.
//!
//! A tokenizer and a recursive-descent evaluator over numeric literals
//! and a fixed operator set. Nothing else is accepted: identifiers other
//! than `NaN` and `Infinity` are rejected, so display text can never
//! execute anything.
//!
//! Grammar, loosest binding first:
//!
//! ```text
//! additive := term (('+' | '-') term)*
//! term     := power (('*' | '/' | '%') power)*
//! power    := unary | primary ('**' | '^') power
//! unary    := ('+' | '-') unary | primary
//! primary  := number | 'NaN' | 'Infinity' | '(' additive ')'
//! ```
//!
//! `**` is right-associative and its base may not be a unary expression:
//! `-2**2` is rejected, `(-2)**2` and `2**-2` are fine.
//!
//! Two adjacent `+` or two adjacent `-` form an increment/decrement token
//! and are always rejected: `2++3` and `2--3` fail, `2+-3` and `2- -3` work.
//!
//! A `/` or `%` of finite operands with an infinite result fails (`1/0`,
//! `1e308/0.1`). NaN quotients (`0/0`, `5%0`) are ordinary results.

use std::fmt;

use crate::error::{CalcError, CalcResult};

/// Deepest parenthesis / unary nesting accepted.
const MAX_DEPTH: usize = 256;

/// Evaluate an arithmetic expression.
///
/// # Errors
/// Returns a [`CalcError`] for empty input, characters or identifiers
/// outside the grammar, malformed numbers, misplaced tokens, unbalanced
/// parentheses, `++`/`--`, and divisions whose finite operands give an
/// infinite quotient.
pub fn evaluate(input: &str) -> CalcResult<f64> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(CalcError::Empty);
    }

    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        depth: 0,
    };
    let value = parser.additive()?;

    match parser.peek() {
        None => Ok(value),
        Some(Spanned { token: Token::RParen, .. }) => Err(CalcError::UnbalancedParens),
        Some(spanned) => Err(spanned.unexpected()),
    }
}

// ============================================================================
// TOKENS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Num(f64),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    /// `**` or `^`
    Pow,
    LParen,
    RParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Num(n) => write!(f, "{}", n),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::Percent => write!(f, "%"),
            Token::Pow => write!(f, "**"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
        }
    }
}

/// A token and the character offset it started at.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Spanned {
    token: Token,
    pos: usize,
}

impl Spanned {
    fn unexpected(&self) -> CalcError {
        CalcError::UnexpectedToken {
            token: self.token.to_string(),
            pos: self.pos,
        }
    }
}

fn tokenize(input: &str) -> CalcResult<Vec<Spanned>> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        let pos = i;

        let token = match ch {
            c if c.is_whitespace() => {
                i += 1;
                continue;
            }
            '0'..='9' | '.' => {
                let (value, len) = scan_number(&chars[i..])?;
                i += len;
                tokens.push(Spanned {
                    token: Token::Num(value),
                    pos,
                });
                continue;
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let len = chars[i..]
                    .iter()
                    .take_while(|c| c.is_ascii_alphanumeric() || **c == '_')
                    .count();
                let word: String = chars[i..i + len].iter().collect();
                let value = match word.as_str() {
                    "NaN" => f64::NAN,
                    "Infinity" => f64::INFINITY,
                    _ => return Err(CalcError::UnknownIdentifier(word)),
                };
                i += len;
                tokens.push(Spanned {
                    token: Token::Num(value),
                    pos,
                });
                continue;
            }
            '*' if chars.get(i + 1) == Some(&'*') => {
                i += 1;
                Token::Pow
            }
            '+' if chars.get(i + 1) == Some(&'+') => {
                return Err(CalcError::IncrementOperator { op: "++", pos });
            }
            '-' | '−' if matches!(chars.get(i + 1), Some('-') | Some('−')) => {
                return Err(CalcError::IncrementOperator { op: "--", pos });
            }
            '+' => Token::Plus,
            '-' | '−' => Token::Minus,
            '*' | '×' => Token::Star,
            '/' | '÷' => Token::Slash,
            '%' => Token::Percent,
            '^' => Token::Pow,
            '(' => Token::LParen,
            ')' => Token::RParen,
            other => return Err(CalcError::UnexpectedChar { ch: other, pos }),
        };

        tokens.push(Spanned { token, pos });
        i += 1;
    }

    Ok(tokens)
}

/// Scan a numeric literal at the start of `chars`.
///
/// Returns the value and the number of chars consumed. A literal must
/// not run straight into a letter, digit or another '.' ("1.2.3", "2e",
/// "3x" are malformed).
///
/// Leading zeros are decimal: "010" is ten. Sloppy-mode JavaScript would
/// read it as legacy octal (eight); that reading is not reproduced.
fn scan_number(chars: &[char]) -> CalcResult<(f64, usize)> {
    let digits = |from: usize| chars[from..].iter().take_while(|c| c.is_ascii_digit()).count();

    let int_len = digits(0);
    let mut len = int_len;
    let mut frac_len = 0;

    if chars.get(len) == Some(&'.') {
        frac_len = digits(len + 1);
        len += 1 + frac_len;
    }

    let malformed = |len: usize| {
        let end = (len + 1).min(chars.len());
        CalcError::MalformedNumber(chars[..end].iter().collect())
    };

    if int_len == 0 && frac_len == 0 {
        return Err(malformed(len.max(1) - 1));
    }

    if matches!(chars.get(len), Some('e') | Some('E')) {
        let mut j = len + 1;
        if matches!(chars.get(j), Some('+') | Some('-')) {
            j += 1;
        }
        let exp_len = digits(j);
        if exp_len == 0 {
            return Err(malformed(j));
        }
        len = j + exp_len;
    }

    if let Some(next) = chars.get(len) {
        if next.is_ascii_alphanumeric() || *next == '.' || *next == '_' {
            return Err(malformed(len));
        }
    }

    let text: String = chars[..len].iter().collect();
    let value = text
        .parse::<f64>()
        .map_err(|_| CalcError::MalformedNumber(text.clone()))?;
    Ok((value, len))
}

// ============================================================================
// PARSER / EVALUATOR
// ============================================================================

struct Parser<'a> {
    tokens: &'a [Spanned],
    pos: usize,
    depth: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Spanned> {
        self.tokens.get(self.pos)
    }

    fn peek_token(&self) -> Option<Token> {
        self.peek().map(|s| s.token)
    }

    fn advance(&mut self) -> Option<Spanned> {
        let spanned = self.tokens.get(self.pos).copied();
        self.pos += 1;
        spanned
    }

    fn descend(&mut self) -> CalcResult<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(CalcError::NestingTooDeep);
        }
        Ok(())
    }

    fn additive(&mut self) -> CalcResult<f64> {
        let mut value = self.term()?;
        loop {
            match self.peek_token() {
                Some(Token::Plus) => {
                    self.advance();
                    value += self.term()?;
                }
                Some(Token::Minus) => {
                    self.advance();
                    value -= self.term()?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn term(&mut self) -> CalcResult<f64> {
        let mut value = self.power()?;
        loop {
            match self.peek_token() {
                Some(Token::Star) => {
                    self.advance();
                    value *= self.power()?;
                }
                Some(Token::Slash) => {
                    self.advance();
                    let divisor = self.power()?;
                    value = checked_quotient(value, divisor, value / divisor)?;
                }
                Some(Token::Percent) => {
                    self.advance();
                    let divisor = self.power()?;
                    value = checked_quotient(value, divisor, value % divisor)?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn power(&mut self) -> CalcResult<f64> {
        if matches!(self.peek_token(), Some(Token::Plus) | Some(Token::Minus)) {
            let value = self.unary()?;
            if self.peek_token() == Some(Token::Pow) {
                return Err(CalcError::UnaryPowerBase);
            }
            return Ok(value);
        }

        let base = self.primary()?;
        if self.peek_token() == Some(Token::Pow) {
            self.advance();
            self.descend()?;
            let exponent = self.power()?;
            self.depth -= 1;
            return Ok(base.powf(exponent));
        }
        Ok(base)
    }

    fn unary(&mut self) -> CalcResult<f64> {
        match self.peek_token() {
            Some(Token::Minus) => {
                self.advance();
                self.descend()?;
                let value = self.unary()?;
                self.depth -= 1;
                Ok(-value)
            }
            Some(Token::Plus) => {
                self.advance();
                self.descend()?;
                let value = self.unary()?;
                self.depth -= 1;
                Ok(value)
            }
            _ => self.primary(),
        }
    }

    fn primary(&mut self) -> CalcResult<f64> {
        let spanned = self.advance().ok_or(CalcError::UnexpectedEnd)?;
        match spanned.token {
            Token::Num(value) => Ok(value),
            Token::LParen => {
                self.descend()?;
                let value = self.additive()?;
                self.depth -= 1;
                match self.advance() {
                    Some(Spanned { token: Token::RParen, .. }) => Ok(value),
                    None => Err(CalcError::UnbalancedParens),
                    Some(other) => Err(other.unexpected()),
                }
            }
            _ => Err(spanned.unexpected()),
        }
    }
}

/// Reject an infinite quotient of finite operands.
fn checked_quotient(dividend: f64, divisor: f64, quotient: f64) -> CalcResult<f64> {
    if quotient.is_infinite() && dividend.is_finite() && divisor.is_finite() {
        return Err(CalcError::InfiniteQuotient);
    }
    Ok(quotient)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(input: &str) -> f64 {
        evaluate(input).unwrap_or_else(|e| panic!("{:?} failed: {}", input, e))
    }

    // -- Arithmetic --

    #[test]
    fn adds_simple_sum() {
        assert_eq!(eval("2+2"), 4.0);
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        assert_eq!(eval("2+3*4"), 14.0);
        assert_eq!(eval("10-6/2"), 7.0);
    }

    #[test]
    fn subtraction_is_left_associative() {
        assert_eq!(eval("10-4-3"), 3.0);
        assert_eq!(eval("64/4/2"), 8.0);
    }

    #[test]
    fn power_is_right_associative() {
        assert_eq!(eval("2**3**2"), 512.0);
        assert_eq!(eval("2^3^2"), 512.0);
    }

    #[test]
    fn power_binds_tighter_than_multiplication() {
        assert_eq!(eval("3*2**3"), 24.0);
    }

    #[test]
    fn negative_exponent_is_allowed() {
        assert_eq!(eval("2**-2"), 0.25);
    }

    #[test]
    fn parentheses_override_precedence() {
        assert_eq!(eval("(2+3)*4"), 20.0);
        assert_eq!(eval("(-2)**2"), 4.0);
    }

    #[test]
    fn unary_signs_stack() {
        assert_eq!(eval("-3"), -3.0);
        assert_eq!(eval("2+-3"), -1.0);
        assert_eq!(eval("2-+3"), -1.0);
        assert_eq!(eval("2*-3"), -6.0);
        assert_eq!(eval("2+-+3"), -1.0);
    }

    #[test]
    fn separated_signs_are_unary() {
        assert_eq!(eval("2- -3"), 5.0);
        assert_eq!(eval("2+ +3"), 5.0);
    }

    #[test]
    fn remainder_follows_float_semantics() {
        assert_eq!(eval("7%3"), 1.0);
        assert_eq!(eval("-7%3"), -1.0);
    }

    #[test]
    fn decimal_literals() {
        assert_eq!(eval("0.5+.5"), 1.0);
        assert_eq!(eval("5.*2"), 10.0);
        assert_eq!(eval("1e3+5E-1"), 1000.5);
    }

    #[test]
    fn leading_zeros_are_decimal() {
        assert_eq!(eval("5+010"), 15.0);
    }

    #[test]
    fn whitespace_is_ignored() {
        assert_eq!(eval(" 1 +\t2 "), 3.0);
    }

    #[test]
    fn display_symbols_are_accepted() {
        assert_eq!(eval("6×7"), 42.0);
        assert_eq!(eval("9÷3−1"), 2.0);
    }

    #[test]
    fn nan_and_infinity_literals_propagate() {
        assert!(eval("NaN+1").is_nan());
        assert_eq!(eval("Infinity*2"), f64::INFINITY);
        assert_eq!(eval("-Infinity"), f64::NEG_INFINITY);
    }

    #[test]
    fn overflow_is_a_result_not_an_error() {
        assert_eq!(eval("1e308*10"), f64::INFINITY);
    }

    // -- Failures --

    #[test]
    fn trailing_operator_is_unexpected_end() {
        assert_eq!(evaluate("2+"), Err(CalcError::UnexpectedEnd));
        assert_eq!(evaluate("2*"), Err(CalcError::UnexpectedEnd));
    }

    #[test]
    fn increment_and_decrement_are_rejected() {
        assert_eq!(
            evaluate("2++3"),
            Err(CalcError::IncrementOperator { op: "++", pos: 1 })
        );
        assert_eq!(
            evaluate("2--3"),
            Err(CalcError::IncrementOperator { op: "--", pos: 1 })
        );
        assert!(evaluate("2++").is_err());
        assert!(evaluate("--3").is_err());
    }

    #[test]
    fn doubled_binary_operator_is_rejected() {
        assert!(matches!(
            evaluate("2*/3"),
            Err(CalcError::UnexpectedToken { .. })
        ));
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(evaluate(""), Err(CalcError::Empty));
        assert_eq!(evaluate("   "), Err(CalcError::Empty));
    }

    #[test]
    fn identifiers_are_rejected() {
        assert_eq!(
            evaluate("Error5"),
            Err(CalcError::UnknownIdentifier("Error5".to_string()))
        );
        assert!(matches!(
            evaluate("alert(1)"),
            Err(CalcError::UnknownIdentifier(_))
        ));
    }

    #[test]
    fn foreign_characters_are_rejected() {
        assert_eq!(
            evaluate("2;3"),
            Err(CalcError::UnexpectedChar { ch: ';', pos: 1 })
        );
    }

    #[test]
    fn malformed_numbers_are_rejected() {
        assert!(matches!(evaluate("1.2.3"), Err(CalcError::MalformedNumber(_))));
        assert!(matches!(evaluate("2e"), Err(CalcError::MalformedNumber(_))));
        assert!(matches!(evaluate("."), Err(CalcError::MalformedNumber(_))));
        assert!(matches!(evaluate("3x"), Err(CalcError::MalformedNumber(_))));
    }

    #[test]
    fn unbalanced_parentheses_are_rejected() {
        assert_eq!(evaluate("(1+2"), Err(CalcError::UnbalancedParens));
        assert_eq!(evaluate("1+2)"), Err(CalcError::UnbalancedParens));
    }

    #[test]
    fn empty_parentheses_are_rejected() {
        assert!(matches!(
            evaluate("()"),
            Err(CalcError::UnexpectedToken { .. })
        ));
    }

    #[test]
    fn unary_base_of_power_is_rejected() {
        assert_eq!(evaluate("-2**2"), Err(CalcError::UnaryPowerBase));
    }

    #[test]
    fn infinite_quotient_of_finite_operands_is_rejected() {
        assert_eq!(evaluate("1/0"), Err(CalcError::InfiniteQuotient));
        assert_eq!(evaluate("-1/0"), Err(CalcError::InfiniteQuotient));
        assert_eq!(evaluate("1e308/0.1"), Err(CalcError::InfiniteQuotient));
    }

    #[test]
    fn nan_quotients_are_results() {
        assert!(eval("0/0").is_nan());
        assert!(eval("5%0").is_nan());
    }

    #[test]
    fn infinite_operands_may_divide_to_infinity() {
        assert_eq!(eval("Infinity/2"), f64::INFINITY);
        assert_eq!(eval("Infinity/0"), f64::INFINITY);
    }

    #[test]
    fn deep_nesting_is_rejected_without_overflowing() {
        let input = format!("{}1{}", "(".repeat(10_000), ")".repeat(10_000));
        assert_eq!(evaluate(&input), Err(CalcError::NestingTooDeep));
    }

    #[test]
    fn moderate_nesting_is_fine() {
        let input = format!("{}1{}", "(".repeat(100), ")".repeat(100));
        assert_eq!(eval(&input), 1.0);
    }
}
