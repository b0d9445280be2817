//! Number ⇄ display text conversion.
//!
//! Pure functions, no I/O.
//!
//! The display doubles as input buffer and output value, so the text a
//! result is rendered as must be text the evaluator reads back. Both
//! directions follow the conventions of the classic web calculator:
//! lenient prefix parsing on the way in, shortest round-trip digits on
//! the way out.

/// Exponent at which plain notation switches to exponent notation (1e21).
const MAX_PLAIN_EXPONENT: i32 = 21;

/// Smallest decimal exponent still rendered in plain notation (1e-6).
const MIN_PLAIN_EXPONENT: i32 = -6;

/// Render a number the way the display shows it.
///
/// - `NaN`, `Infinity`, `-Infinity` for non-finite values
/// - integers without a fractional part ("4", not "4.0")
/// - shortest digits that round-trip ("0.30000000000000004")
/// - exponent notation outside `1e-6 <= |v| < 1e21` ("1e+21", "1.5e-7")
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        // Covers -0 as well
        return "0".to_string();
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let (digits, exponent) = decompose(value.abs());
    let k = digits.len() as i32;
    // Position of the decimal point relative to the start of `digits`
    let n = exponent + 1;

    let body = if k <= n && n <= MAX_PLAIN_EXPONENT {
        format!("{}{}", digits, "0".repeat((n - k) as usize))
    } else if 0 < n && n <= MAX_PLAIN_EXPONENT {
        let (int_part, frac_part) = digits.split_at(n as usize);
        format!("{}.{}", int_part, frac_part)
    } else if MIN_PLAIN_EXPONENT < n && n <= 0 {
        format!("0.{}{}", "0".repeat((-n) as usize), digits)
    } else {
        let e = n - 1;
        let e_sign = if e >= 0 { '+' } else { '-' };
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{}e{}{}", first, e_sign, e.abs())
        } else {
            format!("{}.{}e{}{}", first, rest, e_sign, e.abs())
        }
    };

    format!("{}{}", sign, body)
}

/// Split a positive finite number into its shortest significant digits
/// and decimal exponent: 1234.5 → ("12345", 3).
fn decompose(value: f64) -> (String, i32) {
    let sci = format!("{:e}", value);
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exponent = exponent.parse::<i32>().unwrap_or(0);
    let digits: String = mantissa.chars().filter(|c| c.is_ascii_digit()).collect();
    (digits, exponent)
}

/// Parse the longest numeric prefix of `text`.
///
/// Leading whitespace is skipped, an optional sign is honoured, and
/// `Infinity` is recognised. Anything after the numeric prefix is
/// ignored ("2+3" → 2). Returns NaN when no prefix parses ("Error").
pub fn parse_float_prefix(text: &str) -> f64 {
    let t = text.trim_start();
    let bytes = t.as_bytes();
    let mut i = 0;

    let negative = match bytes.first() {
        Some(b'-') => {
            i += 1;
            true
        }
        Some(b'+') => {
            i += 1;
            false
        }
        _ => false,
    };

    if t[i..].starts_with("Infinity") {
        return if negative { f64::NEG_INFINITY } else { f64::INFINITY };
    }

    let int_digits = count_digits(&bytes[i..]);
    i += int_digits;

    let mut frac_digits = 0;
    if bytes.get(i) == Some(&b'.') {
        frac_digits = count_digits(&bytes[i + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            i += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return f64::NAN;
    }

    if matches!(bytes.get(i), Some(b'e') | Some(b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+') | Some(b'-')) {
            j += 1;
        }
        let exp_digits = count_digits(&bytes[j..]);
        if exp_digits > 0 {
            i = j + exp_digits;
        }
    }

    t[..i].parse::<f64>().unwrap_or(f64::NAN)
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

// ============================================================================
// TESTS
// ============================================================================
