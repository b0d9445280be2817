//! Scientific function table.
//!
//! Pure functions: (function, input, angle mode) → number.
//! NaN and infinities are ordinary results here, never errors.

use std::f64::consts::PI;

use crate::error::{CalcError, CalcResult};
use crate::types::{AngleMode, ScientificFunction};

/// Largest n whose factorial is finite in f64 (170! ≈ 7.26e306).
const MAX_FINITE_FACTORIAL: f64 = 170.0;

/// Apply a scientific function to `x`.
///
/// Trig functions read `x` as degrees when `angle_mode` is
/// [`AngleMode::Degrees`]; every other function ignores it.
///
/// # Errors
/// Only factorial fails, for finite non-integer input.
pub fn apply(function: ScientificFunction, x: f64, angle_mode: AngleMode) -> CalcResult<f64> {
    let value = match function {
        ScientificFunction::Sin => to_radians(x, angle_mode).sin(),
        ScientificFunction::Cos => to_radians(x, angle_mode).cos(),
        ScientificFunction::Tan => to_radians(x, angle_mode).tan(),
        ScientificFunction::Log => x.log10(),
        ScientificFunction::Ln => x.ln(),
        ScientificFunction::Sqrt => x.sqrt(),
        ScientificFunction::Factorial => factorial(x)?,
    };
    Ok(value)
}

fn to_radians(x: f64, angle_mode: AngleMode) -> f64 {
    match angle_mode {
        AngleMode::Radians => x,
        AngleMode::Degrees => x * PI / 180.0,
    }
}

/// n! by iterative multiplication.
///
/// Negative input gives NaN, 0 gives 1. NaN gives 1: the product loop
/// never runs. Integers above 170 overflow to infinity without looping.
fn factorial(x: f64) -> CalcResult<f64> {
    if x.is_nan() {
        return Ok(1.0);
    }
    if x < 0.0 {
        return Ok(f64::NAN);
    }
    if x == 0.0 {
        return Ok(1.0);
    }
    if x.is_infinite() {
        return Ok(f64::INFINITY);
    }
    // Checked before the overflow cap so 170.5 fails like 2.5
    if x.fract() != 0.0 {
        return Err(CalcError::NonIntegerFactorial(x));
    }
    if x > MAX_FINITE_FACTORIAL {
        return Ok(f64::INFINITY);
    }

    let mut result = 1.0;
    let mut i = 1.0;
    while i <= x {
        result *= i;
        i += 1.0;
    }
    Ok(result)
}

// ============================================================================
// TESTS
// ============================================================================
