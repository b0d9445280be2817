//! scicalc: a scientific calculator for the terminal.

pub mod calculator;
pub mod error;
pub mod expr;
pub mod functions;
pub mod logging;
pub mod number;
pub mod report;
pub mod tui;
pub mod types;
