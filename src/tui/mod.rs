//! Interactive terminal calculator.
//!
//! Organized along FP/Unix boundaries:
//! - `state`: Pure data types (App, Focus, Action, Transition)
//! - `update`: Pure transitions
//! - `view`: Pure rendering
//! - `theme`: Light and dark palettes
//! - `run`: Effects (terminal, event loop, key mapping)

pub mod run;
pub mod state;
pub mod theme;
pub mod update;
pub mod view;
