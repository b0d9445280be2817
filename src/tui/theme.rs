//! TUI color palettes.
//!
//! Two palettes, light and dark, with the same semantic slots. Pure
//! data consumed by the rendering layer.
//!
//! Slot semantics:
//! - Number pad: neutral grays
//! - Scientific functions: indigo
//! - Clear: red, equals: green
//! - Focused button: reversed
//! - Error display: red text

use ratatui::style::{Color, Modifier, Style};

use crate::types::Theme;

// ============================================================================
// COLORS
// ============================================================================

const GRAY_100: Color = Color::Rgb(243, 244, 246);
const GRAY_200: Color = Color::Rgb(229, 231, 235);
const GRAY_300: Color = Color::Rgb(209, 213, 219);
const GRAY_600: Color = Color::Rgb(75, 85, 99);
const GRAY_700: Color = Color::Rgb(55, 65, 81);
const GRAY_800: Color = Color::Rgb(31, 41, 55);
const GRAY_900: Color = Color::Rgb(17, 24, 39);
const INDIGO_400: Color = Color::Rgb(129, 140, 248);
const INDIGO_500: Color = Color::Rgb(99, 102, 241);
const INDIGO_600: Color = Color::Rgb(79, 70, 229);
const RED_500: Color = Color::Rgb(239, 68, 68);
const GREEN_500: Color = Color::Rgb(34, 197, 94);

// ============================================================================
// PALETTES
// ============================================================================

/// Styles for every widget slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Whole-screen background.
    pub background: Style,
    /// Title bar.
    pub title: Style,
    /// Display box text.
    pub display: Style,
    /// Display box text when showing "Error".
    pub display_error: Style,
    /// Angle-mode indicator.
    pub mode: Style,
    /// Digits, decimal point, operators.
    pub button: Style,
    /// Scientific functions and power.
    pub scientific: Style,
    pub clear: Style,
    pub equals: Style,
    /// Modifier layered over the focused button.
    pub focused: Modifier,
    /// History expression lines.
    pub history: Style,
    /// History result lines.
    pub history_result: Style,
    /// Footer / help line.
    pub help: Style,
}

pub const LIGHT: Palette = Palette {
    background: Style::new().fg(GRAY_800).bg(Color::White),
    title: Style::new().fg(GRAY_800).add_modifier(Modifier::BOLD),
    display: Style::new().fg(GRAY_800).bg(GRAY_100).add_modifier(Modifier::BOLD),
    display_error: Style::new().fg(RED_500).bg(GRAY_100).add_modifier(Modifier::BOLD),
    mode: Style::new().fg(INDIGO_600),
    button: Style::new().fg(GRAY_800).bg(GRAY_200),
    scientific: Style::new().fg(Color::White).bg(INDIGO_500),
    clear: Style::new().fg(Color::White).bg(RED_500),
    equals: Style::new().fg(Color::White).bg(GREEN_500),
    focused: Modifier::REVERSED,
    history: Style::new().fg(GRAY_600),
    history_result: Style::new().fg(GRAY_600).add_modifier(Modifier::BOLD),
    help: Style::new().fg(GRAY_600),
};

pub const DARK: Palette = Palette {
    background: Style::new().fg(Color::White).bg(GRAY_900),
    title: Style::new().fg(Color::White).add_modifier(Modifier::BOLD),
    display: Style::new().fg(Color::White).bg(GRAY_700).add_modifier(Modifier::BOLD),
    display_error: Style::new().fg(RED_500).bg(GRAY_700).add_modifier(Modifier::BOLD),
    mode: Style::new().fg(INDIGO_400),
    button: Style::new().fg(Color::White).bg(GRAY_700),
    scientific: Style::new().fg(Color::White).bg(INDIGO_600),
    clear: Style::new().fg(Color::White).bg(RED_500),
    equals: Style::new().fg(Color::White).bg(GREEN_500),
    focused: Modifier::REVERSED,
    history: Style::new().fg(GRAY_300),
    history_result: Style::new().fg(GRAY_300).add_modifier(Modifier::BOLD),
    help: Style::new().fg(GRAY_300),
};

/// The palette for a theme.
pub fn palette(theme: Theme) -> &'static Palette {
    match theme {
        Theme::Light => &LIGHT,
        Theme::Dark => &DARK,
    }
}

// ============================================================================
// TESTS
// ============================================================================
