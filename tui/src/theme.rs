//! Theme and Colors
//!
//! The adapta palette: deep purple and pink accents over a dark
//! terminal background, with green for user-entered text.

use ratatui::style::Color;

/// Primary accent - pink-purple
pub const ACCENT: Color = Color::Rgb(199, 36, 177);

/// Secondary accent - deep purple
pub const ACCENT_DEEP: Color = Color::Rgb(98, 24, 190);

/// User-entered input text
pub const INPUT_GREEN: Color = Color::Rgb(130, 220, 130);

/// Dim/system text
pub const DIM_GRAY: Color = Color::Rgb(100, 100, 100);

/// Error text
pub const ERROR_RED: Color = Color::Rgb(255, 80, 80);

/// Focused element highlight
pub const FOCUS: Color = Color::Rgb(255, 182, 255);

/// Plain body text
pub const BODY: Color = Color::Rgb(230, 230, 230);
