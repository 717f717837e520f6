//! Color constants for the terminal user interface.

use ratatui::style::Color;

/// Header and status bar background.
pub const NAVY: Color = Color::Rgb(20, 40, 90);
/// Text on completed tasks.
pub const FADED_GREEN: Color = Color::Rgb(90, 140, 90);
/// Text on tasks in the trash.
pub const ASH: Color = Color::Rgb(110, 110, 110);
/// Confirmation dialog background.
pub const DARK_RED: Color = Color::Rgb(114, 0, 0);
/// Backdrop behind the QR code.
pub const BACKDROP: Color = Color::Rgb(0, 0, 0);
