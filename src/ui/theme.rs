//! Color palettes for the light and dark themes
//!
//! Provides:
//! - Theme struct with all UI colors
//! - Light and dark presets
//! - Hex color parsing for the accent override

use ratatui::style::Color;
use thiserror::Error;

use crate::appearance::ThemeMode;

/// Theme colors for the UI
#[derive(Debug, Clone)]
pub struct Theme {
    pub mode: ThemeMode,
    /// Panels drawn over the backdrop
    pub panel_bg: Color,
    /// Panel borders
    pub panel_border: Color,
    /// Primary text color
    pub foreground: Color,
    /// Accent color (titles, highlights, quote markers)
    pub accent: Color,
    /// Text drawn on top of the accent color
    pub accent_fg: Color,
    /// Dimmed text (hints, weekday labels)
    pub dimmed: Color,
    /// More dimmed text (days outside the month)
    pub dimmed_alt: Color,
    /// Day cell inside the shown month
    pub cell_bg: Color,
    /// Day cell of a neighbouring month
    pub cell_bg_outside: Color,
    /// Background of the selected cell
    pub selection_bg: Color,
    /// Today's cell
    pub today_bg: Color,
    pub today_fg: Color,
    /// Analog clock second hand
    pub second_hand: Color,
    /// Validation notices
    pub alert: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

impl Theme {
    pub fn light() -> Self {
        Self {
            mode: ThemeMode::Light,
            panel_bg: Color::Rgb(255, 255, 255),       // #ffffff
            panel_border: Color::Rgb(229, 231, 235),   // #e5e7eb (gray-200)
            foreground: Color::Rgb(31, 41, 55),        // #1f2937 (gray-800)
            accent: Color::Rgb(79, 70, 229),           // #4f46e5 (indigo-600)
            accent_fg: Color::Rgb(255, 255, 255),      // #ffffff
            dimmed: Color::Rgb(107, 114, 128),         // #6b7280 (gray-500)
            dimmed_alt: Color::Rgb(156, 163, 175),     // #9ca3af (gray-400)
            cell_bg: Color::Rgb(255, 255, 255),        // #ffffff
            cell_bg_outside: Color::Rgb(249, 250, 251), // #f9fafb (gray-50)
            selection_bg: Color::Rgb(224, 231, 255),   // #e0e7ff (indigo-100)
            today_bg: Color::Rgb(99, 102, 241),        // #6366f1 (indigo-500)
            today_fg: Color::Rgb(255, 255, 255),       // #ffffff
            second_hand: Color::Rgb(244, 67, 54),      // #f44336
            alert: Color::Rgb(220, 38, 38),            // #dc2626 (red-600)
        }
    }

    pub fn dark() -> Self {
        Self {
            mode: ThemeMode::Dark,
            panel_bg: Color::Rgb(31, 41, 55),          // #1f2937 (gray-800)
            panel_border: Color::Rgb(55, 65, 81),      // #374151 (gray-700)
            foreground: Color::Rgb(243, 244, 246),     // #f3f4f6 (gray-100)
            accent: Color::Rgb(192, 132, 252),         // #c084fc (purple-400)
            accent_fg: Color::Rgb(17, 24, 39),         // #111827 (gray-900)
            dimmed: Color::Rgb(156, 163, 175),         // #9ca3af (gray-400)
            dimmed_alt: Color::Rgb(107, 114, 128),     // #6b7280 (gray-500)
            cell_bg: Color::Rgb(55, 65, 81),           // #374151 (gray-700)
            cell_bg_outside: Color::Rgb(31, 41, 55),   // #1f2937 (gray-800)
            selection_bg: Color::Rgb(75, 85, 99),      // #4b5563 (gray-600)
            today_bg: Color::Rgb(147, 51, 234),        // #9333ea (purple-600)
            today_fg: Color::Rgb(255, 255, 255),       // #ffffff
            second_hand: Color::Rgb(248, 113, 113),    // #f87171
            alert: Color::Rgb(248, 113, 113),          // #f87171 (red-400)
        }
    }

    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }

    /// Replace the accent color, keeping everything else
    pub fn with_accent(mut self, accent: Option<Color>) -> Self {
        if let Some(color) = accent {
            self.accent = color;
        }
        self
    }
}

/// Parse hex color string to Color
/// Supports: #rrggbb, #rgb, rrggbb, rgb
pub fn parse_hex_color(s: &str) -> Result<Color, ColorError> {
    let s = s.trim().trim_start_matches('#');
    let channel = |range: std::ops::Range<usize>| {
        s.get(range)
            .and_then(|hex| u8::from_str_radix(hex, 16).ok())
            .ok_or(ColorError::InvalidHex)
    };

    match s.len() {
        // #rgb -> #rrggbb
        3 => Ok(Color::Rgb(
            channel(0..1)? * 17,
            channel(1..2)? * 17,
            channel(2..3)? * 17,
        )),
        6 => Ok(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
        _ => Err(ColorError::InvalidLength),
    }
}

/// Color parsing error
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ColorError {
    #[error("invalid color length (expected 3 or 6 hex chars)")]
    InvalidLength,
    #[error("invalid hex character")]
    InvalidHex,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_6() {
        assert_eq!(parse_hex_color("#ff0000"), Ok(Color::Rgb(255, 0, 0)));
        assert_eq!(parse_hex_color("00ff00"), Ok(Color::Rgb(0, 255, 0)));
        assert_eq!(parse_hex_color("#6366f1"), Ok(Color::Rgb(99, 102, 241)));
    }

    #[test]
    fn test_parse_hex_3() {
        assert_eq!(parse_hex_color("#f00"), Ok(Color::Rgb(255, 0, 0)));
        assert_eq!(parse_hex_color("0f0"), Ok(Color::Rgb(0, 255, 0)));
    }

    #[test]
    fn test_parse_hex_invalid() {
        assert_eq!(parse_hex_color("invalid"), Err(ColorError::InvalidLength));
        assert_eq!(parse_hex_color("#gg0000"), Err(ColorError::InvalidHex));
        assert_eq!(parse_hex_color("#ff00"), Err(ColorError::InvalidLength));
        assert_eq!(parse_hex_color("#ééé"), Err(ColorError::InvalidHex));
    }

    #[test]
    fn test_modes() {
        assert_eq!(Theme::for_mode(ThemeMode::Dark).mode, ThemeMode::Dark);
        assert_eq!(Theme::default().mode, ThemeMode::Light);
    }

    #[test]
    fn test_accent_override() {
        let theme = Theme::light().with_accent(Some(Color::Rgb(1, 2, 3)));
        assert_eq!(theme.accent, Color::Rgb(1, 2, 3));
        let theme = Theme::dark().with_accent(None);
        assert_eq!(theme.accent, Theme::dark().accent);
    }
}
