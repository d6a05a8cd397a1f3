//! Day cell widget for the month grid
//!
//! Renders each day as a small card with:
//! - Day number (bold for today)
//! - Quote marker in the top-right corner
//! - Quote preview on the second line (when there is room)

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

use super::theme::Theme;
use crate::calendar::DayCell;

/// Marker drawn on days that have a custom quote
pub const QUOTE_MARKER: &str = "✦";

/// Day card widget
pub struct DayCard<'a> {
    cell: &'a DayCell,
    selected: bool,
    theme: &'a Theme,
    preview: Option<&'a str>,
}

impl<'a> DayCard<'a> {
    pub fn new(cell: &'a DayCell, theme: &'a Theme) -> Self {
        Self {
            cell,
            selected: false,
            theme,
            preview: None,
        }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Quote text shown under the day number
    pub fn preview(mut self, preview: Option<&'a str>) -> Self {
        self.preview = preview;
        self
    }
}

impl<'a> Widget for DayCard<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let theme = self.theme;
        let cell = self.cell;

        let bg = if cell.is_today {
            theme.today_bg
        } else if self.selected {
            theme.selection_bg
        } else if cell.in_current_month {
            theme.cell_bg
        } else {
            theme.cell_bg_outside
        };
        let fg = if cell.is_today {
            theme.today_fg
        } else if cell.in_current_month {
            theme.foreground
        } else {
            theme.dimmed_alt
        };

        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                if let Some(c) = buf.cell_mut((x, y)) {
                    c.set_char(' ');
                    c.set_bg(bg);
                }
            }
        }

        let padding_x = 1u16;
        let inner_width = area.width.saturating_sub(padding_x * 2) as usize;
        if inner_width == 0 {
            return;
        }
        let text_x = area.x + padding_x;

        // Line 1: day number and marker
        let mut day_style = Style::default().fg(fg).bg(bg);
        if cell.is_today {
            day_style = day_style.add_modifier(Modifier::BOLD);
        }
        if self.selected {
            day_style = day_style.add_modifier(Modifier::UNDERLINED);
        }
        let day = cell.day.to_string();
        buf.set_string(text_x, area.y, truncate(&day, inner_width), day_style);

        if cell.has_quote && inner_width > day.width() + 1 {
            let marker_fg = if cell.is_today { theme.today_fg } else { theme.accent };
            let marker_x = text_x + (inner_width - QUOTE_MARKER.width()) as u16;
            buf.set_string(marker_x, area.y, QUOTE_MARKER, Style::default().fg(marker_fg).bg(bg));
        }

        // Line 2: preview
        if area.height > 1 {
            if let Some(text) = self.preview {
                let preview_fg = if cell.is_today { theme.today_fg } else { theme.dimmed };
                let style = Style::default()
                    .fg(preview_fg)
                    .bg(bg)
                    .add_modifier(Modifier::ITALIC);
                buf.set_string(text_x, area.y + 1, truncate(text, inner_width), style);
            }
        }
    }
}

/// Truncate string to fit within max_width, adding ellipsis if needed
pub(crate) fn truncate(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 1 {
        return "…".to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if current_width + char_width + 1 > max_width {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn cell(day: u32, today: bool, quote: bool) -> DayCell {
        DayCell {
            day,
            date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            in_current_month: true,
            is_today: today,
            has_quote: quote,
        }
    }

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf.cell((x, y)).map(|c| c.symbol().to_string()).unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello w…");
        assert_eq!(truncate("hi", 2), "hi");
        assert_eq!(truncate("hello", 1), "…");
        assert_eq!(truncate("日本語", 4), "日…");
    }

    #[test]
    fn test_renders_day_and_marker() {
        let theme = Theme::light();
        let day = cell(15, false, true);
        let area = Rect::new(0, 0, 9, 2);
        let mut buf = Buffer::empty(area);

        DayCard::new(&day, &theme)
            .preview(Some("Keep going"))
            .render(area, &mut buf);

        assert_eq!(row(&buf, 0), " 15    ✦ ");
        assert_eq!(row(&buf, 1), " Keep g… ");
        assert_eq!(buf.cell((7, 0)).unwrap().fg, theme.accent);
    }

    #[test]
    fn test_today_uses_today_colors() {
        let theme = Theme::dark();
        let day = cell(3, true, false);
        let area = Rect::new(0, 0, 6, 1);
        let mut buf = Buffer::empty(area);

        DayCard::new(&day, &theme).selected(true).render(area, &mut buf);

        let c = buf.cell((1, 0)).unwrap();
        assert_eq!(c.symbol(), "3");
        assert_eq!(c.bg, theme.today_bg);
        assert_eq!(c.fg, theme.today_fg);
        assert!(c.modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_outside_day_is_dimmed() {
        let theme = Theme::light();
        let mut day = cell(28, false, false);
        day.in_current_month = false;
        let area = Rect::new(0, 0, 5, 1);
        let mut buf = Buffer::empty(area);

        DayCard::new(&day, &theme).render(area, &mut buf);
        assert_eq!(buf.cell((1, 0)).unwrap().fg, theme.dimmed_alt);
        assert_eq!(buf.cell((1, 0)).unwrap().bg, theme.cell_bg_outside);
    }
}
