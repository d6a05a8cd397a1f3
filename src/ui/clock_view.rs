//! Digital and analog clock widgets

use chrono::{DateTime, Local};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Circle, Line as CanvasLine},
        Paragraph, Widget,
    },
};

use super::theme::Theme;
use crate::clock::{format_digital, hand_tip, HandAngles, HourFormat};

/// Face radius in canvas units
const FACE_RADIUS: f64 = 1.0;
/// Numerals sit this far from the pivot
const NUMERAL_RADIUS: f64 = 0.8;
const HOUR_HAND: f64 = 0.45;
const MINUTE_HAND: f64 = 0.65;
const SECOND_HAND: f64 = 0.75;

/// Time and date as centered text
pub struct DigitalClock<'a> {
    now: DateTime<Local>,
    format: HourFormat,
    theme: &'a Theme,
}

impl<'a> DigitalClock<'a> {
    pub fn new(now: DateTime<Local>, format: HourFormat, theme: &'a Theme) -> Self {
        Self { now, format, theme }
    }
}

impl<'a> Widget for DigitalClock<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        let time = format_digital(self.now.time(), self.format);
        let date = self.now.format("%A, %B %-d, %Y").to_string();

        let mut lines = Vec::new();
        // Vertically center the two lines
        for _ in 0..area.height.saturating_sub(2) / 2 {
            lines.push(Line::default());
        }
        lines.push(Line::from(Span::styled(
            time,
            Style::default()
                .fg(self.theme.accent)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            date,
            Style::default().fg(self.theme.dimmed),
        )));

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().bg(self.theme.panel_bg))
            .render(area, buf);
    }
}

/// Round face with numerals and three hands, drawn in Braille dots
pub struct AnalogClock<'a> {
    now: DateTime<Local>,
    theme: &'a Theme,
}

impl<'a> AnalogClock<'a> {
    pub fn new(now: DateTime<Local>, theme: &'a Theme) -> Self {
        Self { now, theme }
    }
}

/// Canvas bounds that keep the face round. Terminal cells are about
/// twice as tall as they are wide.
fn bounds(area: Rect) -> ([f64; 2], [f64; 2]) {
    let margin = FACE_RADIUS * 1.15;
    let cells_wide = f64::from(area.width.max(1));
    let cells_high = f64::from(area.height.max(1)) * 2.0;

    if cells_wide >= cells_high {
        let x = margin * cells_wide / cells_high;
        ([-x, x], [-margin, margin])
    } else {
        let y = margin * cells_high / cells_wide;
        ([-margin, margin], [-y, y])
    }
}

impl<'a> Widget for AnalogClock<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 3 || area.height < 3 {
            return;
        }

        let theme = self.theme;
        let angles = HandAngles::at(self.now.time());
        let (x_bounds, y_bounds) = bounds(area);

        let canvas = Canvas::default()
            .background_color(theme.panel_bg)
            .marker(Marker::Braille)
            .x_bounds(x_bounds)
            .y_bounds(y_bounds)
            .paint(move |ctx| {
                ctx.draw(&Circle {
                    x: 0.0,
                    y: 0.0,
                    radius: FACE_RADIUS,
                    color: theme.panel_border,
                });
                ctx.layer();

                for hour in 1..=12u32 {
                    let (x, y) = hand_tip(f64::from(hour) * 30.0, NUMERAL_RADIUS);
                    ctx.print(
                        x,
                        y,
                        Span::styled(hour.to_string(), Style::default().fg(theme.dimmed)),
                    );
                }

                for (angle, length, color) in [
                    (angles.hour, HOUR_HAND, theme.foreground),
                    (angles.minute, MINUTE_HAND, theme.foreground),
                    (angles.second, SECOND_HAND, theme.second_hand),
                ] {
                    let (x2, y2) = hand_tip(angle, length);
                    ctx.draw(&CanvasLine {
                        x1: 0.0,
                        y1: 0.0,
                        x2,
                        y2,
                        color,
                    });
                }
                ctx.layer();

                ctx.print(0.0, 0.0, Span::styled("●", Style::default().fg(theme.accent)));
            });

        canvas.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 15, 21, 5, 3).unwrap()
    }

    fn text(buf: &Buffer) -> String {
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_digital_clock_text() {
        let theme = Theme::light();
        let area = Rect::new(0, 0, 30, 4);
        let mut buf = Buffer::empty(area);
        DigitalClock::new(now(), HourFormat::Twelve, &theme).render(area, &mut buf);

        let rendered = text(&buf);
        assert!(rendered.contains("09:05:03 PM"));
        assert!(rendered.contains("Friday, March 15, 2024"));
    }

    #[test]
    fn test_digital_clock_24h() {
        let theme = Theme::dark();
        let area = Rect::new(0, 0, 30, 2);
        let mut buf = Buffer::empty(area);
        DigitalClock::new(now(), HourFormat::TwentyFour, &theme).render(area, &mut buf);
        assert!(text(&buf).contains("21:05:03"));
    }

    #[test]
    fn test_analog_clock_draws_numerals_and_pivot() {
        let theme = Theme::light();
        let area = Rect::new(0, 0, 40, 20);
        let mut buf = Buffer::empty(area);
        AnalogClock::new(now(), &theme).render(area, &mut buf);

        let rendered = text(&buf);
        assert!(rendered.contains("12"));
        assert!(rendered.contains('6'));
        assert!(rendered.contains('●'));
    }

    #[test]
    fn test_bounds_keep_face_round() {
        let (x, y) = bounds(Rect::new(0, 0, 40, 10));
        // 40 cells wide vs 20 "half-cells" high
        assert!((x[1] / y[1] - 2.0).abs() < 1e-9);

        let (x, y) = bounds(Rect::new(0, 0, 10, 20));
        assert!((y[1] / x[1] - 4.0).abs() < 1e-9);
    }
}
