//! Drawing functions for the TUI
//!
//! Split by layer:
//! - `main_view` - Backdrop, clock panel, month grid, status bar
//! - `overlay` - Quote modal, editor, quote list, settings, notice

mod main_view;
mod overlay;

use ratatui::{layout::Rect, Frame};

use crate::app::{App, Overlay};
use crate::ui::backdrop::Backdrop;

use main_view::{draw_calendar, draw_clock_panel, draw_status_bar, main_layout};
use overlay::{draw_editor, draw_notice, draw_quote, draw_quote_list, draw_settings};

/// Main draw function
pub fn draw(f: &mut Frame, app: &mut App) {
    let theme = app.theme().clone();
    let area = f.area();

    f.render_widget(
        Backdrop::new(app.background(), app.theme_mode()).tick(app.ticks()),
        area,
    );

    let chunks = main_layout(area, app.clock().face());
    draw_clock_panel(f, app, chunks.clock, &theme);
    draw_calendar(f, app, chunks.calendar, &theme);
    draw_status_bar(f, app, chunks.status, &theme);

    // Clone to avoid borrowing app across the draw calls
    match app.overlay().clone() {
        Overlay::None => {}
        Overlay::Quote(view) => draw_quote(f, &view, area, &theme),
        Overlay::Editor(editor) => draw_editor(f, &editor, area, &theme),
        Overlay::QuoteList { scroll } => draw_quote_list(f, app, scroll, area, &theme),
        Overlay::Settings(panel) => draw_settings(f, app, &panel, area, &theme),
    }

    if let Some(message) = app.notice() {
        draw_notice(f, message, area, &theme);
    }
}

/// Rectangle of `width` x `height` centered in `area`, clamped to it
pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    use crate::appearance::Background;
    use crate::clock::ClockFace;
    use crate::config::Config;
    use crate::quotes::VALIDATION_MESSAGE;
    use crate::storage::Storage;

    fn app() -> App {
        let now = Local.with_ymd_and_hms(2024, 3, 15, 9, 30, 0).unwrap();
        App::new(Config::default(), Storage::in_memory(), now)
    }

    fn render(app: &mut App, width: u16, height: u16) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn text(buf: &Buffer) -> String {
        let width = buf.area.width as usize;
        buf.content()
            .chunks(width)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(centered_rect(50, 10, area), Rect::new(25, 15, 50, 10));
        assert_eq!(centered_rect(200, 100, area), area);
    }

    #[test]
    fn test_main_view() {
        let mut app = app();
        let screen = text(&render(&mut app, 100, 40));

        assert!(screen.contains("March 2024"));
        assert!(screen.contains("Sun"));
        assert!(screen.contains("Sat"));
        assert!(screen.contains("09:30:00 AM"));
        assert!(screen.contains("Switch to Analog (c)"));
    }

    #[test]
    fn test_draw_records_grid_area_for_clicks() {
        let mut app = app();
        render(&mut app, 100, 40);

        let layout = app.grid_layout();
        // Somewhere inside the grid there must be a cell to hit
        let hit = (0..100u16)
            .flat_map(|x| (0..40u16).map(move |y| (x, y)))
            .find(|&(x, y)| app.click(x, y));
        assert!(hit.is_some());
        assert!(layout.cells >= 35);
    }

    /// Position of the first cell showing `symbol`
    fn find(buf: &Buffer, symbol: &str) -> Option<(u16, u16)> {
        let width = buf.area.width as usize;
        buf.content()
            .iter()
            .position(|c| c.symbol() == symbol)
            .map(|i| ((i % width) as u16, (i / width) as u16))
    }

    #[test]
    fn test_month_arrows_are_clickable() {
        let mut app = app();
        let buf = render(&mut app, 100, 40);

        let (x, y) = find(&buf, "◀").unwrap();
        assert!(app.click(x, y));
        assert_eq!(app.cursor().title(), "February 2024");

        let buf = render(&mut app, 100, 40);
        let (x, y) = find(&buf, "▶").unwrap();
        assert!(app.click(x, y));
        assert!(app.click(x, y));
        assert_eq!(app.cursor().title(), "April 2024");
        assert!(!app.has_overlay());
    }

    #[test]
    fn test_clock_hint_is_clickable() {
        let mut app = app();
        let screen = text(&render(&mut app, 100, 40));

        let (y, row) = screen
            .lines()
            .enumerate()
            .find(|(_, row)| row.contains("Switch to Analog (c)"))
            .unwrap();
        let x = row[..row.find("Switch").unwrap()].chars().count();
        assert!(app.click(x as u16, y as u16));
        assert_eq!(app.clock().face(), ClockFace::Analog);

        let screen = text(&render(&mut app, 100, 45));
        assert!(screen.contains("Switch to Digital (c)"));
    }

    #[test]
    fn test_every_backdrop_renders() {
        for background in Background::ALL {
            let mut app = app();
            app.set_background(background);
            render(&mut app, 80, 30);
            app.toggle_theme();
            render(&mut app, 80, 30);
        }
    }

    #[test]
    fn test_analog_face_renders() {
        let mut app = app();
        app.toggle_clock_face();
        let screen = text(&render(&mut app, 100, 45));
        assert!(screen.contains("Switch to Digital (c)"));
        assert!(screen.contains("12"));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let mut app = app();
        app.open_settings();
        render(&mut app, 10, 4);
        render(&mut app, 1, 1);
    }

    #[test]
    fn test_overlays() {
        let mut app = app();

        app.open_quote_list();
        assert!(text(&render(&mut app, 100, 40)).contains("No custom quotes added yet"));

        app.open_editor();
        app.submit_editor();
        let screen = text(&render(&mut app, 100, 40));
        assert!(screen.contains("Add Inspirational Quote"));
        assert!(screen.contains(VALIDATION_MESSAGE));

        app.dismiss_notice();
        app.editor_mut().unwrap().text = "Keep going".to_string();
        app.submit_editor();
        app.open_selected();
        let screen = text(&render(&mut app, 100, 40));
        assert!(screen.contains("\"Keep going\""));

        app.open_settings();
        let screen = text(&render(&mut app, 100, 40));
        assert!(screen.contains("Backgrounds"));
        assert!(screen.contains("Dark Mode"));
    }
}
