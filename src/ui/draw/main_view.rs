//! Main view drawing functions
//!
//! This module handles rendering the always-visible UI:
//! - Clock panel with the face toggle hint
//! - Month grid with weekday header
//! - Status bar

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::calendar::WEEKDAYS;
use crate::clock::ClockFace;
use crate::ui::clock_view::{AnalogClock, DigitalClock};
use crate::ui::day_card::DayCard;
use crate::ui::draw::centered_rect;
use crate::ui::theme::Theme;

const DIGITAL_PANEL: (u16, u16) = (44, 5);
const ANALOG_PANEL: (u16, u16) = (34, 15);
/// 7 columns of 12 plus gaps and borders
const CALENDAR_MAX_WIDTH: u16 = 92;
const ARROW_PREV: &str = " ◀ ";
const ARROW_NEXT: &str = " ▶ ";

pub(crate) struct MainChunks {
    pub clock: Rect,
    pub calendar: Rect,
    pub status: Rect,
}

pub(crate) fn main_layout(area: Rect, face: ClockFace) -> MainChunks {
    let (clock_width, clock_height) = match face {
        ClockFace::Digital => DIGITAL_PANEL,
        ClockFace::Analog => ANALOG_PANEL,
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(clock_height), // Clock
            Constraint::Min(0),               // Calendar
            Constraint::Length(1),            // Status bar
        ])
        .split(area);

    let clock = centered_rect(clock_width, chunks[0].height, chunks[0]);
    let calendar = centered_rect(CALENDAR_MAX_WIDTH, chunks[1].height, chunks[1]);

    MainChunks {
        clock,
        calendar,
        status: chunks[2],
    }
}

fn panel<'a>(theme: &Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.panel_border))
        .style(Style::default().bg(theme.panel_bg).fg(theme.foreground))
}

/// One-row strip of a panel's border between its corners
fn border_row(area: Rect, y: u16) -> Rect {
    Rect {
        x: area.x + 1,
        y,
        width: area.width.saturating_sub(2),
        height: 1,
    }
}

/// Draw the clock with the face switch hint on its bottom border.
/// The hint area is recorded on `app` so clicking it switches faces.
pub(crate) fn draw_clock_panel(f: &mut Frame, app: &mut App, area: Rect, theme: &Theme) {
    if area.width < 2 || area.height < 2 {
        app.set_clock_hint_area(Rect::default());
        return;
    }

    let clock = app.clock();
    let block = panel(theme)
        .title(Line::from(format!(" {} Clock ", clock.face().label())).alignment(Alignment::Left));
    let inner = block.inner(area);
    f.render_widget(block, area);

    match clock.face() {
        ClockFace::Digital => f.render_widget(
            DigitalClock::new(clock.now(), clock.hour_format(), theme),
            inner,
        ),
        ClockFace::Analog => f.render_widget(AnalogClock::new(clock.now(), theme), inner),
    }

    let hint = Line::from(Span::styled(
        format!(" Switch to {} (c) ", clock.face().toggled().label()),
        Style::default().fg(theme.dimmed),
    ));
    let hint_area = centered_rect(hint.width() as u16, 1, border_row(area, area.bottom() - 1));
    f.render_widget(Paragraph::new(hint), hint_area);
    app.set_clock_hint_area(hint_area);
}

/// Draw the month grid; records the grid and title arrow areas on `app`
/// for mouse hits
pub(crate) fn draw_calendar(f: &mut Frame, app: &mut App, area: Rect, theme: &Theme) {
    if area.width < 2 || area.height < 2 {
        app.set_grid_area(Rect::default());
        app.set_month_arrows(Rect::default(), Rect::default());
        return;
    }

    let block = panel(theme);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let title = Line::from(vec![
        Span::styled(ARROW_PREV, Style::default().fg(theme.dimmed)),
        Span::styled(
            app.cursor().title(),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(ARROW_NEXT, Style::default().fg(theme.dimmed)),
    ]);
    let title_area = centered_rect(title.width() as u16, 1, border_row(area, area.y));
    f.render_widget(Paragraph::new(title), title_area);

    let arrow = ARROW_PREV.chars().count() as u16;
    let prev = Rect {
        width: arrow.min(title_area.width),
        ..title_area
    };
    let next = Rect {
        x: title_area.right().saturating_sub(arrow).max(title_area.x),
        width: arrow.min(title_area.width),
        ..title_area
    };
    app.set_month_arrows(prev, next);

    if inner.height < 2 {
        app.set_grid_area(Rect::default());
        return;
    }

    let header = Rect { height: 1, ..inner };
    let grid_area = Rect {
        y: inner.y + 1,
        height: inner.height - 1,
        ..inner
    };
    app.set_grid_area(grid_area);

    let layout = app.grid_layout();

    // Weekday labels line up with the columns below
    for (col, name) in WEEKDAYS.iter().enumerate() {
        let column = layout.cell_rect(grid_area, col);
        let label_area = Rect {
            y: header.y,
            height: 1,
            ..column
        };
        let label = Paragraph::new(*name)
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.dimmed).add_modifier(Modifier::BOLD));
        f.render_widget(label, label_area);
    }

    let selected = app.selected_index();
    for (index, cell) in app.cells().iter().enumerate() {
        let card_area = layout.cell_rect(grid_area, index);
        if card_area.width == 0 || card_area.height == 0 {
            continue;
        }

        let preview = cell.key().and_then(|key| app.quotes().get(&key));
        let card = DayCard::new(cell, theme)
            .selected(index == selected)
            .preview(preview);
        f.render_widget(card, card_area);
    }
}

/// Draw the status bar
pub(crate) fn draw_status_bar(f: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let line = match app.status() {
        Some(status) => Line::from(Span::styled(
            format!(" {}", status),
            Style::default().fg(theme.accent),
        )),
        None => Line::from(Span::styled(
            " ←↑↓→: move | [ ]: month | Enter: view | a: add | v: quotes | s: settings | t: theme | q: quit",
            Style::default().fg(theme.dimmed),
        )),
    };

    let count = app.quotes().len();
    let summary = match count {
        0 => String::new(),
        1 => "1 custom quote ".to_string(),
        n => format!("{} custom quotes ", n),
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(summary.chars().count() as u16)])
        .split(area);

    let style = Style::default().bg(theme.panel_bg);
    f.render_widget(Paragraph::new(line).style(style), chunks[0]);
    f.render_widget(
        Paragraph::new(summary)
            .alignment(Alignment::Right)
            .style(style.fg(theme.dimmed)),
        chunks[1],
    );
}
