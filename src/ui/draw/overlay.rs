//! Dialogs drawn over the main view

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, EditorField, QuoteEditor, QuoteView, SettingsPanel, SettingsTab};
use crate::appearance::Background;
use crate::ui::draw::centered_rect;
use crate::ui::theme::Theme;

fn dialog<'a>(title: &'a str, theme: &Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent))
        .title(Span::styled(
            title,
            Style::default()
                .fg(theme.foreground)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(theme.panel_bg).fg(theme.foreground))
}

/// Clear `area` and draw a dialog frame; returns the inner area
fn open_dialog(f: &mut Frame, block: Block, area: Rect) -> Rect {
    let inner = block.inner(area);
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    inner
}

fn hint<'a>(text: &'a str, theme: &Theme) -> Line<'a> {
    Line::from(Span::styled(text, Style::default().fg(theme.dimmed))).alignment(Alignment::Center)
}

pub(crate) fn draw_quote(f: &mut Frame, view: &QuoteView, area: Rect, theme: &Theme) {
    let rect = centered_rect(60, 9, area);
    let title = format!(" {} ", view.date.long_form());
    let inner = open_dialog(f, dialog(&title, theme).title_bottom(hint(" Esc: close ", theme)), rect);

    let source = if view.custom { "Your quote" } else { "Quote of the day" };
    let lines = vec![
        Line::default(),
        Line::from(Span::styled(
            format!("\"{}\"", view.text),
            Style::default().add_modifier(Modifier::ITALIC),
        )),
        Line::default(),
        Line::from(Span::styled(source, Style::default().fg(theme.dimmed))),
    ];
    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        inner,
    );
}

pub(crate) fn draw_editor(f: &mut Frame, editor: &QuoteEditor, area: Rect, theme: &Theme) {
    let rect = centered_rect(64, 14, area);
    let block = dialog(" Add Inspirational Quote ", theme)
        .title_bottom(hint(" Tab: switch field | Enter: save | Esc: cancel ", theme));
    let inner = open_dialog(f, block, rect);
    if inner.height == 0 {
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Date label
            Constraint::Length(3), // Date field
            Constraint::Length(1), // Quote label
            Constraint::Min(3),    // Quote field
        ])
        .split(inner);

    let field = |focused: bool| {
        let color = if focused { theme.accent } else { theme.panel_border };
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
    };
    let label = |text: &'static str| Paragraph::new(text).style(Style::default().fg(theme.dimmed));

    let date_focused = editor.focus == EditorField::Date;
    f.render_widget(label("Select Date (YYYY-MM-DD)"), chunks[0]);
    f.render_widget(
        Paragraph::new(editor.date.as_str()).block(field(date_focused)),
        chunks[1],
    );

    f.render_widget(label("Your Inspirational Quote"), chunks[2]);
    let quote = if editor.text.is_empty() {
        Paragraph::new(Span::styled(
            "Enter your quote here...",
            Style::default().fg(theme.dimmed_alt),
        ))
    } else {
        Paragraph::new(editor.text.as_str())
    };
    f.render_widget(
        quote.wrap(Wrap { trim: false }).block(field(!date_focused)),
        chunks[3],
    );

    // Cursor at the end of the focused field
    let (field_area, value) = if date_focused {
        (chunks[1], editor.date.as_str())
    } else {
        (chunks[3], editor.text.as_str())
    };
    let field_width = field_area.width.saturating_sub(2).max(1);
    let width = value.width() as u16;
    let (row, col) = if date_focused {
        (0, width.min(field_width - 1))
    } else {
        (width / field_width, width % field_width)
    };
    if row + 2 < field_area.height {
        f.set_cursor_position((field_area.x + 1 + col, field_area.y + 1 + row));
    }
}

pub(crate) fn draw_quote_list(f: &mut Frame, app: &App, scroll: usize, area: Rect, theme: &Theme) {
    let width = area.width.saturating_sub(4).min(72);
    let height = area.height.saturating_sub(4);
    let rect = centered_rect(width, height, area);
    let block = dialog(" Manage Your Quotes ", theme)
        .title_bottom(hint(" ↑↓: scroll | Esc: close ", theme));
    let inner = open_dialog(f, block, rect);

    let quotes = app.quotes();
    if quotes.is_empty() {
        let empty = Paragraph::new(vec![
            Line::default(),
            Line::from(Span::styled(
                "No custom quotes added yet",
                Style::default().fg(theme.dimmed),
            )),
        ])
        .alignment(Alignment::Center);
        f.render_widget(empty, inner);
        return;
    }

    let mut lines = Vec::new();
    for (date, text) in quotes.entries().skip(scroll) {
        lines.push(Line::from(Span::styled(
            date.long_form(),
            Style::default().fg(theme.dimmed).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(text.to_string()));
        lines.push(Line::default());
    }
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

pub(crate) fn draw_settings(
    f: &mut Frame,
    app: &App,
    panel: &SettingsPanel,
    area: Rect,
    theme: &Theme,
) {
    let rect = centered_rect(48, 14, area);
    let block = dialog(" Settings ", theme)
        .title_bottom(hint(" ←→: tab | Enter: select | Esc: close ", theme));
    let inner = open_dialog(f, block, rect);
    if inner.height == 0 {
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(inner);

    let selected = SettingsTab::ALL
        .iter()
        .position(|tab| *tab == panel.tab)
        .unwrap_or(0);
    let tabs = Tabs::new(SettingsTab::ALL.iter().map(|tab| tab.label()))
        .select(selected)
        .style(Style::default().fg(theme.dimmed))
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        );
    f.render_widget(tabs, chunks[0]);

    let body: Vec<Line> = match panel.tab {
        SettingsTab::Theme => {
            let dark = app.theme_mode().is_dark();
            let switch = if dark { "[ ●]" } else { "[● ]" };
            vec![
                Line::from(vec![
                    Span::raw("Light Mode  "),
                    Span::styled(switch, Style::default().fg(theme.accent)),
                    Span::raw("  Dark Mode"),
                ])
                .alignment(Alignment::Center),
                Line::default(),
                Line::from(Span::styled(
                    "Toggle between light and dark themes. Your preference will be saved automatically.",
                    Style::default().fg(theme.dimmed),
                )),
            ]
        }
        SettingsTab::Backgrounds => {
            let current = app.background();
            Background::ALL
                .iter()
                .enumerate()
                .map(|(index, background)| {
                    let marker = if *background == current { "● " } else { "  " };
                    let style = if index == panel.background {
                        Style::default()
                            .fg(theme.accent_fg)
                            .bg(theme.accent)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default()
                    };
                    Line::from(Span::styled(format!(" {}{} ", marker, background.label()), style))
                })
                .collect()
        }
        SettingsTab::Quotes => vec![
            Line::from(format!("{} custom quotes saved", app.quotes().len())),
            Line::default(),
            Line::from(Span::styled(
                "Enter: View All Custom Quotes",
                Style::default().fg(theme.accent),
            )),
        ],
    };
    f.render_widget(Paragraph::new(body).wrap(Wrap { trim: true }), chunks[1]);
}

/// Blocking message; any key dismisses it
pub(crate) fn draw_notice(f: &mut Frame, message: &str, area: Rect, theme: &Theme) {
    let width = (message.width() as u16 + 6).clamp(30, 70);
    let rect = centered_rect(width, 7, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.alert))
        .title(Span::styled(
            " Notice ",
            Style::default().fg(theme.alert).add_modifier(Modifier::BOLD),
        ))
        .title_bottom(hint(" Press any key ", theme))
        .style(Style::default().bg(theme.panel_bg).fg(theme.foreground));
    let inner = open_dialog(f, block, rect);

    f.render_widget(
        Paragraph::new(vec![Line::default(), Line::from(message)])
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        inner,
    );
}
