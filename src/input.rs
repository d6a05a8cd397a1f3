//! Key and mouse dispatch
//!
//! Maps crossterm events onto `App` operations depending on which dialog
//! has focus. The notice always has priority, then the open overlay, then
//! the month view.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::app::{App, Overlay};
use crate::appearance::Background;
use crate::calendar::MonthStep;
use crate::ui::layout::Direction;

/// Whether the main loop keeps running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub fn handle_key(app: &mut App, key: KeyEvent) -> Flow {
    if key.kind != KeyEventKind::Press {
        return Flow::Continue;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Flow::Quit;
    }

    if app.notice().is_some() {
        app.dismiss_notice();
        return Flow::Continue;
    }

    match app.overlay() {
        Overlay::None => return handle_main_key(app, key),
        Overlay::Quote(_) => handle_quote_key(app, key),
        Overlay::Editor(_) => handle_editor_key(app, key),
        Overlay::QuoteList { .. } => handle_list_key(app, key),
        Overlay::Settings(_) => handle_settings_key(app, key),
    }
    Flow::Continue
}

fn handle_main_key(app: &mut App, key: KeyEvent) -> Flow {
    app.clear_status();

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => return Flow::Quit,
        KeyCode::Left | KeyCode::Char('h') => app.move_selection(Direction::Left),
        KeyCode::Right | KeyCode::Char('l') => app.move_selection(Direction::Right),
        KeyCode::Up | KeyCode::Char('k') => app.move_selection(Direction::Up),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection(Direction::Down),
        KeyCode::Char('[') | KeyCode::PageUp => app.navigate_month(MonthStep::Prev),
        KeyCode::Char(']') | KeyCode::PageDown => app.navigate_month(MonthStep::Next),
        KeyCode::Home => app.go_to_today(),
        KeyCode::Enter | KeyCode::Char(' ') => app.open_selected(),
        KeyCode::Char('c') => app.toggle_clock_face(),
        KeyCode::Char('a') => app.open_editor(),
        KeyCode::Char('v') => app.open_quote_list(),
        KeyCode::Char('s') => app.open_settings(),
        KeyCode::Char('t') => app.toggle_theme(),
        _ => {}
    }
    Flow::Continue
}

fn handle_quote_key(app: &mut App, key: KeyEvent) {
    if matches!(
        key.code,
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('q')
    ) {
        app.close_overlay();
    }
}

fn handle_editor_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.close_overlay(),
        KeyCode::Enter => app.submit_editor(),
        KeyCode::Tab | KeyCode::BackTab => {
            if let Some(editor) = app.editor_mut() {
                editor.switch_focus();
            }
        }
        KeyCode::Backspace => {
            if let Some(editor) = app.editor_mut() {
                editor.focused_mut().pop();
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            if let Some(editor) = app.editor_mut() {
                editor.focused_mut().clear();
            }
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            if let Some(editor) = app.editor_mut() {
                editor.focused_mut().push(c);
            }
        }
        _ => {}
    }
}

fn handle_list_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('v') => app.close_overlay(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_quote_list(false),
        KeyCode::Down | KeyCode::Char('j') => app.scroll_quote_list(true),
        _ => {}
    }
}

fn handle_settings_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('s') | KeyCode::Char('q') => app.close_overlay(),
        KeyCode::Enter | KeyCode::Char(' ') => app.activate_setting(),
        KeyCode::Char('t') => app.toggle_theme(),
        code => {
            let Some(panel) = app.settings_mut() else {
                return;
            };
            let count = Background::ALL.len();
            match code {
                KeyCode::Right | KeyCode::Tab | KeyCode::Char('l') => panel.tab = panel.tab.next(),
                KeyCode::Left | KeyCode::BackTab | KeyCode::Char('h') => panel.tab = panel.tab.prev(),
                KeyCode::Down | KeyCode::Char('j') => panel.background = (panel.background + 1) % count,
                KeyCode::Up | KeyCode::Char('k') => {
                    panel.background = (panel.background + count - 1) % count
                }
                _ => {}
            }
        }
    }
}

pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
        app.click(mouse.column, mouse.row);
    }
}
