use chrono::{DateTime, Local, NaiveDate};
use ratatui::layout::{Position, Rect};
use ratatui::style::Color;
use tokio::sync::watch;

use crate::appearance::{Background, BackgroundStore, ThemeMode, ThemeStore};
use crate::calendar::{build_grid, DayCell, MonthCursor, MonthStep};
use crate::clock::{ClockFace, ClockTicker, HourFormat};
use crate::config::Config;
use crate::date_key::DateKey;
use crate::quotes::{QuoteError, QuotePicker, QuoteStore, VALIDATION_MESSAGE};
use crate::storage::Storage;
use crate::ui::layout::{Direction, MonthGridLayout};
use crate::ui::theme::{parse_hex_color, Theme};

/// Dialog currently layered over the calendar
#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    None,
    /// Quote revealed for a clicked day
    Quote(QuoteView),
    /// Form for authoring a quote
    Editor(QuoteEditor),
    /// All custom quotes
    QuoteList { scroll: usize },
    Settings(SettingsPanel),
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuoteView {
    pub date: DateKey,
    pub text: String,
    /// Written by the user rather than picked from the built-ins
    pub custom: bool,
}

/// Field with keyboard focus in the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorField {
    Date,
    Text,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuoteEditor {
    /// Date as typed, expected as YYYY-MM-DD
    pub date: String,
    pub text: String,
    pub focus: EditorField,
}

impl QuoteEditor {
    fn new(date: Option<DateKey>) -> Self {
        Self {
            date: date.map(|d| d.to_string()).unwrap_or_default(),
            text: String::new(),
            focus: EditorField::Text,
        }
    }

    pub fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            EditorField::Date => &mut self.date,
            EditorField::Text => &mut self.text,
        }
    }

    pub fn switch_focus(&mut self) {
        self.focus = match self.focus {
            EditorField::Date => EditorField::Text,
            EditorField::Text => EditorField::Date,
        };
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsTab {
    Theme,
    Backgrounds,
    Quotes,
}

impl SettingsTab {
    pub const ALL: [SettingsTab; 3] = [SettingsTab::Theme, SettingsTab::Backgrounds, SettingsTab::Quotes];

    pub fn label(self) -> &'static str {
        match self {
            SettingsTab::Theme => "Theme",
            SettingsTab::Backgrounds => "Backgrounds",
            SettingsTab::Quotes => "Quotes",
        }
    }

    pub fn next(self) -> Self {
        match self {
            SettingsTab::Theme => SettingsTab::Backgrounds,
            SettingsTab::Backgrounds => SettingsTab::Quotes,
            SettingsTab::Quotes => SettingsTab::Theme,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            SettingsTab::Theme => SettingsTab::Quotes,
            SettingsTab::Backgrounds => SettingsTab::Theme,
            SettingsTab::Quotes => SettingsTab::Backgrounds,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingsPanel {
    pub tab: SettingsTab,
    /// Highlighted entry of `Background::ALL`
    pub background: usize,
}

/// Clock face, latest time and the ticker feeding it
pub struct ClockState {
    face: ClockFace,
    hour_format: HourFormat,
    now: DateTime<Local>,
    ticker: Option<ClockTicker>,
}

impl ClockState {
    pub fn face(&self) -> ClockFace {
        self.face
    }

    pub fn hour_format(&self) -> HourFormat {
        self.hour_format
    }

    pub fn now(&self) -> DateTime<Local> {
        self.now
    }
}

/// Application state
pub struct App {
    /// Configuration
    config: Config,
    quotes: QuoteStore,
    picker: QuotePicker,
    theme_store: ThemeStore,
    /// Observes theme changes to refresh `theme`
    theme_rx: watch::Receiver<ThemeMode>,
    /// Palette for the current theme
    theme: Theme,
    accent: Option<Color>,
    backgrounds: BackgroundStore,
    clock: ClockState,
    /// Month shown in the grid
    cursor: MonthCursor,
    /// Selected cell index
    selected: usize,
    today: NaiveDate,
    overlay: Overlay,
    /// Blocking message drawn above everything
    notice: Option<String>,
    /// One-line feedback in the status bar
    status: Option<String>,
    /// Grid area from the last draw, for mouse hit testing
    grid_area: Rect,
    /// Month title arrows from the last draw
    prev_month_area: Rect,
    next_month_area: Rect,
    /// Clock face switch hint from the last draw
    clock_hint_area: Rect,
    /// Ticks seen so far; drives backdrop animation
    ticks: u64,
}

impl App {
    pub fn new(config: Config, storage: Storage, now: DateTime<Local>) -> Self {
        let quotes = QuoteStore::load_all(storage.clone());
        let picker = QuotePicker::new(config.quotes.selection, &config.quotes.extra);
        tracing::debug!(
            "{} quotes available, {:?} selection",
            picker.len(),
            picker.selection()
        );
        let theme_store = ThemeStore::load(storage.clone(), config.appearance.theme);
        let theme_rx = theme_store.subscribe();
        let backgrounds = BackgroundStore::load(storage);

        let accent = config.appearance.accent.as_deref().and_then(|hex| {
            parse_hex_color(hex)
                .map_err(|e| tracing::warn!("Ignoring accent color '{}': {}", hex, e))
                .ok()
        });
        let theme = Theme::for_mode(theme_store.current()).with_accent(accent);

        let today = now.date_naive();
        let clock = ClockState {
            face: config.clock.face,
            hour_format: config.clock.hour_format,
            now,
            ticker: None,
        };

        let mut app = Self {
            config,
            quotes,
            picker,
            theme_store,
            theme_rx,
            theme,
            accent,
            backgrounds,
            clock,
            cursor: MonthCursor::containing(today),
            selected: 0,
            today,
            overlay: Overlay::None,
            notice: None,
            status: None,
            grid_area: Rect::default(),
            prev_month_area: Rect::default(),
            next_month_area: Rect::default(),
            clock_hint_area: Rect::default(),
            ticks: 0,
        };
        app.selected = app.default_selection();
        app
    }

    // --- calendar ------------------------------------------------------

    /// Day cells of the shown month
    pub fn cells(&self) -> Vec<DayCell> {
        build_grid(self.cursor, self.today, |key| self.quotes.contains(key))
    }

    pub fn grid_layout(&self) -> MonthGridLayout {
        MonthGridLayout::new(crate::calendar::grid_len(self.cursor))
    }

    pub fn cursor(&self) -> MonthCursor {
        self.cursor
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_cell(&self) -> Option<DayCell> {
        self.cells().get(self.selected).copied()
    }

    /// Today if it is in the shown month, otherwise the 1st
    fn default_selection(&self) -> usize {
        let cells = self.cells();
        cells
            .iter()
            .position(|c| c.is_today)
            .or_else(|| cells.iter().position(|c| c.in_current_month))
            .unwrap_or(0)
    }

    pub fn move_selection(&mut self, direction: Direction) {
        self.selected = self.grid_layout().step(self.selected, direction);
    }

    /// Show the previous or next month
    pub fn navigate_month(&mut self, step: MonthStep) {
        self.cursor = self.cursor.step(step);
        self.selected = self.default_selection();
        tracing::debug!("Showing {}", self.cursor.title());
    }

    /// Jump back to the month containing today
    pub fn go_to_today(&mut self) {
        self.cursor = MonthCursor::containing(self.today);
        self.selected = self.default_selection();
    }

    /// Reveal the quote for `date`: the custom one if present, otherwise a
    /// built-in pick that is not remembered
    pub fn open_date(&mut self, date: NaiveDate) {
        let Ok(key) = DateKey::new(date) else {
            return;
        };

        let view = match self.quotes.get(&key) {
            Some(text) => QuoteView {
                date: key,
                text: text.to_string(),
                custom: true,
            },
            None => QuoteView {
                date: key,
                text: self.picker.pick(&key).to_string(),
                custom: false,
            },
        };
        tracing::debug!("Opening quote for {} (custom: {})", key, view.custom);
        self.overlay = Overlay::Quote(view);
    }

    pub fn open_selected(&mut self) {
        if let Some(cell) = self.selected_cell() {
            self.open_date(cell.date);
        }
    }

    /// Handle a left click: month arrows, the clock hint, or a day cell
    pub fn click(&mut self, x: u16, y: u16) -> bool {
        if self.has_overlay() || self.notice.is_some() {
            return false;
        }

        let pos = Position::new(x, y);
        if self.prev_month_area.contains(pos) {
            self.navigate_month(MonthStep::Prev);
            return true;
        }
        if self.next_month_area.contains(pos) {
            self.navigate_month(MonthStep::Next);
            return true;
        }
        if self.clock_hint_area.contains(pos) {
            self.toggle_clock_face();
            return true;
        }

        match self.grid_layout().hit_test(self.grid_area, x, y) {
            Some(index) => {
                self.selected = index;
                self.open_selected();
                true
            }
            None => false,
        }
    }

    pub fn set_grid_area(&mut self, area: Rect) {
        self.grid_area = area;
    }

    pub fn set_month_arrows(&mut self, prev: Rect, next: Rect) {
        self.prev_month_area = prev;
        self.next_month_area = next;
    }

    pub fn set_clock_hint_area(&mut self, area: Rect) {
        self.clock_hint_area = area;
    }

    // --- clock ---------------------------------------------------------

    pub fn clock(&self) -> &ClockState {
        &self.clock
    }

    /// Spawn the ticker; needs a tokio runtime
    pub fn start_clock(&mut self) {
        self.clock.ticker = Some(ClockTicker::spawn(self.config.clock.tick_interval()));
    }

    /// Swap digital/analog. The running ticker belongs to the old face and
    /// is replaced.
    pub fn toggle_clock_face(&mut self) {
        self.clock.face = self.clock.face.toggled();
        if self.clock.ticker.take().is_some() {
            self.start_clock();
        }
    }

    /// Apply the newest tick from the ticker, if one arrived
    pub fn pump_clock(&mut self) {
        let latest = self.clock.ticker.as_mut().and_then(ClockTicker::latest);
        if let Some(now) = latest {
            self.on_tick(now);
        }
    }

    pub fn on_tick(&mut self, now: DateTime<Local>) {
        self.clock.now = now;
        self.ticks = self.ticks.wrapping_add(1);

        let date = now.date_naive();
        if date != self.today {
            tracing::debug!("Date changed to {}", date);
            self.today = date;
        }
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    // --- appearance ----------------------------------------------------

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn theme_mode(&self) -> ThemeMode {
        self.theme_store.current()
    }

    pub fn toggle_theme(&mut self) {
        if let Err(e) = self.theme_store.toggle() {
            tracing::warn!("Theme not saved: {}", e);
            self.status = Some("Theme changed for this session only".to_string());
        }
        self.sync_theme();
    }

    /// Re-resolve the palette if the theme changed since the last call
    pub fn sync_theme(&mut self) {
        if self.theme_rx.has_changed().unwrap_or(false) {
            let mode = *self.theme_rx.borrow_and_update();
            self.theme = Theme::for_mode(mode).with_accent(self.accent);
            tracing::debug!("Palette switched to {}", mode);
        }
    }

    pub fn background(&self) -> Background {
        self.backgrounds.current()
    }

    pub fn set_background(&mut self, background: Background) {
        if let Err(e) = self.backgrounds.set(background) {
            tracing::warn!("Background not saved: {}", e);
            self.status = Some("Background changed for this session only".to_string());
        }
    }

    // --- quotes --------------------------------------------------------

    pub fn quotes(&self) -> &QuoteStore {
        &self.quotes
    }

    pub fn open_editor(&mut self) {
        let date = self.selected_cell().and_then(|c| c.key());
        self.overlay = Overlay::Editor(QuoteEditor::new(date));
    }

    pub fn editor_mut(&mut self) -> Option<&mut QuoteEditor> {
        match &mut self.overlay {
            Overlay::Editor(editor) => Some(editor),
            _ => None,
        }
    }

    /// Validate and save the editor contents.
    ///
    /// Rejected input raises a notice and keeps the editor open.
    pub fn submit_editor(&mut self) {
        let Overlay::Editor(editor) = &self.overlay else {
            return;
        };

        let date = editor.date.trim();
        let key = if date.is_empty() {
            None
        } else {
            match date.parse::<DateKey>() {
                Ok(key) => Some(key),
                Err(e) => {
                    self.notice = Some(QuoteError::from(e).to_string());
                    return;
                }
            }
        };
        let text = editor.text.clone();

        match self.quotes.set(key, &text) {
            Ok(key) => {
                self.overlay = Overlay::None;
                self.status = Some(format!("Quote saved for {}", key.long_form()));
            }
            Err(e) if e.is_validation() => {
                self.notice = Some(VALIDATION_MESSAGE.to_string());
            }
            Err(e) => {
                tracing::warn!("{}", e);
                self.overlay = Overlay::None;
                self.status = Some(e.to_string());
            }
        }
    }

    // --- overlays ------------------------------------------------------

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    pub fn open_quote_list(&mut self) {
        self.overlay = Overlay::QuoteList { scroll: 0 };
    }

    pub fn scroll_quote_list(&mut self, down: bool) {
        let total = self.quotes.len();
        if let Overlay::QuoteList { scroll } = &mut self.overlay {
            *scroll = if down {
                (*scroll + 1).min(total.saturating_sub(1))
            } else {
                scroll.saturating_sub(1)
            };
        }
    }

    pub fn open_settings(&mut self) {
        self.overlay = Overlay::Settings(SettingsPanel {
            tab: SettingsTab::Theme,
            background: self.background().index(),
        });
    }

    pub fn settings_mut(&mut self) -> Option<&mut SettingsPanel> {
        match &mut self.overlay {
            Overlay::Settings(panel) => Some(panel),
            _ => None,
        }
    }

    /// Act on the highlighted settings entry
    pub fn activate_setting(&mut self) {
        let Overlay::Settings(panel) = &self.overlay else {
            return;
        };
        let panel = *panel;
        match panel.tab {
            SettingsTab::Theme => self.toggle_theme(),
            SettingsTab::Backgrounds => {
                let background = Background::ALL[panel.background % Background::ALL.len()];
                self.set_background(background);
                self.overlay = Overlay::None;
            }
            SettingsTab::Quotes => self.open_quote_list(),
        }
    }

    pub fn close_overlay(&mut self) {
        self.overlay = Overlay::None;
    }

    pub fn has_overlay(&self) -> bool {
        !matches!(self.overlay, Overlay::None)
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    use crate::storage::{BACKGROUND_KEY, CUSTOM_QUOTES_KEY};

    fn at(y: i32, m: u32, d: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, m, d, 9, 30, 0).unwrap()
    }

    fn app_on(y: i32, m: u32, d: u32) -> (App, Storage) {
        let storage = Storage::in_memory();
        let app = App::new(Config::default(), storage.clone(), at(y, m, d));
        (app, storage)
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_starts_on_today() {
        let (app, _) = app_on(2024, 3, 15);
        assert_eq!(app.cursor().title(), "March 2024");
        let cell = app.selected_cell().unwrap();
        assert_eq!(cell.date, ymd(2024, 3, 15));
        assert!(cell.is_today);
    }

    #[test]
    fn test_navigation_wraps_year() {
        let (mut app, _) = app_on(2024, 1, 10);
        app.navigate_month(MonthStep::Prev);
        assert_eq!((app.cursor().month(), app.cursor().year()), (11, 2023));
        // Today is not shown, so the 1st is selected
        assert_eq!(app.selected_cell().unwrap().date, ymd(2023, 12, 1));

        let (mut app, _) = app_on(2024, 12, 10);
        app.navigate_month(MonthStep::Next);
        assert_eq!((app.cursor().month(), app.cursor().year()), (0, 2025));

        app.go_to_today();
        assert_eq!(app.selected_cell().unwrap().date, ymd(2024, 12, 10));
    }

    #[test]
    fn test_open_date_shows_custom_quote() {
        let storage = Storage::in_memory();
        storage
            .set_item(CUSTOM_QUOTES_KEY, r#"{"2024-03-15":"Keep going"}"#)
            .unwrap();
        let mut app = App::new(Config::default(), storage, at(2024, 3, 1));

        app.open_date(ymd(2024, 3, 15));
        match app.overlay() {
            Overlay::Quote(view) => {
                assert_eq!(view.text, "Keep going");
                assert!(view.custom);
            }
            other => panic!("unexpected overlay {:?}", other),
        }
    }

    #[test]
    fn test_open_date_falls_back_to_builtin_quote() {
        let (mut app, storage) = app_on(2024, 3, 1);

        app.open_date(ymd(2024, 3, 16));
        match app.overlay() {
            Overlay::Quote(view) => {
                assert!(!view.custom);
                assert!(!view.text.is_empty());
            }
            other => panic!("unexpected overlay {:?}", other),
        }
        // Built-in picks are not persisted
        assert!(app.quotes().is_empty());
        assert_eq!(storage.get_item(CUSTOM_QUOTES_KEY), None);
    }

    #[test]
    fn test_editor_saves_quote() {
        let (mut app, storage) = app_on(2024, 3, 15);
        app.open_editor();
        {
            let editor = app.editor_mut().unwrap();
            assert_eq!(editor.date, "2024-03-15");
            editor.text = "  Keep going  ".to_string();
        }
        app.submit_editor();

        assert!(!app.has_overlay());
        assert_eq!(app.notice(), None);
        assert_eq!(app.status(), Some("Quote saved for March 15, 2024"));
        assert!(storage.get_item(CUSTOM_QUOTES_KEY).unwrap().contains("Keep going"));

        let cell = app.selected_cell().unwrap();
        assert!(cell.has_quote);
    }

    #[test]
    fn test_editor_rejects_empty_text() {
        let (mut app, storage) = app_on(2024, 3, 15);
        app.open_editor();
        app.submit_editor();

        assert_eq!(app.notice(), Some(VALIDATION_MESSAGE));
        assert!(matches!(app.overlay(), Overlay::Editor(_)));
        assert!(app.quotes().is_empty());
        assert_eq!(storage.get_item(CUSTOM_QUOTES_KEY), None);

        app.dismiss_notice();
        assert!(matches!(app.overlay(), Overlay::Editor(_)));
    }

    #[test]
    fn test_editor_rejects_missing_and_bad_dates() {
        let (mut app, _) = app_on(2024, 3, 15);
        app.open_editor();
        {
            let editor = app.editor_mut().unwrap();
            editor.date.clear();
            editor.text = "Keep going".to_string();
        }
        app.submit_editor();
        assert_eq!(app.notice(), Some(VALIDATION_MESSAGE));
        app.dismiss_notice();

        app.editor_mut().unwrap().date = "2024-02-30".to_string();
        app.submit_editor();
        assert!(app.notice().unwrap().contains("2024-02-30"));
        assert!(app.quotes().is_empty());
    }

    #[test]
    fn test_settings_background_choice_persists() {
        let (mut app, storage) = app_on(2024, 3, 15);
        app.open_settings();
        {
            let panel = app.settings_mut().unwrap();
            panel.tab = SettingsTab::Backgrounds;
            panel.background = Background::Waves.index();
        }
        app.activate_setting();

        assert!(!app.has_overlay());
        assert_eq!(app.background(), Background::Waves);
        assert_eq!(storage.get_item(BACKGROUND_KEY).as_deref(), Some("waves"));
    }

    #[test]
    fn test_unknown_background_renders_default() {
        let storage = Storage::in_memory();
        storage.set_item(BACKGROUND_KEY, "nature").unwrap();
        let app = App::new(Config::default(), storage, at(2024, 3, 15));
        assert_eq!(app.background(), Background::Default);
    }

    #[test]
    fn test_toggle_theme_updates_palette() {
        let (mut app, _) = app_on(2024, 3, 15);
        assert_eq!(app.theme().mode, ThemeMode::Light);
        app.toggle_theme();
        assert_eq!(app.theme_mode(), ThemeMode::Dark);
        assert_eq!(app.theme().mode, ThemeMode::Dark);
    }

    #[test]
    fn test_tick_rolls_today_over() {
        let (mut app, _) = app_on(2024, 3, 15);
        app.on_tick(at(2024, 3, 16));
        assert_eq!(app.ticks(), 1);
        let today: Vec<_> = app.cells().into_iter().filter(|c| c.is_today).collect();
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].date, ymd(2024, 3, 16));
    }

    #[test]
    fn test_click_opens_cell() {
        let (mut app, _) = app_on(2024, 3, 15);
        // 42 cells in March 2024: 6 rows of height 2, cells 9 wide
        app.set_grid_area(Rect::new(0, 0, 69, 12));

        // Row 0, col 5 is March 1st
        assert!(app.click(50, 0));
        assert_eq!(app.selected_cell().unwrap().date, ymd(2024, 3, 1));
        assert!(matches!(app.overlay(), Overlay::Quote(_)));

        // Clicks are ignored while a dialog is open
        assert!(!app.click(0, 0));
    }

    #[test]
    fn test_click_month_arrows() {
        let (mut app, _) = app_on(2024, 3, 15);
        app.set_month_arrows(Rect::new(10, 0, 3, 1), Rect::new(30, 0, 3, 1));

        assert!(app.click(11, 0));
        assert_eq!(app.cursor().title(), "February 2024");
        assert!(app.click(32, 0));
        assert!(app.click(30, 0));
        assert_eq!(app.cursor().title(), "April 2024");
        assert!(!app.has_overlay());

        // Between the arrows is the title itself
        assert!(!app.click(20, 0));
        assert_eq!(app.cursor().title(), "April 2024");
    }

    #[test]
    fn test_click_clock_hint_toggles_face() {
        let (mut app, _) = app_on(2024, 3, 15);
        app.set_clock_hint_area(Rect::new(5, 4, 24, 1));

        assert!(app.click(5, 4));
        assert_eq!(app.clock().face(), ClockFace::Analog);
        assert!(app.click(28, 4));
        assert_eq!(app.clock().face(), ClockFace::Digital);
        assert!(!app.click(29, 4));
    }

    #[test]
    fn test_toggle_clock_face_without_ticker() {
        let (mut app, _) = app_on(2024, 3, 15);
        assert_eq!(app.clock().face(), ClockFace::Digital);
        app.toggle_clock_face();
        assert_eq!(app.clock().face(), ClockFace::Analog);
    }

    #[test]
    fn test_quote_list_scroll_is_clamped() {
        let (mut app, _) = app_on(2024, 3, 15);
        app.open_editor();
        app.editor_mut().unwrap().text = "One".to_string();
        app.submit_editor();

        app.open_quote_list();
        app.scroll_quote_list(true);
        app.scroll_quote_list(true);
        assert_eq!(app.overlay(), &Overlay::QuoteList { scroll: 0 });
    }
}
