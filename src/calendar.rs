//! Month grid computation and month navigation.
//!
//! The grid is always Sunday-first and row-major. It starts with the tail
//! of the previous month, then the whole target month, then the head of
//! the next month until the cell count reaches 35 or, when five weeks are
//! not enough, 42.

use chrono::{Datelike, Days, NaiveDate};

use crate::date_key::DateKey;

pub const DAYS_IN_WEEK: usize = 7;
pub const SHORT_GRID: usize = 35;
pub const LONG_GRID: usize = 42;

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub const WEEKDAYS: [&str; DAYS_IN_WEEK] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Navigation direction between months
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthStep {
    Prev,
    Next,
}

/// The month currently shown, as a zero-based month and a year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthCursor {
    year: i32,
    month: u32,
}

impl MonthCursor {
    /// `month` is zero-based (0 = January)
    pub fn new(year: i32, month: u32) -> Option<Self> {
        let in_range = (DateKey::MIN_YEAR..=DateKey::MAX_YEAR).contains(&year) && month < 12;
        in_range.then_some(Self { year, month })
    }

    /// Cursor for the month containing `date`, clamped to the supported years
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year().clamp(DateKey::MIN_YEAR, DateKey::MAX_YEAR),
            month: date.month0(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Zero-based month
    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[self.month() as usize]
    }

    /// Title such as "October 2026"
    pub fn title(&self) -> String {
        format!("{} {}", self.month_name(), self.year())
    }

    /// Step one month, carrying into the year at December/January.
    ///
    /// Stepping past the supported year range leaves the cursor unchanged.
    pub fn step(self, step: MonthStep) -> Self {
        let (year, month) = match (step, self.month) {
            (MonthStep::Prev, 0) => (self.year - 1, 11),
            (MonthStep::Prev, m) => (self.year, m - 1),
            (MonthStep::Next, 11) => (self.year + 1, 0),
            (MonthStep::Next, m) => (self.year, m + 1),
        };
        Self::new(year, month).unwrap_or(self)
    }

    pub fn first_day(&self) -> NaiveDate {
        // Every (year, month) that passed `new` has a first day
        NaiveDate::from_ymd_opt(self.year, self.month + 1, 1).unwrap_or_default()
    }

    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year, self.month)
    }

    /// Offset of day 1 from Sunday (0 = Sunday)
    pub fn first_weekday(&self) -> u32 {
        self.first_day().weekday().num_days_from_sunday()
    }
}

/// Days in a zero-based month of a proleptic Gregorian year
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        0 | 2 | 4 | 6 | 7 | 9 | 11 => 31,
        3 | 5 | 8 | 10 => 30,
        _ if is_leap_year(year) => 29,
        _ => 28,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// One slot of the month grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    /// Day of month shown in the cell
    pub day: u32,
    pub date: NaiveDate,
    pub in_current_month: bool,
    pub is_today: bool,
    pub has_quote: bool,
}

impl DayCell {
    fn outside(date: NaiveDate) -> Self {
        Self {
            day: date.day(),
            date,
            in_current_month: false,
            is_today: false,
            has_quote: false,
        }
    }

    /// Key for this cell's day, if its year is representable
    pub fn key(&self) -> Option<DateKey> {
        DateKey::new(self.date).ok()
    }
}

/// Number of cells the grid for `cursor` will contain
pub fn grid_len(cursor: MonthCursor) -> usize {
    let shown = (cursor.first_weekday() + cursor.days_in_month()) as usize;
    if shown <= SHORT_GRID {
        SHORT_GRID
    } else {
        LONG_GRID
    }
}

/// Build the day grid for `cursor`.
///
/// `today` drives the `is_today` flag and `has_quote` is asked for every
/// day of the target month. Only target-month cells carry either flag.
pub fn build_grid(
    cursor: MonthCursor,
    today: NaiveDate,
    has_quote: impl Fn(&DateKey) -> bool,
) -> Vec<DayCell> {
    let first = cursor.first_day();
    let leading = cursor.first_weekday();
    let days_in_month = cursor.days_in_month();
    let total = grid_len(cursor);

    let mut cells = Vec::with_capacity(total);

    // Tail of the previous month, oldest first
    for back in (1..=leading).rev() {
        if let Some(date) = first.checked_sub_days(Days::new(u64::from(back))) {
            cells.push(DayCell::outside(date));
        }
    }

    for day in 1..=days_in_month {
        let Some(date) = first.with_day(day) else {
            continue;
        };
        let quoted = DateKey::new(date).map(|key| has_quote(&key)).unwrap_or(false);
        cells.push(DayCell {
            day,
            date,
            in_current_month: true,
            is_today: date == today,
            has_quote: quoted,
        });
    }

    // Head of the next month
    let mut ahead = 1u64;
    while cells.len() < total {
        let Some(date) = first.checked_add_days(Days::new(u64::from(days_in_month) - 1 + ahead))
        else {
            break;
        };
        cells.push(DayCell::outside(date));
        ahead += 1;
    }

    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn cursor(year: i32, month: u32) -> MonthCursor {
        MonthCursor::new(year, month).unwrap()
    }

    fn no_quotes(_: &DateKey) -> bool {
        false
    }

    #[test]
    fn test_grid_size_for_every_month() {
        let today = ymd(2000, 6, 15);
        for year in 1899..=2101 {
            for month in 0..12 {
                let c = cursor(year, month);
                let cells = build_grid(c, today, no_quotes);
                assert!(
                    cells.len() == SHORT_GRID || cells.len() == LONG_GRID,
                    "{} has {} cells",
                    c.title(),
                    cells.len()
                );
                let smallest = if c.first_weekday() + c.days_in_month() <= 35 { 35 } else { 42 };
                assert_eq!(cells.len(), smallest);

                let current = cells.iter().filter(|cell| cell.in_current_month).count();
                assert_eq!(current as u32, c.days_in_month(), "{}", c.title());
            }
        }
    }

    #[test]
    fn test_leading_days_count_back_from_previous_month_end() {
        // March 1, 2024 is a Friday; February 2024 has 29 days
        let cells = build_grid(cursor(2024, 2), ymd(2000, 1, 1), no_quotes);
        assert_eq!(cells.len(), 42);

        let leading: Vec<u32> = cells.iter().take(5).map(|c| c.day).collect();
        assert_eq!(leading, vec![25, 26, 27, 28, 29]);
        assert!(cells[..5].iter().all(|c| !c.in_current_month));
        assert_eq!(cells[0].date, ymd(2024, 2, 25));

        assert_eq!(cells[5].date, ymd(2024, 3, 1));
        assert!(cells[5].in_current_month);

        // 5 + 31 = 36, so 6 trailing April days
        let trailing: Vec<NaiveDate> = cells[36..].iter().map(|c| c.date).collect();
        assert_eq!(trailing.first(), Some(&ymd(2024, 4, 1)));
        assert_eq!(trailing.last(), Some(&ymd(2024, 4, 6)));
    }

    #[test]
    fn test_four_week_february_pads_to_35() {
        // February 1, 2015 is a Sunday and the month has 28 days
        let cells = build_grid(cursor(2015, 1), ymd(2000, 1, 1), no_quotes);
        assert_eq!(cells.len(), 35);
        assert_eq!(cells[0].date, ymd(2015, 2, 1));
        assert_eq!(cells[28].date, ymd(2015, 3, 1));
        assert_eq!(cells[34].date, ymd(2015, 3, 7));
    }

    #[test]
    fn test_today_flag() {
        let today = ymd(2026, 10, 19);

        let cells = build_grid(cursor(2026, 9), today, no_quotes);
        let flagged: Vec<&DayCell> = cells.iter().filter(|c| c.is_today).collect();
        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0].date, today);

        let other = build_grid(cursor(2026, 8), today, no_quotes);
        assert!(other.iter().all(|c| !c.is_today));
    }

    #[test]
    fn test_today_in_padding_is_not_flagged() {
        // October 1, 2026 shows in the trailing cells of September
        let cells = build_grid(cursor(2026, 8), ymd(2026, 10, 1), no_quotes);
        assert!(cells.iter().any(|c| c.date == ymd(2026, 10, 1)));
        assert!(cells.iter().all(|c| !c.is_today));
    }

    #[test]
    fn test_has_quote_flag() {
        let marked: DateKey = "2024-03-15".parse().unwrap();
        let cells = build_grid(cursor(2024, 2), ymd(2000, 1, 1), |key| *key == marked);

        let with_quote: Vec<NaiveDate> =
            cells.iter().filter(|c| c.has_quote).map(|c| c.date).collect();
        assert_eq!(with_quote, vec![ymd(2024, 3, 15)]);
    }

    #[test]
    fn test_step_wraps_years() {
        let jan = cursor(2024, 0);
        let dec = jan.step(MonthStep::Prev);
        assert_eq!((dec.month(), dec.year()), (11, 2023));

        let dec = cursor(2024, 11);
        let jan = dec.step(MonthStep::Next);
        assert_eq!((jan.month(), jan.year()), (0, 2025));

        let mid = cursor(2024, 5).step(MonthStep::Next);
        assert_eq!((mid.month(), mid.year()), (6, 2024));
    }

    #[test]
    fn test_step_stops_at_supported_range() {
        let first = cursor(1, 0);
        assert_eq!(first.step(MonthStep::Prev), first);
        let last = cursor(9999, 11);
        assert_eq!(last.step(MonthStep::Next), last);
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 1), 29);
        assert_eq!(days_in_month(2023, 1), 28);
        assert_eq!(days_in_month(1900, 1), 28);
        assert_eq!(days_in_month(2000, 1), 29);
        assert_eq!(days_in_month(2024, 8), 30);
        assert_eq!(days_in_month(2024, 11), 31);
    }

    #[test]
    fn test_title() {
        assert_eq!(cursor(2026, 9).title(), "October 2026");
    }
}
