//! Month grid geometry
//!
//! Provides:
//! - Row-major 7-column positions (Sunday first)
//! - Selection movement (up/down/left/right, clamped to the grid)
//! - Cell rectangles and mouse hit testing

use ratatui::layout::Rect;

use crate::calendar::DAYS_IN_WEEK;

/// Horizontal gap between cells
pub const CELL_GAP: u16 = 1;

/// Navigation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Layout of a 35- or 42-cell month grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthGridLayout {
    /// Number of cells in the grid
    pub cells: usize,
}

impl MonthGridLayout {
    pub fn new(cells: usize) -> Self {
        Self { cells }
    }

    pub fn columns(&self) -> u16 {
        DAYS_IN_WEEK as u16
    }

    pub fn rows(&self) -> u16 {
        self.cells.div_ceil(DAYS_IN_WEEK) as u16
    }

    /// Convert flat index to (row, col); row-major
    /// ```text
    /// Index:  0  1  2  3  4  5  6
    ///         7  8  9 10 11 12 13
    /// ```
    pub fn index_to_position(&self, index: usize) -> (u16, u16) {
        ((index / DAYS_IN_WEEK) as u16, (index % DAYS_IN_WEEK) as u16)
    }

    pub fn position_to_index(&self, row: u16, col: u16) -> usize {
        row as usize * DAYS_IN_WEEK + col as usize
    }

    /// New selection after moving one step; stays put at the grid edge
    pub fn step(&self, current: usize, direction: Direction) -> usize {
        let last = self.cells.saturating_sub(1);
        match direction {
            Direction::Left => current.saturating_sub(1),
            Direction::Right => (current + 1).min(last),
            Direction::Up => current.checked_sub(DAYS_IN_WEEK).unwrap_or(current),
            Direction::Down => {
                let below = current + DAYS_IN_WEEK;
                if below <= last {
                    below
                } else {
                    current
                }
            }
        }
    }

    /// Width of one cell inside `inner`
    fn cell_width(&self, inner: Rect) -> u16 {
        let gaps = CELL_GAP * (self.columns() - 1);
        inner.width.saturating_sub(gaps) / self.columns()
    }

    /// Height of one cell inside `inner`
    fn cell_height(&self, inner: Rect) -> u16 {
        inner.height / self.rows().max(1)
    }

    /// Screen rectangle of cell `index` inside `inner`
    pub fn cell_rect(&self, inner: Rect, index: usize) -> Rect {
        let (row, col) = self.index_to_position(index);
        let width = self.cell_width(inner);
        let height = self.cell_height(inner);
        Rect {
            x: inner.x + col * (width + CELL_GAP),
            y: inner.y + row * height,
            width,
            height,
        }
    }

    /// Cell under the screen position (x, y), if any
    pub fn hit_test(&self, inner: Rect, x: u16, y: u16) -> Option<usize> {
        (0..self.cells).find(|&index| {
            let rect = self.cell_rect(inner, index);
            rect.width > 0
                && rect.height > 0
                && (rect.x..rect.x + rect.width).contains(&x)
                && (rect.y..rect.y + rect.height).contains(&y)
        })
    }
}
