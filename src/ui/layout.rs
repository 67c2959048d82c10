//! Screen regions and mouse hit testing.
//!
//! Rows and columns are 1-indexed, matching the cursor positioning used by the
//! components. Map canvas cells are 0-indexed relative to the canvas origin.
//!
//! ```text
//! row 1     header
//! row 2     filter bar
//! row 3     ─────────────────────────────
//! [search]  3 rows, search mode only
//! body      sidebar │ map canvas
//! rows-1    ─────────────────────────────
//! rows      footer
//! ```

use crate::engine::CategoryFilter;
use crate::map::{Cell, Viewport};
use std::ops::Range;

/// Widest the sidebar gets; it never takes more than half the pane.
pub const SIDEBAR_MAX_WIDTH: usize = 38;

/// Rows per sidebar card.
pub const CARD_HEIGHT: usize = 4;

/// Height of the search box.
pub const SEARCH_BAR_ROWS: usize = 3;

const FILTER_BAR_START_COL: usize = 2;
const CHIP_GAP: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub row: usize,
    pub col: usize,
    pub rows: usize,
    pub cols: usize,
}

impl Rect {
    #[must_use]
    pub const fn contains(&self, row: usize, col: usize) -> bool {
        row >= self.row && row < self.row + self.rows && col >= self.col && col < self.col + self.cols
    }

    #[must_use]
    pub const fn viewport(&self) -> Viewport {
        Viewport {
            rows: self.rows,
            cols: self.cols,
        }
    }
}

/// What a click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Filter(CategoryFilter),
    /// Index into the visible set.
    Card(usize),
    /// Canvas-relative map cell.
    Map(Cell),
    Nothing,
}

/// Regions of the plugin pane for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub rows: usize,
    pub cols: usize,
    pub header_row: usize,
    pub filter_row: usize,
    pub search: Option<Rect>,
    pub sidebar: Option<Rect>,
    pub map: Rect,
    pub footer_row: usize,
}

impl Layout {
    /// Splits a `rows` x `cols` pane into regions.
    #[must_use]
    pub fn compute(rows: usize, cols: usize, sidebar_open: bool, search_active: bool) -> Self {
        let mut body_top = 4;
        let search = search_active.then(|| {
            let rect = Rect {
                row: body_top,
                col: 1,
                rows: SEARCH_BAR_ROWS,
                cols,
            };
            body_top += SEARCH_BAR_ROWS;
            rect
        });

        let bottom_border = rows.saturating_sub(1);
        let body_rows = bottom_border.saturating_sub(body_top);

        let sidebar_width = if sidebar_open { SIDEBAR_MAX_WIDTH.min(cols / 2) } else { 0 };
        let sidebar = (sidebar_width > 0).then_some(Rect {
            row: body_top,
            col: 1,
            rows: body_rows,
            cols: sidebar_width,
        });

        // One separator column between sidebar and map.
        let map_col = if sidebar.is_some() { sidebar_width + 2 } else { 1 };

        Self {
            rows,
            cols,
            header_row: 1,
            filter_row: 2,
            search,
            sidebar,
            map: Rect {
                row: body_top,
                col: map_col,
                rows: body_rows,
                cols: cols.saturating_sub(map_col - 1),
            },
            footer_row: rows.max(1),
        }
    }

    /// Number of cards that fit in the sidebar.
    #[must_use]
    pub fn card_capacity(&self) -> usize {
        self.sidebar.map_or(0, |rect| rect.rows / CARD_HEIGHT)
    }

    /// Range of cards shown, keeping `selected` near the middle.
    ///
    /// # Example
    ///
    /// ```rust
    /// use atlasphere::ui::layout::Layout;
    ///
    /// let layout = Layout::compute(14, 120, true, false);
    /// assert_eq!(layout.card_capacity(), 2);
    /// assert_eq!(layout.card_window(5, 8), 4..6);
    /// assert_eq!(layout.card_window(7, 8), 6..8);
    /// ```
    #[must_use]
    pub fn card_window(&self, selected: usize, total: usize) -> Range<usize> {
        let capacity = self.card_capacity();
        if capacity == 0 || total == 0 {
            return 0..0;
        }

        let mut start = selected.saturating_sub(capacity / 2);
        let end = (start + capacity).min(total);
        if end - start < capacity && total >= capacity {
            start = end - capacity;
        }
        start..end
    }

    /// Resolves a 1-indexed click position.
    #[must_use]
    pub fn hit_test(&self, row: usize, col: usize, selected: usize, total: usize) -> Hit {
        if row == self.filter_row {
            return filter_chips()
                .into_iter()
                .find(|(span, _)| span.contains(&col))
                .map_or(Hit::Nothing, |(_, filter)| Hit::Filter(filter));
        }

        if let Some(sidebar) = self.sidebar.filter(|rect| rect.contains(row, col)) {
            let window = self.card_window(selected, total);
            let index = window.start + (row - sidebar.row) / CARD_HEIGHT;
            return if window.contains(&index) { Hit::Card(index) } else { Hit::Nothing };
        }

        if self.map.contains(row, col) {
            return Hit::Map(Cell {
                row: row - self.map.row,
                col: col - self.map.col,
            });
        }

        Hit::Nothing
    }
}

/// Text of a filter chip, e.g. `2:Parks`.
#[must_use]
pub fn chip_text(index: usize, filter: CategoryFilter) -> String {
    format!("{index}:{}", filter.label())
}

/// Column span of every filter chip on the filter row.
#[must_use]
pub fn filter_chips() -> Vec<(Range<usize>, CategoryFilter)> {
    let mut col = FILTER_BAR_START_COL;
    CategoryFilter::CHOICES
        .iter()
        .enumerate()
        .map(|(index, filter)| {
            let width = chip_text(index, *filter).chars().count();
            let span = col..col + width;
            col += width + CHIP_GAP;
            (span, *filter)
        })
        .collect()
}
