//! Map canvas renderer.
//!
//! Draws a sparse background grid, a crosshair at the map center, the
//! category markers and the user's position. Marker glyphs are emoji and take
//! two terminal columns, so a marker in the last column is not drawn.

use crate::ui::helpers::{centered_padding, position_cursor, text_width, truncate};
use crate::ui::layout::Rect;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::MapCanvas;

const GRID_ROW_STEP: usize = 3;
const GRID_COL_STEP: usize = 8;

pub fn render_map_canvas(rect: Rect, canvas: &MapCanvas, theme: &Theme) {
    if rect.rows == 0 || rect.cols == 0 {
        return;
    }

    let grid_line = |row: usize| -> String {
        (0..rect.cols)
            .map(|col| {
                if row % GRID_ROW_STEP == 1 && col % GRID_COL_STEP == 3 {
                    '·'
                } else {
                    ' '
                }
            })
            .collect()
    };

    print!("{}", Theme::fg(&theme.colors.map_grid));
    for row in 0..rect.rows {
        position_cursor(rect.row + row, rect.col);
        print!("{}", grid_line(row));
    }
    print!("{}", Theme::reset());

    if !canvas.ready {
        let waiting = truncate("Waiting for location…", rect.cols);
        let (left, _) = centered_padding(text_width(&waiting), rect.cols);
        position_cursor(rect.row + rect.rows / 2, rect.col + left);
        print!("{}{}{waiting}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim), Theme::reset());
        return;
    }

    position_cursor(rect.row + rect.rows / 2, rect.col + rect.cols / 2);
    print!("{}+{}", Theme::fg(&theme.colors.text_dim), Theme::reset());

    for marker in &canvas.markers {
        if marker.cell.col + 1 >= rect.cols {
            continue;
        }

        position_cursor(rect.row + marker.cell.row, rect.col + marker.cell.col);
        if marker.is_focused {
            print!("{}", Theme::bg(&theme.colors.selection_bg));
        }
        print!("{}{}", Theme::fg(marker.color), marker.glyph);
        print!("{}", Theme::reset());
    }

    if let Some(user) = canvas.user {
        position_cursor(rect.row + user.row, rect.col + user.col);
        print!("{}{}◉{}", Theme::bold(), Theme::fg(&theme.colors.user_marker), Theme::reset());
    }

    let status = truncate(&canvas.status, rect.cols.saturating_sub(1));
    let status_col = rect.col + rect.cols.saturating_sub(text_width(&status) + 1);
    position_cursor(rect.row + rect.rows - 1, status_col);
    print!("{}{}{status}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim), Theme::reset());
}
