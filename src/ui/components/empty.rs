//! Empty state component renderer.
//!
//! Shown in the sidebar when the current filter and search leave no places.

use crate::ui::helpers::{centered_padding, position_cursor, text_width, truncate};
use crate::ui::layout::Rect;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders a two-line centered message near the top of `rect`.
///
/// ```text
///
///      No places to show
///   Try another filter or search
/// ```
pub fn render_empty_state(rect: Rect, empty: &EmptyState, theme: &Theme) {
    if rect.rows < 3 {
        return;
    }

    let message = truncate(&empty.message, rect.cols);
    let (left, right) = centered_padding(text_width(&message), rect.cols);

    position_cursor(rect.row + 1, rect.col);
    print!("{}", Theme::fg(&theme.colors.empty_state_fg));
    print!("{}{message}{}", " ".repeat(left), " ".repeat(right));
    print!("{}", Theme::reset());

    let subtitle = truncate(&empty.subtitle, rect.cols);
    let (left, right) = centered_padding(text_width(&subtitle), rect.cols);

    position_cursor(rect.row + 2, rect.col);
    print!("{}", Theme::dim());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}{subtitle}{}", " ".repeat(left), " ".repeat(right));
    print!("{}", Theme::reset());
}
