//! Search bar component renderer.
//!
//! Renders the place search input with a bordered frame.

use crate::ui::helpers::{fit, position_cursor};
use crate::ui::layout::Rect;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 2;

/// Renders the search input box inside `rect`.
///
/// ```text
/// [margin] ┌────────────────────────────┐ [margin]
/// [margin] │ Search places: brooklyn█   │ [margin]
/// [margin] └────────────────────────────┘ [margin]
/// ```
///
/// # Returns
///
/// The row after the box.
pub fn render_search_bar(rect: Rect, search: &SearchBarInfo, theme: &Theme) -> usize {
    let box_width = rect.cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let margin = " ".repeat(SEARCH_BOX_MARGIN);

    position_cursor(rect.row, rect.col);
    print!("{margin}");
    print!("{}", Theme::fg(&theme.colors.accent));
    print!("┌{}┐", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    let search_text = format!(" Search places: {}█", search.query);

    position_cursor(rect.row + 1, rect.col);
    print!("{margin}");
    print!("{}", Theme::fg(&theme.colors.accent));
    print!("│");
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{}", fit(&search_text, inner_width));
    print!("{}", Theme::fg(&theme.colors.accent));
    print!("│");
    print!("{}", Theme::reset());

    position_cursor(rect.row + 2, rect.col);
    print!("{margin}");
    print!("{}", Theme::fg(&theme.colors.accent));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    rect.row + rect.rows
}
