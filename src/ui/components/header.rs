//! Header component renderer.
//!
//! Title on the left, summary counters on the right, filling the whole row
//! with the header colors.

use crate::ui::helpers::{position_cursor, text_width, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the header bar at `row`.
///
/// ```text
///  Atlasphere                         8 places | Filters: All
/// ```
///
/// The summary is cut first when the row is too narrow for both.
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let title = format!(" {}", header.title);
    let title_len = text_width(&title).min(cols);
    let summary = truncate(&header.summary, cols.saturating_sub(title_len + 2));
    let summary_len = text_width(&summary);

    position_cursor(row, 1);
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!("{}", Theme::bold());
    print!("{}", truncate(&title, cols));
    print!("{}", Theme::reset());

    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(cols.saturating_sub(title_len + summary_len + 1)));
    print!("{summary}");
    if summary_len > 0 {
        print!(" ");
    }
    print!("{}", Theme::reset());

    row + 1
}
