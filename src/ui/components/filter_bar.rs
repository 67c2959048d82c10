//! Category filter chips.

use crate::ui::helpers::position_cursor;
use crate::ui::layout::filter_chips;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FilterBarInfo;

/// Renders the chips at `row`, at the columns [`filter_chips`] reports so
/// that mouse hit testing and drawing agree.
pub fn render_filter_bar(row: usize, bar: &FilterBarInfo, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", " ".repeat(cols));

    for ((span, _), chip) in filter_chips().into_iter().zip(&bar.chips) {
        if span.end > cols + 1 {
            break;
        }

        position_cursor(row, span.start);
        if chip.is_active {
            print!("{}", Theme::bold());
            print!("{}", Theme::fg(&theme.colors.selection_fg));
            print!("{}", Theme::bg(&theme.colors.accent));
        } else {
            print!("{}", Theme::fg(&theme.colors.text_normal));
        }
        print!("{}", chip.text);
        print!("{}", Theme::reset());
    }

    row + 1
}
