//! Toast stack, bottom-right of the map canvas above the status line.
//!
//! The newest toast sits lowest. Toasts in their exit phase are dimmed.

use crate::ui::helpers::{position_cursor, text_width, truncate};
use crate::ui::layout::Rect;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ToastItem;

pub fn render_toasts(map: Rect, toasts: &[ToastItem], theme: &Theme) {
    // Last canvas row holds the status line.
    let available = map.rows.saturating_sub(1);

    for (slot, toast) in toasts.iter().rev().take(available).enumerate() {
        let text = truncate(&format!(" {} ", toast.text), map.cols.saturating_sub(1));
        let row = map.row + available - 1 - slot;
        let col = map.col + map.cols.saturating_sub(text_width(&text) + 1);

        position_cursor(row, col);
        if toast.is_leaving {
            print!("{}", Theme::dim());
        } else {
            print!("{}", Theme::bold());
        }
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(theme.colors.toast(toast.severity)));
        print!("{text}");
        print!("{}", Theme::reset());
    }
}
