//! Detail popup of the focused marker, drawn in the top-right corner of the
//! map canvas.

use crate::ui::helpers::{fit, position_cursor, wrap};
use crate::ui::layout::Rect;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::PopupInfo;

const POPUP_MAX_WIDTH: usize = 44;
const POPUP_MARGIN: usize = 1;
const DESCRIPTION_MAX_LINES: usize = 3;

pub fn render_popup(map: Rect, popup: &PopupInfo, theme: &Theme) {
    let width = POPUP_MAX_WIDTH.min(map.cols.saturating_sub(POPUP_MARGIN * 2));
    let inner = width.saturating_sub(4);
    if inner == 0 {
        return;
    }

    let mut lines: Vec<(String, &str, bool)> = vec![
        (popup.title.clone(), theme.colors.text_normal.as_str(), true),
        (popup.category.to_string(), theme.colors.text_dim.as_str(), false),
        (popup.rating.clone(), theme.colors.text_normal.as_str(), false),
    ];
    lines.extend(
        wrap(&popup.description, inner)
            .into_iter()
            .take(DESCRIPTION_MAX_LINES)
            .map(|line| (line, theme.colors.text_normal.as_str(), false)),
    );
    lines.push((popup.details.clone(), theme.colors.text_dim.as_str(), false));
    lines.push((popup.hint.clone(), theme.colors.accent.as_str(), false));

    let height = lines.len() + 2;
    if height > map.rows {
        return;
    }

    let col = map.col + map.cols - width - POPUP_MARGIN;
    let border = theme.colors.popup_border.as_str();

    position_cursor(map.row, col);
    print!("{}┌{}┐{}", Theme::fg(border), "─".repeat(width - 2), Theme::reset());

    for (offset, (text, color, bold)) in lines.iter().enumerate() {
        position_cursor(map.row + 1 + offset, col);
        print!("{}│ {}", Theme::fg(border), Theme::reset());
        if *bold {
            print!("{}", Theme::bold());
        }
        print!("{}{}{}", Theme::fg(color), fit(text, inner), Theme::reset());
        print!("{} │{}", Theme::fg(border), Theme::reset());
    }

    position_cursor(map.row + height - 1, col);
    print!("{}└{}┘{}", Theme::fg(border), "─".repeat(width - 2), Theme::reset());
}
