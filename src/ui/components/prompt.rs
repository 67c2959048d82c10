//! Startup location prompt, a centered modal over the whole pane.
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │           📍 Location Access             │
//! │                                          │
//! │ Atlasphere would like to access your     │
//! │ location to show you nearby places.      │
//! │                                          │
//! │ y/Enter: allow location  n/Esc: use ...  │
//! └──────────────────────────────────────────┘
//! ```

use crate::ui::helpers::{centered_padding, fit, position_cursor, text_width, truncate, wrap};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::PromptInfo;

const PROMPT_MAX_WIDTH: usize = 60;

pub fn render_prompt(prompt: &PromptInfo, theme: &Theme, rows: usize, cols: usize) {
    let width = PROMPT_MAX_WIDTH.min(cols.saturating_sub(2));
    let inner = width.saturating_sub(4);
    if inner == 0 {
        return;
    }

    let title = truncate(&prompt.title, inner);
    let (left, right) = centered_padding(text_width(&title), inner);

    let mut body = vec![String::new()];
    body.extend(wrap(&prompt.message, inner));
    body.push(String::new());
    body.extend(wrap(&prompt.options, inner));

    let height = body.len() + 3;
    if height > rows {
        return;
    }

    let top = (rows - height) / 2 + 1;
    let col = (cols - width) / 2 + 1;
    let border = theme.colors.accent.as_str();

    position_cursor(top, col);
    print!("{}┌{}┐{}", Theme::fg(border), "─".repeat(width - 2), Theme::reset());

    position_cursor(top + 1, col);
    print!("{}│ {}", Theme::fg(border), Theme::reset());
    print!("{}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg));
    print!("{}{title}{}", " ".repeat(left), " ".repeat(right));
    print!("{}{} │{}", Theme::reset(), Theme::fg(border), Theme::reset());

    for (offset, line) in body.iter().enumerate() {
        position_cursor(top + 2 + offset, col);
        print!("{}│ {}", Theme::fg(border), Theme::reset());
        print!("{}{}{}", Theme::fg(&theme.colors.text_normal), fit(line, inner), Theme::reset());
        print!("{} │{}", Theme::fg(border), Theme::reset());
    }

    position_cursor(top + height - 1, col);
    print!("{}└{}┘{}", Theme::fg(border), "─".repeat(width - 2), Theme::reset());
}
