//! Sidebar card list renderer.
//!
//! Each card takes [`CARD_HEIGHT`] rows:
//!
//! ```text
//!  🌳 Central Park
//!  ⭐⭐⭐⭐ 4.8 (12,543 reviews)
//!  Iconic urban park in Manhattan
//!  Open 6 AM - 1 AM
//! ```

use crate::ui::components::empty::render_empty_state;
use crate::ui::helpers::{fit, position_cursor};
use crate::ui::layout::{Rect, CARD_HEIGHT};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{CardItem, SidebarInfo};

/// Renders the sidebar into `rect` plus the separator column right of it.
pub fn render_sidebar(rect: Rect, sidebar: &SidebarInfo, theme: &Theme) {
    for offset in 0..rect.rows {
        position_cursor(rect.row + offset, rect.col);
        print!("{}", " ".repeat(rect.cols));
        print!("{}", Theme::fg(&theme.colors.border));
        print!("│");
        print!("{}", Theme::reset());
    }

    if let Some(empty) = &sidebar.empty_state {
        render_empty_state(rect, empty, theme);
        return;
    }

    for (index, item) in sidebar.cards.iter().enumerate() {
        render_card(rect.row + index * CARD_HEIGHT, rect, item, theme);
    }
}

fn render_card(row: usize, rect: Rect, item: &CardItem, theme: &Theme) {
    let width = rect.cols.saturating_sub(1);
    let card = &item.card;

    let lines = [
        (format!("{} {}", card.icon, card.name), true),
        (format!("{} {}", card.stars, card.rating_label), false),
        (card.description.clone(), false),
        (card.details.clone(), false),
    ];

    for (offset, (text, is_title)) in lines.iter().enumerate() {
        position_cursor(row + offset, rect.col);

        if item.is_selected {
            print!("{}", Theme::fg(&theme.colors.selection_fg));
            print!("{}", Theme::bg(&theme.colors.selection_bg));
        } else if *is_title {
            print!("{}", Theme::fg(&theme.colors.text_normal));
        } else {
            print!("{}", Theme::fg(&theme.colors.text_dim));
        }
        if *is_title {
            print!("{}", Theme::bold());
        }

        print!(" {}", fit(text, width));
        print!("{}", Theme::reset());
    }
}
