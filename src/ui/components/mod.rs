//! Composable UI component renderers.
//!
//! Each component draws one region of the frame with absolute cursor
//! positioning, so components can be drawn in any order; later ones paint
//! over earlier ones. [`render_frame`] fixes that order.
//!
//! # Components
//!
//! - [`header`]: Title and summary counters
//! - [`filter_bar`]: Category filter chips
//! - [`search`]: Search input box
//! - [`sidebar`]: Location cards
//! - [`empty`]: Empty state message inside the sidebar
//! - [`map_canvas`]: Grid, crosshair, markers and user position
//! - [`popup`]: Detail popup of the focused marker
//! - [`toasts`]: Notification stack
//! - [`prompt`]: Startup location prompt
//! - [`footer`]: Keybinding hints

mod empty;
mod filter_bar;
mod footer;
mod header;
mod map_canvas;
mod popup;
mod prompt;
mod search;
mod sidebar;
mod toasts;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use filter_bar::render_filter_bar;
use footer::render_footer;
use header::render_header;
use map_canvas::render_map_canvas;
use popup::render_popup;
use prompt::render_prompt;
use search::render_search_bar;
use sidebar::render_sidebar;
use toasts::render_toasts;

/// Renders a horizontal border line at the specified row.
///
/// # Returns
///
/// The next available row position (row + 1)
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders every region of the frame.
///
/// ```text
/// [Header]
/// [Filter chips]
/// [Border]
/// [Search Bar - 3 lines, search mode only]
/// [Sidebar │ Map canvas + popup + toasts]
/// [Border]
/// [Footer]
/// ```
///
/// The startup prompt, when present, is drawn last over the map.
pub fn render_frame(vm: &UIViewModel, theme: &Theme) {
    let layout = &vm.layout;
    let cols = layout.cols;

    render_header(layout.header_row, &vm.header, theme, cols);
    let border_row = render_filter_bar(layout.filter_row, &vm.filter_bar, theme, cols);
    render_border(border_row, &theme.colors.border, cols);

    if let (Some(rect), Some(search)) = (layout.search, &vm.search_bar) {
        render_search_bar(rect, search, theme);
    }

    if let (Some(rect), Some(sidebar)) = (layout.sidebar, &vm.sidebar) {
        render_sidebar(rect, sidebar, theme);
    }

    render_map_canvas(layout.map, &vm.map, theme);
    if let Some(popup) = &vm.popup {
        render_popup(layout.map, popup, theme);
    }
    render_toasts(layout.map, &vm.toasts, theme);

    if layout.footer_row > border_row + 1 {
        render_border(layout.footer_row - 1, &theme.colors.border, cols);
        render_footer(layout.footer_row, &vm.footer, theme, cols);
    }

    if let Some(prompt) = &vm.prompt {
        render_prompt(prompt, theme, layout.rows, cols);
    }
}
