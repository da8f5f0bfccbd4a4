pub mod confirm_popup;
pub mod filter_bar;
pub mod form_overlay;
pub mod helpers;
pub mod list_view;
pub mod preview_overlay;
pub mod status_row;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::{App, Mode};

/// Main render function — dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: filter bar (search + chips + separator) | list | status row
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // filter bar
            Constraint::Min(1),    // content area
            Constraint::Length(1), // status row
        ])
        .split(area);

    filter_bar::render_filter_bar(frame, app, chunks[0]);
    list_view::render_list_view(frame, app, chunks[1]);

    // Overlays (rendered on top of the list)
    match app.mode {
        Mode::Preview => preview_overlay::render_preview_overlay(frame, app, chunks[1]),
        Mode::Form => form_overlay::render_form_overlay(frame, app, chunks[1]),
        Mode::Confirm => confirm_popup::render_confirm_popup(frame, app, area),
        Mode::Navigate | Mode::Search => {}
    }

    status_row::render_status_row(frame, app, chunks[2]);
}
