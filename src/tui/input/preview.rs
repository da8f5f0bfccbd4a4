use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::App;

pub(super) fn handle_preview(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char(' ') => {
            app.close_preview();
        }
        // Formatted ↔ stored form
        KeyCode::Char('r') | KeyCode::Tab => {
            if let Some(preview) = app.preview.as_mut() {
                preview.formatted = !preview.formatted;
                preview.scroll = 0;
            }
        }
        KeyCode::Char('j') | KeyCode::Down => scroll(app, 1),
        KeyCode::Char('k') | KeyCode::Up => scroll(app, -1),
        KeyCode::PageDown => scroll(app, 10),
        KeyCode::PageUp => scroll(app, -10),
        KeyCode::Char('g') | KeyCode::Home => {
            if let Some(preview) = app.preview.as_mut() {
                preview.scroll = 0;
            }
        }
        KeyCode::Char('e') => {
            if let Some(id) = app.preview.as_ref().map(|p| p.id) {
                app.open_edit_form(id);
            }
        }
        KeyCode::Char('d') => {
            if let Some(id) = app.preview.as_ref().map(|p| p.id) {
                app.request_delete(id);
            }
        }
        _ => {}
    }
}

/// Scroll is clamped when rendering, so only the lower bound matters here
fn scroll(app: &mut App, delta: isize) {
    if let Some(preview) = app.preview.as_mut() {
        preview.scroll = preview.scroll.saturating_add_signed(delta);
    }
}
