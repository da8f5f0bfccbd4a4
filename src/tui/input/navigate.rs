use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::text::Category;
use crate::tui::app::{App, Mode};

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Char('q')) => app.should_quit = true,

        // Esc clears an active filter first, then quits
        (_, KeyCode::Esc) => {
            if app.filter.is_active() {
                app.filter.search.clear();
                app.filter.clear_category();
                app.filter_changed();
            } else {
                app.should_quit = true;
            }
        }

        // Cursor movement
        (_, KeyCode::Char('j') | KeyCode::Down) => move_cursor(app, 1),
        (_, KeyCode::Char('k') | KeyCode::Up) => move_cursor(app, -1),
        (_, KeyCode::PageDown) => move_cursor(app, 10),
        (_, KeyCode::PageUp) => move_cursor(app, -10),
        (_, KeyCode::Char('g') | KeyCode::Home) => app.cursor = 0,
        (_, KeyCode::Char('G') | KeyCode::End) => {
            app.cursor = app.visible_count().saturating_sub(1);
        }

        // Filter bar
        (_, KeyCode::Char('/')) => {
            app.search_before = app.filter.search.clone();
            app.mode = Mode::Search;
        }
        (_, KeyCode::Tab) => cycle_category(app, true),
        (_, KeyCode::BackTab) => cycle_category(app, false),
        (KeyModifiers::NONE, KeyCode::Char(c @ '0'..='9')) => select_chip(app, c),

        // Record actions
        (_, KeyCode::Enter | KeyCode::Char(' ')) => app.open_preview(),
        (_, KeyCode::Char('n')) => app.open_create_form(),
        (_, KeyCode::Char('e')) => {
            if let Some(id) = app.selected().map(|t| t.id) {
                app.open_edit_form(id);
            }
        }
        (_, KeyCode::Char('d')) => {
            if let Some(id) = app.selected().map(|t| t.id) {
                app.request_delete(id);
            }
        }
        (_, KeyCode::Char('r')) => {
            if app.refresh() {
                let count = app.service.texts().len();
                app.set_status(format!(
                    "loaded {} text{}",
                    count,
                    if count == 1 { "" } else { "s" }
                ));
            }
        }
        _ => {}
    }
}

fn move_cursor(app: &mut App, delta: isize) {
    let count = app.visible_count();
    if count == 0 {
        app.cursor = 0;
        return;
    }
    let next = app.cursor.saturating_add_signed(delta);
    app.cursor = next.min(count - 1);
}

/// `0` selects "all"; `1`..`9` toggle the category whose code is one less
fn select_chip(app: &mut App, c: char) {
    let Some(n) = c.to_digit(10) else {
        return;
    };
    if n == 0 {
        app.filter.clear_category();
    } else if let Some(category) = Category::from_code((n - 1) as u8) {
        app.filter.toggle_category(category);
    }
    app.filter_changed();
}

/// Step through "all", then each category in code order, wrapping around
fn cycle_category(app: &mut App, forward: bool) {
    let first = Category::ALL[0];
    let last = Category::ALL[Category::ALL.len() - 1];
    app.filter.category = match (app.filter.category, forward) {
        (None, true) => Some(first),
        (None, false) => Some(last),
        (Some(c), true) if c == last => None,
        (Some(c), false) if c == first => None,
        (Some(c), true) => Some(c.next()),
        (Some(c), false) => Some(c.prev()),
    };
    app.filter_changed();
}
