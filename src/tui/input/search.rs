use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode};
use crate::util::unicode;

/// Search box input. Every edit re-applies the filter immediately.
pub(super) fn handle_search(app: &mut App, key: KeyEvent) {
    match key.code {
        // Cancel: restore the search string from before this edit
        KeyCode::Esc => {
            app.filter.search = std::mem::take(&mut app.search_before);
            app.filter_changed();
            app.mode = Mode::Navigate;
        }
        KeyCode::Enter | KeyCode::Down => {
            app.search_before.clear();
            app.mode = Mode::Navigate;
        }
        KeyCode::Backspace => {
            if unicode::pop_grapheme(&mut app.filter.search) {
                app.filter_changed();
            }
        }
        KeyCode::Char(c) => {
            app.filter.search.push(c);
            app.filter_changed();
        }
        _ => {}
    }
}
