use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, FormField};
use crate::util::unicode;

pub(super) fn handle_form(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('s') => app.submit_form(),
            KeyCode::Char('e') => app.editor_requested = true,
            _ => {}
        }
        return;
    }

    if key.code == KeyCode::Esc {
        app.cancel_form();
        return;
    }

    let Some(form) = app.form.as_mut() else {
        return;
    };
    match (form.field, key.code) {
        (_, KeyCode::Tab | KeyCode::BackTab) => {
            form.field = match form.field {
                FormField::Category => FormField::Body,
                FormField::Body => FormField::Category,
            };
        }

        // Category picker
        (FormField::Category, KeyCode::Right | KeyCode::Char('l') | KeyCode::Down | KeyCode::Char('j')) => {
            form.buffer.category = form.buffer.category.next();
        }
        (FormField::Category, KeyCode::Left | KeyCode::Char('h') | KeyCode::Up | KeyCode::Char('k')) => {
            form.buffer.category = form.buffer.category.prev();
        }
        (FormField::Category, KeyCode::Enter) => form.field = FormField::Body,

        // Body: append-only editing at the end of the buffer
        (FormField::Body, KeyCode::Enter) => {
            form.buffer.body.push('\n');
            form.error = None;
        }
        (FormField::Body, KeyCode::Backspace) => {
            unicode::pop_grapheme(&mut form.buffer.body);
        }
        (FormField::Body, KeyCode::Char(c)) => {
            form.buffer.body.push(c);
            form.error = None;
        }
        _ => {}
    }
}
