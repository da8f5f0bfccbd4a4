use std::rc::Rc;

use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::io::memory_store::MemoryTextStore;
use crate::io::store::{StoreError, TextStore};
use crate::model::text::{Category, TextInput, TextRecord};
use crate::ops::text_ops::TextService;
use crate::tui::app::App;
use crate::tui::theme::Theme;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

pub fn record(id: i64, category: Category, body: &str) -> TextRecord {
    TextRecord {
        id,
        body: body.to_string(),
        category,
        created_at: "2024-03-05T10:00:00".into(),
        modified_at: "2024-03-06T09:30:00".into(),
    }
}

/// Four texts across three categories.
pub fn sample_texts() -> Vec<TextRecord> {
    vec![
        record(1, Category::Tutorial, "Bienvenido|Paso uno"),
        record(2, Category::TermsAndConditions, "Acepta los terminos||Version 2"),
        record(3, Category::AboutUs, "Somos un equipo"),
        record(4, Category::Tutorial, "Segundo tutorial"),
    ]
}

/// Build an App over an in-memory store and load it.
pub fn app_with_texts(records: Vec<TextRecord>) -> App {
    let store: Box<dyn TextStore> = Box::new(MemoryTextStore::with_records(records));
    let mut app = App::new(TextService::new(store), Theme::default());
    app.refresh();
    app
}

pub fn app_with_sample_texts() -> App {
    app_with_texts(sample_texts())
}

/// Store handle the test keeps after the App takes ownership
struct SharedStore(Rc<MemoryTextStore>);

impl TextStore for SharedStore {
    fn list_all(&self) -> Result<Vec<TextRecord>, StoreError> {
        self.0.list_all()
    }

    fn create(&self, input: &TextInput) -> Result<TextRecord, StoreError> {
        self.0.create(input)
    }

    fn update(&self, id: i64, input: &TextInput) -> Result<TextRecord, StoreError> {
        self.0.update(id, input)
    }

    fn delete(&self, id: i64) -> Result<(), StoreError> {
        self.0.delete(id)
    }
}

/// Like [`app_with_texts`], also returning the store to inject failures.
pub fn app_with_shared_store(records: Vec<TextRecord>) -> (App, Rc<MemoryTextStore>) {
    let store = Rc::new(MemoryTextStore::with_records(records));
    let boxed: Box<dyn TextStore> = Box::new(SharedStore(Rc::clone(&store)));
    let mut app = App::new(TextService::new(boxed), Theme::default());
    app.refresh();
    (app, store)
}
