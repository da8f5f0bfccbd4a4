use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use log::{info, warn};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::editor::{self, EditorError};
use crate::io::http_store::HttpTextStore;
use crate::io::store::TextStore;
use crate::model::Config;
use crate::model::text::{Category, EditBuffer, TextRecord};
use crate::ops::query::TextFilter;
use crate::ops::text_ops::{TextService, TextServiceError};

use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Typing into the search box; the list filters as you type
    Search,
    /// Full-text overlay for one record
    Preview,
    /// Create/edit form overlay
    Form,
    /// Yes/no popup before a destructive action
    Confirm,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewState {
    pub id: i64,
    /// Formatted segments when true, the stored form verbatim otherwise
    pub formatted: bool,
    pub scroll: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormTarget {
    Create,
    Edit(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Category,
    Body,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub target: FormTarget,
    pub buffer: EditBuffer,
    pub field: FormField,
    /// Validation message shown inside the form
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteText { id: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmState {
    pub message: String,
    pub action: ConfirmAction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

/// Main application state
pub struct App {
    pub service: TextService<Box<dyn TextStore>>,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    pub filter: TextFilter,
    /// Search string to restore when a search edit is cancelled
    pub search_before: String,
    /// Cursor index into the visible list
    pub cursor: usize,
    /// First visible card
    pub scroll: usize,
    pub preview: Option<PreviewState>,
    pub form: Option<FormState>,
    pub confirm: Option<ConfirmState>,
    pub status: Option<StatusMessage>,
    /// Set by the form; the event loop suspends the terminal and opens $EDITOR
    pub editor_requested: bool,
}

impl App {
    pub fn new(service: TextService<Box<dyn TextStore>>, theme: Theme) -> Self {
        App {
            service,
            mode: Mode::Navigate,
            should_quit: false,
            theme,
            filter: TextFilter::default(),
            search_before: String::new(),
            cursor: 0,
            scroll: 0,
            preview: None,
            form: None,
            confirm: None,
            status: None,
            editor_requested: false,
        }
    }

    /// Records passing the current filter, in store order
    pub fn visible(&self) -> Vec<&TextRecord> {
        self.filter.apply(self.service.texts())
    }

    pub fn visible_count(&self) -> usize {
        self.visible().len()
    }

    /// Record under the cursor
    pub fn selected(&self) -> Option<&TextRecord> {
        self.visible().get(self.cursor).copied()
    }

    pub fn clamp_cursor(&mut self) {
        let count = self.visible_count();
        self.cursor = if count == 0 { 0 } else { self.cursor.min(count - 1) };
    }

    /// Call after any change to the filter
    pub fn filter_changed(&mut self) {
        self.cursor = 0;
        self.scroll = 0;
    }

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error: false,
        });
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error: true,
        });
    }

    /// Refetch the list, reporting failures in the status row
    pub fn refresh(&mut self) -> bool {
        match self.service.refresh().map(|texts| texts.len()) {
            Ok(count) => {
                info!("event=tui_refresh status=ok count={}", count);
                self.clamp_cursor();
                true
            }
            Err(e) => {
                warn!("event=tui_refresh status=error error={}", e);
                self.set_error(format!("could not load texts: {}", e));
                false
            }
        }
    }

    // -----------------------------------------------------------------------
    // Preview
    // -----------------------------------------------------------------------

    pub fn open_preview(&mut self) {
        let Some(id) = self.selected().map(|t| t.id) else {
            return;
        };
        self.preview = Some(PreviewState {
            id,
            formatted: true,
            scroll: 0,
        });
        self.mode = Mode::Preview;
    }

    pub fn close_preview(&mut self) {
        self.preview = None;
        self.mode = Mode::Navigate;
    }

    /// Record shown in the preview overlay
    pub fn preview_record(&self) -> Option<&TextRecord> {
        let id = self.preview.as_ref()?.id;
        self.service.find(id)
    }

    // -----------------------------------------------------------------------
    // Form
    // -----------------------------------------------------------------------

    /// New-text form, preselecting the filtered category if there is one
    pub fn open_create_form(&mut self) {
        let category = self.filter.category.unwrap_or(Category::Tutorial);
        self.form = Some(FormState {
            target: FormTarget::Create,
            buffer: EditBuffer::with_category(category),
            field: FormField::Body,
            error: None,
        });
        self.preview = None;
        self.mode = Mode::Form;
    }

    /// Edit form for `id`, seeded with the stored body as is
    pub fn open_edit_form(&mut self, id: i64) {
        let Some(record) = self.service.find(id) else {
            self.set_error(format!("text #{} not found", id));
            return;
        };
        self.form = Some(FormState {
            target: FormTarget::Edit(id),
            buffer: EditBuffer::from_record(record),
            field: FormField::Body,
            error: None,
        });
        self.preview = None;
        self.mode = Mode::Form;
    }

    pub fn cancel_form(&mut self) {
        self.form = None;
        self.mode = Mode::Navigate;
    }

    /// Send the form to the store. Blank bodies keep the form open with an
    /// inline error; store failures close nothing and go to the status row.
    pub fn submit_form(&mut self) {
        let Some(form) = self.form.as_ref() else {
            return;
        };
        let target = form.target;
        let buffer = form.buffer.clone();
        let result = match target {
            FormTarget::Create => self.service.create(&buffer),
            FormTarget::Edit(id) => self.service.update(id, &buffer),
        };
        match result {
            Ok(record) => {
                self.form = None;
                self.mode = Mode::Navigate;
                let verb = match target {
                    FormTarget::Create => "created",
                    FormTarget::Edit(_) => "updated",
                };
                let done = format!("{} #{} ({})", verb, record.id, record.category.label());
                self.report_write(done);
                self.select_id(record.id);
            }
            Err(TextServiceError::EmptyBody) => {
                if let Some(form) = self.form.as_mut() {
                    form.error = Some(TextServiceError::EmptyBody.to_string());
                }
            }
            Err(e) => {
                warn!("event=tui_save status=error error={}", e);
                self.set_error(format!("could not save: {}", e));
            }
        }
    }

    /// Apply the outcome of an $EDITOR session to the open form
    pub fn apply_editor_result(&mut self, result: Result<String, EditorError>) {
        match result {
            Ok(body) => {
                if let Some(form) = self.form.as_mut() {
                    form.buffer.body = body;
                    form.error = None;
                }
            }
            Err(e) => self.set_error(e.to_string()),
        }
    }

    // -----------------------------------------------------------------------
    // Delete
    // -----------------------------------------------------------------------

    pub fn request_delete(&mut self, id: i64) {
        let Some(record) = self.service.find(id) else {
            return;
        };
        self.confirm = Some(ConfirmState {
            message: format!(
                "Delete text #{} ({})? This cannot be undone.",
                record.id,
                record.category.label()
            ),
            action: ConfirmAction::DeleteText { id },
        });
        self.preview = None;
        self.mode = Mode::Confirm;
    }

    pub fn cancel_confirm(&mut self) {
        self.confirm = None;
        self.mode = Mode::Navigate;
    }

    pub fn accept_confirm(&mut self) {
        let Some(state) = self.confirm.take() else {
            return;
        };
        self.mode = Mode::Navigate;
        match state.action {
            ConfirmAction::DeleteText { id } => match self.service.delete(id) {
                Ok(()) => {
                    self.clamp_cursor();
                    self.report_write(format!("deleted #{}", id));
                }
                Err(e) => {
                    warn!("event=tui_delete status=error id={} error={}", id, e);
                    self.set_error(format!("could not delete #{}: {}", id, e));
                }
            },
        }
    }

    /// Status for a write that went through, noting a failed reload
    fn report_write(&mut self, done: String) {
        match self.service.stale() {
            Some(reason) => {
                let text = format!("{}; list not reloaded ({}), press r", done, reason);
                self.set_error(text);
            }
            None => self.set_status(done),
        }
    }

    /// Move the cursor onto `id` if it is visible
    pub fn select_id(&mut self, id: i64) {
        let pos = self.visible().iter().position(|t| t.id == id);
        match pos {
            Some(pos) => self.cursor = pos,
            None => self.clamp_cursor(),
        }
    }
}

/// Run the TUI application
pub fn run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let store = HttpTextStore::from_config(&config.api)?;
    let store: Box<dyn TextStore> = Box::new(store);
    let mut app = App::new(TextService::new(store), Theme::from_config(&config.ui));
    app.refresh();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.editor_requested {
            app.editor_requested = false;
            run_external_editor(terminal, app)?;
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

/// Hand the terminal to $EDITOR for the form body, then take it back
fn run_external_editor(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> io::Result<()> {
    let Some(initial) = app.form.as_ref().map(|f| f.buffer.body.clone()) else {
        return Ok(());
    };

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    let result = editor::edit_text(&initial);

    enable_raw_mode()?;
    execute!(terminal.backend_mut(), EnterAlternateScreen)?;
    terminal.clear()?;

    app.apply_editor_result(result);
    Ok(())
}
