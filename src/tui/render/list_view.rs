use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::text::TextRecord;
use crate::ops::card::{format_date, truncate_preview};
use crate::tui::app::App;
use crate::util::unicode;

use super::helpers::pad_to_width;

/// Rows per card: header, body, dates, gap
const CARD_HEIGHT: usize = 4;
const INDENT: &str = "    ";

/// Render the list of text cards
pub fn render_list_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let count = app.visible_count();

    if count == 0 {
        let message = if app.service.texts().is_empty() {
            " No texts yet. Press n to create one."
        } else {
            " No texts match the filter."
        };
        let empty = Paragraph::new(message).style(Style::default().fg(app.theme.dim).bg(bg));
        frame.render_widget(empty, area);
        return;
    }

    // Keep the cursor card on screen
    let per_page = (area.height as usize / CARD_HEIGHT).max(1);
    if app.cursor < app.scroll {
        app.scroll = app.cursor;
    } else if app.cursor >= app.scroll + per_page {
        app.scroll = app.cursor + 1 - per_page;
    }

    let width = area.width as usize;
    let mut lines: Vec<Line> = Vec::new();
    for (i, record) in app
        .visible()
        .iter()
        .enumerate()
        .skip(app.scroll)
        .take(per_page)
    {
        lines.extend(card_lines(app, record, i == app.cursor, width));
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn card_lines(app: &App, record: &TextRecord, is_cursor: bool, width: usize) -> Vec<Line<'static>> {
    let theme = &app.theme;
    let bg = if is_cursor {
        theme.selection_bg
    } else {
        theme.background
    };
    let base = Style::default().bg(bg);
    let gutter = if is_cursor {
        Span::styled("\u{258E}", Style::default().fg(theme.selection_border).bg(bg))
    } else {
        Span::styled(" ", base)
    };

    // Header: id + category label
    let mut header = vec![
        gutter.clone(),
        Span::styled(format!("#{}", record.id), base.fg(theme.dim)),
        Span::styled("  ", base),
        Span::styled(
            record.category.label(),
            base.fg(theme.category_color(record.category))
                .add_modifier(Modifier::BOLD),
        ),
    ];
    pad_to_width(&mut header, width, base);

    // Body: stored form, cut to the card preview length and the row width
    let body_width = width.saturating_sub(INDENT.len());
    let body_text = unicode::truncate_to_width(&truncate_preview(&record.body), body_width);
    let body_style = if is_cursor {
        base.fg(theme.text_bright)
    } else {
        base.fg(theme.text)
    };
    let mut body = vec![
        gutter.clone(),
        Span::styled(&INDENT[1..], base),
        Span::styled(body_text, body_style),
    ];
    pad_to_width(&mut body, width, base);

    let mut dates = vec![
        gutter,
        Span::styled(&INDENT[1..], base),
        Span::styled(
            format!(
                "created {}  modified {}",
                format_date(&record.created_at),
                format_date(&record.modified_at)
            ),
            base.fg(theme.dim),
        ),
    ];
    pad_to_width(&mut dates, width, base);

    vec![
        Line::from(header),
        Line::from(body),
        Line::from(dates),
        Line::from(""),
    ]
}
