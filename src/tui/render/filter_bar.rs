use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::text::Category;
use crate::tui::app::{App, Mode};
use crate::util::unicode;

use super::helpers::{pad_to_width, spans_width};

/// Label of the chip that clears the category filter
pub const ALL_CHIP_LABEL: &str = "Todos";

const CHIP_GAP: &str = "  ";

/// Render the filter bar: search line, category chips, separator
pub fn render_filter_bar(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let lines = vec![
        search_line(app, width),
        chips_line(app, width),
        Line::from(Span::styled(
            "\u{2500}".repeat(width),
            Style::default().fg(app.theme.dim).bg(bg),
        )),
    ];
    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn search_line(app: &App, width: usize) -> Line<'static> {
    let bg = app.theme.background;
    let dim = Style::default().fg(app.theme.dim).bg(bg);
    let mut spans = vec![Span::styled(" Search ", dim)];

    let searching = app.mode == Mode::Search;
    if app.filter.search.is_empty() && !searching {
        spans.push(Span::styled("/ to filter by text", dim));
    } else {
        spans.push(Span::styled(
            app.filter.search.clone(),
            Style::default().fg(app.theme.text_bright).bg(bg),
        ));
        if searching {
            spans.push(Span::styled(
                "\u{258C}",
                Style::default().fg(app.theme.highlight).bg(bg),
            ));
        }
    }

    // Right-aligned match count
    let total = app.service.texts().len();
    let shown = app.visible_count();
    let count = if app.filter.is_active() {
        format!("{} of {} texts ", shown, total)
    } else {
        format!("{} texts ", total)
    };
    let used = spans_width(&spans);
    let count_width = unicode::display_width(&count);
    if used + count_width < width {
        spans.push(Span::styled(" ".repeat(width - used - count_width), dim));
        spans.push(Span::styled(count, dim));
    }
    Line::from(spans)
}

fn chips_line(app: &App, width: usize) -> Line<'static> {
    let bg = app.theme.background;
    let chip_count = Category::ALL.len() + 1;
    let gaps = 1 + CHIP_GAP.len() * (chip_count - 1);
    let full_width: usize = gaps
        + chip_labels()
            .map(|(_, label)| unicode::display_width(label))
            .sum::<usize>();
    // Squeeze unselected labels into what the selected chip leaves over
    let max_label = if full_width <= width {
        usize::MAX
    } else {
        let selected_width = chip_labels()
            .find(|(category, _)| *category == app.filter.category)
            .map_or(0, |(_, label)| unicode::display_width(label));
        (width.saturating_sub(gaps + selected_width) / (chip_count - 1)).max(1)
    };

    let mut spans = vec![Span::styled(" ", Style::default().bg(bg))];
    for (i, (category, label)) in chip_labels().enumerate() {
        if i > 0 {
            spans.push(Span::styled(CHIP_GAP, Style::default().bg(bg)));
        }
        let selected = app.filter.category == category;
        let style = if selected {
            let fg = match category {
                Some(c) => app.theme.category_color(c),
                None => app.theme.highlight,
            };
            Style::default()
                .fg(app.theme.background)
                .bg(fg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.dim).bg(bg)
        };
        let text = if selected {
            label.to_string()
        } else {
            unicode::truncate_to_width(label, max_label)
        };
        spans.push(Span::styled(text, style));
    }
    pad_to_width(&mut spans, width, Style::default().bg(bg));
    Line::from(spans)
}

/// "Todos" followed by every category label, in code order
fn chip_labels() -> impl Iterator<Item = (Option<Category>, &'static str)> {
    std::iter::once((None, ALL_CHIP_LABEL)).chain(Category::ALL.iter().map(|&c| (Some(c), c.label())))
}
