use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use crate::tui::app::{App, FormField, FormTarget};

use super::helpers::{centered_rect_fixed, scroll_offset, wrapped_rows};

/// Render the create/edit form
pub fn render_form_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let Some(form) = app.form.as_ref() else {
        return;
    };

    let theme = &app.theme;
    let bg = theme.background;
    let dim_style = Style::default().fg(theme.dim).bg(bg);
    let text_style = Style::default().fg(theme.text_bright).bg(bg);
    let key_style = Style::default().fg(theme.highlight).bg(bg);
    let label_style = |field: FormField| {
        if form.field == field {
            Style::default()
                .fg(theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD)
        } else {
            dim_style
        }
    };

    let title = match form.target {
        FormTarget::Create => " New text ".to_string(),
        FormTarget::Edit(id) => format!(" Edit text #{} ", id),
    };

    let category = form.buffer.category;
    let mut lines: Vec<Line> = vec![
        Line::from(vec![
            Span::styled("Category  ", label_style(FormField::Category)),
            Span::styled("\u{25C2} ", dim_style),
            Span::styled(
                category.label(),
                Style::default()
                    .fg(theme.category_color(category))
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" \u{25B8}", dim_style),
        ]),
        Line::default(),
        Line::from(Span::styled("Body", label_style(FormField::Body))),
    ];

    let body_lines: Vec<&str> = form.buffer.body.split('\n').collect();
    let last = body_lines.len() - 1;
    for (i, line) in body_lines.iter().enumerate() {
        let mut spans = Vec::new();
        if !line.is_empty() {
            spans.push(Span::styled(line.to_string(), text_style));
        }
        if i == last && form.field == FormField::Body {
            spans.push(Span::styled("\u{258C}", key_style));
        }
        lines.push(Line::from(spans));
    }

    if let Some(ref error) = form.error {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(theme.red).bg(bg),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .padding(Padding::horizontal(1))
        .border_style(Style::default().fg(theme.highlight).bg(bg))
        .title(Span::styled(title, text_style))
        .title_bottom(Line::from(vec![
            Span::styled(" Tab", key_style),
            Span::styled(" field  ", dim_style),
            Span::styled("\u{2190}/\u{2192}", key_style),
            Span::styled(" category  ", dim_style),
            Span::styled("^E", key_style),
            Span::styled(" editor  ", dim_style),
            Span::styled("^S", key_style),
            Span::styled(" save  ", dim_style),
            Span::styled("Esc", key_style),
            Span::styled(" cancel ", dim_style),
        ]))
        .style(Style::default().bg(bg));

    let overlay = centered_rect_fixed(
        area.width.saturating_sub(4),
        area.height.saturating_sub(2),
        area,
    );
    // Keep the end of a long body (where typing happens) in view
    let inner = block.inner(overlay);
    let scroll = wrapped_rows(&lines, inner.width).saturating_sub(inner.height as usize);

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll_offset(scroll), 0))
        .style(Style::default().bg(bg));

    frame.render_widget(Clear, overlay);
    frame.render_widget(paragraph, overlay);
}
