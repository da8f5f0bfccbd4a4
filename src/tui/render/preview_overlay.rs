use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use crate::ops::card::format_date;
use crate::ops::transform::{display_lines, format_for_display, raw_display};
use crate::tui::app::App;

use super::helpers::{centered_rect_fixed, scroll_offset, wrapped_rows};

/// Render the full text of the previewed record
pub fn render_preview_overlay(frame: &mut Frame, app: &mut App, area: Rect) {
    let Some(formatted) = app.preview.as_ref().map(|p| p.formatted) else {
        return;
    };
    let Some(record) = app.preview_record().cloned() else {
        return;
    };

    let theme = &app.theme;
    let bg = theme.background;
    let text_style = Style::default().fg(theme.text_bright).bg(bg);
    let dim_style = Style::default().fg(theme.dim).bg(bg);
    let key_style = Style::default().fg(theme.highlight).bg(bg);

    let body: Vec<String> = if formatted {
        display_lines(&format_for_display(&record.body))
    } else {
        vec![raw_display(&record.body).to_string()]
    };

    let mut lines: Vec<Line> = vec![
        Line::from(vec![
            Span::styled(
                record.category.label(),
                Style::default()
                    .fg(theme.category_color(record.category))
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  #{}", record.id), dim_style),
        ]),
        Line::from(Span::styled(
            format!(
                "created {}  modified {}",
                format_date(&record.created_at),
                format_date(&record.modified_at)
            ),
            dim_style,
        )),
        Line::default(),
    ];
    // Line breaks stay empty lines; a lone space would wrap into two rows
    lines.extend(body.into_iter().map(|line| {
        if line.is_empty() {
            Line::default()
        } else {
            Line::from(Span::styled(line, text_style))
        }
    }));

    let mode_label = if formatted { " formatted " } else { " raw " };
    let block = Block::default()
        .borders(Borders::ALL)
        .padding(Padding::horizontal(1))
        .border_style(Style::default().fg(theme.highlight).bg(bg))
        .title(Span::styled(mode_label, text_style))
        .title_bottom(Line::from(vec![
            Span::styled(" r", key_style),
            Span::styled(" raw/formatted  ", dim_style),
            Span::styled("e", key_style),
            Span::styled(" edit  ", dim_style),
            Span::styled("d", key_style),
            Span::styled(" delete  ", dim_style),
            Span::styled("Esc", key_style),
            Span::styled(" close ", dim_style),
        ]))
        .style(Style::default().bg(bg));

    let overlay = centered_rect_fixed(
        area.width.saturating_sub(4),
        area.height.saturating_sub(2),
        area,
    );
    let inner = block.inner(overlay);

    // Clamp scroll so the last wrapped row can reach the bottom edge
    let max_scroll = wrapped_rows(&lines, inner.width).saturating_sub(inner.height as usize);
    let scroll = match app.preview.as_mut() {
        Some(preview) => {
            preview.scroll = preview.scroll.min(max_scroll);
            preview.scroll
        }
        None => 0,
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll_offset(scroll), 0))
        .style(Style::default().bg(bg));

    frame.render_widget(Clear, overlay);
    frame.render_widget(paragraph, overlay);
}
