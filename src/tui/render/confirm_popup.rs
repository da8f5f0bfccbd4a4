use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::tui::app::App;
use crate::util::unicode;

use super::helpers::centered_rect_fixed;

/// Render the yes/no confirmation popup
pub fn render_confirm_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(state) = app.confirm.as_ref() else {
        return;
    };

    let bg = app.theme.background;
    let warn_style = Style::default()
        .fg(app.theme.red)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let text_style = Style::default().fg(app.theme.text).bg(bg);
    let key_style = Style::default().fg(app.theme.highlight).bg(bg);

    let lines = vec![
        Line::from(Span::styled(format!(" {}", state.message), warn_style)),
        Line::from(""),
        Line::from(vec![
            Span::styled(" y", key_style),
            Span::styled(" delete  ", text_style),
            Span::styled("n", key_style),
            Span::styled("/", text_style),
            Span::styled("Esc", key_style),
            Span::styled(" cancel", text_style),
        ]),
    ];

    let popup_w = (unicode::display_width(&state.message) as u16 + 4)
        .max(30)
        .min(area.width.saturating_sub(2));
    let popup_h = (lines.len() as u16 + 2).min(area.height);
    let overlay = centered_rect_fixed(popup_w, popup_h, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.red).bg(bg))
        .style(Style::default().bg(bg));
    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .style(Style::default().bg(bg));

    frame.render_widget(Clear, overlay);
    frame.render_widget(paragraph, overlay);
}
