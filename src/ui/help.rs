use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use super::keybindings::KEYBINDING_CATEGORIES;

pub fn render_help_panel(f: &mut Frame, area: Rect) {
    // Build content lines
    let mut lines: Vec<Line> = Vec::new();

    for category in KEYBINDING_CATEGORIES {
        lines.push(Line::from(Span::styled(
            category.name,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));

        for binding in category.bindings {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {:12}", binding.keys),
                    Style::default().fg(Color::Green),
                ),
                Span::raw(binding.description),
            ]));
        }
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(Color::DarkGray),
    )));

    let popup_width = 52.min(area.width.saturating_sub(4));
    let popup_height = (lines.len() as u16 + 2).min(area.height.saturating_sub(2));
    let popup_x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = area.y + (area.height.saturating_sub(popup_height)) / 2;

    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);

    let help = Paragraph::new(lines).alignment(Alignment::Left).block(
        Block::default()
            .title(" Help ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(help, popup_area);
}
