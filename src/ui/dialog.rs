use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::state::{ContactForm, DialogMode, FieldKind, FormFocus, DYNAMIC_FIELD_TYPES};

pub fn render_dialog(f: &mut Frame, mode: &DialogMode, area: Rect) {
    match mode {
        DialogMode::None => {}
        DialogMode::Form(form) => {
            render_form_dialog(f, form, area);
        }
        DialogMode::ConfirmDelete { contact_name, .. } => {
            render_confirm_dialog(
                f,
                "Delete Contact",
                &format!("Are you sure you want to delete '{}'?", contact_name),
                area,
            );
        }
    }
}

fn render_form_dialog(f: &mut Frame, form: &ContactForm, area: Rect) {
    let custom_visible = form.selected_kind() == FieldKind::Custom;
    // Rows, picker, optional custom-name input, error line, help line.
    let content_height = form.rows.len() as u16
        + 1
        + if custom_visible { 1 } else { 0 }
        + if form.error.is_some() { 1 } else { 0 }
        + 2;

    let popup_width = 54.min(area.width.saturating_sub(4));
    let popup_height = (content_height + 2).min(area.height.saturating_sub(2));
    let popup_x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = area.y + (area.height.saturating_sub(popup_height)) / 2;

    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(format!(" {} ", form.title()))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan));

    f.render_widget(block.clone(), popup_area);
    let inner = block.inner(popup_area);

    let mut lines: Vec<Line> = Vec::new();

    for (index, row) in form.rows.iter().enumerate() {
        let focused = form.focus == FormFocus::Row(index);
        let marker = if focused { "> " } else { "  " };
        let value = if focused {
            format!("{}_", row.value)
        } else {
            row.value.clone()
        };
        let value_style = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(Color::Yellow)),
            Span::styled(format!("{}: ", row.key), Style::default().fg(Color::Cyan)),
            Span::styled(value, value_style),
        ]));
    }

    // Field type picker
    let picker_focused = form.focus == FormFocus::Picker;
    let marker = if picker_focused { "> " } else { "  " };
    let mut picker_spans = vec![
        Span::styled(marker, Style::default().fg(Color::Yellow)),
        Span::styled("Add field: ", Style::default().fg(Color::Cyan)),
    ];
    for (index, kind) in DYNAMIC_FIELD_TYPES.iter().enumerate() {
        let selected = index == form.picker_index % DYNAMIC_FIELD_TYPES.len();
        let style = match (selected, picker_focused) {
            (true, true) => Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            (true, false) => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            _ => Style::default().fg(Color::DarkGray),
        };
        picker_spans.push(Span::styled(format!(" {} ", kind.label()), style));
    }
    lines.push(Line::from(picker_spans));

    if custom_visible {
        let focused = form.focus == FormFocus::CustomName;
        let marker = if focused { "> " } else { "  " };
        let value = if focused {
            format!("{}_", form.custom_name)
        } else {
            form.custom_name.clone()
        };
        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(Color::Yellow)),
            Span::styled("Field name: ", Style::default().fg(Color::Cyan)),
            Span::styled(
                value,
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ]));
    }

    if let Some(ref error) = form.error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    let body = Paragraph::new(lines);
    f.render_widget(body, chunks[0]);

    let hint = if picker_focused || form.focus == FormFocus::CustomName {
        "Enter: add field | Tab: next | Esc: cancel"
    } else if form.focus_on_dynamic_row() {
        "Enter: save | Del: remove field | Esc: cancel"
    } else {
        "Enter: save | Tab: next | Esc: cancel"
    };
    let help_text = Paragraph::new(hint)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(help_text, chunks[1]);
}

fn render_confirm_dialog(f: &mut Frame, title: &str, message: &str, area: Rect) {
    let popup_width = 50.min(area.width.saturating_sub(4));
    let popup_height = 7;
    let popup_x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = area.y + (area.height.saturating_sub(popup_height)) / 2;

    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(format!(" {} ", title))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Red));

    f.render_widget(block.clone(), popup_area);

    let inner = block.inner(popup_area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(inner);

    let msg = Paragraph::new(message)
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center);
    f.render_widget(msg, chunks[0]);

    let help_text = Paragraph::new("Enter/y: confirm | Esc/n: cancel")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(help_text, chunks[1]);
}
