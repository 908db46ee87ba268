use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::contact::{Contact, FIELD_NAME, FIELD_PHONE};

/// The field rows the detail panel shows: name and phone pinned first, then
/// the dynamic fields in key order. Labels are capitalized for display; blank
/// values are hidden, and the wire id never appears because it is not a field.
pub fn detail_rows(contact: &Contact) -> Vec<(String, String)> {
    let mut rows = Vec::new();
    for key in [FIELD_NAME, FIELD_PHONE] {
        if let Some(value) = contact.fields.get(key) {
            if !value.is_empty() {
                rows.push((field_label(key), value.clone()));
            }
        }
    }
    for (key, value) in contact.dynamic_fields() {
        if !value.is_empty() {
            rows.push((field_label(key), value.to_string()));
        }
    }
    rows
}

/// Capitalize each word of a field key: "name" shows as "Name", a custom
/// "home address" as "Home Address".
fn field_label(key: &str) -> String {
    key.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Right panel: every non-empty field of the selected contact.
pub fn render_contact_details(f: &mut Frame, contact: Option<&Contact>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Details [e: edit | d: delete]")
        .border_style(Style::default().fg(Color::DarkGray));

    let contact = match contact {
        Some(contact) => contact,
        None => {
            let empty = Paragraph::new("No contact selected")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            f.render_widget(empty, area);
            return;
        }
    };

    let lines: Vec<Line> = detail_rows(contact)
        .into_iter()
        .map(|(key, value)| {
            Line::from(vec![
                Span::styled(
                    format!("{}: ", key),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(value),
            ])
        })
        .collect();

    let details = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(block);
    f.render_widget(details, area);
}
