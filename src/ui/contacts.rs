use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::contact::{Contact, SortOrder};

pub struct ContactListState<'a> {
    pub contacts: &'a [Contact],
    pub selected: usize,
    pub sort_order: SortOrder,
}

/// Left panel: one line per contact, in store order.
pub fn render_contact_list(f: &mut Frame, state: &ContactListState, area: Rect) {
    let order_label = if state.sort_order.is_ascending() {
        "A-Z"
    } else {
        "Z-A"
    };
    let title = format!("Contacts ({}) [{}]", state.contacts.len(), order_label);

    if state.contacts.is_empty() {
        let empty = Paragraph::new("No contacts yet. Press 'a' to add one.")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(title));
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = state
        .contacts
        .iter()
        .map(|contact| {
            let name = contact.name();
            let display = if name.is_empty() { "(unnamed)" } else { name };
            ListItem::new(display.to_string())
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    f.render_stateful_widget(
        list,
        area,
        &mut ListState::default().with_selected(Some(state.selected)),
    );
}
