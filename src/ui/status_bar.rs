use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::app::state::DialogMode;

/// Which input surface currently owns the keyboard.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum InputMode {
    Normal,
    Form,
    Confirm,
}

impl From<&DialogMode> for InputMode {
    fn from(dialog: &DialogMode) -> Self {
        match dialog {
            DialogMode::None => InputMode::Normal,
            DialogMode::Form(_) => InputMode::Form,
            DialogMode::ConfirmDelete { .. } => InputMode::Confirm,
        }
    }
}

pub struct StatusBarState {
    pub status_message: Option<(String, bool)>, // (message, is_error)
    pub mode: InputMode,
}

pub fn render_status_bar(f: &mut Frame, state: &StatusBarState, area: ratatui::layout::Rect) {
    let status_bar = if let Some((ref msg, is_error)) = state.status_message {
        let color = if is_error { Color::Red } else { Color::Yellow };
        Paragraph::new(Line::from(vec![
            Span::styled(
                if is_error { "ERROR" } else { "INFO" },
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::raw(": "),
            Span::styled(msg.as_str(), Style::default().fg(color)),
        ]))
    } else {
        Paragraph::new(mode_hints(state.mode))
    };

    let status_bar = status_bar.block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(status_bar, area);
}

/// Key hints for the active input surface. The confirm row mirrors the
/// confirm dialog footer; Tab only appears where there is a field to tab to.
fn mode_hints(mode: InputMode) -> Line<'static> {
    let key = Style::default().add_modifier(Modifier::BOLD);
    match mode {
        InputMode::Normal => Line::from(vec![
            Span::styled(
                "NORMAL",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | "),
            Span::styled("j/k", key),
            Span::raw(": move | "),
            Span::styled("a", key),
            Span::raw(": add | "),
            Span::styled("e", key),
            Span::raw(": edit | "),
            Span::styled("d", key),
            Span::raw(": delete | "),
            Span::styled("r", key),
            Span::raw(": refresh | "),
            Span::styled("s", key),
            Span::raw(": sort | "),
            Span::styled("i", key),
            Span::raw(": interval | "),
            Span::styled("?", key),
            Span::raw(": help"),
        ]),
        InputMode::Form => Line::from(vec![
            Span::styled(
                "EDIT",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | "),
            Span::styled("Tab", key),
            Span::raw(": next field | "),
            Span::styled("Enter", key),
            Span::raw(": save | "),
            Span::styled("Esc", key),
            Span::raw(": cancel"),
        ]),
        InputMode::Confirm => Line::from(vec![
            Span::styled(
                "CONFIRM",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | "),
            Span::styled("Enter/y", key),
            Span::raw(": confirm | "),
            Span::styled("Esc/n", key),
            Span::raw(": cancel"),
        ]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::ContactForm;

    fn hint_text(mode: InputMode) -> String {
        mode_hints(mode)
            .spans
            .iter()
            .map(|span| span.content.as_ref())
            .collect()
    }

    #[test]
    fn test_mode_tracks_dialog_kind() {
        assert_eq!(InputMode::from(&DialogMode::None), InputMode::Normal);
        assert_eq!(
            InputMode::from(&DialogMode::Form(ContactForm::blank())),
            InputMode::Form
        );
        assert_eq!(
            InputMode::from(&DialogMode::ConfirmDelete {
                contact_id: "1".to_string(),
                contact_name: "Bob".to_string(),
            }),
            InputMode::Confirm
        );
    }

    #[test]
    fn test_form_hints_offer_field_navigation() {
        let text = hint_text(InputMode::Form);
        assert!(text.starts_with("EDIT"));
        assert!(text.contains("Tab: next field"));
    }

    #[test]
    fn test_confirm_hints_skip_field_navigation() {
        let text = hint_text(InputMode::Confirm);
        assert!(text.starts_with("CONFIRM"));
        assert!(text.contains("Enter/y: confirm"));
        assert!(text.contains("Esc/n: cancel"));
        assert!(!text.contains("Tab"));
    }

    #[test]
    fn test_normal_hints_list_command_keys() {
        let text = hint_text(InputMode::Normal);
        assert!(text.starts_with("NORMAL"));
        assert!(text.contains("a: add"));
        assert!(text.contains("?: help"));
    }
}
