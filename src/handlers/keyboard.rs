use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, DialogMode, FormFocus};

pub enum KeyAction {
    Continue,
    Quit,
}

pub async fn handle_key_event(app: &mut App, key: KeyEvent) -> KeyAction {
    // Handle dialogs first (highest priority)
    if app.is_dialog_open() {
        return handle_dialog_input(app, key).await;
    }

    // Help overlay: any key dismisses it
    if app.show_help {
        app.show_help = false;
        return KeyAction::Continue;
    }

    handle_normal_mode(app, key).await
}

async fn handle_dialog_input(app: &mut App, key: KeyEvent) -> KeyAction {
    match &app.dialog {
        DialogMode::None => {}

        DialogMode::Form(_) => {
            handle_form_input(app, key).await;
        }

        DialogMode::ConfirmDelete { .. } => {
            // Confirmation mode
            match key.code {
                KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                    app.delete_from_dialog().await;
                }
                KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                    app.close_dialog();
                }
                _ => {}
            }
        }
    }

    KeyAction::Continue
}

/// What a form keypress asked for, decided while the form is borrowed.
enum FormStep {
    Stay,
    Cancel,
    Submit,
}

async fn handle_form_input(app: &mut App, key: KeyEvent) {
    let step = {
        let form = match &mut app.dialog {
            DialogMode::Form(form) => form,
            _ => return,
        };

        match key.code {
            KeyCode::Esc => FormStep::Cancel,

            // Enter on the picker row adds a field; anywhere else it saves.
            KeyCode::Enter => match form.focus {
                FormFocus::Picker | FormFocus::CustomName => {
                    form.insert_dynamic_field();
                    FormStep::Stay
                }
                FormFocus::Row(_) => FormStep::Submit,
            },

            KeyCode::Tab | KeyCode::Down => {
                form.focus_next();
                FormStep::Stay
            }
            KeyCode::BackTab | KeyCode::Up => {
                form.focus_prev();
                FormStep::Stay
            }

            KeyCode::Left if form.focus == FormFocus::Picker => {
                form.cycle_kind_prev();
                FormStep::Stay
            }
            KeyCode::Right if form.focus == FormFocus::Picker => {
                form.cycle_kind_next();
                FormStep::Stay
            }

            KeyCode::Backspace => {
                form.backspace();
                FormStep::Stay
            }
            KeyCode::Delete => {
                form.remove_focused_row();
                FormStep::Stay
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                form.input_char(c);
                FormStep::Stay
            }

            _ => FormStep::Stay,
        }
    };

    match step {
        FormStep::Stay => {}
        FormStep::Cancel => app.close_dialog(),
        FormStep::Submit => app.submit_form().await,
    }
}

async fn handle_normal_mode(app: &mut App, key: KeyEvent) -> KeyAction {
    match key.code {
        // q: quit
        KeyCode::Char('q') => return KeyAction::Quit,

        // Navigation
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_previous(),
        KeyCode::Char('g') | KeyCode::Home => app.select_first(),
        KeyCode::Char('G') | KeyCode::End => app.select_last(),

        // a: add contact
        KeyCode::Char('a') => app.open_add_dialog(),

        // e/Enter: edit the selected contact
        KeyCode::Char('e') | KeyCode::Enter => app.open_edit_dialog(),

        // d: delete the selected contact (asks first)
        KeyCode::Char('d') => app.open_delete_dialog(),

        // r: fetch now
        KeyCode::Char('r') => app.refresh_now().await,

        // s: flip name sort
        KeyCode::Char('s') => app.toggle_sort(),

        // i: cycle refresh interval
        KeyCode::Char('i') => app.cycle_refresh_interval(),

        // ?: help overlay
        KeyCode::Char('?') => app.show_help = true,

        // `: debug log panel
        KeyCode::Char('`') => {
            app.show_debug = !app.show_debug;
        }

        _ => {}
    }
    KeyAction::Continue
}
