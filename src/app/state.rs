use std::time::Instant;

use crate::contact::{unique_field_key, Contact, ContactFields, FIELD_ID, FIELD_NAME, FIELD_PHONE};

/// Field types offered by the add-field picker, in display order.
pub const DYNAMIC_FIELD_TYPES: [FieldKind; 3] =
    [FieldKind::Email, FieldKind::Instagram, FieldKind::Custom];

/// The name and phone rows, always present at the top of the form.
const FIXED_ROWS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Email,
    Instagram,
    Custom,
}

impl FieldKind {
    pub fn label(self) -> &'static str {
        match self {
            FieldKind::Email => "Email",
            FieldKind::Instagram => "Instagram",
            FieldKind::Custom => "Custom",
        }
    }
}

/// Which dialog is on screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogMode {
    None,
    Form(ContactForm),
    ConfirmDelete {
        contact_id: String,
        contact_name: String,
    },
}

/// Status bar message state
pub struct StatusMessage {
    pub message: String,
    pub is_error: bool,
    pub timestamp: Instant,
}

/// One editable line of the contact form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRow {
    pub key: String,
    pub value: String,
}

/// Where form input currently goes. `CustomName` is only reachable while the
/// picker sits on `Custom`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
    Row(usize),
    Picker,
    CustomName,
}

/// Editor state for adding or editing one contact.
///
/// Rows 0 and 1 are always `name` and `phone`; dynamic rows follow in the
/// order they were added. New rows get their key from the picker, suffixed
/// until unique, so adding "Email" twice yields "Email" and "Email 1".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactForm {
    /// `Some` when editing an existing contact, `None` when adding.
    pub editing_id: Option<String>,
    pub rows: Vec<FormRow>,
    pub focus: FormFocus,
    pub picker_index: usize,
    pub custom_name: String,
    pub error: Option<String>,
}

impl ContactForm {
    pub fn blank() -> Self {
        Self {
            editing_id: None,
            rows: vec![
                FormRow {
                    key: FIELD_NAME.to_string(),
                    value: String::new(),
                },
                FormRow {
                    key: FIELD_PHONE.to_string(),
                    value: String::new(),
                },
            ],
            focus: FormFocus::Row(0),
            picker_index: 0,
            custom_name: String::new(),
            error: None,
        }
    }

    pub fn for_contact(contact: &Contact) -> Self {
        let mut form = Self::blank();
        form.editing_id = Some(contact.id.clone());
        form.rows[0].value = contact.name().to_string();
        form.rows[1].value = contact.phone().to_string();
        for (key, value) in contact.dynamic_fields() {
            form.rows.push(FormRow {
                key: key.to_string(),
                value: value.to_string(),
            });
        }
        form
    }

    pub fn title(&self) -> &'static str {
        if self.editing_id.is_some() {
            "Edit Contact"
        } else {
            "Add Contact"
        }
    }

    pub fn selected_kind(&self) -> FieldKind {
        DYNAMIC_FIELD_TYPES[self.picker_index % DYNAMIC_FIELD_TYPES.len()]
    }

    fn name_value(&self) -> &str {
        self.rows.first().map(|row| row.value.as_str()).unwrap_or("")
    }

    // === Focus ===

    fn focus_slots(&self) -> usize {
        // Rows, the picker, and the custom-name input when it is visible.
        self.rows.len()
            + if self.selected_kind() == FieldKind::Custom {
                2
            } else {
                1
            }
    }

    fn focus_index(&self) -> usize {
        match self.focus {
            FormFocus::Row(index) => index,
            FormFocus::Picker => self.rows.len(),
            FormFocus::CustomName => self.rows.len() + 1,
        }
    }

    fn set_focus_index(&mut self, index: usize) {
        self.focus = if index < self.rows.len() {
            FormFocus::Row(index)
        } else if index == self.rows.len() {
            FormFocus::Picker
        } else {
            FormFocus::CustomName
        };
    }

    pub fn focus_next(&mut self) {
        let slots = self.focus_slots();
        self.set_focus_index((self.focus_index() + 1) % slots);
    }

    pub fn focus_prev(&mut self) {
        let slots = self.focus_slots();
        self.set_focus_index((self.focus_index() + slots - 1) % slots);
    }

    // === Input ===

    pub fn cycle_kind_next(&mut self) {
        self.picker_index = (self.picker_index + 1) % DYNAMIC_FIELD_TYPES.len();
    }

    pub fn cycle_kind_prev(&mut self) {
        self.picker_index =
            (self.picker_index + DYNAMIC_FIELD_TYPES.len() - 1) % DYNAMIC_FIELD_TYPES.len();
    }

    pub fn input_char(&mut self, c: char) {
        match self.focus {
            FormFocus::Row(index) => {
                if let Some(row) = self.rows.get_mut(index) {
                    row.value.push(c);
                }
            }
            FormFocus::CustomName => self.custom_name.push(c),
            FormFocus::Picker => {}
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            FormFocus::Row(index) => {
                if let Some(row) = self.rows.get_mut(index) {
                    row.value.pop();
                }
            }
            FormFocus::CustomName => {
                self.custom_name.pop();
            }
            FormFocus::Picker => {}
        }
    }

    /// Whether focus sits on a removable row, i.e. anything past name/phone.
    pub fn focus_on_dynamic_row(&self) -> bool {
        matches!(self.focus, FormFocus::Row(index) if index >= FIXED_ROWS)
    }

    /// Drop the focused dynamic row. The name and phone rows always stay.
    pub fn remove_focused_row(&mut self) {
        if let FormFocus::Row(index) = self.focus {
            if index >= FIXED_ROWS && index < self.rows.len() {
                self.rows.remove(index);
                self.focus = FormFocus::Row(index.min(self.rows.len() - 1));
            }
        }
    }

    /// Append a row for the picked field type and move focus onto it. The
    /// key is suffixed until it collides with no existing row and never
    /// shadows the wire id key.
    pub fn insert_dynamic_field(&mut self) {
        let proposed = match self.selected_kind() {
            FieldKind::Custom => {
                let name = self.custom_name.trim().to_string();
                if name.is_empty() {
                    self.error = Some("Field name cannot be empty".to_string());
                    return;
                }
                name
            }
            kind => kind.label().to_string(),
        };

        let key = unique_field_key(
            self.rows
                .iter()
                .map(|row| row.key.as_str())
                .chain(std::iter::once(FIELD_ID)),
            &proposed,
        );
        self.rows.push(FormRow {
            key,
            value: String::new(),
        });
        self.custom_name.clear();
        self.error = None;
        self.focus = FormFocus::Row(self.rows.len() - 1);
    }

    // === Submit ===

    /// A contact needs at least a non-blank name; everything else may stay
    /// empty. Sets `error` on failure so the dialog can show it.
    pub fn validate(&mut self) -> bool {
        if self.name_value().trim().is_empty() {
            self.error = Some("Name is required".to_string());
            false
        } else {
            self.error = None;
            true
        }
    }

    /// Assemble the record to send. Every row is included, empty values too;
    /// the server stores what it is given and the detail view hides blanks.
    pub fn contact(&self) -> Contact {
        let mut fields = ContactFields::new();
        for row in &self.rows {
            fields.insert(row.key.clone(), row.value.clone());
        }
        Contact::new(self.editing_id.clone().unwrap_or_default(), fields)
    }
}
