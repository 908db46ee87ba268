pub mod state;

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::config::{nearest_refresh_interval, next_refresh_interval, Config};
use crate::contact::Contact;
use crate::service::{ContactService, DeleteOutcome, RestContactService};
use crate::store::ContactStore;

pub use state::{
    ContactForm, DialogMode, FieldKind, FormFocus, FormRow, StatusMessage, DYNAMIC_FIELD_TYPES,
};

pub struct App {
    // Contact list (store snapshot, in display order)
    pub contacts: Vec<Contact>,
    pub selected: usize,

    // Core components
    pub store: ContactStore,
    revision_rx: tokio::sync::watch::Receiver<u64>,
    pub debug_log: VecDeque<String>,

    // Sync cadence in effect (seconds)
    pub refresh_interval_secs: u64,

    // Configuration
    pub config: Config,

    // Dialogs
    pub dialog: DialogMode,

    // Help panel
    pub show_help: bool,

    // Debug log visibility (hidden by default)
    pub show_debug: bool,

    // Status bar message (for displaying errors/info)
    pub status_message: Option<StatusMessage>,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let service = RestContactService::new(
            &config.server.base_url,
            config.server.request_timeout(),
        )
        .context("Failed to create contact service")?;
        Ok(Self::with_service(config, Arc::new(service)))
    }

    /// Build the app around any backend. `new` wires in the REST client;
    /// tests substitute their own.
    pub fn with_service(config: Config, service: Arc<dyn ContactService>) -> Self {
        let mut debug_log = VecDeque::new();
        debug_log.push_back("Starting rolodex...".to_string());
        debug_log.push_back(format!("  Server: {}", config.server.base_url));

        let refresh_interval_secs = nearest_refresh_interval(config.sync.refresh_interval_secs);
        debug_log.push_back(format!("  Refresh every {}s", refresh_interval_secs));

        let store = ContactStore::new(service, config.ui.sort_order());
        let revision_rx = store.subscribe();

        Self {
            contacts: Vec::new(),
            selected: 0,
            store,
            revision_rx,
            debug_log,
            refresh_interval_secs,
            config,
            dialog: DialogMode::None,
            show_help: false,
            show_debug: false,
            status_message: None,
        }
    }

    /// Kick off the background refresh; the first fetch happens right away.
    pub fn start_sync(&mut self) {
        self.store
            .start_polling(Duration::from_secs(self.refresh_interval_secs));
        self.add_debug(format!("Polling every {}s", self.refresh_interval_secs));
    }

    /// Pull the latest store snapshot if anything changed since the last
    /// call. Selection follows the contact it was on; if that contact is
    /// gone the index clamps to the end of the list.
    pub fn sync_from_store(&mut self) -> bool {
        match self.revision_rx.has_changed() {
            Ok(true) => {}
            _ => return false,
        }
        self.revision_rx.borrow_and_update();

        let selected_id = self.selected_contact().map(|c| c.id.clone());
        self.contacts = self.store.snapshot();

        if let Some(id) = selected_id {
            if let Some(position) = self.contacts.iter().position(|c| c.id == id) {
                self.selected = position;
            }
        }
        if self.selected >= self.contacts.len() {
            self.selected = self.contacts.len().saturating_sub(1);
        }
        true
    }

    // === Selection ===

    pub fn selected_contact(&self) -> Option<&Contact> {
        self.contacts.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.contacts.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.contacts.len().saturating_sub(1);
    }

    // === Status / debug ===

    pub fn add_debug(&mut self, msg: String) {
        if let Ok(mut file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/rolodex-debug.log")
        {
            use std::io::Write;
            let timestamp = chrono::Local::now().format("%H:%M:%S");
            writeln!(file, "[{}] {}", timestamp, msg).ok();
        }

        self.debug_log.push_back(msg);
        while self.debug_log.len() > 100 {
            self.debug_log.pop_front();
        }
    }

    pub fn set_status_error(&mut self, msg: String) {
        self.status_message = Some(StatusMessage {
            message: msg.clone(),
            is_error: true,
            timestamp: std::time::Instant::now(),
        });
        self.add_debug(msg);
    }

    pub fn set_status_info(&mut self, msg: String) {
        self.status_message = Some(StatusMessage {
            message: msg,
            is_error: false,
            timestamp: std::time::Instant::now(),
        });
    }

    pub fn clear_expired_status(&mut self) {
        if let Some(ref msg) = self.status_message {
            if msg.timestamp.elapsed() > std::time::Duration::from_secs(5) {
                self.status_message = None;
            }
        }
    }

    // ========== Dialogs ==========

    /// Open the add-contact form
    pub fn open_add_dialog(&mut self) {
        self.dialog = DialogMode::Form(ContactForm::blank());
        self.add_debug("Add contact dialog opened".to_string());
    }

    /// Open the edit form for the selected contact
    pub fn open_edit_dialog(&mut self) {
        let contact = match self.selected_contact() {
            Some(contact) => contact.clone(),
            None => return,
        };
        self.dialog = DialogMode::Form(ContactForm::for_contact(&contact));
        self.add_debug(format!("Edit dialog for: {}", contact.name()));
    }

    /// Open the delete confirmation for the selected contact
    pub fn open_delete_dialog(&mut self) {
        let contact = match self.selected_contact() {
            Some(contact) => contact.clone(),
            None => return,
        };
        self.dialog = DialogMode::ConfirmDelete {
            contact_id: contact.id.clone(),
            contact_name: contact.name().to_string(),
        };
        self.add_debug(format!("Delete dialog for: {}", contact.name()));
    }

    /// Close any open dialog
    pub fn close_dialog(&mut self) {
        self.dialog = DialogMode::None;
    }

    /// Check if any dialog is open
    pub fn is_dialog_open(&self) -> bool {
        self.dialog != DialogMode::None
    }

    // ========== Contact Operations ==========

    /// Fetch the collection right now, outside the polling schedule
    pub async fn refresh_now(&mut self) {
        self.add_debug("Manual refresh".to_string());
        match self.store.refresh().await {
            Ok(count) => {
                self.set_status_info(format!("Synced {} contacts", count));
            }
            Err(e) => {
                self.set_status_error(format!("Refresh failed: {}", e));
            }
        }
    }

    /// Save the open form: create when adding, update when editing. The
    /// dialog closes once the server confirms; on failure it stays open so
    /// nothing typed is lost.
    pub async fn submit_form(&mut self) {
        let form = match &mut self.dialog {
            DialogMode::Form(form) => {
                if !form.validate() {
                    return;
                }
                form.clone()
            }
            _ => return,
        };

        let contact = form.contact();
        if form.editing_id.is_some() {
            self.add_debug(format!("Updating contact: {}", contact.name()));
            match self.store.update(contact).await {
                Ok(Some(updated)) => {
                    self.set_status_info(format!("Saved {}", updated.name()));
                    self.close_dialog();
                }
                Ok(None) => {
                    self.set_status_error("Contact was removed while editing".to_string());
                    self.close_dialog();
                }
                Err(e) => {
                    self.set_status_error(format!("Save failed: {}", e));
                }
            }
        } else {
            self.add_debug(format!("Creating contact: {}", contact.name()));
            match self.store.create(contact).await {
                Ok(created) => {
                    self.set_status_info(format!("Added {}", created.name()));
                    self.close_dialog();
                    // Land the selection on the new entry.
                    self.sync_from_store();
                    if let Some(position) =
                        self.contacts.iter().position(|c| c.id == created.id)
                    {
                        self.selected = position;
                    }
                }
                Err(e) => {
                    self.set_status_error(format!("Add failed: {}", e));
                }
            }
        }
    }

    /// Delete the contact named in the confirmation dialog
    pub async fn delete_from_dialog(&mut self) {
        let (contact_id, contact_name) = match &self.dialog {
            DialogMode::ConfirmDelete {
                contact_id,
                contact_name,
            } => (contact_id.clone(), contact_name.clone()),
            _ => return,
        };

        match self.store.delete(&contact_id).await {
            Ok(DeleteOutcome::Deleted) => {
                self.set_status_info(format!("Deleted {}", contact_name));
                self.close_dialog();
                self.sync_from_store();
            }
            Ok(DeleteOutcome::Missing) => {
                self.set_status_error(format!("{} was not found on the server", contact_name));
                self.close_dialog();
            }
            Err(e) => {
                self.set_status_error(format!("Delete failed: {}", e));
            }
        }
    }

    // ========== Sync Controls ==========

    /// Flip the name sort between A-Z and Z-A
    pub fn toggle_sort(&mut self) {
        let order = self.store.toggle_sort();
        self.set_status_info(format!("Sorted by {}", order.label()));
    }

    /// Step to the next supported poll cadence and reschedule
    pub fn cycle_refresh_interval(&mut self) {
        self.refresh_interval_secs = next_refresh_interval(self.refresh_interval_secs);
        self.store
            .start_polling(Duration::from_secs(self.refresh_interval_secs));
        self.set_status_info(format!("Refreshing every {}s", self.refresh_interval_secs));
    }
}
