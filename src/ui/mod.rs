pub mod contacts;
pub mod details;
pub mod dialog;
pub mod help;
pub mod keybindings;
pub mod status_bar;

pub use contacts::{render_contact_list, ContactListState};
pub use details::render_contact_details;
pub use dialog::render_dialog;
pub use help::render_help_panel;
pub use status_bar::{render_status_bar, InputMode, StatusBarState};
