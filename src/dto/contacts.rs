//! DTOs shaped for the contacts table.

use serde::Serialize;

use crate::domain::contact::Contact;
use crate::views::LoadState;

const MISSING: &str = "N/A";

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ContactRow {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub selected: bool,
}

impl ContactRow {
    pub fn new(contact: &Contact, selected: bool) -> Self {
        let or_missing = |value: &Option<String>| {
            value
                .clone()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| MISSING.to_string())
        };

        Self {
            id: contact.id.get(),
            name: contact.name.clone(),
            email: or_missing(&contact.email),
            phone: or_missing(&contact.phone),
            position: or_missing(&contact.position),
            selected,
        }
    }
}

/// Everything needed to draw the contacts page.
#[derive(Debug, Serialize)]
pub struct ContactsPageData {
    pub status: LoadState,
    pub rows: Vec<ContactRow>,
    /// `true` when the "No contacts found." row is shown.
    pub no_records: bool,
    pub page: usize,
    pub total_pages: usize,
    pub pages: Vec<Option<usize>>,
    pub search: String,
    pub selected_count: usize,
    /// State of the header "select all" checkbox.
    pub all_selected: bool,
    pub error: Option<String>,
}
