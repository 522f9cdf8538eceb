//! DTOs shaped for the customers table.

use serde::Serialize;

use crate::domain::customer::Customer;
use crate::domain::user::User;
use crate::views::LoadState;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CustomerRow {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub company: String,
    pub status: String,
    pub assigned_to: String,
}

impl From<&Customer> for CustomerRow {
    fn from(customer: &Customer) -> Self {
        let or_dash = |value: &Option<String>| {
            value
                .clone()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "-".to_string())
        };

        Self {
            id: customer.id.get(),
            name: customer.name.clone(),
            email: or_dash(&customer.email),
            company: or_dash(&customer.company),
            status: customer.status.to_string(),
            assigned_to: customer
                .assigned_to_name
                .clone()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "Unassigned".to_string()),
        }
    }
}

/// Everything needed to draw the customers page.
#[derive(Debug, Serialize)]
pub struct CustomersPageData {
    pub status: LoadState,
    pub rows: Vec<CustomerRow>,
    pub no_records: bool,
    pub page: usize,
    pub total_pages: usize,
    pub pages: Vec<Option<usize>>,
    pub search: String,
    /// Users offered in the editor's assignee dropdown.
    pub users: Vec<User>,
    pub editor_open: bool,
    pub error: Option<String>,
}
