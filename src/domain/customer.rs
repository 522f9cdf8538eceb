use serde::{Deserialize, Serialize};

use crate::domain::Record;
use crate::domain::types::{CustomerId, CustomerStatus, UserId, deserialize_status};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default, deserialize_with = "deserialize_status")]
    pub status: CustomerStatus,
    #[serde(default)]
    pub assigned_to: Option<UserId>,
    /// Display name of the assigned user, filled in by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to_name: Option<String>,
}

impl Record for Customer {
    type Id = CustomerId;

    fn id(&self) -> CustomerId {
        self.id
    }

    /// Customers match on name, company or email.
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        fields.extend(self.company.as_deref());
        fields.extend(self.email.as_deref());
        fields
    }
}

/// Payload for creating a customer; the backend assigns the id.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NewCustomer {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub status: CustomerStatus,
    pub assigned_to: Option<UserId>,
}

impl NewCustomer {
    #[must_use]
    pub fn new(
        name: String,
        email: Option<String>,
        phone: Option<String>,
        company: Option<String>,
        status: CustomerStatus,
        assigned_to: Option<UserId>,
    ) -> Self {
        Self {
            name: name.trim().to_string(),
            email: email
                .map(|s| s.to_lowercase().trim().to_string())
                .filter(|s| !s.is_empty()),
            phone: phone
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            company: company
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            status,
            assigned_to,
        }
    }

    /// Overlays the editable fields onto an existing customer, producing the
    /// full record sent on update.
    #[must_use]
    pub fn apply_to(self, current: &Customer) -> Customer {
        let assigned_to_name = if self.assigned_to == current.assigned_to {
            current.assigned_to_name.clone()
        } else {
            None
        };

        Customer {
            id: current.id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            company: self.company,
            status: self.status,
            assigned_to: self.assigned_to,
            assigned_to_name,
        }
    }
}

/// Body of the status change request.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CustomerStatusUpdate {
    pub status: CustomerStatus,
}
