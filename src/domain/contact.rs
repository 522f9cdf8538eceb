use serde::{Deserialize, Serialize};

use crate::domain::Record;
use crate::domain::types::ContactId;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
}

impl Record for Contact {
    type Id = ContactId;

    fn id(&self) -> ContactId {
        self.id
    }

    /// Contacts are searched by name only.
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }
}
