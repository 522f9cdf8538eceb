use serde::Deserialize;
use validator::Validate;

use crate::domain::customer::{Customer, NewCustomer};
use crate::domain::types::{CustomerStatus, NonEmptyString, UserId, normalize_email};
use crate::forms::FormError;

#[derive(Clone, Debug, Default, Deserialize, Validate)]
/// Input of the add/edit customer modal.
pub struct CustomerForm {
    /// Display name.
    #[validate(length(min = 1))]
    pub name: String,
    /// Contact email.
    #[serde(default)]
    #[validate(email)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    /// One of `active`, `inactive`, `pending`; defaults to `pending`.
    #[serde(default)]
    pub status: Option<String>,
    /// Identifier of the user the customer is assigned to.
    #[serde(default)]
    pub assigned_to: Option<i32>,
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl CustomerForm {
    /// Prefills the editor with an existing customer.
    pub fn from_customer(customer: &Customer) -> Self {
        Self {
            name: customer.name.clone(),
            email: customer.email.clone(),
            phone: customer.phone.clone(),
            company: customer.company.clone(),
            status: Some(customer.status.to_string()),
            assigned_to: customer.assigned_to.map(UserId::get),
        }
    }

    /// Validates the form and converts it into the create payload.
    pub fn into_new_customer(self) -> Result<NewCustomer, FormError> {
        let form = Self {
            name: self.name.trim().to_string(),
            email: blank_to_none(self.email),
            phone: blank_to_none(self.phone),
            company: blank_to_none(self.company),
            status: blank_to_none(self.status),
            assigned_to: self.assigned_to,
        };

        form.validate()?;

        let name = NonEmptyString::new(form.name).map_err(|_| FormError::InvalidName)?;
        let email = form
            .email
            .map(normalize_email)
            .transpose()
            .map_err(|_| FormError::InvalidEmail)?;
        let status = match form.status {
            Some(raw) => match CustomerStatus::from(raw.as_str()) {
                CustomerStatus::Other(value) => return Err(FormError::InvalidStatus(value)),
                known => known,
            },
            None => CustomerStatus::default(),
        };
        let assigned_to = form
            .assigned_to
            .map(UserId::new)
            .transpose()
            .map_err(|_| FormError::InvalidUserId)?;

        Ok(NewCustomer::new(
            name.into_inner(),
            email,
            form.phone,
            form.company,
            status,
            assigned_to,
        ))
    }
}
