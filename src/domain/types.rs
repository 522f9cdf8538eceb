//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (e.g., positive identifiers,
//! normalized/validated email) so that once a value reaches the domain layer it
//! can be treated as trusted.
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use validator::ValidateEmail;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided email failed format validation.
    #[error("invalid email address")]
    InvalidEmail,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
}

/// Normalizes and validates an email string.
pub(crate) fn normalize_email<S: Into<String>>(email: S) -> Result<String, TypeConstraintError> {
    let normalized = email.into().trim().to_lowercase();
    if normalized.validate_email() {
        Ok(normalized)
    } else {
        Err(TypeConstraintError::InvalidEmail)
    }
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(
            Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
        )]
        #[serde(try_from = "i32", into = "i32")]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId)
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(ContactId, "Unique identifier for a contact.");
id_newtype!(CustomerId, "Unique identifier for a customer.");
id_newtype!(UserId, "Unique identifier for an assignable user.");

/// Wrapper for non-empty, trimmed strings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Trims whitespace and rejects empty inputs.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(trimmed))
    }

    /// Borrow the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper returning the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Pipeline status of a customer.
///
/// Values the client does not know about are kept verbatim so that a newer
/// backend can introduce statuses without breaking the list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CustomerStatus {
    Active,
    Inactive,
    #[default]
    Pending,
    Other(String),
}

impl CustomerStatus {
    /// Wire value understood by the backend.
    pub fn as_str(&self) -> &str {
        match self {
            CustomerStatus::Active => "active",
            CustomerStatus::Inactive => "inactive",
            CustomerStatus::Pending => "pending",
            CustomerStatus::Other(s) => s,
        }
    }
}

impl Display for CustomerStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for CustomerStatus {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "active" => CustomerStatus::Active,
            "inactive" => CustomerStatus::Inactive,
            "pending" => CustomerStatus::Pending,
            _ => CustomerStatus::Other(s.to_string()),
        }
    }
}

impl From<String> for CustomerStatus {
    fn from(s: String) -> Self {
        s.as_str().into()
    }
}

/// Decodes a nullable status field; `null` means the default status.
pub(crate) fn deserialize_status<'de, D>(deserializer: D) -> Result<CustomerStatus, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .map(CustomerStatus::from)
        .unwrap_or_default())
}

impl From<CustomerStatus> for String {
    fn from(value: CustomerStatus) -> Self {
        match value {
            CustomerStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_reject_non_positive_values() {
        assert_eq!(ContactId::new(0), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(CustomerId::new(-3), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(UserId::new(7).map(UserId::get), Ok(7));
    }

    #[test]
    fn ids_are_validated_when_decoded() {
        let id: CustomerId = serde_json::from_str("99").unwrap();
        assert_eq!(id.get(), 99);
        assert!(serde_json::from_str::<CustomerId>("0").is_err());
    }

    #[test]
    fn normalize_email_lowercases_and_validates() {
        assert_eq!(
            normalize_email("  Ann@Example.COM "),
            Ok("ann@example.com".to_string())
        );
        assert_eq!(
            normalize_email("not-an-email"),
            Err(TypeConstraintError::InvalidEmail)
        );
    }

    #[test]
    fn non_empty_string_trims_and_rejects_blank() {
        assert_eq!(NonEmptyString::new("  Ann ").unwrap().as_str(), "Ann");
        assert_eq!(
            NonEmptyString::new("   "),
            Err(TypeConstraintError::EmptyString)
        );
    }

    #[test]
    fn customer_status_round_trips_unknown_values() {
        assert_eq!(CustomerStatus::from("Active"), CustomerStatus::Active);
        let archived = CustomerStatus::from("archived");
        assert_eq!(archived, CustomerStatus::Other("archived".to_string()));
        assert_eq!(String::from(archived), "archived");
        assert_eq!(
            serde_json::to_string(&CustomerStatus::Inactive).unwrap(),
            "\"inactive\""
        );
    }
}
