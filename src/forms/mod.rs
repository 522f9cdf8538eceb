//! Editor payloads collected by the CRM admin modals.

use thiserror::Error;
use validator::ValidationErrors;

pub mod customer;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid email address")]
    InvalidEmail,

    #[error("invalid name")]
    InvalidName,

    #[error("invalid user id")]
    InvalidUserId,

    #[error("invalid status: {0}")]
    InvalidStatus(String),
}
