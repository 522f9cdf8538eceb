//! Operations the admin views run against the backend.
//!
//! Services translate repository failures into the view-facing
//! [`ServiceError`] taxonomy and log them; they never touch view state.

use thiserror::Error;

pub mod contacts;
pub mod customers;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Loading a collection failed; the view shows a full error state.
    #[error("{0}")]
    Fetch(String),

    /// A write was rejected or never reached the backend.
    #[error("{0}")]
    Mutation(String),

    /// Editor input was rejected before any request was made.
    #[error("{0}")]
    Form(String),

    #[error("{0}")]
    TypeConstraint(String),

    #[error("Record not found")]
    NotFound,
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Result of a delete that needs user confirmation first.
#[derive(Debug, PartialEq)]
pub enum DeleteOutcome<Id> {
    /// The user cancelled; nothing was sent.
    Declined,
    Deleted(Vec<Id>),
}

/// Per-id result of a bulk delete. Requests are independent, so some ids may
/// be gone from the backend while others are not.
#[derive(Debug)]
pub struct BulkDeleteReport<Id> {
    pub deleted: Vec<Id>,
    pub failed: Vec<(Id, String)>,
}

impl<Id> Default for BulkDeleteReport<Id> {
    fn default() -> Self {
        Self {
            deleted: Vec::new(),
            failed: Vec::new(),
        }
    }
}

impl<Id: std::fmt::Display> BulkDeleteReport<Id> {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Error describing the ids that could not be deleted, if any.
    pub fn failure(&self, entity: &str) -> Option<ServiceError> {
        if self.failed.is_empty() {
            return None;
        }
        let details = self
            .failed
            .iter()
            .map(|(id, reason)| format!("#{id}: {reason}"))
            .collect::<Vec<_>>()
            .join("; ");
        Some(ServiceError::Mutation(format!(
            "Failed to delete {} of {} {entity}: {details}",
            self.failed.len(),
            self.failed.len() + self.deleted.len(),
        )))
    }
}

/// Asks the user to approve a destructive action.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}
