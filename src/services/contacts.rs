use futures::future::join_all;

use crate::domain::contact::Contact;
use crate::domain::types::ContactId;
use crate::repository::{ContactReader, ContactWriter};
use crate::services::{BulkDeleteReport, ServiceError, ServiceResult};

/// Fetches the full contacts collection.
pub async fn load_contacts<R>(repo: &R) -> ServiceResult<Vec<Contact>>
where
    R: ContactReader + ?Sized,
{
    repo.list_contacts().await.map_err(|err| {
        log::error!("Failed to fetch contacts: {err}");
        ServiceError::Fetch(format!("Failed to fetch contacts: {err}"))
    })
}

/// Deletes every id concurrently, one request per contact.
///
/// The requests are not transactional: the report lists which ids are gone
/// and which failed.
pub async fn delete_contacts<R>(repo: &R, ids: &[ContactId]) -> BulkDeleteReport<ContactId>
where
    R: ContactWriter + ?Sized,
{
    let results = join_all(
        ids.iter()
            .map(|&id| async move { (id, repo.delete_contact(id).await) }),
    )
    .await;

    let mut report = BulkDeleteReport::default();
    for (id, result) in results {
        match result {
            Ok(()) => report.deleted.push(id),
            Err(err) => {
                log::error!("Failed to delete contact {id}: {err}");
                report.failed.push((id, err.to_string()));
            }
        }
    }

    if !report.deleted.is_empty() {
        log::info!("Deleted {} contact(s)", report.deleted.len());
    }

    report
}
