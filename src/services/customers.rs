use crate::domain::customer::Customer;
use crate::domain::types::{CustomerId, CustomerStatus};
use crate::domain::user::User;
use crate::forms::customer::CustomerForm;
use crate::repository::{CustomerReader, CustomerWriter, UserReader};
use crate::services::{ServiceError, ServiceResult};

/// Fetches the full customers collection.
pub async fn load_customers<R>(repo: &R) -> ServiceResult<Vec<Customer>>
where
    R: CustomerReader + ?Sized,
{
    repo.list_customers().await.map_err(|err| {
        log::error!("Failed to fetch customers: {err}");
        ServiceError::Fetch(format!("Failed to fetch customers: {err}"))
    })
}

/// Fetches the users a customer can be assigned to.
pub async fn load_assignable_users<R>(repo: &R) -> ServiceResult<Vec<User>>
where
    R: UserReader + ?Sized,
{
    repo.list_users().await.map_err(|err| {
        log::error!("Failed to fetch users: {err}");
        ServiceError::Fetch(format!("Failed to fetch users: {err}"))
    })
}

/// Validates the editor form and creates the customer on the backend.
pub async fn create_customer<R>(repo: &R, form: CustomerForm) -> ServiceResult<Customer>
where
    R: CustomerWriter + ?Sized,
{
    let new_customer = form.into_new_customer().map_err(|err| {
        log::error!("Failed to validate customer form: {err}");
        ServiceError::from(err)
    })?;

    let customer = repo.create_customer(&new_customer).await.map_err(|err| {
        log::error!("Failed to add customer: {err}");
        ServiceError::Mutation(format!("Failed to add customer: {err}"))
    })?;

    log::info!("Created customer {}", customer.id);

    Ok(customer)
}

/// Merges the editor form onto `current` and submits the full record.
pub async fn update_customer<R>(
    repo: &R,
    current: &Customer,
    form: CustomerForm,
) -> ServiceResult<Customer>
where
    R: CustomerWriter + ?Sized,
{
    let updates = form.into_new_customer().map_err(|err| {
        log::error!("Failed to validate customer form: {err}");
        ServiceError::from(err)
    })?;

    let customer = updates.apply_to(current);

    repo.update_customer(&customer).await.map_err(|err| {
        log::error!("Failed to update customer {}: {err}", current.id);
        ServiceError::Mutation(format!("Failed to update customer: {err}"))
    })
}

/// Deletes a single customer.
pub async fn delete_customer<R>(repo: &R, id: CustomerId) -> ServiceResult<()>
where
    R: CustomerWriter + ?Sized,
{
    repo.delete_customer(id).await.map_err(|err| {
        log::error!("Failed to delete customer {id}: {err}");
        ServiceError::Mutation(format!("Failed to delete customer: {err}"))
    })?;

    log::info!("Deleted customer {id}");

    Ok(())
}

/// Submits a new status for one customer and returns the updated record.
pub async fn change_customer_status<R>(
    repo: &R,
    id: CustomerId,
    status: &CustomerStatus,
) -> ServiceResult<Customer>
where
    R: CustomerWriter + ?Sized,
{
    repo.update_customer_status(id, status).await.map_err(|err| {
        log::error!("Failed to update status of customer {id}: {err}");
        ServiceError::Mutation(format!("Failed to update status: {err}"))
    })
}
