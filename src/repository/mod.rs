//! Data access seam over the CRM REST backend.

use async_trait::async_trait;

use crate::domain::contact::Contact;
use crate::domain::customer::{Customer, NewCustomer};
use crate::domain::types::{ContactId, CustomerId, CustomerStatus};
use crate::domain::user::User;
use crate::repository::errors::RepositoryResult;

pub mod errors;
pub mod http;
#[cfg(feature = "test-mocks")]
pub mod mock;

pub use http::HttpRepository;

#[async_trait]
pub trait ContactReader {
    async fn list_contacts(&self) -> RepositoryResult<Vec<Contact>>;
}

#[async_trait]
pub trait ContactWriter {
    async fn delete_contact(&self, id: ContactId) -> RepositoryResult<()>;
}

#[async_trait]
pub trait CustomerReader {
    async fn list_customers(&self) -> RepositoryResult<Vec<Customer>>;
}

#[async_trait]
pub trait CustomerWriter {
    async fn create_customer(&self, new_customer: &NewCustomer) -> RepositoryResult<Customer>;
    async fn update_customer(&self, customer: &Customer) -> RepositoryResult<Customer>;
    async fn delete_customer(&self, id: CustomerId) -> RepositoryResult<()>;
    async fn update_customer_status(
        &self,
        id: CustomerId,
        status: &CustomerStatus,
    ) -> RepositoryResult<Customer>;
}

#[async_trait]
pub trait UserReader {
    async fn list_users(&self) -> RepositoryResult<Vec<User>>;
}

/// Everything the contacts view needs from the backend.
pub trait ContactRepository: ContactReader + ContactWriter + Send + Sync + 'static {}

impl<T> ContactRepository for T where T: ContactReader + ContactWriter + Send + Sync + 'static {}

/// Everything the customers view needs from the backend.
pub trait CustomerRepository:
    CustomerReader + CustomerWriter + UserReader + Send + Sync + 'static
{
}

impl<T> CustomerRepository for T where
    T: CustomerReader + CustomerWriter + UserReader + Send + Sync + 'static
{
}
