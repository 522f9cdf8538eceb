//! Mock repository implementations for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::domain::contact::Contact;
use crate::domain::customer::{Customer, NewCustomer};
use crate::domain::types::{ContactId, CustomerId, CustomerStatus};
use crate::domain::user::User;
use crate::repository::errors::RepositoryResult;
use crate::repository::{ContactReader, ContactWriter, CustomerReader, CustomerWriter, UserReader};

mock! {
    pub Repository {}

    #[async_trait]
    impl ContactReader for Repository {
        async fn list_contacts(&self) -> RepositoryResult<Vec<Contact>>;
    }

    #[async_trait]
    impl ContactWriter for Repository {
        async fn delete_contact(&self, id: ContactId) -> RepositoryResult<()>;
    }

    #[async_trait]
    impl CustomerReader for Repository {
        async fn list_customers(&self) -> RepositoryResult<Vec<Customer>>;
    }

    #[async_trait]
    impl CustomerWriter for Repository {
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
    impl UserReader for Repository {
        async fn list_users(&self) -> RepositoryResult<Vec<User>>;
    }
}
