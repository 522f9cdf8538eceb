#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicI32, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use pushkind_crm_admin::domain::contact::Contact;
use pushkind_crm_admin::domain::customer::{Customer, NewCustomer};
use pushkind_crm_admin::domain::types::{ContactId, CustomerId, CustomerStatus, UserId};
use pushkind_crm_admin::domain::user::User;
use pushkind_crm_admin::repository::errors::{RepositoryError, RepositoryResult};
use pushkind_crm_admin::repository::{
    ContactReader, ContactWriter, CustomerReader, CustomerWriter, UserReader,
};

/// In-memory stand-in for the CRM REST backend.
pub struct FakeBackend {
    pub contacts: Mutex<Vec<Contact>>,
    pub customers: Mutex<Vec<Customer>>,
    pub users: Mutex<Vec<User>>,
    pub fail_lists: AtomicBool,
    pub fail_users: AtomicBool,
    pub fail_writes: AtomicBool,
    pub rejected_deletes: Mutex<Vec<i32>>,
    pub list_latency: Mutex<Duration>,
    pub list_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
    next_id: AtomicI32,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self {
            contacts: Mutex::new(Vec::new()),
            customers: Mutex::new(Vec::new()),
            users: Mutex::new(Vec::new()),
            fail_lists: AtomicBool::new(false),
            fail_users: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
            rejected_deletes: Mutex::new(Vec::new()),
            list_latency: Mutex::new(Duration::ZERO),
            list_calls: AtomicUsize::new(0),
            delete_calls: AtomicUsize::new(0),
            next_id: AtomicI32::new(99),
        }
    }
}

impl FakeBackend {
    pub fn with_contacts(contacts: Vec<Contact>) -> Self {
        let backend = Self::default();
        *backend.contacts.lock().unwrap() = contacts;
        backend
    }

    pub fn with_customers(customers: Vec<Customer>) -> Self {
        let backend = Self::default();
        *backend.customers.lock().unwrap() = customers;
        *backend.users.lock().unwrap() = vec![user(1, "Alice"), user(2, "Boris")];
        backend
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    async fn list_round_trip(&self) -> RepositoryResult<()> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let latency = *self.list_latency.lock().unwrap();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        if self.fail_lists.load(Ordering::SeqCst) {
            return Err(RepositoryError::ConnectionError(
                "connection refused".to_string(),
            ));
        }
        Ok(())
    }

    fn check_write(&self) -> RepositoryResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(RepositoryError::from_status(500, "backend unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl ContactReader for FakeBackend {
    async fn list_contacts(&self) -> RepositoryResult<Vec<Contact>> {
        self.list_round_trip().await?;
        Ok(self.contacts.lock().unwrap().clone())
    }
}

#[async_trait]
impl ContactWriter for FakeBackend {
    async fn delete_contact(&self, id: ContactId) -> RepositoryResult<()> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if self.rejected_deletes.lock().unwrap().contains(&id.get()) {
            return Err(RepositoryError::from_status(403, "contact is locked"));
        }
        self.check_write()?;
        self.contacts.lock().unwrap().retain(|c| c.id != id);
        Ok(())
    }
}

#[async_trait]
impl CustomerReader for FakeBackend {
    async fn list_customers(&self) -> RepositoryResult<Vec<Customer>> {
        self.list_round_trip().await?;
        Ok(self.customers.lock().unwrap().clone())
    }
}

#[async_trait]
impl CustomerWriter for FakeBackend {
    async fn create_customer(&self, new_customer: &NewCustomer) -> RepositoryResult<Customer> {
        self.check_write()?;
        let id = CustomerId::new(self.next_id.fetch_add(1, Ordering::SeqCst))?;
        let customer = Customer {
            id,
            name: new_customer.name.clone(),
            email: new_customer.email.clone(),
            phone: new_customer.phone.clone(),
            company: new_customer.company.clone(),
            status: new_customer.status.clone(),
            assigned_to: new_customer.assigned_to,
            assigned_to_name: None,
        };
        self.customers.lock().unwrap().push(customer.clone());
        Ok(customer)
    }

    async fn update_customer(&self, customer: &Customer) -> RepositoryResult<Customer> {
        self.check_write()?;
        let mut customers = self.customers.lock().unwrap();
        let stored = customers
            .iter_mut()
            .find(|c| c.id == customer.id)
            .ok_or(RepositoryError::NotFound)?;
        *stored = customer.clone();
        Ok(customer.clone())
    }

    async fn delete_customer(&self, id: CustomerId) -> RepositoryResult<()> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if self.rejected_deletes.lock().unwrap().contains(&id.get()) {
            return Err(RepositoryError::from_status(409, "customer has open deals"));
        }
        self.check_write()?;
        self.customers.lock().unwrap().retain(|c| c.id != id);
        Ok(())
    }

    async fn update_customer_status(
        &self,
        id: CustomerId,
        status: &CustomerStatus,
    ) -> RepositoryResult<Customer> {
        self.check_write()?;
        let mut customers = self.customers.lock().unwrap();
        let stored = customers
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(RepositoryError::NotFound)?;
        stored.status = status.clone();
        Ok(stored.clone())
    }
}

#[async_trait]
impl UserReader for FakeBackend {
    async fn list_users(&self) -> RepositoryResult<Vec<User>> {
        if self.fail_users.load(Ordering::SeqCst) {
            return Err(RepositoryError::from_status(500, "users unavailable"));
        }
        Ok(self.users.lock().unwrap().clone())
    }
}

pub fn contact(id: i32, name: &str) -> Contact {
    Contact {
        id: ContactId::new(id).unwrap(),
        name: name.to_string(),
        email: Some(format!("{}@example.com", name.to_lowercase())),
        phone: None,
        position: None,
        company: None,
    }
}

pub fn numbered_contacts(n: i32) -> Vec<Contact> {
    (1..=n).map(|id| contact(id, &format!("Contact {id}"))).collect()
}

pub fn customer(id: i32, name: &str, company: Option<&str>) -> Customer {
    Customer {
        id: CustomerId::new(id).unwrap(),
        name: name.to_string(),
        email: Some(format!("{}@example.com", name.to_lowercase())),
        phone: None,
        company: company.map(str::to_string),
        status: CustomerStatus::Pending,
        assigned_to: None,
        assigned_to_name: None,
    }
}

pub fn user(id: i32, name: &str) -> User {
    User {
        id: UserId::new(id).unwrap(),
        name: name.to_string(),
        email: None,
    }
}

pub fn contact_id(id: i32) -> ContactId {
    ContactId::new(id).unwrap()
}

pub fn customer_id(id: i32) -> CustomerId {
    CustomerId::new(id).unwrap()
}
