//! `reqwest` implementation of the repository traits.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::domain::contact::Contact;
use crate::domain::customer::{Customer, CustomerStatusUpdate, NewCustomer};
use crate::domain::types::{ContactId, CustomerId, CustomerStatus};
use crate::domain::user::User;
use crate::models::config::ClientConfig;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{ContactReader, ContactWriter, CustomerReader, CustomerWriter, UserReader};

/// Repository backed by the CRM REST API.
#[derive(Clone, Debug)]
pub struct HttpRepository {
    client: Client,
    base_url: String,
}

impl HttpRepository {
    /// Creates a repository talking to `base_url` (scheme and host, optionally
    /// a path prefix; `/api/...` is appended per call).
    pub fn new(base_url: &str, timeout: Duration) -> RepositoryResult<Self> {
        let parsed =
            reqwest::Url::parse(base_url).map_err(|e| RepositoryError::InvalidUrl(e.to_string()))?;
        if parsed.cannot_be_a_base() {
            return Err(RepositoryError::InvalidUrl(base_url.to_string()));
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ClientConfig) -> RepositoryResult<Self> {
        Self::new(
            &config.api_base_url,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> RepositoryResult<T> {
        let response = ensure_success(request.send().await?).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn execute(&self, request: RequestBuilder) -> RepositoryResult<()> {
        ensure_success(request.send().await?).await?;
        Ok(())
    }
}

/// Turns non-2xx responses into [`RepositoryError`]s.
async fn ensure_success(response: Response) -> RepositoryResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().to_string();
    log::warn!("{url} responded with {status}");
    let body = match response.text().await {
        Ok(body) => body,
        Err(err) => {
            log::warn!("Failed to read the error body from {url}: {err}");
            String::new()
        }
    };
    Err(RepositoryError::from_status(status.as_u16(), &body))
}

#[async_trait]
impl ContactReader for HttpRepository {
    async fn list_contacts(&self) -> RepositoryResult<Vec<Contact>> {
        self.fetch(self.client.get(self.endpoint("contacts"))).await
    }
}

#[async_trait]
impl ContactWriter for HttpRepository {
    async fn delete_contact(&self, id: ContactId) -> RepositoryResult<()> {
        self.execute(self.client.delete(self.endpoint(&format!("contacts/{id}"))))
            .await
    }
}

#[async_trait]
impl CustomerReader for HttpRepository {
    async fn list_customers(&self) -> RepositoryResult<Vec<Customer>> {
        self.fetch(self.client.get(self.endpoint("customers"))).await
    }
}

#[async_trait]
impl CustomerWriter for HttpRepository {
    async fn create_customer(&self, new_customer: &NewCustomer) -> RepositoryResult<Customer> {
        self.fetch(self.client.post(self.endpoint("customers")).json(new_customer))
            .await
    }

    async fn update_customer(&self, customer: &Customer) -> RepositoryResult<Customer> {
        let url = self.endpoint(&format!("customers/{}", customer.id));
        self.fetch(self.client.put(url).json(customer)).await
    }

    async fn delete_customer(&self, id: CustomerId) -> RepositoryResult<()> {
        self.execute(self.client.delete(self.endpoint(&format!("customers/{id}"))))
            .await
    }

    async fn update_customer_status(
        &self,
        id: CustomerId,
        status: &CustomerStatus,
    ) -> RepositoryResult<Customer> {
        let body = CustomerStatusUpdate {
            status: status.clone(),
        };
        let url = self.endpoint(&format!("customers/{id}/status"));
        self.fetch(self.client.patch(url).json(&body)).await
    }
}

#[async_trait]
impl UserReader for HttpRepository {
    async fn list_users(&self) -> RepositoryResult<Vec<User>> {
        self.fetch(self.client.get(self.endpoint("users"))).await
    }
}
