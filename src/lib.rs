//! Headless client for the CRM admin list views (contacts and customers).
//!
//! The `data` feature exposes the domain layer and the pure list helpers;
//! the `client` feature adds the REST repository, services and mounted views.

#[cfg(feature = "data")]
pub mod collection;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod forms;
#[cfg(feature = "data")]
pub mod pagination;
#[cfg(feature = "data")]
pub mod query;
#[cfg(feature = "data")]
pub mod selection;

#[cfg(feature = "client")]
pub mod dto;
#[cfg(feature = "client")]
mod error_conversions;
#[cfg(feature = "client")]
pub mod loading;
#[cfg(feature = "client")]
pub mod models;
#[cfg(feature = "client")]
pub mod polling;
#[cfg(feature = "client")]
pub mod repository;
#[cfg(feature = "client")]
pub mod services;
#[cfg(feature = "client")]
pub mod views;

#[cfg(feature = "client")]
use std::sync::Arc;

#[cfg(feature = "client")]
use crate::models::config::ClientConfig;
#[cfg(feature = "client")]
use crate::repository::HttpRepository;
#[cfg(feature = "client")]
use crate::views::{ContactsView, CustomersView};

/// Both admin views mounted against the same backend.
#[cfg(feature = "client")]
pub struct AdminViews {
    pub contacts: ContactsView<HttpRepository>,
    pub customers: CustomersView<HttpRepository>,
}

/// Builds the HTTP repository from `config` and mounts both views.
#[cfg(feature = "client")]
pub fn mount(
    config: &ClientConfig,
) -> Result<AdminViews, crate::repository::errors::RepositoryError> {
    let repo = Arc::new(HttpRepository::from_config(config)?);

    log::info!("Using CRM backend at {}", config.api_base_url);

    Ok(AdminViews {
        contacts: ContactsView::mount(repo.clone(), config.contacts_view_options()),
        customers: CustomersView::mount(repo, config.customers_view_options()),
    })
}
