//! Configuration model loaded from external sources.

use std::env;
use std::time::Duration;

use config::{Config, ConfigError};
use serde::Deserialize;

use crate::views::ViewOptions;

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_contacts_min_loading_ms() -> u64 {
    500
}

fn default_customers_min_loading_ms() -> u64 {
    1000
}

fn default_contacts_poll_interval_ms() -> Option<u64> {
    Some(5000)
}

#[derive(Clone, Debug, Deserialize)]
/// Settings of the admin client: backend location and view timings.
pub struct ClientConfig {
    pub api_base_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_contacts_min_loading_ms")]
    pub contacts_min_loading_ms: u64,
    #[serde(default = "default_customers_min_loading_ms")]
    pub customers_min_loading_ms: u64,
    #[serde(default = "default_contacts_poll_interval_ms")]
    pub contacts_poll_interval_ms: Option<u64>,
    #[serde(default)]
    pub customers_poll_interval_ms: Option<u64>,
}

impl ClientConfig {
    /// Loads `config/default`, the optional `config/{APP_ENV}` override
    /// (`local` when unset) and `APP_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

        Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
            .add_source(config::Environment::with_prefix("APP"))
            .build()?
            .try_deserialize()
    }

    pub fn contacts_view_options(&self) -> ViewOptions {
        ViewOptions {
            min_loading: Duration::from_millis(self.contacts_min_loading_ms),
            poll_interval: self
                .contacts_poll_interval_ms
                .filter(|ms| *ms > 0)
                .map(Duration::from_millis),
        }
    }

    pub fn customers_view_options(&self) -> ViewOptions {
        ViewOptions {
            min_loading: Duration::from_millis(self.customers_min_loading_ms),
            poll_interval: self
                .customers_poll_interval_ms
                .filter(|ms| *ms > 0)
                .map(Duration::from_millis),
        }
    }
}
