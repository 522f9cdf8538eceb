use std::process;
use std::time::Duration;

use dotenvy::dotenv;
use tokio::time::interval;

use pushkind_crm_admin::models::config::ClientConfig;
use pushkind_crm_admin::views::LoadState;

fn describe(status: &LoadState) -> String {
    match status {
        LoadState::Loading => "loading".to_string(),
        LoadState::Ready => "ready".to_string(),
        LoadState::Error(message) => format!("error: {message}"),
    }
}

#[tokio::main]
async fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = match ClientConfig::load() {
        Ok(config) => config,
        Err(err) => {
            log::error!("Error loading client config: {err}");
            process::exit(1);
        }
    };

    let mut views = match pushkind_crm_admin::mount(&config) {
        Ok(views) => views,
        Err(err) => {
            log::error!("Failed to set up the CRM backend client: {err}");
            process::exit(1);
        }
    };

    let report_every = config
        .contacts_poll_interval_ms
        .filter(|ms| *ms > 0)
        .map(Duration::from_millis)
        .unwrap_or(Duration::from_secs(5));
    let mut ticker = interval(report_every);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let contacts = views.contacts.snapshot().await;
                let customers = views.customers.snapshot().await;
                log::info!(
                    "contacts: {} ({} rows, {} pages); customers: {} ({} rows, {} pages, {} assignees)",
                    describe(&contacts.status),
                    contacts.rows.len(),
                    contacts.total_pages,
                    describe(&customers.status),
                    customers.rows.len(),
                    customers.total_pages,
                    customers.users.len(),
                );
            }
            _ = tokio::signal::ctrl_c() => {
                log::info!("Shutting down");
                break;
            }
        }
    }

    views.contacts.unmount();
    views.customers.unmount();
}
