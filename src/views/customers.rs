//! Customers table: search, pagination, the add/edit editor, delete and
//! inline status changes.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::domain::customer::Customer;
use crate::domain::types::{CustomerId, CustomerStatus};
use crate::domain::user::User;
use crate::dto::customers::{CustomerRow, CustomersPageData};
use crate::forms::customer::CustomerForm;
use crate::loading::with_min_duration;
use crate::pagination::Paginated;
use crate::polling::Poller;
use crate::repository::CustomerRepository;
use crate::services::customers::{
    change_customer_status, create_customer, delete_customer, load_assignable_users,
    load_customers, update_customer,
};
use crate::services::{Confirm, DeleteOutcome, ServiceError, ServiceResult};
use crate::views::{Editor, ListState, LoadState, Mounted, ViewOptions};

const CONFIRM_DELETE: &str = "Are you sure you want to delete this customer?";

#[derive(Debug)]
struct CustomersState {
    list: ListState<Customer>,
    users: Vec<User>,
    editor: Option<Editor<Customer>>,
}

type SharedState = Arc<RwLock<CustomersState>>;

async fn gated_load<R>(repo: Arc<R>, state: SharedState, mounted: Mounted, floor: Duration)
where
    R: CustomerRepository,
{
    if !mounted.get() {
        return;
    }
    state.write().await.list.begin_gate();

    let result = with_min_duration(floor, load_customers(repo.as_ref())).await;

    if mounted.get() {
        state.write().await.list.finish_gate(result);
    }
}

async fn silent_load<R>(repo: Arc<R>, state: SharedState, mounted: Mounted)
where
    R: CustomerRepository,
{
    let result = load_customers(repo.as_ref()).await;

    if mounted.get() {
        state.write().await.list.apply_refresh(result);
    }
}

/// The assignee list is optional for the view: a failure leaves it empty.
async fn load_users<R>(repo: Arc<R>, state: SharedState, mounted: Mounted)
where
    R: CustomerRepository,
{
    match load_assignable_users(repo.as_ref()).await {
        Ok(users) if mounted.get() => state.write().await.users = users,
        Ok(_) => {}
        Err(err) => log::warn!("Customer editor will have no assignees: {err}"),
    }
}

/// Mounted customers view.
pub struct CustomersView<R> {
    repo: Arc<R>,
    state: SharedState,
    mounted: Mounted,
    options: ViewOptions,
    poller: Option<Poller>,
    initial_load: Option<JoinHandle<()>>,
}

impl<R: CustomerRepository> CustomersView<R> {
    /// Enters the loading state and fetches customers and assignable users
    /// concurrently; starts the poller when configured. Must be called from
    /// within a Tokio runtime.
    pub fn mount(repo: Arc<R>, options: ViewOptions) -> Self {
        let state = Arc::new(RwLock::new(CustomersState {
            list: ListState::new(),
            users: Vec::new(),
            editor: None,
        }));
        let mounted = Mounted::new();

        let initial_load = {
            let (repo, state, mounted) = (repo.clone(), state.clone(), mounted.clone());
            tokio::spawn(async move {
                tokio::join!(
                    gated_load(
                        repo.clone(),
                        state.clone(),
                        mounted.clone(),
                        options.min_loading
                    ),
                    load_users(repo, state, mounted),
                );
            })
        };

        let poller = options.poll_interval.map(|period| {
            let (repo, state, mounted) = (repo.clone(), state.clone(), mounted.clone());
            Poller::start(period, move || {
                silent_load(repo.clone(), state.clone(), mounted.clone())
            })
        });

        log::info!("Customers view mounted");

        Self {
            repo,
            state,
            mounted,
            options,
            poller,
            initial_load: Some(initial_load),
        }
    }

    /// Waits for the initial load (including the loading floor) to finish.
    pub async fn wait_loaded(&mut self) {
        if let Some(handle) = self.initial_load.take() {
            if let Err(err) = handle.await {
                log::error!("Initial customers load did not complete: {err}");
            }
        }
    }

    /// Full refetch through the loading gate.
    pub async fn reload(&self) {
        gated_load(
            self.repo.clone(),
            self.state.clone(),
            self.mounted.clone(),
            self.options.min_loading,
        )
        .await;
    }

    /// Full refetch without entering the loading state, as the poller does.
    pub async fn refresh(&self) {
        silent_load(self.repo.clone(), self.state.clone(), self.mounted.clone()).await;
    }

    pub async fn status(&self) -> LoadState {
        self.state.read().await.list.status.clone()
    }

    pub async fn set_search(&self, term: &str) {
        self.state.write().await.list.set_search(term);
    }

    /// Moves to `page`; out-of-range requests are rejected.
    pub async fn go_to_page(&self, page: usize) -> bool {
        self.state.write().await.list.go_to_page(page)
    }

    pub async fn next_page(&self) -> bool {
        let mut state = self.state.write().await;
        let next = state.list.page.current() + 1;
        state.list.go_to_page(next)
    }

    pub async fn previous_page(&self) -> bool {
        let mut state = self.state.write().await;
        let previous = state.list.page.current().saturating_sub(1);
        state.list.go_to_page(previous)
    }

    /// Filtered rows of the current page.
    pub async fn page(&self) -> Paginated<Customer> {
        self.state.read().await.list.current_page()
    }

    pub async fn customer(&self, id: CustomerId) -> Option<Customer> {
        self.state.read().await.list.collection.get(id).cloned()
    }

    /// Number of customers currently held, regardless of the search.
    pub async fn record_count(&self) -> usize {
        self.state.read().await.list.collection.len()
    }

    pub async fn users(&self) -> Vec<User> {
        self.state.read().await.users.clone()
    }

    pub async fn open_create(&self) {
        self.state.write().await.editor = Some(Editor::Create);
    }

    /// Opens the editor on an existing customer and returns the prefilled
    /// form.
    pub async fn open_edit(&self, id: CustomerId) -> ServiceResult<CustomerForm> {
        let mut state = self.state.write().await;
        let customer = state
            .list
            .collection
            .get(id)
            .cloned()
            .ok_or(ServiceError::NotFound)?;
        let form = CustomerForm::from_customer(&customer);
        state.editor = Some(Editor::Edit(customer));
        Ok(form)
    }

    pub async fn editor(&self) -> Option<Editor<Customer>> {
        self.state.read().await.editor.clone()
    }

    pub async fn close_editor(&self) {
        self.state.write().await.editor = None;
    }

    /// Saves the editor form. On success the server record is merged into the
    /// collection and the editor closes; on failure the editor stays open and
    /// the error is surfaced.
    pub async fn submit(&self, form: CustomerForm) -> ServiceResult<Customer> {
        let editor = self.state.read().await.editor.clone();

        let result = match &editor {
            None => Err(ServiceError::Form("Editor is not open".to_string())),
            Some(Editor::Create) => create_customer(self.repo.as_ref(), form).await,
            Some(Editor::Edit(current)) => update_customer(self.repo.as_ref(), current, form).await,
        };

        if !self.mounted.get() {
            return result;
        }

        let mut state = self.state.write().await;
        match &result {
            Ok(customer) => {
                match editor {
                    Some(Editor::Create) => state.list.collection.push(customer.clone()),
                    _ => {
                        state.list.collection.replace(customer.clone());
                    }
                }
                state.editor = None;
                state.list.sync_page();
            }
            Err(err) => state.list.report(err),
        }

        result
    }

    /// Deletes one customer after confirmation.
    pub async fn delete<C>(
        &self,
        id: CustomerId,
        confirm: &C,
    ) -> ServiceResult<DeleteOutcome<CustomerId>>
    where
        C: Confirm + ?Sized,
    {
        if !confirm.confirm(CONFIRM_DELETE) {
            return Ok(DeleteOutcome::Declined);
        }

        let result = delete_customer(self.repo.as_ref(), id).await;

        if self.mounted.get() {
            let mut state = self.state.write().await;
            match &result {
                Ok(()) => {
                    state.list.collection.remove_ids(&[id]);
                    state.list.sync_page();
                }
                Err(err) => state.list.report(err),
            }
        }

        result.map(|()| DeleteOutcome::Deleted(vec![id]))
    }

    /// Changes the status of one customer; only that record's status field is
    /// patched.
    pub async fn change_status(&self, id: CustomerId, status: CustomerStatus) -> ServiceResult<()> {
        let result = change_customer_status(self.repo.as_ref(), id, &status).await;

        if self.mounted.get() {
            let mut state = self.state.write().await;
            match &result {
                Ok(updated) => {
                    let confirmed = updated.status.clone();
                    state
                        .list
                        .collection
                        .update(id, |customer| customer.status = confirmed);
                }
                Err(err) => state.list.report(err),
            }
        }

        result.map(|_| ())
    }

    /// Takes the pending error message, if any.
    pub async fn take_error(&self) -> Option<String> {
        self.state.write().await.list.error.take()
    }

    pub async fn snapshot(&self) -> CustomersPageData {
        let state = self.state.read().await;
        let page = state.list.current_page();

        CustomersPageData {
            status: state.list.status.clone(),
            rows: page.items.iter().map(CustomerRow::from).collect(),
            no_records: page.is_empty(),
            page: page.page,
            total_pages: page.total_pages,
            pages: page.pages,
            search: state.list.search.clone(),
            users: state.users.clone(),
            editor_open: state.editor.is_some(),
            error: state.list.error.clone(),
        }
    }

    pub fn is_polling(&self) -> bool {
        self.poller.as_ref().is_some_and(Poller::is_running)
    }

    /// Stops polling and ignores every request that completes afterwards.
    pub fn unmount(&mut self) {
        self.mounted.unmount();
        if let Some(poller) = self.poller.take() {
            poller.stop();
        }
        log::info!("Customers view unmounted");
    }
}

impl<R> Drop for CustomersView<R> {
    fn drop(&mut self) {
        self.mounted.unmount();
    }
}
