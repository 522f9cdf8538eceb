//! Contacts table: search, pagination, row selection and (bulk) delete.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::domain::contact::Contact;
use crate::domain::types::ContactId;
use crate::dto::contacts::{ContactRow, ContactsPageData};
use crate::loading::with_min_duration;
use crate::pagination::Paginated;
use crate::polling::Poller;
use crate::repository::ContactRepository;
use crate::selection::SelectionSet;
use crate::services::contacts::{delete_contacts, load_contacts};
use crate::services::{Confirm, DeleteOutcome, ServiceError, ServiceResult};
use crate::views::{Editor, ListState, LoadState, Mounted, ViewOptions};

const CONFIRM_DELETE_ONE: &str = "Are you sure you want to delete this contact?";
const CONFIRM_DELETE_SELECTED: &str = "Are you sure you want to delete selected contacts?";

#[derive(Debug)]
struct ContactsState {
    list: ListState<Contact>,
    selection: SelectionSet<ContactId>,
    editor: Option<Editor<Contact>>,
}

type SharedState = Arc<RwLock<ContactsState>>;

async fn gated_load<R>(repo: Arc<R>, state: SharedState, mounted: Mounted, floor: Duration)
where
    R: ContactRepository,
{
    if !mounted.get() {
        return;
    }
    state.write().await.list.begin_gate();

    let result = with_min_duration(floor, load_contacts(repo.as_ref())).await;

    if mounted.get() {
        state.write().await.list.finish_gate(result);
    }
}

async fn silent_load<R>(repo: Arc<R>, state: SharedState, mounted: Mounted)
where
    R: ContactRepository,
{
    let result = load_contacts(repo.as_ref()).await;

    if mounted.get() {
        state.write().await.list.apply_refresh(result);
    }
}

/// Mounted contacts view.
pub struct ContactsView<R> {
    repo: Arc<R>,
    state: SharedState,
    mounted: Mounted,
    options: ViewOptions,
    poller: Option<Poller>,
    initial_load: Option<JoinHandle<()>>,
}

impl<R: ContactRepository> ContactsView<R> {
    /// Enters the loading state, starts the initial fetch and, when
    /// configured, the poller. Must be called from within a Tokio runtime.
    pub fn mount(repo: Arc<R>, options: ViewOptions) -> Self {
        let state = Arc::new(RwLock::new(ContactsState {
            list: ListState::new(),
            selection: SelectionSet::default(),
            editor: None,
        }));
        let mounted = Mounted::new();

        let initial_load = tokio::spawn(gated_load(
            repo.clone(),
            state.clone(),
            mounted.clone(),
            options.min_loading,
        ));

        let poller = options.poll_interval.map(|period| {
            let (repo, state, mounted) = (repo.clone(), state.clone(), mounted.clone());
            Poller::start(period, move || {
                silent_load(repo.clone(), state.clone(), mounted.clone())
            })
        });

        log::info!("Contacts view mounted");

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
                log::error!("Initial contacts load did not complete: {err}");
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
    pub async fn page(&self) -> Paginated<Contact> {
        self.state.read().await.list.current_page()
    }

    /// Number of contacts currently held, regardless of the search.
    pub async fn record_count(&self) -> usize {
        self.state.read().await.list.collection.len()
    }

    pub async fn toggle_selection(&self, id: ContactId) -> bool {
        self.state.write().await.selection.toggle(id)
    }

    /// Header checkbox: checks every contact or clears the selection.
    pub async fn set_all_selected(&self, checked: bool) {
        let mut guard = self.state.write().await;
        let state = &mut *guard;
        if checked {
            state.selection.select_all(&state.list.collection);
        } else {
            state.selection.clear();
        }
    }

    pub async fn selected(&self) -> Vec<ContactId> {
        self.state.read().await.selection.ids()
    }

    /// Opens the editor for a new contact (`None`) or an existing one.
    pub async fn open_editor(&self, id: Option<ContactId>) -> ServiceResult<()> {
        let mut state = self.state.write().await;
        let editor = match id {
            None => Editor::Create,
            Some(id) => Editor::Edit(
                state
                    .list
                    .collection
                    .get(id)
                    .cloned()
                    .ok_or(ServiceError::NotFound)?,
            ),
        };
        state.editor = Some(editor);
        Ok(())
    }

    pub async fn editor(&self) -> Option<Editor<Contact>> {
        self.state.read().await.editor.clone()
    }

    /// Closes the editor. The editor saves through its own collaborator, so
    /// the collection is reloaded to pick up its changes.
    pub async fn close_editor(&self) {
        self.state.write().await.editor = None;
        self.reload().await;
    }

    /// Deletes one contact after confirmation.
    pub async fn delete<C>(&self, id: ContactId, confirm: &C) -> ServiceResult<DeleteOutcome<ContactId>>
    where
        C: Confirm + ?Sized,
    {
        if !confirm.confirm(CONFIRM_DELETE_ONE) {
            return Ok(DeleteOutcome::Declined);
        }
        self.delete_ids(vec![id]).await
    }

    /// Deletes every selected contact after confirmation.
    pub async fn delete_selected<C>(&self, confirm: &C) -> ServiceResult<DeleteOutcome<ContactId>>
    where
        C: Confirm + ?Sized,
    {
        let ids = self.selected().await;
        if ids.is_empty() {
            return Ok(DeleteOutcome::Deleted(Vec::new()));
        }
        if !confirm.confirm(CONFIRM_DELETE_SELECTED) {
            return Ok(DeleteOutcome::Declined);
        }
        self.delete_ids(ids).await
    }

    async fn delete_ids(&self, ids: Vec<ContactId>) -> ServiceResult<DeleteOutcome<ContactId>> {
        let report = delete_contacts(self.repo.as_ref(), &ids).await;
        let failure = report.failure("contacts");

        if self.mounted.get() {
            let mut state = self.state.write().await;
            state.list.collection.remove_ids(&report.deleted);
            state.selection.remove(&report.deleted);
            state.list.sync_page();
            if let Some(err) = &failure {
                state.list.report(err);
            }
        }

        match failure {
            Some(err) => Err(err),
            None => Ok(DeleteOutcome::Deleted(report.deleted)),
        }
    }

    /// Takes the pending error message, if any.
    pub async fn take_error(&self) -> Option<String> {
        self.state.write().await.list.error.take()
    }

    pub async fn snapshot(&self) -> ContactsPageData {
        let state = self.state.read().await;
        let page = state.list.current_page();

        ContactsPageData {
            status: state.list.status.clone(),
            rows: page
                .items
                .iter()
                .map(|contact| ContactRow::new(contact, state.selection.contains(contact.id)))
                .collect(),
            no_records: page.is_empty(),
            page: page.page,
            total_pages: page.total_pages,
            pages: page.pages,
            search: state.list.search.clone(),
            selected_count: state.selection.len(),
            all_selected: state.selection.is_all_selected(&state.list.collection),
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
        log::info!("Contacts view unmounted");
    }
}

impl<R> Drop for ContactsView<R> {
    fn drop(&mut self) {
        self.mounted.unmount();
    }
}
