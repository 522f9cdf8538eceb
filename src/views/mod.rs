//! Headless list views: state, lifecycle and the actions a user can take.
//!
//! A view is mounted against a repository, owns its polling timer and keeps
//! its state behind an `Arc<RwLock<_>>` so that request completions can land
//! while the view stays usable. Once unmounted, late completions are dropped.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use serde::Serialize;

use crate::collection::Collection;
use crate::domain::Record;
use crate::pagination::{PageState, Paginated};
use crate::query::{filter_records, query_page};
use crate::services::{ServiceError, ServiceResult};

pub mod contacts;
pub mod customers;

pub use contacts::ContactsView;
pub use customers::CustomersView;

/// Load state of a view's collection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum LoadState {
    Loading,
    Ready,
    /// Loading failed; the view shows this message instead of the table.
    Error(String),
}

/// Timing knobs of a mounted view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewOptions {
    /// Shortest time the loading state stays visible.
    pub min_loading: Duration,
    /// Period of background refetches; `None` disables polling.
    pub poll_interval: Option<Duration>,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            min_loading: Duration::from_millis(500),
            poll_interval: None,
        }
    }
}

/// What the record editor (modal) is open for.
#[derive(Clone, Debug, PartialEq)]
pub enum Editor<T> {
    Create,
    Edit(T),
}

/// Liveness flag shared between a view and its in-flight tasks.
#[derive(Clone, Debug)]
pub(crate) struct Mounted(Arc<AtomicBool>);

impl Mounted {
    pub(crate) fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub(crate) fn get(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    pub(crate) fn unmount(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Searchable, paginated collection shared by both views.
#[derive(Debug)]
pub(crate) struct ListState<T> {
    pub(crate) status: LoadState,
    pub(crate) collection: Collection<T>,
    pub(crate) search: String,
    pub(crate) page: PageState,
    /// Last mutation failure, surfaced to the user until taken.
    pub(crate) error: Option<String>,
    /// Gated loads still holding the loading state.
    gates: usize,
}

impl<T: Record + Clone> ListState<T> {
    pub(crate) fn new() -> Self {
        Self {
            status: LoadState::Loading,
            collection: Collection::default(),
            search: String::new(),
            page: PageState::default(),
            error: None,
            gates: 0,
        }
    }

    pub(crate) fn total_pages(&self) -> usize {
        self.page
            .total_pages(filter_records(&self.collection, &self.search).len())
    }

    pub(crate) fn set_search(&mut self, term: &str) {
        if self.search != term {
            self.search = term.to_string();
            self.page.reset();
        }
    }

    pub(crate) fn go_to_page(&mut self, page: usize) -> bool {
        let total = self.total_pages();
        self.page.go_to(page, total)
    }

    pub(crate) fn current_page(&self) -> Paginated<T> {
        query_page(&self.collection, &self.search, &self.page)
    }

    /// Keeps the current page valid after the collection changed.
    pub(crate) fn sync_page(&mut self) {
        let total = self.total_pages();
        self.page.clamp(total);
    }

    /// Applies a full fetch result: replaces the collection on success, shows
    /// the error state on failure.
    pub(crate) fn apply_fetch(&mut self, result: ServiceResult<Vec<T>>) {
        match result {
            Ok(items) => {
                self.collection.replace_all(items);
                self.status = LoadState::Ready;
                self.sync_page();
            }
            Err(err) => {
                self.status = LoadState::Error(err.to_string());
            }
        }
    }

    /// Enters the loading state for a gated load.
    pub(crate) fn begin_gate(&mut self) {
        self.gates += 1;
        self.status = LoadState::Loading;
    }

    /// Applies the result of a gated load once its floor has elapsed.
    pub(crate) fn finish_gate(&mut self, result: ServiceResult<Vec<T>>) {
        self.gates = self.gates.saturating_sub(1);
        self.apply_fetch(result);
    }

    /// Applies a background refetch. While a gated load is pending the data
    /// is taken but the status stays `Loading` until the gate finishes.
    pub(crate) fn apply_refresh(&mut self, result: ServiceResult<Vec<T>>) {
        if self.gates == 0 {
            self.apply_fetch(result);
            return;
        }
        if let Ok(items) = result {
            self.collection.replace_all(items);
            self.sync_page();
        }
    }

    pub(crate) fn report(&mut self, err: &ServiceError) {
        self.error = Some(err.to_string());
    }
}
