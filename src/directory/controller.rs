//! Fetch orchestration for the directory view. `DirectoryView` applies the pure
//! transitions from [`super::state`] around each request; the state lock is only
//! taken between awaits, so overlapping page changes or selections are allowed
//! and reconciled by ticket generation.

use super::{
    client::UserDirectory,
    config::ErrorPolicy,
    errors::ApiError,
    state::{DetailTicket, DirectoryState},
    types::UserSummary,
};
use std::sync::{Mutex, PoisonError};
use tracing::{debug, info, instrument, warn};

pub struct DirectoryView<D> {
    source: D,
    state: Mutex<DirectoryState>,
}

impl<D: UserDirectory> DirectoryView<D> {
    #[must_use]
    pub fn new(source: D, policy: ErrorPolicy) -> Self {
        Self {
            source,
            state: Mutex::new(DirectoryState::new(policy)),
        }
    }

    #[must_use]
    pub const fn source(&self) -> &D {
        &self.source
    }

    /// Returns a copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> DirectoryState {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn update<R>(&self, transition: impl FnOnce(DirectoryState) -> (DirectoryState, R)) -> R {
        let mut guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let (next, output) = transition(std::mem::take(&mut *guard));
        *guard = next;
        output
    }

    /// Loads the first page, as on initial display.
    pub async fn mount(&self) -> DirectoryState {
        self.load_page(1).await
    }

    /// Moves to `page` and loads it.
    ///
    /// # Errors
    /// Returns `ApiError::Config` for page 0; fetch failures are recorded in the
    /// state instead.
    pub async fn set_page(&self, page: u32) -> Result<DirectoryState, ApiError> {
        if page == 0 {
            return Err(ApiError::Config("Page numbers start at 1.".to_string()));
        }
        Ok(self.load_page(page).await)
    }

    /// Loads the following page if the server reported one. Returns false without
    /// issuing a request otherwise.
    pub async fn next_page(&self) -> bool {
        let state = self.snapshot();
        if !state.has_next() {
            debug!(page = state.page().current_page, "already on last page");
            return false;
        }
        self.load_page(state.page().current_page + 1).await;
        true
    }

    /// Loads the preceding page unless already on page 1.
    pub async fn previous_page(&self) -> bool {
        let state = self.snapshot();
        if !state.has_previous() {
            debug!("already on first page");
            return false;
        }
        self.load_page(state.page().current_page - 1).await;
        true
    }

    /// Fetches the current page again.
    pub async fn reload(&self) -> DirectoryState {
        let page = self.snapshot().page().current_page;
        self.load_page(page).await
    }

    #[instrument(skip(self))]
    async fn load_page(&self, page: u32) -> DirectoryState {
        let ticket = self.update(|state| state.begin_page_load(page));
        debug!(generation = ticket.generation(), "list request issued");

        let result = self.source.list_users(ticket.page()).await;
        match &result {
            Ok(users) => info!(
                count = users.data.len(),
                total_pages = users.total_pages,
                "users page loaded"
            ),
            Err(err) => warn!("failed to fetch users: {err}"),
        }

        self.update(|state| {
            if !state.is_current_list(&ticket) {
                debug!(
                    generation = ticket.generation(),
                    "discarding stale list response"
                );
            }
            let next = state.finish_page_load(ticket, result);
            let snapshot = next.clone();
            (next, snapshot)
        })
    }

    /// Selects `user` from the current page and loads its detail record.
    #[instrument(skip(self, user), fields(user_id = user.id))]
    pub async fn select(&self, user: UserSummary) -> DirectoryState {
        let ticket = self.update(|state| state.select(user));
        self.load_detail(ticket).await
    }

    /// Selects a user by id, whether or not it is on the current page.
    #[instrument(skip(self))]
    pub async fn open(&self, user_id: u64) -> DirectoryState {
        let ticket = self.update(|state| state.open(user_id));
        self.load_detail(ticket).await
    }

    async fn load_detail(&self, ticket: DetailTicket) -> DirectoryState {
        debug!(generation = ticket.generation(), "detail request issued");

        let result = self.source.get_user(ticket.user_id()).await;
        match &result {
            Ok(response) => info!(
                advisory = response.support.is_some(),
                "user details loaded"
            ),
            Err(err) => warn!("failed to fetch user details: {err}"),
        }

        self.update(|state| {
            if !state.is_current_detail(&ticket) {
                debug!(
                    generation = ticket.generation(),
                    "discarding stale detail response"
                );
            }
            let next = state.finish_detail_load(ticket, result);
            let snapshot = next.clone();
            (next, snapshot)
        })
    }

    /// Closes the detail panel.
    pub fn clear(&self) -> DirectoryState {
        self.update(|state| {
            let next = state.clear_selection();
            (next.clone(), next)
        })
    }

    pub fn dismiss_errors(&self) -> DirectoryState {
        self.update(|state| {
            let next = state.dismiss_errors();
            (next.clone(), next)
        })
    }
}
