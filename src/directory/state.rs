//! Snapshot state for the directory view and the pure transitions that move it.
//!
//! Every request goes through a `begin_*` transition that hands out a ticket and a
//! matching `finish_*` transition that consumes it. Tickets carry the loader
//! generation they were issued under; finishing a ticket that is no longer the
//! latest for its loader leaves the state untouched, so responses are reconciled
//! by issue order rather than arrival order.

use super::{
    config::ErrorPolicy,
    errors::{ApiError, LoadError},
    types::{Advisory, UserDetail, UserDetailResponse, UserPage, UserSummary},
};

/// Which loader an error or request belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Loader {
    List,
    Detail,
}

/// Current page and server-reported page count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageState {
    pub current_page: u32,
    pub total_pages: u32,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_pages: 0,
        }
    }
}

/// The selected user plus whatever the detail loader has produced for it. The
/// summary is absent when a user was opened by id from outside the current page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    pub user_id: u64,
    pub summary: Option<UserSummary>,
    pub detail: Option<UserDetail>,
    pub advisory: Option<Advisory>,
}

/// Issued/settled counters for one loader.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Generation {
    issued: u64,
    settled: u64,
}

impl Generation {
    fn issue(self) -> (Self, u64) {
        let next = self.issued + 1;
        (
            Self {
                issued: next,
                settled: self.settled,
            },
            next,
        )
    }

    // Latest ticket and not yet settled.
    const fn is_current(self, generation: u64) -> bool {
        generation == self.issued && self.settled < self.issued
    }

    const fn settle(self, generation: u64) -> Self {
        Self {
            issued: self.issued,
            settled: generation,
        }
    }

    // Moves past every outstanding ticket without leaving anything in flight.
    const fn invalidate(self) -> Self {
        let next = self.issued + 1;
        Self {
            issued: next,
            settled: next,
        }
    }

    const fn is_loading(self) -> bool {
        self.settled < self.issued
    }
}

/// Receipt for a list request issued by [`DirectoryState::begin_page_load`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListTicket {
    generation: u64,
    page: u32,
}

impl ListTicket {
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

/// Receipt for a detail request issued by [`DirectoryState::select`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DetailTicket {
    generation: u64,
    user_id: u64,
}

impl DetailTicket {
    #[must_use]
    pub const fn user_id(&self) -> u64 {
        self.user_id
    }

    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

/// Immutable snapshot of the directory view.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirectoryState {
    policy: ErrorPolicy,
    users: Vec<UserSummary>,
    page: PageState,
    list: Generation,
    selection: Option<Selection>,
    detail: Generation,
    list_error: Option<LoadError>,
    detail_error: Option<LoadError>,
    latest_error: Option<Loader>,
}

impl DirectoryState {
    #[must_use]
    pub fn new(policy: ErrorPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    // --- transitions ---

    /// Moves to `page` and issues a list request for it.
    #[must_use]
    pub fn begin_page_load(mut self, page: u32) -> (Self, ListTicket) {
        let page = page.max(1);
        let (list, generation) = self.list.issue();
        self.list = list;
        self.page.current_page = page;
        (self, ListTicket { generation, page })
    }

    /// Applies the outcome of a list request. Stale tickets are ignored.
    #[must_use]
    pub fn finish_page_load(
        mut self,
        ticket: ListTicket,
        result: Result<UserPage, ApiError>,
    ) -> Self {
        if !self.list.is_current(ticket.generation) {
            return self;
        }
        self.list = self.list.settle(ticket.generation);

        match result {
            Ok(page) => {
                self.users = page.data;
                self.page.total_pages = page.total_pages;
                if self.policy == ErrorPolicy::ClearOnSuccess {
                    self.clear_error(Loader::List);
                }
            }
            Err(err) => self.set_error(LoadError::list(&err)),
        }

        self
    }

    /// Selects `user`, drops any detail held for a previous selection and issues
    /// a detail request.
    #[must_use]
    pub fn select(self, user: UserSummary) -> (Self, DetailTicket) {
        self.begin_selection(user.id, Some(user))
    }

    /// Selects a user by id, keeping the summary if it is on the current page.
    #[must_use]
    pub fn open(self, user_id: u64) -> (Self, DetailTicket) {
        let summary = self.find_user(user_id).cloned();
        self.begin_selection(user_id, summary)
    }

    fn begin_selection(
        mut self,
        user_id: u64,
        summary: Option<UserSummary>,
    ) -> (Self, DetailTicket) {
        let (detail, generation) = self.detail.issue();
        self.detail = detail;
        self.selection = Some(Selection {
            user_id,
            summary,
            detail: None,
            advisory: None,
        });
        (self, DetailTicket { generation, user_id })
    }

    /// Applies the outcome of a detail request. Stale tickets, including those
    /// issued before the selection was cleared, are ignored.
    #[must_use]
    pub fn finish_detail_load(
        mut self,
        ticket: DetailTicket,
        result: Result<UserDetailResponse, ApiError>,
    ) -> Self {
        if !self.detail.is_current(ticket.generation) {
            return self;
        }
        self.detail = self.detail.settle(ticket.generation);

        match result {
            Ok(response) => {
                if let Some(selection) = self
                    .selection
                    .as_mut()
                    .filter(|selection| selection.user_id == ticket.user_id)
                {
                    selection.detail = Some(response.data);
                    selection.advisory = response.support;
                }
                if self.policy == ErrorPolicy::ClearOnSuccess {
                    self.clear_error(Loader::Detail);
                }
            }
            Err(err) => self.set_error(LoadError::detail(&err)),
        }

        self
    }

    /// Drops the selection together with its detail and advisory.
    #[must_use]
    pub fn clear_selection(mut self) -> Self {
        self.selection = None;
        if self.detail.is_loading() {
            self.detail = self.detail.invalidate();
        }
        self
    }

    /// Empties both error slots.
    #[must_use]
    pub fn dismiss_errors(mut self) -> Self {
        self.list_error = None;
        self.detail_error = None;
        self.latest_error = None;
        self
    }

    fn set_error(&mut self, error: LoadError) {
        let loader = match error {
            LoadError::List(_) => {
                self.list_error = Some(error);
                Loader::List
            }
            LoadError::Detail(_) => {
                self.detail_error = Some(error);
                Loader::Detail
            }
        };
        self.latest_error = Some(loader);
    }

    fn clear_error(&mut self, loader: Loader) {
        match loader {
            Loader::List => self.list_error = None,
            Loader::Detail => self.detail_error = None,
        }
        if self.latest_error == Some(loader) {
            self.latest_error = match loader {
                Loader::List => self.detail_error.as_ref().map(|_| Loader::Detail),
                Loader::Detail => self.list_error.as_ref().map(|_| Loader::List),
            };
        }
    }

    // --- queries ---

    #[must_use]
    pub const fn policy(&self) -> ErrorPolicy {
        self.policy
    }

    #[must_use]
    pub fn users(&self) -> &[UserSummary] {
        &self.users
    }

    #[must_use]
    pub fn find_user(&self, id: u64) -> Option<&UserSummary> {
        self.users.iter().find(|user| user.id == id)
    }

    #[must_use]
    pub const fn page(&self) -> PageState {
        self.page
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page.current_page < self.page.total_pages
    }

    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page.current_page > 1
    }

    #[must_use]
    pub const fn is_loading_list(&self) -> bool {
        self.list.is_loading()
    }

    #[must_use]
    pub const fn is_loading_detail(&self) -> bool {
        self.detail.is_loading()
    }

    /// Returns true if `ticket` is the latest list request and still pending.
    #[must_use]
    pub const fn is_current_list(&self, ticket: &ListTicket) -> bool {
        self.list.is_current(ticket.generation)
    }

    /// Returns true if `ticket` is the latest detail request and still pending.
    #[must_use]
    pub const fn is_current_detail(&self, ticket: &DetailTicket) -> bool {
        self.detail.is_current(ticket.generation)
    }

    #[must_use]
    pub const fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    #[must_use]
    pub fn selected_user_id(&self) -> Option<u64> {
        self.selection.as_ref().map(|selection| selection.user_id)
    }

    #[must_use]
    pub fn detail(&self) -> Option<&UserDetail> {
        self.selection.as_ref().and_then(|selection| selection.detail.as_ref())
    }

    #[must_use]
    pub fn advisory(&self) -> Option<&Advisory> {
        self.selection
            .as_ref()
            .and_then(|selection| selection.advisory.as_ref())
    }

    #[must_use]
    pub const fn list_error(&self) -> Option<&LoadError> {
        self.list_error.as_ref()
    }

    #[must_use]
    pub const fn detail_error(&self) -> Option<&LoadError> {
        self.detail_error.as_ref()
    }

    #[must_use]
    pub const fn has_error(&self) -> bool {
        self.list_error.is_some() || self.detail_error.is_some()
    }

    /// The most recently recorded error, for a single banner line.
    #[must_use]
    pub fn banner(&self) -> Option<&LoadError> {
        match self.latest_error? {
            Loader::List => self.list_error.as_ref(),
            Loader::Detail => self.detail_error.as_ref(),
        }
    }
}
