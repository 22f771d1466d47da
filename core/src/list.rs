//! Paginated student list with stale-while-revalidate page changes.
//!
//! # Design
//! The controller never performs I/O. `mount`, `navigate`, `refresh` and
//! `request_delete` return a `Pending` request; the host executes it and
//! feeds the outcome back through `on_list_response` / `on_delete_response`.
//! Only the most recently issued list fetch is applied, so a slow response
//! for an abandoned page can never overwrite a newer one. Deletes of
//! different records are independent: every one in flight is tracked and
//! settled on its own.

use std::collections::BTreeMap;
use std::mem;

use tracing::{debug, info, warn};

use crate::cache::StudentCache;
use crate::client::{StudentClient, TOTAL_COUNT_HEADER};
use crate::error::ApiError;
use crate::http::HttpResponse;
use crate::pagination::{parse_total_count, resolve_page, PageLinks, Pagination};
use crate::request::{Notification, Pending, Sequencer, Ticket};
use crate::types::{StudentId, StudentSummary};

/// Rows of one fetched page plus the pagination derived from its response.
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage {
    pub students: Vec<StudentSummary>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListState {
    /// First request of this mount is in flight; nothing to show yet.
    Loading,
    Ready(ListPage),
    /// A page change is in flight; `previous` stays on screen until it lands.
    LoadingNext { previous: ListPage },
    Failed { error: ApiError, previous: Option<ListPage> },
}

#[derive(Debug)]
pub struct ListController {
    client: StudentClient,
    cache: StudentCache,
    limit: u32,
    page: u32,
    state: ListState,
    seq: Sequencer,
    fetch: Option<Ticket>,
    deletes: BTreeMap<Ticket, StudentId>,
    notifications: Vec<Notification>,
    mounted: bool,
}

impl ListController {
    /// Mount the list for the given query string and issue the first fetch.
    pub fn mount(client: StudentClient, cache: StudentCache, limit: u32, query: &str) -> (Self, Pending) {
        let mut controller = Self {
            client,
            cache,
            limit: limit.max(1),
            page: resolve_page(query),
            state: ListState::Loading,
            seq: Sequencer::default(),
            fetch: None,
            deletes: BTreeMap::new(),
            notifications: Vec::new(),
            mounted: true,
        };
        let pending = controller.start_fetch();
        (controller, pending)
    }

    /// React to a new query string. Returns a request only if the page changed
    /// or the last fetch failed.
    pub fn navigate(&mut self, query: &str) -> Option<Pending> {
        let page = resolve_page(query);
        let failed = matches!(self.state, ListState::Failed { .. });
        if page == self.page && !failed {
            return None;
        }
        self.page = page;
        Some(self.start_fetch())
    }

    /// Refetch the current page, keeping the visible rows.
    pub fn refresh(&mut self) -> Pending {
        self.start_fetch()
    }

    /// Apply a list response. Returns `false` if the response was stale.
    pub fn on_list_response(&mut self, ticket: Ticket, result: Result<HttpResponse, ApiError>) -> bool {
        if !self.mounted || self.fetch != Some(ticket) {
            debug!(seq = ticket.seq(), "discarding stale list response");
            return false;
        }
        self.fetch = None;

        let previous = match mem::replace(&mut self.state, ListState::Loading) {
            ListState::LoadingNext { previous } => Some(previous),
            ListState::Ready(page) => Some(page),
            ListState::Failed { previous, .. } => previous,
            ListState::Loading => None,
        };

        self.state = match result.and_then(|response| self.client.parse_list_students(response)) {
            Ok(envelope) => {
                let total_count = parse_total_count(envelope.header(TOTAL_COUNT_HEADER));
                let pagination = Pagination::new(self.page, self.limit, total_count);
                info!(
                    page = self.page,
                    rows = envelope.data.len(),
                    total_pages = pagination.total_pages(),
                    "student page loaded"
                );
                ListState::Ready(ListPage {
                    students: envelope.data,
                    pagination,
                })
            }
            Err(error) => {
                warn!(page = self.page, %error, "student list fetch failed");
                ListState::Failed { error, previous }
            }
        };
        true
    }

    pub fn request_delete(&mut self, id: StudentId) -> Pending {
        let pending = self.seq.issue(self.client.build_delete_student(&id));
        debug!(seq = pending.ticket.seq(), %id, "deleting student");
        self.deletes.insert(pending.ticket, id);
        pending
    }

    /// Apply a delete response; on success the record is evicted from the
    /// cache and the current page is refetched. The refetch supersedes any
    /// list fetch still in flight, including one issued by an earlier delete.
    pub fn on_delete_response(
        &mut self,
        ticket: Ticket,
        result: Result<HttpResponse, ApiError>,
    ) -> Option<Pending> {
        let id = match self.deletes.remove(&ticket) {
            Some(id) if self.mounted => id,
            _ => {
                debug!(seq = ticket.seq(), "discarding unknown delete response");
                return None;
            }
        };
        match result.and_then(|response| self.client.parse_delete_student(response)) {
            Ok(_) => {
                info!(%id, "student deleted");
                self.cache.remove(&id);
                self.notifications
                    .push(Notification::Success(format!("Deleted student {id}")));
                Some(self.start_fetch())
            }
            Err(error) => {
                warn!(%id, %error, "student delete failed");
                self.notifications
                    .push(Notification::Error(format!("Could not delete student {id}: {error}")));
                None
            }
        }
    }

    /// Invalidate outstanding requests; late responses are ignored afterwards.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.fetch = None;
        self.deletes.clear();
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, ListState::Loading)
    }

    pub fn error(&self) -> Option<&ApiError> {
        match &self.state {
            ListState::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    /// The page currently on screen, which may belong to an older request.
    pub fn visible(&self) -> Option<&ListPage> {
        match &self.state {
            ListState::Ready(page) | ListState::LoadingNext { previous: page } => Some(page),
            ListState::Failed { previous, .. } => previous.as_ref(),
            ListState::Loading => None,
        }
    }

    pub fn rows(&self) -> &[StudentSummary] {
        self.visible().map(|page| page.students.as_slice()).unwrap_or(&[])
    }

    /// Links for the requested page, counted from the latest known total.
    pub fn links(&self) -> Option<PageLinks> {
        self.visible()
            .map(|visible| Pagination::new(self.page, self.limit, visible.pagination.total_count).links())
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        mem::take(&mut self.notifications)
    }

    fn start_fetch(&mut self) -> Pending {
        self.state = match mem::replace(&mut self.state, ListState::Loading) {
            ListState::Ready(previous)
            | ListState::LoadingNext { previous }
            | ListState::Failed { previous: Some(previous), .. } => ListState::LoadingNext { previous },
            _ => ListState::Loading,
        };
        let pending = self.seq.issue(self.client.build_list_students(self.page, self.limit));
        debug!(seq = pending.ticket.seq(), page = self.page, "fetching student page");
        self.fetch = Some(pending.ticket);
        pending
    }
}
