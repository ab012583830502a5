//! Paginated list controller.
//!
//! Owns the paging/search state of one entity collection, fetches pages
//! through a list envelope and re-fetches after every successful mutation.
//!
//! State transitions (`go_to_page`, `set_page_size`, `set_search_term`,
//! `next_page`, `previous_page`) issue exactly one list request when they
//! change the state, carrying the state as it is at dispatch time. Nothing is
//! debounced here; see [`crate::debounce`].
//!
//! Requests are not serialized against each other. By default the last list
//! response to resolve wins, even if it was issued first. Setting
//! [`ControllerOptions::discard_stale_responses`] stamps each list request
//! with a sequence number and drops responses older than the latest request.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use tracing::debug;

use firestock_core::{clamp_page, defaults, normalize_search_term, ApiError, CrudEndpoints, ListState};

use crate::config::Messages;
use crate::envelope::{Collaborators, NotifyOptions, RequestEnvelope};

/// Controller settings.
#[derive(Debug, Clone)]
pub struct ControllerOptions {
    /// Page size before the user picks one.
    pub initial_page_size: u32,
    /// Drop list responses that were overtaken by a newer list request.
    pub discard_stale_responses: bool,
    /// Toast settings for create/update/delete.
    pub mutation_notify: NotifyOptions,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            initial_page_size: defaults::PAGE_SIZE,
            discard_stale_responses: false,
            mutation_notify: NotifyOptions::default(),
        }
    }
}

impl ControllerOptions {
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.initial_page_size = page_size;
        self
    }

    pub fn discarding_stale_responses(mut self) -> Self {
        self.discard_stale_responses = true;
        self
    }
}

/// Fetch/mutate/refetch lifecycle of one paginated, searchable collection.
pub struct PaginatedListController<E: CrudEndpoints> {
    endpoints: Arc<E>,
    list_envelope: RequestEnvelope,
    create_envelope: RequestEnvelope,
    update_envelope: RequestEnvelope,
    delete_envelope: RequestEnvelope,
    messages: Arc<Messages>,
    options: ControllerOptions,
    state: RwLock<ListState>,
    items: RwLock<Vec<E::Item>>,
    list_error: RwLock<Option<ApiError>>,
    mutation_error: RwLock<Option<ApiError>>,
    attached: AtomicBool,
    list_seq: AtomicU64,
}

impl<E: CrudEndpoints> PaginatedListController<E> {
    pub fn new(endpoints: Arc<E>, collaborators: Collaborators, options: ControllerOptions) -> Self {
        Self {
            endpoints,
            list_envelope: RequestEnvelope::new("list", collaborators.clone()),
            create_envelope: RequestEnvelope::new("create", collaborators.clone()),
            update_envelope: RequestEnvelope::new("update", collaborators.clone()),
            delete_envelope: RequestEnvelope::new("delete", collaborators.clone()),
            messages: collaborators.messages,
            state: RwLock::new(ListState::with_page_size(options.initial_page_size)),
            options,
            items: RwLock::new(Vec::new()),
            list_error: RwLock::new(None),
            mutation_error: RwLock::new(None),
            attached: AtomicBool::new(true),
            list_seq: AtomicU64::new(0),
        }
    }

    /// Create a controller and load the first page.
    pub async fn mount(
        endpoints: Arc<E>,
        collaborators: Collaborators,
        options: ControllerOptions,
    ) -> Self {
        let controller = Self::new(endpoints, collaborators, options);
        controller.list().await;
        controller
    }

    pub fn endpoints(&self) -> &E {
        &self.endpoints
    }

    // =========================================================================
    // Snapshots
    // =========================================================================

    /// Items of the current page, in server order.
    pub fn items(&self) -> Vec<E::Item> {
        self.items.read().map(|i| i.clone()).unwrap_or_default()
    }

    pub fn state(&self) -> ListState {
        self.state
            .read()
            .map(|s| s.clone())
            .unwrap_or_else(|_| ListState::with_page_size(self.options.initial_page_size))
    }

    /// Error of the most recent failed list request, cleared by the next
    /// successful one.
    pub fn last_error(&self) -> Option<ApiError> {
        self.list_error.read().ok().and_then(|e| e.clone())
    }

    /// Error of the most recent create/update/delete, if that call failed.
    /// A later successful or redirected mutation clears it.
    pub fn mutation_error(&self) -> Option<ApiError> {
        self.mutation_error.read().ok().and_then(|e| e.clone())
    }

    // =========================================================================
    // Loading flags
    // =========================================================================

    pub fn is_list_in_flight(&self) -> bool {
        self.list_envelope.is_in_flight()
    }

    pub fn is_creating(&self) -> bool {
        self.create_envelope.is_in_flight()
    }

    pub fn is_updating(&self) -> bool {
        self.update_envelope.is_in_flight()
    }

    pub fn is_deleting(&self) -> bool {
        self.delete_envelope.is_in_flight()
    }

    /// A first load is running: list in flight, nothing to show yet, no
    /// error. Distinguishes "loading" from "genuinely empty".
    pub fn is_initial_loading(&self) -> bool {
        self.is_list_in_flight() && self.items_empty() && self.last_error().is_none()
    }

    /// Whether the inline error panel should replace the list. An error after
    /// the list was populated keeps showing the stale items instead.
    pub fn should_show_error_panel(&self) -> bool {
        self.last_error().is_some() && self.items_empty()
    }

    fn items_empty(&self) -> bool {
        self.items.read().map(|i| i.is_empty()).unwrap_or(true)
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Mark the owner as gone. Responses arriving afterwards are dropped and
    /// no further requests are issued by state changes.
    pub fn detach(&self) {
        self.attached.store(false, Ordering::SeqCst);
        debug!(subsystem = "controller", entity = self.endpoints.name(), "Detached");
    }

    pub fn is_attached(&self) -> bool {
        self.attached.load(Ordering::SeqCst)
    }

    // =========================================================================
    // Fetching
    // =========================================================================

    /// Fetch the page described by the current state.
    ///
    /// Returns whether the response was applied. On failure the current items
    /// are kept and a generic list error is stored.
    pub async fn list(&self) -> bool {
        if !self.is_attached() {
            return false;
        }

        let params = self.state().params();
        let seq = self.list_seq.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(
            subsystem = "controller",
            entity = self.endpoints.name(),
            seq,
            page = params.page,
            page_size = params.page_size,
            search = ?params.search_term,
            "Fetching page"
        );

        let result = self
            .list_envelope
            .execute(|| self.endpoints.list(&params), &NotifyOptions::silent())
            .await;

        if !self.is_attached() {
            debug!(subsystem = "controller", seq, "Dropping list response after detach");
            return false;
        }

        if self.options.discard_stale_responses && seq != self.list_seq.load(Ordering::SeqCst) {
            debug!(subsystem = "controller", seq, "Discarding stale list response");
            return false;
        }

        match result {
            Some(page) => {
                if let Ok(mut state) = self.state.write() {
                    state.apply_response(&page);
                }
                let items = page.items.unwrap_or_default();
                debug!(
                    subsystem = "controller",
                    entity = self.endpoints.name(),
                    seq,
                    item_count = items.len(),
                    "Page loaded"
                );
                if let Ok(mut slot) = self.items.write() {
                    *slot = items;
                }
                self.set_list_error(None);
                true
            }
            None => {
                // A redirect stores no envelope error and leaves ours alone
                if let Some(cause) = self.list_envelope.last_error() {
                    self.set_list_error(Some(ApiError::new(
                        self.messages.list_error.clone(),
                        cause.status_code,
                    )));
                }
                false
            }
        }
    }

    /// Re-run the list request with the current state.
    pub async fn refetch(&self) -> bool {
        self.list().await
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Create an entity; on success the list is re-fetched before the
    /// created entity is returned.
    pub async fn create(&self, body: &E::Create) -> Option<E::Item> {
        let created = self
            .create_envelope
            .execute(
                || self.endpoints.create(body),
                &self.options.mutation_notify,
            )
            .await;
        self.record_mutation(&self.create_envelope);
        let created = created.flatten()?;
        self.refetch().await;
        Some(created)
    }

    /// Update the entity with `id`; on success the list is re-fetched.
    pub async fn update(&self, id: &str, body: &E::Update) -> Option<E::Item> {
        let updated = self
            .update_envelope
            .execute(
                || self.endpoints.update(id, body),
                &self.options.mutation_notify,
            )
            .await;
        self.record_mutation(&self.update_envelope);
        let updated = updated.flatten()?;
        self.refetch().await;
        Some(updated)
    }

    /// Delete the entity with `id`. Any non-sentinel result is a success,
    /// including a response without a body.
    pub async fn delete(&self, id: &str) -> bool {
        let deleted = self
            .delete_envelope
            .execute(|| self.endpoints.delete(id), &self.options.mutation_notify)
            .await;
        self.record_mutation(&self.delete_envelope);
        if deleted.is_none() {
            return false;
        }
        self.refetch().await;
        true
    }

    // =========================================================================
    // Paging and search
    // =========================================================================

    /// Jump to page `n`, clamped to `[1, max(total_pages, 1)]`.
    pub async fn go_to_page(&self, n: i64) {
        let changed = self.update_state(|state| {
            let page = clamp_page(n, state.total_pages);
            let changed = page != state.page;
            state.page = page;
            changed
        });
        if changed {
            self.list().await;
        }
    }

    /// Advance one page; a no-op on the last known page.
    pub async fn next_page(&self) {
        let changed = self.update_state(|state| {
            let page = clamp_page(i64::from(state.page) + 1, state.total_pages);
            let changed = page != state.page;
            state.page = page;
            changed
        });
        if changed {
            self.list().await;
        }
    }

    /// Go back one page; a no-op on the first page.
    pub async fn previous_page(&self) {
        let changed = self.update_state(|state| {
            let page = clamp_page(i64::from(state.page) - 1, state.total_pages);
            let changed = page != state.page;
            state.page = page;
            changed
        });
        if changed {
            self.list().await;
        }
    }

    /// Change the page size and return to the first page.
    pub async fn set_page_size(&self, page_size: u32) {
        let page_size = page_size.max(1);
        let changed = self.update_state(|state| {
            let changed = state.page_size != page_size || state.page != defaults::FIRST_PAGE;
            state.page_size = page_size;
            state.page = defaults::FIRST_PAGE;
            changed
        });
        if changed {
            self.list().await;
        }
    }

    /// Change the search filter and return to the first page. A blank term
    /// clears the filter.
    pub async fn set_search_term(&self, term: &str) {
        let term = normalize_search_term(Some(term));
        let changed = self.update_state(|state| {
            let changed = state.search_term != term || state.page != defaults::FIRST_PAGE;
            state.search_term = term;
            state.page = defaults::FIRST_PAGE;
            changed
        });
        if changed {
            self.list().await;
        }
    }

    /// Apply `f` to the state; returns whether the state changed.
    fn update_state(&self, f: impl FnOnce(&mut ListState) -> bool) -> bool {
        match self.state.write() {
            Ok(mut state) => {
                let changed = f(&mut state);
                if changed {
                    debug!(
                        subsystem = "controller",
                        entity = self.endpoints.name(),
                        page = state.page,
                        page_size = state.page_size,
                        search = ?state.search_term,
                        "List state changed"
                    );
                }
                changed && self.is_attached()
            }
            Err(_) => false,
        }
    }

    /// Mirror the outcome of the mutation that just finished.
    fn record_mutation(&self, envelope: &RequestEnvelope) {
        if let Ok(mut slot) = self.mutation_error.write() {
            *slot = envelope.last_error();
        }
    }

    fn set_list_error(&self, error: Option<ApiError>) {
        if let Ok(mut slot) = self.list_error.write() {
            *slot = error;
        }
    }
}
