//! Generic paginated, sortable, filterable listing table.
//!
//! The table owns `{page, page_size, search, status_filter, sort_column,
//! sort_direction, selected_rows}`. Every effective change produces exactly
//! one fetch ticket; only the response for the newest ticket is applied.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use dealership_api::types::{Entity, EntityId, ListResult, Pagination};
use dealership_api::{ListQuery, Query, SortDirection};
use serde_json::Value;
use tokio::sync::watch;

use crate::columns::{visible_actions, Column, RowAction};
use crate::config::{DEFAULT_PAGE_SIZE, DEFAULT_SEARCH_DEBOUNCE_MS};
use crate::import::ImportConfig;
use crate::service::RemoteService;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Loaded,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
    pub page: i64,
    pub page_size: i64,
    pub search: String,
    pub status_filter: Option<String>,
    pub sort_column: Option<String>,
    pub sort_direction: SortDirection,
    pub selected_rows: BTreeSet<EntityId>,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            search: String::new(),
            status_filter: None,
            sort_column: None,
            sort_direction: SortDirection::Asc,
            selected_rows: BTreeSet::new(),
        }
    }
}

impl TableState {
    pub fn to_query(&self) -> ListQuery {
        let mut query = ListQuery::default()
            .with_page(self.page)
            .with_limit(self.page_size)
            .with_sort_direction(self.sort_direction);
        if !self.search.trim().is_empty() {
            query = query.with_search(self.search.trim());
        }
        if let Some(status) = &self.status_filter {
            query = query.with_status(status);
        }
        if let Some(column) = &self.sort_column {
            query = query.with_sort_by(column);
        }
        query
    }
}

/// A user-driven change to the table's filter state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateChange {
    Page(i64),
    PageSize(i64),
    Search(String),
    Status(Option<String>),
    /// Click on a column header, by accessor.
    Sort(String),
}

/// Handle for one in-flight list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    token: u64,
    pub query: ListQuery,
}

/// Asks the user to approve a destructive action.
pub trait Confirm: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Approves everything. Used for `--yes` style invocations.
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The user said no. No request was sent.
    Declined,
    NothingSelected,
    Deleted,
    Failed,
}

pub struct Table<E: Entity> {
    service: Arc<dyn RemoteService<E>>,
    columns: Vec<Column>,
    actions: Vec<RowAction>,
    status_options: Vec<String>,
    import: Option<ImportConfig>,
    state: TableState,
    phase: Phase,
    records: Vec<E>,
    pagination: Pagination,
    latest_token: u64,
    search_debounce: Duration,
}

impl<E: Entity> Table<E> {
    pub fn new(service: Arc<dyn RemoteService<E>>, columns: Vec<Column>) -> Self {
        Self {
            service,
            columns,
            actions: Vec::new(),
            status_options: Vec::new(),
            import: None,
            state: TableState::default(),
            phase: Phase::Idle,
            records: Vec::new(),
            pagination: Pagination::default(),
            latest_token: 0,
            search_debounce: Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS),
        }
    }

    pub fn with_actions(mut self, actions: Vec<RowAction>) -> Self {
        self.actions = actions;
        self
    }

    /// Restricts the status filter to these values.
    pub fn with_status_options(mut self, options: &[&str]) -> Self {
        self.status_options = options.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_import(mut self, import: ImportConfig) -> Self {
        self.import = Some(import);
        self
    }

    pub fn with_page_size(mut self, page_size: i64) -> Self {
        self.state.page_size = page_size.max(1);
        self
    }

    /// Quiet period [`Self::drive_search`] waits for before fetching.
    pub fn with_search_debounce(mut self, window: Duration) -> Self {
        self.search_debounce = window;
        self
    }

    pub fn search_debounce(&self) -> Duration {
        self.search_debounce
    }

    pub fn service(&self) -> Arc<dyn RemoteService<E>> {
        Arc::clone(&self.service)
    }

    pub fn state(&self) -> &TableState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn records(&self) -> &[E] {
        &self.records
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn import_config(&self) -> Option<&ImportConfig> {
        self.import.as_ref()
    }

    pub fn import_config_mut(&mut self) -> Option<&mut ImportConfig> {
        self.import.as_mut()
    }

    /// Starts a fetch for the current state. Any older ticket becomes stale.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.latest_token += 1;
        self.phase = Phase::Loading;
        FetchTicket {
            token: self.latest_token,
            query: self.state.to_query(),
        }
    }

    /// Applies a fetch result. Returns `false` when the ticket was superseded.
    ///
    /// `None` means the request failed; the table then shows an empty page
    /// rather than keeping stale rows.
    pub fn finish_fetch(&mut self, ticket: FetchTicket, result: Option<ListResult<E>>) -> bool {
        if ticket.token != self.latest_token {
            tracing::debug!(
                "discarding stale {} page (ticket {} < {})",
                E::NAME,
                ticket.token,
                self.latest_token
            );
            return false;
        }
        let (phase, page) = match result {
            Some(page) => (Phase::Loaded, page),
            None => (Phase::Error, ListResult::empty()),
        };
        self.records = page.data;
        self.pagination = page.pagination;
        self.phase = phase;
        self.state.selected_rows.clear();
        true
    }

    /// Fetches through the bound service and applies the result.
    pub async fn run(&mut self, ticket: FetchTicket) -> bool {
        let result = self.service.fetch(&ticket.query).await;
        self.finish_fetch(ticket, result)
    }

    /// Loads (or reloads) the current page.
    pub async fn refresh(&mut self) {
        let ticket = self.begin_fetch();
        self.run(ticket).await;
    }

    /// Applies a state change, returning a ticket when a fetch is needed.
    pub fn apply(&mut self, change: StateChange) -> Option<FetchTicket> {
        let state = &mut self.state;
        match change {
            StateChange::Page(page) => {
                let page = page.max(1);
                if page == state.page {
                    return None;
                }
                state.page = page;
            }
            StateChange::PageSize(size) => {
                let size = size.max(1);
                if size == state.page_size {
                    return None;
                }
                state.page_size = size;
                state.page = 1;
            }
            StateChange::Search(text) => {
                if text.trim() == state.search.trim() {
                    return None;
                }
                state.search = text;
                state.page = 1;
            }
            StateChange::Status(status) => {
                if let Some(value) = &status {
                    if !self.status_options.is_empty() && !self.status_options.contains(value) {
                        tracing::warn!("ignoring unknown status filter '{}'", value);
                        return None;
                    }
                }
                if status == state.status_filter {
                    return None;
                }
                state.status_filter = status;
                state.page = 1;
            }
            StateChange::Sort(accessor) => {
                let sortable = self
                    .columns
                    .iter()
                    .any(|c| c.accessor == accessor && c.sortable);
                if !sortable {
                    return None;
                }
                if state.sort_column.as_deref() == Some(accessor.as_str()) {
                    state.sort_direction = state.sort_direction.flipped();
                } else {
                    state.sort_column = Some(accessor);
                    state.sort_direction = SortDirection::Asc;
                }
                state.page = 1;
            }
        }
        Some(self.begin_fetch())
    }

    /// Applies a change and runs the resulting fetch, if any.
    pub async fn change(&mut self, change: StateChange) -> bool {
        match self.apply(change) {
            Some(ticket) => self.run(ticket).await,
            None => false,
        }
    }

    /// Feeds search input through the debounce window; only text that stayed
    /// unchanged for the whole window triggers a fetch. Returns when the
    /// sender is dropped.
    pub async fn drive_search(&mut self, mut input: watch::Receiver<String>) {
        let window = self.search_debounce;
        loop {
            if input.changed().await.is_err() {
                return;
            }
            let mut closed = false;
            loop {
                match tokio::time::timeout(window, input.changed()).await {
                    Ok(Ok(())) => continue,
                    Ok(Err(_)) => {
                        closed = true;
                        break;
                    }
                    Err(_) => break,
                }
            }
            let text = input.borrow_and_update().clone();
            self.change(StateChange::Search(text)).await;
            if closed {
                return;
            }
        }
    }

    pub fn selected(&self) -> Vec<EntityId> {
        self.state.selected_rows.iter().copied().collect()
    }

    /// Toggles selection of a row on the current page. Unknown ids are ignored.
    pub fn toggle_row(&mut self, id: EntityId) -> bool {
        if !self.records.iter().any(|r| r.id() == id) {
            return false;
        }
        if !self.state.selected_rows.remove(&id) {
            self.state.selected_rows.insert(id);
        }
        true
    }

    pub fn select_all(&mut self) {
        self.state.selected_rows = self.records.iter().map(Entity::id).collect();
    }

    pub fn clear_selection(&mut self) {
        self.state.selected_rows.clear();
    }

    /// Deletes one record after confirmation, then reloads.
    pub async fn delete_row(&mut self, id: EntityId, confirm: &dyn Confirm) -> DeleteOutcome {
        let prompt = format!("Are you sure you want to delete this {}?", E::NAME.to_lowercase());
        if !confirm.confirm(&prompt) {
            return DeleteOutcome::Declined;
        }
        let deleted = self.service.delete(id).await;
        self.refresh().await;
        if deleted {
            DeleteOutcome::Deleted
        } else {
            DeleteOutcome::Failed
        }
    }

    /// Deletes all selected records in one request after confirmation, then reloads.
    pub async fn delete_selected(&mut self, confirm: &dyn Confirm) -> DeleteOutcome {
        let ids = self.selected();
        if ids.is_empty() {
            return DeleteOutcome::NothingSelected;
        }
        let prompt = format!("Are you sure you want to delete {} selected records?", ids.len());
        if !confirm.confirm(&prompt) {
            return DeleteOutcome::Declined;
        }
        let deleted = self.service.bulk_delete(&ids).await;
        self.refresh().await;
        if deleted {
            DeleteOutcome::Deleted
        } else {
            DeleteOutcome::Failed
        }
    }

    /// The current page rendered through the columns.
    pub fn rows(&self) -> Vec<Vec<String>> {
        self.records
            .iter()
            .map(|record| {
                let json = serde_json::to_value(record).unwrap_or(Value::Null);
                self.columns.iter().map(|c| c.cell(&json)).collect()
            })
            .collect()
    }

    /// Actions offered for one record.
    pub fn actions_for(&self, record: &E) -> Vec<&RowAction> {
        let json = serde_json::to_value(record).unwrap_or(Value::Null);
        visible_actions(&self.actions, &json)
    }

    /// e.g. `Page 2/3 (23 total)`.
    pub fn summary(&self) -> String {
        format!(
            "Page {}/{} ({} total)",
            self.pagination.current_page, self.pagination.total_pages, self.pagination.total_items
        )
    }
}
