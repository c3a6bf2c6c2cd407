//! The list controller: query state, fetch coordination and display state
//! for one screen instance.

use std::marker::PhantomData;
use std::sync::Arc;

use crate::error::{HotelDeskError, Result};
use crate::list::coordinator::{FetchCoordinator, FetchOutcome, ListEndpoint, PageResult};
use crate::list::filter::find_filter;
use crate::list::pagination::{PageAction, PageNav, render_pagination};
use crate::list::query::{FilterValue, PageSize, QueryState, SortState};
use crate::list::table::{Column, find_column, render_table};
use crate::list::toast::Toast;
use crate::list::ListScreen;

/// Result of reconciling one settled fetch.
#[derive(Debug)]
pub enum ListEvent {
    /// New records are displayed.
    Updated,
    /// The fetch failed; prior records stay displayed.
    Failed { toast: Toast, error: HotelDeskError },
    /// The server rejected the session (401).
    SessionExpired(Toast),
    /// A superseded response was dropped.
    Discarded,
}

/// Which loading indicator to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingIndicator {
    Hidden,
    /// Nothing to show yet: first-load placeholder in place of the table.
    Skeleton,
    /// Re-fetching with records on screen: small line, table stays.
    Inline,
}

/// Controller for one mounted list screen.
pub struct ListController<S: ListScreen, E: ListEndpoint<S::Row>> {
    endpoint: Arc<E>,
    columns: Vec<Column<S::Row>>,
    query: QueryState,
    result: PageResult<S::Row>,
    coordinator: FetchCoordinator<S::Row>,
    _screen: PhantomData<fn() -> S>,
}

impl<S: ListScreen, E: ListEndpoint<S::Row>> ListController<S, E> {
    /// Mount the screen and issue the initial fetch.
    pub fn mount(endpoint: Arc<E>, page_size: PageSize) -> Self {
        Self::mount_with(endpoint, QueryState::new(page_size))
    }

    /// Mount with a prepared query (e.g. from command-line flags).
    pub fn mount_with(endpoint: Arc<E>, query: QueryState) -> Self {
        let mut controller = Self {
            endpoint,
            columns: S::columns(),
            query,
            result: PageResult::default(),
            coordinator: FetchCoordinator::new(),
            _screen: PhantomData,
        };
        controller.request_fetch();
        controller
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn result(&self) -> &PageResult<S::Row> {
        &self.result
    }

    pub fn records(&self) -> &[S::Row] {
        &self.result.records
    }

    pub fn columns(&self) -> &[Column<S::Row>] {
        &self.columns
    }

    pub fn nav(&self) -> PageNav {
        PageNav::new(self.query.page_index(), self.result.total_pages)
    }

    pub fn is_fetching(&self) -> bool {
        self.coordinator.is_fetching()
    }

    pub fn loading_indicator(&self) -> LoadingIndicator {
        match (self.is_fetching(), self.result.records.is_empty()) {
            (false, _) => LoadingIndicator::Hidden,
            (true, true) => LoadingIndicator::Skeleton,
            (true, false) => LoadingIndicator::Inline,
        }
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        if self.query.set_search_term(term) {
            self.request_fetch();
        }
    }

    /// Set a filter from raw input; empty input unsets it.
    pub fn set_filter(&mut self, name: &str, raw: &str) -> Result<()> {
        let (name, value) = resolve_filter::<S>(name, raw)?;
        let changed = match value {
            Some(value) => self.query.set_filter(name, value),
            None => self.query.clear_filter(name),
        };
        if changed {
            self.request_fetch();
        }
        Ok(())
    }

    pub fn clear_all(&mut self) {
        if self.query.clear_all() {
            self.request_fetch();
        }
    }

    pub fn set_page_size(&mut self, page_size: PageSize) {
        if self.query.set_page_size(page_size) {
            self.request_fetch();
        }
    }

    /// Apply a pagination action. Returns whether the page changed.
    pub fn navigate(&mut self, action: PageAction) -> bool {
        let Some(target) = self.nav().target(action) else {
            return false;
        };
        self.query.set_page_index(target);
        self.request_fetch();
        true
    }

    /// Toggle the server-side sort on a column.
    pub fn toggle_sort(&mut self, column: &str) -> Result<()> {
        let id = self.sortable_column(column)?;
        let next = SortState::toggled(self.query.sort(), id);
        if self.query.set_sort(Some(next)) {
            self.request_fetch();
        }
        Ok(())
    }

    /// Replace the sort outright (`None` clears it).
    pub fn set_sort(&mut self, sort: Option<SortState>) -> Result<()> {
        let sort = match sort {
            Some(s) => Some(SortState::new(self.sortable_column(&s.column)?, s.order)),
            None => None,
        };
        if self.query.set_sort(sort) {
            self.request_fetch();
        }
        Ok(())
    }

    fn sortable_column(&self, column: &str) -> Result<&'static str> {
        resolve_sort_column::<S>(&self.columns, column)
    }

    /// Re-fetch the current page without changing the query.
    pub fn refresh(&mut self) {
        self.request_fetch();
    }

    fn request_fetch(&mut self) {
        self.coordinator.request(&self.endpoint, self.query.to_params());
    }

    /// Wait for the in-flight fetch and reconcile it. `None` when idle.
    ///
    /// Cancel-safe: usable as a `tokio::select!` branch.
    pub async fn next_event(&mut self) -> Option<ListEvent> {
        let outcome = self.coordinator.next_outcome().await?;
        let mut refetch = self.coordinator.take_pending();

        let event = match outcome {
            FetchOutcome::Succeeded { seq, mut page } => {
                for row in &mut page.records {
                    S::annotate(row);
                }
                tracing::debug!(
                    seq,
                    resource = %S::RESOURCE,
                    records = page.records.len(),
                    total = page.total,
                    "applying list page"
                );
                self.result = page;
                refetch |= self.clamp_page_index();
                ListEvent::Updated
            }
            FetchOutcome::Failed { seq, error } => {
                tracing::warn!(seq, resource = %S::RESOURCE, error = %error, "list fetch failed");
                let toast = Toast::error(error.user_message(&S::RESOURCE.load_failed_message()));
                if matches!(error, HotelDeskError::SessionExpired) {
                    self.unmount();
                    return Some(ListEvent::SessionExpired(toast));
                }
                ListEvent::Failed { toast, error }
            }
            FetchOutcome::Discarded { .. } => ListEvent::Discarded,
        };

        if refetch {
            self.request_fetch();
        }
        Some(event)
    }

    /// Keep the page index inside the latest result. Returns whether it moved.
    fn clamp_page_index(&mut self) -> bool {
        let clamped = self.nav().clamp(self.query.page_index());
        self.query.set_page_index(clamped)
    }

    /// Drive fetches until the controller is idle, collecting the events.
    pub async fn settle(&mut self) -> Vec<ListEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.next_event().await {
            events.push(event);
        }
        events
    }

    /// Unmount: abort in-flight work and ignore anything that arrives later.
    pub fn unmount(&mut self) {
        self.coordinator.unmount();
    }

    pub fn is_mounted(&self) -> bool {
        self.coordinator.is_mounted()
    }

    /// Render table, status line and pagination control.
    pub fn render(&self, color: bool) -> String {
        let resource = S::RESOURCE;
        let mut out = String::new();

        if self.loading_indicator() == LoadingIndicator::Skeleton {
            out.push_str(&format!("Loading {}...\n", resource.noun_plural()));
            return out;
        }

        if self.result.records.is_empty() {
            if self.query.is_filtered() {
                out.push_str(&format!(
                    "No {} match the current search and filters.\n",
                    resource.noun_plural()
                ));
            } else {
                out.push_str(&format!("No {} found.\n", resource.noun_plural()));
            }
        } else {
            out.push_str(&render_table(
                &self.columns,
                &self.result.records,
                self.query.sort(),
                color,
            ));
            out.push('\n');
        }

        let nav = self.nav();
        if nav.total_pages > 0 {
            out.push_str(&format!(
                "Page {} of {} · {} {}\n",
                nav.page_index + 1,
                nav.total_pages,
                self.result.total,
                resource.noun_plural()
            ));
        }
        if let Some(pagination) = render_pagination(&nav, color) {
            out.push_str(&pagination);
            out.push('\n');
        }
        if self.loading_indicator() == LoadingIndicator::Inline {
            out.push_str("Loading...\n");
        }
        out
    }
}

/// Validate a filter assignment against the screen's filter definitions.
/// Returns the canonical filter name and the parsed value (`None` unsets).
pub fn resolve_filter<S: ListScreen>(
    name: &str,
    raw: &str,
) -> Result<(&'static str, Option<FilterValue>)> {
    let def = find_filter(S::filters(), name).ok_or_else(|| HotelDeskError::UnknownFilter {
        resource: S::RESOURCE.to_string(),
        filter: name.to_string(),
    })?;
    Ok((def.name, def.parse(raw)?))
}

/// Resolve a column to its sort key. Unknown and unsortable columns are rejected.
pub fn resolve_sort_column<S: ListScreen>(
    columns: &[Column<S::Row>],
    column: &str,
) -> Result<&'static str> {
    find_column(columns, column)
        .filter(|c| c.sortable)
        .map(|c| c.id)
        .ok_or_else(|| HotelDeskError::NotSortable {
            resource: S::RESOURCE.to_string(),
            column: column.to_string(),
        })
}
