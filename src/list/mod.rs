//! Server-paginated list controller.
//!
//! Every list screen is a [`ListScreen`] configuration (columns, filters,
//! search window) driven by one generic [`ListController`].

pub mod controller;
pub mod coordinator;
pub mod debounce;
pub mod filter;
pub mod pagination;
pub mod query;
pub mod table;
pub mod toast;

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::screens::Resource;

pub use controller::{ListController, ListEvent, LoadingIndicator};
pub use coordinator::{FetchCoordinator, FetchGuard, FetchOutcome, ListEndpoint, PageResult};
pub use debounce::{DEFAULT_SEARCH_DEBOUNCE, DebouncedInput};
pub use filter::{FilterDef, FilterKind};
pub use pagination::{PageAction, PageItem, PageNav};
pub use query::{FilterValue, ListParams, PageSize, QueryState, SortOrder, SortState};
pub use table::{Cell, Column};
pub use toast::{Toast, ToastLevel};

/// Static configuration of one list screen.
pub trait ListScreen: Send + Sync + 'static {
    type Row: DeserializeOwned + Serialize + Send + Sync + 'static;

    const RESOURCE: Resource;

    fn columns() -> Vec<Column<Self::Row>>;

    fn filters() -> &'static [FilterDef] {
        &[]
    }

    fn search_debounce() -> Duration {
        DEFAULT_SEARCH_DEBOUNCE
    }

    /// Fill client-side derived fields. Runs once per row per fetch.
    fn annotate(_row: &mut Self::Row) {}
}
