//! Query state for server-paginated lists.
//!
//! `QueryState` holds everything that determines a list request: page
//! position, page size, search term, named filters and sort. Page position is
//! only meaningful for one particular combination of the other fields, so
//! every setter except [`QueryState::set_page_index`] moves back to the first
//! page.

use std::collections::BTreeMap;
use std::fmt;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::error::{HotelDeskError, Result};

/// Allowed page sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum PageSize {
    Five,
    #[default]
    Ten,
    Twenty,
    Fifty,
    Hundred,
}

impl PageSize {
    pub const ALL: &'static [PageSize] = &[
        PageSize::Five,
        PageSize::Ten,
        PageSize::Twenty,
        PageSize::Fifty,
        PageSize::Hundred,
    ];

    pub fn get(self) -> usize {
        match self {
            PageSize::Five => 5,
            PageSize::Ten => 10,
            PageSize::Twenty => 20,
            PageSize::Fifty => 50,
            PageSize::Hundred => 100,
        }
    }
}

impl TryFrom<usize> for PageSize {
    type Error = HotelDeskError;

    fn try_from(value: usize) -> Result<Self> {
        PageSize::ALL
            .iter()
            .copied()
            .find(|size| size.get() == value)
            .ok_or(HotelDeskError::InvalidPageSize(value))
    }
}

impl From<PageSize> for usize {
    fn from(size: PageSize) -> Self {
        size.get()
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

impl std::str::FromStr for PageSize {
    type Err = HotelDeskError;

    fn from_str(s: &str) -> Result<Self> {
        let value: usize = s
            .trim()
            .parse()
            .map_err(|_| HotelDeskError::InvalidInput(format!("'{s}' is not a page size")))?;
        PageSize::try_from(value)
    }
}

/// Sort direction requested from the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

enum_display_fromstr!(
    SortOrder,
    HotelDeskError::invalid_sort_order,
    {
        Asc => "asc",
        Desc => "desc",
    }
);

/// Active server-side sort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub column: String,
    pub order: SortOrder,
}

impl SortState {
    pub fn new(column: impl Into<String>, order: SortOrder) -> Self {
        Self {
            column: column.into(),
            order,
        }
    }

    /// Next sort after the user toggles `column`.
    ///
    /// The same column flips between ascending and descending; any other
    /// column (or no sort at all) starts ascending.
    pub fn toggled(current: Option<&SortState>, column: &str) -> SortState {
        match current {
            Some(sort) if sort.column == column => SortState::new(
                column,
                match sort.order {
                    SortOrder::Asc => SortOrder::Desc,
                    SortOrder::Desc => SortOrder::Asc,
                },
            ),
            _ => SortState::new(column, SortOrder::Asc),
        }
    }

    /// Parse `column` or `column:asc|desc`.
    pub fn parse(s: &str) -> Result<SortState> {
        match s.split_once(':') {
            Some((column, order)) => Ok(SortState::new(column.trim(), order.parse()?)),
            None => Ok(SortState::new(s.trim(), SortOrder::Asc)),
        }
    }
}

/// A filter value. Empty text counts as unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Text(String),
    Date(Date),
}

impl FilterValue {
    pub fn is_empty(&self) -> bool {
        match self {
            FilterValue::Text(s) => s.trim().is_empty(),
            FilterValue::Date(_) => false,
        }
    }

    /// Wire form of the value, or `None` when unset.
    pub fn as_param(&self) -> Option<String> {
        match self {
            FilterValue::Text(s) if s.trim().is_empty() => None,
            FilterValue::Text(s) => Some(s.trim().to_string()),
            FilterValue::Date(d) => Some(d.strftime("%Y-%m-%d").to_string()),
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_param().unwrap_or_default())
    }
}

/// Client-held parameters that fully determine a list request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryState {
    page_index: usize,
    page_size: PageSize,
    search_term: String,
    filters: BTreeMap<String, FilterValue>,
    sort: Option<SortState>,
}

impl QueryState {
    pub fn new(page_size: PageSize) -> Self {
        Self {
            page_size,
            ..Default::default()
        }
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn filters(&self) -> &BTreeMap<String, FilterValue> {
        &self.filters
    }

    pub fn filter(&self, name: &str) -> Option<&FilterValue> {
        self.filters.get(name)
    }

    pub fn sort(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    /// Whether any search term or filter is active.
    pub fn is_filtered(&self) -> bool {
        !self.search_term.trim().is_empty() || !self.filters.is_empty()
    }

    /// Move to a page. The only setter that keeps the rest of the state.
    pub fn set_page_index(&mut self, page_index: usize) -> bool {
        let changed = self.page_index != page_index;
        self.page_index = page_index;
        changed
    }

    pub fn set_page_size(&mut self, page_size: PageSize) -> bool {
        let changed = self.page_size != page_size;
        self.page_size = page_size;
        self.reset_page() || changed
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) -> bool {
        let term = term.into();
        let changed = self.search_term != term;
        self.search_term = term;
        self.reset_page() || changed
    }

    /// Set a filter. An empty value removes the key.
    pub fn set_filter(&mut self, name: impl Into<String>, value: FilterValue) -> bool {
        let name = name.into();
        if value.is_empty() {
            return self.clear_filter(&name);
        }
        let changed = self.filters.get(&name) != Some(&value);
        self.filters.insert(name, value);
        self.reset_page() || changed
    }

    pub fn clear_filter(&mut self, name: &str) -> bool {
        let changed = self.filters.remove(name).is_some();
        self.reset_page() || changed
    }

    pub fn set_sort(&mut self, sort: Option<SortState>) -> bool {
        let changed = self.sort != sort;
        self.sort = sort;
        self.reset_page() || changed
    }

    /// Reset search and every filter in one update.
    pub fn clear_all(&mut self) -> bool {
        let changed = !self.search_term.is_empty() || !self.filters.is_empty();
        self.search_term.clear();
        self.filters.clear();
        self.reset_page() || changed
    }

    fn reset_page(&mut self) -> bool {
        self.set_page_index(0)
    }

    /// Derive the request parameters for this state.
    pub fn to_params(&self) -> ListParams {
        let search = self.search_term.trim();
        ListParams {
            page: self.page_index + 1,
            limit: self.page_size.get(),
            search: (!search.is_empty()).then(|| search.to_string()),
            filters: self
                .filters
                .iter()
                .filter_map(|(name, value)| value.as_param().map(|v| (name.clone(), v)))
                .collect(),
            sort: self.sort.clone(),
        }
    }
}

/// Request parameters for one list fetch. `page` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListParams {
    pub page: usize,
    pub limit: usize,
    pub search: Option<String>,
    pub filters: BTreeMap<String, String>,
    pub sort: Option<SortState>,
}

impl ListParams {
    /// Query pairs in wire order: page, limit, search, filters, sort.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ];
        if let Some(search) = &self.search {
            pairs.push(("search".to_string(), search.clone()));
        }
        for (name, value) in &self.filters {
            pairs.push((name.clone(), value.clone()));
        }
        if let Some(sort) = &self.sort {
            pairs.push(("sortBy".to_string(), sort.column.clone()));
            pairs.push(("sortOrder".to_string(), sort.order.to_string()));
        }
        pairs
    }
}
