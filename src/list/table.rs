//! Column-driven table rendering.
//!
//! Sorting is executed by the server. The renderer only shows which column
//! is sorted and in which direction; rows are printed in the order received.

use owo_colors::OwoColorize;
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::list::query::{SortOrder, SortState};

/// How a column produces its cell text.
pub enum Cell<R> {
    /// Plain value read from the row.
    Accessor(fn(&R) -> String),
    /// Custom rendering; receives whether color output is enabled.
    Render(Box<dyn Fn(&R, bool) -> String + Send + Sync>),
}

/// One column of a list table.
pub struct Column<R> {
    /// Key sent as `sortBy` when this column is sorted.
    pub id: &'static str,
    pub header: &'static str,
    pub cell: Cell<R>,
    pub sortable: bool,
}

impl<R> Column<R> {
    pub fn new(id: &'static str, header: &'static str, accessor: fn(&R) -> String) -> Self {
        Self {
            id,
            header,
            cell: Cell::Accessor(accessor),
            sortable: false,
        }
    }

    pub fn rendered(
        id: &'static str,
        header: &'static str,
        render: impl Fn(&R, bool) -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            id,
            header,
            cell: Cell::Render(Box::new(render)),
            sortable: false,
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn text(&self, row: &R, color: bool) -> String {
        match &self.cell {
            Cell::Accessor(accessor) => accessor(row),
            Cell::Render(render) => render(row, color),
        }
    }

    /// Header with a sort arrow when this column is the active sort.
    pub fn header_label(&self, sort: Option<&SortState>) -> String {
        match sort {
            Some(s) if s.column == self.id => {
                let arrow = match s.order {
                    SortOrder::Asc => "▲",
                    SortOrder::Desc => "▼",
                };
                format!("{} {}", self.header, arrow)
            }
            _ => self.header.to_string(),
        }
    }
}

/// Find a column by id, ignoring case.
pub fn find_column<'a, R>(columns: &'a [Column<R>], id: &str) -> Option<&'a Column<R>> {
    columns.iter().find(|c| c.id.eq_ignore_ascii_case(id.trim()))
}

/// Render rows as a table in the order given.
pub fn render_table<R>(
    columns: &[Column<R>],
    rows: &[R],
    sort: Option<&SortState>,
    color: bool,
) -> String {
    let mut builder = Builder::default();
    builder.push_record(columns.iter().map(|c| {
        let label = c.header_label(sort);
        if color { label.bold().to_string() } else { label }
    }));
    for row in rows {
        builder.push_record(columns.iter().map(|c| c.text(row, color)));
    }

    let mut table = builder.build();
    table.with(Style::psql());
    table.to_string()
}
