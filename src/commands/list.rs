//! `list`: fetch and print one page of a resource.

use std::sync::Arc;

use serde_json::json;

use super::{AppContext, CommandOutput, color_enabled};
use crate::api::ResourceEndpoint;
use crate::error::{HotelDeskError, Result};
use crate::list::controller::{resolve_filter, resolve_sort_column};
use crate::list::filter::split_assignment;
use crate::list::{ListController, ListEvent, ListScreen, PageSize, QueryState, SortState};
use crate::screens::Resource;
use crate::with_screen;

/// Query flags of `hoteldesk list`.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// 1-based page number.
    pub page: usize,
    pub limit: Option<PageSize>,
    pub search: Option<String>,
    /// `key=value` assignments.
    pub filters: Vec<String>,
    /// `column` or `column:asc|desc`.
    pub sort: Option<String>,
    pub json: bool,
}

/// Build the initial query for screen `S` from command-line flags.
pub(crate) fn query_from_options<S: ListScreen>(
    options: &ListOptions,
    default_page_size: PageSize,
) -> Result<QueryState> {
    let mut query = QueryState::new(options.limit.unwrap_or(default_page_size));

    if let Some(search) = &options.search {
        query.set_search_term(search.trim());
    }
    for assignment in &options.filters {
        let (name, raw) = split_assignment(assignment)?;
        match resolve_filter::<S>(name, raw)? {
            (name, Some(value)) => query.set_filter(name, value),
            (name, None) => query.clear_filter(name),
        };
    }
    if let Some(sort) = &options.sort {
        let sort = SortState::parse(sort)?;
        let column = resolve_sort_column::<S>(&S::columns(), &sort.column)?;
        query.set_sort(Some(SortState::new(column, sort.order)));
    }

    if options.page == 0 {
        return Err(HotelDeskError::InvalidInput(
            "page numbers start at 1".to_string(),
        ));
    }
    query.set_page_index(options.page - 1);
    Ok(query)
}

pub async fn cmd_list(resource: Resource, options: ListOptions) -> Result<()> {
    let ctx = AppContext::load()?;
    with_screen!(resource, S => run_list::<S>(&ctx, &options).await)
}

async fn run_list<S: ListScreen>(ctx: &AppContext, options: &ListOptions) -> Result<()> {
    let query = query_from_options::<S>(options, ctx.config.list.page_size)?;
    let endpoint = Arc::new(ResourceEndpoint::<S::Row>::new(ctx.client()?, S::RESOURCE));
    let mut controller = ListController::<S, _>::mount_with(endpoint, query);

    for event in controller.settle().await {
        match event {
            ListEvent::Failed { error, .. } => return Err(error),
            ListEvent::SessionExpired(_) => return Err(HotelDeskError::SessionExpired),
            ListEvent::Updated | ListEvent::Discarded => {}
        }
    }

    let page = controller.result();
    let records = serde_json::to_value(&page.records)?;
    let json_output = json!({
        "resource": S::RESOURCE.to_string(),
        "page": controller.query().page_index() + 1,
        "limit": controller.query().page_size().get(),
        "total": page.total,
        "totalPages": page.total_pages,
        "records": records,
    });

    CommandOutput::new(json_output)
        .with_text(controller.render(color_enabled()).trim_end())
        .print(options.json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::{FilterValue, SortOrder};
    use crate::screens::bookings::BookingsScreen;

    fn options() -> ListOptions {
        ListOptions {
            page: 1,
            ..Default::default()
        }
    }

    #[test]
    fn test_query_from_flags() {
        let opts = ListOptions {
            page: 3,
            limit: Some(PageSize::Twenty),
            search: Some(" ana ".to_string()),
            filters: vec!["Status=Confirmed".to_string(), "startDate=2024-03-01".to_string()],
            sort: Some("checkin:desc".to_string()),
            json: false,
        };
        let query = query_from_options::<BookingsScreen>(&opts, PageSize::Ten).unwrap();

        assert_eq!(query.page_index(), 2);
        assert_eq!(query.page_size(), PageSize::Twenty);
        assert_eq!(query.search_term(), "ana");
        assert_eq!(
            query.filter("status"),
            Some(&FilterValue::Text("confirmed".to_string()))
        );
        assert_eq!(
            query.sort(),
            Some(&SortState::new("checkIn", SortOrder::Desc))
        );
    }

    #[test]
    fn test_default_page_size_from_config() {
        let query = query_from_options::<BookingsScreen>(&options(), PageSize::Fifty).unwrap();
        assert_eq!(query.page_size(), PageSize::Fifty);
        assert_eq!(query.page_index(), 0);
    }

    #[test]
    fn test_rejects_bad_flags() {
        let unknown = ListOptions {
            filters: vec!["floor=2".to_string()],
            ..options()
        };
        assert!(matches!(
            query_from_options::<BookingsScreen>(&unknown, PageSize::Ten),
            Err(HotelDeskError::UnknownFilter { .. })
        ));

        let unsortable = ListOptions {
            sort: Some("status".to_string()),
            ..options()
        };
        assert!(matches!(
            query_from_options::<BookingsScreen>(&unsortable, PageSize::Ten),
            Err(HotelDeskError::NotSortable { .. })
        ));

        let page_zero = ListOptions {
            page: 0,
            ..options()
        };
        assert!(query_from_options::<BookingsScreen>(&page_zero, PageSize::Ten).is_err());
    }
}
