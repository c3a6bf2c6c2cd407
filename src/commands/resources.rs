use serde_json::json;
use tabled::builder::Builder;
use tabled::settings::Style;

use super::CommandOutput;
use crate::error::Result;
use crate::list::ListScreen;
use crate::screens::Resource;
use crate::with_screen;

struct ResourceInfo {
    resource: Resource,
    filters: Vec<String>,
    sortable: Vec<&'static str>,
    debounce_ms: u64,
}

fn describe<S: ListScreen>() -> ResourceInfo {
    ResourceInfo {
        resource: S::RESOURCE,
        filters: S::filters()
            .iter()
            .map(|f| format!("{} ({})", f.name, f.describe()))
            .collect(),
        sortable: S::columns()
            .iter()
            .filter(|c| c.sortable)
            .map(|c| c.id)
            .collect(),
        debounce_ms: S::search_debounce().as_millis() as u64,
    }
}

/// List every resource with its path, filters and sortable columns.
pub fn cmd_resources(json: bool) -> Result<()> {
    let infos: Vec<ResourceInfo> = Resource::ALL
        .iter()
        .map(|r| with_screen!(*r, S => describe::<S>()))
        .collect();

    let json_output = json!(
        infos
            .iter()
            .map(|info| json!({
                "resource": info.resource.to_string(),
                "title": info.resource.title(),
                "path": info.resource.path(),
                "filters": info.filters,
                "sortable": info.sortable,
                "search_debounce_ms": info.debounce_ms,
            }))
            .collect::<Vec<_>>()
    );

    let mut builder = Builder::default();
    builder.push_record(["Resource", "Path", "Filters", "Sortable"]);
    for info in &infos {
        builder.push_record([
            info.resource.to_string(),
            format!("/{}", info.resource.path()),
            info.filters.join("\n"),
            info.sortable.join(", "),
        ]);
    }
    let mut table = builder.build();
    table.with(Style::psql());

    CommandOutput::new(json_output)
        .with_text(table.to_string())
        .print(json)
}
