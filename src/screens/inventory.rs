use serde::{Deserialize, Serialize};

use crate::display::{format_date, format_optional, status_badge};
use crate::list::{Column, FilterDef, ListScreen};
use crate::screens::{Resource, lenient_number, null_as_default};

/// A stock movement recorded against an inventory item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InventoryRecord {
    #[serde(alias = "_id", deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub item_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub action: String,
    #[serde(deserialize_with = "lenient_number")]
    pub quantity: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub unit: String,
    pub performed_by: Option<String>,
    pub note: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(skip)]
    pub date_display: String,
}

pub struct InventoryScreen;

const FILTERS: &[FilterDef] = &[
    FilterDef::choice("action", "Action", &["restock", "usage", "adjustment", "waste"]),
    FilterDef::date("startDate", "From"),
    FilterDef::date("endDate", "Until"),
];

impl ListScreen for InventoryScreen {
    type Row = InventoryRecord;
    const RESOURCE: Resource = Resource::Inventory;

    fn columns() -> Vec<Column<InventoryRecord>> {
        vec![
            Column::new("itemName", "Item", |r: &InventoryRecord| r.item_name.clone()).sortable(),
            Column::rendered("action", "Action", |r: &InventoryRecord, color| {
                status_badge(&r.action, color)
            }),
            Column::new("quantity", "Qty", |r: &InventoryRecord| {
                format!("{} {}", r.quantity, r.unit).trim_end().to_string()
            })
            .sortable(),
            Column::new("performedBy", "By", |r: &InventoryRecord| {
                format_optional(r.performed_by.as_deref())
            }),
            Column::new("note", "Note", |r: &InventoryRecord| {
                format_optional(r.note.as_deref())
            }),
            Column::new("createdAt", "Date", |r: &InventoryRecord| r.date_display.clone())
                .sortable(),
        ]
    }

    fn filters() -> &'static [FilterDef] {
        FILTERS
    }

    fn annotate(row: &mut InventoryRecord) {
        row.date_display = format_date(&row.created_at);
    }
}
