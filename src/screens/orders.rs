use serde::{Deserialize, Serialize};

use crate::display::{format_amount, format_date, format_optional, status_badge};
use crate::list::{Column, FilterDef, ListScreen};
use crate::screens::{Resource, lenient_count, lenient_number, lenient_string, null_as_default};

/// One order from the restaurant's order history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Order {
    #[serde(alias = "_id", deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub order_number: String,
    #[serde(deserialize_with = "null_as_default")]
    pub customer_name: String,
    /// Dine-in table, when the order was not room service.
    #[serde(deserialize_with = "lenient_string")]
    pub table_number: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub order_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub items: Vec<OrderLine>,
    #[serde(deserialize_with = "lenient_number")]
    pub total_amount: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(skip)]
    pub placed_display: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderLine {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "lenient_count")]
    pub quantity: u32,
}

pub struct OrdersScreen;

const FILTERS: &[FilterDef] = &[
    FilterDef::choice(
        "status",
        "Status",
        &["pending", "preparing", "served", "completed", "cancelled"],
    ),
    FilterDef::choice("orderType", "Type", &["dine-in", "room-service", "takeaway"]),
    FilterDef::date("startDate", "Placed from"),
    FilterDef::date("endDate", "Placed until"),
];

impl ListScreen for OrdersScreen {
    type Row = Order;
    const RESOURCE: Resource = Resource::Orders;

    fn columns() -> Vec<Column<Order>> {
        vec![
            Column::new("orderNumber", "Order", |o: &Order| o.order_number.clone()).sortable(),
            Column::new("customerName", "Customer", |o: &Order| o.customer_name.clone()),
            Column::new("tableNumber", "Table", |o: &Order| {
                format_optional(o.table_number.as_deref())
            }),
            Column::new("orderType", "Type", |o: &Order| o.order_type.clone()),
            Column::new("items", "Items", |o: &Order| {
                o.items
                    .iter()
                    .fold(0u64, |total, line| total.saturating_add(u64::from(line.quantity)))
                    .to_string()
            }),
            Column::new("totalAmount", "Total", |o: &Order| format_amount(o.total_amount))
                .sortable(),
            Column::rendered("status", "Status", |o: &Order, color| {
                status_badge(&o.status, color)
            }),
            Column::new("createdAt", "Placed", |o: &Order| o.placed_display.clone()).sortable(),
        ]
    }

    fn filters() -> &'static [FilterDef] {
        FILTERS
    }

    fn annotate(row: &mut Order) {
        row.placed_display = format_date(&row.created_at);
    }
}
