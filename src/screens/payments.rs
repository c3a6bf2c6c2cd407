use serde::{Deserialize, Serialize};

use crate::display::{format_amount, format_date, format_optional, status_badge};
use crate::list::{Column, FilterDef, ListScreen};
use crate::screens::{Resource, lenient_number, null_as_default};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Payment {
    #[serde(alias = "_id", deserialize_with = "null_as_default")]
    pub id: String,
    pub transaction_id: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub guest_name: String,
    #[serde(deserialize_with = "lenient_number")]
    pub amount: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub method: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(skip)]
    pub paid_display: String,
}

pub struct PaymentsScreen;

const FILTERS: &[FilterDef] = &[
    FilterDef::choice("status", "Status", &["pending", "completed", "failed", "refunded"]),
    FilterDef::choice("method", "Method", &["cash", "card", "upi", "bank-transfer"]),
    FilterDef::date("startDate", "From"),
    FilterDef::date("endDate", "Until"),
];

impl ListScreen for PaymentsScreen {
    type Row = Payment;
    const RESOURCE: Resource = Resource::Payments;

    fn columns() -> Vec<Column<Payment>> {
        vec![
            Column::new("transactionId", "Transaction", |p: &Payment| {
                format_optional(p.transaction_id.as_deref())
            }),
            Column::new("guestName", "Guest", |p: &Payment| p.guest_name.clone()).sortable(),
            Column::new("amount", "Amount", |p: &Payment| format_amount(p.amount)).sortable(),
            Column::new("method", "Method", |p: &Payment| p.method.clone()),
            Column::rendered("status", "Status", |p: &Payment, color| {
                status_badge(&p.status, color)
            }),
            Column::new("createdAt", "Date", |p: &Payment| p.paid_display.clone()).sortable(),
        ]
    }

    fn filters() -> &'static [FilterDef] {
        FILTERS
    }

    fn annotate(row: &mut Payment) {
        row.paid_display = format_date(&row.created_at);
    }
}
