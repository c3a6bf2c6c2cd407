use serde::{Deserialize, Serialize};

use crate::display::{format_amount, format_date, format_optional, status_badge};
use crate::list::{Column, FilterDef, ListScreen};
use crate::screens::{Resource, lenient_number, lenient_string, null_as_default};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Booking {
    #[serde(alias = "_id", deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub guest_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub room_number: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub check_in: String,
    #[serde(deserialize_with = "null_as_default")]
    pub check_out: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "lenient_number")]
    pub total_amount: f64,
    #[serde(skip)]
    pub check_in_display: String,
    #[serde(skip)]
    pub check_out_display: String,
}

pub struct BookingsScreen;

const FILTERS: &[FilterDef] = &[
    FilterDef::choice(
        "status",
        "Status",
        &["pending", "confirmed", "checked-in", "checked-out", "cancelled"],
    ),
    FilterDef::date("startDate", "Check-in from"),
    FilterDef::date("endDate", "Check-in until"),
];

impl ListScreen for BookingsScreen {
    type Row = Booking;
    const RESOURCE: Resource = Resource::Bookings;

    fn columns() -> Vec<Column<Booking>> {
        vec![
            Column::new("guestName", "Guest", |b: &Booking| b.guest_name.clone()).sortable(),
            Column::new("roomNumber", "Room", |b: &Booking| {
                format_optional(b.room_number.as_deref())
            }),
            Column::new("checkIn", "Check-in", |b: &Booking| b.check_in_display.clone()).sortable(),
            Column::new("checkOut", "Check-out", |b: &Booking| b.check_out_display.clone())
                .sortable(),
            Column::rendered("status", "Status", |b: &Booking, color| {
                status_badge(&b.status, color)
            }),
            Column::new("totalAmount", "Total", |b: &Booking| format_amount(b.total_amount))
                .sortable(),
        ]
    }

    fn filters() -> &'static [FilterDef] {
        FILTERS
    }

    fn annotate(row: &mut Booking) {
        row.check_in_display = format_date(&row.check_in);
        row.check_out_display = format_date(&row.check_out);
    }
}
