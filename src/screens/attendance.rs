use serde::{Deserialize, Serialize};

use crate::display::{format_date, format_time, status_badge};
use crate::list::{Column, FilterDef, ListScreen};
use crate::screens::{Resource, null_as_default};

/// One staff member's attendance for one day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AttendanceRecord {
    #[serde(alias = "_id", deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub staff_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub date: String,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(skip)]
    pub date_display: String,
    #[serde(skip)]
    pub check_in_display: String,
    #[serde(skip)]
    pub check_out_display: String,
}

pub struct AttendanceScreen;

const FILTERS: &[FilterDef] = &[
    FilterDef::choice("status", "Status", &["present", "absent", "late", "half-day", "leave"]),
    FilterDef::date("date", "Date"),
    FilterDef::text("staffId", "Staff ID"),
];

fn time_or_dash(raw: Option<&str>) -> String {
    match raw {
        Some(t) if !t.trim().is_empty() => format_time(t),
        _ => "-".to_string(),
    }
}

impl ListScreen for AttendanceScreen {
    type Row = AttendanceRecord;
    const RESOURCE: Resource = Resource::Attendance;

    fn columns() -> Vec<Column<AttendanceRecord>> {
        vec![
            Column::new("staffName", "Staff", |a: &AttendanceRecord| a.staff_name.clone())
                .sortable(),
            Column::new("date", "Date", |a: &AttendanceRecord| a.date_display.clone()).sortable(),
            Column::new("checkIn", "In", |a: &AttendanceRecord| a.check_in_display.clone()),
            Column::new("checkOut", "Out", |a: &AttendanceRecord| a.check_out_display.clone()),
            Column::rendered("status", "Status", |a: &AttendanceRecord, color| {
                status_badge(&a.status, color)
            }),
        ]
    }

    fn filters() -> &'static [FilterDef] {
        FILTERS
    }

    fn annotate(row: &mut AttendanceRecord) {
        row.date_display = format_date(&row.date);
        row.check_in_display = time_or_dash(row.check_in.as_deref());
        row.check_out_display = time_or_dash(row.check_out.as_deref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotate_missing_check_out() {
        let mut record: AttendanceRecord = serde_json::from_str(
            r#"{"staffName": "Lea", "date": "2024-06-01",
                "checkIn": "2024-06-01T08:58:00Z", "status": "present"}"#,
        )
        .unwrap();
        AttendanceScreen::annotate(&mut record);
        assert_eq!(record.date_display, "Jun 01, 2024");
        assert_eq!(record.check_in_display, "08:58");
        assert_eq!(record.check_out_display, "-");
    }
}
