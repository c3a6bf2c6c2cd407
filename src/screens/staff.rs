use serde::{Deserialize, Serialize};

use crate::display::{format_date, format_optional, status_badge};
use crate::list::{Column, FilterDef, ListScreen};
use crate::screens::{Resource, null_as_default};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StaffMember {
    #[serde(alias = "_id", deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub role: String,
    pub phone: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(skip)]
    pub joined_display: String,
}

pub struct StaffScreen;

const FILTERS: &[FilterDef] = &[
    FilterDef::choice(
        "role",
        "Role",
        &["admin", "manager", "receptionist", "housekeeping", "chef", "waiter"],
    ),
    FilterDef::choice("status", "Status", &["active", "inactive"]),
];

impl ListScreen for StaffScreen {
    type Row = StaffMember;
    const RESOURCE: Resource = Resource::Staff;

    fn columns() -> Vec<Column<StaffMember>> {
        vec![
            Column::new("name", "Name", |s: &StaffMember| s.name.clone()).sortable(),
            Column::new("email", "Email", |s: &StaffMember| s.email.clone()).sortable(),
            Column::new("role", "Role", |s: &StaffMember| s.role.clone()).sortable(),
            Column::new("phone", "Phone", |s: &StaffMember| {
                format_optional(s.phone.as_deref())
            }),
            Column::rendered("status", "Status", |s: &StaffMember, color| {
                status_badge(&s.status, color)
            }),
            Column::new("createdAt", "Joined", |s: &StaffMember| s.joined_display.clone())
                .sortable(),
        ]
    }

    fn filters() -> &'static [FilterDef] {
        FILTERS
    }

    fn annotate(row: &mut StaffMember) {
        row.joined_display = format_date(&row.created_at);
    }
}
