use serde::{Deserialize, Serialize};

use crate::display::{format_amount, format_optional, status_badge};
use crate::list::{Column, FilterDef, ListScreen};
use crate::screens::{Resource, lenient_count, lenient_number, lenient_string, null_as_default};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Room {
    #[serde(alias = "_id", deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub room_number: Option<String>,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub room_type: String,
    #[serde(deserialize_with = "lenient_number")]
    pub price: f64,
    #[serde(deserialize_with = "lenient_count")]
    pub capacity: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
}

pub struct RoomsScreen;

const FILTERS: &[FilterDef] = &[
    FilterDef::choice("type", "Type", &["single", "double", "suite", "deluxe"]),
    FilterDef::choice("status", "Status", &["available", "occupied", "maintenance"]),
];

impl ListScreen for RoomsScreen {
    type Row = Room;
    const RESOURCE: Resource = Resource::Rooms;

    fn columns() -> Vec<Column<Room>> {
        vec![
            Column::new("roomNumber", "Room", |r: &Room| {
                format_optional(r.room_number.as_deref())
            })
            .sortable(),
            Column::new("type", "Type", |r: &Room| r.room_type.clone()).sortable(),
            Column::new("capacity", "Guests", |r: &Room| r.capacity.to_string()),
            Column::new("price", "Rate / night", |r: &Room| format_amount(r.price)).sortable(),
            Column::rendered("status", "Status", |r: &Room, color| {
                status_badge(&r.status, color)
            }),
        ]
    }

    fn filters() -> &'static [FilterDef] {
        FILTERS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_field_is_renamed() {
        let room: Room = serde_json::from_str(
            r#"{"_id": "r1", "roomNumber": "101A", "type": "suite", "price": 180, "capacity": 3}"#,
        )
        .unwrap();
        assert_eq!(room.room_type, "suite");
        assert_eq!(room.price, 180.0);

        let json = serde_json::to_value(&room).unwrap();
        assert_eq!(json["type"], "suite");
    }
}
