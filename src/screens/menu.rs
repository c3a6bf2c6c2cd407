use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::display::{format_amount, status_badge};
use crate::list::{Column, FilterDef, ListScreen};
use crate::screens::{Resource, lenient_number, null_as_default};

/// Menu search reacts faster than the other screens.
const MENU_SEARCH_DEBOUNCE: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MenuItem {
    #[serde(alias = "_id", deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(deserialize_with = "lenient_number")]
    pub price: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub is_available: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_vegetarian: bool,
}

pub struct MenuScreen;

const FILTERS: &[FilterDef] = &[
    FilterDef::choice(
        "category",
        "Category",
        &["starters", "mains", "desserts", "beverages", "sides"],
    ),
    FilterDef::choice("isAvailable", "Available", &["true", "false"]),
];

impl ListScreen for MenuScreen {
    type Row = MenuItem;
    const RESOURCE: Resource = Resource::Menu;

    fn columns() -> Vec<Column<MenuItem>> {
        vec![
            Column::new("name", "Item", |m: &MenuItem| m.name.clone()).sortable(),
            Column::new("category", "Category", |m: &MenuItem| m.category.clone()).sortable(),
            Column::new("price", "Price", |m: &MenuItem| format_amount(m.price)).sortable(),
            Column::new("isVegetarian", "Veg", |m: &MenuItem| {
                (if m.is_vegetarian { "yes" } else { "no" }).to_string()
            }),
            Column::rendered("isAvailable", "Available", |m: &MenuItem, color| {
                status_badge(if m.is_available { "yes" } else { "no" }, color)
            }),
        ]
    }

    fn filters() -> &'static [FilterDef] {
        FILTERS
    }

    fn search_debounce() -> Duration {
        MENU_SEARCH_DEBOUNCE
    }
}
