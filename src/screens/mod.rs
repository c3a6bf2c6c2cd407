//! List screens of the admin client.
//!
//! Each screen is a [`ListScreen`](crate::list::ListScreen) configuration: a
//! row model, its columns and filters. [`with_screen!`](crate::with_screen)
//! maps a runtime [`Resource`] to the screen type.

pub mod attendance;
pub mod bookings;
pub mod inventory;
pub mod menu;
pub mod orders;
pub mod payments;
pub mod rooms;
pub mod staff;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::HotelDeskError;

/// Accept a JSON string or number as text. Room and table numbers arrive as
/// either depending on the endpoint.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Treat an explicit `null` like a missing key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Amounts and quantities as a JSON number or numeric string. Anything else
/// reads as 0.
pub(crate) fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64().unwrap_or_default(),
        Some(Value::String(s)) => s.trim().parse().unwrap_or_default(),
        _ => 0.0,
    })
}

/// Whole counts as a JSON number or numeric string. Negative or fractional
/// values read as 0.
pub(crate) fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_u64().map_or(0, |n| u32::try_from(n).unwrap_or(u32::MAX)),
        Some(Value::String(s)) => s.trim().parse().unwrap_or_default(),
        _ => 0,
    })
}

/// A server collection with a list screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Bookings,
    Rooms,
    Staff,
    Menu,
    Orders,
    Inventory,
    Payments,
    Attendance,
}

enum_display_fromstr!(
    Resource,
    HotelDeskError::unknown_resource,
    {
        Bookings => "bookings",
        Rooms => "rooms",
        Staff => "staff",
        Menu => "menu",
        Orders => "orders",
        Inventory => "inventory",
        Payments => "payments",
        Attendance => "attendance",
    }
);

impl Resource {
    /// Path of the collection relative to the API base URL.
    pub fn path(self) -> &'static str {
        match self {
            Resource::Bookings => "bookings",
            Resource::Rooms => "rooms",
            Resource::Staff => "staff",
            Resource::Menu => "menu",
            Resource::Orders => "orders/history",
            Resource::Inventory => "inventory/history",
            Resource::Payments => "payments",
            Resource::Attendance => "attendance",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Resource::Bookings => "Bookings",
            Resource::Rooms => "Rooms",
            Resource::Staff => "Staff",
            Resource::Menu => "Menu",
            Resource::Orders => "Order History",
            Resource::Inventory => "Inventory History",
            Resource::Payments => "Payments",
            Resource::Attendance => "Attendance",
        }
    }

    /// What one page of this resource contains, e.g. "menu items".
    pub fn noun_plural(self) -> &'static str {
        match self {
            Resource::Bookings => "bookings",
            Resource::Rooms => "rooms",
            Resource::Staff => "staff members",
            Resource::Menu => "menu items",
            Resource::Orders => "orders",
            Resource::Inventory => "inventory records",
            Resource::Payments => "payments",
            Resource::Attendance => "attendance records",
        }
    }

    /// Toast text when a fetch fails without a server message.
    pub fn load_failed_message(self) -> String {
        format!("Failed to load {}", self.noun_plural())
    }
}

/// Run `$body` with `$screen` bound to the screen type of `$resource`.
///
/// ```rust,ignore
/// with_screen!(resource, S => print_filters::<S>())
/// ```
#[macro_export]
macro_rules! with_screen {
    ($resource:expr, $screen:ident => $body:expr) => {
        match $resource {
            $crate::screens::Resource::Bookings => {
                type $screen = $crate::screens::bookings::BookingsScreen;
                $body
            }
            $crate::screens::Resource::Rooms => {
                type $screen = $crate::screens::rooms::RoomsScreen;
                $body
            }
            $crate::screens::Resource::Staff => {
                type $screen = $crate::screens::staff::StaffScreen;
                $body
            }
            $crate::screens::Resource::Menu => {
                type $screen = $crate::screens::menu::MenuScreen;
                $body
            }
            $crate::screens::Resource::Orders => {
                type $screen = $crate::screens::orders::OrdersScreen;
                $body
            }
            $crate::screens::Resource::Inventory => {
                type $screen = $crate::screens::inventory::InventoryScreen;
                $body
            }
            $crate::screens::Resource::Payments => {
                type $screen = $crate::screens::payments::PaymentsScreen;
                $body
            }
            $crate::screens::Resource::Attendance => {
                type $screen = $crate::screens::attendance::AttendanceScreen;
                $body
            }
        }
    };
}
