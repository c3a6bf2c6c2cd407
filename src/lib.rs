#[macro_use]
mod macros;

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod display;
pub mod error;
pub mod list;
pub mod screens;
pub mod session;

pub use api::{ApiClient, ResourceEndpoint};
pub use config::Config;
pub use error::{HotelDeskError, Result};
pub use list::{
    Column, FilterDef, ListController, ListEndpoint, ListEvent, ListScreen, PageResult, PageSize,
    QueryState,
};
pub use screens::Resource;
pub use session::{SessionContext, SessionState, SessionStore};
