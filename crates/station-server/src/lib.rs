//! HTTP surface of the station: router, handlers, token auth and error mapping

pub mod api;
pub mod auth;
pub mod error;
pub mod state;

pub use api::create_router;
pub use state::{AppState, Repositories};
