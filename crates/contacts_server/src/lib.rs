//! HTTP front end for the contacts service.
//! Routing, response shaping and status mapping live here; business rules
//! stay in `contacts_core`.

pub mod config;
pub mod server;

pub use config::ServerConfig;
pub use server::{router, serve, AppState};
