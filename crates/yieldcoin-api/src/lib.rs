//! yieldcoin-api: HTTP API layer
//!
//! A RESTful surface over the registry, the read side, and the transfer
//! engine. The server binds to loopback; the wallet agent it forwards to
//! is whatever the config names.

pub mod dto;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, start_server};
pub use state::AppState;
