//! HTTP API for the popup
//!
//! - Route table and server startup
//! - Request handlers
//! - Request/response types

pub mod handlers;
pub mod server;
pub mod types;
