/// Explorer Mock Server Library
///
/// This crate provides both a standalone binary and library components
/// for mocking the BlockCypher address endpoint with in-memory fixtures.

pub mod handlers;
pub mod server;
pub mod types;

// Re-export commonly used types
pub use handlers::ApiError;
pub use server::{create_router, run_server};
pub use types::*;
