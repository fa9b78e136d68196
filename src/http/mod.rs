//! HTTP server module.
//!
//! The server listens on plain HTTP on all interfaces and shuts down gracefully
//! on SIGTERM/SIGINT, letting in-flight requests finish.

mod server;
mod shutdown;

pub use server::{start_server, ServerError};
