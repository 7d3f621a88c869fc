//! Chol Gateway HTTP API Server
//!
//! Thin plumbing over the response pipeline: REST endpoints for chat,
//! status, and cache stats, plus an SSE streaming variant.

pub mod api;
pub mod server;
pub mod stream;

pub use server::{build_router, start_server, GatewayState};
