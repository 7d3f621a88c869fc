//! Structured logging for the Chol backend.

pub mod logger;

pub use logger::init_logger;
