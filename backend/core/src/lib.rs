//! Core types and traits for the Chol chat backend.
//!
//! Chol (சொல்) is the support assistant for Uyir Mei, a non-profit focused
//! on community service in India. This crate holds the conversation and
//! response payload types, the error taxonomy, and the completion-provider
//! capability that the response pipeline is parameterized over.

pub mod error;
pub mod message;
pub mod response;
pub mod traits;

pub use error::CholError;
pub use message::{ChatMessage, Sender};
pub use response::{ResourceLink, ResponsePayload, Sentiment, Source};
pub use traits::{CompletionChunks, CompletionProvider, CompletionRequest, CompletionResponse};
