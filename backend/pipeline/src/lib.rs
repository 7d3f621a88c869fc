//! The Chol response resolution pipeline.
//!
//! Routes a user's query through a layered decision process: response
//! cache, knowledge-base lookup, sentiment tagging, external completion
//! call, uncertainty detection with a web-resource fallback, and
//! sentiment-based enhancement, with bounded-size caching of the result.

pub mod cache;
pub mod cache_key;
pub mod knowledge;
pub mod prompt;
pub mod resources;
pub mod responder;
pub mod sentiment;

pub use cache::ResponseCache;
pub use cache_key::derive_key;
pub use knowledge::{KnowledgeDocument, KnowledgeStore, KnowledgeTopic};
pub use prompt::build_prompt;
pub use resources::find_resources;
pub use responder::{Responder, ResponderConfig};
pub use sentiment::analyze_sentiment;
