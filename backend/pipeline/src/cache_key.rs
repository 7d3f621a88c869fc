//! Cache key derivation.
//!
//! The key combines the normalized query with the trailing slice of
//! conversation history, so the same question asked in different contexts
//! gets a distinct cache entry.

use chol_core::ChatMessage;
use sha2::{Digest, Sha256};

/// How many trailing history messages participate in the key.
const CONTEXT_MESSAGES: usize = 2;

/// Derive a stable, fixed-length cache key from a query and its history.
///
/// The query is lower-cased and trimmed; the last two messages' text is
/// joined with `|` (a separator not expected in normal text). Pure
/// function: identical inputs always produce the identical 64-char hex
/// digest.
pub fn derive_key(query: &str, history: &[ChatMessage]) -> String {
    let start = history.len().saturating_sub(CONTEXT_MESSAGES);
    let context = history[start..]
        .iter()
        .map(|msg| msg.text.as_str())
        .collect::<Vec<_>>()
        .join("|");

    let combined = format!("{}|{}", query.to_lowercase().trim(), context);
    let digest = Sha256::digest(combined.as_bytes());
    hex::encode(digest)
}
