//! Knowledge-base lookup.
//!
//! Loads a persisted document with two ordered mappings (`topic_keywords`
//! and `knowledge_base`) and answers queries by keyword containment.
//! Topic iteration order is match precedence, so the maps preserve the
//! document's insertion order.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use arc_swap::ArcSwap;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use chol_core::{CholError, ResourceLink, ResponsePayload, Source};

/// A single topic's answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeTopic {
    pub text: String,
    #[serde(default)]
    pub links: Vec<ResourceLink>,
}

/// The persisted knowledge-base document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KnowledgeDocument {
    /// topic → ordered keyword list; first matching topic wins.
    #[serde(default)]
    pub topic_keywords: IndexMap<String, Vec<String>>,
    /// topic → answer. A topic present in `topic_keywords` but absent
    /// here is silently skipped.
    #[serde(default)]
    pub knowledge_base: IndexMap<String, KnowledgeTopic>,
}

/// Read-only knowledge base with atomic snapshot reload.
///
/// Lookups read an `ArcSwap` snapshot, so a concurrent `reload` can never
/// expose a half-updated mapping.
pub struct KnowledgeStore {
    path: PathBuf,
    snapshot: ArcSwap<KnowledgeDocument>,
}

impl KnowledgeStore {
    /// Open a store over the given document path and load the snapshot.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, CholError> {
        let path = path.as_ref().to_path_buf();
        let document = read_document(&path).await?;
        Ok(Self {
            path,
            snapshot: ArcSwap::from_pointee(document),
        })
    }

    /// A store over a fixed in-memory document (used by tests and tools).
    pub fn from_document(document: KnowledgeDocument) -> Self {
        Self {
            path: PathBuf::new(),
            snapshot: ArcSwap::from_pointee(document),
        }
    }

    /// Re-read the document and swap the snapshot atomically.
    pub async fn reload(&self) -> Result<(), CholError> {
        let document = read_document(&self.path).await?;
        self.snapshot.store(Arc::new(document));
        Ok(())
    }

    /// Look up a direct answer for the query.
    ///
    /// Returns the first topic (in document order) with any keyword
    /// contained in the lower-cased query. Never errors: a store whose
    /// document failed to load at `open` time is simply empty.
    pub fn lookup(&self, query: &str) -> Option<ResponsePayload> {
        let query_lower = query.to_lowercase();
        let document = self.snapshot.load();

        for (topic, keywords) in &document.topic_keywords {
            if keywords.iter().any(|kw| query_lower.contains(kw.as_str())) {
                match document.knowledge_base.get(topic) {
                    Some(entry) => {
                        debug!(topic = %topic, "Knowledge base hit");
                        let mut payload = ResponsePayload::new(&entry.text, Source::Kb);
                        if !entry.links.is_empty() {
                            payload = payload.with_links(entry.links.clone());
                        }
                        return Some(payload);
                    }
                    None => {
                        warn!(topic = %topic, "Topic has keywords but no knowledge entry, skipping");
                    }
                }
            }
        }
        None
    }
}

async fn read_document(path: &Path) -> Result<KnowledgeDocument, CholError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| CholError::KnowledgeBase(format!("read {}: {e}", path.display())))?;
    serde_json::from_str(&raw)
        .map_err(|e| CholError::KnowledgeBase(format!("parse {}: {e}", path.display())))
}
