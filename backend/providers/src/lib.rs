//! Completion-provider adapters.
//!
//! Each adapter maps the pipeline's `CompletionProvider` capability onto a
//! concrete backend's wire format. Provider-specific request/response
//! shaping lives here, never in the pipeline.

pub mod huggingface;
pub mod mock;
pub mod ollama;

use std::collections::HashMap;
use std::sync::Arc;

use chol_core::CompletionProvider;

pub use huggingface::HuggingFaceProvider;
pub use mock::MockProvider;
pub use ollama::OllamaProvider;

/// Registry of completion providers, looked up by name.
pub struct ProviderRegistry {
    providers: HashMap<String, Arc<dyn CompletionProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
        }
    }

    /// Register a provider by name.
    pub fn register(&mut self, name: impl Into<String>, provider: Arc<dyn CompletionProvider>) {
        self.providers.insert(name.into(), provider);
    }

    /// Get a provider by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn CompletionProvider>> {
        self.providers.get(name).cloned()
    }

    /// All registered provider names.
    pub fn list(&self) -> Vec<String> {
        self.providers.keys().cloned().collect()
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_lookup_by_name() {
        let mut registry = ProviderRegistry::new();
        registry.register("mock", Arc::new(MockProvider::new("mock")));

        assert!(registry.get("mock").is_some());
        assert!(registry.get("missing").is_none());
        assert_eq!(registry.list(), vec!["mock".to_string()]);
    }
}
