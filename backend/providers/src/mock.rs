use anyhow::Result;
use async_trait::async_trait;

use chol_core::{CompletionProvider, CompletionRequest, CompletionResponse};

/// A mock completion provider with canned responses.
pub struct MockProvider {
    name: String,
    fixed_response: Option<String>,
    fail: bool,
}

impl MockProvider {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fixed_response: None,
            fail: false,
        }
    }

    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        self.fixed_response = Some(response.into());
        self
    }

    /// Make every call fail, to exercise fallback paths.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(&self, _request: &CompletionRequest) -> Result<CompletionResponse> {
        if self.fail {
            anyhow::bail!("mock provider failure");
        }
        Ok(CompletionResponse {
            content: self
                .fixed_response
                .clone()
                .unwrap_or_else(|| "Mock response".to_string()),
            provider: self.name.clone(),
            model: "mock".to_string(),
            latency_ms: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_canned_response() {
        let provider = MockProvider::new("mock").with_response("canned");
        let response = provider
            .complete(&CompletionRequest::new("anything"))
            .await
            .unwrap();
        assert_eq!(response.content, "canned");
    }

    #[tokio::test]
    async fn test_failing_mode() {
        let provider = MockProvider::new("mock").failing();
        assert!(provider
            .complete(&CompletionRequest::new("anything"))
            .await
            .is_err());
    }
}
