use anyhow::Result;
use async_trait::async_trait;
use futures::stream::{self, BoxStream};

/// A stream of generated text chunks from a provider.
pub type CompletionChunks = BoxStream<'static, Result<String>>;

/// Request to a completion provider.
///
/// The pipeline renders the persona preamble, trailing conversation
/// history, and current query into a single prompt string; providers that
/// speak a structured chat API split it back out as they see fit.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            max_tokens: 250,
            temperature: 0.7,
        }
    }
}

/// Response from a completion provider.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    pub content: String,
    pub provider: String,
    pub model: String,
    pub latency_ms: u64,
}

/// Trait for external chat-completion capabilities.
///
/// Failures are signaled through `Err` (a non-success HTTP status from a
/// remote API maps to an error), never by panicking into the pipeline.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Provider name (e.g., "huggingface", "ollama").
    fn name(&self) -> &str;

    /// Send a completion request and return the generated text.
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse>;

    /// Stream the generated text as chunks.
    ///
    /// Providers without native streaming fall back to yielding the full
    /// completion as a single chunk.
    async fn complete_stream(&self, request: &CompletionRequest) -> Result<CompletionChunks> {
        let response = self.complete(request).await?;
        Ok(Box::pin(stream::iter(vec![Ok(response.content)])))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    struct OneShotProvider;

    #[async_trait]
    impl CompletionProvider for OneShotProvider {
        fn name(&self) -> &str {
            "oneshot"
        }

        async fn complete(&self, _request: &CompletionRequest) -> Result<CompletionResponse> {
            Ok(CompletionResponse {
                content: "hello world".into(),
                provider: "oneshot".into(),
                model: "test".into(),
                latency_ms: 0,
            })
        }
    }

    #[tokio::test]
    async fn test_default_stream_yields_single_chunk() {
        let provider = OneShotProvider;
        let request = CompletionRequest::new("hi");
        let chunks: Vec<_> = provider
            .complete_stream(&request)
            .await
            .unwrap()
            .collect()
            .await;
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].as_ref().unwrap(), "hello world");
    }
}
