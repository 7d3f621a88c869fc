use std::time::Instant;

use anyhow::{Context, Result};
use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use chol_core::{CompletionChunks, CompletionProvider, CompletionRequest, CompletionResponse};

/// Ollama local LLM provider.
///
/// The only adapter with native streaming: `/api/chat` with `stream: true`
/// emits NDJSON chunks that back the gateway's `/stream` endpoint.
pub struct OllamaProvider {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaProvider {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: "http://localhost:11434".to_string(),
            model: model.into(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    fn chat_body(&self, request: &CompletionRequest, stream: bool) -> OllamaChatRequest {
        OllamaChatRequest {
            model: self.model.clone(),
            messages: vec![OllamaChatMessage {
                role: "user".to_string(),
                content: request.prompt.clone(),
            }],
            stream,
            options: OllamaOptions {
                temperature: request.temperature,
                num_predict: request.max_tokens,
            },
        }
    }
}

#[derive(Serialize)]
struct OllamaChatRequest {
    model: String,
    messages: Vec<OllamaChatMessage>,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f32,
    num_predict: u32,
}

#[derive(Serialize, Deserialize)]
struct OllamaChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct OllamaChatResponse {
    message: OllamaChatMessage,
}

#[derive(Deserialize)]
struct OllamaStreamChunk {
    #[serde(default)]
    message: Option<OllamaChatMessageOwned>,
    #[serde(default)]
    done: bool,
}

#[derive(Deserialize)]
struct OllamaChatMessageOwned {
    #[serde(default)]
    content: String,
}

#[async_trait]
impl CompletionProvider for OllamaProvider {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse> {
        let start = Instant::now();
        let body = self.chat_body(request, false);

        debug!(model = %self.model, "Sending request to Ollama");

        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .json(&body)
            .send()
            .await
            .context("Ollama HTTP request failed")?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            anyhow::bail!("Ollama returned {}: {}", status, error_body);
        }

        let chat_response: OllamaChatResponse = response
            .json()
            .await
            .context("Failed to parse Ollama response")?;

        Ok(CompletionResponse {
            content: chat_response.message.content,
            provider: "ollama".to_string(),
            model: self.model.clone(),
            latency_ms: start.elapsed().as_millis() as u64,
        })
    }

    async fn complete_stream(&self, request: &CompletionRequest) -> Result<CompletionChunks> {
        let body = self.chat_body(request, true);

        debug!(model = %self.model, "Opening streaming request to Ollama");

        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .json(&body)
            .send()
            .await
            .context("Ollama HTTP request failed")?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            anyhow::bail!("Ollama returned {}: {}", status, error_body);
        }

        // NDJSON: buffer bytes into lines, each line a chunk object.
        let chunks = response
            .bytes_stream()
            .map(|result| result.map_err(anyhow::Error::from))
            .scan(String::new(), |buffer, result| {
                let out: Vec<Result<String>> = match result {
                    Ok(bytes) => {
                        buffer.push_str(&String::from_utf8_lossy(&bytes));
                        let mut pieces = Vec::new();
                        while let Some(newline) = buffer.find('\n') {
                            let line: String = buffer.drain(..=newline).collect();
                            let line = line.trim();
                            if line.is_empty() {
                                continue;
                            }
                            match serde_json::from_str::<OllamaStreamChunk>(line) {
                                Ok(chunk) => {
                                    if chunk.done {
                                        continue;
                                    }
                                    if let Some(message) = chunk.message {
                                        if !message.content.is_empty() {
                                            pieces.push(Ok(message.content));
                                        }
                                    }
                                }
                                Err(error) => pieces.push(Err(
                                    anyhow::Error::from(error).context("Bad Ollama stream chunk")
                                )),
                            }
                        }
                        pieces
                    }
                    Err(error) => vec![Err(error)],
                };
                futures::future::ready(Some(futures::stream::iter(out)))
            })
            .flatten();

        Ok(Box::pin(chunks))
    }
}
