use std::time::Instant;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use chol_core::{CompletionProvider, CompletionRequest, CompletionResponse};

const DEFAULT_MODEL: &str = "facebook/blenderbot-400M-distill";

/// HuggingFace Inference API provider.
pub struct HuggingFaceProvider {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl HuggingFaceProvider {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            api_key: None,
            base_url: "https://api-inference.huggingface.co".to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

impl Default for HuggingFaceProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct InferenceRequest {
    inputs: String,
    parameters: InferenceParameters,
    options: InferenceOptions,
}

#[derive(Serialize)]
struct InferenceParameters {
    max_new_tokens: u32,
    temperature: f32,
    return_full_text: bool,
}

#[derive(Serialize)]
struct InferenceOptions {
    wait_for_model: bool,
}

#[derive(Deserialize)]
struct InferenceOutput {
    generated_text: String,
}

#[async_trait]
impl CompletionProvider for HuggingFaceProvider {
    fn name(&self) -> &str {
        "huggingface"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse> {
        let start = Instant::now();

        let body = InferenceRequest {
            inputs: request.prompt.clone(),
            parameters: InferenceParameters {
                max_new_tokens: request.max_tokens,
                temperature: request.temperature,
                return_full_text: false,
            },
            options: InferenceOptions {
                wait_for_model: true,
            },
        };

        debug!(model = %self.model, "Sending request to HuggingFace Inference API");

        let mut http_request = self
            .client
            .post(format!("{}/models/{}", self.base_url, self.model))
            .header("Content-Type", "application/json")
            .json(&body);
        if let Some(key) = &self.api_key {
            http_request = http_request.header("Authorization", format!("Bearer {key}"));
        }

        let response = http_request
            .send()
            .await
            .context("HuggingFace HTTP request failed")?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            anyhow::bail!("HuggingFace returned {}: {}", status, error_body);
        }

        let outputs: Vec<InferenceOutput> = response
            .json()
            .await
            .context("Failed to parse HuggingFace response")?;

        let content = outputs
            .into_iter()
            .next()
            .map(|o| o.generated_text)
            .unwrap_or_else(|| "I'm not sure how to respond to that.".to_string());

        Ok(CompletionResponse {
            content,
            provider: "huggingface".to_string(),
            model: self.model.clone(),
            latency_ms: start.elapsed().as_millis() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let body = InferenceRequest {
            inputs: "prompt".into(),
            parameters: InferenceParameters {
                max_new_tokens: 250,
                temperature: 0.7,
                return_full_text: false,
            },
            options: InferenceOptions {
                wait_for_model: true,
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["inputs"], "prompt");
        assert_eq!(json["parameters"]["max_new_tokens"], 250);
        assert_eq!(json["parameters"]["return_full_text"], false);
        assert_eq!(json["options"]["wait_for_model"], true);
    }

    #[test]
    fn test_output_parse() {
        let outputs: Vec<InferenceOutput> =
            serde_json::from_str(r#"[{"generated_text": "hello"}]"#).unwrap();
        assert_eq!(outputs[0].generated_text, "hello");
    }
}
