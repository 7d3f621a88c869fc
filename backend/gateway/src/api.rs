//! REST handlers: status, chat, stats.
//!
//! The gateway appends the ISO-8601 `timestamp` to chat payloads at
//! request-handling time; the pipeline itself never sets it.

use axum::{extract::State, http::StatusCode, response::Json};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::error;

use chol_core::ChatMessage;
use chol_pipeline::Responder;

use crate::server::GatewayState;

/// Request body for `POST /api/chat`.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

/// Handler for `GET /api/status`.
pub async fn status() -> Json<Value> {
    Json(json!({
        "status": "online",
        "service": "Chol (சொல்) AI Backend",
        "version": env!("CARGO_PKG_VERSION"),
        "features": ["Knowledge Base", "Web Resources", "Response Caching", "Sentiment Analysis"],
    }))
}

/// Handler for `POST /api/chat`.
pub async fn chat(
    State(state): State<GatewayState>,
    Json(request): Json<ChatRequest>,
) -> (StatusCode, Json<Value>) {
    let query = match request.message.as_deref() {
        Some(message) if !message.trim().is_empty() => message,
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "No message provided" })),
            );
        }
    };

    let payload = state.responder.respond(&request.messages, query).await;

    match serde_json::to_value(&payload) {
        Ok(Value::Object(mut body)) => {
            body.insert("timestamp".to_string(), json!(Utc::now().to_rfc3339()));
            (StatusCode::OK, Json(Value::Object(body)))
        }
        other => {
            if let Err(error) = other {
                error!(query = %query, error = %error, "Failed to serialize chat response");
            }
            let fallback = Responder::error_payload();
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "text": fallback.text,
                    "source": "error",
                    "timestamp": Utc::now().to_rfc3339(),
                })),
            )
        }
    }
}

/// Handler for `GET /api/stats`.
pub async fn stats(State(state): State<GatewayState>) -> Json<Value> {
    Json(json!({
        "cache_size": state.responder.cache_size(),
        "cache_hit_ratio": "N/A",
        "uptime": "N/A",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use chol_pipeline::{KnowledgeDocument, KnowledgeStore, ResponderConfig, ResponseCache};
    use chol_providers::MockProvider;

    fn test_state(provider: MockProvider) -> GatewayState {
        let knowledge = Arc::new(KnowledgeStore::from_document(
            serde_json::from_str::<KnowledgeDocument>(
                r#"{
                    "topic_keywords": { "donation": ["donate"] },
                    "knowledge_base": {
                        "donation": { "text": "See our Ways to Give page." }
                    }
                }"#,
            )
            .unwrap(),
        ));
        let config = ResponderConfig {
            completion_timeout: Duration::from_secs(5),
            resource_delay: Duration::ZERO,
            resource_hint_in_query: false,
        };
        GatewayState {
            responder: Arc::new(Responder::new(
                Arc::new(provider),
                knowledge,
                ResponseCache::default(),
                config,
            )),
        }
    }

    #[tokio::test]
    async fn test_status_shape() {
        let Json(body) = status().await;
        assert_eq!(body["status"], "online");
        assert!(body["features"].as_array().unwrap().len() >= 4);
    }

    #[tokio::test]
    async fn test_chat_missing_message_is_400() {
        let state = test_state(MockProvider::new("mock"));
        let (code, Json(body)) = chat(
            State(state),
            Json(ChatRequest {
                message: None,
                messages: vec![],
            }),
        )
        .await;
        assert_eq!(code, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No message provided");
    }

    #[tokio::test]
    async fn test_chat_appends_timestamp() {
        let state = test_state(MockProvider::new("mock").with_response("An answer."));
        let (code, Json(body)) = chat(
            State(state),
            Json(ChatRequest {
                message: Some("what are your office hours".into()),
                messages: vec![],
            }),
        )
        .await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(body["source"], "ai");
        assert!(body["timestamp"].as_str().unwrap().contains('T'));
    }

    #[tokio::test]
    async fn test_chat_kb_hit() {
        let state = test_state(MockProvider::new("mock"));
        let (code, Json(body)) = chat(
            State(state),
            Json(ChatRequest {
                message: Some("How do I donate?".into()),
                messages: vec![],
            }),
        )
        .await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(body["source"], "kb");
        assert!(body["text"].as_str().unwrap().contains("Ways to Give"));
    }

    #[tokio::test]
    async fn test_stats_reports_cache_size() {
        let state = test_state(MockProvider::new("mock").with_response("An answer."));
        chat(
            State(state.clone()),
            Json(ChatRequest {
                message: Some("hello there".into()),
                messages: vec![],
            }),
        )
        .await;

        let Json(body) = stats(State(state)).await;
        assert_eq!(body["cache_size"], 1);
        assert_eq!(body["cache_hit_ratio"], "N/A");
    }
}
