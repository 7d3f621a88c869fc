//! SSE streaming endpoint (`POST /stream`).
//!
//! Relays provider chunks straight to the client as server-sent events.
//! No caching or fallback applies in streaming mode; a provider failure
//! surfaces as a terminal `error` event on the stream.

use std::convert::Infallible;

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use futures::stream::{self, BoxStream, StreamExt};
use serde::Deserialize;
use tracing::warn;

use chol_core::ChatMessage;

use crate::server::GatewayState;

/// Request body for `POST /stream`.
#[derive(Debug, Deserialize)]
pub struct StreamRequest {
    pub chat: String,
    #[serde(default)]
    pub history: Vec<ChatMessage>,
}

type EventStream = BoxStream<'static, Result<Event, Infallible>>;

/// Handler for `POST /stream`.
pub async fn stream_chat(
    State(state): State<GatewayState>,
    Json(request): Json<StreamRequest>,
) -> Sse<EventStream> {
    let stream: EventStream = match state
        .responder
        .respond_stream(&request.history, &request.chat)
        .await
    {
        Ok(chunks) => chunks
            .map(|chunk| match chunk {
                Ok(text) => Ok(Event::default().data(text)),
                Err(error) => {
                    warn!(error = %error, "Stream chunk error");
                    Ok(Event::default().event("error").data(error.to_string()))
                }
            })
            .boxed(),
        Err(error) => {
            warn!(error = %error, "Failed to open completion stream");
            stream::iter(vec![Ok(
                Event::default().event("error").data(error.to_string())
            )])
            .boxed()
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_defaults_to_empty() {
        let request: StreamRequest = serde_json::from_str(r#"{"chat": "hello"}"#).unwrap();
        assert_eq!(request.chat, "hello");
        assert!(request.history.is_empty());
    }
}
