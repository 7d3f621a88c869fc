//! The AI responder: orchestrates the layered response pipeline.
//!
//! Linear state machine with early returns: cache → knowledge base →
//! sentiment → completion call → uncertainty check → web resources →
//! sentiment enhancement → cache insert. Provider failures degrade to a
//! keyword fallback; nothing below this module's boundary surfaces an
//! error to the caller.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use chol_core::{
    ChatMessage, CompletionChunks, CompletionProvider, CompletionRequest, ResponsePayload,
    Sentiment, Source,
};

use crate::cache::ResponseCache;
use crate::cache_key::derive_key;
use crate::knowledge::KnowledgeStore;
use crate::prompt::build_prompt;
use crate::resources::find_resources;
use crate::sentiment::analyze_sentiment;

const ERROR_TEXT: &str = "I'm having trouble processing your request. Please try again later.";

const WEB_INTRO_TEXT: &str = "I found some resources that might help answer your question:";

/// Phrases in generated text that mean the model is unsure of its answer.
const UNCERTAINTY_PHRASES: &[&str] = &["i don't know", "i'm not sure"];

/// Fallback topic keyword sets, matched against whitespace-split query tokens.
const FALLBACK_TOPICS: &[(&[&str], &str)] = &[
    (&["donate", "donation", "give", "money"], "donation options"),
    (&["volunteer", "help", "time"], "volunteering opportunities"),
    (&["service", "program", "assistance"], "our services"),
    (&["contact", "reach", "email", "call"], "contact information"),
];

/// Tunables for the responder.
#[derive(Debug, Clone)]
pub struct ResponderConfig {
    /// Hard deadline on the completion call; a timeout is treated the
    /// same as an invocation failure.
    pub completion_timeout: Duration,
    /// Simulated latency of the web-resource lookup.
    pub resource_delay: Duration,
    /// Also run the web-resource lookup when the literal word
    /// "resources" appears in the query, regardless of model confidence.
    pub resource_hint_in_query: bool,
}

impl Default for ResponderConfig {
    fn default() -> Self {
        Self {
            completion_timeout: Duration::from_secs(10),
            resource_delay: Duration::from_millis(500),
            resource_hint_in_query: false,
        }
    }
}

/// The response resolution pipeline.
pub struct Responder {
    provider: Arc<dyn CompletionProvider>,
    knowledge: Arc<KnowledgeStore>,
    cache: ResponseCache,
    config: ResponderConfig,
}

impl Responder {
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        knowledge: Arc<KnowledgeStore>,
        cache: ResponseCache,
        config: ResponderConfig,
    ) -> Self {
        Self {
            provider,
            knowledge,
            cache,
            config,
        }
    }

    /// Number of entries currently in the response cache.
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }

    /// Resolve a query against the full pipeline.
    ///
    /// Never fails: every internal error degrades to the next stage or
    /// to a terminal error payload.
    pub async fn respond(&self, history: &[ChatMessage], query: &str) -> ResponsePayload {
        let key = derive_key(query, history);

        if let Some(payload) = self.cache.get(&key) {
            info!(query = %query, "Cache hit");
            return payload;
        }

        if let Some(payload) = self.knowledge.lookup(query) {
            info!(query = %query, "Knowledge base hit");
            self.cache.put(&key, payload.clone());
            return payload;
        }

        let sentiment = analyze_sentiment(query);

        let request = CompletionRequest::new(build_prompt(history, query));
        let completion =
            tokio::time::timeout(self.config.completion_timeout, self.provider.complete(&request))
                .await;

        let response = match completion {
            Ok(Ok(response)) => response,
            Ok(Err(error)) => {
                warn!(query = %query, provider = self.provider.name(), error = %error,
                    "Completion call failed, building fallback");
                return self.fallback_payload(query, sentiment);
            }
            Err(_) => {
                warn!(query = %query, provider = self.provider.name(),
                    timeout_secs = self.config.completion_timeout.as_secs(),
                    "Completion call timed out, building fallback");
                return self.fallback_payload(query, sentiment);
            }
        };

        debug!(provider = %response.provider, model = %response.model,
            latency_ms = response.latency_ms, "Completion received");

        let mut text = response.content;
        if let Some(stripped) = text.strip_prefix("Assistant: ") {
            text = stripped.to_string();
        }

        if self.wants_resources(&text, query) {
            let links = find_resources(query, self.config.resource_delay).await;
            if !links.is_empty() {
                let payload = ResponsePayload::new(WEB_INTRO_TEXT, Source::Web)
                    .with_sentiment(sentiment)
                    .with_links(links);
                self.cache.put(&key, payload.clone());
                return payload;
            }
        }

        let payload = ResponsePayload::new(enhance_by_sentiment(text, sentiment), Source::Ai)
            .with_sentiment(sentiment);
        self.cache.put(&key, payload.clone());
        payload
    }

    /// Stream a response straight from the provider.
    ///
    /// No caching, knowledge-base lookup, or fallback applies in
    /// streaming mode; a provider failure is the caller's to surface.
    pub async fn respond_stream(
        &self,
        history: &[ChatMessage],
        query: &str,
    ) -> anyhow::Result<CompletionChunks> {
        let request = CompletionRequest::new(build_prompt(history, query));
        self.provider.complete_stream(&request).await
    }

    /// Terminal payload for failures the pipeline cannot degrade past.
    pub fn error_payload() -> ResponsePayload {
        ResponsePayload::new(ERROR_TEXT, Source::Error)
    }

    fn wants_resources(&self, generated: &str, query: &str) -> bool {
        let generated_lower = generated.to_lowercase();
        if UNCERTAINTY_PHRASES
            .iter()
            .any(|phrase| generated_lower.contains(phrase))
        {
            return true;
        }
        self.config.resource_hint_in_query && query.to_lowercase().contains("resources")
    }

    fn fallback_payload(&self, query: &str, sentiment: Sentiment) -> ResponsePayload {
        let text = match fallback_topics(query) {
            Some(topics) => format!(
                "I understand you want to know about {topics}. You can find detailed \
                 information on our website or by calling our helpline at +91-XXXXXXXX."
            ),
            None => format!(
                "I understand you want to know about {query}. Let me provide some general \
                 information. Uyir Mei offers services in education, healthcare, and community \
                 development. Please check our website for specific details or ask a more \
                 specific question."
            ),
        };
        ResponsePayload::new(text, Source::Fallback).with_sentiment(sentiment)
    }
}

/// Collect human-readable topic labels matching the query's word tokens,
/// joined with commas and "and" before the last.
fn fallback_topics(query: &str) -> Option<String> {
    let query_lower = query.to_lowercase();
    let tokens: Vec<&str> = query_lower.split_whitespace().collect();

    let labels: Vec<&str> = FALLBACK_TOPICS
        .iter()
        .filter(|(keywords, _)| keywords.iter().any(|kw| tokens.contains(kw)))
        .map(|(_, label)| *label)
        .collect();

    match labels.as_slice() {
        [] => None,
        [only] => Some((*only).to_string()),
        [init @ .., last] => Some(format!("{} and {last}", init.join(", "))),
    }
}

fn enhance_by_sentiment(text: String, sentiment: Sentiment) -> String {
    match sentiment {
        Sentiment::Positive => format!(
            "{text} I'm glad I could help! Is there anything else you'd like to know about Uyir Mei?"
        ),
        Sentiment::Negative => format!(
            "I understand your concern. {text} Please let me know if there's a different way I can assist you."
        ),
        Sentiment::Neutral => text,
    }
}
