//! Response payload types produced by the resolution pipeline.

use serde::{Deserialize, Serialize};

/// Where a response came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Direct answer from the local knowledge base.
    Kb,
    /// Curated web resource links.
    Web,
    /// Generated by the completion provider.
    Ai,
    /// Keyword fallback after a provider failure.
    Fallback,
    /// Unrecoverable pipeline error.
    Error,
}

/// Coarse sentiment of the user's query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

/// A linked resource surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLink {
    pub title: String,
    pub url: String,
    pub description: String,
}

/// The payload the pipeline resolves a query to.
///
/// The ISO-8601 `timestamp` the HTTP API exposes is appended at the
/// gateway boundary, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponsePayload {
    pub text: String,
    pub source: Source,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<ResourceLink>>,
}

impl ResponsePayload {
    pub fn new(text: impl Into<String>, source: Source) -> Self {
        Self {
            text: text.into(),
            source,
            sentiment: None,
            links: None,
        }
    }

    pub fn with_sentiment(mut self, sentiment: Sentiment) -> Self {
        self.sentiment = Some(sentiment);
        self
    }

    pub fn with_links(mut self, links: Vec<ResourceLink>) -> Self {
        self.links = Some(links);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_tags_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&Source::Kb).unwrap(), r#""kb""#);
        assert_eq!(
            serde_json::to_string(&Source::Fallback).unwrap(),
            r#""fallback""#
        );
    }

    #[test]
    fn test_optional_fields_omitted() {
        let payload = ResponsePayload::new("hello", Source::Ai);
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("sentiment").is_none());
        assert!(json.get("links").is_none());
    }

    #[test]
    fn test_payload_roundtrip_with_links() {
        let payload = ResponsePayload::new("see below", Source::Web)
            .with_sentiment(Sentiment::Neutral)
            .with_links(vec![ResourceLink {
                title: "Contact Us".into(),
                url: "/contact".into(),
                description: "Get in touch.".into(),
            }]);
        let json = serde_json::to_string(&payload).unwrap();
        let back: ResponsePayload = serde_json::from_str(&json).unwrap();
        assert_eq!(back.source, Source::Web);
        assert_eq!(back.links.unwrap().len(), 1);
    }
}
