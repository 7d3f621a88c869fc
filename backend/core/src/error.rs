use thiserror::Error;

/// Top-level error type for the Chol backend.
#[derive(Debug, Error)]
pub enum CholError {
    #[error("completion provider error ({provider}): {message}")]
    Provider { provider: String, message: String },

    #[error("completion provider timed out after {0}s")]
    ProviderTimeout(u64),

    #[error("knowledge base error: {0}")]
    KnowledgeBase(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
