use serde::Deserialize;

/// Chol backend runtime configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// HTTP server bind address
    pub bind_address: String,
    /// HTTP server port
    pub port: u16,
    /// Path to the knowledge-base document
    pub knowledge_base_path: String,
    /// Which completion provider to use ("huggingface" or "ollama")
    pub provider: String,
    /// HuggingFace API key
    pub hf_api_key: Option<String>,
    /// HuggingFace model override
    pub hf_model: Option<String>,
    /// Ollama base URL
    pub ollama_url: Option<String>,
    /// Ollama model name
    pub ollama_model: String,
    /// Response cache capacity (entries)
    pub cache_capacity: usize,
    /// Response cache TTL in seconds
    pub cache_ttl_secs: u64,
    /// Completion call deadline in seconds
    pub completion_timeout_secs: u64,
    /// Also run the web-resource lookup when "resources" appears in the query
    pub resource_hint_in_query: bool,
    /// Simulated web-resource latency in milliseconds
    pub resource_delay_ms: u64,
    /// Log level
    pub log_level: String,
    /// Directory for rolling log files
    pub log_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 5001,
            knowledge_base_path: "knowledge_base.json".to_string(),
            provider: "huggingface".to_string(),
            hf_api_key: None,
            hf_model: None,
            ollama_url: Some("http://localhost:11434".to_string()),
            ollama_model: "llama3".to_string(),
            cache_capacity: 100,
            cache_ttl_secs: 3600,
            completion_timeout_secs: 10,
            resource_hint_in_query: false,
            resource_delay_ms: 500,
            log_level: "info".to_string(),
            log_dir: "logs".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind_address: std::env::var("CHOL_BIND").unwrap_or(defaults.bind_address),
            port: env_parse("CHOL_PORT", defaults.port),
            knowledge_base_path: std::env::var("CHOL_KNOWLEDGE_BASE")
                .unwrap_or(defaults.knowledge_base_path),
            provider: std::env::var("CHOL_PROVIDER").unwrap_or(defaults.provider),
            hf_api_key: std::env::var("HF_API_KEY").ok(),
            hf_model: std::env::var("HF_MODEL").ok(),
            ollama_url: std::env::var("OLLAMA_URL").ok().or(defaults.ollama_url),
            ollama_model: std::env::var("OLLAMA_MODEL").unwrap_or(defaults.ollama_model),
            cache_capacity: env_parse("CHOL_CACHE_CAPACITY", defaults.cache_capacity),
            cache_ttl_secs: env_parse("CHOL_CACHE_TTL_SECS", defaults.cache_ttl_secs),
            completion_timeout_secs: env_parse(
                "CHOL_COMPLETION_TIMEOUT_SECS",
                defaults.completion_timeout_secs,
            ),
            resource_hint_in_query: env_parse(
                "CHOL_RESOURCE_HINT_IN_QUERY",
                defaults.resource_hint_in_query,
            ),
            resource_delay_ms: env_parse("CHOL_RESOURCE_DELAY_MS", defaults.resource_delay_ms),
            log_level: std::env::var("RUST_LOG").unwrap_or(defaults.log_level),
            log_dir: std::env::var("CHOL_LOG_DIR").unwrap_or(defaults.log_dir),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(default)
}
