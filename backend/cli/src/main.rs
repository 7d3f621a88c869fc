mod config;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use chol_core::{CholError, CompletionProvider};
use chol_gateway::{start_server, GatewayState};
use chol_pipeline::{KnowledgeStore, Responder, ResponderConfig, ResponseCache};
use chol_providers::{HuggingFaceProvider, OllamaProvider, ProviderRegistry};

use config::Config;

#[derive(Parser)]
#[command(name = "chol")]
#[command(about = "Chol — AI support-chat backend for Uyir Mei")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the Chol backend server
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Show current backend status
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    chol_logging::init_logger(&config.log_dir, &config.log_level);

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port } => {
            let config = Config {
                port: port.unwrap_or(config.port),
                ..config
            };
            run_server(config).await?;
        }
        Commands::Status => {
            let client = reqwest::Client::new();
            match client
                .get(format!("http://localhost:{}/api/status", config.port))
                .send()
                .await
            {
                Ok(resp) => {
                    let body: serde_json::Value = resp.json().await?;
                    println!("{}", serde_json::to_string_pretty(&body)?);
                }
                Err(_) => {
                    println!("Chol backend is not running on port {}", config.port);
                }
            }
        }
    }

    Ok(())
}

async fn run_server(config: Config) -> Result<()> {
    info!(
        port = config.port,
        bind = %config.bind_address,
        provider = %config.provider,
        knowledge_base = %config.knowledge_base_path,
        "Starting Chol backend"
    );

    let provider = select_provider(&config)?;

    // An unreadable knowledge base degrades to lookup misses rather than
    // refusing to serve.
    let knowledge = match KnowledgeStore::open(&config.knowledge_base_path).await {
        Ok(store) => Arc::new(store),
        Err(error) => {
            warn!(error = %error, "Knowledge base unavailable, serving without it");
            Arc::new(KnowledgeStore::from_document(Default::default()))
        }
    };

    let cache = ResponseCache::new(
        config.cache_capacity,
        Duration::from_secs(config.cache_ttl_secs),
    );
    let responder_config = ResponderConfig {
        completion_timeout: Duration::from_secs(config.completion_timeout_secs),
        resource_delay: Duration::from_millis(config.resource_delay_ms),
        resource_hint_in_query: config.resource_hint_in_query,
    };

    let state = GatewayState {
        responder: Arc::new(Responder::new(provider, knowledge, cache, responder_config)),
    };

    let addr: SocketAddr = format!("{}:{}", config.bind_address, config.port).parse()?;
    start_server(addr, state).await
}

fn select_provider(config: &Config) -> Result<Arc<dyn CompletionProvider>> {
    let mut registry = ProviderRegistry::new();

    let mut huggingface = HuggingFaceProvider::new();
    if let Some(key) = &config.hf_api_key {
        huggingface = huggingface.with_api_key(key);
    }
    if let Some(model) = &config.hf_model {
        huggingface = huggingface.with_model(model);
    }
    registry.register("huggingface", Arc::new(huggingface));

    let mut ollama = OllamaProvider::new(config.ollama_model.clone());
    if let Some(url) = &config.ollama_url {
        ollama = ollama.with_base_url(url);
    }
    registry.register("ollama", Arc::new(ollama));

    registry.get(&config.provider).ok_or_else(|| {
        CholError::Config(format!(
            "unknown provider \"{}\" (available: {})",
            config.provider,
            registry.list().join(", ")
        ))
        .into()
    })
}
