//! HTTP service converting text or uploaded documents into slide decks.

mod routes;

use anyhow::{Context, Result};
use clap::Parser;
use deckgen_llm::{OpenAiClient, OutlineParams, OutlineProvider};
use routes::AppState;
use std::sync::Arc;

/// Serve the text-to-presentation converter over HTTP.
#[derive(Parser, Debug)]
#[command(name = "deckgen-server")]
#[command(version, about, long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(short, long, default_value = "127.0.0.1:8080")]
    bind: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let provider: Option<Arc<dyn OutlineProvider>> = match std::env::var("OPENAI_API_KEY") {
        Ok(key) if !key.trim().is_empty() => {
            let mut client = OpenAiClient::new(key);
            if let Ok(base_url) = std::env::var("OPENAI_BASE_URL") {
                client = client.with_base_url(base_url);
            }
            Some(Arc::new(client))
        }
        _ => {
            log::warn!("OPENAI_API_KEY is not set; conversions will fail until it is configured");
            None
        }
    };

    let state = Arc::new(AppState {
        provider,
        params: OutlineParams::from_env(),
    });

    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(&args.bind)
        .await
        .with_context(|| format!("Failed to bind {}", args.bind))?;
    log::info!("listening on {}", args.bind);

    axum::serve(listener, app)
        .await
        .context("Server terminated unexpectedly")?;

    Ok(())
}
