use anyhow::Context;
use gist_core::EngineConfig;
use gist_engine::ParagraphEngine;
use gist_llm::{OpenAiChatModel, OpenAiEmbedder};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::try_from_env("GIST_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry().with(fmt::layer().with_target(true)).with(filter).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = match std::env::var("GIST_CONFIG") {
        Ok(path) => EngineConfig::load(&path).with_context(|| format!("loading {path}"))?,
        Err(_) => EngineConfig::default(),
    };
    let api_key = std::env::var("OPENAI_API_KEY").context("OPENAI_API_KEY is not set")?;
    let model = OpenAiChatModel::new(&config.model, api_key.as_str())?;
    let embedder = OpenAiEmbedder::new(&config, api_key)?;
    let engine = ParagraphEngine::with_model(Arc::new(model), Arc::new(embedder), config)?;

    let addr = std::env::var("GIST_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".into());
    let listener = tokio::net::TcpListener::bind(&addr).await.with_context(|| format!("binding {addr}"))?;
    info!(%addr, "gist server listening");
    axum::serve(listener, gist_server::app(engine)).await?;
    Ok(())
}
