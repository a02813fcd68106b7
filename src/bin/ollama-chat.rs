//! Chat with an Ollama endpoint, traced end to end over OTLP

use clap::Parser;
use llm_chat::telemetry::{self, Telemetry};
use llm_chat::{ChatRequest, OllamaClient, OllamaConfig, Result};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ollama-chat")]
#[command(about = "Chat with Ollama LLMs", long_about = None)]
struct Cli {
    /// The prompt to send to Ollama (required)
    #[arg(short, long)]
    prompt: String,

    /// The base URL for the Ollama server (default from .env)
    #[arg(short, long)]
    base_url: Option<String>,

    /// The model to use (default from .env)
    #[arg(short, long)]
    model: Option<String>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    // The collector endpoint is a startup requirement; fail before any
    // model call rather than silently dropping spans.
    let telemetry = Telemetry::init("ollama-chat")?;

    let config = OllamaConfig::resolve(cli.base_url, cli.model)?;
    let client = OllamaClient::new(config.clone())?;
    let tracer = telemetry.tracer("ollama-chat");
    let request = ChatRequest::from_prompt(&config.model, &cli.prompt);

    let result = telemetry::traced_complete(&tracer, &client, request).await;
    // Flush buffered spans on both paths before reporting the outcome
    telemetry.shutdown();

    let completion = result?;
    println!("Response: {}", completion.text);
    Ok(())
}
