//! Chat with an OpenWebUI gateway using bearer authentication

use clap::Parser;
use llm_chat::render;
use llm_chat::{ChatRequest, Error, GatewayClient, LlmClient, Result};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "owui-chat")]
#[command(about = "Chat with models behind an OpenWebUI gateway", long_about = None)]
struct Cli {
    /// Model name to use for the API request
    #[arg(short, long)]
    model: Option<String>,

    /// Prompt to send to the model
    #[arg(short, long)]
    prompt: Option<String>,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,

    /// List available models
    #[arg(short, long)]
    list_models: bool,
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
    // Credentials are resolved before any network activity
    let client = GatewayClient::from_env()?;

    if cli.list_models {
        return list_models(&client, cli.debug).await;
    }

    let (Some(model), Some(prompt)) = (cli.model, cli.prompt) else {
        return Err(Error::config(
            "--model and --prompt are required when not using --list-models",
        ));
    };
    chat(&client, &model, &prompt, cli.debug).await
}

async fn chat(client: &GatewayClient, model: &str, prompt: &str, debug: bool) -> Result<()> {
    let request = ChatRequest::from_prompt(model, prompt);

    let started = Instant::now();
    let result = client.complete(request).await;
    let elapsed = started.elapsed();

    match result {
        Ok(completion) => {
            let rate = render::tokens_per_second(&completion.text, elapsed);
            println!("{}", render::throughput_line(rate));
            if debug {
                println!("Debug - Full response: {}", completion.raw);
            }
            println!("{}", completion.text);
            Ok(())
        }
        Err(e) => {
            // Surface the raw payload before the parse error when asked to
            if debug {
                if let Error::MalformedResponse { raw } = &e {
                    println!("Debug - Full response: {raw}");
                }
            }
            Err(e)
        }
    }
}

async fn list_models(client: &GatewayClient, debug: bool) -> Result<()> {
    let models = client.list_models().await?;
    if debug {
        println!("Debug - Full response: {}", models.raw);
    }
    for entry in &models.models {
        println!("{}", render::model_line(entry));
    }
    Ok(())
}
