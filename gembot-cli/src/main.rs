//! gembot CLI: run the Discord Gemini bot. Config from env and optional CLI args.

use std::env;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};

use chat_handlers::{AddressGate, EveryoneHandler, ImageHandler, ResetHandler, TextHandler};
use gembot_core::{init_tracing, ChatGateway, DEFAULT_CHUNK_LEN};
use gembot_discord::{default_intents, DiscordConfig, DiscordRunner, SerenityGateway};
use gemini_client::{GeminiClient, GenerationClient};
use handler_chain::HandlerChain;
use history::ConversationHistory;

#[derive(Parser)]
#[command(name = "gembot")]
#[command(about = "Discord Gemini bot CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the Discord bot (config from env; token can override DISCORD_BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => run(token).await,
    }
}

async fn run(token_override: Option<String>) -> Result<()> {
    let config = match token_override {
        Some(token) => DiscordConfig::with_token(token),
        None => DiscordConfig::from_env()?,
    };
    init_tracing(config.log_file.as_deref())?;

    let api_key = env::var("GOOGLE_AI_KEY").map_err(|_| anyhow!("GOOGLE_AI_KEY not set"))?;
    let max_history = load_max_history()?;

    let gemini = match env::var("GEMINI_API_URL") {
        Ok(url) => GeminiClient::with_base_url(api_key, url),
        Err(_) => GeminiClient::new(api_key),
    };
    let generator: Arc<dyn GenerationClient> = Arc::new(gemini);
    let history = ConversationHistory::new(max_history);
    let gateway: Arc<dyn ChatGateway> = Arc::new(SerenityGateway::from_token(&config.bot_token));
    let bot_name = Arc::new(tokio::sync::RwLock::new(None));

    let chain = HandlerChain::new()
        .add_middleware(Arc::new(AddressGate))
        .add_handler(Arc::new(EveryoneHandler::new(
            bot_name.clone(),
            gateway.clone(),
        )))
        .add_handler(Arc::new(ResetHandler::new(
            history.clone(),
            gateway.clone(),
        )))
        .add_handler(Arc::new(ImageHandler::new(
            gateway.clone(),
            generator.clone(),
            history.clone(),
            DEFAULT_CHUNK_LEN,
        )))
        .add_handler(Arc::new(TextHandler::new(
            gateway,
            generator,
            history,
            DEFAULT_CHUNK_LEN,
        )));

    let runner = DiscordRunner::new(chain, bot_name);
    let mut client = serenity::Client::builder(&config.bot_token, default_intents())
        .event_handler(runner)
        .await
        .context("Failed to build Discord client")?;

    client.start().await.context("Discord client stopped")?;
    Ok(())
}

/// Reads MAX_HISTORY from the environment: required, non-negative; 0 disables
/// history entirely (single-turn mode).
fn load_max_history() -> Result<usize> {
    let raw = env::var("MAX_HISTORY")
        .map_err(|_| anyhow!("MAX_HISTORY not set (use 0 to disable history)"))?;
    raw.trim()
        .parse::<usize>()
        .map_err(|_| anyhow!("MAX_HISTORY must be a non-negative integer, got '{}'", raw))
}
