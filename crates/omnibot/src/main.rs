//! omnibot binary.
//!
//! Start the relay with:
//! ```bash
//! BOT_TOKEN=xxx OPENROUTER_API_KEY=yyy cargo run -p omnibot
//! ```
//!
//! Runs both front doors in one process: the HTTP server on a spawned task
//! and the Telegram polling dispatcher on the main one.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use omnibot_core::Config;
use omnibot_router::Router;
use omnibot_services::{AiClient, SpeechClient, WeatherClient, WikiClient};
use omnibot_store::{FileStore, NotesStore};
use omnibot_telegram::BotFront;
use omnibot_web::AppState;

/// All-in-one AI bot - Telegram and web chat over shared tooling.
#[derive(Parser, Debug)]
#[command(name = "omnibot")]
#[command(about = "Chat-bot relay with Telegram and web front doors")]
struct Args {
    /// HTTP front door port (overrides the PORT environment variable)
    #[arg(short, long)]
    port: Option<u16>,

    /// Verbose logging (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Environment files are optional; real deployments set variables directly.
    let _ = dotenvy::from_filename(".env.local").or_else(|_| dotenvy::dotenv());

    let filter = match args.verbose {
        0 => "omnibot=info,teloxide=warn",
        1 => "omnibot=debug,teloxide=info",
        2 => "omnibot=trace,teloxide=debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Missing credentials are fatal; the process must not come up half-wired.
    let mut config = Config::from_env()?;
    if let Some(port) = args.port {
        config.http_port = port;
    }
    config.ensure_dirs()?;

    let files = Arc::new(FileStore::new(
        config.uploads_dir(),
        config.public_base_url.clone(),
    ));
    let notes = Arc::new(NotesStore::new(config.notes_file()));

    let router = Arc::new(Router::new(
        AiClient::new(&config.ai_api_key, &config.ai_model),
        WikiClient::new(),
        WeatherClient::new(config.weather_api_key.clone()),
        SpeechClient::new(),
        Arc::clone(&files),
        Arc::clone(&notes),
    ));

    let port = config.http_port;
    let state = AppState::new(Arc::clone(&router), Arc::clone(&files));
    tokio::spawn(async move {
        if let Err(e) = omnibot_web::serve(port, state).await {
            tracing::error!(error = %e, "web front door exited");
        }
    });

    let bot = BotFront::new(&config.bot_token, router, files);
    match bot.username().await {
        Ok(username) => {
            tracing::info!(username = %username, "bot initialized");
            println!("\nomnibot");
            println!("   Bot: @{username}");
            println!("   Web: http://0.0.0.0:{port}");
        }
        Err(e) => {
            tracing::error!(error = %e, "could not reach the Telegram API");
            return Err(e.into());
        }
    }

    if let Err(e) = bot.set_commands().await {
        tracing::warn!(error = %e, "could not register the command menu");
    }

    println!("\nOpen Telegram and send /start to begin. Press Ctrl+C to stop.\n");

    bot.run().await;

    Ok(())
}
