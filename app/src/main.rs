#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

use std::sync::Arc;

use clap::{Parser, Subcommand};
use grayward_config::Config;
use grayward_store::StorageEngine;
use grayward_telegram::GraywardBot;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "grayward")]
#[command(about = "grayward moderation bot", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the bot and the read-only HTTP API
    Run,
    /// Initialize configuration
    Init,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Run => {
            let config = Config::load()?;
            info!("Loaded config from ~/grayward/config.json");

            // A dead database is degraded service, not a startup failure.
            let engine = Arc::new(
                StorageEngine::connect(
                    &config.database.reports_url,
                    &config.database.persons_url,
                )
                .await,
            );
            engine.init_schema().await;

            let api_engine = Arc::clone(&engine);
            let port = config.http.port;
            tokio::spawn(async move {
                if let Err(e) = grayward_api::serve(api_engine, port).await {
                    error!("HTTP API server error: {e}");
                }
            });

            let bot = GraywardBot::new(config.telegram.bot_token, engine);
            bot.run().await?;
        }
        Commands::Init => {
            Config::create_config()?;
        }
        Commands::Version => {
            println!("grayward {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
