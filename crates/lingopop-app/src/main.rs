use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use lingopop_config::Config;
use lingopop_gateway::GeminiClient;
use tokio::signal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

pub mod controller;
pub mod events;
pub mod io;
pub mod render;
pub mod state;
pub mod ui;

#[cfg(test)]
mod tests;

use self::controller::AppController;
use self::state::AppState;

#[derive(Parser)]
#[command(name = "lingopop", about = "AI dictionary for language learners")]
struct Args {
    /// Native language code, e.g. en
    #[arg(long)]
    native: Option<String>,
    /// Language to learn, e.g. es
    #[arg(long)]
    target: Option<String>,
    /// Notebook file location
    #[arg(long)]
    notebook: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let args = Args::parse();

    let mut config = Config::new();
    if args.native.is_some() {
        config.native_lang = args.native;
    }
    if args.target.is_some() {
        config.target_lang = args.target;
    }
    if let Some(path) = args.notebook {
        config.storage.notebook_path = path;
    }

    if config.gateway.api_key.is_empty() {
        tracing::warn!("GEMINI_API_KEY is not set; lookups will fail");
    }

    let gateway = Arc::new(GeminiClient::new(config.gateway.clone()));
    let state = Arc::new(AppState::new(config));

    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks(gateway);

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("shutdown requested");
        }
        result = tasks.join_next() => {
            match result {
                Some(Ok(Ok(()))) => tracing::info!("task finished"),
                Some(Ok(Err(e))) => tracing::error!("task exited: {e}"),
                Some(Err(e)) => tracing::error!("task panicked: {e}"),
                None => {}
            }
        }
    }

    controller.shutdown();
    tasks.shutdown().await;
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
