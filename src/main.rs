//! Bloglist - blog entry REST service

use anyhow::{Context, Result};
use bloglist_backend::{app, AppState, Config};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line overrides for the environment configuration
#[derive(Parser, Debug)]
#[command(name = "bloglist")]
#[command(about = "Blog entry REST service")]
struct Cli {
    /// Port to listen on
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Path to the SQLite database
    #[arg(long, env = "DATABASE_PATH")]
    database_path: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    let mut config = Config::from_env()?;

    let cli = Cli::parse();
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(path) = cli.database_path {
        config.database_path = path;
    }

    info!("Connecting to database at {}", config.database_path);
    let state = AppState::from_config(&config).context("Failed to open database")?;

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server running on {}", addr);

    axum::serve(listener, app(state))
        .await
        .context("Server error")?;

    Ok(())
}

/// Initialize tracing
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bloglist_backend=debug,bloglist=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
