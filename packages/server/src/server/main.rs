// Main entry point for the gifting API server

use anyhow::{Context, Result};
use clap::Parser;
use gifting_core::{
    common::connect, domains::vendors::seed_samples, kernel::ServerDeps, server::build_app,
    Config,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "server", about = "Gifting platform backend")]
struct Cli {
    /// Insert the demo vendors when the database is empty
    #[arg(long)]
    seed: bool,

    /// Listen port (overrides PORT)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,gifting_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting gifting platform API");

    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(port) = cli.port {
        config.port = port;
    }
    if config.google_api_key.is_none() {
        tracing::warn!("GOOGLE_API_KEY not set; card extraction and web search are disabled");
    }

    tracing::info!("Connecting to database...");
    let pool = connect(&config.database_url).await?;
    tracing::info!("Database ready");

    if cli.seed {
        let inserted = seed_samples(&pool).await?;
        tracing::info!(inserted, "Seed complete");
    }

    tokio::fs::create_dir_all(&config.upload_dir)
        .await
        .with_context(|| format!("Failed to create {}", config.upload_dir.display()))?;

    let deps = ServerDeps::from_config(&config, pool)?;
    let app = build_app(deps);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
