use anyhow::{anyhow, Result};
use clap::Parser;
use database::{initialize_database, DatabaseConfig};
use std::path::PathBuf;
use tracing::info;

mod logging;

/// Quill - news, comments, and personal notes
#[derive(Parser)]
#[command(name = "quill")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Port to listen on
    #[arg(short, long, default_value_t = 3030, env = "QUILL_PORT")]
    port: u16,

    /// Path to the sqlite database file
    #[arg(short, long, default_value = "data/quill.db", env = "QUILL_DATABASE")]
    database: PathBuf,

    /// Skip seeding development data into an empty database
    #[arg(long)]
    no_seed: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present; absence is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let data_path = cli
        .database
        .parent()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"));
    let _guard = logging::init_logging(&data_path, cli.verbose)
        .map_err(|e| anyhow!("failed to initialize logging: {}", e))?;

    info!("=== Quill starting ===");

    let db = initialize_database(DatabaseConfig::new().with_database_path(cli.database)).await?;

    let config = api::ApiConfig::new()
        .with_port(cli.port)
        .with_test_data(!cli.no_seed);

    api::start_server_with_config(db, config)
        .await
        .map_err(|e| anyhow!("server error: {}", e))?;

    logging::log_shutdown();
    Ok(())
}
