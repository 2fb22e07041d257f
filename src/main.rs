mod cli;

use anyhow::Result;
use bestiary::config::BestiaryConfig;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bestiary", version, about = "Monster lookup MCP server backed by a vector database")]
struct Cli {
    /// Config file (defaults to ~/.bestiary/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the MCP server (stdio transport)
    Serve,
    /// Load a JSON array of monsters into the collection
    Load {
        /// Path to the monsters JSON file
        file: PathBuf,
    },
    /// Look up a monster by name
    Get { name: String },
    /// List the monsters closest to the named one
    Similar {
        name: String,
        /// Print full records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check store connectivity and collection settings
    Doctor,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => BestiaryConfig::load_from(path)?,
        None => BestiaryConfig::load()?,
    };

    // Log to stderr so stdout stays clean for MCP JSON-RPC.
    let filter = EnvFilter::try_new(&config.server.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Serve => bestiary::server::serve_stdio(config).await?,
        Command::Load { file } => cli::load::load(&config, &file).await?,
        Command::Get { name } => cli::lookup::get(&config, &name).await?,
        Command::Similar { name, json } => cli::lookup::similar(&config, &name, json).await?,
        Command::Doctor => cli::doctor::doctor(&config).await?,
    }

    Ok(())
}
