use clap::Parser;
use std::path::PathBuf;
use thingsctl_config::ConfigLoader;

mod commands;

use commands::Commands;

#[derive(Parser, Debug)]
#[command(name = "thingsctl")]
#[command(about = "Drive the Things task manager through its scripting bridge", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to a JSON configuration file (overrides THINGSCTL_CONFIG)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    if let Err(e) = thingsctl_utils::tracing::init() {
        eprintln!("failed to initialize logging: {e}");
    }

    let cli = Cli::parse();

    let mut loader = ConfigLoader::new();
    if let Some(path) = cli.config {
        loader = loader.file(path);
    }
    let config = loader.load()?;

    // Serving MCP is the default so the binary can be registered as-is
    cli.command.unwrap_or(Commands::Mcp).execute(config).await
}
