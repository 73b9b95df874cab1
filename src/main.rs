//! jarmap - JAR module dependency diagrams

mod config;
mod graph_cli;
mod package_cli;

use clap::{Parser, Subcommand};
use config::Config;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "jarmap")]
#[command(about = "Module dependency diagrams for JAR archives", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the module dependency diagram of a JAR
    Graph(graph_cli::GraphArgs),
    /// Show MANIFEST.MF attributes
    Manifest(graph_cli::ManifestArgs),
    /// Download a JAR by Maven coordinate
    Fetch(package_cli::FetchArgs),
    /// Fetch a JAR, show its manifest and write both diagrams
    Inspect(package_cli::InspectArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();

    match cli.command {
        Commands::Graph(args) => graph_cli::cmd_graph(args, &config)?,
        Commands::Manifest(args) => graph_cli::cmd_manifest(args, &config)?,
        Commands::Fetch(args) => package_cli::cmd_fetch(args, &config).await?,
        Commands::Inspect(args) => package_cli::cmd_inspect(args, &config).await?,
    }

    Ok(())
}
