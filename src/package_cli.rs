//! fetch / inspect subcommands

use crate::config::Config;
use crate::graph_cli::{
    manifest_or_empty, open_archive, print_manifest, render, renderer, write_manifest_diagram,
    write_module_diagram,
};
use anyhow::Context;
use clap::Args;
use fetch::{
    ArtifactFetcher, Coordinate, FetchConfig, FetchedArtifact, LocalRepository, DEFAULT_LOCAL_REPO,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct FetchArgs {
    /// Maven coordinate, group:artifact:version
    pub coordinate: String,
    /// Download directory
    #[arg(short, long, default_value = ".")]
    pub dir: PathBuf,
    /// Copy from a local Maven repository instead of downloading (no value: ~/.m2/repository)
    #[arg(long, value_name = "DIR", num_args = 0..=1, default_missing_value = DEFAULT_LOCAL_REPO)]
    pub local_repo: Option<String>,
    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct InspectArgs {
    /// Maven coordinate, group:artifact:version
    pub coordinate: String,
    /// Directory for the JAR and the generated files
    #[arg(short, long, default_value = ".")]
    pub dir: PathBuf,
    /// Copy from a local Maven repository instead of downloading (no value: ~/.m2/repository)
    #[arg(long, value_name = "DIR", num_args = 0..=1, default_missing_value = DEFAULT_LOCAL_REPO)]
    pub local_repo: Option<String>,
    /// Root namespace (four segments)
    #[arg(long)]
    pub root: Option<String>,
    /// Render images with Graphviz
    #[arg(short, long)]
    pub render: bool,
    /// Image format passed to Graphviz
    #[arg(long)]
    pub format: Option<String>,
}

pub async fn cmd_fetch(args: FetchArgs, config: &Config) -> anyhow::Result<()> {
    let coordinate: Coordinate = args.coordinate.parse()?;
    let fetched = fetch_artifact(
        &coordinate,
        &args.dir,
        args.local_repo.as_deref(),
        &config.fetch,
    )
    .await?;

    if args.json {
        let report = FetchReport {
            coordinate: &coordinate,
            artifact: &fetched,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_fetched(&fetched);
    }
    Ok(())
}

pub async fn cmd_inspect(args: InspectArgs, config: &Config) -> anyhow::Result<()> {
    let coordinate: Coordinate = args.coordinate.parse()?;
    let fetched = fetch_artifact(
        &coordinate,
        &args.dir,
        args.local_repo.as_deref(),
        &config.fetch,
    )
    .await?;
    print_fetched(&fetched);

    let archive = open_archive(&fetched.path)?;
    let manifest = manifest_or_empty(&archive);
    print_manifest(&manifest);

    let stem = format!("{}-{}", coordinate.artifact, coordinate.version);
    let manifest_dot = args.dir.join(format!("{}-manifest.dot", stem));
    let modules_dot = args.dir.join(format!("{}-modules.dot", stem));

    write_manifest_diagram(&archive, &manifest, &manifest_dot)?;
    println!("Saved to: {}", manifest_dot.display());

    let root = args.root.as_deref().unwrap_or(&config.root_namespace);
    let graph = write_module_diagram(&archive, root, &modules_dot)?;
    println!(
        "Saved to: {} ({} modules, {} dependencies)",
        modules_dot.display(),
        graph.len(),
        graph.edge_count()
    );

    if args.render {
        let renderer = renderer(config, args.format.as_deref());
        render(&renderer, &manifest_dot);
        render(&renderer, &modules_dot);
    }

    Ok(())
}

#[derive(Serialize)]
struct FetchReport<'a> {
    coordinate: &'a Coordinate,
    artifact: &'a FetchedArtifact,
}

async fn fetch_artifact(
    coordinate: &Coordinate,
    dir: &Path,
    local_repo: Option<&str>,
    config: &FetchConfig,
) -> anyhow::Result<FetchedArtifact> {
    let config = with_local_repo(config, local_repo)?;

    let fetcher: Box<dyn ArtifactFetcher> = config.fetcher()?;
    tracing::info!("Fetching {} from {}", coordinate, fetcher.describe());

    Ok(fetcher.fetch(coordinate, dir).await?)
}

/// `--local-repo` overrides the configured source
fn with_local_repo(config: &FetchConfig, local_repo: Option<&str>) -> anyhow::Result<FetchConfig> {
    let mut config = config.clone();
    if let Some(value) = local_repo {
        let root = LocalRepository::resolve_root(value)
            .context("Cannot locate the home directory for ~/.m2/repository")?;
        config.local_repo = Some(root);
    }
    Ok(config)
}

fn print_fetched(fetched: &FetchedArtifact) {
    println!("Saved to: {}", fetched.path.display());
    println!("Size: {} bytes", fetched.size);
    println!("SHA-256: {}", fetched.sha256);
}
