//! graph / manifest subcommands

use crate::config::Config;
use anyhow::Context;
use archive::{Archive, Manifest};
use clap::Args;
use modgraph::{DotGenerator, ManifestDiagram, ModuleAnalyzer, ModuleGraph, RenderOutcome, Renderer};
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct GraphArgs {
    /// JAR file
    pub jar: PathBuf,
    /// Output DOT file
    #[arg(short, long, default_value = "modules.dot")]
    pub output: PathBuf,
    /// Root namespace (four segments), e.g. org.apache.commons.math3
    #[arg(long)]
    pub root: Option<String>,
    /// Render an image with Graphviz
    #[arg(short, long)]
    pub render: bool,
    /// Image format passed to Graphviz
    #[arg(long)]
    pub format: Option<String>,
    /// JSON output
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ManifestArgs {
    /// JAR file
    pub jar: PathBuf,
    /// Also write the manifest diagram to this DOT file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Render an image with Graphviz (needs --output)
    #[arg(short, long, requires = "output")]
    pub render: bool,
    /// Image format passed to Graphviz
    #[arg(long)]
    pub format: Option<String>,
    /// JSON output
    #[arg(long)]
    pub json: bool,
}

pub fn cmd_graph(args: GraphArgs, config: &Config) -> anyhow::Result<()> {
    let archive = open_archive(&args.jar)?;
    tracing::info!("Analyzing {}", args.jar.display());

    let root = args.root.as_deref().unwrap_or(&config.root_namespace);
    let graph = write_module_diagram(&archive, root, &args.output)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&graph)?);
    } else {
        print_graph(&graph);
        println!("Saved to: {}", args.output.display());
    }

    if args.render {
        render(&renderer(config, args.format.as_deref()), &args.output);
    }

    Ok(())
}

pub fn cmd_manifest(args: ManifestArgs, config: &Config) -> anyhow::Result<()> {
    let archive = open_archive(&args.jar)?;
    let manifest = manifest_or_empty(&archive);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&manifest)?);
    } else {
        print_manifest(&manifest);
    }

    if let Some(output) = &args.output {
        write_manifest_diagram(&archive, &manifest, output)?;
        println!("Saved to: {}", output.display());

        if args.render {
            render(&renderer(config, args.format.as_deref()), output);
        }
    }

    Ok(())
}

pub(crate) fn open_archive(path: &Path) -> anyhow::Result<Archive> {
    Archive::open(path).with_context(|| format!("Failed to read archive {}", path.display()))
}

/// Missing MANIFEST.MF is not an error: report it and carry on with no attributes.
pub(crate) fn manifest_or_empty(archive: &Archive) -> Manifest {
    match archive.manifest() {
        Some(manifest) => manifest.clone(),
        None => {
            tracing::info!("MANIFEST.MF not found in {}", archive.name());
            Manifest::default()
        }
    }
}

pub(crate) fn write_module_diagram(archive: &Archive, root: &str, output: &Path) -> anyhow::Result<ModuleGraph> {
    let graph = ModuleAnalyzer::new()
        .with_root_namespace(root)
        .synthesize(archive);

    DotGenerator::new()
        .with_title(archive.name())
        .emit(&graph, output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    Ok(graph)
}

pub(crate) fn write_manifest_diagram(archive: &Archive, manifest: &Manifest, output: &Path) -> anyhow::Result<()> {
    let dot = ManifestDiagram::new().generate(manifest, archive.name());
    std::fs::write(output, dot).with_context(|| format!("Failed to write {}", output.display()))?;
    Ok(())
}

pub(crate) fn renderer(config: &Config, format: Option<&str>) -> Renderer {
    Renderer::new()
        .with_tool(&config.render_tool)
        .with_format(format.unwrap_or(&config.image_format))
}

/// Rendering never fails the command; the DOT file is already on disk.
pub(crate) fn render(renderer: &Renderer, description: &Path) {
    match renderer.render_file(description) {
        RenderOutcome::Rendered(path) => println!("Image saved to: {}", path.display()),
        RenderOutcome::ToolUnavailable => println!(
            "Graphviz ({}) not found in PATH, skipping image. Install it, e.g. `sudo apt install graphviz`.",
            renderer.tool()
        ),
        RenderOutcome::Failed(message) => {
            tracing::warn!("Rendering {} failed: {}", description.display(), message);
        }
    }
}

pub(crate) fn print_manifest(manifest: &Manifest) {
    println!("=== MANIFEST.MF attributes ===");
    print!("{}", manifest.to_table());
}

fn print_graph(graph: &ModuleGraph) {
    println!(
        "\nFound {} modules, {} dependencies:\n",
        graph.len(),
        graph.edge_count()
    );
    for (module, deps) in graph.iter() {
        let deps: Vec<&str> = deps.iter().map(String::as_str).collect();
        if deps.is_empty() {
            println!("  {}", module);
        } else {
            println!("  {} -> {}", module, deps.join(", "));
        }
    }
    println!();
}
