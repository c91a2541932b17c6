use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use bootforge_backend_node::NodeBackendGenerator;
use bootforge_core::pipeline::{write_artifacts, Generator, GeneratorInput};
use bootforge_core::project::ApplicationManifest;

#[derive(Parser)]
#[command(name = "bootforge", about = "Bootstrap-code generator for pluggable Node backends")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the server and entry-point modules from a manifest.
    Generate {
        /// Path to the application manifest (bootforge.json).
        #[arg(long, default_value = "bootforge.json")]
        manifest: PathBuf,
        /// Directory the manifest's output paths are resolved against.
        /// Defaults to the manifest's directory.
        #[arg(long)]
        project_dir: Option<PathBuf>,
        /// Print the artifacts to stdout instead of writing them.
        #[arg(long)]
        dry_run: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Generate {
            manifest,
            project_dir,
            dry_run,
        } => generate(manifest, project_dir, dry_run),
    }
}

fn generate(
    manifest_path: PathBuf,
    project_dir: Option<PathBuf>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let manifest = ApplicationManifest::from_file(&manifest_path)
        .with_context(|| format!("failed to load {}", manifest_path.display()))?;
    let project_dir = project_dir.unwrap_or_else(|| {
        manifest_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
    });

    eprintln!(
        "[generate] {}: {} backend module(s), target {:?}",
        manifest.name,
        manifest.backend_modules.len(),
        manifest.target
    );

    let generator = NodeBackendGenerator;
    let input = GeneratorInput {
        manifest,
        project_dir,
    };
    let artifacts = generator
        .compile(&input)
        .context("generation failed")?;

    if dry_run {
        for artifact in &artifacts {
            println!("=== {} ===", artifact.path.display());
            println!("{}", artifact.text);
        }
        return Ok(());
    }

    write_artifacts(&artifacts).context("failed to write generated files")?;
    for artifact in &artifacts {
        eprintln!("[generate] wrote {}", artifact.path.display());
    }
    Ok(())
}
