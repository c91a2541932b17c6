use std::fs;
use std::path::PathBuf;

use crate::error::CoreError;
use crate::project::ApplicationManifest;

/// Input to a generator.
pub struct GeneratorInput {
    /// The application manifest: module list, target platform, config,
    /// output paths.
    pub manifest: ApplicationManifest,
    /// Directory that the manifest's output paths are resolved against.
    pub project_dir: PathBuf,
}

/// A single generated output file.
///
/// Write-once: regeneration overwrites, never merges or patches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    pub path: PathBuf,
    pub text: String,
}

/// Generator trait — emits bootstrap source files from an application
/// manifest.
pub trait Generator {
    /// Name of this generator (e.g., "node").
    fn name(&self) -> &str;

    /// Produce the artifacts without touching the filesystem.
    ///
    /// Same input yields byte-identical output; writing is a separate step
    /// (see [`write_artifacts`]).
    fn compile(&self, input: &GeneratorInput) -> Result<Vec<GeneratedArtifact>, CoreError>;
}

/// Write artifacts to disk, creating parent directories as needed.
/// Existing files are overwritten.
pub fn write_artifacts(artifacts: &[GeneratedArtifact]) -> Result<(), CoreError> {
    for artifact in artifacts {
        if let Some(parent) = artifact.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&artifact.path, &artifact.text)?;
    }
    Ok(())
}
