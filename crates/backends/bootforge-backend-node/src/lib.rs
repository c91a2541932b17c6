//! Node.js generator backend — emits `server.js` and `main.js` for a
//! pluggable application backend.
//!
//! The open-ended plugin set is resolved at generation time: the
//! manifest's ordered module list is baked into the server program as a
//! fixed sequential load chain, and the entry point is specialized for
//! the target platform (plain Node vs Electron shell).

mod entry;
mod imports;
mod server;

pub use entry::compile_main;
pub use imports::compile_module_load_chain;
pub use server::compile_server;

use bootforge_core::error::CoreError;
use bootforge_core::pipeline::{GeneratedArtifact, Generator, GeneratorInput};

/// Generator for CommonJS (`require`) Node.js backends.
pub struct NodeBackendGenerator;

impl Generator for NodeBackendGenerator {
    fn name(&self) -> &str {
        "node"
    }

    fn compile(&self, input: &GeneratorInput) -> Result<Vec<GeneratedArtifact>, CoreError> {
        let manifest = &input.manifest;
        manifest.validate()?;

        let server = compile_server(&manifest.backend_modules);
        let main = compile_main(manifest.target, &manifest.config)?;

        Ok(vec![
            GeneratedArtifact {
                path: input.project_dir.join(&manifest.server_path),
                text: server,
            },
            GeneratedArtifact {
                path: input.project_dir.join(&manifest.main_path),
                text: main,
            },
        ])
    }
}
