pub mod generator;

pub use generator::{write_artifacts, GeneratedArtifact, Generator, GeneratorInput};
