mod manifest;

pub use manifest::{ApplicationManifest, BackendModule, ExportBinding, TargetPlatform};
