use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;

/// Host platform the generated entry point targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetPlatform {
    /// Plain Node.js host.
    #[default]
    Node,
    /// Electron shell. Gates the `process.versions.electron` recovery shim
    /// in the generated entry point.
    Electron,
}

impl TargetPlatform {
    pub fn is_electron(self) -> bool {
        matches!(self, Self::Electron)
    }
}

/// Which export of a backend module carries its container bindings.
///
/// A tagged choice rather than a `"default"` sentinel string, so a module
/// whose binding export is literally named `default` stays expressible as
/// `Named("default")`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportBinding {
    /// Use the module's default export.
    Default,
    /// Use the named export.
    Named(String),
}

/// One backend module to load into the composition container.
///
/// Manifest entries come in two shapes: a plain string (module specifier,
/// default export) or `{ "specifier": "...", "export": "Name" }`. Omitting
/// `export` selects the default export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendModule {
    /// Module specifier passed to the generated `require` call.
    pub specifier: String,
    pub export: ExportBinding,
}

impl BackendModule {
    /// A module loaded through its default export.
    pub fn new(specifier: impl Into<String>) -> Self {
        Self {
            specifier: specifier.into(),
            export: ExportBinding::Default,
        }
    }

    /// A module loaded through a named export.
    pub fn named(specifier: impl Into<String>, export: impl Into<String>) -> Self {
        Self {
            specifier: specifier.into(),
            export: ExportBinding::Named(export.into()),
        }
    }
}

impl<'de> Deserialize<'de> for BackendModule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Plain(String),
            Mapped {
                specifier: String,
                export: Option<String>,
            },
        }
        match Raw::deserialize(deserializer)? {
            Raw::Plain(specifier) => Ok(BackendModule::new(specifier)),
            Raw::Mapped { specifier, export } => Ok(BackendModule {
                specifier,
                export: match export {
                    Some(name) => ExportBinding::Named(name),
                    None => ExportBinding::Default,
                },
            }),
        }
    }
}

impl Serialize for BackendModule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Raw<'a> {
            specifier: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            export: Option<&'a str>,
        }
        Raw {
            specifier: &self.specifier,
            export: match &self.export {
                ExportBinding::Default => None,
                ExportBinding::Named(name) => Some(name),
            },
        }
        .serialize(serializer)
    }
}

/// Top-level application manifest (bootforge.json).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationManifest {
    pub name: String,
    #[serde(default)]
    pub target: TargetPlatform,
    /// Backend modules loaded into the composition container, in order.
    ///
    /// Order is load order: later modules may depend on bindings that
    /// earlier modules registered.
    #[serde(default)]
    pub backend_modules: Vec<BackendModule>,
    /// Opaque application config embedded verbatim (pretty-printed) into
    /// the generated entry point. Not validated here.
    #[serde(default = "default_config")]
    pub config: serde_json::Value,
    /// Output path of the server bootstrap artifact, relative to the
    /// project directory.
    #[serde(default = "default_server_path")]
    pub server_path: PathBuf,
    /// Output path of the process entry-point artifact.
    #[serde(default = "default_main_path")]
    pub main_path: PathBuf,
}

fn default_config() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

fn default_server_path() -> PathBuf {
    PathBuf::from("src-gen/backend/server.js")
}

fn default_main_path() -> PathBuf {
    PathBuf::from("src-gen/backend/main.js")
}

impl ApplicationManifest {
    /// Load a manifest from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, CoreError> {
        let text = fs::read_to_string(path)?;
        serde_json::from_str(&text).map_err(|e| CoreError::Manifest {
            file: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Check the backend-module list before any text is generated.
    ///
    /// Rejects empty specifiers, duplicate specifiers, specifiers that
    /// cannot sit inside a single-quoted `require('...')` (quotes,
    /// backslashes, control characters), and named exports that are not
    /// valid JS identifiers (a named export is spliced into a
    /// `raw.<name>` member access in the output).
    pub fn validate(&self) -> Result<(), CoreError> {
        let mut seen: Vec<&str> = Vec::with_capacity(self.backend_modules.len());
        for module in &self.backend_modules {
            if module.specifier.is_empty() {
                return Err(CoreError::ModuleSpec(
                    "empty module specifier".to_string(),
                ));
            }
            if module
                .specifier
                .chars()
                .any(|c| c == '\'' || c == '\\' || c.is_control())
            {
                return Err(CoreError::ModuleSpec(format!(
                    "module specifier contains quote, backslash, or control character: {:?}",
                    module.specifier
                )));
            }
            if seen.contains(&module.specifier.as_str()) {
                return Err(CoreError::ModuleSpec(format!(
                    "duplicate module specifier: {}",
                    module.specifier
                )));
            }
            seen.push(&module.specifier);
            if let ExportBinding::Named(name) = &module.export {
                if !is_js_identifier(name) {
                    return Err(CoreError::ModuleSpec(format!(
                        "export of {} is not a valid identifier: {name:?}",
                        module.specifier
                    )));
                }
            }
        }
        Ok(())
    }
}

/// JS identifier check: ID_Start/ID_Continue plus `$` and `_`.
fn is_js_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if unicode_ident::is_xid_start(c) || c == '$' || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| unicode_ident::is_xid_continue(c) || c == '$')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest_with(modules: Vec<BackendModule>) -> ApplicationManifest {
        ApplicationManifest {
            name: "app".to_string(),
            target: TargetPlatform::Node,
            backend_modules: modules,
            config: default_config(),
            server_path: default_server_path(),
            main_path: default_main_path(),
        }
    }

    #[test]
    fn plain_string_entry_is_default_export() {
        let m: BackendModule = serde_json::from_str("\"@app/feature\"").unwrap();
        assert_eq!(m, BackendModule::new("@app/feature"));
    }

    #[test]
    fn object_entry_with_export() {
        let m: BackendModule =
            serde_json::from_str(r#"{ "specifier": "pkgB", "export": "Foo" }"#).unwrap();
        assert_eq!(m, BackendModule::named("pkgB", "Foo"));
    }

    #[test]
    fn object_entry_without_export_is_default() {
        let m: BackendModule = serde_json::from_str(r#"{ "specifier": "pkgA" }"#).unwrap();
        assert_eq!(m, BackendModule::new("pkgA"));
    }

    #[test]
    fn export_literally_named_default_stays_named() {
        // No sentinel string: { "export": "default" } is a named export.
        let m: BackendModule =
            serde_json::from_str(r#"{ "specifier": "pkgC", "export": "default" }"#).unwrap();
        assert_eq!(m.export, ExportBinding::Named("default".to_string()));
    }

    #[test]
    fn serialize_round_trip() {
        let modules = vec![
            BackendModule::new("pkgA"),
            BackendModule::named("pkgB", "Foo"),
        ];
        let json = serde_json::to_string(&modules).unwrap();
        let back: Vec<BackendModule> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, modules);
    }

    #[test]
    fn manifest_defaults() {
        let m: ApplicationManifest =
            serde_json::from_str(r#"{ "name": "app" }"#).unwrap();
        assert_eq!(m.target, TargetPlatform::Node);
        assert!(m.backend_modules.is_empty());
        assert_eq!(m.config, serde_json::json!({}));
        assert_eq!(m.server_path, PathBuf::from("src-gen/backend/server.js"));
        assert_eq!(m.main_path, PathBuf::from("src-gen/backend/main.js"));
    }

    #[test]
    fn manifest_electron_target() {
        let m: ApplicationManifest =
            serde_json::from_str(r#"{ "name": "app", "target": "electron" }"#).unwrap();
        assert!(m.target.is_electron());
    }

    #[test]
    fn validate_accepts_ordered_list() {
        let m = manifest_with(vec![
            BackendModule::new("pkgA"),
            BackendModule::named("pkgB", "Foo"),
        ]);
        m.validate().unwrap();
    }

    #[test]
    fn validate_rejects_duplicate_specifier() {
        let m = manifest_with(vec![
            BackendModule::new("pkgA"),
            BackendModule::named("pkgA", "Foo"),
        ]);
        let err = m.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate module specifier: pkgA"));
    }

    #[test]
    fn validate_rejects_empty_specifier() {
        let m = manifest_with(vec![BackendModule::new("")]);
        assert!(m.validate().is_err());
    }

    #[test]
    fn validate_rejects_quote_in_specifier() {
        // "pkg'A" would emit require('pkg'A') — unbalanced quote.
        let m = manifest_with(vec![BackendModule::new("pkg'A")]);
        let err = m.validate().unwrap_err();
        assert!(err.to_string().contains("quote, backslash, or control"));
    }

    #[test]
    fn validate_rejects_backslash_and_control_in_specifier() {
        let m = manifest_with(vec![BackendModule::new("pkg\\A")]);
        assert!(m.validate().is_err());
        let m = manifest_with(vec![BackendModule::new("pkg\nA")]);
        assert!(m.validate().is_err());
    }

    #[test]
    fn validate_accepts_scoped_specifiers() {
        let m = manifest_with(vec![BackendModule::new("@my-app/files")]);
        m.validate().unwrap();
    }

    #[test]
    fn validate_rejects_non_identifier_export() {
        let m = manifest_with(vec![BackendModule::named("pkgA", "not-an-ident")]);
        let err = m.validate().unwrap_err();
        assert!(err.to_string().contains("not a valid identifier"));
    }

    #[test]
    fn identifier_check() {
        assert!(is_js_identifier("Foo"));
        assert!(is_js_identifier("_private"));
        assert!(is_js_identifier("$inject"));
        assert!(is_js_identifier("f00"));
        assert!(!is_js_identifier(""));
        assert!(!is_js_identifier("0foo"));
        assert!(!is_js_identifier("a.b"));
        assert!(!is_js_identifier("a b"));
    }

    #[test]
    fn from_file_reports_parse_errors_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bootforge.json");
        fs::write(&path, "{ not json").unwrap();
        let err = ApplicationManifest::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("bootforge.json"));
    }
}
