//! Compile the ordered backend-module list into a chain of sequential
//! load steps.

use std::fmt::Write;

use bootforge_core::project::{BackendModule, ExportBinding};

/// Compile one `.then(...)` load step per module, in list order.
///
/// The fragment is spliced after a `Promise.resolve()` seed in the server
/// program, so each step starts on a fresh indented line and an empty list
/// compiles to an empty fragment (the surrounding chain stays valid, no
/// dangling separator).
///
/// Steps are strictly sequential: step *n+1* is reached only after step
/// *n*'s registration resolves, because container registration order
/// affects downstream binding resolution. A default-export module goes
/// through the program's `load` helper; a named export is picked off the
/// raw module object and registered directly.
pub fn compile_module_load_chain(modules: &[BackendModule]) -> String {
    let mut out = String::new();
    for module in modules {
        let step = match &module.export {
            ExportBinding::Default => format!(
                "Promise.resolve(require('{}')).then(load)",
                module.specifier
            ),
            ExportBinding::Named(name) => format!(
                "Promise.resolve(require('{}')).then(function (raw) {{ return container.load(raw.{name}); }})",
                module.specifier
            ),
        };
        let _ = write!(out, "\n    .then(function () {{ return {step} }})");
    }
    out
}
