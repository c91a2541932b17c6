//! Compile the process entry-point module (`main.js`).

use bootforge_core::error::CoreError;
use bootforge_core::project::TargetPlatform;

/// Recovers `process.versions.electron` on forked child processes.
///
/// Children started by the cluster facility do not inherit the marker, so
/// the launcher passes an `electron-version=<value>` argument and the shim
/// copies it back. Emitted only for the Electron target; plain Node hosts
/// get no trace of it.
const ELECTRON_VERSION_SHIM: &str = r#"
// Forked child processes do not inherit the electron version marker, so
// recover it from the electron-version=<value> argument when present.
if (process.versions && typeof process.versions.electron === 'undefined') {
    const argv = process.argv.slice(2);
    const index = argv.findIndex(arg => arg.startsWith('electron-version='));
    if (index !== -1) {
        process.versions.electron = argv[index].split('electron-version=').pop();
    }
}
"#;

/// Compile the entry-point program.
///
/// On load it installs the application config into the process-wide
/// provider slot (before any other module can read it), applies the
/// Electron shim when targeted, hands the server module's path to the
/// cluster facility, and forwards the bound port to the parent process
/// when a parent channel exists. The address promise is the module's
/// export.
pub fn compile_main(
    target: TargetPlatform,
    config: &serde_json::Value,
) -> Result<String, CoreError> {
    let config_text = serde_json::to_string_pretty(config)?;
    let shim = if target.is_electron() {
        ELECTRON_VERSION_SHIM
    } else {
        ""
    };
    Ok(format!(
        r#"// @ts-check
const {{ BackendApplicationConfigProvider }} = require('@bootforge/core/lib/node/backend-application-config-provider');
BackendApplicationConfigProvider.set({config_text});
{shim}
const serverPath = require('path').resolve(__dirname, 'server');
const address = require('@bootforge/core/lib/node/cluster/main').default(serverPath);
address.then(function (address) {{
    if (process && process.send) {{
        process.send(address.port.toString());
    }}
}});
module.exports = address;
"#
    ))
}
