//! Compile the server bootstrap module (`server.js`).

use bootforge_core::project::BackendModule;

use crate::imports::compile_module_load_chain;

/// Compile the server program: a module exporting `(port, host) =>
/// Promise`.
///
/// The program builds a fresh composition container, loads the three core
/// modules (lifecycle, messaging, logger) in fixed order, then every
/// caller-supplied backend module in list order, awaits CLI
/// initialization, mounts static assets, and starts the listener. Any
/// failure along the way falls through to a single catch that writes a
/// diagnostic to stderr and rethrows — the pipeline is fail-fast, loaded
/// container modules are never unloaded.
pub fn compile_server(modules: &[BackendModule]) -> String {
    format!(
        r#"// @ts-check
require('reflect-metadata');
const path = require('path');
const express = require('express');
const {{ Container }} = require('inversify');

const {{ BackendApplication, CliManager }} = require('@bootforge/core/lib/node');
const {{ backendApplicationModule }} = require('@bootforge/core/lib/node/backend-application-module');
const {{ messagingBackendModule }} = require('@bootforge/core/lib/node/messaging/messaging-backend-module');
const {{ loggerBackendModule }} = require('@bootforge/core/lib/node/logger-backend-module');

const container = new Container();
container.load(backendApplicationModule);
container.load(messagingBackendModule);
container.load(loggerBackendModule);

function load(raw) {{
    return Promise.resolve(raw.default).then(module =>
        container.load(module)
    );
}}

function start(port, host) {{
    const cliManager = container.get(CliManager);
    return cliManager.initializeCli().then(function () {{
        const application = container.get(BackendApplication);
        application.use(express.static(path.join(__dirname, '../../lib'), {{
            index: 'index.html'
        }}));
        return application.start(port, host);
    }});
}}

module.exports = (port, host) => Promise.resolve(){chain}
    .then(() => start(port, host)).catch(reason => {{
        console.error('Failed to start the backend application.');
        if (reason) {{
            console.error(reason);
        }}
        throw reason;
    }});
"#,
        chain = compile_module_load_chain(modules)
    )
}
