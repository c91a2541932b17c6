//! Core data model and pipeline traits for Bootforge, a generator that
//! synthesizes the startup modules of a pluggable Node.js application
//! backend.
//!
//! The crate holds what every generator backend needs: the application
//! manifest (which backend modules to load, in which order, for which
//! target platform), the error type, and the [`pipeline::Generator`]
//! trait that backends implement.

pub mod error;
pub mod pipeline;
pub mod project;
