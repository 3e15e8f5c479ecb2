//! memalias-core
//!
//! Core library for finding aliased memory bindings: ranges of a device
//! memory allocation that are occupied by more than one resource at once.
//!
//! This crate defines the breakdown data model, the aliasing sweep, snapshot
//! loading, configuration, and report assembly. Frontends (the `memalias`
//! CLI) only parse flags and render.

pub mod analysis;
pub mod config;
pub mod model;
pub mod report;
pub mod snapshot;

/// Returns the library version as encoded at compile time.
///
/// Useful for tests and for frontends to report consistent version info.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
