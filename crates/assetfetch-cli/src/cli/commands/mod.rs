//! CLI command handlers, one per file.

mod fetch;
mod list;
mod run_samples;

pub use fetch::{run_fetch, FetchArgs};
pub use list::run_list;
pub use run_samples::run_samples;

use anyhow::{Context, Result};
use assetfetch_core::Manifest;
use std::path::Path;

/// The manifest at `path`, or the built-in model set.
fn load_manifest(path: Option<&Path>) -> Result<Manifest> {
    match path {
        Some(p) => Manifest::load(p).with_context(|| format!("loading manifest {}", p.display())),
        None => Ok(Manifest::builtin()),
    }
}
