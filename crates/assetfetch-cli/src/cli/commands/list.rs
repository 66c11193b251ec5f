//! `assetfetch list` – show resolved assets.

use anyhow::Result;
use std::path::Path;

use super::load_manifest;

pub fn run_list(manifest_path: Option<&Path>) -> Result<()> {
    let assets = load_manifest(manifest_path)?.resolve()?;
    if assets.is_empty() {
        println!("No assets in manifest.");
        return Ok(());
    }
    println!("{:<8} {:<24} {}", "KIND", "NAME", "URL");
    for a in assets {
        println!("{:<8} {:<24} {}", a.kind.as_str(), a.local_name, a.url);
    }
    Ok(())
}
