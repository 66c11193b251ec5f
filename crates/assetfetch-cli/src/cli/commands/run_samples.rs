//! `assetfetch run-samples` – launch every built sample in turn.

use anyhow::Result;
use assetfetch_core::config::FetchConfig;
use assetfetch_core::runner::{self, RunnerOptions, SampleStatus};
use std::path::PathBuf;

pub fn run_samples(
    cfg: &FetchConfig,
    bin_dir: Option<PathBuf>,
    working_dir: Option<PathBuf>,
    args: Vec<String>,
) -> Result<()> {
    let samples_cfg = cfg.samples();
    let working_dir = match working_dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let bin_dir = working_dir.join(bin_dir.unwrap_or(samples_cfg.bin_dir));
    let args = if args.is_empty() { samples_cfg.args } else { args };
    println!("{}", bin_dir.display());

    let report = runner::run_samples(&RunnerOptions {
        bin_dir,
        working_dir,
        args,
    })?;

    for o in &report.outcomes {
        let name = o
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        match &o.status {
            SampleStatus::Exited(0) => println!("  {:<8} {}", "ok", name),
            SampleStatus::Exited(code) => println!("  {:<8} {} (exit {})", "FAILED", name, code),
            SampleStatus::Signaled => println!("  {:<8} {} (killed by signal)", "FAILED", name),
            SampleStatus::SpawnFailed(e) => println!("  {:<8} {} ({})", "FAILED", name, e),
        }
    }

    if report.outcomes.is_empty() {
        println!("No samples found.");
    } else if !report.is_success() {
        anyhow::bail!(
            "{} of {} sample(s) failed",
            report.failed(),
            report.outcomes.len()
        );
    }
    Ok(())
}
