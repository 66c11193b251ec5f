//! `assetfetch fetch <dest>` – download and unpack every manifest asset.

use anyhow::Result;
use assetfetch_core::config::FetchConfig;
use assetfetch_core::fetcher::{self, AssetStatus, FailurePolicy, FetchOptions, FetchReport};
use std::path::PathBuf;
use std::time::Duration;

use super::load_manifest;

/// Flags of the fetch subcommand; `None` falls back to config.
#[derive(Debug)]
pub struct FetchArgs {
    pub dest: PathBuf,
    pub manifest: Option<PathBuf>,
    pub jobs: Option<usize>,
    pub fail_fast: bool,
    pub timeout: Option<u64>,
}

fn options_for(cfg: &FetchConfig, args: &FetchArgs) -> FetchOptions {
    let mut opts = FetchOptions::from_config(cfg);
    if let Some(jobs) = args.jobs {
        opts.jobs = jobs;
    }
    if args.fail_fast {
        opts.failure_policy = FailurePolicy::FailFast;
    }
    if let Some(secs) = args.timeout {
        opts.http.timeout = Duration::from_secs(secs);
    }
    opts
}

fn mib(bytes: u64) -> f64 {
    bytes as f64 / 1_048_576.0
}

fn print_report(report: &FetchReport) {
    for outcome in &report.outcomes {
        let name = &outcome.asset.local_name;
        match &outcome.status {
            AssetStatus::Done(s) => println!(
                "  {:<8} {:<24} {:>6} file(s) {:>9.2} MiB",
                "ok",
                name,
                s.files_written,
                mib(s.bytes_downloaded)
            ),
            AssetStatus::Failed(e) => println!("  {:<8} {:<24} {}", "FAILED", name, e),
            AssetStatus::Skipped => {
                println!("  {:<8} {:<24} {}", "skipped", name, outcome.asset.url)
            }
        }
    }
    println!(
        "{} ok, {} failed, {} skipped ({:.2} MiB downloaded)",
        report.succeeded(),
        report.failed(),
        report.skipped(),
        mib(report.bytes_downloaded())
    );
}

pub async fn run_fetch(cfg: &FetchConfig, args: FetchArgs) -> Result<()> {
    let manifest = load_manifest(args.manifest.as_deref())?;
    let opts = options_for(cfg, &args);
    println!(
        "Fetching {} asset(s) into {}",
        manifest.assets.len(),
        args.dest.display()
    );

    let report = fetcher::fetch_all(&manifest, &args.dest, &opts).await?;
    print_report(&report);

    if !report.is_success() {
        anyhow::bail!(
            "{} of {} asset(s) did not complete",
            report.failed() + report.skipped(),
            report.outcomes.len()
        );
    }
    Ok(())
}
