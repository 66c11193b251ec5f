//! Fetch every asset of a manifest into a destination root.
//!
//! Each asset is independent: one failing does not undo the others, and
//! under [`FailurePolicy::KeepGoing`] it does not stop them either. Transfers
//! are blocking curl calls, so each asset runs on a blocking worker; at most
//! `jobs` assets are in flight at once.

mod asset;
mod report;

pub use asset::fetch_one;
pub use report::{AssetOutcome, AssetStatus, AssetSummary, FetchReport};

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::config::FetchConfig;
use crate::http::HttpOptions;
use crate::manifest::{Asset, Manifest};

/// What to do with the remaining assets after one fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Attempt every asset and report each outcome.
    #[default]
    KeepGoing,
    /// Start no new assets after the first failure; the rest are reported as skipped.
    FailFast,
}

#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub http: HttpOptions,
    /// Maximum assets in flight (values below 1 are treated as 1).
    pub jobs: usize,
    pub failure_policy: FailurePolicy,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            http: HttpOptions::default(),
            jobs: 1,
            failure_policy: FailurePolicy::default(),
        }
    }
}

impl FetchOptions {
    pub fn from_config(cfg: &FetchConfig) -> Self {
        Self {
            http: cfg.http_options(),
            jobs: cfg.jobs,
            failure_policy: if cfg.fail_fast {
                FailurePolicy::FailFast
            } else {
                FailurePolicy::KeepGoing
            },
        }
    }
}

/// Validate `manifest`, create `destination_root`, and fetch every asset.
///
/// Manifest problems (bad URL, name collision) and an uncreatable root are
/// returned as `Err` before any download starts. Per-asset failures are
/// recorded in the report instead.
pub async fn fetch_all(
    manifest: &Manifest,
    destination_root: &Path,
    options: &FetchOptions,
) -> Result<FetchReport> {
    let assets = manifest.resolve()?;
    fetch_assets(assets, destination_root, options).await
}

/// Like [`fetch_all`] for assets that are already resolved.
pub async fn fetch_assets(
    assets: Vec<Asset>,
    destination_root: &Path,
    options: &FetchOptions,
) -> Result<FetchReport> {
    fs::create_dir_all(destination_root).with_context(|| {
        format!(
            "failed to create destination root {}",
            destination_root.display()
        )
    })?;
    tracing::info!(
        root = %destination_root.display(),
        assets = assets.len(),
        jobs = options.jobs,
        "fetch started"
    );

    let max_in_flight = options.jobs.max(1);
    let mut statuses: Vec<Option<AssetStatus>> = assets.iter().map(|_| None).collect();
    let mut join_set = tokio::task::JoinSet::new();
    let mut next = 0usize;
    let mut stop = false;

    loop {
        while !stop && join_set.len() < max_in_flight && next < assets.len() {
            let idx = next;
            next += 1;
            let asset = assets[idx].clone();
            let root = destination_root.to_path_buf();
            let http = options.http.clone();
            join_set.spawn_blocking(move || (idx, fetch_one(&asset, &root, &http)));
        }

        let Some(res) = join_set.join_next().await else {
            break;
        };
        let (idx, result) = res.map_err(|e| anyhow::anyhow!("asset task join: {}", e))?;
        statuses[idx] = Some(match result {
            Ok(summary) => AssetStatus::Done(summary),
            Err(e) => {
                if options.failure_policy == FailurePolicy::FailFast && !stop {
                    tracing::warn!("fail-fast: not starting remaining assets");
                    stop = true;
                }
                AssetStatus::Failed(e)
            }
        });
    }

    let outcomes = assets
        .into_iter()
        .zip(statuses)
        .map(|(asset, status)| AssetOutcome {
            asset,
            status: status.unwrap_or(AssetStatus::Skipped),
        })
        .collect();
    let report = FetchReport { outcomes };
    tracing::info!(
        succeeded = report.succeeded(),
        failed = report.failed(),
        skipped = report.skipped(),
        "fetch finished"
    );
    Ok(report)
}
