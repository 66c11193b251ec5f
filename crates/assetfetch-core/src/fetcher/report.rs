//! Per-asset outcomes of a fetch run.

use std::path::PathBuf;

use crate::error::FetchError;
use crate::manifest::Asset;

/// What a successfully fetched asset produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetSummary {
    /// Body bytes received over the network.
    pub bytes_downloaded: u64,
    /// Files written: archive entries for archives, 1 for direct assets.
    pub files_written: usize,
    /// Directory (archive) or file (direct) the asset was placed at.
    pub output_path: PathBuf,
}

#[derive(Debug)]
pub enum AssetStatus {
    Done(AssetSummary),
    Failed(FetchError),
    /// Not attempted because an earlier asset failed under fail-fast.
    Skipped,
}

#[derive(Debug)]
pub struct AssetOutcome {
    pub asset: Asset,
    pub status: AssetStatus,
}

impl AssetOutcome {
    pub fn is_done(&self) -> bool {
        matches!(self.status, AssetStatus::Done(_))
    }

    pub fn error(&self) -> Option<&FetchError> {
        match &self.status {
            AssetStatus::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// Outcomes in manifest order, one per asset.
#[derive(Debug, Default)]
pub struct FetchReport {
    pub outcomes: Vec<AssetOutcome>,
}

impl FetchReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_done()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.error().is_some()).count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, AssetStatus::Skipped))
            .count()
    }

    /// True when every asset completed.
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(AssetOutcome::is_done)
    }

    pub fn errors(&self) -> impl Iterator<Item = &FetchError> {
        self.outcomes.iter().filter_map(AssetOutcome::error)
    }

    pub fn bytes_downloaded(&self) -> u64 {
        self.outcomes
            .iter()
            .filter_map(|o| match &o.status {
                AssetStatus::Done(s) => Some(s.bytes_downloaded),
                _ => None,
            })
            .sum()
    }
}
