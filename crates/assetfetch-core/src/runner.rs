//! Batch launcher for built sample executables.
//!
//! Every regular file in the bin directory is started in turn with the same
//! arguments and waited on. A sample that fails to start or exits non-zero
//! is recorded and the next one still runs.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

/// Run each sample for ten seconds, fullscreen, with vsync.
pub const DEFAULT_SAMPLE_ARGS: &[&str] = &["--time", "10", "--fullscreen", "--vsync"];

#[derive(Debug, Clone)]
pub struct RunnerOptions {
    pub bin_dir: PathBuf,
    /// Working directory for every sample (samples load assets relative to it).
    pub working_dir: PathBuf,
    pub args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SampleStatus {
    Exited(i32),
    /// Terminated by a signal (no exit code).
    Signaled,
    SpawnFailed(String),
}

#[derive(Debug, Clone)]
pub struct SampleOutcome {
    pub path: PathBuf,
    pub status: SampleStatus,
}

impl SampleOutcome {
    pub fn succeeded(&self) -> bool {
        self.status == SampleStatus::Exited(0)
    }
}

#[derive(Debug, Default)]
pub struct RunReport {
    pub outcomes: Vec<SampleOutcome>,
}

impl RunReport {
    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.succeeded()).count()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }
}

/// Regular files (or symlinks to them) in `bin_dir`, sorted by file name.
///
/// Returned paths are absolute: samples are spawned with a different working
/// directory, where a relative program path would no longer resolve.
pub fn list_samples(bin_dir: &Path) -> Result<Vec<PathBuf>> {
    let bin_dir = fs::canonicalize(bin_dir)
        .with_context(|| format!("failed to resolve sample directory {}", bin_dir.display()))?;
    let entries = fs::read_dir(&bin_dir)
        .with_context(|| format!("failed to list sample directory {}", bin_dir.display()))?;
    let mut samples = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("failed to read {}", bin_dir.display()))?;
        let path = entry.path();
        if path.is_file() {
            samples.push(path);
        }
    }
    samples.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(samples)
}

fn status_of(exit: ExitStatus) -> SampleStatus {
    match exit.code() {
        Some(code) => SampleStatus::Exited(code),
        None => SampleStatus::Signaled,
    }
}

/// Launch one sample and wait for it.
pub fn run_sample(path: &Path, working_dir: &Path, args: &[String]) -> SampleOutcome {
    tracing::info!(sample = %path.display(), ?args, "launching sample");
    let status = match Command::new(path).args(args).current_dir(working_dir).status() {
        Ok(exit) => status_of(exit),
        Err(e) => SampleStatus::SpawnFailed(e.to_string()),
    };
    if status != SampleStatus::Exited(0) {
        tracing::warn!(sample = %path.display(), ?status, "sample did not exit cleanly");
    }
    SampleOutcome {
        path: path.to_path_buf(),
        status,
    }
}

/// Launch every sample in `opts.bin_dir`, one after another.
pub fn run_samples(opts: &RunnerOptions) -> Result<RunReport> {
    let samples = list_samples(&opts.bin_dir)?;
    let outcomes = samples
        .iter()
        .map(|path| run_sample(path, &opts.working_dir, &opts.args))
        .collect();
    Ok(RunReport { outcomes })
}
