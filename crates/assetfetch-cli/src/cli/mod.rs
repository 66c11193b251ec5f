//! CLI for assetfetch.

mod commands;

use anyhow::Result;
use assetfetch_core::config;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{run_fetch, run_list, run_samples, FetchArgs};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "assetfetch")]
#[command(about = "Fetch sample model assets and batch-run graphics samples", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download assets into DEST: archives are unpacked into DEST/<stem>/, other files saved as DEST/<filename>.
    Fetch {
        /// Destination root directory (created if missing).
        dest: PathBuf,

        /// Asset manifest (TOML, or JSON by extension). Defaults to the built-in model set.
        #[arg(long, value_name = "FILE")]
        manifest: Option<PathBuf>,

        /// Fetch up to N assets concurrently (default from config, normally 1).
        #[arg(long, value_name = "N")]
        jobs: Option<usize>,

        /// Stop starting new assets after the first failure.
        #[arg(long)]
        fail_fast: bool,

        /// Whole-transfer timeout per asset, in seconds (at least 1).
        #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
        timeout: Option<u64>,
    },

    /// Show the assets a manifest resolves to, with their local names.
    List {
        /// Asset manifest (TOML or JSON). Defaults to the built-in model set.
        #[arg(long, value_name = "FILE")]
        manifest: Option<PathBuf>,
    },

    /// Launch every executable in the samples bin directory, one after another.
    RunSamples {
        /// Directory with built samples, relative to the working directory (default: build/bin).
        #[arg(long, value_name = "DIR")]
        bin_dir: Option<PathBuf>,

        /// Working directory for the samples (default: current directory).
        #[arg(long, value_name = "DIR")]
        working_dir: Option<PathBuf>,

        /// Arguments passed to every sample (default: --time 10 --fullscreen --vsync).
        #[arg(last = true)]
        args: Vec<String>,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Fetch {
                dest,
                manifest,
                jobs,
                fail_fast,
                timeout,
            } => {
                let args = FetchArgs {
                    dest,
                    manifest,
                    jobs,
                    fail_fast,
                    timeout,
                };
                run_fetch(&cfg, args).await?
            }
            CliCommand::List { manifest } => run_list(manifest.as_deref())?,
            CliCommand::RunSamples {
                bin_dir,
                working_dir,
                args,
            } => run_samples(&cfg, bin_dir, working_dir, args)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
