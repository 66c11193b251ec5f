use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::http::{HttpOptions, DEFAULT_USER_AGENT};
use crate::runner::DEFAULT_SAMPLE_ARGS;

/// Sample runner settings (optional section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplesConfig {
    /// Directory holding the built sample executables.
    pub bin_dir: PathBuf,
    /// Arguments passed to every sample.
    pub args: Vec<String>,
}

impl Default for SamplesConfig {
    fn default() -> Self {
        Self {
            bin_dir: PathBuf::from("build/bin"),
            args: DEFAULT_SAMPLE_ARGS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Global configuration loaded from `~/.config/assetfetch/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// `User-Agent` sent with every request.
    pub user_agent: String,
    /// Connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Whole-transfer timeout in seconds.
    pub timeout_secs: u64,
    /// Maximum number of assets fetched concurrently.
    pub jobs: usize,
    /// Stop starting new assets after the first failure.
    pub fail_fast: bool,
    /// Optional sample runner section; if missing, built-in defaults are used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub samples: Option<SamplesConfig>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            connect_timeout_secs: 30,
            timeout_secs: 600,
            jobs: 1,
            fail_fast: false,
            samples: None,
        }
    }
}

/// curl reads a zero timeout as "never time out".
const MIN_TIMEOUT_SECS: u64 = 1;

impl FetchConfig {
    /// Transfer options; timeouts below one second are raised to one second.
    pub fn http_options(&self) -> HttpOptions {
        HttpOptions {
            user_agent: self.user_agent.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs.max(MIN_TIMEOUT_SECS)),
            timeout: Duration::from_secs(self.timeout_secs.max(MIN_TIMEOUT_SECS)),
            ..HttpOptions::default()
        }
    }

    pub fn samples(&self) -> SamplesConfig {
        self.samples.clone().unwrap_or_default()
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("assetfetch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<FetchConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = FetchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: FetchConfig = toml::from_str(&data)?;
    Ok(cfg)
}
