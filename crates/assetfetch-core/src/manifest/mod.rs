//! Asset manifest: the list of remote assets to fetch.
//!
//! A manifest is either the built-in default set or a TOML/JSON file of
//! `{ url, kind }` records. [`Manifest::resolve`] validates it into
//! [`Asset`] descriptors with their derived local names.

mod builtin;
mod load;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ManifestError;
use crate::storage::TEMP_SUFFIX;
use crate::url_model;

/// How a fetched asset is placed under the destination root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    /// Zip bundle extracted into `<root>/<stem>/`.
    Archive,
    /// Single file saved verbatim as `<root>/<filename>`.
    Direct,
}

impl AssetKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AssetKind::Archive => "archive",
            AssetKind::Direct => "direct",
        }
    }
}

/// One manifest record. `kind` may be omitted; it is then inferred from the URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetEntry {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<AssetKind>,
}

impl AssetEntry {
    pub fn archive(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            kind: Some(AssetKind::Archive),
        }
    }

    pub fn direct(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            kind: Some(AssetKind::Direct),
        }
    }

    /// Explicit kind, or `Archive` for URLs whose file name ends in `.zip`.
    pub fn effective_kind(&self) -> AssetKind {
        self.kind.unwrap_or_else(|| {
            let is_zip = url_model::filename_from_url_path(&self.url)
                .map(|name| name.to_ascii_lowercase().ends_with(".zip"))
                .unwrap_or(false);
            if is_zip {
                AssetKind::Archive
            } else {
                AssetKind::Direct
            }
        })
    }
}

/// Ordered set of assets to fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(rename = "asset", default)]
    pub assets: Vec<AssetEntry>,
}

/// A validated asset with its local name under the destination root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub url: String,
    pub kind: AssetKind,
    pub local_name: String,
}

impl Asset {
    /// Validate a manifest entry and derive its local name.
    pub fn from_entry(entry: &AssetEntry) -> Result<Self, ManifestError> {
        let parsed = url::Url::parse(&entry.url).map_err(|source| ManifestError::InvalidUrl {
            url: entry.url.clone(),
            source,
        })?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ManifestError::UnsupportedScheme {
                url: entry.url.clone(),
                scheme: parsed.scheme().to_string(),
            });
        }

        let kind = entry.effective_kind();
        let local_name = match kind {
            AssetKind::Archive => url_model::archive_dir_name(&entry.url),
            AssetKind::Direct => url_model::direct_file_name(&entry.url),
        }
        .ok_or_else(|| ManifestError::NoFileName {
            url: entry.url.clone(),
        })?;

        Ok(Self {
            url: entry.url.clone(),
            kind,
            local_name,
        })
    }

    /// Where this asset ends up: a directory for archives, a file for direct assets.
    pub fn output_path(&self, destination_root: &Path) -> PathBuf {
        destination_root.join(&self.local_name)
    }
}

impl Manifest {
    pub fn new(assets: Vec<AssetEntry>) -> Self {
        Self { assets }
    }

    /// The stock model set used by the samples.
    pub fn builtin() -> Self {
        builtin::default_manifest()
    }

    /// Load a manifest file. `.json` files are parsed as JSON, anything else as TOML.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        load::load_from_path(path)
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Validate every entry and reject local-name collisions, including a name
    /// that matches the `.part` file another direct asset streams into.
    ///
    /// Runs before any network or filesystem work so a bad manifest never
    /// leaves a half-populated destination root.
    pub fn resolve(&self) -> Result<Vec<Asset>, ManifestError> {
        let mut seen: HashMap<String, String> = HashMap::with_capacity(self.assets.len());
        let mut resolved = Vec::with_capacity(self.assets.len());
        for entry in &self.assets {
            let asset = Asset::from_entry(entry)?;
            if let Some(first) = seen.get(&asset.local_name) {
                return Err(ManifestError::NameCollision {
                    name: asset.local_name,
                    first: first.clone(),
                    second: asset.url,
                });
            }
            seen.insert(asset.local_name.clone(), asset.url.clone());
            resolved.push(asset);
        }
        for asset in resolved.iter().filter(|a| a.kind == AssetKind::Direct) {
            let part_name = format!("{}{}", asset.local_name, TEMP_SUFFIX);
            if let Some(owner) = seen.get(&part_name) {
                return Err(ManifestError::NameCollision {
                    name: part_name,
                    first: owner.clone(),
                    second: asset.url.clone(),
                });
            }
        }
        Ok(resolved)
    }
}
