//! Manifest file parsing (TOML or JSON by extension).

use std::fs;
use std::path::Path;

use super::Manifest;
use crate::error::ManifestError;

pub(super) fn load_from_path(path: &Path) -> Result<Manifest, ManifestError> {
    let data = fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    let parsed = if is_json {
        parse_json(&data)
    } else {
        parse_toml(&data)
    };
    parsed.map_err(|message| ManifestError::Parse {
        path: path.to_path_buf(),
        message,
    })
}

fn parse_toml(data: &str) -> Result<Manifest, String> {
    toml::from_str(data).map_err(|e| e.to_string())
}

fn parse_json(data: &str) -> Result<Manifest, String> {
    serde_json::from_str(data).map_err(|e| e.to_string())
}
