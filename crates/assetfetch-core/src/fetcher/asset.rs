//! Fetch and place one asset.

use std::fs;
use std::io::{BufReader, Write};
use std::path::Path;

use super::report::AssetSummary;
use crate::archive;
use crate::error::FetchError;
use crate::http::{self, HttpOptions};
use crate::manifest::{Asset, AssetKind};
use crate::storage::{self, PartFile};

/// Fetch `asset` into `destination_root`, which must already exist.
///
/// Blocking: performs the HTTP transfer and any extraction on the current thread.
pub fn fetch_one(
    asset: &Asset,
    destination_root: &Path,
    http_opts: &HttpOptions,
) -> Result<AssetSummary, FetchError> {
    tracing::info!(url = %asset.url, kind = asset.kind.as_str(), name = %asset.local_name, "fetching asset");
    let result = match asset.kind {
        AssetKind::Archive => fetch_archive(asset, destination_root, http_opts),
        AssetKind::Direct => fetch_direct(asset, destination_root, http_opts),
    };
    match &result {
        Ok(summary) => tracing::info!(
            url = %asset.url,
            bytes = summary.bytes_downloaded,
            files = summary.files_written,
            "asset done"
        ),
        Err(e) => tracing::warn!(url = %asset.url, kind = e.kind(), "asset failed: {}", e),
    }
    result
}

/// Stream the zip to a scratch file, validate it, then extract into `<root>/<stem>/`.
///
/// The subdirectory is only created once the download succeeded and the
/// archive opened, so a 404 or a corrupt body leaves no trace.
fn fetch_archive(
    asset: &Asset,
    destination_root: &Path,
    http_opts: &HttpOptions,
) -> Result<AssetSummary, FetchError> {
    let url = asset.url.as_str();
    let mut scratch = storage::archive_scratch_file(destination_root)
        .map_err(|e| FetchError::filesystem(url, "create temp file in", destination_root, e))?;
    let scratch_path = scratch.path().to_path_buf();

    let bytes_downloaded = http::download_to(url, http_opts, &mut scratch)
        .map_err(|e| FetchError::from_http(url, &scratch_path, e))?;
    scratch
        .flush()
        .map_err(|e| FetchError::filesystem(url, "write", &scratch_path, e))?;
    tracing::debug!(url, bytes = bytes_downloaded, "archive downloaded");

    let reader = scratch
        .reopen()
        .map_err(|e| FetchError::filesystem(url, "reopen", &scratch_path, e))?;
    let mut zip = archive::open_zip(BufReader::new(reader))
        .map_err(|e| FetchError::from_extract(url, e))?;

    let target = asset.output_path(destination_root);
    let files_written =
        archive::extract_zip(&mut zip, &target).map_err(|e| FetchError::from_extract(url, e))?;

    // `scratch` is removed here.
    Ok(AssetSummary {
        bytes_downloaded,
        files_written,
        output_path: target,
    })
}

/// Stream the body to `<root>/<filename>.part`, then rename into place.
fn fetch_direct(
    asset: &Asset,
    destination_root: &Path,
    http_opts: &HttpOptions,
) -> Result<AssetSummary, FetchError> {
    let url = asset.url.as_str();
    let final_path = asset.output_path(destination_root);
    if final_path.is_dir() {
        return Err(FetchError::filesystem(
            url,
            "write",
            &final_path,
            std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                "a directory already exists at this path",
            ),
        ));
    }

    let mut part = PartFile::create(&final_path)
        .map_err(|e| FetchError::filesystem(url, "create", storage::temp_path(&final_path), e))?;
    let part_path = part.temp_path().to_path_buf();

    let bytes_downloaded = match http::download_to(url, http_opts, &mut part) {
        Ok(n) => n,
        Err(e) => {
            part.discard();
            return Err(FetchError::from_http(url, &part_path, e));
        }
    };
    if let Err(e) = part.finalize(&final_path) {
        let _ = fs::remove_file(&part_path);
        return Err(FetchError::filesystem(url, "rename into", &final_path, e));
    }

    Ok(AssetSummary {
        bytes_downloaded,
        files_written: 1,
        output_path: final_path,
    })
}
