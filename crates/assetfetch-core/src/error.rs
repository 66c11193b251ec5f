//! Error types shared by the fetcher, manifest loader, and HTTP layer.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::archive::ExtractError;
use crate::http::HttpError;

/// Failure of a single asset. Always names the URL it belongs to.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Host unreachable, non-2xx status, or transfer timeout.
    #[error("network error for {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: HttpError,
    },

    /// Downloaded bytes are not a readable zip archive.
    #[error("archive error for {url}: {source}")]
    Archive {
        url: String,
        #[source]
        source: zip::result::ZipError,
    },

    /// Directory creation, file write, rename, or an archive entry that
    /// would land outside its target directory.
    #[error("filesystem error for {url}: cannot {stage} {}: {source}", .path.display())]
    Filesystem {
        url: String,
        stage: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FetchError {
    /// URL of the asset that failed.
    pub fn url(&self) -> &str {
        match self {
            FetchError::Network { url, .. }
            | FetchError::Archive { url, .. }
            | FetchError::Filesystem { url, .. } => url,
        }
    }

    /// Short kind label used in reports and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Network { .. } => "network",
            FetchError::Archive { .. } => "archive",
            FetchError::Filesystem { .. } => "filesystem",
        }
    }

    pub(crate) fn filesystem(
        url: &str,
        stage: &'static str,
        path: impl Into<PathBuf>,
        source: io::Error,
    ) -> Self {
        FetchError::Filesystem {
            url: url.to_string(),
            stage,
            path: path.into(),
            source,
        }
    }

    /// Map an HTTP failure. Sink write errors are filesystem errors against `sink_path`.
    pub(crate) fn from_http(url: &str, sink_path: &std::path::Path, err: HttpError) -> Self {
        match err {
            HttpError::Write(source) => FetchError::filesystem(url, "write", sink_path, source),
            other => FetchError::Network {
                url: url.to_string(),
                source: other,
            },
        }
    }

    /// Map an extraction failure for the archive fetched from `url`.
    pub(crate) fn from_extract(url: &str, err: ExtractError) -> Self {
        match err {
            ExtractError::Invalid(source) => FetchError::Archive {
                url: url.to_string(),
                source,
            },
            ExtractError::UnsafeEntry { target, name } => FetchError::filesystem(
                url,
                "extract",
                target,
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("archive entry {name:?} escapes the target directory"),
                ),
            ),
            ExtractError::Io { path, source } => {
                FetchError::filesystem(url, "extract", path, source)
            }
        }
    }
}

/// Errors raised while loading or validating an asset manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("invalid asset URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unsupported URL scheme {scheme:?} in {url} (expected http or https)")]
    UnsupportedScheme { url: String, scheme: String },

    #[error("cannot derive a local file name from {url}")]
    NoFileName { url: String },

    /// Two assets would be written to the same place under the destination root.
    #[error("assets {first} and {second} both map to {name:?} under the destination root")]
    NameCollision {
        name: String,
        first: String,
        second: String,
    },

    #[error("failed to read manifest {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse manifest {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },
}
