pub mod config;
pub mod error;
pub mod logging;

pub mod archive;
pub mod fetcher;
pub mod http;
pub mod manifest;
pub mod runner;
pub mod storage;
pub mod url_model;

pub use error::{FetchError, ManifestError};
pub use fetcher::{fetch_all, FailurePolicy, FetchOptions, FetchReport};
pub use manifest::{Asset, AssetEntry, AssetKind, Manifest};
