//! URL modeling and local name derivation.
//!
//! Archive assets are unpacked into a directory named after the URL's file
//! stem; direct assets keep the full file name.

mod name;
mod path;

pub use name::{file_stem, is_safe_local_name};
pub use path::filename_from_url_path;

/// Local name for an archive asset: final path segment without its extension.
///
/// - `archive_dir_name("https://host/model/bunny/bunny.zip")` → `Some("bunny")`
/// - `archive_dir_name("https://host/")` → `None`
pub fn archive_dir_name(url: &str) -> Option<String> {
    let segment = filename_from_url_path(url)?;
    let stem = file_stem(&segment);
    is_safe_local_name(stem).then(|| stem.to_string())
}

/// Local name for a direct asset: final path segment, extension retained.
pub fn direct_file_name(url: &str) -> Option<String> {
    filename_from_url_path(url).filter(|s| is_safe_local_name(s))
}
