//! File lifecycle for downloaded assets.
//!
//! Direct assets are written to `<name>.part` and atomically renamed into
//! place once the transfer completes, so an interrupted run never leaves a
//! truncated file under the final name.

mod part;

pub use part::PartFile;

use std::path::{Path, PathBuf};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `noise.png` → `noise.png.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Create a scratch file for a streamed archive download inside `dir`.
///
/// Living next to the output keeps extraction on one filesystem; the file is
/// removed when the handle is dropped.
pub fn archive_scratch_file(dir: &Path) -> std::io::Result<tempfile::NamedTempFile> {
    tempfile::Builder::new()
        .prefix(".assetfetch-")
        .suffix(".zip.part")
        .tempfile_in(dir)
}
