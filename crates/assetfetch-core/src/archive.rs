//! Zip extraction.
//!
//! Entries keep their relative paths under the target directory. Entries
//! whose names would resolve outside it (absolute paths, `..` components)
//! are refused rather than skipped.

use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufReader, Read, Seek};
use std::path::{Path, PathBuf};

use zip::ZipArchive;

/// Error returned while opening or extracting an archive.
#[derive(Debug)]
pub enum ExtractError {
    /// Not a zip archive, or a corrupt/unsupported entry header.
    Invalid(zip::result::ZipError),
    /// Entry name escapes `target`.
    UnsafeEntry { target: PathBuf, name: String },
    /// Creating a directory or writing an entry failed.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractError::Invalid(e) => write!(f, "invalid archive: {}", e),
            ExtractError::UnsafeEntry { target, name } => write!(
                f,
                "entry {:?} escapes {}",
                name,
                target.display()
            ),
            ExtractError::Io { path, source } => write!(f, "{}: {}", path.display(), source),
        }
    }
}

impl std::error::Error for ExtractError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExtractError::Invalid(e) => Some(e),
            ExtractError::Io { source, .. } => Some(source),
            ExtractError::UnsafeEntry { .. } => None,
        }
    }
}

impl From<zip::result::ZipError> for ExtractError {
    fn from(e: zip::result::ZipError) -> Self {
        ExtractError::Invalid(e)
    }
}

fn io_err(path: &Path) -> impl FnOnce(io::Error) -> ExtractError + '_ {
    move |source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Open and validate a zip archive (reads the central directory).
pub fn open_zip<R: Read + Seek>(reader: R) -> Result<ZipArchive<R>, ExtractError> {
    Ok(ZipArchive::new(reader)?)
}

/// Extract every entry of `archive` into `target`. Returns the number of files written.
///
/// `target` and any intermediate directories are created as needed. Existing
/// files are overwritten; nothing is removed from `target` beforehand.
pub fn extract_zip<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    target: &Path,
) -> Result<usize, ExtractError> {
    fs::create_dir_all(target).map_err(io_err(target))?;

    let mut files_written = 0usize;
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        let relative = entry
            .enclosed_name()
            .ok_or_else(|| ExtractError::UnsafeEntry {
                target: target.to_path_buf(),
                name: entry.name().to_string(),
            })?;
        let out_path = target.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&out_path).map_err(io_err(&out_path))?;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent).map_err(io_err(parent))?;
        }
        let mut out = File::create(&out_path).map_err(io_err(&out_path))?;
        io::copy(&mut entry, &mut out).map_err(io_err(&out_path))?;
        files_written += 1;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Some(mode) = entry.unix_mode().map(|m| m & 0o777).filter(|m| *m != 0) {
                fs::set_permissions(&out_path, fs::Permissions::from_mode(mode))
                    .map_err(io_err(&out_path))?;
            }
        }
    }

    tracing::debug!(
        target_dir = %target.display(),
        entries = archive.len(),
        files_written,
        "archive extracted"
    );
    Ok(files_written)
}

/// Open the zip at `archive_path` and extract it into `target`.
pub fn extract_zip_file(archive_path: &Path, target: &Path) -> Result<usize, ExtractError> {
    let file = File::open(archive_path).map_err(io_err(archive_path))?;
    let mut archive = open_zip(BufReader::new(file))?;
    extract_zip(&mut archive, target)
}
